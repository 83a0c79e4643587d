//! BOM parsing stage.
//!
//! Reads and parses BOM files with path context; a diff parses both sides
//! concurrently.

use super::PipelineError;
use crate::config::ParsingConfig;
use crate::error::ErrorContext;
use crate::model::ComponentTable;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// A parsed BOM together with where it came from.
#[derive(Debug, Clone)]
pub struct ParsedBom {
    /// Source file
    pub path: PathBuf,
    /// Expanded, normalized component table
    pub table: ComponentTable,
    /// Wall-clock time spent reading and parsing
    pub elapsed: Duration,
}

impl ParsedBom {
    /// Get a reference to the table
    #[must_use]
    pub const fn table(&self) -> &ComponentTable {
        &self.table
    }

    /// Consume and return the inner table
    #[must_use]
    pub fn into_table(self) -> ComponentTable {
        self.table
    }

    /// No parser strategy produced a component.
    #[must_use]
    pub fn no_components(&self) -> bool {
        self.table.metadata.dialect.is_none()
    }

    /// Path as a display string for reports.
    #[must_use]
    pub fn display_path(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// Parse a BOM file with context for error messages.
pub fn parse_bom_with_context(
    path: &Path,
    parsing: &ParsingConfig,
    quiet: bool,
) -> Result<ParsedBom, PipelineError> {
    if !quiet {
        tracing::info!("Parsing BOM: {}", path.display());
    }

    let started = Instant::now();
    let table = parsing
        .build_parser()
        .parse_file(path)
        .with_context(|| format!("reading {}", path.display()))
        .map_err(|source| PipelineError::ParseFailed {
            path: path.display().to_string(),
            source,
        })?;
    let elapsed = started.elapsed();

    let parsed = ParsedBom {
        path: path.to_path_buf(),
        table,
        elapsed,
    };

    if parsed.no_components() {
        tracing::warn!("No components found in {}", path.display());
    } else if !quiet {
        tracing::info!(
            dialect = ?parsed.table.metadata.dialect,
            elapsed_ms = elapsed.as_millis(),
            "Parsed {} components",
            parsed.table.len()
        );
    }

    Ok(parsed)
}

/// Parse the old and new BOMs in parallel.
pub fn parse_pair(
    old: &Path,
    new: &Path,
    parsing: &ParsingConfig,
    quiet: bool,
) -> Result<(ParsedBom, ParsedBom), PipelineError> {
    let (old_result, new_result) = rayon::join(
        || parse_bom_with_context(old, parsing, quiet),
        || parse_bom_with_context(new, parsing, quiet),
    );
    Ok((old_result?, new_result?))
}
