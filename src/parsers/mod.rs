//! BOM XML parsing.
//!
//! Parsing is a short pipeline:
//!
//! 1. [`XmlDocument::parse`] builds an element tree and rejects documents
//!    that are not well-formed ([`ParseError::XmlError`]).
//! 2. [`StrategyCascade`] tries the structured, generic `Component` and
//!    heuristic strategies in order and keeps the first that finds a
//!    referenced record.
//! 3. [`FieldResolver`] maps each raw record onto the canonical fields.
//! 4. [`expand_table`] splits compound designators (`R1-R3`, `C1,C2`).
//!
//! A well-formed document that no strategy recognizes yields an empty
//! table, not an error.
//!
//! ```no_run
//! use bom_diff::parsers::parse_bom;
//! use std::path::Path;
//!
//! let table = parse_bom(Path::new("board_rev_b.xml")).unwrap();
//! println!("{} components via {:?}", table.len(), table.metadata.dialect);
//! ```

mod detection;
mod generic;
mod heuristic;
mod structured;
mod traits;
pub mod xml;

pub use detection::{DetectionResult, StrategyCascade};
pub use generic::GenericComponentStrategy;
pub use heuristic::{HeuristicStrategy, CONTAINER_TAGS, REFERENCE_ATTRIBUTES, REFERENCE_TAGS};
pub use structured::StructuredStrategy;
pub use traits::{Extraction, ParseError, ParseStrategy, RawFields, RawRecord};
pub use xml::{XmlDocument, XmlElement};

use crate::expand::{expand_table, ExpandOptions};
use crate::model::{ComponentTable, SchemaDialect, TableMetadata};
use crate::normalize::{FieldAliases, FieldResolver};
use std::path::Path;

/// Maximum BOM file size (64 MB).
const MAX_BOM_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Configurable parser: cascade, field resolver and expansion settings.
pub struct BomParser {
    cascade: StrategyCascade,
    resolver: FieldResolver,
    expand: Option<ExpandOptions>,
}

impl Default for BomParser {
    fn default() -> Self {
        Self::new()
    }
}

impl BomParser {
    /// Built-in aliases, default expansion.
    #[must_use]
    pub fn new() -> Self {
        Self::with_aliases(FieldAliases::default())
    }

    /// Use a custom alias table for both the heuristic scan and resolution.
    #[must_use]
    pub fn with_aliases(aliases: FieldAliases) -> Self {
        Self {
            cascade: StrategyCascade::with_aliases(aliases.clone()),
            resolver: FieldResolver::new(aliases),
            expand: Some(ExpandOptions::default()),
        }
    }

    /// Set expansion options.
    #[must_use]
    pub fn with_expand_options(mut self, options: ExpandOptions) -> Self {
        self.expand = Some(options);
        self
    }

    /// Keep compound designators as they appear in the document.
    #[must_use]
    pub fn without_expansion(mut self) -> Self {
        self.expand = None;
        self
    }

    /// Parse XML text into a component table.
    pub fn parse_str(&self, content: &str) -> Result<ComponentTable, ParseError> {
        let document = XmlDocument::parse(content)?;
        let detection = self.cascade.detect(&document);
        let table = self.build_table(&detection);

        let table = match &self.expand {
            Some(options) => expand_table(&table, options),
            None => table,
        };

        if detection.no_components() {
            tracing::warn!("No components found: document matched none of the known BOM layouts");
        }
        table.log_collision_summary();
        Ok(table)
    }

    /// Read and parse a BOM file.
    pub fn parse_file(&self, path: &Path) -> Result<ComponentTable, ParseError> {
        let metadata = std::fs::metadata(path)?;
        if metadata.len() > MAX_BOM_FILE_SIZE {
            return Err(ParseError::IoError(format!(
                "BOM file is {} MB, exceeding the {} MB limit",
                metadata.len() / (1024 * 1024),
                MAX_BOM_FILE_SIZE / (1024 * 1024),
            )));
        }
        let content = std::fs::read_to_string(path)?;
        self.parse_str(&content)
    }

    /// Run only the cascade, returning raw records.
    pub fn detect_str(&self, content: &str) -> Result<DetectionResult, ParseError> {
        let document = XmlDocument::parse(content)?;
        Ok(self.cascade.detect(&document))
    }

    fn build_table(&self, detection: &DetectionResult) -> ComponentTable {
        let mut table = ComponentTable::new(TableMetadata {
            dialect: detection.dialect,
            records_seen: detection.extraction.seen,
            records_skipped: detection.extraction.skipped,
            expanded: false,
        });
        for record in &detection.extraction.records {
            table.insert(self.resolver.resolve_record(record));
        }
        table
    }
}

/// Parse a BOM file with default settings.
pub fn parse_bom(path: &Path) -> Result<ComponentTable, ParseError> {
    BomParser::new().parse_file(path)
}

/// Parse BOM XML text with default settings.
pub fn parse_bom_str(content: &str) -> Result<ComponentTable, ParseError> {
    BomParser::new().parse_str(content)
}

/// Identify the dialect of BOM XML text without building a table.
///
/// `Ok(None)` means the document is well-formed but unrecognized.
pub fn detect_dialect(content: &str) -> Result<Option<SchemaDialect>, ParseError> {
    Ok(BomParser::new().detect_str(content)?.dialect)
}
