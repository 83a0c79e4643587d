//! Diff computation stage.
//!
//! Builds the engine from the comparison settings and runs it.

use super::PipelineError;
use crate::config::ComparisonConfig;
use crate::diff::DiffResult;
use crate::model::ComponentTable;

/// Run the diff between two parsed tables.
pub fn compute_diff(
    comparison: &ComparisonConfig,
    old_table: &ComponentTable,
    new_table: &ComponentTable,
    quiet: bool,
) -> Result<DiffResult, PipelineError> {
    let engine = comparison
        .build_engine()
        .map_err(|source| PipelineError::DiffFailed { source })?;

    if !quiet {
        tracing::info!("Computing component diff...");
    }

    let result = engine.diff(old_table, new_table);

    if !quiet {
        let summary = &result.summary;
        tracing::info!(
            "Diff complete: {} added, {} removed, {} changed, {} unchanged",
            summary.added,
            summary.removed,
            summary.changed,
            summary.unchanged
        );
    }

    Ok(result)
}
