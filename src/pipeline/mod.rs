//! Pipeline orchestration for BOM operations.
//!
//! This module provides shared orchestration logic for parse → diff → report
//! workflows, reducing duplication across CLI command handlers.

mod diff_stage;
mod output;
mod parse;
mod report_stage;

pub use diff_stage::compute_diff;
pub use output::{auto_detect_format, should_use_color, write_output, OutputTarget};
pub use parse::{parse_bom_with_context, parse_pair, ParsedBom};
pub use report_stage::{output_report, output_view_report};

use crate::error::BomDiffError;

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or parse a BOM file
    #[error("Parse failed for {path}: {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: BomDiffError,
    },

    /// Diff engine could not be built from the configuration
    #[error("Diff failed: {source}")]
    DiffFailed {
        #[source]
        source: BomDiffError,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no changes detected (or no `--fail-on-change`)
    pub const SUCCESS: i32 = 0;
    /// Changes were detected
    pub const CHANGES_DETECTED: i32 = 1;
    /// A document yielded no components
    pub const NO_COMPONENTS: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
