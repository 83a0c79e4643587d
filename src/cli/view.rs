//! View command handler.
//!
//! Implements the `view` subcommand for inspecting a single BOM.

use crate::config::{Validatable, ViewConfig};
use crate::pipeline::{exit_codes, output_view_report, parse_bom_with_context, PipelineError};
use crate::error::BomDiffError;
use anyhow::Result;

/// Run the view command
#[allow(clippy::needless_pass_by_value)]
pub fn run_view(config: ViewConfig) -> Result<i32> {
    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        return Err(BomDiffError::config(format!(
            "view options:\n  {}",
            messages.join("\n  ")
        ))
        .into());
    }

    let parsed = parse_bom_with_context(&config.bom_path, &config.parsing, config.behavior.quiet)?;

    output_view_report(&config, parsed.table())
        .map_err(|source| PipelineError::ReportFailed { source })?;

    if config.behavior.fail_on_empty && parsed.no_components() {
        return Ok(exit_codes::NO_COMPONENTS);
    }
    Ok(exit_codes::SUCCESS)
}
