//! Report output stage.
//!
//! Handles generating and writing diff and view reports.

use crate::config::{DiffConfig, ViewConfig};
use crate::diff::DiffResult;
use crate::model::ComponentTable;
use crate::reports::{create_reporter_with_options, ReportConfig, ReportMetadata};
use anyhow::{Context, Result};

use super::{auto_detect_format, should_use_color, write_output, OutputTarget};

/// Output a diff report to the configured destination.
pub fn output_report(
    config: &DiffConfig,
    result: &DiffResult,
    old_table: &ComponentTable,
    new_table: &ComponentTable,
) -> Result<()> {
    let output_target = OutputTarget::from_option(config.output.file.clone());
    let effective_output = auto_detect_format(config.output.format, &output_target);
    tracing::debug!(format = %effective_output, "Rendering diff report");

    let report_config = ReportConfig {
        include_unchanged: config.comparison.include_unchanged,
        metadata: ReportMetadata::for_diff(
            config.paths.old.to_string_lossy(),
            config.paths.new.to_string_lossy(),
        ),
        ..ReportConfig::default()
    };

    let use_color = should_use_color(config.output.no_color, &output_target);
    let reporter = create_reporter_with_options(effective_output, use_color);
    let report = reporter
        .generate_diff_report(result, old_table, new_table, &report_config)
        .context("Failed to generate diff report")?;

    write_output(&report, &output_target, config.behavior.quiet)
}

/// Output a single-BOM report, or its knowledge-base documents.
pub fn output_view_report(config: &ViewConfig, table: &ComponentTable) -> Result<()> {
    let output_target = OutputTarget::from_option(config.output.file.clone());

    let report = if config.documents {
        render_documents(table, &config.bom_path.to_string_lossy())?
    } else {
        let effective_output = auto_detect_format(config.output.format, &output_target);
        let use_color = should_use_color(config.output.no_color, &output_target);
        let report_config = ReportConfig {
            metadata: ReportMetadata::for_view(config.bom_path.to_string_lossy()),
            ..ReportConfig::default()
        };
        create_reporter_with_options(effective_output, use_color)
            .generate_view_report(table, &report_config)
            .context("Failed to generate view report")?
    };

    write_output(&report, &output_target, config.behavior.quiet)
}

/// One JSON object per line, keyed by the file stem.
fn render_documents(table: &ComponentTable, path: &str) -> crate::error::Result<String> {
    let source = std::path::Path::new(path)
        .file_stem()
        .map_or_else(|| path.to_string(), |s| s.to_string_lossy().into_owned());

    let mut out = String::new();
    for document in table.to_documents(&source) {
        out.push_str(&serde_json::to_string(&document)?);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CanonicalField, Component, ComponentFields};

    #[test]
    fn test_render_documents() {
        let table: ComponentTable = [
            Component::new(
                "R1",
                ComponentFields::default().with(CanonicalField::PartNumber, "P1"),
            ),
            Component::new("R2", ComponentFields::default()),
        ]
        .into_iter()
        .collect();

        let out = render_documents(&table, "/boards/main_rev_c.xml").unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["id"], "main_rev_c_0_R1");
        assert!(first["text"]
            .as_str()
            .unwrap()
            .starts_with("Reference: R1 | Part Number: P1"));
    }
}
