//! Diff command handler.
//!
//! Implements the `diff` subcommand for comparing two BOMs.

use crate::config::{DiffConfig, Validatable};
use crate::diff::DiffResult;
use crate::pipeline::{compute_diff, exit_codes, output_report, parse_pair, PipelineError};
use crate::error::BomDiffError;
use anyhow::Result;

/// Run the diff command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff(config: DiffConfig) -> Result<i32> {
    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        return Err(BomDiffError::config(format!(
            "diff options:\n  {}",
            messages.join("\n  ")
        ))
        .into());
    }

    let quiet = config.behavior.quiet;
    let (old_parsed, new_parsed) =
        parse_pair(&config.paths.old, &config.paths.new, &config.parsing, quiet)?;

    if !quiet {
        tracing::info!(
            "Parsed {} components from old BOM, {} from new BOM",
            old_parsed.table.len(),
            new_parsed.table.len()
        );
    }

    let result = compute_diff(
        &config.comparison,
        &old_parsed.table,
        &new_parsed.table,
        quiet,
    )?;

    output_report(&config, &result, &old_parsed.table, &new_parsed.table)
        .map_err(|source| PipelineError::ReportFailed { source })?;

    let any_empty = old_parsed.no_components() || new_parsed.no_components();
    Ok(determine_exit_code(&config, &result, any_empty))
}

/// Determine the appropriate exit code based on diff results and config flags.
const fn determine_exit_code(config: &DiffConfig, result: &DiffResult, any_empty: bool) -> i32 {
    if config.behavior.fail_on_empty && any_empty {
        return exit_codes::NO_COMPONENTS;
    }
    if config.behavior.fail_on_change && result.summary.total_changes > 0 {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, DiffPaths};
    use crate::reports::ReportFormat;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const OLD: &str = "<BOM><DETAILS>\
        <RECORD><REFDES>R1</REFDES><PART-NUM>A</PART-NUM><QTY>1</QTY></RECORD>\
        </DETAILS></BOM>";
    const NEW: &str = "<BOM><DETAILS>\
        <RECORD><REFDES>R1</REFDES><PART-NUM>B</PART-NUM><QTY>1</QTY></RECORD>\
        </DETAILS></BOM>";

    fn config(dir: &Path, old: &str, new: &str, app: AppConfig) -> DiffConfig {
        let old_path = dir.join("old.xml");
        let new_path = dir.join("new.xml");
        std::fs::write(&old_path, old).unwrap();
        std::fs::write(&new_path, new).unwrap();
        DiffConfig::from_app(
            DiffPaths {
                old: old_path,
                new: new_path,
            },
            app,
        )
    }

    fn json_to_file(dir: &Path) -> AppConfig {
        AppConfig::builder()
            .output_format(ReportFormat::Json)
            .output_file(Some(dir.join("out.json")))
            .quiet(true)
            .build()
    }

    #[test]
    fn test_run_diff_writes_report() {
        let tmp = TempDir::new().unwrap();
        let cfg = config(tmp.path(), OLD, NEW, json_to_file(tmp.path()));
        assert_eq!(run_diff(cfg).unwrap(), exit_codes::SUCCESS);

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(tmp.path().join("out.json")).unwrap())
                .unwrap();
        assert_eq!(report["summary"]["changed"], 1);
    }

    #[test]
    fn test_fail_on_change() {
        let tmp = TempDir::new().unwrap();
        let mut app = json_to_file(tmp.path());
        app.behavior.fail_on_change = true;
        let cfg = config(tmp.path(), OLD, NEW, app.clone());
        assert_eq!(run_diff(cfg).unwrap(), exit_codes::CHANGES_DETECTED);

        let cfg = config(tmp.path(), OLD, OLD, app);
        assert_eq!(run_diff(cfg).unwrap(), exit_codes::SUCCESS);
    }

    #[test]
    fn test_fail_on_empty_wins() {
        let tmp = TempDir::new().unwrap();
        let mut app = json_to_file(tmp.path());
        app.behavior.fail_on_change = true;
        app.behavior.fail_on_empty = true;
        let cfg = config(tmp.path(), OLD, "<unrelated/>", app);
        assert_eq!(run_diff(cfg).unwrap(), exit_codes::NO_COMPONENTS);
    }

    #[test]
    fn test_malformed_input_is_error() {
        let tmp = TempDir::new().unwrap();
        let cfg = config(tmp.path(), OLD, "<BOM><DETAILS>", json_to_file(tmp.path()));
        assert!(run_diff(cfg).is_err());
    }

    #[test]
    fn test_missing_input_is_error() {
        let cfg = DiffConfig::from_app(
            DiffPaths {
                old: PathBuf::from("/nonexistent/a.xml"),
                new: PathBuf::from("/nonexistent/b.xml"),
            },
            AppConfig::default(),
        );
        let err = run_diff(cfg).unwrap_err();
        assert!(err.to_string().contains("paths.old"));
    }
}
