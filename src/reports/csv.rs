//! CSV report generator.
//!
//! Generates comma-separated reports for diff and view modes,
//! suitable for spreadsheet import.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::DiffResult;
use crate::model::{CanonicalField, Component, ComponentTable};
use std::fmt::Write;

/// CSV report generator.
pub struct CsvReporter;

impl CsvReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for CsvReporter {
    fn generate_diff_report(
        &self,
        result: &DiffResult,
        _old_table: &ComponentTable,
        _new_table: &ComponentTable,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut content = String::new();
        content.push_str("Change,Reference");
        write_field_headers(&mut content)?;
        content.push_str(",Changed Fields\n");

        for comp in &result.added {
            write_row(&mut content, "Added", comp, "")?;
        }
        for comp in &result.removed {
            write_row(&mut content, "Removed", comp, "")?;
        }
        for change in &result.changed {
            let changed_fields: Vec<&str> = change
                .significant_changes()
                .map(|c| c.field.name())
                .collect();
            write_row(&mut content, "Changed", &change.modified, &changed_fields.join(";"))?;
        }

        Ok(content)
    }

    fn generate_view_report(
        &self,
        table: &ComponentTable,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut content = String::new();
        content.push_str("Reference");
        write_field_headers(&mut content)?;
        content.push_str(",Status\n");

        for comp in table.iter() {
            write!(content, "\"{}\"", escape_csv(&comp.reference))?;
            write_field_values(&mut content, comp)?;
            writeln!(content, ",{}", comp.status())?;
        }

        Ok(content)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}

fn write_field_headers(content: &mut String) -> std::fmt::Result {
    for field in CanonicalField::ALL {
        write!(content, ",{}", field.label())?;
    }
    Ok(())
}

fn write_field_values(content: &mut String, comp: &Component) -> std::fmt::Result {
    for (_, value) in comp.fields.iter() {
        write!(content, ",\"{}\"", escape_csv(value))?;
    }
    Ok(())
}

fn write_row(
    content: &mut String,
    change: &str,
    comp: &Component,
    changed_fields: &str,
) -> std::fmt::Result {
    write!(content, "{change},\"{}\"", escape_csv(&comp.reference))?;
    write_field_values(content, comp)?;
    writeln!(content, ",\"{changed_fields}\"")
}

/// Escape a string for CSV embedding: double-quote escaping per RFC 4180,
/// plus newline flattening since fields are already wrapped in double quotes.
fn escape_csv(s: &str) -> String {
    s.replace('"', "\"\"").replace(['\r', '\n'], " ")
}
