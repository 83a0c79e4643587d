//! Summary and table report generators for shell output.
//!
//! Provides compact, human-readable output for terminal usage.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::DiffResult;
use crate::model::{Component, ComponentTable};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn plural(count: usize) -> &'static str {
    if count == 1 {
        "component"
    } else {
        "components"
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn dialect_line(&self, label: &str, table: &ComponentTable) -> String {
        let dialect = table
            .metadata
            .dialect
            .map_or_else(|| "unrecognized".to_string(), |d| d.to_string());
        format!(
            "{}  {} components ({} inactive), {}",
            self.color(label, "cyan"),
            table.len(),
            table.inactive_count(),
            dialect
        )
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_diff_report(
        &self,
        result: &DiffResult,
        old_table: &ComponentTable,
        new_table: &ComponentTable,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        lines.push(self.color("BOM Diff Summary", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        let old_name = config.metadata.old_bom_path.as_deref().unwrap_or("old");
        let new_name = config.metadata.new_bom_path.as_deref().unwrap_or("new");
        lines.push(format!(
            "{}  {} → {}",
            self.color("Files:", "cyan"),
            old_name,
            new_name
        ));
        lines.push(self.dialect_line("Old:  ", old_table));
        lines.push(self.dialect_line("New:  ", new_table));

        lines.push(String::new());
        lines.push(self.color("Changes:", "bold"));

        let summary = &result.summary;
        if summary.added > 0 {
            lines.push(format!(
                "  {} {} added",
                self.color(&format!("+{}", summary.added), "green"),
                plural(summary.added)
            ));
        }
        if summary.removed > 0 {
            lines.push(format!(
                "  {} {} removed",
                self.color(&format!("-{}", summary.removed), "red"),
                plural(summary.removed)
            ));
        }
        if summary.changed > 0 {
            lines.push(format!(
                "  {} {} changed",
                self.color(&format!("~{}", summary.changed), "yellow"),
                plural(summary.changed)
            ));
        }
        if !result.has_changes() {
            lines.push(format!("  {}", self.color("No changes", "dim")));
        }
        lines.push(format!(
            "  {} {} unchanged",
            self.color(&format!("={}", summary.unchanged), "dim"),
            plural(summary.unchanged)
        ));

        let fields: Vec<&str> = result.significant_fields.iter().map(|f| f.name()).collect();
        lines.push(String::new());
        lines.push(format!(
            "{}  {}",
            self.color("Compared:", "cyan"),
            fields.join(", ")
        ));

        Ok(lines.join("\n") + "\n")
    }

    fn generate_view_report(
        &self,
        table: &ComponentTable,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        lines.push(self.color("BOM Summary", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        if let Some(path) = config.metadata.new_bom_path.as_deref() {
            lines.push(format!("{}  {}", self.color("File:", "cyan"), path));
        }
        lines.push(self.dialect_line("BOM:  ", table));
        lines.push(format!(
            "{}  {} seen, {} skipped without reference",
            self.color("Records:", "cyan"),
            table.metadata.records_seen,
            table.metadata.records_skipped
        ));
        Ok(lines.join("\n") + "\n")
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

// ============================================================================
// Table Reporter
// ============================================================================

const STATUS_WIDTH: usize = 11;
const REFERENCE_WIDTH: usize = 10;
const PART_WIDTH: usize = 22;
const DETAIL_WIDTH: usize = 36;

/// Table reporter for aligned terminal output
pub struct TableReporter {
    /// Use colored output
    colored: bool,
}

impl TableReporter {
    /// Create a new table reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    /// Pad before coloring so escape codes do not count toward the width.
    fn cell(&self, text: &str, width: usize, color: &str) -> String {
        self.color(&pad(&truncate(text, width), width), color)
    }

    fn row(&self, status: (&str, &str), reference: &str, part: &str, detail: &str) -> String {
        format!(
            "{} {} {} {}",
            self.cell(status.0, STATUS_WIDTH, status.1),
            self.cell(reference, REFERENCE_WIDTH, ""),
            self.cell(part, PART_WIDTH, ""),
            truncate(detail, DETAIL_WIDTH)
        )
    }

    fn header(&self, columns: [&str; 4]) -> Vec<String> {
        let line = format!(
            "{} {} {} {}",
            self.cell(columns[0], STATUS_WIDTH, "bold"),
            self.cell(columns[1], REFERENCE_WIDTH, "bold"),
            self.cell(columns[2], PART_WIDTH, "bold"),
            self.color(columns[3], "bold")
        );
        vec![
            line,
            "─".repeat(STATUS_WIDTH + REFERENCE_WIDTH + PART_WIDTH + DETAIL_WIDTH + 3),
        ]
    }
}

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn limited<'a, T>(items: &'a [T], config: &ReportConfig) -> &'a [T] {
    config
        .max_items
        .map_or(items, |max| &items[..items.len().min(max)])
}

fn describe(component: &Component) -> String {
    let fields = &component.fields;
    let mut parts = Vec::new();
    if !fields.quantity.is_empty() {
        parts.push(format!("qty {}", fields.quantity));
    }
    if !component.is_active() {
        parts.push("NA".to_string());
    }
    if !fields.description.is_empty() {
        parts.push(fields.description.clone());
    }
    parts.join(", ")
}

impl ReportGenerator for TableReporter {
    fn generate_diff_report(
        &self,
        result: &DiffResult,
        _old_table: &ComponentTable,
        _new_table: &ComponentTable,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = self.header(["STATUS", "REFERENCE", "PART NUMBER", "DETAIL"]);

        for comp in limited(&result.added, config) {
            lines.push(self.row(
                ("+ Added", "green"),
                &comp.reference,
                &comp.fields.part_number,
                &describe(comp),
            ));
        }

        for comp in limited(&result.removed, config) {
            lines.push(self.row(
                ("- Removed", "red"),
                &comp.reference,
                &comp.fields.part_number,
                &describe(comp),
            ));
        }

        for change in limited(&result.changed, config) {
            let detail: Vec<String> = change
                .significant_changes()
                .map(|c| format!("{}: {} → {}", c.field.label(), c.old, c.new))
                .collect();
            lines.push(self.row(
                ("~ Changed", "yellow"),
                &change.reference,
                &change.modified.fields.part_number,
                &detail.join("; "),
            ));
        }

        if config.include_unchanged {
            for reference in limited(&result.unchanged, config) {
                lines.push(self.row(("= Same", "dim"), reference, "", ""));
            }
        }

        lines.push(String::new());
        let summary = &result.summary;
        lines.push(format!(
            "{} added, {} removed, {} changed, {} unchanged",
            summary.added, summary.removed, summary.changed, summary.unchanged
        ));

        Ok(lines.join("\n") + "\n")
    }

    fn generate_view_report(
        &self,
        table: &ComponentTable,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = self.header(["STATUS", "REFERENCE", "PART NUMBER", "DESCRIPTION"]);

        let components: Vec<&Component> = table.iter().collect();
        for comp in limited(&components, config) {
            let status = if comp.is_active() {
                ("active", "")
            } else {
                ("inactive", "dim")
            };
            lines.push(self.row(
                status,
                &comp.reference,
                &comp.fields.part_number,
                &comp.fields.description,
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "{} components, {} inactive",
            table.len(),
            table.inactive_count()
        ));
        Ok(lines.join("\n") + "\n")
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}

/// Right-pad to a display width.
fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(fill))
}

/// Truncate to a display width, marking the cut with `...`.
fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    if max_width > 3 {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffEngine;
    use crate::model::{CanonicalField, ComponentFields};

    fn table(rows: &[(&str, &str, &str)]) -> ComponentTable {
        rows.iter()
            .map(|(reference, part, qty)| {
                Component::new(
                    *reference,
                    ComponentFields::default()
                        .with(CanonicalField::PartNumber, *part)
                        .with(CanonicalField::Quantity, *qty),
                )
            })
            .collect()
    }

    #[test]
    fn test_summary_counts() {
        let old = table(&[("R1", "A", "1"), ("R2", "B", "1")]);
        let new = table(&[("R1", "A", "2"), ("R3", "C", "1")]);
        let result = DiffEngine::new().diff(&old, &new);
        let out = SummaryReporter::new()
            .no_color()
            .generate_diff_report(&result, &old, &new, &ReportConfig::default())
            .unwrap();
        assert!(out.contains("+1 component added"));
        assert!(out.contains("-1 component removed"));
        assert!(out.contains("~1 component changed"));
        assert!(out.contains("=0 components unchanged"));
        assert!(out.contains("partNumber, optionalFlag, quantity, corpNum"));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn test_summary_no_changes() {
        let bom = table(&[("R1", "A", "1")]);
        let result = DiffEngine::new().diff(&bom, &bom);
        let out = SummaryReporter::new()
            .no_color()
            .generate_diff_report(&result, &bom, &bom, &ReportConfig::default())
            .unwrap();
        assert!(out.contains("No changes"));
    }

    #[test]
    fn test_table_rows_and_detail() {
        let old = table(&[("R1", "A", "1")]);
        let new = table(&[("R1", "A", "4")]);
        let result = DiffEngine::new().diff(&old, &new);
        let out = TableReporter::new()
            .no_color()
            .generate_diff_report(&result, &old, &new, &ReportConfig::default())
            .unwrap();
        let row = out.lines().find(|l| l.starts_with("~ Changed")).unwrap();
        assert!(row.contains("R1"));
        assert!(row.contains("Value: 1 → 4"));
    }

    #[test]
    fn test_table_max_items() {
        let new = table(&[("R1", "A", "1"), ("R2", "A", "1"), ("R3", "A", "1")]);
        let old = ComponentTable::default();
        let result = DiffEngine::new().diff(&old, &new);
        let config = ReportConfig {
            max_items: Some(2),
            ..ReportConfig::default()
        };
        let out = TableReporter::new()
            .no_color()
            .generate_diff_report(&result, &old, &new, &config)
            .unwrap();
        assert_eq!(out.lines().filter(|l| l.starts_with("+ Added")).count(), 2);
        assert!(out.contains("3 added"));
    }

    #[test]
    fn test_pad_and_truncate_use_display_width() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("電阻", 6), "電阻  ");
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 6), "abc...");
        assert_eq!(truncate("電阻電阻電阻", 7), "電阻...");
    }
}
