//! JSON report generator.
//!
//! Components are rendered with the field names clients expect
//! (`value` for quantity, `opt`, `manufacturer` for the corp number) rather
//! than the internal canonical names.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{ComponentChange, DiffResult, DiffSummary, FieldChange};
use crate::model::{CanonicalField, Component, ComponentStatus, ComponentTable, SchemaDialect};
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Whether to only include the summary
    summary_only: bool,
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            summary_only: false,
            pretty: true,
        }
    }

    /// Create a summary-only reporter
    #[must_use]
    pub const fn summary_only() -> Self {
        Self {
            summary_only: true,
            pretty: true,
        }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn render<T: Serialize>(&self, value: &T) -> Result<String, ReportError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_diff_report(
        &self,
        result: &DiffResult,
        old_table: &ComponentTable,
        new_table: &ComponentTable,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let report = JsonDiffReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo::current(),
                generated_at: generated_at(config),
                old_bom: Some(BomInfo::new(old_table, config.metadata.old_bom_path.as_deref())),
                new_bom: BomInfo::new(new_table, config.metadata.new_bom_path.as_deref()),
            },
            significant_fields: &result.significant_fields,
            summary: JsonSummary::from(&result.summary),
            changes: if self.summary_only {
                None
            } else {
                Some(JsonChanges {
                    added: result.added.iter().map(ClientComponent::from).collect(),
                    removed: result.removed.iter().map(ClientComponent::from).collect(),
                    changed: result
                        .changed
                        .iter()
                        .map(|change| JsonChange::new(change, config.include_field_changes))
                        .collect(),
                    unchanged: (config.include_unchanged || !result.unchanged.is_empty())
                        .then_some(&result.unchanged),
                })
            },
        };
        self.render(&report)
    }

    fn generate_view_report(
        &self,
        table: &ComponentTable,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let report = JsonViewReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo::current(),
                generated_at: generated_at(config),
                old_bom: None,
                new_bom: BomInfo::new(table, config.metadata.new_bom_path.as_deref()),
            },
            components: (!self.summary_only)
                .then(|| table.iter().map(ClientComponent::from).collect()),
        };
        self.render(&report)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

fn generated_at(config: &ReportConfig) -> String {
    config
        .metadata
        .generated_at
        .clone()
        .unwrap_or_else(|| Utc::now().to_rfc3339())
}

// JSON structures for serialization

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonDiffReport<'a> {
    metadata: JsonReportMetadata<'a>,
    significant_fields: &'a [CanonicalField],
    summary: JsonSummary,
    #[serde(flatten)]
    changes: Option<JsonChanges<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonViewReport<'a> {
    metadata: JsonReportMetadata<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    components: Option<Vec<ClientComponent<'a>>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReportMetadata<'a> {
    tool: ToolInfo,
    generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    old_bom: Option<BomInfo<'a>>,
    new_bom: BomInfo<'a>,
}

#[derive(Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
}

impl ToolInfo {
    const fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BomInfo<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    file_path: Option<&'a str>,
    dialect: Option<SchemaDialect>,
    component_count: usize,
    inactive_count: usize,
}

impl<'a> BomInfo<'a> {
    fn new(table: &ComponentTable, file_path: Option<&'a str>) -> Self {
        Self {
            file_path,
            dialect: table.metadata.dialect,
            component_count: table.len(),
            inactive_count: table.inactive_count(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary {
    old_total: usize,
    new_total: usize,
    added: usize,
    removed: usize,
    changed: usize,
    unchanged: usize,
    total_changes: usize,
}

impl From<&DiffSummary> for JsonSummary {
    fn from(summary: &DiffSummary) -> Self {
        Self {
            old_total: summary.old_total,
            new_total: summary.new_total,
            added: summary.added,
            removed: summary.removed,
            changed: summary.changed,
            unchanged: summary.unchanged,
            total_changes: summary.total_changes,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonChanges<'a> {
    added: Vec<ClientComponent<'a>>,
    removed: Vec<ClientComponent<'a>>,
    changed: Vec<JsonChange<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unchanged: Option<&'a Vec<String>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonChange<'a> {
    reference: &'a str,
    original: ClientComponent<'a>,
    modified: ClientComponent<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field_changes: Option<&'a [FieldChange]>,
}

impl<'a> JsonChange<'a> {
    fn new(change: &'a ComponentChange, include_field_changes: bool) -> Self {
        Self {
            reference: &change.reference,
            original: ClientComponent::from(&change.original),
            modified: ClientComponent::from(&change.modified),
            field_changes: include_field_changes.then_some(change.field_changes.as_slice()),
        }
    }
}

/// A component rendered with client-facing field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientComponent<'a> {
    pub reference: &'a str,
    pub part_number: &'a str,
    pub part_name: &'a str,
    /// Quantity
    pub value: &'a str,
    /// Raw OPT text
    pub opt: &'a str,
    pub package: &'a str,
    pub description: &'a str,
    /// Corp number
    pub manufacturer: &'a str,
    pub number: &'a str,
    pub is_active: bool,
    pub status: ComponentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_reference: Option<&'a str>,
}

impl<'a> From<&'a Component> for ClientComponent<'a> {
    fn from(component: &'a Component) -> Self {
        let fields = &component.fields;
        Self {
            reference: &component.reference,
            part_number: &fields.part_number,
            part_name: &fields.part_name,
            value: &fields.quantity,
            opt: &fields.optional_flag,
            package: &fields.package,
            description: &fields.description,
            manufacturer: &fields.corp_num,
            number: &fields.number,
            is_active: component.is_active(),
            status: component.status(),
            source_reference: component.source_reference.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffEngine;
    use crate::model::ComponentFields;
    use serde_json::Value;

    fn table(components: &[(&str, &str, &str)]) -> ComponentTable {
        components
            .iter()
            .map(|(reference, part, opt)| {
                Component::new(
                    *reference,
                    ComponentFields::default()
                        .with(CanonicalField::PartNumber, *part)
                        .with(CanonicalField::OptionalFlag, *opt)
                        .with(CanonicalField::CorpNum, "C-9"),
                )
            })
            .collect()
    }

    fn diff_json(old: &ComponentTable, new: &ComponentTable, config: &ReportConfig) -> Value {
        let result = DiffEngine::new().diff(old, new);
        let json = JsonReporter::new()
            .generate_diff_report(&result, old, new, config)
            .unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_client_field_names() {
        let old = table(&[("R1", "A", "")]);
        let new = table(&[("R1", "A", ""), ("C7", "B", "NA")]);
        let json = diff_json(&old, &new, &ReportConfig::default());

        let added = &json["added"][0];
        assert_eq!(added["reference"], "C7");
        assert_eq!(added["partNumber"], "B");
        assert_eq!(added["opt"], "NA");
        assert_eq!(added["manufacturer"], "C-9");
        assert_eq!(added["value"], "");
        assert_eq!(added["isActive"], false);
        assert_eq!(added["status"], "inactive");
        assert!(added.get("sourceReference").is_none());

        assert_eq!(json["summary"]["added"], 1);
        assert_eq!(json["summary"]["unchanged"], 1);
        assert_eq!(json["metadata"]["tool"]["name"], "bom-diff");
        assert_eq!(
            json["significantFields"],
            serde_json::json!(["partNumber", "optionalFlag", "quantity", "corpNum"])
        );
    }

    #[test]
    fn test_changed_entries_carry_field_changes() {
        let old = table(&[("U1", "A", "")]);
        let new = table(&[("U1", "B", "")]);
        let json = diff_json(&old, &new, &ReportConfig::default());
        let change = &json["changed"][0];
        assert_eq!(change["original"]["partNumber"], "A");
        assert_eq!(change["modified"]["partNumber"], "B");
        assert_eq!(change["fieldChanges"][0]["field"], "partNumber");

        let terse = ReportConfig {
            include_field_changes: false,
            ..ReportConfig::default()
        };
        let json = diff_json(&old, &new, &terse);
        assert!(json["changed"][0].get("fieldChanges").is_none());
    }

    #[test]
    fn test_summary_only() {
        let old = table(&[("R1", "A", "")]);
        let result = DiffEngine::new().diff(&old, &old);
        let json = JsonReporter::summary_only()
            .pretty(false)
            .generate_diff_report(&result, &old, &old, &ReportConfig::default())
            .unwrap();
        assert!(!json.contains('\n'));
        let value: Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("added").is_none());
        assert_eq!(value["summary"]["totalChanges"], 0);
    }

    #[test]
    fn test_view_report() {
        let bom = table(&[("R1", "A", ""), ("R2", "A", "na")]);
        let json = JsonReporter::new()
            .generate_view_report(&bom, &ReportConfig::default())
            .unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["components"].as_array().unwrap().len(), 2);
        assert_eq!(value["components"][1]["isActive"], false);
        assert_eq!(value["metadata"]["newBom"]["inactiveCount"], 1);
        assert!(value["metadata"].get("oldBom").is_none());
    }
}
