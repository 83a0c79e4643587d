//! Integration tests for bom-diff
//!
//! These tests verify end-to-end functionality of BOM parsing, the diff
//! engine, and report generation.

use bom_diff::{
    diff::{ChangeType, DiffEngine},
    model::{CanonicalField, SchemaDialect},
    normalize::FieldAliases,
    parsers::{parse_bom, parse_bom_str, BomParser},
    reports::{create_reporter_with_options, ReportConfig, ReportFormat},
};
use std::path::Path;

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> std::path::PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn structured(records: &[(&str, &str, &str)]) -> String {
    let mut xml = String::from("<BOM><DETAILS>");
    for (reference, part_number, description) in records {
        xml.push_str(&format!(
            "<RECORD><REFDES>{reference}</REFDES><PART-NUM>{part_number}</PART-NUM>\
             <QTY>1</QTY><DESCRIPTION>{description}</DESCRIPTION></RECORD>"
        ));
    }
    xml.push_str("</DETAILS></BOM>");
    xml
}

// ============================================================================
// Parser Tests
// ============================================================================

mod parser_tests {
    use super::*;

    #[test]
    fn test_cascade_prefers_structured_layout() {
        // Both a DETAILS block and Component elements; the structured layout wins
        let xml = "<Root>\
            <DETAILS><RECORD><REFDES>R1</REFDES><PART-NUM>S</PART-NUM></RECORD></DETAILS>\
            <Component><Reference>U1</Reference><PartNumber>G</PartNumber></Component>\
        </Root>";
        let table = parse_bom_str(xml).unwrap();
        assert_eq!(table.metadata.dialect, Some(SchemaDialect::Structured));
        let refs: Vec<_> = table.references().collect();
        assert_eq!(refs, ["R1"]);
    }

    #[test]
    fn test_cascade_falls_through_empty_structured_block() {
        // DETAILS with no referenced record hands over to the generic layout
        let xml = "<Root>\
            <DETAILS><RECORD><PART-NUM>S</PART-NUM></RECORD></DETAILS>\
            <Component><Reference>U1</Reference><PartNumber>G</PartNumber></Component>\
        </Root>";
        let table = parse_bom_str(xml).unwrap();
        assert_eq!(table.metadata.dialect, Some(SchemaDialect::GenericComponent));
        assert_eq!(table.get("U1").unwrap().fields.part_number, "G");
    }

    #[test]
    fn test_heuristic_reads_attributes() {
        let table = parse_bom_str(
            r#"<bom><row RefDes="Q1" PartNumber="BSS138" Footprint="SOT-23"/></bom>"#,
        )
        .unwrap();
        let q1 = table.get("Q1").unwrap();
        assert_eq!(q1.fields.part_number, "BSS138");
        assert_eq!(q1.fields.package, "SOT-23");
        assert_eq!(q1.fields.quantity, "1");
    }

    #[test]
    fn test_namespaced_document() {
        let table = parse_bom_str(
            r#"<b:BOM xmlns:b="urn:bom"><b:DETAILS>
                 <b:RECORD><b:REFDES>R1</b:REFDES><b:PART-NUM>X</b:PART-NUM></b:RECORD>
               </b:DETAILS></b:BOM>"#,
        )
        .unwrap();
        assert_eq!(table.get("R1").unwrap().fields.part_number, "X");
    }

    #[test]
    fn test_custom_alias_extends_resolution() {
        let mut aliases = FieldAliases::with_builtins();
        aliases.add_aliases(CanonicalField::PartNumber, &["InternalCode"]);
        let parser = BomParser::with_aliases(aliases);

        let table = parser
            .parse_str(r#"<parts><part ref="U3" InternalCode="IC-77"/></parts>"#)
            .unwrap();
        assert_eq!(table.get("U3").unwrap().fields.part_number, "IC-77");

        // Builtin aliases alone leave the field blank
        let table = parse_bom_str(r#"<parts><part ref="U3" InternalCode="IC-77"/></parts>"#)
            .unwrap();
        assert_eq!(table.get("U3").unwrap().fields.part_number, "");
    }

    #[test]
    fn test_dtd_entities_in_structured_export() {
        let table = parse_bom_str(
            r#"<?xml version="1.0"?>
<!DOCTYPE BOM [<!ENTITY corp "C-4411">]>
<BOM><DETAILS>
  <RECORD><REFDES>GND-VCC</REFDES><CORP-NUM>&corp;</CORP-NUM><QTY>2</QTY></RECORD>
  <RECORD><REFDES>R1<!-- renumbered -->0</REFDES><PART-NUM>X</PART-NUM></RECORD>
</DETAILS></BOM>"#,
        )
        .unwrap();
        let refs: Vec<_> = table.references().collect();
        assert_eq!(refs, ["GND", "VCC", "R10"]);
        assert_eq!(table.get("VCC").unwrap().fields.corp_num, "C-4411");
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(parse_bom(&fixture_path("does-not-exist.xml")).is_err());
    }

    #[test]
    fn test_empty_document_is_error() {
        assert!(parse_bom_str("").is_err());
        assert!(parse_bom_str("   \n").is_err());
    }
}

// ============================================================================
// Diff Engine Tests
// ============================================================================

mod diff_engine_tests {
    use super::*;

    #[test]
    fn test_part_number_swap_is_changed() {
        let old = parse_bom_str(&structured(&[("R172", "00087748N", "RES")])).unwrap();
        let new = parse_bom_str(&structured(&[("R172", "00005407N", "RES")])).unwrap();

        let diff = DiffEngine::new().diff(&old, &new);
        assert_eq!(diff.changed.len(), 1);
        assert_eq!(diff.changed[0].original.fields.part_number, "00087748N");
        assert_eq!(diff.changed[0].modified.fields.part_number, "00005407N");
        assert!(diff.added.is_empty() && diff.removed.is_empty());
    }

    #[test]
    fn test_removed_and_added() {
        let old = parse_bom_str(&structured(&[("R1", "A", ""), ("C5", "B", "")])).unwrap();
        let new = parse_bom_str(&structured(&[("R1", "A", ""), ("U10", "C", "")])).unwrap();

        let diff = DiffEngine::new().diff(&old, &new);
        assert_eq!(diff.status_of("C5"), Some(ChangeType::Removed));
        assert_eq!(diff.status_of("U10"), Some(ChangeType::Added));
        assert!(diff.changed.is_empty());
        assert_eq!(diff.summary.unchanged, 1);
    }

    #[test]
    fn test_description_only_difference_is_unchanged() {
        let old = parse_bom_str(&structured(&[("U1", "P", "MCU")])).unwrap();
        let new = parse_bom_str(&structured(&[("U1", "P", "Microcontroller")])).unwrap();

        let diff = DiffEngine::new().diff(&old, &new);
        assert!(diff.changed.is_empty());
        assert!(!diff.has_changes());
    }

    #[test]
    fn test_diff_across_dialects() {
        // Same board exported by two different tools
        let old = parse_bom_str(
            "<Components><Component><Reference>R1</Reference>\
             <PartNumber>A</PartNumber><Value>1</Value></Component></Components>",
        )
        .unwrap();
        let new = parse_bom_str(r#"<parts><part ref="R1" pn="A" qty="1"/></parts>"#).unwrap();

        let diff = DiffEngine::new().diff(&old, &new);
        assert!(!diff.has_changes());
    }

    #[test]
    fn test_range_split_compares_per_designator() {
        let old = parse_bom_str(&structured(&[("R1-R3", "A", "")])).unwrap();
        let new = parse_bom_str(&structured(&[("R1,R2", "A", ""), ("R3", "B", "")])).unwrap();

        let diff = DiffEngine::new().diff(&old, &new);
        let changed: Vec<_> = diff.changed.iter().map(|c| c.reference.as_str()).collect();
        assert_eq!(changed, ["R3"]);
        assert_eq!(diff.summary.unchanged, 2);
    }

    #[test]
    fn test_opt_change_is_significant() {
        let old = parse_bom_str("<BOM><DETAILS><RECORD><REFDES>J1</REFDES><OPT/></RECORD></DETAILS></BOM>")
            .unwrap();
        let new = parse_bom_str(
            "<BOM><DETAILS><RECORD><REFDES>J1</REFDES><OPT>NA</OPT></RECORD></DETAILS></BOM>",
        )
        .unwrap();

        let diff = DiffEngine::new().diff(&old, &new);
        assert_eq!(diff.changed.len(), 1);
        assert!(diff.changed[0].original.is_active());
        assert!(!diff.changed[0].modified.is_active());
    }

    #[test]
    fn test_invalid_significant_fields() {
        assert!(DiffEngine::new().with_significant_fields(vec![]).is_err());
        assert!(DiffEngine::new()
            .with_significant_fields(vec![CanonicalField::Package, CanonicalField::Package])
            .is_err());
    }
}

// ============================================================================
// Report Tests
// ============================================================================

mod report_tests {
    use super::*;

    fn fixture_diff() -> (
        bom_diff::DiffResult,
        bom_diff::ComponentTable,
        bom_diff::ComponentTable,
    ) {
        let old = parse_bom(&fixture_path("structured_old.xml")).unwrap();
        let new = parse_bom(&fixture_path("structured_new.xml")).unwrap();
        let diff = DiffEngine::new().diff(&old, &new);
        (diff, old, new)
    }

    #[test]
    fn test_json_report_uses_client_names() {
        let (diff, old, new) = fixture_diff();
        let reporter = create_reporter_with_options(ReportFormat::Json, false);
        let json = reporter
            .generate_diff_report(&diff, &old, &new, &ReportConfig::default())
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["changed"], 1);
        assert_eq!(value["summary"]["added"], 1);
        assert_eq!(value["summary"]["removed"], 1);
        assert_eq!(value["added"][0]["reference"], "U10");
        assert_eq!(value["added"][0]["manufacturer"], "C-9100");
        assert_eq!(value["changed"][0]["original"]["partNumber"], "00087748N");
        assert_eq!(value["changed"][0]["modified"]["partNumber"], "00005407N");
        assert_eq!(value["metadata"]["newBom"]["dialect"], "structured");
    }

    #[test]
    fn test_csv_report_rows() {
        let (diff, old, new) = fixture_diff();
        let reporter = create_reporter_with_options(ReportFormat::Csv, false);
        let csv = reporter
            .generate_diff_report(&diff, &old, &new, &ReportConfig::default())
            .unwrap();

        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Change,Reference,Part Number"));
        assert!(lines[1].starts_with("Added,\"U10\","));
        assert!(lines[2].starts_with("Removed,\"C5\","));
        assert!(lines[3].starts_with("Changed,\"R172\",\"00005407N\""));
        assert!(lines[3].ends_with(",\"partNumber\""));
    }

    #[test]
    fn test_summary_report_counts() {
        let (diff, old, new) = fixture_diff();
        let reporter = create_reporter_with_options(ReportFormat::Summary, false);
        let text = reporter
            .generate_diff_report(&diff, &old, &new, &ReportConfig::default())
            .unwrap();

        assert!(text.contains("+1"));
        assert!(text.contains("-1"));
        assert!(text.contains("~1"));
        assert!(!text.contains("\x1b["));
    }

    #[test]
    fn test_view_report_lists_every_designator() {
        let table = parse_bom(&fixture_path("generic.xml")).unwrap();
        let reporter = create_reporter_with_options(ReportFormat::Csv, false);
        let csv = reporter
            .generate_view_report(&table, &ReportConfig::default())
            .unwrap();
        assert_eq!(csv.lines().count(), 1 + table.len());
    }

    #[test]
    fn test_documents_for_knowledge_base() {
        let table = parse_bom(&fixture_path("heuristic.xml")).unwrap();
        let docs = table.to_documents("heuristic");

        assert_eq!(docs.len(), 4);
        assert_eq!(docs[0].id, "heuristic_0_R10");
        assert!(docs[0].text.starts_with("Reference: R10 | Part Number: ERJ-3EKF1001V"));
        assert_eq!(docs[3].metadata["status"], "inactive");
        assert_eq!(docs[3].metadata["source"], "heuristic");
    }
}
