//! `DETAILS` / `RECORD` exports with fixed upper-case tags.
//!
//! ```xml
//! <BOM>
//!   <DETAILS>
//!     <RECORD>
//!       <REFDES>R172</REFDES>
//!       <PART-NUM>00087748N</PART-NUM>
//!       <QTY>1</QTY>
//!       ...
//!     </RECORD>
//!   </DETAILS>
//! </BOM>
//! ```

use super::traits::{Extraction, ParseStrategy};
use super::xml::XmlDocument;
use crate::model::SchemaDialect;

const DETAILS_TAG: &str = "DETAILS";
const RECORD_TAG: &str = "RECORD";
const REFERENCE_TAG: &str = "REFDES";

/// Tags read from every record, in document vocabulary.
const FIELD_TAGS: [&str; 8] = [
    "CORP-NUM",
    "DESCRIPTION",
    "NUMBER",
    "OPT",
    "PACKAGE",
    "PART-NAME",
    "PART-NUM",
    "QTY",
];

/// Reads the first `DETAILS` container's `RECORD` children.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredStrategy;

impl ParseStrategy for StructuredStrategy {
    fn dialect(&self) -> SchemaDialect {
        SchemaDialect::Structured
    }

    fn extract(&self, document: &XmlDocument) -> Option<Extraction> {
        let details = document.root.find_first(DETAILS_TAG)?;

        let mut extraction = Extraction::default();
        for record in details.children_named(RECORD_TAG) {
            let reference = record.child_text(REFERENCE_TAG).unwrap_or_default();
            let fields = FIELD_TAGS
                .iter()
                .map(|&tag| {
                    let value = record.child_text(tag).unwrap_or_default();
                    (tag.to_string(), value.to_string())
                })
                .collect();
            extraction.push(reference, fields);
        }
        extraction.into_option()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(xml: &str) -> Option<Extraction> {
        StructuredStrategy.extract(&XmlDocument::parse(xml).unwrap())
    }

    #[test]
    fn test_reads_records() {
        let extraction = extract(
            "<BOM><HEADER/><DETAILS>\
               <RECORD><REFDES> R1 </REFDES><PART-NUM>0001</PART-NUM><QTY>2</QTY></RECORD>\
               <RECORD><REFDES>C1</REFDES><OPT>NA</OPT></RECORD>\
             </DETAILS></BOM>",
        )
        .unwrap();
        assert_eq!(extraction.records.len(), 2);
        let r1 = &extraction.records[0];
        assert_eq!(r1.reference, "R1");
        assert!(r1.fields.contains(&("PART-NUM".to_string(), "0001".to_string())));
        assert!(r1.fields.contains(&("OPT".to_string(), String::new())));
    }

    #[test]
    fn test_skips_records_without_reference() {
        let extraction = extract(
            "<BOM><DETAILS>\
               <RECORD><PART-NUM>orphan</PART-NUM></RECORD>\
               <RECORD><REFDES/></RECORD>\
               <RECORD><REFDES>U1</REFDES></RECORD>\
             </DETAILS></BOM>",
        )
        .unwrap();
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.seen, 3);
        assert_eq!(extraction.skipped, 2);
    }

    #[test]
    fn test_no_match() {
        assert!(extract("<BOM><RECORD><REFDES>R1</REFDES></RECORD></BOM>").is_none());
        assert!(extract("<BOM><DETAILS/></BOM>").is_none());
        assert!(extract("<BOM><DETAILS><RECORD/></DETAILS></BOM>").is_none());
    }

    #[test]
    fn test_only_first_details_is_read() {
        let extraction = extract(
            "<BOM>\
               <DETAILS><RECORD><REFDES>R1</REFDES></RECORD></DETAILS>\
               <DETAILS><RECORD><REFDES>R2</REFDES></RECORD></DETAILS>\
             </BOM>",
        )
        .unwrap();
        let refs: Vec<_> = extraction.records.iter().map(|r| r.reference.as_str()).collect();
        assert_eq!(refs, ["R1"]);
    }
}
