//! `Component` elements with a mixed-case tag vocabulary.

use super::traits::{Extraction, ParseStrategy};
use super::xml::XmlDocument;
use crate::model::SchemaDialect;

const COMPONENT_TAG: &str = "Component";
const REFERENCE_TAG: &str = "Reference";

const FIELD_TAGS: [&str; 8] = [
    "Manufacturer",
    "Description",
    "NUMBER",
    "OPT",
    "Package",
    "PartName",
    "PartNumber",
    "Value",
];

/// Reads every `Component` element anywhere in the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericComponentStrategy;

impl ParseStrategy for GenericComponentStrategy {
    fn dialect(&self) -> SchemaDialect {
        SchemaDialect::GenericComponent
    }

    fn extract(&self, document: &XmlDocument) -> Option<Extraction> {
        let mut extraction = Extraction::default();
        for component in document
            .root
            .descendants()
            .filter(|e| e.name == COMPONENT_TAG)
        {
            let reference = component.child_text(REFERENCE_TAG).unwrap_or_default();
            let fields = FIELD_TAGS
                .iter()
                .filter_map(|&tag| {
                    component
                        .child_text(tag)
                        .map(|value| (tag.to_string(), value.to_string()))
                })
                .collect();
            extraction.push(reference, fields);
        }
        extraction.into_option()
    }
}
