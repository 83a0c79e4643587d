//! Best-effort scan for unknown BOM dialects.
//!
//! Container tags are tried in rank order; the first tag name that yields
//! at least one referenced record wins and later names are not tried.
//! Fields come from the container's child elements, KiCad-style
//! `<fields><field name="..">` entries and its attributes, in that order.

use super::traits::{Extraction, ParseStrategy, RawFields};
use super::xml::{XmlDocument, XmlElement};
use crate::model::{CanonicalField, SchemaDialect};
use crate::normalize::{fold_key, FieldAliases};

/// Candidate container element names, highest rank first.
pub const CONTAINER_TAGS: [&str; 10] = [
    "part",
    "component",
    "comp",
    "item",
    "row",
    "record",
    "entry",
    "bomitem",
    "bom_item",
    "line",
];

/// Child element names that may carry the reference designator.
pub const REFERENCE_TAGS: [&str; 7] = [
    "refdes",
    "reference",
    "ref",
    "designator",
    "designators",
    "ref_des",
    "references",
];

/// Attribute names that may carry the reference designator.
pub const REFERENCE_ATTRIBUTES: [&str; 6] = [
    "refdes",
    "reference",
    "ref",
    "designator",
    "designators",
    "ref_des",
];

const DEFAULT_QUANTITY: &str = "1";

#[derive(Debug, Clone, Default)]
pub struct HeuristicStrategy {
    aliases: FieldAliases,
}

impl HeuristicStrategy {
    #[must_use]
    pub fn new(aliases: FieldAliases) -> Self {
        Self { aliases }
    }

    fn find_reference(element: &XmlElement) -> Option<&str> {
        let from_child = REFERENCE_TAGS
            .iter()
            .filter_map(|tag| element.child_text_ignore_case(tag))
            .find(|text| !text.is_empty());
        from_child.or_else(|| {
            REFERENCE_ATTRIBUTES
                .iter()
                .filter_map(|attr| element.attribute_ignore_case(attr))
                .find(|value| !value.is_empty())
        })
    }

    fn collect_fields(&self, element: &XmlElement) -> RawFields {
        let mut fields: RawFields = Vec::new();
        for child in &element.children {
            if child.name.eq_ignore_ascii_case("fields") {
                for field in &child.children {
                    if let Some(name) = field.attribute_ignore_case("name") {
                        fields.push((name.to_string(), field.text.clone()));
                    }
                }
            } else if !child.text.is_empty() {
                fields.push((child.name.clone(), child.text.clone()));
            }
        }
        fields.extend(element.attributes.iter().cloned());

        let has_quantity = {
            let quantity_aliases = self.aliases.aliases(CanonicalField::Quantity);
            fields.iter().any(|(name, value)| {
                !value.trim().is_empty()
                    && quantity_aliases.contains(&fold_key(name))
            })
        };
        if !has_quantity {
            fields.push(("quantity".to_string(), DEFAULT_QUANTITY.to_string()));
        }
        fields
    }
}

impl ParseStrategy for HeuristicStrategy {
    fn dialect(&self) -> SchemaDialect {
        SchemaDialect::Heuristic
    }

    fn extract(&self, document: &XmlDocument) -> Option<Extraction> {
        CONTAINER_TAGS.iter().find_map(|tag| {
            let mut extraction = Extraction::default();
            for element in document
                .root
                .descendants()
                .filter(|e| e.name.eq_ignore_ascii_case(tag))
            {
                match Self::find_reference(element) {
                    Some(reference) => extraction.push(reference, self.collect_fields(element)),
                    None => extraction.push("", Vec::new()),
                }
            }
            if !extraction.records.is_empty() {
                tracing::debug!(
                    container = tag,
                    records = extraction.records.len(),
                    "Heuristic scan matched container tag"
                );
            }
            extraction.into_option()
        })
    }
}
