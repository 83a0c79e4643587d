//! Knowledge-base export of component tables.
//!
//! Indexing and chat consumers treat components as opaque documents: an id,
//! a flat text rendering for embedding, and the field map as metadata.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{CanonicalField, Component, ComponentTable};

/// Fields rendered into the document text, in order.
const TEXT_FIELDS: [CanonicalField; 5] = [
    CanonicalField::PartNumber,
    CanonicalField::Package,
    CanonicalField::Description,
    CanonicalField::Quantity,
    CanonicalField::PartName,
];

/// A component rendered for indexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDocument {
    /// `{source}_{index}_{reference}`
    pub id: String,
    pub reference: String,
    pub text: String,
    /// Canonical field name to value, plus `reference`, `source` and `status`
    pub metadata: IndexMap<String, String>,
}

impl ComponentDocument {
    #[must_use]
    pub fn from_component(component: &Component, source: &str, index: usize) -> Self {
        let mut text = format!("Reference: {}", component.reference);
        for field in TEXT_FIELDS {
            text.push_str(" | ");
            text.push_str(field.label());
            text.push_str(": ");
            text.push_str(component.field(field));
        }

        let mut metadata = IndexMap::new();
        metadata.insert("reference".to_string(), component.reference.clone());
        metadata.insert("source".to_string(), source.to_string());
        metadata.insert("status".to_string(), component.status().to_string());
        for (field, value) in component.fields.iter() {
            metadata.insert(field.name().to_string(), value.to_string());
        }

        Self {
            id: format!("{source}_{index}_{}", component.reference),
            reference: component.reference.clone(),
            text,
            metadata,
        }
    }
}

impl ComponentTable {
    /// Render every component as an indexable document.
    #[must_use]
    pub fn to_documents(&self, source: &str) -> Vec<ComponentDocument> {
        self.iter()
            .enumerate()
            .map(|(i, c)| ComponentDocument::from_component(c, source, i))
            .collect()
    }
}
