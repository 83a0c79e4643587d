//! Resolves raw dialect fields into canonical fields.

use super::aliases::{fold_key, FieldAliases};
use crate::model::{CanonicalField, Component, ComponentFields};
use crate::parsers::{RawFields, RawRecord};

/// Applies a [`FieldAliases`] table to raw records.
///
/// For each canonical field the aliases are tried in priority order and
/// the first raw entry with a non-blank value wins. Unmatched fields
/// resolve to the empty string.
#[derive(Debug, Clone, Default)]
pub struct FieldResolver {
    aliases: FieldAliases,
}

impl FieldResolver {
    #[must_use]
    pub fn new(aliases: FieldAliases) -> Self {
        Self { aliases }
    }

    #[must_use]
    pub fn aliases(&self) -> &FieldAliases {
        &self.aliases
    }

    /// Resolve a single canonical field.
    #[must_use]
    pub fn resolve<'a>(&self, raw: &'a RawFields, field: CanonicalField) -> &'a str {
        let folded: Vec<(String, &str)> = raw
            .iter()
            .map(|(name, value)| (fold_key(name), value.trim()))
            .collect();
        lookup(&self.aliases, &folded, field)
    }

    /// Resolve every canonical field.
    #[must_use]
    pub fn resolve_all(&self, raw: &RawFields) -> ComponentFields {
        let folded: Vec<(String, &str)> = raw
            .iter()
            .map(|(name, value)| (fold_key(name), value.trim()))
            .collect();
        let mut fields = ComponentFields::default();
        for field in CanonicalField::ALL {
            fields.set(field, lookup(&self.aliases, &folded, field));
        }
        fields
    }

    /// Build a component from a raw record; the reference is kept verbatim.
    #[must_use]
    pub fn resolve_record(&self, record: &RawRecord) -> Component {
        Component::new(record.reference.clone(), self.resolve_all(&record.fields))
    }
}

fn lookup<'a>(aliases: &FieldAliases, folded: &[(String, &'a str)], field: CanonicalField) -> &'a str {
    aliases
        .aliases(field)
        .iter()
        .find_map(|alias| {
            folded
                .iter()
                .find(|(name, value)| name == alias && !value.is_empty())
                .map(|(_, value)| *value)
        })
        .unwrap_or_default()
}
