//! A single placed part on a board.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use super::{CanonicalField, ComponentFields};

/// Population status derived from the OPT field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Active,
    Inactive,
}

impl std::fmt::Display for ComponentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

/// One component keyed by its reference designator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Reference designator, e.g. `R1`
    pub reference: String,
    /// Resolved canonical fields
    pub fields: ComponentFields,
    /// Compound key this entry was expanded from, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_reference: Option<String>,
}

impl Component {
    #[must_use]
    pub fn new(reference: impl Into<String>, fields: ComponentFields) -> Self {
        Self {
            reference: reference.into(),
            fields,
            source_reference: None,
        }
    }

    /// Value of one canonical field.
    #[must_use]
    pub fn field(&self, field: CanonicalField) -> &str {
        self.fields.get(field)
    }

    /// `false` only when OPT is `NA` in any case.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.fields.optional_flag.eq_ignore_ascii_case("NA")
    }

    #[must_use]
    pub fn status(&self) -> ComponentStatus {
        if self.is_active() {
            ComponentStatus::Active
        } else {
            ComponentStatus::Inactive
        }
    }

    /// Copy of this component placed at another designator.
    #[must_use]
    pub fn relocated(&self, reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            fields: self.fields.clone(),
            source_reference: Some(self.reference.clone()),
        }
    }

    /// True when every field in `fields` carries the same value on both sides.
    #[must_use]
    pub fn same_fields(&self, other: &Self, fields: &[CanonicalField]) -> bool {
        fields.iter().all(|&f| self.field(f) == other.field(f))
    }

    /// Hash of the reference and all field values.
    #[must_use]
    pub fn content_hash(&self) -> u64 {
        let mut input = Vec::with_capacity(128);
        input.extend(self.reference.as_bytes());
        for (_, value) in self.fields.iter() {
            input.push(0x1f);
            input.extend(value.as_bytes());
        }
        xxh3_64(&input)
    }
}
