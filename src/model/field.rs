//! Canonical field vocabulary shared by every schema dialect.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the normalized field names every dialect resolves into.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "camelCase")]
#[value(rename_all = "camelCase")]
pub enum CanonicalField {
    /// Internal part number
    PartNumber,
    /// Manufacturer / part name string
    PartName,
    Quantity,
    /// Raw OPT text; `NA` marks an unpopulated part
    OptionalFlag,
    /// Footprint
    Package,
    Description,
    /// Internal corporate identifier
    CorpNum,
    /// Miscellaneous item number
    Number,
}

impl CanonicalField {
    /// All canonical fields in display order.
    pub const ALL: [Self; 8] = [
        Self::PartNumber,
        Self::PartName,
        Self::Quantity,
        Self::OptionalFlag,
        Self::Package,
        Self::Description,
        Self::CorpNum,
        Self::Number,
    ];

    /// Fields compared when deciding changed vs unchanged.
    pub const DEFAULT_SIGNIFICANT: [Self; 4] = [
        Self::PartNumber,
        Self::OptionalFlag,
        Self::Quantity,
        Self::CorpNum,
    ];

    /// The internal (camelCase) name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PartNumber => "partNumber",
            Self::PartName => "partName",
            Self::Quantity => "quantity",
            Self::OptionalFlag => "optionalFlag",
            Self::Package => "package",
            Self::Description => "description",
            Self::CorpNum => "corpNum",
            Self::Number => "number",
        }
    }

    /// Human-readable label used in text reports and KB documents.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PartNumber => "Part Number",
            Self::PartName => "Part Name",
            Self::Quantity => "Value",
            Self::OptionalFlag => "OPT",
            Self::Package => "Package",
            Self::Description => "Description",
            Self::CorpNum => "Corp Num",
            Self::Number => "Number",
        }
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CanonicalField {
    type Err = String;

    /// Accepts camelCase, snake_case and kebab-case spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL
            .into_iter()
            .find(|field| field.name().to_lowercase() == folded)
            .ok_or_else(|| format!("unknown canonical field '{s}'"))
    }
}

/// Resolved values for every canonical field of a component.
///
/// Missing fields are the empty string, never absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentFields {
    pub part_number: String,
    pub part_name: String,
    pub quantity: String,
    pub optional_flag: String,
    pub package: String,
    pub description: String,
    pub corp_num: String,
    pub number: String,
}

impl ComponentFields {
    #[must_use]
    pub fn get(&self, field: CanonicalField) -> &str {
        match field {
            CanonicalField::PartNumber => &self.part_number,
            CanonicalField::PartName => &self.part_name,
            CanonicalField::Quantity => &self.quantity,
            CanonicalField::OptionalFlag => &self.optional_flag,
            CanonicalField::Package => &self.package,
            CanonicalField::Description => &self.description,
            CanonicalField::CorpNum => &self.corp_num,
            CanonicalField::Number => &self.number,
        }
    }

    pub fn set(&mut self, field: CanonicalField, value: impl Into<String>) {
        let slot = match field {
            CanonicalField::PartNumber => &mut self.part_number,
            CanonicalField::PartName => &mut self.part_name,
            CanonicalField::Quantity => &mut self.quantity,
            CanonicalField::OptionalFlag => &mut self.optional_flag,
            CanonicalField::Package => &mut self.package,
            CanonicalField::Description => &mut self.description,
            CanonicalField::CorpNum => &mut self.corp_num,
            CanonicalField::Number => &mut self.number,
        };
        *slot = value.into();
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, field: CanonicalField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Iterate `(field, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &str)> + '_ {
        CanonicalField::ALL.into_iter().map(|f| (f, self.get(f)))
    }
}
