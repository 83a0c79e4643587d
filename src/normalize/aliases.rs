//! Declarative alias table: canonical field to ordered raw names.
//!
//! Raw names are compared after folding (ASCII lowercase, with `-`, `_`,
//! `.` and spaces removed), so `PART-NUM`, `part_num` and `PartNum` are the
//! same key. Supporting a new dialect is a matter of adding names here or
//! through configuration.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::CanonicalField;

/// Fold a raw field name into its comparison key.
#[must_use]
pub fn fold_key(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | '.' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Priority-ordered raw names accepted for each canonical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAliases {
    table: IndexMap<CanonicalField, Vec<String>>,
}

impl Default for FieldAliases {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl FieldAliases {
    /// A table with no aliases at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            table: CanonicalField::ALL
                .into_iter()
                .map(|f| (f, Vec::new()))
                .collect(),
        }
    }

    /// Aliases covering the known BOM dialects.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut aliases = Self::empty();
        aliases.add_aliases(
            CanonicalField::PartNumber,
            &["PART-NUM", "PartNumber", "PN", "MPN", "ManufacturerPartNumber", "Part"],
        );
        aliases.add_aliases(CanonicalField::PartName, &["PART-NAME", "PartName", "Name"]);
        aliases.add_aliases(
            CanonicalField::Quantity,
            &["QTY", "Quantity", "Value", "Count", "Amount"],
        );
        aliases.add_aliases(CanonicalField::OptionalFlag, &["OPT", "Optional", "Option"]);
        aliases.add_aliases(
            CanonicalField::Package,
            &["PACKAGE", "Footprint", "Pkg", "Case"],
        );
        aliases.add_aliases(CanonicalField::Description, &["DESCRIPTION", "Desc", "Comment"]);
        aliases.add_aliases(
            CanonicalField::CorpNum,
            &["CORP-NUM", "CorpNumber", "Manufacturer", "Mfr", "Mfg", "Vendor"],
        );
        aliases.add_aliases(
            CanonicalField::Number,
            &["NUMBER", "ItemNumber", "ItemNo", "LineNo"],
        );
        aliases
    }

    /// Append aliases at the lowest priority; duplicates are ignored.
    pub fn add_aliases<S: AsRef<str>>(&mut self, field: CanonicalField, names: &[S]) {
        let list = self.table.entry(field).or_default();
        for name in names {
            let key = fold_key(name.as_ref());
            if !key.is_empty() && !list.contains(&key) {
                list.push(key);
            }
        }
    }

    /// Folded aliases for `field`, highest priority first.
    #[must_use]
    pub fn aliases(&self, field: CanonicalField) -> &[String] {
        self.table.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Canonical field a raw name maps to, if any.
    #[must_use]
    pub fn canonical_for(&self, raw_name: &str) -> Option<CanonicalField> {
        let key = fold_key(raw_name);
        self.table
            .iter()
            .find(|(_, names)| names.contains(&key))
            .map(|(field, _)| *field)
    }
}
