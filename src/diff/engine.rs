//! Diff engine implementation.

use super::changes::ComponentChangeComputer;
use super::traits::ChangeComputer;
use super::DiffResult;
use crate::error::{BomDiffError, DiffErrorKind};
use crate::model::{CanonicalField, ComponentTable};

/// Compares two expanded, normalized component tables.
///
/// The comparison is pure: the same inputs always produce the same,
/// order-stable [`DiffResult`].
#[derive(Debug, Clone)]
pub struct DiffEngine {
    significant_fields: Vec<CanonicalField>,
    include_unchanged: bool,
}

impl DiffEngine {
    /// Engine comparing `(partNumber, optionalFlag, quantity, corpNum)`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            significant_fields: CanonicalField::DEFAULT_SIGNIFICANT.to_vec(),
            include_unchanged: false,
        }
    }

    /// Replace the fields that decide changed vs unchanged.
    ///
    /// Anything other than the default tuple changes what users see as
    /// "changed", so it is logged at warn level.
    pub fn with_significant_fields(
        mut self,
        fields: Vec<CanonicalField>,
    ) -> Result<Self, BomDiffError> {
        if fields.is_empty() {
            return Err(BomDiffError::diff(
                "configuring significant fields",
                DiffErrorKind::NoSignificantFields,
            ));
        }
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].contains(field) {
                return Err(BomDiffError::diff(
                    "configuring significant fields",
                    DiffErrorKind::DuplicateField(field.to_string()),
                ));
            }
        }

        let mut sorted = fields.clone();
        sorted.sort();
        let mut default = CanonicalField::DEFAULT_SIGNIFICANT.to_vec();
        default.sort();
        if sorted != default {
            let names: Vec<_> = fields.iter().map(|f| f.name()).collect();
            tracing::warn!(
                "Change detection uses non-default significant fields [{}]; \
                 default is [partNumber, optionalFlag, quantity, corpNum]",
                names.join(", ")
            );
        }

        self.significant_fields = fields;
        Ok(self)
    }

    /// List unchanged designators in the result.
    #[must_use]
    pub const fn include_unchanged(mut self, include: bool) -> Self {
        self.include_unchanged = include;
        self
    }

    #[must_use]
    pub fn significant_fields(&self) -> &[CanonicalField] {
        &self.significant_fields
    }

    /// Diff `old` against `new`.
    pub fn diff(&self, old: &ComponentTable, new: &ComponentTable) -> DiffResult {
        let mut result = DiffResult::new(self.significant_fields.clone());

        if old.len() == new.len() && old.content_hash() == new.content_hash() {
            tracing::debug!("Tables are identical, skipping comparison");
            let unchanged = new.len();
            if self.include_unchanged {
                result.unchanged = new.references().map(str::to_string).collect();
            }
            result.calculate_summary(old, new, unchanged);
            return result;
        }

        let computer = ComponentChangeComputer::new(self.significant_fields.clone());
        let changes = computer.compute(old, new);
        tracing::debug!(
            computer = computer.name(),
            added = changes.added.len(),
            removed = changes.removed.len(),
            changed = changes.changed.len(),
            "Computed component changes"
        );

        let unchanged = changes.unchanged.len();
        result.added = changes.added;
        result.removed = changes.removed;
        result.changed = changes.changed;
        if self.include_unchanged {
            result.unchanged = changes.unchanged;
        }
        result.calculate_summary(old, new, unchanged);
        result
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}
