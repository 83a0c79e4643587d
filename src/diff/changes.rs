//! Component change computer.

use super::traits::{ChangeComputer, ComponentChangeSet};
use super::{ComponentChange, FieldChange};
use crate::model::{CanonicalField, Component, ComponentTable};

/// Classifies every designator as added, removed, changed or unchanged.
///
/// Only the significant fields decide changed vs unchanged; every
/// differing field is still listed in [`ComponentChange::field_changes`].
pub struct ComponentChangeComputer {
    significant_fields: Vec<CanonicalField>,
}

impl Default for ComponentChangeComputer {
    fn default() -> Self {
        Self::new(CanonicalField::DEFAULT_SIGNIFICANT.to_vec())
    }
}

impl ComponentChangeComputer {
    #[must_use]
    pub fn new(significant_fields: Vec<CanonicalField>) -> Self {
        Self { significant_fields }
    }

    fn field_changes(&self, old: &Component, new: &Component) -> Vec<FieldChange> {
        CanonicalField::ALL
            .into_iter()
            .filter(|&f| old.field(f) != new.field(f))
            .map(|field| FieldChange {
                field,
                old: old.field(field).to_string(),
                new: new.field(field).to_string(),
                significant: self.significant_fields.contains(&field),
            })
            .collect()
    }
}

impl ChangeComputer for ComponentChangeComputer {
    type ChangeSet = ComponentChangeSet;

    fn compute(&self, old: &ComponentTable, new: &ComponentTable) -> ComponentChangeSet {
        let mut result = ComponentChangeSet::new();

        for (reference, new_comp) in &new.components {
            match old.get(reference) {
                None => result.added.push(new_comp.clone()),
                Some(old_comp) if old_comp.same_fields(new_comp, &self.significant_fields) => {
                    result.unchanged.push(reference.clone());
                }
                Some(old_comp) => result.changed.push(ComponentChange {
                    reference: reference.clone(),
                    field_changes: self.field_changes(old_comp, new_comp),
                    original: old_comp.clone(),
                    modified: new_comp.clone(),
                }),
            }
        }

        result.removed = old
            .iter()
            .filter(|c| !new.contains(&c.reference))
            .cloned()
            .collect();

        result
    }

    fn name(&self) -> &str {
        "ComponentChanges"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ComponentFields;

    fn part(reference: &str, part_number: &str, description: &str) -> Component {
        Component::new(
            reference,
            ComponentFields::default()
                .with(CanonicalField::PartNumber, part_number)
                .with(CanonicalField::Quantity, "1")
                .with(CanonicalField::Description, description),
        )
    }

    #[test]
    fn test_field_changes_flag_significance() {
        let old: ComponentTable = [part("R1", "a", "old text")].into_iter().collect();
        let new: ComponentTable = [part("R1", "b", "new text")].into_iter().collect();

        let changes = ComponentChangeComputer::default().compute(&old, &new);
        assert_eq!(changes.changed.len(), 1);
        let fields = &changes.changed[0].field_changes;
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field, CanonicalField::PartNumber);
        assert!(fields[0].significant);
        assert_eq!(fields[1].field, CanonicalField::Description);
        assert!(!fields[1].significant);
    }

    #[test]
    fn test_insignificant_difference_is_unchanged() {
        let old: ComponentTable = [part("R1", "a", "old text")].into_iter().collect();
        let new: ComponentTable = [part("R1", "a", "new text")].into_iter().collect();

        let changes = ComponentChangeComputer::default().compute(&old, &new);
        assert!(changes.is_empty());
        assert_eq!(changes.unchanged, ["R1"]);
    }

    #[test]
    fn test_custom_significant_fields() {
        let old: ComponentTable = [part("R1", "a", "old text")].into_iter().collect();
        let new: ComponentTable = [part("R1", "a", "new text")].into_iter().collect();

        let computer = ComponentChangeComputer::new(vec![CanonicalField::Description]);
        let changes = computer.compute(&old, &new);
        assert_eq!(changes.changed.len(), 1);
        assert_eq!(computer.name(), "ComponentChanges");
    }
}
