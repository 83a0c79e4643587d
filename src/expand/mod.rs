//! Reference designator expansion.
//!
//! Turns a table whose keys may be compound (`R1,R2`, `R1-R5`) into one with
//! exactly one entry per individual designator. Runs once, right after
//! parsing, so nothing downstream ever sees a compound key.

mod designator;

pub use designator::{expand_designator, is_compound, ExpandOptions, DEFAULT_MAX_RANGE_SPAN};

use crate::model::{ComponentTable, TableMetadata};

/// Expand every compound key in `table`.
///
/// Each produced designator carries a copy of the source entry's fields.
/// When two source keys produce the same designator the later one wins,
/// keeping the position of the first; such overwrites add to
/// `collision_count`.
#[must_use]
pub fn expand_table(table: &ComponentTable, options: &ExpandOptions) -> ComponentTable {
    let mut expanded = ComponentTable::new(TableMetadata {
        expanded: true,
        ..table.metadata.clone()
    });
    expanded.collision_count = table.collision_count;

    let mut compound_keys = 0usize;
    for component in table.iter() {
        if !is_compound(&component.reference) {
            expanded.insert(component.clone());
            continue;
        }
        let designators = expand_designator(&component.reference, options);
        if designators.len() == 1 && designators[0] == component.reference {
            expanded.insert(component.clone());
            continue;
        }
        compound_keys += 1;
        for designator in designators {
            expanded.insert(component.relocated(designator));
        }
    }

    tracing::debug!(
        compound_keys,
        before = table.len(),
        after = expanded.len(),
        "Expanded reference designators"
    );
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CanonicalField, Component, ComponentFields};

    fn part(reference: &str, part_number: &str) -> Component {
        Component::new(
            reference,
            ComponentFields::default()
                .with(CanonicalField::PartNumber, part_number)
                .with(CanonicalField::Quantity, "3"),
        )
    }

    #[test]
    fn test_range_entry_is_copied_per_designator() {
        let table: ComponentTable = [part("R1-R3", "0001")].into_iter().collect();
        let expanded = expand_table(&table, &ExpandOptions::default());

        let refs: Vec<_> = expanded.references().collect();
        assert_eq!(refs, ["R1", "R2", "R3"]);
        for component in expanded.iter() {
            assert_eq!(component.fields, table.get("R1-R3").unwrap().fields);
            assert_eq!(component.source_reference.as_deref(), Some("R1-R3"));
        }
        assert!(expanded.metadata.expanded);
        assert!(!table.metadata.expanded);
    }

    #[test]
    fn test_overlapping_keys_last_expanded_wins() {
        let table: ComponentTable = [part("R1,R2", "first"), part("R2-R3", "second")]
            .into_iter()
            .collect();
        let expanded = expand_table(&table, &ExpandOptions::default());

        let refs: Vec<_> = expanded.references().collect();
        assert_eq!(refs, ["R1", "R2", "R3"]);
        assert_eq!(expanded.get("R2").unwrap().fields.part_number, "second");
        assert_eq!(expanded.collision_count, 1);
    }

    #[test]
    fn test_plain_and_literal_keys_pass_through() {
        let table: ComponentTable = [part("U1", "a"), part("U-1", "b")].into_iter().collect();
        let expanded = expand_table(&table, &ExpandOptions::default());
        assert_eq!(expanded, {
            let mut t = table.clone();
            t.metadata.expanded = true;
            t
        });
        assert!(expanded.get("U-1").unwrap().source_reference.is_none());
    }

    #[test]
    fn test_expansion_is_idempotent() {
        let table: ComponentTable = [part("C1-C4,C9", "x"), part("L40-41", "y")]
            .into_iter()
            .collect();
        let once = expand_table(&table, &ExpandOptions::default());
        let twice = expand_table(&once, &ExpandOptions::default());
        assert_eq!(once.components, twice.components);
    }
}
