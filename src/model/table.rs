//! Component table keyed by reference designator.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use super::Component;

/// BOM schema dialect a table was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaDialect {
    /// `DETAILS` / `RECORD` export with fixed upper-case tags
    Structured,
    /// `Component` elements with `Reference`, `PartNumber`, ...
    GenericComponent,
    /// Best-effort scan of ranked container names
    Heuristic,
}

impl std::fmt::Display for SchemaDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Structured => write!(f, "structured"),
            Self::GenericComponent => write!(f, "generic-component"),
            Self::Heuristic => write!(f, "heuristic"),
        }
    }
}

/// How a table was produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Dialect that matched; `None` means no components were found
    pub dialect: Option<SchemaDialect>,
    /// Records read by the matching strategy, including skipped ones
    pub records_seen: usize,
    /// Records dropped because they carried no reference
    pub records_skipped: usize,
    /// Whether compound designators have been expanded
    pub expanded: bool,
}

/// Ordered mapping from reference designator to component.
///
/// Insertion order is preserved; re-inserting an existing designator
/// replaces the value in place (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentTable {
    pub components: IndexMap<String, Component>,
    pub metadata: TableMetadata,
    /// Designators written more than once while building this table
    #[serde(skip)]
    pub collision_count: usize,
}

impl ComponentTable {
    #[must_use]
    pub fn new(metadata: TableMetadata) -> Self {
        Self {
            components: IndexMap::new(),
            metadata,
            collision_count: 0,
        }
    }

    /// Insert a component under its reference.
    ///
    /// Returns `true` if an entry with the same designator was replaced.
    pub fn insert(&mut self, component: Component) -> bool {
        let replaced = self
            .components
            .insert(component.reference.clone(), component)
            .is_some();
        if replaced {
            self.collision_count += 1;
        }
        replaced
    }

    /// Log one summary line if any designator was written twice.
    pub fn log_collision_summary(&self) {
        if self.collision_count > 0 {
            tracing::warn!(
                collision_count = self.collision_count,
                "{} component entries resolved to an existing reference designator \
                 and replaced it (last write wins)",
                self.collision_count
            );
        }
    }

    #[must_use]
    pub fn get(&self, reference: &str) -> Option<&Component> {
        self.components.get(reference)
    }

    #[must_use]
    pub fn contains(&self, reference: &str) -> bool {
        self.components.contains_key(reference)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Components in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// Reference designators in insertion order.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    /// Number of components marked `NA`.
    #[must_use]
    pub fn inactive_count(&self) -> usize {
        self.iter().filter(|c| !c.is_active()).count()
    }

    /// Order-sensitive hash over every component.
    #[must_use]
    pub fn content_hash(&self) -> u64 {
        let mut input = Vec::with_capacity(self.len() * 8);
        for component in self.iter() {
            input.extend(component.content_hash().to_le_bytes());
        }
        xxh3_64(&input)
    }
}

impl FromIterator<Component> for ComponentTable {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        let mut table = Self::default();
        for component in iter {
            table.insert(component);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CanonicalField, ComponentFields};

    fn part(reference: &str, part_number: &str) -> Component {
        Component::new(
            reference,
            ComponentFields::default().with(CanonicalField::PartNumber, part_number),
        )
    }

    #[test]
    fn test_insert_is_last_write_wins_in_place() {
        let mut table = ComponentTable::default();
        assert!(!table.insert(part("R1", "a")));
        assert!(!table.insert(part("R2", "b")));
        assert!(table.insert(part("R1", "c")));

        let refs: Vec<_> = table.references().collect();
        assert_eq!(refs, ["R1", "R2"]);
        assert_eq!(table.get("R1").unwrap().fields.part_number, "c");
        assert_eq!(table.collision_count, 1);
    }

    #[test]
    fn test_inactive_count() {
        let mut inactive = part("C1", "x");
        inactive.fields.optional_flag = "na".to_string();
        let table: ComponentTable = [part("R1", "a"), inactive].into_iter().collect();
        assert_eq!(table.inactive_count(), 1);
    }

    #[test]
    fn test_content_hash_tracks_order_and_values() {
        let ab: ComponentTable = [part("R1", "a"), part("R2", "b")].into_iter().collect();
        let ba: ComponentTable = [part("R2", "b"), part("R1", "a")].into_iter().collect();
        let ab2: ComponentTable = [part("R1", "a"), part("R2", "z")].into_iter().collect();
        assert_eq!(ab.content_hash(), ab.clone().content_hash());
        assert_ne!(ab.content_hash(), ba.content_hash());
        assert_ne!(ab.content_hash(), ab2.content_hash());
    }

    #[test]
    fn test_dialect_display() {
        assert_eq!(SchemaDialect::GenericComponent.to_string(), "generic-component");
        let json = serde_json::to_string(&SchemaDialect::Structured).unwrap();
        assert_eq!(json, "\"structured\"");
    }
}
