//! Trait definitions for diff computation.

use super::ComponentChange;
use crate::model::{Component, ComponentTable};

/// Computes one category of changes between two tables.
pub trait ChangeComputer: Send + Sync {
    /// The type of changes this computer produces.
    type ChangeSet;

    /// Compute changes between the old and new tables.
    fn compute(&self, old: &ComponentTable, new: &ComponentTable) -> Self::ChangeSet;

    /// Name of this computer for logging.
    fn name(&self) -> &str;
}

/// Partition of the union of two tables' designators.
#[derive(Debug, Clone, Default)]
pub struct ComponentChangeSet {
    /// In new only, new-table order
    pub added: Vec<Component>,
    /// In old only, old-table order
    pub removed: Vec<Component>,
    /// In both with differing significant fields, new-table order
    pub changed: Vec<ComponentChange>,
    /// In both with equal significant fields, new-table order
    pub unchanged: Vec<String>,
}

impl ComponentChangeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }
}
