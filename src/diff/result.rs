//! Diff result structures.

use crate::model::{CanonicalField, Component, ComponentTable};
use serde::{Deserialize, Serialize};

/// Complete result of a BOM diff.
///
/// `added` and `changed` follow the new table's order, `removed` the old
/// table's. Unchanged designators are only listed when requested, but are
/// always counted in the summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct DiffResult {
    pub summary: DiffSummary,
    pub added: Vec<Component>,
    pub removed: Vec<Component>,
    pub changed: Vec<ComponentChange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unchanged: Vec<String>,
    /// Fields compared to decide changed vs unchanged
    pub significant_fields: Vec<CanonicalField>,
}

impl DiffResult {
    pub fn new(significant_fields: Vec<CanonicalField>) -> Self {
        Self {
            significant_fields,
            ..Self::default()
        }
    }

    /// Recompute the summary from the lists and both input tables.
    pub fn calculate_summary(&mut self, old: &ComponentTable, new: &ComponentTable, unchanged: usize) {
        self.summary = DiffSummary {
            old_total: old.len(),
            new_total: new.len(),
            added: self.added.len(),
            removed: self.removed.len(),
            changed: self.changed.len(),
            unchanged,
            total_changes: self.added.len() + self.removed.len() + self.changed.len(),
            old_inactive: old.inactive_count(),
            new_inactive: new.inactive_count(),
        };
    }

    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.summary.total_changes > 0
    }

    /// Find a changed entry by designator.
    #[must_use]
    pub fn find_change(&self, reference: &str) -> Option<&ComponentChange> {
        self.changed.iter().find(|c| c.reference == reference)
    }

    /// Classification of one designator, if it appears in either table.
    #[must_use]
    pub fn status_of(&self, reference: &str) -> Option<ChangeType> {
        if self.added.iter().any(|c| c.reference == reference) {
            Some(ChangeType::Added)
        } else if self.removed.iter().any(|c| c.reference == reference) {
            Some(ChangeType::Removed)
        } else if self.find_change(reference).is_some() {
            Some(ChangeType::Changed)
        } else if self.unchanged.iter().any(|r| r == reference) {
            Some(ChangeType::Unchanged)
        } else {
            None
        }
    }
}

/// Summary statistics for a diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub old_total: usize,
    pub new_total: usize,
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub total_changes: usize,
    /// Components marked `NA` in the old table
    pub old_inactive: usize,
    /// Components marked `NA` in the new table
    pub new_inactive: usize,
}

/// How a designator was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Added,
    Removed,
    Changed,
    Unchanged,
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added => write!(f, "added"),
            Self::Removed => write!(f, "removed"),
            Self::Changed => write!(f, "changed"),
            Self::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// A designator present in both tables whose significant fields differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentChange {
    pub reference: String,
    /// Snapshot from the old table
    pub original: Component,
    /// Snapshot from the new table
    pub modified: Component,
    /// Every canonical field that differs, significant or not
    pub field_changes: Vec<FieldChange>,
}

impl ComponentChange {
    /// Differences that caused this entry to be reported.
    pub fn significant_changes(&self) -> impl Iterator<Item = &FieldChange> {
        self.field_changes.iter().filter(|c| c.significant)
    }
}

/// One differing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: CanonicalField,
    pub old: String,
    pub new: String,
    /// Whether this field takes part in change detection
    pub significant: bool,
}
