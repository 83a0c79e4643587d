//! Component diff engine.
//!
//! Given an old and a new [`ComponentTable`](crate::model::ComponentTable),
//! every designator in the union of both is classified exactly once as
//! added, removed, changed or unchanged.
//!
//! "Changed" means the designator exists in both tables and at least one
//! *significant* field differs. The default significant fields are
//! `partNumber`, `optionalFlag`, `quantity` and `corpNum`; description,
//! package, part name and item number may differ without the pair being
//! reported.
//!
//! - [`ChangeComputer`](traits::ChangeComputer): trait for computing one category of changes
//! - [`ComponentChangeComputer`](changes::ComponentChangeComputer): the designator partition
//!
//! ```ignore
//! use bom_diff::diff::DiffEngine;
//!
//! let result = DiffEngine::new().diff(&old_table, &new_table);
//! for change in &result.changed {
//!     println!("{}: {:?}", change.reference, change.field_changes);
//! }
//! ```

pub mod changes;
mod engine;
mod result;
pub mod traits;

pub use changes::ComponentChangeComputer;
pub use engine::DiffEngine;
pub use result::{ChangeType, ComponentChange, DiffResult, DiffSummary, FieldChange};
pub use traits::{ChangeComputer, ComponentChangeSet};
