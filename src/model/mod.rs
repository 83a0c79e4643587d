//! Canonical data model for BOM comparison.
//!
//! Every schema dialect is resolved into these structures before
//! designator expansion and diffing:
//!
//! - [`CanonicalField`] / [`ComponentFields`]: the eight normalized fields
//! - [`Component`]: one placed part, keyed by reference designator
//! - [`ComponentTable`]: insertion-ordered table with last-write-wins inserts
//! - [`ComponentDocument`]: flat rendering for knowledge-base indexing

mod component;
mod document;
mod field;
mod table;

pub use component::*;
pub use document::*;
pub use field::*;
pub use table::*;
