//! Field normalization.
//!
//! Every strategy hands over raw `(name, value)` pairs in its own
//! vocabulary; [`FieldResolver`] maps them onto the canonical field set
//! through the declarative [`FieldAliases`] table.

mod aliases;
mod resolver;

pub use aliases::{fold_key, FieldAliases};
pub use resolver::FieldResolver;
