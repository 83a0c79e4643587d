//! **Parse and compare electronics Bills of Materials exported as XML.**
//!
//! `bom-diff` reads BOM exports from PLM systems, EDA tools and ad-hoc
//! spreadsheets-turned-XML, normalizes every record onto one canonical set
//! of fields keyed by reference designator, and reports what changed
//! between two revisions of a board.
//!
//! ## Key Features
//!
//! - **Dialect detection**: three extraction strategies are tried in order
//!   (structured `DETAILS/RECORD`, generic `Component` elements, and a
//!   heuristic tag scan); the first that yields a referenced record wins.
//! - **Field normalization**: a case- and separator-insensitive alias table
//!   maps `PART-NUM`, `PartNumber`, `mpn`, ... onto the same canonical field.
//! - **Designator expansion**: compound designators such as `R1-R4` or
//!   `C1, C2` become one entry per physical part.
//! - **Diffing**: added, removed and changed designators, with per-field
//!   old/new values. Only a configurable set of significant fields decides
//!   whether a component counts as changed.
//! - **Reporting**: JSON (client field names), CSV, plain summary and an
//!   aligned terminal table, plus knowledge-base documents per component.
//!
//! ## Core Modules
//!
//! - **[`parsers`]**: XML tree, strategy cascade and [`BomParser`].
//! - **[`normalize`]**: [`FieldAliases`] and the record resolver.
//! - **[`expand`]**: reference designator expansion.
//! - **[`model`]**: [`Component`], [`ComponentTable`] and the canonical fields.
//! - **[`diff`]**: the [`DiffEngine`].
//! - **[`reports`]**, **[`pipeline`]**, **[`config`]**, **[`cli`]**: the
//!   command-line surface.
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use bom_diff::{parse_bom, DiffEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let old = parse_bom(Path::new("board_rev_a.xml"))?;
//!     let new = parse_bom(Path::new("board_rev_b.xml"))?;
//!
//!     let diff = DiffEngine::new().diff(&old, &new);
//!
//!     println!("Added: {}", diff.summary.added);
//!     println!("Removed: {}", diff.summary.removed);
//!     for change in &diff.changed {
//!         for field in change.significant_changes() {
//!             println!(
//!                 "  {} {}: {} -> {}",
//!                 change.reference, field.field, field.old, field.new
//!             );
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Narrowing what counts as a change
//!
//! ```no_run
//! use bom_diff::{model::CanonicalField, parse_bom_str, DiffEngine};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let old = parse_bom_str("<parts><part ref=\"R1\" pn=\"A\" qty=\"1\"/></parts>")?;
//! let new = parse_bom_str("<parts><part ref=\"R1\" pn=\"A\" qty=\"2\"/></parts>")?;
//!
//! let engine = DiffEngine::new().with_significant_fields(vec![CanonicalField::PartNumber])?;
//! assert!(!engine.diff(&old, &new).has_changes());
//! # Ok(())
//! # }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools,
    clippy::module_name_repetitions,
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod expand;
pub mod model;
pub mod normalize;
pub mod parsers;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigPreset};
pub use config::{BehaviorConfig, ComparisonConfig, OutputConfig, ParsingConfig};
pub use config::{ConfigError, Validatable};
pub use config::{DiffConfig, ViewConfig};
pub use diff::{ChangeType, ComponentChange, DiffEngine, DiffResult, DiffSummary, FieldChange};
pub use error::{BomDiffError, ErrorContext, OptionContext, Result};
pub use expand::{expand_designator, expand_table, ExpandOptions};
pub use model::{CanonicalField, Component, ComponentDocument, ComponentFields, ComponentTable};
pub use normalize::FieldAliases;
pub use parsers::{detect_dialect, parse_bom, parse_bom_str, BomParser, ParseError};
pub use reports::{ReportFormat, ReportGenerator};
