//! Subcommand handlers.
//!
//! `main` builds a [`DiffConfig`] or [`ViewConfig`] from flags and config
//! files; the handlers here do the work and return the process exit code.

mod diff;
mod view;

pub use diff::run_diff;
pub use view::run_view;

pub use crate::config::{DiffConfig, ViewConfig};
