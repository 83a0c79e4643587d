//! Configuration module for bom-diff.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use bom_diff::config::{AppConfig, ConfigPreset};
//! use bom_diff::model::CanonicalField;
//!
//! // Use defaults
//! let config = AppConfig::default();
//!
//! // Use a preset
//! let config = AppConfig::from_preset(ConfigPreset::PartOnly);
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .significant_fields(vec![CanonicalField::PartNumber, CanonicalField::Package])
//!     .fail_on_change(true)
//!     .build();
//!
//! // Load from file
//! use bom_diff::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.bom-diff.yaml` file in your project root or `~/.config/bom-diff/`:
//!
//! ```yaml
//! comparison:
//!   significant_fields: [partNumber, quantity]
//! parsing:
//!   extra_aliases:
//!     partNumber: [InternalPN]
//! behavior:
//!   fail_on_change: true
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

// Re-export main types
pub use defaults::ConfigPreset;
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, ComparisonConfig, DiffConfig, DiffPaths,
    OutputConfig, ParsingConfig, ViewConfig,
};
pub use validation::{ConfigError, Validatable};

// Re-export file utilities
pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.bom-diff.yaml` config files. It can be used by editors for
/// validation and autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
