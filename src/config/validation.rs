//! Configuration validation for bom-diff.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{
    AppConfig, BehaviorConfig, ComparisonConfig, DiffConfig, OutputConfig, ParsingConfig,
    ViewConfig,
};
use std::collections::HashSet;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.comparison.validate());
        errors.extend(self.parsing.validate());
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for ComparisonConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.significant_fields.is_empty() {
            errors.push(ConfigError::new(
                "comparison.significant_fields",
                "At least one significant field is required",
            ));
        }

        let mut seen = HashSet::new();
        for field in &self.significant_fields {
            if !seen.insert(field) {
                errors.push(ConfigError::new(
                    "comparison.significant_fields",
                    format!("Field '{field}' is listed more than once"),
                ));
            }
        }
        errors
    }
}

impl Validatable for ParsingConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.max_range_span == 0 {
            errors.push(ConfigError::new(
                "parsing.max_range_span",
                "Range span limit must be at least 1",
            ));
        }
        for (field, names) in &self.extra_aliases {
            if names.iter().any(|name| name.trim().is_empty()) {
                errors.push(ConfigError::new(
                    format!("parsing.extra_aliases.{}", field.name()),
                    "Alias names must not be blank",
                ));
            }
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        // Boolean flags only
        Vec::new()
    }
}

impl Validatable for DiffConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !self.paths.old.exists() {
            errors.push(ConfigError::new(
                "paths.old",
                format!("File not found: {}", self.paths.old.display()),
            ));
        }
        if !self.paths.new.exists() {
            errors.push(ConfigError::new(
                "paths.new",
                format!("File not found: {}", self.paths.new.display()),
            ));
        }

        errors.extend(self.comparison.validate());
        errors.extend(self.parsing.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for ViewConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !self.bom_path.exists() {
            errors.push(ConfigError::new(
                "bom_path",
                format!("File not found: {}", self.bom_path.display()),
            ));
        }
        errors.extend(self.parsing.validate());
        errors.extend(self.output.validate());
        errors
    }
}
