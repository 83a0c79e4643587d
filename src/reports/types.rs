//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Auto-detect: table on a terminal, summary otherwise
    #[default]
    Auto,
    /// Structured JSON with client field names
    Json,
    /// Brief summary output
    Summary,
    /// Aligned table for terminal (colored)
    Table,
    /// CSV for spreadsheet import
    Csv,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Json => write!(f, "json"),
            Self::Summary => write!(f, "summary"),
            Self::Table => write!(f, "table"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include unchanged designators in the report
    pub include_unchanged: bool,
    /// Include per-field change detail
    pub include_field_changes: bool,
    /// Maximum rows per section in text reports
    pub max_items: Option<usize>,
    /// Title for the report
    pub title: Option<String>,
    /// Additional metadata to include
    pub metadata: ReportMetadata,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_unchanged: false,
            include_field_changes: true,
            max_items: None,
            title: None,
            metadata: ReportMetadata::new(),
        }
    }
}

/// Metadata included in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Old BOM file path
    pub old_bom_path: Option<String>,
    /// New BOM file path
    pub new_bom_path: Option<String>,
    /// Tool version
    pub tool_version: String,
    /// Generation timestamp (RFC 3339)
    pub generated_at: Option<String>,
}

impl ReportMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        }
    }

    /// Metadata for a two-file comparison, stamped with the current time.
    #[must_use]
    pub fn for_diff(old_path: impl Into<String>, new_path: impl Into<String>) -> Self {
        Self {
            old_bom_path: Some(old_path.into()),
            new_bom_path: Some(new_path.into()),
            generated_at: Some(chrono::Utc::now().to_rfc3339()),
            ..Self::new()
        }
    }

    /// Metadata for a single-file view, stamped with the current time.
    #[must_use]
    pub fn for_view(path: impl Into<String>) -> Self {
        Self {
            new_bom_path: Some(path.into()),
            generated_at: Some(chrono::Utc::now().to_rfc3339()),
            ..Self::new()
        }
    }
}
