//! Configuration types for bom-diff operations.

use crate::diff::DiffEngine;
use crate::error::BomDiffError;
use crate::expand::{ExpandOptions, DEFAULT_MAX_RANGE_SPAN};
use crate::model::CanonicalField;
use crate::normalize::FieldAliases;
use crate::parsers::BomParser;
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Top-level configuration, loadable from a YAML file and overridable
/// from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Change detection settings
    pub comparison: ComparisonConfig,
    /// Parsing and designator expansion
    pub parsing: ParsingConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the fields compared for change detection.
    pub fn significant_fields(mut self, fields: Vec<CanonicalField>) -> Self {
        self.config.comparison.significant_fields = fields;
        self
    }

    pub const fn include_unchanged(mut self, include: bool) -> Self {
        self.config.comparison.include_unchanged = include;
        self
    }

    pub const fn expand_references(mut self, expand: bool) -> Self {
        self.config.parsing.expand_references = expand;
        self
    }

    pub const fn max_range_span(mut self, span: usize) -> Self {
        self.config.parsing.max_range_span = span;
        self
    }

    /// Accept additional raw names for a canonical field.
    pub fn alias(mut self, field: CanonicalField, raw_name: impl Into<String>) -> Self {
        self.config
            .parsing
            .extra_aliases
            .entry(field)
            .or_default()
            .push(raw_name.into());
        self
    }

    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    pub const fn fail_on_empty(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_empty = fail;
        self
    }

    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section Types
// ============================================================================

/// Change detection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Fields whose difference marks a component as changed.
    /// Default: partNumber, optionalFlag, quantity, corpNum
    pub significant_fields: Vec<CanonicalField>,
    /// List unchanged designators in the output
    pub include_unchanged: bool,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            significant_fields: CanonicalField::DEFAULT_SIGNIFICANT.to_vec(),
            include_unchanged: false,
        }
    }
}

impl ComparisonConfig {
    /// Whether the significant fields differ from the default tuple.
    #[must_use]
    pub fn is_default_tuple(&self) -> bool {
        let mut fields = self.significant_fields.clone();
        fields.sort();
        let mut default = CanonicalField::DEFAULT_SIGNIFICANT.to_vec();
        default.sort();
        fields == default
    }

    /// Build a diff engine from these settings.
    pub fn build_engine(&self) -> Result<DiffEngine, BomDiffError> {
        Ok(DiffEngine::new()
            .with_significant_fields(self.significant_fields.clone())?
            .include_unchanged(self.include_unchanged))
    }
}

/// Parsing and designator expansion settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ParsingConfig {
    /// Split compound designators such as `R1-R5` and `C1,C2`
    pub expand_references: bool,
    /// Numeric ranges wider than this are kept as a single designator
    #[schemars(range(min = 1))]
    pub max_range_span: usize,
    /// Extra raw field names per canonical field, tried after the built-ins
    pub extra_aliases: BTreeMap<CanonicalField, Vec<String>>,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            expand_references: true,
            max_range_span: DEFAULT_MAX_RANGE_SPAN,
            extra_aliases: BTreeMap::new(),
        }
    }
}

impl ParsingConfig {
    /// Built-in aliases extended with `extra_aliases`.
    #[must_use]
    pub fn aliases(&self) -> FieldAliases {
        let mut aliases = FieldAliases::with_builtins();
        for (field, names) in &self.extra_aliases {
            aliases.add_aliases(*field, names);
        }
        aliases
    }

    #[must_use]
    pub const fn expand_options(&self) -> ExpandOptions {
        ExpandOptions {
            max_range_span: self.max_range_span,
        }
    }

    /// Build a parser from these settings.
    #[must_use]
    pub fn build_parser(&self) -> BomParser {
        let parser = BomParser::with_aliases(self.aliases());
        if self.expand_references {
            parser.with_expand_options(self.expand_options())
        } else {
            parser.without_expansion()
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format: auto, json, csv, summary, table
    pub format: ReportFormat,
    /// Output file path (stdout when omitted)
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

/// Behavior flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if any change is detected
    pub fail_on_change: bool,
    /// Exit with code 2 if a document yields no components
    pub fail_on_empty: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}

// ============================================================================
// Command-specific Configuration Types
// ============================================================================

/// Paths for a diff operation.
#[derive(Debug, Clone)]
pub struct DiffPaths {
    /// Path to the old/baseline BOM
    pub old: PathBuf,
    /// Path to the new BOM
    pub new: PathBuf,
}

/// Resolved configuration for the `diff` command.
#[derive(Debug, Clone)]
pub struct DiffConfig {
    pub paths: DiffPaths,
    pub comparison: ComparisonConfig,
    pub parsing: ParsingConfig,
    pub output: OutputConfig,
    pub behavior: BehaviorConfig,
}

impl DiffConfig {
    /// Combine paths with an application config.
    #[must_use]
    pub fn from_app(paths: DiffPaths, app: AppConfig) -> Self {
        Self {
            paths,
            comparison: app.comparison,
            parsing: app.parsing,
            output: app.output,
            behavior: app.behavior,
        }
    }
}

/// Resolved configuration for the `view` command.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub bom_path: PathBuf,
    pub parsing: ParsingConfig,
    pub output: OutputConfig,
    pub behavior: BehaviorConfig,
    /// Emit knowledge-base documents (JSON lines) instead of a report
    pub documents: bool,
}
