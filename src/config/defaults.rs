//! Default configurations and presets for bom-diff.
//!
//! Provides named presets for common use cases.

use super::types::{AppConfig, BehaviorConfig, ComparisonConfig, OutputConfig, ParsingConfig};
use crate::model::CanonicalField;
use crate::reports::ReportFormat;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Default tuple of significant fields, designators expanded
    Default,
    /// Every canonical field is significant
    Strict,
    /// Only the part number is significant
    PartOnly,
    /// CI/CD: JSON output, fail on changes
    CiCd,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Strict => "strict",
            Self::PartOnly => "part-only",
            Self::CiCd => "ci-cd",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "balanced" => Some(Self::Default),
            "strict" | "all-fields" => Some(Self::Strict),
            "part-only" | "part" | "pn" => Some(Self::PartOnly),
            "ci-cd" | "ci" | "cd" | "pipeline" => Some(Self::CiCd),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Part number, OPT, quantity and corp number decide a change",
            Self::Strict => "Any field difference, including description and package, is a change",
            Self::PartOnly => "Only a part number swap counts as a change",
            Self::CiCd => "JSON output without color, exit code 1 on changes",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Strict, Self::PartOnly, Self::CiCd]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Strict => Self::strict_preset(),
            ConfigPreset::PartOnly => Self::part_only_preset(),
            ConfigPreset::CiCd => Self::ci_cd_preset(),
        }
    }

    /// Strict preset: every canonical field is compared.
    #[must_use]
    pub fn strict_preset() -> Self {
        Self {
            comparison: ComparisonConfig {
                significant_fields: CanonicalField::ALL.to_vec(),
                include_unchanged: false,
            },
            ..Self::default()
        }
    }

    /// Part-only preset: re-sourcing is the only thing that matters.
    #[must_use]
    pub fn part_only_preset() -> Self {
        Self {
            comparison: ComparisonConfig {
                significant_fields: vec![CanonicalField::PartNumber],
                include_unchanged: false,
            },
            ..Self::default()
        }
    }

    /// CI/CD pipeline preset.
    ///
    /// - JSON output for machine parsing
    /// - Fail on any changes and on empty documents
    /// - Quiet mode to reduce noise
    #[must_use]
    pub fn ci_cd_preset() -> Self {
        Self {
            comparison: ComparisonConfig::default(),
            parsing: ParsingConfig::default(),
            output: OutputConfig {
                format: ReportFormat::Json,
                file: None,
                no_color: true,
            },
            behavior: BehaviorConfig {
                fail_on_change: true,
                fail_on_empty: true,
                quiet: true,
            },
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names() {
        assert_eq!(ConfigPreset::Default.name(), "default");
        assert_eq!(ConfigPreset::PartOnly.name(), "part-only");
        assert_eq!(ConfigPreset::CiCd.name(), "ci-cd");
    }

    #[test]
    fn test_preset_from_name() {
        assert_eq!(ConfigPreset::from_name("DEFAULT"), Some(ConfigPreset::Default));
        assert_eq!(ConfigPreset::from_name("pn"), Some(ConfigPreset::PartOnly));
        assert_eq!(ConfigPreset::from_name("pipeline"), Some(ConfigPreset::CiCd));
        assert_eq!(ConfigPreset::from_name("invalid"), None);
        for preset in ConfigPreset::all() {
            assert_eq!(ConfigPreset::from_name(preset.name()), Some(*preset));
        }
    }

    #[test]
    fn test_strict_preset() {
        let config = AppConfig::strict_preset();
        assert_eq!(config.comparison.significant_fields.len(), 8);
        assert!(config.comparison.build_engine().is_ok());
    }

    #[test]
    fn test_part_only_preset() {
        let config = AppConfig::part_only_preset();
        assert_eq!(
            config.comparison.significant_fields,
            [CanonicalField::PartNumber]
        );
    }

    #[test]
    fn test_ci_cd_preset() {
        let config = AppConfig::ci_cd_preset();
        assert!(config.behavior.fail_on_change);
        assert!(config.behavior.quiet);
        assert!(config.output.no_color);
        assert_eq!(config.output.format, ReportFormat::Json);
    }
}
