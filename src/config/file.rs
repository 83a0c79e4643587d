//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use crate::expand::DEFAULT_MAX_RANGE_SPAN;
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".bom-diff.yaml",
    ".bom-diff.yml",
    "bom-diff.yaml",
    "bom-diff.yml",
    ".bomdiffrc",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/bom-diff/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if let Some(path) = find_config_in_dir(&cwd) {
            return Some(path);
        }
    }

    if let Some(git_root) = find_git_root() {
        if let Some(path) = find_config_in_dir(&git_root) {
            return Some(path);
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        if let Some(path) = find_config_in_dir(&config_dir.join("bom-diff")) {
            return Some(path);
        }
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Why a config file could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid YAML in config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    // An empty file is a valid, all-defaults config.
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "Loaded config file");
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override; this is how CLI
    /// arguments are layered over file config.
    pub fn merge(&mut self, other: &Self) {
        // Comparison config
        if !other.comparison.is_default_tuple() {
            self.comparison
                .significant_fields
                .clone_from(&other.comparison.significant_fields);
        }
        if other.comparison.include_unchanged {
            self.comparison.include_unchanged = true;
        }

        // Parsing config
        if !other.parsing.expand_references {
            self.parsing.expand_references = false;
        }
        if other.parsing.max_range_span != DEFAULT_MAX_RANGE_SPAN {
            self.parsing.max_range_span = other.parsing.max_range_span;
        }
        for (field, names) in &other.parsing.extra_aliases {
            self.parsing
                .extra_aliases
                .entry(*field)
                .or_default()
                .extend(names.iter().cloned());
        }

        // Output config - only override if explicitly set
        if other.output.format != ReportFormat::Auto {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }

        // Behavior config (booleans - if set to true, override)
        if other.behavior.fail_on_change {
            self.behavior.fail_on_change = true;
        }
        if other.behavior.fail_on_empty {
            self.behavior.fail_on_empty = true;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# BOM Diff Configuration
# Place this file at .bom-diff.yaml in your project root or ~/.config/bom-diff/

{}",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# BOM Diff Configuration File
# ============================
#
# Place it at:
#   - .bom-diff.yaml in your project root
#   - ~/.config/bom-diff/bom-diff.yaml for global config
#
# CLI arguments always override file settings.

# Change detection
comparison:
  # Fields whose difference marks a component as changed:
  # partNumber, partName, quantity, optionalFlag, package,
  # description, corpNum, number
  significant_fields: [partNumber, optionalFlag, quantity, corpNum]
  # List unchanged designators in the output
  include_unchanged: false

# Parsing
parsing:
  # Split compound designators (R1-R5, C1,C2)
  expand_references: true
  # Wider numeric ranges are kept as one designator
  max_range_span: 10000
  # Extra raw tag names per canonical field
  # extra_aliases:
  #   partNumber: [InternalPN]
  #   package: [Housing]

# Output configuration
output:
  # Format: auto, json, csv, summary, table
  format: auto
  # Output file path (omit for stdout)
  # file: changes.json
  no_color: false

# Behavior flags
behavior:
  # Exit with code 1 if any change is detected
  fail_on_change: false
  # Exit with code 2 if a document yields no components
  fail_on_empty: false
  # Suppress non-essential output
  quiet: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Validatable;
    use crate::model::CanonicalField;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".bom-diff.yaml");
        std::fs::write(&config_path, "behavior:\n  quiet: true\n").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r"
comparison:
  significant_fields: [partNumber, package]
parsing:
  max_range_span: 500
  extra_aliases:
    corpNum: [InternalId]
behavior:
  fail_on_change: true
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(
            config.comparison.significant_fields,
            [CanonicalField::PartNumber, CanonicalField::Package]
        );
        assert_eq!(config.parsing.max_range_span, 500);
        assert!(config.parsing.expand_references);
        assert_eq!(
            config.parsing.extra_aliases[&CanonicalField::CorpNum],
            ["InternalId"]
        );
        assert!(config.behavior.fail_on_change);
    }

    #[test]
    fn test_load_empty_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".bomdiffrc");
        std::fs::write(&config_path, "\n").unwrap();
        assert_eq!(load_config_file(&config_path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_bad_field_name() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        std::fs::write(&config_path, "comparison:\n  significant_fields: [colour]\n").unwrap();
        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::builder()
            .alias(CanonicalField::Package, "Housing")
            .build();
        let overrides = AppConfig::builder()
            .significant_fields(vec![CanonicalField::PartNumber])
            .expand_references(false)
            .alias(CanonicalField::Package, "Case2")
            .output_format(ReportFormat::Csv)
            .fail_on_change(true)
            .build();

        base.merge(&overrides);

        assert_eq!(base.comparison.significant_fields, [CanonicalField::PartNumber]);
        assert!(!base.parsing.expand_references);
        assert_eq!(
            base.parsing.extra_aliases[&CanonicalField::Package],
            ["Housing", "Case2"]
        );
        assert_eq!(base.output.format, ReportFormat::Csv);
        assert!(base.behavior.fail_on_change);
    }

    #[test]
    fn test_merge_defaults_keep_file_values() {
        let mut base = AppConfig::builder()
            .max_range_span(50)
            .quiet(true)
            .build();
        base.merge(&AppConfig::default());
        assert_eq!(base.parsing.max_range_span, 50);
        assert!(base.behavior.quiet);
    }

    #[test]
    fn test_generated_examples_load() {
        let tmp = TempDir::new().unwrap();
        for (name, content) in [
            ("short.yaml", generate_example_config()),
            ("full.yaml", generate_full_example_config()),
        ] {
            let path = tmp.path().join(name);
            std::fs::write(&path, content).unwrap();
            let config = load_config_file(&path).unwrap();
            assert_eq!(config, AppConfig::default());
            assert!(config.is_valid());
        }
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "behavior:\n  quiet: true").unwrap();

        let discovered = discover_config_file(Some(&config_path));
        assert_eq!(discovered, Some(config_path));
    }
}
