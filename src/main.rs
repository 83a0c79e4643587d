//! bom-diff: BOM XML parse and diff tool
//!
//! Compares two electronics Bills of Materials exported in any of several
//! XML dialects.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use bom_diff::{
    cli,
    config::{AppConfig, ConfigPreset, DiffConfig, DiffPaths, ViewConfig, CONFIG_FILE_NAMES},
    model::CanonicalField,
    parsers::detect_dialect,
    pipeline::exit_codes,
    reports::ReportFormat,
    OptionContext,
};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with dialect support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nRecognized BOM layouts (tried in order):",
        "\n  structured:         DETAILS/RECORD with REFDES, PART-NUM, QTY, OPT, ...",
        "\n  generic-component:  Component elements with Reference, PartNumber, ...",
        "\n  heuristic:          part/component/comp/item/row/... with a reference tag",
        "\n\nOutput Formats:",
        "\n  json, csv, summary, table"
    )
}

#[derive(Parser)]
#[command(name = "bom-diff")]
#[command(version, long_version = build_long_version())]
#[command(about = "Parse and compare electronics BOM XML exports", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Changes detected (with --fail-on-change)
    2  A document yielded no components (with --fail-on-empty)
    3  Error occurred

EXAMPLES:
    # Quick diff with auto-detected output
    bom-diff diff rev_a.xml rev_b.xml

    # CI check: JSON report, non-zero exit on any change
    bom-diff diff rev_a.xml rev_b.xml --preset ci-cd -O changes.json

    # Only a part number swap counts as a change
    bom-diff diff rev_a.xml rev_b.xml --fields partNumber

    # Export knowledge-base documents
    bom-diff view rev_b.xml --documents > rev_b.jsonl")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "BOM_DIFF_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Parsing options shared by `diff` and `view`
#[derive(clap::Args)]
struct ParsingArgs {
    /// Keep compound designators (R1-R5, C1,C2) as single entries
    #[arg(long)]
    no_expand: bool,

    /// Numeric ranges wider than this are not enumerated
    #[arg(long, value_name = "N")]
    max_range_span: Option<usize>,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Path to the old/baseline BOM
    old: PathBuf,

    /// Path to the new BOM
    new: PathBuf,

    /// Output format (auto: table on a terminal, summary otherwise)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Start from a named preset (default, strict, part-only, ci-cd)
    #[arg(long)]
    preset: Option<String>,

    /// Fields whose difference marks a component as changed
    #[arg(long, value_delimiter = ',', value_name = "FIELD")]
    fields: Vec<CanonicalField>,

    /// Include unchanged designators in output
    #[arg(long)]
    include_unchanged: bool,

    #[command(flatten)]
    parsing: ParsingArgs,

    /// Exit with code 1 if any changes detected
    #[arg(long)]
    fail_on_change: bool,

    /// Exit with code 2 if either document yields no components
    #[arg(long)]
    fail_on_empty: bool,
}

/// Arguments for the `view` subcommand
#[derive(Parser)]
struct ViewArgs {
    /// Path to the BOM
    bom: PathBuf,

    /// Output format (auto: table on a terminal, summary otherwise)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Emit one knowledge-base document per component as JSON lines
    #[arg(long)]
    documents: bool,

    #[command(flatten)]
    parsing: ParsingArgs,

    /// Exit with code 2 if the document yields no components
    #[arg(long)]
    fail_on_empty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two BOMs
    Diff(DiffArgs),

    /// View a single BOM
    View(ViewArgs),

    /// Print which BOM layout a document uses
    Detect {
        /// Path to the BOM
        bom: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .bom-diff.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(code) => {
            if code != exit_codes::SUCCESS {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

/// Apply parsing flags on top of a config.
fn apply_parsing_args(overrides: &mut AppConfig, args: &ParsingArgs) {
    overrides.parsing.expand_references = !args.no_expand;
    if let Some(span) = args.max_range_span {
        overrides.parsing.max_range_span = span;
    }
}

fn load_config(cli_config: Option<&std::path::Path>, overrides: &AppConfig) -> AppConfig {
    let (config, loaded_from) = AppConfig::from_file_with_overrides(cli_config, overrides);
    if let Some(path) = loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }
    config
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Diff(args) => {
            let mut overrides = match args.preset.as_deref() {
                Some(name) => AppConfig::from_preset(
                    ConfigPreset::from_name(name).context_none(format!(
                        "unknown preset '{name}' (expected default, strict, part-only or ci-cd)"
                    ))?,
                ),
                None => AppConfig::default(),
            };
            if !args.fields.is_empty() {
                overrides.comparison.significant_fields = args.fields;
            }
            overrides.comparison.include_unchanged |= args.include_unchanged;
            apply_parsing_args(&mut overrides, &args.parsing);
            if args.output != ReportFormat::Auto {
                overrides.output.format = args.output;
            }
            if args.output_file.is_some() {
                overrides.output.file = args.output_file;
            }
            overrides.output.no_color |= cli.no_color;
            overrides.behavior.fail_on_change |= args.fail_on_change;
            overrides.behavior.fail_on_empty |= args.fail_on_empty;
            overrides.behavior.quiet |= cli.quiet;

            let app = load_config(cli.config.as_deref(), &overrides);
            let config = DiffConfig::from_app(
                DiffPaths {
                    old: args.old,
                    new: args.new,
                },
                app,
            );
            cli::run_diff(config)
        }

        Commands::View(args) => {
            let mut overrides = AppConfig::builder()
                .output_format(args.output)
                .output_file(args.output_file)
                .no_color(cli.no_color)
                .fail_on_empty(args.fail_on_empty)
                .quiet(cli.quiet)
                .build();
            apply_parsing_args(&mut overrides, &args.parsing);

            let app = load_config(cli.config.as_deref(), &overrides);
            let config = ViewConfig {
                bom_path: args.bom,
                parsing: app.parsing,
                output: app.output,
                behavior: app.behavior,
                documents: args.documents,
            };
            cli::run_view(config)
        }

        Commands::Detect { bom } => {
            let content = std::fs::read_to_string(&bom)
                .with_context(|| format!("failed to read {}", bom.display()))?;
            match detect_dialect(&content)? {
                Some(dialect) => {
                    println!("{dialect}");
                    Ok(exit_codes::SUCCESS)
                }
                None => {
                    println!("unrecognized");
                    Ok(exit_codes::NO_COMPONENTS)
                }
            }
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "bom-diff", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = bom_diff::config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => run_config(action, cli.config.as_deref()),
    }
}

fn run_config(action: ConfigAction, explicit: Option<&std::path::Path>) -> Result<i32> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) = bom_diff::config::load_or_default(explicit);
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            let search_paths: [Option<String>; 3] = [
                std::env::current_dir()
                    .ok()
                    .map(|p| p.display().to_string()),
                dirs::config_dir().map(|p| p.join("bom-diff").display().to_string()),
                dirs::home_dir().map(|p| p.display().to_string()),
            ];
            eprintln!("Config file search paths (in order, git root after the first):");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {path}");
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match bom_diff::config::discover_config_file(explicit) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".bom-diff.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = bom_diff::config::generate_full_example_config();
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
    }
    Ok(exit_codes::SUCCESS)
}
