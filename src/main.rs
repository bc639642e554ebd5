//! deep-compare: structural comparison of JSON and YAML documents
//!
//! Command-line front end of the `deep_compare` library.

#![allow(clippy::struct_excessive_bools)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use deep_compare::{
    cli::{self, exit_codes, CompareOptions, MatchKey, OutputFormat},
    config::{self, ConfigPreset},
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "deep-compare")]
#[command(author = "Binarly.io")]
#[command(version)]
#[command(about = "Structural comparison of JSON and YAML documents", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Documents are equal
    1  Differences found
    3  Error occurred

EXAMPLES:
    # Report the first difference
    deep-compare compare old.json new.json

    # Report every difference, ignoring array order
    deep-compare compare old.json new.yaml --preset unordered

    # Match array elements by their id member
    deep-compare compare old.json new.json --ignore-order --match-key object=id

    # Machine-readable output
    deep-compare compare old.json new.json --max-differences 100 -o json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Arguments for the `compare` subcommand
#[derive(Parser)]
struct CompareArgs {
    /// Path to the left (expected) document
    left: PathBuf,

    /// Path to the right (actual) document
    right: PathBuf,

    /// Configuration preset (default, exhaustive, unordered, lenient)
    #[arg(long, value_parser = parse_preset)]
    preset: Option<ConfigPreset>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_parser = parse_format)]
    output: OutputFormat,

    /// Stop after this many differences
    #[arg(short = 'n', long)]
    max_differences: Option<usize>,

    /// Compare arrays as unordered collections
    #[arg(long)]
    ignore_order: bool,

    /// Do not report differing value types
    #[arg(long)]
    ignore_types: bool,

    /// Compare strings case-insensitively
    #[arg(long)]
    case_insensitive: bool,

    /// Only compare these members (repeatable)
    #[arg(long, value_name = "MEMBER")]
    include: Vec<String>,

    /// Skip these members (repeatable)
    #[arg(long, value_name = "MEMBER")]
    exclude: Vec<String>,

    /// Match unordered array elements of TYPE by members, e.g. `object=id`
    #[arg(long, value_name = "TYPE=MEMBER[,MEMBER]")]
    match_key: Vec<MatchKey>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two JSON or YAML documents
    Compare(CompareArgs),

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
    /// Generate an example .deep-compare.yaml in the current directory
    Init,
}

fn parse_preset(name: &str) -> std::result::Result<ConfigPreset, String> {
    ConfigPreset::from_name(name).ok_or_else(|| {
        let valid: Vec<&str> = ConfigPreset::all().iter().map(ConfigPreset::name).collect();
        format!("unknown preset '{name}'. Valid options: {}", valid.join(", "))
    })
}

fn parse_format(name: &str) -> std::result::Result<OutputFormat, String> {
    cli::parse_output_format(name).map_err(|e| e.to_string())
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Compare(args) => {
            let options = CompareOptions {
                left: args.left,
                right: args.right,
                config_file: cli.config,
                preset: args.preset,
                ignore_order: args.ignore_order,
                ignore_types: args.ignore_types,
                case_insensitive: args.case_insensitive,
                max_differences: args.max_differences,
                include: args.include,
                exclude: args.exclude,
                match_keys: args.match_key,
                format: args.output,
                quiet: cli.quiet,
            };
            cli::run_compare(&options)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "deep-compare", &mut io::stdout());
            Ok(exit_codes::EQUAL)
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::EQUAL)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(exit_codes::EQUAL)
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    dirs::config_dir().map(|p| p.join("deep-compare").display().to_string()),
                    dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in config::CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(exit_codes::EQUAL)
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".deep-compare.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                std::fs::write(&target, config::generate_example_config())
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(exit_codes::EQUAL)
            }
        },
    }
}
