//! Compare command handler.
//!
//! Compares two JSON or YAML documents and prints one line per difference.

use super::document::load_document;
use super::exit_codes;
use crate::compare::{compare, ComparisonResult};
use crate::config::{load_config_file, load_or_default, ComparisonConfig, ConfigPreset};
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::str::FromStr;

/// How the result is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per difference
    #[default]
    Text,
    /// The full result as JSON
    Json,
}

/// A `TYPE=MEMBER,MEMBER` matching key given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchKey {
    pub type_name: String,
    pub members: Vec<String>,
}

impl FromStr for MatchKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (type_name, members) = s
            .split_once('=')
            .ok_or_else(|| format!("expected TYPE=MEMBER[,MEMBER...], got '{s}'"))?;
        let type_name = type_name.trim();
        let members: Vec<String> = members
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect();
        if type_name.is_empty() || members.is_empty() {
            return Err(format!("expected TYPE=MEMBER[,MEMBER...], got '{s}'"));
        }
        Ok(Self {
            type_name: type_name.to_string(),
            members,
        })
    }
}

/// Options of the compare command. Flags override values from the config
/// file or preset.
#[derive(Debug, Clone, Default)]
pub struct CompareOptions {
    pub left: PathBuf,
    pub right: PathBuf,
    pub config_file: Option<PathBuf>,
    pub preset: Option<ConfigPreset>,
    pub ignore_order: bool,
    pub ignore_types: bool,
    pub case_insensitive: bool,
    pub max_differences: Option<usize>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub match_keys: Vec<MatchKey>,
    pub format: OutputFormat,
    pub quiet: bool,
}

/// Build the effective configuration for a run.
///
/// An explicit config file must load; otherwise the preset is used, and
/// without a preset a discovered config file or the defaults.
pub fn resolve_config(options: &CompareOptions) -> Result<ComparisonConfig> {
    let mut config = if let Some(path) = &options.config_file {
        load_config_file(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?
    } else if let Some(preset) = options.preset {
        ComparisonConfig::from_preset(preset)
    } else {
        let (config, loaded_from) = load_or_default(None);
        if let Some(path) = loaded_from {
            tracing::debug!("Using config file {}", path.display());
        }
        config
    };

    if options.ignore_order {
        config.ignore_collection_order = true;
    }
    if options.ignore_types {
        config.ignore_object_types = true;
    }
    if options.case_insensitive {
        config.case_sensitive = false;
    }
    if let Some(max) = options.max_differences {
        config.max_differences = max;
    }
    config.members_to_include.extend(options.include.iter().cloned());
    config.members_to_exclude.extend(options.exclude.iter().cloned());
    for key in &options.match_keys {
        config
            .collection_matching_spec
            .insert(key.type_name.clone(), key.members.clone());
    }
    Ok(config)
}

/// Run the compare command, returning the desired exit code.
pub fn run_compare(options: &CompareOptions) -> Result<i32> {
    let config = resolve_config(options)?;

    let left = load_document(&options.left)
        .with_context(|| format!("Failed to load {}", options.left.display()))?;
    let right = load_document(&options.right)
        .with_context(|| format!("Failed to load {}", options.right.display()))?;

    let result = compare(&left, &right, &config).context("Comparison failed")?;
    tracing::info!(
        "Found {} difference(s) in {:?}",
        result.len(),
        result.elapsed
    );

    if !options.quiet {
        print_result(&result, options.format)?;
    }

    Ok(if result.are_equal {
        exit_codes::EQUAL
    } else {
        exit_codes::DIFFERENT
    })
}

fn print_result(result: &ComparisonResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        OutputFormat::Text => {
            for difference in &result.differences {
                println!("{difference}");
            }
            if result.max_differences_reached {
                eprintln!(
                    "Stopped after {} difference(s); raise --max-differences to see more",
                    result.max_differences
                );
            }
        }
    }
    Ok(())
}

/// Parse an output format name.
pub fn parse_output_format(name: &str) -> Result<OutputFormat> {
    match name.to_ascii_lowercase().as_str() {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => bail!("Unknown output format '{other}'. Valid options: text, json"),
    }
}
