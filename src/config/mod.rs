//! Comparison configuration.
//!
//! This module provides:
//! - The `ComparisonConfig` settings struct and its fluent builder
//! - Validation of configuration values
//! - Named presets for common use cases
//! - YAML/JSON config file loading and discovery
//!
//! # Quick Start
//!
//! ```rust
//! use deep_compare::config::{ComparisonConfig, ConfigPreset};
//!
//! // Use defaults
//! let config = ComparisonConfig::default();
//! assert_eq!(config.max_differences, 1);
//!
//! // Use a preset
//! let config = ComparisonConfig::from_preset(ConfigPreset::Unordered);
//! assert!(config.ignore_collection_order);
//!
//! // Use builder
//! let config = ComparisonConfig::builder()
//!     .max_differences(50)
//!     .exclude("Person.Password")
//!     .match_collection_by("Person", ["Name", "LastName"])
//!     .build();
//! assert!(config.members_to_exclude.contains("Person.Password"));
//! ```
//!
//! # Configuration File
//!
//! Place a `.deep-compare.yaml` file in your project root or
//! `~/.config/deep-compare/`:
//!
//! ```yaml
//! max_differences: 100
//! ignore_collection_order: true
//! collection_matching_spec:
//!   Person: [Name, LastName]
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{ConfigPreset, DEFAULT_MAX_DIFFERENCES, DEFAULT_MAX_STRUCT_DEPTH};
pub use types::{ComparisonConfig, ComparisonConfigBuilder, DifferenceCallback};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `ComparisonConfig` file format.
///
/// The schema documents every option that can be set in
/// `.deep-compare.yaml` files, for editor validation and autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(ComparisonConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_fields() {
        let schema = generate_json_schema();
        assert!(schema.contains("max_differences"));
        assert!(schema.contains("collection_matching_spec"));
        assert!(!schema.contains("difference_callback"));
    }
}
