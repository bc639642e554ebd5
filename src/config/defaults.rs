//! Default values and named presets for comparisons.

use super::types::ComparisonConfig;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Stop at the first difference, everything strict
    Default,
    /// Collect every difference
    Exhaustive,
    /// Collect every difference, ignoring collection order
    Unordered,
    /// Collect every difference with relaxed type and string checks
    Lenient,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Exhaustive => "exhaustive",
            Self::Unordered => "unordered",
            Self::Lenient => "lenient",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "strict" => Some(Self::Default),
            "exhaustive" | "all" => Some(Self::Exhaustive),
            "unordered" | "ignore-order" => Some(Self::Unordered),
            "lenient" | "loose" => Some(Self::Lenient),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Report the first difference only",
            Self::Exhaustive => "Report every difference",
            Self::Unordered => "Report every difference and match collection elements by value",
            Self::Lenient => {
                "Report every difference, ignoring collection order, object types, case and surrounding whitespace"
            }
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Exhaustive, Self::Unordered, Self::Lenient]
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

impl ComparisonConfig {
    /// Create a `ComparisonConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Exhaustive => Self::builder().unlimited().build(),
            ConfigPreset::Unordered => Self::builder()
                .unlimited()
                .ignore_collection_order(true)
                .build(),
            ConfigPreset::Lenient => Self::builder()
                .unlimited()
                .ignore_collection_order(true)
                .ignore_object_types(true)
                .case_sensitive(false)
                .ignore_string_leading_trailing_whitespace(true)
                .treat_string_empty_and_null_as_equal(true)
                .build(),
        }
    }
}

// ============================================================================
// Default Value Constants
// ============================================================================

/// Default difference cap.
pub const DEFAULT_MAX_DIFFERENCES: usize = 1;

/// Default tuple nesting depth that is still compared.
pub const DEFAULT_MAX_STRUCT_DEPTH: usize = 2;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names() {
        assert_eq!(ConfigPreset::Default.name(), "default");
        assert_eq!(ConfigPreset::Unordered.name(), "unordered");
        assert_eq!(ConfigPreset::Lenient.to_string(), "lenient");
    }

    #[test]
    fn test_preset_from_name() {
        assert_eq!(ConfigPreset::from_name("DEFAULT"), Some(ConfigPreset::Default));
        assert_eq!(
            ConfigPreset::from_name("ignore-order"),
            Some(ConfigPreset::Unordered)
        );
        assert_eq!(ConfigPreset::from_name("loose"), Some(ConfigPreset::Lenient));
        assert_eq!(ConfigPreset::from_name("invalid"), None);
    }

    #[test]
    fn test_presets_round_trip_by_name() {
        for preset in ConfigPreset::all() {
            assert_eq!(ConfigPreset::from_name(preset.name()), Some(*preset));
            assert!(!preset.description().is_empty());
        }
    }

    #[test]
    fn test_lenient_preset() {
        let config = ComparisonConfig::from_preset(ConfigPreset::Lenient);
        assert_eq!(config.max_differences, usize::MAX);
        assert!(config.ignore_collection_order);
        assert!(config.ignore_object_types);
        assert!(!config.case_sensitive);
    }

    #[test]
    fn test_default_preset_is_default() {
        let config = ComparisonConfig::from_preset(ConfigPreset::Default);
        assert_eq!(config.max_differences, DEFAULT_MAX_DIFFERENCES);
        assert_eq!(config.max_struct_depth, DEFAULT_MAX_STRUCT_DEPTH);
    }
}
