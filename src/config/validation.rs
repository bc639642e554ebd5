//! Configuration validation.

use super::types::ComparisonConfig;

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

impl Validatable for ComparisonConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.max_differences == 0 {
            errors.push(ConfigError::new(
                "max_differences",
                "Must be at least 1",
            ));
        }

        if !self.double_precision.is_finite() || self.double_precision < 0.0 {
            errors.push(ConfigError::new(
                "double_precision",
                format!(
                    "Must be a finite, non-negative number, got {}",
                    self.double_precision
                ),
            ));
        }

        if self.decimal_precision.is_sign_negative() && !self.decimal_precision.is_zero() {
            errors.push(ConfigError::new(
                "decimal_precision",
                format!("Must not be negative, got {}", self.decimal_precision),
            ));
        }

        if self.max_milliseconds_date_difference < 0 {
            errors.push(ConfigError::new(
                "max_milliseconds_date_difference",
                format!(
                    "Must not be negative, got {}",
                    self.max_milliseconds_date_difference
                ),
            ));
        }

        for (type_name, members) in &self.collection_matching_spec {
            let field = format!("collection_matching_spec.{type_name}");
            if type_name.trim().is_empty() {
                errors.push(ConfigError::new(
                    "collection_matching_spec",
                    "Type labels must not be blank",
                ));
            }
            if members.is_empty() {
                errors.push(ConfigError::new(
                    field.clone(),
                    "At least one matching member is required",
                ));
            }
            if members.iter().any(|m| m.trim().is_empty()) {
                errors.push(ConfigError::new(field, "Member names must not be blank"));
            }
        }

        for (field, entries) in [
            ("members_to_include", &self.members_to_include),
            ("members_to_exclude", &self.members_to_exclude),
            ("attributes_to_ignore", &self.attributes_to_ignore),
            (
                "required_attributes_to_compare",
                &self.required_attributes_to_compare,
            ),
        ] {
            if entries.iter().any(|e| e.trim().is_empty()) {
                errors.push(ConfigError::new(field, "Entries must not be blank"));
            }
        }

        errors
    }
}

// ============================================================================
// Tests
// ============================================================================
