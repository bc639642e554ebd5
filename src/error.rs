//! Unified error types for deep-compare.
//!
//! Structural mismatches are never errors; they are reported as
//! [`Difference`](crate::Difference) records. The types here cover
//! configuration misuse discovered during a comparison, document loading
//! for the command-line front end, and IO.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for deep-compare operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CompareError {
    /// Configuration misuse detected while comparing
    #[error("Comparison failed: {context}")]
    Comparison {
        context: String,
        #[source]
        source: ComparisonErrorKind,
    },

    /// Errors while loading a document to compare
    #[error("Failed to load document: {context}")]
    Document {
        context: String,
        #[source]
        source: DocumentErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Configuration faults surfaced at their point of first use
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ComparisonErrorKind {
    #[error("matching spec for '{type_name}' references unknown member '{member}'")]
    UnknownMatchingMember { type_name: String, member: String },

    #[error("matching key member '{member}' of '{type_name}' could not be read: {reason}")]
    MatchingKeyUnavailable {
        type_name: String,
        member: String,
        reason: String,
    },

    #[error("matching spec for '{type_name}' lists no members")]
    EmptyMatchingSpec { type_name: String },
}

/// Specific document error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DocumentErrorKind {
    #[error("Unknown document format - expected JSON or YAML")]
    UnknownFormat,

    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for deep-compare operations
pub type Result<T> = std::result::Result<T, CompareError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl CompareError {
    /// Create a comparison error with context
    pub fn comparison(context: impl Into<String>, source: ComparisonErrorKind) -> Self {
        Self::Comparison {
            context: context.into(),
            source,
        }
    }

    /// Matching spec names a member the element type does not have
    pub fn unknown_matching_member(
        path: impl Into<String>,
        type_name: impl Into<String>,
        member: impl Into<String>,
    ) -> Self {
        Self::comparison(
            format!("at '{}'", path.into()),
            ComparisonErrorKind::UnknownMatchingMember {
                type_name: type_name.into(),
                member: member.into(),
            },
        )
    }

    /// Create a document error with context
    pub fn document(context: impl Into<String>, source: DocumentErrorKind) -> Self {
        Self::Document {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for CompareError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for CompareError {
    fn from(err: serde_json::Error) -> Self {
        Self::document(
            "JSON deserialization",
            DocumentErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<serde_yaml::Error> for CompareError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::document(
            "YAML deserialization",
            DocumentErrorKind::InvalidYaml(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained outermost-first, so an error raised deep in a
/// comparison reads like `"outer: inner: original"`.
///
/// # Example
///
/// ```ignore
/// use deep_compare::error::ErrorContext;
///
/// let text = std::fs::read_to_string(path).context("reading left document")?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, only evaluated on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<CompareError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: CompareError, new_ctx: &str) -> CompareError {
    match err {
        CompareError::Comparison {
            context: existing,
            source,
        } => CompareError::Comparison {
            context: chain_context(new_ctx, &existing),
            source,
        },
        CompareError::Document {
            context: existing,
            source,
        } => CompareError::Document {
            context: chain_context(new_ctx, &existing),
            source,
        },
        CompareError::Io {
            path,
            message,
            source,
        } => CompareError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        CompareError::Config(msg) => CompareError::Config(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
