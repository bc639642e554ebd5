//! Loading of JSON and YAML documents.

use crate::error::{CompareError, DocumentErrorKind, ErrorContext, Result};
use serde_json::Value;
use std::path::Path;

/// Serialization format of an input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Format implied by a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Guess the format from content. JSON documents start with an object
    /// or array; anything else is treated as YAML.
    #[must_use]
    pub fn sniff(content: &str) -> Self {
        match content.trim_start().chars().next() {
            Some('{' | '[') => Self::Json,
            _ => Self::Yaml,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }
}

/// Parse document content in the given format.
pub fn parse_document(content: &str, format: DocumentFormat) -> Result<Value> {
    if content.trim().is_empty() {
        return Err(CompareError::document(
            "parsing document",
            DocumentErrorKind::UnknownFormat,
        ));
    }
    match format {
        DocumentFormat::Json => {
            serde_json::from_str(content).context("parsing JSON document")
        }
        DocumentFormat::Yaml => {
            serde_yaml::from_str(content).context("parsing YAML document")
        }
    }
}

/// Read and parse a document, choosing the format by extension and falling
/// back to content sniffing.
pub fn load_document(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| CompareError::io(path, e))?;
    let format = DocumentFormat::from_path(path).unwrap_or_else(|| DocumentFormat::sniff(&content));
    tracing::debug!("Loading {} as {}", path.display(), format.name());
    parse_document(&content, format).with_context(|| format!("loading {}", path.display()))
}
