//! Difference records and the overall comparison result.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// One detected mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difference {
    /// Breadcrumb path of the mismatch (empty at the root)
    pub property_name: String,
    /// Name of the last member segment, when the mismatch sits on a member
    pub child_property_name: Option<String>,
    pub object1_value: String,
    pub object2_value: String,
    pub object1_type_name: Option<String>,
    pub object2_type_name: Option<String>,
    /// Rendering of the composite enclosing the left value
    pub parent_object1: Option<String>,
    /// Rendering of the composite enclosing the right value
    pub parent_object2: Option<String>,
    /// Explanation for mismatches that are not plain value differences
    pub message: Option<String>,
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Types [{},{}], ",
            self.object1_type_name.as_deref().unwrap_or_default(),
            self.object2_type_name.as_deref().unwrap_or_default()
        )?;
        if !self.property_name.is_empty() {
            write!(f, "Item {}, ", self.property_name)?;
        }
        write!(f, "Values ({},{})", self.object1_value, self.object2_value)?;
        if let Some(message) = &self.message {
            write!(f, ", {message}")?;
        }
        Ok(())
    }
}

/// Outcome of one comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Differences in discovery order
    pub differences: Vec<Difference>,
    /// True iff `differences` is empty
    pub are_equal: bool,
    /// Traversal stopped because the difference cap was reached
    pub max_differences_reached: bool,
    /// The cap in effect for this comparison
    pub max_differences: usize,
    pub elapsed: Duration,
}

impl ComparisonResult {
    pub(crate) fn new(
        differences: Vec<Difference>,
        max_differences_reached: bool,
        max_differences: usize,
        elapsed: Duration,
    ) -> Self {
        Self {
            are_equal: differences.is_empty(),
            differences,
            max_differences_reached,
            max_differences,
            elapsed,
        }
    }

    /// Number of differences collected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.differences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    /// Multi-line listing of every difference.
    #[must_use]
    pub fn differences_string(&self) -> String {
        if self.are_equal {
            return String::new();
        }
        let mut lines = Vec::with_capacity(self.differences.len() + 2);
        lines.push(format!(
            "Begin Differences ({} differences):",
            self.differences.len()
        ));
        lines.extend(self.differences.iter().map(ToString::to_string));
        lines.push(format!(
            "End Differences (Maximum of {} differences shown).",
            self.max_differences
        ));
        lines.join("\n")
    }
}
