//! Breadcrumb paths addressing a value inside a graph.

use std::fmt;

/// Dotted/bracketed path of the value being compared.
///
/// Member segments are joined with `.` (never leading), index and key
/// segments are bracketed: `Orders[2].Lines[Sku:A1].Quantity`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breadcrumb(String);

impl Breadcrumb {
    #[must_use]
    pub const fn root() -> Self {
        Self(String::new())
    }

    #[must_use]
    pub fn member(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_string())
        } else {
            Self(format!("{}.{name}", self.0))
        }
    }

    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    #[must_use]
    pub fn key(&self, key: &str) -> Self {
        Self(format!("{}[{key}]", self.0))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The path with bracketed segments removed, used for member filtering:
    /// `Orders[2].Lines[Sku:A1].Quantity` becomes `Orders.Lines.Quantity`.
    #[must_use]
    pub fn without_indices(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut depth = 0_usize;
        for ch in self.0.chars() {
            match ch {
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                _ if depth == 0 => out.push(ch),
                _ => {}
            }
        }
        out.trim_start_matches('.').to_string()
    }
}

impl fmt::Display for Breadcrumb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_segment_has_no_separator() {
        let crumb = Breadcrumb::root().member("Name");
        assert_eq!(crumb.as_str(), "Name");
        assert_eq!(crumb.member("First").as_str(), "Name.First");
    }

    #[test]
    fn test_bracketed_segments() {
        let crumb = Breadcrumb::root()
            .key("Name:Greg,LastName:Miller")
            .member("Age");
        assert_eq!(crumb.as_str(), "[Name:Greg,LastName:Miller].Age");

        let indexed = Breadcrumb::root().member("Orders").index(2).member("Total");
        assert_eq!(indexed.to_string(), "Orders[2].Total");
    }

    #[test]
    fn test_without_indices() {
        let crumb = Breadcrumb::root()
            .index(0)
            .member("Lines")
            .key("Sku:[A1]")
            .member("Quantity");
        assert_eq!(crumb.without_indices(), "Lines.Quantity");
        assert!(Breadcrumb::root().is_empty());
    }
}
