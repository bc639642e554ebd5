//! Member descriptors for composite values.

use super::view::Handle;
use std::borrow::Cow;
use thiserror::Error;

/// A value with named members: structs, records and JSON objects.
pub trait Composite {
    /// Ordered member descriptors.
    fn members(&self) -> Vec<MemberInfo>;

    /// Read a member by name.
    fn member(&self, name: &str) -> Result<Handle<'_>, AccessError>;

    /// Whether every value with this type label has the same members.
    /// Dynamic records such as JSON objects return `false`.
    fn fixed_shape(&self) -> bool {
        true
    }
}

/// Why a member could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("member does not exist")]
    NotFound,
    #[error("{0}")]
    Failed(String),
}

impl AccessError {
    /// Getter failure with a reason.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}

/// Storage kind of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MemberKind {
    #[default]
    Field,
    Property,
}

/// Declared visibility of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// Descriptor of one member of a [`Composite`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    pub name: Cow<'static, str>,
    pub kind: MemberKind,
    pub visibility: Visibility,
    /// Attribute markers attached to the member.
    pub markers: Vec<&'static str>,
    /// The member is an indexed accessor rather than plain storage.
    pub indexer: bool,
}

impl MemberInfo {
    /// A public field.
    #[must_use]
    pub fn field(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Field,
            visibility: Visibility::Public,
            markers: Vec::new(),
            indexer: false,
        }
    }

    #[must_use]
    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    #[must_use]
    pub fn property(mut self) -> Self {
        self.kind = MemberKind::Property;
        self
    }

    /// Indexers are always properties.
    #[must_use]
    pub fn indexer(mut self) -> Self {
        self.kind = MemberKind::Property;
        self.indexer = true;
        self
    }

    #[must_use]
    pub fn marker(mut self, marker: &'static str) -> Self {
        if !self.markers.contains(&marker) {
            self.markers.push(marker);
        }
        self
    }

    #[must_use]
    pub fn is_private(&self) -> bool {
        self.visibility == Visibility::Private
    }

    #[must_use]
    pub fn has_marker(&self, marker: &str) -> bool {
        self.markers.iter().any(|m| *m == marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let info = MemberInfo::field("Key")
            .private()
            .marker("CompareIgnore")
            .marker("CompareIgnore");

        assert!(info.is_private());
        assert_eq!(info.kind, MemberKind::Field);
        assert_eq!(info.markers, vec!["CompareIgnore"]);
        assert!(info.has_marker("CompareIgnore"));
        assert!(!info.has_marker("Compare"));
    }

    #[test]
    fn test_indexer_is_property() {
        let info = MemberInfo::field("Item").indexer();
        assert!(info.indexer);
        assert_eq!(info.kind, MemberKind::Property);
        assert!(!info.is_private());
    }

    #[test]
    fn test_access_error_display() {
        assert_eq!(AccessError::failed("boom").to_string(), "boom");
        assert_eq!(AccessError::NotFound.to_string(), "member does not exist");
    }
}
