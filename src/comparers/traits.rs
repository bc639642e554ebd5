//! Trait definitions for custom value comparers.
//!
//! A comparer overrides generic dispatch for a type or category. The engine
//! consults the registry before anything else, so a comparer registered for
//! a composite type replaces member-by-member recursion for that type.

use crate::compare::render::render_view;
use crate::compare::Category;
use crate::config::ComparisonConfig;
use crate::inspect::{Inspect, View};
use std::fmt;

/// One side of a comparison, resolved and classified.
pub struct Operand<'n> {
    node: &'n dyn Inspect,
    view: View<'n>,
    category: Category,
}

impl<'n> Operand<'n> {
    /// Classify a node whose view has already been taken.
    pub fn new(node: &'n dyn Inspect, view: View<'n>) -> Self {
        let category = Category::of(&view);
        Self {
            node,
            view,
            category,
        }
    }

    /// Resolve a node directly.
    pub fn of(node: &'n dyn Inspect) -> Self {
        Self::new(node, node.view())
    }

    #[must_use]
    pub fn node(&self) -> &'n dyn Inspect {
        self.node
    }

    #[must_use]
    pub const fn view(&self) -> &View<'n> {
        &self.view
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.node.type_name()
    }

    /// Plain-text rendering for difference records.
    #[must_use]
    pub fn render(&self) -> String {
        render_view(&self.view, self.type_name())
    }
}

impl fmt::Debug for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operand")
            .field("type_name", &self.type_name())
            .field("category", &self.category)
            .field("view", &self.view)
            .finish()
    }
}

/// A mismatch reported by a comparer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Discrepancy {
    /// Member below the compared value the mismatch refers to, if any
    pub child_member: Option<String>,
    pub left: String,
    pub right: String,
    pub message: Option<String>,
}

impl Discrepancy {
    /// A mismatch with explicit renderings.
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            child_member: None,
            left: left.into(),
            right: right.into(),
            message: None,
        }
    }

    /// A mismatch between two operands, rendered as they are.
    pub fn between(left: &Operand<'_>, right: &Operand<'_>) -> Self {
        Self::new(left.render(), right.render())
    }

    pub fn on_member(mut self, name: impl Into<String>) -> Self {
        self.child_member = Some(name.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Trait for pluggable equality and diff routines.
///
/// Implementations must be `Send + Sync` so a configured
/// [`CompareLogic`](crate::CompareLogic) can be shared across threads.
pub trait ValueComparer: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &str;

    /// Compare two operands.
    ///
    /// Returns `None` when the comparer does not handle this pair, in which
    /// case lookup continues. `Some(vec![])` means equal.
    fn try_compare(
        &self,
        left: &Operand<'_>,
        right: &Operand<'_>,
        config: &ComparisonConfig,
    ) -> Option<Vec<Discrepancy>>;

    /// Equality verdict, if the comparer handles this pair.
    fn equals(
        &self,
        left: &Operand<'_>,
        right: &Operand<'_>,
        config: &ComparisonConfig,
    ) -> Option<bool> {
        self.try_compare(left, right, config)
            .map(|found| found.is_empty())
    }
}

/// A comparer backed by a closure.
pub struct FnComparer<F> {
    name: String,
    compare: F,
}

impl<F> FnComparer<F>
where
    F: Fn(&Operand<'_>, &Operand<'_>, &ComparisonConfig) -> Option<Vec<Discrepancy>>
        + Send
        + Sync,
{
    pub fn new(name: impl Into<String>, compare: F) -> Self {
        Self {
            name: name.into(),
            compare,
        }
    }
}

impl<F> ValueComparer for FnComparer<F>
where
    F: Fn(&Operand<'_>, &Operand<'_>, &ComparisonConfig) -> Option<Vec<Discrepancy>>
        + Send
        + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn try_compare(
        &self,
        left: &Operand<'_>,
        right: &Operand<'_>,
        config: &ComparisonConfig,
    ) -> Option<Vec<Discrepancy>> {
        (self.compare)(left, right, config)
    }
}

impl<F> fmt::Debug for FnComparer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnComparer")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_classifies_and_renders() {
        let value = -5_i64;
        let operand = Operand::of(&value);
        assert_eq!(operand.category(), Category::Numeric);
        assert_eq!(operand.type_name(), "i64");
        assert_eq!(operand.render(), "-5");
    }

    #[test]
    fn test_fn_comparer_equals() {
        let always_equal = FnComparer::new("always", |_, _, _| Some(Vec::new()));
        let config = ComparisonConfig::default();
        let (a, b) = (1_i32, 2_i32);

        assert_eq!(
            always_equal.equals(&Operand::of(&a), &Operand::of(&b), &config),
            Some(true)
        );
        assert_eq!(always_equal.name(), "always");
    }

    #[test]
    fn test_discrepancy_builder() {
        let d = Discrepancy::new("a", "b")
            .on_member("Street")
            .with_message("differs");
        assert_eq!(d.child_member.as_deref(), Some("Street"));
        assert_eq!(d.message.as_deref(), Some("differs"));
    }
}
