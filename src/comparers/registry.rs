//! Registry mapping types and categories to comparers.

use super::builtin;
use super::traits::{Discrepancy, Operand, ValueComparer};
use crate::compare::Category;
use crate::config::ComparisonConfig;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// What a comparer is registered for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComparerKey {
    /// An exact type label, as reported by `Inspect::type_name`
    Type(Cow<'static, str>),
    Category(Category),
}

impl ComparerKey {
    pub fn of_type(label: impl Into<Cow<'static, str>>) -> Self {
        Self::Type(label.into())
    }
}

impl From<Category> for ComparerKey {
    fn from(category: Category) -> Self {
        Self::Category(category)
    }
}

impl fmt::Display for ComparerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(label) => write!(f, "type:{label}"),
            Self::Category(category) => write!(f, "category:{category}"),
        }
    }
}

/// Custom comparers consulted ahead of generic dispatch.
///
/// Lookup order for a pair is: exact type of the left value, exact type of
/// the right value, category of the left value, category of the right
/// value. The first comparer that claims the pair decides it.
#[derive(Clone)]
pub struct ComparerRegistry {
    entries: HashMap<ComparerKey, Arc<dyn ValueComparer>>,
}

impl ComparerRegistry {
    /// A registry with no comparers at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// A registry holding the built-in scalar comparers.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for (category, comparer) in builtin::defaults() {
            registry.entries.insert(ComparerKey::Category(category), comparer);
        }
        registry
    }

    /// Register a comparer, returning the one it replaces.
    pub fn register(
        &mut self,
        key: impl Into<ComparerKey>,
        comparer: impl ValueComparer + 'static,
    ) -> Option<Arc<dyn ValueComparer>> {
        self.register_shared(key, Arc::new(comparer))
    }

    pub fn register_shared(
        &mut self,
        key: impl Into<ComparerKey>,
        comparer: Arc<dyn ValueComparer>,
    ) -> Option<Arc<dyn ValueComparer>> {
        self.entries.insert(key.into(), comparer)
    }

    pub fn remove(&mut self, key: &ComparerKey) -> Option<Arc<dyn ValueComparer>> {
        self.entries.remove(key)
    }

    #[must_use]
    pub fn get(&self, key: &ComparerKey) -> Option<&dyn ValueComparer> {
        self.entries.get(key).map(AsRef::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run the first comparer that claims the pair.
    pub fn try_compare(
        &self,
        left: &Operand<'_>,
        right: &Operand<'_>,
        config: &ComparisonConfig,
    ) -> Option<Vec<Discrepancy>> {
        if self.entries.is_empty() {
            return None;
        }

        let candidates = [
            ComparerKey::Type(Cow::Borrowed(left.type_name())),
            ComparerKey::Type(Cow::Borrowed(right.type_name())),
            ComparerKey::Category(left.category()),
            ComparerKey::Category(right.category()),
        ];

        for key in &candidates {
            let Some(comparer) = self.entries.get(key) else {
                continue;
            };
            if let Some(found) = comparer.try_compare(left, right, config) {
                trace!("{} decided {} vs {}", comparer.name(), left.type_name(), right.type_name());
                return Some(found);
            }
        }
        None
    }
}

impl Default for ComparerRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for ComparerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self.entries.keys().map(ToString::to_string).collect();
        keys.sort();
        f.debug_struct("ComparerRegistry").field("keys", &keys).finish()
    }
}
