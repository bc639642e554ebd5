//! Comparison entry points.

use super::result::ComparisonResult;
use super::walker::Walker;
use crate::comparers::{ComparerKey, ComparerRegistry, ValueComparer};
use crate::config::{ComparisonConfig, Validatable};
use crate::error::{CompareError, Result};
use crate::inspect::Inspect;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Structural comparison engine.
///
/// Holds the configuration and the custom comparer registry. A comparison
/// borrows both for its whole duration; change settings between calls with
/// [`config_mut`](Self::config_mut).
///
/// ```
/// use deep_compare::{CompareLogic, ComparisonConfig};
///
/// let logic = CompareLogic::new().with_config(
///     ComparisonConfig::builder().unlimited().build(),
/// );
/// let result = logic.compare(&vec![1, 2, 3], &vec![1, 5, 3]).unwrap();
///
/// assert!(!result.are_equal);
/// assert_eq!(result.differences[0].property_name, "[1]");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CompareLogic {
    config: ComparisonConfig,
    registry: ComparerRegistry,
}

impl CompareLogic {
    /// Create a comparison engine with default settings and the built-in
    /// comparers
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: ComparisonConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the comparer registry
    #[must_use]
    pub fn with_registry(mut self, registry: ComparerRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Register a custom comparer
    #[must_use]
    pub fn with_comparer(
        mut self,
        key: impl Into<ComparerKey>,
        comparer: impl ValueComparer + 'static,
    ) -> Self {
        self.registry.register(key, comparer);
        self
    }

    /// Register a custom comparer, returning the one it replaces
    pub fn register_comparer(
        &mut self,
        key: impl Into<ComparerKey>,
        comparer: impl ValueComparer + 'static,
    ) -> Option<Arc<dyn ValueComparer>> {
        self.registry.register(key, comparer)
    }

    #[must_use]
    pub const fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ComparisonConfig {
        &mut self.config
    }

    #[must_use]
    pub const fn registry(&self) -> &ComparerRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ComparerRegistry {
        &mut self.registry
    }

    /// Compare two values.
    ///
    /// Fails when the configuration is invalid or a matching spec cannot be
    /// applied. Differences are never errors.
    pub fn compare<A, B>(&self, left: &A, right: &B) -> Result<ComparisonResult>
    where
        A: Inspect + ?Sized,
        B: Inspect + ?Sized,
    {
        self.compare_dyn(&left, &right)
    }

    /// Compare two type-erased values.
    pub fn compare_dyn(&self, left: &dyn Inspect, right: &dyn Inspect) -> Result<ComparisonResult> {
        run(&self.config, &self.registry, left, right)
    }
}

/// Compare two values with `config` and the built-in comparers.
pub fn compare<A, B>(left: &A, right: &B, config: &ComparisonConfig) -> Result<ComparisonResult>
where
    A: Inspect + ?Sized,
    B: Inspect + ?Sized,
{
    run(config, &ComparerRegistry::default(), &left, &right)
}

fn run(
    config: &ComparisonConfig,
    registry: &ComparerRegistry,
    left: &dyn Inspect,
    right: &dyn Inspect,
) -> Result<ComparisonResult> {
    let errors = config.validate();
    if !errors.is_empty() {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(CompareError::config(message));
    }

    let started = Instant::now();
    debug!(
        left = left.type_name(),
        right = right.type_name(),
        max_differences = config.max_differences,
        "starting comparison"
    );

    let sink = Walker::new(config, registry).run(left, right)?;
    let reached = sink.cap_reached();
    let result = ComparisonResult::new(
        sink.into_differences(),
        reached,
        config.max_differences,
        started.elapsed(),
    );

    debug!(
        differences = result.len(),
        cap_reached = reached,
        elapsed_us = result.elapsed.as_micros() as u64,
        "comparison finished"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparers::FnComparer;
    use crate::compare::Category;

    #[test]
    fn test_equal_scalars() {
        let result = CompareLogic::new().compare(&5_i32, &5_i32).unwrap();
        assert!(result.are_equal);
        assert!(!result.max_differences_reached);
    }

    #[test]
    fn test_root_difference_has_empty_path() {
        let result = CompareLogic::new().compare("a", "b").unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.differences[0].property_name, "");
        assert!(result.max_differences_reached);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let logic = CompareLogic::new().with_config(ComparisonConfig::builder().max_differences(0).build());
        let err = logic.compare(&1_i32, &2_i32).unwrap_err();
        assert!(matches!(err, CompareError::Config(_)));
    }

    #[test]
    fn test_config_mut_between_calls() {
        let mut logic = CompareLogic::new();
        let (a, b) = (vec![1, 2, 3], vec![3, 2, 1]);
        assert!(!logic.compare(&a, &b).unwrap().are_equal);

        logic.config_mut().ignore_collection_order = true;
        assert!(logic.compare(&a, &b).unwrap().are_equal);
    }

    #[test]
    fn test_custom_comparer_overrides_builtin() {
        let logic = CompareLogic::new().with_comparer(
            Category::Text,
            FnComparer::new("length", |l, r, _| {
                Some(if l.render().len() == r.render().len() {
                    Vec::new()
                } else {
                    vec![crate::comparers::Discrepancy::between(l, r)]
                })
            }),
        );
        assert!(logic.compare("abc", "xyz").unwrap().are_equal);
        assert!(!logic.compare("abc", "xy").unwrap().are_equal);
    }

    #[test]
    fn test_free_function() {
        let config = ComparisonConfig::default();
        assert!(compare(&[1_u8, 2], &[1_u8, 2], &config).unwrap().are_equal);
    }
}
