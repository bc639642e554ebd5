//! Lazily produced sequences.

use super::view::{Handle, Inspect, View};
use std::fmt;

/// A sequence whose items are produced on demand.
///
/// Every call to [`Inspect::view`] re-runs the producer, the way an
/// iterator adapter chain is re-evaluated each time it is enumerated.
/// Produced items are owned, so cycles that pass through a generated
/// sequence are detected through the identities of the items (an `Rc`
/// clone shares the identity of the value it points to).
///
/// ```
/// use deep_compare::inspect::Generated;
///
/// let squares = Generated::new(|| (1..=3).map(|n: i32| n * n));
/// ```
pub struct Generated<F> {
    producer: F,
    label: &'static str,
}

impl<F> Generated<F> {
    pub const fn new(producer: F) -> Self {
        Self {
            producer,
            label: "Generated",
        }
    }

    /// Override the type label reported for this sequence.
    #[must_use]
    pub fn labelled(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }
}

impl<F, I> Inspect for Generated<F>
where
    F: Fn() -> I,
    I: IntoIterator,
    I::Item: Inspect + 'static,
{
    fn type_name(&self) -> &'static str {
        self.label
    }

    fn view(&self) -> View<'_> {
        View::Sequence((self.producer)().into_iter().map(Handle::owned).collect())
    }
}

impl<F> fmt::Debug for Generated<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generated")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
