//! The comparison engine.
//!
//! Two values are walked in lockstep. Each pair is classified into a
//! [`Category`], handed to a registered comparer when one claims it, and
//! otherwise compared by value (scalars) or recursively (composites, tuples,
//! collections and dictionaries). Every mismatch becomes a [`Difference`]
//! addressed by a [`Breadcrumb`] path such as `Orders[2].Lines[Sku:A1].Quantity`.
//!
//! Cycles are detected per pair of nodes on the active path; re-entering a
//! pair that is already being compared counts as equal.

mod breadcrumb;
mod classify;
mod collections;
mod guard;
mod logic;
mod members;
pub mod render;
mod result;
mod walker;

pub use breadcrumb::Breadcrumb;
pub use classify::Category;
pub use logic::{compare, CompareLogic};
pub use result::{ComparisonResult, Difference};
