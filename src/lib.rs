//! **Structural comparison of arbitrary object graphs.**
//!
//! `deep-compare` walks two values in lockstep and reports every place where
//! they differ, each difference addressed by a readable path such as
//! `Orders[2].Lines[Sku:A1].Quantity`. It handles nested composites,
//! collections (ordered or unordered), dictionaries, tuples and cyclic
//! graphs, and can be tuned to ignore members, match collection elements by
//! key, relax string and numeric equality, or plug in custom comparers.
//!
//! ## Core Concepts & Modules
//!
//! - **[`inspect`]**: The [`Inspect`] trait the engine uses to look inside
//!   values, with impls for standard library types, `chrono`,
//!   `rust_decimal` and `serde_json::Value`, plus the
//!   [`inspect_struct!`] and [`inspect_enum!`] macros for your own types.
//! - **[`compare`]**: The engine. [`CompareLogic`] holds a configuration and
//!   produces a [`ComparisonResult`] listing [`Difference`]s.
//! - **[`comparers`]**: The [`ValueComparer`] trait and the registry of
//!   comparers consulted before generic comparison.
//! - **[`config`]**: [`ComparisonConfig`], its builder, presets, validation
//!   and config-file loading.
//! - **[`cli`]**: The command-line front end comparing two JSON or YAML
//!   documents.
//!
//! ## Getting Started
//!
//! ```
//! use deep_compare::{inspect_struct, CompareLogic, ComparisonConfig};
//!
//! struct Person {
//!     name: String,
//!     age: i32,
//! }
//!
//! inspect_struct!(Person {
//!     name => "Name",
//!     age => "Age",
//! });
//!
//! let greg = Person { name: "Greg".into(), age: 40 };
//! let older = Person { name: "Greg".into(), age: 41 };
//!
//! let logic = CompareLogic::new().with_config(ComparisonConfig::builder().unlimited().build());
//! let result = logic.compare(&greg, &older)?;
//!
//! assert!(!result.are_equal);
//! assert_eq!(result.differences[0].property_name, "Age");
//! assert_eq!(result.differences[0].object1_value, "40");
//! # Ok::<(), deep_compare::CompareError>(())
//! ```
//!
//! ### Unordered collections matched by key
//!
//! ```
//! use deep_compare::{inspect_struct, CompareLogic, ComparisonConfig};
//!
//! struct Person {
//!     name: String,
//!     age: i32,
//! }
//!
//! inspect_struct!(Person {
//!     name => "Name",
//!     age => "Age",
//! });
//!
//! let before = vec![
//!     Person { name: "Greg".into(), age: 40 },
//!     Person { name: "John".into(), age: 30 },
//! ];
//! let after = vec![
//!     Person { name: "John".into(), age: 30 },
//!     Person { name: "Greg".into(), age: 41 },
//! ];
//!
//! let config = ComparisonConfig::builder()
//!     .ignore_collection_order(true)
//!     .match_collection_by("Person", ["Name"])
//!     .build();
//! let result = CompareLogic::new().with_config(config).compare(&before, &after)?;
//!
//! assert_eq!(result.differences[0].property_name, "[Name:Greg].Age");
//! # Ok::<(), deep_compare::CompareError>(())
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::too_many_lines,
    // Config and builder structs legitimately use many bools for toggle flags
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::unused_self,
    // Variable names like `lidx`/`ridx` or `left`/`right` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod compare;
pub mod comparers;
pub mod config;
pub mod error;
pub mod inspect;

// Re-export main types for convenience
pub use compare::{compare, Breadcrumb, Category, CompareLogic, ComparisonResult, Difference};
pub use comparers::{
    ComparerKey, ComparerRegistry, Discrepancy, FnComparer, Operand, ValueComparer,
};
pub use config::{
    ComparisonConfig, ComparisonConfigBuilder, ConfigError, ConfigPreset, DifferenceCallback,
    Validatable,
};
pub use error::{CompareError, ComparisonErrorKind, DocumentErrorKind, ErrorContext, Result};
pub use inspect::{
    AccessError, Composite, Generated, Handle, Inspect, MemberInfo, MemberKind, Temporal, View,
    Visibility,
};
