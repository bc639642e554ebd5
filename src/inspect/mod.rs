//! Runtime introspection for comparable values.
//!
//! The comparison engine never looks at concrete Rust types. Everything it
//! needs is exposed through the [`Inspect`] trait: a type label, a
//! [`View`] describing the value category with borrowed access to its
//! contents, and a stable identity used for cycle detection.
//!
//! Composite types describe their members through [`Composite`], usually
//! generated with the [`inspect_struct!`](crate::inspect_struct) macro:
//!
//! ```
//! use deep_compare::inspect_struct;
//!
//! struct Person {
//!     name: String,
//!     age: u32,
//!     secret: String,
//! }
//!
//! inspect_struct!(Person {
//!     name => "Name",
//!     age => "Age",
//!     #[private]
//!     secret,
//! });
//! ```
//!
//! Standard library containers, smart pointers, `chrono` temporal types,
//! `rust_decimal::Decimal` and `serde_json::Value` are covered by the impls
//! in this module.

mod generated;
mod impls;
mod json;
mod macros;
mod member;
mod view;

pub use generated::Generated;
pub use member::{AccessError, Composite, MemberInfo, MemberKind, Visibility};
pub use view::{Handle, Inspect, Temporal, View};
