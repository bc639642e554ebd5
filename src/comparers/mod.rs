//! Custom comparer registry.
//!
//! Comparers decide equality for a value type or category ahead of the
//! engine's generic recursion. The built-in comparers handle numbers, text,
//! booleans, enums and temporal values; callers can replace any of them or
//! register their own for specific types.

mod builtin;
mod registry;
mod traits;

pub use builtin::{
    BooleanComparer, DateTimeComparer, DateTimeOffsetComparer, EnumComparer, NumericComparer,
    TextComparer, TimeSpanComparer,
};
pub(crate) use builtin::key_form;
pub use registry::{ComparerKey, ComparerRegistry};
pub use traits::{Discrepancy, FnComparer, Operand, ValueComparer};
