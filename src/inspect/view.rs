//! The [`Inspect`] trait and the borrowed [`View`] of a value.

use super::member::Composite;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;

/// A value the comparison engine can walk.
pub trait Inspect {
    /// Runtime type label.
    ///
    /// Used for object type checks, custom comparer lookup and collection
    /// matching specs.
    fn type_name(&self) -> &'static str;

    /// Category of the value together with borrowed access to its contents.
    fn view(&self) -> View<'_>;

    /// Stable identity of the value for the duration of a comparison.
    ///
    /// Defaults to the value's address. Wrappers delegate to what they wrap
    /// so that an `Rc<T>` and the `T` it points to share one identity.
    fn identity(&self) -> usize {
        (self as *const Self).cast::<()>() as usize
    }
}

/// Temporal values with distinct equality semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Temporal {
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    /// A wall-clock time together with its UTC offset.
    DateTimeOffset(DateTime<FixedOffset>),
    TimeSpan(TimeDelta),
}

/// Borrowed view over the contents of an [`Inspect`] value.
pub enum View<'a> {
    Null,
    Bool(bool),
    Int(i128),
    Float(f64),
    Decimal(Decimal),
    Char(char),
    Str(Cow<'a, str>),
    /// A unit enum variant, by name.
    Enum(Cow<'a, str>),
    Temporal(Temporal),
    /// Positional record compared element by element, bounded by the
    /// configured struct depth.
    Tuple(Vec<Handle<'a>>),
    Sequence(Vec<Handle<'a>>),
    Map(Vec<(Handle<'a>, Handle<'a>)>),
    Object(&'a dyn Composite),
    /// The real value sits behind a guard that has to be resolved first.
    Proxy(Handle<'a>),
    /// The value exists but could not be read.
    Unreadable(String),
}

impl View<'_> {
    /// Whether this view is `Null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short label of the variant, for log output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Decimal(_) => "decimal",
            Self::Char(_) => "char",
            Self::Str(_) => "string",
            Self::Enum(_) => "enum",
            Self::Temporal(_) => "temporal",
            Self::Tuple(_) => "tuple",
            Self::Sequence(_) => "sequence",
            Self::Map(_) => "map",
            Self::Object(_) => "object",
            Self::Proxy(_) => "proxy",
            Self::Unreadable(_) => "unreadable",
        }
    }
}

impl fmt::Debug for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "Bool({v})"),
            Self::Int(v) => write!(f, "Int({v})"),
            Self::Float(v) => write!(f, "Float({v})"),
            Self::Decimal(v) => write!(f, "Decimal({v})"),
            Self::Char(v) => write!(f, "Char({v:?})"),
            Self::Str(v) => write!(f, "Str({v:?})"),
            Self::Enum(v) => write!(f, "Enum({v})"),
            Self::Temporal(v) => write!(f, "Temporal({v:?})"),
            Self::Tuple(items) => write!(f, "Tuple(len={})", items.len()),
            Self::Sequence(items) => write!(f, "Sequence(len={})", items.len()),
            Self::Map(pairs) => write!(f, "Map(len={})", pairs.len()),
            Self::Unreadable(reason) => write!(f, "Unreadable({reason})"),
            other => f.write_str(other.kind()),
        }
    }
}

/// A reference to a child value, either borrowed from its parent or owned
/// when it had to be computed (getter results, lazily produced items,
/// borrow guards).
pub enum Handle<'a> {
    Borrowed(&'a dyn Inspect),
    Owned(Box<dyn Inspect + 'a>),
}

impl<'a> Handle<'a> {
    /// Wrap a computed value.
    pub fn owned<T: Inspect + 'a>(value: T) -> Self {
        Self::Owned(Box::new(value))
    }
}

impl<'a> Deref for Handle<'a> {
    type Target = dyn Inspect + 'a;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Borrowed(value) => *value,
            Self::Owned(value) => value.as_ref(),
        }
    }
}

impl<'a, T: Inspect> From<&'a T> for Handle<'a> {
    fn from(value: &'a T) -> Self {
        Self::Borrowed(value)
    }
}

impl fmt::Debug for Handle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Borrowed(_) => "Borrowed",
            Self::Owned(_) => "Owned",
        };
        write!(f, "{kind}({})", self.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_derefs_to_value() {
        let value = 42_i32;
        let borrowed = Handle::from(&value);
        let owned = Handle::owned(7_u8);

        assert!(matches!(borrowed.view(), View::Int(42)));
        assert!(matches!(owned.view(), View::Int(7)));
        assert_eq!(borrowed.identity(), value.identity());
    }

    #[test]
    fn test_view_kind_labels() {
        assert_eq!(View::Null.kind(), "null");
        assert_eq!(View::Str(Cow::Borrowed("x")).kind(), "string");
        assert!(View::Null.is_null());
        assert_eq!(format!("{:?}", View::Int(-5)), "Int(-5)");
    }
}
