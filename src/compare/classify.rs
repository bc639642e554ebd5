//! Comparison categories of runtime values.

use crate::inspect::{Temporal, View};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The comparison category of a value, used for dispatch and comparer lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Null,
    Boolean,
    /// Integers, floats and decimals
    Numeric,
    /// Strings and characters
    Text,
    Enum,
    Date,
    Time,
    DateTime,
    DateTimeOffset,
    TimeSpan,
    Tuple,
    Dictionary,
    Collection,
    Object,
    Unreadable,
}

impl Category {
    /// Classify a view. Proxies are classified by what they resolve to.
    #[must_use]
    pub fn of(view: &View<'_>) -> Self {
        match view {
            View::Null => Self::Null,
            View::Bool(_) => Self::Boolean,
            View::Int(_) | View::Float(_) | View::Decimal(_) => Self::Numeric,
            View::Char(_) | View::Str(_) => Self::Text,
            View::Enum(_) => Self::Enum,
            View::Temporal(t) => match t {
                Temporal::Date(_) => Self::Date,
                Temporal::Time(_) => Self::Time,
                Temporal::DateTime(_) => Self::DateTime,
                Temporal::DateTimeOffset(_) => Self::DateTimeOffset,
                Temporal::TimeSpan(_) => Self::TimeSpan,
            },
            View::Tuple(_) => Self::Tuple,
            View::Sequence(_) => Self::Collection,
            View::Map(_) => Self::Dictionary,
            View::Object(_) => Self::Object,
            View::Proxy(inner) => Self::of(&inner.view()),
            View::Unreadable(_) => Self::Unreadable,
        }
    }

    /// Leaf categories compared by value.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::Boolean
                | Self::Numeric
                | Self::Text
                | Self::Enum
                | Self::Date
                | Self::Time
                | Self::DateTime
                | Self::DateTimeOffset
                | Self::TimeSpan
        )
    }

    /// Categories the engine recurses into.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(
            self,
            Self::Tuple | Self::Dictionary | Self::Collection | Self::Object
        )
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Numeric => "numeric",
            Self::Text => "text",
            Self::Enum => "enum",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "date_time",
            Self::DateTimeOffset => "date_time_offset",
            Self::TimeSpan => "time_span",
            Self::Tuple => "tuple",
            Self::Dictionary => "dictionary",
            Self::Collection => "collection",
            Self::Object => "object",
            Self::Unreadable => "unreadable",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::Inspect;
    use std::cell::RefCell;

    #[test]
    fn test_numeric_representations_share_category() {
        assert_eq!(Category::of(&5_i32.view()), Category::Numeric);
        assert_eq!(Category::of(&5.0_f64.view()), Category::Numeric);
        assert_eq!(
            Category::of(&rust_decimal::Decimal::new(50, 1).view()),
            Category::Numeric
        );
    }

    #[test]
    fn test_proxy_resolves() {
        let cell = RefCell::new(vec![1_i32]);
        assert_eq!(Category::of(&cell.view()), Category::Collection);
    }

    #[test]
    fn test_scalar_and_container_are_disjoint() {
        for category in [Category::Numeric, Category::Object, Category::Null] {
            assert!(!(category.is_scalar() && category.is_container()));
        }
        assert!(Category::Tuple.is_container());
        assert!(Category::TimeSpan.is_scalar());
        assert_eq!(Category::DateTimeOffset.to_string(), "date_time_offset");
    }
}
