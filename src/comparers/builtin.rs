//! Built-in comparers for scalar categories.
//!
//! Each comparer only claims pairs where both sides belong to its family.
//! A pair it does not claim falls through to the next registry candidate
//! and finally to the engine's type-mismatch handling.

use super::traits::{Discrepancy, Operand, ValueComparer};
use crate::compare::Category;
use crate::config::ComparisonConfig;
use crate::inspect::{Temporal, View};
use chrono::TimeDelta;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::sync::Arc;

/// Default registrations, by category.
pub(crate) fn defaults() -> Vec<(Category, Arc<dyn ValueComparer>)> {
    let date_time: Arc<dyn ValueComparer> = Arc::new(DateTimeComparer);
    vec![
        (Category::Numeric, Arc::new(NumericComparer)),
        (Category::Text, Arc::new(TextComparer)),
        (Category::Boolean, Arc::new(BooleanComparer)),
        (Category::Enum, Arc::new(EnumComparer)),
        (Category::Date, Arc::clone(&date_time)),
        (Category::Time, Arc::clone(&date_time)),
        (Category::DateTime, date_time),
        (Category::DateTimeOffset, Arc::new(DateTimeOffsetComparer)),
        (Category::TimeSpan, Arc::new(TimeSpanComparer)),
    ]
}

fn verdict(equal: bool, left: &Operand<'_>, right: &Operand<'_>) -> Vec<Discrepancy> {
    if equal {
        Vec::new()
    } else {
        vec![Discrepancy::between(left, right)]
    }
}

// ============================================================================
// Numbers
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i128),
    Float(f64),
    Decimal(Decimal),
}

impl Number {
    fn from_view(view: &View<'_>) -> Option<Self> {
        match view {
            View::Int(i) => Some(Self::Int(*i)),
            View::Float(f) => Some(Self::Float(*f)),
            View::Decimal(d) => Some(Self::Decimal(*d)),
            _ => None,
        }
    }

    fn to_f64(self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(i as f64),
            Self::Float(f) => Some(f),
            Self::Decimal(d) => d.to_f64(),
        }
    }

    fn to_decimal(self) -> Option<Decimal> {
        match self {
            Self::Int(i) => Decimal::try_from_i128_with_scale(i, 0).ok(),
            Self::Decimal(d) => Some(d),
            Self::Float(f) => Decimal::from_f64_retain(f),
        }
    }
}

fn floats_equal(a: f64, b: f64, precision: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    a == b || (a - b).abs() <= precision
}

fn decimals_equal(a: Decimal, b: Decimal, precision: Decimal) -> bool {
    a == b || a.checked_sub(b).is_some_and(|delta| delta.abs() <= precision)
}

fn numbers_equal(a: Number, b: Number, config: &ComparisonConfig) -> bool {
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => x == y,
        (Number::Float(_), _) | (_, Number::Float(_)) => match (a.to_f64(), b.to_f64()) {
            (Some(x), Some(y)) => floats_equal(x, y, config.double_precision),
            _ => false,
        },
        _ => match (a.to_decimal(), b.to_decimal()) {
            (Some(x), Some(y)) => decimals_equal(x, y, config.decimal_precision),
            _ => match (a.to_f64(), b.to_f64()) {
                (Some(x), Some(y)) => floats_equal(x, y, config.double_precision),
                _ => false,
            },
        },
    }
}

/// Integers, floats and decimals compare by value across representations.
#[derive(Debug, Default, Clone, Copy)]
pub struct NumericComparer;

impl ValueComparer for NumericComparer {
    fn name(&self) -> &str {
        "numeric"
    }

    fn try_compare(
        &self,
        left: &Operand<'_>,
        right: &Operand<'_>,
        config: &ComparisonConfig,
    ) -> Option<Vec<Discrepancy>> {
        let a = Number::from_view(left.view())?;
        let b = Number::from_view(right.view())?;
        Some(verdict(numbers_equal(a, b, config), left, right))
    }
}

// ============================================================================
// Text
// ============================================================================

fn text<'v>(view: &'v View<'_>) -> Option<Cow<'v, str>> {
    match view {
        View::Str(s) => Some(Cow::Borrowed(s.as_ref())),
        View::Char(c) => Some(Cow::Owned(c.to_string())),
        _ => None,
    }
}

fn texts_equal(a: &str, b: &str, config: &ComparisonConfig) -> bool {
    let (a, b) = if config.ignore_string_leading_trailing_whitespace {
        (a.trim(), b.trim())
    } else {
        (a, b)
    };
    if config.case_sensitive {
        a == b
    } else {
        a == b || a.to_lowercase() == b.to_lowercase()
    }
}

/// Strings and characters, honouring case sensitivity and trimming.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextComparer;

impl ValueComparer for TextComparer {
    fn name(&self) -> &str {
        "text"
    }

    fn try_compare(
        &self,
        left: &Operand<'_>,
        right: &Operand<'_>,
        config: &ComparisonConfig,
    ) -> Option<Vec<Discrepancy>> {
        let a = text(left.view())?;
        let b = text(right.view())?;
        Some(verdict(texts_equal(&a, &b, config), left, right))
    }
}

// ============================================================================
// Booleans and enums
// ============================================================================

#[derive(Debug, Default, Clone, Copy)]
pub struct BooleanComparer;

impl ValueComparer for BooleanComparer {
    fn name(&self) -> &str {
        "boolean"
    }

    fn try_compare(
        &self,
        left: &Operand<'_>,
        right: &Operand<'_>,
        _config: &ComparisonConfig,
    ) -> Option<Vec<Discrepancy>> {
        match (left.view(), right.view()) {
            (View::Bool(a), View::Bool(b)) => Some(verdict(a == b, left, right)),
            _ => None,
        }
    }
}

/// Variants compare by name; the enum types must match unless object types
/// are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnumComparer;

impl ValueComparer for EnumComparer {
    fn name(&self) -> &str {
        "enum"
    }

    fn try_compare(
        &self,
        left: &Operand<'_>,
        right: &Operand<'_>,
        config: &ComparisonConfig,
    ) -> Option<Vec<Discrepancy>> {
        let (View::Enum(a), View::Enum(b)) = (left.view(), right.view()) else {
            return None;
        };
        if !config.ignore_object_types && left.type_name() != right.type_name() {
            return Some(vec![Discrepancy::new(
                format!("{}.{a}", left.type_name()),
                format!("{}.{b}", right.type_name()),
            )
            .with_message("enum types differ")]);
        }
        Some(verdict(a == b, left, right))
    }
}

// ============================================================================
// Temporal
// ============================================================================

fn within_tolerance(delta: TimeDelta, max_milliseconds: i64) -> bool {
    max_milliseconds > 0
        && delta.num_milliseconds().unsigned_abs() <= max_milliseconds.unsigned_abs()
}

/// Dates, times and date-times, within `max_milliseconds_date_difference`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DateTimeComparer;

impl ValueComparer for DateTimeComparer {
    fn name(&self) -> &str {
        "date_time"
    }

    fn try_compare(
        &self,
        left: &Operand<'_>,
        right: &Operand<'_>,
        config: &ComparisonConfig,
    ) -> Option<Vec<Discrepancy>> {
        let (View::Temporal(a), View::Temporal(b)) = (left.view(), right.view()) else {
            return None;
        };
        let tolerance = config.max_milliseconds_date_difference;
        let equal = match (a, b) {
            (Temporal::Date(x), Temporal::Date(y)) => {
                x == y || within_tolerance(x.signed_duration_since(*y), tolerance)
            }
            (Temporal::Time(x), Temporal::Time(y)) => {
                x == y || within_tolerance(x.signed_duration_since(*y), tolerance)
            }
            (Temporal::DateTime(x), Temporal::DateTime(y)) => {
                x == y || within_tolerance(x.signed_duration_since(*y), tolerance)
            }
            _ => return None,
        };
        Some(verdict(equal, left, right))
    }
}

/// Date-times with a UTC offset.
///
/// By default only the wall-clock part is compared, so `10:00 +00:00` and
/// `10:00 +03:00` are equal. With `compare_date_time_offset_with_offsets`
/// the offset is applied and the two are compared as instants.
#[derive(Debug, Default, Clone, Copy)]
pub struct DateTimeOffsetComparer;

impl ValueComparer for DateTimeOffsetComparer {
    fn name(&self) -> &str {
        "date_time_offset"
    }

    fn try_compare(
        &self,
        left: &Operand<'_>,
        right: &Operand<'_>,
        config: &ComparisonConfig,
    ) -> Option<Vec<Discrepancy>> {
        let (
            View::Temporal(Temporal::DateTimeOffset(a)),
            View::Temporal(Temporal::DateTimeOffset(b)),
        ) = (left.view(), right.view())
        else {
            return None;
        };
        let delta = if config.compare_date_time_offset_with_offsets {
            a.signed_duration_since(*b)
        } else {
            a.naive_local().signed_duration_since(b.naive_local())
        };
        let equal =
            delta.is_zero() || within_tolerance(delta, config.max_milliseconds_date_difference);
        Some(verdict(equal, left, right))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TimeSpanComparer;

impl ValueComparer for TimeSpanComparer {
    fn name(&self) -> &str {
        "time_span"
    }

    fn try_compare(
        &self,
        left: &Operand<'_>,
        right: &Operand<'_>,
        _config: &ComparisonConfig,
    ) -> Option<Vec<Discrepancy>> {
        match (left.view(), right.view()) {
            (View::Temporal(Temporal::TimeSpan(a)), View::Temporal(Temporal::TimeSpan(b))) => {
                Some(verdict(a == b, left, right))
            }
            _ => None,
        }
    }
}

// ============================================================================
// Key forms
// ============================================================================

fn canonical_number(number: Number) -> String {
    if let Some(d) = number.to_decimal() {
        if d.fract().is_zero() {
            return d.normalize().to_string();
        }
    }
    number
        .to_f64()
        .map_or_else(|| format!("{number:?}"), |f| f.to_string())
}

fn canonical_text(value: &str, config: &ComparisonConfig) -> String {
    let value = if config.ignore_string_leading_trailing_whitespace {
        value.trim()
    } else {
        value
    };
    if config.case_sensitive {
        value.to_string()
    } else {
        value.to_lowercase()
    }
}

/// Canonical text of a scalar used to pair elements and entries by key.
///
/// Scalars the built-in comparers treat as equal share a form, except for
/// configured tolerances. Containers and unreadable values have none.
pub(crate) fn key_form(view: &View<'_>, config: &ComparisonConfig) -> Option<String> {
    let form = match view {
        View::Null => "null".to_string(),
        View::Bool(b) => format!("bool:{b}"),
        View::Int(_) | View::Float(_) | View::Decimal(_) => {
            format!("num:{}", canonical_number(Number::from_view(view)?))
        }
        View::Str(_) | View::Char(_) => format!("text:{}", canonical_text(&text(view)?, config)),
        View::Enum(name) => format!("enum:{name}"),
        View::Temporal(Temporal::DateTimeOffset(dt)) => {
            if config.compare_date_time_offset_with_offsets {
                format!("instant:{}", dt.naive_utc())
            } else {
                format!("local:{}", dt.naive_local())
            }
        }
        View::Temporal(t) => format!("time:{t:?}"),
        _ => return None,
    };
    Some(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::Inspect;
    use chrono::{FixedOffset, NaiveDate, TimeZone};
    use proptest::prelude::*;

    fn run(comparer: &dyn ValueComparer, a: &dyn Inspect, b: &dyn Inspect) -> Option<bool> {
        comparer.equals(&Operand::of(a), &Operand::of(b), &ComparisonConfig::default())
    }

    fn run_with(
        comparer: &dyn ValueComparer,
        a: &dyn Inspect,
        b: &dyn Inspect,
        config: &ComparisonConfig,
    ) -> Option<bool> {
        comparer.equals(&Operand::of(a), &Operand::of(b), config)
    }

    #[test]
    fn test_numeric_across_representations() {
        assert_eq!(run(&NumericComparer, &10_i32, &10.0_f64), Some(true));
        assert_eq!(run(&NumericComparer, &Decimal::new(10, 0), &Decimal::new(100, 1)), Some(true));
        assert_eq!(run(&NumericComparer, &1_u8, &Decimal::new(15, 1)), Some(false));
        assert_eq!(run(&NumericComparer, &f64::NAN, &f64::NAN), Some(true));
        assert_eq!(run(&NumericComparer, &1_i32, &"1"), None);
    }

    #[test]
    fn test_numeric_precision() {
        let config = ComparisonConfig {
            double_precision: 0.01,
            decimal_precision: Decimal::new(1, 1),
            ..ComparisonConfig::default()
        };
        assert_eq!(run_with(&NumericComparer, &1.0_f64, &1.005_f64, &config), Some(true));
        assert_eq!(run_with(&NumericComparer, &1.0_f64, &1.5_f64, &config), Some(false));
        assert_eq!(
            run_with(&NumericComparer, &Decimal::new(100, 2), &Decimal::new(105, 2), &config),
            Some(true)
        );
    }

    #[test]
    fn test_text_options() {
        assert_eq!(run(&TextComparer, &"straße", &"strasse"), Some(false));
        assert_eq!(run(&TextComparer, &'a', &"a"), Some(true));

        let config = ComparisonConfig {
            case_sensitive: false,
            ignore_string_leading_trailing_whitespace: true,
            ..ComparisonConfig::default()
        };
        assert_eq!(run_with(&TextComparer, &" Greg ", &"greg", &config), Some(true));
    }

    #[test]
    fn test_date_time_offset_modes() {
        let utc = FixedOffset::east_opt(0).expect("valid offset");
        let plus3 = FixedOffset::east_opt(3 * 3600).expect("valid offset");
        let a = utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).single().expect("valid");
        let b = plus3.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).single().expect("valid");

        assert_eq!(run(&DateTimeOffsetComparer, &a, &b), Some(true));

        let strict = ComparisonConfig {
            compare_date_time_offset_with_offsets: true,
            ..ComparisonConfig::default()
        };
        assert_eq!(run_with(&DateTimeOffsetComparer, &a, &b, &strict), Some(false));
    }

    #[test]
    fn test_date_tolerance() {
        let day = NaiveDate::from_ymd_opt(2012, 6, 12).expect("valid date");
        let start = day.and_hms_opt(0, 0, 0).expect("valid time");
        let later = day.and_hms_milli_opt(0, 0, 0, 400).expect("valid time");

        assert_eq!(run(&DateTimeComparer, &start, &later), Some(false));
        let lenient = ComparisonConfig {
            max_milliseconds_date_difference: 500,
            ..ComparisonConfig::default()
        };
        assert_eq!(run_with(&DateTimeComparer, &start, &later, &lenient), Some(true));
        assert_eq!(run(&DateTimeComparer, &start, &day), None);
    }

    #[test]
    fn test_time_span() {
        assert_eq!(
            run(&TimeSpanComparer, &TimeDelta::hours(6), &TimeDelta::hours(7)),
            Some(false)
        );
    }

    fn form(value: &dyn Inspect, config: &ComparisonConfig) -> Option<String> {
        key_form(&value.view(), config)
    }

    #[test]
    fn test_key_forms_follow_equality() {
        let config = ComparisonConfig::default();
        assert_eq!(form(&1_i32, &config), form(&Decimal::new(10, 1), &config));
        assert_eq!(form(&2.5_f64, &config), form(&Decimal::new(250, 2), &config));
        assert_eq!(form(&'a', &config), form(&"a", &config));
        assert_ne!(form(&1_i32, &config), form(&"1", &config));
        assert_ne!(form(&"Greg", &config), form(&"greg", &config));
        assert_eq!(form(&vec![1_i32], &config), None);

        let relaxed = ComparisonConfig {
            case_sensitive: false,
            ignore_string_leading_trailing_whitespace: true,
            ..ComparisonConfig::default()
        };
        assert_eq!(form(&" Greg", &relaxed), form(&"greg", &relaxed));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_int_equals_its_float(n in -1_000_000_i64..1_000_000) {
            #[allow(clippy::cast_precision_loss)]
            let as_float = n as f64;
            prop_assert_eq!(run(&NumericComparer, &n, &as_float), Some(true));
        }

        #[test]
        fn prop_text_is_reflexive(s in ".*") {
            prop_assert_eq!(run(&TextComparer, &s, &s), Some(true));
        }
    }
}
