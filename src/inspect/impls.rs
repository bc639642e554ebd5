//! [`Inspect`] implementations for standard library and ecosystem types.

use super::view::{Handle, Inspect, Temporal, View};
use chrono::{
    DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc,
};
use indexmap::{IndexMap, IndexSet};
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::cell::{Ref, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::rc::{self, Rc};
use std::sync::Arc;

// ============================================================================
// Scalars
// ============================================================================

macro_rules! int_impls {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Inspect for $ty {
                fn type_name(&self) -> &'static str {
                    stringify!($ty)
                }

                fn view(&self) -> View<'_> {
                    View::Int(*self as i128)
                }
            }
        )*
    };
}

int_impls!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl Inspect for u128 {
    fn type_name(&self) -> &'static str {
        "u128"
    }

    fn view(&self) -> View<'_> {
        i128::try_from(*self).map_or(View::Float(*self as f64), View::Int)
    }
}

impl Inspect for f32 {
    fn type_name(&self) -> &'static str {
        "f32"
    }

    fn view(&self) -> View<'_> {
        View::Float(f64::from(*self))
    }
}

impl Inspect for f64 {
    fn type_name(&self) -> &'static str {
        "f64"
    }

    fn view(&self) -> View<'_> {
        View::Float(*self)
    }
}

impl Inspect for bool {
    fn type_name(&self) -> &'static str {
        "bool"
    }

    fn view(&self) -> View<'_> {
        View::Bool(*self)
    }
}

impl Inspect for char {
    fn type_name(&self) -> &'static str {
        "char"
    }

    fn view(&self) -> View<'_> {
        View::Char(*self)
    }
}

impl Inspect for str {
    fn type_name(&self) -> &'static str {
        "str"
    }

    fn view(&self) -> View<'_> {
        View::Str(Cow::Borrowed(self))
    }
}

impl Inspect for String {
    fn type_name(&self) -> &'static str {
        "String"
    }

    fn view(&self) -> View<'_> {
        View::Str(Cow::Borrowed(self.as_str()))
    }
}

impl Inspect for Cow<'_, str> {
    fn type_name(&self) -> &'static str {
        "String"
    }

    fn view(&self) -> View<'_> {
        View::Str(Cow::Borrowed(self.as_ref()))
    }
}

impl Inspect for Decimal {
    fn type_name(&self) -> &'static str {
        "Decimal"
    }

    fn view(&self) -> View<'_> {
        View::Decimal(*self)
    }
}

impl Inspect for () {
    fn type_name(&self) -> &'static str {
        "()"
    }

    fn view(&self) -> View<'_> {
        View::Tuple(Vec::new())
    }
}

// ============================================================================
// Temporal
// ============================================================================

impl Inspect for NaiveDate {
    fn type_name(&self) -> &'static str {
        "NaiveDate"
    }

    fn view(&self) -> View<'_> {
        View::Temporal(Temporal::Date(*self))
    }
}

impl Inspect for NaiveTime {
    fn type_name(&self) -> &'static str {
        "NaiveTime"
    }

    fn view(&self) -> View<'_> {
        View::Temporal(Temporal::Time(*self))
    }
}

impl Inspect for NaiveDateTime {
    fn type_name(&self) -> &'static str {
        "NaiveDateTime"
    }

    fn view(&self) -> View<'_> {
        View::Temporal(Temporal::DateTime(*self))
    }
}

/// UTC instants compare as plain date-times.
impl Inspect for DateTime<Utc> {
    fn type_name(&self) -> &'static str {
        "DateTime<Utc>"
    }

    fn view(&self) -> View<'_> {
        View::Temporal(Temporal::DateTime(self.naive_utc()))
    }
}

impl Inspect for DateTime<FixedOffset> {
    fn type_name(&self) -> &'static str {
        "DateTime<FixedOffset>"
    }

    fn view(&self) -> View<'_> {
        View::Temporal(Temporal::DateTimeOffset(*self))
    }
}

impl Inspect for DateTime<Local> {
    fn type_name(&self) -> &'static str {
        "DateTime<Local>"
    }

    fn view(&self) -> View<'_> {
        View::Temporal(Temporal::DateTimeOffset(DateTime::<FixedOffset>::from(*self)))
    }
}

impl Inspect for TimeDelta {
    fn type_name(&self) -> &'static str {
        "TimeDelta"
    }

    fn view(&self) -> View<'_> {
        View::Temporal(Temporal::TimeSpan(*self))
    }
}

impl Inspect for std::time::Duration {
    fn type_name(&self) -> &'static str {
        "Duration"
    }

    fn view(&self) -> View<'_> {
        TimeDelta::from_std(*self).map_or_else(
            |err| View::Unreadable(format!("duration out of range: {err}")),
            |span| View::Temporal(Temporal::TimeSpan(span)),
        )
    }
}

// ============================================================================
// Pointers and wrappers
// ============================================================================

impl<T: Inspect + ?Sized> Inspect for &T {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn view(&self) -> View<'_> {
        (**self).view()
    }

    fn identity(&self) -> usize {
        (**self).identity()
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn view(&self) -> View<'_> {
        (**self).view()
    }

    fn identity(&self) -> usize {
        (**self).identity()
    }
}

impl<T: Inspect + ?Sized> Inspect for Rc<T> {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn view(&self) -> View<'_> {
        (**self).view()
    }

    fn identity(&self) -> usize {
        (**self).identity()
    }
}

impl<T: Inspect + ?Sized> Inspect for Arc<T> {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn view(&self) -> View<'_> {
        (**self).view()
    }

    fn identity(&self) -> usize {
        (**self).identity()
    }
}

/// A dangling weak pointer reads as null.
impl<T: Inspect> Inspect for rc::Weak<T> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn view(&self) -> View<'_> {
        self.upgrade()
            .map_or(View::Null, |strong| View::Proxy(Handle::owned(strong)))
    }

    fn identity(&self) -> usize {
        self.as_ptr().cast::<()>() as usize
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn type_name(&self) -> &'static str {
        self.as_ref()
            .map_or(std::any::type_name::<T>(), Inspect::type_name)
    }

    fn view(&self) -> View<'_> {
        self.as_ref().map_or(View::Null, Inspect::view)
    }

    fn identity(&self) -> usize {
        match self {
            Some(value) => value.identity(),
            None => (self as *const Self).cast::<()>() as usize,
        }
    }
}

/// Shared borrow held while the comparison looks inside a `RefCell`.
struct CellGuard<'a, T: ?Sized>(Ref<'a, T>);

impl<T: Inspect + ?Sized> Inspect for CellGuard<'_, T> {
    fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    fn view(&self) -> View<'_> {
        self.0.view()
    }

    fn identity(&self) -> usize {
        self.0.identity()
    }
}

impl<T: Inspect + ?Sized> Inspect for RefCell<T> {
    fn type_name(&self) -> &'static str {
        self.try_borrow()
            .map_or(std::any::type_name::<T>(), |value| value.type_name())
    }

    fn view(&self) -> View<'_> {
        match self.try_borrow() {
            Ok(guard) => View::Proxy(Handle::owned(CellGuard(guard))),
            Err(_) => View::Unreadable("value is already mutably borrowed".to_string()),
        }
    }

    fn identity(&self) -> usize {
        self.as_ptr().cast::<()>() as usize
    }
}

// ============================================================================
// Sequences
// ============================================================================

fn borrowed_items<'a, T: Inspect + 'a>(items: impl Iterator<Item = &'a T>) -> View<'a> {
    View::Sequence(items.map(|item| Handle::Borrowed(item)).collect())
}

impl<T: Inspect> Inspect for [T] {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn view(&self) -> View<'_> {
        borrowed_items(self.iter())
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn view(&self) -> View<'_> {
        borrowed_items(self.iter())
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn view(&self) -> View<'_> {
        borrowed_items(self.iter())
    }
}

impl<T: Inspect> Inspect for VecDeque<T> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn view(&self) -> View<'_> {
        borrowed_items(self.iter())
    }
}

impl<T: Inspect> Inspect for BTreeSet<T> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn view(&self) -> View<'_> {
        borrowed_items(self.iter())
    }
}

impl<T: Inspect, S> Inspect for IndexSet<T, S> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn view(&self) -> View<'_> {
        borrowed_items(self.iter())
    }
}

// ============================================================================
// Maps
// ============================================================================

fn borrowed_pairs<'a, K, V>(pairs: impl Iterator<Item = (&'a K, &'a V)>) -> View<'a>
where
    K: Inspect + 'a,
    V: Inspect + 'a,
{
    View::Map(
        pairs
            .map(|(key, value)| (Handle::Borrowed(key), Handle::Borrowed(value)))
            .collect(),
    )
}

impl<K: Inspect, V: Inspect, S> Inspect for HashMap<K, V, S> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn view(&self) -> View<'_> {
        borrowed_pairs(self.iter())
    }
}

impl<K: Inspect, V: Inspect> Inspect for BTreeMap<K, V> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn view(&self) -> View<'_> {
        borrowed_pairs(self.iter())
    }
}

impl<K: Inspect, V: Inspect, S> Inspect for IndexMap<K, V, S> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn view(&self) -> View<'_> {
        borrowed_pairs(self.iter())
    }
}

// ============================================================================
// Tuples
// ============================================================================

macro_rules! tuple_impls {
    ($( ( $($name:ident . $idx:tt),+ ) )+) => {
        $(
            impl<$($name: Inspect),+> Inspect for ($($name,)+) {
                fn type_name(&self) -> &'static str {
                    std::any::type_name::<Self>()
                }

                fn view(&self) -> View<'_> {
                    View::Tuple(vec![$(Handle::Borrowed(&self.$idx)),+])
                }
            }
        )+
    };
}

tuple_impls! {
    (A.0)
    (A.0, B.1)
    (A.0, B.1, C.2)
    (A.0, B.1, C.2, D.3)
    (A.0, B.1, C.2, D.3, E.4)
    (A.0, B.1, C.2, D.3, E.4, F.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence_len(view: View<'_>) -> Option<usize> {
        match view {
            View::Sequence(items) => Some(items.len()),
            _ => None,
        }
    }

    #[test]
    fn test_integers_widen() {
        assert!(matches!((-5_i8).view(), View::Int(-5)));
        assert!(matches!(u64::MAX.view(), View::Int(v) if v == i128::from(u64::MAX)));
        assert!(matches!(u128::MAX.view(), View::Float(_)));
    }

    #[test]
    fn test_option_and_pointers_delegate() {
        let boxed = Box::new(3_i32);
        assert_eq!(boxed.identity(), (*boxed).identity());

        let none: Option<i32> = None;
        assert!(none.view().is_null());
        assert!(matches!(Some(4_i32).view(), View::Int(4)));

        let shared = Rc::new(String::from("x"));
        let other = Rc::clone(&shared);
        assert_eq!(shared.identity(), other.identity());
    }

    #[test]
    fn test_refcell_proxies_through_guard() {
        let cell = RefCell::new(vec![1_i32, 2]);
        let View::Proxy(inner) = cell.view() else {
            panic!("expected proxy");
        };
        assert_eq!(inner.identity(), cell.identity());
        assert_eq!(sequence_len(inner.view()), Some(2));
    }

    #[test]
    fn test_refcell_mutably_borrowed_is_unreadable() {
        let cell = RefCell::new(1_i32);
        let _writer = cell.borrow_mut();
        assert!(matches!(cell.view(), View::Unreadable(_)));
    }

    #[test]
    fn test_dangling_weak_is_null() {
        let weak = {
            let strong = Rc::new(5_i32);
            Rc::downgrade(&strong)
        };
        assert!(weak.view().is_null());
    }

    #[test]
    fn test_collections_and_tuples() {
        assert_eq!(sequence_len(vec![1_i32, 2, 3].view()), Some(3));
        assert_eq!(sequence_len([1_u8; 4].view()), Some(4));

        let mut map = BTreeMap::new();
        map.insert("a", 1_i32);
        assert!(matches!(map.view(), View::Map(pairs) if pairs.len() == 1));

        let pair = ("x", 1_i32);
        assert!(matches!(pair.view(), View::Tuple(items) if items.len() == 2));
    }

    #[test]
    fn test_std_duration_is_timespan() {
        let span = std::time::Duration::from_secs(90);
        assert!(matches!(
            span.view(),
            View::Temporal(Temporal::TimeSpan(d)) if d.num_seconds() == 90
        ));
    }
}
