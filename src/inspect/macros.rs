//! Declarative macros that describe types to the comparison engine.

/// Implement [`Inspect`](crate::inspect::Inspect) and
/// [`Composite`](crate::inspect::Composite) for a struct.
///
/// Each listed field becomes a member. A field may be renamed with
/// `field => "Name"` and flagged with `#[private]`, `#[property]`,
/// `#[indexer]` or `#[marker("Name")]`. The type label defaults to the
/// type as written and can be overridden with `Type as "Label"`.
///
/// ```
/// use deep_compare::inspect_struct;
///
/// struct Shipment {
///     customer: String,
///     insert_date: i64,
/// }
///
/// inspect_struct!(Shipment as "Shipment" {
///     #[marker("Compare")]
///     customer => "Customer",
///     #[marker("CompareIgnore")]
///     insert_date => "InsertDate",
/// });
/// ```
#[macro_export]
macro_rules! inspect_struct {
    (
        $ty:ty $(as $label:literal)? {
            $(
                $(#[$flag:ident $(( $($arg:expr),* ))?])*
                $field:ident $(=> $name:literal)?
            ),* $(,)?
        }
    ) => {
        impl $crate::inspect::Inspect for $ty {
            fn type_name(&self) -> &'static str {
                $crate::__type_label!($ty $(, $label)?)
            }

            fn view(&self) -> $crate::inspect::View<'_> {
                $crate::inspect::View::Object(self)
            }
        }

        impl $crate::inspect::Composite for $ty {
            fn members(&self) -> ::std::vec::Vec<$crate::inspect::MemberInfo> {
                ::std::vec![
                    $(
                        $crate::inspect::MemberInfo::field(
                            $crate::__member_label!($field $(, $name)?)
                        )
                        $( .$flag( $($($arg),*)? ) )*
                    ),*
                ]
            }

            #[allow(unused_variables)]
            fn member(
                &self,
                name: &str,
            ) -> ::std::result::Result<$crate::inspect::Handle<'_>, $crate::inspect::AccessError> {
                $(
                    if name == $crate::__member_label!($field $(, $name)?) {
                        return ::std::result::Result::Ok(
                            $crate::inspect::Handle::Borrowed(&self.$field),
                        );
                    }
                )*
                ::std::result::Result::Err($crate::inspect::AccessError::NotFound)
            }
        }
    };
}

/// Implement [`Inspect`](crate::inspect::Inspect) for a fieldless enum.
///
/// ```
/// use deep_compare::inspect_enum;
///
/// #[derive(Clone, Copy)]
/// enum Color { Red, Blue }
///
/// inspect_enum!(Color { Red, Blue });
/// ```
#[macro_export]
macro_rules! inspect_enum {
    ($ty:ty $(as $label:literal)? { $($variant:ident),* $(,)? }) => {
        impl $crate::inspect::Inspect for $ty {
            fn type_name(&self) -> &'static str {
                $crate::__type_label!($ty $(, $label)?)
            }

            fn view(&self) -> $crate::inspect::View<'_> {
                let variant = match self {
                    $( Self::$variant => stringify!($variant), )*
                };
                $crate::inspect::View::Enum(::std::borrow::Cow::Borrowed(variant))
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __type_label {
    ($ty:ty) => {
        stringify!($ty)
    };
    ($ty:ty, $label:literal) => {
        $label
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __member_label {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $name:literal) => {
        $name
    };
}
