//! JSON documents as comparable values.
//!
//! Objects are composites whose members are their keys, so two documents
//! produce breadcrumbs like `items[2].name`. Every object carries the same
//! `"object"` label; key sets that differ surface as missing members.

use super::member::{AccessError, Composite, MemberInfo};
use super::view::{Handle, Inspect, View};
use serde_json::{Map, Number, Value};
use std::borrow::Cow;

fn number_view(number: &Number) -> View<'static> {
    if let Some(int) = number.as_i64() {
        View::Int(i128::from(int))
    } else if let Some(uint) = number.as_u64() {
        View::Int(i128::from(uint))
    } else {
        number.as_f64().map_or_else(
            || View::Unreadable(format!("number {number} is not representable")),
            View::Float,
        )
    }
}

impl Inspect for Value {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    fn view(&self) -> View<'_> {
        match self {
            Self::Null => View::Null,
            Self::Bool(b) => View::Bool(*b),
            Self::Number(n) => number_view(n),
            Self::String(s) => View::Str(Cow::Borrowed(s.as_str())),
            Self::Array(items) => View::Sequence(items.iter().map(Handle::from).collect()),
            Self::Object(map) => View::Object(map),
        }
    }
}

impl Composite for Map<String, Value> {
    fn members(&self) -> Vec<MemberInfo> {
        self.keys().map(|key| MemberInfo::field(key.clone())).collect()
    }

    fn member(&self, name: &str) -> Result<Handle<'_>, AccessError> {
        self.get(name).map(Handle::from).ok_or(AccessError::NotFound)
    }

    fn fixed_shape(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_map_to_int_or_float() {
        assert!(matches!(json!(-5).view(), View::Int(-5)));
        assert!(matches!(json!(u64::MAX).view(), View::Int(_)));
        assert!(matches!(json!(1.5).view(), View::Float(f) if (f - 1.5).abs() < f64::EPSILON));
    }

    #[test]
    fn test_object_members_are_keys() {
        let doc = json!({"name": "Greg", "age": 42});
        let View::Object(composite) = doc.view() else {
            panic!("expected object");
        };

        let names: Vec<_> = composite.members().into_iter().map(|m| m.name).collect();
        assert_eq!(names.len(), 2);
        assert!(names.iter().any(|n| n == "name"));

        let age = composite.member("age").expect("age present");
        assert!(matches!(age.view(), View::Int(42)));
        assert_eq!(composite.member("missing").err(), Some(AccessError::NotFound));
        assert_eq!(doc.type_name(), "object");
        assert!(!composite.fixed_shape());
    }
}
