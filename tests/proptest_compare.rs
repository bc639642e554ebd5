//! Property-based tests for the comparison engine.
//!
//! Ensures comparisons of arbitrary documents never fail, and that the
//! result invariants hold across random inputs.

use deep_compare::{compare, ComparisonConfig};
use proptest::prelude::*;
use serde_json::{Map, Value};

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1.0e6..1.0e6_f64).prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn unlimited() -> ComparisonConfig {
    ComparisonConfig::builder().unlimited().build()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn value_equals_itself(doc in arb_json()) {
        let copy = doc.clone();
        let result = compare(&doc, &copy, &unlimited()).unwrap();
        prop_assert!(result.are_equal, "{}", result.differences_string());

        let unordered = ComparisonConfig::builder()
            .unlimited()
            .ignore_collection_order(true)
            .build();
        prop_assert!(compare(&doc, &copy, &unordered).unwrap().are_equal);
    }

    #[test]
    fn equality_is_symmetric(left in arb_json(), right in arb_json()) {
        let forward = compare(&left, &right, &unlimited()).unwrap();
        let backward = compare(&right, &left, &unlimited()).unwrap();
        prop_assert_eq!(forward.are_equal, backward.are_equal);
        prop_assert_eq!(forward.len(), backward.len());
    }

    #[test]
    fn cap_truncates_the_full_listing(left in arb_json(), right in arb_json(), cap in 1_usize..5) {
        let full = compare(&left, &right, &unlimited()).unwrap();
        let config = ComparisonConfig::builder().max_differences(cap).build();
        let capped = compare(&left, &right, &config).unwrap();

        prop_assert!(capped.len() <= cap);
        prop_assert_eq!(capped.len(), full.len().min(cap));
        prop_assert_eq!(capped.are_equal, full.are_equal);
        for (a, b) in capped.differences.iter().zip(&full.differences) {
            prop_assert_eq!(&a.property_name, &b.property_name);
        }
    }

    #[test]
    fn paths_are_well_formed(left in arb_json(), right in arb_json()) {
        let result = compare(&left, &right, &unlimited()).unwrap();
        for difference in &result.differences {
            let path = &difference.property_name;
            prop_assert!(!path.starts_with('.'), "leading dot in {:?}", path);
            prop_assert!(!path.contains(".."), "empty segment in {:?}", path);
        }
    }
}
