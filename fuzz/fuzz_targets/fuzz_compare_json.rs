#![no_main]
use deep_compare::{compare, ComparisonConfig};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

/// Fuzz the engine with pairs of JSON documents.
///
/// Input is split at the first NUL byte into a left and a right document.
/// Every document must compare equal to itself.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let (left, right) = s.split_once('\0').unwrap_or((s, s));
    let (Ok(left), Ok(right)) = (
        serde_json::from_str::<Value>(left),
        serde_json::from_str::<Value>(right),
    ) else {
        return;
    };

    let unordered = ComparisonConfig::builder()
        .unlimited()
        .ignore_collection_order(true)
        .build();
    let ordered = ComparisonConfig::builder().unlimited().build();

    for config in [&ordered, &unordered] {
        let _ = compare(&left, &right, config);
        let reflexive = compare(&left, &left.clone(), config).expect("valid config");
        assert!(reflexive.are_equal);
    }
});
