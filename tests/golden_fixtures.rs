use deep_compare::cli::{exit_codes, load_document, run_compare, CompareOptions, MatchKey};
use deep_compare::{compare, ComparisonConfig, ConfigPreset};
use std::path::{Path, PathBuf};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn options(left: &str, right: &str) -> CompareOptions {
    CompareOptions {
        left: fixture_path(left),
        right: fixture_path(right),
        preset: Some(ConfigPreset::Exhaustive),
        quiet: true,
        ..CompareOptions::default()
    }
}

#[test]
fn golden_json_and_yaml_documents_agree() {
    let json = load_document(&fixture_path("orders-old.json")).expect("failed to load JSON fixture");
    let yaml = load_document(&fixture_path("orders-same.yaml")).expect("failed to load YAML fixture");

    let config = ComparisonConfig::builder().unlimited().build();
    let result = compare(&json, &yaml, &config).expect("comparison should succeed");
    assert!(result.are_equal, "{}", result.differences_string());
}

#[test]
fn golden_reordered_orders_keyed_by_id() {
    let old = load_document(&fixture_path("orders-old.json")).expect("failed to load old fixture");
    let new = load_document(&fixture_path("orders-new.yaml")).expect("failed to load new fixture");

    let config = ComparisonConfig::builder()
        .unlimited()
        .ignore_collection_order(true)
        .match_collection_by("object", ["id"])
        .build();
    let result = compare(&old, &new, &config).expect("comparison should succeed");

    assert_eq!(result.len(), 1);
    let difference = &result.differences[0];
    assert_eq!(difference.property_name, "orders[id:2].status");
    assert_eq!(difference.object1_value, "open");
    assert_eq!(difference.object2_value, "shipped");
}

#[test]
fn golden_nested_arrays_without_keys_fall_back_to_content() {
    let old = load_document(&fixture_path("nested-old.json")).expect("failed to load old fixture");
    let new = load_document(&fixture_path("nested-new.yaml")).expect("failed to load new fixture");

    let config = ComparisonConfig::builder()
        .unlimited()
        .ignore_collection_order(true)
        .match_collection_by("object", ["id"])
        .build();
    let same = compare(&old, &old.clone(), &config).expect("comparison should succeed");
    assert!(same.are_equal, "{}", same.differences_string());

    let result = compare(&old, &new, &config).expect("comparison should succeed");
    let paths: Vec<&str> = result
        .differences
        .iter()
        .map(|d| d.property_name.as_str())
        .collect();
    assert_eq!(paths, ["orders[id:2].lines[0]", "orders[id:2].lines[0]"]);
    assert_eq!(result.differences[0].object2_value, "(missing)");
    assert_eq!(result.differences[1].object1_value, "(missing)");

    let keyed = CompareOptions {
        ignore_order: true,
        match_keys: vec!["object=id".parse::<MatchKey>().expect("valid match key")],
        ..options("nested-old.json", "nested-old.json")
    };
    assert_eq!(run_compare(&keyed).expect("compare should run"), exit_codes::EQUAL);
}

#[test]
fn golden_positional_comparison_reports_every_slot() {
    let old = load_document(&fixture_path("orders-old.json")).expect("failed to load old fixture");
    let new = load_document(&fixture_path("orders-new.yaml")).expect("failed to load new fixture");

    let config = ComparisonConfig::builder().unlimited().build();
    let result = compare(&old, &new, &config).expect("comparison should succeed");

    let paths: Vec<&str> = result
        .differences
        .iter()
        .map(|d| d.property_name.as_str())
        .collect();
    assert_eq!(
        paths,
        [
            "orders[0].id",
            "orders[0].total",
            "orders[1].id",
            "orders[1].status",
            "orders[1].total",
            "tags[0]",
            "tags[1]",
        ]
    );
}

#[test]
fn golden_cli_exit_codes() {
    assert_eq!(
        run_compare(&options("orders-old.json", "orders-same.yaml")).expect("compare should run"),
        exit_codes::EQUAL
    );
    assert_eq!(
        run_compare(&options("orders-old.json", "orders-new.yaml")).expect("compare should run"),
        exit_codes::DIFFERENT
    );

    let keyed = CompareOptions {
        ignore_order: true,
        match_keys: vec!["object=id".parse::<MatchKey>().expect("valid match key")],
        ..options("orders-old.json", "orders-same.yaml")
    };
    assert_eq!(run_compare(&keyed).expect("compare should run"), exit_codes::EQUAL);
}
