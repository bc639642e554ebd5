//! Cyclic graphs, interior mutability and lazily produced sequences.

mod common;

use common::*;
use deep_compare::inspect::Generated;
use deep_compare::{compare, ComparisonConfig};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_identical_trees_with_back_references() {
    let left = tree("root", &["a", "b"]);
    let right = tree("root", &["a", "b"]);

    let result = logic(unlimited()).compare(&left, &right).unwrap();
    assert!(result.are_equal);
}

#[test]
fn test_difference_below_a_cycle() {
    let left = tree("root", &["a", "b"]);
    let right = tree("root", &["a", "x"]);

    let result = logic(unlimited()).compare(&left, &right).unwrap();
    assert_eq!(paths(&result), ["Children[1].Name"]);
    assert_eq!(result.differences[0].object2_value, "x");
}

#[test]
fn test_missing_child_in_cyclic_graph() {
    let left = tree("root", &["a"]);
    let right = tree("root", &["a", "b"]);

    let result = logic(unlimited()).compare(&left, &right).unwrap();
    assert_eq!(paths(&result), ["Children[1]"]);
}

#[test]
fn test_self_reference_through_weak_and_generated() {
    let left = looping("one");
    let right = looping("one");
    assert!(logic(unlimited()).compare(&left, &right).unwrap().are_equal);

    let other = looping("two");
    let result = logic(unlimited()).compare(&left, &other).unwrap();
    assert_eq!(paths(&result), ["Name"]);
}

#[test]
fn test_unordered_cyclic_children() {
    let left = tree("root", &["a", "b", "c"]);
    let right = tree("root", &["c", "a", "b"]);

    let config = ComparisonConfig::builder()
        .unlimited()
        .ignore_collection_order(true)
        .build();
    assert!(logic(config).compare(&left, &right).unwrap().are_equal);
}

#[test]
fn test_mutably_borrowed_cell_is_unreadable() {
    let left = RefCell::new(5_i32);
    let right = RefCell::new(5_i32);

    let _writer = left.borrow_mut();
    let result = compare(&left, &right, &unlimited()).unwrap();
    assert_eq!(result.len(), 1);
    assert!(result.differences[0].object1_value.starts_with("(unreadable"));
}

#[test]
fn test_generated_sequences_compare_by_content() {
    let squares = Generated::new(|| (1..=3).map(|n: i32| n * n));
    let listed = Generated::new(|| vec![1_i32, 4, 9]);
    assert!(compare(&squares, &listed, &unlimited()).unwrap().are_equal);

    let shifted = Generated::new(|| vec![1_i32, 4, 10]);
    let result = compare(&squares, &shifted, &unlimited()).unwrap();
    assert_eq!(paths(&result), ["[2]"]);
}

#[test]
fn test_generated_sequence_is_reevaluated_per_comparison() {
    let source = Rc::new(RefCell::new(vec![1_i32, 2]));
    let view = Rc::clone(&source);
    let live = Generated::new(move || view.borrow().clone());
    let expected = vec![1_i32, 2];

    assert!(compare(&live, &expected, &unlimited()).unwrap().are_equal);
    source.borrow_mut().push(3);
    assert!(!compare(&live, &expected, &unlimited()).unwrap().are_equal);
}
