//! Unordered-collection and map matching scenarios.
//!
//! Bags (sets, heaps) and maps must compare independently of iteration
//! order and of the container's own hashing, using the engine's equality
//! for elements and keys.

use kindred_core::{deep_equal, deep_equal_with, CompareOptions, Reflect, Shape};
use std::any::Any;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet};

// ---------------------------------------------------------------------------
// Bags
// ---------------------------------------------------------------------------

#[test]
fn test_sets_ignore_iteration_order() {
    let left: HashSet<i32> = (0..100).collect();
    let right: HashSet<i32> = (0..100).rev().collect();
    assert!(deep_equal(&left, &right).unwrap());
}

#[test]
fn test_set_containers_are_interchangeable() {
    let hash: HashSet<i32> = HashSet::from([3, 1, 2]);
    let btree: BTreeSet<i32> = BTreeSet::from([1, 2, 3]);
    assert!(deep_equal(&hash, &btree).unwrap());
}

#[test]
fn test_heaps_compare_as_bags() {
    let left = BinaryHeap::from([5, 1, 3]);
    let right = BinaryHeap::from([3, 5, 1]);
    assert!(deep_equal(&left, &right).unwrap());
}

#[test]
fn test_heap_multiplicity_matters() {
    let left = BinaryHeap::from([1, 1, 2]);
    let right = BinaryHeap::from([1, 2, 2]);
    assert!(!deep_equal(&left, &right).unwrap());
    let balanced = BinaryHeap::from([2, 1, 1]);
    assert!(deep_equal(&left, &balanced).unwrap());
}

#[test]
fn test_set_elements_cross_integer_domains() {
    let left: HashSet<i64> = HashSet::from([1, 2, 3]);
    let right: HashSet<u8> = HashSet::from([3, 2, 1]);
    assert!(deep_equal(&left, &right).unwrap());
    let negatives: HashSet<i64> = HashSet::from([-1, 2, 3]);
    assert!(!deep_equal(&negatives, &right).unwrap());
}

#[test]
fn test_sets_of_sequences_match_structurally() {
    let left: HashSet<Vec<i32>> = HashSet::from([vec![1, 2], vec![3]]);
    let right: BTreeSet<Vec<i32>> = BTreeSet::from([vec![3], vec![1, 2]]);
    assert!(deep_equal(&left, &right).unwrap());
}

#[test]
fn test_bag_never_equals_sequence() {
    let set: HashSet<i32> = HashSet::from([1, 2, 3]);
    let vec = vec![1, 2, 3];
    assert!(!deep_equal(&set, &vec).unwrap());
}

#[test]
fn test_missing_element_is_unequal() {
    let left: HashSet<i32> = HashSet::from([1, 2, 3]);
    let right: HashSet<i32> = HashSet::from([1, 2, 4]);
    assert!(!deep_equal(&left, &right).unwrap());
}

#[test]
fn test_removed_element_is_unequal() {
    let full: HashSet<i32> = HashSet::from([1, 2, 3]);
    let trimmed: HashSet<i32> = HashSet::from([1, 2]);
    assert!(!deep_equal(&full, &trimmed).unwrap());
    assert!(!deep_equal(&trimmed, &full).unwrap());
}

#[test]
fn test_borrowed_element_is_an_error_not_a_mismatch() {
    let guarded = BTreeSet::from([RefCell::new(5i32)]);
    let plain = BTreeSet::from([5i32]);
    let hold = guarded.iter().next().unwrap().borrow_mut();
    let err = deep_equal(&guarded, &plain).unwrap_err();
    assert_eq!(err.code(), "ERR_INACCESSIBLE");
    drop(hold);
    assert!(deep_equal(&guarded, &plain).unwrap());
}

// ---------------------------------------------------------------------------
// Maps
// ---------------------------------------------------------------------------

#[test]
fn test_map_containers_are_interchangeable() {
    let hash: HashMap<String, i32> =
        HashMap::from([("a".to_string(), 1), ("b".to_string(), 2)]);
    let btree: BTreeMap<String, i32> =
        BTreeMap::from([("b".to_string(), 2), ("a".to_string(), 1)]);
    assert!(deep_equal(&hash, &btree).unwrap());
}

#[test]
fn test_map_keys_cross_integer_domains() {
    let left: HashMap<i64, &str> = HashMap::from([(1, "one"), (2, "two")]);
    let right: HashMap<u8, &str> = HashMap::from([(2, "two"), (1, "one")]);
    assert!(deep_equal(&left, &right).unwrap());
}

#[test]
fn test_map_value_divergence_is_unequal() {
    let left: HashMap<&str, i32> = HashMap::from([("a", 1), ("b", 2)]);
    let right: HashMap<&str, i32> = HashMap::from([("a", 1), ("b", 3)]);
    assert!(!deep_equal(&left, &right).unwrap());
}

#[test]
fn test_map_key_divergence_is_unequal() {
    let left: HashMap<&str, i32> = HashMap::from([("a", 1), ("b", 2)]);
    let right: HashMap<&str, i32> = HashMap::from([("a", 1), ("c", 2)]);
    assert!(!deep_equal(&left, &right).unwrap());
}

#[test]
fn test_structured_keys_match_without_container_hashing() {
    let left: HashMap<Vec<i32>, &str> = HashMap::from([(vec![1, 2], "pair")]);
    let right: BTreeMap<Vec<i32>, &str> = BTreeMap::from([(vec![1, 2], "pair")]);
    assert!(deep_equal(&left, &right).unwrap());
}

#[test]
fn test_map_float_values_use_tolerance() {
    let left: HashMap<&str, f64> = HashMap::from([("pi", 3.14159265358979)]);
    let right: HashMap<&str, f64> = HashMap::from([("pi", 3.14159265358979 + 1e-12)]);
    assert!(deep_equal(&left, &right).unwrap());

    let strict = CompareOptions::default().with_float_epsilon(0.0);
    assert!(!deep_equal_with(&left, &right, &strict).unwrap());
}

#[test]
fn test_nested_maps() {
    let left: HashMap<&str, HashMap<&str, i32>> =
        HashMap::from([("outer", HashMap::from([("inner", 1)]))]);
    let right: HashMap<&str, HashMap<&str, i32>> =
        HashMap::from([("outer", HashMap::from([("inner", 1)]))]);
    assert!(deep_equal(&left, &right).unwrap());

    let changed: HashMap<&str, HashMap<&str, i32>> =
        HashMap::from([("outer", HashMap::from([("inner", 2)]))]);
    assert!(!deep_equal(&left, &changed).unwrap());
}

#[test]
fn test_empty_maps_are_equal_across_containers() {
    let hash: HashMap<String, i32> = HashMap::new();
    let btree: BTreeMap<String, i32> = BTreeMap::new();
    assert!(deep_equal(&hash, &btree).unwrap());
}

#[test]
fn test_maps_of_different_size_are_unequal() {
    let small: HashMap<&str, i32> = HashMap::from([("a", 1)]);
    let large: HashMap<&str, i32> = HashMap::from([("a", 1), ("b", 2)]);
    assert!(!deep_equal(&small, &large).unwrap());
}

#[test]
fn test_borrowed_map_key_is_an_error() {
    let guarded: BTreeMap<RefCell<i32>, &str> = BTreeMap::from([(RefCell::new(1), "one")]);
    let plain: BTreeMap<i32, &str> = BTreeMap::from([(1, "one")]);
    let hold = guarded.keys().next().unwrap().borrow_mut();
    let err = deep_equal(&guarded, &plain).unwrap_err();
    assert_eq!(err.code(), "ERR_INACCESSIBLE");
    drop(hold);
    assert!(deep_equal(&guarded, &plain).unwrap());
}

/// An association list reflected as a map, so float keys are possible.
struct Lookup(Vec<(f64, &'static str)>);

impl Reflect for Lookup {
    fn shape(&self) -> Shape<'_> {
        Shape::Map(
            self.0
                .iter()
                .map(|(key, value)| (key as &dyn Reflect, value as &dyn Reflect))
                .collect(),
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn test_ambiguous_float_keys_do_not_flip_the_verdict() {
    // Every key on each side falls within tolerance of every key on the
    // other, so the first key assignment tried is arbitrary; entries must
    // still pair up by value.
    let loose = CompareOptions::default().with_float_epsilon(0.01);
    let left = Lookup(vec![(1.000, "x"), (1.002, "y")]);
    let right = Lookup(vec![(1.001, "y"), (1.003, "x")]);
    assert!(deep_equal_with(&left, &right, &loose).unwrap());

    let unmatched = Lookup(vec![(1.001, "y"), (1.003, "y")]);
    assert!(!deep_equal_with(&left, &unmatched, &loose).unwrap());
}
