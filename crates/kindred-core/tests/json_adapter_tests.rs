//! Dynamic JSON documents compared through the same engine.

use kindred_core::{deep_compare, deep_equal, CompareOptions};
use serde_json::{json, Value};
use std::collections::HashMap;

#[test]
fn test_equal_documents() {
    let left = json!({"city": "Paris", "points": [1, 2, 3]});
    let right = json!({"points": [1, 2, 3], "city": "Paris"});
    assert!(deep_equal(&left, &right).unwrap());
}

#[test]
fn test_parsed_document_matches_built_document() {
    let parsed: Value =
        serde_json::from_str(r#"{"city": "Paris", "points": [1, 2.5]}"#).unwrap();
    let built = json!({"city": "Paris", "points": [1, 2.5]});
    assert!(deep_equal(&parsed, &built).unwrap());
}

#[test]
fn test_json_numbers_compare_with_native_numbers() {
    assert!(deep_equal(&json!(2), &2i32).unwrap());
    assert!(deep_equal(&json!(2.5), &2.5f64).unwrap());
    assert!(deep_equal(&json!(u64::MAX), &u64::MAX).unwrap());
    assert!(!deep_equal(&json!(2), &3i32).unwrap());
}

#[test]
fn test_json_arrays_compare_with_sequences() {
    let doc = json!([1, 2, 3]);
    assert!(deep_equal(&doc, &vec![1, 2, 3]).unwrap());
    assert!(!deep_equal(&doc, &vec![3, 2, 1]).unwrap());
}

#[test]
fn test_json_objects_compare_with_native_maps() {
    let doc = json!({"a": 1, "b": 2});
    let map: HashMap<String, i32> = HashMap::from([("a".to_string(), 1), ("b".to_string(), 2)]);
    assert!(deep_equal(&doc, &map).unwrap());
}

#[test]
fn test_json_null_is_the_null_scalar() {
    let none: Option<i32> = None;
    assert!(deep_equal(&json!(null), &none).unwrap());
    assert!(!deep_equal(&json!(null), &json!(0)).unwrap());
}

#[test]
fn test_json_float_tolerance() {
    let left = json!({"pi": 3.141592653589793});
    let right = json!({"pi": 3.141592653589793 + 1e-12});
    assert!(deep_equal(&left, &right).unwrap());
}

#[test]
fn test_json_difference_path() {
    let options = CompareOptions::default().collecting_difference();
    let left = json!({"user": {"name": "ada", "tags": ["x", "y"]}});
    let right = json!({"user": {"name": "ada", "tags": ["x", "z"]}});
    let outcome = deep_compare(&left, &right, &options).unwrap();
    assert!(!outcome.equal);
    let difference = outcome.difference.unwrap();
    assert_eq!(
        difference.path_string(),
        "$[string \"user\"][string \"tags\"][1]"
    );
    assert_eq!(difference.left, "string \"y\"");
    assert_eq!(difference.right, "string \"z\"");
}

#[test]
fn test_mixed_structure_divergence() {
    let left = json!({"value": [1, 2]});
    let right = json!({"value": {"0": 1, "1": 2}});
    assert!(!deep_equal(&left, &right).unwrap());
}
