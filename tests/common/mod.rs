// Shared fixtures for the integration tests
#![allow(dead_code)]

use pathkit::{PathError, Value};
use serde_json::json;

/// A document exercising nested objects, arrays, odd keys and repeated
/// keys at several depths.
pub fn example() -> Value {
    Value::from(json!({
        "key1": {"key2": {"key3": {"key4": {"key5": 123}}}},
        "key2": {"array": [{"subkey": "val"}, 456, true]},
        "key3": {
            "array": ["val0", "val1", "val2", "val3", "val4", "val5"],
            "map": {"key1": "val1", "key2": "val2", "key3": "val3"}
        },
        "key4": [{"key1": "val1"}, {"key1": "val2"}, {"key1": "val3"}],
        "key5": {
            "'single'": "single",
            "\"double\"": "double",
            "  spaces  ": "spaces",
            "][.,": "specials",
            "null_value": null,
            "empty_slice": [],
            "empty_map": {},
            "int": 123,
            "float": 1.23
        },
        "key6": {
            "recursive": "val1",
            "key7": {
                "recursive": "val2",
                "key8": {"recursive": "val3"},
                "key9": [{"recursive": "val4"}, {"recursive": "val5"}]
            }
        },
        "key7": {
            "recursive": [{"recursive": {"recursive": true}}],
            "arrays": {"a": ["val1", "val2"], "b": ["val3", "val4"], "c": ["val5", "val6"]}
        }
    }))
}

pub fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

/// Sorted string rendering of an array result, for order-independent checks
pub fn sorted(value: Value) -> Vec<String> {
    let Value::Array(arr) = value else {
        panic!("expected an array result, got {:?}", value);
    };
    let mut out: Vec<String> = arr
        .items
        .iter()
        .map(|item| pathkit::value_to_json(item).to_string())
        .collect();
    out.sort();
    out
}

pub fn assert_not_found<T: std::fmt::Debug>(result: Result<T, PathError>, message: &str) {
    let err = result.expect_err("expected NotFound");
    assert!(err.is_not_found(), "expected NotFound, got {:?}", err);
    assert!(
        err.to_string().contains(message),
        "error '{}' does not mention '{}'",
        err,
        message
    );
}
