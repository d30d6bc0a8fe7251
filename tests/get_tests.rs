// tests/get_tests.rs

mod common;
use common::*;

use pathkit::{Value, compile, get};
use serde_json::json;

fn get_ok(path: &str) -> Value {
    get(&example(), path).unwrap_or_else(|e| panic!("{}: {}", path, e))
}

fn strings(items: &[&str]) -> Value {
    Value::from(items.iter().map(|s| Value::from(*s)).collect::<Vec<_>>())
}

// ============================================================================
// Whole Document and Map Access
// ============================================================================

#[test]
fn test_whole_document() {
    for path in ["$", "$.", "."] {
        assert_eq!(get_ok(path), example(), "Failed for path: {}", path);
    }
}

#[test]
fn test_map_access_notations() {
    let test_cases = vec![
        "key1.key2.key3.key4.key5",
        "[key1][key2][key3][key4][key5]",
        "key1[key2].key3[key4][key5]",
        "key1['key2'].key3[\"key4\"][key5]",
        "$.key1.key2.key3.key4.key5",
    ];

    for path in test_cases {
        assert_eq!(get_ok(path), Value::Integer(123), "Failed for path: {}", path);
    }
}

#[test]
fn test_get_containers() {
    assert_eq!(get_ok("key1.key2.key3"), v(json!({"key4": {"key5": 123}})));
    assert_eq!(get_ok("key2.array"), v(json!([{"subkey": "val"}, 456, true])));
}

// ============================================================================
// Array Access
// ============================================================================

#[test]
fn test_array_access() {
    let test_cases = vec![
        ("key2.array[0].subkey", Value::from("val")),
        ("key2.array[0][subkey]", Value::from("val")),
        ("key2.array[0]['subkey']", Value::from("val")),
        ("key2.array[1]", Value::Integer(456)),
        ("key2.array[2]", Value::Boolean(true)),
        ("key2.array[-1]", Value::Boolean(true)),
        ("key2.array[-2]", Value::Integer(456)),
        ("key2.array[-3].subkey", Value::from("val")),
        ("$.key3['array'][2]", Value::from("val2")),
    ];

    for (path, expected) in test_cases {
        assert_eq!(get_ok(path), expected, "Failed for path: {}", path);
    }
}

#[test]
fn test_negative_index_scenario() {
    let doc = v(json!({"a": [1, 2, 3]}));
    assert_eq!(get(&doc, "a[-1]").unwrap(), Value::Integer(3));
}

// ============================================================================
// Multi-select and Ranges
// ============================================================================

#[test]
fn test_multi_select() {
    let test_cases = vec![
        ("key3.array[0,1,2]", vec!["val0", "val1", "val2"]),
        ("key3.array[0,2]", vec!["val0", "val2"]),
        ("key3.array[2,0]", vec!["val0", "val2"]),
        ("key3.map['key1','key3']", vec!["val1", "val3"]),
        ("key3.map['key3','key1']", vec!["val3", "val1"]),
        ("key3.map[ key1, 'key2', \"key3\" ]", vec!["val1", "val2", "val3"]),
        ("key3.map[key2,key2]", vec!["val2"]),
    ];

    for (path, expected) in test_cases {
        assert_eq!(get_ok(path), strings(&expected), "Failed for path: {}", path);
    }
}

#[test]
fn test_index_ranges() {
    let test_cases = vec![
        ("key3.array[0:5]", vec!["val0", "val1", "val2", "val3", "val4"]),
        ("key3.array[1:4]", vec!["val1", "val2", "val3"]),
        ("key3.array[2:3]", vec!["val2"]),
        ("key3.array[3:]", vec!["val3", "val4", "val5"]),
        ("key3.array[:4]", vec!["val0", "val1", "val2", "val3"]),
        ("key3.array[-2:]", vec!["val4", "val5"]),
        ("key3.array[-6:5]", vec!["val0", "val1", "val2", "val3", "val4"]),
        ("key3.array[1:-1]", vec!["val1", "val2", "val3", "val4"]),
        ("key4[0:2].key1", vec!["val1", "val2"]),
        ("key4[1:].key1", vec!["val2", "val3"]),
        ("key3.array[ 0, 1:4, 4:5 ]", vec!["val0", "val1", "val2", "val3", "val4"]),
        ("key3.array[ 1:3, 3:5 ]", vec!["val1", "val2", "val3", "val4"]),
    ];

    for (path, expected) in test_cases {
        assert_eq!(get_ok(path), strings(&expected), "Failed for path: {}", path);
    }
}

#[test]
fn test_single_element_range_is_still_a_sequence() {
    let path = compile("key3.array[2:3]").unwrap();
    assert!(path.has_multi());
    assert_eq!(path.get(&example()).unwrap(), strings(&["val2"]));
}

// ============================================================================
// Wildcards
// ============================================================================

#[test]
fn test_wildcards() {
    let all = vec!["val0", "val1", "val2", "val3", "val4", "val5"];
    let test_cases = vec![
        ("key3.array.*", all.clone()),
        ("key3.array[*]", all.clone()),
        ("key3.array[ * ]", all),
        ("key4.*.key1", vec!["val1", "val2", "val3"]),
        ("key3.map.*", vec!["val1", "val2", "val3"]),
        ("key3.map[*]", vec!["val1", "val2", "val3"]),
    ];

    for (path, expected) in test_cases {
        let expected: Vec<String> = expected.iter().map(|s| format!("\"{}\"", s)).collect();
        assert_eq!(sorted(get_ok(path)), expected, "Failed for path: {}", path);
    }
}

#[test]
fn test_wildcard_scenario() {
    let doc = v(json!({"a": {"x": 1, "y": 2}}));
    assert_eq!(sorted(get(&doc, "a.*").unwrap()), vec!["1", "2"]);
}

#[test]
fn test_wildcard_on_empty_container() {
    assert_eq!(get_ok("key5.empty_map.*"), v(json!([])));
    assert_eq!(get_ok("key5.empty_slice[*]"), v(json!([])));
}

// ============================================================================
// Key Formatting
// ============================================================================

#[test]
fn test_quoted_keys() {
    let test_cases = vec![
        ("key5['\"double\"']", "double"),
        ("key5[\"\\\"double\\\"\"]", "double"),
        ("key5[\"'single'\"]", "single"),
        ("key5['\\'single\\'']", "single"),
        ("key5[\"  spaces  \"]", "spaces"),
        ("key5['  spaces  ']", "spaces"),
        ("key5['][.,']", "specials"),
        ("key5[\"][.,\"]", "specials"),
    ];

    for (path, expected) in test_cases {
        assert_eq!(get_ok(path), Value::from(expected), "Failed for path: {}", path);
    }
}

// ============================================================================
// Recursive Descent
// ============================================================================

#[test]
fn test_recursive() {
    let test_cases = vec![
        ("key6..recursive", vec!["val1", "val2", "val3", "val4", "val5"]),
        ("key6['key7'].key9..recursive", vec!["val4", "val5"]),
        ("key6..key9[0,1].recursive", vec!["val4", "val5"]),
        ("key2..subkey", vec!["val"]),
        ("key7.arrays..[0]", vec!["val1", "val3", "val5"]),
        ("key7.arrays..[1]", vec!["val2", "val4", "val6"]),
        ("key7.arrays..[0,1]", vec!["val1", "val2", "val3", "val4", "val5", "val6"]),
        ("key6[key7].*..recursive", vec!["val3", "val4", "val5"]),
        ("key6..key9[0].recursive", vec!["val4"]),
        ("key6..key9[0:2].recursive", vec!["val4", "val5"]),
        ("key6.key7['key8','key9']..recursive", vec!["val3", "val4", "val5"]),
    ];

    for (path, expected) in test_cases {
        let expected: Vec<String> = expected.iter().map(|s| format!("\"{}\"", s)).collect();
        assert_eq!(sorted(get_ok(path)), expected, "Failed for path: {}", path);
    }
}

#[test]
fn test_recursive_nested_matches_deepest_first() {
    assert_eq!(
        pathkit::value_to_json(&get_ok("key7..recursive")),
        json!([true, {"recursive": true}, [{"recursive": {"recursive": true}}]])
    );
}

#[test]
fn test_recursive_is_scoped_to_the_current_node() {
    let doc = v(json!({"b": 1, "a": {"b": 2, "c": {"b": 3}}}));
    assert_eq!(sorted(get(&doc, "a..b").unwrap()), vec!["2", "3"]);
}

#[test]
fn test_recursive_skips_matches_the_rest_does_not_fit() {
    assert_eq!(
        get_ok("key7..recursive[0].recursive"),
        v(json!([{"recursive": true}]))
    );
}

#[test]
fn test_non_ascii_digit_entry_is_a_key() {
    let doc = v(json!({"\u{0661}": "one"}));
    assert_eq!(get(&doc, "[\u{0661}]").unwrap(), Value::from("one"));
}

#[test]
fn test_recursive_out_of_range_targets_do_not_match() {
    let doc = v(json!({"a": [[1], [1, 2]]}));
    assert_eq!(get(&doc, "a..[1]").unwrap(), v(json!([2, [1, 2]])));
}

// ============================================================================
// Other Values
// ============================================================================

#[test]
fn test_other_values() {
    let test_cases = vec![
        ("$.key5.null_value", Value::Null),
        ("$.key5.empty_slice", v(json!([]))),
        ("$.key5.empty_map", v(json!({}))),
        ("$.key5.int", Value::Integer(123)),
        ("$.key5.float", Value::Float(1.23)),
    ];

    for (path, expected) in test_cases {
        assert_eq!(get_ok(path), expected, "Failed for path: {}", path);
    }
}

#[test]
fn test_get_all_matches_get_for_multi_paths() {
    let path = compile("key4.*.key1").unwrap();
    let doc = example();
    assert_eq!(
        Value::from(path.get_all(&doc).unwrap()),
        path.get(&doc).unwrap()
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_get_errors() {
    let test_cases = vec![
        ("none", "key does not exist (none)"),
        ("key1.key2.key3.key99", "key does not exist"),
        ("key2.array[0].missing", "key does not exist"),
        ("key2.array[3]", "index out of range"),
        ("key2.array[3].missing", "index out of range"),
        ("key3.array[-10]", "index out of range"),
        ("key3.array[0:10]", "index out of range"),
        ("key3.array[4:2]", "indexes out of range"),
        ("key3.array[:0]", "indexes out of range"),
        ("key3.map[0]", "cannot access map with an index"),
        ("key3.array.key", "cannot access array with a key"),
        ("key1.key2.key3.key4.key5.key6", "path not found"),
        ("key1..missing", "path not found"),
        ("key6..recursive.missing", "path not found"),
        ("..missing", "path not found"),
        ("key5.null_value.key", "path not found"),
        ("key5.empty_slice[0]", "index out of range"),
        ("key3.array[:-9223372036854775808]", "index out of range"),
        ("key3.array[-9223372036854775808]", "index out of range"),
    ];

    for (path, message) in test_cases {
        assert_not_found(get(&example(), path), message);
    }
}

#[test]
fn test_out_of_range_scenario() {
    let doc = v(json!({"a": [1, 2, 3]}));
    assert_not_found(get(&doc, "a[5]"), "index out of range");
}

#[test]
fn test_errors_carry_the_path() {
    let err = get(&example(), "key3.map[0]").unwrap_err();
    assert_eq!(err.path(), "key3.map[0]");
    assert_eq!(err.message(), "cannot access map with an index");
}

#[test]
fn test_invalid_path_is_reported_by_get() {
    let err = get(&example(), "key1..").unwrap_err();
    assert!(!err.is_not_found());
}
