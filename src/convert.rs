//! JSON <-> pathkit Value conversion utilities

use crate::value::{Array, Object, Value};

/// Convert serde_json::Value to a dynamic Value tree
pub fn json_to_value(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
        },
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => {
            Value::Array(Array::new(arr.into_iter().map(json_to_value).collect()))
        }
        serde_json::Value::Object(obj) => Value::Object(Object {
            entries: obj.into_iter().map(|(k, v)| (k, json_to_value(v))).collect(),
            ..Object::new()
        }),
    }
}

/// Convert a Value tree to serde_json::Value
///
/// Records become objects keyed by field name and unset references become
/// `null`.
pub fn value_to_json(v: &Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(arr) => serde_json::Value::Array(arr.items.iter().map(value_to_json).collect()),
        Value::Object(obj) => serde_json::Value::Object(
            obj.entries
                .iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect(),
        ),
        Value::Record(rec) => serde_json::Value::Object(
            rec.fields
                .iter()
                .map(|f| (f.name.clone(), value_to_json(&f.value)))
                .collect(),
        ),
        Value::Reference(r) => r
            .value
            .as_deref()
            .map(value_to_json)
            .unwrap_or(serde_json::Value::Null),
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        json_to_value(v)
    }
}

impl From<&Value> for serde_json::Value {
    fn from(v: &Value) -> Self {
        value_to_json(v)
    }
}
