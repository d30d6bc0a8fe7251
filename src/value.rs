use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;

/// A node in a value tree that paths are evaluated against.
///
/// Dynamic documents (decoded JSON and friends) only ever use the scalar
/// variants plus untyped [`Array`]s and [`Object`]s. Typed record graphs add
/// [`Record`]s, [`Reference`]s and containers with a fixed element type, which
/// `set` checks before installing a value.
///
/// # Examples
///
/// ```
/// use pathkit::value::{Array, Object, Value, ValueType};
///
/// // Dynamic containers accept anything
/// let doc = Value::Object(
///     Object::new()
///         .with("name", Value::from("widget"))
///         .with("tags", Value::Array(Array::new(vec![Value::from("a")]))),
/// );
///
/// // A typed sequence only takes integers
/// let ints = Value::Array(Array::typed(ValueType::Integer, vec![Value::from(1)]));
/// assert_eq!(ints.value_type().to_string(), "[]int");
/// # let _ = doc;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),

    /// Ordered, index addressable, growable sequence
    Array(Array),

    /// String keyed container
    Object(Object),

    /// Fixed shape record with named fields
    Record(Record),

    /// Optional / boxed indirection, resolved transparently during traversal
    Reference(Reference),
}

impl Value {
    /// The static type of this value as seen by a typed slot.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Integer(_) => ValueType::Integer,
            Value::Float(_) => ValueType::Float,
            Value::String(_) => ValueType::String,
            Value::Array(arr) => ValueType::Array(Box::new(arr.elem.clone())),
            Value::Object(obj) => ValueType::Object(Box::new(obj.elem.clone())),
            Value::Record(rec) => ValueType::Record(rec.name.clone()),
            Value::Reference(r) => ValueType::Reference(Box::new(r.target.clone())),
        }
    }

    /// Follows references until a non-reference value is reached.
    ///
    /// An unset reference resolves to `None`, i.e. "does not exist".
    pub fn resolve(&self) -> Option<&Value> {
        match self {
            Value::Reference(r) => r.value.as_deref().and_then(Value::resolve),
            other => Some(other),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Array::new(items))
    }
}

/// Element type of a container slot.
///
/// `Any` marks a fully dynamic slot. Every other variant requires the
/// installed value to have exactly that type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    Any,
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Array(Box<ValueType>),
    Object(Box<ValueType>),
    /// Record with the given type name
    Record(String),
    Reference(Box<ValueType>),
}

impl ValueType {
    pub fn array_of(elem: ValueType) -> Self {
        ValueType::Array(Box::new(elem))
    }

    pub fn object_of(elem: ValueType) -> Self {
        ValueType::Object(Box::new(elem))
    }

    pub fn reference_to(target: ValueType) -> Self {
        ValueType::Reference(Box::new(target))
    }

    /// Whether `value` may be stored in a slot of this type.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (ValueType::Any, _) => true,
            (ValueType::Reference(_), Value::Null) => true,
            (slot, value) => *slot == value.value_type(),
        }
    }

    /// The value a fresh slot of this type holds.
    ///
    /// Records have no zero value without a schema, so they start out as
    /// `Null` like dynamic slots do.
    pub fn zero(&self) -> Value {
        match self {
            ValueType::Any | ValueType::Null | ValueType::Record(_) => Value::Null,
            ValueType::Boolean => Value::Boolean(false),
            ValueType::Integer => Value::Integer(0),
            ValueType::Float => Value::Float(0.0),
            ValueType::String => Value::String(String::new()),
            ValueType::Array(elem) => Value::Array(Array::typed((**elem).clone(), Vec::new())),
            ValueType::Object(elem) => Value::Object(Object::typed((**elem).clone())),
            ValueType::Reference(target) => Value::Reference(Reference::null((**target).clone())),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Any => write!(f, "any"),
            ValueType::Null => write!(f, "null"),
            ValueType::Boolean => write!(f, "bool"),
            ValueType::Integer => write!(f, "int"),
            ValueType::Float => write!(f, "float"),
            ValueType::String => write!(f, "string"),
            ValueType::Array(elem) => write!(f, "[]{}", elem),
            ValueType::Object(elem) => write!(f, "map[string]{}", elem),
            ValueType::Record(name) => write!(f, "{}", name),
            ValueType::Reference(target) => write!(f, "*{}", target),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    pub elem: ValueType,
    pub items: Vec<Value>,
}

impl Array {
    /// Dynamic sequence
    pub fn new(items: Vec<Value>) -> Self {
        Array {
            elem: ValueType::Any,
            items,
        }
    }

    pub fn typed(elem: ValueType, items: Vec<Value>) -> Self {
        Array { elem, items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub elem: ValueType,
    pub entries: IndexMap<String, Value>,
}

impl Object {
    /// Empty dynamic object
    pub fn new() -> Self {
        Object::typed(ValueType::Any)
    }

    pub fn typed(elem: ValueType) -> Self {
        Object {
            elem,
            entries: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Object {
    fn default() -> Self {
        Object::new()
    }
}

/// Fixed shape record. Fields can be looked up by name or through an alias
/// table selected with [`Options::field_tag`](crate::Options::field_tag).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub fields: Vec<Field>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Record {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Looks a field up by its alias in `tag`, or by name when no tag is given.
    pub fn position(&self, key: &str, tag: Option<&str>) -> Option<usize> {
        self.fields.iter().position(|f| f.address(tag) == Some(key))
    }

    pub fn field(&self, key: &str, tag: Option<&str>) -> Option<&Field> {
        self.position(key, tag).map(|i| &self.fields[i])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: ValueType,
    pub value: Value,
    /// Alias table name -> alias of this field
    pub tags: HashMap<String, String>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: ValueType, value: Value) -> Self {
        Field {
            name: name.into(),
            ty,
            value,
            tags: HashMap::new(),
        }
    }

    pub fn tag(mut self, table: impl Into<String>, alias: impl Into<String>) -> Self {
        self.tags.insert(table.into(), alias.into());
        self
    }

    /// The name a path uses to reach this field, if it is reachable at all.
    pub fn address(&self, tag: Option<&str>) -> Option<&str> {
        match tag {
            Some(table) => self.tags.get(table).map(String::as_str),
            None => Some(&self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub target: ValueType,
    pub value: Option<Box<Value>>,
}

impl Reference {
    pub fn to(target: ValueType, value: Value) -> Self {
        Reference {
            target,
            value: Some(Box::new(value)),
        }
    }

    /// Unset reference
    pub fn null(target: ValueType) -> Self {
        Reference {
            target,
            value: None,
        }
    }
}
