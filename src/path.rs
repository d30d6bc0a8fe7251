use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::{
    ast::Segment,
    error::PathError,
    evaluator::{Evaluator, Step},
    options::Options,
    parser::Parser,
    value::{Array, Value, ValueType},
};

/// A parsed path, ready to be evaluated against any number of roots.
///
/// Compiling is the only step that can report
/// [`InvalidPath`](crate::PathError::InvalidPath); the compiled form never
/// changes afterwards, so it can be shared freely.
///
/// # Examples
///
/// ```
/// use pathkit::{compile, Value};
/// use serde_json::json;
///
/// let path = compile("a.b[0].c").unwrap();
/// let mut doc = Value::from(json!({}));
/// path.set(&mut doc, Value::from("x")).unwrap();
///
/// assert_eq!(doc, Value::from(json!({"a": {"b": [{"c": "x"}]}})));
/// assert_eq!(path.get(&doc).unwrap(), Value::from("x"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPath {
    source: String,
    segments: Vec<Segment>,
    has_multi: bool,
    options: Options,
}

impl CompiledPath {
    pub fn compile(path: &str, options: Options) -> Result<Self, PathError> {
        let segments = Parser::parse(path)?;
        let has_multi = segments.iter().any(|s| s.multi);
        debug!(path, segments = segments.len(), has_multi, "compiled path");
        Ok(CompiledPath {
            source: path.to_string(),
            segments,
            has_multi,
            options,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether any segment can fan out. Such paths always `get` an array.
    pub fn has_multi(&self) -> bool {
        self.has_multi
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(&self.source, &self.options)
    }

    /// Reads the value this path points at.
    ///
    /// A path without wildcards, ranges, multi-selects or `..` returns the
    /// value itself; every other path returns an array of matches.
    pub fn get(&self, root: &Value) -> Result<Value, PathError> {
        let mut values = self.get_all(root)?;
        if !self.has_multi
            && values.len() == 1
            && let Some(value) = values.pop()
        {
            return Ok(value);
        }
        Ok(Value::Array(Array::new(values)))
    }

    /// Reads every match, in traversal order.
    ///
    /// Overlapping `..` matches are all reported, so a value nested inside
    /// another match can show up more than once.
    pub fn get_all(&self, root: &Value) -> Result<Vec<Value>, PathError> {
        match self.evaluator().get(root, &self.segments) {
            Step::Done(values) => Ok(values),
            Step::Miss => Err(PathError::not_found("path not found", &self.source)),
            Step::Fail(err) => Err(err),
        }
    }

    /// Writes `value` at every location this path selects, creating missing
    /// structure unless the options forbid it.
    ///
    /// The tree is modified in place. When an error is returned, containers
    /// created or grown before the failing step may remain.
    ///
    /// Lenient mode pads arrays with zero values up to the highest position
    /// written, however large. A position too large to allocate is reported as
    /// "index out of range", but a wide range such as `[0:99999999999]` can
    /// still exhaust memory; use [`Options::strict_slices`] on untrusted paths.
    pub fn set(&self, root: &mut Value, value: Value) -> Result<(), PathError> {
        match self
            .evaluator()
            .set(root, &ValueType::Any, &self.segments, &value)
        {
            Step::Done(_) => Ok(()),
            Step::Miss => Err(PathError::not_found("path not found", &self.source)),
            Step::Fail(err) => Err(err),
        }
    }
}

impl fmt::Display for CompiledPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl FromStr for CompiledPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CompiledPath::compile(s, Options::default())
    }
}

/// Compiles `path` with default (lenient) options.
pub fn compile(path: &str) -> Result<CompiledPath, PathError> {
    CompiledPath::compile(path, Options::default())
}

pub fn compile_with(path: &str, options: Options) -> Result<CompiledPath, PathError> {
    CompiledPath::compile(path, options)
}

/// One-shot read; compiles `path` on every call.
pub fn get(root: &Value, path: &str) -> Result<Value, PathError> {
    compile(path)?.get(root)
}

/// One-shot write; compiles `path` on every call.
pub fn set(root: &mut Value, path: &str, value: Value) -> Result<(), PathError> {
    compile(path)?.set(root, value)
}
