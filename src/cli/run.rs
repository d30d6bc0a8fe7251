//! Execute a path query or update against JSON input

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::debug;

use super::CliError;
use crate::{Options, Value, compile_with, json_to_value, value_to_json};

/// Options for a single invocation
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// The path expression
    pub query: String,
    /// JSON document given inline
    pub data: Option<String>,
    /// JSON document read from a file when no inline data is given
    pub file: Option<PathBuf>,
    /// Value to write; parsed as JSON, falling back to a plain string
    pub set: Option<String>,
    /// Fail instead of creating missing structure
    pub strict: bool,
}

/// Runs the query and returns the JSON to print: the selected value(s) for a
/// read, or the whole updated document for `set`.
pub fn execute(options: &RunOptions) -> Result<serde_json::Value, CliError> {
    let input = match (&options.data, &options.file) {
        (Some(data), _) => data.clone(),
        (None, Some(file)) => fs::read_to_string(file)?,
        (None, None) => return Err(CliError::NoInput),
    };

    let mut root = json_to_value(serde_json::from_str(&input)?);

    let path_options = if options.strict {
        Options::new().strict()
    } else {
        Options::new()
    };
    let path = compile_with(&options.query, path_options)?;

    match &options.set {
        Some(raw) => {
            let value = serde_json::from_str::<serde_json::Value>(raw)
                .map(json_to_value)
                .unwrap_or_else(|_| Value::String(raw.clone()));
            debug!(path = %path, "setting value");
            path.set(&mut root, value)?;
            Ok(value_to_json(&root))
        }
        None => Ok(value_to_json(&path.get(&root)?)),
    }
}

/// Serializes `value` compactly, or pretty-printed with `indent` spaces.
pub fn render(value: &serde_json::Value, indent: usize) -> Result<String, CliError> {
    if indent == 0 {
        return Ok(serde_json::to_string(value)?);
    }

    let pad = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(pad.as_bytes()));
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| CliError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}
