//! Compile path expressions such as `$.store..book[0, -2:].title` and use them
//! to read or write values nested inside dynamic documents and typed record
//! graphs.
//!
//! ```
//! use pathkit::{Value, get, set};
//! use serde_json::json;
//!
//! let mut doc = Value::from(json!({"a": [1, 2, 3]}));
//! assert_eq!(get(&doc, "a[-1]").unwrap(), Value::Integer(3));
//!
//! set(&mut doc, "a[4]", Value::from("x")).unwrap();
//! assert_eq!(doc, Value::from(json!({"a": [1, 2, 3, null, "x"]})));
//! ```
pub mod ast;
pub mod cli;
pub mod convert;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod path;
pub mod resolver;
pub mod value;

pub use ast::{IndexSpec, Segment, Selector};
pub use convert::{json_to_value, value_to_json};
pub use error::{ErrorKind, PathError};
pub use lexer::{Lexer, RawSegment};
pub use options::Options;
pub use parser::Parser;
pub use path::{CompiledPath, compile, compile_with, get, set};
pub use value::{Array, Field, Object, Record, Reference, Value, ValueType};
