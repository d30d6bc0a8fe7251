//! # Compiled path structure
//!
//! A path such as `$.store..book[0, -1:].title` compiles into an ordered list
//! of [`Segment`]s. Each segment carries exactly one [`Selector`] plus an
//! independent recursive flag:
//!
//! | Text              | Selector                      | recursive | multi |
//! |-------------------|-------------------------------|-----------|-------|
//! | `.name`           | `Keys(["name"])`              | no        | no    |
//! | `['a', "b"]`      | `Keys(["a", "b"])`            | no        | yes   |
//! | `[2]`             | `Indexes([Index(2)])`         | no        | no    |
//! | `[0, 3:]`         | `Indexes([Index(0), Range])`  | no        | yes   |
//! | `.*` / `[*]`      | `Wildcard`                    | no        | yes   |
//! | `..name`          | `Keys(["name"])`              | yes       | yes   |
//! | `..[0]`           | `Indexes([Index(0)])`         | yes       | yes   |

use std::fmt;

/// One index entry of a bracket segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSpec {
    /// `[n]`, negative values count from the end
    Index(i64),
    /// `[start:end]`, end exclusive, either bound optional
    Range { start: Option<i64>, end: Option<i64> },
}

impl fmt::Display for IndexSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexSpec::Index(i) => write!(f, "{}", i),
            IndexSpec::Range { start, end } => {
                if let Some(s) = start {
                    write!(f, "{}", s)?;
                }
                write!(f, ":")?;
                if let Some(e) = end {
                    write!(f, "{}", e)?;
                }
                Ok(())
            }
        }
    }
}

/// What a segment selects from the current node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Object keys or record fields
    Keys(Vec<String>),
    /// Array positions
    Indexes(Vec<IndexSpec>),
    /// Every child
    Wildcard,
}

/// One step of a compiled path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Source text of the segment, used in diagnostics
    pub raw: String,
    pub selector: Selector,
    /// `..` prefix: match at any depth below the current node
    pub recursive: bool,
    /// Whether this step can produce more than one value
    pub multi: bool,
}

impl Segment {
    pub fn new(raw: impl Into<String>, selector: Selector, recursive: bool) -> Self {
        let multi = recursive
            || match &selector {
                Selector::Wildcard => true,
                Selector::Keys(keys) => keys.len() > 1,
                Selector::Indexes(specs) => {
                    specs.len() > 1 || specs.iter().any(|s| matches!(s, IndexSpec::Range { .. }))
                }
            };
        Segment {
            raw: raw.into(),
            selector,
            recursive,
            multi,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self.selector, Selector::Wildcard)
    }

    /// Whether `key` is one of the keys this segment names explicitly.
    pub fn names_key(&self, key: &str) -> bool {
        match &self.selector {
            Selector::Keys(keys) => keys.iter().any(|k| k == key),
            _ => false,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.recursive {
            write!(f, "..")?;
        }
        write!(f, "{}", self.raw)
    }
}
