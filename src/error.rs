//! Error types for path compilation and evaluation.

use thiserror::Error;

/// Broad category of a [`PathError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The path string is malformed. Only produced while compiling.
    InvalidPath,
    /// The path is well formed but cannot be resolved or written against the data.
    NotFound,
}

/// Errors returned by [`compile`](crate::compile), [`CompiledPath::get`](crate::CompiledPath::get)
/// and [`CompiledPath::set`](crate::CompiledPath::set).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("invalid path: {message}: {path}")]
    InvalidPath { message: String, path: String },

    #[error("not found: {message}: {path}")]
    NotFound { message: String, path: String },
}

impl PathError {
    pub(crate) fn invalid(message: impl Into<String>, path: &str) -> Self {
        PathError::InvalidPath {
            message: message.into(),
            path: path.to_string(),
        }
    }

    pub(crate) fn not_found(message: impl Into<String>, path: &str) -> Self {
        PathError::NotFound {
            message: message.into(),
            path: path.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PathError::InvalidPath { .. } => ErrorKind::InvalidPath,
            PathError::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    /// The reason without the path suffix, e.g. `key does not exist (name)`.
    pub fn message(&self) -> &str {
        match self {
            PathError::InvalidPath { message, .. } | PathError::NotFound { message, .. } => message,
        }
    }

    /// The raw path string the error was raised for.
    pub fn path(&self) -> &str {
        match self {
            PathError::InvalidPath { path, .. } | PathError::NotFound { path, .. } => path,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
