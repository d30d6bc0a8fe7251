//! CLI support for pathkit
//!
//! Provides programmatic access to the `pathkit` command so the binary stays a
//! thin argument parser.

mod run;

pub use run::{RunOptions, execute, render};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Compiling or evaluating the path failed
    #[error("{0}")]
    Path(#[from] crate::PathError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("no JSON input provided")]
    NoInput,
}
