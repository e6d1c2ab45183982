//! CLI support for cql-template
//!
//! Each subcommand of `cqlt` is a plain function here so it can be driven
//! without the binary.

mod bind;
mod check;
mod count;
mod tree;

pub use bind::{BindOptions, execute_bind, parse_value};
pub use check::{CheckOptions, execute_check};
pub use count::{CountOptions, execute_count};
pub use tree::{TreeOptions, execute_tree};

use std::io;

use thiserror::Error;

use crate::{ParseError, TransformError, ast::UnknownCategory};

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Rewrite error: {0}")]
    Transform(#[from] TransformError),

    #[error("{0}")]
    Category(#[from] UnknownCategory),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No query provided. Pass it as an argument or pipe it to stdin.")]
    NoQuery,
}
