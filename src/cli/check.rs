//! Validate a statement without rewriting it

use super::CliError;
use crate::{Category, Parser, ParserOptions, transform};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The statement to validate
    pub query: String,
    /// Parser settings
    pub parser: ParserOptions,
}

/// Parses the statement and reports the number of placeholders it carries.
pub fn execute_check(options: &CheckOptions) -> Result<usize, CliError> {
    let root = Parser::with_options(&options.query, options.parser).parse()?;
    Ok(transform::remaining(&root, Category::PlaceholderInject))
}
