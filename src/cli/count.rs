//! Count nodes of one category

use super::CliError;
use crate::{Category, Parser, ParserOptions, transform};

/// Options for the count command
#[derive(Debug, Clone, Default)]
pub struct CountOptions {
    pub query: String,
    /// Category name as accepted by [`Category::from_str`](std::str::FromStr),
    /// e.g. `placeholder-inject` or `table_name`
    pub category: String,
    pub parser: ParserOptions,
}

pub fn execute_count(options: &CountOptions) -> Result<usize, CliError> {
    let category: Category = options.category.parse()?;
    let root = Parser::with_options(&options.query, options.parser).parse()?;
    Ok(transform::count(&root, category))
}
