//! Dump the parse tree as JSON

use super::CliError;
use crate::{Parser, ParserOptions, output};

/// Options for the tree command
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    pub query: String,
    pub pretty: bool,
    pub parser: ParserOptions,
}

pub fn execute_tree(options: &TreeOptions) -> Result<String, CliError> {
    let root = Parser::with_options(&options.query, options.parser).parse()?;
    Ok(output::to_json_string(&root, options.pretty)?)
}
