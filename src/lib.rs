//! Concrete-syntax parsing and placeholder rewriting for a Cassandra-style
//! query dialect.
//!
//! ```
//! use cql_template::{parse, transform};
//!
//! let mut root = parse("SELECT name FROM users WHERE id = ? AND name = ?").unwrap();
//! transform::bind(&mut root, [cql_template::BindValue::from(7), "o'brien".into()]).unwrap();
//! assert_eq!(
//!     root.to_string(),
//!     "SELECT name FROM users WHERE id = 7 AND name = 'o''brien'"
//! );
//! ```
pub mod ast;
pub mod cli;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod transform;
pub mod value;

pub use ast::{Category, Node};
pub use lexer::{Lexer, Recognized};
pub use output::{to_json, to_json_string};
pub use parser::{ParseError, Parser, ParserOptions, parse};
pub use transform::{TransformError, bind, count, find, replace, replace_all, replace_with};
pub use value::BindValue;
