//! # Concrete Syntax Tree
//!
//! Parse trees produced by [`crate::parser`] keep every byte of the source,
//! whitespace included. A tree is meant to be edited and written back out, not
//! evaluated: the mutation engine in [`crate::transform`] rewrites nodes in
//! place and the root's text is the final statement.
//!
//! - **[category]** - the closed set of grammar symbols a node can carry
//! - **[node]** - the tree element itself
//!
//! ## Shape of a tree
//!
//! ```text
//! INSERT INTO test (age) VALUES (?)
//! ```
//!
//! parses to
//!
//! ```text
//! statement
//! └── command
//!     ├── reserved-word-sequence      "INSERT INTO"
//!     ├── whitespace                  " "
//!     ├── table-name                  "test"
//!     ├── whitespace                  " "
//!     ├── symbol                      "("
//!     ├── field-name                  "age"
//!     ├── symbol                      ")"
//!     ├── whitespace                  " "
//!     └── command
//!         ├── reserved-word-sequence  "VALUES"
//!         ├── whitespace              " "
//!         ├── symbol                  "("
//!         ├── selector-item
//!         │   └── placeholder-inject  "?"
//!         └── symbol                  ")"
//! ```
//!
//! ## Invariants
//!
//! - `matched + residual` of a node is the input its recognizer was given.
//! - As parsed, a composite node's `matched` is the concatenation of its
//!   children's `matched`; after mutation the same holds for [`Node::text`].
//! - Mutation changes categories and text, never structure.
pub mod category;
pub mod node;

pub use category::{Category, UnknownCategory};
pub use node::{Descendants, Node};
pub(crate) use node::Production;
