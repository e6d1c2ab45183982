//! JSON rendering of parse trees.
//!
//! Each node becomes an object with its `category` and current `text`; composite
//! nodes add their `children`. Rewritten nodes are marked with
//! `"rewritten": true`.
//!
//! # Examples
//!
//! ```
//! use cql_template::{output::to_json, parse};
//!
//! let root = parse("SELECT a").unwrap();
//! let json = to_json(&root);
//! assert_eq!(json["category"], "statement");
//! assert_eq!(json["text"], "SELECT a");
//! ```

use serde_json::{Map, Value, json};

use crate::ast::Node;

pub fn to_json(node: &Node<'_>) -> Value {
    let mut object = Map::new();
    object.insert("category".to_string(), json!(node.category().name()));
    object.insert("text".to_string(), json!(node.text()));
    if node.is_rewritten() {
        object.insert("rewritten".to_string(), json!(true));
    }
    if !node.is_leaf() {
        let children = node.children().iter().map(to_json).collect();
        object.insert("children".to_string(), Value::Array(children));
    }
    Value::Object(object)
}

/// Serialized tree, compact or indented with two spaces.
pub fn to_json_string(node: &Node<'_>, pretty: bool) -> serde_json::Result<String> {
    let value = to_json(node);
    if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
}
