//! Counting, locating and rewriting nodes of a parse tree.
//!
//! Rewrites select nodes by category and position. Positions are counted in
//! document order over the nodes that are still *eligible*: nodes of the
//! category that have not been rewritten and do not sit inside a rewritten
//! subtree. The count is taken afresh on every call, so calling
//! [`replace`] with index `0` repeatedly fills placeholders left to right.
//!
//! # Examples
//!
//! ```
//! use cql_template::{parse, transform, Category};
//!
//! let mut root = parse("INSERT INTO test (age,year,day) VALUES (?,?,?)").unwrap();
//! transform::replace(&mut root, Category::PlaceholderInject, 5, 2).unwrap();
//! transform::replace(&mut root, Category::PlaceholderInject, 2016, 1).unwrap();
//! transform::replace(&mut root, Category::PlaceholderInject, 33, 0).unwrap();
//! assert_eq!(root.to_string(), "INSERT INTO test (age,year,day) VALUES (33,2016,5)");
//! ```

use thiserror::Error;
use tracing::debug;

use crate::{
    ast::{Category, Node},
    value::BindValue,
};

/// A rewrite that could not be applied. The tree is left as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// No eligible node of the category remains
    #[error("no {category} left to rewrite")]
    NoMatch { category: Category },

    /// The index is past the eligible nodes of the category
    #[error("index {index} out of range: only {available} {category} left to rewrite")]
    IndexOutOfRange {
        category: Category,
        index: usize,
        available: usize,
    },

    /// Fewer values than placeholders were supplied to [`bind`]
    #[error("{expected} placeholder(s) to bind but only {supplied} value(s) supplied")]
    TooFewValues { expected: usize, supplied: usize },

    /// More values than placeholders were supplied to [`bind`]
    #[error("{supplied} value(s) supplied for only {expected} placeholder(s)")]
    TooManyValues { expected: usize, supplied: usize },
}

/// Number of nodes currently tagged with `category`, anywhere in the tree.
pub fn count(root: &Node<'_>, category: Category) -> usize {
    root.descendants()
        .filter(|node| node.category() == category)
        .count()
}

/// The `index`-th node tagged with `category`, in document order.
pub fn find<'n, 'a>(root: &'n Node<'a>, category: Category, index: usize) -> Option<&'n Node<'a>> {
    root.descendants()
        .filter(|node| node.category() == category)
        .nth(index)
}

/// Every node tagged with `category`, in document order.
pub fn nodes<'n, 'a>(root: &'n Node<'a>, category: Category) -> Vec<&'n Node<'a>> {
    root.descendants()
        .filter(|node| node.category() == category)
        .collect()
}

/// Number of nodes of `category` that a rewrite could still select.
pub fn remaining(root: &Node<'_>, category: Category) -> usize {
    if root.is_rewritten() {
        return 0;
    }
    let own = usize::from(root.category() == category);
    own + root
        .children()
        .iter()
        .map(|child| remaining(child, category))
        .sum::<usize>()
}

fn select<'n, 'a>(node: &'n mut Node<'a>, category: Category, skip: &mut usize) -> Option<&'n mut Node<'a>> {
    if node.is_rewritten() {
        return None;
    }
    if node.category() == category {
        if *skip == 0 {
            return Some(node);
        }
        *skip -= 1;
    }
    node.children_mut()
        .iter_mut()
        .find_map(|child| select(child, category, &mut *skip))
}

fn select_eligible<'n, 'a>(
    root: &'n mut Node<'a>,
    category: Category,
    index: usize,
) -> Result<&'n mut Node<'a>, TransformError> {
    let available = remaining(root, category);
    if available == 0 {
        return Err(TransformError::NoMatch { category });
    }
    let mut skip = index;
    select(root, category, &mut skip).ok_or(TransformError::IndexOutOfRange {
        category,
        index,
        available,
    })
}

/// Replaces the `index`-th eligible node of `category` with the literal text
/// of `value`. The node becomes a [`Category::Literal`].
pub fn replace(
    root: &mut Node<'_>,
    category: Category,
    value: impl Into<BindValue>,
    index: usize,
) -> Result<(), TransformError> {
    let value = value.into();
    let node = select_eligible(root, category, index)?;
    let literal = value.to_literal();
    debug!(%category, index, %literal, "replacing node");
    node.rewrite(literal);
    node.set_category(Category::Literal);
    Ok(())
}

/// Rewrites the `index`-th eligible node of `category` in place with
/// `mutator`, which receives the node's current text. The category is kept.
///
/// ```
/// use cql_template::{parse, transform, Category};
///
/// let mut root = parse("SELECT name FROM users").unwrap();
/// transform::replace_with(&mut root, Category::TableName, 0, |text| {
///     text.insert_str(0, "ks.");
/// })
/// .unwrap();
/// assert_eq!(root.to_string(), "SELECT name FROM ks.users");
/// ```
pub fn replace_with(
    root: &mut Node<'_>,
    category: Category,
    index: usize,
    mutator: impl FnOnce(&mut String),
) -> Result<(), TransformError> {
    let node = select_eligible(root, category, index)?;
    let mut text = node.text().into_owned();
    mutator(&mut text);
    debug!(%category, index, %text, "rewriting node");
    node.rewrite(text);
    Ok(())
}

/// Applies `mutator` to every eligible node of `category` in document order
/// and returns how many were rewritten.
pub fn replace_all(
    root: &mut Node<'_>,
    category: Category,
    mut mutator: impl FnMut(&mut String),
) -> Result<usize, TransformError> {
    fn apply(node: &mut Node<'_>, category: Category, mutator: &mut dyn FnMut(&mut String)) -> usize {
        if node.is_rewritten() {
            return 0;
        }
        if node.category() == category {
            let mut text = node.text().into_owned();
            mutator(&mut text);
            node.rewrite(text);
            return 1;
        }
        node.children_mut()
            .iter_mut()
            .map(|child| apply(child, category, &mut *mutator))
            .sum()
    }

    let rewritten = apply(root, category, &mut mutator);
    if rewritten == 0 {
        return Err(TransformError::NoMatch { category });
    }
    debug!(%category, rewritten, "rewrote all nodes");
    Ok(rewritten)
}

/// Binds `values` to the remaining placeholders, left to right.
///
/// The number of values must equal the number of placeholders left; otherwise
/// nothing is bound.
pub fn bind<I>(root: &mut Node<'_>, values: I) -> Result<usize, TransformError>
where
    I: IntoIterator,
    I::Item: Into<BindValue>,
{
    let values: Vec<BindValue> = values.into_iter().map(Into::into).collect();
    let expected = remaining(root, Category::PlaceholderInject);
    let supplied = values.len();
    if supplied < expected {
        return Err(TransformError::TooFewValues { expected, supplied });
    }
    if supplied > expected {
        return Err(TransformError::TooManyValues { expected, supplied });
    }
    for value in values {
        replace(root, Category::PlaceholderInject, value, 0)?;
    }
    Ok(expected)
}
