use std::borrow::Cow;
use std::fmt;

use crate::ast::Category;

/// Element of a concrete parse tree.
///
/// A node borrows the text it matched and the residual text that followed it
/// from the parsed source, so `matched + residual` is exactly the input the
/// node's recognizer was given. Composite nodes own their children in
/// derivation order; the text of a composite node is always the concatenation
/// of its children's text.
///
/// # Order links
///
/// Nodes produced within one flat production (the words of a reserved-word
/// sequence, the items of a command) are linked to their immediate neighbours
/// through [`Node::order_prev`] and [`Node::order_next`]. The links are indices
/// into the parent's children, never references, so the parent stays the only
/// owner.
///
/// # Materialized text
///
/// The mutation engine may rewrite a node. Nothing is cached above the
/// rewritten node: [`Node::text`] folds over the children at read time, so the
/// root always reflects every rewrite made below it.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<'a> {
    category: Category,
    matched: &'a str,
    residual: &'a str,
    children: Vec<Node<'a>>,
    order_prev: Option<usize>,
    order_next: Option<usize>,
    rewritten: Option<String>,
}

impl<'a> Node<'a> {
    /// Leaf matching the first `len` bytes of `input`.
    pub fn leaf(category: Category, input: &'a str, len: usize) -> Self {
        let (matched, residual) = input.split_at(len);
        Node {
            category,
            matched,
            residual,
            children: Vec::new(),
            order_prev: None,
            order_next: None,
            rewritten: None,
        }
    }

    /// Composite node over `input` whose match ends where `residual` begins.
    ///
    /// `residual` must be a suffix of `input`.
    pub fn composite(
        category: Category,
        input: &'a str,
        residual: &'a str,
        children: Vec<Node<'a>>,
    ) -> Self {
        let consumed = input.len() - residual.len();
        Node {
            category,
            matched: &input[..consumed],
            residual,
            children,
            order_prev: None,
            order_next: None,
            rewritten: None,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Source text this node consumed when it was parsed.
    pub fn matched(&self) -> &'a str {
        self.matched
    }

    /// Source text left over after this node's match.
    pub fn residual(&self) -> &'a str {
        self.residual
    }

    pub fn children(&self) -> &[Node<'a>] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether the mutation engine has rewritten this node.
    pub fn is_rewritten(&self) -> bool {
        self.rewritten.is_some()
    }

    /// Index of the preceding node in the parent's production sequence.
    pub fn order_prev(&self) -> Option<usize> {
        self.order_prev
    }

    /// Index of the following node in the parent's production sequence.
    pub fn order_next(&self) -> Option<usize> {
        self.order_next
    }

    /// Follows the order link of the child at `index` forwards.
    pub fn next_in_order(&self, index: usize) -> Option<&Node<'a>> {
        let next = self.children.get(index)?.order_next?;
        self.children.get(next)
    }

    /// Follows the order link of the child at `index` backwards.
    pub fn prev_in_order(&self, index: usize) -> Option<&Node<'a>> {
        let prev = self.children.get(index)?.order_prev?;
        self.children.get(prev)
    }

    /// Walks a production sequence starting at the child at `index`.
    pub fn sequence(&self, index: usize) -> impl Iterator<Item = &Node<'a>> + '_ {
        let mut cursor = self.children.get(index).map(|_| index);
        std::iter::from_fn(move || {
            let current = cursor?;
            let node = &self.children[current];
            cursor = node.order_next;
            Some(node)
        })
    }

    /// First direct child of the given category.
    pub fn child(&self, category: Category) -> Option<&Node<'a>> {
        self.children.iter().find(|c| c.category == category)
    }

    /// Pre-order walk over this node and all of its descendants.
    pub fn descendants(&self) -> Descendants<'_, 'a> {
        Descendants { stack: vec![self] }
    }

    /// Current text of this node, including every rewrite in its subtree.
    pub fn text(&self) -> Cow<'_, str> {
        if let Some(rewritten) = &self.rewritten {
            return Cow::Borrowed(rewritten);
        }
        if !self.has_rewrites() {
            return Cow::Borrowed(self.matched);
        }
        let mut out = String::with_capacity(self.matched.len());
        self.write_text(&mut out);
        Cow::Owned(out)
    }

    fn write_text(&self, out: &mut String) {
        match &self.rewritten {
            Some(rewritten) => out.push_str(rewritten),
            None if self.children.is_empty() => out.push_str(self.matched),
            None => self.children.iter().for_each(|c| c.write_text(out)),
        }
    }

    fn has_rewrites(&self) -> bool {
        self.rewritten.is_some() || self.children.iter().any(Node::has_rewrites)
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Node<'a>] {
        &mut self.children
    }

    pub(crate) fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    pub(crate) fn rewrite(&mut self, text: String) {
        self.rewritten = Some(text);
    }
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Pre-order iterator returned by [`Node::descendants`].
pub struct Descendants<'n, 'a> {
    stack: Vec<&'n Node<'a>>,
}

impl<'n, 'a> Iterator for Descendants<'n, 'a> {
    type Item = &'n Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Builder for a composite node, threading the residual input from one part
/// to the next.
#[derive(Debug)]
pub(crate) struct Production<'a> {
    category: Category,
    input: &'a str,
    rest: &'a str,
    children: Vec<Node<'a>>,
    chain_tail: Option<usize>,
}

impl<'a> Production<'a> {
    pub(crate) fn new(category: Category, input: &'a str) -> Self {
        Production {
            category,
            input,
            rest: input,
            children: Vec::new(),
            chain_tail: None,
        }
    }

    pub(crate) fn rest(&self) -> &'a str {
        self.rest
    }

    /// Appends a part of the flat sequence, linking it to the previous part.
    pub(crate) fn chain(&mut self, mut node: Node<'a>) {
        let index = self.children.len();
        if let Some(tail) = self.chain_tail {
            node.order_prev = Some(tail);
            self.children[tail].order_next = Some(index);
        }
        self.chain_tail = Some(index);
        self.rest = node.residual;
        self.children.push(node);
    }

    /// Appends an optional whitespace run and the part that followed it.
    pub(crate) fn chain_spaced(&mut self, (space, node): (Option<Node<'a>>, Node<'a>)) {
        if let Some(space) = space {
            self.chain(space);
        }
        self.chain(node);
    }

    /// Appends a part without order links.
    pub(crate) fn attach(&mut self, node: Node<'a>) {
        self.chain_tail = None;
        self.rest = node.residual;
        self.children.push(node);
    }

    pub(crate) fn attach_spaced(&mut self, (space, node): (Option<Node<'a>>, Node<'a>)) {
        if let Some(space) = space {
            self.attach(space);
        }
        self.attach(node);
    }

    pub(crate) fn finish(self) -> Node<'a> {
        Node::composite(self.category, self.input, self.rest, self.children)
    }
}
