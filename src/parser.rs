//! Composite productions of the grammar.
//!
//! The parser is a recursive-descent recognizer over string slices. Each
//! production follows the contract of [`crate::lexer::Recognized`]: it either
//! builds a node, reports absence without consuming anything, or fails with a
//! [`ParseError`]. Alternation is done by trying productions in order and
//! moving on when one is absent.

use std::cell::Cell;

use thiserror::Error;
use tracing::debug;

use crate::{
    ast::{Category, Node, Production},
    lexer::{Lexer, Recognized, is_clause_word},
};

/// Why a statement could not be parsed.
///
/// Offsets are byte offsets into the parsed source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A mandatory production did not match
    #[error("expected {production} at offset {offset}, found {}", preview(.found))]
    Expected {
        production: Category,
        found: String,
        offset: usize,
    },

    /// A literal was opened but its closing delimiter is missing
    #[error("unterminated {production} at offset {offset}: missing closing `{delimiter}`")]
    Unterminated {
        production: Category,
        delimiter: char,
        offset: usize,
    },

    /// The statement parsed but text remains after it
    #[error("unexpected input at offset {offset}: {}", preview(.found))]
    TrailingInput { found: String, offset: usize },

    /// Commands or collection literals nest deeper than allowed
    #[error("nesting exceeds {limit} levels at offset {offset}")]
    TooDeep { limit: usize, offset: usize },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Expected { offset, .. }
            | ParseError::Unterminated { offset, .. }
            | ParseError::TrailingInput { offset, .. }
            | ParseError::TooDeep { offset, .. } => *offset,
        }
    }
}

fn preview(found: &str) -> String {
    const MAX: usize = 24;
    if found.is_empty() {
        return "end of input".to_string();
    }
    match found.char_indices().nth(MAX) {
        Some((cut, _)) => format!("'{}...'", &found[..cut]),
        None => format!("'{}'", found),
    }
}

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Deepest allowed nesting of commands and collection literals
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions { max_depth: 64 }
    }
}

/// Keywords that end a command instead of continuing it.
const CLAUSE_KEYWORDS: &[&str] = &["WHERE"];

const CONJUNCTIONS: &[&str] = &["AND", "OR"];

/// Keywords after which the next name is a table.
const TABLE_KEYWORDS: &[&str] = &["INTO", "FROM", "UPDATE", "TABLE", "TRUNCATE"];

/// Keywords whose names are column references.
const FIELD_KEYWORDS: &[&str] = &["SELECT", "SET", "BY", "DELETE"];

/// Name-like keywords that belong to a sequence only right after the keyword
/// they are paired with (`ALLOW FILTERING`, `PRIMARY KEY`). Anywhere else they
/// are names.
const KEYWORD_PAIRS: &[(&str, &str)] = &[
    ("ALLOW", "FILTERING"),
    ("ALTER", "KEYSPACE"),
    ("ALTER", "TYPE"),
    ("AND", "TIMESTAMP"),
    ("AND", "TTL"),
    ("CREATE", "INDEX"),
    ("CREATE", "KEYSPACE"),
    ("CREATE", "TYPE"),
    ("DROP", "INDEX"),
    ("DROP", "KEYSPACE"),
    ("DROP", "TYPE"),
    ("IF", "EXISTS"),
    ("NOT", "EXISTS"),
    ("PER", "PARTITION"),
    ("PRIMARY", "KEY"),
    ("SELECT", "DISTINCT"),
    ("SELECT", "JSON"),
    ("USING", "TIMESTAMP"),
    ("USING", "TTL"),
];

fn paired(previous: &str, word: &str) -> bool {
    KEYWORD_PAIRS
        .iter()
        .any(|(first, second)| first.eq_ignore_ascii_case(previous) && second.eq_ignore_ascii_case(word))
}

/// Parses `source` as one statement with default options.
pub fn parse(source: &str) -> Result<Node<'_>, ParseError> {
    Parser::new(source).parse()
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    options: ParserOptions,
    depth: Cell<usize>,
}

/// Keeps the nesting depth raised while a nested production is being built.
struct DepthGuard<'p> {
    depth: &'p Cell<usize>,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get() - 1);
    }
}

type Spaced<'a> = (Option<Node<'a>>, Node<'a>);

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Parser::with_options(source, ParserOptions::default())
    }

    pub fn with_options(source: &'a str, options: ParserOptions) -> Self {
        Parser {
            lexer: Lexer::new(source),
            options,
            depth: Cell::new(0),
        }
    }

    pub fn lexer(&self) -> &Lexer<'a> {
        &self.lexer
    }

    /// Parses the whole source as a single statement.
    pub fn parse(&self) -> Result<Node<'a>, ParseError> {
        let source = self.lexer.source();
        debug!(len = source.len(), "parsing statement");
        let result = self.statement(source);
        match &result {
            Ok(root) => debug!(children = root.children().len(), "parsed statement"),
            Err(e) => debug!(error = %e, "statement rejected"),
        }
        result
    }

    fn enter(&self, input: &str) -> Result<DepthGuard<'_>, ParseError> {
        let depth = self.depth.get() + 1;
        if depth > self.options.max_depth {
            return Err(ParseError::TooDeep {
                limit: self.options.max_depth,
                offset: self.lexer.offset(input),
            });
        }
        self.depth.set(depth);
        Ok(DepthGuard { depth: &self.depth })
    }

    /// Optional whitespace followed by a production; nothing is consumed
    /// unless the production matches.
    fn spaced(
        &self,
        input: &'a str,
        recognize: impl FnOnce(&'a str) -> Recognized<'a>,
    ) -> Result<Option<Spaced<'a>>, ParseError> {
        let space = self.lexer.whitespace(input, false)?;
        let after = space.as_ref().map_or(input, Node::residual);
        Ok(recognize(after)?.map(|node| (space, node)))
    }

    /// Like [`Parser::spaced`] for a production that must be there.
    fn spaced_required(
        &self,
        input: &'a str,
        production: Category,
        recognize: impl FnOnce(&'a str) -> Recognized<'a>,
    ) -> Result<Spaced<'a>, ParseError> {
        let space = self.lexer.whitespace(input, false)?;
        let after = space.as_ref().map_or(input, Node::residual);
        let node = self.lexer.require(recognize(after), production, after)?;
        Ok((space, node))
    }

    /// A hex blob that should win over a shorter match of `len` bytes.
    ///
    /// Only runs mixing digits and hex letters qualify, so `2016-01-01` stays a
    /// number and `abc` stays a name while a UUID is read as one literal.
    fn blob_over(&self, input: &'a str, len: usize) -> Recognized<'a> {
        let Some(blob) = self.lexer.hex_blob(input, false)? else {
            return Ok(None);
        };
        let text = blob.matched();
        let mixed = text.bytes().any(|b| b.is_ascii_digit())
            && text.bytes().any(|b| b.is_ascii_alphabetic());
        Ok((text.len() > len && mixed).then_some(blob))
    }

    fn wrap(&self, category: Category, input: &'a str, node: Node<'a>) -> Node<'a> {
        let mut production = Production::new(category, input);
        production.chain(node);
        production.finish()
    }

    /// Reserved words separated by whitespace, kept verbatim.
    pub fn reserved_word_sequence(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        let Some(first) = self.sequence_word(input)? else {
            return self.lexer.absent(Category::ReservedWordSequence, input, mandatory);
        };
        let mut last = first.matched();
        let mut words = Production::new(Category::ReservedWordSequence, input);
        words.chain(first);
        while let Some(next) = self.spaced(words.rest(), move |after| self.next_sequence_word(after, last))? {
            last = next.1.matched();
            words.chain_spaced(next);
        }
        Ok(Some(words.finish()))
    }

    /// First word of a sequence: a clause word, or a name-like keyword whose
    /// pair follows it (`PER PARTITION`).
    fn sequence_word(&self, input: &'a str) -> Recognized<'a> {
        let Some(word) = self.keyword_word(input)? else {
            return Ok(None);
        };
        if is_clause_word(word.matched()) {
            return Ok(Some(word));
        }
        let opens_pair = self
            .spaced(word.residual(), |after| self.keyword_word(after))?
            .is_some_and(|(_, next)| paired(word.matched(), next.matched()));
        Ok(opens_pair.then_some(word))
    }

    fn next_sequence_word(&self, input: &'a str, previous: &str) -> Recognized<'a> {
        match self.keyword_word(input)? {
            Some(word) if paired(previous, word.matched()) => Ok(Some(word)),
            _ => self.sequence_word(input),
        }
    }

    /// Any keyword except those that open the statement's own clauses.
    fn keyword_word(&self, input: &'a str) -> Recognized<'a> {
        if self.lexer.keyword(CLAUSE_KEYWORDS, Category::ReservedWord, input, false)?.is_some() {
            return Ok(None);
        }
        self.lexer.reserved_word(input, false)
    }

    /// Bare identifier: letters and digits, not starting with a digit, not a
    /// clause keyword. Name-like keywords such as `key` or `ttl` are accepted.
    pub fn item_name_case_insensitive(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        match self.lexer.chars(input, false)? {
            Some(chars)
                if !chars.matched().starts_with(|c: char| c.is_ascii_digit())
                    && !is_clause_word(chars.matched()) =>
            {
                let len = chars.matched().len();
                Ok(Some(Node::leaf(Category::ItemNameCaseInsensitive, input, len)))
            }
            _ => self.lexer.absent(Category::ItemNameCaseInsensitive, input, mandatory),
        }
    }

    /// Double-quoted identifier whose interior is exactly one run of letters
    /// and digits.
    pub fn item_name_case_sensitive(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        let Some(interior) = input.strip_prefix('"') else {
            return self.lexer.absent(Category::ItemNameCaseSensitive, input, mandatory);
        };
        let Some(close) = interior.find('"') else {
            return Err(ParseError::Unterminated {
                production: Category::ItemNameCaseSensitive,
                delimiter: '"',
                offset: self.lexer.offset(input) + input.len(),
            });
        };
        let body = &interior[..close];
        match self.lexer.chars(body, false)? {
            Some(chars) if chars.residual().is_empty() => {
                Ok(Some(Node::leaf(Category::ItemNameCaseSensitive, input, close + 2)))
            }
            _ => self.lexer.absent(Category::ItemNameCaseSensitive, input, mandatory),
        }
    }

    pub fn item_name(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        let name = match self.item_name_case_sensitive(input, false)? {
            Some(name) => Some(name),
            None => self.item_name_case_insensitive(input, false)?,
        };
        match name {
            Some(name) => Ok(Some(self.wrap(Category::ItemName, input, name))),
            None => self.lexer.absent(Category::ItemName, input, mandatory),
        }
    }

    /// Number, string or hex blob.
    pub fn literal(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        let value = if let Some(number) = self.lexer.number(input, false)? {
            let len = number.matched().len();
            Some(self.blob_over(input, len)?.unwrap_or(number))
        } else if let Some(string) = self.lexer.string(input, false)? {
            Some(string)
        } else {
            self.lexer.hex_blob(input, false)?
        };
        match value {
            Some(value) => Ok(Some(self.wrap(Category::Literal, input, value))),
            None => self.lexer.absent(Category::Literal, input, mandatory),
        }
    }

    /// Possibly-qualified name, placeholder or literal.
    pub fn selector_item(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        self.selector_item_as(Category::SelectorItem, input, mandatory)
    }

    /// `role` is the category given to the node when it is a name; a
    /// placeholder or literal is always a plain selector item.
    fn selector_item_as(&self, role: Category, input: &'a str, mandatory: bool) -> Recognized<'a> {
        if let Some(name) = self.item_name(input, false)? {
            if let Some(blob) = self.blob_over(input, name.matched().len())? {
                let literal = self.wrap(Category::Literal, input, blob);
                return Ok(Some(self.wrap(Category::SelectorItem, input, literal)));
            }
            let mut item = Production::new(role, input);
            item.chain(name);
            if let Some(dot) = self.lexer.accessor(item.rest(), false)? {
                item.chain(dot);
                let rest = item.rest();
                item.chain(self.lexer.require(self.item_name(rest, false), Category::ItemName, rest)?);
            }
            return Ok(Some(item.finish()));
        }
        let inner = match self.lexer.placeholder(input, false)? {
            Some(placeholder) => Some(placeholder),
            None => self.literal(input, false)?,
        };
        match inner {
            Some(inner) => Ok(Some(self.wrap(Category::SelectorItem, input, inner))),
            None => self.lexer.absent(Category::SelectorItem, input, mandatory),
        }
    }

    /// `[item, item, ...]`. A bracket not followed by an element or `]` is
    /// left to the symbol production.
    pub fn array_literal(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        let Some(open) = self.lexer.delimiter('[', Category::ArrayStart, input, false)? else {
            return self.lexer.absent(Category::ArrayLiteral, input, mandatory);
        };
        let _guard = self.enter(input)?;
        let mut array = Production::new(Category::ArrayLiteral, input);
        array.chain(open);
        match self.spaced(array.rest(), |after| self.selector_item(after, false))? {
            Some(first) => {
                array.chain_spaced(first);
                while let Some(comma) = self.spaced(array.rest(), |after| self.comma(after))? {
                    array.chain_spaced(comma);
                    let element = self.spaced_required(array.rest(), Category::SelectorItem, |after| {
                        self.selector_item(after, true)
                    })?;
                    array.chain_spaced(element);
                }
            }
            None => {
                let empty = self.spaced(array.rest(), |after| {
                    self.lexer.delimiter(']', Category::ArrayEnd, after, false)
                })?;
                return match empty {
                    Some(close) => {
                        array.chain_spaced(close);
                        Ok(Some(array.finish()))
                    }
                    None => self.lexer.absent(Category::ArrayLiteral, input, mandatory),
                };
            }
        }
        let close = self.closing(array.rest(), ']', Category::ArrayEnd, Category::ArrayLiteral)?;
        array.chain_spaced(close);
        Ok(Some(array.finish()))
    }

    /// `{key: value, ...}`. A brace group whose first entry has no `:` is not
    /// a map and is left to the symbol production.
    pub fn map_literal(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        let Some(open) = self.lexer.delimiter('{', Category::MapStart, input, false)? else {
            return self.lexer.absent(Category::MapLiteral, input, mandatory);
        };
        let _guard = self.enter(input)?;
        let mut map = Production::new(Category::MapLiteral, input);
        map.chain(open);
        match self.spaced(map.rest(), |after| self.map_entry(after, false))? {
            Some(first) => {
                map.chain_spaced(first);
                while let Some(comma) = self.spaced(map.rest(), |after| self.comma(after))? {
                    map.chain_spaced(comma);
                    let entry = self.spaced_required(map.rest(), Category::MapEntry, |after| {
                        self.map_entry(after, true)
                    })?;
                    map.chain_spaced(entry);
                }
            }
            None => {
                let empty = self.spaced(map.rest(), |after| {
                    self.lexer.delimiter('}', Category::MapEnd, after, false)
                })?;
                return match empty {
                    Some(close) => {
                        map.chain_spaced(close);
                        Ok(Some(map.finish()))
                    }
                    None => self.lexer.absent(Category::MapLiteral, input, mandatory),
                };
            }
        }
        let close = self.closing(map.rest(), '}', Category::MapEnd, Category::MapLiteral)?;
        map.chain_spaced(close);
        Ok(Some(map.finish()))
    }

    /// `key: value` inside a map literal.
    fn map_entry(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        let Some(key) = self.selector_item(input, mandatory)? else {
            return Ok(None);
        };
        let mut entry = Production::new(Category::MapEntry, input);
        entry.chain(key);
        let Some(separator) = self.spaced(entry.rest(), |after| self.lexer.map_separator(after, false))?
        else {
            return self.lexer.absent(Category::MapSeparator, entry.rest(), mandatory);
        };
        entry.chain_spaced(separator);
        let value = self.spaced_required(entry.rest(), Category::SelectorItem, |after| {
            self.selector_item(after, true)
        })?;
        entry.chain_spaced(value);
        Ok(Some(entry.finish()))
    }

    fn comma(&self, input: &'a str) -> Recognized<'a> {
        self.lexer.delimiter(',', Category::Symbol, input, false)
    }

    fn closing(
        &self,
        input: &'a str,
        delimiter: char,
        category: Category,
        production: Category,
    ) -> Result<Spaced<'a>, ParseError> {
        let space = self.lexer.whitespace(input, false)?;
        let after = space.as_ref().map_or(input, Node::residual);
        match self.lexer.delimiter(delimiter, category, after, false)? {
            Some(close) => Ok((space, close)),
            None => Err(ParseError::Unterminated {
                production,
                delimiter,
                offset: self.lexer.offset(after),
            }),
        }
    }

    /// Keywords, then names, literals, symbols and collections, then
    /// optionally the next command (`SELECT a FROM t` nests `FROM t`).
    pub fn command(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        let Some(words) = self.reserved_word_sequence(input, false)? else {
            return self.lexer.absent(Category::Command, input, mandatory);
        };
        let _guard = self.enter(input)?;
        let mut roles = Roles::for_keywords(&words);
        let mut command = Production::new(Category::Command, input);
        command.chain(words);

        loop {
            let space = self.lexer.whitespace(command.rest(), false)?;
            let after = space.as_ref().map_or(command.rest(), Node::residual);
            if after.is_empty() || (!roles.in_list() && self.sequence_word(after)?.is_some()) {
                break;
            }
            let Some(item) = self.command_item(after, &roles)? else {
                break;
            };
            roles.observe(&item);
            command.chain_spaced((space, item));
        }

        if let Some(nested) = self.spaced(command.rest(), |after| self.command(after, false))? {
            command.chain_spaced(nested);
        }
        Ok(Some(command.finish()))
    }

    fn command_item(&self, input: &'a str, roles: &Roles) -> Recognized<'a> {
        if roles.in_list()
            && let Some(words) = self.reserved_word_sequence(input, false)?
        {
            return Ok(Some(words));
        }
        if let Some(array) = self.array_literal(input, false)? {
            return Ok(Some(array));
        }
        if let Some(map) = self.map_literal(input, false)? {
            return Ok(Some(map));
        }
        if let Some(item) = self.selector_item_as(roles.next_role(), input, false)? {
            return Ok(Some(item));
        }
        self.lexer.symbol(input, false)
    }

    /// `WHERE` followed by a chain of comparisons.
    pub fn condition(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        let Some(keyword) = self.lexer.where_keyword(input, false)? else {
            return self.lexer.absent(Category::Condition, input, mandatory);
        };
        let mut condition = Production::new(Category::Condition, input);
        condition.chain(keyword);
        let rest = condition.rest();
        condition.chain(self.lexer.require(self.lexer.whitespace(rest, true), Category::Whitespace, rest)?);
        let rest = condition.rest();
        condition.chain(self.lexer.require(self.condition_chain(rest, true), Category::ConditionChain, rest)?);
        Ok(Some(condition.finish()))
    }

    /// Condition items joined by `AND` or `OR`.
    pub fn condition_chain(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        let Some(first) = self.condition_item(input, mandatory)? else {
            return Ok(None);
        };
        let mut chain = Production::new(Category::ConditionChain, input);
        chain.chain(first);
        while let Some(conjunction) = self.spaced(chain.rest(), |after| {
            self.lexer.keyword(CONJUNCTIONS, Category::ReservedWord, after, false)
        })? {
            chain.chain_spaced(conjunction);
            let rest = chain.rest();
            chain.chain(self.lexer.require(self.lexer.whitespace(rest, true), Category::Whitespace, rest)?);
            let rest = chain.rest();
            chain.chain(self.lexer.require(self.condition_item(rest, true), Category::ConditionItem, rest)?);
        }
        Ok(Some(chain.finish()))
    }

    /// `selector operator selector`, as in `a = ?` or `b>=3`.
    pub fn condition_item(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        let Some(left) = self.selector_item(input, false)? else {
            return self.lexer.absent(Category::ConditionItem, input, mandatory);
        };
        let mut item = Production::new(Category::ConditionItem, input);
        item.chain(left);
        let comparison = self.spaced_required(item.rest(), Category::Symbol, |after| {
            match self.lexer.operator(after, false)? {
                Some(op) => Ok(Some(op)),
                None => self.lexer.symbol(after, false),
            }
        })?;
        item.chain_spaced(comparison);
        let right = self.spaced_required(item.rest(), Category::SelectorItem, |after| {
            self.selector_item(after, true)
        })?;
        item.chain_spaced(right);
        Ok(Some(item.finish()))
    }

    /// Optional whitespace, a command, then an optional `WHERE` condition with
    /// any trailing clause, and an optional `;`. Nothing may follow.
    pub fn statement(&self, input: &'a str) -> Result<Node<'a>, ParseError> {
        let mut statement = Production::new(Category::Statement, input);
        if let Some(space) = self.lexer.whitespace(input, false)? {
            statement.attach(space);
        }
        let rest = statement.rest();
        statement.attach(self.lexer.require(self.command(rest, true), Category::Command, rest)?);

        if let Some(condition) = self.spaced(statement.rest(), |after| self.condition(after, false))? {
            statement.attach_spaced(condition);
            if let Some(clause) = self.spaced(statement.rest(), |after| self.command(after, false))? {
                statement.attach_spaced(clause);
            }
        }
        if let Some(terminator) = self.spaced(statement.rest(), |after| self.lexer.terminator(after, false))? {
            statement.attach_spaced(terminator);
        }
        if let Some(space) = self.lexer.whitespace(statement.rest(), false)? {
            statement.attach(space);
        }

        let rest = statement.rest();
        if !rest.is_empty() {
            return Err(ParseError::TrailingInput {
                found: rest.to_string(),
                offset: self.lexer.offset(rest),
            });
        }
        Ok(statement.finish())
    }
}

/// Tracks which names inside one command are tables or columns.
#[derive(Debug, Default)]
struct Roles {
    table_pending: bool,
    fields: bool,
    field_expected: bool,
    after_table: bool,
    list_depth: usize,
    list_open: bool,
}

impl Roles {
    fn for_keywords(words: &Node<'_>) -> Roles {
        let keywords: Vec<&str> = words
            .children()
            .iter()
            .filter(|w| w.category() == Category::ReservedWord)
            .map(Node::matched)
            .collect();
        let is = |set: &[&str], word: &str| set.iter().any(|k| k.eq_ignore_ascii_case(word));
        let names_table = keywords.iter().any(|w| is(TABLE_KEYWORDS, *w));
        let last = keywords.last().copied().unwrap_or_default();
        let fields = keywords.iter().any(|w| is(FIELD_KEYWORDS, *w));
        Roles {
            table_pending: names_table && (is(TABLE_KEYWORDS, last) || last.eq_ignore_ascii_case("EXISTS")),
            fields,
            field_expected: fields,
            ..Roles::default()
        }
    }

    /// Inside the parenthesized list that follows a table name.
    fn in_list(&self) -> bool {
        self.list_depth > 0
    }

    /// Columns open the command and each comma-separated part of it
    /// (`SELECT a, b AS c` names `a` and `b`), and each element of the list
    /// after a table name.
    fn next_role(&self) -> Category {
        if self.table_pending {
            Category::TableName
        } else if self.field_expected || (self.list_depth == 1 && self.list_open) {
            Category::FieldName
        } else {
            Category::SelectorItem
        }
    }

    fn observe(&mut self, item: &Node<'_>) {
        if item.category() == Category::TableName {
            self.table_pending = false;
            self.after_table = true;
            self.list_open = false;
            self.field_expected = false;
            return;
        }
        self.table_pending = false;
        self.field_expected = self.fields && self.list_depth == 0 && item.matched() == ",";
        if item.category() != Category::Symbol {
            self.list_open = false;
            return;
        }
        match item.matched() {
            "(" if self.list_depth == 0 && self.after_table => {
                self.list_depth = 1;
                self.list_open = true;
            }
            "(" if self.list_depth > 0 => {
                self.list_depth += 1;
                self.list_open = false;
            }
            "," => self.list_open = self.list_depth == 1,
            ")" if self.list_depth > 0 => {
                self.list_depth -= 1;
                if self.list_depth == 0 {
                    self.after_table = false;
                }
                self.list_open = false;
            }
            _ => self.list_open = false,
        }
    }
}
