//! Terminal productions of the grammar.
//!
//! Every recognizer takes the input it should match at and a `mandatory` flag,
//! and returns `Ok(Some(node))` on a match, `Ok(None)` when the production is
//! simply absent, or an error when it was mandatory (or started to match and
//! then broke off, as an unterminated string does).

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::ast::{Category, Node, Production};
use crate::parser::ParseError;

/// Outcome of a recognizer: matched, absent, or malformed.
pub type Recognized<'a> = Result<Option<Node<'a>>, ParseError>;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t\r\n]+").expect("valid whitespace pattern"));
static CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+").expect("valid chars pattern"));
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+").expect("valid number pattern"));
static HEX_BLOB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Fa-f][0-9A-Fa-f-]*").expect("valid hex blob pattern"));

const VOCABULARY: &[&str] = &[
    "ADD", "ALLOW", "ALTER", "AND", "APPLY", "AS", "ASC", "BATCH", "BEGIN", "BY",
    "CONTAINS", "CREATE", "DELETE", "DESC", "DISTINCT", "DROP", "EXISTS", "FILTERING",
    "FROM", "GRANT", "IF", "IN", "INDEX", "INSERT", "INTO", "JSON", "KEY", "KEYSPACE",
    "LIMIT", "NOT", "ON", "OR", "ORDER", "PARTITION", "PER", "PRIMARY", "REVOKE",
    "SELECT", "SET", "TABLE", "TIMESTAMP", "TO", "TRUNCATE", "TTL", "TYPE", "UNLOGGED",
    "UPDATE", "USE", "USING", "VALUES", "WHERE", "WITH",
];

/// Keywords that start or join a clause. These are never names; the rest of
/// the vocabulary (`KEY`, `TTL`, `TIMESTAMP`, ...) may also name a column.
const CLAUSE_WORDS: &[&str] = &[
    "ADD", "ALLOW", "ALTER", "AND", "APPLY", "BATCH", "BEGIN", "BY", "CREATE", "DELETE",
    "DROP", "FROM", "GRANT", "IF", "IN", "INSERT", "INTO", "LIMIT", "NOT", "ON", "OR",
    "ORDER", "PRIMARY", "REVOKE", "SELECT", "SET", "TABLE", "TRUNCATE", "UNLOGGED",
    "UPDATE", "USE", "USING", "VALUES", "WHERE", "WITH",
];

static RESERVED_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| VOCABULARY.iter().copied().collect());

static CLAUSE_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| CLAUSE_WORDS.iter().copied().collect());

/// Single-character operators and punctuation.
pub const SYMBOLS: &[char] = &['=', '+', '-', '/', '*', '(', ')', '{', '}', ',', '[', ']'];

/// Comparison operators besides `=`, longest first.
const OPERATORS: &[&str] = &["<=", ">=", "!=", "<", ">"];

/// Whether `word` is a dialect keyword, ignoring case.
pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS.contains(word.to_ascii_uppercase().as_str())
}

/// Whether `word` is a keyword that cannot be read as a name, ignoring case.
pub fn is_clause_word(word: &str) -> bool {
    CLAUSE_WORD_SET.contains(word.to_ascii_uppercase().as_str())
}

/// Recognizer for the terminal productions of one source text.
#[derive(Debug, Clone, Copy)]
pub struct Lexer<'a> {
    source: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer { source }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Byte offset of `input` within the source, given that it is a suffix of it.
    pub fn offset(&self, input: &str) -> usize {
        self.source.len().saturating_sub(input.len())
    }

    pub(crate) fn expected(&self, production: Category, input: &str) -> ParseError {
        ParseError::Expected {
            production,
            found: input.to_string(),
            offset: self.offset(input),
        }
    }

    /// Soft failure, or a hard one when the production was mandatory.
    pub(crate) fn absent(&self, production: Category, input: &str, mandatory: bool) -> Recognized<'a> {
        if mandatory {
            return Err(self.expected(production, input));
        }
        trace!(%production, offset = self.offset(input), "absent");
        Ok(None)
    }

    /// Unwraps a recognizer outcome that has to be present.
    pub(crate) fn require(
        &self,
        recognized: Recognized<'a>,
        production: Category,
        input: &str,
    ) -> Result<Node<'a>, ParseError> {
        recognized?.ok_or_else(|| self.expected(production, input))
    }

    fn pattern(&self, pattern: &Regex, category: Category, input: &'a str, mandatory: bool) -> Recognized<'a> {
        match pattern.find(input) {
            Some(m) => Ok(Some(Node::leaf(category, input, m.end()))),
            None => self.absent(category, input, mandatory),
        }
    }

    fn single(&self, ch: char, category: Category, input: &'a str, mandatory: bool) -> Recognized<'a> {
        if input.starts_with(ch) {
            Ok(Some(Node::leaf(category, input, ch.len_utf8())))
        } else {
            self.absent(category, input, mandatory)
        }
    }

    /// One or more whitespace characters.
    pub fn whitespace(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        self.pattern(&WHITESPACE, Category::Whitespace, input, mandatory)
    }

    /// Maximal run of ASCII letters and digits.
    pub fn chars(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        self.pattern(&CHARS, Category::Chars, input, mandatory)
    }

    /// Maximal run of ASCII digits.
    pub fn number(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        self.pattern(&NUMBER, Category::Number, input, mandatory)
    }

    /// Maximal run of hex digits and hyphens, starting with a hex digit.
    pub fn hex_blob(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        self.pattern(&HEX_BLOB, Category::HexBlob, input, mandatory)
    }

    pub fn symbol(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        match input.chars().next() {
            Some(ch) if SYMBOLS.contains(&ch) => Ok(Some(Node::leaf(Category::Symbol, input, 1))),
            _ => self.absent(Category::Symbol, input, mandatory),
        }
    }

    /// A specific symbol, tagged with a more precise category.
    pub fn delimiter(&self, ch: char, category: Category, input: &'a str, mandatory: bool) -> Recognized<'a> {
        self.single(ch, category, input, mandatory)
    }

    pub fn accessor(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        self.single('.', Category::Accessor, input, mandatory)
    }

    pub fn placeholder(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        self.single('?', Category::PlaceholderInject, input, mandatory)
    }

    pub fn map_separator(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        self.single(':', Category::MapSeparator, input, mandatory)
    }

    pub fn terminator(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        self.single(';', Category::Terminator, input, mandatory)
    }

    /// Comparison operator other than the `=` symbol.
    pub fn operator(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        match OPERATORS.iter().find(|op| input.starts_with(**op)) {
            Some(op) => Ok(Some(Node::leaf(Category::Operator, input, op.len()))),
            None => self.absent(Category::Operator, input, mandatory),
        }
    }

    /// Any keyword of the vocabulary.
    pub fn reserved_word(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        match CHARS.find(input) {
            Some(m) if is_reserved_word(m.as_str()) => {
                Ok(Some(Node::leaf(Category::ReservedWord, input, m.end())))
            }
            _ => self.absent(Category::ReservedWord, input, mandatory),
        }
    }

    /// One of the given keywords, compared without regard to case.
    pub fn keyword(
        &self,
        words: &[&str],
        category: Category,
        input: &'a str,
        mandatory: bool,
    ) -> Recognized<'a> {
        match CHARS.find(input) {
            Some(m) if words.iter().any(|w| w.eq_ignore_ascii_case(m.as_str())) => {
                Ok(Some(Node::leaf(category, input, m.end())))
            }
            _ => self.absent(category, input, mandatory),
        }
    }

    pub fn where_keyword(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        self.keyword(&["WHERE"], Category::WhereKeyword, input, mandatory)
    }

    /// Body of a string literal: everything up to an unescaped `'`, where `''`
    /// stands for one quote.
    pub fn input_characters(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        let bytes = input.as_bytes();
        let mut end = 0;
        while end < bytes.len() {
            if bytes[end] == b'\'' {
                if bytes.get(end + 1) == Some(&b'\'') {
                    end += 2;
                    continue;
                }
                break;
            }
            end += 1;
        }
        if end == 0 {
            return self.absent(Category::InputCharacters, input, mandatory);
        }
        Ok(Some(Node::leaf(Category::InputCharacters, input, end)))
    }

    /// Single-quoted string literal. A missing closing quote is malformed
    /// input, not an absent string.
    pub fn string(&self, input: &'a str, mandatory: bool) -> Recognized<'a> {
        let Some(open) = self.single('\'', Category::Quote, input, false)? else {
            return self.absent(Category::String, input, mandatory);
        };
        let mut string = Production::new(Category::String, input);
        string.chain(open);
        if let Some(body) = self.input_characters(string.rest(), false)? {
            string.chain(body);
        }
        let rest = string.rest();
        let Some(close) = self.single('\'', Category::Quote, rest, false)? else {
            return Err(ParseError::Unterminated {
                production: Category::String,
                delimiter: '\'',
                offset: self.offset(rest),
            });
        };
        string.chain(close);
        Ok(Some(string.finish()))
    }
}

#[test]
fn test_reserved_words_ignore_case() {
    assert!(is_reserved_word("select"));
    assert!(is_reserved_word("Where"));
    assert!(!is_reserved_word("test"));
    assert!(!is_reserved_word("selected"));
}

#[test]
fn test_clause_words_are_keywords() {
    assert!(CLAUSE_WORDS.iter().all(|w| is_reserved_word(w)));
    assert!(is_clause_word("where"));
    assert!(!is_clause_word("key"));
    assert!(!is_clause_word("TTL"));
}

#[test]
fn test_reserved_word_stops_at_symbol() {
    let input = "VALUES(?)";
    let word = Lexer::new(input).reserved_word(input, false).unwrap().unwrap();
    assert_eq!(word.matched(), "VALUES");
    assert_eq!(word.residual(), "(?)");
}

#[test]
fn test_operator_prefers_longest() {
    let input = "<= 3";
    let op = Lexer::new(input).operator(input, false).unwrap().unwrap();
    assert_eq!(op.matched(), "<=");
}

#[test]
fn test_empty_string_literal() {
    let input = "'' x";
    let string = Lexer::new(input).string(input, false).unwrap().unwrap();
    assert_eq!(string.matched(), "''");
    assert_eq!(string.children().len(), 2);
    assert_eq!(string.residual(), " x");
}
