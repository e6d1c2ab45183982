use std::fmt;
use std::str::FromStr;

/// Grammar symbol attached to every node of a parse tree.
///
/// The set is closed: every production of the grammar tags the node it builds
/// with exactly one of these. The mutation engine addresses nodes by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Root of a parsed statement
    Statement,

    /// Reserved-word sequence plus its items and any nested command
    ///
    /// # Examples
    /// ```text
    /// SELECT a, b
    /// INSERT INTO test (age) VALUES (?)
    /// ```
    Command,

    /// Single dialect keyword (case-insensitive)
    ReservedWord,

    /// Reserved words joined by verbatim whitespace
    ///
    /// # Examples
    /// ```text
    /// INSERT INTO
    /// ALLOW   FILTERING
    /// ```
    ReservedWordSequence,

    /// Run of whitespace, kept byte for byte
    Whitespace,

    /// Possibly-qualified name, placeholder or literal
    SelectorItem,

    /// Quoted or unquoted identifier
    ItemName,

    /// Double-quoted identifier
    ///
    /// # Examples
    /// ```text
    /// "MyColumn"
    /// ```
    ItemNameCaseSensitive,

    /// Bare identifier, folded to lower case by the server
    ItemNameCaseInsensitive,

    /// `.` between keyspace and table, or table and column
    Accessor,

    /// Number, string or hex blob
    Literal,

    /// Single-quoted string literal
    ///
    /// # Examples
    /// ```text
    /// 'hello'
    /// 'it''s'
    /// ```
    String,

    /// Opening or closing `'` of a string literal
    Quote,

    /// Body of a string literal, escapes left as written
    InputCharacters,

    /// Run of ASCII digits
    Number,

    /// Run of hex digits and hyphens, as in UUIDs
    ///
    /// # Examples
    /// ```text
    /// cafebabe
    /// 123e4567-e89b-12d3-a456-426614174000
    /// ```
    HexBlob,

    /// One of `= + - / * ( ) { } , [ ]`
    Symbol,

    /// Comparison operator other than `=`
    ///
    /// # Examples
    /// ```text
    /// <=  >=  !=  <  >
    /// ```
    Operator,

    /// Positional bind marker `?`
    PlaceholderInject,

    /// The `WHERE` keyword opening a condition
    WhereKeyword,

    /// `WHERE` clause
    Condition,

    /// Condition items joined by `AND` / `OR`
    ConditionChain,

    /// Single comparison, `a = ?`
    ConditionItem,

    /// `[a, b, c]`
    ArrayLiteral,
    ArrayStart,
    ArrayEnd,

    /// `{k: v, ...}`
    MapLiteral,
    MapStart,
    MapEnd,

    /// `key: value` inside a map literal
    MapEntry,

    /// The `:` of a map entry
    MapSeparator,

    /// Column reference in a projection, assignment or column list
    FieldName,

    /// Table reference following `FROM`, `INTO`, `UPDATE`, `TABLE` or `TRUNCATE`
    TableName,

    /// Run of ASCII letters and digits
    Chars,

    /// Statement-ending `;`
    Terminator,
}

impl Category {
    pub const ALL: [Category; 35] = [
        Category::Statement,
        Category::Command,
        Category::ReservedWord,
        Category::ReservedWordSequence,
        Category::Whitespace,
        Category::SelectorItem,
        Category::ItemName,
        Category::ItemNameCaseSensitive,
        Category::ItemNameCaseInsensitive,
        Category::Accessor,
        Category::Literal,
        Category::String,
        Category::Quote,
        Category::InputCharacters,
        Category::Number,
        Category::HexBlob,
        Category::Symbol,
        Category::Operator,
        Category::PlaceholderInject,
        Category::WhereKeyword,
        Category::Condition,
        Category::ConditionChain,
        Category::ConditionItem,
        Category::ArrayLiteral,
        Category::ArrayStart,
        Category::ArrayEnd,
        Category::MapLiteral,
        Category::MapStart,
        Category::MapEnd,
        Category::MapEntry,
        Category::MapSeparator,
        Category::FieldName,
        Category::TableName,
        Category::Chars,
        Category::Terminator,
    ];

    /// Kebab-case name used in error messages, JSON output and the CLI.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Statement => "statement",
            Category::Command => "command",
            Category::ReservedWord => "reserved-word",
            Category::ReservedWordSequence => "reserved-word-sequence",
            Category::Whitespace => "whitespace",
            Category::SelectorItem => "selector-item",
            Category::ItemName => "item-name",
            Category::ItemNameCaseSensitive => "item-name-case-sensitive",
            Category::ItemNameCaseInsensitive => "item-name-case-insensitive",
            Category::Accessor => "accessor",
            Category::Literal => "literal",
            Category::String => "string",
            Category::Quote => "quote",
            Category::InputCharacters => "input-characters",
            Category::Number => "number",
            Category::HexBlob => "hex-blob",
            Category::Symbol => "symbol",
            Category::Operator => "operator",
            Category::PlaceholderInject => "placeholder-inject",
            Category::WhereKeyword => "where-keyword",
            Category::Condition => "condition",
            Category::ConditionChain => "condition-chain",
            Category::ConditionItem => "condition-item",
            Category::ArrayLiteral => "array-literal",
            Category::ArrayStart => "array-start",
            Category::ArrayEnd => "array-end",
            Category::MapLiteral => "map-literal",
            Category::MapStart => "map-start",
            Category::MapEnd => "map-end",
            Category::MapEntry => "map-entry",
            Category::MapSeparator => "map-separator",
            Category::FieldName => "field-name",
            Category::TableName => "table-name",
            Category::Chars => "chars",
            Category::Terminator => "terminator",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a name does not denote any [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.name() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
