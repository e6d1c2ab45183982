//! Fill placeholders from command-line values

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use super::CliError;
use crate::{BindValue, Parser, ParserOptions, transform};

/// Options for the bind command
#[derive(Debug, Clone, Default)]
pub struct BindOptions {
    pub query: String,
    /// Raw values, one per placeholder
    pub values: Vec<String>,
    /// Bind every value as text instead of guessing its type
    pub text: bool,
    pub parser: ParserOptions,
}

/// Types a raw argument by its shape.
///
/// `null`, `true` and `false` (any case) become the matching keyword values.
/// Integers, then decimals, then RFC 3339 timestamps are tried next; anything
/// else is text.
///
/// ```
/// use cql_template::{cli::parse_value, BindValue};
///
/// assert_eq!(parse_value("42", false), BindValue::Integer(42));
/// assert_eq!(parse_value("42", true), BindValue::Text("42".to_string()));
/// assert_eq!(parse_value("NULL", false), BindValue::Null);
/// ```
pub fn parse_value(raw: &str, force_text: bool) -> BindValue {
    if force_text {
        return BindValue::Text(raw.to_string());
    }
    if raw.eq_ignore_ascii_case("null") {
        return BindValue::Null;
    }
    if raw.eq_ignore_ascii_case("true") {
        return BindValue::Boolean(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return BindValue::Boolean(false);
    }
    if let Ok(n) = raw.parse::<i64>() {
        return BindValue::Integer(n);
    }
    if let Ok(d) = Decimal::from_str(raw) {
        return BindValue::Decimal(d);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return BindValue::Timestamp(ts.with_timezone(&Utc));
    }
    BindValue::Text(raw.to_string())
}

/// Binds the values left to right and returns the rewritten statement.
pub fn execute_bind(options: &BindOptions) -> Result<String, CliError> {
    let mut root = Parser::with_options(&options.query, options.parser).parse()?;
    let values: Vec<BindValue> = options
        .values
        .iter()
        .map(|raw| parse_value(raw, options.text))
        .collect();
    let bound = transform::bind(&mut root, values)?;
    debug!(bound, "bound placeholders");
    Ok(root.to_string())
}
