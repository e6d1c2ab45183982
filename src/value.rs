use std::fmt;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;

/// `chrono` format of timestamp literals; always rendered in UTC, so the
/// offset is `+0000`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%z";

/// A value substituted for a placeholder.
///
/// Each variant renders to the literal text the dialect expects, see
/// [`BindValue::to_literal`].
///
/// # Examples
///
/// ```
/// use cql_template::BindValue;
///
/// assert_eq!(BindValue::from(42).to_literal(), "42");
/// assert_eq!(BindValue::from("it's").to_literal(), "'it''s'");
/// assert_eq!(BindValue::from(None::<i64>).to_literal(), "NULL");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    /// Absent value, rendered as `NULL`
    Null,

    /// `true` / `false`
    Boolean(bool),

    /// Integer, rendered unquoted
    Integer(i64),

    /// Floating-point number, rendered unquoted
    Float(f64),

    /// Exact decimal, rendered unquoted
    Decimal(Decimal),

    /// Text, single-quoted with embedded quotes doubled
    Text(String),

    /// Point in time, rendered as `'yyyy-MM-dd HH:mm:ss+0000'`
    Timestamp(DateTime<Utc>),
}

impl BindValue {
    /// Literal text of this value as it appears in a statement.
    pub fn to_literal(&self) -> String {
        match self {
            BindValue::Null => "NULL".to_string(),
            BindValue::Boolean(b) => b.to_string(),
            BindValue::Integer(n) => n.to_string(),
            BindValue::Float(n) if n.is_nan() => "NaN".to_string(),
            BindValue::Float(n) if n.is_infinite() => {
                if n.is_sign_positive() { "Infinity" } else { "-Infinity" }.to_string()
            }
            BindValue::Float(n) => format!("{:?}", n),
            BindValue::Decimal(d) => d.to_string(),
            BindValue::Text(s) => quote_text(s),
            BindValue::Timestamp(t) => format!("'{}'", t.format(TIMESTAMP_FORMAT)),
        }
    }
}

/// Wraps `text` in single quotes, doubling any quote inside it.
pub fn quote_text(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

impl fmt::Display for BindValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_literal())
    }
}

macro_rules! integer_from {
    ($($t:ty),*) => {
        $(impl From<$t> for BindValue {
            fn from(n: $t) -> Self {
                BindValue::Integer(i64::from(n))
            }
        })*
    };
}

integer_from!(i8, i16, i32, i64, u8, u16, u32);

/// Values past `i64` are kept exact as decimals.
macro_rules! wide_integer_from {
    ($($t:ty),*) => {
        $(impl From<$t> for BindValue {
            fn from(n: $t) -> Self {
                i64::try_from(n).map_or_else(|_| BindValue::Decimal(Decimal::from(n)), BindValue::Integer)
            }
        })*
    };
}

wide_integer_from!(u64, usize, isize);

impl From<bool> for BindValue {
    fn from(b: bool) -> Self {
        BindValue::Boolean(b)
    }
}

impl From<f32> for BindValue {
    fn from(n: f32) -> Self {
        BindValue::Float(f64::from(n))
    }
}

impl From<f64> for BindValue {
    fn from(n: f64) -> Self {
        BindValue::Float(n)
    }
}

impl From<Decimal> for BindValue {
    fn from(d: Decimal) -> Self {
        BindValue::Decimal(d)
    }
}

impl From<&str> for BindValue {
    fn from(s: &str) -> Self {
        BindValue::Text(s.to_string())
    }
}

impl From<String> for BindValue {
    fn from(s: String) -> Self {
        BindValue::Text(s)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for BindValue {
    fn from(t: DateTime<Tz>) -> Self {
        BindValue::Timestamp(t.with_timezone(&Utc))
    }
}

/// A naive date-time is taken to be in UTC.
impl From<NaiveDateTime> for BindValue {
    fn from(t: NaiveDateTime) -> Self {
        BindValue::Timestamp(Utc.from_utc_datetime(&t))
    }
}

impl<T: Into<BindValue>> From<Option<T>> for BindValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(BindValue::Null, Into::into)
    }
}
