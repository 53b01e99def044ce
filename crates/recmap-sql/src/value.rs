//! Runtime values for command parameters and materialized rows.

use chrono::{DateTime, SecondsFormat, Utc};

/// A runtime SQL value.
///
/// Closed over the shapes the engine understands, so dialect encoding is
/// exhaustively matched and a new backend cannot silently mishandle an
/// unrecognized shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// NULL
    Null,

    /// Boolean
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit float
    Float(f64),

    /// Text
    String(String),

    /// Binary data
    Bytes(Vec<u8>),

    /// Timestamp with timezone
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// Returns true if this is a NULL value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Render as a quoted SQL literal.
    ///
    /// Strings and timestamps are single-quoted with embedded quotes
    /// doubled; bytes render as a hex escape; numerics and booleans are
    /// bare.
    pub fn sql_literal(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(v) => v.to_string(),
            Value::Int(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::String(v) => format!("'{}'", v.replace('\'', "''")),
            Value::Bytes(v) => {
                let mut out = String::with_capacity(v.len() * 2 + 5);
                out.push_str("'\\x");
                for b in v {
                    out.push_str(&format!("{b:02x}"));
                }
                out.push('\'');
                out
            }
            Value::Timestamp(v) => {
                format!("'{}'", v.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
        }
    }

    /// Render bare, the way key-field equality criteria embed values.
    pub fn bare_literal(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(v) => v.to_string(),
            Value::Int(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::String(v) => v.clone(),
            Value::Bytes(_) | Value::Timestamp(_) => self.sql_literal(),
        }
    }
}

// Convenient From impls
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_literal_escapes_quotes() {
        let v = Value::String("o'clock".into());
        assert_eq!(v.sql_literal(), "'o''clock'");
    }

    #[test]
    fn test_bare_literal_leaves_strings_unquoted() {
        assert_eq!(Value::String("abc".into()).bare_literal(), "abc");
        assert_eq!(Value::Int(123).bare_literal(), "123");
    }

    #[test]
    fn test_bytes_literal_is_hex() {
        assert_eq!(Value::Bytes(vec![0xde, 0xad]).sql_literal(), "'\\xdead'");
    }

    #[test]
    fn test_option_from() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(7i64)), Value::Int(7));
        assert!(Value::Null.is_null());
    }
}
