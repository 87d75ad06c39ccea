use std::sync::Arc;

use rusqlite::ToSql;
use rusqlite::types::{ToSqlOutput, ValueRef};

use crate::data_type::DataType;

/// A single value passed to or read back from the embedded engine.
///
/// This enum wraps the Rust types this wrapper binds as statement parameters
/// into a single type, including support for SQL `NULL`. It mirrors SQLite's
/// storage classes; type coercion against the declared column type is the
/// engine's job, not ours.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Represents an empty or missing value.
    Null,
    /// A 64-bit signed integer value.
    Int(i64),
    /// A 64-bit floating-point value.
    Real(f64),
    /// A UTF-8 string value, wrapped in an [Arc] for cheap cloning when rows
    /// are materialized out of the engine's cursor.
    Text(Arc<str>),
    /// A raw byte sequence.
    Blob(Vec<u8>),
}

impl Value {
    /// Returns `true` if the value is [Value::Null].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the inner integer value if this is a [Value::Int].
    /// Otherwise, returns `None`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the inner float value if this is a [Value::Real].
    /// Otherwise, returns `None`.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Self::Real(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns a reference to the inner string slice if this is a [Value::Text].
    /// Otherwise, returns `None`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a reference to the inner bytes if this is a [Value::Blob].
    /// Otherwise, returns `None`.
    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Self::Blob(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the declared [DataType] this value maps to.
    ///
    /// Returns `None` for [Value::Null], which is untyped until the engine
    /// places it in a column.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Self::Null => None,
            Self::Int(_) => Some(DataType::Integer),
            Self::Real(_) => Some(DataType::Real),
            Self::Text(_) => Some(DataType::Text),
            Self::Blob(_) => Some(DataType::Blob),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(Arc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(Arc::from(v.as_str()))
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

/// Parameter binding into the engine driver.
impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Borrowed(ValueRef::Null),
            Value::Int(i) => ToSqlOutput::Borrowed(ValueRef::Integer(*i)),
            Value::Real(f) => ToSqlOutput::Borrowed(ValueRef::Real(*f)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Value::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
        })
    }
}

/// Materialization out of the engine driver's result values.
impl From<rusqlite::types::Value> for Value {
    fn from(v: rusqlite::types::Value) -> Self {
        match v {
            rusqlite::types::Value::Null => Value::Null,
            rusqlite::types::Value::Integer(i) => Value::Int(i),
            rusqlite::types::Value::Real(f) => Value::Real(f),
            rusqlite::types::Value::Text(s) => Value::Text(Arc::from(s.as_str())),
            rusqlite::types::Value::Blob(b) => Value::Blob(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_type::DataType;

    #[test]
    fn test_is_null() {
        assert!(Value::Null.is_null());
        assert!(!Value::Int(1).is_null());
        assert!(!Value::Real(1.0).is_null());
        assert!(!Value::Text("x".into()).is_null());
        assert!(!Value::Blob(vec![0u8]).is_null());
    }

    #[test]
    fn test_as_int() {
        assert_eq!(Value::Int(42).as_int(), Some(42));
        assert_eq!(Value::Null.as_int(), None);
        assert_eq!(Value::Real(1.0).as_int(), None);
        assert_eq!(Value::Text("42".into()).as_int(), None);
    }

    #[test]
    fn test_as_real() {
        assert_eq!(Value::Real(3.14).as_real(), Some(3.14));
        assert_eq!(Value::Null.as_real(), None);
        assert_eq!(Value::Int(1).as_real(), None);
        assert_eq!(Value::Text("3.14".into()).as_real(), None);
    }

    #[test]
    fn test_as_str() {
        let v = Value::Text("hello".into());

        assert_eq!(v.as_str(), Some("hello"));
        assert_eq!(Value::Null.as_str(), None);
        assert_eq!(Value::Int(1).as_str(), None);
        assert_eq!(Value::Real(1.0).as_str(), None);
    }

    #[test]
    fn test_as_blob() {
        assert_eq!(Value::Blob(vec![1, 2, 3]).as_blob(), Some(&[1u8, 2, 3][..]));
        assert_eq!(Value::Null.as_blob(), None);
        assert_eq!(Value::Int(1).as_blob(), None);
    }

    #[test]
    fn test_data_type() {
        assert_eq!(Value::Null.data_type(), None);
        assert_eq!(Value::Int(1).data_type(), Some(DataType::Integer));
        assert_eq!(Value::Real(1.0).data_type(), Some(DataType::Real));
        assert_eq!(Value::Text("x".into()).data_type(), Some(DataType::Text));
        assert_eq!(Value::Blob(vec![]).data_type(), Some(DataType::Blob));
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(7i64), Value::Int(7));
        assert_eq!(Value::from(2.5f64), Value::Real(2.5));
        assert_eq!(Value::from("abc"), Value::Text("abc".into()));
        assert_eq!(Value::from("abc".to_string()), Value::Text("abc".into()));
        assert_eq!(Value::from(vec![9u8]), Value::Blob(vec![9u8]));
    }

    #[test]
    fn test_driver_value_round_trip() {
        let values = vec![
            Value::Null,
            Value::Int(42),
            Value::Real(3.14),
            Value::Text("hello".into()),
            Value::Blob(vec![0xde, 0xad]),
        ];

        for v in values {
            let driver: rusqlite::types::Value = match &v {
                Value::Null => rusqlite::types::Value::Null,
                Value::Int(i) => rusqlite::types::Value::Integer(*i),
                Value::Real(f) => rusqlite::types::Value::Real(*f),
                Value::Text(s) => rusqlite::types::Value::Text(s.to_string()),
                Value::Blob(b) => rusqlite::types::Value::Blob(b.clone()),
            };
            assert_eq!(Value::from(driver), v);
        }
    }
}
