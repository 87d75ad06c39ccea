use std::fmt;

use crate::error::{Error, Result};

/// Declared column types, matching SQLite's storage-class vocabulary.
/// These tags define the structure of columns in a schema description and the
/// text emitted into `CREATE TABLE` statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// A 64-bit signed integer, declared as `INTEGER`.
    Integer,
    /// A 64-bit floating-point number, declared as `REAL`.
    Real,
    /// A variable-length UTF-8 character string, declared as `TEXT`.
    Text,
    /// A raw byte sequence, declared as `BLOB`.
    Blob,
}

impl DataType {
    /// The canonical declared-type keyword written into generated DDL.
    pub fn as_sql(&self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::Real => "REAL",
            DataType::Text => "TEXT",
            DataType::Blob => "BLOB",
        }
    }

    /// Recovers a type tag from the declared-type text the engine stores in
    /// its catalog.
    ///
    /// SQLite keeps whatever type text the table was created with (`int`,
    /// `VARCHAR(20)`, `DOUBLE`, ...), so matching is prefix-based and
    /// case-insensitive, following the engine's own affinity rules.
    ///
    /// # Errors
    /// Returns [Error::UnknownType] for declared text outside the vocabulary
    /// this wrapper speaks.
    pub fn from_declared(declared: &str) -> Result<Self> {
        let lower = declared.trim().to_ascii_lowercase();
        if lower.starts_with("int") {
            Ok(DataType::Integer)
        } else if lower.starts_with("text")
            || lower.starts_with("char")
            || lower.starts_with("varchar")
        {
            Ok(DataType::Text)
        } else if lower.starts_with("real")
            || lower.starts_with("double")
            || lower.starts_with("float")
            // NUMERIC affinity admits both integers and reals; Real is the
            // widest single tag this vocabulary has for it
            || lower.starts_with("numeric")
        {
            Ok(DataType::Real)
        } else if lower.starts_with("blob") {
            Ok(DataType::Blob)
        } else {
            Err(Error::UnknownType(declared.to_string()))
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}
