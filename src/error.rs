use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building schemas and statements, or surfaced by the
/// embedded engine during execution.
///
/// Engine errors are passed through untouched: this layer generates statement
/// text, the engine decides whether it executes.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Column already declared: {0}")]
    DuplicateColumn(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Unknown declared type: {0}")]
    UnknownType(String),

    #[error("Table name cannot be empty")]
    EmptyTableName,

    #[error("Table {0} has no columns")]
    EmptySchema(String),

    #[error("Row has {got} values, table {table} has {expected} columns")]
    ArityMismatch {
        table: String,
        expected: usize,
        got: usize,
    },

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error(transparent)]
    Engine(#[from] rusqlite::Error),
}
