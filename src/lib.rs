pub mod condition;
pub mod data_type;
pub mod database;
pub mod error;
pub mod format;
pub mod table;
pub mod value;

pub use condition::Condition;
pub use data_type::DataType;
pub use database::{Database, QueryResult, Relation};
pub use error::{Error, Result};
pub use format::FormatSpecifier;
pub use table::{ColumnDef, ForeignKey, Schema, Table};
pub use value::Value;
