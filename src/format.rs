use crate::data_type::DataType;
use crate::error::{Error, Result};
use crate::table::{ColumnDef, ForeignKey, Schema};

/// Accumulates typed column declarations, uniqueness groups, and foreign-key
/// relations, then emits an immutable [Schema] snapshot.
///
/// Declarations are validated as they are added, before any statement text is
/// built: duplicate column names and constraints over undeclared columns are
/// rejected here rather than by the engine.
///
/// # Example
/// ```
/// use stitch::{DataType, FormatSpecifier};
///
/// let mut fmt = FormatSpecifier::new();
/// fmt.add_column("id", DataType::Integer).unwrap();
/// fmt.add_column("val", DataType::Real).unwrap();
/// fmt.add_uniques(&["id"]).unwrap();
///
/// let schema = fmt.generate();
/// assert_eq!(schema.conds, vec!["UNIQUE(id)".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatSpecifier {
    columns: Vec<ColumnDef>,
    conds: Vec<String>,
    foreign_keys: Vec<ForeignKey>,
}

impl FormatSpecifier {
    /// Creates an empty specifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column declaration.
    ///
    /// # Errors
    /// Returns [Error::DuplicateColumn] if a column with this name was
    /// already added.
    pub fn add_column(&mut self, name: &str, data_type: DataType) -> Result<()> {
        if self.columns.iter().any(|c| c.name == name) {
            return Err(Error::DuplicateColumn(name.to_string()));
        }
        self.columns.push(ColumnDef {
            name: name.to_string(),
            data_type,
        });
        Ok(())
    }

    /// Records a grouped uniqueness constraint over the named columns,
    /// emitted as a `UNIQUE(a, b)` clause.
    ///
    /// # Errors
    /// Returns [Error::ColumnNotFound] if any name was not previously added
    /// via [FormatSpecifier::add_column].
    pub fn add_uniques(&mut self, names: &[&str]) -> Result<()> {
        for name in names {
            if !self.columns.iter().any(|c| c.name == *name) {
                return Err(Error::ColumnNotFound(name.to_string()));
            }
        }
        self.conds.push(format!("UNIQUE({})", names.join(", ")));
        Ok(())
    }

    /// Records a foreign-key relation from a local column to a
    /// `"parent_table(parent_column)"` reference.
    ///
    /// The parent table and column are not checked for existence; the engine
    /// does that when the create statement executes.
    ///
    /// # Errors
    /// Returns [Error::ColumnNotFound] if the local column is unknown.
    pub fn add_foreign_key(&mut self, column: &str, reference: &str) -> Result<()> {
        if !self.columns.iter().any(|c| c.name == column) {
            return Err(Error::ColumnNotFound(column.to_string()));
        }
        self.foreign_keys.push(ForeignKey {
            column: column.to_string(),
            reference: reference.to_string(),
        });
        Ok(())
    }

    /// Emits a [Schema] snapshot of the accumulated state.
    ///
    /// Pure: calling it repeatedly without further mutation yields
    /// structurally identical results.
    pub fn generate(&self) -> Schema {
        Schema {
            columns: self.columns.clone(),
            conds: self.conds.clone(),
            foreign_keys: self.foreign_keys.clone(),
        }
    }

    /// Resets all accumulated state.
    pub fn clear(&mut self) {
        self.columns.clear();
        self.conds.clear();
        self.foreign_keys.clear();
    }

    /// Names of the columns declared so far, in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}
