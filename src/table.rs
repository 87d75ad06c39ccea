use crate::data_type::DataType;

/// Column definition in the schema
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: DataType,
}

/// A foreign-key relation from a local column to a `"parent_table(parent_column)"`
/// reference, kept as the text it is emitted as.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKey {
    pub column: String,
    pub reference: String,
}

impl ForeignKey {
    /// Splits the reference text into `(parent_table, parent_column)`.
    ///
    /// Returns `None` if the text does not have the `table(column)` shape.
    pub fn parent(&self) -> Option<(&str, &str)> {
        let open = self.reference.find('(')?;
        let close = self.reference.rfind(')')?;
        if close <= open {
            return None;
        }
        Some((&self.reference[..open], &self.reference[open + 1..close]))
    }
}

/// Canonical description of one table: ordered columns, extra condition
/// clauses (e.g. `UNIQUE(a, b)`), and foreign-key relations.
///
/// Usually produced by [FormatSpecifier](crate::FormatSpecifier) or re-derived
/// from the engine's catalog on reload. Constructing one literally is allowed;
/// in that case nothing here checks that foreign-key columns exist, the engine
/// rejects the statement at execution time instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub columns: Vec<ColumnDef>,
    pub conds: Vec<String>,
    pub foreign_keys: Vec<ForeignKey>,
}

impl Schema {
    /// Returns true if a column with this name is declared.
    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Builds the `CREATE TABLE` statement text for this schema.
    ///
    /// Column clauses follow declaration order, condition clauses come after
    /// the columns, and one `FOREIGN KEY(local) REFERENCES parent(col)` clause
    /// is appended per declared relation.
    pub fn create_stmt(&self, name: &str, if_not_exists: bool) -> String {
        let mut clauses: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("{} {}", c.name, c.data_type.as_sql()))
            .collect();
        clauses.extend(self.conds.iter().cloned());
        clauses.extend(
            self.foreign_keys
                .iter()
                .map(|fk| format!("FOREIGN KEY({}) REFERENCES {}", fk.column, fk.reference)),
        );

        format!(
            "CREATE TABLE{} {}({})",
            if if_not_exists { " IF NOT EXISTS" } else { "" },
            enclose(name),
            clauses.join(", ")
        )
    }
}

/// An in-process proxy for one table known to the engine: its name plus the
/// schema description it was created with (or re-derived from the catalog).
///
/// A proxy builds statement text only; it holds no connection and stores no
/// data. Proxies are regenerated wholesale whenever the catalog is reloaded,
/// never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub schema: Schema,
}

impl Table {
    pub fn new(name: String, schema: Schema) -> Self {
        Self { name, schema }
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.schema.column_names()
    }

    /// Builds a `SELECT` statement.
    ///
    /// An empty `columns` slice selects `*`. Conditions are caller-supplied
    /// predicate text (e.g. `"val < 10"`) joined with ` AND ` verbatim; this
    /// layer does not parse or validate them. An empty `conditions` slice
    /// omits the `WHERE` clause.
    pub fn select_stmt(&self, columns: &[&str], conditions: &[&str]) -> String {
        let cols = if columns.is_empty() {
            "*".to_string()
        } else {
            columns.join(",")
        };
        format!(
            "SELECT {} FROM {}{}",
            cols,
            enclose(&self.name),
            stitch_conditions(conditions)
        )
    }

    /// Builds a full positional `INSERT` statement, one `?` placeholder per
    /// declared column. `or_replace` switches to `INSERT OR REPLACE`.
    pub fn insert_stmt(&self, or_replace: bool) -> String {
        format!(
            "INSERT{} INTO {} VALUES({})",
            if or_replace { " OR REPLACE" } else { "" },
            enclose(&self.name),
            question_marks(self.schema.columns.len())
        )
    }

    /// Builds an explicit column-list `INSERT` statement for the named
    /// columns. Columns left out of the list are omitted from the statement,
    /// so the engine applies its default (usually NULL).
    pub fn insert_named_stmt(&self, columns: &[&str], or_replace: bool) -> String {
        format!(
            "INSERT{} INTO {}({}) VALUES({})",
            if or_replace { " OR REPLACE" } else { "" },
            enclose(&self.name),
            columns.join(","),
            question_marks(columns.len())
        )
    }

    /// Builds a `DELETE` statement. There is no LIMIT: every row matching the
    /// conditions goes. An empty `conditions` slice deletes all rows.
    pub fn delete_stmt(&self, conditions: &[&str]) -> String {
        format!(
            "DELETE FROM {}{}",
            enclose(&self.name),
            stitch_conditions(conditions)
        )
    }
}

/// Encloses a table name in quotes, so names the bare grammar would reject
/// (leading digits, for example) still work.
pub(crate) fn enclose(name: &str) -> String {
    // quotes inside a quoted identifier are escaped by doubling
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn question_marks(n: usize) -> String {
    vec!["?"; n].join(",")
}

fn stitch_conditions(conditions: &[&str]) -> String {
    if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::new(
            "t".into(),
            Schema {
                columns: vec![
                    ColumnDef {
                        name: "id".into(),
                        data_type: DataType::Integer,
                    },
                    ColumnDef {
                        name: "val".into(),
                        data_type: DataType::Real,
                    },
                ],
                conds: vec!["UNIQUE(id)".into()],
                foreign_keys: vec![],
            },
        )
    }

    #[test]
    fn test_create_stmt() {
        let table = sample_table();
        assert_eq!(
            table.schema.create_stmt("t", false),
            "CREATE TABLE \"t\"(id INTEGER, val REAL, UNIQUE(id))"
        );
        assert_eq!(
            table.schema.create_stmt("t", true),
            "CREATE TABLE IF NOT EXISTS \"t\"(id INTEGER, val REAL, UNIQUE(id))"
        );
    }

    #[test]
    fn test_create_stmt_without_conds() {
        let schema = Schema {
            columns: vec![ColumnDef {
                name: "a".into(),
                data_type: DataType::Text,
            }],
            conds: vec![],
            foreign_keys: vec![],
        };
        assert_eq!(schema.create_stmt("plain", false), "CREATE TABLE \"plain\"(a TEXT)");
    }

    #[test]
    fn test_create_stmt_with_foreign_keys() {
        let schema = Schema {
            columns: vec![
                ColumnDef {
                    name: "id".into(),
                    data_type: DataType::Integer,
                },
                ColumnDef {
                    name: "owner".into(),
                    data_type: DataType::Integer,
                },
            ],
            conds: vec![],
            foreign_keys: vec![ForeignKey {
                column: "owner".into(),
                reference: "users(id)".into(),
            }],
        };
        assert_eq!(
            schema.create_stmt("pets", false),
            "CREATE TABLE \"pets\"(id INTEGER, owner INTEGER, FOREIGN KEY(owner) REFERENCES users(id))"
        );
    }

    #[test]
    fn test_select_stmt() {
        let table = sample_table();

        assert_eq!(table.select_stmt(&[], &[]), "SELECT * FROM \"t\"");
        assert_eq!(table.select_stmt(&["id"], &[]), "SELECT id FROM \"t\"");
        assert_eq!(
            table.select_stmt(&["id", "val"], &["id > 5", "val < 2.0"]),
            "SELECT id,val FROM \"t\" WHERE id > 5 AND val < 2.0"
        );
    }

    #[test]
    fn test_insert_stmt() {
        let table = sample_table();

        assert_eq!(table.insert_stmt(false), "INSERT INTO \"t\" VALUES(?,?)");
        assert_eq!(
            table.insert_stmt(true),
            "INSERT OR REPLACE INTO \"t\" VALUES(?,?)"
        );
    }

    #[test]
    fn test_insert_named_stmt() {
        let table = sample_table();

        assert_eq!(
            table.insert_named_stmt(&["id"], false),
            "INSERT INTO \"t\"(id) VALUES(?)"
        );
        assert_eq!(
            table.insert_named_stmt(&["id", "val"], true),
            "INSERT OR REPLACE INTO \"t\"(id,val) VALUES(?,?)"
        );
    }

    #[test]
    fn test_delete_stmt() {
        let table = sample_table();

        assert_eq!(table.delete_stmt(&[]), "DELETE FROM \"t\"");
        assert_eq!(
            table.delete_stmt(&["id < 10", "val > 0.5"]),
            "DELETE FROM \"t\" WHERE id < 10 AND val > 0.5"
        );
    }

    #[test]
    fn test_enclose_doubles_embedded_quotes() {
        assert_eq!(enclose("plain"), "\"plain\"");
        assert_eq!(enclose("we\"ird"), "\"we\"\"ird\"");

        let table = Table::new("we\"ird".to_string(), sample_table().schema);
        assert_eq!(table.select_stmt(&[], &[]), "SELECT * FROM \"we\"\"ird\"");
    }

    #[test]
    fn test_foreign_key_parent() {
        let fk = ForeignKey {
            column: "owner".into(),
            reference: "users(id)".into(),
        };
        assert_eq!(fk.parent(), Some(("users", "id")));

        let bad = ForeignKey {
            column: "owner".into(),
            reference: "users".into(),
        };
        assert_eq!(bad.parent(), None);
    }

    #[test]
    fn test_column_names() {
        let table = sample_table();
        assert_eq!(table.column_names(), vec!["id", "val"]);
    }
}
