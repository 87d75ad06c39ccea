use std::collections::HashMap;
use std::path::Path;

use rusqlite::{Connection, params_from_iter};
use tracing::{debug, warn};

use crate::data_type::DataType;
use crate::error::{Error, Result};
use crate::table::{ColumnDef, ForeignKey, Schema, Table, enclose};
use crate::value::Value;

/// The main entry point of the wrapper: one connection to the embedded engine
/// plus a name-indexed catalog of [Table] proxies mirroring the engine's own
/// schema metadata.
///
/// The catalog is rebuilt wholesale by [Database::reload_tables] (invoked once
/// automatically on open) and patched by [Database::create_table]/
/// [Database::drop_table]; lookups never create or refresh implicitly.
///
/// Usage is single-threaded and synchronous: statements execute in caller
/// order, blocking only inside the engine. The borrow checker enforces the
/// single-writer contract on the catalog within one `Database` value.
#[derive(Debug)]
pub struct Database {
    /// The live connection every generated statement is submitted to.
    conn: Connection,
    /// A map of table names to their respective [Table] proxies.
    tables: HashMap<String, Table>,
}

/// Represents the materialized result of a `SELECT` query.
#[derive(Debug)]
pub struct QueryResult {
    /// The names of the columns included in the result set.
    pub columns: Vec<String>,
    /// The actual data, returned as a vector of rows, where each row is a vector of [Value].
    pub rows: Vec<Vec<Value>>,
}

/// One foreign-key edge derived from the catalog, parent side first.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    pub parent_table: String,
    pub parent_column: String,
    pub child_table: String,
    pub child_column: String,
}

impl Database {
    /// Opens (or creates) a database file and loads its catalog.
    ///
    /// `PRAGMA foreign_keys` is switched on so the engine enforces the
    /// relations this wrapper declares.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Opens an in-memory database and loads its (empty) catalog.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys=ON")?;
        let mut db = Self {
            conn,
            tables: HashMap::new(),
        };
        db.reload_tables()?;
        Ok(db)
    }

    /// The underlying engine connection, for anything this wrapper does not
    /// cover. Schema changes made through it are only visible to the catalog
    /// after [Database::reload_tables].
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Queries the engine's authoritative catalog (`sqlite_master` plus the
    /// schema pragmas) and rebuilds the proxy for every discovered table.
    ///
    /// The replacement is wholesale: the new map is fully built before the old
    /// one is discarded, so a failure mid-reload leaves the previous catalog
    /// intact. Tables created or dropped behind this wrapper's back (through
    /// [Database::conn] or another process) are picked up here.
    pub fn reload_tables(&mut self) -> Result<()> {
        let names: Vec<String> = {
            let mut stmt = self.conn.prepare(
                "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY rowid",
            )?;
            let rows = stmt.query_map([], |row| row.get(0))?;
            rows.collect::<rusqlite::Result<_>>()?
        };

        let mut tables = HashMap::with_capacity(names.len());
        for name in names {
            match read_schema(&self.conn, &name) {
                Ok(schema) => {
                    tables.insert(name.clone(), Table::new(name, schema));
                }
                // A table declared outside this vocabulary should not take
                // the rest of the catalog down with it.
                Err(Error::UnknownType(declared)) => {
                    warn!(table = %name, %declared, "skipping table with undescribable type");
                }
                Err(e) => return Err(e),
            }
        }

        debug!(tables = tables.len(), "catalog reloaded");
        self.tables = tables;
        Ok(())
    }

    /// Creates a new table from a schema description.
    ///
    /// Builds the `CREATE TABLE` statement (columns in declaration order,
    /// condition clauses next, foreign keys last), submits it, refreshes the
    /// table's proxy from the engine's metadata, and returns the statement
    /// text for inspection.
    ///
    /// # Errors
    /// [Error::EmptyTableName] or [Error::EmptySchema] before any statement
    /// is built; engine errors (e.g. the table already exists and
    /// `if_not_exists` is false) pass through unchanged.
    ///
    /// # Example
    /// ```
    /// use stitch::{Database, DataType, FormatSpecifier, Value};
    ///
    /// let mut db = Database::open_in_memory().unwrap();
    /// let mut fmt = FormatSpecifier::new();
    /// fmt.add_column("id", DataType::Integer).unwrap();
    /// fmt.add_column("name", DataType::Text).unwrap();
    ///
    /// let stmt = db.create_table(&fmt.generate(), "users", true).unwrap();
    /// assert_eq!(stmt, "CREATE TABLE IF NOT EXISTS \"users\"(id INTEGER, name TEXT)");
    ///
    /// db.insert_one("users", &[Value::Int(1), Value::from("Alice")], false).unwrap();
    /// let result = db.select("users", &[], &[]).unwrap();
    /// assert_eq!(result.rows.len(), 1);
    /// ```
    pub fn create_table(
        &mut self,
        schema: &Schema,
        name: &str,
        if_not_exists: bool,
    ) -> Result<String> {
        if name.is_empty() {
            return Err(Error::EmptyTableName);
        }
        if schema.columns.is_empty() {
            return Err(Error::EmptySchema(name.to_string()));
        }

        let sql = schema.create_stmt(name, if_not_exists);
        self.conn.execute(&sql, [])?;
        debug!(table = name, %sql, "table created");

        // Mirror what the engine actually recorded rather than trusting our input
        let schema = read_schema(&self.conn, name)?;
        self.tables
            .insert(name.to_string(), Table::new(name.to_string(), schema));
        Ok(sql)
    }

    /// Drops a table and evicts its proxy from the catalog.
    ///
    /// # Errors
    /// The engine's error passes through if the table does not exist.
    pub fn drop_table(&mut self, name: &str) -> Result<String> {
        let sql = format!("DROP TABLE {}", enclose(name));
        self.conn.execute(&sql, [])?;
        self.tables.remove(name);
        debug!(table = name, "table dropped");
        Ok(sql)
    }

    /// Retrieves the proxy for a table by name.
    ///
    /// # Errors
    /// [Error::TableNotFound] if the name is absent from the catalog. The
    /// lookup never creates the table or triggers a reload.
    pub fn table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    /// Returns a list of all table names currently in the catalog.
    /// You may need to call [Database::reload_tables] if something is missing.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(|k| k.as_str()).collect()
    }

    /// Executes a `SELECT` built by the table's proxy and materializes the
    /// engine's cursor into a [QueryResult].
    ///
    /// An empty `columns` slice selects `*`; conditions are ANDed predicate
    /// text, passed to the engine verbatim.
    pub fn select(&self, table: &str, columns: &[&str], conditions: &[&str]) -> Result<QueryResult> {
        let sql = self.table(table)?.select_stmt(columns, conditions);

        let mut stmt = self.conn.prepare(&sql)?;
        let result_columns: Vec<String> =
            stmt.column_names().iter().map(|c| c.to_string()).collect();
        let count = stmt.column_count();

        let rows = stmt.query_map([], |row| {
            let mut out = Vec::with_capacity(count);
            for i in 0..count {
                out.push(Value::from(row.get::<_, rusqlite::types::Value>(i)?));
            }
            Ok(out)
        })?;
        let rows = rows.collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(QueryResult {
            columns: result_columns,
            rows,
        })
    }

    /// Inserts one full row positionally, values matching the declared column
    /// order. Returns the statement text; parameters are bound through the
    /// engine driver.
    ///
    /// `or_replace` switches to `INSERT OR REPLACE`, so a row clashing on a
    /// uniqueness constraint updates instead of erroring.
    ///
    /// # Errors
    /// [Error::ArityMismatch] if the value count differs from the declared
    /// column count, raised before any statement reaches the engine.
    pub fn insert_one(&self, table: &str, values: &[Value], or_replace: bool) -> Result<String> {
        let t = self.table(table)?;
        let expected = t.schema.columns.len();
        if values.len() != expected {
            return Err(Error::ArityMismatch {
                table: table.to_string(),
                expected,
                got: values.len(),
            });
        }

        let sql = t.insert_stmt(or_replace);
        self.conn.execute(&sql, params_from_iter(values.iter()))?;
        Ok(sql)
    }

    /// Inserts one row by named columns. Columns absent from `values` are
    /// omitted from the statement, so the engine fills its default
    /// (usually NULL).
    ///
    /// # Errors
    /// [Error::ColumnNotFound] for a name absent from the table's schema.
    pub fn insert_one_named(
        &self,
        table: &str,
        values: &[(&str, Value)],
        or_replace: bool,
    ) -> Result<String> {
        let t = self.table(table)?;
        for (column, _) in values {
            if !t.schema.contains_column(column) {
                return Err(Error::ColumnNotFound(column.to_string()));
            }
        }

        let columns: Vec<&str> = values.iter().map(|(c, _)| *c).collect();
        let sql = t.insert_named_stmt(&columns, or_replace);
        self.conn
            .execute(&sql, params_from_iter(values.iter().map(|(_, v)| v)))?;
        Ok(sql)
    }

    /// Inserts a batch of full rows positionally, all inside one engine
    /// transaction: either every row lands or none does, relying on the
    /// engine's native atomicity for rollback.
    ///
    /// # Errors
    /// [Error::ArityMismatch] if any row's length differs from the declared
    /// column count; every row is checked before any statement reaches the
    /// engine. An engine failure on any row aborts the whole batch.
    pub fn insert_many(
        &mut self,
        table: &str,
        rows: &[Vec<Value>],
        or_replace: bool,
    ) -> Result<String> {
        let (sql, expected) = {
            let t = self.table(table)?;
            (t.insert_stmt(or_replace), t.schema.columns.len())
        };
        for row in rows {
            if row.len() != expected {
                return Err(Error::ArityMismatch {
                    table: table.to_string(),
                    expected,
                    got: row.len(),
                });
            }
        }

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(&sql)?;
            for row in rows {
                stmt.execute(params_from_iter(row.iter()))?;
            }
        }
        tx.commit()?;
        Ok(sql)
    }

    /// Executes a `DELETE` on the table. No LIMIT is attached: every row
    /// matching the conditions is removed, all of them if none are given.
    pub fn delete(&self, table: &str, conditions: &[&str]) -> Result<String> {
        let sql = self.table(table)?.delete_stmt(conditions);
        self.conn.execute(&sql, [])?;
        Ok(sql)
    }

    /// Derives the parent→child foreign-key edges declared across the current
    /// catalog. Reflects the catalog as of the last reload.
    pub fn relationships(&self) -> Vec<Relation> {
        let mut relations = Vec::new();
        for table in self.tables.values() {
            for fk in &table.schema.foreign_keys {
                if let Some((parent_table, parent_column)) = fk.parent() {
                    relations.push(Relation {
                        parent_table: parent_table.to_string(),
                        parent_column: parent_column.to_string(),
                        child_table: table.name.clone(),
                        child_column: fk.column.clone(),
                    });
                }
            }
        }
        relations
    }
}

/// Rebuilds one table's schema description from the engine's pragma metadata:
/// `table_info` for columns, `index_list`/`index_info` for unique groups,
/// `foreign_key_list` for relations.
fn read_schema(conn: &Connection, table: &str) -> Result<Schema> {
    let mut columns = Vec::new();
    {
        let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", enclose(table)))?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let name: String = row.get("name")?;
            let declared: String = row.get("type")?;
            columns.push(ColumnDef {
                name,
                data_type: DataType::from_declared(&declared)?,
            });
        }
    }

    let mut unique_indexes: Vec<String> = Vec::new();
    {
        let mut stmt = conn.prepare(&format!("PRAGMA index_list({})", enclose(table)))?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let unique: bool = row.get("unique")?;
            let origin: String = row.get("origin")?;
            // "pk" indexes restate the primary key; only constraint-made
            // unique indexes become UNIQUE clauses
            if unique && origin != "pk" {
                unique_indexes.push(row.get("name")?);
            }
        }
    }
    // index_list reports newest first; declaration order reads better
    unique_indexes.reverse();

    let mut conds = Vec::new();
    for index in &unique_indexes {
        let mut stmt = conn.prepare(&format!("PRAGMA index_info({})", enclose(index)))?;
        let mut rows = stmt.query([])?;
        let mut group = Vec::new();
        while let Some(row) = rows.next()? {
            let column: String = row.get("name")?;
            group.push(column);
        }
        conds.push(format!("UNIQUE({})", group.join(", ")));
    }

    let mut foreign_keys = Vec::new();
    {
        let mut stmt = conn.prepare(&format!("PRAGMA foreign_key_list({})", enclose(table)))?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let parent: String = row.get("table")?;
            let column: String = row.get("from")?;
            // "to" is NULL when the relation points at the parent's implicit
            // primary key
            let to: Option<String> = row.get("to")?;
            let reference = match to {
                Some(to) => format!("{}({})", parent, to),
                None => parent,
            };
            foreign_keys.push(ForeignKey { column, reference });
        }
    }
    // foreign_key_list also reports newest first; restore declaration order
    foreign_keys.reverse();

    Ok(Schema {
        columns,
        conds,
        foreign_keys,
    })
}
