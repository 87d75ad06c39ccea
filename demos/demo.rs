use stitch::{Condition, DataType, Database, FormatSpecifier, Value};

fn main() -> stitch::Result<()> {
    println!("SQLite Statement-Builder Demo\n");

    // Open an in-memory database; the catalog loads automatically
    let mut db = Database::open_in_memory()?;

    // Describe the "users" table with a format specifier
    let mut fmt = FormatSpecifier::new();
    fmt.add_column("id", DataType::Integer)?;
    fmt.add_column("name", DataType::Text)?;
    fmt.add_column("age", DataType::Integer)?;
    fmt.add_uniques(&["id"])?;

    let stmt = db.create_table(&fmt.generate(), "users", true)?;
    println!("Created table: {}", stmt);

    // A child table pointing back at users
    let mut fmt = FormatSpecifier::new();
    fmt.add_column("name", DataType::Text)?;
    fmt.add_column("owner", DataType::Integer)?;
    fmt.add_foreign_key("owner", "users(id)")?;
    db.create_table(&fmt.generate(), "pets", true)?;

    // Insert data
    println!("Inserting data...");
    db.insert_many(
        "users",
        &[
            vec![Value::Int(1), Value::from("Alice"), Value::Int(30)],
            vec![Value::Int(2), Value::from("Bob"), Value::Null], // Bob's age is unknown
            vec![Value::Int(3), Value::from("Charlie"), Value::Int(25)],
        ],
        false,
    )?;
    db.insert_one("pets", &[Value::from("Rex"), Value::Int(1)], false)?;

    // Named insert: missing columns stay NULL
    db.insert_one_named("users", &[("id", Value::Int(4))], false)?;

    // Read and print rows
    println!("\nReading data:");
    println!("{:<5} {:<10} {:<5}", "ID", "NAME", "AGE");
    println!("{}", "-".repeat(25));

    let cond = Condition::new("id < 10").and("id > 0");
    let result = db.select("users", &[], &[cond.as_str()])?;
    for row in &result.rows {
        let id = row[0].as_int().map(|i| i.to_string()).unwrap_or("?".into());
        let name = row[1].as_str().unwrap_or("NULL").to_string();
        let age = row[2].as_int().map(|i| i.to_string()).unwrap_or("NULL".into());
        println!("{:<5} {:<10} {:<5}", id, name, age);
    }

    // List tables and relationships
    println!("\nTables in database:");
    for table_name in db.table_names() {
        println!("  - {}", table_name);
    }

    println!("\nForeign-key relationships:");
    for rel in db.relationships() {
        println!(
            "  {}({}) <- {}({})",
            rel.parent_table, rel.parent_column, rel.child_table, rel.child_column
        );
    }

    Ok(())
}
