use stitch::{DataType, Database, FormatSpecifier, Value};

fn main() -> stitch::Result<()> {
    let mut db = Database::open_in_memory()?;

    let mut fmt = FormatSpecifier::new();
    fmt.add_column("id", DataType::Integer)?;
    fmt.add_column("val", DataType::Real)?;
    fmt.add_uniques(&["id"])?;

    let stmt = db.create_table(&fmt.generate(), "t", true)?;
    println!("{}", stmt);

    db.insert_one("t", &[Value::Int(1), Value::Real(2.0)], false)?;
    db.insert_one("t", &[Value::Int(1), Value::Real(9.0)], true)?;

    let result = db.select("t", &[], &[])?;
    assert_eq!(result.rows, vec![vec![Value::Int(1), Value::Real(9.0)]]);

    println!("✅ All statements executed!");
    Ok(())
}
