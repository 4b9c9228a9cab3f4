//! Basic Usage Example
//!
//! This example demonstrates:
//! - Declaring a schema as a tuple type
//! - Loading a CSV file into a table
//! - Reading columns by position and by name
//! - Materializing rows

use columnar::{DataType, ReadOptions, Table, TableError};
use std::error::Error;
use std::path::PathBuf;

type Simple = (i32, i32);

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn kind(data_type: DataType) -> &'static str {
    if data_type.is_text() {
        "text"
    } else if data_type.is_float() {
        "floating point"
    } else {
        debug_assert!(data_type.is_integer());
        "integer"
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    println!("=== Columnar Basic Usage Example ===\n");

    // 1. Load
    println!("1. Loading simple.csv as (i32, i32)...");
    let table = Table::<Simple>::load(data_path("simple.csv"))?;
    println!("   {} rows x {} columns", table.row_count(), table.column_count());
    for (name, data_type) in table.fields() {
        println!("   - {}: {} ({})", name, data_type, kind(data_type));
    }
    println!();

    // 2. Positional access
    println!("2. Reading columns by position...");
    let ids = table.column::<0>();
    let values = table.column::<1>();
    println!("   ids:    {:?}", ids);
    println!("   values: {:?}", values);
    println!("   sum of values: {}\n", values.iter().sum::<i32>());

    // 3. Named access
    println!("3. Reading a column by name...");
    let by_name = table.column_by_name::<i32>("value")?;
    println!("   'value' has {} entries", by_name.len());
    match table.column_by_name::<f64>("value") {
        Err(TableError::ParseError) => println!("   'value' is not FLOAT64, as expected"),
        other => println!("   unexpected: {:?}", other),
    }
    println!();

    // 4. Rows
    println!("4. Materializing rows...");
    for (id, value) in table.rows() {
        println!("   Row {}: value = {}", id, value);
    }
    match table.row(table.row_count()) {
        Err(err) => println!("   row {}: {}", table.row_count(), err),
        Ok(row) => println!("   unexpected row: {:?}", row),
    }
    println!();

    // 5. Errors
    println!("5. Loading a missing file...");
    match Table::<Simple>::load(data_path("missing.csv")) {
        Err(err) => println!("   {}", err),
        Ok(_) => println!("   unexpectedly loaded"),
    }
    println!();

    // 6. Other delimiters
    println!("6. Reading semicolon-separated text from memory...");
    let options = ReadOptions::with_delimiter(';');
    let ports = Table::<(String, u16)>::from_reader("service;port\nhttp;80\nhttps;443\n".as_bytes(), &options)?;
    for (service, port) in ports.rows() {
        println!("   {} -> {}", service, port);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
