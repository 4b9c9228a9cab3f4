//! Filtering Example
//!
//! This example demonstrates:
//! - Filtering on numeric and text columns
//! - Chaining filters
//! - Exporting a result as JSON

use columnar::Table;
use std::error::Error;
use std::path::PathBuf;

type Cities = (i64, String, String, u32);

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn print_cities(table: &Table<Cities>) {
    for (id, city, country, population) in table.rows() {
        println!("   {:>2} {:<10} {:<10} {:>9}", id, city, country, population);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    println!("=== Columnar Filtering Example ===\n");

    let cities = Table::<Cities>::load(data_path("cities.csv"))?;
    println!("1. All cities ({} rows):", cities.row_count());
    print_cities(&cities);
    println!();

    // 2. Text predicate
    let spain = cities.filter::<String, _>("country", |c| c == "Spain")?;
    println!("2. country == \"Spain\" ({} rows):", spain.row_count());
    print_cities(&spain);
    println!();

    // 3. Chained numeric predicate
    let large = spain.filter::<u32, _>("population", |p| *p > 700_000)?;
    println!("3. ...and population > 700000 ({} rows):", large.row_count());
    print_cities(&large);
    println!();

    // 4. No matches still carries the schema
    let none = cities.filter::<u32, _>("population", |p| *p > 10_000_000)?;
    println!(
        "4. population > 10000000: {} rows, columns {:?}\n",
        none.row_count(),
        none.column_names()
    );

    // 5. JSON
    println!("5. Result of step 3 as JSON:");
    println!("{}", large.to_json()?);

    println!("\n=== Example Complete ===");
    Ok(())
}
