mod common;

use columnar::{DataType, Table, TableError, Value};
use common::{data_path, init_logging};

type Particles = (i32, f64, f64, f64, f64);
type Cities = (i64, String, String, u32);

fn particles() -> Table<Particles> {
    init_logging();
    Table::load(data_path("particles.csv")).unwrap()
}

fn cities() -> Table<Cities> {
    Table::load(data_path("cities.csv")).unwrap()
}

#[test]
fn positional_and_named_views_agree() {
    let table = particles();

    let by_position: &[f64] = table.column::<4>();
    let by_name = table.column_by_name::<f64>("energy").unwrap();
    assert_eq!(by_position, by_name);
    assert!(std::ptr::eq(by_position, by_name));
}

#[test]
fn views_match_materialized_rows() {
    let table = particles();
    let ids = table.column::<0>();
    let px = table.column::<1>();
    let energy = table.column::<4>();

    for i in 0..table.row_count() {
        let (id, x, _, _, e) = table.row(i).unwrap();
        assert_eq!(ids[i], id);
        assert_eq!(px[i], x);
        assert_eq!(energy[i], e);
    }
}

#[test]
fn every_column_has_row_count_entries() {
    let table = cities();
    let n = table.row_count();

    assert_eq!(n, 6);
    assert_eq!(table.column::<0>().len(), n);
    assert_eq!(table.column::<1>().len(), n);
    assert_eq!(table.column::<2>().len(), n);
    assert_eq!(table.column::<3>().len(), n);
}

#[test]
fn text_columns() {
    let table = cities();

    let countries = table.column_by_name::<String>("country").unwrap();
    let spanish = countries.iter().filter(|c| c.as_str() == "Spain").count();
    assert_eq!(spanish, 3);

    let total: u64 = table.column::<3>().iter().map(|&p| u64::from(p)).sum();
    assert_eq!(total, 6_097_308);
}

#[test]
fn unknown_column_name() {
    let table = particles();
    assert_eq!(
        table.column_by_name::<f64>("momentum").unwrap_err(),
        TableError::ColumnNotFound
    );
    // Names are case sensitive
    assert_eq!(
        table.column_by_name::<f64>("Energy").unwrap_err(),
        TableError::ColumnNotFound
    );
}

#[test]
fn wrong_type_for_name() {
    let table = particles();
    assert_eq!(
        table.column_by_name::<i32>("energy").unwrap_err(),
        TableError::ParseError
    );
    assert_eq!(
        table.column_by_name::<f32>("px").unwrap_err(),
        TableError::ParseError
    );
    assert_eq!(
        table.column_by_name::<String>("id").unwrap_err(),
        TableError::ParseError
    );
}

#[test]
fn row_bounds() {
    let table = particles();

    assert_eq!(table.row(0).unwrap().0, 1);
    assert_eq!(table.row(9).unwrap().0, 10);
    assert_eq!(table.row(10).unwrap_err(), TableError::RowIndexOutOfBounds);
    assert_eq!(table.row(usize::MAX).unwrap_err(), TableError::RowIndexOutOfBounds);
}

#[test]
fn rows_are_independent_copies() {
    let table = cities();
    let (_, mut city, _, _) = table.row(0).unwrap();
    city.push_str(" (capital)");

    assert_eq!(table.row(0).unwrap().1, "Lisbon");
    assert_eq!(table.column::<1>()[0], "Lisbon");
}

#[test]
fn rows_iterator_visits_in_order() {
    let table = cities();
    let rows = table.rows();
    assert_eq!(rows.len(), 6);

    let names: Vec<String> = rows.map(|(_, city, _, _)| city).collect();
    assert_eq!(
        names,
        vec!["Lisbon", "Porto", "Madrid", "Seville", "Valencia", "Lyon"]
    );
}

#[test]
fn schema_introspection() {
    let table = cities();

    assert_eq!(table.column_index("city"), Some(1));
    assert_eq!(table.column_index("mayor"), None);
    assert_eq!(
        table.data_types(),
        vec![DataType::Int64, DataType::Utf8, DataType::Utf8, DataType::UInt32]
    );

    let fields: Vec<(&str, DataType)> = table.fields().collect();
    assert_eq!(fields[3], ("population", DataType::UInt32));
}

#[test]
fn dynamic_values() {
    let table = cities();

    assert_eq!(table.value(2, 1), Some(Value::Text("Madrid")));
    assert_eq!(table.value(2, 3).and_then(|v| v.as_u64()), Some(3_305_408));
    assert_eq!(table.value(6, 0), None);
    assert_eq!(table.value(0, 4), None);
}

#[test]
fn json_export() {
    let table = Table::<(i32, i32)>::load(data_path("simple.csv")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&table.to_json().unwrap()).unwrap();

    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["id"], 1);
    assert_eq!(rows[4]["value"], 50);
}
