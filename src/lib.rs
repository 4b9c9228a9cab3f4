//! Columnar - Strongly-Typed Columnar Tables
//!
//! Loads delimited text into a table whose schema is a Rust tuple type.
//! Each schema position is stored as its own contiguous `Vec`, columns are
//! exposed as borrowed slices, rows are materialized as tuples, and filtering
//! produces a new table that owns copies of the retained rows.
//!
//! ```
//! use columnar::{Table, TableError};
//!
//! let table = Table::<(i32, f64, String)>::from_csv(
//!     "id,energy,kind\n1,12.5,muon\n2,17.25,electron\n3,9.0,muon\n",
//! )
//! .unwrap();
//!
//! let energies: &[f64] = table.column::<1>();
//! assert_eq!(energies.len(), 3);
//!
//! let muons = table.filter::<String, _>("kind", |k| k == "muon").unwrap();
//! assert_eq!(muons.column::<0>(), &[1, 3]);
//!
//! assert_eq!(table.row(3).unwrap_err(), TableError::RowIndexOutOfBounds);
//! ```

pub mod column;
pub mod csv;
pub mod error;
pub mod schema;
pub mod table;

pub use column::{CellType, ColumnSlice, DataType, Value};
pub use csv::{read_table, ReadOptions};
pub use error::{Result, TableError};
pub use schema::{ColumnAt, Schema};
pub use table::{Table, TableRowIterator};
