//! Columnar Table Implementation
//!
//! A Table is a fixed schema plus one densely packed column per schema
//! position. Tables are immutable once built: they come out of the CSV
//! loader or out of [`Table::filter`], which always produces a new,
//! independently owned table.
//!
//! # Examples
//!
//! ```
//! use columnar::Table;
//!
//! let csv = "id,value\n1,10\n2,20\n3,30\n4,40\n5,50\n";
//! let table = Table::<(i32, i32)>::from_csv(csv).unwrap();
//!
//! // Zero-copy positional view, type fixed by the schema
//! let values: &[i32] = table.column::<1>();
//! assert_eq!(values, &[10, 20, 30, 40, 50]);
//!
//! // Derived table owning copies of the matching rows
//! let high = table.filter::<i32, _>("value", |v| *v > 30).unwrap();
//! assert_eq!(high.row(0).unwrap(), (4, 40));
//! assert_eq!(high.row(1).unwrap(), (5, 50));
//! ```

use crate::column::{CellType, DataType, Value};
use crate::csv::{read_table, ReadOptions};
use crate::error::{Result, TableError};
use crate::schema::{ColumnAt, Schema};
use log::debug;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Root table owning its data.
///
/// `S` is the row tuple, e.g. `(i32, f64, String)`; it fixes the number of
/// columns and the type of each one.
#[derive(Clone)]
pub struct Table<S: Schema> {
    names: Vec<String>,
    columns: S::Columns,
    row_count: usize,
}

impl<S: Schema> Table<S> {
    /// Assemble a table from already validated parts. Every column in
    /// `columns` must hold exactly `row_count` values.
    pub(crate) fn from_parts(names: Vec<String>, columns: S::Columns, row_count: usize) -> Self {
        debug_assert_eq!(names.len(), S::WIDTH);
        Table {
            names,
            columns,
            row_count,
        }
    }

    // ==================== Loading ====================

    /// Load a comma-separated file.
    ///
    /// Fails with `FileNotFound` if the file cannot be opened,
    /// `InvalidFormat` if the header is missing or does not match the
    /// schema, and `ParseError` if any data line does not match it. The file
    /// is closed before this returns.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(path, &ReadOptions::default())
    }

    pub fn load_with(path: impl AsRef<Path>, options: &ReadOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| {
            debug!("cannot open {}: {}", path.display(), err);
            TableError::FileNotFound
        })?;
        debug!("loading {}", path.display());
        Self::from_reader(BufReader::new(file), options)
    }

    /// Parse delimited text from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R, options: &ReadOptions) -> Result<Self> {
        read_table(reader, options)
    }

    /// Parse comma-separated text held in memory.
    pub fn from_csv(csv: &str) -> Result<Self> {
        Self::from_reader(csv.as_bytes(), &ReadOptions::default())
    }

    // ==================== Shape ====================

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        S::WIDTH
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Column names in schema order, as read from the header.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Returns the position of a column by name, or None if not found.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn data_types(&self) -> Vec<DataType> {
        S::data_types()
    }

    /// `(name, type)` for every column, in schema order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, DataType)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(S::data_types())
    }

    // ==================== Access ====================

    /// Zero-copy view of the column at position `I`.
    ///
    /// The element type is the schema's type at `I`, and positions past the
    /// end of the schema are rejected at compile time.
    pub fn column<const I: usize>(&self) -> &[<S as ColumnAt<I>>::Output]
    where
        S: ColumnAt<I>,
    {
        <S as ColumnAt<I>>::column(&self.columns)
    }

    /// Zero-copy view of a column looked up by name.
    ///
    /// Fails with `ColumnNotFound` if no column has that name, and with
    /// `ParseError` if the column exists but does not hold `T`.
    pub fn column_by_name<T: CellType>(&self, name: &str) -> Result<&[T]> {
        let position = self.column_index(name).ok_or_else(|| {
            debug!("column '{}' not found", name);
            TableError::ColumnNotFound
        })?;

        let slice = S::column_slice(&self.columns, position).ok_or(TableError::ColumnNotFound)?;
        T::from_column_slice(slice).ok_or_else(|| {
            debug!(
                "column '{}' holds {}, requested {}",
                name,
                slice.data_type(),
                T::DATA_TYPE
            );
            TableError::ParseError
        })
    }

    /// Copy the row at `index` out of every column.
    pub fn row(&self, index: usize) -> Result<S> {
        if index >= self.row_count {
            debug!("row {} out of range [0, {})", index, self.row_count);
            return Err(TableError::RowIndexOutOfBounds);
        }
        S::row_at(&self.columns, index).ok_or(TableError::RowIndexOutOfBounds)
    }

    pub fn rows(&self) -> TableRowIterator<'_, S> {
        TableRowIterator {
            table: self,
            index: 0,
        }
    }

    /// Borrow one cell as a [`Value`], for display and serialization.
    pub fn value(&self, row: usize, position: usize) -> Option<Value<'_>> {
        S::column_slice(&self.columns, position)?.value(row)
    }

    // ==================== Filtering ====================

    /// Build a new table holding the rows whose value in `column` satisfies
    /// `predicate`, in their original order.
    ///
    /// The predicate runs exactly once per row, in row order. Every column of
    /// the result is a fresh copy; the source table is left untouched.
    /// Lookup failures are those of [`Table::column_by_name`].
    ///
    /// # Example
    ///
    /// ```
    /// use columnar::Table;
    ///
    /// let table = Table::<(String, f64)>::from_csv("name,score\nAda,91.5\nBob,72.0\nCy,88.0\n").unwrap();
    /// let passing = table.filter::<f64, _>("score", |s| *s >= 80.0).unwrap();
    ///
    /// assert_eq!(passing.row_count(), 2);
    /// assert_eq!(passing.column::<0>(), &["Ada".to_string(), "Cy".to_string()]);
    /// ```
    pub fn filter<T, F>(&self, column: &str, mut predicate: F) -> Result<Table<S>>
    where
        T: CellType,
        F: FnMut(&T) -> bool,
    {
        let values = self.column_by_name::<T>(column)?;

        let matching: Vec<usize> = values
            .iter()
            .enumerate()
            .filter_map(|(index, value)| predicate(value).then_some(index))
            .collect();

        debug!(
            "filter on '{}' kept {} of {} rows",
            column,
            matching.len(),
            self.row_count
        );

        Ok(Table::from_parts(
            self.names.clone(),
            S::gather(&self.columns, &matching),
            matching.len(),
        ))
    }

    // ==================== Serialization ====================

    /// Export the table as a pretty-printed JSON array of row objects keyed
    /// by column name. If two columns share a name, every row is written as
    /// an array of values in schema order instead.
    ///
    /// ```
    /// use columnar::Table;
    ///
    /// let table = Table::<(i32, String)>::from_csv("id,name\n1,Alice\n").unwrap();
    /// let json = table.to_json().unwrap();
    /// assert!(json.contains("\"id\": 1"));
    /// assert!(json.contains("\"name\": \"Alice\""));
    /// ```
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One row, serialized as a map from column name to value, or as a plain
/// sequence of values when column names repeat.
struct RowRef<'a, S: Schema> {
    table: &'a Table<S>,
    index: usize,
    keyed: bool,
}

impl<S: Schema> Serialize for RowRef<'_, S> {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> std::result::Result<Z::Ok, Z::Error> {
        if !self.keyed {
            let mut seq = serializer.serialize_seq(Some(S::WIDTH))?;
            for position in 0..S::WIDTH {
                seq.serialize_element(&self.table.value(self.index, position))?;
            }
            return seq.end();
        }

        let mut map = serializer.serialize_map(Some(S::WIDTH))?;
        for (position, name) in self.table.names.iter().enumerate() {
            map.serialize_entry(name, &self.table.value(self.index, position))?;
        }
        map.end()
    }
}

impl<S: Schema> Serialize for Table<S> {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> std::result::Result<Z::Ok, Z::Error> {
        let mut seen = HashSet::with_capacity(self.names.len());
        let keyed = self.names.iter().all(|name| seen.insert(name.as_str()));

        let mut seq = serializer.serialize_seq(Some(self.row_count))?;
        for index in 0..self.row_count {
            seq.serialize_element(&RowRef {
                table: self,
                index,
                keyed,
            })?;
        }
        seq.end()
    }
}

pub struct TableRowIterator<'a, S: Schema> {
    table: &'a Table<S>,
    index: usize,
}

impl<'a, S: Schema> Iterator for TableRowIterator<'a, S> {
    type Item = S;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.table.row_count {
            None
        } else {
            let result = self.table.row(self.index).ok();
            self.index += 1;
            result
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.table.row_count.saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<S: Schema> ExactSizeIterator for TableRowIterator<'_, S> {}

impl<S: Schema> fmt::Debug for Table<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Table {{ columns: {:?}, rows: {} }}",
            self.names, self.row_count
        )
    }
}
