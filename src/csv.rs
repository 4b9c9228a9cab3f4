//! Columnar CSV Loader
//!
//! Strict, type-directed parsing of delimited text into column stores. The
//! first line names the columns; every following non-blank line must carry
//! exactly one field per schema position. No quoting or escaping is
//! interpreted: every delimiter is a field boundary.

use crate::error::{Result, TableError};
use crate::schema::Schema;
use crate::table::Table;
use log::{debug, trace};
use std::io::BufRead;

/// Options for reading delimited text.
///
/// # Examples
///
/// ```
/// use columnar::{ReadOptions, Table};
///
/// let options = ReadOptions {
///     delimiter: ';',
///     ..Default::default()
/// };
/// let table = Table::<(i32, String)>::from_reader("id;name\n1;Alice\n".as_bytes(), &options).unwrap();
/// assert_eq!(table.row_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Field separator. Defaults to `,`.
    pub delimiter: char,
    /// Rows to reserve in every column before parsing.
    pub capacity_hint: usize,
}

impl ReadOptions {
    pub const DEFAULT_DELIMITER: char = ',';

    pub fn with_delimiter(delimiter: char) -> Self {
        ReadOptions {
            delimiter,
            ..Default::default()
        }
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            delimiter: Self::DEFAULT_DELIMITER,
            capacity_hint: 0,
        }
    }
}

/// Why a data line could not be split into exactly `width` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordShape {
    Short { found: usize },
    TrailingContent,
}

/// Split `line` into exactly `width` fields. Anything after the last field
/// is tolerated only if it is whitespace.
fn split_record(line: &str, delimiter: char, width: usize) -> Result<Vec<&str>, RecordShape> {
    let mut parts = line.splitn(width + 1, delimiter);
    let fields: Vec<&str> = parts.by_ref().take(width).collect();

    if fields.len() < width {
        return Err(RecordShape::Short { found: fields.len() });
    }

    match parts.next() {
        Some(rest) if rest.chars().any(|c| !c.is_whitespace()) => Err(RecordShape::TrailingContent),
        _ => Ok(fields),
    }
}

/// Parse a whole source into a table. Any failure discards everything read
/// so far.
pub fn read_table<S, R>(reader: R, options: &ReadOptions) -> Result<Table<S>>
where
    S: Schema,
    R: BufRead,
{
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(Ok(line)) if !line.is_empty() => line,
        Some(Ok(_)) => {
            debug!("header line is empty");
            return Err(TableError::InvalidFormat);
        }
        Some(Err(err)) => {
            debug!("header line could not be read: {}", err);
            return Err(TableError::InvalidFormat);
        }
        None => {
            debug!("source is empty, expected a header line");
            return Err(TableError::InvalidFormat);
        }
    };

    let names: Vec<String> = header.split(options.delimiter).map(str::to_owned).collect();
    if names.len() != S::WIDTH {
        debug!(
            "header has {} fields but the schema declares {} columns",
            names.len(),
            S::WIDTH
        );
        return Err(TableError::InvalidFormat);
    }

    let data_types = S::data_types();
    let mut columns = S::Columns::default();
    S::reserve(&mut columns, options.capacity_hint);
    let mut row_count = 0usize;

    for (offset, line) in lines.enumerate() {
        // Header is line 1.
        let line_number = offset + 2;
        let line = line.map_err(|err| {
            debug!("line {}: could not be read: {}", line_number, err);
            TableError::ParseError
        })?;

        if line.is_empty() {
            trace!("line {}: blank, skipped", line_number);
            continue;
        }

        let fields = split_record(&line, options.delimiter, S::WIDTH).map_err(|shape| {
            match shape {
                RecordShape::Short { found } => debug!(
                    "line {}: expected {} fields, found {}",
                    line_number,
                    S::WIDTH,
                    found
                ),
                RecordShape::TrailingContent => debug!(
                    "line {}: unexpected content after {} fields",
                    line_number,
                    S::WIDTH
                ),
            }
            TableError::ParseError
        })?;

        let row = S::parse_row(&fields).map_err(|position| {
            debug!(
                "line {}: cannot parse {:?} as {} for column '{}'",
                line_number,
                fields.get(position).copied().unwrap_or_default(),
                data_types[position],
                names[position]
            );
            TableError::ParseError
        })?;

        S::push_row(&mut columns, row);
        row_count += 1;
    }

    debug!("loaded {} rows x {} columns", row_count, S::WIDTH);
    Ok(Table::from_parts(names, columns, row_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read<S: Schema>(text: &str) -> Result<Table<S>> {
        read_table(text.as_bytes(), &ReadOptions::default())
    }

    #[test]
    fn test_split_record() {
        assert_eq!(split_record("1,2", ',', 2), Ok(vec!["1", "2"]));
        assert_eq!(split_record("a,,c", ',', 3), Ok(vec!["a", "", "c"]));
        assert_eq!(split_record("1", ',', 2), Err(RecordShape::Short { found: 1 }));
        assert_eq!(split_record("1,2,3", ',', 2), Err(RecordShape::TrailingContent));
        assert_eq!(split_record("1,2,3,4", ',', 2), Err(RecordShape::TrailingContent));
        assert_eq!(split_record("1,2,", ',', 2), Ok(vec!["1", "2"]));
        assert_eq!(split_record("1,2,  ", ',', 2), Ok(vec!["1", "2"]));
        assert_eq!(split_record("1;2", ';', 2), Ok(vec!["1", "2"]));
    }

    #[test]
    fn test_read_basic() {
        let table = read::<(i32, i32)>("id,value\n1,10\n2,20\n").unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_names(), &["id".to_string(), "value".to_string()]);
        assert_eq!(table.column::<1>(), &[10, 20]);
    }

    #[test]
    fn test_read_without_trailing_newline_and_crlf() {
        let table = read::<(i32, String)>("id,name\r\n1,Alice\r\n2,Bob").unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_names()[1], "name");
        assert_eq!(table.column::<1>(), &["Alice".to_string(), "Bob".to_string()]);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let table = read::<(i32, i32)>("id,value\n\n1,10\n\n\n2,20\n\n").unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column::<0>(), &[1, 2]);
    }

    #[test]
    fn test_header_errors() {
        assert_eq!(read::<(i32, i32)>("").unwrap_err(), TableError::InvalidFormat);
        assert_eq!(read::<(i32, i32)>("\n1,2\n").unwrap_err(), TableError::InvalidFormat);
        assert_eq!(read::<(i32, i32)>("id\n1\n").unwrap_err(), TableError::InvalidFormat);
        assert_eq!(
            read::<(i32, i32)>("id,value,extra\n1,2,3\n").unwrap_err(),
            TableError::InvalidFormat
        );
    }

    #[test]
    fn test_row_errors() {
        assert_eq!(read::<(i32, i32)>("a,b\n1\n").unwrap_err(), TableError::ParseError);
        assert_eq!(read::<(i32, i32)>("a,b\n1,2,3\n").unwrap_err(), TableError::ParseError);
        assert_eq!(read::<(i32, i32)>("a,b\n1,x\n").unwrap_err(), TableError::ParseError);
        assert_eq!(read::<(i32, f64)>("a,b\n1,2.5.1\n").unwrap_err(), TableError::ParseError);
        assert_eq!(read::<(i32, f64)>("a,b\n1,1e999\n").unwrap_err(), TableError::ParseError);
        assert_eq!(read::<(i32, i32)>("a,b\n1,2\n3,four\n").unwrap_err(), TableError::ParseError);
        assert_eq!(read::<(i32, i32)>("a,b\n1, 2\n").unwrap_err(), TableError::ParseError);
    }

    #[test]
    fn test_text_fields_are_verbatim() {
        let table = read::<(String, String)>("a,b\n x , \n").unwrap();
        assert_eq!(table.row(0).unwrap(), (" x ".to_string(), " ".to_string()));
    }

    #[test]
    fn test_trailing_delimiter_is_tolerated() {
        let table = read::<(i32, i32)>("a,b\n1,2,\n").unwrap();
        assert_eq!(table.row(0).unwrap(), (1, 2));
    }

    #[test]
    fn test_invalid_utf8_data_line() {
        let bytes: &[u8] = b"a,b\n1,\xff\n";
        let err = read_table::<(i32, String), _>(bytes, &ReadOptions::default()).unwrap_err();
        assert_eq!(err, TableError::ParseError);
    }

    #[test]
    fn test_invalid_utf8_header() {
        let bytes: &[u8] = b"\xff,b\n1,2\n";
        let err = read_table::<(i32, i32), _>(bytes, &ReadOptions::default()).unwrap_err();
        assert_eq!(err, TableError::InvalidFormat);
    }

    #[test]
    fn test_custom_delimiter_and_capacity() {
        let options = ReadOptions {
            delimiter: '\t',
            capacity_hint: 64,
        };
        let table: Table<(u16, f32)> = read_table("port\tload\n80\t0.5\n443\t1.25\n".as_bytes(), &options).unwrap();
        assert_eq!(table.column::<0>(), &[80, 443]);
        assert_eq!(table.column::<1>(), &[0.5, 1.25]);
        assert_eq!(ReadOptions::with_delimiter('|').delimiter, '|');
        assert_eq!(ReadOptions::default().delimiter, ',');
    }
}
