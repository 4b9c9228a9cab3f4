//! Columnar Error Types
//!
//! Every fallible table operation reports one of five flat kinds. Callers
//! match on the variant; the surrounding detail (line number, column,
//! offending text) is written to the log at the point of failure.

use thiserror::Error;

/// Failure kinds produced by loading, column lookup, row access and filtering.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableError {
    /// The source file could not be opened.
    #[error("file not found or could not be opened")]
    FileNotFound,

    /// Header-level structural failure: empty source, empty header line,
    /// or a header whose field count differs from the schema.
    #[error("invalid format: missing header or header does not match the schema")]
    InvalidFormat,

    /// A field does not fully match its declared type, a row has the wrong
    /// number of fields or trailing content, or a by-name column lookup
    /// found a column of a different type.
    #[error("parse error: value does not match the declared column type")]
    ParseError,

    /// No column carries the requested name.
    #[error("column not found")]
    ColumnNotFound,

    /// The requested row index is not less than the row count.
    #[error("row index out of bounds")]
    RowIndexOutOfBounds,
}

pub type Result<T, E = TableError> = std::result::Result<T, E>;
