//! Columnar Cell Types
//!
//! A column is a densely packed `Vec<T>` where `T` is one of a closed set of
//! cell types. Each cell type knows how to parse itself from a raw text field
//! and how to tag a borrowed column of itself as a [`ColumnSlice`], which is
//! how by-name lookups recover a typed view without runtime type inspection.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Column data types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Utf8,
}

impl DataType {
    pub fn is_integer(&self) -> bool {
        !self.is_float() && *self != DataType::Utf8
    }

    pub fn is_float(&self) -> bool {
        matches!(self, DataType::Float32 | DataType::Float64)
    }

    pub fn is_text(&self) -> bool {
        *self == DataType::Utf8
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Int8 => "INT8",
            DataType::Int16 => "INT16",
            DataType::Int32 => "INT32",
            DataType::Int64 => "INT64",
            DataType::UInt8 => "UINT8",
            DataType::UInt16 => "UINT16",
            DataType::UInt32 => "UINT32",
            DataType::UInt64 => "UINT64",
            DataType::Float32 => "FLOAT32",
            DataType::Float64 => "FLOAT64",
            DataType::Utf8 => "UTF8",
        };
        f.write_str(name)
    }
}

/// A single cell borrowed out of a column, widened to one of four shapes.
///
/// Used for serialization and display; typed access goes through the
/// column views instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value<'a> {
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(&'a str),
}

impl<'a> Value<'a> {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::UInt(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::UInt(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
        }
    }
}

/// A borrowed, type-tagged view over one column's storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnSlice<'a> {
    Int8(&'a [i8]),
    Int16(&'a [i16]),
    Int32(&'a [i32]),
    Int64(&'a [i64]),
    UInt8(&'a [u8]),
    UInt16(&'a [u16]),
    UInt32(&'a [u32]),
    UInt64(&'a [u64]),
    Float32(&'a [f32]),
    Float64(&'a [f64]),
    Utf8(&'a [String]),
}

impl<'a> ColumnSlice<'a> {
    pub fn data_type(&self) -> DataType {
        match self {
            ColumnSlice::Int8(_) => DataType::Int8,
            ColumnSlice::Int16(_) => DataType::Int16,
            ColumnSlice::Int32(_) => DataType::Int32,
            ColumnSlice::Int64(_) => DataType::Int64,
            ColumnSlice::UInt8(_) => DataType::UInt8,
            ColumnSlice::UInt16(_) => DataType::UInt16,
            ColumnSlice::UInt32(_) => DataType::UInt32,
            ColumnSlice::UInt64(_) => DataType::UInt64,
            ColumnSlice::Float32(_) => DataType::Float32,
            ColumnSlice::Float64(_) => DataType::Float64,
            ColumnSlice::Utf8(_) => DataType::Utf8,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnSlice::Int8(v) => v.len(),
            ColumnSlice::Int16(v) => v.len(),
            ColumnSlice::Int32(v) => v.len(),
            ColumnSlice::Int64(v) => v.len(),
            ColumnSlice::UInt8(v) => v.len(),
            ColumnSlice::UInt16(v) => v.len(),
            ColumnSlice::UInt32(v) => v.len(),
            ColumnSlice::UInt64(v) => v.len(),
            ColumnSlice::Float32(v) => v.len(),
            ColumnSlice::Float64(v) => v.len(),
            ColumnSlice::Utf8(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the cell at `index` as a [`Value`].
    pub fn value(&self, index: usize) -> Option<Value<'a>> {
        match *self {
            ColumnSlice::Int8(v) => v.get(index).map(CellType::to_value),
            ColumnSlice::Int16(v) => v.get(index).map(CellType::to_value),
            ColumnSlice::Int32(v) => v.get(index).map(CellType::to_value),
            ColumnSlice::Int64(v) => v.get(index).map(CellType::to_value),
            ColumnSlice::UInt8(v) => v.get(index).map(CellType::to_value),
            ColumnSlice::UInt16(v) => v.get(index).map(CellType::to_value),
            ColumnSlice::UInt32(v) => v.get(index).map(CellType::to_value),
            ColumnSlice::UInt64(v) => v.get(index).map(CellType::to_value),
            ColumnSlice::Float32(v) => v.get(index).map(CellType::to_value),
            ColumnSlice::Float64(v) => v.get(index).map(CellType::to_value),
            ColumnSlice::Utf8(v) => v.get(index).map(CellType::to_value),
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A type that can be stored in a column.
///
/// The set of implementors is closed: signed and unsigned integers, `f32`,
/// `f64` and `String`. Parsing is dispatched statically on the declared type
/// of each schema position.
pub trait CellType: sealed::Sealed + Clone + fmt::Debug + PartialEq + 'static {
    /// The tag recorded for columns of this type.
    const DATA_TYPE: DataType;

    /// Parse a raw field. The whole field must be consumed; `None` means the
    /// text is not a valid value of this type.
    fn parse_field(field: &str) -> Option<Self>;

    fn as_column_slice(column: &[Self]) -> ColumnSlice<'_>;

    /// Recover a typed slice from a tagged one, or `None` if the tag belongs
    /// to another type.
    fn from_column_slice<'a>(slice: ColumnSlice<'a>) -> Option<&'a [Self]>;

    fn to_value(&self) -> Value<'_>;
}

/// Integers take the whole field: optional `-`, then digits. A leading `+`
/// is refused even though `FromStr` would take it.
fn parse_integer<T: FromStr>(field: &str) -> Option<T> {
    if field.starts_with('+') {
        return None;
    }
    field.parse().ok()
}

/// Floats must span the whole field and stay in range: a finite literal that
/// overflows to infinity, underflows to zero or lands in the subnormal range
/// is rejected.
fn parse_float<T>(field: &str, min_positive: f64) -> Option<T>
where
    T: FromStr + Into<f64> + Copy,
{
    let value: T = field.parse().ok()?;
    let wide: f64 = value.into();

    if wide.is_infinite() && !is_infinity_literal(field) {
        return None;
    }
    if wide == 0.0 && !mantissa_is_zero(field) {
        return None;
    }
    if wide != 0.0 && wide.abs() < min_positive {
        return None;
    }
    Some(value)
}

fn is_infinity_literal(field: &str) -> bool {
    let unsigned = field.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

fn mantissa_is_zero(field: &str) -> bool {
    field
        .split(['e', 'E'])
        .next()
        .unwrap_or("")
        .chars()
        .filter(char::is_ascii_digit)
        .all(|c| c == '0')
}

macro_rules! impl_integer_cell {
    ($($ty:ty => $variant:ident, $value:ident);+ $(;)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl CellType for $ty {
                const DATA_TYPE: DataType = DataType::$variant;

                #[inline]
                fn parse_field(field: &str) -> Option<Self> {
                    parse_integer(field)
                }

                #[inline]
                fn as_column_slice(column: &[Self]) -> ColumnSlice<'_> {
                    ColumnSlice::$variant(column)
                }

                #[inline]
                fn from_column_slice<'a>(slice: ColumnSlice<'a>) -> Option<&'a [Self]> {
                    match slice {
                        ColumnSlice::$variant(column) => Some(column),
                        _ => None,
                    }
                }

                #[inline]
                fn to_value(&self) -> Value<'_> {
                    Value::$value((*self).into())
                }
            }
        )+
    };
}

impl_integer_cell! {
    i8 => Int8, Int;
    i16 => Int16, Int;
    i32 => Int32, Int;
    i64 => Int64, Int;
    u8 => UInt8, UInt;
    u16 => UInt16, UInt;
    u32 => UInt32, UInt;
    u64 => UInt64, UInt;
}

macro_rules! impl_float_cell {
    ($($ty:ident => $variant:ident);+ $(;)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl CellType for $ty {
                const DATA_TYPE: DataType = DataType::$variant;

                #[inline]
                fn parse_field(field: &str) -> Option<Self> {
                    parse_float::<$ty>(field, $ty::MIN_POSITIVE as f64)
                }

                #[inline]
                fn as_column_slice(column: &[Self]) -> ColumnSlice<'_> {
                    ColumnSlice::$variant(column)
                }

                #[inline]
                fn from_column_slice<'a>(slice: ColumnSlice<'a>) -> Option<&'a [Self]> {
                    match slice {
                        ColumnSlice::$variant(column) => Some(column),
                        _ => None,
                    }
                }

                #[inline]
                fn to_value(&self) -> Value<'_> {
                    Value::Float((*self).into())
                }
            }
        )+
    };
}

impl_float_cell! {
    f32 => Float32;
    f64 => Float64;
}

impl sealed::Sealed for String {}

impl CellType for String {
    const DATA_TYPE: DataType = DataType::Utf8;

    fn parse_field(field: &str) -> Option<Self> {
        Some(field.to_owned())
    }

    fn as_column_slice(column: &[Self]) -> ColumnSlice<'_> {
        ColumnSlice::Utf8(column)
    }

    fn from_column_slice<'a>(slice: ColumnSlice<'a>) -> Option<&'a [Self]> {
        match slice {
            ColumnSlice::Utf8(column) => Some(column),
            _ => None,
        }
    }

    fn to_value(&self) -> Value<'_> {
        Value::Text(self)
    }
}
