//! Columnar Schema
//!
//! A schema is a tuple of cell types, e.g. `(i32, f64, String)`. The same
//! tuple is the materialized row type, and `Schema::Columns` is the matching
//! tuple of vectors, one dense store per position. Arity is fixed at compile
//! time, which makes positional column access checkable by the compiler via
//! [`ColumnAt`].

use crate::column::{CellType, ColumnSlice, DataType};
use std::fmt::Debug;

/// Row tuples that can back a [`Table`](crate::Table).
///
/// Implemented for tuples of 1 to 12 [`CellType`]s.
pub trait Schema: Clone + Debug + PartialEq + Sized + 'static {
    /// Number of columns.
    const WIDTH: usize;

    /// One `Vec` per position, in schema order.
    type Columns: Clone + Debug + Default;

    /// Declared type of every position, in schema order.
    fn data_types() -> Vec<DataType>;

    /// Parse one record. `fields` must hold exactly `WIDTH` entries; on
    /// failure the offending position is returned.
    fn parse_row(fields: &[&str]) -> Result<Self, usize>;

    fn push_row(columns: &mut Self::Columns, row: Self);

    /// Clone the values at `index` out of every column.
    fn row_at(columns: &Self::Columns, index: usize) -> Option<Self>;

    fn column_slice(columns: &Self::Columns, position: usize) -> Option<ColumnSlice<'_>>;

    /// Copy the rows at `indices`, in the given order, into fresh storage.
    fn gather(columns: &Self::Columns, indices: &[usize]) -> Self::Columns;

    fn reserve(columns: &mut Self::Columns, additional: usize);
}

/// Compile-time positional access: implemented for `I < WIDTH` only, so a
/// request for a position past the end of the schema does not compile.
pub trait ColumnAt<const I: usize>: Schema {
    type Output: CellType;

    fn column(columns: &Self::Columns) -> &[Self::Output];
}

macro_rules! impl_schema {
    ($width:expr => $(($idx:tt, $T:ident)),+) => {
        impl<$($T: CellType),+> Schema for ($($T,)+) {
            const WIDTH: usize = $width;

            type Columns = ($(Vec<$T>,)+);

            fn data_types() -> Vec<DataType> {
                vec![$(<$T as CellType>::DATA_TYPE),+]
            }

            fn parse_row(fields: &[&str]) -> Result<Self, usize> {
                Ok(($(
                    <$T as CellType>::parse_field(fields.get($idx).ok_or($idx as usize)?)
                        .ok_or($idx as usize)?,
                )+))
            }

            #[inline]
            fn push_row(columns: &mut Self::Columns, row: Self) {
                $(columns.$idx.push(row.$idx);)+
            }

            fn row_at(columns: &Self::Columns, index: usize) -> Option<Self> {
                Some(($(columns.$idx.get(index)?.clone(),)+))
            }

            fn column_slice(columns: &Self::Columns, position: usize) -> Option<ColumnSlice<'_>> {
                match position {
                    $($idx => Some(<$T as CellType>::as_column_slice(&columns.$idx)),)+
                    _ => None,
                }
            }

            fn gather(columns: &Self::Columns, indices: &[usize]) -> Self::Columns {
                ($(
                    indices.iter().map(|&i| columns.$idx[i].clone()).collect::<Vec<$T>>(),
                )+)
            }

            fn reserve(columns: &mut Self::Columns, additional: usize) {
                $(columns.$idx.reserve(additional);)+
            }
        }

        impl_column_at!(($($T),+); $(($idx, $T)),+);
    };
}

macro_rules! impl_column_at {
    (@one ($($T:ident),+); $idx:tt, $Out:ident) => {
        impl<$($T: CellType),+> ColumnAt<$idx> for ($($T,)+) {
            type Output = $Out;

            #[inline]
            fn column(columns: &Self::Columns) -> &[$Out] {
                &columns.$idx
            }
        }
    };
    ($tuple:tt; $(($idx:tt, $Out:ident)),+) => {
        $(impl_column_at!(@one $tuple; $idx, $Out);)+
    };
}

impl_schema!(1 => (0, A));
impl_schema!(2 => (0, A), (1, B));
impl_schema!(3 => (0, A), (1, B), (2, C));
impl_schema!(4 => (0, A), (1, B), (2, C), (3, D));
impl_schema!(5 => (0, A), (1, B), (2, C), (3, D), (4, E));
impl_schema!(6 => (0, A), (1, B), (2, C), (3, D), (4, E), (5, F));
impl_schema!(7 => (0, A), (1, B), (2, C), (3, D), (4, E), (5, F), (6, G));
impl_schema!(8 => (0, A), (1, B), (2, C), (3, D), (4, E), (5, F), (6, G), (7, H));
impl_schema!(9 => (0, A), (1, B), (2, C), (3, D), (4, E), (5, F), (6, G), (7, H), (8, J));
impl_schema!(10 => (0, A), (1, B), (2, C), (3, D), (4, E), (5, F), (6, G), (7, H), (8, J), (9, K));
impl_schema!(11 => (0, A), (1, B), (2, C), (3, D), (4, E), (5, F), (6, G), (7, H), (8, J), (9, K), (10, L));
impl_schema!(12 => (0, A), (1, B), (2, C), (3, D), (4, E), (5, F), (6, G), (7, H), (8, J), (9, K), (10, L), (11, M));
