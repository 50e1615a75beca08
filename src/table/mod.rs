//! Core table and column types

pub mod column;
pub mod kind;
pub mod mixed;
#[allow(clippy::module_inception)]
pub mod table;

pub use column::{Column, ColumnMut};
pub use kind::{ColumnKind, ColumnType};
pub use mixed::{AnyColumn, AnyColumnMut, MixedTable};
pub use table::{FloatColumn, FloatTable, ShortColumn, ShortTable, Table, TableBuilder};
