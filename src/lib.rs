//! typedtable: mutable column-oriented tables over primitive element types
//!
//! A [`Table<T>`] owns an ordered list of equal-length [`Column<T>`]s.
//! Rows and columns can be appended, inserted and removed; columns are
//! addressed by position or by header. [`MixedTable`] carries columns of
//! different element types side by side.

pub mod error;
pub mod table;

pub use error::{Result, TableError};
pub use table::{
    AnyColumn, AnyColumnMut, Column, ColumnKind, ColumnMut, ColumnType, FloatColumn, FloatTable,
    MixedTable, ShortColumn, ShortTable, Table, TableBuilder,
};

/// API contract self-test
///
/// Fails to compile if the public surface downstream crates rely on is removed.
#[cfg(test)]
mod api_contract_self_test {
    use super::*;

    #[test]
    fn table_types_api_contract() {
        let _float: FloatTable = Table::new(1, 1);
        let _short: ShortTable = Table::new(1, 1);
        let _builder: TableBuilder<f32> = Table::builder();
        let _mixed = MixedTable::new(0);

        let _f: FloatColumn = Column::new(0);
        let _s: ShortColumn = Column::new(0);
    }

    #[test]
    fn kind_tags_api_contract() {
        assert_eq!(FloatColumn::KIND, ColumnKind::Float32);
        assert_eq!(ShortColumn::KIND, ColumnKind::Int16);
        assert_eq!(<f32 as ColumnType>::KIND.as_str(), "f32");
    }

    #[test]
    fn error_api_contract() {
        let err: TableError = TableError::column_out_of_range(1, 0);
        let _result: Result<()> = Err(err);
    }
}
