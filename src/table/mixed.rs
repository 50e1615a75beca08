//! Heterogeneous table: equal-length columns whose element types may differ

use tracing::debug;

use super::column::{Column, ColumnMut};
use super::kind::ColumnKind;
use crate::error::{Result, TableError};

/// A column of any supported element type.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyColumn {
    Float32(Column<f32>),
    Int16(Column<i16>),
}

impl AnyColumn {
    /// Zero-filled column of the given kind.
    pub fn new(kind: ColumnKind, header: impl Into<String>, len: usize) -> Self {
        match kind {
            ColumnKind::Float32 => AnyColumn::Float32(Column::with_header(header, len)),
            ColumnKind::Int16 => AnyColumn::Int16(Column::with_header(header, len)),
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            AnyColumn::Float32(c) => c.kind(),
            AnyColumn::Int16(c) => c.kind(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            AnyColumn::Float32(c) => c.len(),
            AnyColumn::Int16(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn header(&self) -> &str {
        match self {
            AnyColumn::Float32(c) => c.header(),
            AnyColumn::Int16(c) => c.header(),
        }
    }

    pub fn set_header(&mut self, header: impl Into<String>) {
        match self {
            AnyColumn::Float32(c) => c.set_header(header),
            AnyColumn::Int16(c) => c.set_header(header),
        }
    }

    /// Borrow as an `f32` column.
    pub fn as_float(&self) -> Result<&Column<f32>> {
        match self {
            AnyColumn::Float32(c) => Ok(c),
            other => Err(kind_mismatch(ColumnKind::Float32, other.kind())),
        }
    }

    /// Borrow as an `i16` column.
    pub fn as_short(&self) -> Result<&Column<i16>> {
        match self {
            AnyColumn::Int16(c) => Ok(c),
            other => Err(kind_mismatch(ColumnKind::Int16, other.kind())),
        }
    }

    fn handle(&mut self) -> AnyColumnMut<'_> {
        match self {
            AnyColumn::Float32(c) => AnyColumnMut::Float32(ColumnMut::new(c)),
            AnyColumn::Int16(c) => AnyColumnMut::Int16(ColumnMut::new(c)),
        }
    }

    fn push_default(&mut self) {
        match self {
            AnyColumn::Float32(c) => c.push_default(),
            AnyColumn::Int16(c) => c.push_default(),
        }
    }

    fn remove_row(&mut self, row: usize) {
        match self {
            AnyColumn::Float32(c) => c.remove_range(row..row + 1),
            AnyColumn::Int16(c) => c.remove_range(row..row + 1),
        }
    }
}

impl From<Column<f32>> for AnyColumn {
    fn from(column: Column<f32>) -> Self {
        AnyColumn::Float32(column)
    }
}

impl From<Column<i16>> for AnyColumn {
    fn from(column: Column<i16>) -> Self {
        AnyColumn::Int16(column)
    }
}

/// Writable handle to a column still owned by a [`MixedTable`].
///
/// Like [`ColumnMut`], it can change values and the header but not the length.
#[derive(Debug)]
pub enum AnyColumnMut<'a> {
    Float32(ColumnMut<'a, f32>),
    Int16(ColumnMut<'a, i16>),
}

impl<'a> AnyColumnMut<'a> {
    pub fn kind(&self) -> ColumnKind {
        match self {
            AnyColumnMut::Float32(c) => c.kind(),
            AnyColumnMut::Int16(c) => c.kind(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            AnyColumnMut::Float32(c) => c.len(),
            AnyColumnMut::Int16(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn header(&self) -> &str {
        match self {
            AnyColumnMut::Float32(c) => c.header(),
            AnyColumnMut::Int16(c) => c.header(),
        }
    }

    pub fn set_header(&mut self, header: impl Into<String>) {
        match self {
            AnyColumnMut::Float32(c) => c.set_header(header),
            AnyColumnMut::Int16(c) => c.set_header(header),
        }
    }

    /// Narrow to an `f32` handle.
    pub fn into_float(self) -> Result<ColumnMut<'a, f32>> {
        match self {
            AnyColumnMut::Float32(c) => Ok(c),
            other => Err(kind_mismatch(ColumnKind::Float32, other.kind())),
        }
    }

    /// Narrow to an `i16` handle.
    pub fn into_short(self) -> Result<ColumnMut<'a, i16>> {
        match self {
            AnyColumnMut::Int16(c) => Ok(c),
            other => Err(kind_mismatch(ColumnKind::Int16, other.kind())),
        }
    }
}

fn kind_mismatch(expected: ColumnKind, found: ColumnKind) -> TableError {
    TableError::KindMismatch { expected, found }
}

/// Table whose columns each carry their own element type.
///
/// Same structural contract as [`Table`](super::Table): a single row count
/// shared by every column, positional and header lookup (first match wins).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MixedTable {
    columns: Vec<AnyColumn>,
    row_count: usize,
}

impl MixedTable {
    /// Empty table with `row_count` rows and no columns.
    pub fn new(row_count: usize) -> Self {
        MixedTable {
            columns: Vec::new(),
            row_count,
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn get(&self, index: usize) -> Result<&AnyColumn> {
        self.columns
            .get(index)
            .ok_or_else(|| TableError::column_out_of_range(index, self.columns.len()))
    }

    /// Writable handle to the column at `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<AnyColumnMut<'_>> {
        self.column_mut(index).map(AnyColumn::handle)
    }

    /// First column (in table order) whose header equals `header`.
    pub fn get_by_header(&self, header: &str) -> Result<&AnyColumn> {
        let index = self.require_index(header)?;
        Ok(&self.columns[index])
    }

    /// Writable handle to the first column whose header equals `header`.
    pub fn get_by_header_mut(&mut self, header: &str) -> Result<AnyColumnMut<'_>> {
        let index = self.require_index(header)?;
        Ok(self.columns[index].handle())
    }

    fn require_index(&self, header: &str) -> Result<usize> {
        self.column_index(header)
            .ok_or_else(|| TableError::HeaderNotFound(header.to_string()))
    }

    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.header() == header)
    }

    /// Element type of column `index`.
    pub fn column_kind(&self, index: usize) -> Result<ColumnKind> {
        self.get(index).map(AnyColumn::kind)
    }

    pub fn set_column_header(&mut self, index: usize, header: impl Into<String>) -> Result<()> {
        self.column_mut(index)?.set_header(header);
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnyColumn> {
        self.columns.iter()
    }

    /// Append a zero-filled column of `kind` and return a handle to it.
    pub fn append_column(
        &mut self,
        header: impl Into<String>,
        kind: ColumnKind,
    ) -> AnyColumnMut<'_> {
        let index = self.columns.len();
        self.columns.push(AnyColumn::new(kind, header, self.row_count));
        debug!(index, %kind, "append mixed column");
        self.columns[index].handle()
    }

    /// Attach a detached column; its length must equal `row_count()`.
    pub fn push_column(&mut self, column: impl Into<AnyColumn>) -> Result<()> {
        let column = column.into();
        if column.len() != self.row_count {
            return Err(TableError::length_mismatch(self.row_count, column.len()));
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn remove_column(&mut self, index: usize) -> Result<AnyColumn> {
        self.get(index)?;
        let column = self.columns.remove(index);
        debug!(index, kind = %column.kind(), "remove mixed column");
        Ok(column)
    }

    pub fn append_row(&mut self) {
        for column in &mut self.columns {
            column.push_default();
        }
        self.row_count += 1;
        debug!(rows = self.row_count, "append mixed row");
    }

    pub fn remove_row(&mut self, index: usize) -> Result<()> {
        if index >= self.row_count {
            return Err(TableError::row_out_of_range(index, self.row_count));
        }
        for column in &mut self.columns {
            column.remove_row(index);
        }
        self.row_count -= 1;
        debug!(index, rows = self.row_count, "remove mixed row");
        Ok(())
    }

    pub fn float_value(&self, col: usize, row: usize) -> Result<f32> {
        self.get(col)?.as_float()?.value(row)
    }

    pub fn set_float_value(&mut self, col: usize, row: usize, value: f32) -> Result<()> {
        self.get_mut(col)?.into_float()?.set_value(row, value)
    }

    pub fn short_value(&self, col: usize, row: usize) -> Result<i16> {
        self.get(col)?.as_short()?.value(row)
    }

    pub fn set_short_value(&mut self, col: usize, row: usize, value: i16) -> Result<()> {
        self.get_mut(col)?.into_short()?.set_value(row, value)
    }

    fn column_mut(&mut self, index: usize) -> Result<&mut AnyColumn> {
        let count = self.columns.len();
        self.columns
            .get_mut(index)
            .ok_or_else(|| TableError::column_out_of_range(index, count))
    }
}

impl<'a> IntoIterator for &'a MixedTable {
    type Item = &'a AnyColumn;
    type IntoIter = std::slice::Iter<'a, AnyColumn>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MixedTable {
        let mut table = MixedTable::new(3);
        table.append_column("temp", ColumnKind::Float32);
        table.append_column("count", ColumnKind::Int16);
        for r in 0..3 {
            table.set_float_value(0, r, r as f32 * 0.5).unwrap();
            table.set_short_value(1, r, r as i16 - 1).unwrap();
        }
        table
    }

    #[test]
    fn test_kinds_per_column() {
        let table = sample();
        assert_eq!(table.column_kind(0).unwrap(), ColumnKind::Float32);
        assert_eq!(table.column_kind(1).unwrap(), ColumnKind::Int16);
        let kinds: Vec<ColumnKind> = table.iter().map(AnyColumn::kind).collect();
        assert_eq!(kinds, vec![ColumnKind::Float32, ColumnKind::Int16]);
    }

    #[test]
    fn test_typed_access_checks_kind() {
        let mut table = sample();
        assert_eq!(table.float_value(0, 2).unwrap(), 1.0);
        assert_eq!(table.short_value(1, 0).unwrap(), -1);
        assert_eq!(
            table.short_value(0, 0),
            Err(TableError::KindMismatch {
                expected: ColumnKind::Int16,
                found: ColumnKind::Float32,
            })
        );
        assert!(table.set_float_value(1, 0, 2.0).is_err());
        assert_eq!(table.short_value(1, 0).unwrap(), -1);
    }

    #[test]
    fn test_rows_move_in_lockstep() {
        let mut table = sample();
        table.append_row();
        assert_eq!(table.row_count(), 4);
        assert!(table.iter().all(|c| c.len() == 4));

        table.remove_row(0).unwrap();
        assert_eq!(table.float_value(0, 0).unwrap(), 0.5);
        assert_eq!(table.short_value(1, 0).unwrap(), 0);
        assert_eq!(table.short_value(1, 2).unwrap(), 0);
    }

    #[test]
    fn test_failed_remove_row_leaves_table_intact() {
        let mut table = sample();
        let before = table.clone();
        assert_eq!(
            table.remove_row(3),
            Err(TableError::RowOutOfRange { index: 3, count: 3 })
        );
        assert_eq!(table.row_count(), 3);
        assert!(table.iter().all(|c| c.len() == 3));
        assert_eq!(table, before);
    }

    #[test]
    fn test_failed_remove_column_leaves_table_intact() {
        let mut table = sample();
        let before = table.clone();
        assert_eq!(
            table.remove_column(2),
            Err(TableError::ColumnOutOfRange { index: 2, count: 2 })
        );
        assert_eq!(table.column_count(), 2);
        assert_eq!(table, before);
    }

    #[test]
    fn test_duplicate_headers_resolve_to_first() {
        let mut table = sample();
        table.append_column("temp", ColumnKind::Int16);
        assert_eq!(table.column_index("temp"), Some(0));
        let found = table.get_by_header("temp").unwrap();
        assert!(std::ptr::eq(found, table.get(0).unwrap()));
        assert_eq!(found.kind(), ColumnKind::Float32);
        assert_eq!(
            table.get_by_header_mut("temp").unwrap().kind(),
            ColumnKind::Float32
        );
    }

    #[test]
    fn test_append_column_handle_writes_through() {
        let mut table = sample();
        table
            .append_column("flags", ColumnKind::Int16)
            .into_short()
            .unwrap()
            .fill([7, -8, 9])
            .unwrap();

        let column = table.get_by_header("flags").unwrap();
        assert_eq!(column.as_short().unwrap().as_slice(), &[7, -8, 9]);
        assert_eq!(table.short_value(2, 1).unwrap(), -8);

        let mut handle = table.get_by_header_mut("temp").unwrap();
        handle.set_header("celsius");
        let mut floats = handle.into_float().unwrap();
        floats.fill([1.0, 2.0, 3.0]).unwrap();
        assert_eq!(table.float_value(0, 2).unwrap(), 3.0);
        assert_eq!(table.get(0).unwrap().header(), "celsius");
    }

    #[test]
    fn test_handle_narrowing_checks_kind() {
        let mut table = sample();
        let err = table.get_mut(1).unwrap().into_float().unwrap_err();
        assert_eq!(
            err,
            TableError::KindMismatch {
                expected: ColumnKind::Float32,
                found: ColumnKind::Int16,
            }
        );
        assert!(table.get_mut(2).is_err());

        let mut handle = table.get_mut(0).unwrap();
        handle.set_header("t");
        assert_eq!(handle.header(), "t");
        assert_eq!(handle.len(), 3);
        assert_eq!(
            handle.into_float().unwrap().fill([1.0]),
            Err(TableError::LengthMismatch { expected: 3, found: 1 })
        );
        assert_eq!(table.float_value(0, 1).unwrap(), 0.5);
    }

    #[test]
    fn test_header_lookup_and_remove() {
        let mut table = sample();
        assert!(std::ptr::eq(
            table.get_by_header("count").unwrap(),
            table.get(1).unwrap()
        ));
        let removed = table.remove_column(0).unwrap();
        assert_eq!(removed.header(), "temp");
        assert_eq!(removed.as_float().unwrap().as_slice(), &[0.0, 0.5, 1.0]);
        assert_eq!(table.column_index("count"), Some(0));
        assert!(table.get_by_header("temp").is_err());
    }

    #[test]
    fn test_push_column_checks_length() {
        let mut table = sample();
        let ok = Column::<i16>::from_vec("extra", vec![1, 2, 3]);
        table.push_column(ok).unwrap();
        assert_eq!(table.column_count(), 3);

        let bad = Column::<f32>::from_vec("bad", vec![1.0]);
        assert_eq!(
            table.push_column(bad),
            Err(TableError::LengthMismatch { expected: 3, found: 1 })
        );
    }
}
