//! Table structure (ordered collection of equal-length typed columns)

use std::ops::Range;

use tracing::{debug, trace};

use super::column::{Column, ColumnMut};
use super::kind::ColumnType;
use crate::error::{Result, TableError};

/// A table of `T` values stored column by column.
///
/// Invariants, held after every operation returns:
/// - every column has exactly `row_count()` values
/// - one row header per row
///
/// Columns are addressed by position or by header. Header lookup is a linear
/// scan that returns the first match in column order, so duplicate headers
/// resolve to the leftmost column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table<T: ColumnType> {
    columns: Vec<Column<T>>,
    row_headers: Vec<String>,
    row_count: usize,
}

/// Table of 32-bit floats.
pub type FloatTable = Table<f32>;
/// Table of 16-bit signed integers.
pub type ShortTable = Table<i16>;
pub type FloatColumn = Column<f32>;
pub type ShortColumn = Column<i16>;

impl<T: ColumnType> Table<T> {
    /// Create a `column_count` x `row_count` table of zeros with empty headers.
    pub fn new(column_count: usize, row_count: usize) -> Self {
        Table {
            columns: (0..column_count).map(|_| Column::new(row_count)).collect(),
            row_headers: vec![String::new(); row_count],
            row_count,
        }
    }

    pub fn builder() -> TableBuilder<T> {
        TableBuilder::default()
    }

    /// Assemble a table from detached columns, in order.
    ///
    /// All columns must have the same length.
    pub fn from_columns(columns: Vec<Column<T>>) -> Result<Self> {
        let row_count = columns.first().map(|c| c.len()).unwrap_or(0);
        if let Some(bad) = columns.iter().find(|c| c.len() != row_count) {
            return Err(TableError::length_mismatch(row_count, bad.len()));
        }
        Ok(Table {
            columns,
            row_headers: vec![String::new(); row_count],
            row_count,
        })
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.row_count == 0
    }

    /// Column at `index`.
    pub fn get(&self, index: usize) -> Result<&Column<T>> {
        self.columns
            .get(index)
            .ok_or_else(|| TableError::column_out_of_range(index, self.columns.len()))
    }

    /// Writable handle to the column at `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<ColumnMut<'_, T>> {
        let count = self.columns.len();
        self.columns
            .get_mut(index)
            .map(ColumnMut::new)
            .ok_or_else(|| TableError::column_out_of_range(index, count))
    }

    /// First column (in table order) whose header equals `header`.
    pub fn get_by_header(&self, header: &str) -> Result<&Column<T>> {
        let index = self.require_index(header)?;
        Ok(&self.columns[index])
    }

    /// Writable handle to the first column whose header equals `header`.
    pub fn get_by_header_mut(&mut self, header: &str) -> Result<ColumnMut<'_, T>> {
        let index = self.require_index(header)?;
        Ok(ColumnMut::new(&mut self.columns[index]))
    }

    /// Position of the first column whose header equals `header`.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.header() == header)
    }

    fn require_index(&self, header: &str) -> Result<usize> {
        self.column_index(header)
            .ok_or_else(|| TableError::HeaderNotFound(header.to_string()))
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Columns in table order. Each call starts again from column 0.
    pub fn iter(&self) -> std::slice::Iter<'_, Column<T>> {
        self.columns.iter()
    }

    /// Writable handles to every column, in table order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = ColumnMut<'_, T>> {
        self.columns.iter_mut().map(ColumnMut::new)
    }

    pub fn column_header(&self, index: usize) -> Result<&str> {
        self.get(index).map(|c| c.header())
    }

    /// Set the header of column `index`. Uniqueness is not enforced.
    pub fn set_column_header(&mut self, index: usize, header: impl Into<String>) -> Result<()> {
        let header = header.into();
        trace!(index, header = %header, "set column header");
        self.get_mut(index)?.set_header(header);
        Ok(())
    }

    pub fn row_header(&self, row: usize) -> Result<&str> {
        self.row_headers
            .get(row)
            .map(String::as_str)
            .ok_or_else(|| TableError::row_out_of_range(row, self.row_count))
    }

    pub fn set_row_header(&mut self, row: usize, header: impl Into<String>) -> Result<()> {
        let count = self.row_count;
        let slot = self
            .row_headers
            .get_mut(row)
            .ok_or_else(|| TableError::row_out_of_range(row, count))?;
        *slot = header.into();
        trace!(row, header = %slot, "set row header");
        Ok(())
    }

    /// Value at (`col`, `row`).
    pub fn value(&self, col: usize, row: usize) -> Result<T> {
        self.get(col)?.value(row)
    }

    /// Overwrite the value at (`col`, `row`).
    pub fn set_value(&mut self, col: usize, row: usize, value: T) -> Result<()> {
        self.get_mut(col)?.set_value(row, value)
    }

    /// Snapshot of one row across all columns.
    pub fn row(&self, row: usize) -> Result<Vec<T>> {
        self.check_row(row)?;
        Ok(self.columns.iter().map(|c| c.as_slice()[row]).collect())
    }

    /// Append a zero-filled column with the given header and return a handle to it.
    pub fn append_column(&mut self, header: impl Into<String>) -> ColumnMut<'_, T> {
        let index = self.columns.len();
        self.columns.push(Column::with_header(header, self.row_count));
        debug!(index, rows = self.row_count, "append column");
        ColumnMut::new(&mut self.columns[index])
    }

    /// Append `count` zero-filled columns with empty headers.
    pub fn append_columns(&mut self, count: usize) {
        let rows = self.row_count;
        self.columns.extend((0..count).map(|_| Column::new(rows)));
        debug!(count, columns = self.columns.len(), "append columns");
    }

    /// Insert a zero-filled column at `index`, shifting later columns right.
    ///
    /// `index == column_count()` appends.
    pub fn insert_column(
        &mut self,
        index: usize,
        header: impl Into<String>,
    ) -> Result<ColumnMut<'_, T>> {
        if index > self.columns.len() {
            return Err(TableError::column_out_of_range(index, self.columns.len()));
        }
        self.columns.insert(index, Column::with_header(header, self.row_count));
        debug!(index, "insert column");
        Ok(ColumnMut::new(&mut self.columns[index]))
    }

    /// Detach and return the column at `index`; later columns shift left.
    pub fn remove_column(&mut self, index: usize) -> Result<Column<T>> {
        self.get(index)?;
        let column = self.columns.remove(index);
        debug!(index, columns = self.columns.len(), "remove column");
        Ok(column)
    }

    /// Detach `count` columns starting at `index`.
    pub fn remove_columns(&mut self, index: usize, count: usize) -> Result<Vec<Column<T>>> {
        let range = checked_range(index, count, self.columns.len()).ok_or_else(|| {
            TableError::column_out_of_range(index.saturating_add(count), self.columns.len())
        })?;
        let removed: Vec<Column<T>> = self.columns.drain(range).collect();
        debug!(index, count, columns = self.columns.len(), "remove columns");
        Ok(removed)
    }

    /// Grow with zero-filled columns or truncate to `count` columns.
    pub fn set_column_count(&mut self, count: usize) {
        let current = self.columns.len();
        if count > current {
            self.append_columns(count - current);
        } else if count < current {
            self.columns.truncate(count);
            debug!(from = current, to = count, "truncate columns");
        }
    }

    /// Add one zero row at the end of every column.
    pub fn append_row(&mut self) {
        for column in &mut self.columns {
            column.push_default();
        }
        self.row_headers.push(String::new());
        self.row_count += 1;
        debug!(rows = self.row_count, "append row");
    }

    /// Add `count` zero rows at the end of every column.
    pub fn append_rows(&mut self, count: usize) {
        let index = self.row_count;
        self.splice_rows(index, count);
    }

    /// Insert one zero row at `index`, shifting later rows down.
    ///
    /// `index == row_count()` appends.
    pub fn insert_row(&mut self, index: usize) -> Result<()> {
        self.insert_rows(index, 1)
    }

    /// Insert `count` zero rows at `index`.
    pub fn insert_rows(&mut self, index: usize, count: usize) -> Result<()> {
        if index > self.row_count {
            return Err(TableError::row_out_of_range(index, self.row_count));
        }
        self.splice_rows(index, count);
        Ok(())
    }

    /// Remove row `index` from every column; later rows shift up.
    ///
    /// The bound is checked once before any column is touched.
    pub fn remove_row(&mut self, index: usize) -> Result<()> {
        self.check_row(index)?;
        self.drain_rows(index..index + 1);
        Ok(())
    }

    /// Remove `count` rows starting at `index`.
    pub fn remove_rows(&mut self, index: usize, count: usize) -> Result<()> {
        let range = checked_range(index, count, self.row_count).ok_or_else(|| {
            TableError::row_out_of_range(index.saturating_add(count), self.row_count)
        })?;
        self.drain_rows(range);
        Ok(())
    }

    /// Grow with zero rows or truncate to `count` rows.
    pub fn set_row_count(&mut self, count: usize) {
        for column in &mut self.columns {
            column.resize(count);
        }
        self.row_headers.resize(count, String::new());
        debug!(from = self.row_count, to = count, "resize rows");
        self.row_count = count;
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row < self.row_count {
            Ok(())
        } else {
            Err(TableError::row_out_of_range(row, self.row_count))
        }
    }

    fn splice_rows(&mut self, index: usize, count: usize) {
        for column in &mut self.columns {
            column.insert_defaults(index, count);
        }
        self.row_headers
            .splice(index..index, std::iter::repeat(String::new()).take(count));
        self.row_count += count;
        debug!(index, count, rows = self.row_count, "insert rows");
    }

    fn drain_rows(&mut self, range: Range<usize>) {
        for column in &mut self.columns {
            column.remove_range(range.clone());
        }
        self.row_headers.drain(range.clone());
        self.row_count -= range.len();
        debug!(
            index = range.start,
            count = range.len(),
            rows = self.row_count,
            "remove rows"
        );
    }
}

/// `index..index + count` when it lies within `0..len`.
fn checked_range(index: usize, count: usize, len: usize) -> Option<Range<usize>> {
    let end = index.checked_add(count)?;
    (end <= len).then_some(index..end)
}

impl<'a, T: ColumnType> IntoIterator for &'a Table<T> {
    type Item = &'a Column<T>;
    type IntoIter = std::slice::Iter<'a, Column<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Construction-time settings for a [`Table`].
#[derive(Debug, Clone)]
pub struct TableBuilder<T: ColumnType> {
    columns: usize,
    rows: usize,
    row_capacity: usize,
    headers: Vec<String>,
    _marker: std::marker::PhantomData<T>,
}

impl<T: ColumnType> Default for TableBuilder<T> {
    fn default() -> Self {
        TableBuilder {
            columns: 0,
            rows: 0,
            row_capacity: 0,
            headers: Vec::new(),
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T: ColumnType> TableBuilder<T> {
    pub fn columns(mut self, count: usize) -> Self {
        self.columns = count;
        self
    }

    pub fn rows(mut self, count: usize) -> Self {
        self.rows = count;
        self
    }

    /// Reserve room for this many rows per column up front.
    pub fn row_capacity(mut self, capacity: usize) -> Self {
        self.row_capacity = capacity;
        self
    }

    /// Column headers, in order. Extends the column count if there are more
    /// headers than columns.
    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Table<T> {
        let column_count = self.columns.max(self.headers.len());
        let mut table = Table::new(column_count, self.rows);
        let additional = self.row_capacity.saturating_sub(self.rows);
        for (column, header) in table.columns.iter_mut().zip(self.headers) {
            column.set_header(header);
        }
        if additional > 0 {
            for column in &mut table.columns {
                column.reserve(additional);
            }
        }
        debug!(columns = column_count, rows = self.rows, "build table");
        table
    }
}
