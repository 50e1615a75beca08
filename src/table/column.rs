//! Typed column: a header label over a `Vec` of one primitive element type

use std::ops::Range;

use super::kind::{ColumnKind, ColumnType};
use crate::error::{Result, TableError};

/// An ordered sequence of `T` values with a mutable header.
///
/// Columns owned by a [`Table`](super::Table) always have exactly
/// `table.row_count()` entries. Operations that change the length are
/// crate-private so a borrowed column cannot break that invariant; a column
/// detached by `remove_column` is a plain value owned by the caller.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Column<T: ColumnType> {
    header: String,
    data: Vec<T>,
}

impl<T: ColumnType> Column<T> {
    /// Element type of every column over `T`.
    pub const KIND: ColumnKind = T::KIND;

    /// Create a column of `len` zero values with an empty header.
    pub fn new(len: usize) -> Self {
        Column {
            header: String::new(),
            data: vec![T::default(); len],
        }
    }

    /// Create a column of `len` zero values with the given header.
    pub fn with_header(header: impl Into<String>, len: usize) -> Self {
        Column {
            header: header.into(),
            data: vec![T::default(); len],
        }
    }

    /// Create a column that takes ownership of `data`.
    pub fn from_vec(header: impl Into<String>, data: Vec<T>) -> Self {
        Column {
            header: header.into(),
            data,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element type tag (static per `T`).
    #[inline]
    pub fn kind(&self) -> ColumnKind {
        T::KIND
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn set_header(&mut self, header: impl Into<String>) {
        self.header = header.into();
    }

    /// Value at `row`.
    #[inline]
    pub fn value(&self, row: usize) -> Result<T> {
        self.data
            .get(row)
            .copied()
            .ok_or_else(|| TableError::row_out_of_range(row, self.data.len()))
    }

    /// Overwrite the value at `row`.
    #[inline]
    pub fn set_value(&mut self, row: usize, value: T) -> Result<()> {
        let len = self.data.len();
        let slot = self
            .data
            .get_mut(row)
            .ok_or_else(|| TableError::row_out_of_range(row, len))?;
        *slot = value;
        Ok(())
    }

    /// Replace every value with `values`, in order.
    ///
    /// The sequence must have exactly `len()` items. On mismatch the column is
    /// left unchanged.
    pub fn fill<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        if values.len() != self.data.len() {
            return Err(TableError::length_mismatch(self.data.len(), values.len()));
        }
        self.data = values;
        Ok(())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable view of the values. The length cannot change through it.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, T>> {
        self.data.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.data.clone()
    }

    /// Consume the column, returning its header and values.
    pub fn into_parts(self) -> (String, Vec<T>) {
        (self.header, self.data)
    }

    pub(crate) fn push_default(&mut self) {
        self.data.push(T::default());
    }

    /// Insert `count` zero values starting at `index` (`index <= len`).
    pub(crate) fn insert_defaults(&mut self, index: usize, count: usize) {
        debug_assert!(index <= self.data.len());
        self.data.splice(index..index, std::iter::repeat(T::default()).take(count));
    }

    /// Remove the values in `range` (caller validated).
    pub(crate) fn remove_range(&mut self, range: Range<usize>) {
        debug_assert!(range.end <= self.data.len());
        self.data.drain(range);
    }

    pub(crate) fn resize(&mut self, len: usize) {
        self.data.resize(len, T::default());
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }
}

impl<'a, T: ColumnType> IntoIterator for &'a Column<T> {
    type Item = T;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Exclusive handle to a column that is still owned by a table.
///
/// Writes go straight to the table's storage. Reads go through `Deref`.
/// Unlike `&mut Column<T>`, the handle cannot replace the column wholesale,
/// so the table's row count stays authoritative.
#[derive(Debug)]
pub struct ColumnMut<'a, T: ColumnType> {
    column: &'a mut Column<T>,
}

impl<'a, T: ColumnType> ColumnMut<'a, T> {
    pub(crate) fn new(column: &'a mut Column<T>) -> Self {
        ColumnMut { column }
    }

    pub fn set_header(&mut self, header: impl Into<String>) {
        self.column.set_header(header);
    }

    pub fn set_value(&mut self, row: usize, value: T) -> Result<()> {
        self.column.set_value(row, value)
    }

    /// See [`Column::fill`].
    pub fn fill<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        self.column.fill(values)
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.column.as_mut_slice()
    }
}

impl<T: ColumnType> std::ops::Deref for ColumnMut<'_, T> {
    type Target = Column<T>;

    fn deref(&self) -> &Column<T> {
        self.column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let col = Column::<f32>::new(4);
        assert_eq!(col.len(), 4);
        assert_eq!(col.header(), "");
        assert!(col.iter().all(|v| v == 0.0));

        let col = Column::<i16>::with_header("h", 3);
        assert_eq!(col.header(), "h");
        assert_eq!(col.as_slice(), &[0, 0, 0]);
    }

    #[test]
    fn test_kind() {
        assert_eq!(Column::<f32>::new(0).kind(), ColumnKind::Float32);
        assert_eq!(Column::<i16>::new(0).kind(), ColumnKind::Int16);
        assert_eq!(Column::<i16>::KIND, ColumnKind::Int16);
    }

    #[test]
    fn test_value_bounds() {
        let mut col = Column::<i16>::new(2);
        col.set_value(1, -7).unwrap();
        assert_eq!(col.value(1).unwrap(), -7);
        assert_eq!(
            col.value(2),
            Err(TableError::RowOutOfRange { index: 2, count: 2 })
        );
        assert!(col.set_value(5, 1).is_err());
        assert_eq!(col.as_slice(), &[0, -7]);
    }

    #[test]
    fn test_fill() {
        let mut col = Column::<f32>::new(3);
        col.fill([1.5, -2.0, 0.25]).unwrap();
        assert_eq!(col.to_vec(), vec![1.5, -2.0, 0.25]);
    }

    #[test]
    fn test_fill_length_mismatch_leaves_column_unchanged() {
        let mut col = Column::<i16>::from_vec("a", vec![1, 2, 3]);

        let err = col.fill(vec![9, 9]).unwrap_err();
        assert_eq!(err, TableError::LengthMismatch { expected: 3, found: 2 });
        assert!(col.fill(vec![9, 9, 9, 9]).is_err());
        assert_eq!(col.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_structural_ops() {
        let mut col = Column::<i16>::from_vec("a", vec![1, 2, 3]);
        col.push_default();
        assert_eq!(col.as_slice(), &[1, 2, 3, 0]);

        col.insert_defaults(1, 2);
        assert_eq!(col.as_slice(), &[1, 0, 0, 2, 3, 0]);

        col.remove_range(0..3);
        assert_eq!(col.as_slice(), &[2, 3, 0]);

        col.resize(1);
        assert_eq!(col.as_slice(), &[2]);
        col.resize(2);
        assert_eq!(col.as_slice(), &[2, 0]);
    }
}
