//! Error types for table and column operations.

use thiserror::Error;

use crate::table::ColumnKind;

/// Errors raised by [`Table`](crate::Table), [`Column`](crate::Column) and
/// [`MixedTable`](crate::MixedTable).
///
/// Every variant is a caller precondition violation. Bounds are checked
/// before any mutation starts, so an `Err` always leaves the table untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// Column index outside `[0, count)`.
    #[error("column index {index} out of range for column count {count}")]
    ColumnOutOfRange { index: usize, count: usize },

    /// Row index outside `[0, count)`.
    #[error("row index {index} out of range for row count {count}")]
    RowOutOfRange { index: usize, count: usize },

    /// No column carries the requested header.
    #[error("no column with header {0:?}")]
    HeaderNotFound(String),

    /// Bulk data whose length does not match the target.
    #[error("length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// Typed access to a column of a different element type.
    #[error("column kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        expected: ColumnKind,
        found: ColumnKind,
    },
}

impl TableError {
    pub fn column_out_of_range(index: usize, count: usize) -> Self {
        Self::ColumnOutOfRange { index, count }
    }

    pub fn row_out_of_range(index: usize, count: usize) -> Self {
        Self::RowOutOfRange { index, count }
    }

    pub fn length_mismatch(expected: usize, found: usize) -> Self {
        Self::LengthMismatch { expected, found }
    }

    /// True for both row and column bound violations.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::ColumnOutOfRange { .. } | Self::RowOutOfRange { .. }
        )
    }
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
