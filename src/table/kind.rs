//! Element type tags for typed columns

use std::fmt;

/// Element type held by a column.
///
/// Reported per column through [`Column::kind`](super::Column::kind) so callers
/// can discriminate columns without assuming a homogeneous table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// 32-bit IEEE 754 float
    Float32,
    /// 16-bit signed integer
    Int16,
}

impl ColumnKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnKind::Float32 => "f32",
            ColumnKind::Int16 => "i16",
        }
    }

    /// Size of one element in bytes.
    pub fn width(self) -> usize {
        match self {
            ColumnKind::Float32 => std::mem::size_of::<f32>(),
            ColumnKind::Int16 => std::mem::size_of::<i16>(),
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primitive element types storable in a [`Column`](super::Column).
///
/// `Default` supplies the zero value used for every newly allocated cell.
pub trait ColumnType: Copy + Default + PartialEq + fmt::Debug + 'static {
    const KIND: ColumnKind;
}

macro_rules! impl_column_type {
    ($ty:ty, $kind:expr) => {
        impl ColumnType for $ty {
            const KIND: ColumnKind = $kind;
        }
    };
}

impl_column_type!(f32, ColumnKind::Float32);
impl_column_type!(i16, ColumnKind::Int16);
