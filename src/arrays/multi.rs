//! Rows of arbitrary width.

use smallvec::SmallVec;

use super::{AccessorArray, AccessorArrayMut};
use crate::memory::{check_finite, StridedNumericAccessor};
use crate::util::Result;

/// One decoded row of a [`MultiArray`].
pub type Row = SmallVec<[f32; 16]>;

/// Items read as rows of `f32`, one entry per component.
///
/// Used where the width is only known at runtime, such as morph target
/// weights or per-axis bounds checks.
#[derive(Clone, Debug)]
pub struct MultiArray<B> {
    accessor: StridedNumericAccessor<B>,
}

impl<B: AsRef<[u8]>> MultiArray<B> {
    /// Wrap an accessor; the row width is its component count.
    pub fn new(accessor: StridedNumericAccessor<B>) -> Self {
        Self { accessor }
    }

    /// Entries per row.
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.accessor.component_count()
    }

    /// Decode one row into `dst`, stopping at the shorter of the two.
    pub fn read_into(&self, index: usize, dst: &mut [f32]) {
        let n = dst.len().min(self.dimensions());
        self.accessor.read_into(index, &mut dst[..n]);
    }

    /// The underlying accessor.
    pub fn accessor(&self) -> &StridedNumericAccessor<B> {
        &self.accessor
    }
}

impl<B: AsRef<[u8]>> AccessorArray for MultiArray<B> {
    type Item = Row;

    #[inline]
    fn len(&self) -> usize {
        self.accessor.len()
    }

    fn get(&self, index: usize) -> Row {
        let mut row: Row = SmallVec::from_elem(0.0, self.dimensions());
        self.accessor.read_into(index, &mut row);
        row
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> AccessorArrayMut for MultiArray<B> {
    fn check(&self, value: &Row) -> Result<()> {
        check_finite(&value[..value.len().min(self.dimensions())])
    }

    /// Store the leading entries of `value`; a short row leaves the
    /// remaining components untouched.
    fn set(&mut self, index: usize, value: Row) -> Result<()> {
        self.accessor.write_row(index, &value)
    }
}
