//! Typed views over strided accessors.
//!
//! Every view presents a fixed-size, random-access sequence of a concrete item
//! type. The length is fixed by the underlying buffer region, so there is no
//! way to insert, remove or clear items, only to read and overwrite them.
//!
//! - [`ScalarArray`], [`Vector2Array`], [`Vector3Array`], [`Vector4Array`]
//! - [`QuaternionArray`], [`Matrix2x2Array`], [`Matrix3x3Array`], [`Matrix4x4Array`]
//! - [`ColorArray`] - RGB or RGBA sources read as RGBA
//! - [`MultiArray`] - rows of arbitrary width
//! - [`SparseArray`] - dense base with sparse overrides

mod vectors;
mod color;
mod multi;
mod sparse;

pub use vectors::*;
pub use color::ColorArray;
pub use multi::{MultiArray, Row};
pub use sparse::SparseArray;

use crate::util::Result;

/// Read access to a fixed-size sequence of decoded items.
pub trait AccessorArray {
    /// Decoded item type.
    type Item: Clone + PartialEq;

    /// Number of items.
    fn len(&self) -> usize;

    /// Returns true if the view has no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`len`](Self::len).
    fn get(&self, index: usize) -> Self::Item;

    /// Position of the first item equal to `item`.
    fn index_of(&self, item: &Self::Item) -> Option<usize> {
        (0..self.len()).find(|&i| self.get(i) == *item)
    }

    /// Returns true if any item equals `item`.
    fn contains(&self, item: &Self::Item) -> bool {
        self.index_of(item).is_some()
    }

    /// Decode items into `dst`, stopping at the shorter of the two.
    /// Returns the number of items copied.
    fn copy_to(&self, dst: &mut [Self::Item]) -> usize {
        let n = dst.len().min(self.len());
        for (i, d) in dst[..n].iter_mut().enumerate() {
            *d = self.get(i);
        }
        n
    }

    /// Iterate over decoded items.
    fn iter(&self) -> ArrayIter<'_, Self> {
        ArrayIter { array: self, front: 0, back: self.len() }
    }

    /// Decode every item into a new vector.
    fn to_vec(&self) -> Vec<Self::Item> {
        self.iter().collect()
    }
}

/// Write access to a fixed-size sequence of items.
pub trait AccessorArrayMut: AccessorArray {
    /// Check that `value` can be stored, without touching memory.
    fn check(&self, value: &Self::Item) -> Result<()>;

    /// Encode `value` at `index`.
    ///
    /// On error nothing is written.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`len`](AccessorArray::len).
    fn set(&mut self, index: usize, value: Self::Item) -> Result<()>;

    /// Overwrite leading items from `src`, stopping at the shorter of the two.
    ///
    /// All values are checked first, so a rejected value leaves the
    /// buffer unchanged. Returns the number of items written.
    fn fill(&mut self, src: &[Self::Item]) -> Result<usize> {
        let n = src.len().min(self.len());
        for v in &src[..n] {
            self.check(v)?;
        }
        for (i, v) in src[..n].iter().enumerate() {
            self.set(i, v.clone())?;
        }
        Ok(n)
    }
}

/// Iterator over the items of an [`AccessorArray`].
pub struct ArrayIter<'a, A: ?Sized> {
    array: &'a A,
    front: usize,
    back: usize,
}

impl<A: AccessorArray + ?Sized> Iterator for ArrayIter<'_, A> {
    type Item = A::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            let item = self.array.get(self.front);
            self.front += 1;
            Some(item)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<A: AccessorArray + ?Sized> DoubleEndedIterator for ArrayIter<'_, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            Some(self.array.get(self.back))
        } else {
            None
        }
    }
}

impl<A: AccessorArray + ?Sized> ExactSizeIterator for ArrayIter<'_, A> {}
