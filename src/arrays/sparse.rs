//! Dense base view with sparse overrides.

use std::collections::HashMap;

use super::{AccessorArray, AccessorArrayMut};
use crate::util::{Error, Result};

/// View that reads override values for a known subset of indices and base
/// values everywhere else.
///
/// The length is always the base length. Writes only reach the override
/// view: setting an index that has no override is accepted and ignored, the
/// base is treated as read-only background.
#[derive(Clone, Debug)]
pub struct SparseArray<T, O> {
    base: T,
    overrides: O,
    /// base index -> override index
    mapping: HashMap<usize, usize>,
}

impl<T, O> SparseArray<T, O>
where
    T: AccessorArray,
    O: AccessorArray<Item = T::Item>,
{
    /// Build from a base view, an override view and the base index of each
    /// override.
    ///
    /// `keys` must have one entry per override item and every key must be a
    /// valid base index. A repeated key maps to its last occurrence.
    pub fn new<K>(base: T, overrides: O, keys: &K) -> Result<Self>
    where
        K: AccessorArray<Item = u32> + ?Sized,
    {
        if keys.len() != overrides.len() {
            return Err(Error::invalid_layout(format!(
                "sparse index count {} does not match override count {}",
                keys.len(),
                overrides.len()
            )));
        }

        let base_len = base.len();
        let mut mapping = HashMap::with_capacity(keys.len());
        for (position, key) in keys.iter().enumerate() {
            if key as usize >= base_len {
                return Err(Error::IndexOutOfRange {
                    position,
                    index: key,
                    vertex_count: u32::try_from(base_len).unwrap_or(u32::MAX),
                });
            }
            mapping.insert(key as usize, position);
        }

        Ok(Self { base, overrides, mapping })
    }

    /// Returns true if `index` reads from the override view.
    #[inline]
    pub fn is_overridden(&self, index: usize) -> bool {
        self.mapping.contains_key(&index)
    }

    /// The dense base view.
    pub fn base(&self) -> &T {
        &self.base
    }

    /// The override view.
    pub fn overrides(&self) -> &O {
        &self.overrides
    }
}

impl<T, O> AccessorArray for SparseArray<T, O>
where
    T: AccessorArray,
    O: AccessorArray<Item = T::Item>,
{
    type Item = T::Item;

    #[inline]
    fn len(&self) -> usize {
        self.base.len()
    }

    fn get(&self, index: usize) -> T::Item {
        match self.mapping.get(&index) {
            Some(&i) => self.overrides.get(i),
            None => self.base.get(index),
        }
    }
}

impl<T, O> AccessorArrayMut for SparseArray<T, O>
where
    T: AccessorArray,
    O: AccessorArrayMut<Item = T::Item>,
{
    fn check(&self, value: &T::Item) -> Result<()> {
        self.overrides.check(value)
    }

    fn set(&mut self, index: usize, value: T::Item) -> Result<()> {
        match self.mapping.get(&index) {
            Some(&i) => self.overrides.set(i, value),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrays::ScalarArray;
    use crate::memory::{StridedIndexAccessor, StridedNumericAccessor};
    use crate::util::ComponentEncoding;

    fn scalars(values: &[f32]) -> Vec<u8> {
        bytemuck::cast_slice(values).to_vec()
    }

    fn view<B: AsRef<[u8]>>(buf: B, n: usize) -> ScalarArray<B> {
        let acc = StridedNumericAccessor::new(buf, 0, n, 0, 1, ComponentEncoding::Float32, false).unwrap();
        ScalarArray::new(acc).unwrap()
    }

    #[test]
    fn test_overlay_reads() {
        let base = scalars(&[10.0, 20.0, 30.0, 40.0]);
        let over = scalars(&[200.0, 400.0]);
        let keys = [1u8, 3];
        let keys = StridedIndexAccessor::new(&keys[..], 0, 2, ComponentEncoding::Uint8).unwrap();

        let sparse = SparseArray::new(view(&base[..], 4), view(&over[..], 2), &keys).unwrap();
        assert_eq!(sparse.len(), 4);
        assert_eq!(sparse.to_vec(), vec![10.0, 200.0, 30.0, 400.0]);
        assert!(sparse.is_overridden(3));
        assert!(!sparse.is_overridden(0));
    }

    #[test]
    fn test_write_to_plain_index_is_dropped() {
        let base = scalars(&[1.0, 2.0, 3.0]);
        let mut over = scalars(&[5.0]);
        let keys = 2u16.to_le_bytes();
        let keys = StridedIndexAccessor::new(&keys[..], 0, 1, ComponentEncoding::Uint16).unwrap();

        let mut sparse = SparseArray::new(view(&base[..], 3), view(&mut over[..], 1), &keys).unwrap();

        sparse.set(2, 9.0).unwrap();
        assert_eq!(sparse.get(2), 9.0);

        // no override for index 0: accepted, silently ignored
        sparse.set(0, 100.0).unwrap();
        assert_eq!(sparse.get(0), 1.0);
    }

    #[test]
    fn test_repeated_key_last_wins() {
        let base = scalars(&[0.0, 0.0]);
        let over = scalars(&[7.0, 8.0]);
        let keys = [1u8, 1];
        let keys = StridedIndexAccessor::new(&keys[..], 0, 2, ComponentEncoding::Uint8).unwrap();

        let sparse = SparseArray::new(view(&base[..], 2), view(&over[..], 2), &keys).unwrap();
        assert_eq!(sparse.get(1), 8.0);
    }

    #[test]
    fn test_key_out_of_range() {
        let base = scalars(&[0.0, 0.0]);
        let over = scalars(&[7.0]);
        let keys = [2u8];
        let keys = StridedIndexAccessor::new(&keys[..], 0, 1, ComponentEncoding::Uint8).unwrap();

        let r = SparseArray::new(view(&base[..], 2), view(&over[..], 1), &keys);
        assert!(matches!(r, Err(Error::IndexOutOfRange { position: 0, index: 2, vertex_count: 2 })));
    }
}
