//! Strided access to unsigned index buffers.

use byteorder::{ByteOrder, LittleEndian};

use super::layout::LayoutDescriptor;
use crate::arrays::{AccessorArray, AccessorArrayMut};
use crate::util::{ComponentEncoding, Error, Result};

/// Index buffer view: each item is one unsigned integer widened to `u32`.
///
/// Items are tightly packed, the stride is always the encoding's byte length.
#[derive(Clone, Debug)]
pub struct StridedIndexAccessor<B> {
    data: B,
    byte_offset: usize,
    item_count: usize,
    encoding: ComponentEncoding,
}

impl<B: AsRef<[u8]>> StridedIndexAccessor<B> {
    /// Bind a buffer region holding `Uint8`, `Uint16` or `Uint32` indices.
    pub fn new(data: B, byte_offset: usize, item_count: usize, encoding: ComponentEncoding) -> Result<Self> {
        if !encoding.is_index() {
            return Err(Error::UnsupportedEncoding { encoding, normalized: false });
        }
        let available = data.as_ref().len().saturating_sub(byte_offset);
        let item_count = item_count.min(available / encoding.num_bytes());
        Ok(Self { data, byte_offset, item_count, encoding })
    }

    /// Bind a buffer using an index layout descriptor.
    pub fn from_layout(data: B, layout: &LayoutDescriptor) -> Result<Self> {
        layout.validate_indices()?;
        Self::new(data, layout.byte_offset, layout.item_count, layout.format.encoding)
    }

    /// Storage type of the indices.
    #[inline]
    pub fn encoding(&self) -> ComponentEncoding {
        self.encoding
    }

    /// Release the underlying buffer.
    pub fn into_inner(self) -> B {
        self.data
    }

    #[inline]
    fn address(&self, index: usize) -> usize {
        assert!(index < self.item_count, "index position {index} out of range (count: {})", self.item_count);
        self.byte_offset + index * self.encoding.num_bytes()
    }
}

impl<B: AsRef<[u8]>> AccessorArray for StridedIndexAccessor<B> {
    type Item = u32;

    #[inline]
    fn len(&self) -> usize {
        self.item_count
    }

    fn get(&self, index: usize) -> u32 {
        let b = &self.data.as_ref()[self.address(index)..];
        match self.encoding {
            ComponentEncoding::Uint8 => b[0] as u32,
            ComponentEncoding::Uint16 => LittleEndian::read_u16(b) as u32,
            _ => LittleEndian::read_u32(b),
        }
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> AccessorArrayMut for StridedIndexAccessor<B> {
    fn check(&self, _value: &u32) -> Result<()> {
        Ok(())
    }

    /// Store an index, keeping only the low bits that fit the encoding.
    fn set(&mut self, index: usize, value: u32) -> Result<()> {
        let at = self.address(index);
        let encoding = self.encoding;
        let b = &mut self.data.as_mut()[at..];
        match encoding {
            ComponentEncoding::Uint8 => b[0] = value as u8,
            ComponentEncoding::Uint16 => LittleEndian::write_u16(b, value as u16),
            _ => LittleEndian::write_u32(b, value),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        let bytes = [1u8, 2, 3, 4, 5, 6, 7, 8];

        let a = StridedIndexAccessor::new(&bytes[..], 0, 8, ComponentEncoding::Uint8).unwrap();
        assert_eq!(a.to_vec(), vec![1, 2, 3, 4, 5, 6, 7, 8]);

        let a = StridedIndexAccessor::new(&bytes[..], 0, 4, ComponentEncoding::Uint16).unwrap();
        assert_eq!(a.get(0), 0x0201);
        assert_eq!(a.get(3), 0x0807);

        let a = StridedIndexAccessor::new(&bytes[..], 4, 1, ComponentEncoding::Uint32).unwrap();
        assert_eq!(a.get(0), 0x0807_0605);
    }

    #[test]
    fn test_count_clamped_to_buffer() {
        let bytes = [0u8; 7];
        let a = StridedIndexAccessor::new(&bytes[..], 0, 10, ComponentEncoding::Uint16).unwrap();
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_unsupported_encodings() {
        let bytes = [0u8; 8];
        for enc in [ComponentEncoding::Int8, ComponentEncoding::Int16, ComponentEncoding::Float32] {
            let r = StridedIndexAccessor::new(&bytes[..], 0, 2, enc);
            assert!(matches!(r, Err(Error::UnsupportedEncoding { .. })));
        }
    }

    #[test]
    fn test_set_narrows() {
        let mut bytes = [0u8; 4];
        let mut a = StridedIndexAccessor::new(&mut bytes[..], 0, 2, ComponentEncoding::Uint16).unwrap();
        a.set(0, 513).unwrap();
        a.set(1, 0x1_0005).unwrap();
        assert_eq!(a.to_vec(), vec![513, 5]);
    }

    #[test]
    fn test_from_layout_validates() {
        let bytes = [0u8; 8];
        let layout = LayoutDescriptor::new(0, 4, 8, crate::util::AttributeFormat::INDEX_U16);
        assert!(matches!(StridedIndexAccessor::from_layout(&bytes[..], &layout), Err(Error::InvalidLayout(_))));
    }
}
