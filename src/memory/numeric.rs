//! Strided numeric access over encoded vertex data.
//!
//! [`StridedNumericAccessor`] binds a byte buffer to an item layout and
//! converts each stored component to and from `f32`, applying fixed-point
//! normalization where the format asks for it.

use byteorder::{ByteOrder, LittleEndian};
use tracing::trace;

use super::layout::{effective_item_count, LayoutDescriptor};
use crate::util::{ComponentEncoding, Error, Result};

/// Decode/encode strategy, chosen once per accessor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Codec {
    Float32,
    Int8,
    Uint8,
    Int16,
    Uint16,
    Uint32,
    NormInt8,
    NormUint8,
    NormInt16,
    NormUint16,
}

impl Codec {
    fn select(encoding: ComponentEncoding, normalized: bool) -> Result<Self> {
        use ComponentEncoding as E;
        let codec = match (encoding, normalized) {
            // float ignores the normalized flag
            (E::Float32, _) => Self::Float32,
            (E::Int8, false) => Self::Int8,
            (E::Uint8, false) => Self::Uint8,
            (E::Int16, false) => Self::Int16,
            (E::Uint16, false) => Self::Uint16,
            (E::Uint32, false) => Self::Uint32,
            (E::Int8, true) => Self::NormInt8,
            (E::Uint8, true) => Self::NormUint8,
            (E::Int16, true) => Self::NormInt16,
            (E::Uint16, true) => Self::NormUint16,
            (E::Uint32, true) => return Err(Error::UnsupportedEncoding { encoding, normalized }),
        };
        Ok(codec)
    }

    #[inline]
    fn decode(self, b: &[u8]) -> f32 {
        match self {
            Self::Float32 => LittleEndian::read_f32(b),
            Self::Int8 => b[0] as i8 as f32,
            Self::Uint8 => b[0] as f32,
            Self::Int16 => LittleEndian::read_i16(b) as f32,
            Self::Uint16 => LittleEndian::read_u16(b) as f32,
            Self::Uint32 => LittleEndian::read_u32(b) as f32,
            Self::NormInt8 => (b[0] as i8 as f32 / 127.0).max(-1.0),
            Self::NormUint8 => b[0] as f32 / 255.0,
            Self::NormInt16 => (LittleEndian::read_i16(b) as f32 / 32767.0).max(-1.0),
            Self::NormUint16 => LittleEndian::read_u16(b) as f32 / 65535.0,
        }
    }

    /// Normalized encodes round to nearest; plain integer encodes truncate.
    /// Both saturate at the limits of the storage type.
    #[inline]
    fn encode(self, b: &mut [u8], value: f32) {
        match self {
            Self::Float32 => LittleEndian::write_f32(b, value),
            Self::Int8 => b[0] = value as i8 as u8,
            Self::Uint8 => b[0] = value as u8,
            Self::Int16 => LittleEndian::write_i16(b, value as i16),
            Self::Uint16 => LittleEndian::write_u16(b, value as u16),
            Self::Uint32 => LittleEndian::write_u32(b, value as u32),
            Self::NormInt8 => b[0] = (value * 127.0).round() as i8 as u8,
            Self::NormUint8 => b[0] = (value * 255.0).round() as u8,
            Self::NormInt16 => LittleEndian::write_i16(b, (value * 32767.0).round() as i16),
            Self::NormUint16 => LittleEndian::write_u16(b, (value * 65535.0).round() as u16),
        }
    }
}

/// Reject NaN and infinities before anything is written.
#[inline]
pub(crate) fn check_finite(values: &[f32]) -> Result<()> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(&value) => Err(Error::NonFiniteValue { value }),
        None => Ok(()),
    }
}

/// Random access to the components of strided, encoded items.
///
/// The accessor never copies the buffer: `B` is typically `&[u8]` for
/// reading or `&mut [u8]` for writing.
#[derive(Clone, Debug)]
pub struct StridedNumericAccessor<B> {
    data: B,
    byte_offset: usize,
    byte_stride: usize,
    item_count: usize,
    component_count: usize,
    encoding: ComponentEncoding,
    normalized: bool,
    codec: Codec,
}

impl<B: AsRef<[u8]>> StridedNumericAccessor<B> {
    /// Bind a buffer region.
    ///
    /// `byte_stride` of zero means tightly packed. Fails with
    /// [`Error::UnsupportedEncoding`] for combinations without a conversion
    /// (normalized `Uint32`) and [`Error::InvalidLayout`] for a stride that
    /// cannot hold one item.
    pub fn new(
        data: B,
        byte_offset: usize,
        item_count: usize,
        byte_stride: usize,
        component_count: usize,
        encoding: ComponentEncoding,
        normalized: bool,
    ) -> Result<Self> {
        let codec = Codec::select(encoding, normalized)?;

        if component_count == 0 {
            return Err(Error::invalid_layout("component count must be at least 1"));
        }
        let item_bytes = component_count * encoding.num_bytes();
        if byte_stride > 0 && byte_stride < item_bytes {
            return Err(Error::invalid_layout(format!(
                "byte stride {byte_stride} is smaller than item size {item_bytes}"
            )));
        }

        let byte_stride = byte_stride.max(item_bytes);
        let available = data.as_ref().len().saturating_sub(byte_offset);
        let item_count = effective_item_count(available, byte_stride, item_bytes, item_count);

        trace!(byte_offset, byte_stride, item_count, component_count, %encoding, normalized, "bound numeric accessor");

        Ok(Self { data, byte_offset, byte_stride, item_count, component_count, encoding, normalized, codec })
    }

    /// Bind a buffer using a layout descriptor.
    ///
    /// # Errors
    ///
    /// Fails like [`new`](Self::new) when the stride cannot hold one item or
    /// the encoding has no conversion. Vertex-attribute alignment is not
    /// checked here; call [`LayoutDescriptor::validate_vertex_attribute`]
    /// first when binding vertex data.
    pub fn from_layout(data: B, layout: &LayoutDescriptor) -> Result<Self> {
        layout.validate_stride()?;
        let f = &layout.format;
        Self::new(data, layout.byte_offset, layout.item_count, layout.byte_stride, f.component_count(), f.encoding, f.normalized)
    }

    /// Effective number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.item_count
    }

    /// Returns true if no item is available.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    /// Components per item.
    #[inline]
    pub fn component_count(&self) -> usize {
        self.component_count
    }

    /// Storage type of the components.
    #[inline]
    pub fn encoding(&self) -> ComponentEncoding {
        self.encoding
    }

    /// Whether integer components are normalized.
    #[inline]
    pub fn normalized(&self) -> bool {
        self.normalized
    }

    /// Effective distance between items.
    #[inline]
    pub fn byte_stride(&self) -> usize {
        self.byte_stride
    }

    /// Release the underlying buffer.
    pub fn into_inner(self) -> B {
        self.data
    }

    #[inline]
    fn address(&self, item: usize, component: usize) -> usize {
        assert!(item < self.item_count, "item index {item} out of range (count: {})", self.item_count);
        debug_assert!(component < self.component_count);
        self.byte_offset + item * self.byte_stride + component * self.encoding.num_bytes()
    }

    /// Decode one component.
    ///
    /// # Panics
    ///
    /// Panics if `item` is not below [`len`](Self::len).
    #[inline]
    pub fn get(&self, item: usize, component: usize) -> f32 {
        let at = self.address(item, component);
        self.codec.decode(&self.data.as_ref()[at..])
    }

    /// Decode the first `dst.len()` components of an item.
    ///
    /// # Panics
    ///
    /// Panics if `item` is out of range or `dst` is longer than an item.
    pub fn read_into(&self, item: usize, dst: &mut [f32]) {
        assert!(dst.len() <= self.component_count);
        for (c, v) in dst.iter_mut().enumerate() {
            *v = self.get(item, c);
        }
    }

    /// Decode `N` leading components of an item.
    #[inline]
    pub fn read_row<const N: usize>(&self, item: usize) -> [f32; N] {
        let mut row = [0.0; N];
        self.read_into(item, &mut row);
        row
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> StridedNumericAccessor<B> {
    /// Encode one component.
    ///
    /// Non-finite values are rejected and leave the buffer untouched.
    ///
    /// # Panics
    ///
    /// Panics if `item` is not below [`len`](Self::len).
    pub fn set(&mut self, item: usize, component: usize, value: f32) -> Result<()> {
        check_finite(&[value])?;
        let at = self.address(item, component);
        self.codec.encode(&mut self.data.as_mut()[at..], value);
        Ok(())
    }

    /// Encode the leading components of an item.
    ///
    /// Every value is checked before the first byte is written.
    /// Entries past the component count are ignored.
    pub fn write_row(&mut self, item: usize, values: &[f32]) -> Result<()> {
        let n = values.len().min(self.component_count);
        check_finite(&values[..n])?;
        for (c, &v) in values[..n].iter().enumerate() {
            let at = self.address(item, c);
            self.codec.encode(&mut self.data.as_mut()[at..], v);
        }
        Ok(())
    }
}
