//! Binary placement of an attribute inside a byte buffer.

use crate::util::{AttributeFormat, ComponentEncoding, ElementDimensions, Error, Result};
use tracing::debug;

/// Full binary placement of one attribute: where the first item starts, how
/// many items there are, how far apart they are, and how each one is encoded.
///
/// A `byte_stride` of zero means tightly packed, i.e. the effective step
/// between items is the format's byte size.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutDescriptor {
    /// Attribute name (`POSITION`, `WEIGHTS_0`, ...), if any
    pub name: Option<String>,
    /// Offset of the first item in the buffer
    pub byte_offset: usize,
    /// Declared number of items
    pub item_count: usize,
    /// Distance between items, 0 for tightly packed
    pub byte_stride: usize,
    /// Per-item format
    pub format: AttributeFormat,
}

impl LayoutDescriptor {
    /// Create an unnamed descriptor.
    pub fn new(byte_offset: usize, item_count: usize, byte_stride: usize, format: AttributeFormat) -> Self {
        Self { name: None, byte_offset, item_count, byte_stride, format }
    }

    /// Set the attribute name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Descriptor with the default format of a standard vertex attribute.
    ///
    /// Offset, count and stride are left at zero; they are usually assigned
    /// later by [`set_interleaved_info`](Self::set_interleaved_info).
    pub fn for_attribute(name: &str) -> Self {
        Self::new(0, 0, 0, default_attribute_format(name)).with_name(name)
    }

    /// Tightly packed index descriptor.
    pub fn for_indices(encoding: ComponentEncoding, byte_offset: usize, item_count: usize) -> Self {
        Self::new(byte_offset, item_count, 0, AttributeFormat::from_encoding(encoding))
    }

    /// Bytes between the start of two consecutive items.
    #[inline]
    pub fn step_byte_length(&self) -> usize {
        self.byte_stride.max(self.format.byte_size())
    }

    /// Size in bytes of one item, rounded up to a 4-byte boundary.
    #[inline]
    pub fn padded_byte_length(&self) -> usize {
        self.format.padded_byte_size()
    }

    /// Minimum buffer length able to back every declared item.
    ///
    /// The last item does not need trailing padding.
    pub fn required_buffer_len(&self) -> usize {
        match self.item_count {
            0 => self.byte_offset,
            n => self.byte_offset + self.step_byte_length() * (n - 1) + self.format.byte_size(),
        }
    }

    /// Number of items a buffer of `buffer_len` bytes can actually serve.
    pub fn effective_item_count(&self, buffer_len: usize) -> usize {
        effective_item_count(
            buffer_len.saturating_sub(self.byte_offset),
            self.step_byte_length(),
            self.format.byte_size(),
            self.item_count,
        )
    }

    /// Descriptor over a sub-range of items.
    pub fn slice(&self, item_start: usize, item_count: usize) -> Self {
        let mut sliced = self.clone();
        sliced.byte_offset += item_start * self.step_byte_length();
        sliced.item_count = self.item_count.min(item_count);
        sliced
    }

    /// Check the vertex-attribute layout rules.
    ///
    /// Offset and stride must be multiples of 4, and a non-zero stride must
    /// hold a whole item.
    pub fn validate_vertex_attribute(&self) -> Result<()> {
        if self.byte_offset % 4 != 0 {
            return Err(Error::invalid_layout(format!(
                "{}: byte offset {} is not a multiple of 4",
                self.display_name(),
                self.byte_offset
            )));
        }
        if self.byte_stride % 4 != 0 {
            return Err(Error::invalid_layout(format!(
                "{}: byte stride {} is not a multiple of 4",
                self.display_name(),
                self.byte_stride
            )));
        }
        self.validate_stride()
    }

    /// Check the index layout rules.
    pub fn validate_indices(&self) -> Result<()> {
        if self.format.dimensions != ElementDimensions::Scalar {
            return Err(Error::invalid_layout(format!(
                "{}: indices must be SCALAR, got {}",
                self.display_name(),
                self.format.dimensions
            )));
        }
        if self.format.normalized {
            return Err(Error::invalid_layout(format!("{}: indices cannot be normalized", self.display_name())));
        }
        if !matches!(self.byte_stride, 0 | 1 | 2 | 4) {
            return Err(Error::invalid_layout(format!(
                "{}: index byte stride {} must be 0, 1, 2 or 4",
                self.display_name(),
                self.byte_stride
            )));
        }
        Ok(())
    }

    /// Boolean form of [`validate_vertex_attribute`](Self::validate_vertex_attribute).
    #[inline]
    pub fn is_valid_vertex_attribute(&self) -> bool {
        self.validate_vertex_attribute().is_ok()
    }

    /// Boolean form of [`validate_indices`](Self::validate_indices).
    #[inline]
    pub fn is_valid_indices(&self) -> bool {
        self.validate_indices().is_ok()
    }

    /// A non-zero stride must hold at least one item.
    pub(crate) fn validate_stride(&self) -> Result<()> {
        if self.byte_stride > 0 && self.byte_stride < self.format.byte_size() {
            return Err(Error::invalid_layout(format!(
                "{}: byte stride {} is smaller than item size {}",
                self.display_name(),
                self.byte_stride,
                self.format.byte_size()
            )));
        }
        Ok(())
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    /// Lay out a set of attributes as one interleaved vertex buffer.
    ///
    /// Attributes are placed back to back in slice order, each taking its
    /// padded byte size, starting at `byte_offset`. Every descriptor receives
    /// `item_count` and the summed stride, which is also returned.
    pub fn set_interleaved_info(descriptors: &mut [LayoutDescriptor], byte_offset: usize, item_count: usize) -> usize {
        let mut offset = byte_offset;
        let mut byte_stride = 0;

        for d in descriptors.iter_mut() {
            let step = d.padded_byte_length();
            d.byte_offset = offset;
            d.item_count = item_count;
            offset += step;
            byte_stride += step;
        }

        for d in descriptors.iter_mut() {
            d.byte_stride = byte_stride;
        }

        debug!(attributes = descriptors.len(), byte_stride, item_count, "interleaved vertex layout");
        byte_stride
    }
}

/// Items served by `available` bytes.
///
/// A trailing remainder counts as one more item when it holds the unpadded
/// item, which accepts buffers whose final item has no trailing padding.
pub(crate) fn effective_item_count(available: usize, step: usize, item_bytes: usize, declared: usize) -> usize {
    if step == 0 {
        return 0;
    }
    let mut count = available / step;
    if item_bytes > 0 && available % step >= item_bytes {
        count += 1;
    }
    count.min(declared)
}

/// Default format for a standard vertex attribute name.
pub fn default_attribute_format(name: &str) -> AttributeFormat {
    match name {
        "POSITION" | "NORMAL" => AttributeFormat::VEC3F,
        "TANGENT" => AttributeFormat::VEC4F,
        _ if name.starts_with("TEXCOORD_") => AttributeFormat::VEC2F,
        _ if name.starts_with("COLOR_") => AttributeFormat::COLOR_UNORM8,
        _ if name.starts_with("JOINTS_") => AttributeFormat::JOINTS_U8,
        _ if name.starts_with("WEIGHTS_") => AttributeFormat::WEIGHTS_UNORM8,
        _ => AttributeFormat::FLOAT,
    }
}

/// Deterministic ordering score for attribute names.
///
/// POSITION, NORMAL, TANGENT, COLOR_0..3, TEXCOORD_0..3, then joints and
/// weights, then everything else.
pub fn attribute_sort_key(name: &str) -> u32 {
    match name {
        "POSITION" => 0,
        "NORMAL" => 1,
        "TANGENT" => 2,
        "COLOR_0" => 10,
        "COLOR_1" => 11,
        "COLOR_2" => 12,
        "COLOR_3" => 13,
        "TEXCOORD_0" => 20,
        "TEXCOORD_1" => 21,
        "TEXCOORD_2" => 22,
        "TEXCOORD_3" => 23,
        "JOINTS_0" => 30,
        "WEIGHTS_0" => 31,
        "JOINTS_1" => 32,
        "WEIGHTS_1" => 33,
        _ => 100,
    }
}

/// Stable sort of descriptors by [`attribute_sort_key`].
///
/// Unnamed descriptors sort with the unknown names.
pub fn sort_by_attribute_name(descriptors: &mut [LayoutDescriptor]) {
    descriptors.sort_by_key(|d| d.name.as_deref().map_or(100, attribute_sort_key));
}
