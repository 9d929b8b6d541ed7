//! A layout descriptor bound to the buffer it describes.

use std::ops::Range;

use super::{LayoutDescriptor, StridedIndexAccessor, StridedNumericAccessor};
use crate::arrays::{
    ColorArray, Matrix2x2Array, Matrix3x3Array, Matrix4x4Array, MultiArray, QuaternionArray, ScalarArray, Vector2Array,
    Vector3Array, Vector4Array,
};
use crate::util::{AttributeFormat, Component, ElementDimensions, Error, Result};

/// Pairs a [`LayoutDescriptor`] with a byte buffer.
///
/// The buffer is held as given: `&[u8]`, `&mut [u8]` or an owned `Vec<u8>`.
/// Views created from it borrow the same bytes, nothing is copied.
#[derive(Clone, Debug)]
pub struct MemoryAccessor<B> {
    layout: LayoutDescriptor,
    data: B,
}

impl<B> MemoryAccessor<B> {
    /// Bind a layout to a buffer.
    pub fn new(layout: LayoutDescriptor, data: B) -> Self {
        Self { layout, data }
    }

    /// The layout descriptor.
    #[inline]
    pub fn layout(&self) -> &LayoutDescriptor {
        &self.layout
    }

    /// The whole backing buffer.
    #[inline]
    pub fn data(&self) -> &B {
        &self.data
    }

    /// Split into layout and buffer.
    pub fn into_parts(self) -> (LayoutDescriptor, B) {
        (self.layout, self.data)
    }
}

impl MemoryAccessor<Vec<u8>> {
    /// Zero-filled owned buffer large enough for every declared item.
    pub fn allocate(layout: LayoutDescriptor) -> Self {
        let data = vec![0u8; layout.required_buffer_len()];
        Self { layout, data }
    }

    /// Tightly packed owned accessor holding `values`, `dimensions`
    /// components per item.
    pub fn from_components<T: Component>(dimensions: ElementDimensions, normalized: bool, values: &[T]) -> Result<Self> {
        let n = dimensions.component_count();
        if values.len() % n != 0 {
            return Err(Error::invalid_layout(format!(
                "{} components do not divide into {} items",
                values.len(),
                dimensions
            )));
        }

        let data = if cfg!(target_endian = "little") {
            bytemuck::cast_slice::<T, u8>(values).to_vec()
        } else {
            let mut data = Vec::with_capacity(std::mem::size_of_val(values));
            for v in values {
                v.extend_le(&mut data);
            }
            data
        };

        let format = AttributeFormat::new(dimensions, T::ENCODING, normalized);
        let layout = LayoutDescriptor::new(0, values.len() / n, 0, format);
        Ok(Self { layout, data })
    }

    /// Set the attribute name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.layout.name = Some(name.into());
        self
    }
}

macro_rules! view_factories {
    ($( $(#[$meta:meta])* $get:ident / $get_mut:ident => $view:ident, $dims:ident; )*) => {
        impl<B: AsRef<[u8]>> MemoryAccessor<B> {
            $(
                $(#[$meta])*
                pub fn $get(&self) -> Result<$view<&[u8]>> {
                    self.expect_dimensions(ElementDimensions::$dims)?;
                    $view::new(self.numeric()?)
                }
            )*
        }

        impl<B: AsRef<[u8]> + AsMut<[u8]>> MemoryAccessor<B> {
            $(
                $(#[$meta])*
                pub fn $get_mut(&mut self) -> Result<$view<&mut [u8]>> {
                    self.expect_dimensions(ElementDimensions::$dims)?;
                    $view::new(self.numeric_mut()?)
                }
            )*
        }
    };
}

view_factories! {
    /// View `SCALAR` items as `f32`.
    as_scalar_array / as_scalar_array_mut => ScalarArray, Scalar;
    /// View `VEC2` items as `Vec2`.
    as_vector2_array / as_vector2_array_mut => Vector2Array, Vec2;
    /// View `VEC3` items as `Vec3`.
    as_vector3_array / as_vector3_array_mut => Vector3Array, Vec3;
    /// View `VEC4` items as `Vec4`.
    as_vector4_array / as_vector4_array_mut => Vector4Array, Vec4;
    /// View `VEC4` items as `Quat`.
    as_quaternion_array / as_quaternion_array_mut => QuaternionArray, Vec4;
    /// View `MAT2` items as `Mat2`.
    as_matrix2x2_array / as_matrix2x2_array_mut => Matrix2x2Array, Mat2;
    /// View `MAT3` items as `Mat3`.
    as_matrix3x3_array / as_matrix3x3_array_mut => Matrix3x3Array, Mat3;
    /// View `MAT4` items as `Mat4`.
    as_matrix4x4_array / as_matrix4x4_array_mut => Matrix4x4Array, Mat4;
}

impl<B: AsRef<[u8]>> MemoryAccessor<B> {
    /// Number of items the buffer can actually serve.
    pub fn effective_item_count(&self) -> usize {
        self.layout.effective_item_count(self.data.as_ref().len())
    }

    /// Offset of item `index` inside the buffer.
    #[inline]
    pub fn item_byte_offset(&self, index: usize) -> usize {
        self.layout.byte_offset + index * self.layout.step_byte_length()
    }

    /// Bytes covered by the items, relative to the start of the buffer.
    ///
    /// Spans `step * item_count` bytes from the offset, clamped to the
    /// buffer end.
    pub fn byte_range(&self) -> Range<usize> {
        let len = self.data.as_ref().len();
        let start = self.layout.byte_offset.min(len);
        let span = self.layout.step_byte_length().saturating_mul(self.layout.item_count);
        let end = self.layout.byte_offset.saturating_add(span).min(len);
        start..end
    }

    /// [`byte_range`](Self::byte_range) as absolute addresses.
    ///
    /// Two accessors can only share bytes if these ranges intersect.
    pub fn address_range(&self) -> Range<usize> {
        let base = self.data.as_ref().as_ptr() as usize;
        let r = self.byte_range();
        base + r.start..base + r.end
    }

    /// The bytes covered by the items.
    pub fn bytes(&self) -> &[u8] {
        &self.data.as_ref()[self.byte_range()]
    }

    /// Borrowed accessor over a sub-range of items.
    pub fn slice(&self, item_start: usize, item_count: usize) -> MemoryAccessor<&[u8]> {
        MemoryAccessor::new(self.layout.slice(item_start, item_count), self.data.as_ref())
    }

    /// Raw numeric accessor over the whole layout.
    pub fn numeric(&self) -> Result<StridedNumericAccessor<&[u8]>> {
        StridedNumericAccessor::from_layout(self.data.as_ref(), &self.layout)
    }

    /// View three- or four-component items as RGBA colors.
    pub fn as_color_array(&self, default_alpha: f32) -> Result<ColorArray<&[u8]>> {
        ColorArray::new(self.numeric()?, default_alpha)
    }

    /// View items as rows of `dimensions` entries.
    ///
    /// A tightly packed `SCALAR` layout is regrouped so that every
    /// `dimensions` consecutive scalars form one row. Any other layout must
    /// already have `dimensions` components per item.
    pub fn as_multi_array(&self, dimensions: usize) -> Result<MultiArray<&[u8]>> {
        let (rows, stride) = self.multi_layout(dimensions)?;
        let format = &self.layout.format;
        let accessor = StridedNumericAccessor::new(
            self.data.as_ref(),
            self.layout.byte_offset,
            rows,
            stride,
            dimensions,
            format.encoding,
            format.normalized,
        )?;
        Ok(MultiArray::new(accessor))
    }

    /// View a `SCALAR` unsigned layout as vertex indices.
    pub fn as_index_array(&self) -> Result<StridedIndexAccessor<&[u8]>> {
        StridedIndexAccessor::from_layout(self.data.as_ref(), &self.layout)
    }

    fn expect_dimensions(&self, dimensions: ElementDimensions) -> Result<()> {
        if self.layout.format.dimensions != dimensions {
            return Err(Error::unsupported(format!(
                "cannot view {} items as {}",
                self.layout.format.dimensions, dimensions
            )));
        }
        Ok(())
    }

    /// Row count and stride for a multi-array view.
    fn multi_layout(&self, dimensions: usize) -> Result<(usize, usize)> {
        let format = &self.layout.format;
        if dimensions == 0 {
            return Err(Error::unsupported("multi-array rows need at least one entry"));
        }
        if format.dimensions == ElementDimensions::Scalar && self.layout.byte_stride == 0 {
            return Ok((self.layout.item_count / dimensions, 0));
        }
        if format.component_count() != dimensions {
            return Err(Error::unsupported(format!(
                "cannot view {} items as rows of {}",
                format.dimensions, dimensions
            )));
        }
        Ok((self.layout.item_count, self.layout.byte_stride))
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> MemoryAccessor<B> {
    /// Layout and mutable buffer, borrowed together.
    pub fn parts_mut(&mut self) -> (&LayoutDescriptor, &mut [u8]) {
        (&self.layout, self.data.as_mut())
    }

    /// Mutable raw numeric accessor over the whole layout.
    pub fn numeric_mut(&mut self) -> Result<StridedNumericAccessor<&mut [u8]>> {
        StridedNumericAccessor::from_layout(self.data.as_mut(), &self.layout)
    }

    /// Mutable RGBA color view.
    pub fn as_color_array_mut(&mut self, default_alpha: f32) -> Result<ColorArray<&mut [u8]>> {
        ColorArray::new(self.numeric_mut()?, default_alpha)
    }

    /// Mutable row view, see [`as_multi_array`](Self::as_multi_array).
    pub fn as_multi_array_mut(&mut self, dimensions: usize) -> Result<MultiArray<&mut [u8]>> {
        let (rows, stride) = self.multi_layout(dimensions)?;
        let format = self.layout.format;
        let byte_offset = self.layout.byte_offset;
        let accessor = StridedNumericAccessor::new(
            self.data.as_mut(),
            byte_offset,
            rows,
            stride,
            dimensions,
            format.encoding,
            format.normalized,
        )?;
        Ok(MultiArray::new(accessor))
    }

    /// Mutable vertex index view.
    pub fn as_index_array_mut(&mut self) -> Result<StridedIndexAccessor<&mut [u8]>> {
        StridedIndexAccessor::from_layout(self.data.as_mut(), &self.layout)
    }
}
