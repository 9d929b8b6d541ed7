//! AttributeFormat - combines element shape, component encoding and normalization.

use super::{ComponentEncoding, ElementDimensions};
use std::fmt;

/// AttributeFormat describes how one item of an attribute is stored.
///
/// It combines an [`ElementDimensions`] with a [`ComponentEncoding`] and a
/// normalization flag. For example, a vertex color stored as four unsigned
/// bytes mapped to `[0, 1]` is `Vec4` + `Uint8` + normalized.
///
/// The normalization flag only has meaning for integer encodings; float
/// components ignore it. Equality is still structural over all three fields.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeFormat {
    /// Element shape
    pub dimensions: ElementDimensions,
    /// Storage type of each component
    pub encoding: ComponentEncoding,
    /// Integer components are fixed-point fractions of their range
    pub normalized: bool,
}

impl AttributeFormat {
    /// Create a new format from all three fields.
    #[inline]
    pub const fn new(dimensions: ElementDimensions, encoding: ComponentEncoding, normalized: bool) -> Self {
        Self { dimensions, encoding, normalized }
    }

    /// Float components of the given shape.
    #[inline]
    pub const fn from_dimensions(dimensions: ElementDimensions) -> Self {
        Self::new(dimensions, ComponentEncoding::Float32, false)
    }

    /// A non-normalized scalar of the given encoding.
    #[inline]
    pub const fn from_encoding(encoding: ComponentEncoding) -> Self {
        Self::new(ElementDimensions::Scalar, encoding, false)
    }

    /// A non-normalized format of the given shape and encoding.
    #[inline]
    pub const fn with(dimensions: ElementDimensions, encoding: ComponentEncoding) -> Self {
        Self::new(dimensions, encoding, false)
    }

    /// Number of components in one item.
    #[inline]
    pub const fn component_count(&self) -> usize {
        self.dimensions.component_count()
    }

    /// Size in bytes of one item, without padding.
    #[inline]
    pub const fn byte_size(&self) -> usize {
        self.component_count() * self.encoding.num_bytes()
    }

    /// Size in bytes of one item, rounded up to a 4-byte boundary.
    #[inline]
    pub const fn padded_byte_size(&self) -> usize {
        round_up_to_word(self.byte_size())
    }

    /// Returns true if reads apply fixed-point normalization.
    #[inline]
    pub const fn is_normalized_integer(&self) -> bool {
        self.normalized && self.encoding.is_integer()
    }

    // === Common predefined formats ===

    pub const FLOAT: Self = Self::from_dimensions(ElementDimensions::Scalar);
    pub const VEC2F: Self = Self::from_dimensions(ElementDimensions::Vec2);
    pub const VEC3F: Self = Self::from_dimensions(ElementDimensions::Vec3);
    pub const VEC4F: Self = Self::from_dimensions(ElementDimensions::Vec4);
    pub const MAT2F: Self = Self::from_dimensions(ElementDimensions::Mat2);
    pub const MAT3F: Self = Self::from_dimensions(ElementDimensions::Mat3);
    pub const MAT4F: Self = Self::from_dimensions(ElementDimensions::Mat4);

    // Quaternion (x, y, z, w)
    pub const QUATF: Self = Self::VEC4F;

    // Colors
    pub const COLOR3F: Self = Self::VEC3F;
    pub const COLOR4F: Self = Self::VEC4F;
    pub const COLOR_UNORM8: Self = Self::new(ElementDimensions::Vec4, ComponentEncoding::Uint8, true);
    pub const COLOR_UNORM16: Self = Self::new(ElementDimensions::Vec4, ComponentEncoding::Uint16, true);

    // Skinning
    pub const JOINTS_U8: Self = Self::with(ElementDimensions::Vec4, ComponentEncoding::Uint8);
    pub const JOINTS_U16: Self = Self::with(ElementDimensions::Vec4, ComponentEncoding::Uint16);
    pub const WEIGHTS_UNORM8: Self = Self::new(ElementDimensions::Vec4, ComponentEncoding::Uint8, true);
    pub const WEIGHTS_UNORM16: Self = Self::new(ElementDimensions::Vec4, ComponentEncoding::Uint16, true);

    // Indices
    pub const INDEX_U8: Self = Self::from_encoding(ComponentEncoding::Uint8);
    pub const INDEX_U16: Self = Self::from_encoding(ComponentEncoding::Uint16);
    pub const INDEX_U32: Self = Self::from_encoding(ComponentEncoding::Uint32);
}

/// Round a byte length up to the next multiple of 4.
#[inline]
pub const fn round_up_to_word(len: usize) -> usize {
    (len + 3) & !3
}

impl From<ElementDimensions> for AttributeFormat {
    fn from(dimensions: ElementDimensions) -> Self {
        Self::from_dimensions(dimensions)
    }
}

impl From<ComponentEncoding> for AttributeFormat {
    fn from(encoding: ComponentEncoding) -> Self {
        Self::from_encoding(encoding)
    }
}

impl From<(ElementDimensions, ComponentEncoding)> for AttributeFormat {
    fn from((dimensions, encoding): (ElementDimensions, ComponentEncoding)) -> Self {
        Self::with(dimensions, encoding)
    }
}

impl fmt::Debug for AttributeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.dimensions, self.encoding)?;
        if self.normalized {
            write!(f, " normalized")?;
        }
        Ok(())
    }
}

impl fmt::Display for AttributeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_sizes() {
        assert_eq!(AttributeFormat::FLOAT.byte_size(), 4);
        assert_eq!(AttributeFormat::VEC3F.byte_size(), 12);
        assert_eq!(AttributeFormat::MAT4F.byte_size(), 64);
        assert_eq!(AttributeFormat::COLOR_UNORM8.byte_size(), 4);
        assert_eq!(AttributeFormat::JOINTS_U16.byte_size(), 8);
    }

    #[test]
    fn test_padded_size() {
        let rgb8 = AttributeFormat::new(ElementDimensions::Vec3, ComponentEncoding::Uint8, true);
        assert_eq!(rgb8.byte_size(), 3);
        assert_eq!(rgb8.padded_byte_size(), 4);

        let uv16 = AttributeFormat::with(ElementDimensions::Vec3, ComponentEncoding::Int16);
        assert_eq!(uv16.byte_size(), 6);
        assert_eq!(uv16.padded_byte_size(), 8);

        assert_eq!(AttributeFormat::VEC3F.padded_byte_size(), 12);
        assert_eq!(round_up_to_word(0), 0);
    }

    #[test]
    fn test_defaults() {
        let f = AttributeFormat::default();
        assert_eq!(f.dimensions, ElementDimensions::Scalar);
        assert_eq!(f.encoding, ComponentEncoding::Float32);
        assert!(!f.normalized);

        let f: AttributeFormat = ElementDimensions::Vec2.into();
        assert_eq!(f, AttributeFormat::VEC2F);

        let f: AttributeFormat = ComponentEncoding::Uint16.into();
        assert_eq!(f, AttributeFormat::INDEX_U16);
    }

    #[test]
    fn test_structural_equality() {
        let a = AttributeFormat::new(ElementDimensions::Vec4, ComponentEncoding::Float32, true);
        assert_ne!(a, AttributeFormat::VEC4F);
        assert!(!a.is_normalized_integer());
        assert!(AttributeFormat::WEIGHTS_UNORM8.is_normalized_integer());
    }

    #[test]
    fn test_format_display() {
        assert_eq!(format!("{}", AttributeFormat::VEC3F), "VEC3 FLOAT");
        assert_eq!(format!("{}", AttributeFormat::COLOR_UNORM8), "VEC4 UNSIGNED_BYTE normalized");
    }
}
