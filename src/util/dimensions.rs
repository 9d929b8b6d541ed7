//! Element shapes.
//!
//! Dimensions describe how many components make up one item of an attribute.

use std::fmt;

/// Shape of a single attribute item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementDimensions {
    /// One component
    #[default]
    Scalar,
    /// Two-component vector
    Vec2,
    /// Three-component vector
    Vec3,
    /// Four-component vector (also quaternions and RGBA colors)
    Vec4,
    /// 2x2 matrix
    Mat2,
    /// 3x3 matrix
    Mat3,
    /// 4x4 matrix
    Mat4,
}

impl ElementDimensions {
    /// All shapes, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Scalar,
        Self::Vec2,
        Self::Vec3,
        Self::Vec4,
        Self::Mat2,
        Self::Mat3,
        Self::Mat4,
    ];

    /// Number of components in one item.
    #[inline]
    pub const fn component_count(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 => 4,
            Self::Mat2 => 4,
            Self::Mat3 => 9,
            Self::Mat4 => 16,
        }
    }

    /// Name as used in documents.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scalar => "SCALAR",
            Self::Vec2 => "VEC2",
            Self::Vec3 => "VEC3",
            Self::Vec4 => "VEC4",
            Self::Mat2 => "MAT2",
            Self::Mat3 => "MAT3",
            Self::Mat4 => "MAT4",
        }
    }

    /// Parse a shape from its name string.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }

    /// Returns true for the matrix shapes.
    #[inline]
    pub const fn is_matrix(self) -> bool {
        matches!(self, Self::Mat2 | Self::Mat3 | Self::Mat4)
    }
}

impl fmt::Display for ElementDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
