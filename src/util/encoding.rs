//! Component encodings - the on-disk representation of a single number.

use bytemuck::Pod;
use std::fmt;

/// Component encoding enum - the numeric storage types of vertex data.
///
/// Discriminants are the interchange-format component type codes, so a value
/// read from a document can be converted with [`ComponentEncoding::from_code`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum ComponentEncoding {
    /// Signed 8-bit integer
    Int8 = 5120,
    /// Unsigned 8-bit integer
    Uint8 = 5121,
    /// Signed 16-bit integer
    Int16 = 5122,
    /// Unsigned 16-bit integer
    Uint16 = 5123,
    /// Unsigned 32-bit integer
    Uint32 = 5125,
    /// 32-bit floating point (IEEE 754 single precision)
    #[default]
    Float32 = 5126,
}

impl ComponentEncoding {
    /// All supported encodings, in code order.
    pub const ALL: [Self; 6] = [
        Self::Int8,
        Self::Uint8,
        Self::Int16,
        Self::Uint16,
        Self::Uint32,
        Self::Float32,
    ];

    /// Returns the size in bytes of a single component.
    #[inline]
    pub const fn num_bytes(self) -> usize {
        match self {
            Self::Int8 | Self::Uint8 => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Uint32 | Self::Float32 => 4,
        }
    }

    /// Returns the interchange-format type code.
    #[inline]
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Convert from an interchange-format type code.
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            5120 => Some(Self::Int8),
            5121 => Some(Self::Uint8),
            5122 => Some(Self::Int16),
            5123 => Some(Self::Uint16),
            5125 => Some(Self::Uint32),
            5126 => Some(Self::Float32),
            _ => None,
        }
    }

    /// Returns the name of this encoding as used in documents.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int8 => "BYTE",
            Self::Uint8 => "UNSIGNED_BYTE",
            Self::Int16 => "SHORT",
            Self::Uint16 => "UNSIGNED_SHORT",
            Self::Uint32 => "UNSIGNED_INT",
            Self::Float32 => "FLOAT",
        }
    }

    /// Parse an encoding from its name string.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.name() == name)
    }

    /// Returns true for the integer encodings.
    #[inline]
    pub const fn is_integer(self) -> bool {
        !matches!(self, Self::Float32)
    }

    /// Returns true for the signed integer encodings.
    #[inline]
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::Int8 | Self::Int16)
    }

    /// Divisor used by normalized decoding, `None` where normalization
    /// is not defined.
    #[inline]
    pub const fn max_normalized(self) -> Option<f32> {
        match self {
            Self::Int8 => Some(127.0),
            Self::Uint8 => Some(255.0),
            Self::Int16 => Some(32767.0),
            Self::Uint16 => Some(65535.0),
            Self::Uint32 | Self::Float32 => None,
        }
    }

    /// Primitive-restart sentinel for index encodings.
    #[inline]
    pub const fn restart_value(self) -> Option<u32> {
        match self {
            Self::Uint8 => Some(0xFF),
            Self::Uint16 => Some(0xFFFF),
            Self::Uint32 => Some(0xFFFF_FFFF),
            _ => None,
        }
    }

    /// Returns true if this encoding can back an index buffer.
    #[inline]
    pub const fn is_index(self) -> bool {
        self.restart_value().is_some()
    }
}

impl fmt::Display for ComponentEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// === Component trait for typed buffers ===

/// Rust types that map one-to-one onto a [`ComponentEncoding`].
pub trait Component: Pod + Copy + Default {
    /// The corresponding encoding.
    const ENCODING: ComponentEncoding;

    /// Append the little-endian bytes of this value.
    fn extend_le(self, out: &mut Vec<u8>);
}

macro_rules! impl_component {
    ($($ty:ty => $enc:ident),* $(,)?) => {
        $(
            impl Component for $ty {
                const ENCODING: ComponentEncoding = ComponentEncoding::$enc;

                #[inline]
                fn extend_le(self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }
            }
        )*
    };
}

impl_component! {
    i8 => Int8,
    u8 => Uint8,
    i16 => Int16,
    u16 => Uint16,
    u32 => Uint32,
    f32 => Float32,
}
