//! Error types for the accessor codec.

use super::ComponentEncoding;
use thiserror::Error;

/// Main error type for accessor operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Descriptor violates the vertex-attribute or index layout rules
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// No decode/encode strategy for this encoding and normalization
    #[error("Unsupported encoding: {encoding}{}", normalized_suffix(.normalized))]
    UnsupportedEncoding { encoding: ComponentEncoding, normalized: bool },

    /// Attempt to store NaN or infinity into a numeric component
    #[error("Non-finite value: {value}")]
    NonFiniteValue { value: f32 },

    /// Skin weights of an item do not sum to one
    #[error("Invalid weight sum at item {index}")]
    InvalidWeightSum { index: usize },

    /// Decoded component outside of the declared bounds
    #[error("Item {index} axis {axis}: value {value} outside [{min}, {max}]")]
    OutOfBounds { index: usize, axis: usize, value: f32, min: f32, max: f32 },

    /// Vertex index past the end of the vertex buffer
    #[error("Index {index} at position {position} out of range (vertex count: {vertex_count})")]
    IndexOutOfRange { position: usize, index: u32, vertex_count: u32 },

    /// Index equal to the primitive-restart sentinel of its encoding
    #[error("Restart value used at position {position} ({encoding})")]
    RestartValueUsed { position: usize, encoding: ComponentEncoding },

    /// View cannot be built or changed the requested way
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

impl Error {
    /// Create an invalid layout error.
    pub fn invalid_layout(msg: impl Into<String>) -> Self {
        Self::InvalidLayout(msg.into())
    }

    /// Create an unsupported operation error.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }
}

fn normalized_suffix(normalized: &bool) -> &'static str {
    if *normalized { " normalized" } else { "" }
}

/// Result type alias for accessor operations.
pub type Result<T> = std::result::Result<T, Error>;
