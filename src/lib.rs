//! # Accessor codec
//!
//! Encoding and decoding of the numeric arrays stored in glTF-style binary
//! buffers: positions, normals, colors, skin weights, vertex indices and
//! animation keys.
//!
//! A [`LayoutDescriptor`] says where items live in a byte buffer and how each
//! component is stored. Typed views read and overwrite those items in place
//! without copying the buffer, converting between the stored integers or
//! floats and `f32` (with fixed-point normalization where the format asks for
//! it). Validation routines check and repair the buffers directly.
//!
//! ## Modules
//!
//! - [`util`] - Basic types (encodings, dimensions, formats, errors)
//! - [`memory`] - Layout descriptors and strided accessors
//! - [`arrays`] - Typed views and the sparse overlay
//! - [`validate`] - Weight sums, bounds, vertex indices, buffer overlap
//!
//! ## Example
//!
//! ```
//! use accessor_codec::prelude::*;
//!
//! let positions = [0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0];
//! let accessor = MemoryAccessor::from_components(ElementDimensions::Vec3, false, &positions)?;
//! let view = accessor.as_vector3_array()?;
//!
//! assert_eq!(view.len(), 2);
//! assert_eq!(view.get(1), Vec3::new(3.0, 4.0, 5.0));
//! # Ok::<(), accessor_codec::Error>(())
//! ```

pub mod util;
pub mod memory;
pub mod arrays;
pub mod validate;

// Re-export commonly used types
pub use util::{AttributeFormat, ComponentEncoding, ElementDimensions, Error, Result};
pub use memory::{LayoutDescriptor, MemoryAccessor, StridedIndexAccessor, StridedNumericAccessor};
pub use arrays::{AccessorArray, AccessorArrayMut};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{AttributeFormat, ComponentEncoding, ElementDimensions, Error, Result};
    pub use crate::util::{Mat2, Mat3, Mat4, Quat, Vec2, Vec3, Vec4};
    pub use crate::memory::{LayoutDescriptor, MemoryAccessor, StridedIndexAccessor, StridedNumericAccessor};
    pub use crate::memory::{attribute_sort_key, default_attribute_format, sort_by_attribute_name};
    pub use crate::arrays::*;
    pub use crate::validate::*;
}
