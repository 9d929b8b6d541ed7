//! Basic types shared by every layer of the codec.
//!
//! This module contains:
//! - [`ComponentEncoding`] - storage type of a single component
//! - [`ElementDimensions`] - shape of one item
//! - [`AttributeFormat`] - shape + encoding + normalization
//! - [`Error`] / [`Result`] - Error handling
//! - Math type re-exports from glam

mod encoding;
mod dimensions;
mod format;
mod error;
mod math;

pub use encoding::*;
pub use dimensions::*;
pub use format::*;
pub use error::*;
pub use math::*;
