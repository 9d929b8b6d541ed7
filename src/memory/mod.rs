//! Memory layer - binding layouts to byte buffers.
//!
//! This module provides:
//! - [`LayoutDescriptor`] - offset, count, stride and format of one attribute
//! - [`StridedNumericAccessor`] - per-component decode/encode with normalization
//! - [`StridedIndexAccessor`] - unsigned index buffers
//! - [`MemoryAccessor`] - a descriptor paired with its buffer, and the
//!   entry point for typed views

mod layout;
mod numeric;
mod index;
mod accessor;

pub use layout::{attribute_sort_key, default_attribute_format, sort_by_attribute_name, LayoutDescriptor};
pub use numeric::StridedNumericAccessor;
pub use index::StridedIndexAccessor;
pub use accessor::MemoryAccessor;

pub(crate) use numeric::check_finite;
