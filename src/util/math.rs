//! Math type re-exports.
//!
//! Typed views decode items into `glam` types; they are re-exported here so
//! callers do not need a direct `glam` dependency.

pub use glam::{Mat2, Mat3, Mat4, Quat, Vec2, Vec3, Vec4};
