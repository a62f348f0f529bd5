//! Cascade Core
//!
//! Foundational value types shared by every Cascade crate:
//!
//! - **Geometry**: `Point`, `Size` and `Rect` in host layout units
//! - **Color**: RGBA color with a bit-exact hashable key
//! - **Transform**: 2D affine matrices for per-line offset and scale

pub mod color;
pub mod geometry;
pub mod transform;

pub use color::{Color, ColorKey};
pub use geometry::{Point, Rect, Size};
pub use transform::Affine2D;
