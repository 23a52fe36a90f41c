//! Geometry primitives for the drawing surface
//!
//! Points, rectangles, shapes and the affine transform that the surface
//! tracks as its current transformation.

pub mod shape;
pub mod transform;
pub mod types;

pub use shape::{FillRule, Path, PathSegment, Shape};
pub use transform::Affine;
pub use types::{Color, Point, Rect, Size};
