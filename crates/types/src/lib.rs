//! Data model shared by the vitae renderer: positioned text, decorative
//! shapes, colors and rectangles.

pub mod color;
pub mod element;
pub mod geometry;

pub use color::{approx_eq, Rgb, MAX_PACKED_COLOR};
pub use element::{RectShape, ShapeElement, TextElement};
pub use geometry::Rect;
