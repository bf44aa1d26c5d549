//! Points and rectangles in planar (projected) coordinates.

mod point;
mod rect;

pub use point::Point2d;
pub use rect::Rect;
