//! Planar primitives shared by the sweep, the clipper and the façade
//!
//! Points are plain `glam::DVec2` values; everything else here is a small
//! value type with no knowledge of the diagram.

mod polygon;
mod rect;
mod segment;

pub use polygon::{centroid, polygon_area, signed_area, winding, Winding};
pub use rect::Rect;
pub use segment::{Circle, LineSegment};

use std::cmp::Ordering;

/// A 2D coordinate (double precision)
pub type Point = glam::DVec2;

/// Sweep ordering: compare by y first, then by x, ascending.
///
/// Sites and circle events must be ordered by the same rule or the sweep
/// produces wrong adjacencies.
#[inline]
pub fn compare_by_y_then_x(a: Point, b: Point) -> Ordering {
    a.y.partial_cmp(&b.y)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
}

/// Check whether two points coincide or lie within `epsilon` of each other
#[inline]
pub fn close_enough(a: Point, b: Point, epsilon: f64) -> bool {
    a == b || a.distance(b) < epsilon
}
