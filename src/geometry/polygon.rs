//! Polygon measures over ordered vertex slices

use super::Point;

/// Orientation of a closed vertex sequence (y-up frame)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
    /// Degenerate polygon with zero signed area
    None,
}

/// Twice the signed area (shoelace formula); positive when counter-clockwise
fn signed_double_area(vertices: &[Point]) -> f64 {
    let n = vertices.len();
    (0..n)
        .map(|i| vertices[i].perp_dot(vertices[(i + 1) % n]))
        .sum()
}

/// Signed area of a closed polygon; positive when counter-clockwise
pub fn signed_area(vertices: &[Point]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    signed_double_area(vertices) * 0.5
}

/// Unsigned area of a closed polygon
pub fn polygon_area(vertices: &[Point]) -> f64 {
    signed_area(vertices).abs()
}

/// Winding of a closed polygon
pub fn winding(vertices: &[Point]) -> Winding {
    let area = signed_area(vertices);
    if area < 0.0 {
        Winding::Clockwise
    } else if area > 0.0 {
        Winding::CounterClockwise
    } else {
        Winding::None
    }
}

/// Area-weighted centroid of a closed polygon
///
/// Falls back to the mean of the vertices when the polygon has no area
/// (fewer than three vertices, or collinear ones). Returns `None` for an
/// empty slice.
pub fn centroid(vertices: &[Point]) -> Option<Point> {
    if vertices.is_empty() {
        return None;
    }

    let n = vertices.len();
    let mut double_area = 0.0;
    let mut weighted = Point::ZERO;
    for i in 0..n {
        let p = vertices[i];
        let q = vertices[(i + 1) % n];
        let cross = p.perp_dot(q);
        double_area += cross;
        weighted += (p + q) * cross;
    }

    let scale = vertices
        .iter()
        .map(|p| p.length_squared())
        .fold(0.0, f64::max);
    if n < 3 || double_area.abs() <= 1e-12 * scale {
        let sum: Point = vertices.iter().copied().sum();
        return Some(sum / n as f64);
    }

    Some(weighted / (3.0 * double_area))
}
