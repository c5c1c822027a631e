//! Bisector edges between pairs of sites
//!
//! An edge is created by the sweep when two sites become adjacent. Its ends
//! start unbounded, receive Voronoi vertices from circle events, and are
//! finally clipped to the diagram bounds. After clipping an edge is immutable.

use crate::geometry::{LineSegment, Point, Rect};

/// Index of a confirmed Voronoi vertex; only identity survives the sweep
pub(crate) type VertexId = usize;

/// Relative length below which a clipped edge counts as degenerate
const DEGENERATE_LENGTH_RATIO: f64 = 1e-9;

/// One side (end) of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Both ends of an edge after clipping to the bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClippedEnds {
    /// End on the side of the edge's left vertex
    pub left: Point,
    /// End on the side of the edge's right vertex
    pub right: Point,
}

impl ClippedEnds {
    #[inline]
    pub fn get(&self, side: Side) -> Point {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// The perpendicular bisector between a left and a right site
///
/// The line is stored as `a·x + b·y = c`, normalised so that `a == 1` when the
/// sites are further apart in x than in y and `b == 1` otherwise. This keeps
/// vertical and near-vertical bisectors free of huge slopes.
#[derive(Debug, Clone)]
pub struct Edge {
    a: f64,
    b: f64,
    c: f64,
    left_site: usize,
    right_site: usize,
    left_vertex: Option<VertexId>,
    right_vertex: Option<VertexId>,
    clipped: Option<ClippedEnds>,
}

impl Edge {
    /// Build the bisector of two sites given by id and coordinate
    pub(crate) fn bisecting(left_site: usize, left: Point, right_site: usize, right: Point) -> Self {
        let dx = right.x - left.x;
        let dy = right.y - left.y;
        let mut c = left.x * dx + left.y * dy + (dx * dx + dy * dy) * 0.5;

        let (a, b) = if dx.abs() > dy.abs() {
            c /= dx;
            (1.0, dy / dx)
        } else {
            c /= dy;
            (dx / dy, 1.0)
        };

        Self {
            a,
            b,
            c,
            left_site,
            right_site,
            left_vertex: None,
            right_vertex: None,
            clipped: None,
        }
    }

    /// Line coefficients `(a, b, c)` of `a·x + b·y = c`
    #[inline]
    pub fn line(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    #[inline]
    pub fn left_site(&self) -> usize {
        self.left_site
    }

    #[inline]
    pub fn right_site(&self) -> usize {
        self.right_site
    }

    #[inline]
    pub fn site(&self, side: Side) -> usize {
        match side {
            Side::Left => self.left_site,
            Side::Right => self.right_site,
        }
    }

    /// The site across this edge from `site`, or `None` if `site` is not
    /// one of the edge's two sites
    pub fn other_site(&self, site: usize) -> Option<usize> {
        if site == self.left_site {
            Some(self.right_site)
        } else if site == self.right_site {
            Some(self.left_site)
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn vertex(&self, side: Side) -> Option<VertexId> {
        match side {
            Side::Left => self.left_vertex,
            Side::Right => self.right_vertex,
        }
    }

    pub(crate) fn set_vertex(&mut self, side: Side, vertex: VertexId) {
        match side {
            Side::Left => self.left_vertex = Some(vertex),
            Side::Right => self.right_vertex = Some(vertex),
        }
    }

    /// An edge with an unbounded end separates two sites on the convex hull
    #[inline]
    pub fn is_part_of_convex_hull(&self) -> bool {
        self.left_vertex.is_none() || self.right_vertex.is_none()
    }

    /// Neither end meets a Voronoi vertex; happens only between collinear
    /// sites, where the edge is a full line and its sides carry no order
    #[inline]
    pub fn is_unbounded(&self) -> bool {
        self.left_vertex.is_none() && self.right_vertex.is_none()
    }

    /// Whether clipping left a segment of non-zero length inside the bounds
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.clipped.is_some()
    }

    #[inline]
    pub fn clipped_ends(&self) -> Option<ClippedEnds> {
        self.clipped
    }

    #[inline]
    pub fn clipped_end(&self, side: Side) -> Option<Point> {
        self.clipped.map(|ends| ends.get(side))
    }

    /// The clipped edge as a segment from its left to its right end
    pub fn voronoi_segment(&self) -> Option<LineSegment> {
        self.clipped
            .map(|ends| LineSegment::new(ends.left, ends.right))
    }

    /// Clip the edge against `bounds`, using the sweep's vertex coordinates
    /// for the bounded ends.
    ///
    /// Edges entirely outside the bounds, or clipped to a single point, stay
    /// invisible.
    pub(crate) fn clip(&mut self, bounds: &Rect, vertices: &[Point]) {
        let (x_min, x_max) = (bounds.x_min(), bounds.x_max());
        let (y_min, y_max) = (bounds.y_min(), bounds.y_max());
        let (a, b, c) = (self.a, self.b, self.c);

        // For lines running down-right in a y-up frame the right vertex has the
        // smaller y, so walk from it
        let swapped = a == 1.0 && b >= 0.0;
        let (vertex0, vertex1) = if swapped {
            (self.right_vertex, self.left_vertex)
        } else {
            (self.left_vertex, self.right_vertex)
        };
        let v0 = vertex0.and_then(|v| vertices.get(v).copied());
        let v1 = vertex1.and_then(|v| vertices.get(v).copied());

        let (mut x0, mut y0, mut x1, mut y1);
        if a == 1.0 {
            y0 = match v0 {
                Some(v) if v.y > y_min => v.y,
                _ => y_min,
            };
            if y0 > y_max {
                return;
            }
            x0 = c - b * y0;

            y1 = match v1 {
                Some(v) if v.y < y_max => v.y,
                _ => y_max,
            };
            if y1 < y_min {
                return;
            }
            x1 = c - b * y1;

            if (x0 > x_max && x1 > x_max) || (x0 < x_min && x1 < x_min) {
                return;
            }

            if x0 > x_max {
                x0 = x_max;
                y0 = (c - x0) / b;
            } else if x0 < x_min {
                x0 = x_min;
                y0 = (c - x0) / b;
            }

            if x1 > x_max {
                x1 = x_max;
                y1 = (c - x1) / b;
            } else if x1 < x_min {
                x1 = x_min;
                y1 = (c - x1) / b;
            }
        } else {
            x0 = match v0 {
                Some(v) if v.x > x_min => v.x,
                _ => x_min,
            };
            if x0 > x_max {
                return;
            }
            y0 = c - a * x0;

            x1 = match v1 {
                Some(v) if v.x < x_max => v.x,
                _ => x_max,
            };
            if x1 < x_min {
                return;
            }
            y1 = c - a * x1;

            if (y0 > y_max && y1 > y_max) || (y0 < y_min && y1 < y_min) {
                return;
            }

            if y0 > y_max {
                y0 = y_max;
                x0 = (c - y0) / a;
            } else if y0 < y_min {
                y0 = y_min;
                x0 = (c - y0) / a;
            }

            if y1 > y_max {
                y1 = y_max;
                x1 = (c - y1) / a;
            } else if y1 < y_min {
                y1 = y_min;
                x1 = (c - y1) / a;
            }
        }

        let start = Point::new(x0, y0);
        let end = Point::new(x1, y1);
        if start.distance(end) <= DEGENERATE_LENGTH_RATIO * bounds.diagonal() {
            return;
        }

        // Two unbounded ends carry no identity; the first computed end is
        // labelled left in that case
        let left_first = !swapped || (self.left_vertex.is_none() && self.right_vertex.is_none());
        self.clipped = Some(if left_first {
            ClippedEnds {
                left: start,
                right: end,
            }
        } else {
            ClippedEnds {
                left: end,
                right: start,
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bisector(left: Point, right: Point) -> Edge {
        Edge::bisecting(0, left, 1, right)
    }

    #[test]
    fn test_bisector_normalisation() {
        // Sites side by side: vertical bisector x = 5
        let edge = bisector(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert_eq!(edge.line(), (1.0, 0.0, 5.0));

        // Sites stacked: horizontal bisector y = 5
        let edge = bisector(Point::new(0.0, 0.0), Point::new(0.0, 10.0));
        assert_eq!(edge.line(), (0.0, 1.0, 5.0));

        // Diagonal: x + y = 10
        let edge = bisector(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert_eq!(edge.line(), (1.0, 1.0, 10.0));
    }

    #[test]
    fn test_bisector_is_equidistant() {
        let left = Point::new(1.5, -2.0);
        let right = Point::new(4.0, 7.25);
        let edge = bisector(left, right);
        let (a, b, c) = edge.line();

        // Two points on the line, both equidistant from the sites
        for t in [-3.0, 0.0, 2.5] {
            let p = if a == 1.0 {
                Point::new(c - b * t, t)
            } else {
                Point::new(t, c - a * t)
            };
            assert_relative_eq!(p.distance(left), p.distance(right), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_other_site() {
        let edge = Edge::bisecting(3, Point::new(0.0, 0.0), 7, Point::new(1.0, 0.0));
        assert_eq!(edge.other_site(3), Some(7));
        assert_eq!(edge.other_site(7), Some(3));
        assert_eq!(edge.other_site(4), None);
        assert_eq!(edge.site(Side::Left), 3);
        assert_eq!(edge.site(Side::Right), 7);
    }

    #[test]
    fn test_clip_unbounded_edge() {
        let bounds = Rect::from_size(10.0, 10.0);
        let mut edge = bisector(Point::new(2.0, 5.0), Point::new(8.0, 5.0));
        assert!(!edge.is_visible());
        assert!(edge.is_part_of_convex_hull());

        edge.clip(&bounds, &[]);

        let ends = edge.clipped_ends().unwrap();
        assert_eq!(ends.left, Point::new(5.0, 0.0));
        assert_eq!(ends.right, Point::new(5.0, 10.0));
        assert_relative_eq!(edge.voronoi_segment().unwrap().length(), 10.0);
    }

    #[test]
    fn test_clip_half_bounded_edge() {
        let bounds = Rect::from_size(10.0, 10.0);
        let vertices = vec![Point::new(5.0, 5.0)];

        // x = 5 between (0, 0) and (10, 0); the vertex caps the upper end
        let mut edge = bisector(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        edge.set_vertex(Side::Left, 0);
        edge.clip(&bounds, &vertices);

        assert_eq!(edge.clipped_end(Side::Left), Some(Point::new(5.0, 5.0)));
        assert_eq!(edge.clipped_end(Side::Right), Some(Point::new(5.0, 0.0)));
        assert!(edge.is_part_of_convex_hull());
    }

    #[test]
    fn test_clip_outside_bounds_is_invisible() {
        let bounds = Rect::from_size(10.0, 10.0);
        let mut edge = bisector(Point::new(20.0, 0.0), Point::new(30.0, 0.0));
        edge.clip(&bounds, &[]);
        assert!(!edge.is_visible());
        assert!(edge.voronoi_segment().is_none());
    }

    #[test]
    fn test_clip_zero_length_is_invisible() {
        let bounds = Rect::from_size(10.0, 10.0);
        let vertices = vec![Point::new(5.0, 5.0), Point::new(5.0, 5.0)];

        let mut edge = bisector(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        edge.set_vertex(Side::Left, 0);
        edge.set_vertex(Side::Right, 1);
        edge.clip(&bounds, &vertices);

        assert!(!edge.is_visible());
        assert!(!edge.is_part_of_convex_hull());
    }

    #[test]
    fn test_clip_to_corner_region() {
        let bounds = Rect::from_size(10.0, 10.0);
        // x + y = 10 crosses the square from (0, 10) to (10, 0)
        let mut edge = bisector(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        edge.clip(&bounds, &[]);

        let segment = edge.voronoi_segment().unwrap();
        assert_relative_eq!(segment.length(), 200f64.sqrt(), epsilon = 1e-12);
        for end in [segment.p0, segment.p1] {
            assert!(bounds.on_border(end));
        }
    }
}
