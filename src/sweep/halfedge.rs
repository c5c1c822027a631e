//! Sweep-time half-edges and the two geometric predicates the sweep needs
//!
//! Half-edges live in a single arena owned by the sweep and refer to each
//! other by index. They never outlive a sweep.

use std::cmp::Ordering;

use crate::edge::{Edge, Side};
use crate::geometry::{compare_by_y_then_x, Point};

pub(crate) type HalfedgeId = usize;
pub(crate) type EdgeId = usize;

/// Determinant magnitude below which two bisectors are treated as parallel
const PARALLEL_EPSILON: f64 = 1e-10;

/// An edge seen from one side, threaded through the sweepline status list
/// and, while it carries a circle event, through the priority queue.
#[derive(Debug, Clone)]
pub(crate) struct Halfedge {
    /// `None` for the sentinels bounding the status list
    pub edge: Option<EdgeId>,
    pub side: Side,
    /// Candidate Voronoi vertex (circle event) above this half-edge
    pub vertex: Option<Point>,
    /// Priority key of the circle event: the vertex y plus the circle radius
    pub ystar: f64,
    pub left: Option<HalfedgeId>,
    pub right: Option<HalfedgeId>,
    pub next_in_queue: Option<HalfedgeId>,
    /// Set once the half-edge has been unlinked from the status list
    pub deleted: bool,
}

impl Halfedge {
    pub fn new(edge: EdgeId, side: Side) -> Self {
        Self {
            edge: Some(edge),
            side,
            ..Self::sentinel()
        }
    }

    pub fn sentinel() -> Self {
        Self {
            edge: None,
            side: Side::Left,
            vertex: None,
            ystar: 0.0,
            left: None,
            right: None,
            next_in_queue: None,
            deleted: false,
        }
    }
}

/// Whether point `p` lies to the left of the half-edge's bisector, as seen
/// from the half-edge's side.
///
/// `edge` must be the half-edge's own edge; `sites` are site coordinates by id.
pub(crate) fn is_left_of(he: &Halfedge, edge: &Edge, p: Point, sites: &[Point]) -> bool {
    let top_site = sites[edge.right_site()];
    let (a, b, c) = edge.line();

    let right_of_site = p.x > top_site.x;
    if right_of_site && he.side == Side::Left {
        return true;
    }
    if !right_of_site && he.side == Side::Right {
        return false;
    }

    let mut above;
    if a == 1.0 {
        let dyp = p.y - top_site.y;
        let dxp = p.x - top_site.x;
        let mut fast = false;
        if (!right_of_site && b < 0.0) || (right_of_site && b >= 0.0) {
            above = dyp >= b * dxp;
            fast = above;
        } else {
            above = p.x + p.y * b > c;
            if b < 0.0 {
                above = !above;
            }
            if !above {
                fast = true;
            }
        }
        if !fast {
            let dxs = top_site.x - sites[edge.left_site()].x;
            above = b * (dxp * dxp - dyp * dyp) < dxs * dyp * (1.0 + 2.0 * dxp / dxs + b * b);
            if b < 0.0 {
                above = !above;
            }
        }
    } else {
        let yl = c - a * p.x;
        let t1 = p.y - yl;
        let t2 = p.x - top_site.x;
        let t3 = yl - top_site.y;
        above = t1 * t1 > t2 * t2 + t3 * t3;
    }

    match he.side {
        Side::Left => above,
        Side::Right => !above,
    }
}

/// Intersection of the bisectors of two neighbouring half-edges, if it lies
/// on the part of both bisectors that is still being traced.
pub(crate) fn intersect(
    he0: &Halfedge,
    he1: &Halfedge,
    edges: &[Edge],
    sites: &[Point],
) -> Option<Point> {
    let edge0 = &edges[he0.edge?];
    let edge1 = &edges[he1.edge?];
    if edge0.right_site() == edge1.right_site() {
        return None;
    }

    let (a0, b0, c0) = edge0.line();
    let (a1, b1, c1) = edge1.line();
    let determinant = a0 * b1 - b0 * a1;
    if determinant.abs() < PARALLEL_EPSILON {
        return None;
    }

    let x = (c0 * b1 - c1 * b0) / determinant;
    let y = (c1 * a0 - c0 * a1) / determinant;

    let (he, edge) = match compare_by_y_then_x(
        sites[edge0.right_site()],
        sites[edge1.right_site()],
    ) {
        Ordering::Less => (he0, edge0),
        _ => (he1, edge1),
    };

    let right_of_site = x >= sites[edge.right_site()].x;
    if (right_of_site && he.side == Side::Left) || (!right_of_site && he.side == Side::Right) {
        return None;
    }

    Some(Point::new(x, y))
}
