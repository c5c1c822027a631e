//! Clipped cell polygons
//!
//! A site's region is assembled from its bisector edges: the edges are first
//! chained into a cycle by shared endpoints, then the visible (clipped) parts
//! are stitched together, bridging any gaps along the border of the bounds.

use std::collections::VecDeque;

use crate::edge::{ClippedEnds, Edge, Side};
use crate::error::{Result, VoronoiError};
use crate::geometry::{centroid, close_enough, polygon_area, signed_area, Point, Rect};
use crate::sweep::EdgeId;

/// Corners closer than this fraction of the diagonal to a gap end are skipped;
/// cells with less than this fraction of the bounds area are empty
const CORNER_TOLERANCE: f64 = 1e-9;

/// How consecutive edges are matched when chaining them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReorderCriterion {
    /// Share a Voronoi vertex (unbounded ends match each other)
    Vertex,
    /// Share a site
    Site,
}

/// Edges chained end to end, with the side each one is entered from
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ReorderedEdges {
    pub edges: Vec<EdgeId>,
    pub orientations: Vec<Side>,
}

/// Chain `edge_ids` so that each edge shares an endpoint with the next.
///
/// Traversing edge `edges[i]` from its `orientations[i]` end to the other
/// end walks the chain in order.
///
/// # Errors
///
/// Returns `GenerationFailed` when a pass over the remaining edges attaches
/// none of them, which only happens on numerically broken input.
pub(crate) fn reorder_edges(
    edge_ids: &[EdgeId],
    edges: &[Edge],
    criterion: ReorderCriterion,
) -> Result<ReorderedEdges> {
    match criterion {
        ReorderCriterion::Vertex => chain(edge_ids, |e, side| edges[e].vertex(side)),
        ReorderCriterion::Site => chain(edge_ids, |e, side| Some(edges[e].site(side))),
    }
}

fn chain<K, F>(edge_ids: &[EdgeId], key: F) -> Result<ReorderedEdges>
where
    K: PartialEq,
    F: Fn(EdgeId, Side) -> K,
{
    let Some(&head) = edge_ids.first() else {
        return Ok(ReorderedEdges::default());
    };

    let mut chained: VecDeque<(EdgeId, Side)> = VecDeque::with_capacity(edge_ids.len());
    chained.push_back((head, Side::Left));
    let mut first = key(head, Side::Left);
    let mut last = key(head, Side::Right);

    let mut done = vec![false; edge_ids.len()];
    done[0] = true;
    let mut remaining = edge_ids.len() - 1;

    while remaining > 0 {
        let mut attached = false;
        for (i, &edge) in edge_ids.iter().enumerate().skip(1) {
            if done[i] {
                continue;
            }
            let left = key(edge, Side::Left);
            let right = key(edge, Side::Right);

            if left == last {
                chained.push_back((edge, Side::Left));
                last = right;
            } else if right == first {
                chained.push_front((edge, Side::Left));
                first = left;
            } else if left == first {
                chained.push_front((edge, Side::Right));
                first = right;
            } else if right == last {
                chained.push_back((edge, Side::Right));
                last = left;
            } else {
                continue;
            }

            done[i] = true;
            remaining -= 1;
            attached = true;
        }

        if !attached {
            return Err(VoronoiError::GenerationFailed(format!(
                "{remaining} of {} edges share no endpoint with the rest of the chain",
                edge_ids.len()
            )));
        }
    }

    let (edges, orientations) = chained.into_iter().unzip();
    Ok(ReorderedEdges {
        edges,
        orientations,
    })
}

/// The clipped cell of one site
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Region {
    edges: Vec<EdgeId>,
    orientations: Vec<Side>,
    vertices: Vec<Point>,
    touches_hull: bool,
}

impl Region {
    /// Polygon vertices, counter-clockwise in a y-up frame
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// The site's edge ids in boundary order (visible or not)
    pub fn ordered_edges(&self) -> &[usize] {
        &self.edges
    }

    /// Side each ordered edge is entered from
    pub fn orientations(&self) -> &[Side] {
        &self.orientations
    }

    /// Whether a polygon vertex lies on the border of the bounds
    pub fn touches_hull(&self) -> bool {
        self.touches_hull
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn area(&self) -> f64 {
        polygon_area(&self.vertices)
    }

    /// Area-weighted centroid, `None` for an empty region
    pub fn centroid(&self) -> Option<Point> {
        centroid(&self.vertices)
    }
}

/// Assemble the clipped polygon of `site`.
///
/// `site_edges` are the site's edge ids, `coords` every site's coordinate by
/// id. Gap ends closer than `epsilon` are treated as the same point.
pub(crate) fn compute_region(
    site: usize,
    site_edges: &[EdgeId],
    edges: &[Edge],
    coords: &[Point],
    bounds: &Rect,
    epsilon: f64,
) -> Result<Region> {
    let mut reordered = reorder_edges(site_edges, edges, ReorderCriterion::Vertex)?;
    let assembler = Assembler {
        site,
        site_edges,
        edges,
        coords,
        bounds,
        epsilon,
    };

    let mut vertices = assembler.stitch(&mut reordered);
    // A cell that only grazes the border (e.g. a bisector lying on it) has no area inside
    if vertices.len() < 3 || polygon_area(&vertices) <= CORNER_TOLERANCE * bounds.area() {
        vertices.clear();
    }
    if vertices.is_empty() && assembler.violation(bounds.center()) <= 0.0 {
        vertices = bounds.corners().to_vec();
    }
    if signed_area(&vertices) < 0.0 {
        vertices.reverse();
    }
    let touches_hull = vertices.iter().any(|&p| bounds.on_border(p));

    Ok(Region {
        edges: reordered.edges,
        orientations: reordered.orientations,
        vertices,
        touches_hull,
    })
}

struct Assembler<'a> {
    site: usize,
    site_edges: &'a [EdgeId],
    edges: &'a [Edge],
    coords: &'a [Point],
    bounds: &'a Rect,
    epsilon: f64,
}

impl Assembler<'_> {
    /// Walk the visible edges in chain order, bridging gaps along the
    /// border. Orientations are corrected in place where the walk had to
    /// enter an edge from its other end.
    fn stitch(&self, reordered: &mut ReorderedEdges) -> Vec<Point> {
        let mut vertices: Vec<Point> = Vec::new();

        for (&edge, side) in reordered.edges.iter().zip(reordered.orientations.iter_mut()) {
            let Some(ends) = self.edges[edge].clipped_ends() else {
                continue;
            };
            if self.edges[edge].is_unbounded() {
                *side = self.site_on_left(ends);
            }
            let (mut start, mut end) = (ends.get(*side), ends.get(side.other()));
            if let Some(last) = vertices.last().copied() {
                if !close_enough(last, start, self.epsilon) && close_enough(last, end, self.epsilon) {
                    *side = side.other();
                    std::mem::swap(&mut start, &mut end);
                }
            }

            match vertices.last().copied() {
                None => vertices.push(start),
                Some(last) if !close_enough(last, start, self.epsilon) => {
                    vertices.extend(self.border_walk(last, start));
                    vertices.push(start);
                }
                Some(_) => {}
            }
            vertices.push(end);
        }

        if let (Some(first), Some(last)) = (vertices.first().copied(), vertices.last().copied()) {
            if vertices.len() > 1 && close_enough(last, first, self.epsilon) {
                vertices.pop();
            } else {
                vertices.extend(self.border_walk(last, first));
            }
        }
        vertices
    }

    /// The side to enter an edge from so that the site lies to its left
    fn site_on_left(&self, ends: ClippedEnds) -> Side {
        let (left, right) = (ends.get(Side::Left), ends.get(Side::Right));
        if (right - left).perp_dot(self.coords[self.site] - left) >= 0.0 {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// How far `p` is from lying in the site's cell: the largest
    /// `|p - site|² - |p - neighbour|²` over the site's bisectors.
    /// Non-positive inside the cell.
    fn violation(&self, p: Point) -> f64 {
        let to_site = p.distance_squared(self.coords[self.site]);
        self.site_edges
            .iter()
            .filter_map(|&e| self.edges[e].other_site(self.site))
            .map(|other| to_site - p.distance_squared(self.coords[other]))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Corners passed when walking the border from `from` to `to`, in walk
    /// order, choosing the direction that stays inside the cell.
    fn border_walk(&self, from: Point, to: Point) -> Vec<Point> {
        let bounds = self.bounds;
        let perimeter = bounds.perimeter();
        let tolerance = CORNER_TOLERANCE * bounds.diagonal();

        let start = bounds.perimeter_position(from);
        let end = bounds.perimeter_position(to);
        let ccw_length = (end - start).rem_euclid(perimeter);
        let cw_length = perimeter - ccw_length;

        let corners = bounds.corners();
        let positions = bounds.corner_positions();
        let passed = |offset: &dyn Fn(f64) -> f64, length: f64| {
            let mut walk: Vec<(f64, Point)> = positions
                .iter()
                .zip(corners)
                .map(|(&position, corner)| (offset(position), corner))
                .filter(|&(d, _)| d > tolerance && d < length - tolerance)
                .collect();
            walk.sort_by(|a, b| a.0.total_cmp(&b.0));
            walk
        };
        let ccw = passed(&|position| (position - start).rem_euclid(perimeter), ccw_length);
        let cw = passed(&|position| (start - position).rem_euclid(perimeter), cw_length);

        let midpoint = (from + to) * 0.5;
        let probe = |walk: &[(f64, Point)]| walk.first().map_or(midpoint, |&(_, corner)| corner);

        let walk = if self.violation(probe(cw.as_slice())) < self.violation(probe(ccw.as_slice())) {
            cw
        } else {
            ccw
        };
        walk.into_iter().map(|(_, corner)| corner).collect()
    }
}
