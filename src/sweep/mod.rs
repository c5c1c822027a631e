//! Fortune's sweepline algorithm
//!
//! Sweeps a horizontal line upward over the sites (in y-then-x order),
//! maintaining the beach line as a list of half-edges and the pending
//! circle events in a bucketed priority queue. Every pair of sites whose
//! cells share a boundary gets exactly one `Edge`; Voronoi vertices are
//! attached to edge ends as circle events fire. All edges are clipped to
//! the bounds once the sweep finishes.

mod edge_list;
mod halfedge;
mod queue;

use std::cmp::Ordering;

use log::trace;

use crate::edge::{Edge, Side};
use crate::error::{Result, VoronoiError};
use crate::geometry::{compare_by_y_then_x, Point, Rect};

use edge_list::EdgeList;
use halfedge::{intersect, Halfedge, HalfedgeId};
use queue::EventQueue;

pub(crate) use halfedge::EdgeId;

/// Edges produced by a sweep, plus each site's edge ids in creation order
#[derive(Debug, Default)]
pub(crate) struct SweepOutput {
    pub edges: Vec<Edge>,
    pub site_edges: Vec<Vec<EdgeId>>,
    pub vertex_count: usize,
}

fn broken(what: &str) -> VoronoiError {
    VoronoiError::GenerationFailed(format!("sweep state is inconsistent: {what}"))
}

/// Run the sweep over `sites` (coordinates indexed by site id), visiting
/// them in `order`, and clip the resulting edges to `bounds`.
///
/// `order` must list every site id once, sorted by `compare_by_y_then_x`.
pub(crate) fn fortunes_algorithm(
    sites: &[Point],
    order: &[usize],
    bounds: &Rect,
) -> Result<SweepOutput> {
    let Some(&bottom_most_site) = order.first() else {
        return Ok(SweepOutput::default());
    };
    let data_bounds = Rect::enclosing(sites).ok_or_else(|| broken("no site coordinates"))?;
    let sqrt_nsites = ((sites.len() + 4) as f64).sqrt() as usize;

    let mut halfedges = Vec::with_capacity(4 * sites.len());
    let edge_list = EdgeList::new(
        &mut halfedges,
        data_bounds.x_min(),
        data_bounds.width,
        sqrt_nsites,
    );
    let queue = EventQueue::new(data_bounds.y_min(), data_bounds.height, sqrt_nsites);

    let mut sweep = Sweep {
        sites,
        halfedges,
        edges: Vec::with_capacity(3 * sites.len()),
        site_edges: vec![Vec::new(); sites.len()],
        vertices: Vec::new(),
        queue,
        edge_list,
        bottom_most_site,
    };
    sweep.run(order)?;

    let Sweep {
        mut edges,
        site_edges,
        vertices,
        ..
    } = sweep;
    for edge in &mut edges {
        edge.clip(bounds, &vertices);
    }

    trace!(
        "sweep over {} sites produced {} edges and {} vertices",
        sites.len(),
        edges.len(),
        vertices.len()
    );

    Ok(SweepOutput {
        edges,
        site_edges,
        vertex_count: vertices.len(),
    })
}

struct Sweep<'a> {
    sites: &'a [Point],
    halfedges: Vec<Halfedge>,
    edges: Vec<Edge>,
    site_edges: Vec<Vec<EdgeId>>,
    vertices: Vec<Point>,
    queue: EventQueue,
    edge_list: EdgeList,
    bottom_most_site: usize,
}

impl Sweep<'_> {
    fn run(&mut self, order: &[usize]) -> Result<()> {
        let mut pending_sites = order.iter().copied();
        // The bottom-most site opens the beach line on its own
        let mut next_site = pending_sites.nth(1);

        loop {
            let min_event = if self.queue.is_empty() {
                None
            } else {
                self.queue.min(&self.halfedges)
            };

            match (next_site, min_event) {
                (Some(site), Some(event))
                    if compare_by_y_then_x(self.sites[site], event) != Ordering::Less =>
                {
                    self.handle_circle_event()?;
                }
                (Some(site), _) => {
                    self.handle_site_event(site)?;
                    next_site = pending_sites.next();
                }
                (None, Some(_)) => self.handle_circle_event()?,
                (None, None) => break,
            }
        }
        Ok(())
    }

    fn new_edge(&mut self, left_site: usize, right_site: usize) -> EdgeId {
        let id = self.edges.len();
        self.edges.push(Edge::bisecting(
            left_site,
            self.sites[left_site],
            right_site,
            self.sites[right_site],
        ));
        self.site_edges[left_site].push(id);
        self.site_edges[right_site].push(id);
        id
    }

    fn new_halfedge(&mut self, edge: EdgeId, side: Side) -> HalfedgeId {
        self.halfedges.push(Halfedge::new(edge, side));
        self.halfedges.len() - 1
    }

    /// Site on the near side of a half-edge; the bottom-most site for sentinels
    fn left_region(&self, he: HalfedgeId) -> usize {
        let he = &self.halfedges[he];
        he.edge
            .map_or(self.bottom_most_site, |e| self.edges[e].site(he.side))
    }

    /// Site on the far side of a half-edge; the bottom-most site for sentinels
    fn right_region(&self, he: HalfedgeId) -> usize {
        let he = &self.halfedges[he];
        he.edge
            .map_or(self.bottom_most_site, |e| self.edges[e].site(he.side.other()))
    }

    /// Queue a circle event on `he` at `vertex`, replacing any pending one
    fn schedule(&mut self, he: HalfedgeId, vertex: Point, focus: Point) {
        self.queue.remove(&mut self.halfedges, he);
        let entry = &mut self.halfedges[he];
        entry.vertex = Some(vertex);
        entry.ystar = vertex.y + focus.distance(vertex);
        self.queue.insert(&mut self.halfedges, he);
    }

    fn handle_site_event(&mut self, site: usize) -> Result<()> {
        let p = self.sites[site];
        let lbnd = self
            .edge_list
            .left_neighbor(&self.halfedges, &self.edges, self.sites, p);
        let rbnd = self.halfedges[lbnd]
            .right
            .ok_or_else(|| broken("beach line ends before the right sentinel"))?;
        let bottom = self.right_region(lbnd);

        let edge = self.new_edge(bottom, site);

        let bisector = self.new_halfedge(edge, Side::Left);
        self.edge_list.insert(&mut self.halfedges, lbnd, bisector);
        if let Some(vertex) = intersect(
            &self.halfedges[lbnd],
            &self.halfedges[bisector],
            &self.edges,
            self.sites,
        ) {
            self.schedule(lbnd, vertex, p);
        }

        let lbnd = bisector;
        let bisector = self.new_halfedge(edge, Side::Right);
        self.edge_list.insert(&mut self.halfedges, lbnd, bisector);
        if let Some(vertex) = intersect(
            &self.halfedges[bisector],
            &self.halfedges[rbnd],
            &self.edges,
            self.sites,
        ) {
            self.schedule(bisector, vertex, p);
        }

        Ok(())
    }

    fn handle_circle_event(&mut self) -> Result<()> {
        let lbnd = self
            .queue
            .extract_min(&mut self.halfedges)
            .ok_or_else(|| broken("circle event queue is empty"))?;
        let llbnd = self.halfedges[lbnd]
            .left
            .ok_or_else(|| broken("circle event without a left neighbour"))?;
        let rbnd = self.halfedges[lbnd]
            .right
            .ok_or_else(|| broken("circle event without a right neighbour"))?;
        let rrbnd = self.halfedges[rbnd]
            .right
            .ok_or_else(|| broken("circle event without a second right neighbour"))?;

        let mut bottom = self.left_region(lbnd);
        let mut top = self.right_region(rbnd);

        let coord = self.halfedges[lbnd]
            .vertex
            .ok_or_else(|| broken("circle event without a vertex"))?;
        let vertex = self.vertices.len();
        self.vertices.push(coord);

        for he in [lbnd, rbnd] {
            let (edge, side) = (self.halfedges[he].edge, self.halfedges[he].side);
            let edge = edge.ok_or_else(|| broken("circle event on a sentinel"))?;
            self.edges[edge].set_vertex(side, vertex);
        }

        self.edge_list.remove(&mut self.halfedges, lbnd);
        self.queue.remove(&mut self.halfedges, rbnd);
        self.edge_list.remove(&mut self.halfedges, rbnd);

        let mut side = Side::Left;
        if self.sites[bottom].y > self.sites[top].y {
            std::mem::swap(&mut bottom, &mut top);
            side = Side::Right;
        }

        let edge = self.new_edge(bottom, top);
        let bisector = self.new_halfedge(edge, side);
        self.edge_list.insert(&mut self.halfedges, llbnd, bisector);
        self.edges[edge].set_vertex(side.other(), vertex);

        let focus = self.sites[bottom];
        if let Some(v) = intersect(
            &self.halfedges[llbnd],
            &self.halfedges[bisector],
            &self.edges,
            self.sites,
        ) {
            self.schedule(llbnd, v, focus);
        }
        if let Some(v) = intersect(
            &self.halfedges[bisector],
            &self.halfedges[rrbnd],
            &self.edges,
            self.sites,
        ) {
            self.schedule(bisector, v, focus);
        }

        Ok(())
    }
}
