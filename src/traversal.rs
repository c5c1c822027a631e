//! Breadth-first traversal of the site adjacency graph
//!
//! Two sites are adjacent when they share a visible Voronoi edge. The walk
//! hands every reached site to a callback exactly once, together with the
//! data the callback already stored on the neighbours visited before it. This
//! is enough to propagate values outward from a set of roots, for example the
//! ring distance of every cell from the border:
//!
//! ```
//! use rust_voronoi_regions::*;
//!
//! let points: Vec<DVec2> = (0..5)
//!     .flat_map(|i| (0..5).map(move |j| DVec2::new(1.0 + 2.0 * i as f64, 1.0 + 2.0 * j as f64)))
//!     .collect();
//! let diagram = Diagram::new(&points, Rect::from_size(10.0, 10.0)).unwrap();
//!
//! let distances = hull_distances(&diagram).unwrap();
//! assert_eq!(distances[0], Some(1)); // corner cell
//! assert_eq!(distances[12], Some(3)); // centre cell
//! ```

use std::collections::VecDeque;

use log::debug;

use crate::diagram::Diagram;
use crate::error::{Result, VoronoiError};

/// One site of a finished (or running) traversal
#[derive(Debug, Clone)]
pub struct TraversalNode<D> {
    id: usize,
    /// Filled in when the node is visited
    neighbors: Vec<usize>,
    previous: Option<usize>,
    visited: bool,
    data: Option<D>,
}

impl<D> TraversalNode<D> {
    fn new(id: usize) -> Self {
        Self {
            id,
            neighbors: Vec::new(),
            previous: None,
            visited: false,
            data: None,
        }
    }

    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Adjacent site ids; empty if the node was never reached
    #[inline]
    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }

    /// The site that queued this one (`None` for roots and unreached sites)
    #[inline]
    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    #[inline]
    pub fn data(&self) -> Option<&D> {
        self.data.as_ref()
    }
}

/// The callback's view of the site being visited
///
/// Only neighbours visited before this site are exposed, so their data is
/// final.
pub struct Visit<'a, D> {
    id: usize,
    previous: Option<usize>,
    nodes: &'a mut [TraversalNode<D>],
}

impl<D> Visit<'_, D> {
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// The site that queued this one, `None` for a root
    #[inline]
    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    pub fn previous_data(&self) -> Option<&D> {
        self.previous.and_then(|p| self.nodes[p].data.as_ref())
    }

    /// Ids of the neighbours that were visited before this site
    pub fn visited_neighbors(&self) -> impl Iterator<Item = usize> + '_ {
        let nodes = &*self.nodes;
        nodes[self.id]
            .neighbors
            .iter()
            .copied()
            .filter(move |&n| nodes[n].visited)
    }

    /// Data stored on the neighbours visited before this site
    ///
    /// Neighbours the callback left without data are skipped.
    pub fn visited_neighbor_data(&self) -> impl Iterator<Item = (usize, &D)> + '_ {
        let nodes = &*self.nodes;
        nodes[self.id].neighbors.iter().filter_map(move |&n| {
            let node = &nodes[n];
            match (node.visited, node.data.as_ref()) {
                (true, Some(data)) => Some((n, data)),
                _ => None,
            }
        })
    }

    pub fn data(&self) -> Option<&D> {
        self.nodes[self.id].data.as_ref()
    }

    /// Store data on the visited site
    pub fn set_data(&mut self, data: D) {
        self.nodes[self.id].data = Some(data);
    }
}

/// Result of a traversal: every site's node, plus the order of visits
#[derive(Debug, Clone)]
pub struct VoronoiBfs<D> {
    nodes: Vec<TraversalNode<D>>,
    visit_order: Vec<usize>,
}

impl<D> VoronoiBfs<D> {
    /// All nodes, indexed by site id
    #[inline]
    pub fn nodes(&self) -> &[TraversalNode<D>] {
        &self.nodes
    }

    pub fn node(&self, id: usize) -> Option<&TraversalNode<D>> {
        self.nodes.get(id)
    }

    pub fn data(&self, id: usize) -> Option<&D> {
        self.nodes.get(id).and_then(TraversalNode::data)
    }

    /// Site ids in the order they were handed to the callback
    #[inline]
    pub fn visit_order(&self) -> &[usize] {
        &self.visit_order
    }

    /// Take the stored data, indexed by site id
    pub fn into_data(self) -> Vec<Option<D>> {
        self.nodes.into_iter().map(|node| node.data).collect()
    }
}

/// Visit every site reachable from `roots`, breadth first
///
/// All regions are computed up front. Roots are visited first, in the given
/// order, with `previous() == None`. A site queued more than once is visited
/// only on its first dequeue; `previous()` is the site behind that entry.
///
/// # Errors
///
/// Returns `SiteNotFound` for an unknown root and `Disposed` on a disposed
/// diagram.
pub fn traverse<D, F>(diagram: &Diagram, roots: &[usize], mut callback: F) -> Result<VoronoiBfs<D>>
where
    F: FnMut(&mut Visit<'_, D>),
{
    if diagram.is_disposed() {
        return Err(VoronoiError::Disposed);
    }
    diagram.compute_regions()?;
    let site_count = diagram.site_count();
    if let Some(&root) = roots.iter().find(|&&r| r >= site_count) {
        return Err(VoronoiError::SiteNotFound(root));
    }

    let mut nodes: Vec<TraversalNode<D>> = (0..site_count).map(TraversalNode::new).collect();
    let mut queue: VecDeque<(usize, Option<usize>)> = roots.iter().map(|&r| (r, None)).collect();
    let mut visit_order = Vec::with_capacity(site_count);

    while let Some((id, previous)) = queue.pop_front() {
        if nodes[id].visited {
            continue;
        }
        let node = &mut nodes[id];
        node.visited = true;
        node.previous = previous;
        node.neighbors = diagram.neighbor_sites(id)?;
        visit_order.push(id);

        callback(&mut Visit {
            id,
            previous,
            nodes: &mut nodes,
        });

        for &n in &nodes[id].neighbors {
            if !nodes[n].visited {
                queue.push_back((n, Some(id)));
            }
        }
    }

    debug!(
        "traversal visited {} of {} sites from {} roots",
        visit_order.len(),
        site_count,
        roots.len()
    );

    Ok(VoronoiBfs { nodes, visit_order })
}

/// Ring distance of every site from the border of the bounds
///
/// Sites whose region touches the border get 1, every other reached site one
/// more than its closest visited neighbour. Sites that are never reached (an
/// empty region) get `None`.
pub fn hull_distances(diagram: &Diagram) -> Result<Vec<Option<usize>>> {
    let roots = diagram.hull_sites()?;
    let mut on_hull = vec![false; diagram.site_count()];
    for &root in &roots {
        on_hull[root] = true;
    }

    let bfs = traverse(diagram, &roots, |visit: &mut Visit<'_, usize>| {
        let distance = if on_hull[visit.id()] {
            1
        } else {
            visit
                .visited_neighbor_data()
                .map(|(_, &d)| d)
                .min()
                .unwrap_or(0)
                + 1
        };
        visit.set_data(distance);
    })?;
    Ok(bfs.into_data())
}
