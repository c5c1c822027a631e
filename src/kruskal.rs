//! Kruskal spanning trees over line segments
//!
//! Segment endpoints are graph nodes, identified by their exact coordinates.
//! A disconnected input yields a spanning forest.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{LineSegment, Point};

/// Which spanning tree to build
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KruskalType {
    /// Prefer short segments
    #[default]
    Minimum,
    /// Prefer long segments
    Maximum,
}

/// Union-find over `0..n` with union by size and path compression
#[derive(Debug, Clone)]
pub(crate) struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    pub fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merge the sets of `a` and `b`; false if they were already joined
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut a, mut b) = (self.find(a), self.find(b));
        if a == b {
            return false;
        }
        if self.size[a] < self.size[b] {
            std::mem::swap(&mut a, &mut b);
        }
        self.parent[b] = a;
        self.size[a] += self.size[b];
        true
    }
}

fn point_key(p: Point) -> (u64, u64) {
    (p.x.to_bits(), p.y.to_bits())
}

/// Spanning tree (or forest) of the graph formed by `segments`
///
/// Segments are considered shortest first for `Minimum` and longest first for
/// `Maximum`; ties keep their input order. The returned segments are in the
/// order they were accepted.
pub fn kruskal(segments: &[LineSegment], kind: KruskalType) -> Vec<LineSegment> {
    let mut nodes: HashMap<(u64, u64), usize> = HashMap::new();
    let mut node_of = |p: Point| {
        let next = nodes.len();
        *nodes.entry(point_key(p)).or_insert(next)
    };
    let endpoints: Vec<(usize, usize)> = segments
        .iter()
        .map(|s| (node_of(s.p0), node_of(s.p1)))
        .collect();

    let mut order: Vec<usize> = (0..segments.len()).collect();
    match kind {
        KruskalType::Minimum => {
            order.sort_by(|&a, &b| segments[a].length().total_cmp(&segments[b].length()))
        }
        KruskalType::Maximum => {
            order.sort_by(|&a, &b| segments[b].length().total_cmp(&segments[a].length()))
        }
    }

    let mut sets = DisjointSet::new(nodes.len());
    order
        .into_iter()
        .filter(|&i| {
            let (a, b) = endpoints[i];
            sets.union(a, b)
        })
        .map(|i| segments[i])
        .collect()
}
