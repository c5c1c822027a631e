//! Sweepline status: the doubly linked list of half-edges crossing the beach line

use super::halfedge::{is_left_of, Halfedge, HalfedgeId};
use crate::edge::Edge;
use crate::geometry::Point;

/// Half-edges ordered left to right along the sweepline, bounded by two
/// sentinels. A coarse hash over x remembers recently found half-edges so
/// that neighbour lookups start close to their answer.
#[derive(Debug)]
pub(crate) struct EdgeList {
    hash: Vec<Option<HalfedgeId>>,
    x_min: f64,
    delta_x: f64,
    pub left_end: HalfedgeId,
    pub right_end: HalfedgeId,
}

impl EdgeList {
    /// Create the list, pushing both sentinels into `halfedges`
    pub fn new(halfedges: &mut Vec<Halfedge>, x_min: f64, delta_x: f64, sqrt_nsites: usize) -> Self {
        let hash_size = (2 * sqrt_nsites).max(2);

        let left_end = halfedges.len();
        halfedges.push(Halfedge::sentinel());
        let right_end = halfedges.len();
        halfedges.push(Halfedge::sentinel());
        halfedges[left_end].right = Some(right_end);
        halfedges[right_end].left = Some(left_end);

        let mut hash = vec![None; hash_size];
        hash[0] = Some(left_end);
        hash[hash_size - 1] = Some(right_end);

        Self {
            hash,
            x_min,
            delta_x,
            left_end,
            right_end,
        }
    }

    /// Link `new` immediately to the right of `left`
    pub fn insert(&self, halfedges: &mut [Halfedge], left: HalfedgeId, new: HalfedgeId) {
        let right = halfedges[left].right;
        halfedges[new].left = Some(left);
        halfedges[new].right = right;
        if let Some(r) = right {
            halfedges[r].left = Some(new);
        }
        halfedges[left].right = Some(new);
    }

    /// Unlink a half-edge and mark it deleted. Stale hash entries pointing at
    /// it are cleared lazily.
    pub fn remove(&self, halfedges: &mut [Halfedge], id: HalfedgeId) {
        let (left, right) = (halfedges[id].left, halfedges[id].right);
        if let Some(l) = left {
            halfedges[l].right = right;
        }
        if let Some(r) = right {
            halfedges[r].left = left;
        }
        let he = &mut halfedges[id];
        he.deleted = true;
        he.left = None;
        he.right = None;
    }

    fn hash_entry(&mut self, halfedges: &[Halfedge], bucket: isize) -> Option<HalfedgeId> {
        if bucket < 0 || bucket as usize >= self.hash.len() {
            return None;
        }
        let slot = bucket as usize;
        let id = self.hash[slot]?;
        if halfedges[id].deleted {
            self.hash[slot] = None;
            return None;
        }
        Some(id)
    }

    fn bucket(&self, x: f64) -> usize {
        let last = self.hash.len() - 1;
        if self.delta_x <= 0.0 {
            return 0;
        }
        let t = (x - self.x_min) / self.delta_x * self.hash.len() as f64;
        if t.is_nan() || t <= 0.0 {
            0
        } else {
            (t as usize).min(last)
        }
    }

    fn is_left(&self, halfedges: &[Halfedge], edges: &[Edge], sites: &[Point], id: HalfedgeId, p: Point) -> bool {
        match halfedges[id].edge {
            Some(edge) => is_left_of(&halfedges[id], &edges[edge], p, sites),
            None => id == self.left_end,
        }
    }

    /// The half-edge immediately to the left of `p` on the sweepline
    pub fn left_neighbor(
        &mut self,
        halfedges: &[Halfedge],
        edges: &[Edge],
        sites: &[Point],
        p: Point,
    ) -> HalfedgeId {
        let bucket = self.bucket(p.x);
        let size = self.hash.len() as isize;

        let mut start = self.hash_entry(halfedges, bucket as isize);
        let mut offset = 1;
        while start.is_none() && offset < size {
            start = self
                .hash_entry(halfedges, bucket as isize - offset)
                .or_else(|| self.hash_entry(halfedges, bucket as isize + offset));
            offset += 1;
        }
        let mut he = start.unwrap_or(self.left_end);

        if he == self.left_end
            || (he != self.right_end && self.is_left(halfedges, edges, sites, he, p))
        {
            loop {
                he = halfedges[he].right.unwrap_or(self.right_end);
                if he == self.right_end || !self.is_left(halfedges, edges, sites, he, p) {
                    break;
                }
            }
            he = halfedges[he].left.unwrap_or(self.left_end);
        } else {
            loop {
                he = halfedges[he].left.unwrap_or(self.left_end);
                if he == self.left_end || self.is_left(halfedges, edges, sites, he, p) {
                    break;
                }
            }
        }

        if bucket > 0 && bucket < self.hash.len() - 1 {
            self.hash[bucket] = Some(he);
        }
        he
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Side;

    #[test]
    fn test_sentinels_are_linked() {
        let mut halfedges = Vec::new();
        let list = EdgeList::new(&mut halfedges, 0.0, 10.0, 2);
        assert_eq!(halfedges[list.left_end].right, Some(list.right_end));
        assert_eq!(halfedges[list.right_end].left, Some(list.left_end));
    }

    #[test]
    fn test_insert_and_remove() {
        let mut halfedges = Vec::new();
        let list = EdgeList::new(&mut halfedges, 0.0, 10.0, 2);
        halfedges.push(Halfedge::new(0, Side::Left));
        let id = halfedges.len() - 1;

        list.insert(&mut halfedges, list.left_end, id);
        assert_eq!(halfedges[list.left_end].right, Some(id));
        assert_eq!(halfedges[list.right_end].left, Some(id));

        list.remove(&mut halfedges, id);
        assert!(halfedges[id].deleted);
        assert_eq!(halfedges[list.left_end].right, Some(list.right_end));
    }

    #[test]
    fn test_left_neighbor_splits_on_bisector() {
        let sites = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let edges = vec![Edge::bisecting(0, sites[0], 1, sites[1])];
        let mut halfedges = Vec::new();
        let mut list = EdgeList::new(&mut halfedges, 0.0, 10.0, 2);

        halfedges.push(Halfedge::new(0, Side::Left));
        let left = halfedges.len() - 1;
        list.insert(&mut halfedges, list.left_end, left);
        halfedges.push(Halfedge::new(0, Side::Right));
        let right = halfedges.len() - 1;
        list.insert(&mut halfedges, left, right);

        // Both half-edges trace x = 5 and bound the arc of the right site
        assert_eq!(
            list.left_neighbor(&halfedges, &edges, &sites, Point::new(2.0, 5.0)),
            list.left_end
        );
        assert_eq!(
            list.left_neighbor(&halfedges, &edges, &sites, Point::new(8.0, 5.0)),
            left
        );
        assert_eq!(halfedges[left].right, Some(right));
    }
}
