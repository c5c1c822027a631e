//! Bucketed priority queue of pending circle events

use super::halfedge::{Halfedge, HalfedgeId};
use crate::geometry::Point;

/// Circle events keyed by `(ystar, vertex.x)`, hashed into buckets over the
/// y range of the input sites. Each bucket is an ordered singly linked list
/// threaded through `Halfedge::next_in_queue`.
#[derive(Debug)]
pub(crate) struct EventQueue {
    heads: Vec<Option<HalfedgeId>>,
    y_min: f64,
    delta_y: f64,
    count: usize,
    min_bucket: usize,
}

impl EventQueue {
    pub fn new(y_min: f64, delta_y: f64, sqrt_nsites: usize) -> Self {
        let hash_size = (4 * sqrt_nsites).max(1);
        Self {
            heads: vec![None; hash_size],
            y_min,
            delta_y,
            count: 0,
            min_bucket: 0,
        }
    }

    fn bucket(&self, he: &Halfedge) -> usize {
        let last = self.heads.len() - 1;
        if self.delta_y <= 0.0 {
            return 0;
        }
        let t = (he.ystar - self.y_min) / self.delta_y * self.heads.len() as f64;
        if t.is_nan() || t <= 0.0 {
            0
        } else {
            (t as usize).min(last)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn insert(&mut self, halfedges: &mut [Halfedge], id: HalfedgeId) {
        let bucket = self.bucket(&halfedges[id]);
        if bucket < self.min_bucket {
            self.min_bucket = bucket;
        }

        let ystar = halfedges[id].ystar;
        let x = halfedges[id].vertex.map_or(0.0, |v| v.x);

        let mut previous = None;
        let mut next = self.heads[bucket];
        while let Some(candidate) = next {
            let other = &halfedges[candidate];
            let other_x = other.vertex.map_or(0.0, |v| v.x);
            if ystar > other.ystar || (ystar == other.ystar && x > other_x) {
                previous = Some(candidate);
                next = other.next_in_queue;
            } else {
                break;
            }
        }

        halfedges[id].next_in_queue = next;
        match previous {
            Some(p) => halfedges[p].next_in_queue = Some(id),
            None => self.heads[bucket] = Some(id),
        }
        self.count += 1;
    }

    /// Drop a half-edge's pending event. Half-edges without a vertex are not
    /// queued and are left alone.
    pub fn remove(&mut self, halfedges: &mut [Halfedge], id: HalfedgeId) {
        if halfedges[id].vertex.is_none() {
            return;
        }

        let bucket = self.bucket(&halfedges[id]);
        let next = halfedges[id].next_in_queue;
        let mut found = false;
        if self.heads[bucket] == Some(id) {
            self.heads[bucket] = next;
            found = true;
        } else {
            let mut cursor = self.heads[bucket];
            while let Some(c) = cursor {
                if halfedges[c].next_in_queue == Some(id) {
                    halfedges[c].next_in_queue = next;
                    found = true;
                    break;
                }
                cursor = halfedges[c].next_in_queue;
            }
        }

        if found {
            self.count -= 1;
        }
        halfedges[id].vertex = None;
        halfedges[id].next_in_queue = None;
    }

    fn adjust_min_bucket(&mut self) {
        let last = self.heads.len() - 1;
        while self.min_bucket < last && self.heads[self.min_bucket].is_none() {
            self.min_bucket += 1;
        }
    }

    /// Coordinates of the lowest pending event: `(vertex.x, ystar)`
    pub fn min(&mut self, halfedges: &[Halfedge]) -> Option<Point> {
        self.adjust_min_bucket();
        let head = &halfedges[self.heads[self.min_bucket]?];
        let vertex = head.vertex?;
        Some(Point::new(vertex.x, head.ystar))
    }

    /// Pop the lowest pending event
    pub fn extract_min(&mut self, halfedges: &mut [Halfedge]) -> Option<HalfedgeId> {
        self.adjust_min_bucket();
        let id = self.heads[self.min_bucket]?;
        self.heads[self.min_bucket] = halfedges[id].next_in_queue;
        halfedges[id].next_in_queue = None;
        self.count -= 1;
        Some(id)
    }
}
