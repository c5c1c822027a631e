//! Site Structure
//!
//! A site is one kept input point of the diagram, together with the edges the
//! sweep attached to it and its lazily computed region.

use std::cell::OnceCell;

use crate::error::Result;
use crate::geometry::Point;
use crate::region::Region;

/// A single generator point of the diagram
///
/// # Design Notes
///
/// Sites are owned by their `Diagram` and indexed by `id`. Everything other
/// than the cached region is fixed once the diagram has been built; the region
/// is computed on first request and never invalidated.
#[derive(Debug, Clone)]
pub struct Site {
    /// Identifier of this site (0 to site_count-1)
    ///
    /// Ids are assigned in input order over the kept points, so duplicates
    /// that were dropped leave no gaps.
    id: usize,

    coord: Point,

    /// Arbitrary per-site value in `[0, 100)`
    ///
    /// Drawn from the diagram's weight seed. Never used by the geometry; it
    /// exists for callers that want a stable random attribute per site.
    weight: f64,

    /// Position of this site in sweep order (y, then x)
    sort_index: usize,

    /// Ids of every bisector edge bounding this site, visible or not
    edges: Vec<usize>,

    region: OnceCell<Region>,
}

impl Site {
    pub(crate) fn new(id: usize, coord: Point, weight: f64) -> Self {
        Self {
            id,
            coord,
            weight,
            sort_index: 0,
            edges: Vec::new(),
            region: OnceCell::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    #[inline]
    pub fn coord(&self) -> Point {
        self.coord
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.coord.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.coord.y
    }

    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    #[inline]
    pub fn sort_index(&self) -> usize {
        self.sort_index
    }

    /// Ids of the edges bounding this site, in the order the sweep created them
    #[inline]
    pub fn edge_ids(&self) -> &[usize] {
        &self.edges
    }

    /// Euclidean distance to another site
    #[inline]
    pub fn distance_to(&self, other: &Site) -> f64 {
        self.coord.distance(other.coord)
    }

    /// The cached region, if it has been computed
    #[inline]
    pub fn region(&self) -> Option<&Region> {
        self.region.get()
    }

    /// Whether the cached region touches the border of the bounds; `None`
    /// until the region has been computed
    pub fn touches_hull(&self) -> Option<bool> {
        self.region.get().map(Region::touches_hull)
    }

    pub(crate) fn set_sort_index(&mut self, index: usize) {
        self.sort_index = index;
    }

    pub(crate) fn set_edges(&mut self, edges: Vec<usize>) {
        self.edges = edges;
    }

    /// Return the cached region, computing it with `compute` on first use
    pub(crate) fn region_or_compute<F>(&self, compute: F) -> Result<&Region>
    where
        F: FnOnce() -> Result<Region>,
    {
        if let Some(region) = self.region.get() {
            return Ok(region);
        }
        let region = compute()?;
        Ok(self.region.get_or_init(|| region))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VoronoiError;

    #[test]
    fn test_site_creation() {
        let site = Site::new(3, Point::new(1.5, -2.0), 42.0);

        assert_eq!(site.id(), 3);
        assert_eq!(site.x(), 1.5);
        assert_eq!(site.y(), -2.0);
        assert_eq!(site.weight(), 42.0);
        assert!(site.edge_ids().is_empty());
        assert!(site.region().is_none());
        assert_eq!(site.touches_hull(), None);
    }

    #[test]
    fn test_distance_to() {
        let a = Site::new(0, Point::new(0.0, 0.0), 0.0);
        let b = Site::new(1, Point::new(3.0, 4.0), 0.0);
        assert_eq!(a.distance_to(&b), 5.0);
    }

    #[test]
    fn test_region_is_computed_once() {
        let site = Site::new(0, Point::ZERO, 0.0);
        let mut calls = 0;

        site.region_or_compute(|| {
            calls += 1;
            Ok(Region::default())
        })
        .unwrap();
        site.region_or_compute(|| {
            calls += 1;
            Ok(Region::default())
        })
        .unwrap();

        assert_eq!(calls, 1);
        assert_eq!(site.touches_hull(), Some(false));
    }

    #[test]
    fn test_failed_computation_is_not_cached() {
        let site = Site::new(0, Point::ZERO, 0.0);
        let result = site.region_or_compute(|| Err(VoronoiError::GenerationFailed("test".into())));
        assert!(result.is_err());
        assert!(site.region().is_none());
    }
}
