//! Spatial indexing for fast position-to-site lookups
//!
//! This module is only available with the `spatial-index` feature.

#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;

#[cfg(feature = "spatial-index")]
use crate::geometry::Point;

/// Wrapper around KD-tree for spatial queries
///
/// Provides O(log n) nearest-site lookups. The nearest site of a point is the
/// site whose (unclipped) Voronoi cell contains it.
///
/// # Performance
///
/// - Construction: O(n log n)
/// - Query: O(log n)
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f64, usize, 2, 32>,
}

#[cfg(feature = "spatial-index")]
impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex").finish_non_exhaustive()
    }
}

#[cfg(feature = "spatial-index")]
impl SpatialIndex {
    /// Build spatial index from site coordinates
    ///
    /// Item `i` of the tree is the site with id `i`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_voronoi_regions::*;
    ///
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let coords = vec![
    ///     DVec2::new(1.0, 1.0),
    ///     DVec2::new(9.0, 1.0),
    ///     DVec2::new(5.0, 9.0),
    /// ];
    ///
    /// let index = SpatialIndex::new(&coords);
    /// assert_eq!(index.find_nearest(DVec2::new(2.0, 0.5)), 0);
    /// # }
    /// ```
    pub fn new(coords: &[Point]) -> Self {
        let points: Vec<[f64; 2]> = coords.iter().map(|c| [c.x, c.y]).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Find the id of the site nearest to a position
    pub fn find_nearest(&self, position: Point) -> usize {
        let query = [position.x, position.y];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item as usize
    }
}

#[cfg(test)]
#[cfg(feature = "spatial-index")]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_index_basic() {
        let coords = vec![
            Point::new(1.0, 1.0),
            Point::new(9.0, 1.0),
            Point::new(9.0, 9.0),
            Point::new(1.0, 9.0),
        ];

        let index = SpatialIndex::new(&coords);

        assert_eq!(index.find_nearest(Point::new(2.0, 2.0)), 0);
        assert_eq!(index.find_nearest(Point::new(8.0, 1.5)), 1);
        assert_eq!(index.find_nearest(Point::new(6.0, 7.0)), 2);
        assert_eq!(index.find_nearest(Point::new(0.0, 10.0)), 3);
    }

    #[test]
    fn test_spatial_index_exact_match() {
        let coords = vec![Point::new(10.0, 0.0), Point::new(0.0, 10.0)];

        let index = SpatialIndex::new(&coords);

        assert_eq!(index.find_nearest(coords[0]), 0);
        assert_eq!(index.find_nearest(coords[1]), 1);
    }
}
