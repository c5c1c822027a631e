//! Diagram main structure

use std::collections::{HashMap, HashSet};

use log::{debug, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::DiagramConfig;
use crate::edge::Edge;
use crate::error::{Result, VoronoiError};
use crate::generation::{lloyd_relaxation_with_options, LloydOptions};
use crate::geometry::{close_enough, compare_by_y_then_x, Circle, LineSegment, Point, Rect};
use crate::kruskal::{kruskal, KruskalType};
use crate::region::{compute_region, reorder_edges, Region, ReorderCriterion};
use crate::site::Site;
use crate::sweep::fortunes_algorithm;
use crate::traversal::{traverse, Visit, VoronoiBfs};

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// Upper bound (exclusive) of the random site weights
const MAX_WEIGHT: f64 = 100.0;

/// A Voronoi diagram clipped to a rectangle, with its Delaunay dual
///
/// The diagram owns its sites (indexed by id) and the bisector edges between
/// them. Per-site regions are computed lazily and cached.
///
/// # Examples
///
/// ```
/// use rust_voronoi_regions::*;
///
/// let points = vec![
///     DVec2::new(2.0, 2.0),
///     DVec2::new(8.0, 3.0),
///     DVec2::new(5.0, 8.0),
/// ];
/// let diagram = Diagram::new(&points, Rect::from_size(10.0, 10.0)).unwrap();
///
/// let polygon = diagram.region(0).unwrap();
/// println!("Site 0 has {} corners", polygon.len());
///
/// let neighbors = diagram.neighbor_sites(0).unwrap();
/// assert_eq!(neighbors.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Diagram {
    /// Configuration the diagram was built with
    config: DiagramConfig,

    /// All kept sites (indexed by site ID)
    sites: Vec<Site>,

    /// Site coordinates (indexed by site ID)
    coords: Vec<Point>,

    /// Every bisector edge, visible or not
    edges: Vec<Edge>,

    disposed: bool,

    /// Spatial index for fast position-to-site lookups (requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: Option<SpatialIndex>,
}

impl Diagram {
    /// Build the diagram of `points`, clipped to `bounds`
    ///
    /// Points closer than the default epsilon (0.005) to an earlier point
    /// are dropped.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty point set, a non-finite point or
    /// unusable bounds, and `GenerationFailed` if the sweep breaks down
    /// numerically.
    pub fn new(points: &[Point], bounds: Rect) -> Result<Self> {
        Self::with_config(points, &DiagramConfig::with_bounds(bounds))
    }

    /// Build the diagram of `points` using the bounds, epsilon and weight
    /// seed of `config`
    ///
    /// # Errors
    ///
    /// Same as [`Diagram::new`], plus `InvalidConfig` for an out-of-range
    /// configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_voronoi_regions::*;
    ///
    /// let config = DiagramConfigBuilder::new()
    ///     .bounds(Rect::new(0.0, 0.0, 4.0, 4.0))
    ///     .unwrap()
    ///     .epsilon(0.5)
    ///     .unwrap()
    ///     .build()
    ///     .unwrap();
    ///
    /// let points = [DVec2::new(1.0, 1.0), DVec2::new(1.2, 1.0), DVec2::new(3.0, 3.0)];
    /// let diagram = Diagram::with_config(&points, &config).unwrap();
    /// assert_eq!(diagram.site_count(), 2);
    /// ```
    pub fn with_config(points: &[Point], config: &DiagramConfig) -> Result<Self> {
        config.validate()?;
        if points.is_empty() {
            return Err(VoronoiError::InvalidInput(
                "at least one point is required".to_string(),
            ));
        }
        if let Some(p) = points.iter().find(|p| !p.is_finite()) {
            return Err(VoronoiError::InvalidInput(format!(
                "points must be finite (got {p})"
            )));
        }

        let coords = dedup_points(points, config.epsilon);
        let dropped = points.len() - coords.len();
        if dropped > 0 {
            warn!(
                "dropped {} of {} points lying within {} of an earlier point",
                dropped,
                points.len(),
                config.epsilon
            );
        }

        let mut rng = ChaCha8Rng::seed_from_u64(config.weight_seed);
        let mut sites: Vec<Site> = coords
            .iter()
            .enumerate()
            .map(|(id, &coord)| Site::new(id, coord, rng.gen_range(0.0..MAX_WEIGHT)))
            .collect();

        let mut order: Vec<usize> = (0..sites.len()).collect();
        order.sort_by(|&a, &b| compare_by_y_then_x(coords[a], coords[b]));
        for (index, &id) in order.iter().enumerate() {
            sites[id].set_sort_index(index);
        }

        let output = fortunes_algorithm(&coords, &order, &config.bounds)?;
        for (site, edges) in sites.iter_mut().zip(output.site_edges) {
            site.set_edges(edges);
        }

        debug!(
            "built diagram: {} sites, {} edges ({} visible), {} vertices",
            sites.len(),
            output.edges.len(),
            output.edges.iter().filter(|e| e.is_visible()).count(),
            output.vertex_count
        );

        #[cfg(feature = "spatial-index")]
        let spatial_index = Some(SpatialIndex::new(&coords));

        Ok(Self {
            config: *config,
            sites,
            coords,
            edges: output.edges,
            disposed: false,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }

    fn ensure_live(&self) -> Result<()> {
        if self.disposed {
            return Err(VoronoiError::Disposed);
        }
        Ok(())
    }

    /// Get the configuration the diagram was built with
    #[inline]
    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    /// Get the clipping rectangle
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.config.bounds
    }

    /// Get the number of kept sites (0 after `dispose`)
    #[inline]
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// Get all sites as a slice (empty after `dispose`)
    #[inline]
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Get all site coordinates, indexed by site id (empty after `dispose`)
    #[inline]
    pub fn site_coords(&self) -> &[Point] {
        &self.coords
    }

    /// Get every bisector edge, including invisible ones (empty after `dispose`)
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Whether `dispose` has been called
    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Get a site by ID
    ///
    /// # Errors
    ///
    /// Returns `SiteNotFound` for an unknown id and `Disposed` after `dispose`.
    pub fn site(&self, id: usize) -> Result<&Site> {
        self.ensure_live()?;
        self.sites.get(id).ok_or(VoronoiError::SiteNotFound(id))
    }

    fn region_of(&self, id: usize) -> Result<&Region> {
        let site = self.site(id)?;
        site.region_or_compute(|| {
            compute_region(
                id,
                site.edge_ids(),
                &self.edges,
                &self.coords,
                &self.config.bounds,
                self.config.epsilon,
            )
        })
    }

    /// Get the clipped cell polygon of a site, counter-clockwise
    ///
    /// The polygon is computed on first access and cached. It is empty when
    /// the cell lies entirely outside the bounds.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_voronoi_regions::*;
    ///
    /// let diagram = Diagram::new(&[DVec2::new(5.0, 5.0)], Rect::from_size(10.0, 10.0)).unwrap();
    /// // A lone site owns the whole rectangle
    /// assert_eq!(diagram.region(0).unwrap().len(), 4);
    /// ```
    pub fn region(&self, id: usize) -> Result<&[Point]> {
        Ok(self.region_of(id)?.vertices())
    }

    /// Compute (or fetch) every region, in site id order
    pub fn regions(&self) -> Result<Vec<&[Point]>> {
        self.ensure_live()?;
        (0..self.sites.len()).map(|id| self.region(id)).collect()
    }

    /// Compute and cache every region
    pub fn compute_regions(&self) -> Result<()> {
        self.ensure_live()?;
        for id in 0..self.sites.len() {
            self.region_of(id)?;
        }
        Ok(())
    }

    /// Get the ids of sites sharing a visible edge with a site
    ///
    /// # Errors
    ///
    /// Returns `RegionNotComputed` unless `region(id)` (or `compute_regions`)
    /// has been called for this site first.
    pub fn neighbor_sites(&self, id: usize) -> Result<Vec<usize>> {
        let site = self.site(id)?;
        if site.region().is_none() {
            return Err(VoronoiError::RegionNotComputed(id));
        }
        Ok(site
            .edge_ids()
            .iter()
            .map(|&e| &self.edges[e])
            .filter(|edge| edge.is_visible())
            .filter_map(|edge| edge.other_site(id))
            .collect())
    }

    /// Get the ids of all sites whose region touches the border of the bounds
    ///
    /// Computes every region first.
    pub fn hull_sites(&self) -> Result<Vec<usize>> {
        self.compute_regions()?;
        Ok(self
            .sites
            .iter()
            .filter(|site| site.touches_hull() == Some(true))
            .map(Site::id)
            .collect())
    }

    /// Every visible Voronoi edge as a clipped segment
    pub fn compute_voronoi_diagram(&self) -> Result<Vec<LineSegment>> {
        self.ensure_live()?;
        Ok(self.edges.iter().filter_map(Edge::voronoi_segment).collect())
    }

    /// The visible Voronoi edges bounding one site
    pub fn voronoi_boundary_for_site(&self, id: usize) -> Result<Vec<LineSegment>> {
        let site = self.site(id)?;
        Ok(site
            .edge_ids()
            .iter()
            .filter_map(|&e| self.edges[e].voronoi_segment())
            .collect())
    }

    fn delaunay_line(&self, edge: &Edge) -> LineSegment {
        LineSegment::new(
            self.coords[edge.left_site()],
            self.coords[edge.right_site()],
        )
    }

    /// The Delaunay triangulation: one segment between the two sites of
    /// every edge
    pub fn compute_delaunay_triangulation(&self) -> Result<Vec<LineSegment>> {
        self.ensure_live()?;
        Ok(self.edges.iter().map(|e| self.delaunay_line(e)).collect())
    }

    /// The Delaunay triangulation without the segments `keep_out` rejects
    ///
    /// `keep_out` returns true for segments that cross an area to avoid.
    pub fn delaunay_triangulation_avoiding<F>(&self, mut keep_out: F) -> Result<Vec<LineSegment>>
    where
        F: FnMut(&LineSegment) -> bool,
    {
        Ok(self
            .compute_delaunay_triangulation()?
            .into_iter()
            .filter(|segment| !keep_out(segment))
            .collect())
    }

    /// Delaunay segments from one site to each of its Delaunay neighbours
    pub fn delaunay_lines_for_site(&self, id: usize) -> Result<Vec<LineSegment>> {
        let site = self.site(id)?;
        Ok(site
            .edge_ids()
            .iter()
            .map(|&e| self.delaunay_line(&self.edges[e]))
            .collect())
    }

    fn hull_edges(&self) -> Vec<usize> {
        (0..self.edges.len())
            .filter(|&e| self.edges[e].is_part_of_convex_hull())
            .collect()
    }

    /// Delaunay segments along the convex hull of the sites
    pub fn hull_line_segments(&self) -> Result<Vec<LineSegment>> {
        self.ensure_live()?;
        Ok(self
            .hull_edges()
            .into_iter()
            .map(|e| self.delaunay_line(&self.edges[e]))
            .collect())
    }

    /// Ids of the sites on the convex hull, in hull order
    ///
    /// Collinear inputs give the sites in order along their line.
    pub fn convex_hull_sites_in_order(&self) -> Result<Vec<usize>> {
        self.ensure_live()?;
        let reordered = reorder_edges(&self.hull_edges(), &self.edges, ReorderCriterion::Site)?;

        let mut hull: Vec<usize> = reordered
            .edges
            .iter()
            .zip(&reordered.orientations)
            .map(|(&e, &side)| self.edges[e].site(side))
            .collect();
        match (reordered.edges.last(), reordered.orientations.last()) {
            (Some(&e), Some(&side)) => {
                let tail = self.edges[e].site(side.other());
                if hull.first() != Some(&tail) {
                    hull.push(tail);
                }
            }
            _ => hull.extend(0..self.sites.len()),
        }
        Ok(hull)
    }

    /// Spanning tree over the Delaunay triangulation
    ///
    /// # Example
    ///
    /// ```
    /// use rust_voronoi_regions::*;
    ///
    /// let points = [
    ///     DVec2::new(1.0, 1.0),
    ///     DVec2::new(9.0, 1.5),
    ///     DVec2::new(5.0, 9.0),
    ///     DVec2::new(5.0, 4.0),
    /// ];
    /// let diagram = Diagram::new(&points, Rect::from_size(10.0, 10.0)).unwrap();
    /// let tree = diagram.spanning_tree(KruskalType::Minimum).unwrap();
    /// assert_eq!(tree.len(), points.len() - 1);
    /// ```
    pub fn spanning_tree(&self, kind: KruskalType) -> Result<Vec<LineSegment>> {
        Ok(kruskal(&self.compute_delaunay_triangulation()?, kind))
    }

    /// Per site, the circle around it reaching halfway to its nearest
    /// Delaunay neighbour
    ///
    /// Sites whose nearest neighbour lies across a convex hull edge get no
    /// circle.
    pub fn circles(&self) -> Result<Vec<Circle>> {
        self.ensure_live()?;
        let mut circles = Vec::new();
        for site in &self.sites {
            let nearest = site.edge_ids().iter().map(|&e| &self.edges[e]).min_by(|a, b| {
                let da = self.delaunay_line(a).length();
                let db = self.delaunay_line(b).length();
                da.total_cmp(&db)
            });
            if let Some(edge) = nearest {
                if !edge.is_part_of_convex_hull() {
                    let distance = self.delaunay_line(edge).length();
                    circles.push(Circle::new(site.coord(), distance * 0.5));
                }
            }
        }
        Ok(circles)
    }

    /// Find the site nearest to a position (requires spatial-index feature)
    ///
    /// Uses the KD-tree spatial index for O(log n) lookups. The result is the
    /// site whose cell contains `position` when `position` is in the bounds.
    #[cfg(feature = "spatial-index")]
    pub fn nearest_site(&self, position: Point) -> Result<usize> {
        self.ensure_live()?;
        self.spatial_index
            .as_ref()
            .map(|index| index.find_nearest(position))
            .ok_or(VoronoiError::Disposed)
    }

    /// Run `iterations` rounds of Lloyd's relaxation, returning a new diagram
    ///
    /// Each round moves every site to the centroid of its region; sites with
    /// an empty region are dropped. The diagram itself is left untouched.
    pub fn relax(&self, iterations: usize) -> Result<Diagram> {
        self.relax_with_options(LloydOptions {
            max_iterations: iterations,
            convergence_threshold: 0.0,
        })
    }

    /// Lloyd's relaxation with early termination, see [`LloydOptions`]
    pub fn relax_with_options(&self, options: LloydOptions) -> Result<Diagram> {
        lloyd_relaxation_with_options(self, options)
    }

    /// Breadth-first walk over the site adjacency graph from `roots`
    ///
    /// See [`traverse`](crate::traversal::traverse).
    pub fn traverse_bfs<D, F>(&self, roots: &[usize], callback: F) -> Result<VoronoiBfs<D>>
    where
        F: FnMut(&mut Visit<'_, D>),
    {
        traverse(self, roots, callback)
    }

    /// Breadth-first walk rooted at site 0
    pub fn traverse_bfs_from_first<D, F>(&self, callback: F) -> Result<VoronoiBfs<D>>
    where
        F: FnMut(&mut Visit<'_, D>),
    {
        traverse(self, &[0], callback)
    }

    /// Release sites, edges and cached regions
    ///
    /// Every later fallible query returns `Disposed`; plain accessors return
    /// empty views.
    pub fn dispose(&mut self) {
        self.sites = Vec::new();
        self.coords = Vec::new();
        self.edges = Vec::new();
        #[cfg(feature = "spatial-index")]
        {
            self.spatial_index = None;
        }
        self.disposed = true;
    }
}

/// Keep the first of every group of points closer than `epsilon`
///
/// Points are bucketed on a grid of cell size `epsilon`, so only the
/// neighbouring buckets need checking. With `epsilon == 0` only exact
/// duplicates are dropped.
fn dedup_points(points: &[Point], epsilon: f64) -> Vec<Point> {
    let mut kept: Vec<Point> = Vec::with_capacity(points.len());

    if epsilon <= 0.0 {
        // Adding 0.0 folds -0.0 into 0.0
        let mut seen: HashSet<(u64, u64)> = HashSet::with_capacity(points.len());
        for &p in points {
            if seen.insert(((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())) {
                kept.push(p);
            }
        }
        return kept;
    }

    let cell_of = |p: Point| ((p.x / epsilon).floor() as i64, (p.y / epsilon).floor() as i64);
    let mut grid: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
    for &p in points {
        let (cx, cy) = cell_of(p);
        let duplicate = (-1..=1).any(|dx| {
            (-1..=1).any(|dy| {
                grid.get(&(cx + dx, cy + dy)).is_some_and(|bucket| {
                    bucket
                        .iter()
                        .any(|&k| close_enough(p, kept[k], epsilon))
                })
            })
        });
        if !duplicate {
            grid.entry((cx, cy)).or_default().push(kept.len());
            kept.push(p);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiagramConfigBuilder;
    use approx::assert_relative_eq;

    fn square() -> Rect {
        Rect::from_size(10.0, 10.0)
    }

    fn sample_points() -> Vec<Point> {
        vec![
            Point::new(1.0, 1.0),
            Point::new(8.5, 1.5),
            Point::new(4.0, 4.5),
            Point::new(9.0, 8.0),
            Point::new(2.0, 8.5),
            Point::new(6.0, 6.2),
        ]
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            Diagram::new(&[], square()),
            Err(VoronoiError::InvalidInput(_))
        ));
        assert!(matches!(
            Diagram::new(&[Point::new(f64::NAN, 1.0)], square()),
            Err(VoronoiError::InvalidInput(_))
        ));
        assert!(matches!(
            Diagram::new(&[Point::new(1.0, 1.0)], Rect::from_size(10.0, 0.0)),
            Err(VoronoiError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_ids_and_sort_indices() {
        let diagram = Diagram::new(&sample_points(), square()).unwrap();

        assert_eq!(diagram.site_count(), 6);
        for (id, site) in diagram.sites().iter().enumerate() {
            assert_eq!(site.id(), id);
            assert_eq!(site.coord(), sample_points()[id]);
            assert!((0.0..100.0).contains(&site.weight()));
        }

        let mut by_sort_index: Vec<&Site> = diagram.sites().iter().collect();
        by_sort_index.sort_by_key(|s| s.sort_index());
        assert!(by_sort_index
            .windows(2)
            .all(|w| compare_by_y_then_x(w[0].coord(), w[1].coord()).is_lt()));
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let points = vec![
            Point::new(1.0, 1.0),
            Point::new(5.0, 5.0),
            Point::new(1.0, 1.0),
            Point::new(5.001, 5.0),
            Point::new(9.0, 2.0),
        ];
        let diagram = Diagram::new(&points, square()).unwrap();

        assert_eq!(diagram.site_count(), 3);
        assert_eq!(diagram.site(2).unwrap().coord(), Point::new(9.0, 2.0));
        assert!(matches!(diagram.site(3), Err(VoronoiError::SiteNotFound(3))));
    }

    #[test]
    fn test_exact_dedup_with_zero_epsilon() {
        let kept = dedup_points(
            &[Point::new(0.0, 0.0), Point::new(-0.0, 0.0), Point::new(0.001, 0.0)],
            0.0,
        );
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_weights_follow_weight_seed() {
        let config = DiagramConfigBuilder::new()
            .bounds(square())
            .unwrap()
            .weight_seed(7)
            .build()
            .unwrap();
        let a = Diagram::with_config(&sample_points(), &config).unwrap();
        let b = Diagram::with_config(&sample_points(), &config).unwrap();

        let weights = |d: &Diagram| d.sites().iter().map(Site::weight).collect::<Vec<_>>();
        assert_eq!(weights(&a), weights(&b));
    }

    #[test]
    fn test_neighbors_require_region() {
        let diagram = Diagram::new(&sample_points(), square()).unwrap();

        assert!(matches!(
            diagram.neighbor_sites(0),
            Err(VoronoiError::RegionNotComputed(0))
        ));
        diagram.region(0).unwrap();
        assert!(!diagram.neighbor_sites(0).unwrap().is_empty());
    }

    #[test]
    fn test_regions_tile_bounds() {
        let diagram = Diagram::new(&sample_points(), square()).unwrap();
        let total: f64 = diagram
            .regions()
            .unwrap()
            .iter()
            .map(|polygon| crate::geometry::polygon_area(polygon))
            .sum();
        assert_relative_eq!(total, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_segment_views() {
        let diagram = Diagram::new(&sample_points(), square()).unwrap();

        let voronoi = diagram.compute_voronoi_diagram().unwrap();
        let visible = diagram.edges().iter().filter(|e| e.is_visible()).count();
        assert_eq!(voronoi.len(), visible);

        let delaunay = diagram.compute_delaunay_triangulation().unwrap();
        assert_eq!(delaunay.len(), diagram.edges().len());

        let per_site: usize = (0..diagram.site_count())
            .map(|id| diagram.delaunay_lines_for_site(id).unwrap().len())
            .sum();
        assert_eq!(per_site, 2 * delaunay.len());

        let none = diagram.delaunay_triangulation_avoiding(|_| true).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_convex_hull() {
        let diagram = Diagram::new(&sample_points(), square()).unwrap();

        let mut hull = diagram.convex_hull_sites_in_order().unwrap();
        assert_eq!(hull.len(), diagram.hull_line_segments().unwrap().len());
        hull.sort_unstable();
        assert_eq!(hull, vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_convex_hull_of_collinear_sites() {
        let points = [
            Point::new(1.0, 5.0),
            Point::new(4.0, 5.0),
            Point::new(7.0, 5.0),
        ];
        let diagram = Diagram::new(&points, square()).unwrap();

        let hull = diagram.convex_hull_sites_in_order().unwrap();
        assert_eq!(hull.len(), 3);
        assert_eq!(hull[1], 1);

        let areas: Vec<f64> = diagram
            .regions()
            .unwrap()
            .iter()
            .map(|polygon| crate::geometry::polygon_area(polygon))
            .collect();
        assert_relative_eq!(areas[0], 25.0, epsilon = 1e-9);
        assert_relative_eq!(areas[1], 30.0, epsilon = 1e-9);
        assert_relative_eq!(areas[2], 45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_spanning_tree_connects_all_sites() {
        let diagram = Diagram::new(&sample_points(), square()).unwrap();

        let minimum = diagram.spanning_tree(KruskalType::Minimum).unwrap();
        let maximum = diagram.spanning_tree(KruskalType::Maximum).unwrap();
        assert_eq!(minimum.len(), diagram.site_count() - 1);
        assert_eq!(maximum.len(), diagram.site_count() - 1);

        let length = |tree: &[LineSegment]| tree.iter().map(LineSegment::length).sum::<f64>();
        assert!(length(&minimum) <= length(&maximum));
    }

    #[test]
    fn test_circles_fit_inside_cells() {
        let diagram = Diagram::new(&sample_points(), square()).unwrap();

        for circle in diagram.circles().unwrap() {
            assert!(circle.radius > 0.0);
            let nearest = diagram
                .site_coords()
                .iter()
                .filter(|&&c| c != circle.center)
                .map(|c| c.distance(circle.center))
                .fold(f64::INFINITY, f64::min);
            assert_relative_eq!(circle.radius, nearest * 0.5, epsilon = 1e-12);
        }
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_nearest_site() {
        let diagram = Diagram::new(&sample_points(), square()).unwrap();
        assert_eq!(diagram.nearest_site(Point::new(8.0, 2.0)).unwrap(), 1);
        assert_eq!(diagram.nearest_site(Point::new(4.2, 4.4)).unwrap(), 2);
    }

    #[test]
    fn test_dispose() {
        let mut diagram = Diagram::new(&sample_points(), square()).unwrap();
        diagram.compute_regions().unwrap();
        diagram.dispose();

        assert!(diagram.is_disposed());
        assert_eq!(diagram.site_count(), 0);
        assert!(diagram.edges().is_empty());
        assert!(matches!(diagram.region(0), Err(VoronoiError::Disposed)));
        assert!(matches!(diagram.hull_sites(), Err(VoronoiError::Disposed)));
        assert!(matches!(diagram.regions(), Err(VoronoiError::Disposed)));
        assert!(matches!(diagram.compute_regions(), Err(VoronoiError::Disposed)));
        assert!(matches!(
            diagram.traverse_bfs(&[], |_: &mut Visit<'_, ()>| {}),
            Err(VoronoiError::Disposed)
        ));
        assert!(matches!(
            diagram.traverse_bfs_from_first(|_: &mut Visit<'_, ()>| {}),
            Err(VoronoiError::Disposed)
        ));
        assert!(matches!(
            diagram.compute_voronoi_diagram(),
            Err(VoronoiError::Disposed)
        ));
        assert!(matches!(diagram.relax(1), Err(VoronoiError::Disposed)));
    }
}
