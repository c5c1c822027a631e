//! Whole-diagram properties on random and hand-placed inputs

use approx::assert_relative_eq;
use rust_voronoi_regions::geometry::{polygon_area, signed_area};
use rust_voronoi_regions::*;

fn random_diagram(count: usize, seed: u64, bounds: Rect) -> Diagram {
    Diagram::new(&random_points(count, &bounds, seed), bounds).unwrap()
}

fn area_variance(diagram: &Diagram) -> f64 {
    let areas: Vec<f64> = diagram
        .regions()
        .unwrap()
        .iter()
        .map(|polygon| polygon_area(polygon))
        .collect();
    let mean = areas.iter().sum::<f64>() / areas.len() as f64;
    areas.iter().map(|a| (a - mean).powi(2)).sum::<f64>() / areas.len() as f64
}

/// Every non-empty region is a convex CCW polygon inside the bounds, and the
/// regions add up to the bounds' area
fn assert_tiles(diagram: &Diagram) {
    let bounds = diagram.bounds();
    let mut total = 0.0;
    for (id, polygon) in diagram.regions().unwrap().into_iter().enumerate() {
        if polygon.is_empty() {
            continue;
        }
        assert!(polygon.len() >= 3, "site {id}");
        assert!(signed_area(polygon) > 0.0, "site {id}");
        for i in 0..polygon.len() {
            let a = polygon[i];
            let b = polygon[(i + 1) % polygon.len()];
            let c = polygon[(i + 2) % polygon.len()];
            assert!((b - a).perp_dot(c - b) >= -1e-9, "site {id} is not convex");
            assert!(a.x >= bounds.x_min() - 1e-9 && a.x <= bounds.x_max() + 1e-9);
            assert!(a.y >= bounds.y_min() - 1e-9 && a.y <= bounds.y_max() + 1e-9);
        }
        total += polygon_area(polygon);
    }
    assert_relative_eq!(total, bounds.area(), max_relative = 1e-9);
}

#[test]
fn regions_are_convex_ccw_and_tile_the_bounds() {
    let _ = env_logger::builder().is_test(true).try_init();

    for seed in 0..5 {
        let diagram = random_diagram(120, seed, Rect::new(-20.0, 5.0, 80.0, 40.0));
        assert_eq!(diagram.site_count(), 120);
        assert!(diagram.regions().unwrap().iter().all(|p| p.len() >= 3));
        assert_tiles(&diagram);
    }
}

#[test]
fn collinear_sites_tile_the_bounds() {
    let bounds = Rect::from_size(100.0, 100.0);
    let lines: [Vec<DVec2>; 3] = [
        (0..3).map(|i| DVec2::new(50.0, 20.0 + 30.0 * i as f64)).collect(),
        (0..3).map(|i| DVec2::new(20.0 + 30.0 * i as f64, 50.0)).collect(),
        (0..6).map(|i| DVec2::new(10.0 + 15.0 * i as f64, 10.0 + 15.0 * i as f64)).collect(),
    ];
    for points in &lines {
        let diagram = Diagram::new(points, bounds).unwrap();
        assert_tiles(&diagram);
        assert!(diagram.regions().unwrap().iter().all(|p| !p.is_empty()));
    }
}

#[test]
fn edges_ending_near_a_corner_keep_the_corner() {
    let diagram = random_diagram(50, 35, Rect::from_size(100.0, 100.0));
    assert_tiles(&diagram);
}

#[test]
fn sites_outside_the_bounds() {
    let points = [
        DVec2::new(-50.0, 50.0),
        DVec2::new(50.0, 50.0),
        DVec2::new(200.0, 10.0),
        DVec2::new(40.0, 300.0),
        DVec2::new(70.0, -20.0),
    ];
    let diagram = Diagram::new(&points, Rect::from_size(100.0, 100.0)).unwrap();

    assert_tiles(&diagram);
    assert!(diagram.region(0).unwrap().is_empty());
    assert!(!diagram.hull_sites().unwrap().contains(&0));
}

#[test]
fn neighbors_are_symmetric() {
    let diagram = random_diagram(80, 11, Rect::from_size(50.0, 50.0));
    diagram.compute_regions().unwrap();

    for id in 0..diagram.site_count() {
        for n in diagram.neighbor_sites(id).unwrap() {
            assert!(diagram.neighbor_sites(n).unwrap().contains(&id));
        }
    }
}

#[test]
fn voronoi_segments_match_visible_edges() {
    let diagram = random_diagram(60, 4, Rect::from_size(30.0, 30.0));

    let segments = diagram.compute_voronoi_diagram().unwrap();
    assert_eq!(
        segments.len(),
        diagram.edges().iter().filter(|e| e.is_visible()).count()
    );
    assert!(segments.iter().all(|s| s.length() > 0.0));
}

#[test]
fn lloyd_relaxation_evens_out_areas() {
    let bounds = Rect::from_size(100.0, 100.0);
    let diagram = random_diagram(50, 2024, bounds);
    let relaxed = diagram.relax(10).unwrap();

    assert_eq!(relaxed.site_count(), 50);
    assert!(area_variance(&relaxed) < area_variance(&diagram));
}

#[test]
fn corner_sites_split_the_square() {
    let points = [
        DVec2::new(0.0, 0.0),
        DVec2::new(10.0, 0.0),
        DVec2::new(0.0, 10.0),
        DVec2::new(10.0, 10.0),
    ];
    let diagram = Diagram::new(&points, Rect::from_size(10.0, 10.0)).unwrap();

    for id in 0..4 {
        let polygon = diagram.region(id).unwrap();
        assert_eq!(polygon.len(), 4);
        assert_relative_eq!(polygon_area(polygon), 25.0, epsilon = 1e-9);
        assert!(polygon.contains(&points[id]));
        assert_eq!(diagram.neighbor_sites(id).unwrap().len(), 2);
    }
    assert_eq!(diagram.hull_sites().unwrap(), vec![0, 1, 2, 3]);
}

#[test]
fn single_site_owns_the_bounds() {
    let bounds = Rect::new(2.0, 3.0, 4.0, 5.0);
    let diagram = Diagram::new(&[DVec2::new(3.0, 4.0)], bounds).unwrap();

    let polygon = diagram.region(0).unwrap();
    assert_eq!(polygon.len(), 4);
    for corner in bounds.corners() {
        assert!(polygon.contains(&corner));
    }
    assert!(diagram.neighbor_sites(0).unwrap().is_empty());
    assert_eq!(diagram.convex_hull_sites_in_order().unwrap(), vec![0]);
    assert!(diagram.spanning_tree(KruskalType::Minimum).unwrap().is_empty());
}

#[test]
fn duplicate_points_share_a_site() {
    let points = [
        DVec2::new(3.0, 3.0),
        DVec2::new(7.0, 7.0),
        DVec2::new(3.0, 3.0),
        DVec2::new(3.0, 3.0),
    ];
    let diagram = Diagram::new(&points, Rect::from_size(10.0, 10.0)).unwrap();

    assert_eq!(diagram.site_count(), 2);
    assert_relative_eq!(polygon_area(diagram.region(0).unwrap()), 50.0, epsilon = 1e-9);
}

#[test]
fn topology_ignores_weight_seed() {
    let bounds = Rect::from_size(40.0, 40.0);
    let points = random_points(70, &bounds, 5);
    let build = |weight_seed| {
        let config = DiagramConfigBuilder::new()
            .bounds(bounds)
            .unwrap()
            .weight_seed(weight_seed)
            .build()
            .unwrap();
        Diagram::with_config(&points, &config).unwrap()
    };
    let a = build(1);
    let b = build(2);
    a.compute_regions().unwrap();
    b.compute_regions().unwrap();

    assert_ne!(a.site(0).unwrap().weight(), b.site(0).unwrap().weight());
    for id in 0..a.site_count() {
        let mut na = a.neighbor_sites(id).unwrap();
        let mut nb = b.neighbor_sites(id).unwrap();
        na.sort_unstable();
        nb.sort_unstable();
        assert_eq!(na, nb);
        assert_eq!(a.region(id).unwrap(), b.region(id).unwrap());
    }
}

#[test]
fn hull_distances_grow_inwards() {
    let bounds = Rect::from_size(60.0, 60.0);
    let diagram = random_diagram(150, 77, bounds).relax(3).unwrap();

    let distances = hull_distances(&diagram).unwrap();
    let hull = diagram.hull_sites().unwrap();
    for (id, distance) in distances.iter().enumerate() {
        let distance = distance.expect("every site is reachable");
        assert_eq!(distance == 1, hull.contains(&id));
        let closest = diagram
            .neighbor_sites(id)
            .unwrap()
            .into_iter()
            .filter_map(|n| distances[n])
            .min()
            .unwrap_or(0);
        if distance > 1 {
            assert_eq!(distance, closest + 1);
        }
    }
    assert!(distances.iter().flatten().any(|&d| d >= 3));
}

#[cfg(feature = "spatial-index")]
#[test]
fn nearest_site_lies_in_its_region() {
    let diagram = random_diagram(40, 9, Rect::from_size(20.0, 20.0));

    for probe in random_points(25, &diagram.bounds(), 10) {
        let id = diagram.nearest_site(probe).unwrap();
        let site = diagram.site(id).unwrap().coord();
        let best = diagram
            .site_coords()
            .iter()
            .map(|c| c.distance(probe))
            .fold(f64::INFINITY, f64::min);
        assert_relative_eq!(site.distance(probe), best);
    }
}
