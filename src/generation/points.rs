//! Seeded random point placement

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::geometry::{Point, Rect};

/// Generate `count` uniformly distributed points inside `bounds`
///
/// The same seed always yields the same points.
///
/// # Arguments
///
/// * `count` - Number of points to generate
/// * `bounds` - Rectangle to place them in
/// * `seed` - Random seed
///
/// # Example
///
/// ```
/// use rust_voronoi_regions::*;
///
/// let bounds = Rect::new(-5.0, -5.0, 10.0, 10.0);
/// let points = random_points(32, &bounds, 42);
///
/// assert_eq!(points.len(), 32);
/// assert!(points.iter().all(|&p| bounds.contains(p)));
/// assert_eq!(points, random_points(32, &bounds, 42));
/// ```
pub fn random_points(count: usize, bounds: &Rect, seed: u64) -> Vec<Point> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    (0..count)
        .map(|_| {
            let x = bounds.x_min() + rng.gen::<f64>() * bounds.width;
            let y = bounds.y_min() + rng.gen::<f64>() * bounds.height;
            Point::new(x, y)
        })
        .collect()
}
