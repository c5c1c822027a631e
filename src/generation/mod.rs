//! Diagram generation from a configuration
//!
//! Places seeded random points in the configured bounds, builds their
//! diagram and optionally relaxes it with Lloyd's algorithm.

mod lloyd;
mod points;

pub use lloyd::{lloyd_relaxation, lloyd_relaxation_with_options, LloydOptions};
pub use points::random_points;

use crate::config::DiagramConfig;
use crate::diagram::Diagram;
use crate::error::Result;

/// Generate a diagram of `config.point_count` random points
///
/// # Errors
///
/// Returns `InvalidConfig` for an invalid configuration and `InvalidInput`
/// when `point_count` is 0.
///
/// # Example
///
/// ```
/// use rust_voronoi_regions::*;
///
/// let config = DiagramConfigBuilder::new()
///     .seed(3)
///     .point_count(40)
///     .lloyd_iterations(2)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let diagram = generate_diagram(&config).unwrap();
/// assert!(diagram.site_count() <= 40);
/// ```
pub fn generate_diagram(config: &DiagramConfig) -> Result<Diagram> {
    config.validate()?;

    // Step 1: Random points in the bounds
    let points = points::random_points(config.point_count, &config.bounds, config.seed);

    // Step 2: Build the diagram
    let diagram = Diagram::with_config(&points, config)?;

    // Step 3: Lloyd's relaxation with convergence detection
    if config.lloyd_iterations > 0 {
        let options = LloydOptions {
            max_iterations: config.lloyd_iterations,
            convergence_threshold: config.lloyd_convergence,
        };
        lloyd::lloyd_relaxation_with_options(&diagram, options)
    } else {
        Ok(diagram)
    }
}
