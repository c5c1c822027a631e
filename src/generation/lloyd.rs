//! Lloyd's Relaxation for uniform site distribution
//!
//! Lloyd's Relaxation iteratively improves the uniformity of the sites by
//! moving each one to the centroid of its clipped region and rebuilding the
//! diagram.

use std::time::Instant;

use log::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::diagram::Diagram;
use crate::error::{Result, VoronoiError};
use crate::geometry::{centroid, Point};

/// Options for Lloyd's relaxation algorithm
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LloydOptions {
    /// Maximum number of iterations to run
    pub max_iterations: usize,
    /// Convergence threshold as a fraction of the bounds diagonal: stop when
    /// the largest site displacement of an iteration is below it.
    /// Set to 0.0 to disable early termination
    pub convergence_threshold: f64,
}

impl Default for LloydOptions {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            convergence_threshold: 0.01,
        }
    }
}

/// Apply Lloyd's Relaxation to a diagram
///
/// Runs exactly `iterations` rounds (no early termination). The input diagram
/// is left untouched; the result is built with the same configuration.
///
/// # Arguments
///
/// * `diagram` - Diagram to relax
/// * `iterations` - Number of relaxation iterations
///
/// # Errors
///
/// Returns `Disposed` for a disposed diagram, or any error of rebuilding.
pub fn lloyd_relaxation(diagram: &Diagram, iterations: usize) -> Result<Diagram> {
    let options = LloydOptions {
        max_iterations: iterations,
        convergence_threshold: 0.0,
    };
    lloyd_relaxation_with_options(diagram, options)
}

/// Apply Lloyd's Relaxation with custom options
///
/// # Algorithm
///
/// For each iteration:
/// 1. Compute every region of the current diagram
/// 2. Replace each site by the area-weighted centroid of its region,
///    dropping sites whose region is empty
/// 3. Rebuild the diagram from the moved sites
/// 4. Stop early once no site moved further than the threshold
pub fn lloyd_relaxation_with_options(diagram: &Diagram, options: LloydOptions) -> Result<Diagram> {
    if diagram.is_disposed() {
        return Err(VoronoiError::Disposed);
    }
    let config = *diagram.config();
    let convergence_threshold = options.convergence_threshold * config.bounds.diagonal();
    let total_start = Instant::now();

    debug!(
        "Lloyd starting: {} sites, max {} iterations, threshold {:.4} (abs: {:.4})",
        diagram.site_count(),
        options.max_iterations,
        options.convergence_threshold,
        convergence_threshold
    );

    let mut current = diagram.clone();
    let mut iterations_run = 0;
    let mut converged = false;

    for iteration in 0..options.max_iterations {
        let iter_start = Instant::now();

        let (points, max_displacement) = centroids(&current)?;
        let regions_time = iter_start.elapsed();

        current = Diagram::with_config(&points, &config)?;
        iterations_run = iteration + 1;

        debug!(
            "Lloyd iter {}: regions={:?}, total={:?}, max_disp={:.4}",
            iteration + 1,
            regions_time,
            iter_start.elapsed(),
            max_displacement
        );

        if convergence_threshold > 0.0 && max_displacement < convergence_threshold {
            converged = true;
            debug!(
                "Lloyd converged at iteration {} (max_disp {:.4} < threshold {:.4})",
                iteration + 1,
                max_displacement,
                convergence_threshold
            );
            break;
        }
    }

    debug!(
        "Lloyd finished: {} iterations (of max {}), converged={}, total={:?}",
        iterations_run,
        options.max_iterations,
        converged,
        total_start.elapsed()
    );

    Ok(current)
}

/// Centroid of every non-empty region, and the largest site displacement
fn centroids(diagram: &Diagram) -> Result<(Vec<Point>, f64)> {
    let mut max_displacement: f64 = 0.0;
    let mut points = Vec::with_capacity(diagram.site_count());

    for site in diagram.sites() {
        let Some(center) = centroid(diagram.region(site.id())?) else {
            continue;
        };
        max_displacement = max_displacement.max(center.distance(site.coord()));
        points.push(center);
    }

    let dropped = diagram.site_count() - points.len();
    if dropped > 0 {
        warn!("Lloyd dropped {} sites with an empty region", dropped);
    }

    Ok((points, max_displacement))
}
