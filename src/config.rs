//! Diagram Configuration and Builder
//!
//! This module provides configuration types for deterministic diagram generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoronoiError};
use crate::geometry::Rect;

/// Default distance below which two points are considered the same
pub const DEFAULT_EPSILON: f64 = 0.005;

/// Maximum number of Lloyd iterations a configuration may request
pub const MAX_LLOYD_ITERATIONS: usize = 20;

/// Configuration for deterministic diagram generation
///
/// The same configuration always produces the identical diagram: point
/// placement, relaxation and site weights are all derived from the seeds.
///
/// # Example
///
/// ```rust
/// use rust_voronoi_regions::*;
///
/// let config = DiagramConfigBuilder::new()
///     .seed(42)
///     .point_count(250)
///     .build()
///     .unwrap();
///
/// // Config is serializable (with "serde" feature)
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: DiagramConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramConfig {
    /// Rectangle every region is clipped to
    pub bounds: Rect,

    /// Random seed for point placement
    pub seed: u64,

    /// Random seed for site weights (separate from the placement seed)
    ///
    /// This allows the same layout with a different weight assignment.
    pub weight_seed: u64,

    /// Number of random points `generate_diagram` places
    pub point_count: usize,

    /// Number of Lloyd's Relaxation iterations applied by `generate_diagram`
    ///
    /// - 0: Random cells (irregular)
    /// - 2-3: Decent uniformity
    /// - 10+: Diminishing returns
    pub lloyd_iterations: usize,

    /// Convergence threshold for Lloyd's relaxation (fraction of the bounds diagonal)
    ///
    /// Relaxation stops early when the maximum site displacement falls below
    /// this threshold multiplied by the diagonal of `bounds`.
    ///
    /// - 0.0: Disable early termination (run all iterations)
    /// - 0.01: Default
    pub lloyd_convergence: f64,

    /// Distance below which points are merged
    ///
    /// Used when dropping duplicate input points and when closing polygons.
    pub epsilon: f64,
}

impl DiagramConfig {
    /// Configuration for explicit points in `bounds`
    ///
    /// Both seeds are fixed at 0 so that diagrams built from the same points
    /// get the same site weights.
    pub fn with_bounds(bounds: Rect) -> Self {
        Self {
            bounds,
            seed: 0,
            weight_seed: 0,
            point_count: 0,
            lloyd_iterations: 0,
            lloyd_convergence: 0.01,
            epsilon: DEFAULT_EPSILON,
        }
    }

    /// Check every field against the ranges the builder enforces
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for out-of-range fields and `InvalidInput` for
    /// unusable bounds.
    pub fn validate(&self) -> Result<()> {
        self.bounds.validate()?;
        check_lloyd_iterations(self.lloyd_iterations)?;
        check_non_negative("Lloyd convergence threshold", self.lloyd_convergence)?;
        check_non_negative("epsilon", self.epsilon)?;
        Ok(())
    }
}

impl Default for DiagramConfig {
    fn default() -> Self {
        let seed = rand::random();
        Self {
            bounds: Rect::default(),
            seed,
            weight_seed: seed,
            point_count: 100,
            lloyd_iterations: 0,
            lloyd_convergence: 0.01,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

fn check_lloyd_iterations(iterations: usize) -> Result<()> {
    if iterations > MAX_LLOYD_ITERATIONS {
        return Err(VoronoiError::InvalidConfig(format!(
            "Lloyd iterations must be <= {} (got {})",
            MAX_LLOYD_ITERATIONS, iterations
        )));
    }
    Ok(())
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if !(value >= 0.0) || !value.is_finite() {
        return Err(VoronoiError::InvalidConfig(format!(
            "{} must be a finite value >= 0 (got {})",
            name, value
        )));
    }
    Ok(())
}

/// Builder for creating DiagramConfig with validation
///
/// # Example
///
/// ```rust
/// use rust_voronoi_regions::*;
///
/// // Use defaults
/// let config = DiagramConfigBuilder::new().build().unwrap();
///
/// // Customize
/// let config = DiagramConfigBuilder::new()
///     .seed(12345)
///     .bounds(Rect::new(0.0, 0.0, 640.0, 480.0))
///     .unwrap()
///     .lloyd_iterations(3)
///     .unwrap()
///     .weight_seed(67890)
///     .build()
///     .unwrap();
/// assert_eq!(config.weight_seed, 67890);
/// ```
#[derive(Debug, Clone)]
pub struct DiagramConfigBuilder {
    bounds: Rect,
    seed: Option<u64>,
    weight_seed: Option<u64>,
    point_count: usize,
    lloyd_iterations: usize,
    lloyd_convergence: f64,
    epsilon: f64,
}

impl DiagramConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - bounds: 100 x 100 at the origin
    /// - seed: Random (generated from thread_rng)
    /// - weight_seed: Same as seed
    /// - point_count: 100
    /// - lloyd_iterations: 0
    /// - lloyd_convergence: 0.01 (stop when sites move < 1% of the diagonal)
    /// - epsilon: 0.005
    pub fn new() -> Self {
        Self {
            bounds: Rect::default(),
            seed: None,
            weight_seed: None,
            point_count: 100,
            lloyd_iterations: 0,
            lloyd_convergence: 0.01,
            epsilon: DEFAULT_EPSILON,
        }
    }

    /// Set the clipping rectangle
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the rectangle is not finite or has a
    /// non-positive width or height
    pub fn bounds(mut self, bounds: Rect) -> Result<Self> {
        bounds.validate()?;
        self.bounds = bounds;
        Ok(self)
    }

    /// Set the random seed for point placement
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set a separate seed for site weights
    ///
    /// If not set, the weight seed will match the placement seed.
    pub fn weight_seed(mut self, seed: u64) -> Self {
        self.weight_seed = Some(seed);
        self
    }

    /// Set the number of random points to place
    pub fn point_count(mut self, count: usize) -> Self {
        self.point_count = count;
        self
    }

    /// Set the number of Lloyd's Relaxation iterations
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if iterations > 20 (excessive and impractical)
    pub fn lloyd_iterations(mut self, iterations: usize) -> Result<Self> {
        check_lloyd_iterations(iterations)?;
        self.lloyd_iterations = iterations;
        Ok(self)
    }

    /// Set the convergence threshold for Lloyd's relaxation
    ///
    /// The threshold is a fraction of the bounds diagonal.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if threshold is negative
    pub fn lloyd_convergence(mut self, threshold: f64) -> Result<Self> {
        check_non_negative("Lloyd convergence threshold", threshold)?;
        self.lloyd_convergence = threshold;
        Ok(self)
    }

    /// Set the merge distance for duplicate points
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if epsilon is negative
    pub fn epsilon(mut self, epsilon: f64) -> Result<Self> {
        check_non_negative("epsilon", epsilon)?;
        self.epsilon = epsilon;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    pub fn build(self) -> Result<DiagramConfig> {
        let seed = self.seed.unwrap_or_else(rand::random);
        let weight_seed = self.weight_seed.unwrap_or(seed);

        Ok(DiagramConfig {
            bounds: self.bounds,
            seed,
            weight_seed,
            point_count: self.point_count,
            lloyd_iterations: self.lloyd_iterations,
            lloyd_convergence: self.lloyd_convergence,
            epsilon: self.epsilon,
        })
    }
}

impl Default for DiagramConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = DiagramConfigBuilder::new().build().unwrap();
        assert_eq!(config.bounds, Rect::from_size(100.0, 100.0));
        assert_eq!(config.point_count, 100);
        assert_eq!(config.lloyd_iterations, 0);
        assert_eq!(config.epsilon, DEFAULT_EPSILON);
        // seed is random, weight_seed follows it
        assert_eq!(config.weight_seed, config.seed);
    }

    #[test]
    fn test_builder_custom() {
        let config = DiagramConfigBuilder::new()
            .seed(42)
            .bounds(Rect::new(-10.0, -10.0, 20.0, 30.0))
            .unwrap()
            .point_count(7)
            .lloyd_iterations(3)
            .unwrap()
            .lloyd_convergence(0.0)
            .unwrap()
            .weight_seed(99)
            .epsilon(0.0)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.weight_seed, 99);
        assert_eq!(config.point_count, 7);
        assert_eq!(config.lloyd_iterations, 3);
        assert_eq!(config.lloyd_convergence, 0.0);
        assert_eq!(config.epsilon, 0.0);
        assert_eq!(config.bounds.y_max(), 20.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_validation() {
        let result = DiagramConfigBuilder::new().lloyd_iterations(21);
        assert!(matches!(result, Err(VoronoiError::InvalidConfig(_))));

        assert!(DiagramConfigBuilder::new().lloyd_convergence(-0.1).is_err());
        assert!(DiagramConfigBuilder::new().epsilon(-1.0).is_err());
        assert!(DiagramConfigBuilder::new().epsilon(f64::NAN).is_err());

        let result = DiagramConfigBuilder::new().bounds(Rect::from_size(0.0, 10.0));
        assert!(matches!(result, Err(VoronoiError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_catches_hand_built_configs() {
        let mut config = DiagramConfig::with_bounds(Rect::from_size(10.0, 10.0));
        assert!(config.validate().is_ok());

        config.lloyd_iterations = 50;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deterministic_with_seed() {
        let config1 = DiagramConfigBuilder::new().seed(12345).build().unwrap();
        let config2 = DiagramConfigBuilder::new().seed(12345).build().unwrap();
        assert_eq!(config1, config2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialization() {
        let config = DiagramConfigBuilder::new()
            .seed(42)
            .lloyd_iterations(4)
            .unwrap()
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let restored: DiagramConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, restored);
    }
}
