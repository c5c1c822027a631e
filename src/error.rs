//! Error types for diagram construction and queries

use thiserror::Error;

/// Errors that can occur while building or querying a Voronoi diagram
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VoronoiError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Points or bounds handed to a constructor are unusable
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Generation failed due to geometry issues (numerical degeneracy)
    #[error("generation failed: {0}")]
    GenerationFailed(String),
    /// Requested site ID does not exist
    #[error("site not found: {0}")]
    SiteNotFound(usize),
    /// A query needs the site's region, which has not been computed yet
    #[error("region of site {0} has not been computed; call region() first")]
    RegionNotComputed(usize),
    /// The diagram was disposed and can no longer be queried
    #[error("diagram has been disposed")]
    Disposed,
}

/// Result type alias for voronoi operations
pub type Result<T> = std::result::Result<T, VoronoiError>;
