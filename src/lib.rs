//! Bounded 2D Voronoi regions for map partitioning
//!
//! A standalone library for building Voronoi diagrams (and their Delaunay
//! duals) with Fortune's sweep, clipped to a rectangle. On top of the diagram
//! it offers Lloyd's relaxation, Kruskal spanning trees and breadth-first
//! traversal of the cell adjacency graph.
//!
//! # Quick Start
//!
//! ```rust
//! use rust_voronoi_regions::*;
//!
//! // Generate a relaxed random diagram
//! let config = DiagramConfigBuilder::new()
//!     .seed(42)
//!     .bounds(Rect::from_size(640.0, 480.0)).unwrap()
//!     .point_count(200)
//!     .lloyd_iterations(2).unwrap()
//!     .build().unwrap();
//!
//! let diagram = generate_diagram(&config).unwrap();
//!
//! // Query regions and their neighbours
//! let polygon = diagram.region(0).unwrap();
//! let neighbors = diagram.neighbor_sites(0).unwrap();
//! println!("Site 0: {} corners, {} neighbours", polygon.len(), neighbors.len());
//!
//! // Or build from explicit points
//! let points = [DVec2::new(1.0, 1.0), DVec2::new(4.0, 2.0), DVec2::new(2.0, 4.0)];
//! let diagram = Diagram::new(&points, Rect::from_size(5.0, 5.0)).unwrap();
//! let tree = diagram.spanning_tree(KruskalType::Minimum).unwrap();
//! assert_eq!(tree.len(), 2);
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-site lookups using KD-tree
//! - `serde`: Enables serialization support for configuration and geometry

// Modules
pub mod error;
pub mod config;
pub mod geometry;
pub mod edge;
mod sweep;
pub mod region;
pub mod site;
pub mod diagram;
pub mod kruskal;
pub mod traversal;
pub mod generation;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{VoronoiError, Result};
pub use config::{DiagramConfig, DiagramConfigBuilder, DEFAULT_EPSILON};
pub use geometry::{Circle, LineSegment, Point, Rect, Winding};
pub use edge::{Edge, Side};
pub use region::Region;
pub use site::Site;
pub use diagram::Diagram;
pub use kruskal::{kruskal, KruskalType};
pub use traversal::{hull_distances, traverse, TraversalNode, Visit, VoronoiBfs};
pub use generation::{generate_diagram, lloyd_relaxation, lloyd_relaxation_with_options, random_points, LloydOptions};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
