//! Force-directed layout of the circulant graph.
//!
//! The engine runs one relaxation iteration per host frame, moving vertices
//! toward an equilibrium spacing derived from the graph order and a
//! configured layout volume. Edge placements are derived read-back records
//! for the host's segment meshes.

pub mod engine;
pub mod force;
pub mod placement;

pub use engine::LayoutEngine;
pub use force::LayoutConfig;
pub use placement::{EdgePlacement, edge_placements};
