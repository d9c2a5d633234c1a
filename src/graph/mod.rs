//! Graph model: integral circulant graph construction and adjacency.
//!
//! The vertex set and adjacency relation are derived once from an
//! `(order, divisor set)` pair using the integral-circulant-graph rule and
//! stored in a petgraph topology that never changes for the graph's
//! lifetime.

mod circulant;
mod vertex;

pub use circulant::{CirculantGraph, InvalidConfiguration};
pub use vertex::{VertexId, VertexState};
