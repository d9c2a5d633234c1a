//! Edge placement read-back for the render host.
//!
//! An edge is rendered as a unit-length segment mesh that the host scales
//! along its long axis to the inter-endpoint distance, moves to the segment
//! midpoint, and orients toward one endpoint. The host must apply those
//! three transforms in that order (scale, then position, then orientation);
//! reordering them breaks the placement.
//!
//! Placements are computed from effective endpoint positions, so they track
//! grabbed vertices, and are recomputed every frame regardless of whether
//! the layout is running.

use serde::Serialize;

use super::engine::LayoutEngine;

/// Placement of one edge's segment mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgePlacement {
    /// First endpoint vertex index.
    pub source: u32,
    /// Second endpoint vertex index.
    pub target: u32,
    /// Segment midpoint; where the mesh is positioned.
    pub midpoint: [f32; 3],
    /// Inter-endpoint distance; the long-axis scale factor.
    pub length: f32,
    /// The point the mesh's long axis is oriented toward (the source
    /// endpoint's effective position).
    pub look_at: [f32; 3],
}

/// Compute the placement of every edge from current effective positions.
pub fn edge_placements(engine: &LayoutEngine) -> Vec<EdgePlacement> {
    let pairs = engine.graph().edge_pairs();
    let mut placements = Vec::with_capacity(pairs.len());

    for (source, target) in pairs {
        let (Some(p1), Some(p2)) = (
            engine.effective_position(source),
            engine.effective_position(target),
        ) else {
            continue;
        };

        let dx = p2[0] - p1[0];
        let dy = p2[1] - p1[1];
        let dz = p2[2] - p1[2];

        placements.push(EdgePlacement {
            source,
            target,
            midpoint: [p1[0] + dx * 0.5, p1[1] + dy * 0.5, p1[2] + dz * 0.5],
            length: (dx * dx + dy * dy + dz * dz).sqrt(),
            look_at: p1,
        });
    }

    placements
}
