//! LayoutEngine - per-vertex layout state and the relaxation step.
//!
//! The engine owns the graph plus SoA (Structure of Arrays) buffers for
//! positions and per-step force accumulators, in 3D. SoA keeps the position
//! buffers contiguous for zero-copy hand-off to the render host.
//!
//! One `step()` call performs a single O(order^2) relaxation iteration.
//! The host loop drives exactly one step per frame while the engine is
//! running; repeated steps converge the layout toward lower total potential
//! energy, with no internal termination test.

use std::f32::consts::TAU;

use crate::graph::{CirculantGraph, VertexState};

use super::force::{self, LayoutConfig};

/// The force-directed layout engine.
///
/// This struct manages:
/// - The circulant graph topology (immutable)
/// - Position and force-accumulator buffers in SoA layout
/// - Per-vertex frozen flags and externally driven position overrides
/// - The run/pause flag the host gates its step calls on
///
/// All force and distance computations go through effective positions, so a
/// vertex held by an input device participates at its manipulated location
/// without the engine owning any manipulation logic.
pub struct LayoutEngine {
    /// Graph topology and adjacency.
    graph: CirculantGraph,

    /// Layout tuning parameters.
    config: LayoutConfig,

    /// Target inter-vertex spacing, derived once from order and volume.
    optimal_distance: f32,

    /// X positions (SoA layout)
    pos_x: Vec<f32>,

    /// Y positions (SoA layout)
    pos_y: Vec<f32>,

    /// Z positions (SoA layout)
    pos_z: Vec<f32>,

    /// X force accumulators, zeroed at the start of every step
    force_x: Vec<f32>,

    /// Y force accumulators
    force_y: Vec<f32>,

    /// Z force accumulators
    force_z: Vec<f32>,

    /// Externally supplied position overrides, None when not held.
    overrides: Vec<Option<[f32; 3]>>,

    /// Vertex states (frozen flag).
    states: Vec<VertexState>,

    /// Whether the host should run steps this frame.
    running: bool,
}

impl LayoutEngine {
    /// Create an engine for the given graph.
    ///
    /// All vertices start at the origin with zero force; callers seed real
    /// positions via [`place_on_circle`](Self::place_on_circle) or
    /// [`set_position`](Self::set_position).
    pub fn new(graph: CirculantGraph, config: LayoutConfig) -> Self {
        let order = graph.order() as usize;
        let optimal_distance = force::optimal_distance(config.volume, graph.order());
        Self {
            graph,
            config,
            optimal_distance,
            pos_x: vec![0.0; order],
            pos_y: vec![0.0; order],
            pos_z: vec![0.0; order],
            force_x: vec![0.0; order],
            force_y: vec![0.0; order],
            force_z: vec![0.0; order],
            overrides: vec![None; order],
            states: vec![VertexState::new(); order],
            running: true,
        }
    }

    /// The underlying graph.
    pub fn graph(&self) -> &CirculantGraph {
        &self.graph
    }

    /// Number of vertices.
    pub fn order(&self) -> u32 {
        self.graph.order()
    }

    /// Target inter-vertex spacing.
    pub fn optimal_distance(&self) -> f32 {
        self.optimal_distance
    }

    /// The active configuration.
    pub fn config(&self) -> LayoutConfig {
        self.config
    }

    // =========================================================================
    // Placement
    // =========================================================================

    /// Place all vertices evenly on a circle in the XY plane.
    ///
    /// The circle has the given radius around `(0, center_y)` at the given
    /// depth, independent of graph order.
    pub fn place_on_circle(&mut self, radius: f32, center_y: f32, depth: f32) {
        let order = self.pos_x.len();
        for i in 0..order {
            let angle = TAU * i as f32 / order as f32;
            self.pos_x[i] = radius * angle.cos();
            self.pos_y[i] = center_y + radius * angle.sin();
            self.pos_z[i] = depth;
        }
    }

    /// Get a vertex's stored position (ignoring any override).
    pub fn position(&self, i: u32) -> Option<[f32; 3]> {
        let i = i as usize;
        if i >= self.pos_x.len() {
            return None;
        }
        Some([self.pos_x[i], self.pos_y[i], self.pos_z[i]])
    }

    /// Set a vertex's stored position. Out-of-range indices are ignored.
    pub fn set_position(&mut self, i: u32, position: [f32; 3]) {
        let i = i as usize;
        if i < self.pos_x.len() {
            self.pos_x[i] = position[0];
            self.pos_y[i] = position[1];
            self.pos_z[i] = position[2];
        }
    }

    // =========================================================================
    // External manipulation
    // =========================================================================

    /// A vertex's position for force computation and read-back: the
    /// override while one is set, the stored position otherwise.
    pub fn effective_position(&self, i: u32) -> Option<[f32; 3]> {
        if (i as usize) >= self.pos_x.len() {
            return None;
        }
        Some(self.effective(i as usize))
    }

    /// Set or clear a vertex's position override.
    pub fn set_position_override(&mut self, i: u32, position: Option<[f32; 3]>) {
        let i = i as usize;
        if i < self.overrides.len() {
            self.overrides[i] = position;
        }
    }

    /// Get a vertex's current position override, if any.
    pub fn position_override(&self, i: u32) -> Option<[f32; 3]> {
        self.overrides.get(i as usize).copied().flatten()
    }

    /// Freeze or unfreeze a vertex.
    ///
    /// Frozen vertices are excluded from force integration but still act as
    /// force sources for others.
    pub fn set_frozen(&mut self, i: u32, frozen: bool) {
        if let Some(state) = self.states.get_mut(i as usize) {
            state.set_frozen(frozen);
        }
    }

    /// Check if a vertex is frozen.
    pub fn is_frozen(&self, i: u32) -> bool {
        self.states
            .get(i as usize)
            .map(|s| s.is_frozen())
            .unwrap_or(false)
    }

    // =========================================================================
    // Run/pause
    // =========================================================================

    /// Set whether the host loop should step the layout this frame.
    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Whether the layout is running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    // =========================================================================
    // Relaxation
    // =========================================================================

    /// Run one relaxation iteration.
    ///
    /// Accumulates attractive forces between adjacent vertices and repulsive
    /// forces between all pairs, from effective positions, then integrates
    /// damped forces into the positions of non-frozen vertices. Coincident
    /// vertices contribute nothing to each other, so the step never produces
    /// non-finite state. Infallible.
    pub fn step(&mut self) {
        let order = self.pos_x.len();

        for i in 0..order {
            self.force_x[i] = 0.0;
            self.force_y[i] = 0.0;
            self.force_z[i] = 0.0;
        }

        for i in 0..order {
            if self.states[i].is_frozen() {
                continue;
            }
            let p1 = self.effective(i);

            for j in 0..order {
                if j == i {
                    continue;
                }
                let p2 = self.effective(j);

                let dx = p2[0] - p1[0];
                let dy = p2[1] - p1[1];
                let dz = p2[2] - p1[2];
                let d = (dx * dx + dy * dy + dz * dz).sqrt();
                if d == 0.0 {
                    continue;
                }
                let inv = 1.0 / d;

                if self.graph.is_adjacent(i as u32, j as u32) {
                    // Attraction pulls i toward j.
                    let fa = force::attractive(d, self.optimal_distance) * inv;
                    self.force_x[i] += dx * fa;
                    self.force_y[i] += dy * fa;
                    self.force_z[i] += dz * fa;
                }

                // Repulsion pushes i away from j, adjacent or not.
                let fr = force::repulsive(d, self.optimal_distance) * inv;
                self.force_x[i] -= dx * fr;
                self.force_y[i] -= dy * fr;
                self.force_z[i] -= dz * fr;
            }
        }

        for i in 0..order {
            if self.states[i].is_frozen() {
                continue;
            }
            self.pos_x[i] += self.force_x[i] * self.config.damping;
            self.pos_y[i] += self.force_y[i] * self.config.damping;
            self.pos_z[i] += self.force_z[i] * self.config.damping;
        }
    }

    // =========================================================================
    // Buffer Access
    // =========================================================================

    /// Get X positions slice.
    pub fn positions_x(&self) -> &[f32] {
        &self.pos_x
    }

    /// Get Y positions slice.
    pub fn positions_y(&self) -> &[f32] {
        &self.pos_y
    }

    /// Get Z positions slice.
    pub fn positions_z(&self) -> &[f32] {
        &self.pos_z
    }

    fn effective(&self, i: usize) -> [f32; 3] {
        self.overrides[i].unwrap_or([self.pos_x[i], self.pos_y[i], self.pos_z[i]])
    }
}
