//! Circulant Layout - WASM Module
//!
//! Core graph model and force-directed layout engine for an interactive
//! integral-circulant-graph viewer. It is compiled to WebAssembly and
//! exposes a JavaScript-friendly per-frame API via wasm-bindgen; the host
//! owns the scene, meshes, input devices, and render loop, and this module
//! owns the graph and the physics.
//!
//! # Architecture
//!
//! - `graph`: Circulant graph construction and adjacency (petgraph topology)
//! - `layout`: Force computation, relaxation stepping, edge placement
//! - `input`: Grab session mapping input devices to held vertices
//!
//! # Frame contract
//!
//! The host is the sole caller and runs single-threaded: each frame it
//! forwards grab/release/drag events, calls [`CirculantLayoutWasm::step`]
//! if the layout is running, then reads positions and edge placements back.
//! Overrides and frozen flags must not change while a step is in flight.

use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

pub mod graph;
pub mod input;
pub mod layout;

use graph::CirculantGraph;
use input::InputSession;
use layout::{LayoutConfig, LayoutEngine, edge_placements};

/// Input devices the facade tracks: an XR controller pair.
const DEVICE_COUNT: usize = 2;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Main entry point for the layout engine.
///
/// Wraps the internal engine and input session and provides the public API
/// exposed to JavaScript.
#[wasm_bindgen]
pub struct CirculantLayoutWasm {
    engine: LayoutEngine,
    session: InputSession,
}

#[wasm_bindgen]
impl CirculantLayoutWasm {
    /// Build the graph and layout engine.
    ///
    /// # Arguments
    ///
    /// * `order` - Number of vertices (>= 1)
    /// * `divisors` - Non-empty divisor set, each in `1..=order`
    /// * `volume` - Cube of the intended spatial spread
    ///
    /// Fails with the construction error message when the parameters are
    /// rejected.
    #[wasm_bindgen(constructor)]
    pub fn new(order: u32, divisors: &[u32], volume: f32) -> Result<CirculantLayoutWasm, JsError> {
        let config = LayoutConfig {
            volume,
            ..LayoutConfig::default()
        };
        Self::build(order, divisors, config)
    }

    /// Build with a configuration object `{ volume?, damping? }`.
    ///
    /// Missing fields take their documented defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(
        order: u32,
        divisors: &[u32],
        config: JsValue,
    ) -> Result<CirculantLayoutWasm, JsError> {
        let config: LayoutConfig =
            serde_wasm_bindgen::from_value(config).map_err(|e| JsError::new(&e.to_string()))?;
        Self::build(order, divisors, config)
    }

    fn build(
        order: u32,
        divisors: &[u32],
        config: LayoutConfig,
    ) -> Result<CirculantLayoutWasm, JsError> {
        if !config.volume.is_finite() || config.volume <= 0.0 {
            return Err(JsError::new("layout volume must be a positive finite number"));
        }
        let graph =
            CirculantGraph::build(order, divisors).map_err(|e| JsError::new(&e.to_string()))?;
        let engine = LayoutEngine::new(graph, config);

        web_sys::console::log_1(
            &format!(
                "circulant layout: order={}, size={}, optimal distance={:.4}",
                engine.order(),
                engine.graph().size(),
                engine.optimal_distance()
            )
            .into(),
        );

        Ok(CirculantLayoutWasm {
            engine,
            session: InputSession::new(DEVICE_COUNT),
        })
    }

    // =========================================================================
    // Graph Queries
    // =========================================================================

    /// Number of vertices.
    pub fn order(&self) -> u32 {
        self.engine.order()
    }

    /// Number of edges.
    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> u32 {
        self.engine.graph().size()
    }

    /// Whether two vertices are adjacent.
    #[wasm_bindgen(js_name = isAdjacent)]
    pub fn is_adjacent(&self, i: u32, j: u32) -> bool {
        self.engine.graph().is_adjacent(i, j)
    }

    /// Neighbors of a vertex.
    ///
    /// Returns a Uint32Array of vertex indices.
    #[wasm_bindgen(js_name = getNeighbors)]
    pub fn get_neighbors(&self, i: u32) -> Vec<u32> {
        self.engine.graph().neighbors(i)
    }

    /// Target inter-vertex spacing.
    #[wasm_bindgen(js_name = optimalDistance)]
    pub fn optimal_distance(&self) -> f32 {
        self.engine.optimal_distance()
    }

    // =========================================================================
    // Placement
    // =========================================================================

    /// Place all vertices evenly on a circle in the XY plane around
    /// `(0, centerY)` at the given depth.
    #[wasm_bindgen(js_name = placeOnCircle)]
    pub fn place_on_circle(&mut self, radius: f32, center_y: f32, depth: f32) {
        self.engine.place_on_circle(radius, center_y, depth);
    }

    /// Set a vertex's stored position.
    #[wasm_bindgen(js_name = setPosition)]
    pub fn set_position(&mut self, i: u32, x: f32, y: f32, z: f32) {
        self.engine.set_position(i, [x, y, z]);
    }

    /// A vertex's effective position `[x, y, z]`: the override while one is
    /// set, the stored position otherwise.
    #[wasm_bindgen(js_name = effectivePosition)]
    pub fn effective_position(&self, i: u32) -> Option<Vec<f32>> {
        self.engine.effective_position(i).map(|p| p.to_vec())
    }

    // =========================================================================
    // Per-Frame Simulation API
    // =========================================================================

    /// Freeze or unfreeze a vertex.
    #[wasm_bindgen(js_name = setFrozen)]
    pub fn set_frozen(&mut self, i: u32, frozen: bool) {
        self.engine.set_frozen(i, frozen);
    }

    /// Check if a vertex is frozen.
    #[wasm_bindgen(js_name = isFrozen)]
    pub fn is_frozen(&self, i: u32) -> bool {
        self.engine.is_frozen(i)
    }

    /// Set a vertex's position override.
    #[wasm_bindgen(js_name = setPositionOverride)]
    pub fn set_position_override(&mut self, i: u32, x: f32, y: f32, z: f32) {
        self.engine.set_position_override(i, Some([x, y, z]));
    }

    /// Clear a vertex's position override.
    #[wasm_bindgen(js_name = clearPositionOverride)]
    pub fn clear_position_override(&mut self, i: u32) {
        self.engine.set_position_override(i, None);
    }

    /// Run one relaxation iteration.
    ///
    /// The host gates this on [`isRunning`](Self::is_running) each frame.
    pub fn step(&mut self) {
        self.engine.step();
    }

    /// Set whether the layout should run.
    #[wasm_bindgen(js_name = setRunning)]
    pub fn set_running(&mut self, running: bool) {
        self.engine.set_running(running);
    }

    /// Whether the layout is running.
    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    // =========================================================================
    // Grab API
    // =========================================================================

    /// Start holding a vertex with an input device.
    #[wasm_bindgen(js_name = beginGrab)]
    pub fn begin_grab(&mut self, device: usize, vertex: u32) {
        self.session.grab(device, vertex, &mut self.engine);
    }

    /// Drag the device's held vertex to a new point.
    #[wasm_bindgen(js_name = moveGrabbed)]
    pub fn move_grabbed(&mut self, device: usize, x: f32, y: f32, z: f32) {
        self.session.move_grabbed(device, [x, y, z], &mut self.engine);
    }

    /// Stop holding a device's vertex, leaving it where the device left it.
    #[wasm_bindgen(js_name = endGrab)]
    pub fn end_grab(&mut self, device: usize) {
        self.session.release(device, &mut self.engine);
    }

    /// The vertex a device currently holds, if any.
    #[wasm_bindgen(js_name = grabbedVertex)]
    pub fn grabbed_vertex(&self, device: usize) -> Option<u32> {
        self.session.grabbed(device)
    }

    // =========================================================================
    // Position Buffer Access (Zero-Copy)
    // =========================================================================

    /// Get a zero-copy view of X positions.
    ///
    /// # Safety
    ///
    /// The returned view is invalidated if any Rust allocation occurs.
    /// Use immediately for mesh updates, do not store.
    #[wasm_bindgen(js_name = getPositionsXView)]
    pub fn get_positions_x_view(&self) -> Float32Array {
        unsafe { Float32Array::view(self.engine.positions_x()) }
    }

    /// Get a zero-copy view of Y positions.
    ///
    /// # Safety
    ///
    /// The returned view is invalidated if any Rust allocation occurs.
    /// Use immediately for mesh updates, do not store.
    #[wasm_bindgen(js_name = getPositionsYView)]
    pub fn get_positions_y_view(&self) -> Float32Array {
        unsafe { Float32Array::view(self.engine.positions_y()) }
    }

    /// Get a zero-copy view of Z positions.
    ///
    /// # Safety
    ///
    /// The returned view is invalidated if any Rust allocation occurs.
    /// Use immediately for mesh updates, do not store.
    #[wasm_bindgen(js_name = getPositionsZView)]
    pub fn get_positions_z_view(&self) -> Float32Array {
        unsafe { Float32Array::view(self.engine.positions_z()) }
    }

    /// Get a pointer to the X positions buffer.
    ///
    /// Used for creating views after WASM memory growth.
    #[wasm_bindgen(js_name = positionsXPtr)]
    pub fn positions_x_ptr(&self) -> *const f32 {
        self.engine.positions_x().as_ptr()
    }

    /// Get a pointer to the Y positions buffer.
    #[wasm_bindgen(js_name = positionsYPtr)]
    pub fn positions_y_ptr(&self) -> *const f32 {
        self.engine.positions_y().as_ptr()
    }

    /// Get a pointer to the Z positions buffer.
    #[wasm_bindgen(js_name = positionsZPtr)]
    pub fn positions_z_ptr(&self) -> *const f32 {
        self.engine.positions_z().as_ptr()
    }

    /// Get the length of each positions buffer.
    #[wasm_bindgen(js_name = positionsLen)]
    pub fn positions_len(&self) -> usize {
        self.engine.positions_x().len()
    }

    // =========================================================================
    // Edge Read-Back
    // =========================================================================

    /// Endpoint vertex indices of every edge as flat pairs
    /// `[src0, tgt0, src1, tgt1, ...]`.
    #[wasm_bindgen(js_name = edgePairs)]
    pub fn edge_pairs(&self) -> Vec<u32> {
        let pairs = self.engine.graph().edge_pairs();
        let mut flat = Vec::with_capacity(pairs.len() * 2);
        for (source, target) in pairs {
            flat.push(source);
            flat.push(target);
        }
        flat
    }

    /// Placement of every edge's segment mesh, computed from current
    /// effective positions.
    ///
    /// Returns an array of `{ source, target, midpoint, length, look_at }`
    /// objects. The host must apply scale, then position, then orientation.
    #[wasm_bindgen(js_name = edgePlacements)]
    pub fn edge_placements(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&edge_placements(&self.engine))
            .map_err(|e| JsError::new(&e.to_string()))
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::layout::edge_placements;

    /// End-to-end relaxation from the viewer's startup configuration:
    /// order 14, divisors {1, 2}, volume 0.6^3, circular placement, one
    /// step per frame for 100 frames. Convergence is empirical: the mean
    /// per-step total squared displacement over the last 50 steps must not
    /// exceed the first 50, and no position may go non-finite.
    #[test]
    fn test_layout_converges_from_circular_placement() {
        let graph = CirculantGraph::build(14, &[1, 2]).unwrap();
        let mut engine = LayoutEngine::new(graph, LayoutConfig::default());
        engine.place_on_circle(0.3, 1.0, -0.5);

        let order = engine.order();
        let mut prev: Vec<[f32; 3]> = (0..order).map(|i| engine.position(i).unwrap()).collect();
        let mut displacements = Vec::with_capacity(100);

        for _ in 0..100 {
            engine.step();

            let mut total = 0.0_f32;
            for i in 0..order {
                let p = engine.position(i).unwrap();
                assert!(p.iter().all(|c| c.is_finite()), "non-finite position {p:?}");
                let q = prev[i as usize];
                let (dx, dy, dz) = (p[0] - q[0], p[1] - q[1], p[2] - q[2]);
                total += dx * dx + dy * dy + dz * dz;
                prev[i as usize] = p;
            }
            displacements.push(total);
        }

        let early: f32 = displacements[..50].iter().sum::<f32>() / 50.0;
        let late: f32 = displacements[50..].iter().sum::<f32>() / 50.0;
        assert!(
            late <= early,
            "layout diverging: early mean {early}, late mean {late}"
        );
    }

    /// A frame loop with one vertex held by a device: the engine keeps
    /// relaxing the free vertices around the manipulated location, edge
    /// placements stay well-formed every frame, and releasing leaves the
    /// vertex where the device dropped it.
    #[test]
    fn test_frame_loop_with_grab() {
        let graph = CirculantGraph::build(14, &[1, 2]).unwrap();
        let size = graph.size() as usize;
        let mut engine = LayoutEngine::new(graph, LayoutConfig::default());
        engine.place_on_circle(0.3, 1.0, -0.5);
        let mut session = InputSession::new(DEVICE_COUNT);

        session.grab(0, 4, &mut engine);
        let held_start = engine.position(4).unwrap();

        for frame in 0..10 {
            let pose = [0.0, 1.0 + frame as f32 * 0.01, -0.4];
            session.move_grabbed(0, pose, &mut engine);
            if engine.is_running() {
                engine.step();
            }
            let placements = edge_placements(&engine);
            assert_eq!(placements.len(), size);
            for p in &placements {
                assert!(p.length.is_finite());
            }
        }

        // The held vertex's stored position never moved while frozen.
        assert_eq!(engine.position(4).unwrap(), held_start);

        session.release(0, &mut engine);
        assert!(!engine.is_frozen(4));
        let dropped = engine.position(4).unwrap();
        assert!((dropped[1] - 1.09).abs() < 1e-4);
        assert_eq!(dropped[0], 0.0);
    }

    /// Pausing stops vertex motion entirely; overrides still show through
    /// effective positions for edge read-back.
    #[test]
    fn test_paused_layout_holds_positions() {
        let graph = CirculantGraph::build(14, &[1, 2]).unwrap();
        let mut engine = LayoutEngine::new(graph, LayoutConfig::default());
        engine.place_on_circle(0.3, 1.0, -0.5);

        engine.set_running(false);
        let before: Vec<_> = (0..14).map(|i| engine.position(i).unwrap()).collect();

        for _ in 0..5 {
            if engine.is_running() {
                engine.step();
            }
            engine.set_position_override(2, Some([0.0, 1.5, -0.5]));
            let placements = edge_placements(&engine);
            assert!(!placements.is_empty());
        }

        let after: Vec<_> = (0..14).map(|i| engine.position(i).unwrap()).collect();
        assert_eq!(before, after);
        assert_eq!(engine.effective_position(2), Some([0.0, 1.5, -0.5]));
    }
}
