//! Input session: which vertex, if any, each input device holds.
//!
//! The session owns the grab bookkeeping so the render objects don't. Hit
//! testing and device-pose math stay with the host; it tells the session
//! which vertex a device grabbed and where the device has dragged it, and
//! the session drives the engine's frozen flags and position overrides.

use crate::layout::LayoutEngine;

/// Grab state for a fixed set of input devices.
pub struct InputSession {
    /// Per-device grabbed vertex index, None while the device holds nothing.
    grabbed: Vec<Option<u32>>,
}

impl InputSession {
    /// Create a session for the given number of input devices.
    pub fn new(device_count: usize) -> Self {
        Self {
            grabbed: vec![None; device_count],
        }
    }

    /// Number of device slots.
    pub fn device_count(&self) -> usize {
        self.grabbed.len()
    }

    /// The vertex a device currently holds, if any.
    pub fn grabbed(&self, device: usize) -> Option<u32> {
        self.grabbed.get(device).copied().flatten()
    }

    /// Start holding a vertex with a device.
    ///
    /// Freezes the vertex so the layout stops moving it. A device holding
    /// another vertex releases it first; unknown devices or vertices are
    /// ignored.
    pub fn grab(&mut self, device: usize, vertex: u32, engine: &mut LayoutEngine) {
        if device >= self.grabbed.len() || vertex >= engine.order() {
            return;
        }
        self.release(device, engine);
        self.grabbed[device] = Some(vertex);
        engine.set_frozen(vertex, true);
    }

    /// Update the held vertex's position override to the device-supplied
    /// point. No-op while the device holds nothing.
    pub fn move_grabbed(&mut self, device: usize, position: [f32; 3], engine: &mut LayoutEngine) {
        if let Some(vertex) = self.grabbed(device) {
            engine.set_position_override(vertex, Some(position));
        }
    }

    /// Stop holding a device's vertex.
    ///
    /// The last override becomes the vertex's stored position before the
    /// override is cleared, so the vertex stays where the device left it,
    /// then the vertex is unfrozen.
    pub fn release(&mut self, device: usize, engine: &mut LayoutEngine) {
        let Some(slot) = self.grabbed.get_mut(device) else {
            return;
        };
        if let Some(vertex) = slot.take() {
            if let Some(position) = engine.position_override(vertex) {
                engine.set_position(vertex, position);
            }
            engine.set_position_override(vertex, None);
            engine.set_frozen(vertex, false);
        }
    }
}
