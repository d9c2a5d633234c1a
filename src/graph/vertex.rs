//! Vertex identity and per-vertex state flags.
//!
//! Vertices of a circulant graph are identified by their residue index
//! `0..order`. The index doubles as the slot into the layout engine's
//! position and force buffers, so it never changes for the lifetime of
//! the graph.

use std::fmt;

/// Vertex identifier: the residue index in `0..order`.
///
/// Wraps a u32 for efficient storage and WebAssembly interop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexId(pub u32);

impl VertexId {
    /// Create a new VertexId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vertex({})", self.0)
    }
}

impl From<u32> for VertexId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<VertexId> for u32 {
    #[inline]
    fn from(id: VertexId) -> Self {
        id.0
    }
}

/// Vertex state flags packed into a single byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct VertexState {
    flags: u8,
}

impl VertexState {
    const FROZEN: u8 = 0b0000_0001;

    /// Create a new default vertex state.
    #[inline]
    pub fn new() -> Self {
        Self { flags: 0 }
    }

    /// Check if the vertex is frozen (excluded from layout integration).
    ///
    /// Frozen vertices still act as force sources for other vertices.
    #[inline]
    pub fn is_frozen(self) -> bool {
        self.flags & Self::FROZEN != 0
    }

    /// Set the frozen state.
    #[inline]
    pub fn set_frozen(&mut self, frozen: bool) {
        if frozen {
            self.flags |= Self::FROZEN;
        } else {
            self.flags &= !Self::FROZEN;
        }
    }
}
