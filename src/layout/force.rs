//! Force laws and layout configuration.
//!
//! The relaxation uses the classic pair of laws: attraction grows with the
//! square of the distance, repulsion falls off with its inverse, and both
//! are scaled around a single `optimal distance` at which they balance. The
//! optimal distance is derived from the graph order and a caller-chosen
//! layout volume, so graphs of different orders spread over the same space.

use serde::{Deserialize, Serialize};

/// Default layout volume: a fixed 0.6-unit spread, cubed.
pub const DEFAULT_VOLUME: f32 = 0.6 * 0.6 * 0.6;

/// Default damping applied to accumulated forces before integration.
///
/// Tunable convergence-speed vs stability constant.
pub const DEFAULT_DAMPING: f32 = 0.01;

/// Configuration for the layout engine.
///
/// Deserializable with per-field defaults so a host can pass a partial
/// config object.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Cube of the intended spatial spread, positive. The optimal
    /// inter-vertex distance is `(volume / order)^(1/3)`.
    pub volume: f32,
    /// Scale applied to each vertex's accumulated force before it is added
    /// to the position.
    pub damping: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            damping: DEFAULT_DAMPING,
        }
    }
}

impl LayoutConfig {
    /// Derive the volume from an outline width (the width, cubed).
    pub fn with_outline_width(width: f32) -> Self {
        Self {
            volume: width * width * width,
            ..Self::default()
        }
    }
}

/// Target inter-vertex spacing for a graph of the given order laid out in
/// the given volume.
pub fn optimal_distance(volume: f32, order: u32) -> f32 {
    (volume / order as f32).cbrt()
}

/// Attractive force magnitude between adjacent vertices at `distance`.
pub fn attractive(distance: f32, optimal: f32) -> f32 {
    distance * distance / optimal
}

/// Repulsive force magnitude between any two vertices at `distance`.
///
/// Coincident vertices repel with zero magnitude rather than dividing by
/// zero.
pub fn repulsive(distance: f32, optimal: f32) -> f32 {
    if distance > 0.0 {
        optimal * optimal / distance
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimal_distance() {
        // volume 0.6^3, order 14: (0.216 / 14)^(1/3)
        let d = optimal_distance(DEFAULT_VOLUME, 14);
        assert!((d - 0.2489).abs() < 1e-3);
        assert!(d > 0.0);
    }

    #[test]
    fn test_outline_width_preset() {
        let config = LayoutConfig::with_outline_width(0.3);
        assert!((config.volume - 0.027).abs() < 1e-6);
        assert_eq!(config.damping, DEFAULT_DAMPING);
    }

    #[test]
    fn test_attractive_monotonic() {
        let optimal = 0.25;
        let mut prev = attractive(0.01, optimal);
        for i in 2..100 {
            let d = i as f32 * 0.01;
            let f = attractive(d, optimal);
            assert!(f > prev, "attractive not increasing at d = {d}");
            prev = f;
        }
    }

    #[test]
    fn test_repulsive_strictly_decreasing() {
        let optimal = 0.25;
        let mut prev = repulsive(0.01, optimal);
        for i in 2..100 {
            let d = i as f32 * 0.01;
            let f = repulsive(d, optimal);
            assert!(f < prev, "repulsive not decreasing at d = {d}");
            assert!(f > 0.0);
            prev = f;
        }
    }

    #[test]
    fn test_repulsive_zero_distance_guard() {
        assert_eq!(repulsive(0.0, 0.25), 0.0);
    }

    #[test]
    fn test_forces_balance_at_optimal_distance() {
        let optimal = 0.25;
        let a = attractive(optimal, optimal);
        let r = repulsive(optimal, optimal);
        assert!((a - r).abs() < 1e-6);
    }
}
