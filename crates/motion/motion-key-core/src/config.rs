//! Geometric tolerances for position resolution.

use serde::{Deserialize, Serialize};

/// Tolerances used by [`crate::PositionResolver`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hit-test half extent, in layout units, around a resolved keyframe position.
    pub selection_slope: f32,
    /// Start/end center distances below this make the path frame degenerate.
    pub min_path_distance: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            selection_slope: 20.0,
            min_path_distance: 1e-4,
        }
    }
}
