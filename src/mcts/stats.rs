//! Search diagnostics and the per-iteration summary trail.

use serde::{Deserialize, Serialize};

/// Statistics collected during a search run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Total iterations performed.
    pub iterations: u32,

    /// Nodes expanded (added to the tree).
    pub nodes_expanded: u32,

    /// Playouts performed.
    pub simulations: u32,

    /// Total time spent searching (microseconds). Diagnostics only; timing
    /// never influences the search itself.
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate iterations per second.
    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            f64::from(self.iterations) / (self.time_us as f64 / 1_000_000.0)
        }
    }
}

/// One row of the iteration summary: how good the best witnessed fill was
/// after each iteration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    /// 1-based iteration number.
    pub iteration: u32,

    /// Highest terminal reward witnessed so far.
    pub best_reward_so_far: f64,

    /// Entries filled in the best witnessed state.
    pub entries_filled_in_best: u32,
}
