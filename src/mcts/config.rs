//! Search configuration parameters.

use serde::{Deserialize, Serialize};

/// Parameters of one search run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchConfig {
    /// UCB1 exploration constant (default: sqrt(2)).
    /// Higher values favor exploration over exploitation.
    pub exploration_constant: f64,

    /// Iteration budget. The budget is authoritative: the search never runs
    /// past it, and only a terminal or exhausted root stops it early.
    pub max_iterations: u32,

    /// Seed for the rollout RNG. Same seed produces identical searches.
    pub seed: u64,

    /// Stop as soon as a completely filled grid is witnessed.
    /// Off by default; the budget alone decides when to stop.
    pub stop_on_perfect: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration_constant: std::f64::consts::SQRT_2,
            max_iterations: 1000,
            seed: 0,
            stop_on_perfect: false,
        }
    }
}

impl SearchConfig {
    /// Create a new config with custom exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Create a new config with custom iteration budget.
    pub fn with_max_iterations(mut self, iterations: u32) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config that stops on a perfect fill.
    pub fn with_stop_on_perfect(mut self, stop: bool) -> Self {
        self.stop_on_perfect = stop;
        self
    }
}
