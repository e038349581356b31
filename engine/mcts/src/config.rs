//! Search configuration parameters.

/// Floor on the per-move iteration budget. The adaptive budget in the
/// driver never goes below this, whatever the configured base.
pub const MIN_ITERATIONS: u32 = 50;

/// Configuration for one search driver.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Base iteration count per move, before adaptive scaling.
    pub iterations: u32,

    /// Exploration constant `c` in the UCT formula.
    /// Higher values favor exploration over exploitation.
    pub exploration: f64,

    /// Depth bound on the backpropagation rollout.
    pub rollout_depth: u32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            exploration: 1.2,
            rollout_depth: 20,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing. The RNG is injected separately,
    /// so determinism comes from seeding that, not from the config.
    pub fn for_testing() -> Self {
        Self {
            iterations: MIN_ITERATIONS,
            exploration: 1.2,
            rollout_depth: 10,
        }
    }

    /// Builder pattern: set the base iteration count.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = n;
        self
    }

    /// Builder pattern: set the UCT exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set the rollout depth bound.
    pub fn with_rollout_depth(mut self, depth: u32) -> Self {
        self.rollout_depth = depth;
        self
    }
}
