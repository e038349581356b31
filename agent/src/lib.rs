//! Connect 4 policy agent.
//!
//! Thin plumbing around the `mcts` search core: a [`Policy`] trait with
//! the single choose-move entry point, and [`MctsAgent`], which owns the
//! process-scoped state the search needs across moves (the RNG, the
//! heuristic score cache, and the learned transition model). All three are
//! created at construction, mutated by every decision, and never cleared.
//!
//! The move request is a 6x7 grid of `{-1, 0, +1}` tokens with row 0 at
//! the bottom; the reply is a playable column index. Whose turn it is gets
//! inferred from token parity inside the search.

pub mod config;

pub use config::{load_config, AgentConfig};
pub use mcts::SearchError;

use connect4::{COLS, GRID, ROWS};
use mcts::{Heuristic, LearnedModel, MctsSearch, Outcome};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

/// A move request grid: rows of columns, row 0 at the bottom.
pub type Grid = [[i8; COLS]; ROWS];

/// Action selection policy.
pub trait Policy {
    /// Hook invoked when the policy is installed into a harness.
    fn mount(&mut self) {}

    /// Choose a playable column for the given board snapshot.
    ///
    /// The caller guarantees at least one column has room; the error
    /// only reports violations of that contract.
    fn act(&mut self, grid: &Grid) -> Result<u8, SearchError>;
}

/// MCTS-backed policy.
pub struct MctsAgent {
    config: AgentConfig,
    rng: ChaCha20Rng,
    model: LearnedModel,
    heuristic: Heuristic,
    last_outcome: Option<Outcome>,
}

impl std::fmt::Debug for MctsAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MctsAgent")
            .field("iterations", &self.config.iterations)
            .field("observed_states", &self.model.observed_states())
            .field("cached_scores", &self.heuristic.cached())
            .finish()
    }
}

impl MctsAgent {
    /// Create an agent from a configuration. Without a configured seed
    /// the RNG is drawn from entropy.
    pub fn new(config: AgentConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        Self {
            config,
            rng,
            model: LearnedModel::new(),
            heuristic: Heuristic::new(),
            last_outcome: None,
        }
    }

    /// Create an agent with a specific seed (used in tests).
    pub fn with_seed(config: AgentConfig, seed: u64) -> Self {
        Self::new(AgentConfig {
            seed: Some(seed),
            ..config
        })
    }

    /// The learned model accumulated so far.
    pub fn model(&self) -> &LearnedModel {
        &self.model
    }

    /// Mutable access for tests and harnesses that reset between games.
    pub fn model_mut(&mut self) -> &mut LearnedModel {
        &mut self.model
    }

    /// The heuristic cache accumulated so far.
    pub fn heuristic(&self) -> &Heuristic {
        &self.heuristic
    }

    /// Outcome of the most recent decision, including how many search
    /// iterations it ran (0 for tactical short-circuits).
    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    fn flatten(grid: &Grid) -> [i8; GRID] {
        let mut cells = [0i8; GRID];
        for (row, columns) in grid.iter().enumerate() {
            for (col, &token) in columns.iter().enumerate() {
                cells[row * COLS + col] = token;
            }
        }
        cells
    }
}

impl Policy for MctsAgent {
    fn act(&mut self, grid: &Grid) -> Result<u8, SearchError> {
        let cells = Self::flatten(grid);
        let outcome = MctsSearch::new(
            self.config.search_config(),
            &mut self.model,
            &mut self.heuristic,
            &mut self.rng,
        )
        .decide(&cells)?;

        debug!(
            column = outcome.column,
            iterations = outcome.iterations,
            "agent selected column"
        );
        self.last_outcome = Some(outcome);
        Ok(outcome.column)
    }
}
