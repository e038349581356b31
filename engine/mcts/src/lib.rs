//! Monte Carlo Tree Search for the Connect 4 agent.
//!
//! This crate is the decision core: given a board snapshot it returns a
//! single playable column within a bounded iteration budget. The search is
//! classic UCT augmented with several hand-tuned bias terms:
//!
//! 1. **Selection**: descend the tree by UCT score, with unvisited
//!    children scoring infinity so each is tried once
//! 2. **Expansion**: try one untried move (preferring non-traps) and fold
//!    a static bias bonus into the new node: open-window penalty, center
//!    bonus, scaled heuristic, short-rollout estimate, and learned value
//! 3. **Simulation**: one bounded random playout scored 1 / 0.5 / 0
//! 4. **Backpropagation**: credit the whole path with the playout reward
//!
//! Before the loop runs, tactical filters may answer immediately: a move
//! that wins on the spot is played without search, and root moves that
//! hand the opponent a winning reply are filtered out whenever a safe
//! alternative exists. The iteration budget itself adapts to the
//! position: doubled under a forced-loss threat, stretched in unclear
//! positions, trimmed in decided ones.
//!
//! Two components persist across move decisions and are injected by the
//! caller: the [`Heuristic`] score cache and the [`LearnedModel`] of
//! observed transitions. The tree itself is discarded after every move.
//!
//! # Usage
//!
//! ```rust
//! use mcts::{Heuristic, LearnedModel, MctsConfig, MctsSearch};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut model = LearnedModel::new();
//! let mut heuristic = Heuristic::new();
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//!
//! let config = MctsConfig::default();
//! let grid = [0i8; connect4::GRID];
//! let outcome = MctsSearch::new(config, &mut model, &mut heuristic, &mut rng)
//!     .decide(&grid)
//!     .unwrap();
//! assert!(outcome.column < 7);
//! ```

pub mod config;
pub mod heuristic;
pub mod model;
pub mod node;
pub mod rollout;
pub mod search;
pub mod tactics;
pub mod threat;
pub mod tree;

// Re-export main types
pub use config::{MctsConfig, MIN_ITERATIONS};
pub use heuristic::Heuristic;
pub use model::LearnedModel;
pub use node::{NodeId, SearchNode};
pub use search::{infer_mover, MctsSearch, Outcome, SearchError};
pub use tree::SearchTree;
