//! The move-decision driver.
//!
//! One call to [`MctsSearch::decide`] runs the whole pipeline for a single
//! move: infer the mover from token parity, consult the tactical filters
//! (which may answer immediately), pick an iteration budget from the
//! position's tactical and heuristic signals, then loop
//! selection -> expansion -> simulation -> backpropagation over a fresh
//! tree and return the most-visited root action.
//!
//! The tree lives for one decision. The learned model and the heuristic
//! cache are borrowed from the caller and accumulate across decisions.

use connect4::{Board, COLS, GRID};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::{MctsConfig, MIN_ITERATIONS};
use crate::heuristic::Heuristic;
use crate::model::LearnedModel;
use crate::rollout::{playout, short_estimate};
use crate::tactics;
use crate::threat;
use crate::tree::SearchTree;

/// Expansion-time bias weights. Tuned together with the heuristic table.
const OPEN_WINDOW_PENALTY: f64 = 40.0;
const CENTER_BONUS: f64 = 3.0;
const HEURISTIC_WEIGHT: f64 = 0.002;
const ROLLOUT_WEIGHT: f64 = 0.05;
const MODEL_WEIGHT: f64 = 0.01;

const CENTER_COLUMN: u8 = (COLS / 2) as u8;

/// Errors that can occur during a move decision.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The caller broke the adapter contract: every move request must
    /// come with at least one playable column.
    #[error("no legal moves available")]
    NoLegalMoves,
}

/// Result of one move decision.
#[derive(Debug, Clone, Copy)]
pub struct Outcome {
    /// Chosen column, guaranteed playable.
    pub column: u8,

    /// Search iterations actually run. 0 when a tactical shortcut or a
    /// single legal column answered without search.
    pub iterations: u32,
}

/// Infer the side to move from token counts.
///
/// The negative player moves when the counts are equal (it opens every
/// game by convention) and otherwise whichever side has fewer tokens.
/// The heuristic sign convention depends on this exact tie-break.
pub fn infer_mover(grid: &[i8; GRID]) -> i8 {
    let negatives = grid.iter().filter(|&&c| c == -1).count();
    let positives = grid.iter().filter(|&&c| c == 1).count();
    if negatives == positives {
        -1
    } else if positives < negatives {
        1
    } else {
        -1
    }
}

/// One move decision's search state, borrowing the process-scoped caches.
pub struct MctsSearch<'a> {
    config: MctsConfig,
    model: &'a mut LearnedModel,
    heuristic: &'a mut Heuristic,
    rng: &'a mut ChaCha20Rng,
}

impl<'a> MctsSearch<'a> {
    pub fn new(
        config: MctsConfig,
        model: &'a mut LearnedModel,
        heuristic: &'a mut Heuristic,
        rng: &'a mut ChaCha20Rng,
    ) -> Self {
        Self {
            config,
            model,
            heuristic,
            rng,
        }
    }

    /// Decide a move for the given grid snapshot.
    pub fn decide(&mut self, grid: &[i8; GRID]) -> Result<Outcome, SearchError> {
        let mover = infer_mover(grid);
        let root = Board::from_cells(*grid, mover);

        let mut moves = root.legal_columns();
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        if moves.len() == 1 {
            debug!(column = moves[0], "single legal column");
            return Ok(Outcome {
                column: moves[0],
                iterations: 0,
            });
        }
        if let Some(column) = tactics::immediate_win(&root) {
            debug!(column, "immediate win");
            return Ok(Outcome {
                column,
                iterations: 0,
            });
        }

        // Drop trap moves from the root set whenever anything safe exists.
        let safe = tactics::safe_moves(&root, &moves, mover);
        if !safe.is_empty() {
            moves = safe;
        }

        let mut tree = SearchTree::new();
        for &column in &moves {
            tree.add_child(tree.root(), column, None, 0.0);
        }

        let iterations = self.budget(&root, mover);
        debug!(iterations, mover, "iteration budget");

        for _ in 0..iterations {
            self.iterate(&mut tree, &root, mover);
        }

        let column = tree
            .best_action()
            .map(|(column, _)| column)
            .ok_or(SearchError::NoLegalMoves)?;
        debug!(column, iterations, "search complete");
        Ok(Outcome { column, iterations })
    }

    /// Per-move iteration budget. Exactly one of the four bands applies,
    /// checked in priority order.
    fn budget(&mut self, root: &Board, mover: i8) -> u32 {
        let base = self.config.iterations.max(MIN_ITERATIONS);
        let opponent = -mover;

        // Already facing a forced loss next turn: search twice as hard.
        if tactics::immediate_win(&root.with_player(opponent)).is_some() {
            return base * 2;
        }

        let danger = root.legal_columns().into_iter().any(|col| {
            root.apply(col)
                .map(|next| threat::leaves_open_window(&next, opponent))
                .unwrap_or(false)
        });
        let score = self.heuristic.score(root);
        if danger || score.abs() < 30 {
            // Latent threats or a near-balanced position.
            return (base as f64 * 1.8) as u32;
        }
        if score.abs() > 200 {
            // Already decisive either way.
            return ((base as f64 * 0.8) as u32).max(MIN_ITERATIONS);
        }
        ((base as f64 * 0.5) as u32).max(MIN_ITERATIONS)
    }

    /// One selection -> expansion -> simulation -> backpropagation pass.
    fn iterate(&mut self, tree: &mut SearchTree, root: &Board, mover: i8) {
        let opponent = -mover;
        let mut node = tree.root();
        let mut state = root.clone();

        // Selection: descend while the node allows it, recording every
        // simulated transition into the learned model. An apply failure
        // abandons the descent and continues from where we are.
        while !state.is_terminal() && tree.get(node).expanded {
            let Some(child) = tree.select_child(node, self.config.exploration) else {
                break;
            };
            let action = tree.get(child).action;
            let Ok(next) = state.apply(action) else {
                break;
            };
            self.model.record(&state, action, &next);
            state = next;
            node = child;
        }

        // Expansion: try one untried move, preferring non-traps.
        if !state.is_terminal() {
            let legal = state.legal_columns();
            let untried: Vec<u8> = legal
                .iter()
                .copied()
                .filter(|&col| !tree.get(node).children.iter().any(|&(a, _)| a == col))
                .collect();

            if untried.is_empty() {
                tree.get_mut(node).expanded = true;
            } else {
                let preferred: Vec<u8> = untried
                    .iter()
                    .copied()
                    .filter(|&col| !tactics::is_trap(&state, col, mover))
                    .collect();
                let pool = if preferred.is_empty() { &untried } else { &preferred };
                let action = pool[self.rng.gen_range(0..pool.len())];

                // A rejected drop falls back to the unchanged state; the
                // learned model's cycle guard makes the resulting
                // self-loop observation safe.
                let next = state.apply(action).unwrap_or_else(|_| state.clone());
                self.model.record(&state, action, &next);

                let bonus = self.expansion_bonus(&next, action, mover, opponent);
                let child = tree.add_child(node, action, Some(next.clone()), bonus);
                if untried.len() == 1 {
                    tree.get_mut(node).expanded = legal.len() == 1;
                }
                node = child;
                state = next;
            }
        }

        // Simulation and backpropagation.
        let reward = playout(&state, mover, self.config.rollout_depth, self.rng);
        tree.backpropagate(node, reward);
        trace!(reward, nodes = tree.len(), "iteration complete");
    }

    /// Static bias folded into a newly expanded node.
    fn expansion_bonus(&mut self, next: &Board, action: u8, mover: i8, opponent: i8) -> f64 {
        let mut bonus = 0.0;
        if threat::leaves_open_window(next, opponent) {
            bonus -= OPEN_WINDOW_PENALTY;
        }
        if next.player() == -1 && action == CENTER_COLUMN {
            bonus += CENTER_BONUS;
        }
        bonus += HEURISTIC_WEIGHT * self.heuristic.score(next) as f64;
        bonus += ROLLOUT_WEIGHT * short_estimate(next, mover, self.rng);
        bonus += MODEL_WEIGHT * self.model.value(next);
        bonus
    }
}
