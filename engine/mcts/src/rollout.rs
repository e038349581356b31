//! Random playouts.
//!
//! Two flavors: a short multi-trial estimator used as an expansion-time
//! bias term, and the single bounded playout that produces the reward
//! backpropagated through the tree. A rejected drop ends the line early;
//! the caller never sees the failure.

use connect4::Board;
use rand::Rng;
use rand_chacha::ChaCha20Rng;

/// Trials averaged by the short estimator.
const SHORT_TRIALS: u32 = 5;
/// Moves per short trial.
const SHORT_HORIZON: u32 = 4;
/// Reward magnitude when a short trial reaches a decision.
const SHORT_REWARD: f64 = 150.0;

/// Average outcome of a handful of very short random continuations.
///
/// Each trial advances up to four random legal moves from `board`,
/// scoring +150 if `target` wins within the horizon, -150 if the
/// opponent does, and 0 otherwise. Returns the mean over the trials.
pub fn short_estimate(board: &Board, target: i8, rng: &mut ChaCha20Rng) -> f64 {
    let mut total = 0.0;
    for _ in 0..SHORT_TRIALS {
        let mut sim = board.clone();
        for _ in 0..SHORT_HORIZON {
            let moves = sim.legal_columns();
            if moves.is_empty() {
                break;
            }
            let col = moves[rng.gen_range(0..moves.len())];
            sim = match sim.apply(col) {
                Ok(next) => next,
                Err(_) => break,
            };
            let winner = sim.winner();
            if winner != 0 {
                total += if winner == target {
                    SHORT_REWARD
                } else {
                    -SHORT_REWARD
                };
                break;
            }
        }
    }
    total / SHORT_TRIALS as f64
}

/// One random playout from `board`, bounded by `depth` plies.
///
/// Reward from `target`'s point of view: 1.0 for a win, 0.5 when the
/// winner signal is still 0 (draw, or the bound cut the game short),
/// 0.0 for a loss.
pub fn playout(board: &Board, target: i8, depth: u32, rng: &mut ChaCha20Rng) -> f64 {
    let mut sim = board.clone();
    let mut steps = 0;
    while !sim.is_terminal() && steps < depth {
        let moves = sim.legal_columns();
        if moves.is_empty() {
            break;
        }
        let col = moves[rng.gen_range(0..moves.len())];
        sim = match sim.apply(col) {
            Ok(next) => next,
            Err(_) => break,
        };
        steps += 1;
    }

    let winner = sim.winner();
    if winner == target {
        1.0
    } else if winner == 0 {
        0.5
    } else {
        0.0
    }
}
