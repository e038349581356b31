//! Learned value model over observed transitions.
//!
//! Every simulated move during search is recorded as an empirical
//! (state, action, successor) observation, together with the successor's
//! terminal-winner signal. The model turns those observations into a
//! recursive value estimate: the best action's expected value, where each
//! successor contributes its empirical probability times the last observed
//! reward plus its own recursively computed value.
//!
//! Values are memoized on first computation and never invalidated, so a
//! state keeps its first estimate even as later observations accumulate
//! (see DESIGN.md). Unknown states are worth 0 and are not cached.

use std::collections::{HashMap, HashSet};

use connect4::{Board, StateKey};

/// Process-scoped learned state: transition counts, reward signals, and
/// the memoized value table. Created at agent construction, mutated by
/// every move decision, never cleared by the driver.
#[derive(Debug, Default)]
pub struct LearnedModel {
    /// state -> action -> successor -> observed count. Append-only.
    transitions: HashMap<StateKey, HashMap<u8, HashMap<StateKey, u32>>>,

    /// state -> action -> last observed winner signal. Last write wins.
    rewards: HashMap<StateKey, HashMap<u8, i8>>,

    /// Memoized value estimates, never invalidated.
    values: HashMap<StateKey, f64>,

    /// States currently on the recursion stack, for cycle detection.
    in_progress: HashSet<StateKey>,
}

impl LearnedModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observed transition and its terminal-winner signal.
    pub fn record(&mut self, prev: &Board, action: u8, next: &Board) {
        let from = prev.key();
        *self
            .transitions
            .entry(from)
            .or_default()
            .entry(action)
            .or_default()
            .entry(next.key())
            .or_insert(0) += 1;
        self.rewards
            .entry(from)
            .or_default()
            .insert(action, next.winner());
    }

    /// Value estimate for `board`, computed from the recorded
    /// observations and memoized.
    pub fn value(&mut self, board: &Board) -> f64 {
        self.value_of(board.key())
    }

    fn value_of(&mut self, key: StateKey) -> f64 {
        if let Some(&value) = self.values.get(&key) {
            return value;
        }
        let Some(actions) = self.transitions.get(&key) else {
            return 0.0;
        };
        // A state re-entered while its own value is still being computed
        // contributes a bounded 0 instead of recursing forever. The
        // fallback is not cached.
        if self.in_progress.contains(&key) {
            return 0.0;
        }

        let actions: Vec<(u8, Vec<(StateKey, u32)>)> = actions
            .iter()
            .map(|(&action, successors)| {
                (
                    action,
                    successors.iter().map(|(&succ, &n)| (succ, n)).collect(),
                )
            })
            .collect();

        self.in_progress.insert(key);
        let mut best = f64::NEG_INFINITY;
        for (action, successors) in &actions {
            let total: u32 = successors.iter().map(|&(_, n)| n).sum();
            let reward = self
                .rewards
                .get(&key)
                .and_then(|per_action| per_action.get(action))
                .copied()
                .unwrap_or(0) as f64;

            let mut expected = 0.0;
            for &(succ, count) in successors {
                let probability = count as f64 / total as f64;
                expected += probability * (reward + self.value_of(succ));
            }
            best = best.max(expected);
        }
        self.in_progress.remove(&key);

        self.values.insert(key, best);
        best
    }

    /// Number of states with at least one recorded transition.
    pub fn observed_states(&self) -> usize {
        self.transitions.len()
    }

    /// Number of memoized value entries.
    pub fn cached_values(&self) -> usize {
        self.values.len()
    }

    /// Drop everything. For tests and harnesses, not for the driver.
    pub fn reset(&mut self) {
        self.transitions.clear();
        self.rewards.clear();
        self.values.clear();
        self.in_progress.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(moves: &[u8]) -> Board {
        let mut board = Board::new();
        for &col in moves {
            board = board.apply(col).unwrap();
        }
        board
    }

    #[test]
    fn test_unknown_state_is_zero_and_uncached() {
        let mut model = LearnedModel::new();
        assert_eq!(model.value(&Board::new()), 0.0);
        assert_eq!(model.cached_values(), 0);
    }

    #[test]
    fn test_terminal_reward_flows_back() {
        let mut model = LearnedModel::new();

        // One ply from a -1 win: the winner signal is the raw token.
        let pre = play(&[0, 1, 0, 1, 0, 1]);
        let won = pre.apply(0).unwrap();
        assert_eq!(won.winner(), -1);

        model.record(&pre, 0, &won);
        assert_eq!(model.value(&pre), -1.0);
        assert_eq!(model.cached_values(), 1);
    }

    #[test]
    fn test_value_chains_through_successors() {
        let mut model = LearnedModel::new();

        // s0 -> s1 (no reward), s1 -> s2 where +1 wins: V(s1) = 1,
        // V(s0) = 0 + V(s1) = 1.
        let s0 = play(&[6, 0, 6, 1, 5, 2]);
        let s1 = s0.apply(5).unwrap();
        let s2 = s1.apply(3).unwrap();
        assert_eq!(s2.winner(), 1);

        model.record(&s0, 5, &s1);
        model.record(&s1, 3, &s2);
        assert!((model.value(&s1) - 1.0).abs() < 1e-9);
        assert!((model.value(&s0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empirical_probabilities_weight_successors() {
        let mut model = LearnedModel::new();

        let s0 = Board::new();
        let s1 = s0.apply(0).unwrap();
        let s1_alt = s0.apply(1).unwrap();

        // Give s1 a downstream reward of 1: a recorded transition into a
        // board +1 has already won.
        let plus_won = play(&[6, 0, 6, 1, 5, 2, 5, 3]);
        assert_eq!(plus_won.winner(), 1);
        model.record(&s1, 2, &plus_won);

        // Same action from s0 observed with two successors, 3:1.
        for _ in 0..3 {
            model.record(&s0, 0, &s1);
        }
        model.record(&s0, 0, &s1_alt);

        // V(s1) = 1, V(s1_alt) = 0: V(s0) = 0.75 * 1 + 0.25 * 0.
        assert!((model.value(&s0) - 0.75).abs() < 1e-9);
        assert_eq!(model.observed_states(), 2);
    }

    #[test]
    fn test_best_action_is_taken() {
        let mut model = LearnedModel::new();

        // From s0, action 0 leads nowhere; action 3 reaches a -1 win
        // (signal -1) and action 4 a quiet state (signal 0). The max
        // over actions picks the quiet one.
        let s0 = play(&[0, 1, 0, 1, 0, 1]);
        let quiet = s0.apply(4).unwrap();
        let won = s0.apply(0).unwrap();
        assert_eq!(won.winner(), -1);

        model.record(&s0, 0, &won);
        model.record(&s0, 4, &quiet);
        assert_eq!(model.value(&s0), 0.0);
    }

    #[test]
    fn test_cached_value_goes_stale_by_design() {
        let mut model = LearnedModel::new();

        let s0 = play(&[0, 1, 0, 1, 0, 1]);
        let won = s0.apply(0).unwrap();
        model.record(&s0, 0, &won);
        assert_eq!(model.value(&s0), -1.0);

        // New observations change the empirical picture, but the cached
        // estimate is never invalidated.
        let quiet = s0.apply(4).unwrap();
        model.record(&s0, 4, &quiet);
        assert_eq!(model.value(&s0), -1.0);

        // A reset clears the memo along with the observations.
        model.reset();
        assert_eq!(model.value(&s0), 0.0);
        assert_eq!(model.observed_states(), 0);
    }

    #[test]
    fn test_transition_cycle_terminates() {
        let mut model = LearnedModel::new();

        // A rejected expansion records a self-loop; two states can also
        // loop through each other. Both must terminate via the
        // in-progress guard rather than recurse without bound.
        let a = Board::new();
        let b = a.apply(3).unwrap();

        model.record(&a, 3, &b);
        model.record(&b, 3, &a);
        model.record(&a, 0, &a);

        assert_eq!(model.value(&a), 0.0);
        assert_eq!(model.value(&b), 0.0);
    }
}
