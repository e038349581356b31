//! Open-window threat detection.
//!
//! An "open window" is a line of four holding exactly two of one player's
//! tokens and two empties: a latent threat that can become a live three.
//! The detector is a boolean bias signal at expansion time, never a
//! pruning rule.

use connect4::Board;

/// Does any legal move from `board` produce a position with an open
/// window for `target`?
///
/// Each legal column is simulated with the side-to-move's token (a
/// rejected drop just skips that column) and the resulting grid is
/// scanned window by window.
pub fn leaves_open_window(board: &Board, target: i8) -> bool {
    for col in board.legal_columns() {
        let Ok(next) = board.apply(col) else {
            continue;
        };
        let open = next.windows().any(|window| {
            window.iter().filter(|&&c| c == target).count() == 2
                && window.iter().filter(|&&c| c == 0).count() == 2
        });
        if open {
            return true;
        }
    }
    false
}
