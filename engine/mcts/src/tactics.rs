//! Tactical pre-filters: immediate wins and one-ply traps.
//!
//! These run before and during the search. An immediate win short-circuits
//! the whole move decision; trap detection steers both the root move set
//! and random expansion away from moves that hand the opponent a winning
//! reply.

use connect4::Board;

/// First legal column whose application wins for the side to move.
pub fn immediate_win(board: &Board) -> Option<u8> {
    let mover = board.player();
    board.legal_columns().into_iter().find(|&col| {
        board
            .apply(col)
            .map(|next| next.winner() == mover)
            .unwrap_or(false)
    })
}

/// Does playing `col` let the opponent of `mover` win on the reply?
///
/// `mover` is the player the search is deciding for; the trap test keeps
/// that reference player at every ply, whoever is to move in `board`. A
/// rejected drop is not a trap, and rejected replies are skipped.
pub fn is_trap(board: &Board, col: u8, mover: i8) -> bool {
    let Ok(next) = board.apply(col) else {
        return false;
    };
    let opponent = -mover;
    next.legal_columns().into_iter().any(|reply| {
        next.apply(reply)
            .map(|after| after.winner() == opponent)
            .unwrap_or(false)
    })
}

/// The non-trap subset of `moves`, preserving order.
pub fn safe_moves(board: &Board, moves: &[u8], mover: i8) -> Vec<u8> {
    moves
        .iter()
        .copied()
        .filter(|&col| !is_trap(board, col, mover))
        .collect()
}
