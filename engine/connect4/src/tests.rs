use super::*;

/// Play a sequence of columns from the empty board, asserting each is legal.
fn play(moves: &[u8]) -> Board {
    let mut board = Board::new();
    for &col in moves {
        board = board.apply(col).expect("test sequence must stay legal");
    }
    board
}

#[test]
fn test_initial_state() {
    let board = Board::new();
    assert_eq!(board.grid(), &[0; GRID]);
    assert_eq!(board.player(), -1);
    assert_eq!(board.winner(), 0);
    assert!(!board.is_terminal());
    assert_eq!(board.legal_columns(), (0..COLS as u8).collect::<Vec<_>>());
}

#[test]
fn test_apply_drops_and_flips() {
    let board = Board::new();
    let next = board.apply(3).unwrap();

    assert_eq!(next.cell(3, 0), -1);
    assert_eq!(next.player(), 1);
    assert!(!next.is_terminal());

    // The original board is untouched.
    assert_eq!(board.cell(3, 0), 0);
    assert_eq!(board.player(), -1);
}

#[test]
fn test_stacking_fills_a_column() {
    let mut board = Board::new();
    for row in 0..ROWS {
        board = board.apply(0).unwrap();
        assert_ne!(board.cell(0, row), 0);
    }
    assert!(!board.legal_columns().contains(&0));
}

#[test]
fn test_apply_full_column_fails() {
    let mut board = Board::new();
    for _ in 0..ROWS {
        board = board.apply(0).unwrap();
    }
    assert_eq!(board.apply(0), Err(IllegalMove::ColumnFull(0)));
}

#[test]
fn test_apply_out_of_range_fails() {
    let board = Board::new();
    assert_eq!(board.apply(7), Err(IllegalMove::OutOfRange(7)));
}

#[test]
fn test_horizontal_win() {
    // -1 plays 0,1,2,3 along the bottom row; +1 stacks on top.
    let board = play(&[0, 0, 1, 1, 2, 2, 3]);
    assert_eq!(board.winner(), -1);
    assert!(board.is_terminal());
}

#[test]
fn test_vertical_win() {
    let board = play(&[0, 1, 0, 1, 0, 1, 0]);
    assert_eq!(board.winner(), -1);
    assert!(board.is_terminal());
}

#[test]
fn test_ascending_diagonal_win() {
    // -1 builds (0,0) (1,1) (2,2) (3,3); +1 supplies the filler tokens.
    let board = play(&[0, 1, 1, 2, 2, 3, 2, 3, 3, 5, 3]);
    assert_eq!(board.winner(), -1);
    assert!(board.is_terminal());
}

#[test]
fn test_descending_diagonal_win() {
    // Mirror image of the ascending case.
    let board = play(&[6, 5, 5, 4, 4, 3, 4, 3, 3, 1, 3]);
    assert_eq!(board.winner(), -1);
    assert!(board.is_terminal());
}

#[test]
fn test_win_by_positive_player() {
    // -1 wastes moves on the right while +1 lines up the bottom row.
    let board = play(&[6, 0, 6, 1, 5, 2, 5, 3]);
    assert_eq!(board.winner(), 1);
    assert!(board.is_terminal());
}

#[test]
fn test_open_columns_reported_after_win() {
    let board = play(&[0, 1, 0, 1, 0, 1, 0]);
    assert!(board.is_terminal());
    // Occupancy-only legality: the decided game still has open columns.
    assert_eq!(board.legal_columns().len(), COLS);
}

#[test]
fn test_draw_board() {
    // Column pattern with no four-in-a-row anywhere once the board fills.
    let pattern: [[i8; ROWS]; COLS] = [
        [-1, -1, 1, 1, -1, -1],
        [1, 1, -1, -1, 1, 1],
        [-1, -1, 1, 1, -1, -1],
        [1, 1, -1, -1, 1, 1],
        [-1, -1, 1, 1, -1, -1],
        [1, 1, -1, -1, 1, 1],
        [-1, -1, 1, 1, -1, -1],
    ];
    let mut cells = [0i8; GRID];
    for col in 0..COLS {
        for row in 0..ROWS {
            cells[row * COLS + col] = pattern[col][row];
        }
    }

    let board = Board::from_cells(cells, -1);
    assert_eq!(board.winner(), 0);
    assert!(board.is_terminal());
    assert!(board.legal_columns().is_empty());
}

#[test]
fn test_from_cells_reconstructs_heights_and_winner() {
    let played = play(&[3, 3, 4, 4, 5, 5, 6]);
    let adopted = Board::from_cells(*played.grid(), played.player());

    assert_eq!(adopted, played);
    assert_eq!(adopted.winner(), -1);
    assert_eq!(adopted.legal_columns(), played.legal_columns());
}

#[test]
fn test_with_player_keeps_grid() {
    let board = play(&[3, 2]);
    let flipped = board.with_player(-board.player());

    assert_eq!(flipped.grid(), board.grid());
    assert_eq!(flipped.player(), -board.player());
    assert_ne!(flipped.key(), board.key());
}

#[test]
fn test_key_tracks_contents_and_player() {
    let a = play(&[3]);
    let b = play(&[3]);
    assert_eq!(a.key(), b.key());

    let c = play(&[2]);
    assert_ne!(a.key(), c.key());
    assert_eq!(a.grid_key().len(), GRID);
}

#[test]
fn test_window_enumeration() {
    let board = Board::new();
    // 24 horizontal + 21 vertical + 12 ascending + 12 descending.
    assert_eq!(board.windows().count(), 69);
    assert!(board.windows().all(|w| w == [0; 4]));
}

#[test]
fn test_windows_see_placed_tokens() {
    let board = play(&[0, 0, 1, 1, 2]);
    let negatives: usize = board
        .windows()
        .map(|w| w.iter().filter(|&&c| c == -1).count())
        .sum();
    // Three -1 tokens on the bottom row each appear in several windows.
    assert!(negatives > 0);
    assert!(board
        .windows()
        .any(|w| w.iter().filter(|&&c| c == -1).count() == 3));
}
