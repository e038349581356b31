//! Connect 4 board state for the MCTS agent.
//!
//! The board is a 6x7 grid of signed tokens: `-1` and `+1` for the two
//! players, `0` for an empty cell. By repo-wide convention the negative
//! token moves first on an even board; the heuristic weights in the search
//! crate are tuned against that convention.
//!
//! # Board layout
//!
//! Cells are stored in row-major order with row 0 at the bottom:
//!
//! ```text
//! Row 5: [35][36][37][38][39][40][41]  <- Top
//! Row 4: [28][29][30][31][32][33][34]
//! Row 3: [21][22][23][24][25][26][27]
//! Row 2: [14][15][16][17][18][19][20]
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Bottom
//!         Col 0  1  2  3  4  5  6
//! ```
//!
//! A [`Board`] is immutable once created: [`Board::apply`] returns a new
//! value and fails loudly on a full or out-of-range column. Callers that
//! simulate speculative lines (rollouts, threat scans) recover from that
//! failure locally by abandoning the line.

use thiserror::Error;

/// Board dimensions.
pub const COLS: usize = 7;
pub const ROWS: usize = 6;
pub const GRID: usize = COLS * ROWS; // 42

/// Cache identity of a position: exact cell contents plus the side to move.
pub type StateKey = ([i8; GRID], i8);

/// Rejected move. The only recoverable failure the board surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("column {0} is out of range")]
    OutOfRange(u8),

    #[error("column {0} is full")]
    ColumnFull(u8),
}

/// A Connect 4 position: grid contents plus the side to move.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Cell tokens, row-major with row 0 at the bottom.
    cells: [i8; GRID],
    /// Side to move: -1 or +1.
    player: i8,
    /// Winner: -1, +1, or 0 for "no winner yet or draw".
    winner: i8,
    /// Number of tokens in each column.
    heights: [u8; COLS],
}

impl Board {
    /// Empty board with the negative-token player to move.
    pub fn new() -> Self {
        Self {
            cells: [0; GRID],
            player: -1,
            winner: 0,
            heights: [0; COLS],
        }
    }

    /// Adopt a grid snapshot with the given side to move.
    ///
    /// Column heights and the winner are reconstructed by scanning. The
    /// caller is expected to hand over a grid reachable by legal play;
    /// tokens floating above an empty cell are not diagnosed.
    pub fn from_cells(cells: [i8; GRID], player: i8) -> Self {
        let mut heights = [0u8; COLS];
        for (col, height) in heights.iter_mut().enumerate() {
            for row in 0..ROWS {
                if cells[Self::pos(col, row)] != 0 {
                    *height = (row + 1) as u8;
                }
            }
        }

        let mut board = Self {
            cells,
            player,
            winner: 0,
            heights,
        };
        board.winner = board.scan_winner();
        board
    }

    #[inline]
    fn pos(col: usize, row: usize) -> usize {
        row * COLS + col
    }

    /// Token at (col, row), row 0 at the bottom.
    #[inline]
    pub fn cell(&self, col: usize, row: usize) -> i8 {
        self.cells[Self::pos(col, row)]
    }

    /// Raw grid contents.
    #[inline]
    pub fn grid(&self) -> &[i8; GRID] {
        &self.cells
    }

    /// Side to move.
    #[inline]
    pub fn player(&self) -> i8 {
        self.player
    }

    /// Winner token, or 0 when nobody has four in a row (yet, or ever).
    #[inline]
    pub fn winner(&self) -> i8 {
        self.winner
    }

    /// Game over: a winner was found or the board is full.
    pub fn is_terminal(&self) -> bool {
        self.winner != 0 || self.heights.iter().all(|&h| h as usize >= ROWS)
    }

    /// Cache identity: exact cell contents paired with the side to move.
    #[inline]
    pub fn key(&self) -> StateKey {
        (self.cells, self.player)
    }

    /// Cache identity by contents alone, ignoring the side to move.
    #[inline]
    pub fn grid_key(&self) -> [i8; GRID] {
        self.cells
    }

    /// Same position with a different side to move.
    pub fn with_player(&self, player: i8) -> Self {
        let mut board = self.clone();
        board.player = player;
        board
    }

    /// Columns that still have room, in ascending order.
    ///
    /// Legality is purely occupancy: a decided game still reports its open
    /// columns, and callers gate on [`Board::is_terminal`] where that
    /// matters.
    pub fn legal_columns(&self) -> Vec<u8> {
        (0..COLS as u8)
            .filter(|&col| self.heights[col as usize] < ROWS as u8)
            .collect()
    }

    /// Drop the side-to-move's token into `col`, returning the new position.
    ///
    /// The winner is updated by scanning the four line directions around
    /// the placed token, and the side to move flips.
    pub fn apply(&self, col: u8) -> Result<Board, IllegalMove> {
        let column = col as usize;
        if column >= COLS {
            return Err(IllegalMove::OutOfRange(col));
        }
        if self.heights[column] as usize >= ROWS {
            return Err(IllegalMove::ColumnFull(col));
        }

        let row = self.heights[column] as usize;
        let mut next = self.clone();
        next.cells[Self::pos(column, row)] = self.player;
        next.heights[column] += 1;
        next.player = -self.player;
        if next.winner == 0 {
            next.winner = next.winner_at(column, row);
        }
        Ok(next)
    }

    /// Check whether the token at (col, row) completes a line of four.
    fn winner_at(&self, col: usize, row: usize) -> i8 {
        let token = self.cells[Self::pos(col, row)];
        if token == 0 {
            return 0;
        }

        // Direction vectors: horizontal, vertical, both diagonals.
        const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

        for (dc, dr) in DIRECTIONS {
            let mut count = 1;
            for sign in [1i32, -1] {
                let (mut c, mut r) = (col as i32 + sign * dc, row as i32 + sign * dr);
                while (0..COLS as i32).contains(&c)
                    && (0..ROWS as i32).contains(&r)
                    && self.cells[Self::pos(c as usize, r as usize)] == token
                {
                    count += 1;
                    c += sign * dc;
                    r += sign * dr;
                }
            }
            if count >= 4 {
                return token;
            }
        }
        0
    }

    /// Full-board winner scan, used when adopting a snapshot.
    fn scan_winner(&self) -> i8 {
        for window in self.windows() {
            if window == [-1; 4] {
                return -1;
            }
            if window == [1; 4] {
                return 1;
            }
        }
        0
    }

    /// Every line of four cells: 24 horizontal, 21 vertical, and 12 along
    /// each diagonal direction (69 windows in total).
    pub fn windows(&self) -> impl Iterator<Item = [i8; 4]> + '_ {
        let horizontal = (0..ROWS).flat_map(move |row| {
            (0..=COLS - 4).map(move |col| {
                [
                    self.cell(col, row),
                    self.cell(col + 1, row),
                    self.cell(col + 2, row),
                    self.cell(col + 3, row),
                ]
            })
        });
        let vertical = (0..COLS).flat_map(move |col| {
            (0..=ROWS - 4).map(move |row| {
                [
                    self.cell(col, row),
                    self.cell(col, row + 1),
                    self.cell(col, row + 2),
                    self.cell(col, row + 3),
                ]
            })
        });
        let ascending = (0..=ROWS - 4).flat_map(move |row| {
            (0..=COLS - 4).map(move |col| {
                [
                    self.cell(col, row),
                    self.cell(col + 1, row + 1),
                    self.cell(col + 2, row + 2),
                    self.cell(col + 3, row + 3),
                ]
            })
        });
        let descending = (0..=ROWS - 4).flat_map(move |row| {
            (0..=COLS - 4).map(move |col| {
                [
                    self.cell(col + 3, row),
                    self.cell(col + 2, row + 1),
                    self.cell(col + 1, row + 2),
                    self.cell(col, row + 3),
                ]
            })
        });
        horizontal.chain(vertical).chain(ascending).chain(descending)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
