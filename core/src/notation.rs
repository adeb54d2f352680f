//! Text notation for board positions.
//! Rows are listed from row 0 down and separated by `/`; each row holds one
//! character per cell: `O` for Light, `X` for Dark and `.` for Empty.

use crate::board::{Board, BoardError};
use crate::types::{Cell, Move};

/// Notation parsing error types.
#[derive(Clone, Debug, Eq, PartialEq, derive_more::Display, derive_more::Error)]
pub enum NotationError {
    #[display("invalid cell character '{ch}' in row {row}")]
    InvalidCell { ch: char, row: usize },
    #[display("row {row} has {len} cells, expected {expected}")]
    RowLength {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[display("invalid board size: {source}")]
    Size { source: BoardError },
    #[display("invalid move: {text}")]
    InvalidMove { text: String },
}

impl From<BoardError> for NotationError {
    fn from(source: BoardError) -> Self {
        NotationError::Size { source }
    }
}

impl Board {
    /// Parses a position from notation. The side length is the number of
    /// rows; any mix of discs is accepted, not just the starting layout.
    pub fn from_notation(text: &str) -> Result<Self, NotationError> {
        let rows: Vec<&str> = text.trim().split('/').map(str::trim).collect();
        let mut board = Board::empty(rows.len())?;
        let size = board.size();

        for (row, row_str) in rows.iter().enumerate() {
            let len = row_str.chars().count();
            if len != size {
                return Err(NotationError::RowLength {
                    row,
                    len,
                    expected: size,
                });
            }

            for (col, ch) in row_str.chars().enumerate() {
                let cell = Cell::from_char(ch).ok_or(NotationError::InvalidCell { ch, row })?;
                board.set(Move::new(row, col), cell);
            }
        }

        Ok(board)
    }

    /// Converts the board to notation.
    pub fn to_notation(&self) -> String {
        self.rows()
            .map(|row| row.iter().map(|cell| cell.to_char()).collect::<String>())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Reference positions for testing.
pub mod positions {
    /// The 6×6 starting position.
    pub const STARTING_6: &str = "....../....../..OX../..XO../....../......";

    /// The 8×8 starting position.
    pub const STARTING_8: &str =
        "......../......../......../...OX.../...XO.../......../......../........";

    /// Game over on a full 4×4 board, Light ahead 9 to 7.
    pub const LIGHT_WINS_4: &str = "OOOO/OXXO/OXXO/XXXO";

    /// Neither side can move and the discs are level.
    pub const DRAWN_6: &str = "O....O/....../....../....../....../X....X";
}
