//! Board representation for an N×N Othello grid.
//! Cells are stored row-major in a flat vector; the side length is carried
//! with the board so any even size from 4 to 26 works the same way.

use crate::types::*;

/// The eight compass directions as (row, col) deltas.
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Smallest side length that still fits the four starting discs with room
/// to play around them.
pub const MIN_SIZE: usize = 4;
/// Largest side length; columns are lettered `a` to `z`.
pub const MAX_SIZE: usize = 26;

/// Board construction error.
#[derive(Clone, Debug, Eq, PartialEq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    #[display("board size {size} is odd; the starting discs need an even size")]
    OddSize { size: usize },
    #[display("board size {size} is smaller than the minimum of 4")]
    TooSmall { size: usize },
    #[display("board size {size} is larger than the maximum of 26")]
    TooLarge { size: usize },
}

/// An N×N grid of cells.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Board {
    size: usize,
    /// `size * size` cells, indexed by `row * size + col`.
    cells: Vec<Cell>,
}

impl Board {
    /// Creates a board in the standard starting position: Light on the
    /// main-diagonal pair of the central square, Dark on the other pair.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        let mut board = Self::empty(size)?;
        let half = size / 2;

        board.set(Move::new(half - 1, half - 1), Cell::Light);
        board.set(Move::new(half, half), Cell::Light);
        board.set(Move::new(half - 1, half), Cell::Dark);
        board.set(Move::new(half, half - 1), Cell::Dark);

        Ok(board)
    }

    /// Creates a board with every cell empty.
    pub fn empty(size: usize) -> Result<Self, BoardError> {
        if size < MIN_SIZE {
            return Err(BoardError::TooSmall { size });
        }
        if size > MAX_SIZE {
            return Err(BoardError::TooLarge { size });
        }
        if size % 2 != 0 {
            return Err(BoardError::OddSize { size });
        }

        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if the coordinates lie on the board.
    pub fn contains(&self, mv: Move) -> bool {
        mv.row < self.size && mv.col < self.size
    }

    /// Gets the cell at the given position.
    pub fn cell(&self, mv: Move) -> Cell {
        self.cells[self.index(mv)]
    }

    /// Sets the cell at the given position without any capture handling.
    pub fn set(&mut self, mv: Move, cell: Cell) {
        let index = self.index(mv);
        self.cells[index] = cell;
    }

    /// Read-only snapshot of the grid, one slice per row from row 0 down.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.size)
    }

    fn index(&self, mv: Move) -> usize {
        debug_assert!(self.contains(mv), "{mv:?} is off a {0}x{0} board", self.size);
        mv.row * self.size + mv.col
    }

    /// Steps one cell from `from` in direction `(dr, dc)`, or `None` at the edge.
    fn step(&self, from: Move, (dr, dc): (isize, isize)) -> Option<Move> {
        let row = from.row.checked_add_signed(dr)?;
        let col = from.col.checked_add_signed(dc)?;
        let next = Move::new(row, col);
        self.contains(next).then_some(next)
    }

    /// Length of the capture run `player` would flip from `origin` in one
    /// direction: a non-empty line of opponent discs closed by one of the
    /// player's own discs. Zero when the direction does not qualify.
    fn capture_run(&self, player: Player, origin: Move, dir: (isize, isize)) -> usize {
        let own = player.cell();
        let enemy = -own;
        let mut run = 0;
        let mut pos = origin;

        while let Some(next) = self.step(pos, dir) {
            match self.cell(next) {
                cell if cell == enemy => {
                    run += 1;
                    pos = next;
                }
                cell if cell == own => return run,
                _ => return 0,
            }
        }

        0
    }

    /// Returns true if `player` may place a disc at `mv`.
    pub fn is_valid_move(&self, player: Player, mv: Move) -> bool {
        self.contains(mv)
            && self.cell(mv).is_empty()
            && DIRECTIONS
                .iter()
                .any(|&dir| self.capture_run(player, mv, dir) > 0)
    }

    /// All legal placements for `player`, in row-major order.
    ///
    /// The order is part of the contract: search keeps the first of several
    /// equally scored moves, so enumeration order decides ties.
    pub fn valid_moves(&self, player: Player) -> Vec<Move> {
        let mut moves = Vec::new();

        for row in 0..self.size {
            for col in 0..self.size {
                let mv = Move::new(row, col);
                if self.is_valid_move(player, mv) {
                    moves.push(mv);
                }
            }
        }

        moves
    }

    /// Returns true if `player` has at least one legal placement.
    pub fn has_valid_move(&self, player: Player) -> bool {
        (0..self.size)
            .flat_map(|row| (0..self.size).map(move |col| Move::new(row, col)))
            .any(|mv| self.is_valid_move(player, mv))
    }

    /// Places a disc for `player` and flips every capture run.
    /// Returns the number of flipped discs.
    ///
    /// This does NOT check that the move is legal; callers must only pass
    /// moves taken from [`Board::valid_moves`].
    pub fn apply_move(&mut self, player: Player, mv: Move) -> usize {
        debug_assert!(self.cell(mv).is_empty(), "{mv} is already occupied");

        let own = player.cell();
        self.set(mv, own);

        let mut flipped = 0;
        for dir in DIRECTIONS {
            let run = self.capture_run(player, mv, dir);
            let mut pos = mv;
            for _ in 0..run {
                // The run was just measured, so every step stays on the board.
                let Some(next) = self.step(pos, dir) else {
                    break;
                };
                self.set(next, own);
                pos = next;
            }
            flipped += run;
        }

        flipped
    }

    /// True when neither side can move: the game is over.
    pub fn is_terminal(&self) -> bool {
        !self.has_valid_move(Player::Light) && !self.has_valid_move(Player::Dark)
    }

    /// Number of cells holding the given value (works for `Empty` too).
    pub fn count(&self, cell: impl Into<Cell>) -> usize {
        let cell = cell.into();
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// The four corner positions.
    pub fn corners(&self) -> [Move; 4] {
        let last = self.size - 1;
        [
            Move::new(0, 0),
            Move::new(0, last),
            Move::new(last, 0),
            Move::new(last, last),
        ]
    }

    /// Number of corners owned by `player`.
    pub fn count_corners(&self, player: Player) -> usize {
        self.corners()
            .iter()
            .filter(|&&mv| self.cell(mv) == player.cell())
            .count()
    }

    /// Decides the game by disc count.
    pub fn winner(&self) -> Outcome {
        let light = self.count(Player::Light);
        let dark = self.count(Player::Dark);

        match light.cmp(&dark) {
            std::cmp::Ordering::Greater => Outcome::Win(Player::Light),
            std::cmp::Ordering::Less => Outcome::Win(Player::Dark),
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}
