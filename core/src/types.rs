use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use crate::notation::NotationError;

/// Contents of a single board position.
///
/// Discriminants are the signed unit values used by the evaluation code:
/// the two colors are opposite signs and `Empty` is neutral, so negation
/// flips ownership.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Default)]
#[repr(i8)]
pub enum Cell {
    Dark = -1,
    #[default]
    Empty = 0,
    Light = 1,
}

impl Cell {
    /// Returns the owner of this cell, if any.
    pub const fn owner(self) -> Option<Player> {
        match self {
            Cell::Light => Some(Player::Light),
            Cell::Dark => Some(Player::Dark),
            Cell::Empty => None,
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Signed unit value of the cell.
    pub const fn value(self) -> i8 {
        self as i8
    }

    /// Notation character: `O` light, `X` dark, `.` empty.
    pub const fn to_char(self) -> char {
        match self {
            Cell::Light => 'O',
            Cell::Dark => 'X',
            Cell::Empty => '.',
        }
    }

    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'O' | 'o' => Some(Cell::Light),
            'X' | 'x' => Some(Cell::Dark),
            '.' | '-' => Some(Cell::Empty),
            _ => None,
        }
    }
}

impl Neg for Cell {
    type Output = Cell;

    fn neg(self) -> Cell {
        match self {
            Cell::Light => Cell::Dark,
            Cell::Dark => Cell::Light,
            Cell::Empty => Cell::Empty,
        }
    }
}

/// One of the two sides of an Othello game.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Player {
    Light,
    Dark,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::Light, Player::Dark];

    /// Returns the opposite player.
    pub const fn opponent(self) -> Self {
        match self {
            Player::Light => Player::Dark,
            Player::Dark => Player::Light,
        }
    }

    /// Returns the cell value owned by this player.
    pub const fn cell(self) -> Cell {
        match self {
            Player::Light => Cell::Light,
            Player::Dark => Cell::Dark,
        }
    }
}

impl Neg for Player {
    type Output = Player;

    fn neg(self) -> Player {
        self.opponent()
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        player.cell()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Light => write!(f, "Light"),
            Player::Dark => write!(f, "Dark"),
        }
    }
}

/// A placement at (row, col).
///
/// A move is only meaningful for the board and player it was generated
/// for; see [`crate::Board::valid_moves`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Column letter followed by the 1-based row, so `(1, 3)` prints as `d2`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Boards are at most 26 wide, so every column has a letter.
        match u8::try_from(self.col).ok().filter(|&col| col < 26) {
            Some(col) => write!(f, "{}{}", (b'a' + col) as char, self.row + 1),
            None => write!(f, "({}, {})", self.row, self.col),
        }
    }
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NotationError::InvalidMove {
            text: s.to_string(),
        };

        let mut chars = s.trim().chars();
        let file = chars.next().ok_or_else(invalid)?.to_ascii_lowercase();
        if !file.is_ascii_lowercase() {
            return Err(invalid());
        }
        let rank: usize = chars.as_str().parse().map_err(|_| invalid())?;
        if rank == 0 {
            return Err(invalid());
        }

        Ok(Move::new(rank - 1, (file as u8 - b'a') as usize))
    }
}

/// Final result of a game.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Outcome {
    Win(Player),
    Draw,
}

impl Outcome {
    /// Returns the winning player, or `None` for a draw.
    pub const fn winner(self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(player),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(player) => write!(f, "{player} wins"),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_negation() {
        assert_eq!(-Cell::Light, Cell::Dark);
        assert_eq!(-Cell::Dark, Cell::Light);
        assert_eq!(-Cell::Empty, Cell::Empty);
        assert_eq!(Cell::Light.value(), -Cell::Dark.value());
        assert_eq!(Cell::Empty.value(), 0);
    }

    #[test]
    fn test_player_opponent() {
        assert_eq!(Player::Light.opponent(), Player::Dark);
        assert_eq!(-Player::Dark, Player::Light);
        assert_eq!(Cell::from(Player::Dark), Cell::Dark);
        assert_eq!(Player::Light.cell().owner(), Some(Player::Light));
    }

    #[test]
    fn test_move_display_and_parse() {
        let mv = Move::new(1, 3);
        assert_eq!(mv.to_string(), "d2");
        assert_eq!("d2".parse::<Move>().unwrap(), mv);
        assert_eq!("A1".parse::<Move>().unwrap(), Move::new(0, 0));
        assert_eq!("f6".parse::<Move>().unwrap(), Move::new(5, 5));
        assert_eq!(Move::new(25, 25).to_string(), "z26");
        assert_eq!("z26".parse::<Move>().unwrap(), Move::new(25, 25));
    }

    #[test]
    fn test_move_display_never_wraps() {
        let mv = Move::new(0, 26);
        assert_ne!(mv.to_string(), "a1");
        assert_ne!(mv.to_string().parse::<Move>().ok(), Some(Move::new(0, 0)));
    }

    #[test]
    fn test_invalid_move_text() {
        assert!("".parse::<Move>().is_err());
        assert!("d".parse::<Move>().is_err());
        assert!("d0".parse::<Move>().is_err());
        assert!("42".parse::<Move>().is_err());
        assert!("dd".parse::<Move>().is_err());
    }
}
