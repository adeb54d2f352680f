pub mod evaluation;
pub mod minimax;
pub mod random;
pub mod search;

use othello_core::{Board, Move, Player};

/// Core trait for Othello agents
pub trait Agent {
    /// Picks a move for the agent's side, or `None` to pass.
    fn best_move(&mut self, board: &Board) -> Option<Move>;

    /// The side this agent plays.
    fn player(&self) -> Player;

    /// Get the agent's name
    fn name(&self) -> &str;
}

pub use evaluation::*;
pub use minimax::MinimaxAgent;
pub use random::RandomAgent;
pub use search::*;
