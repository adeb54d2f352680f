use crate::Agent;
use othello_core::{Board, Move, Player};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Plays a uniformly random legal move.
pub struct RandomAgent {
    name: String,
    player: Player,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(player: Player) -> Self {
        Self::with_rng(player, StdRng::from_entropy())
    }

    /// Creates an agent whose choices are reproducible.
    pub fn with_seed(player: Player, seed: u64) -> Self {
        Self::with_rng(player, StdRng::seed_from_u64(seed))
    }

    fn with_rng(player: Player, rng: StdRng) -> Self {
        RandomAgent {
            name: "Random".to_string(),
            player,
            rng,
        }
    }
}

impl Agent for RandomAgent {
    fn best_move(&mut self, board: &Board) -> Option<Move> {
        board.valid_moves(self.player).choose(&mut self.rng).copied()
    }

    fn player(&self) -> Player {
        self.player
    }

    fn name(&self) -> &str {
        &self.name
    }
}
