use crate::render::Renderer;
use anyhow::ensure;
use log::{debug, info};
use othello_agents::{Agent, MinimaxAgent};
use othello_core::{Board, Outcome, Player};
use rand::Rng;
use std::io;
use std::thread;
use std::time::Duration;

/// Summary of a finished game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameReport {
    pub outcome: Outcome,
    pub light_discs: usize,
    pub dark_discs: usize,
    pub half_moves: u32,
    pub passes: u32,
    /// Searches run by the search agent during this game.
    pub searches: u64,
    /// Nodes visited by those searches.
    pub visited_nodes: u64,
}

/// A search agent against an opponent agent on one live board.
pub struct Game {
    board: Board,
    turn: Player,
    search: MinimaxAgent,
    opponent: Box<dyn Agent>,
}

impl Game {
    pub fn new(
        board: Board,
        search: MinimaxAgent,
        opponent: Box<dyn Agent>,
        first: Player,
    ) -> anyhow::Result<Self> {
        ensure!(
            search.player() != opponent.player(),
            "both agents play {}",
            search.player()
        );

        Ok(Self {
            board,
            turn: first,
            search,
            opponent,
        })
    }

    /// Like [`Game::new`], with the side to move first chosen uniformly.
    pub fn random_start<R: Rng>(
        board: Board,
        search: MinimaxAgent,
        opponent: Box<dyn Agent>,
        rng: &mut R,
    ) -> anyhow::Result<Self> {
        let first = if rng.gen_bool(0.5) {
            Player::Light
        } else {
            Player::Dark
        };
        Self::new(board, search, opponent, first)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn search_agent(&self) -> &MinimaxAgent {
        &self.search
    }

    /// Plays until neither side can move. The board is drawn before and
    /// after every half-move, then the driver waits `delay`.
    pub fn play(&mut self, renderer: &mut dyn Renderer, delay: Duration) -> io::Result<GameReport> {
        let searches_before = self.search.engine().searches();
        let visited_before = self.search.engine().visited_nodes();
        let mut half_moves = 0;
        let mut passes = 0;

        info!(
            "{} ({}) vs {} ({}), {} moves first",
            self.search.name(),
            self.search.player(),
            self.opponent.name(),
            self.opponent.player(),
            self.turn
        );

        while !self.board.is_terminal() {
            renderer.draw(&self.board)?;

            let agent: &mut dyn Agent = if self.turn == self.search.player() {
                &mut self.search
            } else {
                self.opponent.as_mut()
            };

            match agent.best_move(&self.board) {
                Some(mv) => {
                    let flipped = self.board.apply_move(self.turn, mv);
                    half_moves += 1;
                    debug!("{} plays {mv}, flipping {flipped}", self.turn);
                }
                None => {
                    passes += 1;
                    debug!("{} passes", self.turn);
                }
            }

            self.turn = self.turn.opponent();

            renderer.draw(&self.board)?;
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }

        let report = GameReport {
            outcome: self.board.winner(),
            light_discs: self.board.count(Player::Light),
            dark_discs: self.board.count(Player::Dark),
            half_moves,
            passes,
            searches: self.search.engine().searches() - searches_before,
            visited_nodes: self.search.engine().visited_nodes() - visited_before,
        };

        info!(
            "{} ({} to {}) after {} moves and {} passes",
            report.outcome, report.light_discs, report.dark_discs, half_moves, passes
        );

        Ok(report)
    }
}
