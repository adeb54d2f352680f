use crate::{
    search::{SearchConfig, SearchEngine, SearchResult},
    Agent,
};
use othello_core::{Board, Move, Player};

pub struct MinimaxAgent {
    name: String,
    engine: SearchEngine,
}

impl MinimaxAgent {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_engine(SearchEngine::new(config))
    }

    pub fn with_engine(engine: SearchEngine) -> Self {
        let config = engine.config();
        let name = if config.prune {
            format!("AlphaBeta(depth={})", config.depth)
        } else {
            format!("Minimax(depth={})", config.depth)
        };

        MinimaxAgent { name, engine }
    }

    /// Runs a search without recording it in the statistics.
    pub fn analyze(&self, board: &Board) -> SearchResult {
        self.engine.search(board)
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }
}

impl Agent for MinimaxAgent {
    fn best_move(&mut self, board: &Board) -> Option<Move> {
        self.engine.get_move(board)
    }

    fn player(&self) -> Player {
        self.engine.config().player
    }

    fn name(&self) -> &str {
        &self.name
    }
}
