use crate::evaluation::Evaluator;
use log::debug;
use othello_core::{Board, Move, Player};

/// Search parameters for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// The side the root maximizes for.
    pub player: Player,
    /// Plies to search before scoring heuristically. Always at least 1.
    pub depth: u8,
    /// Enables alpha-beta cutoffs.
    pub prune: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SearchConfigError {
    #[display("search depth must be at least 1")]
    ZeroDepth,
}

impl SearchConfig {
    pub fn new(player: Player, depth: u8, prune: bool) -> Result<Self, SearchConfigError> {
        if depth == 0 {
            return Err(SearchConfigError::ZeroDepth);
        }
        Ok(Self {
            player,
            depth,
            prune,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// `None` when the searching side has no legal move at the root.
    pub best_move: Option<Move>,
    pub score: f64,
    pub depth: u8,
    /// Nodes visited, diagnostics only.
    pub nodes: u64,
}

/// Value of one subtree.
struct Node {
    best_move: Option<Move>,
    score: f64,
    nodes: u64,
}

impl Node {
    fn leaf(score: f64) -> Self {
        Self {
            best_move: None,
            score,
            nodes: 1,
        }
    }
}

/// Depth-limited minimax with optional alpha-beta pruning.
///
/// Max layers play for the configured player and min layers for the
/// opponent. Each child is searched on its own copy of the board.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    config: SearchConfig,
    evaluator: Evaluator,
    visited_nodes: u64,
    searches: u64,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_evaluator(config, Evaluator::default())
    }

    pub fn with_evaluator(config: SearchConfig, evaluator: Evaluator) -> Self {
        Self {
            config,
            evaluator,
            visited_nodes: 0,
            searches: 0,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Searches `board` with the configured player at the root.
    /// Does not touch the running statistics.
    pub fn search(&self, board: &Board) -> SearchResult {
        let root = self.max_node(board, 0, f64::NEG_INFINITY, f64::INFINITY, false);

        SearchResult {
            best_move: root.best_move,
            score: root.score,
            depth: self.config.depth,
            nodes: root.nodes,
        }
    }

    /// Searches `board` and returns only the chosen move, adding the visited
    /// nodes to the running total. `None` means the configured player must pass.
    pub fn get_move(&mut self, board: &Board) -> Option<Move> {
        let result = self.search(board);

        self.visited_nodes += result.nodes;
        self.searches += 1;

        match result.best_move {
            Some(mv) => debug!(
                "{} plays {} (score {:.3}, depth {}, {} nodes)",
                self.config.player, mv, result.score, result.depth, result.nodes
            ),
            None => debug!("{} has no move and passes", self.config.player),
        }

        result.best_move
    }

    /// Total nodes visited across every `get_move` call.
    pub fn visited_nodes(&self) -> u64 {
        self.visited_nodes
    }

    /// Number of `get_move` calls.
    pub fn searches(&self) -> u64 {
        self.searches
    }

    /// Mean nodes visited per `get_move` call, 0 before the first one.
    pub fn mean_visited_nodes(&self) -> f64 {
        if self.searches == 0 {
            return 0.0;
        }
        self.visited_nodes as f64 / self.searches as f64
    }

    pub fn reset_stats(&mut self) {
        self.visited_nodes = 0;
        self.searches = 0;
    }

    fn max_node(&self, board: &Board, depth: u8, mut alpha: f64, beta: f64, passed: bool) -> Node {
        let player = self.config.player;

        if depth == self.config.depth {
            return Node::leaf(self.evaluator.evaluate(board, player));
        }

        let moves = board.valid_moves(player);
        if moves.is_empty() {
            // Two passes in a row: the game is really over.
            if passed {
                return Node::leaf(self.evaluator.terminal_evaluate(board, player));
            }
            let child = self.min_node(board, depth + 1, alpha, beta, true);
            return Node {
                best_move: None,
                score: child.score,
                nodes: child.nodes + 1,
            };
        }

        let mut best_move = None;
        let mut best_score = f64::NEG_INFINITY;
        let mut nodes = 1;

        for mv in moves {
            let mut child_board = board.clone();
            child_board.apply_move(player, mv);

            let child = self.min_node(&child_board, depth + 1, alpha, beta, false);
            nodes += child.nodes;

            // Strictly better only: the first of equal moves is kept.
            if child.score > best_score {
                best_score = child.score;
                best_move = Some(mv);
            }

            if self.config.prune {
                if best_score >= beta {
                    return Node {
                        best_move,
                        score: best_score,
                        nodes,
                    };
                }
                alpha = alpha.max(best_score);
            }
        }

        Node {
            best_move,
            score: best_score,
            nodes,
        }
    }

    fn min_node(&self, board: &Board, depth: u8, alpha: f64, mut beta: f64, passed: bool) -> Node {
        let player = self.config.player;
        let opponent = player.opponent();

        if depth == self.config.depth {
            return Node::leaf(self.evaluator.evaluate(board, player));
        }

        let moves = board.valid_moves(opponent);
        if moves.is_empty() {
            if passed {
                return Node::leaf(self.evaluator.terminal_evaluate(board, player));
            }
            let child = self.max_node(board, depth + 1, alpha, beta, true);
            return Node {
                best_move: None,
                score: child.score,
                nodes: child.nodes + 1,
            };
        }

        let mut best_move = None;
        let mut best_score = f64::INFINITY;
        let mut nodes = 1;

        for mv in moves {
            let mut child_board = board.clone();
            child_board.apply_move(opponent, mv);

            let child = self.max_node(&child_board, depth + 1, alpha, beta, false);
            nodes += child.nodes;

            if child.score < best_score {
                best_score = child.score;
                best_move = Some(mv);
            }

            if self.config.prune {
                if best_score <= alpha {
                    return Node {
                        best_move,
                        score: best_score,
                        nodes,
                    };
                }
                beta = beta.min(best_score);
            }
        }

        Node {
            best_move,
            score: best_score,
            nodes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::Weights;
    use othello_core::positions;

    fn engine(player: Player, depth: u8, prune: bool) -> SearchEngine {
        SearchEngine::new(SearchConfig::new(player, depth, prune).unwrap())
    }

    #[test]
    fn test_zero_depth_rejected() {
        assert_eq!(
            SearchConfig::new(Player::Light, 0, true),
            Err(SearchConfigError::ZeroDepth)
        );
    }

    #[test]
    fn test_custom_evaluator_drives_scores() {
        let weights = Weights {
            corners: 1.0,
            coins: 0.0,
            mobility: 0.0,
        };
        let config = SearchConfig::new(Player::Light, 1, true).unwrap();
        let engine = SearchEngine::with_evaluator(config, Evaluator::new(weights));
        assert_eq!(engine.evaluator().weights(), weights);

        // No opening move reaches a corner, so every child scores zero.
        let result = engine.search(&Board::new(6).unwrap());
        assert_eq!(result.best_move, Some(Move::new(1, 3)));
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_opening_depth_one() {
        let board = Board::new(6).unwrap();
        let result = engine(Player::Light, 1, false).search(&board);

        // Every opening flips one disc and scores 2 * 3/5; the first in
        // row-major order wins the tie.
        assert_eq!(result.best_move, Some(Move::new(1, 3)));
        assert!((result.score - 1.2).abs() < 1e-9);
        assert_eq!(result.depth, 1);
        assert_eq!(result.nodes, 5);
    }

    #[test]
    fn test_opening_depth_one_dark() {
        let board = Board::new(6).unwrap();
        let result = engine(Player::Dark, 1, true).search(&board);

        assert_eq!(result.best_move, Some(Move::new(1, 2)));
        assert!((result.score - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_heuristic_leaf_ignores_game_over() {
        // Depth 1 reaches the leaf after Light's forced pass, before the
        // second pass could confirm the end of the game.
        let board = Board::from_notation(positions::DRAWN_6).unwrap();
        let result = engine(Player::Light, 1, false).search(&board);

        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.nodes, 2);
    }

    #[test]
    fn test_double_pass_scores_terminal() {
        let board = Board::from_notation(positions::LIGHT_WINS_4).unwrap();

        let light = engine(Player::Light, 2, true).search(&board);
        assert_eq!(light.best_move, None);
        assert_eq!(light.score, 1000.0);
        assert_eq!(light.nodes, 2);

        let dark = engine(Player::Dark, 3, false).search(&board);
        assert_eq!(dark.score, -1000.0);

        let drawn = Board::from_notation(positions::DRAWN_6).unwrap();
        assert_eq!(engine(Player::Dark, 4, true).search(&drawn).score, 0.0);
    }

    #[test]
    fn test_get_move_accumulates_nodes() {
        let board = Board::new(6).unwrap();
        let mut engine = engine(Player::Light, 1, false);

        assert_eq!(engine.mean_visited_nodes(), 0.0);
        assert_eq!(engine.get_move(&board), Some(Move::new(1, 3)));
        assert_eq!(engine.get_move(&board), Some(Move::new(1, 3)));
        assert_eq!(engine.visited_nodes(), 10);
        assert_eq!(engine.searches(), 2);
        assert_eq!(engine.mean_visited_nodes(), 5.0);

        engine.reset_stats();
        assert_eq!(engine.visited_nodes(), 0);
    }

    #[test]
    fn test_search_does_not_mutate_board() {
        let board = Board::new(6).unwrap();
        let before = board.clone();
        engine(Player::Light, 3, true).search(&board);
        assert_eq!(board, before);
    }

    #[test]
    fn test_prefers_corner() {
        // b2 comes first in row-major order, but a6 also takes a corner.
        let board = Board::from_notation("....../...XO./....../O...../X...../......").unwrap();
        assert_eq!(
            board.valid_moves(Player::Light),
            vec![Move::new(1, 2), Move::new(5, 0)]
        );

        let result = engine(Player::Light, 1, true).search(&board);
        assert_eq!(result.best_move, Some(Move::new(5, 0)));
        assert!((result.score - 6.2).abs() < 1e-9);
    }
}
