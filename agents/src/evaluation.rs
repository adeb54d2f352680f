use othello_core::{Board, Player};

/// Score of a finished game the searching player has won.
pub const WIN_SCORE: f64 = 1000.0;

/// Relative weight of each heuristic term.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weights {
    pub corners: f64,
    pub coins: f64,
    /// Legal-move balance. Zero by default: the term is available for
    /// tuning but does not contribute to the stock evaluation.
    pub mobility: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            corners: 5.0,
            coins: 2.0,
            mobility: 0.0,
        }
    }
}

/// Heuristic position scorer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Evaluator {
    weights: Weights,
}

impl Evaluator {
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> Weights {
        self.weights
    }

    /// Scores a position from `player`'s perspective. Each term lies in
    /// [-1, 1], so the stock weights bound the result to [-7, 7].
    pub fn evaluate(&self, board: &Board, player: Player) -> f64 {
        let mut score = self.weights.corners * corner_ratio(board, player)
            + self.weights.coins * coin_ratio(board, player);

        // Mobility needs two full move generations; skip it while unweighted.
        if self.weights.mobility != 0.0 {
            score += self.weights.mobility * mobility_ratio(board, player);
        }

        score
    }

    /// Scores a finished game: +1000 for a win, -1000 for a loss, 0 for a draw.
    ///
    /// Only meaningful once both sides are out of moves; the search calls it
    /// after two consecutive passes and nowhere else.
    pub fn terminal_evaluate(&self, board: &Board, player: Player) -> f64 {
        match board.winner().winner() {
            Some(winner) if winner == player => WIN_SCORE,
            Some(_) => -WIN_SCORE,
            None => 0.0,
        }
    }
}

/// `(ours - theirs) / (ours + theirs)`, or 0 when both are zero.
pub fn ratio(ours: usize, theirs: usize) -> f64 {
    let total = ours + theirs;
    if total == 0 {
        return 0.0;
    }
    (ours as f64 - theirs as f64) / total as f64
}

/// Disc balance between `player` and the opponent.
pub fn coin_ratio(board: &Board, player: Player) -> f64 {
    ratio(board.count(player), board.count(player.opponent()))
}

/// Corner ownership balance between `player` and the opponent.
pub fn corner_ratio(board: &Board, player: Player) -> f64 {
    ratio(
        board.count_corners(player),
        board.count_corners(player.opponent()),
    )
}

/// Legal-move balance between `player` and the opponent.
pub fn mobility_ratio(board: &Board, player: Player) -> f64 {
    ratio(
        board.valid_moves(player).len(),
        board.valid_moves(player.opponent()).len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use othello_core::{positions, Move};

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_ratio_guards_zero() {
        assert_eq!(ratio(0, 0), 0.0);
        assert_eq!(ratio(3, 0), 1.0);
        assert_eq!(ratio(0, 2), -1.0);
        assert!((ratio(4, 1) - 0.6).abs() < EPSILON);
    }

    #[test]
    fn test_custom_weights() {
        let weights = Weights {
            corners: 1.0,
            coins: 0.0,
            mobility: 0.5,
        };
        assert_eq!(Evaluator::new(weights).weights(), weights);
        assert_eq!(Evaluator::default().weights().mobility, 0.0);
    }

    #[test]
    fn test_starting_position_evaluation() {
        let board = Board::new(6).unwrap();
        let evaluator = Evaluator::default();

        assert_eq!(evaluator.evaluate(&board, Player::Light), 0.0);
        assert_eq!(evaluator.evaluate(&board, Player::Dark), 0.0);
    }

    #[test]
    fn test_perspective_evaluation() {
        let mut board = Board::new(6).unwrap();
        board.apply_move(Player::Light, Move::new(1, 3));
        let evaluator = Evaluator::default();

        // Light 4 discs, Dark 1, no corners: 2 * 3/5.
        let light = evaluator.evaluate(&board, Player::Light);
        let dark = evaluator.evaluate(&board, Player::Dark);
        assert!((light - 1.2).abs() < EPSILON);
        assert!((light + dark).abs() < EPSILON);
    }

    #[test]
    fn test_corners_dominate_coins() {
        // Dark holds more discs but Light owns the only corner.
        let board = Board::from_notation("O...../.XX.../.XX.../....../....../......").unwrap();
        let evaluator = Evaluator::default();

        // 5 * 1 + 2 * (1 - 4) / 5
        let score = evaluator.evaluate(&board, Player::Light);
        assert!((score - 3.8).abs() < EPSILON);
    }

    #[test]
    fn test_mobility_is_unweighted_by_default() {
        let mut board = Board::new(6).unwrap();
        board.apply_move(Player::Light, Move::new(1, 3));
        board.apply_move(Player::Dark, Move::new(1, 4));

        // Light has 4 moves against Dark's 5: the term is live but weightless.
        assert!((mobility_ratio(&board, Player::Light) + 1.0 / 9.0).abs() < EPSILON);
        assert_eq!(Weights::default().mobility, 0.0);

        let base = Evaluator::default().evaluate(&board, Player::Light);
        let tuned = Evaluator::new(Weights {
            mobility: 1.0,
            ..Weights::default()
        })
        .evaluate(&board, Player::Light);
        assert!((tuned - base - mobility_ratio(&board, Player::Light)).abs() < EPSILON);
    }

    #[test]
    fn test_terminal_evaluation() {
        let evaluator = Evaluator::default();

        let board = Board::from_notation(positions::LIGHT_WINS_4).unwrap();
        assert_eq!(evaluator.terminal_evaluate(&board, Player::Light), 1000.0);
        assert_eq!(evaluator.terminal_evaluate(&board, Player::Dark), -1000.0);

        let board = Board::from_notation(positions::DRAWN_6).unwrap();
        assert_eq!(evaluator.terminal_evaluate(&board, Player::Light), 0.0);
    }
}
