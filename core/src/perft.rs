use crate::board::Board;
use crate::types::{Move, Player};

/// Counts the leaf nodes of the game tree `depth` plies below `board`,
/// with `player` to move.
///
/// A forced pass is a ply of its own. A finished game is a leaf wherever
/// it occurs.
pub fn perft(board: &Board, player: Player, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.valid_moves(player);

    if moves.is_empty() {
        if !board.has_valid_move(player.opponent()) {
            return 1;
        }
        return perft(board, player.opponent(), depth - 1);
    }

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in moves {
        let mut child = board.clone();
        child.apply_move(player, mv);
        nodes += perft(&child, player.opponent(), depth - 1);
    }

    nodes
}

/// Performs perft with a per-move breakdown at the root.
/// Empty when `player` has no move or `depth` is zero.
pub fn perft_divide(board: &Board, player: Player, depth: u8) -> Vec<(Move, u64)> {
    let mut results = Vec::new();
    if depth == 0 {
        return results;
    }

    for mv in board.valid_moves(player) {
        let mut child = board.clone();
        child.apply_move(player, mv);
        let nodes = if depth == 1 {
            1
        } else {
            perft(&child, player.opponent(), depth - 1)
        };
        results.push((mv, nodes));
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::positions;

    #[test]
    fn test_perft_starting_position() {
        let board = Board::new(6).unwrap();

        let test_positions = &[(1, 4), (2, 12), (3, 56)];

        for &(depth, expected) in test_positions {
            let result = perft(&board, Player::Light, depth);
            assert_eq!(
                result, expected,
                "Perft({}) failed: expected {}, got {}",
                depth, expected, result
            );
        }
    }

    #[test]
    fn test_perft_divide() {
        let board = Board::new(6).unwrap();
        let results = perft_divide(&board, Player::Dark, 2);

        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|&(_, n)| n == 3));
        assert_eq!(results.iter().map(|(_, n)| n).sum::<u64>(), 12);
    }

    #[test]
    fn test_perft_divide_shallow() {
        let board = Board::new(6).unwrap();
        assert_eq!(perft(&board, Player::Light, 0), 1);
        assert!(perft_divide(&board, Player::Light, 0).is_empty());

        let results = perft_divide(&board, Player::Light, 1);
        assert_eq!(results.len(), 4);
        assert_eq!(
            results.iter().map(|(_, n)| n).sum::<u64>(),
            perft(&board, Player::Light, 1)
        );
    }

    #[test]
    fn test_perft_finished_game() {
        let board = Board::from_notation(positions::LIGHT_WINS_4).unwrap();
        assert_eq!(perft(&board, Player::Dark, 3), 1);
        assert!(perft_divide(&board, Player::Dark, 3).is_empty());
    }
}
