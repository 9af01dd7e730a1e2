//! Legal move generation.
//!
//! Enumerates the opening move of a turn (unit steps and first jumps) for
//! every piece of a color, and provides the random selection used by
//! computer players.

use rand::Rng;

use crate::board::{Board, PlayerColor, STEP_DIRECTIONS};
use crate::rules::{continuation_jumps, validate_move, Move};

/// Generates every legal first move of a turn for `color`.
///
/// Steps come first for each piece, followed by its single-hop jumps.
/// Pieces are visited in row-major order.
pub fn legal_moves(color: PlayerColor, board: &Board) -> Vec<Move> {
    let mut moves = Vec::new();
    for from in board.pieces_of(color) {
        for dir in STEP_DIRECTIONS {
            let to = from.offset(dir);
            if validate_move(board, color, from, to) {
                moves.push(Move::new(color, from, to));
            }
        }
        moves.extend(continuation_jumps(board, color, from, None));
    }
    moves
}

/// Picks one legal first move uniformly at random.
///
/// Returns `None` if `color` has no legal move.
pub fn random_move(color: PlayerColor, board: &Board, rng: &mut impl Rng) -> Option<Move> {
    let legal = legal_moves(color, board);
    pick(&legal, rng)
}

/// Picks one element of `options` uniformly at random.
pub fn pick(options: &[Move], rng: &mut impl Rng) -> Option<Move> {
    if options.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..options.len());
    Some(options[idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{PlayerColor::*, Position, ALL_COLORS};
    use crate::rules::MoveKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn opening_moves_exist_for_every_color() {
        let board = Board::new(6);
        for color in ALL_COLORS {
            let moves = legal_moves(color, &board);
            assert!(!moves.is_empty(), "{:?} has no opening move", color);
            for mv in &moves {
                assert_eq!(mv.color, color);
                assert!(validate_move(&board, color, mv.from, mv.to));
            }
        }
    }

    #[test]
    fn red_opening_counts() {
        // Only the back row of the triangle can step; inner pieces can jump.
        let board = Board::new(2);
        let moves = legal_moves(Red, &board);
        let steps = moves.iter().filter(|m| m.kind() == Some(MoveKind::Step)).count();
        let jumps = moves.iter().filter(|m| m.kind() == Some(MoveKind::Jump)).count();
        assert_eq!(steps, 8);
        assert_eq!(jumps, 6);
    }

    #[test]
    fn inactive_color_has_no_moves() {
        let board = Board::new(2);
        assert!(legal_moves(Green, &board).is_empty());
        assert_eq!(random_move(Green, &board, &mut seeded_rng()), None);
    }

    #[test]
    fn random_move_is_legal() {
        let board = Board::new(4);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            for color in [Red, Blue, Green, Yellow] {
                let mv = random_move(color, &board, &mut rng).unwrap();
                assert!(validate_move(&board, color, mv.from, mv.to), "illegal {:?}", mv);
            }
        }
    }

    #[test]
    fn random_move_deterministic_with_same_seed() {
        let board = Board::new(3);
        let a = random_move(Green, &board, &mut StdRng::seed_from_u64(7));
        let b = random_move(Green, &board, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn blocked_piece_contributes_nothing() {
        let mut board = Board::empty();
        let centre = Position::new(8, 12);
        board.place(centre, Some(Red));
        for dir in STEP_DIRECTIONS {
            let ring = centre.offset(dir);
            board.place(ring, Some(Blue));
            board.place(ring.offset(dir), Some(Blue));
        }
        assert!(legal_moves(Red, &board).is_empty());
    }

    #[test]
    fn pick_from_empty_is_none() {
        assert_eq!(pick(&[], &mut seeded_rng()), None);
    }
}
