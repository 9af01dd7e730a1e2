//! Computer player.
//!
//! Picks uniformly among legal opening moves, then keeps jumping at random
//! while continuations exist, up to a fixed number of hops per turn.

use log::warn;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::{Decision, MoveRequest, MoveSource, PlayerKind, SourceError};
use crate::config::DEFAULT_CHAIN_CAP;
use crate::movegen::{pick, random_move};

/// A move source that plays random legal moves.
pub struct RandomSource {
    rng: SmallRng,
    chain_cap: usize,
}

impl RandomSource {
    /// Creates a source seeded with `seed` (0 = use entropy).
    pub fn new(seed: u64) -> Self {
        let rng = if seed != 0 {
            SmallRng::seed_from_u64(seed)
        } else {
            SmallRng::from_entropy()
        };
        RandomSource {
            rng,
            chain_cap: DEFAULT_CHAIN_CAP,
        }
    }

    /// Sets the most hops taken in a single turn.
    pub fn with_chain_cap(mut self, chain_cap: usize) -> Self {
        self.chain_cap = chain_cap;
        self
    }
}

impl MoveSource for RandomSource {
    fn request_move(&mut self, request: &MoveRequest<'_>) -> Result<Decision, SourceError> {
        if request.first {
            return Ok(random_move(request.color, request.board, &mut self.rng)
                .map(Decision::from)
                .unwrap_or(Decision::Pass));
        }
        if request.jumps_taken >= self.chain_cap {
            warn!("{} stops chaining after {} jumps", request.color, request.jumps_taken);
            return Ok(Decision::Pass);
        }
        Ok(pick(request.continuations, &mut self.rng)
            .map(Decision::from)
            .unwrap_or(Decision::Pass))
    }

    fn kind(&self) -> PlayerKind {
        PlayerKind::Computer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, PlayerColor, Position};
    use crate::rules::{continuation_jumps, validate_move, Move};

    fn first_request(board: &Board, color: PlayerColor) -> MoveRequest<'_> {
        MoveRequest {
            color,
            board,
            first: true,
            continuations: &[],
            jumps_taken: 0,
        }
    }

    #[test]
    fn first_move_is_legal() {
        let board = Board::new(2);
        let mut source = RandomSource::new(9);
        for _ in 0..20 {
            match source.request_move(&first_request(&board, PlayerColor::Blue)).unwrap() {
                Decision::Move { from, to } => {
                    assert!(validate_move(&board, PlayerColor::Blue, from, to))
                }
                Decision::Pass => panic!("computer passed with moves available"),
            }
        }
    }

    #[test]
    fn passes_when_stuck() {
        let board = Board::new(2);
        let mut source = RandomSource::new(9);
        let decision = source.request_move(&first_request(&board, PlayerColor::Green)).unwrap();
        assert_eq!(decision, Decision::Pass);
    }

    #[test]
    fn takes_continuation_below_cap() {
        let mut board = Board::empty();
        board.place(Position::new(8, 16), Some(PlayerColor::Red));
        board.place(Position::new(8, 18), Some(PlayerColor::Blue));
        let options = continuation_jumps(&board, PlayerColor::Red, Position::new(8, 16), Some(Position::new(8, 12)));
        assert_eq!(options, vec![Move::new(PlayerColor::Red, Position::new(8, 16), Position::new(8, 20))]);

        let mut source = RandomSource::new(3).with_chain_cap(2);
        let mut request = MoveRequest {
            color: PlayerColor::Red,
            board: &board,
            first: false,
            continuations: &options,
            jumps_taken: 1,
        };
        assert_eq!(source.request_move(&request).unwrap(), Decision::from(options[0]));

        request.jumps_taken = 2;
        assert_eq!(source.request_move(&request).unwrap(), Decision::Pass);
    }

    #[test]
    fn reports_computer_kind() {
        assert_eq!(RandomSource::new(1).kind(), PlayerKind::Computer);
    }
}
