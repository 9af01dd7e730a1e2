//! Move validation and application.
//!
//! A move relocates one piece either by a unit step to an adjacent empty
//! cell or by a single hop over an occupied neighbour onto the empty cell
//! beyond it. Jump chains are never validated as a whole: after each hop the
//! caller asks [`continuation_jumps`] for the next options.

use std::fmt;

use thiserror::Error;

use crate::board::{is_jump, is_step, Board, Cell, PlayerColor, Position, JUMP_OFFSETS};

/// How a move displaces its piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Step,
    Jump,
}

/// A single atomic relocation of one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub color: PlayerColor,
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub const fn new(color: PlayerColor, from: Position, to: Position) -> Self {
        Self { color, from, to }
    }

    /// Classifies the displacement, ignoring board contents.
    pub fn kind(&self) -> Option<MoveKind> {
        let delta = self.from.delta_to(self.to);
        if is_step(delta) {
            Some(MoveKind::Step)
        } else if is_jump(delta) {
            Some(MoveKind::Jump)
        } else {
            None
        }
    }

    /// The same move played backwards.
    pub const fn reversed(&self) -> Move {
        Move::new(self.color, self.to, self.from)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.color.symbol(), self.from, self.to)
    }
}

/// Reasons a move is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("position {0} is outside the board")]
    OutOfBounds(Position),

    #[error("position {0} is not part of the playing area")]
    NotPlayable(Position),

    #[error("there is no piece at {0}")]
    EmptyStart(Position),

    #[error("the piece at {at} does not belong to {color}")]
    NotOwnPiece { at: Position, color: PlayerColor },

    #[error("destination {0} is not empty")]
    DestinationOccupied(Position),

    #[error("{from} to {to} is neither a step nor a jump")]
    NotAdjacentOrJump { from: Position, to: Position },

    #[error("there is no piece to jump over at {0}")]
    NothingToJump(Position),

    #[error("{from} to {to} does not continue the jump chain")]
    NotAContinuation { from: Position, to: Position },
}

impl MoveError {
    /// True for errors that reference a cell off the playing area.
    pub fn is_invalid_position(&self) -> bool {
        matches!(self, MoveError::OutOfBounds(_) | MoveError::NotPlayable(_))
    }
}

/// Ensures `pos` names a playable cell.
fn check_position(board: &Board, pos: Position) -> Result<(), MoveError> {
    match board.get(pos) {
        None => Err(MoveError::OutOfBounds(pos)),
        Some(Cell::OutOfPlay) => Err(MoveError::NotPlayable(pos)),
        Some(_) => Ok(()),
    }
}

/// Ensures `pos` holds one of `color`'s pieces.
fn check_owner(board: &Board, color: PlayerColor, pos: Position) -> Result<(), MoveError> {
    match board.occupant(pos) {
        Some(c) if c == color => Ok(()),
        Some(_) => Err(MoveError::NotOwnPiece { at: pos, color }),
        None => Err(MoveError::EmptyStart(pos)),
    }
}

/// Checks a single step or single-hop jump for `color` from `from` to `to`.
///
/// Returns the kind of the move on success. The midpoint of a jump may hold
/// any color, including the mover's own.
pub fn check_move(
    board: &Board,
    color: PlayerColor,
    from: Position,
    to: Position,
) -> Result<MoveKind, MoveError> {
    check_position(board, from)?;
    check_position(board, to)?;
    check_owner(board, color, from)?;
    if !board.is_empty(to) {
        return Err(MoveError::DestinationOccupied(to));
    }

    let delta = from.delta_to(to);
    if is_step(delta) {
        return Ok(MoveKind::Step);
    }
    if is_jump(delta) {
        let mid = from.midpoint(to);
        return match board.occupant(mid) {
            Some(_) => Ok(MoveKind::Jump),
            None => Err(MoveError::NothingToJump(mid)),
        };
    }
    Err(MoveError::NotAdjacentOrJump { from, to })
}

/// Returns true if [`check_move`] accepts the move. Never mutates the board.
pub fn validate_move(board: &Board, color: PlayerColor, from: Position, to: Position) -> bool {
    check_move(board, color, from, to).is_ok()
}

/// Relocates `color`'s piece from `from` to `to`.
///
/// Game rules are assumed to have been checked by the caller; this only
/// guards the structural preconditions. Both cells are checked before either
/// is written, so an error leaves the board untouched.
pub fn apply_move(
    board: &mut Board,
    color: PlayerColor,
    from: Position,
    to: Position,
) -> Result<(), MoveError> {
    check_position(board, from)?;
    check_position(board, to)?;
    check_owner(board, color, from)?;
    if !board.is_empty(to) {
        return Err(MoveError::DestinationOccupied(to));
    }

    board.set(from, Cell::Empty);
    board.set(to, Cell::Occupied(color));
    Ok(())
}

/// Enumerates the hops available from `current` after a jump.
///
/// A candidate landing cell qualifies when it is playable and empty and the
/// cell between holds any piece. The cell the chain just left (`previous`)
/// is never offered, which rules out bouncing back and forth over the same
/// piece. Longer cycles are still allowed.
pub fn continuation_jumps(
    board: &Board,
    color: PlayerColor,
    current: Position,
    previous: Option<Position>,
) -> Vec<Move> {
    let mut jumps = Vec::new();
    for offset in JUMP_OFFSETS {
        let target = current.offset(offset);
        if Some(target) == previous {
            continue;
        }
        if !board.is_empty(target) {
            continue;
        }
        if board.occupant(current.midpoint(target)).is_some() {
            jumps.push(Move::new(color, current, target));
        }
    }
    jumps
}
