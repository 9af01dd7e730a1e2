//! Game rules: move legality, jump chains, and win detection.

pub mod moves;
pub mod win;

pub use moves::{
    apply_move, check_move, continuation_jumps, validate_move, Move, MoveError, MoveKind,
};
pub use win::{check_win, target_arm, target_zone, TargetLayout};
