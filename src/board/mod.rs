//! Board representation.
//!
//! Contains the grid geometry, piece colors, positions, and the mutable
//! cell state of a game.

pub mod color;
pub mod geometry;
pub mod position;
pub mod state;

pub use color::{active_colors, PlayerColor, ALL_COLORS, COLOR_COUNT};
pub use geometry::{
    is_jump, is_playable_area, is_step, start_zone, COLS, JUMP_OFFSETS, PIECES_PER_COLOR,
    PLAYABLE_CELL_COUNT, ROWS, STEP_DIRECTIONS,
};
pub use position::Position;
pub use state::{Board, BoardSnapshot, Cell};
