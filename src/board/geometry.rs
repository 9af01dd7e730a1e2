//! Fixed board geometry for the six-pointed star.
//!
//! The hexagram is laid out on a 17x25 rectangular grid using a doubled
//! column encoding: a cell is only ever playable when its row and column
//! share parity, so horizontal neighbours are two columns apart and diagonal
//! neighbours one row and one column apart. All data here is compile-time
//! `static` and never changes during a game.

use super::color::{PlayerColor, COLOR_COUNT};
use super::position::Position;

/// Number of grid rows.
pub const ROWS: usize = 17;

/// Number of grid columns.
pub const COLS: usize = 25;

/// Pieces per color.
pub const PIECES_PER_COLOR: usize = 10;

/// Number of playable cells in the full hexagram.
pub const PLAYABLE_CELL_COUNT: usize = 121;

/// The six unit-step directions on the hex-offset grid.
pub const STEP_DIRECTIONS: [(i32, i32); 6] = [(0, -2), (1, -1), (1, 1), (0, 2), (-1, 1), (-1, -1)];

/// The six single-hop jump displacements: twice each step direction.
pub const JUMP_OFFSETS: [(i32, i32); 6] = [(0, -4), (2, -2), (2, 2), (0, 4), (-2, 2), (-2, -2)];

/// Returns true if the grid cell belongs to the star-shaped playable area.
///
/// Rows 0-3 and 13-16 are the top and bottom arms, widening towards the
/// centre. Rows 4 and 12 span the full width. Rows 5-8 narrow towards the
/// centre and rows 9-11 widen back out, forming the four side arms.
pub fn is_playable_area(row: i32, col: i32) -> bool {
    if row < 0 || row >= ROWS as i32 || col < 0 || col >= COLS as i32 {
        return false;
    }
    if row % 2 != col % 2 {
        return false;
    }
    let max_col = COLS as i32;
    match row {
        0..=3 => col >= 12 - row && col <= 12 + row,
        4 | 12 => true,
        5..=8 => col >= row - 4 && col < max_col - (row - 4),
        9..=11 => col >= 12 - row && col <= row + 12,
        _ => col >= row - 4 && col <= 28 - row,
    }
}

/// Shorthand constructor used only in table construction.
const fn p(row: i32, col: i32) -> Position {
    Position::new(row, col)
}

/// Starting triangle for each color, indexed by `PlayerColor as usize`.
static START_ZONES: [[Position; PIECES_PER_COLOR]; COLOR_COUNT] = [
    // Red: top arm
    [p(0, 12), p(1, 11), p(1, 13), p(2, 10), p(2, 12), p(2, 14), p(3, 9), p(3, 11), p(3, 13), p(3, 15)],
    // Blue: bottom arm
    [p(16, 12), p(15, 11), p(15, 13), p(14, 10), p(14, 12), p(14, 14), p(13, 9), p(13, 11), p(13, 13), p(13, 15)],
    // Green: upper-left arm
    [p(7, 3), p(6, 4), p(6, 2), p(5, 5), p(5, 3), p(5, 1), p(4, 6), p(4, 4), p(4, 2), p(4, 0)],
    // Yellow: lower-right arm
    [p(9, 21), p(10, 22), p(10, 20), p(11, 23), p(11, 21), p(11, 19), p(12, 24), p(12, 22), p(12, 20), p(12, 18)],
    // Orange: upper-right arm
    [p(7, 21), p(6, 22), p(6, 20), p(5, 23), p(5, 21), p(5, 19), p(4, 24), p(4, 22), p(4, 20), p(4, 18)],
    // Purple: lower-left arm
    [p(9, 3), p(10, 4), p(10, 2), p(11, 5), p(11, 3), p(11, 1), p(12, 6), p(12, 4), p(12, 2), p(12, 0)],
];

/// Returns the ten starting cells of `color`.
pub fn start_zone(color: PlayerColor) -> &'static [Position; PIECES_PER_COLOR] {
    &START_ZONES[color as usize]
}

/// Returns true if `(dr, dc)` is one of the six unit steps.
pub fn is_step(delta: (i32, i32)) -> bool {
    STEP_DIRECTIONS.contains(&delta)
}

/// Returns true if `(dr, dc)` is one of the six jump displacements.
pub fn is_jump(delta: (i32, i32)) -> bool {
    JUMP_OFFSETS.contains(&delta)
}
