//! Board state representation.
//!
//! Holds the cell contents of the 17x25 grid. Cells outside the hexagram
//! are permanently `OutOfPlay`; every other cell is either `Empty` or holds
//! exactly one piece of some color.

use std::fmt;

use super::color::{active_colors, PlayerColor, ALL_COLORS};
use super::geometry::{is_playable_area, start_zone, COLS, ROWS};
use super::position::Position;

/// Contents of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Not part of the hexagram.
    OutOfPlay,
    /// Playable and vacant.
    Empty,
    /// Playable and holding a piece.
    Occupied(PlayerColor),
}

impl Cell {
    /// Returns the color of the piece in this cell, if any.
    pub const fn occupant(self) -> Option<PlayerColor> {
        match self {
            Cell::Occupied(color) => Some(color),
            _ => None,
        }
    }
}

/// Read-only copy of every cell, row-major.
pub type BoardSnapshot = [[Cell; COLS]; ROWS];

/// Complete board state.
///
/// Uses a fixed-size 2D array so the board is trivially copyable and cell
/// lookup is O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: BoardSnapshot,
}

impl Board {
    /// Creates a board with the hexagram marked out and no pieces placed.
    pub fn empty() -> Self {
        let mut cells = [[Cell::OutOfPlay; COLS]; ROWS];
        for (row, line) in cells.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                if is_playable_area(row as i32, col as i32) {
                    *cell = Cell::Empty;
                }
            }
        }
        Board { cells }
    }

    /// Creates the opening position for `num_players` players.
    ///
    /// The first `num_players` colors of the seating order get their ten
    /// pieces on their starting triangle. The caller validates the count.
    pub fn new(num_players: usize) -> Self {
        let mut board = Board::empty();
        for &color in active_colors(num_players) {
            for &pos in start_zone(color) {
                board.set(pos, Cell::Occupied(color));
            }
        }
        board
    }

    /// Returns the cell at `pos`, or `None` if `pos` lies outside the grid.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if pos.row < 0 || pos.col < 0 {
            return None;
        }
        self.cells
            .get(pos.row as usize)
            .and_then(|line| line.get(pos.col as usize))
            .copied()
    }

    /// Returns true if `pos` is inside the grid and not `OutOfPlay`.
    pub fn is_within_board(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(Cell::Empty) | Some(Cell::Occupied(_)))
    }

    /// Returns true if `pos` is a playable, vacant cell.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Some(Cell::Empty)
    }

    /// Returns the color of the piece at `pos`, if any.
    pub fn occupant(&self, pos: Position) -> Option<PlayerColor> {
        self.get(pos).and_then(Cell::occupant)
    }

    /// Places `piece` on a playable cell, or clears it with `None`.
    /// Returns false (leaving the board unchanged) if `pos` is not playable.
    pub fn place(&mut self, pos: Position, piece: Option<PlayerColor>) -> bool {
        if !self.is_within_board(pos) {
            return false;
        }
        let cell = match piece {
            Some(color) => Cell::Occupied(color),
            None => Cell::Empty,
        };
        self.set(pos, cell);
        true
    }

    /// Removes every piece from the board.
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            if *cell != Cell::OutOfPlay {
                *cell = Cell::Empty;
            }
        }
    }

    /// Positions of every piece of `color`, in row-major order.
    pub fn pieces_of(&self, color: PlayerColor) -> Vec<Position> {
        self.positions()
            .filter(|&pos| self.occupant(pos) == Some(color))
            .collect()
    }

    /// Number of pieces of `color` on the board.
    pub fn count(&self, color: PlayerColor) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| **c == Cell::Occupied(color))
            .count()
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        ALL_COLORS.iter().map(|&c| self.count(c)).sum()
    }

    /// Iterates over every grid position, row-major.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        (0..ROWS as i32).flat_map(|row| (0..COLS as i32).map(move |col| Position::new(row, col)))
    }

    /// Returns a copy of every cell for rendering.
    pub fn snapshot(&self) -> BoardSnapshot {
        self.cells
    }

    /// Writes `cell` without any checks. Callers guarantee `pos` is in the grid.
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.row as usize][pos.col as usize] = cell;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..COLS {
            write!(f, "{} ", col % 10)?;
        }
        writeln!(f)?;
        for (row, line) in self.cells.iter().enumerate() {
            write!(f, "{:>2} ", row)?;
            for cell in line {
                match cell {
                    Cell::OutOfPlay => write!(f, "  ")?,
                    Cell::Empty => write!(f, ". ")?,
                    Cell::Occupied(color) => write!(f, "{} ", color.symbol())?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::geometry::{PIECES_PER_COLOR, PLAYABLE_CELL_COUNT};

    #[test]
    fn empty_board_marks_hexagram() {
        let board = Board::empty();
        let empty = board.snapshot().iter().flatten().filter(|c| **c == Cell::Empty).count();
        assert_eq!(empty, PLAYABLE_CELL_COUNT);
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn initial_piece_counts_per_player_count() {
        for n in 2..=6 {
            let board = Board::new(n);
            assert_eq!(board.occupied_count(), PIECES_PER_COLOR * n, "{} players", n);
            for (i, color) in ALL_COLORS.iter().enumerate() {
                let expected = if i < n { PIECES_PER_COLOR } else { 0 };
                assert_eq!(board.count(*color), expected);
            }
        }
    }

    #[test]
    fn get_outside_grid_is_none() {
        let board = Board::new(2);
        assert_eq!(board.get(Position::new(-1, 0)), None);
        assert_eq!(board.get(Position::new(0, 25)), None);
        assert_eq!(board.get(Position::new(0, 0)), Some(Cell::OutOfPlay));
        assert_eq!(board.get(Position::new(0, 12)), Some(Cell::Occupied(PlayerColor::Red)));
    }

    #[test]
    fn within_board_distinguishes_out_of_play_from_empty() {
        let board = Board::new(2);
        assert!(!board.is_within_board(Position::new(0, 0)));
        assert!(board.is_within_board(Position::new(8, 12)));
        assert!(board.is_empty(Position::new(8, 12)));
        assert!(board.is_within_board(Position::new(0, 12)));
        assert!(!board.is_within_board(Position::new(40, 40)));
    }

    #[test]
    fn place_rejects_out_of_play() {
        let mut board = Board::empty();
        assert!(!board.place(Position::new(0, 0), Some(PlayerColor::Red)));
        assert!(board.place(Position::new(8, 12), Some(PlayerColor::Red)));
        assert_eq!(board.occupant(Position::new(8, 12)), Some(PlayerColor::Red));
        assert!(board.place(Position::new(8, 12), None));
        assert!(board.is_empty(Position::new(8, 12)));
    }

    #[test]
    fn clear_keeps_geometry() {
        let mut board = Board::new(6);
        board.clear();
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn pieces_of_lists_start_zone() {
        let board = Board::new(3);
        let mut green = board.pieces_of(PlayerColor::Green);
        let mut expected: Vec<Position> = start_zone(PlayerColor::Green).to_vec();
        green.sort();
        expected.sort();
        assert_eq!(green, expected);
    }

    #[test]
    fn display_renders_pieces_and_dots() {
        let rendered = Board::new(2).to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), ROWS + 1);
        assert!(lines[1].starts_with(" 0 "));
        assert!(lines[1].contains('R'));
        assert!(lines[9].contains(". "));
        assert!(lines[17].contains('B'));
    }
}
