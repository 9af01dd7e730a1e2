//! Win detection.
//!
//! A color wins once every one of its pieces sits inside its target zone.
//! Target zones are explicit tables keyed by color and layout, not derived
//! from geometry.

use serde::{Deserialize, Serialize};

use crate::board::{start_zone, Board, PlayerColor, Position, PIECES_PER_COLOR};

/// Which table maps colors to their target arms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLayout {
    /// The historical table: red and blue swap arms, green and yellow swap
    /// arms, orange and purple target their own starting arms.
    #[default]
    Classic,
    /// Every color targets the arm directly opposite its start.
    Opposite,
}

impl TargetLayout {
    /// Returns the lowercase config name.
    pub const fn name(self) -> &'static str {
        match self {
            TargetLayout::Classic => "classic",
            TargetLayout::Opposite => "opposite",
        }
    }

    /// Parses a layout from its lowercase config name.
    pub fn from_name(name: &str) -> Option<TargetLayout> {
        match name {
            "classic" => Some(TargetLayout::Classic),
            "opposite" => Some(TargetLayout::Opposite),
            _ => None,
        }
    }
}

/// Returns the color whose starting arm `color` must fill.
pub const fn target_arm(color: PlayerColor, layout: TargetLayout) -> PlayerColor {
    use PlayerColor::*;
    match (layout, color) {
        (_, Red) => Blue,
        (_, Blue) => Red,
        (_, Green) => Yellow,
        (_, Yellow) => Green,
        (TargetLayout::Classic, Orange) => Orange,
        (TargetLayout::Classic, Purple) => Purple,
        (TargetLayout::Opposite, Orange) => Purple,
        (TargetLayout::Opposite, Purple) => Orange,
    }
}

/// Returns the ten cells `color` must occupy to win.
pub fn target_zone(color: PlayerColor, layout: TargetLayout) -> &'static [Position; PIECES_PER_COLOR] {
    start_zone(target_arm(color, layout))
}

/// True if every piece of `color` on the board lies inside its target zone.
pub fn check_win(board: &Board, color: PlayerColor, layout: TargetLayout) -> bool {
    let zone = target_zone(color, layout);
    board.pieces_of(color).iter().all(|pos| zone.contains(pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{PlayerColor::*, ALL_COLORS};

    fn fill_target(color: PlayerColor, layout: TargetLayout) -> Board {
        let mut board = Board::empty();
        for &pos in target_zone(color, layout) {
            assert!(board.place(pos, Some(color)));
        }
        board
    }

    #[test]
    fn full_target_zone_wins() {
        for layout in [TargetLayout::Classic, TargetLayout::Opposite] {
            for color in ALL_COLORS {
                let board = fill_target(color, layout);
                assert!(check_win(&board, color, layout), "{:?} {:?}", color, layout);
            }
        }
    }

    #[test]
    fn one_piece_outside_loses() {
        let mut board = fill_target(Red, TargetLayout::Classic);
        let inside = target_zone(Red, TargetLayout::Classic)[0];
        board.place(inside, None);
        board.place(Position::new(8, 12), Some(Red));
        assert_eq!(board.count(Red), 10);
        assert!(!check_win(&board, Red, TargetLayout::Classic));
    }

    #[test]
    fn opening_position_is_not_a_win_for_travelling_colors() {
        let board = Board::new(6);
        for color in [Red, Blue, Green, Yellow] {
            assert!(!check_win(&board, color, TargetLayout::Classic));
        }
        for color in ALL_COLORS {
            assert!(!check_win(&board, color, TargetLayout::Opposite));
        }
    }

    #[test]
    fn classic_table_keeps_orange_and_purple_home() {
        assert_eq!(target_arm(Orange, TargetLayout::Classic), Orange);
        assert_eq!(target_arm(Purple, TargetLayout::Classic), Purple);
        assert_eq!(target_arm(Green, TargetLayout::Classic), Yellow);
        assert_eq!(target_zone(Red, TargetLayout::Classic), start_zone(Blue));

        // Orange has not left home yet, so the classic table already counts it.
        let board = Board::new(6);
        assert!(check_win(&board, Orange, TargetLayout::Classic));
    }

    #[test]
    fn opposite_table_is_an_involution() {
        for color in ALL_COLORS {
            let there = target_arm(color, TargetLayout::Opposite);
            assert_ne!(there, color);
            assert_eq!(target_arm(there, TargetLayout::Opposite), color);
        }
    }

    #[test]
    fn other_colors_do_not_affect_win() {
        let mut board = fill_target(Blue, TargetLayout::Classic);
        board.place(Position::new(8, 12), Some(Red));
        assert!(check_win(&board, Blue, TargetLayout::Classic));
    }

    #[test]
    fn layout_names_roundtrip() {
        for layout in [TargetLayout::Classic, TargetLayout::Opposite] {
            assert_eq!(TargetLayout::from_name(layout.name()), Some(layout));
        }
        assert_eq!(TargetLayout::from_name("mirror"), None);
        assert_eq!(TargetLayout::default(), TargetLayout::Classic);
    }
}
