//! Player colors.
//!
//! Six colors exist on the hexagram, one per arm. A game with `n` players
//! activates the first `n` colors of [`ALL_COLORS`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the six piece colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Blue,
    Green,
    Yellow,
    Orange,
    Purple,
}

/// Total number of colors.
pub const COLOR_COUNT: usize = 6;

/// All colors in seating order. Active colors are always a prefix of this.
pub const ALL_COLORS: [PlayerColor; COLOR_COUNT] = [
    PlayerColor::Red,
    PlayerColor::Blue,
    PlayerColor::Green,
    PlayerColor::Yellow,
    PlayerColor::Orange,
    PlayerColor::Purple,
];

impl PlayerColor {
    /// Returns the capitalized display name.
    pub const fn name(self) -> &'static str {
        match self {
            PlayerColor::Red => "Red",
            PlayerColor::Blue => "Blue",
            PlayerColor::Green => "Green",
            PlayerColor::Yellow => "Yellow",
            PlayerColor::Orange => "Orange",
            PlayerColor::Purple => "Purple",
        }
    }

    /// Returns the single-character symbol used on the board and in game logs.
    pub const fn symbol(self) -> char {
        match self {
            PlayerColor::Red => 'R',
            PlayerColor::Blue => 'B',
            PlayerColor::Green => 'G',
            PlayerColor::Yellow => 'Y',
            PlayerColor::Orange => 'O',
            PlayerColor::Purple => 'P',
        }
    }

    /// Parses a color from its single-character symbol.
    pub fn from_symbol(c: char) -> Option<PlayerColor> {
        match c {
            'R' => Some(PlayerColor::Red),
            'B' => Some(PlayerColor::Blue),
            'G' => Some(PlayerColor::Green),
            'Y' => Some(PlayerColor::Yellow),
            'O' => Some(PlayerColor::Orange),
            'P' => Some(PlayerColor::Purple),
            _ => None,
        }
    }

    /// Parses a color from its name, case-insensitively.
    pub fn from_name(name: &str) -> Option<PlayerColor> {
        ALL_COLORS
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// Position of this color in seating order.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the colors active in a game with `num_players` players.
pub fn active_colors(num_players: usize) -> &'static [PlayerColor] {
    &ALL_COLORS[..num_players.min(COLOR_COUNT)]
}
