//! Players and move sources.
//!
//! The turn coordinator never cares whether a move comes from a person at a
//! keyboard or from an algorithm: both sit behind [`MoveSource`].

pub mod computer;
pub mod console;

use thiserror::Error;

use crate::board::{Board, PlayerColor, Position, ALL_COLORS};
use crate::config::{validate_player_counts, SetupError};
use crate::rules::{Move, MoveError};

pub use computer::RandomSource;
pub use console::{Console, HumanSource, SharedConsole};

/// Whether a player is driven interactively or algorithmically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerKind {
    Human,
    Computer,
}

/// What a move source hands back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Move { from: Position, to: Position },
    /// End the turn. Only meaningful during a jump chain; on the first move
    /// it forfeits the turn.
    Pass,
}

impl From<Move> for Decision {
    fn from(mv: Move) -> Self {
        Decision::Move { from: mv.from, to: mv.to }
    }
}

/// Everything a move source may look at when choosing.
#[derive(Debug, Clone, Copy)]
pub struct MoveRequest<'a> {
    pub color: PlayerColor,
    pub board: &'a Board,
    /// True for the opening move of the turn.
    pub first: bool,
    /// Jumps on offer when continuing a chain. Empty on the first move.
    pub continuations: &'a [Move],
    /// Hops already taken this turn.
    pub jumps_taken: usize,
}

/// Errors a move source can report.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("input closed")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Produces moves for one player.
pub trait MoveSource {
    /// Chooses the next move (or pass) for `request.color`.
    fn request_move(&mut self, request: &MoveRequest<'_>) -> Result<Decision, SourceError>;

    /// Told when the coordinator refuses the last decision. The same request
    /// is repeated afterwards.
    fn rejected(&mut self, _err: &MoveError) {}

    fn kind(&self) -> PlayerKind;
}

/// A seated player: display name, color, and where its moves come from.
pub struct Player {
    pub name: String,
    pub color: PlayerColor,
    pub source: Box<dyn MoveSource>,
}

impl Player {
    pub fn new(name: impl Into<String>, color: PlayerColor, source: Box<dyn MoveSource>) -> Self {
        Player {
            name: name.into(),
            color,
            source,
        }
    }

    pub fn kind(&self) -> PlayerKind {
        self.source.kind()
    }
}

/// Seats `humans` interactive players followed by `computers` computer
/// players, handing out colors in seating order.
pub fn roster<H, C>(
    humans: usize,
    computers: usize,
    mut human: H,
    mut computer: C,
) -> Result<Vec<Player>, SetupError>
where
    H: FnMut(PlayerColor) -> Box<dyn MoveSource>,
    C: FnMut(PlayerColor) -> Box<dyn MoveSource>,
{
    validate_player_counts(humans, computers)?;
    let players = ALL_COLORS
        .iter()
        .take(humans.saturating_add(computers))
        .enumerate()
        .map(|(i, &color)| {
            let source = if i < humans { human(color) } else { computer(color) };
            Player::new(color.name(), color, source)
        })
        .collect();
    Ok(players)
}
