//! Game-log record grammar.
//!
//! Every record is a single line:
//!
//! ```text
//! 2024-03-29 12:00:00 - Player System: Game Start, number of humans: 2, number of computers: 2
//! 2024-03-29 12:00:05 - Player R: Moved from (3, 9) to (4, 8)
//! ```
//!
//! The actor is either `System` or a color symbol. For compatibility with
//! hand-written logs the `Player ` prefix is optional and coordinates may
//! omit the space after the comma.

use std::fmt;

use chrono::NaiveDateTime;
use thiserror::Error;

use super::notation::{parse_position, NotationError};
use crate::board::{PlayerColor, Position};
use crate::rules::Move;

/// Timestamp layout used in every record.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors that can occur when parsing a log record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("empty record")]
    EmptyLine,

    #[error("missing '{expected}' in '{line}'")]
    MissingSeparator { expected: &'static str, line: String },

    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("unknown actor '{0}'")]
    UnknownActor(String),

    #[error("unknown event '{0}'")]
    UnknownEvent(String),

    #[error("invalid player count in '{0}'")]
    InvalidCount(String),

    #[error("invalid position: {0}")]
    InvalidPosition(#[from] NotationError),

    #[error("move recorded for the system actor")]
    MoveWithoutPlayer,
}

/// Who a record is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actor {
    System,
    Player(PlayerColor),
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::System => f.write_str("System"),
            Actor::Player(color) => write!(f, "{}", color.symbol()),
        }
    }
}

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogEvent {
    GameStart { humans: usize, computers: usize },
    Moved { from: Position, to: Position },
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEvent::GameStart { humans, computers } => write!(
                f,
                "Game Start, number of humans: {}, number of computers: {}",
                humans, computers
            ),
            LogEvent::Moved { from, to } => write!(f, "Moved from {} to {}", from, to),
        }
    }
}

/// One parsed log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: NaiveDateTime,
    pub actor: Actor,
    pub event: LogEvent,
}

impl LogEntry {
    /// A game-start record attributed to the system.
    pub fn game_start(timestamp: NaiveDateTime, humans: usize, computers: usize) -> Self {
        Self {
            timestamp,
            actor: Actor::System,
            event: LogEvent::GameStart { humans, computers },
        }
    }

    /// A record of a single applied move.
    pub fn moved(timestamp: NaiveDateTime, mv: &Move) -> Self {
        Self {
            timestamp,
            actor: Actor::Player(mv.color),
            event: LogEvent::Moved { from: mv.from, to: mv.to },
        }
    }

    /// Returns the move described by this record, if it is a move record.
    pub fn as_move(&self) -> Option<Move> {
        match (self.actor, self.event) {
            (Actor::Player(color), LogEvent::Moved { from, to }) => Some(Move::new(color, from, to)),
            _ => None,
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - Player {}: {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.actor,
            self.event
        )
    }
}

/// Parses a single record line.
pub fn parse_record(line: &str) -> Result<LogEntry, RecordError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(RecordError::EmptyLine);
    }

    let (stamp, rest) = line.split_once(" - ").ok_or_else(|| RecordError::MissingSeparator {
        expected: " - ",
        line: line.to_string(),
    })?;
    let timestamp = NaiveDateTime::parse_from_str(stamp.trim(), TIMESTAMP_FORMAT)
        .map_err(|_| RecordError::InvalidTimestamp(stamp.trim().to_string()))?;

    let rest = rest.strip_prefix("Player ").unwrap_or(rest);
    let (actor, event) = rest.split_once(": ").ok_or_else(|| RecordError::MissingSeparator {
        expected: ": ",
        line: line.to_string(),
    })?;
    let actor = parse_actor(actor.trim())?;
    let event = parse_event(event.trim())?;

    if matches!(event, LogEvent::Moved { .. }) && actor == Actor::System {
        return Err(RecordError::MoveWithoutPlayer);
    }

    Ok(LogEntry { timestamp, actor, event })
}

fn parse_actor(s: &str) -> Result<Actor, RecordError> {
    if s == "System" {
        return Ok(Actor::System);
    }
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => PlayerColor::from_symbol(c)
            .map(Actor::Player)
            .ok_or_else(|| RecordError::UnknownActor(s.to_string())),
        _ => Err(RecordError::UnknownActor(s.to_string())),
    }
}

fn parse_event(s: &str) -> Result<LogEvent, RecordError> {
    if let Some(rest) = s.strip_prefix("Game Start") {
        let humans = parse_count(rest, "number of humans:")
            .ok_or_else(|| RecordError::InvalidCount(s.to_string()))?;
        let computers = parse_count(rest, "number of computers:")
            .ok_or_else(|| RecordError::InvalidCount(s.to_string()))?;
        return Ok(LogEvent::GameStart { humans, computers });
    }

    if let Some(rest) = s.strip_prefix("Moved from ") {
        let (from, to) = rest.split_once(" to ").ok_or_else(|| RecordError::MissingSeparator {
            expected: " to ",
            line: s.to_string(),
        })?;
        return Ok(LogEvent::Moved {
            from: parse_position(from)?,
            to: parse_position(to)?,
        });
    }

    Err(RecordError::UnknownEvent(s.to_string()))
}

/// Finds `key` in a comma-separated list and parses the number after it.
fn parse_count(s: &str, key: &str) -> Option<usize> {
    s.split(',')
        .map(str::trim)
        .find_map(|part| part.strip_prefix(key))
        .and_then(|value| value.trim().parse().ok())
}
