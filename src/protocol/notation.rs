//! Text notation for moves typed by a human player.
//!
//! A move is written `row,col to row,col`, e.g. `3,9 to 4,8`. Coordinates
//! may carry surrounding parentheses and spaces, so `(3, 9) to (4, 8)` is
//! accepted too. During a jump chain the word `pass` ends the turn.

use thiserror::Error;

use crate::board::Position;

/// Errors that can occur when parsing move text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty input")]
    EmptyInput,

    #[error("expected '<row>,<col> to <row>,<col>', got '{0}'")]
    MissingSeparator(String),

    #[error("invalid coordinate pair '{0}'")]
    InvalidCoordinate(String),
}

/// A parsed line of human input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumanInput {
    Move { from: Position, to: Position },
    Pass,
}

/// Parses one line of human input: a move or `pass`.
pub fn parse_input(line: &str) -> Result<HumanInput, NotationError> {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("pass") {
        return Ok(HumanInput::Pass);
    }
    let (from, to) = parse_move_text(trimmed)?;
    Ok(HumanInput::Move { from, to })
}

/// Parses `row,col to row,col` into a start and end position.
pub fn parse_move_text(s: &str) -> Result<(Position, Position), NotationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(NotationError::EmptyInput);
    }
    let (start, end) = s
        .split_once(" to ")
        .ok_or_else(|| NotationError::MissingSeparator(s.to_string()))?;
    Ok((parse_position(start)?, parse_position(end)?))
}

/// Parses a single `row,col` pair, optionally wrapped in parentheses.
pub fn parse_position(s: &str) -> Result<Position, NotationError> {
    let invalid = || NotationError::InvalidCoordinate(s.trim().to_string());
    let trimmed = s.trim();
    let inner = match trimmed.strip_prefix('(') {
        Some(rest) => rest.strip_suffix(')').ok_or_else(invalid)?,
        None => trimmed,
    };
    let (row, col) = inner.split_once(',').ok_or_else(invalid)?;
    let row = row.trim().parse::<i32>().map_err(|_| invalid())?;
    let col = col.trim().parse::<i32>().map_err(|_| invalid())?;
    Ok(Position::new(row, col))
}

/// Formats a move the way a human would type it.
pub fn format_move_text(from: Position, to: Position) -> String {
    format!("{},{} to {},{}", from.row, from.col, to.row, to.col)
}
