//! Text formats.
//!
//! Parsing and formatting for the move notation typed by human players and
//! for the line records of the append-only game log.

pub mod notation;
pub mod record;

pub use notation::{
    format_move_text, parse_input, parse_move_text, parse_position, HumanInput, NotationError,
};
pub use record::{parse_record, Actor, LogEntry, LogEvent, RecordError, TIMESTAMP_FORMAT};
