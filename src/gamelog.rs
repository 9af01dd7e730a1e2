//! Append-only game log.
//!
//! Writes one record per event (see [`crate::protocol::record`]) and reads
//! a log back into an ordered list of entries for replay. Loading stops at
//! the first malformed line so a damaged log can never replay out of order.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use thiserror::Error;

use crate::protocol::{parse_record, LogEntry, LogEvent, RecordError};
use crate::rules::Move;

/// Errors that can occur while writing or loading a game log.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("failed to open game log {path}: {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("game log I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed game log entry on line {line}: {source}")]
    Malformed { line: usize, source: RecordError },

    #[error("game log has no game start record")]
    MissingGameStart,
}

/// Writes log records to any sink.
pub struct GameLog<W: Write> {
    out: W,
}

impl GameLog<Box<dyn Write>> {
    /// Opens `path` for appending, creating it if needed.
    pub fn create(path: &Path) -> Result<Self, LogError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LogError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(GameLog::new(Box::new(file)))
    }
}

impl<W: Write> GameLog<W> {
    pub fn new(out: W) -> Self {
        GameLog { out }
    }

    /// Appends one record and flushes it.
    pub fn record(&mut self, entry: &LogEntry) -> Result<(), LogError> {
        writeln!(self.out, "{}", entry)?;
        self.out.flush()?;
        Ok(())
    }

    /// Records the start of a game, timestamped now.
    pub fn record_start(&mut self, humans: usize, computers: usize) -> Result<(), LogError> {
        self.record(&LogEntry::game_start(now(), humans, computers))
    }

    /// Records an applied move, timestamped now.
    pub fn record_move(&mut self, mv: &Move) -> Result<(), LogError> {
        self.record(&LogEntry::moved(now(), mv))
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Default log file name for a game started at `started`.
pub fn default_log_name(started: NaiveDateTime) -> String {
    format!("game_log_{}.txt", started.format("%Y-%m-%d_%H-%M-%S"))
}

/// Default log file path in `dir` for a game starting now.
pub fn default_log_path(dir: Option<&Path>) -> PathBuf {
    let name = default_log_name(now());
    match dir {
        Some(d) => d.join(name),
        None => PathBuf::from(name),
    }
}

/// Parses every record from `reader`, skipping blank lines.
pub fn read_entries<R: BufRead>(reader: R) -> Result<Vec<LogEntry>, LogError> {
    let mut entries = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let entry = parse_record(&line).map_err(|source| LogError::Malformed { line: i + 1, source })?;
        entries.push(entry);
    }
    Ok(entries)
}

/// Loads every record from the log file at `path`.
pub fn load(path: &Path) -> Result<Vec<LogEntry>, LogError> {
    let file = File::open(path).map_err(|source| LogError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_entries(BufReader::new(file))
}

/// The setup and move list recovered from a log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    pub humans: usize,
    pub computers: usize,
    pub moves: Vec<Move>,
}

impl Replay {
    /// Extracts the first game-start record and every move, in log order.
    pub fn from_entries(entries: &[LogEntry]) -> Result<Replay, LogError> {
        let (humans, computers) = entries
            .iter()
            .find_map(|e| match e.event {
                LogEvent::GameStart { humans, computers } => Some((humans, computers)),
                _ => None,
            })
            .ok_or(LogError::MissingGameStart)?;
        let moves = entries.iter().filter_map(LogEntry::as_move).collect();
        Ok(Replay {
            humans,
            computers,
            moves,
        })
    }
}
