//! Sternhalma: a Chinese Checkers engine for two to six players.
//!
//! Exposes the board model, move and win rules, players, game log, and turn
//! coordination for use by integration tests and the binary entry points.

pub mod board;
pub mod config;
pub mod engine;
pub mod gamelog;
pub mod movegen;
pub mod player;
pub mod protocol;
pub mod rules;
pub mod selfplay;
