//! Self-play game generation.
//!
//! Plays computer-only games from the opening position, recording every
//! turn, the winner, and how far each color got toward its target zone.
//! Games can run concurrently on a rayon pool; records are written as JSONL.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use log::warn;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use thiserror::Error;

use crate::board::{Board, PlayerColor, Position, ALL_COLORS, COLOR_COUNT};
use crate::config::{validate_player_counts, SetupError, DEFAULT_CHAIN_CAP};
use crate::engine::{Game, GameError};
use crate::player::{roster, MoveSource, RandomSource};
use crate::rules::{target_zone, TargetLayout};

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Players per game (2-6), all computer-controlled.
    pub players: usize,
    /// Turns after which a game is stopped without a winner.
    pub max_turns: usize,
    /// Maximum hops per jump chain.
    pub chain_cap: usize,
    pub layout: TargetLayout,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            players: 2,
            max_turns: 2000,
            chain_cap: DEFAULT_CHAIN_CAP,
            layout: TargetLayout::Classic,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

impl SelfPlayConfig {
    pub fn validate(&self) -> Result<(), SetupError> {
        validate_player_counts(0, self.players)
    }
}

/// Errors that stop a self-play run.
#[derive(Debug, Error)]
pub enum SelfPlayError {
    #[error("invalid self-play setup: {0}")]
    Setup(#[from] SetupError),

    #[error("game {game_id} failed: {source}")]
    Game { game_id: usize, source: GameError },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("self-play worker thread panicked")]
    WorkerPanicked,
}

/// One applied move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub from: Position,
    pub to: Position,
}

/// Everything one player did in one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnRecord {
    pub turn: usize,
    pub color: PlayerColor,
    pub moves: Vec<MoveRecord>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub forfeited: bool,
}

/// A complete self-play game record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    pub players: usize,
    pub layout: TargetLayout,
    /// The winning color, if the game finished before the turn cap.
    pub winner: Option<PlayerColor>,
    /// Turns played.
    pub turns: usize,
    /// All turns in order.
    pub history: Vec<TurnRecord>,
    /// Pieces each color has inside its target zone at the end.
    pub pieces_home: Vec<(PlayerColor, usize)>,
}

impl GameRecord {
    /// Total moves applied across all turns.
    pub fn total_moves(&self) -> usize {
        self.history.iter().map(|t| t.moves.len()).sum()
    }
}

fn pieces_home(board: &Board, color: PlayerColor, layout: TargetLayout) -> usize {
    target_zone(color, layout)
        .iter()
        .filter(|&&p| board.occupant(p) == Some(color))
        .count()
}

/// Plays a single computer-only game.
pub fn play_game(
    config: &SelfPlayConfig,
    game_id: usize,
    rng: &mut SmallRng,
) -> Result<GameRecord, GameError> {
    let chain_cap = config.chain_cap;
    // Zero would mean "seed from entropy" and break reproducibility.
    let mut computer = |_color: PlayerColor| -> Box<dyn MoveSource> {
        Box::new(RandomSource::new(rng.gen::<u64>().max(1)).with_chain_cap(chain_cap))
    };
    let no_humans = |_color: PlayerColor| -> Box<dyn MoveSource> { Box::new(RandomSource::new(1)) };
    let players = roster(0, config.players, no_humans, &mut computer)?;
    let mut game = Game::new(players, config.layout)?;

    let mut history = Vec::new();
    while !game.is_over() && game.turns() < config.max_turns {
        let report = game.play_turn()?;
        history.push(TurnRecord {
            turn: game.turns(),
            color: report.color,
            moves: report
                .moves
                .iter()
                .map(|m| MoveRecord { from: m.from, to: m.to })
                .collect(),
            forfeited: report.forfeited,
        });
    }

    let pieces_home = game
        .players()
        .iter()
        .map(|p| (p.color, pieces_home(game.board(), p.color, config.layout)))
        .collect();

    Ok(GameRecord {
        game_id,
        players: config.players,
        layout: config.layout,
        winner: game.winner(),
        turns: game.turns(),
        history,
        pieces_home,
    })
}

/// Runs self-play generation, producing multiple game records.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| {
        games.push(game);
    })?;
    games.sort_by_key(|g| g.game_id);
    Ok(games)
}

/// Runs self-play generation, calling `on_game` with each completed game record.
///
/// Games are delivered in completion order. The first failing game is
/// reported after the remaining games have finished.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    config.validate()?;
    if config.threads > 1 {
        run_self_play_parallel(config, on_game)
    } else {
        run_self_play_sequential(config, on_game)
    }
}

fn report_progress(n: usize, total: usize, game: &GameRecord, started: Instant) {
    let outcome = match game.winner {
        Some(w) => format!("{} wins", w),
        None => "no winner".to_string(),
    };
    eprintln!(
        "Game {}/{}: {} after {} turns ({:.2}s)",
        n,
        total,
        outcome,
        game.turns,
        started.elapsed().as_secs_f64(),
    );
}

fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord),
{
    let mut rng = if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed)
    } else {
        SmallRng::from_entropy()
    };

    for i in 0..config.num_games {
        let started = Instant::now();
        let game = play_game(config, i, &mut rng)
            .map_err(|source| SelfPlayError::Game { game_id: i, source })?;
        if !config.quiet {
            report_progress(i + 1, config.num_games, &game, started);
        }
        on_game(game);
    }
    Ok(())
}

/// Plays games on a rayon pool and hands results back over a channel.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    let (tx, rx) = mpsc::channel::<(usize, Result<GameRecord, GameError>)>();
    let config_clone = config.clone();
    let handle = std::thread::spawn(move || {
        let completed = AtomicUsize::new(0);
        pool.install(|| {
            (0..config_clone.num_games)
                .into_par_iter()
                .for_each_with(tx, |tx, i| {
                    let mut rng = if config_clone.seed != 0 {
                        SmallRng::seed_from_u64(config_clone.seed.wrapping_add(i as u64))
                    } else {
                        SmallRng::from_entropy()
                    };
                    let started = Instant::now();
                    let result = play_game(&config_clone, i, &mut rng);
                    if let (false, Ok(game)) = (config_clone.quiet, &result) {
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        report_progress(n, config_clone.num_games, game, started);
                    }
                    let _ = tx.send((i, result));
                });
        });
    });

    let mut first_error = None;
    for (game_id, result) in rx {
        match result {
            Ok(game) => on_game(game),
            Err(source) => {
                warn!("self-play game {} failed: {}", game_id, source);
                first_error.get_or_insert(SelfPlayError::Game { game_id, source });
            }
        }
    }

    handle.join().map_err(|_| SelfPlayError::WorkerPanicked)?;
    first_error.map_or(Ok(()), Err)
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        write_game_json(game, out)?;
    }
    out.flush()
}

/// Writes a single game record as one JSON line.
pub fn write_game_json<W: Write>(game: &GameRecord, out: &mut W) -> std::io::Result<()> {
    serde_json::to_writer(&mut *out, game)?;
    writeln!(out)
}

/// Prints a summary of self-play results to stderr.
pub fn print_summary(games: &[GameRecord]) {
    let total = games.len();
    let mut win_counts = [0usize; COLOR_COUNT];
    let mut unfinished = 0usize;
    let mut total_turns = 0usize;
    let mut total_moves = 0usize;

    for game in games {
        total_turns += game.turns;
        total_moves += game.total_moves();
        match game.winner {
            Some(w) => win_counts[w.index()] += 1,
            None => unfinished += 1,
        }
    }

    eprintln!("=== Self-Play Summary ===");
    eprintln!("Games: {}", total);
    eprintln!("Avg turns/game: {:.1}", total_turns as f64 / total.max(1) as f64);
    eprintln!("Avg moves/turn: {:.2}", total_moves as f64 / total_turns.max(1) as f64);
    eprintln!("Stopped at turn cap: {}", unfinished);
    eprintln!("Win distribution:");
    let seats = games.iter().map(|g| g.players).max().unwrap_or(0);
    for &color in ALL_COLORS.iter().take(seats) {
        let wins = win_counts[color.index()];
        let pct = 100.0 * wins as f64 / total.max(1) as f64;
        eprintln!("  {:>8}: {} ({:.1}%)", color.name(), wins, pct);
    }
}
