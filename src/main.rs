//! Sternhalma -- interactive Chinese Checkers in the terminal.
//!
//! Starts a new game or loads a logged one, then alternates between human
//! players (prompted on stdin) and computer players until someone wins.
//!
//! Usage:
//!   sternhalma [--config FILE] [--log-dir DIR]

use std::env;
use std::fmt::Display;
use std::io::{self, StdinLock, Stdout};
use std::path::PathBuf;
use std::process;
use std::rc::Rc;

use env_logger::Env;

use sternhalma::board::PlayerColor;
use sternhalma::config::{parse_player_count, validate_player_counts, GameConfig};
use sternhalma::engine::{Game, GameError, ReplayMode};
use sternhalma::gamelog::{self, default_log_path, GameLog, Replay};
use sternhalma::player::{roster, Console, HumanSource, MoveSource, PlayerKind, RandomSource, SharedConsole};

type Stdio = SharedConsole<StdinLock<'static>, Stdout>;

struct Options {
    config: Option<PathBuf>,
    log_dir: Option<PathBuf>,
}

fn parse_args() -> Options {
    let args: Vec<String> = env::args().collect();
    let mut options = Options {
        config: None,
        log_dir: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "--log-dir" if i + 1 >= args.len() => {
                eprintln!("missing value for {}", args[i]);
                print_usage();
                process::exit(1);
            }
            "--config" => {
                i += 1;
                options.config = Some(PathBuf::from(&args[i]));
            }
            "--log-dir" => {
                i += 1;
                options.log_dir = Some(PathBuf::from(&args[i]));
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }
    options
}

fn print_usage() {
    eprintln!("Usage: sternhalma [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config FILE    JSON game settings; player counts are taken from it");
    eprintln!("  --log-dir DIR    Directory for new game logs (default: current directory)");
    eprintln!("  --help           Show this help");
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let options = parse_args();
    let mut config = match &options.config {
        Some(path) => match GameConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        },
        None => GameConfig::default(),
    };
    if options.log_dir.is_some() {
        config.log_dir = options.log_dir;
    }

    let console = Console::shared(io::stdin().lock(), io::stdout());
    match run(&console, &config, options.config.is_some()) {
        Ok(()) => {}
        Err(GameError::InputClosed) => {
            println!();
            println!("Input closed, exiting.");
        }
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

fn say(console: &Stdio, text: impl Display) -> Result<(), GameError> {
    console.borrow_mut().say(text)?;
    Ok(())
}

fn ask(console: &Stdio, prompt: &str) -> Result<String, GameError> {
    console.borrow_mut().ask(prompt)?.ok_or(GameError::InputClosed)
}

fn humans(console: &Stdio) -> impl FnMut(PlayerColor) -> Box<dyn MoveSource> + '_ {
    move |_color| -> Box<dyn MoveSource> { Box::new(HumanSource::new(Rc::clone(console))) }
}

fn computers(config: &GameConfig) -> impl FnMut(PlayerColor) -> Box<dyn MoveSource> {
    let (seed, chain_cap) = (config.seed, config.computer_chain_cap);
    move |color| -> Box<dyn MoveSource> {
        let seed = if seed == 0 { 0 } else { seed.wrapping_add(color.index() as u64) };
        Box::new(RandomSource::new(seed).with_chain_cap(chain_cap))
    }
}

fn run(console: &Stdio, config: &GameConfig, counts_from_config: bool) -> Result<(), GameError> {
    say(console, "Welcome to Chinese Checkers!")?;
    let mut game = loop {
        let choice = ask(console, "Do you want to start a new game or load an existing game? (new/load): ")?;
        match choice.to_lowercase().as_str() {
            "new" => break new_game(console, config, counts_from_config)?,
            "load" => {
                if let Some(game) = load_game(console, config)? {
                    break game;
                }
            }
            _ => say(console, "Please type 'new' or 'load'.")?,
        }
    };
    play(console, &mut game)
}

fn prompt_count(console: &Stdio, prompt: &str) -> Result<usize, GameError> {
    loop {
        let line = ask(console, prompt)?;
        match parse_player_count(&line) {
            Ok(n) => return Ok(n),
            Err(e) => say(console, format!("Invalid input: {}.", e))?,
        }
    }
}

fn prompt_counts(console: &Stdio) -> Result<(usize, usize), GameError> {
    loop {
        let humans = prompt_count(console, "Enter number of human players: ")?;
        let computers = prompt_count(console, "Enter number of computer players: ")?;
        match validate_player_counts(humans, computers) {
            Ok(()) => return Ok((humans, computers)),
            Err(e) => say(console, format!("Invalid player count: {}. Try again.", e))?,
        }
    }
}

fn new_game(console: &Stdio, config: &GameConfig, counts_from_config: bool) -> Result<Game, GameError> {
    let (h, c) = if counts_from_config {
        (config.humans, config.computers)
    } else {
        prompt_counts(console)?
    };
    let players = roster(h, c, humans(console), computers(config))?;
    let path = default_log_path(config.log_dir.as_deref());
    let mut game = Game::new(players, config.target_layout)?.with_log(GameLog::create(&path)?);
    game.record_start()?;
    say(console, format!("Logging this game to {}", path.display()))?;
    Ok(game)
}

/// Loads a log and replays it one move at a time. Returns `None` (after
/// telling the user why) if the log cannot be used.
fn load_game(console: &Stdio, config: &GameConfig) -> Result<Option<Game>, GameError> {
    let path = PathBuf::from(ask(console, "Enter the log file path: ")?);
    let replay = match gamelog::load(&path).and_then(|entries| Replay::from_entries(&entries)) {
        Ok(replay) => replay,
        Err(e) => {
            say(console, format!("Could not load game: {}", e))?;
            return Ok(None);
        }
    };
    let players = match roster(replay.humans, replay.computers, humans(console), computers(config)) {
        Ok(players) => players,
        Err(e) => {
            say(console, format!("Could not load game: {}", e))?;
            return Ok(None);
        }
    };
    let mut game = Game::new(players, config.target_layout)?;

    let total = replay.moves.len();
    let mut stepping = true;
    for (i, &mv) in replay.moves.iter().enumerate() {
        if stepping {
            say(console, game.board())?;
            let prompt = format!(
                "Move {}/{}: {}. Press Enter to apply it, or type 'continue' to replay the rest: ",
                i + 1,
                total,
                mv
            );
            if ask(console, &prompt)?.eq_ignore_ascii_case("continue") {
                stepping = false;
            }
        }
        if let Err(e) = game.replay_move(mv, ReplayMode::Trust) {
            say(console, format!("Replay stopped at move {}: {}", i + 1, e))?;
            return Ok(None);
        }
    }
    say(console, format!("Replayed {} moves. Resuming play.", total))?;
    Ok(Some(game.with_log(GameLog::create(&path)?)))
}

fn play(console: &Stdio, game: &mut Game) -> Result<(), GameError> {
    while !game.is_over() {
        let current = game.current_player();
        let (kind, color) = (current.kind(), current.color);
        if kind == PlayerKind::Computer {
            say(console, format!("Computer Player's Turn ({}):", color.symbol()))?;
        }

        let report = game.play_turn()?;
        if kind == PlayerKind::Computer {
            if report.forfeited {
                say(console, format!("Computer ({}) has no legal move and passes.", color.symbol()))?;
            }
            for mv in &report.moves {
                say(console, format!("Computer ({}) moved from {} to {}", color.symbol(), mv.from, mv.to))?;
            }
        }
    }

    if let Some(winner) = game.winner() {
        say(console, game.board())?;
        say(console, format!("Congratulations, Player {} has won the game!", winner))?;
    }
    Ok(())
}
