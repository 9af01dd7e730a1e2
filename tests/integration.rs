//! Integration tests for the sternhalma console binary.
//!
//! Spawns the game process, feeds a scripted session through stdin, and
//! checks stdout and the game log it leaves behind.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Creates an empty scratch directory unique to this test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sternhalma_it_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Runs the game with `args`, writes `input` to stdin, and waits for exit.
fn run_game(args: &[&str], input: &str) -> (Output, String) {
    let exe = env!("CARGO_BIN_EXE_sternhalma");
    let mut child = Command::new(exe)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start sternhalma");

    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(input.as_bytes()).unwrap();
    drop(stdin);

    let mut stdout = String::new();
    child.stdout.take().unwrap().read_to_string(&mut stdout).unwrap();
    let output = child.wait_with_output().expect("failed to wait on child");
    (output, stdout)
}

/// Returns the contents of the single game log written into `dir`.
fn only_log(dir: &Path) -> String {
    let logs: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("game_log_") && n.ends_with(".txt"))
        })
        .collect();
    assert_eq!(logs.len(), 1, "expected exactly one log in {}", dir.display());
    fs::read_to_string(&logs[0]).unwrap()
}

#[test]
fn new_game_human_then_computer() {
    let dir = scratch_dir("new_game");
    let (output, stdout) = run_game(
        &["--log-dir", dir.to_str().unwrap()],
        "new\n1\n1\n3,9 to 4,8\n",
    );

    assert!(output.status.success());
    assert!(stdout.contains("Welcome to Chinese Checkers!"));
    assert!(stdout.contains("Human Player's Turn (R):"));
    assert!(stdout.contains("Computer Player's Turn (B):"));
    assert!(stdout.contains("Computer (B) moved from"));
    assert!(stdout.contains("Input closed, exiting."));

    let log = only_log(&dir);
    let lines: Vec<&str> = log.lines().filter(|l| !l.trim().is_empty()).collect();
    assert!(lines.len() >= 3, "log too short:\n{}", log);
    assert!(lines[0].contains("Player System: Game Start, number of humans: 1, number of computers: 1"));
    assert!(lines[1].contains("Player R: Moved from (3, 9) to (4, 8)"));
    assert!(lines[2].contains("Player B: Moved from"));
}

#[test]
fn bad_player_counts_reprompt() {
    let dir = scratch_dir("bad_counts");
    let (output, stdout) = run_game(
        &["--log-dir", dir.to_str().unwrap()],
        "new\n7\n0\nabc\n-1\n1\n1\n",
    );

    assert!(output.status.success());
    assert!(stdout.contains("Invalid player count"));
    assert!(stdout.contains("'abc' is not a whole number"));
    assert!(stdout.contains("cannot be negative"));
    assert!(stdout.contains("Human Player's Turn (R):"));
}

#[test]
fn illegal_move_reprompts_same_player() {
    let dir = scratch_dir("illegal_move");
    let (output, stdout) = run_game(
        &["--log-dir", dir.to_str().unwrap()],
        "new\n2\n0\n0,0 to 5,5\nnonsense\n3,9 to 4,8\n",
    );

    assert!(output.status.success());
    assert!(stdout.contains("Invalid move: position (0, 0) is not part of the playing area. Try again."));
    assert!(stdout.contains("Invalid move format"));
    assert!(stdout.contains("Human Player's Turn (B):"));

    let log = only_log(&dir);
    assert_eq!(log.matches("Moved from").count(), 1);
}

#[test]
fn load_replays_and_resumes() {
    let dir = scratch_dir("load");
    let log_path = dir.join("saved.txt");
    fs::write(
        &log_path,
        "2024-03-29 12:00:00 - Player System: Game Start, number of humans: 1, number of computers: 1 \n\
         2024-03-29 12:00:05 - Player R: Moved from (3, 9) to (4, 8) \n\
         2024-03-29 12:00:06 - Player B: Moved from (13, 9) to (12, 8) \n",
    )
    .unwrap();

    let input = format!("load\n{}\n\ncontinue\n4,8 to 5,7\n", log_path.display());
    let (output, stdout) = run_game(&[], &input);

    assert!(output.status.success());
    assert!(stdout.contains("Move 1/2"));
    assert!(stdout.contains("Move 2/2"));
    assert!(stdout.contains("Replayed 2 moves. Resuming play."));
    assert!(stdout.contains("Human Player's Turn (R):"));

    // Play continues in the same log.
    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("Player R: Moved from (4, 8) to (5, 7)"));
}

#[test]
fn load_failure_returns_to_menu() {
    let dir = scratch_dir("load_failure");
    let bad = dir.join("bad.txt");
    fs::write(&bad, "this is not a game log\n").unwrap();

    let input = format!("load\n{}\nload\n{}\nquit\n", dir.join("missing.txt").display(), bad.display());
    let (output, stdout) = run_game(&[], &input);

    assert!(output.status.success());
    assert_eq!(stdout.matches("Could not load game").count(), 2);
    assert!(stdout.contains("malformed game log entry on line 1"));
    assert!(stdout.contains("Please type 'new' or 'load'."));
}

#[test]
fn config_file_sets_player_counts() {
    let dir = scratch_dir("config");
    let config = dir.join("game.json");
    fs::write(
        &config,
        format!(
            r#"{{"humans": 1, "computers": 2, "seed": 17, "log_dir": "{}"}}"#,
            dir.display()
        ),
    )
    .unwrap();

    let (output, stdout) = run_game(&["--config", config.to_str().unwrap()], "new\n3,9 to 4,8\n");

    assert!(output.status.success());
    assert!(!stdout.contains("Enter number of human players"));
    assert!(stdout.contains("Computer Player's Turn (G):"));
    assert!(only_log(&dir).contains("number of humans: 1, number of computers: 2"));
}

#[test]
fn invalid_config_is_rejected() {
    let dir = scratch_dir("bad_config");
    let config = dir.join("game.json");
    fs::write(&config, r#"{"humans": 5, "computers": 2}"#).unwrap();

    let (output, _) = run_game(&["--config", config.to_str().unwrap()], "");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("between 2 and 6"));
}

#[test]
fn unknown_argument_fails() {
    let (output, _) = run_game(&["--bogus"], "");
    assert!(!output.status.success());
}
