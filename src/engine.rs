//! Turn coordination.
//!
//! [`Game`] owns the board and the seated players. Each call to
//! [`Game::play_turn`] asks the current player's move source for decisions,
//! validates and applies them, follows jump chains through [`TurnState`],
//! checks the mover for a win, and hands the turn to the next seat.

use std::io::{self, Write};

use log::{debug, info, warn};
use thiserror::Error;

use crate::board::{Board, PlayerColor, Position, ALL_COLORS};
use crate::config::{validate_player_counts, SetupError};
use crate::gamelog::{GameLog, LogError, Replay};
use crate::player::{roster, Decision, MoveRequest, MoveSource, Player, PlayerKind, SourceError};
use crate::protocol::LogEntry;
use crate::rules::{
    apply_move, check_move, check_win, continuation_jumps, Move, MoveError, MoveKind, TargetLayout,
};

/// Errors that end or abort a game operation.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid setup: {0}")]
    Setup(#[from] SetupError),

    #[error("illegal move: {0}")]
    Move(#[from] MoveError),

    #[error("replayed move {index} ({mv}) failed: {source}")]
    Replay {
        index: usize,
        mv: Move,
        source: MoveError,
    },

    #[error(transparent)]
    Log(#[from] LogError),

    #[error("input closed")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("the game is already over")]
    GameOver,
}

impl From<SourceError> for GameError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::InputClosed => GameError::InputClosed,
            SourceError::Io(e) => GameError::Io(e),
        }
    }
}

/// Where a turn's move sequence stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnState {
    AwaitingFirstMove,
    /// A jump landed on `at`; the mover may take one of `options` or pass.
    AwaitingContinuation {
        at: Position,
        came_from: Position,
        options: Vec<Move>,
    },
    TurnComplete,
}

impl TurnState {
    /// Applies `decision` for `color` and returns the next state together
    /// with the move that was applied, if any.
    ///
    /// On error the board is unchanged and the caller stays in `self`.
    pub fn advance(
        &self,
        board: &mut Board,
        color: PlayerColor,
        decision: Decision,
    ) -> Result<(TurnState, Option<Move>), MoveError> {
        let (from, to) = match (self, decision) {
            (TurnState::TurnComplete, _) => return Ok((TurnState::TurnComplete, None)),
            (_, Decision::Pass) => return Ok((TurnState::TurnComplete, None)),
            (_, Decision::Move { from, to }) => (from, to),
        };

        if let TurnState::AwaitingContinuation { options, .. } = self {
            if !options.contains(&Move::new(color, from, to)) {
                return Err(MoveError::NotAContinuation { from, to });
            }
        }

        let kind = check_move(board, color, from, to)?;
        apply_move(board, color, from, to)?;
        let applied = Move::new(color, from, to);

        if kind == MoveKind::Step {
            return Ok((TurnState::TurnComplete, Some(applied)));
        }
        let options = continuation_jumps(board, color, to, Some(from));
        if options.is_empty() {
            Ok((TurnState::TurnComplete, Some(applied)))
        } else {
            Ok((
                TurnState::AwaitingContinuation {
                    at: to,
                    came_from: from,
                    options,
                },
                Some(applied),
            ))
        }
    }
}

/// What happened during one call to [`Game::play_turn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub color: PlayerColor,
    /// Every move applied this turn, in order.
    pub moves: Vec<Move>,
    /// The player had no move to offer and passed its opening move.
    pub forfeited: bool,
    /// The mover finished the turn with every piece in its target zone.
    pub won: bool,
}

/// How replayed moves are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplayMode {
    /// Re-apply moves, checking only the structural preconditions.
    #[default]
    Trust,
    /// Reject any move the rules would not allow in live play.
    Verify,
}

/// A game in progress.
pub struct Game {
    board: Board,
    players: Vec<Player>,
    current: usize,
    layout: TargetLayout,
    winner: Option<PlayerColor>,
    log: Option<GameLog<Box<dyn Write>>>,
    turns: usize,
}

impl Game {
    /// Seats `players` on the opening board.
    ///
    /// Seat `i` must play the `i`-th color of the seating order, which is
    /// what [`roster`] produces.
    pub fn new(players: Vec<Player>, layout: TargetLayout) -> Result<Self, GameError> {
        let humans = players.iter().filter(|p| p.kind() == PlayerKind::Human).count();
        validate_player_counts(humans, players.len() - humans)?;
        for (seat, (player, &expected)) in players.iter().zip(ALL_COLORS.iter()).enumerate() {
            if player.color != expected {
                return Err(SetupError::SeatColor {
                    seat,
                    expected,
                    found: player.color,
                }
                .into());
            }
        }

        Ok(Game {
            board: Board::new(players.len()),
            players,
            current: 0,
            layout,
            winner: None,
            log: None,
            turns: 0,
        })
    }

    /// Rebuilds a game from loaded log records.
    ///
    /// Seats players from the first game-start record, then replays every
    /// recorded move in order. Play resumes with the seat after the last
    /// mover.
    pub fn from_log<H, C>(
        entries: &[LogEntry],
        layout: TargetLayout,
        mode: ReplayMode,
        human: H,
        computer: C,
    ) -> Result<Self, GameError>
    where
        H: FnMut(PlayerColor) -> Box<dyn MoveSource>,
        C: FnMut(PlayerColor) -> Box<dyn MoveSource>,
    {
        let replay = Replay::from_entries(entries)?;
        let players = roster(replay.humans, replay.computers, human, computer)?;
        let mut game = Game::new(players, layout)?;
        game.replay(&replay.moves, mode)?;
        Ok(game)
    }

    /// Attaches a game log. Every move applied from now on is recorded.
    pub fn with_log(mut self, log: GameLog<Box<dyn Write>>) -> Self {
        self.log = Some(log);
        self
    }

    /// Replaces the opening position.
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    /// Writes the game-start record to the attached log.
    pub fn record_start(&mut self) -> Result<(), GameError> {
        let (humans, computers) = (self.humans(), self.computers());
        info!("game start: {} humans, {} computers", humans, computers);
        if let Some(log) = self.log.as_mut() {
            log.record_start(humans, computers)?;
        }
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn layout(&self) -> TargetLayout {
        self.layout
    }

    pub fn winner(&self) -> Option<PlayerColor> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Number of turns played since the game was created.
    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn humans(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.kind() == PlayerKind::Human)
            .count()
    }

    pub fn computers(&self) -> usize {
        self.players.len() - self.humans()
    }

    /// Plays one full turn for the current player.
    ///
    /// Rejected decisions are reported back to the source and the same
    /// request is repeated, so a player is never penalised for a bad move.
    pub fn play_turn(&mut self) -> Result<TurnReport, GameError> {
        if self.winner.is_some() {
            return Err(GameError::GameOver);
        }
        let seat = self.current;
        let color = self.players[seat].color;
        let mut state = TurnState::AwaitingFirstMove;
        let mut moves = Vec::new();
        let mut forfeited = false;

        loop {
            let (first, continuations) = match &state {
                TurnState::AwaitingFirstMove => (true, &[] as &[Move]),
                TurnState::AwaitingContinuation { options, .. } => (false, options.as_slice()),
                TurnState::TurnComplete => break,
            };
            let request = MoveRequest {
                color,
                board: &self.board,
                first,
                continuations,
                jumps_taken: moves.len(),
            };
            let decision = self.players[seat].source.request_move(&request)?;

            if first && decision == Decision::Pass {
                warn!("{} has no move and forfeits the turn", color);
                forfeited = true;
            }
            match state.advance(&mut self.board, color, decision) {
                Ok((next, applied)) => {
                    if let Some(mv) = applied {
                        debug!("applied {}", mv);
                        if let Some(log) = self.log.as_mut() {
                            log.record_move(&mv)?;
                        }
                        moves.push(mv);
                    }
                    state = next;
                }
                Err(err) => {
                    warn!("rejected move for {}: {}", color, err);
                    self.players[seat].source.rejected(&err);
                }
            }
        }

        // Without a move the board is unchanged, so neither is the result.
        let won = !moves.is_empty() && check_win(&self.board, color, self.layout);
        self.turns += 1;
        if won {
            info!("{} wins after {} turns", color, self.turns);
            self.winner = Some(color);
        } else {
            self.current = (seat + 1) % self.players.len();
        }

        Ok(TurnReport {
            color,
            moves,
            forfeited,
            won,
        })
    }

    /// Plays turns until someone wins or `max_turns` turns have been played.
    pub fn run(&mut self, max_turns: Option<usize>) -> Result<Option<PlayerColor>, GameError> {
        while self.winner.is_none() {
            if max_turns.is_some_and(|cap| self.turns >= cap) {
                info!("turn cap of {} reached without a winner", self.turns);
                break;
            }
            self.play_turn()?;
        }
        Ok(self.winner)
    }

    /// Validates and applies a single move outside the turn loop.
    ///
    /// The move is logged but the turn does not advance.
    pub fn apply(
        &mut self,
        color: PlayerColor,
        from: Position,
        to: Position,
    ) -> Result<MoveKind, GameError> {
        if self.winner.is_some() {
            return Err(GameError::GameOver);
        }
        let kind = check_move(&self.board, color, from, to)?;
        apply_move(&mut self.board, color, from, to)?;
        let mv = Move::new(color, from, to);
        debug!("applied {}", mv);
        if let Some(log) = self.log.as_mut() {
            log.record_move(&mv)?;
        }
        Ok(kind)
    }

    /// Re-applies one recorded move.
    ///
    /// The turn passes to the seat after the mover, and the mover is checked
    /// for a win. Replayed moves are not written to the log again.
    pub fn replay_move(&mut self, mv: Move, mode: ReplayMode) -> Result<(), MoveError> {
        if mode == ReplayMode::Verify {
            check_move(&self.board, mv.color, mv.from, mv.to)?;
        }
        apply_move(&mut self.board, mv.color, mv.from, mv.to)?;
        debug!("replayed {}", mv);

        if let Some(seat) = self.players.iter().position(|p| p.color == mv.color) {
            self.current = (seat + 1) % self.players.len();
        }
        if check_win(&self.board, mv.color, self.layout) {
            info!("{} reached its target zone during replay", mv.color);
            self.winner = Some(mv.color);
        }
        Ok(())
    }

    /// Re-applies recorded moves in order. Stops at the first failure,
    /// reporting its 1-based index.
    pub fn replay(&mut self, moves: &[Move], mode: ReplayMode) -> Result<(), GameError> {
        for (i, &mv) in moves.iter().enumerate() {
            if self.winner.is_some() {
                return Err(GameError::GameOver);
            }
            self.replay_move(mv, mode).map_err(|source| GameError::Replay {
                index: i + 1,
                mv,
                source,
            })?;
        }
        info!("replayed {} moves", moves.len());
        Ok(())
    }
}
