//! Interactive console player.
//!
//! All console traffic goes through one [`Console`], shared between the
//! menu code in the binary and every human seat, so buffered input is never
//! split between two readers.

use std::cell::RefCell;
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use log::warn;

use super::{Decision, MoveRequest, MoveSource, PlayerKind, SourceError};
use crate::protocol::{parse_input, HumanInput};
use crate::rules::MoveError;

/// Line-oriented prompt/response over a reader and a writer.
pub struct Console<R, W> {
    input: R,
    output: W,
}

/// A console shared by several owners on one thread.
pub type SharedConsole<R, W> = Rc<RefCell<Console<R, W>>>;

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// Wraps a new console for sharing.
    pub fn shared(input: R, output: W) -> SharedConsole<R, W> {
        Rc::new(RefCell::new(Console::new(input, output)))
    }

    /// Writes `text` followed by a newline.
    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()
    }

    /// Writes `prompt` and reads one line. Returns `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Everything written so far.
    pub fn output(&self) -> &W {
        &self.output
    }
}

/// A move source that prompts a person for moves.
pub struct HumanSource<R, W> {
    console: SharedConsole<R, W>,
}

impl<R: BufRead, W: Write> HumanSource<R, W> {
    pub fn new(console: SharedConsole<R, W>) -> Self {
        HumanSource { console }
    }
}

impl<R: BufRead, W: Write> MoveSource for HumanSource<R, W> {
    fn request_move(&mut self, request: &MoveRequest<'_>) -> Result<Decision, SourceError> {
        let mut console = self.console.borrow_mut();
        console.say(request.board)?;
        if request.first {
            console.say(format!("Human Player's Turn ({}):", request.color.symbol()))?;
        } else {
            console.say("You can make another jump.")?;
        }

        loop {
            let prompt = if request.first {
                "Enter your move (row_start,col_start) to (row_end,col_end): "
            } else {
                "Enter your next jump (row_start,col_start) to (row_end,col_end) or 'pass': "
            };
            let line = console.ask(prompt)?.ok_or(SourceError::InputClosed)?;

            match parse_input(&line) {
                Ok(HumanInput::Move { from, to }) => return Ok(Decision::Move { from, to }),
                Ok(HumanInput::Pass) if !request.first => {
                    console.say("Turn passed.")?;
                    return Ok(Decision::Pass);
                }
                Ok(HumanInput::Pass) => {
                    console.say("You can only pass after a jump.")?;
                }
                Err(e) => {
                    console.say(format!(
                        "Invalid move format ({}). Please use the format 'row_start,col_start to row_end,col_end'.",
                        e
                    ))?;
                }
            }
        }
    }

    fn rejected(&mut self, err: &MoveError) {
        let notice = format!("Invalid move: {}. Try again.", err);
        if let Err(e) = self.console.borrow_mut().say(&notice) {
            warn!("could not show rejection ({}): {}", notice, e);
        }
    }

    fn kind(&self) -> PlayerKind {
        PlayerKind::Human
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, PlayerColor, Position};
    use std::io::Cursor;

    type TestConsole = SharedConsole<Cursor<Vec<u8>>, Vec<u8>>;

    fn console(input: &str) -> TestConsole {
        Console::shared(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: &TestConsole) -> String {
        String::from_utf8(console.borrow().output().clone()).unwrap()
    }

    fn request(board: &Board, first: bool) -> MoveRequest<'_> {
        MoveRequest {
            color: PlayerColor::Red,
            board,
            first,
            continuations: &[],
            jumps_taken: 0,
        }
    }

    #[test]
    fn reads_a_move() {
        let shared = console("3,9 to 4,8\n");
        let mut source = HumanSource::new(shared.clone());
        let board = Board::new(2);
        let decision = source.request_move(&request(&board, true)).unwrap();
        assert_eq!(
            decision,
            Decision::Move { from: Position::new(3, 9), to: Position::new(4, 8) }
        );
        assert!(output(&shared).contains("Human Player's Turn (R):"));
    }

    #[test]
    fn reprompts_on_malformed_input() {
        let shared = console("nonsense\n3,9 to 4,8\n");
        let mut source = HumanSource::new(shared.clone());
        let board = Board::new(2);
        assert!(matches!(
            source.request_move(&request(&board, true)),
            Ok(Decision::Move { .. })
        ));
        assert!(output(&shared).contains("Invalid move format"));
    }

    #[test]
    fn pass_only_after_jump() {
        let shared = console("pass\n3,9 to 4,8\n");
        let mut source = HumanSource::new(shared.clone());
        let board = Board::new(2);
        assert!(matches!(
            source.request_move(&request(&board, true)),
            Ok(Decision::Move { .. })
        ));
        assert!(output(&shared).contains("You can only pass after a jump."));

        let shared = console("pass\n");
        let mut source = HumanSource::new(shared.clone());
        assert_eq!(source.request_move(&request(&board, false)).unwrap(), Decision::Pass);
        assert!(output(&shared).contains("Turn passed."));
    }

    #[test]
    fn end_of_input_is_an_error() {
        let shared = console("");
        let mut source = HumanSource::new(shared);
        let board = Board::new(2);
        assert!(matches!(
            source.request_move(&request(&board, true)),
            Err(SourceError::InputClosed)
        ));
    }

    #[test]
    fn rejection_is_reported() {
        let shared = console("");
        let mut source = HumanSource::new(shared.clone());
        let err = MoveError::DestinationOccupied(Position::new(3, 11));
        source.rejected(&err);
        assert!(output(&shared).contains("Invalid move: destination (3, 11) is not empty. Try again."));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn rejection_survives_a_failed_write() {
        let shared = Console::shared(Cursor::new(Vec::new()), BrokenPipe);
        let mut source = HumanSource::new(shared.clone());
        source.rejected(&MoveError::DestinationOccupied(Position::new(3, 11)));
        assert!(shared.borrow_mut().say("again").is_err());
    }

    #[test]
    fn ask_trims_and_detects_eof() {
        let mut console = Console::new(Cursor::new(b"  new \n".to_vec()), Vec::<u8>::new());
        assert_eq!(console.ask("> ").unwrap(), Some("new".to_string()));
        assert_eq!(console.ask("> ").unwrap(), None);
    }
}
