//! Turn order and capture tallies on top of a [`Board`].

use std::fmt;

use tracing::debug;

use crate::board::Board;
use crate::error::GameError;
use crate::point::Color;

/// Whose move the game is waiting for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Turn {
    WaitingForBlack,
    WaitingForWhite,
}

impl Turn {
    pub fn color(self) -> Color {
        match self {
            Turn::WaitingForBlack => Color::Black,
            Turn::WaitingForWhite => Color::White,
        }
    }

    fn next(self) -> Self {
        match self {
            Turn::WaitingForBlack => Turn::WaitingForWhite,
            Turn::WaitingForWhite => Turn::WaitingForBlack,
        }
    }
}

/// A game of Go between two sides sharing one board. Black moves first.
///
/// There is no end state: the caller decides when the game is over and may
/// [`close`](Self::close) it to release the board.
#[derive(Clone, Debug)]
pub struct Game {
    board: Option<Board>,
    turn: Turn,
    black_captures: usize,
    white_captures: usize,
}

impl Game {
    pub fn new(size: usize) -> Result<Self, GameError> {
        let board = Board::new(size)?;
        Ok(Self {
            board: Some(board),
            turn: Turn::WaitingForBlack,
            black_captures: 0,
            white_captures: 0,
        })
    }

    /// Like [`new`](Self::new) for callers holding a signed size.
    pub fn from_signed(size: i64) -> Result<Self, GameError> {
        match usize::try_from(size) {
            Ok(n) if n > 0 => Self::new(n),
            _ => Err(GameError::InvalidSize(size)),
        }
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// The color expected to play next.
    pub fn to_move(&self) -> Color {
        self.turn.color()
    }

    /// Stones captured so far by `color`.
    pub fn captures(&self, color: Color) -> usize {
        match color {
            Color::Black => self.black_captures,
            Color::White => self.white_captures,
        }
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.board.is_none()
    }

    fn check_turn(&self, color: Color) -> Result<(), GameError> {
        if self.board.is_none() {
            return Err(GameError::GameClosed);
        }
        if color != self.to_move() {
            return Err(GameError::WrongTurn {
                expected: self.to_move(),
            });
        }
        Ok(())
    }

    /// Play a stone for `color` and return the number of stones it captured.
    ///
    /// The turn only passes to the other side when the move is accepted.
    pub fn play(&mut self, row: usize, col: usize, color: Color) -> Result<usize, GameError> {
        self.check_turn(color)?;
        let Some(board) = self.board.as_mut() else {
            return Err(GameError::GameClosed);
        };
        let captured = board.play(row, col, color)?;
        match color {
            Color::Black => self.black_captures += captured,
            Color::White => self.white_captures += captured,
        }
        self.turn = self.turn.next();
        if captured > 0 {
            debug!(%color, captured, total = self.captures(color), "captures");
        }
        Ok(captured)
    }

    /// Like [`play`](Self::play) for callers that encode the side as a boolean.
    pub fn play_is_black(
        &mut self,
        row: usize,
        col: usize,
        black: bool,
    ) -> Result<usize, GameError> {
        self.play(row, col, Color::from_is_black(black))
    }

    /// Like [`play`](Self::play) for callers holding signed coordinates.
    /// Negative coordinates are reported as [`GameError::OutOfBounds`].
    pub fn play_signed(&mut self, row: i64, col: i64, color: Color) -> Result<usize, GameError> {
        self.check_turn(color)?;
        match (usize::try_from(row), usize::try_from(col)) {
            (Ok(r), Ok(c)) => self.play(r, c, color),
            _ => Err(GameError::OutOfBounds { row, col }),
        }
    }

    /// Flat rendering of the board, see [`Board::render`].
    pub fn render(&self) -> Result<String, GameError> {
        self.board
            .as_ref()
            .map(Board::render)
            .ok_or(GameError::GameClosed)
    }

    /// Release the board. Later moves fail with [`GameError::GameClosed`].
    pub fn close(&mut self) {
        if self.board.take().is_some() {
            debug!("game closed");
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.board {
            Some(board) => write!(f, "{board}"),
            None => writeln!(f, "(closed)"),
        }
    }
}
