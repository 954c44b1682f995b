//! Error types returned by the rules engine.

use thiserror::Error;

use crate::chain::ChainId;
use crate::point::Color;

/// Reasons a game cannot be created or a move cannot be played.
///
/// Every variant leaves the game exactly as it was before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Board size must be at least 1.
    #[error("invalid board size ({0} x {0})")]
    InvalidSize(i64),
    /// Coordinates outside the grid.
    #[error("invalid position ({row}, {col})")]
    OutOfBounds { row: i64, col: i64 },
    /// Target intersection already holds a stone.
    #[error("point already taken by {0}")]
    AlreadyOccupied(Color),
    /// The other side must play.
    #[error("invalid turn, now {expected} must play")]
    WrongTurn { expected: Color },
    /// The move would leave its own chain without liberties.
    #[error("self-capture forbidden")]
    SelfCaptureForbidden,
    /// The game was closed and holds no board any more.
    #[error("game is closed")]
    GameClosed,
}

/// A broken bookkeeping invariant found by [`Board::validate`].
///
/// These indicate a bug in the engine, never a bad move.
///
/// [`Board::validate`]: crate::board::Board::validate
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("stone at ({row}, {col}) has no chain")]
    Unowned { row: usize, col: usize },
    #[error("free point ({row}, {col}) still points at chain {chain}")]
    StaleOwner { row: usize, col: usize, chain: ChainId },
    #[error("point ({row}, {col}) refers to unknown chain {chain}")]
    UnknownChain { row: usize, col: usize, chain: ChainId },
    #[error("point ({row}, {col}) is listed {count} times in chain {chain}")]
    Membership {
        row: usize,
        col: usize,
        chain: ChainId,
        count: usize,
    },
    #[error("chain {chain} member ({row}, {col}) does not match its color or id")]
    ForeignMember { row: usize, col: usize, chain: ChainId },
    #[error("chain {chain} caches {cached} liberties, rescan finds {actual}")]
    Liberties {
        chain: ChainId,
        cached: usize,
        actual: usize,
    },
    #[error("chain {0} has no liberties")]
    Dead(ChainId),
    #[error("chain {chain} is not below the id counter {next}")]
    IdCounter { chain: ChainId, next: u32 },
}
