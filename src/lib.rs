//! go-rules: the rules of Go as a small, self-checking engine.
//!
//! The engine validates stone placement, keeps connected stones in chains
//! with cached liberty counts, removes captured chains and refuses
//! self-capture. Every move is a transaction: it is applied speculatively and
//! either committed or rolled back to the state after the previous move.
//!
//! ## Modules
//!
//! - [`constants`] - Default sizes and display characters
//! - [`point`] - Intersections, colors and adjacency
//! - [`chain`] - Chains of stones and the chain registry
//! - [`board`] - The grid, capture sweep and checkpoint/rollback
//! - [`game`] - Turn order and capture tallies
//! - [`error`] - Error types
//! - [`playout`] - Random games
//! - [`console`] - Text protocol front-end
//!
//! ## Example
//!
//! ```
//! use go_rules::{Color, Game};
//!
//! let mut game = Game::new(5).unwrap();
//! game.play(1, 1, Color::Black).unwrap();
//! game.play(1, 2, Color::White).unwrap();
//! assert_eq!(game.render().unwrap(), "******BW*****************");
//! ```

pub mod board;
pub mod chain;
pub mod console;
pub mod constants;
pub mod error;
pub mod game;
pub mod playout;
pub mod point;

pub use board::Board;
pub use chain::{Chain, ChainId};
pub use error::{GameError, InvariantViolation};
pub use game::{Game, Turn};
pub use point::{Color, PointState};
