//! Game engine logic and state management.
//!
//! This module builds the game on top of the [`core`](crate::core) board rules:
//!
//! - [`GameBoard`] - Board engine owning board, score, status and undo history
//! - [`GameSession`] - Session controller adding the move guard, best score,
//!   persistence and notifications
//! - [`History`] - Bounded undo stack of [`Snapshot`]s
//! - [`RandomSource`] - Injected randomness for tile spawns ([`SeededRandom`],
//!   [`ScriptedRandom`])
//! - [`GameStore`] / [`GameObserver`] - Contracts implemented by the storage
//!   and presentation layers
//!
//! # Game Flow
//!
//! 1. Open a [`GameSession`]; it resumes the stored game or starts a fresh one
//!    with two spawned tiles
//! 2. Request a move in one of the four directions
//! 3. Lines slide and merge, the pre-move state is pushed onto the history and
//!    one new tile spawns
//! 4. The session saves the game and notifies the observer
//! 5. Signal [`GameSession::complete_move`] once the move has been presented
//! 6. Repeat until the board has no move left
//!
//! # Example
//!
//! ```
//! use slide2048_engine::{Direction, GameBoard, SeededRandom};
//!
//! let mut game = GameBoard::new(SeededRandom::new());
//!
//! while !game.status().is_lost() {
//!     let Some(direction) = Direction::ALL.into_iter().find(|&d| game.can_move(d)) else {
//!         break;
//!     };
//!     game.apply_move(direction);
//! }
//!
//! assert!(game.board().is_stuck());
//! ```

pub use self::{
    config::*, game_board::*, game_session::*, game_status::*, history::*, observer::*,
    persistence::*, tile_spawner::*,
};

mod config;
mod game_board;
mod game_session;
mod game_status;
mod history;
mod observer;
mod persistence;
mod tile_spawner;
