//! Persistence adapters for [`slide2048_engine::GameStore`].
//!
//! A game is persisted as three independent entries of a string key-value
//! store: the board as a JSON array of 16 integers, the score and the best
//! score as decimal strings. [`KeyValueGameStore`] implements the engine's
//! save/load contract on top of any [`KeyValueStore`]:
//!
//! - [`MemoryStore`] - In-process map, for tests and embedders with their own
//!   storage
//! - [`JsonFileStore`] - All entries in one JSON document on disk
//!
//! # Example
//!
//! ```
//! use slide2048_engine::{GameConfig, GameSession, NoopObserver, SeededRandom};
//! use slide2048_store::{KeyValueGameStore, MemoryStore};
//!
//! let store = KeyValueGameStore::new(MemoryStore::new());
//! let session =
//!     GameSession::start(GameConfig::default(), SeededRandom::new(), store, NoopObserver)
//!         .unwrap();
//! let (game, store, _) = session.into_parts();
//!
//! // The fresh game was saved and can be resumed.
//! let resumed =
//!     GameSession::start(GameConfig::default(), SeededRandom::new(), store, NoopObserver)
//!         .unwrap();
//! assert_eq!(resumed.board(), game.board());
//! ```

pub use self::{game_store::*, json_file::*, key_value::*};

mod game_store;
mod json_file;
mod key_value;
