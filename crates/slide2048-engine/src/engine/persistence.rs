use std::io;

use serde::{Deserialize, Serialize};

use crate::core::Board;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum StoreError {
    #[display("storage I/O failed: {_0}")]
    Io(io::Error),
    #[display("failed to encode stored value: {message}")]
    Encode { message: String },
}

/// A stored game in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub board: Board,
    pub score: u64,
}

/// Save/load contract between a session and its backing storage.
///
/// Loading never fails: anything missing or malformed is reported as absent so
/// the session can fall back to a fresh game. Only writes can fail.
pub trait GameStore {
    fn save(&mut self, board: &Board, score: u64) -> Result<(), StoreError>;

    /// Returns the stored game, or `None` if it is missing or malformed.
    fn load(&self) -> Option<SavedGame>;

    /// Returns the stored best score, `0` if missing or malformed.
    fn load_best_score(&self) -> u64;

    /// Stores a new best score. Callers only invoke this with a higher score
    /// than the stored one.
    fn save_best_score(&mut self, best_score: u64) -> Result<(), StoreError>;
}

impl<T> GameStore for &mut T
where
    T: GameStore + ?Sized,
{
    fn save(&mut self, board: &Board, score: u64) -> Result<(), StoreError> {
        (**self).save(board, score)
    }

    fn load(&self) -> Option<SavedGame> {
        (**self).load()
    }

    fn load_best_score(&self) -> u64 {
        (**self).load_best_score()
    }

    fn save_best_score(&mut self, best_score: u64) -> Result<(), StoreError> {
        (**self).save_best_score(best_score)
    }
}

/// Store that keeps nothing: every game starts fresh with a best score of 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl GameStore for NullStore {
    fn save(&mut self, _board: &Board, _score: u64) -> Result<(), StoreError> {
        Ok(())
    }

    fn load(&self) -> Option<SavedGame> {
        None
    }

    fn load_best_score(&self) -> u64 {
        0
    }

    fn save_best_score(&mut self, _best_score: u64) -> Result<(), StoreError> {
        Ok(())
    }
}
