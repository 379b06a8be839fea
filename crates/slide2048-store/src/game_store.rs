use slide2048_engine::{Board, GameStore, SavedGame, StoreError};

use crate::key_value::KeyValueStore;

/// Key holding the board as a JSON array of 16 integers.
pub const BOARD_KEY: &str = "board";
/// Key holding the current score as a decimal string.
pub const SCORE_KEY: &str = "score";
/// Key holding the best score as a decimal string.
pub const BEST_SCORE_KEY: &str = "bestScore";

/// [`GameStore`] over a string [`KeyValueStore`].
///
/// Board, score and best score are stored under independent keys; board and
/// score are written together in one batch. Anything
/// missing or malformed reads as absent: a board that is not a JSON array of
/// exactly 16 valid tiles is no saved game, an unparsable score reads as 0.
#[derive(Debug, Clone, Default)]
pub struct KeyValueGameStore<K> {
    kv: K,
}

impl<K> KeyValueGameStore<K>
where
    K: KeyValueStore,
{
    #[must_use]
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    #[must_use]
    pub fn inner(&self) -> &K {
        &self.kv
    }

    pub fn inner_mut(&mut self) -> &mut K {
        &mut self.kv
    }

    pub fn into_inner(self) -> K {
        self.kv
    }

    fn read_number(&self, key: &str) -> Option<u64> {
        let raw = self.kv.get(key)?;
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("ignoring stored {key} {raw:?}: {e}");
                None
            }
        }
    }
}

impl<K> GameStore for KeyValueGameStore<K>
where
    K: KeyValueStore,
{
    fn save(&mut self, board: &Board, score: u64) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(board).map_err(|e| StoreError::Encode {
            message: e.to_string(),
        })?;
        let score = score.to_string();
        self.kv
            .set_many(&[(BOARD_KEY, &encoded), (SCORE_KEY, &score)])
    }

    fn load(&self) -> Option<SavedGame> {
        let raw = self.kv.get(BOARD_KEY)?;
        let board = match serde_json::from_str::<Board>(&raw) {
            Ok(board) => board,
            Err(e) => {
                log::warn!("ignoring stored board: {e}");
                return None;
            }
        };
        let score = self.read_number(SCORE_KEY).unwrap_or(0);
        Some(SavedGame { board, score })
    }

    fn load_best_score(&self) -> u64 {
        self.read_number(BEST_SCORE_KEY).unwrap_or(0)
    }

    fn save_best_score(&mut self, best_score: u64) -> Result<(), StoreError> {
        self.kv.set(BEST_SCORE_KEY, &best_score.to_string())
    }
}
