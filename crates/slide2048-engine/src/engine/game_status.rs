use serde::{Deserialize, Serialize};

/// Progress of a single game.
///
/// `Won` is sticky: once reached it stays for the rest of the game while moves
/// remain allowed. `Lost` is terminal; only undo or a new game leave it.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    /// Returns `true` if move requests are still accepted.
    #[must_use]
    pub const fn can_move(self) -> bool {
        !matches!(self, Self::Lost)
    }
}
