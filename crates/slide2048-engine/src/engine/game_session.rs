use crate::core::{Board, Direction};

use super::{
    config::{ConfigError, GameConfig},
    game_board::{GameBoard, MoveResult},
    game_status::GameStatus,
    observer::{GameObserver, NoopObserver},
    persistence::{GameStore, NullStore},
    tile_spawner::{RandomSource, SeededRandom},
};

/// Re-entrancy guard for move requests.
///
/// A changed move puts the session into `Settling` until the presentation layer
/// reports that the move has been fully processed with
/// [`GameSession::complete_move`]. New moves and undo requests arriving while
/// settling are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_more::IsVariant)]
pub enum MovePhase {
    #[default]
    Idle,
    Settling,
}

/// Orchestrates a game: moves, undo, restarts, best score, persistence and
/// notifications.
///
/// Storage writes are fire-and-forget: failures are logged and never interrupt
/// the game.
///
/// # Example
///
/// ```
/// use slide2048_engine::{
///     Direction, EventLog, GameConfig, GameSession, NullStore, SeededRandom,
/// };
///
/// let mut session = GameSession::start(
///     GameConfig::default(),
///     SeededRandom::new(),
///     NullStore,
///     EventLog::default(),
/// )
/// .unwrap();
///
/// for direction in Direction::ALL {
///     if let Some(result) = session.request_move(direction) {
///         if result.changed {
///             // Rendering finished; accept the next move.
///             session.complete_move();
///         }
///     }
/// }
/// assert!(session.observer().events().len() >= 1);
/// ```
#[derive(Debug)]
pub struct GameSession<R = SeededRandom, S = NullStore, O = NoopObserver> {
    game: GameBoard<R>,
    store: S,
    observer: O,
    best_score: u64,
    phase: MovePhase,
    won_notified: bool,
}

impl<R, S, O> GameSession<R, S, O>
where
    R: RandomSource,
    S: GameStore,
    O: GameObserver,
{
    /// Opens a session on top of `store`.
    ///
    /// The stored game is resumed when present; otherwise a fresh game is
    /// started and saved.
    pub fn start(config: GameConfig, rng: R, store: S, observer: O) -> Result<Self, ConfigError> {
        let best_score = store.load_best_score();
        let (game, resumed) = match store.load() {
            Some(saved) => (
                GameBoard::resume(config, rng, saved.board, saved.score)?,
                true,
            ),
            None => (GameBoard::with_config(config, rng)?, false),
        };

        let mut this = Self {
            game,
            store,
            observer,
            best_score,
            phase: MovePhase::Idle,
            won_notified: false,
        };
        if resumed {
            log::debug!("resumed stored game with score {}", this.game.score());
        } else {
            this.save_game();
        }
        this.update_best_score();
        this.notify_board_changed();
        Ok(this)
    }

    #[must_use]
    pub fn game(&self) -> &GameBoard<R> {
        &self.game
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.game.board()
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.game.score()
    }

    #[must_use]
    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.game.status()
    }

    #[must_use]
    pub fn phase(&self) -> MovePhase {
        self.phase
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.game.history().len()
    }

    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (GameBoard<R>, S, O) {
        (self.game, self.store, self.observer)
    }

    /// Requests a move towards `direction`.
    ///
    /// Returns `None` when the request is ignored: a previous move is still
    /// settling, or the game is lost. A no-op move returns a result with
    /// `changed == false` and has no side effect. A changed move enters
    /// [`MovePhase::Settling`], raises the best score if exceeded, saves the
    /// game, and notifies the observer, including the one-time win or the loss.
    pub fn request_move(&mut self, direction: Direction) -> Option<MoveResult> {
        if self.phase.is_settling() {
            log::trace!("move {direction} ignored: previous move still settling");
            return None;
        }
        if !self.game.status().can_move() {
            log::trace!("move {direction} ignored: game is lost");
            return None;
        }

        let result = self.game.apply_move(direction);
        if !result.changed {
            return Some(result);
        }

        self.phase = MovePhase::Settling;
        self.update_best_score();
        self.save_game();
        self.notify_board_changed();

        let score = self.game.score();
        match result.status {
            GameStatus::Won if !self.won_notified => {
                self.won_notified = true;
                log::debug!("won with score {score}");
                self.observer.on_won(score, self.best_score);
            }
            GameStatus::Lost => {
                log::debug!("lost with score {score}");
                self.observer.on_lost(score, self.best_score);
            }
            _ => {}
        }
        Some(result)
    }

    /// Signals that the last move has been fully processed by the caller.
    pub fn complete_move(&mut self) {
        self.phase = MovePhase::Idle;
    }

    /// Reverts the last move.
    ///
    /// Ignored while a move is settling. Returns `false` if there was nothing to
    /// undo.
    pub fn undo(&mut self) -> bool {
        if self.phase.is_settling() {
            log::trace!("undo ignored: move still settling");
            return false;
        }
        if self.game.undo().is_none() {
            return false;
        }
        self.update_best_score();
        self.save_game();
        self.notify_board_changed();
        true
    }

    /// Discards the current game and starts a fresh one.
    pub fn new_game(&mut self) {
        self.game.initialize();
        self.phase = MovePhase::Idle;
        self.won_notified = false;
        self.save_game();
        self.notify_board_changed();
    }

    fn notify_board_changed(&mut self) {
        self.observer
            .on_board_changed(self.game.board(), self.game.score());
    }

    fn save_game(&mut self) {
        if let Err(e) = self.store.save(self.game.board(), self.game.score()) {
            log::warn!("failed to save game: {e}");
        }
    }

    fn update_best_score(&mut self) {
        let score = self.game.score();
        if score <= self.best_score {
            return;
        }
        self.best_score = score;
        if let Err(e) = self.store.save_best_score(score) {
            log::warn!("failed to save best score: {e}");
        }
    }
}
