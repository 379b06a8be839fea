use crate::core::Board;

/// Receives notifications from a [`GameSession`](super::GameSession).
///
/// Renderers and other presentation layers subscribe through this trait; they
/// get copies of the state and never reach into the engine. Every method
/// defaults to doing nothing.
pub trait GameObserver {
    /// The board or score changed (move, undo, new game or resumed game).
    fn on_board_changed(&mut self, board: &Board, score: u64) {
        let _ = (board, score);
    }

    /// The game reached 2048. Fired at most once per game.
    fn on_won(&mut self, score: u64, best_score: u64) {
        let _ = (score, best_score);
    }

    /// No move is left.
    fn on_lost(&mut self, score: u64, best_score: u64) {
        let _ = (score, best_score);
    }
}

impl<T> GameObserver for &mut T
where
    T: GameObserver + ?Sized,
{
    fn on_board_changed(&mut self, board: &Board, score: u64) {
        (**self).on_board_changed(board, score);
    }

    fn on_won(&mut self, score: u64, best_score: u64) {
        (**self).on_won(score, best_score);
    }

    fn on_lost(&mut self, score: u64, best_score: u64) {
        (**self).on_lost(score, best_score);
    }
}

impl<T> GameObserver for Box<T>
where
    T: GameObserver + ?Sized,
{
    fn on_board_changed(&mut self, board: &Board, score: u64) {
        (**self).on_board_changed(board, score);
    }

    fn on_won(&mut self, score: u64, best_score: u64) {
        (**self).on_won(score, best_score);
    }

    fn on_lost(&mut self, score: u64, best_score: u64) {
        (**self).on_lost(score, best_score);
    }
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GameObserver for NoopObserver {}

/// A notification emitted by a session.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameEvent {
    BoardChanged { board: Board, score: u64 },
    Won { score: u64, best_score: u64 },
    Lost { score: u64, best_score: u64 },
}

/// Observer that records every notification in order.
///
/// ```
/// use slide2048_engine::{Board, EventLog, GameEvent, GameObserver as _};
///
/// let mut log = EventLog::default();
/// log.on_won(2100, 2100);
/// assert_eq!(log.events(), [GameEvent::Won { score: 2100, best_score: 2100 }]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Removes and returns all recorded events.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl GameObserver for EventLog {
    fn on_board_changed(&mut self, board: &Board, score: u64) {
        self.events.push(GameEvent::BoardChanged {
            board: *board,
            score,
        });
    }

    fn on_won(&mut self, score: u64, best_score: u64) {
        self.events.push(GameEvent::Won { score, best_score });
    }

    fn on_lost(&mut self, score: u64, best_score: u64) {
        self.events.push(GameEvent::Lost { score, best_score });
    }
}
