use crate::core::{Board, Direction};

use super::{
    config::{ConfigError, GameConfig},
    game_status::GameStatus,
    history::{History, Snapshot},
    tile_spawner::{RandomSource, SeededRandom, SpawnedTile, spawn_tile},
};

/// What a single [`GameBoard::apply_move`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    /// Whether any tile moved or merged. `false` means the call was a no-op.
    pub changed: bool,
    /// Points gained by the merges of this move.
    pub score_delta: u64,
    /// Status after the move, including the spawned tile.
    pub status: GameStatus,
    /// The tile spawned after a changed move.
    pub spawned: Option<SpawnedTile>,
}

/// The board engine: a single game's board, score, status and undo history.
///
/// All randomness comes from the injected [`RandomSource`]; two engines never
/// share state.
///
/// # Example
///
/// ```
/// use slide2048_engine::{Direction, GameBoard, GameStatus, ScriptedRandom};
///
/// let mut game = GameBoard::new(ScriptedRandom::new([0.0, 0.0]));
/// assert_eq!(game.board().count_tiles(), 2);
/// assert_eq!(game.status(), GameStatus::Playing);
///
/// let result = game.apply_move(Direction::Right);
/// if result.changed {
///     assert_eq!(game.history().len(), 1);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GameBoard<R = SeededRandom> {
    config: GameConfig,
    board: Board,
    score: u64,
    status: GameStatus,
    history: History,
    rng: R,
}

impl<R> GameBoard<R>
where
    R: RandomSource,
{
    /// Starts a new game with the classic rules.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self::start(GameConfig::default(), rng)
    }

    /// Starts a new game with custom rules.
    pub fn with_config(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::start(config, rng))
    }

    /// Continues a previously stored game.
    ///
    /// The history starts empty. The status is `Lost` if the stored board has no
    /// move left and `Playing` otherwise.
    pub fn resume(
        config: GameConfig,
        rng: R,
        board: Board,
        score: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let status = if board.is_stuck() {
            GameStatus::Lost
        } else {
            GameStatus::Playing
        };
        Ok(Self {
            config,
            board,
            score,
            status,
            history: History::with_capacity(config.history_capacity),
            rng,
        })
    }

    fn start(config: GameConfig, rng: R) -> Self {
        let mut this = Self {
            config,
            board: Board::EMPTY,
            score: 0,
            status: GameStatus::Playing,
            history: History::with_capacity(config.history_capacity),
            rng,
        };
        this.initialize();
        this
    }

    /// Clears the board, score, status and history, then spawns two tiles.
    pub fn initialize(&mut self) {
        self.board = Board::EMPTY;
        self.score = 0;
        self.status = GameStatus::Playing;
        self.history.clear();
        for _ in 0..2 {
            spawn_tile(&mut self.board, &mut self.rng, self.config.four_probability);
        }
        log::debug!("new game\n{}", self.board);
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns `true` if moving towards `direction` would change the board.
    #[must_use]
    pub fn can_move(&self, direction: Direction) -> bool {
        self.status.can_move() && self.board.slide(direction).1.changed
    }

    /// Slides the board towards `direction`.
    ///
    /// A move that changes nothing, or any move after the game is lost, leaves
    /// board, score and history exactly as they were. Otherwise the pre-move
    /// state is pushed onto the history, merges are scored, one tile is
    /// spawned, and the status is updated: `Won` on the first 2048, `Lost` when
    /// the resulting board has no move left.
    pub fn apply_move(&mut self, direction: Direction) -> MoveResult {
        let unchanged = MoveResult {
            changed: false,
            score_delta: 0,
            status: self.status,
            spawned: None,
        };
        if !self.status.can_move() {
            return unchanged;
        }

        let (next, outcome) = self.board.slide(direction);
        if !outcome.changed {
            log::trace!("move {direction} changed nothing");
            return unchanged;
        }

        self.history.push(Snapshot {
            board: self.board,
            score: self.score,
        });
        self.board = next;
        self.score = self.score.saturating_add(outcome.score_delta);
        if outcome.reached_2048 && !self.status.is_won() {
            self.status = GameStatus::Won;
        }

        let spawned = spawn_tile(&mut self.board, &mut self.rng, self.config.four_probability);

        if self.status.is_playing() && self.board.is_stuck() {
            self.status = GameStatus::Lost;
        }

        log::debug!(
            "move {direction}: +{} (score {}, {})",
            outcome.score_delta,
            self.score,
            self.status
        );

        MoveResult {
            changed: true,
            score_delta: outcome.score_delta,
            status: self.status,
            spawned,
        }
    }

    /// Restores the most recent snapshot.
    ///
    /// The status always returns to `Playing`. Does nothing and returns `None`
    /// when the history is empty.
    pub fn undo(&mut self) -> Option<Snapshot> {
        let snapshot = self.history.pop()?;
        self.board = snapshot.board;
        self.score = snapshot.score;
        self.status = GameStatus::Playing;
        log::debug!("undo to score {}", self.score);
        Some(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use crate::ScriptedRandom;

    use super::*;

    fn game_with(board: &str, score: u64) -> GameBoard<ScriptedRandom> {
        // Always spawns a 2 into the first empty cell.
        GameBoard::resume(
            GameConfig::default(),
            ScriptedRandom::new([0.0]),
            Board::from_ascii(board),
            score,
        )
        .unwrap()
    }

    #[test]
    fn test_initialize() {
        let game = GameBoard::new(SeededRandom::new());
        assert_eq!(game.board().count_tiles(), 2);
        assert!(
            game.board()
                .cells()
                .iter()
                .all(|&v| v == 0 || v == 2 || v == 4)
        );
        assert_eq!(game.score(), 0);
        assert_eq!(game.status(), GameStatus::Playing);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_initialize_resets_state() {
        let mut game = game_with(
            "
            2 2 . .
            . . . .
            . . . .
            . . . .
            ",
            100,
        );
        game.apply_move(Direction::Left);
        game.initialize();
        assert_eq!(game.score(), 0);
        assert_eq!(game.board().count_tiles(), 2);
        assert!(game.history().is_empty());
        assert_eq!(game.status(), GameStatus::Playing);
    }

    #[test]
    fn test_changed_move() {
        let mut game = game_with(
            "
            . . . .
            . 2 2 .
            . . . .
            . . . 4
            ",
            10,
        );
        let before = *game.board();
        let result = game.apply_move(Direction::Left);

        assert!(result.changed);
        assert_eq!(result.score_delta, 4);
        assert_eq!(result.status, GameStatus::Playing);
        assert_eq!(result.spawned, Some(SpawnedTile { index: 0, value: 2 }));
        assert_eq!(game.score(), 14);
        assert_eq!(
            *game.board(),
            Board::from_ascii(
                "
                2 . . .
                4 . . .
                . . . .
                4 . . .
                "
            )
        );
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.history().peek().unwrap().board, before);
        assert_eq!(game.history().peek().unwrap().score, 10);
    }

    #[test]
    fn test_noop_move_changes_nothing() {
        let mut game = game_with(
            "
            . . . .
            2 . . .
            8 . . .
            4 2 . .
            ",
            32,
        );
        assert!(game.apply_move(Direction::Up).changed);
        let board = *game.board();
        assert_eq!(
            board,
            Board::from_ascii(
                "
                2 2 2 .
                8 . . .
                4 . . .
                . . . .
                "
            )
        );

        let result = game.apply_move(Direction::Up);
        assert!(!result.changed);
        assert_eq!(result.score_delta, 0);
        assert_eq!(result.spawned, None);
        assert_eq!(*game.board(), board);
        assert_eq!(game.score(), 32);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_score_saturates() {
        let mut game = game_with(
            "
            2 2 . .
            . . . .
            . . . .
            . . . .
            ",
            u64::MAX - 1,
        );
        let result = game.apply_move(Direction::Left);
        assert!(result.changed);
        assert_eq!(result.score_delta, 4);
        assert_eq!(game.score(), u64::MAX);
    }

    #[test]
    fn test_win_is_sticky() {
        let mut game = game_with(
            "
            1024 1024 . .
            . . . .
            . . . .
            2 2 . .
            ",
            0,
        );
        let result = game.apply_move(Direction::Left);
        assert_eq!(result.status, GameStatus::Won);
        assert_eq!(result.score_delta, 2048 + 4);

        let result = game.apply_move(Direction::Right);
        assert!(result.changed);
        assert_eq!(result.status, GameStatus::Won);
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn test_won_game_never_becomes_lost() {
        // After merging 1024s on the top row the board fills up without pairs.
        let mut game = game_with(
            "
            1024 1024 4 8
            16 32 64 128
            256 512 2 8
            4 8 16 32
            ",
            0,
        );
        let result = game.apply_move(Direction::Left);
        assert!(result.changed);
        assert_eq!(result.status, GameStatus::Won);
        assert!(game.board().is_stuck());
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn test_spawn_without_loss() {
        let mut game = game_with(
            "
            2 . 4 8
            16 32 64 128
            256 512 2 8
            4 8 16 32
            ",
            0,
        );
        let result = game.apply_move(Direction::Right);
        assert!(result.changed);
        assert_eq!(result.spawned, Some(SpawnedTile { index: 0, value: 2 }));
        assert_eq!(
            *game.board(),
            Board::from_ascii(
                "
                2 2 4 8
                16 32 64 128
                256 512 2 8
                4 8 16 32
                "
            )
        );
        assert_eq!(result.status, GameStatus::Playing);
    }

    #[test]
    fn test_loss_detected_after_spawn() {
        let mut game = game_with(
            "
            . 4 2 8
            16 32 64 128
            256 512 2 16
            4 8 16 32
            ",
            0,
        );
        let result = game.apply_move(Direction::Left);
        assert!(result.changed);
        assert_eq!(
            *game.board(),
            Board::from_ascii(
                "
                4 2 8 2
                16 32 64 128
                256 512 2 16
                4 8 16 32
                "
            )
        );
        assert_eq!(result.status, GameStatus::Lost);
        assert_eq!(game.status(), GameStatus::Lost);

        let after = game.apply_move(Direction::Right);
        assert!(!after.changed);
        assert_eq!(after.status, GameStatus::Lost);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_undo_restores_snapshot_and_status() {
        let mut game = game_with(
            "
            . 4 2 8
            16 32 64 128
            256 512 2 16
            4 8 16 32
            ",
            40,
        );
        let before = *game.board();
        game.apply_move(Direction::Left);
        assert_eq!(game.status(), GameStatus::Lost);

        let snapshot = game.undo().unwrap();
        assert_eq!(snapshot.board, before);
        assert_eq!(*game.board(), before);
        assert_eq!(game.score(), 40);
        assert_eq!(game.status(), GameStatus::Playing);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_undo_empty_history_is_noop() {
        let mut game = game_with(
            "
            2 . . .
            . . . .
            . . . .
            . . . .
            ",
            8,
        );
        let board = *game.board();
        assert_eq!(game.undo(), None);
        assert_eq!(*game.board(), board);
        assert_eq!(game.score(), 8);
    }

    #[test]
    fn test_resume_stuck_board_is_lost() {
        let game = game_with(
            "
            2 4 2 4
            4 2 4 2
            2 4 2 4
            4 2 4 2
            ",
            1000,
        );
        assert_eq!(game.status(), GameStatus::Lost);
        assert!(!game.can_move(Direction::Left));
    }

    #[test]
    fn test_with_config_validates() {
        let config = GameConfig {
            four_probability: -0.5,
            ..GameConfig::default()
        };
        assert!(GameBoard::with_config(config, ScriptedRandom::default()).is_err());

        let config = GameConfig {
            four_probability: 1.0,
            history_capacity: 3,
        };
        let game = GameBoard::with_config(config, ScriptedRandom::default()).unwrap();
        assert!(game.board().cells().iter().all(|&v| v == 0 || v == 4));
        assert_eq!(game.history().capacity(), 3);
    }

    #[test]
    fn test_independent_instances() {
        let mut a = game_with(
            "
            2 2 . .
            . . . .
            . . . .
            . . . .
            ",
            0,
        );
        let b = a.clone();
        a.apply_move(Direction::Left);
        assert_eq!(b.score(), 0);
        assert!(b.history().is_empty());
        assert_ne!(a.board(), b.board());
    }
}
