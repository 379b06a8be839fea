use std::{
    fs,
    path::{Path, PathBuf},
};

use rand::Rng as _;
use slide2048_engine::{
    Direction, EventLog, GameConfig, GameEvent, GameSession, GameStatus, ScriptedRandom,
    SeededRandom, TileSeed,
};
use slide2048_store::{
    BEST_SCORE_KEY, BOARD_KEY, JsonFileStore, KeyValueGameStore, KeyValueStore as _, MemoryStore,
    SCORE_KEY,
};

fn temp_store_path() -> PathBuf {
    let id: u64 = rand::rng().random();
    std::env::temp_dir()
        .join(format!("slide2048-session-{id:016x}"))
        .join("game.json")
}

fn open_session(
    path: &Path,
) -> GameSession<SeededRandom, KeyValueGameStore<JsonFileStore>, EventLog> {
    GameSession::start(
        GameConfig::default(),
        SeededRandom::with_seed(TileSeed::from_bytes([42; 16])),
        KeyValueGameStore::new(JsonFileStore::open(path)),
        EventLog::default(),
    )
    .unwrap()
}

#[test]
fn game_survives_reopening_the_store() {
    let path = temp_store_path();

    let mut session = open_session(&path);
    for direction in Direction::ALL.into_iter().cycle().take(40) {
        if session.request_move(direction).is_some() {
            session.complete_move();
        }
        if session.status().is_lost() {
            break;
        }
    }
    let board = *session.board();
    let score = session.score();
    let best_score = session.best_score();
    assert_eq!(best_score, score);
    drop(session);

    let resumed = open_session(&path);
    assert_eq!(*resumed.board(), board);
    assert_eq!(resumed.score(), score);
    assert_eq!(resumed.best_score(), best_score);
    assert_eq!(resumed.history_len(), 0);
    assert_eq!(
        resumed.observer().events(),
        [GameEvent::BoardChanged { board, score }]
    );

    fs::remove_dir_all(path.parent().unwrap()).ok();
}

#[test]
fn new_game_keeps_best_score() {
    let path = temp_store_path();
    let mut kv = JsonFileStore::open(&path);
    kv.set(BOARD_KEY, "[2,2,0,0,0,0,0,0,0,0,0,0,0,0,0,0]").unwrap();
    kv.set(BEST_SCORE_KEY, "3").unwrap();

    let mut session = GameSession::start(
        GameConfig::default(),
        ScriptedRandom::new([0.0]),
        KeyValueGameStore::new(kv),
        EventLog::default(),
    )
    .unwrap();
    assert_eq!(session.score(), 0);
    assert_eq!(session.best_score(), 3);

    session.request_move(Direction::Left).unwrap();
    session.complete_move();
    assert_eq!(session.best_score(), 4);

    session.new_game();
    assert_eq!(session.score(), 0);
    assert_eq!(session.status(), GameStatus::Playing);

    let reopened = JsonFileStore::open(&path);
    assert_eq!(reopened.get(BEST_SCORE_KEY).as_deref(), Some("4"));
    assert_eq!(reopened.get(SCORE_KEY).as_deref(), Some("0"));

    fs::remove_dir_all(path.parent().unwrap()).ok();
}

#[test]
fn corrupt_save_starts_fresh_game() {
    let path = temp_store_path();
    let mut kv = JsonFileStore::open(&path);
    kv.set(BOARD_KEY, "[2,2,0]").unwrap();
    kv.set(SCORE_KEY, "999").unwrap();
    drop(kv);

    let session = open_session(&path);
    assert_eq!(session.score(), 0);
    assert_eq!(session.board().count_tiles(), 2);

    let reopened = JsonFileStore::open(&path);
    assert_eq!(reopened.get(SCORE_KEY).as_deref(), Some("0"));

    fs::remove_dir_all(path.parent().unwrap()).ok();
}

fn memory_session(
    entries: &[(&str, &str)],
) -> GameSession<ScriptedRandom, KeyValueGameStore<MemoryStore>, EventLog> {
    let mut kv = MemoryStore::new();
    kv.set_many(entries).unwrap();
    GameSession::start(
        GameConfig::default(),
        ScriptedRandom::new([0.0]),
        KeyValueGameStore::new(kv),
        EventLog::default(),
    )
    .unwrap()
}

#[test]
fn oversized_stored_tiles_start_fresh_game() {
    let mut session = memory_session(&[
        (BOARD_KEY, "[2147483648,2147483648,0,0,0,0,0,0,0,0,0,0,0,0,0,0]"),
        (SCORE_KEY, "0"),
    ]);
    assert_eq!(session.board().count_tiles(), 2);
    assert!(session.board().max_tile() <= 4);

    for direction in Direction::ALL {
        if session.request_move(direction).is_some() {
            session.complete_move();
        }
    }
    assert!(session.game().history().len() <= Direction::ALL.len());
}

#[test]
fn huge_stored_score_saturates() {
    let mut session = memory_session(&[
        (BOARD_KEY, "[2,2,0,0,0,0,0,0,0,0,0,0,0,0,0,0]"),
        (SCORE_KEY, "18446744073709551615"),
    ]);
    assert_eq!(session.score(), u64::MAX);

    let result = session.request_move(Direction::Left).unwrap();
    assert!(result.changed);
    assert_eq!(session.score(), u64::MAX);
    assert_eq!(session.best_score(), u64::MAX);
    assert_eq!(
        session.store().inner().get(SCORE_KEY).as_deref(),
        Some("18446744073709551615")
    );
}
