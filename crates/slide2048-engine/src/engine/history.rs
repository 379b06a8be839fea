use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::Board;

/// Board and score captured right before a move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Board,
    pub score: u64,
}

/// Bounded undo stack.
///
/// Snapshots are popped newest first. When a push exceeds the capacity the
/// oldest snapshot is evicted, so at most `capacity` moves can be undone.
///
/// # Example
///
/// ```
/// use slide2048_engine::{Board, History, Snapshot};
///
/// let mut history = History::with_capacity(2);
/// for score in 0..3 {
///     history.push(Snapshot { board: Board::EMPTY, score });
/// }
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.pop().map(|s| s.score), Some(2));
/// assert_eq!(history.pop().map(|s| s.score), Some(1));
/// assert_eq!(history.pop(), None);
/// ```
#[derive(Debug, Clone)]
pub struct History {
    capacity: usize,
    entries: VecDeque<Snapshot>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub const DEFAULT_CAPACITY: usize = 10;

    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity + 1),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_back(snapshot);
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop_back()
    }

    #[must_use]
    pub fn peek(&self) -> Option<&Snapshot> {
        self.entries.back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates over the snapshots from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> + '_ {
        self.entries.iter()
    }
}
