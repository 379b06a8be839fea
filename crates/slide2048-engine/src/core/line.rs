use arrayvec::ArrayVec;

use super::{BOARD_SIZE, MAX_TILE, WINNING_TILE};

/// A single row or column of cells, ordered in the direction tiles slide towards.
///
/// Index 0 is the edge the tiles are pushed against.
pub type Line = [u32; BOARD_SIZE];

/// Result of collapsing one [`Line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineReduction {
    /// The collapsed line, right-padded with empty cells.
    pub line: Line,
    /// Sum of the values produced by merges.
    pub score_delta: u64,
    /// Whether a merge produced the [`WINNING_TILE`].
    pub reached_2048: bool,
}

/// Returns `true` if tiles `a` and `b` merge when pushed together.
///
/// Empty cells never merge, and neither do two [`MAX_TILE`]s.
#[must_use]
pub const fn can_merge(a: u32, b: u32) -> bool {
    a == b && a != 0 && a < MAX_TILE
}

/// Slides and merges one line towards index 0.
///
/// Empty cells are dropped first, then equal neighbours are merged scanning from
/// index 0. A merged tile and its consumed partner take no part in any further
/// comparison, so a line merges each pair at most once per call:
///
/// ```
/// use slide2048_engine::reduce_line;
///
/// let reduced = reduce_line([2, 2, 2, 2]);
/// assert_eq!(reduced.line, [4, 4, 0, 0]);
/// assert_eq!(reduced.score_delta, 8);
///
/// let reduced = reduce_line([2, 0, 2, 4]);
/// assert_eq!(reduced.line, [4, 4, 0, 0]);
/// assert_eq!(reduced.score_delta, 4);
/// ```
#[must_use]
pub fn reduce_line(line: Line) -> LineReduction {
    let tiles: ArrayVec<u32, BOARD_SIZE> = line.into_iter().filter(|&v| v != 0).collect();

    let mut reduced = [0; BOARD_SIZE];
    let mut score_delta = 0;
    let mut reached_2048 = false;
    let mut out = 0;
    let mut i = 0;
    while i < tiles.len() {
        let value = tiles[i];
        if tiles.get(i + 1).is_some_and(|&next| can_merge(value, next)) {
            let merged = value * 2;
            score_delta += u64::from(merged);
            reached_2048 |= merged == WINNING_TILE;
            reduced[out] = merged;
            // partner is consumed
            i += 2;
        } else {
            reduced[out] = value;
            i += 1;
        }
        out += 1;
    }

    LineReduction {
        line: reduced,
        score_delta,
        reached_2048,
    }
}
