use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    BOARD_SIZE, CELL_COUNT, MAX_TILE,
    line::{Line, can_merge, reduce_line},
};

/// A direction the tiles are pushed towards.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in a fixed order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Board indices of the `i`-th line, ordered from the edge tiles slide towards.
    ///
    /// Reading a line in this order lets a single left-collapsing reducer serve
    /// every direction: `Right` and `Down` read their rows and columns reversed.
    const fn line_indices(self, i: usize) -> [usize; BOARD_SIZE] {
        let n = BOARD_SIZE;
        match self {
            Self::Left => [i * n, i * n + 1, i * n + 2, i * n + 3],
            Self::Right => [i * n + 3, i * n + 2, i * n + 1, i * n],
            Self::Up => [i, i + n, i + 2 * n, i + 3 * n],
            Self::Down => [i + 3 * n, i + 2 * n, i + n, i],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    #[display("expected {CELL_COUNT} cells, got {len}")]
    InvalidLength { len: usize },
    #[display("cell {index} holds {value}, which is not a tile between 2 and {MAX_TILE}")]
    InvalidTile { index: usize, value: u32 },
}

/// Outcome of sliding a whole board in one direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlideOutcome {
    /// Whether any line differs from its value before the slide.
    pub changed: bool,
    /// Sum of all merge values across the four lines.
    pub score_delta: u64,
    /// Whether any line merged into a 2048 tile.
    pub reached_2048: bool,
}

/// The 4×4 grid of tiles, stored row-major.
///
/// A cell holds `0` when empty and otherwise a power of two between 2 and
/// [`MAX_TILE`].
/// The cell count is fixed by the array type; the tile invariant is checked
/// whenever a board is built from untrusted input ([`Board::from_cells`] and
/// deserialization).
///
/// # Serialization
///
/// A board serializes as a flat array of 16 integers, matching the persisted
/// save format:
///
/// ```
/// use slide2048_engine::Board;
///
/// let board = Board::from_cells(&[2, 0, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
/// assert_eq!(board.get(5), 4);
/// assert_eq!(board.count_empty(), 14);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [u32; CELL_COUNT],
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.cells.as_slice().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let cells = Vec::<u32>::deserialize(deserializer)?;
        Board::from_cells(&cells).map_err(serde::de::Error::custom)
    }
}

fn is_valid_tile(value: u32) -> bool {
    value == 0 || ((2..=MAX_TILE).contains(&value) && value.is_power_of_two())
}

impl Board {
    pub const SIZE: usize = BOARD_SIZE;
    pub const CELL_COUNT: usize = CELL_COUNT;

    pub const EMPTY: Self = Self {
        cells: [0; CELL_COUNT],
    };

    /// Builds a board from a row-major slice of exactly 16 cells.
    pub fn from_cells(cells: &[u32]) -> Result<Self, BoardError> {
        let cells: [u32; CELL_COUNT] = cells
            .try_into()
            .map_err(|_| BoardError::InvalidLength { len: cells.len() })?;
        if let Some((index, &value)) = cells
            .iter()
            .enumerate()
            .find(|(_, v)| !is_valid_tile(**v))
        {
            return Err(BoardError::InvalidTile { index, value });
        }
        Ok(Self { cells })
    }

    /// Creates a `Board` from a whitespace-separated grid for testing.
    ///
    /// Each non-empty line is one row of four tokens, top to bottom; `.` marks an
    /// empty cell and any other token is parsed as a tile value.
    ///
    /// # Panics
    ///
    /// Panics if the grid is not 4×4 or holds an invalid tile.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let cells: Vec<u32> = art
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .flat_map(|(y, line)| {
                let row: Vec<u32> = line
                    .split_whitespace()
                    .map(|token| match token {
                        "." => 0,
                        _ => token
                            .parse()
                            .unwrap_or_else(|e| panic!("invalid tile {token:?} at row {y}: {e}")),
                    })
                    .collect();
                assert_eq!(
                    row.len(),
                    BOARD_SIZE,
                    "Each row must have exactly {BOARD_SIZE} cells, got {} at row {y}",
                    row.len()
                );
                row
            })
            .collect();
        Self::from_cells(&cells).unwrap_or_else(|e| panic!("invalid board: {e}"))
    }

    #[must_use]
    pub fn cells(&self) -> &[u32; CELL_COUNT] {
        &self.cells
    }

    #[must_use]
    pub fn get(&self, index: usize) -> u32 {
        self.cells[index]
    }

    pub(crate) fn set(&mut self, index: usize, value: u32) {
        debug_assert!(is_valid_tile(value));
        self.cells[index] = value;
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> u32 {
        self.cells[y * BOARD_SIZE + x]
    }

    /// Returns the `i`-th line in `direction`'s traversal order.
    #[must_use]
    pub fn line(&self, direction: Direction, i: usize) -> Line {
        direction.line_indices(i).map(|idx| self.cells[idx])
    }

    fn set_line(&mut self, direction: Direction, i: usize, line: Line) {
        for (idx, value) in direction.line_indices(i).into_iter().zip(line) {
            self.cells[idx] = value;
        }
    }

    /// Returns the indices of all empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, &v)| (v == 0).then_some(idx))
    }

    #[must_use]
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    #[must_use]
    pub fn count_tiles(&self) -> usize {
        CELL_COUNT - self.count_empty()
    }

    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    #[must_use]
    pub fn contains_tile(&self, value: u32) -> bool {
        self.cells.contains(&value)
    }

    /// Slides every line towards `direction`, without spawning any tile.
    ///
    /// The receiver is left untouched; the slid board is returned together with
    /// what happened during the slide.
    #[must_use]
    pub fn slide(&self, direction: Direction) -> (Self, SlideOutcome) {
        let mut next = *self;
        let mut outcome = SlideOutcome::default();
        for i in 0..BOARD_SIZE {
            let line = self.line(direction, i);
            let reduced = reduce_line(line);
            outcome.changed |= reduced.line != line;
            outcome.score_delta += reduced.score_delta;
            outcome.reached_2048 |= reduced.reached_2048;
            next.set_line(direction, i, reduced.line);
        }
        (next, outcome)
    }

    /// Checks whether no move can change the board.
    ///
    /// This holds only when there is no empty cell and no two horizontally or
    /// vertically adjacent tiles can merge.
    #[must_use]
    pub fn is_stuck(&self) -> bool {
        if self.cells.contains(&0) {
            return false;
        }
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                let value = self.cell(x, y);
                let right = x + 1 < BOARD_SIZE && can_merge(value, self.cell(x + 1, y));
                let down = y + 1 < BOARD_SIZE && can_merge(value, self.cell(x, y + 1));
                if right || down {
                    return false;
                }
            }
        }
        true
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(BOARD_SIZE) {
            for (x, &value) in row.iter().enumerate() {
                if x > 0 {
                    f.write_str(" ")?;
                }
                if value == 0 {
                    write!(f, "{:>6}", ".")?;
                } else {
                    write!(f, "{value:>6}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
