pub use self::{board::*, line::*};

pub(crate) mod board;
pub(crate) mod line;

/// Number of cells in a single row or column.
pub const BOARD_SIZE: usize = 4;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Tile value that wins the game when first produced by a merge.
pub const WINNING_TILE: u32 = 2048;

/// Largest tile a 4×4 board can ever hold.
///
/// Tiles of this value never merge, so no move can produce anything larger.
pub const MAX_TILE: u32 = 1 << 17;
