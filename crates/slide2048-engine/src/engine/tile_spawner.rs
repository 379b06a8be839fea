use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::core::Board;

/// A source of uniform random numbers in `[0, 1)`.
///
/// The engine draws every random decision through this trait so that tile
/// spawns can be made deterministic, either with a fixed [`TileSeed`] or with
/// a [`ScriptedRandom`] sequence.
pub trait RandomSource {
    /// Draws the next value, uniformly distributed in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<T> RandomSource for &mut T
where
    T: RandomSource + ?Sized,
{
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

impl<T> RandomSource for Box<T>
where
    T: RandomSource + ?Sized,
{
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Seed for deterministic tile generation.
///
/// A 128-bit seed. Two games started from the same seed and fed the same moves
/// spawn the same tiles.
///
/// # Example
///
/// ```
/// use rand::Rng as _;
/// use slide2048_engine::{GameBoard, SeededRandom, TileSeed};
///
/// let seed: TileSeed = rand::rng().random();
/// let a = GameBoard::new(SeededRandom::with_seed(seed));
/// let b = GameBoard::new(SeededRandom::with_seed(seed));
/// assert_eq!(a.board(), b.board());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSeed([u8; 16]);

impl TileSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl Distribution<TileSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> TileSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        TileSeed(seed)
    }
}

/// [`RandomSource`] backed by a seeded PCG generator.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: TileSeed,
    rng: Pcg32,
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl SeededRandom {
    /// Creates a source seeded from the thread-local generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic spawns.
    #[must_use]
    pub fn with_seed(seed: TileSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
        }
    }

    #[must_use]
    pub fn seed(&self) -> TileSeed {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.random()
    }
}

/// [`RandomSource`] that replays a fixed cycle of values.
///
/// Values outside `[0, 1)` are clamped into range. An empty script always
/// yields `0.0`.
///
/// ```
/// use slide2048_engine::{RandomSource as _, ScriptedRandom};
///
/// let mut rng = ScriptedRandom::new([0.25, 0.95]);
/// assert_eq!(rng.next_unit(), 0.25);
/// assert_eq!(rng.next_unit(), 0.95);
/// assert_eq!(rng.next_unit(), 0.25);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    position: usize,
}

impl ScriptedRandom {
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
            position: 0,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// A tile placed on the board after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnedTile {
    /// Row-major cell index.
    pub index: usize,
    /// Either 2 or 4.
    pub value: u32,
}

/// Places a 2 or a 4 into a uniformly chosen empty cell.
///
/// The first draw picks the cell, the second picks the value: a 2 when the draw
/// is below `1 - four_probability`, otherwise a 4. Returns `None` and leaves the
/// board untouched when it has no empty cell.
pub fn spawn_tile<R>(board: &mut Board, rng: &mut R, four_probability: f64) -> Option<SpawnedTile>
where
    R: RandomSource + ?Sized,
{
    let empty_count = board.count_empty();
    if empty_count == 0 {
        return None;
    }
    let index = board.empty_cells().nth(pick_index(rng.next_unit(), empty_count))?;
    let value = if rng.next_unit() < 1.0 - four_probability {
        2
    } else {
        4
    };
    board.set(index, value);
    log::trace!("spawned {value} at cell {index}");
    Some(SpawnedTile { index, value })
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn pick_index(unit: f64, len: usize) -> usize {
    ((unit * len as f64) as usize).min(len - 1)
}
