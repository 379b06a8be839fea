use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("four_probability must be within [0, 1], got {value}")]
    InvalidFourProbability { value: f64 },
}

/// Tunable game rules.
///
/// Missing fields fall back to the classic rules when deserializing:
///
/// ```
/// use slide2048_engine::GameConfig;
///
/// let config = GameConfig::default();
/// assert_eq!(config.history_capacity, 10);
/// assert!((config.four_probability - 0.1).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Maximum number of undo snapshots kept; the oldest is evicted first.
    pub history_capacity: usize,
    /// Probability that a spawned tile is a 4 instead of a 2.
    pub four_probability: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            history_capacity: 10,
            four_probability: 0.1,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(ConfigError::InvalidFourProbability {
                value: self.four_probability,
            });
        }
        Ok(())
    }
}
