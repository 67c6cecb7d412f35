//! Engine configuration.

use goalgrid_core::{GameMode, StrategyPolicy, DEFAULT_GRID_SIZE};
use serde::{Deserialize, Serialize};

/// Parameters controlling how rounds are generated and played.
///
/// Every field has a default, so a partial TOML table deserialises cleanly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Number of rows and columns of the square grid.
    pub grid_size: u32,
    /// Single-goal or rotating multi-goal play.
    pub mode: GameMode,
    /// How the carving strategy is chosen for each round.
    pub strategy: StrategyPolicy,
    /// Seed for the engine's random source; drawn from the OS when absent.
    pub seed: Option<u64>,
}

impl Config {
    /// Creates a configuration for a `grid_size`×`grid_size` single-goal grid.
    #[must_use]
    pub const fn new(grid_size: u32) -> Self {
        Self {
            grid_size,
            mode: GameMode::Single,
            strategy: StrategyPolicy::Random,
            seed: None,
        }
    }

    /// Replaces the game mode.
    #[must_use]
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replaces the strategy policy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: StrategyPolicy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Fixes the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE)
    }
}
