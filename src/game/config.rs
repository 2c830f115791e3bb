use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Side of the square grid
pub const GRID_SIZE: usize = 20;
/// Terminal columns used to draw one grid cell
pub const CELL_WIDTH: u16 = 2;
/// Time between two game ticks
pub const TICK_PERIOD_MS: u64 = 150;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square game grid
    pub grid_size: usize,
    /// Terminal columns per grid cell when drawing
    pub cell_width: u16,
    /// Tick period in milliseconds
    pub tick_period_ms: u64,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Fixed rng seed, for reproducible food placement
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            cell_width: CELL_WIDTH,
            tick_period_ms: TICK_PERIOD_MS,
            initial_snake_length: 1,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Builder-style seed override
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// Reject configurations the game cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.grid_size < 2 {
            bail!("grid size must be at least 2, got {}", self.grid_size);
        }
        if self.cell_width == 0 {
            bail!("cell width must be at least 1 column");
        }
        // Bordered board must be addressable in terminal coordinates
        let limit = u64::from(u16::MAX);
        let width = (self.grid_size as u64)
            .saturating_mul(u64::from(self.cell_width))
            .saturating_add(2);
        let height = (self.grid_size as u64).saturating_add(2);
        if width > limit || height > limit {
            bail!(
                "a {0}x{0} grid with {1}-column cells does not fit a terminal",
                self.grid_size,
                self.cell_width
            );
        }
        if self.tick_period_ms == 0 {
            bail!("tick period must be positive");
        }
        // The body is laid out leftwards from the centre cell
        let room = self.grid_size / 2 + 1;
        if self.initial_snake_length == 0 || self.initial_snake_length > room {
            bail!(
                "initial snake length must be between 1 and {} on a {}x{} grid, got {}",
                room,
                self.grid_size,
                self.grid_size,
                self.initial_snake_length
            );
        }
        Ok(())
    }

    /// Load a configuration from a JSON file, filling gaps with defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }
}
