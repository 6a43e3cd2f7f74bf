use crate::error::ConfigError;
use crate::grid::GridSize;
use std::time::Duration;

/// Window extent along each axis, in pixels.
pub const DEFAULT_EXTENT: u32 = 600;
/// Side of one cell, in pixels. Both extents must be multiples of it.
pub const DEFAULT_CELL_SIZE: u32 = 20;
pub const DEFAULT_INITIAL_LENGTH: usize = 3;
/// Points awarded per food.
pub const DEFAULT_FOOD_REWARD: u32 = 10;
/// Every time the snake length reaches a multiple of this, the game speeds up.
pub const DEFAULT_GROWTH_THRESHOLD: usize = 5;
pub const DEFAULT_INITIAL_INTERVAL_MS: u64 = 150;
pub const DEFAULT_INTERVAL_STEP_MS: u64 = 10;
pub const DEFAULT_MIN_INTERVAL_MS: u64 = 50;

/// Smallest playable grid side, in cells.
pub const MIN_GRID_CELLS: i32 = 5;
/// Largest grid side, in cells. Keeps the board addressable by terminal
/// coordinates at two columns per cell.
pub const MAX_GRID_CELLS: i32 = 1000;
pub const MIN_SNAKE_LENGTH: usize = 3;

/// Tuning constants for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
    pub initial_length: usize,
    pub food_reward: u32,
    pub growth_threshold: usize,
    pub initial_interval_ms: u64,
    pub interval_step_ms: u64,
    pub min_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_EXTENT,
            height: DEFAULT_EXTENT,
            cell_size: DEFAULT_CELL_SIZE,
            initial_length: DEFAULT_INITIAL_LENGTH,
            food_reward: DEFAULT_FOOD_REWARD,
            growth_threshold: DEFAULT_GROWTH_THRESHOLD,
            initial_interval_ms: DEFAULT_INITIAL_INTERVAL_MS,
            interval_step_ms: DEFAULT_INTERVAL_STEP_MS,
            min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    /// Grid dimensions in cells. Only meaningful once [`validate`](Self::validate) passed.
    pub fn grid(&self) -> GridSize {
        let cell_size = self.cell_size.max(1);
        let cells = |extent: u32| i32::try_from(extent / cell_size).unwrap_or(i32::MAX);
        GridSize::new(cells(self.width), cells(self.height))
    }

    pub fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.initial_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        for (axis, extent) in [("horizontal", self.width), ("vertical", self.height)] {
            if extent % self.cell_size != 0 {
                return Err(ConfigError::NotDivisible {
                    axis,
                    extent,
                    cell_size: self.cell_size,
                });
            }
        }

        let grid = self.grid();
        if grid.width < MIN_GRID_CELLS || grid.height < MIN_GRID_CELLS {
            return Err(ConfigError::GridTooSmall {
                width: grid.width,
                height: grid.height,
                min: MIN_GRID_CELLS,
            });
        }

        if grid.width > MAX_GRID_CELLS || grid.height > MAX_GRID_CELLS {
            return Err(ConfigError::GridTooLarge {
                width: grid.width,
                height: grid.height,
                max: MAX_GRID_CELLS,
            });
        }

        // The starting body is laid out in a single row
        if self.initial_length < MIN_SNAKE_LENGTH || self.initial_length > grid.width as usize {
            return Err(ConfigError::InitialLength {
                length: self.initial_length,
                min: MIN_SNAKE_LENGTH,
                width: grid.width,
            });
        }

        if self.growth_threshold == 0 {
            return Err(ConfigError::ZeroGrowthThreshold);
        }

        if self.interval_step_ms == 0 {
            return Err(ConfigError::ZeroIntervalStep);
        }

        if self.min_interval_ms == 0 || self.min_interval_ms > self.initial_interval_ms {
            return Err(ConfigError::IntervalRange {
                initial_ms: self.initial_interval_ms,
                min_ms: self.min_interval_ms,
            });
        }

        Ok(())
    }
}
