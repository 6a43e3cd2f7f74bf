use thiserror::Error;

/// Reasons a [`GameConfig`](crate::config::GameConfig) cannot start a game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cell size must be positive")]
    ZeroCellSize,

    #[error("{axis} extent {extent} is not divisible by cell size {cell_size}")]
    NotDivisible {
        axis: &'static str,
        extent: u32,
        cell_size: u32,
    },

    #[error("grid must be at least {min}x{min} cells, got {width}x{height}")]
    GridTooSmall { width: i32, height: i32, min: i32 },

    #[error("grid must be at most {max}x{max} cells, got {width}x{height}")]
    GridTooLarge { width: i32, height: i32, max: i32 },

    #[error("initial snake length {length} must be between {min} and the grid width {width}")]
    InitialLength { length: usize, min: usize, width: i32 },

    #[error("growth threshold must be positive")]
    ZeroGrowthThreshold,

    #[error("interval step must be positive")]
    ZeroIntervalStep,

    #[error("minimum interval {min_ms}ms must be positive and no larger than the initial {initial_ms}ms")]
    IntervalRange { initial_ms: u64, min_ms: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Food had nowhere to go. The snake cannot legally fill the grid, so
    /// this means the game state is corrupt.
    #[error("no free cell left for food on a {width}x{height} grid")]
    BoardFull { width: i32, height: i32 },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
