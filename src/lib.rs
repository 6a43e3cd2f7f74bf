pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod palette;
pub mod renderer;
pub mod snake;
pub mod cli_renderer;

pub use config::GameConfig;
pub use error::{ConfigError, GameError};
pub use game::{Game, GameState, Snapshot, TickOutcome};
pub use grid::{Cell, Direction, GridSize};
pub use renderer::{Input, Renderer};
pub use snake::Snake;
pub use cli_renderer::CliRenderer;
