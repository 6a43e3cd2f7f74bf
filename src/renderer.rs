use crate::game::Snapshot;
use crate::grid::Direction;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Direction(Direction),
    TogglePause,
    Restart,
    Quit,
}

/// Trait that abstracts rendering implementation.
/// The game core only ever hands out read-only snapshots, so backends stay
/// swappable and testable.
pub trait Renderer {
    /// Initialize the renderer
    fn init(&mut self) -> io::Result<()>;

    /// Render one frame of game state
    fn render(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()>;

    /// Clean up and restore terminal/display state
    fn cleanup(&mut self) -> io::Result<()>;

    /// Poll for input from the user
    fn poll_input(&mut self) -> io::Result<Option<Input>>;
}
