use crate::game::{GameState, Snapshot};
use crate::grid::Direction;
use crate::palette::{self, Rgb};
use crate::renderer::{Input, Renderer};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};
use std::time::Duration;

const BACKGROUND: Color = Color::Rgb { r: 26, g: 26, b: 26 };
const TEXT: Color = Color::Rgb { r: 204, g: 204, b: 204 };

pub struct CliRenderer {
    poll_timeout: Duration,
    // Segment index per grid cell, reused between frames
    occupancy: Vec<Option<usize>>,
}

impl CliRenderer {
    pub fn new() -> Self {
        Self {
            // Short enough that ticks at the fastest speed are not delayed
            poll_timeout: Duration::from_millis(10),
            occupancy: Vec::new(),
        }
    }

    /// Terminal size needed to show a grid of this many cells, saturating
    /// at the largest size a terminal can report.
    pub fn required_size(grid_width: i32, grid_height: i32) -> (u16, u16) {
        (
            to_u16(i64::from(grid_width) * 2),
            to_u16(i64::from(grid_height) + 3),
        )
    }

    fn fill_occupancy(&mut self, snapshot: &Snapshot<'_>) {
        let grid = snapshot.grid;
        self.occupancy.clear();
        self.occupancy.resize(grid.cell_count(), None);

        // Walk tail to head so the head wins if a collision stacked two segments
        for (index, cell) in snapshot.snake.cells().enumerate().rev() {
            if grid.contains(cell) {
                self.occupancy[(cell.row * grid.width + cell.col) as usize] = Some(index);
            }
        }
    }

    fn draw_info(&self, snapshot: &Snapshot<'_>, stdout: &mut io::Stdout) -> io::Result<()> {
        let info_row = to_u16(i64::from(snapshot.grid.height));

        queue!(
            stdout,
            cursor::MoveTo(0, info_row),
            ResetColor,
            terminal::Clear(ClearType::UntilNewLine),
            SetForegroundColor(TEXT),
            Print(format!(
                "Score: {} | Speed Level: {}",
                snapshot.score, snapshot.speed_level
            ))
        )?;

        queue!(
            stdout,
            cursor::MoveTo(0, info_row.saturating_add(1)),
            terminal::Clear(ClearType::UntilNewLine),
            Print("WASD/Arrows move | Space pause | R restart | Esc quit")
        )?;

        queue!(
            stdout,
            cursor::MoveTo(0, info_row.saturating_add(2)),
            terminal::Clear(ClearType::UntilNewLine)
        )?;

        match snapshot.state {
            GameState::Paused => {
                queue!(
                    stdout,
                    SetForegroundColor(Color::Yellow),
                    Print("Paused! Press Space to continue"),
                )?;
            }
            GameState::GameOver => {
                queue!(
                    stdout,
                    SetForegroundColor(Color::Red),
                    Print("Game Over! Press R to restart | Esc to quit"),
                )?;
            }
            GameState::Running => {}
        }

        queue!(stdout, ResetColor)?;
        Ok(())
    }
}

impl Default for CliRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Game input bound to a key press. Releases and repeats are ignored.
pub fn map_key(key: KeyEvent) -> Option<Input> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let input = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Input::Quit,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Input::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') => Input::Restart,
        KeyCode::Char(' ') => Input::TogglePause,
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Input::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Input::Direction(Direction::Down)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Input::Direction(Direction::Left)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Input::Direction(Direction::Right)
        }
        _ => return None,
    };
    Some(input)
}

fn to_u16(value: i64) -> u16 {
    u16::try_from(value.max(0)).unwrap_or(u16::MAX)
}

fn to_color(rgb: Rgb) -> Color {
    let (r, g, b) = rgb.to_u8();
    Color::Rgb { r, g, b }
}

impl Renderer for CliRenderer {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide
        )?;
        Ok(())
    }

    fn render(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        self.fill_occupancy(snapshot);

        let grid = snapshot.grid;
        let len = snapshot.snake.len();
        let mut stdout = io::stdout();

        queue!(stdout, cursor::MoveTo(0, 0))?;

        for cell in grid.cells() {
            let color = match self.occupancy[(cell.row * grid.width + cell.col) as usize] {
                Some(index) => to_color(palette::segment_color(index, len)),
                None if snapshot.food == Some(cell) => to_color(palette::FOOD),
                None => BACKGROUND,
            };
            queue!(stdout, SetBackgroundColor(color), Print("  "))?;

            if cell.col == grid.width - 1 {
                queue!(stdout, ResetColor, Print("\r\n"))?;
            }
        }

        self.draw_info(snapshot, &mut stdout)?;

        stdout.flush()?;
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            cursor::Show,
            terminal::LeaveAlternateScreen,
            ResetColor
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        if !event::poll(self.poll_timeout)? {
            return Ok(None);
        }

        if let Event::Key(key) = event::read()? {
            return Ok(map_key(key));
        }

        Ok(None)
    }
}

impl Drop for CliRenderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
