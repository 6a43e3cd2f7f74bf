use anyhow::{Context, Result};
use clap::Parser;
use crossterm::terminal;
use log::{info, warn, LevelFilter};
use simplelog::{Config, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;
use torus_snake::config::{self, GameConfig};
use torus_snake::{CliRenderer, Game, Input, Renderer};

/// Snake on a wrap-around grid, played in the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Playfield width in pixels
    #[arg(long, default_value_t = config::DEFAULT_EXTENT)]
    width: u32,

    /// Playfield height in pixels
    #[arg(long, default_value_t = config::DEFAULT_EXTENT)]
    height: u32,

    /// Side of one cell in pixels; must divide width and height
    #[arg(long, default_value_t = config::DEFAULT_CELL_SIZE)]
    cell_size: u32,

    /// Starting tick interval in milliseconds
    #[arg(long, default_value_t = config::DEFAULT_INITIAL_INTERVAL_MS)]
    interval: u64,

    /// Fastest tick interval in milliseconds
    #[arg(long, default_value_t = config::DEFAULT_MIN_INTERVAL_MS)]
    min_interval: u64,

    /// Milliseconds taken off the interval at each speed-up
    #[arg(long, default_value_t = config::DEFAULT_INTERVAL_STEP_MS)]
    interval_step: u64,

    /// Speed up whenever the length reaches a multiple of this
    #[arg(long, default_value_t = config::DEFAULT_GROWTH_THRESHOLD)]
    growth_threshold: usize,

    /// Points per food
    #[arg(long, default_value_t = config::DEFAULT_FOOD_REWARD)]
    reward: u32,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the game log (the terminal is taken by the board)
    #[arg(long, default_value = "torus-snake.log")]
    log_file: PathBuf,

    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            cell_size: self.cell_size,
            food_reward: self.reward,
            growth_threshold: self.growth_threshold,
            initial_interval_ms: self.interval,
            interval_step_ms: self.interval_step,
            min_interval_ms: self.min_interval,
            ..GameConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_file = File::create(&args.log_file)
        .with_context(|| format!("creating log file {}", args.log_file.display()))?;
    WriteLogger::init(args.log_level, Config::default(), log_file)
        .context("initializing logger")?;

    info!("===== torus-snake =====");

    let config = args.game_config();
    let mut game = match args.seed {
        Some(seed) => Game::with_seed(config, seed),
        None => Game::new(config),
    }
    .context("starting game")?;

    let (needed_cols, needed_rows) =
        CliRenderer::required_size(game.grid().width, game.grid().height);
    let (term_cols, term_rows) = terminal::size().context("reading terminal size")?;
    if term_cols < needed_cols || term_rows < needed_rows {
        warn!(
            "Terminal is {}x{}, board needs {}x{}; it will be clipped",
            term_cols, term_rows, needed_cols, needed_rows
        );
    }

    let mut renderer = CliRenderer::new();
    renderer.init().context("initializing terminal")?;

    let result = run(&mut game, &mut renderer);

    renderer.cleanup().context("restoring terminal")?;
    result
}

fn run(game: &mut Game, renderer: &mut CliRenderer) -> Result<()> {
    renderer.render(&game.snapshot())?;
    let mut last_tick = Instant::now();

    loop {
        // Poll for input
        if let Some(input) = renderer.poll_input()? {
            match input {
                Input::Direction(direction) => {
                    game.set_direction(direction);
                }
                Input::TogglePause => {
                    game.toggle_pause();
                    renderer.render(&game.snapshot())?;
                }
                Input::Restart => {
                    game.restart()?;
                    renderer.render(&game.snapshot())?;
                }
                Input::Quit => {
                    info!("Quit with score {}", game.score());
                    return Ok(());
                }
            }
        }

        // The interval can change on any tick, so it is read fresh each time
        if last_tick.elapsed() >= game.tick_interval() {
            game.tick()?;
            last_tick = Instant::now();
            renderer.render(&game.snapshot())?;
        }
    }
}
