use crate::config::GameConfig;
use crate::error::GameError;
use crate::food;
use crate::grid::{Cell, Direction, GridSize};
use crate::snake::{self, Snake};
use log::{debug, error, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Running,
    Paused,
    GameOver,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or over; nothing moved.
    Idle,
    Moved { ate: bool },
    Collided,
}

/// Read-only view of the game handed to renderers.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub snake: &'a Snake,
    pub food: Option<Cell>,
    pub score: u32,
    pub tick_interval: Duration,
    pub speed_level: u32,
    pub state: GameState,
    pub grid: GridSize,
}

pub struct Game {
    pub(crate) config: GameConfig,
    pub(crate) grid: GridSize,
    pub(crate) snake: Snake,
    pub(crate) food: Option<Cell>,
    pub(crate) score: u32,
    pub(crate) interval_ms: u64,
    pub(crate) direction: Direction,
    pub(crate) pending_direction: Direction,
    pub(crate) state: GameState,
    pub(crate) collision_offset: usize,
    rng: ChaCha8Rng,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    /// A game whose food placement is fully determined by `seed`.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: ChaCha8Rng) -> Result<Self, GameError> {
        config.validate()?;

        let grid = config.grid();
        let mut game = Self {
            snake: initial_snake(&config, grid),
            grid,
            food: None,
            score: 0,
            interval_ms: config.initial_interval_ms,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            state: GameState::Running,
            collision_offset: snake::collision_offset(grid),
            config,
            rng,
        };
        game.start()?;

        Ok(game)
    }

    /// Puts every piece of game data back to its starting value.
    fn start(&mut self) -> Result<(), GameError> {
        self.snake = initial_snake(&self.config, self.grid);
        self.direction = Direction::Right;
        self.pending_direction = Direction::Right;
        self.score = 0;
        self.interval_ms = self.config.initial_interval_ms;
        self.state = GameState::Running;
        self.food = None;
        self.food = Some(self.place_food()?);

        info!(
            "Game started on a {}x{} grid, tick interval {}ms",
            self.grid.width, self.grid.height, self.interval_ms
        );
        Ok(())
    }

    fn place_food(&mut self) -> Result<Cell, GameError> {
        let snake = &self.snake;
        food::place(&mut self.rng, self.grid, &|cell| snake.contains(cell))
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Direction the snake moved on the last tick.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction the snake will take on the next tick.
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Delay before the next tick. Re-read after every tick, it shrinks as
    /// the snake grows.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// 1 at the starting speed, plus one per speed-up.
    pub fn speed_level(&self) -> u32 {
        let gained = self.config.initial_interval_ms.saturating_sub(self.interval_ms);
        (gained / self.config.interval_step_ms) as u32 + 1
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            snake: &self.snake,
            food: self.food,
            score: self.score,
            tick_interval: self.tick_interval(),
            speed_level: self.speed_level(),
            state: self.state,
            grid: self.grid,
        }
    }

    /// Buffers a turn for the next tick. Turning back onto the body is
    /// refused, measured against the direction actually being travelled.
    /// Returns whether the request was taken.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.state != GameState::Running {
            debug!("Ignoring {:?} while {:?}", direction, self.state);
            return false;
        }

        if direction == self.direction.opposite() {
            debug!("Ignoring reversal from {:?} to {:?}", self.direction, direction);
            return false;
        }

        self.pending_direction = direction;
        true
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            GameState::Running => {
                info!("Paused");
                GameState::Paused
            }
            GameState::Paused => {
                info!("Resumed");
                GameState::Running
            }
            GameState::GameOver => {
                debug!("Ignoring pause toggle after game over");
                GameState::GameOver
            }
        };
    }

    /// Starts a fresh game. Only has an effect once the current one is over.
    pub fn restart(&mut self) -> Result<(), GameError> {
        if self.state != GameState::GameOver {
            debug!("Ignoring restart while {:?}", self.state);
            return Ok(());
        }

        info!("Restarting");
        self.start()
    }

    /// Advances the game by one step.
    pub fn tick(&mut self) -> Result<TickOutcome, GameError> {
        if self.state != GameState::Running {
            return Ok(TickOutcome::Idle);
        }

        self.direction = self.pending_direction;

        let new_head = self.snake.next_head(self.direction, self.grid);
        let ate = self.food == Some(new_head);

        self.snake.advance(new_head, ate);

        if ate {
            self.score += self.config.food_reward;
            info!(
                "Ate food at ({}, {}), score {}",
                new_head.col, new_head.row, self.score
            );

            // The body already covers the new head here
            self.food = match self.place_food() {
                Ok(cell) => Some(cell),
                Err(err) => {
                    self.food = None;
                    self.state = GameState::GameOver;
                    error!("Food placement failed: {}", err);
                    return Err(err);
                }
            };

            if self.snake.growth_threshold_crossed(self.config.growth_threshold) {
                self.speed_up();
            }
        }

        if snake::self_collision(&self.snake, self.collision_offset) {
            self.state = GameState::GameOver;
            info!(
                "Game over at ({}, {}), final score {}",
                new_head.col, new_head.row, self.score
            );
            return Ok(TickOutcome::Collided);
        }

        Ok(TickOutcome::Moved { ate })
    }

    fn speed_up(&mut self) {
        let next = self
            .interval_ms
            .saturating_sub(self.config.interval_step_ms)
            .max(self.config.min_interval_ms);

        if next < self.interval_ms {
            self.interval_ms = next;
            info!(
                "Length {}, speed level {} ({}ms per tick)",
                self.snake.len(),
                self.speed_level(),
                self.interval_ms
            );
        }
    }
}

/// Starting body: head in the middle of the grid facing right.
fn initial_snake(config: &GameConfig, grid: GridSize) -> Snake {
    let head = Cell::new(grid.width / 2, grid.height / 2);
    Snake::new(head, Direction::Right, config.initial_length, grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use proptest::prelude::*;

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    fn new_game() -> Game {
        Game::with_seed(GameConfig::default(), 42).unwrap()
    }

    /// Game with a hand-placed snake heading right
    fn game_with(cells: &[(i32, i32)], food: Option<(i32, i32)>) -> Game {
        let mut game = new_game();
        game.snake = Snake::from_cells(cells.iter().map(|&(c, r)| Cell::new(c, r)));
        game.food = food.map(|(c, r)| Cell::new(c, r));
        game
    }

    fn cells(game: &Game) -> Vec<(i32, i32)> {
        game.snake.cells().map(|cell| (cell.col, cell.row)).collect()
    }

    #[test]
    fn test_initial_state() {
        let game = new_game();

        assert_eq!(cells(&game), vec![(15, 15), (14, 15), (13, 15)]);
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.direction(), Direction::Right);
        assert_eq!(game.score(), 0);
        assert_eq!(game.tick_interval(), Duration::from_millis(150));
        assert_eq!(game.speed_level(), 1);

        let food = game.food().unwrap();
        assert!(game.grid().contains(food));
        assert!(!game.snake().contains(food));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig {
            cell_size: 7,
            ..GameConfig::default()
        };

        assert!(matches!(
            Game::with_seed(config, 1),
            Err(GameError::Config(ConfigError::NotDivisible { .. }))
        ));
    }

    #[test]
    fn test_plain_tick_moves_without_growing() {
        let mut game = game_with(&[(10, 10), (9, 10), (8, 10)], Some((12, 10)));

        assert_eq!(game.tick().unwrap(), TickOutcome::Moved { ate: false });

        assert_eq!(cells(&game), vec![(11, 10), (10, 10), (9, 10)]);
        assert_eq!(game.score(), 0);
        assert_eq!(game.food(), Some(Cell::new(12, 10)));
        assert_eq!(game.tick_interval(), Duration::from_millis(150));
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut game = game_with(&[(11, 10), (10, 10), (9, 10)], Some((12, 10)));

        assert_eq!(game.tick().unwrap(), TickOutcome::Moved { ate: true });

        assert_eq!(cells(&game), vec![(12, 10), (11, 10), (10, 10), (9, 10)]);
        assert_eq!(game.score(), 10);

        let food = game.food().unwrap();
        assert_ne!(food, Cell::new(12, 10));
        assert!(!game.snake().contains(food));
    }

    #[test]
    fn test_movement_wraps_across_edge() {
        let mut game = game_with(&[(29, 3), (28, 3), (27, 3)], Some((0, 0)));

        game.tick().unwrap();

        assert_eq!(game.snake().head(), Cell::new(0, 3));
        assert_eq!(game.state(), GameState::Running);
    }

    #[test]
    fn test_reverse_is_rejected_against_applied_direction() {
        let mut game = new_game();

        // Up is buffered, but Right is still the applied direction
        assert!(game.set_direction(Direction::Up));
        assert!(!game.set_direction(Direction::Left));
        assert_eq!(game.pending_direction(), Direction::Up);

        // Down is not the reverse of Right, so it overrides the buffered Up
        assert!(game.set_direction(Direction::Down));
        assert_eq!(game.pending_direction(), Direction::Down);
    }

    #[test]
    fn test_latest_direction_wins_within_a_tick() {
        let mut game = game_with(&[(10, 10), (9, 10), (8, 10)], None);

        game.set_direction(Direction::Up);
        game.set_direction(Direction::Down);
        game.tick().unwrap();

        assert_eq!(game.direction(), Direction::Down);
        assert_eq!(game.snake().head(), Cell::new(10, 11));
    }

    #[test]
    fn test_direction_ignored_unless_running() {
        let mut game = new_game();
        game.toggle_pause();

        assert!(!game.set_direction(Direction::Up));
        assert_eq!(game.pending_direction(), Direction::Right);
    }

    #[test]
    fn test_pause_freezes_game() {
        let mut game = new_game();
        game.toggle_pause();
        assert_eq!(game.state(), GameState::Paused);

        let before = (cells(&game), game.food(), game.score());
        for _ in 0..5 {
            assert_eq!(game.tick().unwrap(), TickOutcome::Idle);
        }
        assert_eq!((cells(&game), game.food(), game.score()), before);

        game.toggle_pause();
        assert_eq!(game.state(), GameState::Running);
        assert!(matches!(game.tick().unwrap(), TickOutcome::Moved { .. }));
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut game = game_with(&[(10, 10), (9, 10), (8, 10)], Some((1, 1)));
        game.score = 30;

        game.restart().unwrap();

        assert_eq!(game.score(), 30);
        assert_eq!(game.snake().head(), Cell::new(10, 10));
    }

    /// Head at (5,5) heading up, about to close a loop onto (5,4)
    fn looping_game() -> Game {
        let mut game = game_with(
            &[(5, 5), (6, 5), (6, 4), (5, 4), (4, 4), (3, 4)],
            Some((20, 20)),
        );
        game.direction = Direction::Left;
        game.pending_direction = Direction::Left;
        game.set_direction(Direction::Up);
        game
    }

    #[test]
    fn test_self_collision_ends_game_and_restart_resets() {
        let mut game = looping_game();

        assert_eq!(game.tick().unwrap(), TickOutcome::Collided);
        assert_eq!(game.state(), GameState::GameOver);

        // Nothing moves or toggles after the end
        let frozen = cells(&game);
        assert_eq!(game.tick().unwrap(), TickOutcome::Idle);
        game.toggle_pause();
        assert_eq!(game.state(), GameState::GameOver);
        assert!(!game.set_direction(Direction::Down));
        assert_eq!(cells(&game), frozen);

        game.score = 40;
        game.interval_ms = 90;
        game.restart().unwrap();

        assert_eq!(game.state(), GameState::Running);
        assert_eq!(cells(&game), vec![(15, 15), (14, 15), (13, 15)]);
        assert_eq!(game.score(), 0);
        assert_eq!(game.tick_interval(), Duration::from_millis(150));
        assert_eq!(game.direction(), Direction::Right);
        assert_eq!(game.pending_direction(), Direction::Right);
        assert!(!game.snake().contains(game.food().unwrap()));
    }

    #[test]
    fn test_filling_the_board_ends_the_game() {
        let config = GameConfig {
            width: 100,
            height: 100,
            ..GameConfig::default()
        };
        let mut game = Game::with_seed(config, 5).unwrap();

        // Serpentine over every cell but (0,0), head at (1,0) heading left
        let mut body: Vec<Cell> = (1..5).map(|col| Cell::new(col, 0)).collect();
        for row in 1..5 {
            let cols: Vec<i32> = if row % 2 == 1 {
                (0..5).rev().collect()
            } else {
                (0..5).collect()
            };
            body.extend(cols.into_iter().map(|col| Cell::new(col, row)));
        }
        assert_eq!(body.len(), 24);
        game.snake = Snake::from_cells(body);
        game.food = Some(Cell::new(0, 0));
        game.direction = Direction::Left;
        game.pending_direction = Direction::Left;

        assert_eq!(
            game.tick(),
            Err(GameError::BoardFull { width: 5, height: 5 })
        );
        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.food(), None);
        assert_eq!(game.snake().len(), 25);

        // Frozen until restarted
        assert_eq!(game.tick(), Ok(TickOutcome::Idle));
        game.restart().unwrap();
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.snake().len(), 3);
        assert!(!game.snake().contains(game.food().unwrap()));
    }

    #[test]
    fn test_speed_up_at_growth_threshold() {
        // Length 4 -> 5 on this meal
        let mut game = game_with(&[(10, 10), (9, 10), (8, 10), (7, 10)], Some((11, 10)));

        game.tick().unwrap();

        assert_eq!(game.snake().len(), 5);
        assert_eq!(game.tick_interval(), Duration::from_millis(140));
        assert_eq!(game.speed_level(), 2);
    }

    #[test]
    fn test_no_speed_up_between_thresholds() {
        let mut game = game_with(&[(10, 10), (9, 10), (8, 10)], Some((11, 10)));

        game.tick().unwrap();

        assert_eq!(game.snake().len(), 4);
        assert_eq!(game.tick_interval(), Duration::from_millis(150));
    }

    #[test]
    fn test_interval_floors_at_minimum() {
        let mut game = game_with(&[(10, 10), (9, 10), (8, 10), (7, 10)], Some((11, 10)));
        game.interval_ms = 55;

        game.tick().unwrap();
        assert_eq!(game.tick_interval(), Duration::from_millis(50));

        // Next threshold crossing leaves it at the floor
        game.snake = Snake::from_cells((0..9).map(|i| Cell::new(20 - i, 2)));
        game.food = Some(Cell::new(21, 2));
        game.tick().unwrap();

        assert_eq!(game.snake().len(), 10);
        assert_eq!(game.tick_interval(), Duration::from_millis(50));
        assert_eq!(game.speed_level(), 11);
    }

    #[test]
    fn test_snapshot_mirrors_game() {
        let game = game_with(&[(10, 10), (9, 10), (8, 10)], Some((3, 4)));
        let snapshot = game.snapshot();

        assert_eq!(snapshot.snake.len(), 3);
        assert_eq!(snapshot.food, Some(Cell::new(3, 4)));
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.speed_level, 1);
        assert_eq!(snapshot.tick_interval, Duration::from_millis(150));
        assert_eq!(snapshot.state, GameState::Running);
        assert_eq!(snapshot.grid, GridSize::new(30, 30));
    }

    #[test]
    fn test_same_seed_same_food() {
        let a = Game::with_seed(GameConfig::default(), 9).unwrap();
        let b = Game::with_seed(GameConfig::default(), 9).unwrap();

        assert_eq!(a.food(), b.food());
    }

    proptest! {
        /// Length only changes by eating, and food never sits on the snake
        #[test]
        fn prop_length_and_food_invariants(
            seed in any::<u64>(),
            moves in prop::collection::vec(direction_strategy(), 1..200),
        ) {
            let config = GameConfig {
                width: 160,
                height: 160,
                ..GameConfig::default()
            };
            let mut game = Game::with_seed(config, seed).unwrap();

            for direction in moves {
                game.set_direction(direction);

                let before = game.snake().len();
                let outcome = game.tick().unwrap();
                let after = game.snake().len();

                match outcome {
                    TickOutcome::Moved { ate: true } => prop_assert_eq!(after, before + 1),
                    TickOutcome::Moved { ate: false } => prop_assert_eq!(after, before),
                    TickOutcome::Collided => {
                        prop_assert_eq!(game.state(), GameState::GameOver);
                        break;
                    }
                    TickOutcome::Idle => prop_assert!(false, "idle while running"),
                }

                let food = game.food().unwrap();
                prop_assert!(!game.snake().contains(food), "food {:?} on snake", food);
                prop_assert!(game.grid().contains(game.snake().head()));
            }
        }

        /// Reversal is never buffered, whatever state the game is in
        #[test]
        fn prop_reverse_always_rejected(
            pause in any::<bool>(),
            first in direction_strategy(),
        ) {
            let mut game = game_with(&[(10, 10), (9, 10), (8, 10)], None);
            game.set_direction(first);
            game.tick().unwrap();
            if pause {
                game.toggle_pause();
            }

            let pending = game.pending_direction();
            prop_assert!(!game.set_direction(game.direction().opposite()));
            prop_assert_eq!(game.pending_direction(), pending);
        }

        /// Score, speed and interval always agree with how much was eaten
        #[test]
        fn prop_interval_tracks_growth(meals in 0usize..26) {
            let mut game = game_with(&[(2, 0), (1, 0), (0, 0)], None);

            for i in 0..meals {
                // Fresh meal directly ahead; the row is long enough that the
                // head never wraps onto the tail
                let next = game.snake().next_head(game.direction(), game.grid());
                game.food = Some(next);
                game.tick().unwrap();
                prop_assert_eq!(game.score() as usize, (i + 1) * 10);
            }

            let speedups = (3 + meals) / 5;
            let expected = 150u64.saturating_sub(10 * speedups as u64).max(50);
            prop_assert_eq!(game.tick_interval(), Duration::from_millis(expected));
        }
    }
}
