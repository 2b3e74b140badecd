use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::{
    config::GameConfig,
    direction::Direction,
    state::{Cell, GameOverReason, GameState, Phase, Snake},
};

/// What a single tick did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Whether the snake moved this tick
    pub advanced: bool,
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// New tick interval if the game sped up; the ticker must be rescheduled
    pub new_interval: Option<Duration>,
    /// Set when this tick ended the game
    pub game_over: Option<GameOverReason>,
}

impl TickOutcome {
    fn idle() -> Self {
        Self::default()
    }

    fn ended(reason: GameOverReason) -> Self {
        Self {
            game_over: Some(reason),
            ..Self::default()
        }
    }
}

/// The game engine that handles all game logic
///
/// The engine owns only configuration and randomness; every operation takes
/// the [`GameState`] it acts on, so the host decides where state lives.
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh game in the `Ready` phase
    pub fn initialize(&mut self) -> GameState {
        let snake = Snake::new(
            self.config.start_cell(),
            Direction::Right,
            self.config.initial_snake_length,
            self.config.cell_size as i32,
        );

        let food = self.spawn_food(&snake);
        debug!(head = ?snake.head(), ?food, "game_initialized");

        GameState::new(
            snake,
            food,
            self.config.canvas_width,
            self.config.canvas_height,
            self.config.cell_size,
            self.config.initial_interval(),
        )
    }

    /// Move from `Ready` to `Running`; returns false in any other phase
    pub fn start(&self, state: &mut GameState) -> bool {
        if state.phase != Phase::Ready {
            return false;
        }
        state.phase = Phase::Running;
        info!(interval_ms = state.tick_interval.as_millis() as u64, "game_started");
        true
    }

    /// Replace the state with a new running game at the default speed
    pub fn restart(&mut self, state: &mut GameState) {
        *state = self.initialize();
        self.start(state);
    }

    /// Queue a direction for the next tick
    ///
    /// Returns false when the request was ignored: the game is over, or the
    /// direction would reverse the snake onto itself.
    pub fn set_direction(&self, state: &mut GameState, requested: Direction) -> bool {
        if state.is_game_over() || state.direction().is_opposite(requested) {
            return false;
        }
        state.pending_direction = Some(requested);
        true
    }

    /// Execute one step of the game
    pub fn tick(&mut self, state: &mut GameState) -> TickOutcome {
        if !state.is_running() {
            return TickOutcome::idle();
        }

        if let Some(requested) = state.pending_direction.take() {
            if !state.snake.direction.is_opposite(requested) {
                state.snake.direction = requested;
            }
        }

        let new_head = state
            .snake
            .head()
            .stepped(state.snake.direction, state.cell_size as i32);

        // Walls are checked before the body
        if let Some(reason) = self.check_collision(state, new_head) {
            self.end_game(state, reason);
            return TickOutcome::ended(reason);
        }

        let ate_food = state.food == Some(new_head);
        state.snake.advance(new_head, ate_food);
        state.ticks += 1;

        let mut outcome = TickOutcome {
            advanced: true,
            ate_food,
            ..TickOutcome::default()
        };

        if ate_food {
            state.score = state.score.saturating_add(self.config.score_increment);
            state.food_eaten += 1;
            outcome.new_interval = self.speed_up(state);
            info!(score = state.score, length = state.snake.len(), "food_eaten");

            state.food = self.spawn_food(&state.snake);
            if state.food.is_none() {
                self.end_game(state, GameOverReason::BoardFull);
                outcome.game_over = Some(GameOverReason::BoardFull);
            }
        }

        outcome
    }

    /// Stop the game and record why it ended
    pub fn end_game(&self, state: &mut GameState, reason: GameOverReason) {
        state.phase = Phase::GameOver;
        state.game_over_reason = Some(reason);
        state.pending_direction = None;
        info!(?reason, score = state.score, ticks = state.ticks, "game_over");
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, cell: Cell) -> Option<GameOverReason> {
        if !state.is_in_bounds(cell) {
            return Some(GameOverReason::Wall);
        }

        if state.snake.collides_with_body(cell) {
            return Some(GameOverReason::SelfCollision);
        }

        None
    }

    /// Shorten the tick interval by one step, never below the floor
    fn speed_up(&self, state: &mut GameState) -> Option<Duration> {
        let floor = self.config.min_interval();
        if state.tick_interval <= floor {
            return None;
        }

        let next = state
            .tick_interval
            .saturating_sub(self.config.interval_step())
            .max(floor);
        if next == state.tick_interval {
            return None;
        }

        state.tick_interval = next;
        debug!(interval_ms = next.as_millis() as u64, "speed_increased");
        Some(next)
    }

    /// Pick a random cell the snake does not occupy
    ///
    /// Random draws are bounded; after that the free cells are enumerated,
    /// and `None` means the snake covers the whole board.
    fn spawn_food(&mut self, snake: &Snake) -> Option<Cell> {
        let columns = self.config.columns();
        let rows = self.config.rows();
        if columns == 0 || rows == 0 {
            return None;
        }
        let size = self.config.cell_size as i32;

        for _ in 0..self.config.food_retry_limit() {
            let column = self.rng.gen_range(0..columns) as i32;
            let row = self.rng.gen_range(0..rows) as i32;
            let cell = Cell::new(column * size, row * size);

            if !snake.contains(cell) {
                return Some(cell);
            }
        }

        debug!(length = snake.len(), "food_sampling_exhausted");
        let free: Vec<Cell> = (0..rows as i32)
            .flat_map(|row| (0..columns as i32).map(move |column| Cell::new(column * size, row * size)))
            .filter(|cell| !snake.contains(*cell))
            .collect();
        free.choose(&mut self.rng).copied()
    }
}
