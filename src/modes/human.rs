use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info};

use crate::game::{GameConfig, GameEngine, GameState, Phase, TickOutcome, Ticker};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Framebuffer, Renderer};

/// Keyboard-driven game in the terminal
///
/// Owns the only copy of the game state. Key events and ticks are serviced
/// one at a time by a single `select!` loop.
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    framebuffer: Framebuffer,
    ticker: Ticker,
    /// Set when the state changed since the last frame
    needs_redraw: bool,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        let framebuffer = Framebuffer::new(config.canvas_width, config.canvas_height);
        let mut engine = match seed {
            Some(seed) => GameEngine::with_seed(config, seed),
            None => GameEngine::new(config),
        };
        let state = engine.initialize();
        let ticker = Ticker::new(state.tick_interval);

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            framebuffer,
            ticker,
            needs_redraw: true,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick, never fires while no game is running
                _ = self.ticker.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.refresh_clock();
                    self.needs_redraw = true;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!(
                    games_played = self.metrics.games_played,
                    best_score = self.metrics.best_score,
                    longest_snake = self.metrics.longest_snake,
                    total_food = self.metrics.total_food,
                    "quit"
                );
                break;
            }

            if self.needs_redraw {
                self.draw_frame(terminal)?;
            }
        }

        Ok(())
    }

    fn draw_frame(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        terminal
            .draw(|frame| {
                self.renderer
                    .render(frame, &self.state, &self.metrics, &mut self.framebuffer);
            })
            .context("Failed to draw frame")?;
        self.needs_redraw = false;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply_action(action);
        }
    }

    fn apply_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Turn(direction) => {
                if !self.engine.set_direction(&mut self.state, direction) {
                    debug!(?direction, "turn_ignored");
                }
            }
            KeyAction::Start => self.start_game(),
            KeyAction::Restart => self.restart_game(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    /// Start control: begins a ready game, or a fresh one after a game over
    fn start_game(&mut self) {
        match self.state.phase {
            Phase::Running => return,
            Phase::GameOver => self.state = self.engine.initialize(),
            Phase::Ready => {}
        }

        self.engine.start(&mut self.state);
        self.begin_ticking();
    }

    /// Restart control, only available once a game has ended
    fn restart_game(&mut self) {
        if !self.state.is_game_over() {
            return;
        }

        self.engine.restart(&mut self.state);
        self.begin_ticking();
    }

    fn begin_ticking(&mut self) {
        self.ticker.reschedule(self.state.tick_interval);
        self.ticker.start();
        self.metrics.on_game_start();
        self.needs_redraw = true;
    }

    fn update_game(&mut self) -> TickOutcome {
        let outcome = self.engine.tick(&mut self.state);
        self.metrics.on_tick(&self.state, &outcome);

        if let Some(new_interval) = outcome.new_interval {
            self.ticker.reschedule(new_interval);
        }

        if let Some(reason) = outcome.game_over {
            self.ticker.cancel();
            self.metrics.on_game_over(&self.state, reason);
        }

        if outcome.advanced || outcome.game_over.is_some() {
            self.needs_redraw = true;
        }
        outcome
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction, GameOverReason, Snake};

    fn mode() -> HumanMode {
        HumanMode::new(GameConfig::default(), Some(17))
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.state.phase, Phase::Ready);
        assert_eq!(mode.state.score, 0);
        assert!(!mode.ticker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_begins_ticking() {
        let mut mode = mode();

        mode.apply_action(KeyAction::Start);

        assert!(mode.state.is_running());
        assert!(mode.ticker.is_running());
        assert_eq!(mode.ticker.period(), Duration::from_millis(150));

        let head = mode.state.snake.head();
        mode.ticker.tick().await;
        mode.update_game();
        assert_ne!(mode.state.snake.head(), head);
    }

    #[tokio::test(start_paused = true)]
    async fn test_food_reschedules_ticker() {
        let mut mode = mode();
        mode.apply_action(KeyAction::Start);
        mode.state.food = Some(mode.state.snake.head().stepped(Direction::Right, 20));

        let outcome = mode.update_game();

        assert!(outcome.ate_food);
        assert_eq!(mode.ticker.period(), Duration::from_millis(145));
        assert!(mode.ticker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_collision_halts_ticker() {
        let mut mode = mode();
        mode.apply_action(KeyAction::Start);
        mode.state.snake = Snake::new(Cell::new(380, 0), Direction::Right, 3, 20);
        mode.state.score = 40;

        let outcome = mode.update_game();

        assert_eq!(outcome.game_over, Some(GameOverReason::Wall));
        assert!(!mode.ticker.is_running());
        assert_eq!(mode.metrics.games_played, 1);
        assert_eq!(mode.metrics.best_score, 40);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_after_game_over() {
        let mut mode = mode();
        mode.apply_action(KeyAction::Start);
        mode.state.food = Some(mode.state.snake.head().stepped(Direction::Right, 20));
        mode.update_game();
        mode.state.snake = Snake::new(Cell::new(380, 0), Direction::Right, 3, 20);
        mode.update_game();
        assert!(mode.state.is_game_over());

        mode.apply_action(KeyAction::Turn(Direction::Up));
        assert_eq!(mode.state.pending_direction, None);

        mode.apply_action(KeyAction::Restart);

        assert!(mode.state.is_running());
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.state.tick_interval, Duration::from_millis(150));
        assert_eq!(mode.state.game_over_reason, None);
        assert_eq!(mode.ticker.period(), Duration::from_millis(150));
        assert!(mode.ticker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_ignored_while_running() {
        let mut mode = mode();
        mode.apply_action(KeyAction::Start);
        mode.state.score = 20;

        mode.apply_action(KeyAction::Restart);

        assert_eq!(mode.state.score, 20);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_after_game_over_reinitializes() {
        let mut mode = mode();
        mode.apply_action(KeyAction::Start);
        mode.state.food = Some(mode.state.snake.head().stepped(Direction::Right, 20));
        mode.update_game();
        assert_eq!(mode.state.tick_interval, Duration::from_millis(145));
        assert_eq!(mode.ticker.period(), Duration::from_millis(145));

        mode.state.snake = Snake::new(Cell::new(380, 0), Direction::Right, 3, 20);
        mode.update_game();
        assert!(mode.state.is_game_over());

        mode.apply_action(KeyAction::Start);

        assert!(mode.state.is_running());
        assert_eq!(mode.state.snake.head(), Cell::new(200, 200));
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.state.tick_interval, Duration::from_millis(150));
        assert_eq!(mode.ticker.period(), Duration::from_millis(150));
        assert!(mode.ticker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_state_changes_request_redraw() {
        let mut mode = mode();
        mode.needs_redraw = false;

        mode.apply_action(KeyAction::Start);
        assert!(mode.needs_redraw);

        mode.needs_redraw = false;
        mode.update_game();
        assert!(mode.needs_redraw);

        mode.needs_redraw = false;
        mode.state.snake = Snake::new(Cell::new(380, 0), Direction::Right, 3, 20);
        mode.update_game();
        assert!(mode.needs_redraw);

        mode.needs_redraw = false;
        mode.apply_action(KeyAction::Restart);
        assert!(mode.needs_redraw);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_feed_metrics() {
        let mut mode = mode();
        mode.apply_action(KeyAction::Start);
        mode.state.food = Some(mode.state.snake.head().stepped(Direction::Right, 20));
        mode.update_game();

        assert_eq!(mode.metrics.food_this_game, 1);
        assert_eq!(mode.metrics.longest_snake, 4);

        mode.state.snake = Snake::new(Cell::new(380, 0), Direction::Right, 3, 20);
        mode.update_game();
        assert_eq!(mode.metrics.last_reason, Some(GameOverReason::Wall));
    }

    #[test]
    fn test_turn_is_queued() {
        let mut mode = mode();

        mode.apply_action(KeyAction::Turn(Direction::Up));
        assert_eq!(mode.state.pending_direction, Some(Direction::Up));

        mode.apply_action(KeyAction::Turn(Direction::Left));
        assert_eq!(mode.state.pending_direction, Some(Direction::Up));
    }

    #[test]
    fn test_quit() {
        let mut mode = mode();
        mode.apply_action(KeyAction::Quit);
        assert!(mode.should_quit);
    }
}
