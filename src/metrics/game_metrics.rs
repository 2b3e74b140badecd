use std::time::{Duration, Instant};

use crate::game::{GameOverReason, GameState, TickOutcome};

/// Per-session statistics, kept in memory only
#[derive(Debug, Default)]
pub struct GameMetrics {
    /// Set while a game is running
    play_started: Option<Instant>,
    /// Play time of the current or last game
    pub play_time: Duration,
    pub best_score: u32,
    pub games_played: u32,
    /// Longest body reached in any game this session
    pub longest_snake: usize,
    pub food_this_game: u32,
    pub total_food: u32,
    pub last_reason: Option<GameOverReason>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_game_start(&mut self) {
        self.play_started = Some(Instant::now());
        self.play_time = Duration::ZERO;
        self.food_this_game = 0;
    }

    /// Fold one tick into the session numbers
    pub fn on_tick(&mut self, state: &GameState, outcome: &TickOutcome) {
        if outcome.ate_food {
            self.food_this_game += 1;
            self.total_food += 1;
        }
        self.longest_snake = self.longest_snake.max(state.snake.len());
    }

    pub fn on_game_over(&mut self, state: &GameState, reason: GameOverReason) {
        self.refresh_clock();
        self.play_started = None;
        self.games_played += 1;
        self.best_score = self.best_score.max(state.score);
        self.longest_snake = self.longest_snake.max(state.snake.len());
        self.last_reason = Some(reason);
    }

    /// Advance the play clock; frozen between games
    pub fn refresh_clock(&mut self) {
        if let Some(started) = self.play_started {
            self.play_time = started.elapsed();
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.play_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }

    pub fn last_reason_label(&self) -> &'static str {
        self.last_reason.map_or("-", |reason| reason.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine};

    fn running_state() -> (GameEngine, GameState) {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 4);
        let mut state = engine.initialize();
        engine.start(&mut state);
        (engine, state)
    }

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.play_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.play_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_food_and_length_tracking() {
        let (mut engine, mut state) = running_state();
        let mut metrics = GameMetrics::new();
        metrics.on_game_start();

        for _ in 0..3 {
            state.food = Some(state.snake.head().stepped(state.direction(), 20));
            let outcome = engine.tick(&mut state);
            metrics.on_tick(&state, &outcome);
        }

        assert_eq!(metrics.food_this_game, 3);
        assert_eq!(metrics.total_food, 3);
        assert_eq!(metrics.longest_snake, 6);

        metrics.on_game_start();
        assert_eq!(metrics.food_this_game, 0);
        assert_eq!(metrics.total_food, 3);
        assert_eq!(metrics.longest_snake, 6);
    }

    #[test]
    fn test_game_over_records_best_and_reason() {
        let (engine, mut state) = running_state();
        let mut metrics = GameMetrics::new();
        assert_eq!(metrics.last_reason_label(), "-");

        state.score = 100;
        engine.end_game(&mut state, GameOverReason::Wall);
        metrics.on_game_over(&state, GameOverReason::Wall);
        assert_eq!(metrics.best_score, 100);
        assert_eq!(metrics.games_played, 1);
        assert_eq!(metrics.last_reason_label(), "wall");

        state.score = 50;
        metrics.on_game_over(&state, GameOverReason::SelfCollision);
        assert_eq!(metrics.best_score, 100);
        assert_eq!(metrics.games_played, 2);
        assert_eq!(metrics.last_reason, Some(GameOverReason::SelfCollision));
    }

    #[test]
    fn test_clock_runs_only_during_a_game() {
        let (_, state) = running_state();
        let mut metrics = GameMetrics::new();

        metrics.refresh_clock();
        assert_eq!(metrics.play_time, Duration::ZERO);

        metrics.on_game_start();
        std::thread::sleep(Duration::from_millis(30));
        metrics.refresh_clock();
        assert!(metrics.play_time >= Duration::from_millis(30));

        metrics.on_game_over(&state, GameOverReason::Wall);
        let frozen = metrics.play_time;
        std::thread::sleep(Duration::from_millis(20));
        metrics.refresh_clock();
        assert_eq!(metrics.play_time, frozen);
    }
}
