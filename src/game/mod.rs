//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies,
//! apart from the [`Ticker`] that paces it on the tokio clock.

pub mod config;
pub mod direction;
pub mod engine;
pub mod scheduler;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, TickOutcome};
pub use scheduler::Ticker;
pub use state::{Cell, GameOverReason, GameState, Phase, Snake};
