//! Canvas Snake - grid snake drawn on a pixel surface, played in the terminal
//!
//! This library provides:
//! - Core game logic and the tick scheduler (game module)
//! - Keyboard mapping (input module)
//! - Drawing surface, renderer and HUD (render module)
//! - Session statistics (metrics module)
//! - The interactive terminal mode (modes module)

pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;

pub use error::ConfigError;
