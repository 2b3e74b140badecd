use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::state::Cell;
use crate::error::ConfigError;

/// Configuration for the game
///
/// Geometry is expressed in pixels of the drawing surface; every cell is a
/// `cell_size` square, so both canvas dimensions must be multiples of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the drawing surface in pixels
    pub canvas_width: u32,
    /// Height of the drawing surface in pixels
    pub canvas_height: u32,
    /// Side of one grid cell in pixels
    pub cell_size: u32,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Column of the head at the start of a game
    pub start_column: u32,
    /// Row of the head at the start of a game
    pub start_row: u32,
    /// Points awarded per food
    pub score_increment: u32,
    /// Tick interval at the start of every game, in milliseconds
    pub initial_tick_ms: u64,
    /// Floor for the tick interval, in milliseconds
    pub min_tick_ms: u64,
    /// How much faster the game gets per food, in milliseconds
    pub tick_step_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 400,
            canvas_height: 400,
            cell_size: 20,
            initial_snake_length: 3,
            start_column: 10,
            start_row: 10,
            score_increment: 10,
            initial_tick_ms: 150,
            min_tick_ms: 50,
            tick_step_ms: 5,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom canvas size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas_width: width,
            canvas_height: height,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self {
            start_column: 5,
            start_row: 5,
            ..Self::new(200, 200)
        }
    }

    /// Load a configuration from a JSON file; missing fields take their defaults
    ///
    /// The result is not validated, so command-line overrides can still be
    /// layered on top before calling [`GameConfig::validate`].
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        for (dimension, value) in [("width", self.canvas_width), ("height", self.canvas_height)] {
            if value == 0 || value % self.cell_size != 0 {
                return Err(ConfigError::NotGridAligned {
                    dimension,
                    value,
                    cell_size: self.cell_size,
                });
            }
        }

        if self.initial_snake_length == 0 {
            return Err(ConfigError::EmptySnake);
        }
        if self.initial_snake_length > self.columns() as usize {
            return Err(ConfigError::SnakeDoesNotFit {
                length: self.initial_snake_length,
                columns: self.columns(),
            });
        }
        if self.initial_snake_length >= self.cell_count() {
            return Err(ConfigError::NoRoomForFood {
                length: self.initial_snake_length,
                cells: self.cell_count(),
            });
        }

        if self.min_tick_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.min_tick_ms > self.initial_tick_ms {
            return Err(ConfigError::FloorAboveDefault {
                floor_ms: self.min_tick_ms,
                default_ms: self.initial_tick_ms,
            });
        }

        Ok(())
    }

    /// Number of cells per row
    pub fn columns(&self) -> u32 {
        self.canvas_width / self.cell_size.max(1)
    }

    /// Number of cells per column
    pub fn rows(&self) -> u32 {
        self.canvas_height / self.cell_size.max(1)
    }

    pub fn cell_count(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    /// Random draws attempted before food placement falls back to scanning
    pub fn food_retry_limit(&self) -> usize {
        self.cell_count() * 4
    }

    pub fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.initial_tick_ms)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_tick_ms)
    }

    pub fn interval_step(&self) -> Duration {
        Duration::from_millis(self.tick_step_ms)
    }

    /// Head cell of a fresh snake, pulled inside the board so the whole
    /// body trailing to the left fits
    pub fn start_cell(&self) -> Cell {
        let tail_room = self.initial_snake_length.saturating_sub(1) as u32;
        let column = self
            .start_column
            .min(self.columns().saturating_sub(1))
            .max(tail_room);
        let row = self.start_row.min(self.rows().saturating_sub(1));
        let size = self.cell_size as i32;
        Cell::new(column as i32 * size, row as i32 * size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.canvas_width, 400);
        assert_eq!(config.canvas_height, 400);
        assert_eq!(config.cell_size, 20);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.columns(), 20);
        assert_eq!(config.rows(), 20);
        assert_eq!(config.initial_interval(), Duration::from_millis(150));
        assert_eq!(config.min_interval(), Duration::from_millis(50));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(300, 200);
        assert_eq!(config.columns(), 15);
        assert_eq!(config.rows(), 10);
        assert_eq!(config.cell_count(), 150);
    }

    #[test]
    fn test_start_cell() {
        assert_eq!(GameConfig::default().start_cell(), Cell::new(200, 200));

        // Start column past the right edge is pulled back onto the board
        let narrow = GameConfig::new(100, 100);
        assert_eq!(narrow.start_cell(), Cell::new(80, 80));

        // Body needs two cells of room to the left
        let config = GameConfig {
            start_column: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.start_cell(), Cell::new(40, 200));
    }

    #[test]
    fn test_rejects_misaligned_canvas() {
        let config = GameConfig::new(410, 400);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotGridAligned {
                dimension: "width",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_zero_cell_size() {
        let config = GameConfig {
            cell_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroCellSize)));
    }

    #[test]
    fn test_rejects_bad_speeds() {
        let config = GameConfig {
            min_tick_ms: 200,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FloorAboveDefault { .. })
        ));

        let config = GameConfig {
            min_tick_ms: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroInterval)));
    }

    #[test]
    fn test_rejects_snake_longer_than_row() {
        let config = GameConfig {
            initial_snake_length: 30,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SnakeDoesNotFit { length: 30, columns: 20 })
        ));
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "canvas_width": 600, "min_tick_ms": 30 }}"#).unwrap();

        let config = GameConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.canvas_width, 600);
        assert_eq!(config.canvas_height, 400);
        assert_eq!(config.min_tick_ms, 30);
        assert_eq!(config.initial_tick_ms, 150);
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = GameConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = GameConfig::from_json_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_loaded_config_is_not_validated() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "cell_size": 30 }}"#).unwrap();

        let config = GameConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.cell_size, 30);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotGridAligned { .. })
        ));
    }

    #[test]
    fn test_loaded_config_fixed_by_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "cell_size": 30 }}"#).unwrap();

        let mut config = GameConfig::from_json_file(file.path()).unwrap();
        config.canvas_width = 420;
        config.canvas_height = 420;

        assert!(config.validate().is_ok());
        assert_eq!(config.columns(), 14);
    }

    #[test]
    fn test_rejects_snake_filling_board() {
        // A single row the snake covers completely leaves nowhere for food
        let config = GameConfig {
            canvas_width: 60,
            canvas_height: 20,
            initial_snake_length: 3,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NoRoomForFood { length: 3, cells: 3 })
        ));

        let config = GameConfig {
            initial_snake_length: 2,
            ..config
        };
        assert!(config.validate().is_ok());
    }
}
