use std::path::PathBuf;

use thiserror::Error;

/// Reasons a [`GameConfig`](crate::game::GameConfig) cannot be used
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cell size must be positive")]
    ZeroCellSize,

    #[error("{dimension} of {value}px is not a positive multiple of the {cell_size}px cell size")]
    NotGridAligned {
        dimension: &'static str,
        value: u32,
        cell_size: u32,
    },

    #[error("initial snake length must be at least 1")]
    EmptySnake,

    #[error("a snake of length {length} does not fit in a row of {columns} cells")]
    SnakeDoesNotFit { length: usize, columns: u32 },

    #[error("a snake of length {length} leaves no free cell for food on a board of {cells} cells")]
    NoRoomForFood { length: usize, cells: usize },

    #[error("minimum tick interval must be positive")]
    ZeroInterval,

    #[error("minimum tick interval {floor_ms}ms exceeds the default interval {default_ms}ms")]
    FloorAboveDefault { floor_ms: u64, default_ms: u64 },

    #[error("failed to read config file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
