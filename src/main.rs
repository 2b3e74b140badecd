use std::path::PathBuf;

use anyhow::{Context, Result};
use canvas_snake::game::GameConfig;
use canvas_snake::logging;
use canvas_snake::modes::HumanMode;
use clap::{Parser, ValueEnum};
use tracing::info;

#[derive(Parser)]
#[command(name = "canvas_snake")]
#[command(version, about = "Grid snake game played in the terminal")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// JSON file with game settings; flags below take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Cell size in pixels
    #[arg(long)]
    cell_size: Option<u32>,

    /// Starting tick interval in milliseconds
    #[arg(long)]
    speed: Option<u64>,

    /// Fastest tick interval in milliseconds
    #[arg(long)]
    min_speed: Option<u64>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (RUST_LOG filters them)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.canvas_width = width;
        }
        if let Some(height) = self.height {
            config.canvas_height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(speed) = self.speed {
            config.initial_tick_ms = speed;
        }
        if let Some(min_speed) = self.min_speed {
            config.min_tick_ms = min_speed;
        }

        config.validate().context("Invalid game settings")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_file.as_deref())?;
    let config = cli.game_config()?;
    info!(
        width = config.canvas_width,
        height = config.canvas_height,
        cell_size = config.cell_size,
        "starting"
    );

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config, cli.seed);
            human_mode.run().await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("canvas_snake").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults_without_flags() {
        let config = cli(&[]).game_config().unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "cell_size": 30, "initial_tick_ms": 200 }}"#).unwrap();
        let path = file.path().to_str().unwrap();

        // The file alone does not fit a 400px canvas
        assert!(cli(&["--config", path]).game_config().is_err());

        let config = cli(&["--config", path, "--width", "420", "--height", "420"])
            .game_config()
            .unwrap();
        assert_eq!(config.cell_size, 30);
        assert_eq!(config.canvas_width, 420);
        assert_eq!(config.initial_tick_ms, 200);
    }

    #[test]
    fn test_invalid_flags_rejected() {
        assert!(cli(&["--speed", "40"]).game_config().is_err());
    }
}
