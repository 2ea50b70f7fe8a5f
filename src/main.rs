use std::path::PathBuf;

use anyhow::{Context, Result};
use card_snake::game::GameConfig;
use card_snake::logging::{self, LogSink};
use card_snake::modes::{PlayMode, SnapshotMode, parse_moves};
use clap::{Parser, ValueEnum};
use tracing::info;

#[derive(Parser)]
#[command(name = "card_snake")]
#[command(version, about = "Snake arcade game from the profile card, in your terminal")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "play")]
    mode: Mode,

    /// JSON file with a game configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells along each side of the board
    #[arg(long)]
    grid_size: Option<usize>,

    /// Simulation period in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Never spawn food under the snake
    #[arg(long)]
    food_avoids_snake: bool,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (play mode owns the terminal, so it logs
    /// nowhere otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// PNG written by snapshot mode
    #[arg(long, default_value = "snake.png")]
    output: PathBuf,

    /// Moves applied one per tick in snapshot mode, e.g. "UURRD"
    #[arg(long, default_value = "")]
    moves: String,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play with the keyboard or mouse
    Play,
    /// Play a scripted game headlessly and save the board as a PNG
    Snapshot,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            let start = GameConfig::new(grid_size).start;
            config.grid_size = grid_size;
            config.start = start;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }
        if self.food_avoids_snake {
            config.food_avoids_snake = true;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let sink = match (&cli.log_file, &cli.mode) {
        (Some(path), _) => LogSink::File(path),
        (None, Mode::Snapshot) => LogSink::Stderr,
        (None, Mode::Play) => LogSink::Disabled,
    };
    logging::init(sink)?;

    let config = cli.game_config()?;
    info!(?config, "configuration loaded");

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Play => {
            PlayMode::new(config, cli.seed).run().await?;
        }
        Mode::Snapshot => {
            let moves = parse_moves(&cli.moves)?;
            let report =
                SnapshotMode::new(config, cli.seed.unwrap_or_default(), moves, cli.output.clone())
                    .run()?;
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?
            );
        }
    }

    Ok(())
}
