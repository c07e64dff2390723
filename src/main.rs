use anyhow::Result;
use clap::Parser;
use reverse_snake::game::GameConfig;
use reverse_snake::logging;
use reverse_snake::modes::HumanMode;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "reverse_snake")]
#[command(version, about = "Snake where some food turns you around")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid rows
    #[arg(long)]
    rows: Option<usize>,

    /// Grid columns
    #[arg(long)]
    cols: Option<usize>,

    /// Chance that a new food reverses the snake
    #[arg(long)]
    reversal_probability: Option<f64>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Fixed RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here (RUST_LOG controls the level)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(probability) = self.reversal_probability {
            config.reversal_probability = probability;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;

    let config = cli.game_config()?;
    info!(?config, "configuration loaded");

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}
