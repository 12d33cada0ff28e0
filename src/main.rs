use anyhow::{Context, Result};
use clap::Parser;
use neon_snake::audio::{AudioPlayer, TerminalBell};
use neon_snake::config::AppConfig;
use neon_snake::game::GameEngine;
use neon_snake::modes::HumanMode;
use neon_snake::persistence::{BestScoreStore, FileBestScoreStore, NullBestScoreStore};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "neon_snake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// File holding the best score
    #[arg(long)]
    best_score_file: Option<PathBuf>,

    /// Do not read or write the best score file
    #[arg(long)]
    no_save: bool,

    /// Start with sound off
    #[arg(long)]
    mute: bool,

    /// Write logs to this file (the terminal belongs to the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(path) = cli.best_score_file {
        config.best_score_file = path;
    }
    config.persist_best_score &= !cli.no_save;
    config.muted |= cli.mute;

    if let Some(path) = &cli.log_file {
        init_logging(path, &config.log_filter)?;
    }

    let store: Box<dyn BestScoreStore + Send> = if config.persist_best_score {
        let file_store = FileBestScoreStore::new(&config.best_score_file);
        tracing::info!(path = ?file_store.path(), "keeping best score on disk");
        Box::new(file_store)
    } else {
        tracing::info!("best score persistence disabled");
        Box::new(NullBestScoreStore)
    };

    let engine = match cli.seed {
        Some(seed) => GameEngine::seeded(config.game.clone(), seed, store),
        None => GameEngine::new(config.game.clone(), store),
    };

    // The board is drawn on stderr, so the bell goes to stdout
    let audio = AudioPlayer::new(Box::new(TerminalBell::new(std::io::stdout())), config.muted);

    let mut human_mode = HumanMode::new(engine, audio, config.swipe_threshold);
    human_mode.run().await?;

    Ok(())
}

fn init_logging(path: &Path, default_filter: &str) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
