//! Host configuration
//!
//! Loaded from an optional JSON file; every field has a default, so a file may
//! list only what it changes. Command-line flags are applied on top in `main`.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::game::GameConfig;
use crate::persistence::file_store::DEFAULT_BEST_SCORE_FILE;

/// Default swipe threshold for mouse drags, in grid cells
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Rules of the game
    pub game: GameConfig,
    /// Where the best score is kept
    pub best_score_file: PathBuf,
    /// Disable to play without touching the filesystem
    pub persist_best_score: bool,
    /// Start with sound off
    pub muted: bool,
    /// Minimum mouse drag, in grid cells, that counts as a swipe
    pub swipe_threshold: f32,
    /// `tracing` filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            best_score_file: PathBuf::from(DEFAULT_BEST_SCORE_FILE),
            persist_best_score: true,
            muted: false,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            log_filter: "neon_snake=info".to_string(),
        }
    }
}

impl AppConfig {
    /// Read and validate a JSON configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;

        config
            .validate()
            .map_err(|e| anyhow!("Invalid config {:?}: {}", path, e))?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.game.validate()?;

        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 0.0 {
            return Err(format!(
                "swipe_threshold must be a non-negative number, got {}",
                self.swipe_threshold
            ));
        }

        Ok(())
    }
}
