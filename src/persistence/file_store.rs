use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::BestScoreStore;

/// Default file name, next to the working directory
pub const DEFAULT_BEST_SCORE_FILE: &str = "snake_high_score.txt";

/// Keeps the best score as a decimal integer in a text file
#[derive(Debug, Clone)]
pub struct FileBestScoreStore {
    path: PathBuf,
}

impl FileBestScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_load(&self) -> Result<Option<u32>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read best score from {:?}", self.path));
            }
        };

        let value = content
            .trim()
            .parse::<u32>()
            .with_context(|| format!("Unparseable best score {:?} in {:?}", content, self.path))?;

        Ok(Some(value))
    }

    fn try_save(&self, value: u32) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        std::fs::write(&self.path, value.to_string())
            .with_context(|| format!("Failed to write best score to {:?}", self.path))
    }
}

impl BestScoreStore for FileBestScoreStore {
    fn load_best_score(&mut self) -> u32 {
        match self.try_load() {
            Ok(Some(value)) => {
                tracing::debug!(value, path = ?self.path, "loaded best score");
                value
            }
            Ok(None) => 0,
            Err(err) => {
                tracing::warn!("{:#}, starting from 0", err);
                0
            }
        }
    }

    fn save_best_score(&mut self, value: u32) {
        if let Err(err) = self.try_save(value) {
            tracing::warn!("{:#}, best score not persisted", err);
        }
    }
}
