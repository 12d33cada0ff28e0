//! Best-score persistence
//!
//! The engine only knows the [`BestScoreStore`] trait. Implementations swallow
//! their own I/O failures so that a broken store degrades to "no persistence"
//! instead of interrupting a game.

pub mod file_store;

use std::sync::{Arc, Mutex, PoisonError};

pub use file_store::FileBestScoreStore;

/// Key-value slot holding the best score of a session
pub trait BestScoreStore {
    /// Stored best score, 0 when absent or unreadable
    fn load_best_score(&mut self) -> u32;

    /// Remember a new best score
    fn save_best_score(&mut self, value: u32);
}

impl<S: BestScoreStore + ?Sized> BestScoreStore for Box<S> {
    fn load_best_score(&mut self) -> u32 {
        (**self).load_best_score()
    }

    fn save_best_score(&mut self, value: u32) {
        (**self).save_best_score(value)
    }
}

/// Store that forgets everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBestScoreStore;

impl BestScoreStore for NullBestScoreStore {
    fn load_best_score(&mut self) -> u32 {
        0
    }

    fn save_best_score(&mut self, _value: u32) {}
}

/// In-memory store; clones share the same slot so a caller can keep a handle
/// after moving one into an engine
#[derive(Debug, Clone, Default)]
pub struct MemoryBestScoreStore {
    saved: Arc<Mutex<Vec<u32>>>,
    initial: u32,
}

impl MemoryBestScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a previously stored value
    pub fn with_value(initial: u32) -> Self {
        Self {
            saved: Arc::default(),
            initial,
        }
    }

    /// Every value saved so far, oldest first
    pub fn saved_values(&self) -> Vec<u32> {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Currently stored value
    pub fn current(&self) -> u32 {
        self.saved_values().last().copied().unwrap_or(self.initial)
    }
}

impl BestScoreStore for MemoryBestScoreStore {
    fn load_best_score(&mut self) -> u32 {
        self.current()
    }

    fn save_best_score(&mut self, value: u32) {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(value);
    }
}
