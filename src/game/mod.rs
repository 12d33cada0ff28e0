//! Core game logic module for Snake
//!
//! This module contains the simulation without any I/O, timing or rendering
//! dependencies. Hosts drive it through [`GameEngine::tick`] and the intent
//! setters, and read [`GameState`] snapshots back.

pub mod action;
pub mod config;
pub mod engine;
pub mod event;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Intent};
pub use config::GameConfig;
pub use engine::{GameEngine, TickOutcome, generate_food};
pub use event::GameEvent;
pub use state::{CollisionType, GameState, Phase, Position, Snake};
