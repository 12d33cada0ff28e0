//! Neon Snake - a terminal Snake game around a deterministic engine
//!
//! This library provides:
//! - Core game logic (game module), free of I/O and timers
//! - Best-score persistence (persistence module)
//! - Terminal adapters: rendering, input, audio (render, input, audio modules)
//! - The interactive host that schedules ticks (modes module)

pub mod audio;
pub mod config;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod persistence;
pub mod render;
