use serde::{Deserialize, Serialize};

/// Side length of the square playing field, in cells
pub const GRID_SIZE: i32 = 20;
/// Tick period of a fresh game, in milliseconds
pub const INITIAL_SPEED_MS: u64 = 150;
/// How much faster the game gets with every food eaten, in milliseconds
pub const SPEED_INCREMENT_MS: u64 = 5;
/// Fastest allowed tick period, in milliseconds
pub const MIN_SPEED_MS: u64 = 50;
/// Points awarded per food item
pub const FOOD_REWARD: u32 = 10;
/// Largest grid the terminal renderer accepts
pub const MAX_GRID_SIZE: i32 = 100;

/// Rules of the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width and height of the square grid
    pub grid_size: i32,
    /// Tick period after construction and after every reset
    pub initial_speed_ms: u64,
    /// Period reduction per food eaten
    pub speed_increment_ms: u64,
    /// Lower bound for the tick period
    pub min_speed_ms: u64,
    /// Score added per food eaten
    pub food_reward: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            initial_speed_ms: INITIAL_SPEED_MS,
            speed_increment_ms: SPEED_INCREMENT_MS,
            min_speed_ms: MIN_SPEED_MS,
            food_reward: FOOD_REWARD,
        }
    }
}

impl GameConfig {
    /// Create a configuration with the default rules on a custom grid
    pub fn with_grid_size(grid_size: i32) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Check that the rules describe a playable game
    pub fn validate(&self) -> Result<(), String> {
        if !(2..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(format!(
                "grid_size must be between 2 and {}, got {}",
                MAX_GRID_SIZE, self.grid_size
            ));
        }

        if self.min_speed_ms == 0 {
            return Err("min_speed_ms must be at least 1".to_string());
        }

        if self.initial_speed_ms < self.min_speed_ms {
            return Err(format!(
                "initial_speed_ms ({}) cannot be below min_speed_ms ({})",
                self.initial_speed_ms, self.min_speed_ms
            ));
        }

        if self.food_reward == 0 {
            return Err("food_reward must be positive".to_string());
        }

        Ok(())
    }
}
