use super::state::CollisionType;

/// Notifications emitted by the engine for side-effect adapters (audio, metrics, logs)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A fresh game began, either from idle or through a reset
    Started,
    Paused,
    Resumed,
    /// The snake advanced one cell without eating
    Moved,
    /// The snake ate food; carries the score after the reward
    Ate { score: u32 },
    /// The best score was raised and handed to the persistence adapter
    NewBestScore(u32),
    /// The snake collided and the game is over
    Died(CollisionType),
    /// The snake covers every cell, nothing is left to eat
    BoardFilled,
}

impl GameEvent {
    /// True for events that end the current game
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::Died(_) | GameEvent::BoardFilled)
    }
}
