use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Check if the position lies on a square grid of the given size
    pub fn is_within(&self, grid_size: i32) -> bool {
        (0..grid_size).contains(&self.x) && (0..grid_size).contains(&self.y)
    }
}

/// The snake body, head first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Position>", into = "Vec<Position>")]
pub struct Snake {
    body: Vec<Position>,
}

impl Snake {
    /// Create a snake made of a single segment
    pub fn new(head: Position) -> Self {
        Self { body: vec![head] }
    }

    /// Create a snake from explicit segments, head at index 0
    ///
    /// # Panics
    ///
    /// Panics if `body` is empty.
    pub fn from_segments(body: Vec<Position>) -> Self {
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Self { body }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// All segments, head first
    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    /// Check if any segment, head and tail included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Put a new head in front, dropping the tail unless the snake grows
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a snake built through the public constructors
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl TryFrom<Vec<Position>> for Snake {
    type Error = String;

    fn try_from(body: Vec<Position>) -> Result<Self, Self::Error> {
        if body.is_empty() {
            return Err("a snake needs at least one segment".to_string());
        }
        Ok(Self { body })
    }
}

impl From<Snake> for Vec<Position> {
    fn from(snake: Snake) -> Self {
        snake.body
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Lifecycle phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Constructed, waiting for an explicit start
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Complete game state, also used as the read-only snapshot handed to renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    /// Direction applied by the most recent tick; the reversal guard checks against it
    pub direction: Direction,
    /// Direction that the next tick will apply
    pub pending_direction: Direction,
    pub score: u32,
    pub best_score: u32,
    pub speed_interval_ms: u64,
    pub phase: Phase,
}

impl GameState {
    /// Create an idle state with a zero score
    pub fn new(snake: Snake, food: Position, direction: Direction, speed_interval_ms: u64) -> Self {
        Self {
            snake,
            food,
            direction,
            pending_direction: direction,
            score: 0,
            best_score: 0,
            speed_interval_ms,
            phase: Phase::Idle,
        }
    }

    /// Same state, moved to the given phase
    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }
}
