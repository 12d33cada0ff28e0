/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// A player intent, independent of the input device that produced it.
///
/// Every input source funnels through [`crate::game::GameEngine::apply`], so
/// the reversal guard and phase rules are enforced in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Steer(Direction),
    TogglePause,
    Start,
    Reset,
}

impl From<Direction> for Intent {
    fn from(direction: Direction) -> Self {
        Intent::Steer(direction)
    }
}
