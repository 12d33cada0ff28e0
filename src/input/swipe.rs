use crate::game::Direction;

/// Minimum travel of a touch swipe, in pixels
pub const TOUCH_SWIPE_THRESHOLD: f32 = 30.0;

/// Classify a pointer displacement as a swipe
///
/// The dominant axis wins; ties count as vertical. The displacement along that
/// axis must strictly exceed `threshold`, otherwise the gesture is ignored.
pub fn swipe_direction(dx: f32, dy: f32, threshold: f32) -> Option<Direction> {
    if dx.abs() > dy.abs() {
        if dx.abs() <= threshold {
            return None;
        }
        Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
    } else {
        if dy.abs() <= threshold {
            return None;
        }
        Some(if dy > 0.0 { Direction::Down } else { Direction::Up })
    }
}

/// Turns press/release pairs into swipes
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    origin: Option<(f32, f32)>,
    threshold: f32,
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            origin: None,
            threshold,
        }
    }

    /// Pointer went down
    pub fn begin(&mut self, x: f32, y: f32) {
        self.origin = Some((x, y));
    }

    /// Pointer went up; yields a direction if the gesture was a swipe
    pub fn finish(&mut self, x: f32, y: f32) -> Option<Direction> {
        let (start_x, start_y) = self.origin.take()?;
        swipe_direction(x - start_x, y - start_y, self.threshold)
    }

    /// Forget a pending press, e.g. when it landed on a button
    pub fn cancel(&mut self) {
        self.origin = None;
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(TOUCH_SWIPE_THRESHOLD)
    }
}
