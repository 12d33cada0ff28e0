pub mod handler;
pub mod swipe;

pub use handler::{ControlButton, InputAction, InputHandler};
pub use swipe::{SwipeTracker, TOUCH_SWIPE_THRESHOLD, swipe_direction};
