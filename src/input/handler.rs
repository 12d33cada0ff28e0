use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position as ScreenPosition, Rect};

use super::swipe::SwipeTracker;
use crate::game::{Direction, Intent, Phase};

/// Terminal columns per grid cell; the renderer draws every cell two columns wide
const COLUMNS_PER_CELL: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Steer(Direction),
    TogglePause,
    /// Enter: start from idle, resume from pause, replay after game over
    Confirm,
    Restart,
    ToggleMute,
    Quit,
    None,
}

impl InputAction {
    /// Resolve a device-level action into an engine intent for the given phase
    ///
    /// Mute and quit belong to the host and never reach the engine.
    pub fn intent(self, phase: Phase) -> Option<Intent> {
        match (self, phase) {
            (InputAction::Steer(direction), _) => Some(Intent::Steer(direction)),
            (InputAction::TogglePause, Phase::Idle) => Some(Intent::Start),
            (InputAction::TogglePause, Phase::Running | Phase::Paused) => Some(Intent::TogglePause),
            (InputAction::Confirm, Phase::Idle | Phase::Paused) => Some(Intent::Start),
            (InputAction::Confirm, Phase::GameOver) => Some(Intent::Reset),
            (InputAction::Restart, _) => Some(Intent::Reset),
            _ => None,
        }
    }
}

/// A clickable area of the screen and the action it triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlButton {
    pub area: Rect,
    pub action: InputAction,
}

/// Maps keyboard and mouse events to actions
pub struct InputHandler {
    swipe: SwipeTracker,
    buttons: Vec<ControlButton>,
}

impl InputHandler {
    /// `swipe_threshold` is measured in grid cells
    pub fn new(swipe_threshold: f32) -> Self {
        Self {
            swipe: SwipeTracker::new(swipe_threshold),
            buttons: Vec::new(),
        }
    }

    /// Replace the on-screen buttons with the ones of the latest frame
    pub fn set_buttons(&mut self, buttons: Vec<ControlButton>) {
        self.buttons = buttons;
    }

    pub fn buttons(&self) -> &[ControlButton] {
        &self.buttons
    }

    fn button_at(&self, column: u16, row: u16) -> Option<InputAction> {
        let point = ScreenPosition::new(column, row);
        self.buttons
            .iter()
            .find(|button| button.area.contains(point))
            .map(|button| button.action)
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> InputAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return InputAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => InputAction::Steer(Direction::Up),
            KeyCode::Down => InputAction::Steer(Direction::Down),
            KeyCode::Left => InputAction::Steer(Direction::Left),
            KeyCode::Right => InputAction::Steer(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => InputAction::Steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => InputAction::Steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => InputAction::Steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => InputAction::Steer(Direction::Right),

            // Controls
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
                InputAction::TogglePause
            }
            KeyCode::Enter => InputAction::Confirm,
            KeyCode::Char('r') | KeyCode::Char('R') => InputAction::Restart,
            KeyCode::Char('m') | KeyCode::Char('M') => InputAction::ToggleMute,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputAction::Quit,

            _ => InputAction::None,
        }
    }

    /// Left clicks press buttons; left-button drags elsewhere act as swipes
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) -> InputAction {
        let x = mouse.column as f32 / COLUMNS_PER_CELL;
        let y = mouse.row as f32;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(action) = self.button_at(mouse.column, mouse.row) {
                    self.swipe.cancel();
                    return action;
                }
                self.swipe.begin(x, y);
                InputAction::None
            }
            MouseEventKind::Up(MouseButton::Left) => self
                .swipe
                .finish(x, y)
                .map_or(InputAction::None, InputAction::Steer),
            _ => InputAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(super::swipe::TOUCH_SWIPE_THRESHOLD)
    }
}
