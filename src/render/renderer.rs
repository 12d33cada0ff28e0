use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Direction, GameState, Phase, Position};
use crate::input::{ControlButton, InputAction};
use crate::metrics::GameMetrics;

/// Blank columns between two footer buttons
const BUTTON_GAP: u16 = 1;

/// Everything a frame shows
pub struct Scene<'a> {
    pub state: &'a GameState,
    pub grid_size: i32,
    pub metrics: &'a GameMetrics,
    pub muted: bool,
}

/// What occupies a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Head(Direction),
    Body,
    Food,
    Empty,
}

impl CellKind {
    pub fn at(state: &GameState, pos: Position) -> Self {
        if pos == state.snake.head() {
            CellKind::Head(state.direction)
        } else if state.snake.occupies(pos) {
            CellKind::Body
        } else if pos == state.food {
            CellKind::Food
        } else {
            CellKind::Empty
        }
    }

    fn span(self) -> Span<'static> {
        match self {
            CellKind::Head(direction) => {
                let glyph = match direction {
                    Direction::Up => "▲ ",
                    Direction::Down => "▼ ",
                    Direction::Left => "◀ ",
                    Direction::Right => "▶ ",
                };
                Span::styled(
                    glyph,
                    Style::default()
                        .fg(Color::LightGreen)
                        .add_modifier(Modifier::BOLD),
                )
            }
            CellKind::Body => Span::styled("■ ", Style::default().fg(Color::Green)),
            CellKind::Food => Span::styled(
                "● ",
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            ),
            CellKind::Empty => Span::styled("· ", Style::default().fg(Color::DarkGray)),
        }
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw a frame and return the clickable buttons it shows
    pub fn render(&self, frame: &mut Frame, scene: &Scene) -> Vec<ControlButton> {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(scene), chunks[0]);

        // Two columns per cell plus the border
        let side = u16::try_from(scene.grid_size).unwrap_or(0);
        let board_area = centered(
            chunks[1],
            side.saturating_mul(2).saturating_add(2),
            side.saturating_add(2),
        );
        frame.render_widget(self.render_grid(scene, board_area), board_area);

        if let Some(overlay) = self.render_overlay(scene.state) {
            let overlay_area = centered(board_area, board_area.width.saturating_sub(4), 8);
            frame.render_widget(Clear, overlay_area);
            frame.render_widget(overlay, overlay_area);
        }

        self.render_controls(frame, chunks[2], scene)
    }

    /// Only the cells that fit inside `area` are drawn
    fn render_grid(&self, scene: &Scene, area: Rect) -> Paragraph<'static> {
        let columns = i32::from(area.width.saturating_sub(2) / 2).min(scene.grid_size);
        let rows = i32::from(area.height.saturating_sub(2)).min(scene.grid_size);

        let lines: Vec<Line> = (0..rows)
            .map(|y| {
                let spans: Vec<Span> = (0..columns)
                    .map(|x| CellKind::at(scene.state, Position::new(x, y)).span())
                    .collect();
                Line::from(spans)
            })
            .collect();

        let border_color = match scene.state.phase {
            Phase::GameOver => Color::Red,
            Phase::Paused => Color::Yellow,
            Phase::Idle | Phase::Running => Color::Cyan,
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border_color))
                .title(" Neon Snake "),
        )
    }

    fn render_stats(&self, scene: &Scene) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Gray);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let text = vec![Line::from(vec![
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(scene.state.best_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Score: ", label),
            Span::styled(scene.state.score.to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{}ms", scene.state.speed_interval_ms), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(scene.metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Games: ", label),
            Span::styled(scene.metrics.games_played.to_string(), value),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_overlay(&self, state: &GameState) -> Option<Paragraph<'static>> {
        let hint = Style::default().fg(Color::Gray);
        let key = Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD);

        let (title, color, mut lines) = match state.phase {
            Phase::Running => return None,
            Phase::Idle => (
                "NEON SNAKE",
                Color::LightGreen,
                vec![
                    Line::from(vec![
                        Span::styled("Press ", hint),
                        Span::styled("Space", key),
                        Span::styled(" or ", hint),
                        Span::styled("Enter", key),
                        Span::styled(" to start", hint),
                    ]),
                    Line::from(Span::styled("Keys, swipes or the buttons below", hint)),
                ],
            ),
            Phase::Paused => (
                "PAUSED",
                Color::Yellow,
                vec![Line::from(vec![
                    Span::styled("Press ", hint),
                    Span::styled("Space", key),
                    Span::styled(" to resume", hint),
                ])],
            ),
            Phase::GameOver => {
                let mut lines = vec![Line::from(vec![
                    Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                    Span::styled(
                        state.score.to_string(),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])];
                if state.score > 0 && state.score == state.best_score {
                    lines.push(Line::from(Span::styled(
                        "New best!",
                        Style::default().fg(Color::Yellow),
                    )));
                }
                lines.push(Line::from(vec![
                    Span::styled("Press ", hint),
                    Span::styled("Enter", key),
                    Span::styled(" or ", hint),
                    Span::styled("R", key),
                    Span::styled(" to play again", hint),
                ]));
                ("GAME OVER", Color::Red, lines)
            }
        };

        lines.insert(
            0,
            Line::from(Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
        );
        lines.insert(1, Line::from(""));

        Some(
            Paragraph::new(lines).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(color)),
            ),
        )
    }

    /// Footer of clickable buttons mirroring the keyboard controls
    fn render_controls(&self, frame: &mut Frame, area: Rect, scene: &Scene) -> Vec<ControlButton> {
        let steer = Style::default().fg(Color::Cyan).bg(Color::DarkGray);
        let control = Style::default().fg(Color::White).bg(Color::DarkGray);
        let quit = Style::default().fg(Color::Red).bg(Color::DarkGray);

        let pause_label = match scene.state.phase {
            Phase::Idle => " Space start ",
            Phase::Paused => " Space resume ",
            Phase::Running | Phase::GameOver => " Space pause ",
        };
        let mute_label = if scene.muted {
            " M sound: off "
        } else {
            " M sound: on "
        };

        let buttons = [
            (" ▲ ", steer, InputAction::Steer(Direction::Up)),
            (" ▼ ", steer, InputAction::Steer(Direction::Down)),
            (" ◀ ", steer, InputAction::Steer(Direction::Left)),
            (" ▶ ", steer, InputAction::Steer(Direction::Right)),
            (pause_label, control, InputAction::TogglePause),
            (" R restart ", control, InputAction::Restart),
            (mute_label, control, InputAction::ToggleMute),
            (" Q quit ", quit, InputAction::Quit),
        ];

        let block = Block::default().borders(Borders::TOP);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let widths: Vec<u16> = buttons
            .iter()
            .map(|(label, _, _)| u16::try_from(Span::raw(*label).width()).unwrap_or(u16::MAX))
            .collect();
        let gaps = BUTTON_GAP.saturating_mul(widths.len().saturating_sub(1) as u16);
        let total = widths.iter().fold(gaps, |sum, width| sum.saturating_add(*width));

        let mut x = inner.x.saturating_add(inner.width.saturating_sub(total) / 2);
        let mut placed = Vec::with_capacity(buttons.len());

        for ((label, style, action), width) in buttons.into_iter().zip(widths) {
            let button_area = Rect::new(x, inner.y, width, inner.height.min(1)).intersection(inner);
            if button_area.is_empty() {
                break;
            }

            frame.render_widget(Paragraph::new(Span::styled(label, style)), button_area);
            placed.push(ControlButton {
                area: button_area,
                action,
            });
            x = x.saturating_add(width).saturating_add(BUTTON_GAP);
        }

        placed
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rectangle centered in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Snake;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn state(phase: Phase) -> GameState {
        GameState::new(
            Snake::from_segments(vec![Position::new(3, 2), Position::new(2, 2)]),
            Position::new(5, 5),
            Direction::Right,
            150,
        )
        .with_phase(phase)
    }

    fn draw_grid(state: &GameState, grid_size: i32, muted: bool) -> (Buffer, Vec<ControlButton>) {
        let metrics = GameMetrics::new();
        let scene = Scene {
            state,
            grid_size,
            metrics: &metrics,
            muted,
        };
        let mut terminal = Terminal::new(TestBackend::new(80, 32)).unwrap();
        let mut buttons = Vec::new();
        terminal
            .draw(|frame| buttons = Renderer::new().render(frame, &scene))
            .unwrap();

        (terminal.backend().buffer().clone(), buttons)
    }

    fn text(buffer: &Buffer) -> String {
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn draw(state: &GameState, muted: bool) -> String {
        text(&draw_grid(state, 20, muted).0)
    }

    fn text_in(buffer: &Buffer, area: Rect) -> String {
        let width = buffer.area.width;
        (area.x..area.right())
            .map(|x| buffer.content()[usize::from(area.y * width + x)].symbol())
            .collect()
    }

    #[test]
    fn test_cell_kinds() {
        let state = state(Phase::Running);
        assert_eq!(
            CellKind::at(&state, Position::new(3, 2)),
            CellKind::Head(Direction::Right)
        );
        assert_eq!(CellKind::at(&state, Position::new(2, 2)), CellKind::Body);
        assert_eq!(CellKind::at(&state, Position::new(5, 5)), CellKind::Food);
        assert_eq!(CellKind::at(&state, Position::new(0, 0)), CellKind::Empty);
    }

    #[test]
    fn test_running_frame_has_no_overlay() {
        let text = draw(&state(Phase::Running), false);
        assert!(text.contains("Score: 0"));
        assert!(text.contains("▶"));
        assert!(text.contains("●"));
        assert!(!text.contains("PAUSED"));
        assert!(text.contains("sound: on"));
    }

    #[test]
    fn test_overlays_follow_phase() {
        assert!(draw(&state(Phase::Idle), false).contains("to start"));
        assert!(draw(&state(Phase::Paused), false).contains("PAUSED"));

        let mut over = state(Phase::GameOver);
        over.score = 30;
        over.best_score = 30;
        let text = draw(&over, true);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("New best!"));
        assert!(text.contains("sound: off"));
    }

    #[test]
    fn test_footer_buttons_are_laid_out_in_a_row() {
        let (buffer, buttons) = draw_grid(&state(Phase::Idle), 20, false);

        let actions: Vec<InputAction> = buttons.iter().map(|button| button.action).collect();
        assert_eq!(
            actions,
            vec![
                InputAction::Steer(Direction::Up),
                InputAction::Steer(Direction::Down),
                InputAction::Steer(Direction::Left),
                InputAction::Steer(Direction::Right),
                InputAction::TogglePause,
                InputAction::Restart,
                InputAction::ToggleMute,
                InputAction::Quit,
            ]
        );

        // Footer is the last three rows, below its top border
        assert!(buttons.iter().all(|button| button.area.y == 30 && button.area.height == 1));
        assert!(buttons.windows(2).all(|pair| pair[0].area.right() < pair[1].area.x));

        assert_eq!(text_in(&buffer, buttons[0].area), " ▲ ");
        assert_eq!(text_in(&buffer, buttons[4].area), " Space start ");
        assert_eq!(text_in(&buffer, buttons[5].area), " R restart ");
        assert_eq!(text_in(&buffer, buttons[6].area), " M sound: on ");
    }

    #[test]
    fn test_pause_button_label_follows_phase() {
        let (buffer, buttons) = draw_grid(&state(Phase::Paused), 20, true);
        assert_eq!(text_in(&buffer, buttons[4].area), " Space resume ");
        assert_eq!(text_in(&buffer, buttons[6].area), " M sound: off ");
    }

    #[test]
    fn test_oversized_grid_is_clipped() {
        let (buffer, buttons) = draw_grid(&state(Phase::Running), 32768, false);

        let text = text(&buffer);
        assert!(text.contains("Score: 0"));
        assert!(text.contains("▶"));
        assert_eq!(buttons.len(), 8);
    }

    #[test]
    fn test_centered_clips_to_area() {
        let area = Rect::new(0, 0, 10, 5);
        assert_eq!(centered(area, 4, 3), Rect::new(3, 1, 4, 3));
        assert_eq!(centered(area, 40, 30), area);
    }
}
