use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use super::scheduler::TickScheduler;
use crate::audio::AudioPlayer;
use crate::game::{GameEngine, GameEvent, TickOutcome};
use crate::input::{InputAction, InputHandler};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, Scene};

/// Render at 30 FPS (33ms per frame)
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// Interactive game in the terminal
pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    audio: AudioPlayer,
    should_quit: bool,
}

impl HumanMode {
    /// `swipe_threshold` is in grid cells
    pub fn new(engine: GameEngine, audio: AudioPlayer, swipe_threshold: f32) -> Self {
        Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(swipe_threshold),
            audio,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        tracing::info!(best_score = self.engine.best_score(), "session started");

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        tracing::info!(
            games_played = self.metrics.games_played,
            best_score = self.engine.best_score(),
            "session ended"
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut scheduler = TickScheduler::new(self.engine.speed_interval());
        let mut render_timer = interval(RENDER_INTERVAL);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            tracing::warn!("terminal event error: {}", err);
                        }
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = scheduler.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal
                        .draw(|frame| self.draw_frame(frame))
                        .context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            // Eating and resetting change the speed
            scheduler.sync(self.engine.speed_interval());

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Render the current state and remember where the buttons ended up
    fn draw_frame(&mut self, frame: &mut Frame) {
        let scene = Scene {
            state: self.engine.state(),
            grid_size: self.engine.config().grid_size,
            metrics: &self.metrics,
            muted: self.audio.is_muted(),
        };
        let buttons = self.renderer.render(frame, &scene);
        self.input_handler.set_buttons(buttons);
    }

    fn handle_event(&mut self, event: Event) {
        let action = match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.input_handler.handle_key_event(key)
            }
            Event::Mouse(mouse) => self.input_handler.handle_mouse_event(mouse),
            _ => return,
        };

        self.handle_action(action);
    }

    fn handle_action(&mut self, action: InputAction) {
        match action {
            InputAction::Quit => self.should_quit = true,
            InputAction::ToggleMute => {
                self.audio.toggle_mute();
                tracing::debug!(muted = self.audio.is_muted(), "mute toggled");
            }
            action => {
                if let Some(intent) = action.intent(self.engine.phase()) {
                    self.engine.apply(intent);
                    self.dispatch_events();
                }
            }
        }
    }

    fn update_game(&mut self) {
        let outcome = self.engine.tick();
        if outcome != TickOutcome::Skipped {
            self.dispatch_events();
        }
    }

    /// Feed engine notifications to audio and metrics
    fn dispatch_events(&mut self) {
        let score = self.engine.score();
        let events: Vec<GameEvent> = self.engine.drain_events().collect();

        for event in &events {
            self.audio.on_event(event);
            self.metrics.record(event, score);

            if let GameEvent::NewBestScore(value) = event {
                tracing::info!(best_score = value, "new best score");
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
