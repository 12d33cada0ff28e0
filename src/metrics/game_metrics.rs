use std::time::{Duration, Instant};

use crate::game::GameEvent;

/// Per-session statistics shown next to the board
///
/// The play clock only runs while a game is running; pausing or dying stops it.
#[derive(Debug, Clone, Default)]
pub struct GameMetrics {
    clock_started: Option<Instant>,
    accumulated: Duration,
    pub games_played: u32,
    pub last_score: Option<u32>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update from an engine notification; `score` is the engine's current score
    pub fn record(&mut self, event: &GameEvent, score: u32) {
        self.record_at(event, score, Instant::now());
    }

    pub(crate) fn record_at(&mut self, event: &GameEvent, score: u32, now: Instant) {
        match event {
            GameEvent::Started => {
                self.accumulated = Duration::ZERO;
                self.clock_started = Some(now);
            }
            GameEvent::Resumed => {
                self.clock_started.get_or_insert(now);
            }
            GameEvent::Paused => self.stop_clock(now),
            event if event.is_terminal() => {
                self.stop_clock(now);
                self.games_played += 1;
                self.last_score = Some(score);
            }
            _ => {}
        }
    }

    fn stop_clock(&mut self, now: Instant) {
        if let Some(started) = self.clock_started.take() {
            self.accumulated += now.saturating_duration_since(started);
        }
    }

    /// Play time of the current game
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    pub(crate) fn elapsed_at(&self, now: Instant) -> Duration {
        let running = self
            .clock_started
            .map_or(Duration::ZERO, |started| now.saturating_duration_since(started));
        self.accumulated + running
    }

    pub fn format_time(&self) -> String {
        format_duration(self.elapsed())
    }
}

/// `mm:ss`, minutes unbounded
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::CollisionType;

    #[test]
    fn test_time_formatting() {
        assert_eq!(format_duration(Duration::from_secs(125)), "02:05");
        assert_eq!(format_duration(Duration::ZERO), "00:00");
        assert_eq!(format_duration(Duration::from_secs(3661)), "61:01");
    }

    #[test]
    fn test_clock_stops_while_paused() {
        let t0 = Instant::now();
        let mut metrics = GameMetrics::new();

        metrics.record_at(&GameEvent::Started, 0, t0);
        metrics.record_at(&GameEvent::Paused, 0, t0 + Duration::from_secs(10));
        assert_eq!(metrics.elapsed_at(t0 + Duration::from_secs(60)), Duration::from_secs(10));

        metrics.record_at(&GameEvent::Resumed, 0, t0 + Duration::from_secs(60));
        assert_eq!(metrics.elapsed_at(t0 + Duration::from_secs(65)), Duration::from_secs(15));
    }

    #[test]
    fn test_game_over_counts_games() {
        let t0 = Instant::now();
        let mut metrics = GameMetrics::new();

        metrics.record_at(&GameEvent::Started, 0, t0);
        metrics.record_at(&GameEvent::Died(CollisionType::Wall), 30, t0 + Duration::from_secs(4));
        assert_eq!(metrics.games_played, 1);
        assert_eq!(metrics.last_score, Some(30));
        assert_eq!(metrics.elapsed_at(t0 + Duration::from_secs(100)), Duration::from_secs(4));

        metrics.record_at(&GameEvent::Started, 0, t0 + Duration::from_secs(100));
        assert_eq!(metrics.elapsed_at(t0 + Duration::from_secs(101)), Duration::from_secs(1));
        assert_eq!(metrics.games_played, 1);

        metrics.record_at(&GameEvent::BoardFilled, 3990, t0 + Duration::from_secs(200));
        assert_eq!(metrics.games_played, 2);
        assert_eq!(metrics.last_score, Some(3990));
    }

    #[test]
    fn test_idle_clock_is_zero() {
        let metrics = GameMetrics::new();
        assert_eq!(metrics.elapsed(), Duration::ZERO);
        assert_eq!(metrics.format_time(), "00:00");
    }
}
