use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Timer that fires engine ticks at the engine's current speed
///
/// The period is not fixed for a whole game: every food eaten shortens it and
/// a reset restores it, so the host calls [`TickScheduler::sync`] after each
/// state change.
pub struct TickScheduler {
    period: Duration,
    interval: Interval,
}

impl TickScheduler {
    /// Must be called from within a tokio runtime
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: Self::arm(period),
        }
    }

    fn arm(period: Duration) -> Interval {
        // First tick one full period from now, not immediately
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Wait for the next tick
    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }

    /// Re-arm the timer if `period` differs from the armed one; returns whether it did
    pub fn sync(&mut self, period: Duration) -> bool {
        if period == self.period {
            return false;
        }

        tracing::trace!(?period, "tick timer re-armed");
        self.period = period;
        self.interval = Self::arm(period);
        true
    }
}
