//! Minimum-spacing admission control for remote dispatches.

use std::time::Duration;

use tokio::time::Instant;

/// Default spacing between two dispatch starts.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(1000);

/// Enforces a minimum gap between consecutive dispatch start times.
///
/// Owned by the single queue worker, so it needs no locking.
#[derive(Debug)]
pub struct RateGate {
    min_interval: Duration,
    last_dispatch: Option<Instant>,
}

impl Default for RateGate {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}

impl RateGate {
    /// Create a gate with the given minimum interval.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_dispatch: None,
        }
    }

    /// Configured minimum interval.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Start time of the last admitted dispatch.
    pub fn last_dispatch(&self) -> Option<Instant> {
        self.last_dispatch
    }

    /// How long a dispatch starting at `now` would have to wait:
    /// `max(0, min_interval - (now - last_dispatch))`.
    pub fn delay_at(&self, now: Instant) -> Duration {
        match self.last_dispatch {
            Some(last) => self
                .min_interval
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }

    /// Wait until a dispatch may start, then record it.
    ///
    /// Returns the recorded dispatch start time.
    pub async fn admit(&mut self) -> Instant {
        let delay = self.delay_at(Instant::now());
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let started = Instant::now();
        self.last_dispatch = Some(started);
        started
    }
}
