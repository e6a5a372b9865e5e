//! One-second play timer driven by explicit clock readings
//!
//! The ticker never sleeps or spawns anything. Callers report the current
//! instant and receive the number of whole intervals that elapsed since the
//! last delivery, which keeps the session single-threaded and testable.

use std::time::{Duration, Instant};

use crate::io::configuration::TICK_INTERVAL;

/// Recurring tick source for the session timer
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    origin: Option<Instant>,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ticker {
    /// Ticker with the standard one-second interval
    pub const fn new() -> Self {
        Self::with_interval(TICK_INTERVAL)
    }

    /// Ticker with a custom interval
    pub const fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            origin: None,
        }
    }

    /// Start ticking from `now`
    ///
    /// Any previous schedule is cleared first, so a ticker is never running twice.
    pub const fn start(&mut self, now: Instant) {
        self.origin = Some(now);
    }

    /// Stop ticking and drop any partial interval
    pub const fn stop(&mut self) {
        self.origin = None;
    }

    /// Whether the ticker is scheduled
    pub const fn is_running(&self) -> bool {
        self.origin.is_some()
    }

    /// Count whole intervals elapsed up to `now` and consume them
    ///
    /// The remainder of a partial interval carries over to the next call.
    pub fn due_ticks(&mut self, now: Instant) -> u64 {
        let Some(origin) = self.origin else {
            return 0;
        };
        if self.interval.is_zero() {
            return 0;
        }
        let elapsed = now.saturating_duration_since(origin);
        let ticks = elapsed.as_nanos() / self.interval.as_nanos();
        let ticks = u64::try_from(ticks).unwrap_or(u64::MAX);
        if ticks > 0 {
            let consumed = self
                .interval
                .checked_mul(u32::try_from(ticks).unwrap_or(u32::MAX))
                .unwrap_or(elapsed);
            self.origin = Some(origin + consumed);
        }
        ticks
    }
}

/// Format elapsed seconds as `mm:ss`
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
