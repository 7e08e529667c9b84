//! Wall-clock sources for the tick scheduler.
//!
//! The scheduler never calls `Utc::now()` directly; it reads a [`WallClock`]. In
//! production that is [`SystemClock`]. [`TokioClock`] follows tokio's timer instead,
//! so a runtime with paused time (`tokio::time::pause`) drives both the sleeps and
//! the clock readings, which keeps timing tests exact and fast.

use chrono::{DateTime, Duration, Utc};

/// Source of the current instant.
pub trait WallClock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Real system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl WallClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock anchored at a fixed instant that advances with tokio's timer.
///
/// Must be created inside a tokio runtime.
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    anchor: DateTime<Utc>,
    started: tokio::time::Instant,
}

impl TokioClock {
    pub fn starting_at(anchor: DateTime<Utc>) -> Self {
        Self {
            anchor,
            started: tokio::time::Instant::now(),
        }
    }
}

impl WallClock for TokioClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = tokio::time::Instant::now() - self.started;
        // Elapsed runtime never approaches chrono's range limit
        self.anchor + Duration::from_std(elapsed).unwrap_or_else(|_| Duration::zero())
    }
}
