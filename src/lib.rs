//! # World Clock Core Library
//!
//! This library provides the engine behind a multi-timezone live clock: a curated,
//! deduplicated set of timezones, a formatter that turns one instant into local
//! readings for each of them, and a scheduler that re-renders on every wall-clock
//! second without accumulating drift.
//!
//! ## Design Philosophy
//!
//! ### Second Alignment
//! Ticks are phase-aligned to the second boundary. Each delay is computed from the
//! live clock (`1000 - now_ms % 1000`) rather than accumulated from a fixed interval,
//! so slow callbacks or a busy runtime never push the clock display out of step.
//!
//! ### Data, Not Rendering
//! The engine only produces data. Every tick and every mutation publishes a
//! [`Snapshot`] with the full ordered list of readings; the presentation layer
//! re-reads it and decides how to draw.
//!
//! ### Data Flow
//! 1. **Tick**: [`scheduler::TickScheduler`] fires at the next second boundary
//! 2. **Format**: [`engine::ClockEngine`] formats every zone of its [`zone_set::ZoneSet`]
//! 3. **Publish**: the resulting [`Snapshot`] goes out over a `watch` channel
//!
//! ## Core Types
//!
//! - [`ZoneEntry`]: a labelled timezone the user chose to display
//! - [`DisplayOptions`]: 12/24-hour, seconds and date toggles
//! - [`FormattedReading`]: the rendered time (and optional date) for one zone
//! - [`ZoneReading`] / [`Snapshot`]: what the presentation layer receives
//! - [`ClockError`]: every failure the library surfaces

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Module declarations
pub mod clock;
pub mod config;
pub mod directory;
pub mod engine;
pub mod formatter;
pub mod renderer;
pub mod scheduler;
pub mod zone_set;

/// Errors surfaced by the clock engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// The identifier is not a timezone known to the IANA database.
    #[error("invalid timezone: {0}")]
    InvalidTimeZone(String),

    /// A tick callback failed or panicked. Contained by the scheduler and only logged.
    #[error("tick callback fault: {0}")]
    CallbackFault(String),

    /// The scheduler was started outside a tokio runtime.
    #[error("tick scheduler requires a running tokio runtime")]
    NoRuntime,
}

/// A timezone shown on the clock, with the label it is displayed under.
///
/// # Example
/// ```
/// use world_clock_lib::ZoneEntry;
///
/// let lagos = ZoneEntry::new("Lagos", "Africa/Lagos");
/// assert_eq!(lagos.tz, "Africa/Lagos");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneEntry {
    /// Display label (usually a city or country name)
    pub label: String,
    /// IANA timezone identifier, e.g. `Europe/London`
    pub tz: String,
}

impl ZoneEntry {
    pub fn new(label: impl Into<String>, tz: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tz: tz.into(),
        }
    }
}

/// Formatting toggles. They change how readings look, never which zones exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// 12-hour clock with am/pm instead of 24-hour
    pub hour12: bool,
    /// Include the seconds field
    pub show_seconds: bool,
    /// Produce a date string alongside the time
    pub show_date: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            hour12: false,
            show_seconds: true,
            show_date: true,
        }
    }
}

/// Time and optional date for one zone at one instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedReading {
    /// `hour:minute[:second]`, with ` am`/` pm` in 12-hour mode
    pub time: String,
    /// e.g. `Sun 16 Jun 2024`; `None` when dates are switched off
    pub date: Option<String>,
}

/// One row of published output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneReading {
    pub label: String,
    pub tz: String,
    pub reading: FormattedReading,
}

/// The full ordered list of readings handed to the presentation layer.
///
/// Published after every tick and every mutation of the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Instant the readings were computed for
    pub instant: DateTime<Utc>,
    /// Readings in display (insertion) order
    pub readings: Vec<ZoneReading>,
}
