//! # Clock Engine
//!
//! Composition root: owns the [`ZoneSet`] and [`DisplayOptions`], wires the
//! [`TickScheduler`] to the formatter, and exposes everything the presentation
//! layer needs.
//!
//! ## Lifecycle
//! ```text
//!            start()
//!  Stopped ───────────▶ Running ──┐ tick: format every zone, publish Snapshot
//!     ▲                   │  ◀────┘
//!     └───────────────────┘
//!            stop()
//! ```
//!
//! ## Ordering
//! Zones and options live behind one mutex shared with the tick callback. A mutation
//! finishes before the next tick can read the set, so a zone added before a tick is
//! in that tick's output and a removed one is not. Mutations publish a fresh
//! [`Snapshot`] immediately instead of waiting for the next tick.

use crate::clock::{SystemClock, WallClock};
use crate::config::ClockConfig;
use crate::directory::{CountryDirectory, CountryRecord};
use crate::formatter;
use crate::scheduler::{TickHandle, TickScheduler};
use crate::zone_set::ZoneSet;
use crate::{ClockError, DisplayOptions, Snapshot, ZoneEntry, ZoneReading};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Stopped,
    Running,
}

#[derive(Debug)]
struct Shared {
    zones: ZoneSet,
    options: DisplayOptions,
}

impl Shared {
    fn readings_at(&self, instant: DateTime<Utc>) -> Result<Vec<ZoneReading>, ClockError> {
        self.zones
            .iter()
            .map(|entry| {
                Ok(ZoneReading {
                    label: entry.label.clone(),
                    tz: entry.tz.clone(),
                    reading: formatter::format(instant, &entry.tz, &self.options)?,
                })
            })
            .collect()
    }
}

pub struct ClockEngine {
    shared: Arc<Mutex<Shared>>,
    directory: CountryDirectory,
    clock: Arc<dyn WallClock>,
    scheduler: TickScheduler,
    ticker: Mutex<Option<TickHandle>>,
    publisher: Arc<watch::Sender<Snapshot>>,
}

impl ClockEngine {
    /// Build a stopped engine seeded from `config`, reading the system clock.
    pub fn new(config: &ClockConfig) -> Result<Self, ClockError> {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Build a stopped engine on a custom time source.
    ///
    /// Configured zones that do not resolve are logged and skipped.
    pub fn with_clock(config: &ClockConfig, clock: Arc<dyn WallClock>) -> Result<Self, ClockError> {
        let mut zones = ZoneSet::new();
        for entry in config.initial_zones() {
            if let Err(e) = zones.add(&entry.tz, Some(entry.label.as_str())) {
                warn!("Skipping configured zone {:?}: {}", entry.label, e);
            }
        }

        let shared = Shared {
            zones,
            options: config.display,
        };
        let now = clock.now();
        let initial = Snapshot {
            instant: now,
            readings: shared.readings_at(now)?,
        };
        let (publisher, _) = watch::channel(initial);

        info!(
            "clock engine ready with {} zones ({})",
            shared.zones.len(),
            if shared.options.hour12 { "12-hour" } else { "24-hour" }
        );

        Ok(Self {
            shared: Arc::new(Mutex::new(shared)),
            directory: CountryDirectory::new(),
            scheduler: TickScheduler::new(Arc::clone(&clock)),
            clock,
            ticker: Mutex::new(None),
            publisher: Arc::new(publisher),
        })
    }

    /// Begin ticking. A no-op while already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) -> Result<(), ClockError> {
        let mut ticker = self.ticker.lock();
        if ticker.is_some() {
            return Ok(());
        }

        let shared = Arc::clone(&self.shared);
        let publisher = Arc::clone(&self.publisher);
        let handle = self.scheduler.start(move |instant| {
            // Send under the lock so a mutation cannot publish in between
            let shared = shared.lock();
            let readings = shared.readings_at(instant)?;
            debug!("tick {} with {} readings", instant, readings.len());
            publisher.send_replace(Snapshot { instant, readings });
            Ok(())
        })?;

        *ticker = Some(handle);
        info!("clock engine running");
        Ok(())
    }

    /// Stop ticking. No further snapshots are published by ticks once this returns.
    pub fn stop(&self) {
        let handle = self.ticker.lock().take();
        if let Some(handle) = handle {
            handle.cancel();
            info!("clock engine stopped");
        }
    }

    pub fn state(&self) -> EngineState {
        if self.ticker.lock().is_some() {
            EngineState::Running
        } else {
            EngineState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == EngineState::Running
    }

    /// Receiver for every published snapshot (ticks and mutations).
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.publisher.subscribe()
    }

    /// Add a zone. `Ok(false)` if it is already shown.
    pub fn add_zone(&self, tz: &str, label: Option<&str>) -> Result<bool, ClockError> {
        let mut shared = self.shared.lock();
        let added = shared.zones.add(tz, label)?;
        if added {
            debug!("added zone {}", tz);
            self.publish(&shared);
        }
        Ok(added)
    }

    /// Add the zone of a directory record, labelled with the country name.
    pub fn add_country(&self, record: &CountryRecord) -> Result<bool, ClockError> {
        self.add_zone(record.tz, Some(record.country))
    }

    pub fn remove_zone(&self, tz: &str) -> bool {
        let mut shared = self.shared.lock();
        let removed = shared.zones.remove(tz);
        if removed {
            debug!("removed zone {}", tz);
            self.publish(&shared);
        }
        removed
    }

    pub fn zones(&self) -> Vec<ZoneEntry> {
        self.shared.lock().zones.list()
    }

    pub fn options(&self) -> DisplayOptions {
        self.shared.lock().options
    }

    pub fn set_hour12(&self, hour12: bool) {
        self.update_options(|o| o.hour12 = hour12);
    }

    /// Flip between 12- and 24-hour display. Returns the new `hour12` value.
    pub fn toggle_hour12(&self) -> bool {
        self.update_options(|o| {
            o.hour12 = !o.hour12;
            o.hour12
        })
    }

    pub fn set_show_seconds(&self, show_seconds: bool) {
        self.update_options(|o| o.show_seconds = show_seconds);
    }

    pub fn set_show_date(&self, show_date: bool) {
        self.update_options(|o| o.show_date = show_date);
    }

    pub fn search(&self, query: &str) -> Vec<CountryRecord> {
        self.directory.search(query)
    }

    pub fn readings_at(&self, instant: DateTime<Utc>) -> Result<Vec<ZoneReading>, ClockError> {
        self.shared.lock().readings_at(instant)
    }

    /// Readings at the clock's current instant.
    pub fn snapshot(&self) -> Result<Snapshot, ClockError> {
        let instant = self.clock.now();
        Ok(Snapshot {
            instant,
            readings: self.readings_at(instant)?,
        })
    }

    /// Reading for the first zone with the date suppressed, for a one-line display.
    pub fn primary_reading(&self) -> Result<Option<ZoneReading>, ClockError> {
        let shared = self.shared.lock();
        let Some(entry) = shared.zones.first() else {
            return Ok(None);
        };

        let options = DisplayOptions {
            show_date: false,
            ..shared.options
        };
        Ok(Some(ZoneReading {
            label: entry.label.clone(),
            tz: entry.tz.clone(),
            reading: formatter::format(self.clock.now(), &entry.tz, &options)?,
        }))
    }

    fn update_options<R>(&self, change: impl FnOnce(&mut DisplayOptions) -> R) -> R {
        let mut shared = self.shared.lock();
        let result = change(&mut shared.options);
        debug!("display options now {:?}", shared.options);
        self.publish(&shared);
        result
    }

    /// Publish a snapshot of `shared`. Callers hold the lock across the mutation and
    /// the send, so published snapshots follow mutation order.
    fn publish(&self, shared: &Shared) {
        let instant = self.clock.now();
        // Zones only hold validated identifiers, so formatting cannot fail here
        if let Ok(readings) = shared.readings_at(instant) {
            self.publisher.send_replace(Snapshot { instant, readings });
        }
    }
}

impl Drop for ClockEngine {
    fn drop(&mut self) {
        self.stop();
    }
}
