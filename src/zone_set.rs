//! # Zone Set
//!
//! The ordered, deduplicated collection of zones the clock displays.
//!
//! Entries keep insertion order (that is the display order) and are unique by
//! timezone identifier. Uniqueness is structural: a keyed index is checked and
//! updated inside [`ZoneSet::add`] itself, so there is no separate validation pass
//! that could fall out of step with the list.

use crate::{formatter, ClockError, ZoneEntry};
use std::collections::HashSet;

#[derive(Debug, Default, Clone)]
pub struct ZoneSet {
    entries: Vec<ZoneEntry>,
    index: HashSet<String>,
}

impl ZoneSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a zone at the end of the set.
    ///
    /// Returns `Ok(false)` without touching the set when `tz` is already present,
    /// and `Err(InvalidTimeZone)` when it does not resolve. A missing or empty
    /// `label` falls back to [`default_label`].
    ///
    /// # Example
    /// ```
    /// use world_clock_lib::zone_set::ZoneSet;
    ///
    /// let mut zones = ZoneSet::new();
    /// assert_eq!(zones.add("Europe/London", None), Ok(true));
    /// assert_eq!(zones.add("Europe/London", Some("London")), Ok(false));
    /// assert_eq!(zones.list()[0].label, "London");
    /// ```
    pub fn add(&mut self, tz: &str, label: Option<&str>) -> Result<bool, ClockError> {
        formatter::resolve(tz)?;

        if !self.index.insert(tz.to_string()) {
            return Ok(false);
        }

        let label = match label {
            Some(l) if !l.is_empty() => l.to_string(),
            _ => default_label(tz),
        };
        self.entries.push(ZoneEntry::new(label, tz));
        Ok(true)
    }

    /// Remove the zone with identifier `tz`. Returns whether anything was removed.
    pub fn remove(&mut self, tz: &str) -> bool {
        if !self.index.remove(tz) {
            return false;
        }
        self.entries.retain(|e| e.tz != tz);
        true
    }

    /// Snapshot of the entries in display order.
    pub fn list(&self) -> Vec<ZoneEntry> {
        self.entries.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ZoneEntry> {
        self.entries.iter()
    }

    pub fn contains(&self, tz: &str) -> bool {
        self.index.contains(tz)
    }

    pub fn first(&self) -> Option<&ZoneEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Label derived from an identifier: its last path segment with underscores as spaces.
///
/// `America/Argentina/Buenos_Aires` becomes `Buenos Aires`, `UTC` stays `UTC`.
pub fn default_label(tz: &str) -> String {
    let segment = tz.rsplit('/').next().unwrap_or(tz);
    if segment.is_empty() {
        return tz.to_string();
    }
    segment.replace('_', " ")
}
