//! # Terminal Rendering
//!
//! Plain-text views over published snapshots for the `world-clock` binary:
//! - **card**: one aligned row per zone with time and optional date
//! - **inline**: `Label: time` for the first zone only
//! - **json**: one JSON document per snapshot, for piping into other tools
//!
//! Rendering functions return strings so they can be tested without a terminal;
//! the `draw_*` helpers print them.

use crate::directory::CountryRecord;
use crate::{Snapshot, ZoneReading};

/// Render a snapshot as aligned rows, one per zone.
pub fn render_card(snapshot: &Snapshot) -> Vec<String> {
    if snapshot.readings.is_empty() {
        return vec!["(no zones selected)".to_string()];
    }

    let label_width = snapshot
        .readings
        .iter()
        .map(|r| r.label.chars().count())
        .max()
        .unwrap_or(0);
    let time_width = snapshot
        .readings
        .iter()
        .map(|r| r.reading.time.len())
        .max()
        .unwrap_or(0);

    snapshot
        .readings
        .iter()
        .map(|r| {
            let row = format!(
                "{:<lw$}  {:>tw$}",
                r.label,
                r.reading.time,
                lw = label_width,
                tw = time_width
            );
            match &r.reading.date {
                Some(date) => format!("{}  {}", row, date),
                None => row,
            }
        })
        .collect()
}

/// `Label: time`, the one-line view.
pub fn render_inline(reading: &ZoneReading) -> String {
    format!("{}: {}", reading.label, reading.reading.time)
}

/// Directory records as `Country  Region/City` rows.
pub fn render_directory(records: &[CountryRecord]) -> Vec<String> {
    let width = records
        .iter()
        .map(|c| c.country.chars().count())
        .max()
        .unwrap_or(0);
    records
        .iter()
        .map(|c| format!("{:<width$}  {}", c.country, c.tz, width = width))
        .collect()
}

pub fn render_json(snapshot: &Snapshot) -> serde_json::Result<String> {
    serde_json::to_string(snapshot)
}

/// Print the card view to stdout, separated from the previous frame by a blank line.
pub fn draw_ascii(snapshot: &Snapshot) {
    println!();
    for line in render_card(snapshot) {
        println!("{}", line);
    }
}
