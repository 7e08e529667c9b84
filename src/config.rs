//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the world-clock.toml file.
//! It carries the initial display options and the zones the clock starts with.
//!
//! ```toml
//! zones = ["Asia/Tokyo", { label = "Lagos", tz = "Africa/Lagos" }]
//!
//! [display]
//! hour12 = false
//! show_seconds = true
//! show_date = true
//! ```

use crate::zone_set::default_label;
use crate::{DisplayOptions, ZoneEntry};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "world-clock.toml";

/// One configured zone: a bare identifier or an explicit label/identifier pair.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ZoneSpec {
    /// `"Europe/London"`; the label is derived from the identifier
    Name(String),
    /// `{ label = "London", tz = "Europe/London" }`
    Entry {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        tz: String,
    },
}

impl ZoneSpec {
    pub fn to_entry(&self) -> ZoneEntry {
        match self {
            ZoneSpec::Name(tz) => ZoneEntry::new(default_label(tz), tz.as_str()),
            ZoneSpec::Entry { label, tz } => {
                let label = label
                    .as_deref()
                    .filter(|l| !l.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| default_label(tz));
                ZoneEntry::new(label, tz.as_str())
            }
        }
    }
}

/// Application configuration loaded from world-clock.toml
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Zones shown at start-up, in display order. Empty means the built-in pair
    pub zones: Vec<ZoneSpec>,
    /// Initial 12/24-hour, seconds and date settings
    pub display: DisplayOptions,
}

/// Zones used when the configuration names none.
pub fn default_zones() -> Vec<ZoneEntry> {
    vec![
        ZoneEntry::new("Lagos", "Africa/Lagos"),
        ZoneEntry::new("UTC", "UTC"),
    ]
}

impl ClockConfig {
    /// Zones the engine is seeded with.
    pub fn initial_zones(&self) -> Vec<ZoneEntry> {
        if self.zones.is_empty() {
            return default_zones();
        }
        self.zones.iter().map(ZoneSpec::to_entry).collect()
    }

    /// Load configuration from world-clock.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ClockConfig>(&contents) {
                Ok(config) => {
                    info!(
                        "Loaded configuration from {} ({} zones)",
                        path.display(),
                        config.zones.len()
                    );
                    config
                }
                Err(e) => {
                    warn!("Invalid config file format in {}: {}", path.display(), e);
                    warn!("Using default configuration (Lagos, UTC)");
                    Self::default()
                }
            },
            Err(_) => {
                info!(
                    "No config file at {}, using default configuration (Lagos, UTC)",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Save current configuration to the given path
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;
        info!("Configuration saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Save current configuration to world-clock.toml
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to_path(CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ClockConfig::default();
        assert!(config.zones.is_empty());
        assert!(!config.display.hour12);
        assert!(config.display.show_seconds);
        assert!(config.display.show_date);
        assert_eq!(config.initial_zones(), default_zones());
    }

    #[test]
    fn test_mixed_zone_forms() {
        let config: ClockConfig = toml::from_str(
            r#"
            zones = [
                "America/Argentina/Buenos_Aires",
                { label = "Home", tz = "Africa/Lagos" },
                { tz = "Asia/Tokyo" },
            ]

            [display]
            hour12 = true
            "#,
        )
        .unwrap();

        assert!(config.display.hour12);
        assert!(config.display.show_seconds);
        assert_eq!(
            config.initial_zones(),
            vec![
                ZoneEntry::new("Buenos Aires", "America/Argentina/Buenos_Aires"),
                ZoneEntry::new("Home", "Africa/Lagos"),
                ZoneEntry::new("Tokyo", "Asia/Tokyo"),
            ]
        );
    }

    #[test]
    fn test_empty_zone_list_uses_defaults() {
        let config: ClockConfig = toml::from_str("zones = []").unwrap();
        assert_eq!(config.initial_zones(), default_zones());
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_file = NamedTempFile::new().unwrap();
        let config = ClockConfig {
            zones: vec![
                ZoneSpec::Name("Europe/Paris".to_string()),
                ZoneSpec::Entry {
                    label: Some("Lagos".to_string()),
                    tz: "Africa/Lagos".to_string(),
                },
            ],
            display: DisplayOptions {
                hour12: true,
                show_seconds: false,
                show_date: true,
            },
        };

        config.save_to_path(temp_file.path()).unwrap();
        let loaded = ClockConfig::load_from_path(temp_file.path());
        assert_eq!(loaded.zones, config.zones);
        assert_eq!(loaded.display, config.display);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = ClockConfig::load_from_path("/nonexistent/path");
        // Should fallback to default
        assert_eq!(config.initial_zones(), default_zones());
    }

    #[test]
    fn test_load_malformed_file() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "zones = 42").unwrap();
        let config = ClockConfig::load_from_path(temp_file.path());
        assert!(config.zones.is_empty());
    }
}
