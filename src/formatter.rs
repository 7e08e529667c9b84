//! # Timezone Formatting
//!
//! Turns an absolute instant into the local time (and optionally date) of a zone.
//! Formatting is a pure function of its inputs: no caches, no hidden state, so two
//! calls with the same instant, zone and options always agree.
//!
//! ## Output Shape
//!
//! | options                     | time          | date              |
//! |-----------------------------|---------------|-------------------|
//! | 24-hour, seconds            | `13:05:09`    |                   |
//! | 24-hour, no seconds         | `13:05`       |                   |
//! | 12-hour, seconds            | `01:05:09 pm` |                   |
//! | `show_date`                 |               | `Sun 16 Jun 2024` |
//!
//! Timezone rules come from the IANA database compiled in by `chrono-tz`, so no
//! lookup ever touches the network or the filesystem.

use crate::{ClockError, DisplayOptions, FormattedReading};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

const TIME_24: &str = "%H:%M:%S";
const TIME_24_SHORT: &str = "%H:%M";
const TIME_12: &str = "%I:%M:%S %P";
const TIME_12_SHORT: &str = "%I:%M %P";
const DATE: &str = "%a %d %b %Y";

/// Resolve an identifier against the timezone database.
///
/// This is the validation check used before a zone may enter a
/// [`ZoneSet`](crate::zone_set::ZoneSet).
///
/// # Example
/// ```
/// use world_clock_lib::formatter::resolve;
///
/// assert!(resolve("Europe/London").is_ok());
/// assert!(resolve("Not/AZone").is_err());
/// ```
pub fn resolve(tz: &str) -> Result<Tz, ClockError> {
    tz.parse::<Tz>()
        .map_err(|_| ClockError::InvalidTimeZone(tz.to_string()))
}

/// Format `instant` as seen from `tz`.
///
/// Fails with [`ClockError::InvalidTimeZone`] when `tz` does not resolve.
pub fn format(
    instant: DateTime<Utc>,
    tz: &str,
    options: &DisplayOptions,
) -> Result<FormattedReading, ClockError> {
    let zone = resolve(tz)?;
    Ok(format_in(instant, zone, options))
}

/// Format against an already resolved zone. Infallible.
pub fn format_in(instant: DateTime<Utc>, zone: Tz, options: &DisplayOptions) -> FormattedReading {
    let local = instant.with_timezone(&zone);

    let pattern = match (options.hour12, options.show_seconds) {
        (false, true) => TIME_24,
        (false, false) => TIME_24_SHORT,
        (true, true) => TIME_12,
        (true, false) => TIME_12_SHORT,
    };

    let date = options
        .show_date
        .then(|| local.format(DATE).to_string());

    FormattedReading {
        time: local.format(pattern).to_string(),
        date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon_utc() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 16, 12, 5, 9).unwrap()
    }

    #[test]
    fn test_24_hour_with_seconds_and_date() {
        let reading = format(noon_utc(), "Africa/Lagos", &DisplayOptions::default()).unwrap();
        assert_eq!(reading.time, "13:05:09");
        assert_eq!(reading.date.as_deref(), Some("Sun 16 Jun 2024"));
    }

    #[test]
    fn test_12_hour_uses_two_digit_hour_and_day_period() {
        let options = DisplayOptions {
            hour12: true,
            ..DisplayOptions::default()
        };
        let reading = format(noon_utc(), "America/New_York", &options).unwrap();
        assert_eq!(reading.time, "08:05:09 am");

        let reading = format(noon_utc(), "Asia/Tokyo", &options).unwrap();
        assert_eq!(reading.time, "09:05:09 pm");
    }

    #[test]
    fn test_without_seconds_or_date() {
        let options = DisplayOptions {
            hour12: false,
            show_seconds: false,
            show_date: false,
        };
        let reading = format(noon_utc(), "UTC", &options).unwrap();
        assert_eq!(reading.time, "12:05");
        assert_eq!(reading.date, None);
    }

    #[test]
    fn test_date_follows_local_calendar() {
        // Still the 16th in UTC, already the 17th in Auckland
        let late = Utc.with_ymd_and_hms(2024, 6, 16, 20, 0, 0).unwrap();
        let reading = format(late, "Pacific/Auckland", &DisplayOptions::default()).unwrap();
        assert_eq!(reading.time, "08:00:00");
        assert_eq!(reading.date.as_deref(), Some("Mon 17 Jun 2024"));
    }

    #[test]
    fn test_daylight_saving_is_applied() {
        let winter = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let summer = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
        let options = DisplayOptions::default();

        assert_eq!(format(winter, "Europe/London", &options).unwrap().time, "12:00:00");
        assert_eq!(format(summer, "Europe/London", &options).unwrap().time, "13:00:00");
    }

    #[test]
    fn test_format_is_deterministic() {
        let options = DisplayOptions::default();
        let first = format(noon_utc(), "Asia/Kolkata", &options).unwrap();
        let second = format(noon_utc(), "Asia/Kolkata", &options).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_zone_is_rejected() {
        let err = format(noon_utc(), "Not/AZone", &DisplayOptions::default()).unwrap_err();
        assert_eq!(err, ClockError::InvalidTimeZone("Not/AZone".to_string()));
    }
}
