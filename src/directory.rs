//! # Country Directory
//!
//! Static reference table mapping a country to one representative IANA zone.
//! Countries spanning several zones are pinned to their main business hub.
//! The table never changes after start-up, so it is shared freely across threads.

use serde::Serialize;

/// One country and the zone it is displayed with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CountryRecord {
    pub country: &'static str,
    pub tz: &'static str,
}

const fn record(country: &'static str, tz: &'static str) -> CountryRecord {
    CountryRecord { country, tz }
}

/// Canonical directory order. Search results keep this order.
static COUNTRIES: [CountryRecord; 32] = [
    record("Nigeria", "Africa/Lagos"),
    record("United Kingdom", "Europe/London"),
    record("United States", "America/New_York"),
    record("Canada", "America/Toronto"),
    record("Brazil", "America/Sao_Paulo"),
    record("South Africa", "Africa/Johannesburg"),
    record("Ghana", "Africa/Accra"),
    record("Kenya", "Africa/Nairobi"),
    record("Egypt", "Africa/Cairo"),
    record("UAE", "Asia/Dubai"),
    record("India", "Asia/Kolkata"),
    record("China", "Asia/Shanghai"),
    record("Singapore", "Asia/Singapore"),
    record("Japan", "Asia/Tokyo"),
    record("Australia", "Australia/Sydney"),
    record("New Zealand", "Pacific/Auckland"),
    record("Germany", "Europe/Berlin"),
    record("France", "Europe/Paris"),
    record("Spain", "Europe/Madrid"),
    record("Italy", "Europe/Rome"),
    record("Netherlands", "Europe/Amsterdam"),
    record("Sweden", "Europe/Stockholm"),
    record("Norway", "Europe/Oslo"),
    record("Turkey", "Europe/Istanbul"),
    record("Saudi Arabia", "Asia/Riyadh"),
    record("Pakistan", "Asia/Karachi"),
    record("Bangladesh", "Asia/Dhaka"),
    record("Indonesia", "Asia/Jakarta"),
    record("Philippines", "Asia/Manila"),
    record("Mexico", "America/Mexico_City"),
    record("Argentina", "America/Argentina/Buenos_Aires"),
    record("Chile", "America/Santiago"),
];

/// Read-only view over the country table.
#[derive(Clone, Copy, Debug, Default)]
pub struct CountryDirectory;

impl CountryDirectory {
    pub fn new() -> Self {
        Self
    }

    /// Every record, in canonical order.
    pub fn all(&self) -> &'static [CountryRecord] {
        &COUNTRIES
    }

    /// Case-insensitive substring search over country names and zone identifiers.
    ///
    /// A blank query returns the whole directory unfiltered.
    ///
    /// # Example
    /// ```
    /// use world_clock_lib::directory::CountryDirectory;
    ///
    /// let hits = CountryDirectory::new().search("nig");
    /// assert_eq!(hits[0].tz, "Africa/Lagos");
    /// ```
    pub fn search(&self, query: &str) -> Vec<CountryRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return COUNTRIES.to_vec();
        }

        COUNTRIES
            .iter()
            .filter(|c| {
                c.country.to_lowercase().contains(&needle) || c.tz.to_lowercase().contains(&needle)
            })
            .copied()
            .collect()
    }

    /// Exact, case-insensitive lookup by country name.
    pub fn lookup(&self, country: &str) -> Option<CountryRecord> {
        let wanted = country.trim();
        COUNTRIES
            .iter()
            .find(|c| c.country.eq_ignore_ascii_case(wanted))
            .copied()
    }
}
