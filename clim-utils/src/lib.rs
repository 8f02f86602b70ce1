//! Shared utility functions for the climate observation crates.

/// Date utility functions
pub mod dates {
    use chrono::{Duration, NaiveDate};

    /// Observation dates are stored as "YYYY-MM-DD" text.
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Length of the trailing window used for the temperature history.
    pub const YEAR_WINDOW_DAYS: i64 = 365;

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)?)
    }

    /// The date exactly 365 days before `date`.
    ///
    /// This is plain day arithmetic, so a window that spans Feb 29 ends on
    /// the same calendar day minus one.
    pub fn year_before(date: &NaiveDate) -> NaiveDate {
        *date - Duration::days(YEAR_WINDOW_DAYS)
    }

    /// Cutoff for the trailing-year window ending at `last_date`.
    ///
    /// Rows strictly after the returned date fall inside the window.
    pub fn year_window_cutoff(last_date: &str) -> anyhow::Result<String> {
        let last = parse_date(last_date)?;
        Ok(format_date(&year_before(&last)))
    }

}
