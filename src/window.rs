//! Rolling publication-date window arithmetic.
//!
//! The window is `[start, now)` but open-ended toward the present: an article
//! is retained iff its publication date falls on or after the window start.
//! "Now" is always injected by the caller so the filter stays deterministic
//! and testable; nothing in this module reads the wall clock.

use crate::errors::InvalidDateFormat;
use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use tracing::debug;

/// Date format delivered by listing sources in their `datetime` attributes.
const PUBLISHED_FORMAT: &str = "%Y-%m-%d";

/// Compute the first day of the window for `months_back` months.
///
/// - `months_back <= 1`: the first day of `now`'s calendar month.
/// - `months_back > 1`: the first day of `now`'s calendar month, minus
///   `months_back - 1` calendar months.
///
/// Calendar-month subtraction goes through [`chrono::Months`], which clamps
/// day-of-month the standard way; since the start is always day 1 the clamp
/// never actually fires, but year boundaries are handled for free.
pub fn window_start(months_back: u32, now: NaiveDateTime) -> NaiveDate {
    let first_of_month = now
        .date()
        .with_day(1)
        .expect("day 1 exists in every month");

    if months_back <= 1 {
        first_of_month
    } else {
        first_of_month
            .checked_sub_months(Months::new(months_back - 1))
            .unwrap_or(NaiveDate::MIN)
    }
}

/// Whether `date` falls within the last `months_back` calendar months
/// relative to `now`.
pub fn in_window(date: NaiveDate, months_back: u32, now: NaiveDateTime) -> bool {
    let start = window_start(months_back, now);
    let within = date >= start;
    debug!(%date, %start, months_back, within, "Date window check");
    within
}

/// Parse a listing row's publication date.
///
/// # Errors
///
/// Returns [`InvalidDateFormat`] when the string is not a valid
/// `YYYY-MM-DD` date. Callers downgrade this to a filter short-circuit
/// rather than a pipeline abort.
pub fn parse_published(value: &str) -> Result<NaiveDate, InvalidDateFormat> {
    NaiveDate::parse_from_str(value, PUBLISHED_FORMAT).map_err(|source| InvalidDateFormat {
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_start_current_month() {
        let now = at(2026, 8, 30);
        assert_eq!(window_start(0, now), date(2026, 8, 1));
        assert_eq!(window_start(1, now), date(2026, 8, 1));
    }

    #[test]
    fn test_window_start_looks_back() {
        let now = at(2026, 8, 30);
        assert_eq!(window_start(2, now), date(2026, 7, 1));
        assert_eq!(window_start(3, now), date(2026, 6, 1));
    }

    #[test]
    fn test_window_start_crosses_year_boundary() {
        let now = at(2026, 2, 15);
        assert_eq!(window_start(4, now), date(2025, 11, 1));
    }

    #[test]
    fn test_in_window_single_month() {
        let now = at(2026, 8, 30);
        assert!(in_window(date(2026, 8, 1), 1, now));
        assert!(in_window(date(2026, 8, 30), 1, now));
        assert!(!in_window(date(2026, 7, 31), 1, now));
    }

    #[test]
    fn test_in_window_open_toward_present() {
        // No upper bound: a date after "now" still counts.
        let now = at(2026, 8, 15);
        assert!(in_window(date(2026, 8, 20), 1, now));
    }

    #[test]
    fn test_shift_equivalence() {
        // in_window(date, k, now) == in_window(date, 1, now + (k-1) months)
        let now = at(2026, 8, 30);
        for k in 2u32..=6 {
            let shifted = now
                .checked_sub_months(Months::new(k - 1))
                .unwrap();
            for probe in [
                date(2026, 3, 1),
                date(2026, 4, 30),
                date(2026, 5, 15),
                date(2026, 8, 30),
                date(2025, 12, 31),
            ] {
                assert_eq!(
                    in_window(probe, k, now),
                    in_window(probe, 1, shifted),
                    "k = {k}, probe = {probe}"
                );
            }
        }
    }

    #[test]
    fn test_month_subtraction_clamps_day() {
        // Subtracting a month from March 31 lands on the last day of
        // February; the same arithmetic backs window_start.
        let march_31 = date(2026, 3, 31);
        assert_eq!(
            march_31.checked_sub_months(Months::new(1)).unwrap(),
            date(2026, 2, 28)
        );
    }

    #[test]
    fn test_parse_published_valid() {
        assert_eq!(parse_published("2026-08-12").unwrap(), date(2026, 8, 12));
    }

    #[test]
    fn test_parse_published_invalid() {
        let err = parse_published("12/08/2026").unwrap_err();
        assert_eq!(err.value, "12/08/2026");
        assert!(parse_published("").is_err());
        assert!(parse_published("2026-13-01").is_err());
    }
}
