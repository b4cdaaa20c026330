//! Calendar arithmetic: month windows, leap years, and month labels.
//!
//! All boundaries are computed on the UTC calendar. Month windows are
//! built from explicit `(year, month)` arithmetic with December→January
//! rollover rather than a "last day of month" computation, so the end
//! boundary of one month is bit-identical to the start boundary of the
//! next.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::MeterError;

/// English month names indexed by month number − 1.
const MONTH_NAMES_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Russian month names indexed by month number − 1.
const MONTH_NAMES_RU: [&str; 12] = [
    "Январь",
    "Февраль",
    "Март",
    "Апрель",
    "Май",
    "Июнь",
    "Июль",
    "Август",
    "Сентябрь",
    "Октябрь",
    "Ноябрь",
    "Декабрь",
];

/// Half-open `[start, end)` window covering one calendar month (UTC).
///
/// Invariant: `end` is always the canonical first instant of the
/// following month, with the year incremented when the month is
/// December.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    /// Year of the window.
    pub year: i32,
    /// Month of the window (1–12).
    pub month: u32,
    /// First instant of the month, 00:00:00 UTC.
    pub start: DateTime<Utc>,
    /// First instant of the following month (exclusive).
    pub end: DateTime<Utc>,
}

impl MonthWindow {
    /// Builds the window for the given year and month.
    ///
    /// # Errors
    ///
    /// Returns [`MeterError::InvalidMonth`] if `month` is not in 1–12.
    pub fn new(year: i32, month: u32) -> Result<Self, MeterError> {
        let start = first_instant(year, month)?;
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let end = first_instant(next_year, next_month)?;
        Ok(Self {
            year,
            month,
            start,
            end,
        })
    }

    /// Builds the window containing the given reference instant.
    ///
    /// # Errors
    ///
    /// Returns [`MeterError::InvalidMonth`] only if the instant's
    /// calendar fields are out of range, which cannot happen for a
    /// valid [`DateTime`].
    pub fn containing(now: DateTime<Utc>) -> Result<Self, MeterError> {
        use chrono::Datelike;
        Self::new(now.year(), now.month())
    }

    /// Machine-readable `YYYY-MM` key for this window.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// English display label, e.g. `"October 2025"`.
    #[must_use]
    pub fn label_en(&self) -> String {
        format!("{} {}", month_name(&MONTH_NAMES_EN, self.month), self.year)
    }

    /// Russian display label, e.g. `"Октябрь 2025"`.
    #[must_use]
    pub fn label_ru(&self) -> String {
        format!("{} {}", month_name(&MONTH_NAMES_RU, self.month), self.year)
    }
}

/// First instant of `(year, month)` at 00:00:00 UTC.
fn first_instant(year: i32, month: u32) -> Result<DateTime<Utc>, MeterError> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .ok_or_else(|| MeterError::InvalidMonth(format!("{year:04}-{month:02}")))
}

/// Month name lookup; month is validated to 1–12 before this is called.
fn month_name(table: &'static [&'static str; 12], month: u32) -> &'static str {
    table
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

/// Parses a `"YYYY-MM"` month key into `(year, month)`.
///
/// Anything that is not exactly two `-`-separated integers with a month
/// in 1–12 is rejected; partial or malformed strings are never
/// interpreted.
///
/// # Errors
///
/// Returns [`MeterError::InvalidMonth`] on any parse failure.
pub fn parse_month_key(raw: &str) -> Result<(i32, u32), MeterError> {
    let invalid = || MeterError::InvalidMonth(format!("{raw}: use YYYY-MM"));
    let (year_part, month_part) = raw.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year_part.parse().map_err(|_| invalid())?;
    let month: u32 = month_part.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

/// Gregorian leap-year rule: divisible by 4, except centuries, except
/// multiples of 400.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `(year, month)`; `0` for an out-of-range month.
#[must_use]
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Year and month preceding `(year, month)`, rolling January back to
/// December of the previous year.
#[must_use]
pub const fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn leap_year_rule_handles_centuries() {
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
    }

    #[test]
    fn february_length_follows_leap_rule() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 4), 30);
    }

    #[test]
    fn december_window_ends_where_january_starts() {
        let (Ok(dec), Ok(jan)) = (MonthWindow::new(2025, 12), MonthWindow::new(2026, 1)) else {
            panic!("valid windows");
        };
        assert_eq!(dec.end, jan.start);
    }

    #[test]
    fn window_start_is_first_instant_of_month() {
        let Ok(w) = MonthWindow::new(2025, 10) else {
            panic!("valid window");
        };
        assert_eq!(w.start.to_rfc3339(), "2025-10-01T00:00:00+00:00");
        assert_eq!(w.end.to_rfc3339(), "2025-11-01T00:00:00+00:00");
    }

    #[test]
    fn labels_use_fixed_lookup_tables() {
        let Ok(w) = MonthWindow::new(2025, 10) else {
            panic!("valid window");
        };
        assert_eq!(w.key(), "2025-10");
        assert_eq!(w.label_en(), "October 2025");
        assert_eq!(w.label_ru(), "Октябрь 2025");
    }

    #[test]
    fn parse_month_key_accepts_valid_keys() {
        assert_eq!(parse_month_key("2025-10").ok(), Some((2025, 10)));
        assert_eq!(parse_month_key("2024-02").ok(), Some((2024, 2)));
    }

    #[test]
    fn parse_month_key_rejects_malformed_input() {
        for raw in ["2025", "2025-13", "2025-00", "abc-10", "2025-xy", ""] {
            assert!(parse_month_key(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn previous_month_rolls_january_back() {
        assert_eq!(previous_month(2025, 1), (2024, 12));
        assert_eq!(previous_month(2025, 7), (2025, 6));
    }
}
