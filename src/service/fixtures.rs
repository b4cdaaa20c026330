//! Deterministic synthetic readings for empty stores.
//!
//! Both generators are pure functions of the reference instant, so the
//! same `now` always yields the same readings. They exist to exercise
//! the aggregation and billing engine before real sensor data arrives;
//! seeding (in [`super::MeterService::seed_demo_data`]) only runs when
//! the target series is empty.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::domain::Reading;
use crate::domain::calendar::{days_in_month, previous_month};

/// 30 backdated daily readings for the live-usage series.
///
/// One reading per day, `liters = 12 + (days_ago % 8)`, most recent
/// last. Times of day mirror the reference instant.
#[must_use]
pub fn daily_usage_fixture(now: DateTime<Utc>) -> Vec<Reading> {
    let mut readings = Vec::with_capacity(30);
    for days_ago in (1..=30).rev() {
        let ts = now - Duration::days(days_ago);
        let liters = 12.0 + (days_ago % 8) as f64;
        readings.push(Reading::new(ts, liters));
    }
    readings
}

/// Meter readings for every day of the current month up to `now` and
/// every day of the previous month, at 12:00:00 UTC.
///
/// Volume formulas differ per month so the two months are visually
/// distinct in reports:
/// - current month: `3.0 + (day % 5)·1.0 + (day % 3)·0.5`
/// - previous month: `4.0 + (day % 7)·0.8`
///
/// The previous-month length comes from the Gregorian calendar
/// including the full leap-year rule. Invalid dates are skipped rather
/// than raising; with a correct month-length computation none occur.
#[must_use]
pub fn monthly_meter_fixture(now: DateTime<Utc>) -> Vec<Reading> {
    let mut readings = Vec::new();

    for day in 1..=now.day() {
        let Some(ts) = reading_instant(now.year(), now.month(), day) else {
            continue;
        };
        let liters = 3.0 + (day % 5) as f64 * 1.0 + (day % 3) as f64 * 0.5;
        readings.push(Reading::new(ts, liters));
    }

    let (prev_year, prev_month) = previous_month(now.year(), now.month());
    for day in 1..=days_in_month(prev_year, prev_month) {
        let Some(ts) = reading_instant(prev_year, prev_month, day) else {
            continue;
        };
        let liters = 4.0 + (day % 7) as f64 * 0.8;
        readings.push(Reading::new(ts, liters));
    }

    readings
}

/// Fixed meter-reading time of day: noon UTC on the given date.
fn reading_instant(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .map(|dt| dt.and_utc())
}
