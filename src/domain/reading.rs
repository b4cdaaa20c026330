//! Core reading types: a single timestamped volume sample and the
//! derived daily bucket.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped volume sample from the sensor.
///
/// Immutable once stored: created by ingestion, never mutated, and
/// deleted only by a whole-series reset. Timestamps are UTC; all day
/// and month boundaries in the gateway are computed on the UTC calendar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Instant the sample was taken (UTC).
    pub ts: DateTime<Utc>,
    /// Measured volume in liters. Non-negative.
    pub liters: f64,
}

impl Reading {
    /// Creates a new reading.
    #[must_use]
    pub const fn new(ts: DateTime<Utc>, liters: f64) -> Self {
        Self { ts, liters }
    }

    /// Returns the UTC calendar date this reading falls on.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.ts.date_naive()
    }
}

/// Sum of all readings that fall on one UTC calendar date.
///
/// Derived on demand by range queries, never stored. Two readings on
/// the same calendar date merge into one bucket regardless of
/// time of day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyBucket {
    /// The calendar date (UTC).
    pub date: NaiveDate,
    /// Total volume for that date in liters.
    pub liters: f64,
}

/// Which reading series a sample belongs to.
///
/// The gateway keeps two independent series: the live sensor stream
/// (`Usage`) that feeds the daily series report, and the billing meter
/// readings (`Meter`) that feed the monthly consumption report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadingSeries {
    /// Live sensor pushes; target of the bulk-reset operation.
    Usage,
    /// Billing meter readings queried by month window.
    Meter,
}

impl ReadingSeries {
    /// Stable string tag used as the `series` column in persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Usage => "usage",
            Self::Meter => "meter",
        }
    }
}

impl std::fmt::Display for ReadingSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
