//! Append-only in-memory reading store with range aggregation.
//!
//! [`ReadingLog`] is the authoritative store for one reading series.
//! All range queries use half-open `[start, end)` intervals and group
//! by UTC calendar date. Mutations are whole-operation (append one,
//! clear all); no partial state is ever observable by other callers.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::reading::{DailyBucket, Reading};

/// Append-only log of `(timestamp, liters)` samples for one series.
///
/// # Concurrency
///
/// The inner `Vec` is protected by a [`tokio::sync::RwLock`]: reads
/// (range queries, reports) run concurrently, appends and resets are
/// serialized. Each query runs to completion against a single read of
/// the log, so identical stored data always yields identical output.
#[derive(Debug, Default)]
pub struct ReadingLog {
    readings: RwLock<Vec<Reading>>,
}

impl ReadingLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            readings: RwLock::new(Vec::new()),
        }
    }

    /// Appends one reading to the log.
    pub async fn append(&self, reading: Reading) {
        self.readings.write().await.push(reading);
    }

    /// Appends a batch of readings in order.
    pub async fn append_many(&self, batch: Vec<Reading>) {
        self.readings.write().await.extend(batch);
    }

    /// Removes every reading from the log. This is the only delete
    /// operation; individual readings are never removed.
    pub async fn clear(&self) {
        self.readings.write().await.clear();
    }

    /// Returns the number of stored readings.
    pub async fn len(&self) -> usize {
        self.readings.read().await.len()
    }

    /// Returns `true` if the log holds no readings.
    pub async fn is_empty(&self) -> bool {
        self.readings.read().await.is_empty()
    }

    /// Sum of all reading volumes in the log.
    pub async fn total(&self) -> f64 {
        self.readings.read().await.iter().map(|r| r.liters).sum()
    }

    /// Sum of reading volumes with timestamp in `[start, end)`.
    ///
    /// An empty range yields `0.0`, not an error.
    pub async fn range_sum(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
        self.readings
            .read()
            .await
            .iter()
            .filter(|r| r.ts >= start && r.ts < end)
            .map(|r| r.liters)
            .sum()
    }

    /// Per-day totals for readings with timestamp in `[start, end)`,
    /// ordered by ascending date.
    ///
    /// The grouping key is the UTC calendar date of the timestamp. Days
    /// with no readings are simply absent; callers needing a complete
    /// calendar grid must synthesize missing days themselves.
    pub async fn range_breakdown(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<DailyBucket> {
        let mut by_date: BTreeMap<chrono::NaiveDate, f64> = BTreeMap::new();
        for r in self.readings.read().await.iter() {
            if r.ts >= start && r.ts < end {
                *by_date.entry(r.date()).or_insert(0.0) += r.liters;
            }
        }
        by_date
            .into_iter()
            .map(|(date, liters)| DailyBucket { date, liters })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        match Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).single() {
            Some(t) => t,
            None => panic!("invalid test timestamp"),
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[tokio::test]
    async fn range_sum_respects_half_open_interval() {
        let log = ReadingLog::new();
        log.append(Reading::new(ts(2025, 10, 1, 0), 5.0)).await;
        log.append(Reading::new(ts(2025, 10, 2, 12), 7.0)).await;
        log.append(Reading::new(ts(2025, 10, 3, 0), 9.0)).await;

        // Start is inclusive, end is exclusive.
        let sum = log.range_sum(ts(2025, 10, 1, 0), ts(2025, 10, 3, 0)).await;
        assert!(approx(sum, 12.0));
    }

    #[tokio::test]
    async fn range_sum_over_empty_range_is_zero() {
        let log = ReadingLog::new();
        log.append(Reading::new(ts(2025, 10, 1, 0), 5.0)).await;
        let sum = log.range_sum(ts(2026, 1, 1, 0), ts(2026, 2, 1, 0)).await;
        assert!(approx(sum, 0.0));
    }

    #[tokio::test]
    async fn range_sum_is_additive_over_partitions() {
        let log = ReadingLog::new();
        for day in 1..=20 {
            log.append(Reading::new(ts(2025, 10, day, 10), f64::from(day)))
                .await;
        }

        let whole = log.range_sum(ts(2025, 10, 1, 0), ts(2025, 10, 21, 0)).await;
        let first = log.range_sum(ts(2025, 10, 1, 0), ts(2025, 10, 8, 0)).await;
        let second = log.range_sum(ts(2025, 10, 8, 0), ts(2025, 10, 15, 0)).await;
        let third = log.range_sum(ts(2025, 10, 15, 0), ts(2025, 10, 21, 0)).await;
        assert!(approx(whole, first + second + third));
    }

    #[tokio::test]
    async fn breakdown_merges_same_date_and_orders_ascending() {
        let log = ReadingLog::new();
        log.append(Reading::new(ts(2025, 10, 3, 22), 1.0)).await;
        log.append(Reading::new(ts(2025, 10, 1, 8), 2.0)).await;
        log.append(Reading::new(ts(2025, 10, 3, 6), 4.0)).await;

        let buckets = log.range_breakdown(ts(2025, 10, 1, 0), ts(2025, 11, 1, 0)).await;
        assert_eq!(buckets.len(), 2);
        let Some(first) = buckets.first() else {
            panic!("expected first bucket");
        };
        let Some(last) = buckets.last() else {
            panic!("expected last bucket");
        };
        assert_eq!(first.date.to_string(), "2025-10-01");
        assert!(approx(first.liters, 2.0));
        assert_eq!(last.date.to_string(), "2025-10-03");
        assert!(approx(last.liters, 5.0));
    }

    #[tokio::test]
    async fn breakdown_omits_days_without_readings() {
        let log = ReadingLog::new();
        log.append(Reading::new(ts(2025, 10, 1, 8), 2.0)).await;
        log.append(Reading::new(ts(2025, 10, 5, 8), 3.0)).await;

        let buckets = log.range_breakdown(ts(2025, 10, 1, 0), ts(2025, 11, 1, 0)).await;
        // No zero-filling for Oct 2-4.
        assert_eq!(buckets.len(), 2);
    }

    #[tokio::test]
    async fn clear_empties_the_log() {
        let log = ReadingLog::new();
        log.append(Reading::new(ts(2025, 10, 1, 8), 2.0)).await;
        assert_eq!(log.len().await, 1);

        log.clear().await;
        assert!(log.is_empty().await);
        assert!(approx(log.total().await, 0.0));
    }
}
