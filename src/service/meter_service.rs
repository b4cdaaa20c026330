//! Meter service: orchestrates reading ingestion, reports, and the
//! simulated payment stub.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use uuid::Uuid;

use crate::domain::calendar::parse_month_key;
use crate::domain::{DailyBucket, MonthWindow, Reading, ReadingLog, ReadingSeries};
use crate::error::MeterError;
use crate::persistence::PostgresReadingStore;
use crate::service::billing::{BillingCalculator, round_to};
use crate::service::fixtures::{daily_usage_fixture, monthly_meter_fixture};

/// Upper bound on the `days` window for the daily series report.
const MAX_SERIES_DAYS: i64 = 3650;

/// Live-usage report over a trailing window of days.
///
/// Every figure is recomputed from the stored readings on each call;
/// nothing is cached. All time boundaries derive from the reference
/// instant the caller passes in.
#[derive(Debug, Clone)]
pub struct DailySeriesReport {
    /// Per-day totals inside the window, ascending by date, 2-decimal
    /// rounded. Days without readings are absent.
    pub days: Vec<DailyBucket>,
    /// Total liters consumed today (UTC), 2-decimal rounded.
    pub today_liters: f64,
    /// Cost of today's consumption, 4-decimal rounded.
    pub today_cost: f64,
    /// Total liters over the entire stored series, 2-decimal rounded.
    pub total_liters: f64,
    /// Cost of the entire stored series, 4-decimal rounded.
    pub total_cost: f64,
    /// Mean of daily totals over the trailing 7 days, averaged only
    /// over days that have readings. 2-decimal rounded.
    pub avg_7_days: f64,
    /// Configured price per liter.
    pub price_per_liter: f64,
}

/// Month-scoped consumption report with billing figure.
#[derive(Debug, Clone)]
pub struct MonthlyConsumptionReport {
    /// Machine-readable `YYYY-MM` key.
    pub month_key: String,
    /// Russian month label, e.g. `"Октябрь 2025"`.
    pub display_month_ru: String,
    /// English month label, e.g. `"October 2025"`.
    pub display_month_en: String,
    /// Total liters for the month, 2-decimal rounded.
    pub liters: f64,
    /// Configured price per liter.
    pub price_per_liter: f64,
    /// Total amount for the month, 3-decimal rounded.
    pub total_amount: f64,
    /// Per-day totals, ascending by date, 2-decimal rounded.
    pub breakdown: Vec<DailyBucket>,
}

/// Receipt from the simulated payment endpoint. Always accepted; this
/// is an explicit stub with no settlement behind it.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    /// Server-generated receipt identifier.
    pub payment_id: Uuid,
    /// Always `true` once validation passed.
    pub accepted: bool,
    /// Human-readable confirmation message.
    pub message: String,
    /// Payment method echoed from the request.
    pub method: String,
    /// Amount echoed from the request.
    pub amount: f64,
    /// Server timestamp of the simulated confirmation.
    pub timestamp: DateTime<Utc>,
}

/// Orchestration layer for all meter operations.
///
/// Owns the two in-memory reading series and the billing calculator,
/// plus an optional Postgres mirror. Every query takes an explicit
/// reference instant so results are deterministic; only the HTTP
/// handlers default it to the wall clock.
#[derive(Debug)]
pub struct MeterService {
    usage: Arc<ReadingLog>,
    meter: Arc<ReadingLog>,
    billing: BillingCalculator,
    store: Option<PostgresReadingStore>,
}

impl MeterService {
    /// Creates a service with empty in-memory logs.
    #[must_use]
    pub fn new(billing: BillingCalculator, store: Option<PostgresReadingStore>) -> Self {
        Self {
            usage: Arc::new(ReadingLog::new()),
            meter: Arc::new(ReadingLog::new()),
            billing,
            store,
        }
    }

    /// Returns the billing calculator.
    #[must_use]
    pub const fn billing(&self) -> &BillingCalculator {
        &self.billing
    }

    /// Returns the live-usage reading log.
    #[must_use]
    pub fn usage_log(&self) -> &Arc<ReadingLog> {
        &self.usage
    }

    /// Returns the billing meter reading log.
    #[must_use]
    pub fn meter_log(&self) -> &Arc<ReadingLog> {
        &self.meter
    }

    /// Loads previously persisted readings into the in-memory logs.
    /// No-op when persistence is disabled.
    ///
    /// # Errors
    ///
    /// Returns [`MeterError::PersistenceError`] on database failure.
    pub async fn load_persisted(&self) -> Result<(), MeterError> {
        let Some(store) = &self.store else {
            return Ok(());
        };
        let usage = store.load_series(ReadingSeries::Usage).await?;
        let meter = store.load_series(ReadingSeries::Meter).await?;
        tracing::info!(
            usage = usage.len(),
            meter = meter.len(),
            "loaded persisted readings"
        );
        self.usage.append_many(usage).await;
        self.meter.append_many(meter).await;
        Ok(())
    }

    /// Records one sensor reading into the live-usage series.
    ///
    /// # Errors
    ///
    /// Returns [`MeterError::InvalidRequest`] for negative or
    /// non-finite volumes, or [`MeterError::PersistenceError`] if the
    /// write-through mirror fails.
    pub async fn record_reading(
        &self,
        liters: f64,
        now: DateTime<Utc>,
    ) -> Result<Reading, MeterError> {
        if !liters.is_finite() || liters < 0.0 {
            return Err(MeterError::InvalidRequest(format!(
                "liters must be a non-negative number, got {liters}"
            )));
        }
        let reading = Reading::new(now, liters);
        self.usage.append(reading).await;
        if let Some(store) = &self.store {
            store.insert(ReadingSeries::Usage, &reading).await?;
        }
        tracing::debug!(liters, ts = %reading.ts, "reading recorded");
        Ok(reading)
    }

    /// Clears the entire live-usage series. The only delete operation;
    /// individual readings are never removed.
    ///
    /// # Errors
    ///
    /// Returns [`MeterError::PersistenceError`] if clearing the mirror
    /// fails.
    pub async fn reset_usage(&self) -> Result<(), MeterError> {
        self.usage.clear().await;
        if let Some(store) = &self.store {
            store.clear_series(ReadingSeries::Usage).await?;
        }
        tracing::info!("usage series cleared");
        Ok(())
    }

    /// Live-usage report over the trailing `days` window ending at the
    /// reference instant.
    ///
    /// # Errors
    ///
    /// Returns [`MeterError::InvalidRequest`] if `days` is outside
    /// 1–3650.
    pub async fn daily_series(
        &self,
        days: i64,
        now: DateTime<Utc>,
    ) -> Result<DailySeriesReport, MeterError> {
        if !(1..=MAX_SERIES_DAYS).contains(&days) {
            return Err(MeterError::InvalidRequest(format!(
                "days must be between 1 and {MAX_SERIES_DAYS}, got {days}"
            )));
        }

        let window_start = now - Duration::days(days);
        let days_breakdown = rounded(self.usage.range_breakdown(window_start, now).await);

        let today_start = now.date_naive().and_time(NaiveTime::MIN).and_utc();
        let today_liters = round_to(self.usage.range_sum(today_start, now).await, 2);
        let total_liters = round_to(self.usage.total().await, 2);

        let week = self
            .usage
            .range_breakdown(now - Duration::days(7), now)
            .await;
        let avg_7_days = if week.is_empty() {
            0.0
        } else {
            let sum: f64 = week.iter().map(|b| b.liters).sum();
            round_to(sum / week.len() as f64, 2)
        };

        Ok(DailySeriesReport {
            days: days_breakdown,
            today_liters,
            today_cost: self.billing.live_amount(today_liters),
            total_liters,
            total_cost: self.billing.live_amount(total_liters),
            avg_7_days,
            price_per_liter: self.billing.price_per_liter(),
        })
    }

    /// Monthly consumption report over the billing meter series.
    ///
    /// `month` is an optional `"YYYY-MM"` key; when absent, the month
    /// containing the reference instant is used.
    ///
    /// # Errors
    ///
    /// Returns [`MeterError::InvalidMonth`] when the key is not two
    /// integers or the month is outside 1–12.
    pub async fn monthly_consumption(
        &self,
        month: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<MonthlyConsumptionReport, MeterError> {
        let window = match month {
            Some(raw) => {
                let (year, month) = parse_month_key(raw)?;
                MonthWindow::new(year, month)?
            }
            None => MonthWindow::containing(now)?,
        };

        let liters = round_to(self.meter.range_sum(window.start, window.end).await, 2);
        let breakdown = rounded(self.meter.range_breakdown(window.start, window.end).await);

        Ok(MonthlyConsumptionReport {
            month_key: window.key(),
            display_month_ru: window.label_ru(),
            display_month_en: window.label_en(),
            liters,
            price_per_liter: self.billing.price_per_liter(),
            total_amount: self.billing.monthly_amount(liters),
            breakdown,
        })
    }

    /// Simulated payment confirmation: pure pass-through, no
    /// settlement. Accepts any non-empty method and finite amount.
    ///
    /// # Errors
    ///
    /// Returns [`MeterError::MissingField`] for an empty method or
    /// [`MeterError::InvalidAmount`] for a non-finite amount.
    pub fn simulate_payment(
        &self,
        method: &str,
        amount: f64,
        now: DateTime<Utc>,
    ) -> Result<PaymentReceipt, MeterError> {
        if method.trim().is_empty() {
            return Err(MeterError::MissingField("method".to_string()));
        }
        if !amount.is_finite() {
            return Err(MeterError::InvalidAmount(format!("{amount}")));
        }
        let receipt = PaymentReceipt {
            payment_id: Uuid::new_v4(),
            accepted: true,
            message: "payment simulated successfully".to_string(),
            method: method.to_string(),
            amount,
            timestamp: now,
        };
        tracing::info!(payment_id = %receipt.payment_id, method, amount, "payment simulated");
        Ok(receipt)
    }

    /// Seeds deterministic demo readings into each series that is
    /// empty. Idempotent at the series level: a non-empty series is
    /// never appended to. Returns the number of readings seeded into
    /// `(usage, meter)`.
    ///
    /// # Errors
    ///
    /// Returns [`MeterError::PersistenceError`] if mirroring the
    /// seeded readings fails.
    pub async fn seed_demo_data(&self, now: DateTime<Utc>) -> Result<(usize, usize), MeterError> {
        let mut seeded = (0, 0);

        if self.usage.is_empty().await {
            let readings = daily_usage_fixture(now);
            seeded.0 = readings.len();
            if let Some(store) = &self.store {
                store.insert_many(ReadingSeries::Usage, &readings).await?;
            }
            self.usage.append_many(readings).await;
        }

        if self.meter.is_empty().await {
            let readings = monthly_meter_fixture(now);
            seeded.1 = readings.len();
            if let Some(store) = &self.store {
                store.insert_many(ReadingSeries::Meter, &readings).await?;
            }
            self.meter.append_many(readings).await;
        }

        if seeded != (0, 0) {
            tracing::info!(usage = seeded.0, meter = seeded.1, "demo readings seeded");
        }
        Ok(seeded)
    }
}

/// Rounds each bucket's volume to 2 decimals for report output.
fn rounded(buckets: Vec<DailyBucket>) -> Vec<DailyBucket> {
    buckets
        .into_iter()
        .map(|b| DailyBucket {
            date: b.date,
            liters: round_to(b.liters, 2),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        match Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).single() {
            Some(t) => t,
            None => panic!("invalid test timestamp"),
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn make_service() -> MeterService {
        MeterService::new(BillingCalculator::new(480.0), None)
    }

    #[tokio::test]
    async fn daily_series_computes_totals_and_rolling_average() {
        let service = make_service();
        let now = at(2025, 10, 15, 9);

        // Two readings today, one yesterday, one ten days ago.
        let _ = service.record_reading(5.0, at(2025, 10, 15, 6)).await;
        let _ = service.record_reading(2.5, at(2025, 10, 15, 8)).await;
        let _ = service.record_reading(10.0, at(2025, 10, 14, 12)).await;
        let _ = service.record_reading(3.0, at(2025, 10, 5, 12)).await;

        let Ok(report) = service.daily_series(30, now).await else {
            panic!("daily series failed");
        };

        assert_eq!(report.days.len(), 3);
        assert!(approx(report.today_liters, 7.5));
        assert!(approx(report.today_cost, 3.6));
        assert!(approx(report.total_liters, 20.5));
        assert!(approx(report.total_cost, 9.84));
        // Days with data in the trailing week: Oct 14 (10.0) and Oct 15 (7.5).
        assert!(approx(report.avg_7_days, 8.75));
        assert!(approx(report.price_per_liter, 0.48));
    }

    #[tokio::test]
    async fn daily_series_excludes_empty_days_from_average() {
        let service = make_service();
        let now = at(2025, 10, 15, 9);
        let _ = service.record_reading(6.0, at(2025, 10, 12, 10)).await;

        let Ok(report) = service.daily_series(30, now).await else {
            panic!("daily series failed");
        };
        // One day with data in the window; average is over 1, not 7.
        assert!(approx(report.avg_7_days, 6.0));
    }

    #[tokio::test]
    async fn daily_series_on_empty_store_is_all_zero() {
        let service = make_service();
        let Ok(report) = service.daily_series(30, at(2025, 10, 15, 9)).await else {
            panic!("daily series failed");
        };
        assert!(report.days.is_empty());
        assert!(approx(report.today_liters, 0.0));
        assert!(approx(report.total_liters, 0.0));
        assert!(approx(report.avg_7_days, 0.0));
    }

    #[tokio::test]
    async fn daily_series_rejects_out_of_range_days() {
        let service = make_service();
        let now = at(2025, 10, 15, 9);
        assert!(service.daily_series(0, now).await.is_err());
        assert!(service.daily_series(-3, now).await.is_err());
        assert!(service.daily_series(10_000, now).await.is_err());
    }

    #[tokio::test]
    async fn record_reading_rejects_negative_and_non_finite() {
        let service = make_service();
        let now = at(2025, 10, 15, 9);
        assert!(service.record_reading(-1.0, now).await.is_err());
        assert!(service.record_reading(f64::NAN, now).await.is_err());
        assert!(service.record_reading(f64::INFINITY, now).await.is_err());
        assert!(service.record_reading(0.0, now).await.is_ok());
    }

    #[tokio::test]
    async fn monthly_consumption_default_month_matches_explicit() {
        let service = make_service();
        let now = at(2025, 10, 15, 9);
        let _ = service.seed_demo_data(now).await;

        let (Ok(default), Ok(explicit)) = (
            service.monthly_consumption(None, now).await,
            service.monthly_consumption(Some("2025-10"), now).await,
        ) else {
            panic!("monthly consumption failed");
        };
        assert_eq!(default.month_key, explicit.month_key);
        assert!(approx(default.liters, explicit.liters));
        assert!(approx(default.total_amount, explicit.total_amount));
    }

    #[tokio::test]
    async fn monthly_consumption_rounds_volume_then_amount() {
        let service = make_service();
        let now = at(2025, 10, 15, 9);
        // 1500 L in October.
        service
            .meter_log()
            .append(Reading::new(at(2025, 10, 3, 12), 1500.0))
            .await;

        let Ok(report) = service.monthly_consumption(Some("2025-10"), now).await else {
            panic!("monthly consumption failed");
        };
        assert!(approx(report.liters, 1500.00));
        assert!(approx(report.total_amount, 720.000));
        assert_eq!(report.display_month_en, "October 2025");
        assert_eq!(report.display_month_ru, "Октябрь 2025");
        assert_eq!(report.breakdown.len(), 1);
    }

    #[tokio::test]
    async fn monthly_consumption_respects_month_boundaries() {
        let service = make_service();
        let now = at(2026, 1, 10, 9);
        let meter = service.meter_log();
        meter.append(Reading::new(at(2025, 12, 31, 23), 4.0)).await;
        meter.append(Reading::new(at(2026, 1, 1, 0), 6.0)).await;

        let (Ok(dec), Ok(jan)) = (
            service.monthly_consumption(Some("2025-12"), now).await,
            service.monthly_consumption(Some("2026-01"), now).await,
        ) else {
            panic!("monthly consumption failed");
        };
        assert!(approx(dec.liters, 4.0));
        assert!(approx(jan.liters, 6.0));
    }

    #[tokio::test]
    async fn monthly_consumption_rejects_malformed_month() {
        let service = make_service();
        let now = at(2025, 10, 15, 9);
        for raw in ["2025", "2025-13", "oops", "2025-"] {
            let result = service.monthly_consumption(Some(raw), now).await;
            assert!(
                matches!(result, Err(MeterError::InvalidMonth(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn seeding_twice_leaves_counts_unchanged() {
        let service = make_service();
        let now = at(2025, 10, 15, 9);

        let Ok((usage_first, meter_first)) = service.seed_demo_data(now).await else {
            panic!("seeding failed");
        };
        assert_eq!(usage_first, 30);
        assert!(meter_first > 0);

        let usage_count = service.usage_log().len().await;
        let meter_count = service.meter_log().len().await;

        let Ok(second) = service.seed_demo_data(now).await else {
            panic!("seeding failed");
        };
        assert_eq!(second, (0, 0));
        assert_eq!(service.usage_log().len().await, usage_count);
        assert_eq!(service.meter_log().len().await, meter_count);
    }

    #[tokio::test]
    async fn reset_then_requery_returns_empty_series() {
        let service = make_service();
        let now = at(2025, 10, 15, 9);
        let _ = service.seed_demo_data(now).await;

        let Ok(()) = service.reset_usage().await else {
            panic!("reset failed");
        };
        let Ok(report) = service.daily_series(30, now).await else {
            panic!("daily series failed");
        };
        assert!(report.days.is_empty());
        assert!(approx(report.today_liters, 0.0));
        assert!(approx(report.total_liters, 0.0));
        // The billing meter series is untouched by the usage reset.
        assert!(!service.meter_log().is_empty().await);
    }

    #[tokio::test]
    async fn repeated_queries_over_same_data_are_identical() {
        let service = make_service();
        let now = at(2025, 10, 15, 9);
        let _ = service.seed_demo_data(now).await;

        let (Ok(a), Ok(b)) = (
            service.monthly_consumption(None, now).await,
            service.monthly_consumption(None, now).await,
        ) else {
            panic!("monthly consumption failed");
        };
        assert!(approx(a.liters, b.liters));
        assert!(approx(a.total_amount, b.total_amount));
        assert_eq!(a.breakdown.len(), b.breakdown.len());
    }

    #[test]
    fn payment_stub_accepts_valid_requests() {
        let service = make_service();
        let now = at(2025, 10, 15, 9);
        let Ok(receipt) = service.simulate_payment("Kaspi", 720.0, now) else {
            panic!("payment failed");
        };
        assert!(receipt.accepted);
        assert_eq!(receipt.method, "Kaspi");
        assert!(approx(receipt.amount, 720.0));
        assert_eq!(receipt.timestamp, now);
    }

    #[test]
    fn payment_stub_rejects_empty_method_and_bad_amount() {
        let service = make_service();
        let now = at(2025, 10, 15, 9);
        assert!(matches!(
            service.simulate_payment("", 1.0, now),
            Err(MeterError::MissingField(_))
        ));
        assert!(matches!(
            service.simulate_payment("  ", 1.0, now),
            Err(MeterError::MissingField(_))
        ));
        assert!(matches!(
            service.simulate_payment("Kaspi", f64::NAN, now),
            Err(MeterError::InvalidAmount(_))
        ));
    }
}
