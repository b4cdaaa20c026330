//! DTOs for the live-usage daily series report.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::service::DailySeriesReport;

/// Query parameters for `GET /usage`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct UsageParams {
    /// Trailing window size in days. Defaults to 30.
    #[serde(default = "default_days")]
    pub days: i64,
}

fn default_days() -> i64 {
    30
}

/// Response body for `GET /usage`.
///
/// `dates` and `liters` are parallel arrays over days that have
/// readings; days without readings are absent rather than zero-filled.
#[derive(Debug, Serialize, ToSchema)]
pub struct UsageSeriesResponse {
    /// Calendar dates (UTC) with readings, ascending.
    pub dates: Vec<NaiveDate>,
    /// Per-day volume totals parallel to `dates`, 2-decimal rounded.
    pub liters: Vec<f64>,
    /// Today's total volume, 2-decimal rounded.
    pub today_liters: f64,
    /// Today's cost, 4-decimal rounded.
    pub today_cost: f64,
    /// Total volume over the entire stored series, 2-decimal rounded.
    pub total_liters: f64,
    /// Total cost over the entire stored series, 4-decimal rounded.
    pub total_cost: f64,
    /// Mean of daily totals over the trailing 7 days with data,
    /// 2-decimal rounded.
    #[serde(rename = "avg_7days")]
    pub avg_7_days: f64,
    /// Configured price per liter.
    pub cost_per_liter: f64,
}

impl From<DailySeriesReport> for UsageSeriesResponse {
    fn from(report: DailySeriesReport) -> Self {
        let (dates, liters) = report
            .days
            .iter()
            .map(|b| (b.date, b.liters))
            .unzip();
        Self {
            dates,
            liters,
            today_liters: report.today_liters,
            today_cost: report.today_cost,
            total_liters: report.total_liters,
            total_cost: report.total_cost,
            avg_7_days: report.avg_7_days,
            cost_per_liter: report.price_per_liter,
        }
    }
}
