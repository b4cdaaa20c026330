//! DTOs for the monthly consumption report.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::service::MonthlyConsumptionReport;

/// Query parameters for `GET /consumption`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ConsumptionParams {
    /// Target month as `YYYY-MM`. Defaults to the current month.
    #[serde(default)]
    pub month: Option<String>,
}

/// One day of the monthly breakdown.
#[derive(Debug, Serialize, ToSchema)]
pub struct BreakdownEntry {
    /// Calendar date (UTC).
    pub date: NaiveDate,
    /// Total volume for that date, 2-decimal rounded.
    pub liters: f64,
}

/// Response body for `GET /consumption`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ConsumptionResponse {
    /// Machine-readable `YYYY-MM` key.
    pub month: String,
    /// Russian month label, e.g. `"Октябрь 2025"`.
    #[serde(rename = "displayMonth")]
    pub display_month: String,
    /// English month label, e.g. `"October 2025"`.
    #[serde(rename = "displayMonthEn")]
    pub display_month_en: String,
    /// Total volume for the month, 2-decimal rounded.
    pub liters: f64,
    /// Configured price per liter.
    pub price_per_liter: f64,
    /// Total amount for the month, 3-decimal rounded.
    pub total_amount: f64,
    /// Per-day totals, ascending by date.
    pub breakdown: Vec<BreakdownEntry>,
}

impl From<MonthlyConsumptionReport> for ConsumptionResponse {
    fn from(report: MonthlyConsumptionReport) -> Self {
        Self {
            month: report.month_key,
            display_month: report.display_month_ru,
            display_month_en: report.display_month_en,
            liters: report.liters,
            price_per_liter: report.price_per_liter,
            total_amount: report.total_amount,
            breakdown: report
                .breakdown
                .into_iter()
                .map(|b| BreakdownEntry {
                    date: b.date,
                    liters: b.liters,
                })
                .collect(),
        }
    }
}
