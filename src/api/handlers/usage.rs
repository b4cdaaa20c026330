//! Live-usage report handler.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{UsageParams, UsageSeriesResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, MeterError};

/// `GET /usage` — Daily consumption series with running totals.
///
/// # Errors
///
/// Returns [`MeterError::InvalidRequest`] if `days` is out of range.
#[utoipa::path(
    get,
    path = "/api/v1/usage",
    tag = "Reports",
    summary = "Daily usage series",
    description = "Per-day consumption over the trailing window plus today's total, the running total, their costs, and the trailing 7-day average of daily totals.",
    params(UsageParams),
    responses(
        (status = 200, description = "Usage series", body = UsageSeriesResponse),
        (status = 400, description = "Invalid days parameter", body = ErrorResponse),
    )
)]
pub async fn usage_series(
    State(state): State<AppState>,
    Query(params): Query<UsageParams>,
) -> Result<impl IntoResponse, MeterError> {
    let report = state
        .meter_service
        .daily_series(params.days, Utc::now())
        .await?;
    Ok(Json(UsageSeriesResponse::from(report)))
}

/// Usage report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/usage", get(usage_series))
}
