//! Monthly consumption report handler.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{ConsumptionParams, ConsumptionResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, MeterError};

/// `GET /consumption` — Month-scoped consumption and billing figure.
///
/// # Errors
///
/// Returns [`MeterError::InvalidMonth`] for a malformed `month`
/// parameter.
#[utoipa::path(
    get,
    path = "/api/v1/consumption",
    tag = "Reports",
    summary = "Monthly consumption report",
    description = "Total volume, billing amount, and daily breakdown for one calendar month of billing meter readings. Defaults to the current month.",
    params(ConsumptionParams),
    responses(
        (status = 200, description = "Monthly report", body = ConsumptionResponse),
        (status = 400, description = "Malformed month parameter", body = ErrorResponse),
    )
)]
pub async fn monthly_consumption(
    State(state): State<AppState>,
    Query(params): Query<ConsumptionParams>,
) -> Result<impl IntoResponse, MeterError> {
    let report = state
        .meter_service
        .monthly_consumption(params.month.as_deref(), Utc::now())
        .await?;
    Ok(Json(ConsumptionResponse::from(report)))
}

/// Consumption report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/consumption", get(monthly_consumption))
}
