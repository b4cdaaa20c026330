//! Sensor ingestion handlers: submit one reading, reset the series.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{ReadingAcceptedResponse, SubmitReadingRequest};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, MeterError};

/// `POST /readings` — Record one sensor reading.
///
/// # Errors
///
/// Returns [`MeterError::InvalidRequest`] for negative or non-finite
/// volumes.
#[utoipa::path(
    post,
    path = "/api/v1/readings",
    tag = "Readings",
    summary = "Submit a sensor reading",
    description = "Records one volumetric reading from the sensor into the live-usage series, timestamped with the server clock.",
    request_body = SubmitReadingRequest,
    responses(
        (status = 201, description = "Reading recorded", body = ReadingAcceptedResponse),
        (status = 400, description = "Invalid volume", body = ErrorResponse),
    )
)]
pub async fn submit_reading(
    State(state): State<AppState>,
    Json(req): Json<SubmitReadingRequest>,
) -> Result<impl IntoResponse, MeterError> {
    let reading = state.meter_service.record_reading(req.liters, Utc::now()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ReadingAcceptedResponse {
            received: reading.liters,
            timestamp: reading.ts,
        }),
    ))
}

/// `DELETE /readings` — Clear the live-usage series.
///
/// # Errors
///
/// Returns [`MeterError::PersistenceError`] if clearing the mirror
/// fails.
#[utoipa::path(
    delete,
    path = "/api/v1/readings",
    tag = "Readings",
    summary = "Reset the live-usage series",
    description = "Deletes every stored live-usage reading. The billing meter series is untouched.",
    responses(
        (status = 204, description = "Series cleared"),
        (status = 500, description = "Persistence failure", body = ErrorResponse),
    )
)]
pub async fn reset_readings(State(state): State<AppState>) -> Result<impl IntoResponse, MeterError> {
    state.meter_service.reset_usage().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Reading ingestion routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/readings", post(submit_reading).delete(reset_readings))
}
