//! Simulated payment handler.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{PaymentRequest, PaymentResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, MeterError};

/// `POST /payments` — Simulate a payment confirmation.
///
/// # Errors
///
/// Returns [`MeterError::MissingField`] or [`MeterError::InvalidAmount`]
/// on validation failure.
#[utoipa::path(
    post,
    path = "/api/v1/payments",
    tag = "Payments",
    summary = "Simulate a payment",
    description = "Confirms a payment without any settlement. Accepts any non-empty method and numerically parseable amount; a stub for demo purposes.",
    request_body = PaymentRequest,
    responses(
        (status = 200, description = "Payment simulated", body = PaymentResponse),
        (status = 400, description = "Missing method or invalid amount", body = ErrorResponse),
    )
)]
pub async fn simulate_payment(
    State(state): State<AppState>,
    Json(req): Json<PaymentRequest>,
) -> Result<impl IntoResponse, MeterError> {
    let method = req
        .method
        .ok_or_else(|| MeterError::MissingField("method".to_string()))?;
    let amount = req
        .amount
        .ok_or_else(|| MeterError::MissingField("amount".to_string()))?;
    let amount = parse_amount(&amount)?;

    let receipt = state
        .meter_service
        .simulate_payment(&method, amount, Utc::now())?;
    Ok(Json(PaymentResponse::from(receipt)))
}

/// Parses the amount field from a JSON number or numeric string.
fn parse_amount(value: &serde_json::Value) -> Result<f64, MeterError> {
    match value {
        serde_json::Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| MeterError::InvalidAmount(n.to_string())),
        serde_json::Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| MeterError::InvalidAmount(s.clone())),
        other => Err(MeterError::InvalidAmount(other.to_string())),
    }
}

/// Payment routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/payments", post(simulate_payment))
}
