//! DTOs for the simulated payment endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::service::PaymentReceipt;

/// Request body for `POST /payments`.
///
/// `amount` accepts either a JSON number or a numeric string; anything
/// else is rejected as a validation failure.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentRequest {
    /// Payment method label, e.g. `"Kaspi"` or `"PayPal"`.
    #[serde(default)]
    pub method: Option<String>,
    /// Amount to "pay". Number or numeric string.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub amount: Option<serde_json::Value>,
}

/// Response body for `POST /payments`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentResponse {
    /// Always `true` once validation passed; this endpoint is a stub.
    pub success: bool,
    /// Human-readable confirmation message.
    pub message: String,
    /// Server-generated receipt identifier.
    pub payment_id: Uuid,
    /// Payment method echoed from the request.
    pub method: String,
    /// Amount echoed from the request.
    pub amount: f64,
    /// Server timestamp of the simulated confirmation.
    pub timestamp: DateTime<Utc>,
}

impl From<PaymentReceipt> for PaymentResponse {
    fn from(receipt: PaymentReceipt) -> Self {
        Self {
            success: receipt.accepted,
            message: receipt.message,
            payment_id: receipt.payment_id,
            method: receipt.method,
            amount: receipt.amount,
            timestamp: receipt.timestamp,
        }
    }
}
