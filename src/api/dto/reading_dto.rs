//! DTOs for sensor reading ingestion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /readings` (sensor push).
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitReadingRequest {
    /// Measured volume in liters since the previous push. Non-negative.
    pub liters: f64,
}

/// Response body for `POST /readings` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadingAcceptedResponse {
    /// Volume echoed from the request.
    pub received: f64,
    /// Server-assigned sample timestamp (UTC).
    pub timestamp: DateTime<Utc>,
}
