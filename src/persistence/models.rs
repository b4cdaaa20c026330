//! Database row models for persisted readings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Reading;

/// A stored reading row from the `readings` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredReading {
    /// Auto-increment row ID.
    pub id: i64,
    /// Series tag: `"usage"` or `"meter"`.
    pub series: String,
    /// Sample timestamp (UTC).
    pub ts: DateTime<Utc>,
    /// Measured volume in liters.
    pub liters: f64,
}

impl From<&StoredReading> for Reading {
    fn from(row: &StoredReading) -> Self {
        Self::new(row.ts, row.liters)
    }
}
