//! PostgreSQL implementation of the reading mirror.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::models::StoredReading;
use crate::domain::{Reading, ReadingSeries};
use crate::error::MeterError;

/// PostgreSQL-backed reading store using `sqlx::PgPool`.
///
/// Acts as a durable mirror of the in-memory logs: appends write
/// through, startup loads the full series back, and a series reset
/// deletes its rows. The in-memory log stays authoritative for
/// queries.
#[derive(Debug, Clone)]
pub struct PostgresReadingStore {
    pool: PgPool,
}

impl PostgresReadingStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `readings` table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`MeterError::PersistenceError`] on database failure.
    pub async fn ensure_schema(&self) -> Result<(), MeterError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS readings (\
                id BIGSERIAL PRIMARY KEY, \
                series TEXT NOT NULL, \
                ts TIMESTAMPTZ NOT NULL, \
                liters DOUBLE PRECISION NOT NULL\
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| MeterError::PersistenceError(e.to_string()))?;

        Ok(())
    }

    /// Appends one reading to the given series.
    ///
    /// # Errors
    ///
    /// Returns a [`MeterError::PersistenceError`] on database failure.
    pub async fn insert(
        &self,
        series: ReadingSeries,
        reading: &Reading,
    ) -> Result<i64, MeterError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO readings (series, ts, liters) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(series.as_str())
        .bind(reading.ts)
        .bind(reading.liters)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| MeterError::PersistenceError(e.to_string()))?;

        Ok(id)
    }

    /// Appends a batch of readings to the given series in order.
    ///
    /// # Errors
    ///
    /// Returns a [`MeterError::PersistenceError`] on database failure.
    pub async fn insert_many(
        &self,
        series: ReadingSeries,
        readings: &[Reading],
    ) -> Result<(), MeterError> {
        for reading in readings {
            self.insert(series, reading).await?;
        }
        Ok(())
    }

    /// Loads all readings of one series in timestamp order.
    ///
    /// # Errors
    ///
    /// Returns a [`MeterError::PersistenceError`] on database failure.
    pub async fn load_series(&self, series: ReadingSeries) -> Result<Vec<Reading>, MeterError> {
        let rows = sqlx::query_as::<_, (i64, String, DateTime<Utc>, f64)>(
            "SELECT id, series, ts, liters FROM readings WHERE series = $1 \
             ORDER BY ts ASC, id ASC",
        )
        .bind(series.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| MeterError::PersistenceError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(id, series, ts, liters)| StoredReading {
                id,
                series,
                ts,
                liters,
            })
            .map(|row| Reading::from(&row))
            .collect())
    }

    /// Deletes every reading of one series, returning the row count.
    ///
    /// # Errors
    ///
    /// Returns a [`MeterError::PersistenceError`] on database failure.
    pub async fn clear_series(&self, series: ReadingSeries) -> Result<u64, MeterError> {
        let result = sqlx::query("DELETE FROM readings WHERE series = $1")
            .bind(series.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| MeterError::PersistenceError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
