//! Persistence layer: optional PostgreSQL mirror of the reading logs.
//!
//! The in-memory [`crate::domain::ReadingLog`] is authoritative for all
//! queries; when persistence is enabled, appends write through to
//! Postgres and the logs are rehydrated from it at startup.

pub mod models;
pub mod postgres;

pub use postgres::PostgresReadingStore;
