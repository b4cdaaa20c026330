//! # aquameter-gateway
//!
//! REST gateway for a smart water meter: reading ingestion,
//! consumption aggregation, and monthly billing.
//!
//! Sensors push volumetric readings over HTTP; the gateway persists
//! them as an append-only time series and derives daily/monthly
//! consumption totals and billing figures (consumption × tariff) on
//! every query. Timestamps are stored in UTC and all day/month
//! boundaries are computed on the UTC calendar.
//!
//! ## Architecture
//!
//! ```text
//! Sensor / Frontend (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── MeterService + BillingCalculator (service/)
//!     │
//!     ├── ReadingLog × 2 + calendar arithmetic (domain/)
//!     │
//!     └── PostgreSQL mirror, optional (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
