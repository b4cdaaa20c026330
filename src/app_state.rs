//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::MeterService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Meter service for all business logic.
    pub meter_service: Arc<MeterService>,
}
