//! REST endpoint handlers organized by resource.

pub mod consumption;
pub mod payment;
pub mod readings;
pub mod system;
pub mod usage;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(readings::routes())
        .merge(usage::routes())
        .merge(consumption::routes())
        .merge(payment::routes())
}
