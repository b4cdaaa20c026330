//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All endpoints are mounted under `/api/v1`; system routes and the
//! optional Swagger UI live at the root.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document covering every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    paths(
        handlers::readings::submit_reading,
        handlers::readings::reset_readings,
        handlers::usage::usage_series,
        handlers::consumption::monthly_consumption,
        handlers::payment::simulate_payment,
        handlers::system::health_handler,
    ),
    tags(
        (name = "Readings", description = "Sensor reading ingestion and reset"),
        (name = "Reports", description = "Consumption aggregation reports"),
        (name = "Payments", description = "Simulated payment confirmation"),
        (name = "System", description = "Health and metadata"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/docs")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}
