//! REST API layer: route handlers, DTOs, router composition and the
//! OpenAPI document.
//!
//! Resource endpoints are mounted under `/api`; system endpoints at the
//! root.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI description of the REST surface.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "OctoPulse",
        description = "Relays GitHub star, fork and follow webhooks to a subscribed browser via Web Push."
    ),
    paths(
        handlers::settings::save_settings,
        handlers::github::list_repos,
        handlers::events::list_events,
        handlers::webhook::receive_webhook,
        handlers::system::health_handler,
    ),
    tags(
        (name = "Setup", description = "One-time setup"),
        (name = "Events", description = "Recorded notifications"),
        (name = "Webhook", description = "GitHub deliveries"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}
