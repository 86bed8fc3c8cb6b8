pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::gallery::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Presentation core
        .route("/api/v1/panels", get(handlers::handle_list_panels))
        .route("/api/v1/panels/:id", get(handlers::handle_get_panel))
        .route(
            "/api/v1/panels/:id/similar",
            get(handlers::handle_similar_panels),
        )
        .route("/api/v1/facets", get(handlers::handle_facets))
        .route("/api/v1/layout", get(handlers::handle_layout))
        // Gallery document
        .route(
            "/api/v1/gallery/metadata",
            get(handlers::handle_metadata_report),
        )
        .route("/api/v1/gallery/reload", post(handlers::handle_reload))
        .with_state(state)
}
