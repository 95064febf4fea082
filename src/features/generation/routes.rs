use axum::{routing::post, Router};
use std::sync::Arc;

use crate::features::generation::{handlers, services::GenerationService};

/// Debug routes that trigger generators on demand
pub fn routes(service: Arc<GenerationService>) -> Router {
    Router::new()
        .route(
            "/api/debug/generate/report",
            post(handlers::generate_report),
        )
        .route(
            "/api/debug/generate/activity",
            post(handlers::generate_activity),
        )
        .route("/api/debug/generate/tips", post(handlers::generate_tips))
        .route("/api/debug/generate/todos", post(handlers::generate_todos))
        .route(
            "/api/debug/generate/{category}/custom",
            post(handlers::generate_with_custom_prompts),
        )
        .with_state(service)
}
