use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::prompts::{handlers, services::PromptService};

/// Debug routes for inspecting and overriding generation prompts
pub fn routes(service: Arc<PromptService>) -> Router {
    Router::new()
        .route("/api/debug/prompts/export", get(handlers::export_prompts))
        .route(
            "/api/debug/prompts/restore",
            post(handlers::restore_prompts),
        )
        .route(
            "/api/debug/prompts/{category}",
            get(handlers::get_prompts)
                .post(handlers::update_prompts)
                .delete(handlers::clear_prompts),
        )
        .with_state(service)
}
