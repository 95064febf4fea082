use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Admin action routes, nested under `/api/admin`
pub fn routes(admin_service: Arc<AdminService>) -> Router {
    Router::new()
        .route(
            "/generate_activity_now",
            post(handlers::generate_activity_now),
        )
        .route(
            "/generate_summary_now",
            post(handlers::generate_summary_now),
        )
        .route("/clear_contexts", post(handlers::clear_contexts))
        .route("/clear_activities", post(handlers::clear_activities))
        .route("/clear_all", post(handlers::clear_all))
        .with_state(admin_service)
}
