use axum::{
    routing::{get, patch},
    Router,
};
use std::sync::Arc;

use crate::features::debug::{handlers, services::DebugService};

/// Debug routes over stored reports, todos, activities and tips
pub fn routes(service: Arc<DebugService>) -> Router {
    Router::new()
        .route("/api/debug/reports", get(handlers::list_reports))
        .route("/api/debug/todos", get(handlers::list_todos))
        .route("/api/debug/todos/{id}", patch(handlers::update_todo_status))
        .route("/api/debug/activities", get(handlers::list_activities))
        .route("/api/debug/tips", get(handlers::list_tips))
        .with_state(service)
}
