use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Generated report as stored
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Report {
    pub id: i64,
    pub content: String,
    pub summary: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}
