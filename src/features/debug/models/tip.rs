use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Tip {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
