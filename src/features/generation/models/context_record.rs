use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Processed context row fed into generation prompts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct ContextRecord {
    pub id: i64,
    pub context_type: String,
    pub title: Option<String>,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}
