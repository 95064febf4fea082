use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Todo status values stored in `todos.status`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum TodoStatus {
    Incomplete = 0,
    Complete = 1,
}

impl TodoStatus {
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(TodoStatus::Incomplete),
            1 => Some(TodoStatus::Complete),
            _ => None,
        }
    }

    pub fn code(self) -> i16 {
        self as i16
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Todo {
    pub id: i64,
    pub batch_id: Option<Uuid>,
    pub content: String,
    pub urgency: i16,
    /// 0 = incomplete, 1 = complete
    pub status: i16,
    /// Set when the todo was completed
    pub end_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
