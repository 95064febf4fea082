use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Activity row as stored; `resources` is raw JSON text
#[derive(Debug, Clone, FromRow)]
pub struct ActivityRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub resources: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Activity with `resources` decoded
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Activity {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Decoded resources; null when absent or not valid JSON
    #[schema(value_type = Object, nullable)]
    pub resources: Option<Value>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<ActivityRow> for Activity {
    fn from(row: ActivityRow) -> Self {
        let resources = parse_resources(row.id, row.resources.as_deref());
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            resources,
            start_time: row.start_time,
            end_time: row.end_time,
            created_at: row.created_at,
        }
    }
}

fn parse_resources(id: i64, raw: Option<&str>) -> Option<Value> {
    let raw = raw.filter(|s| !s.trim().is_empty())?;
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Activity {} has unparseable resources: {}", id, e);
            None
        }
    }
}
