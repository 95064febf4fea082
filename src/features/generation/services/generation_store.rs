use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::features::generation::models::{ContextRecord, TimeWindow};

/// Upper bound on context rows pulled into one prompt
const MAX_CONTEXTS_PER_PROMPT: i64 = 200;

/// A todo item ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub content: String,
    pub urgency: i16,
}

/// An activity summary ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    pub title: String,
    pub description: String,
    /// Raw JSON text
    pub resources: Option<String>,
}

/// Persistence used by the generators: reads context, writes artifacts
#[async_trait]
pub trait GenerationStore: Send + Sync {
    async fn contexts_in_window(&self, window: TimeWindow) -> anyhow::Result<Vec<ContextRecord>>;

    async fn insert_tip(&self, content: &str) -> anyhow::Result<i64>;

    async fn insert_todos(&self, batch_id: Uuid, todos: &[NewTodo]) -> anyhow::Result<()>;

    async fn insert_activity(
        &self,
        window: TimeWindow,
        activity: &NewActivity,
    ) -> anyhow::Result<i64>;

    async fn insert_report(
        &self,
        window: TimeWindow,
        content: &str,
        summary: &str,
    ) -> anyhow::Result<i64>;
}

/// Postgres-backed [`GenerationStore`]
pub struct PgGenerationStore {
    pool: PgPool,
}

impl PgGenerationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenerationStore for PgGenerationStore {
    async fn contexts_in_window(&self, window: TimeWindow) -> anyhow::Result<Vec<ContextRecord>> {
        let records = sqlx::query_as::<_, ContextRecord>(
            r#"
            SELECT id, context_type, title, summary, created_at
            FROM processed_contexts
            WHERE created_at >= $1 AND created_at < $2
            ORDER BY created_at ASC
            LIMIT $3
            "#,
        )
        .bind(window.start)
        .bind(window.end)
        .bind(MAX_CONTEXTS_PER_PROMPT)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn insert_tip(&self, content: &str) -> anyhow::Result<i64> {
        let id: i64 = sqlx::query_scalar("INSERT INTO tips (content) VALUES ($1) RETURNING id")
            .bind(content)
            .fetch_one(&self.pool)
            .await?;

        tracing::info!("Tip stored: {}", id);
        Ok(id)
    }

    async fn insert_todos(&self, batch_id: Uuid, todos: &[NewTodo]) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;

        for todo in todos {
            sqlx::query("INSERT INTO todos (batch_id, content, urgency) VALUES ($1, $2, $3)")
                .bind(batch_id)
                .bind(&todo.content)
                .bind(todo.urgency)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        tracing::info!("Stored {} todo(s) in batch {}", todos.len(), batch_id);
        Ok(())
    }

    async fn insert_activity(
        &self,
        window: TimeWindow,
        activity: &NewActivity,
    ) -> anyhow::Result<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO activities (title, description, resources, start_time, end_time)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&activity.title)
        .bind(&activity.description)
        .bind(&activity.resources)
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("Activity stored: {}", id);
        Ok(id)
    }

    async fn insert_report(
        &self,
        window: TimeWindow,
        content: &str,
        summary: &str,
    ) -> anyhow::Result<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO reports (content, summary, start_time, end_time)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(content)
        .bind(summary)
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("Report stored: {}", id);
        Ok(id)
    }
}
