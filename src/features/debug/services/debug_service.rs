use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::debug::models::{Activity, ActivityRow, Report, Tip, Todo, TodoStatus};

/// Read and patch access to generated artifacts for debugging
pub struct DebugService {
    pool: PgPool,
}

impl DebugService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // REPORTS
    // =========================================================================

    pub async fn list_reports(
        &self,
        is_deleted: bool,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Report>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reports WHERE is_deleted = $1")
            .bind(is_deleted)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count reports: {:?}", e);
                AppError::Database(e)
            })?;

        let reports = sqlx::query_as::<_, Report>(
            r#"
            SELECT id, content, summary, start_time, end_time, is_deleted, created_at
            FROM reports
            WHERE is_deleted = $1
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(is_deleted)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reports: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((reports, total))
    }

    // =========================================================================
    // TODOS
    // =========================================================================

    pub async fn list_todos(
        &self,
        status: Option<TodoStatus>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Todo>, i64)> {
        let status = status.map(TodoStatus::code);

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM todos WHERE ($1::SMALLINT IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count todos: {:?}", e);
            AppError::Database(e)
        })?;

        let todos = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, batch_id, content, urgency, status, end_time, created_at
            FROM todos
            WHERE ($1::SMALLINT IS NULL OR status = $1)
            ORDER BY urgency DESC, created_at DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(status)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list todos: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((todos, total))
    }

    /// Set a todo's status. Completing stamps `end_time`; reopening clears it.
    pub async fn update_todo_status(&self, id: i64, status: TodoStatus) -> Result<()> {
        let end_time = (status == TodoStatus::Complete).then(Utc::now);

        let result = sqlx::query("UPDATE todos SET status = $1, end_time = $2 WHERE id = $3")
            .bind(status.code())
            .bind(end_time)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update todo {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Todo not found".to_string()));
        }

        tracing::info!("Todo {} status set to {:?}", id, status);
        Ok(())
    }

    // =========================================================================
    // ACTIVITIES
    // =========================================================================

    /// Activities that started at or after `start` and ended at or before `end`
    pub async fn list_activities(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Activity>, i64)> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM activities
            WHERE ($1::TIMESTAMPTZ IS NULL OR start_time >= $1)
              AND ($2::TIMESTAMPTZ IS NULL OR end_time <= $2)
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count activities: {:?}", e);
            AppError::Database(e)
        })?;

        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT id, title, description, resources, start_time, end_time, created_at
            FROM activities
            WHERE ($1::TIMESTAMPTZ IS NULL OR start_time >= $1)
              AND ($2::TIMESTAMPTZ IS NULL OR end_time <= $2)
            ORDER BY start_time DESC
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list activities: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((rows.into_iter().map(Activity::from).collect(), total))
    }

    // =========================================================================
    // TIPS
    // =========================================================================

    pub async fn list_tips(&self, offset: i64, limit: i64) -> Result<(Vec<Tip>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tips")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count tips: {:?}", e);
                AppError::Database(e)
            })?;

        let tips = sqlx::query_as::<_, Tip>(
            r#"
            SELECT id, content, created_at
            FROM tips
            ORDER BY created_at DESC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list tips: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((tips, total))
    }
}
