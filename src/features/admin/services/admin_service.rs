use sqlx::PgPool;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::ClearDataDto;
use crate::features::generation::models::{GeneratedContent, TimeWindow};
use crate::features::generation::GenerationService;
use crate::features::prompts::models::PromptCategory;
use crate::shared::constants::{DEFAULT_ACTIVITY_MINUTES, DEFAULT_REPORT_WINDOW_SECS};

/// One-click maintenance actions for the admin console
pub struct AdminService {
    pool: PgPool,
    generation: Arc<GenerationService>,
}

impl AdminService {
    pub fn new(pool: PgPool, generation: Arc<GenerationService>) -> Self {
        Self { pool, generation }
    }

    /// Activity for the last 15 minutes
    pub async fn generate_activity_now(&self) -> Result<GeneratedContent> {
        let window = TimeWindow::last_minutes(DEFAULT_ACTIVITY_MINUTES);
        Ok(self
            .generation
            .generate(PromptCategory::Activity, window)
            .await?)
    }

    /// Report for the last 24 hours
    pub async fn generate_summary_now(&self) -> Result<GeneratedContent> {
        let window = TimeWindow::from_unix_or_default(None, None, DEFAULT_REPORT_WINDOW_SECS);
        Ok(self
            .generation
            .generate(PromptCategory::Report, window)
            .await?)
    }

    pub async fn clear_contexts(&self) -> Result<ClearDataDto> {
        let deleted = sqlx::query("DELETE FROM processed_contexts")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to clear processed contexts: {:?}", e);
                AppError::Database(e)
            })?
            .rows_affected();

        tracing::warn!("Cleared {} processed contexts", deleted);
        Ok(ClearDataDto {
            contexts_deleted: Some(deleted),
            ..Default::default()
        })
    }

    pub async fn clear_activities(&self) -> Result<ClearDataDto> {
        let deleted = sqlx::query("DELETE FROM activities")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to clear activities: {:?}", e);
                AppError::Database(e)
            })?
            .rows_affected();

        tracing::warn!("Cleared {} activities", deleted);
        Ok(ClearDataDto {
            activities_deleted: Some(deleted),
            ..Default::default()
        })
    }

    /// Clear contexts and activities together; nothing is deleted if either fails
    pub async fn clear_all(&self) -> Result<ClearDataDto> {
        let mut tx = self.pool.begin().await?;

        let contexts = sqlx::query("DELETE FROM processed_contexts")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let activities = sqlx::query("DELETE FROM activities")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to clear all data: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::warn!(
            "Cleared {} processed contexts and {} activities",
            contexts,
            activities
        );
        Ok(ClearDataDto {
            contexts_deleted: Some(contexts),
            activities_deleted: Some(activities),
        })
    }
}
