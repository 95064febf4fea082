use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppQuery;
use crate::features::generation::dtos::{
    ActivityWindowQuery, CustomGenerateQuery, LookbackQuery, ReportWindowQuery,
};
use crate::features::generation::models::{GeneratedContent, TimeWindow};
use crate::features::generation::services::GenerationService;
use crate::features::prompts::models::PromptCategory;
use crate::shared::constants::{
    DEFAULT_REPORT_WINDOW_SECS, DEFAULT_TIPS_LOOKBACK_MINUTES, DEFAULT_TODOS_LOOKBACK_MINUTES,
};
use crate::shared::types::ApiResponse;

fn generated(
    content: GeneratedContent,
    message: String,
) -> Result<Json<ApiResponse<GeneratedContent>>> {
    Ok(Json(ApiResponse::success(Some(content), Some(message), None)))
}

fn label(category: PromptCategory) -> &'static str {
    match category {
        PromptCategory::Tips => "Tip",
        PromptCategory::Todo => "Todos",
        PromptCategory::Report => "Report",
        PromptCategory::Activity => "Activity",
    }
}

/// Generate a report for a time range (default: last 24 hours)
#[utoipa::path(
    post,
    path = "/api/debug/generate/report",
    params(ReportWindowQuery),
    responses(
        (status = 200, description = "Report generated", body = ApiResponse<GeneratedContent>),
        (status = 404, description = "No content to generate report"),
        (status = 500, description = "Generator not initialized or generation failed")
    ),
    tag = "generation",
    security(
        ("api_key" = [])
    )
)]
pub async fn generate_report(
    State(service): State<Arc<GenerationService>>,
    AppQuery(query): AppQuery<ReportWindowQuery>,
) -> Result<Json<ApiResponse<GeneratedContent>>> {
    let window = TimeWindow::from_unix_or_default(
        query.start_time,
        query.end_time,
        DEFAULT_REPORT_WINDOW_SECS,
    );
    let content = service.generate(PromptCategory::Report, window).await?;
    generated(content, "Report generated successfully".to_string())
}

/// Generate a realtime activity summary for the last `minutes`
#[utoipa::path(
    post,
    path = "/api/debug/generate/activity",
    params(ActivityWindowQuery),
    responses(
        (status = 200, description = "Activity generated", body = ApiResponse<GeneratedContent>),
        (status = 400, description = "Invalid lookback"),
        (status = 404, description = "No content to generate activity"),
        (status = 500, description = "Generator not initialized or generation failed")
    ),
    tag = "generation",
    security(
        ("api_key" = [])
    )
)]
pub async fn generate_activity(
    State(service): State<Arc<GenerationService>>,
    AppQuery(query): AppQuery<ActivityWindowQuery>,
) -> Result<Json<ApiResponse<GeneratedContent>>> {
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let content = service
        .generate(
            PromptCategory::Activity,
            TimeWindow::last_minutes(query.minutes),
        )
        .await?;
    generated(content, "Activity generated successfully".to_string())
}

/// Generate a smart tip (default lookback: 60 minutes)
#[utoipa::path(
    post,
    path = "/api/debug/generate/tips",
    params(LookbackQuery),
    responses(
        (status = 200, description = "Tip generated", body = ApiResponse<GeneratedContent>),
        (status = 400, description = "Invalid lookback"),
        (status = 404, description = "No content to generate tip"),
        (status = 500, description = "Generator not initialized or generation failed")
    ),
    tag = "generation",
    security(
        ("api_key" = [])
    )
)]
pub async fn generate_tips(
    State(service): State<Arc<GenerationService>>,
    AppQuery(query): AppQuery<LookbackQuery>,
) -> Result<Json<ApiResponse<GeneratedContent>>> {
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let minutes = query
        .lookback_minutes
        .unwrap_or(DEFAULT_TIPS_LOOKBACK_MINUTES);
    let content = service
        .generate(PromptCategory::Tips, TimeWindow::last_minutes(minutes))
        .await?;
    generated(content, "Tip generated successfully".to_string())
}

/// Extract todos (default lookback: 30 minutes)
#[utoipa::path(
    post,
    path = "/api/debug/generate/todos",
    params(LookbackQuery),
    responses(
        (status = 200, description = "Todos generated", body = ApiResponse<GeneratedContent>),
        (status = 400, description = "Invalid lookback"),
        (status = 404, description = "No content to generate todos"),
        (status = 500, description = "Generator not initialized or generation failed")
    ),
    tag = "generation",
    security(
        ("api_key" = [])
    )
)]
pub async fn generate_todos(
    State(service): State<Arc<GenerationService>>,
    AppQuery(query): AppQuery<LookbackQuery>,
) -> Result<Json<ApiResponse<GeneratedContent>>> {
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let minutes = query
        .lookback_minutes
        .unwrap_or(DEFAULT_TODOS_LOOKBACK_MINUTES);
    let content = service
        .generate(PromptCategory::Todo, TimeWindow::last_minutes(minutes))
        .await?;
    generated(content, "Todos generated successfully".to_string())
}

/// Generate with the category's custom prompts swapped in for this call only
#[utoipa::path(
    post,
    path = "/api/debug/generate/{category}/custom",
    params(
        ("category" = String, Path, description = "One of: tips, todo, report, activity"),
        CustomGenerateQuery
    ),
    responses(
        (status = 200, description = "Content generated", body = ApiResponse<GeneratedContent>),
        (status = 400, description = "Invalid category"),
        (status = 404, description = "No content to generate"),
        (status = 500, description = "Generator not initialized or generation failed")
    ),
    tag = "generation",
    security(
        ("api_key" = [])
    )
)]
pub async fn generate_with_custom_prompts(
    State(service): State<Arc<GenerationService>>,
    Path(category): Path<String>,
    AppQuery(query): AppQuery<CustomGenerateQuery>,
) -> Result<Json<ApiResponse<GeneratedContent>>> {
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (category, content) = service
        .generate_with_custom_prompts(&category, query.into())
        .await?;
    generated(
        content,
        format!("{} generated with custom prompts", label(category)),
    )
}
