use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::prompts::dtos::{
    CategoryPromptsDto, ClearPromptsResponseDto, ExportQueryParams, PromptExportDto,
    RestorePromptsDto, RestorePromptsResponseDto, UpdatePromptsResponseDto,
};
use crate::features::prompts::services::PromptService;
use crate::shared::types::ApiResponse;

/// Get the prompts of a category, preferring the custom override
#[utoipa::path(
    get,
    path = "/api/debug/prompts/{category}",
    params(
        ("category" = String, Path, description = "One of: tips, todo, report, activity")
    ),
    responses(
        (status = 200, description = "Prompts retrieved", body = ApiResponse<CategoryPromptsDto>),
        (status = 400, description = "Invalid category"),
        (status = 404, description = "No prompts for category")
    ),
    tag = "prompts",
    security(
        ("api_key" = [])
    )
)]
pub async fn get_prompts(
    State(service): State<Arc<PromptService>>,
    Path(category): Path<String>,
) -> Result<Json<ApiResponse<CategoryPromptsDto>>> {
    let prompts = service.get_category_prompts(&category)?;
    Ok(Json(ApiResponse::success(Some(prompts), None, None)))
}

/// Store custom prompts for a category
#[utoipa::path(
    post,
    path = "/api/debug/prompts/{category}",
    params(
        ("category" = String, Path, description = "One of: tips, todo, report, activity")
    ),
    request_body(content = serde_json::Value, description = "Prompt definition with `system` and `user` fields"),
    responses(
        (status = 200, description = "Prompts updated", body = ApiResponse<UpdatePromptsResponseDto>),
        (status = 400, description = "Invalid category or malformed prompt")
    ),
    tag = "prompts",
    security(
        ("api_key" = [])
    )
)]
pub async fn update_prompts(
    State(service): State<Arc<PromptService>>,
    Path(category): Path<String>,
    AppJson(prompts): AppJson<Value>,
) -> Result<Json<ApiResponse<UpdatePromptsResponseDto>>> {
    let updated = service.update_category_prompts(&category, prompts)?;
    Ok(Json(ApiResponse::success(
        Some(updated),
        Some("Prompts updated successfully".to_string()),
        None,
    )))
}

/// Drop the custom prompts of a category (restore to default)
#[utoipa::path(
    delete,
    path = "/api/debug/prompts/{category}",
    params(
        ("category" = String, Path, description = "One of: tips, todo, report, activity")
    ),
    responses(
        (status = 200, description = "Override cleared", body = ApiResponse<ClearPromptsResponseDto>),
        (status = 400, description = "Invalid category")
    ),
    tag = "prompts",
    security(
        ("api_key" = [])
    )
)]
pub async fn clear_prompts(
    State(service): State<Arc<PromptService>>,
    Path(category): Path<String>,
) -> Result<Json<ApiResponse<ClearPromptsResponseDto>>> {
    let cleared = service.clear_category_prompts(&category)?;
    Ok(Json(ApiResponse::success(Some(cleared), None, None)))
}

/// Export all generation prompts
#[utoipa::path(
    get,
    path = "/api/debug/prompts/export",
    params(ExportQueryParams),
    responses(
        (status = 200, description = "Prompt export", body = ApiResponse<PromptExportDto>)
    ),
    tag = "prompts",
    security(
        ("api_key" = [])
    )
)]
pub async fn export_prompts(
    State(service): State<Arc<PromptService>>,
    AppQuery(params): AppQuery<ExportQueryParams>,
) -> Result<Json<ApiResponse<PromptExportDto>>> {
    let export = service.export(params.include_custom);
    Ok(Json(ApiResponse::success(Some(export), None, None)))
}

/// Restore prompts from an export as custom overrides
#[utoipa::path(
    post,
    path = "/api/debug/prompts/restore",
    request_body = RestorePromptsDto,
    responses(
        (status = 200, description = "Prompts restored", body = ApiResponse<RestorePromptsResponseDto>),
        (status = 400, description = "Invalid payload or malformed prompt")
    ),
    tag = "prompts",
    security(
        ("api_key" = [])
    )
)]
pub async fn restore_prompts(
    State(service): State<Arc<PromptService>>,
    AppJson(dto): AppJson<RestorePromptsDto>,
) -> Result<Json<ApiResponse<RestorePromptsResponseDto>>> {
    let restored = service.restore(dto.prompts)?;
    Ok(Json(ApiResponse::success(
        Some(restored),
        Some("Prompts restored successfully".to_string()),
        None,
    )))
}
