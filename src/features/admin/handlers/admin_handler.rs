use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::admin::dtos::ClearDataDto;
use crate::features::admin::services::AdminService;
use crate::features::generation::models::GeneratedContent;
use crate::shared::types::ApiResponse;

/// Generate an activity for the last 15 minutes
#[utoipa::path(
    post,
    path = "/api/admin/generate_activity_now",
    responses(
        (status = 200, description = "Activity generated", body = ApiResponse<GeneratedContent>),
        (status = 404, description = "No content to generate activity"),
        (status = 500, description = "Generator not initialized or generation failed")
    ),
    tag = "admin",
    security(
        ("api_key" = [])
    )
)]
pub async fn generate_activity_now(
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<GeneratedContent>>> {
    let content = service.generate_activity_now().await?;
    Ok(Json(ApiResponse::success(
        Some(content),
        Some("Activity generated successfully".to_string()),
        None,
    )))
}

/// Generate a report for the last 24 hours
#[utoipa::path(
    post,
    path = "/api/admin/generate_summary_now",
    responses(
        (status = 200, description = "Report generated", body = ApiResponse<GeneratedContent>),
        (status = 404, description = "No content to generate report"),
        (status = 500, description = "Generator not initialized or generation failed")
    ),
    tag = "admin",
    security(
        ("api_key" = [])
    )
)]
pub async fn generate_summary_now(
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<GeneratedContent>>> {
    let content = service.generate_summary_now().await?;
    Ok(Json(ApiResponse::success(
        Some(content),
        Some("Report generated successfully".to_string()),
        None,
    )))
}

fn cleared(result: ClearDataDto) -> Json<ApiResponse<ClearDataDto>> {
    let message = result.message();
    Json(ApiResponse::success(Some(result), Some(message), None))
}

/// Delete all processed contexts
#[utoipa::path(
    post,
    path = "/api/admin/clear_contexts",
    responses(
        (status = 200, description = "Contexts cleared", body = ApiResponse<ClearDataDto>)
    ),
    tag = "admin",
    security(
        ("api_key" = [])
    )
)]
pub async fn clear_contexts(
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<ClearDataDto>>> {
    Ok(cleared(service.clear_contexts().await?))
}

/// Delete all activities
#[utoipa::path(
    post,
    path = "/api/admin/clear_activities",
    responses(
        (status = 200, description = "Activities cleared", body = ApiResponse<ClearDataDto>)
    ),
    tag = "admin",
    security(
        ("api_key" = [])
    )
)]
pub async fn clear_activities(
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<ClearDataDto>>> {
    Ok(cleared(service.clear_activities().await?))
}

/// Delete all processed contexts and activities
#[utoipa::path(
    post,
    path = "/api/admin/clear_all",
    responses(
        (status = 200, description = "All data cleared", body = ApiResponse<ClearDataDto>)
    ),
    tag = "admin",
    security(
        ("api_key" = [])
    )
)]
pub async fn clear_all(
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<ClearDataDto>>> {
    Ok(cleared(service.clear_all().await?))
}
