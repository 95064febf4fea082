use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::core::middleware::API_KEY_HEADER;
use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::debug::{
    dtos as debug_dtos, handlers as debug_handlers, models as debug_models,
};
use crate::features::generation::{handlers as generation_handlers, models as generation_models};
use crate::features::prompts::{
    dtos as prompts_dtos, handlers as prompts_handlers, models as prompts_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Prompts
        prompts_handlers::get_prompts,
        prompts_handlers::update_prompts,
        prompts_handlers::clear_prompts,
        prompts_handlers::export_prompts,
        prompts_handlers::restore_prompts,
        // Generation
        generation_handlers::generate_report,
        generation_handlers::generate_activity,
        generation_handlers::generate_tips,
        generation_handlers::generate_todos,
        generation_handlers::generate_with_custom_prompts,
        // Debug storage
        debug_handlers::list_reports,
        debug_handlers::list_todos,
        debug_handlers::list_activities,
        debug_handlers::list_tips,
        debug_handlers::update_todo_status,
        // Admin
        admin_handlers::generate_activity_now,
        admin_handlers::generate_summary_now,
        admin_handlers::clear_contexts,
        admin_handlers::clear_activities,
        admin_handlers::clear_all,
    ),
    components(
        schemas(
            Meta,
            // Prompts
            prompts_models::PromptCategory,
            prompts_dtos::CategoryPromptsDto,
            prompts_dtos::UpdatePromptsResponseDto,
            prompts_dtos::ClearPromptsResponseDto,
            prompts_dtos::PromptExportDto,
            prompts_dtos::RestorePromptsDto,
            prompts_dtos::RestorePromptsResponseDto,
            ApiResponse<prompts_dtos::CategoryPromptsDto>,
            ApiResponse<prompts_dtos::UpdatePromptsResponseDto>,
            ApiResponse<prompts_dtos::ClearPromptsResponseDto>,
            ApiResponse<prompts_dtos::PromptExportDto>,
            ApiResponse<prompts_dtos::RestorePromptsResponseDto>,
            // Generation
            generation_models::GeneratedContent,
            ApiResponse<generation_models::GeneratedContent>,
            // Debug storage
            debug_models::Report,
            debug_models::Todo,
            debug_models::Activity,
            debug_models::Tip,
            debug_dtos::TodoStatusResponseDto,
            ApiResponse<Vec<debug_models::Report>>,
            ApiResponse<Vec<debug_models::Todo>>,
            ApiResponse<Vec<debug_models::Activity>>,
            ApiResponse<Vec<debug_models::Tip>>,
            ApiResponse<debug_dtos::TodoStatusResponseDto>,
            // Admin
            admin_dtos::ClearDataDto,
            ApiResponse<admin_dtos::ClearDataDto>,
        )
    ),
    tags(
        (name = "prompts", description = "Inspect, override, export and restore generation prompts"),
        (name = "generation", description = "Trigger generators on demand, optionally with custom prompts"),
        (name = "debug", description = "Stored reports, todos, activities and tips"),
        (name = "admin", description = "Maintenance actions"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "OpenContext Admin API",
        version = "0.1.0",
        description = "Debug and admin endpoints for OpenContext",
    )
)]
pub struct ApiDoc;

/// Adds the API key security scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_debug_paths() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/debug/prompts/{category}",
            "/api/debug/prompts/export",
            "/api/debug/generate/{category}/custom",
            "/api/debug/todos/{id}",
            "/api/admin/clear_all",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }

        let schemes = doc
            .components
            .map(|c| c.security_schemes)
            .unwrap_or_default();
        assert!(schemes.contains_key("api_key"));
    }

    #[test]
    fn test_swagger_info_modifier() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "T".into(),
            version: "9".into(),
            description: "D".into(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "T");
        assert_eq!(doc.info.description.as_deref(), Some("D"));
    }
}
