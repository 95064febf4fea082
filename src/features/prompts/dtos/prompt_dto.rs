use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

use crate::features::prompts::models::PromptCategory;

/// Prompts of one category as seen by the debug UI
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryPromptsDto {
    pub category: PromptCategory,
    /// Active prompts: the custom override when present, else the default
    #[schema(value_type = Object)]
    pub prompts: Value,
    /// Registry default, used by the UI to restore
    #[schema(value_type = Option<Object>)]
    pub original_prompts: Option<Value>,
    pub is_custom: bool,
    /// Canonical path, e.g. `generation.generation_report`
    pub path: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpdatePromptsResponseDto {
    pub category: PromptCategory,
    pub message: String,
    pub path: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClearPromptsResponseDto {
    pub category: PromptCategory,
    pub path: String,
    /// Whether a custom override was removed
    pub cleared: bool,
}

fn default_include_custom() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ExportQueryParams {
    /// Include custom modifications (default: true)
    #[serde(default = "default_include_custom")]
    pub include_custom: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PromptExportDto {
    pub version: String,
    /// Unix timestamp (seconds) of the export
    pub timestamp: i64,
    pub is_custom: bool,
    #[schema(value_type = Object)]
    pub prompts: BTreeMap<PromptCategory, Value>,
}

/// Body of a restore request; usually a previous export
#[derive(Debug, Deserialize, ToSchema)]
pub struct RestorePromptsDto {
    #[schema(value_type = Object)]
    pub prompts: Map<String, Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestorePromptsResponseDto {
    /// Number of custom overrides active after the restore
    pub restored_count: usize,
    /// Category keys in the payload that were not recognized
    pub ignored: Vec<String>,
}
