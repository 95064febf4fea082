use chrono::Utc;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::prompts::dtos::{
    CategoryPromptsDto, ClearPromptsResponseDto, PromptExportDto, RestorePromptsResponseDto,
    UpdatePromptsResponseDto,
};
use crate::features::prompts::models::PromptCategory;
use crate::features::prompts::registry::DefaultPromptRegistry;
use crate::features::prompts::services::PromptOverrideStore;

/// Version tag written into prompt exports
pub const EXPORT_FORMAT_VERSION: &str = "1.0";

/// Debug operations over the default prompts and their custom overrides
#[derive(Debug)]
pub struct PromptService {
    registry: Arc<DefaultPromptRegistry>,
    overrides: Arc<PromptOverrideStore>,
}

impl PromptService {
    pub fn new(registry: Arc<DefaultPromptRegistry>, overrides: Arc<PromptOverrideStore>) -> Self {
        Self {
            registry,
            overrides,
        }
    }

    /// Prompts for a category, preferring the custom override
    pub fn get_category_prompts(&self, category: &str) -> Result<CategoryPromptsDto> {
        let category = PromptOverrideStore::resolve_category(category)?;
        let path = category.canonical_path();

        let original = self.registry.get(path);
        let custom = self.overrides.get_override(path);
        let is_custom = custom.is_some();

        let prompts = custom
            .or_else(|| original.clone())
            .ok_or_else(|| {
                AppError::NotFound(format!("Prompts not found for category: {}", category))
            })?;

        Ok(CategoryPromptsDto {
            category,
            prompts: prompts.to_value(),
            original_prompts: original.map(|def| def.to_value()),
            is_custom,
            path: path.to_string(),
        })
    }

    pub fn update_category_prompts(
        &self,
        category: &str,
        prompts: Value,
    ) -> Result<UpdatePromptsResponseDto> {
        let category = PromptOverrideStore::resolve_category(category)?;
        let path = category.canonical_path();

        self.overrides.set_override(path, prompts)?;
        tracing::info!("Custom prompts updated for category {}", category);

        Ok(UpdatePromptsResponseDto {
            category,
            message: format!("Custom prompts saved for {}", category),
            path: path.to_string(),
        })
    }

    /// Drop the custom override so the category falls back to its default
    pub fn clear_category_prompts(&self, category: &str) -> Result<ClearPromptsResponseDto> {
        let category = PromptOverrideStore::resolve_category(category)?;
        let path = category.canonical_path();
        let cleared = self.overrides.clear_override(path);

        if cleared {
            tracing::info!("Custom prompts cleared for category {}", category);
        }

        Ok(ClearPromptsResponseDto {
            category,
            path: path.to_string(),
            cleared,
        })
    }

    pub fn export(&self, include_custom: bool) -> PromptExportDto {
        let prompts = self
            .overrides
            .export_overrides(&self.registry, include_custom)
            .into_iter()
            .map(|(category, definition)| {
                let value = definition
                    .map(|def| def.to_value())
                    .unwrap_or_else(|| Value::Object(Map::new()));
                (category, value)
            })
            .collect();

        PromptExportDto {
            version: EXPORT_FORMAT_VERSION.to_string(),
            timestamp: Utc::now().timestamp(),
            is_custom: include_custom && !self.overrides.is_empty(),
            prompts,
        }
    }

    /// Apply an exported prompt set as custom overrides.
    ///
    /// Unknown category keys are skipped and reported back. Empty entries
    /// (`{}`, as exported for a category without prompts) are skipped. If any
    /// other entry is malformed, nothing is applied.
    pub fn restore(&self, prompts: Map<String, Value>) -> Result<RestorePromptsResponseDto> {
        let mut entries = Vec::new();
        let mut ignored = Vec::new();

        for (key, definition) in prompts {
            match PromptCategory::resolve(&key) {
                Ok(_) if is_empty_object(&definition) => {
                    tracing::debug!("Skipping empty prompt entry for {}", key);
                }
                Ok(category) => entries.push((category, definition)),
                Err(_) => ignored.push(key),
            }
        }

        if !ignored.is_empty() {
            tracing::warn!(
                "Ignoring unknown prompt categories in restore: {:?}",
                ignored
            );
        }

        let applied = self.overrides.set_overrides(entries)?;
        tracing::info!("Restored {} custom prompt(s)", applied);

        Ok(RestorePromptsResponseDto {
            restored_count: self.overrides.len(),
            ignored,
        })
    }
}

fn is_empty_object(value: &Value) -> bool {
    matches!(value, Value::Object(fields) if fields.is_empty())
}
