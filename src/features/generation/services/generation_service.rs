use std::sync::Arc;

use crate::features::generation::manager::ConsumptionManager;
use crate::features::generation::models::{GeneratedContent, TimeWindow};
use crate::features::prompts::models::PromptCategory;
use crate::features::prompts::{DefaultPromptRegistry, PromptError, PromptOverrideStore};
use crate::shared::constants::{
    DEFAULT_CUSTOM_LOOKBACK_MINUTES, DEFAULT_REPORT_WINDOW_SECS, DEFAULT_TODOS_LOOKBACK_MINUTES,
    MIN_CUSTOM_REPORT_CHARS,
};

/// Window parameters accepted by generation with custom prompts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CustomWindow {
    pub lookback_minutes: Option<i64>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
}

impl CustomWindow {
    /// Reports use the explicit range (or the last day); everything else
    /// looks back from now.
    pub fn resolve(&self, category: PromptCategory) -> TimeWindow {
        match category {
            PromptCategory::Report => TimeWindow::from_unix_or_default(
                self.start_time,
                self.end_time,
                DEFAULT_REPORT_WINDOW_SECS,
            ),
            PromptCategory::Todo => {
                TimeWindow::last_minutes(self.lookback(DEFAULT_TODOS_LOOKBACK_MINUTES))
            }
            PromptCategory::Tips | PromptCategory::Activity => {
                TimeWindow::last_minutes(self.lookback(DEFAULT_CUSTOM_LOOKBACK_MINUTES))
            }
        }
    }

    // Unset means the shared default; an explicit zero means the category's own
    fn lookback(&self, when_zero: i64) -> i64 {
        match self.lookback_minutes {
            None => DEFAULT_CUSTOM_LOOKBACK_MINUTES,
            Some(0) => when_zero,
            Some(minutes) => minutes,
        }
    }
}

/// Runs generators on demand, optionally with the category's custom prompt
/// swapped into the registry.
#[derive(Debug)]
pub struct GenerationService {
    manager: ConsumptionManager,
    registry: Arc<DefaultPromptRegistry>,
    overrides: Arc<PromptOverrideStore>,
}

impl GenerationService {
    pub fn new(
        manager: ConsumptionManager,
        registry: Arc<DefaultPromptRegistry>,
        overrides: Arc<PromptOverrideStore>,
    ) -> Self {
        Self {
            manager,
            registry,
            overrides,
        }
    }

    /// Generate with the default prompts
    pub async fn generate(
        &self,
        category: PromptCategory,
        window: TimeWindow,
    ) -> Result<GeneratedContent, PromptError> {
        let generator = self.manager.generator(category)?;

        tracing::info!(
            "Generating {} for {} .. {} ({} min)",
            category,
            window.start,
            window.end,
            window.duration().num_minutes()
        );
        let outcome = generator.generate(window).await;
        into_content(category, outcome)
    }

    /// Generate with the category's custom prompt installed for the duration
    /// of the call. Without a custom prompt this is the same as [`generate`].
    ///
    /// [`generate`]: Self::generate
    pub async fn generate_with_custom_prompts(
        &self,
        category: &str,
        params: CustomWindow,
    ) -> Result<(PromptCategory, GeneratedContent), PromptError> {
        let category = PromptCategory::resolve(category)?;
        let generator = self.manager.generator(category)?;
        let window = params.resolve(category);

        tracing::info!(
            "Generating {} with custom prompts for {} .. {} ({} min)",
            category,
            window.start,
            window.end,
            window.duration().num_minutes()
        );
        let outcome = self
            .overrides
            .with_scoped_override(category.canonical_path(), &self.registry, || {
                generator.generate(window)
            })
            .await?;

        let content = into_content(category, outcome)?;
        if let GeneratedContent::Report { content: text, .. } = &content {
            if text.trim().chars().count() <= MIN_CUSTOM_REPORT_CHARS {
                return Err(no_content(category));
            }
        }

        Ok((category, content))
    }
}

fn into_content(
    category: PromptCategory,
    outcome: anyhow::Result<Option<GeneratedContent>>,
) -> Result<GeneratedContent, PromptError> {
    match outcome {
        Ok(Some(content)) => Ok(content),
        Ok(None) => {
            tracing::info!("Nothing to generate for {}", category);
            Err(no_content(category))
        }
        Err(e) => {
            tracing::error!("Generation failed for {}: {:#}", category, e);
            Err(PromptError::GenerationFailure(format!(
                "Failed to generate {}: {}",
                artifact_name(category),
                e
            )))
        }
    }
}

fn no_content(category: PromptCategory) -> PromptError {
    PromptError::NoContent(format!("No content to generate {}", artifact_name(category)))
}

fn artifact_name(category: PromptCategory) -> &'static str {
    match category {
        PromptCategory::Tips => "tip",
        PromptCategory::Todo => "todos",
        PromptCategory::Report => "report",
        PromptCategory::Activity => "activity",
    }
}
