use std::sync::Arc;

use crate::features::generation::generator::ContentGenerator;
use crate::features::prompts::models::PromptCategory;
use crate::features::prompts::PromptError;

/// Holds the generator configured for each category, if any
#[derive(Default, Clone)]
pub struct ConsumptionManager {
    tip_generator: Option<Arc<dyn ContentGenerator>>,
    todo_manager: Option<Arc<dyn ContentGenerator>>,
    report_generator: Option<Arc<dyn ContentGenerator>>,
    activity_monitor: Option<Arc<dyn ContentGenerator>>,
}

impl std::fmt::Debug for ConsumptionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsumptionManager")
            .field("tip_generator", &self.tip_generator.is_some())
            .field("todo_manager", &self.todo_manager.is_some())
            .field("report_generator", &self.report_generator.is_some())
            .field("activity_monitor", &self.activity_monitor.is_some())
            .finish()
    }
}

impl ConsumptionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_generator(
        mut self,
        category: PromptCategory,
        generator: Arc<dyn ContentGenerator>,
    ) -> Self {
        let slot = match category {
            PromptCategory::Tips => &mut self.tip_generator,
            PromptCategory::Todo => &mut self.todo_manager,
            PromptCategory::Report => &mut self.report_generator,
            PromptCategory::Activity => &mut self.activity_monitor,
        };
        *slot = Some(generator);
        self
    }

    /// Generator for `category`, or an error naming the missing collaborator
    pub fn generator(
        &self,
        category: PromptCategory,
    ) -> Result<Arc<dyn ContentGenerator>, PromptError> {
        let slot = match category {
            PromptCategory::Tips => &self.tip_generator,
            PromptCategory::Todo => &self.todo_manager,
            PromptCategory::Report => &self.report_generator,
            PromptCategory::Activity => &self.activity_monitor,
        };
        match slot {
            Some(generator) => Ok(Arc::clone(generator)),
            None => Err(PromptError::UninitializedCollaborator(
                collaborator_name(category).to_string(),
            )),
        }
    }

    pub fn configured(&self) -> Vec<PromptCategory> {
        PromptCategory::ALL
            .into_iter()
            .filter(|category| self.generator(*category).is_ok())
            .collect()
    }
}

/// Display name of the collaborator behind each category
pub fn collaborator_name(category: PromptCategory) -> &'static str {
    match category {
        PromptCategory::Tips => "Tip generator",
        PromptCategory::Todo => "Todo manager",
        PromptCategory::Report => "Activity generator",
        PromptCategory::Activity => "Activity monitor",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::FixedGenerator;

    #[test]
    fn test_missing_generator_names_collaborator() {
        let manager = ConsumptionManager::new();

        let err = manager.generator(PromptCategory::Report).err();
        assert_eq!(
            err,
            Some(PromptError::UninitializedCollaborator("Activity generator".into()))
        );
        assert_eq!(
            err.map(|e| e.to_string()),
            Some("Activity generator not initialized".to_string())
        );
    }

    #[test]
    fn test_with_generator_fills_only_its_slot() {
        let manager = ConsumptionManager::new()
            .with_generator(PromptCategory::Tips, Arc::new(FixedGenerator::empty()));

        assert!(manager.generator(PromptCategory::Tips).is_ok());
        assert!(manager.generator(PromptCategory::Todo).is_err());
        assert_eq!(manager.configured(), vec![PromptCategory::Tips]);
    }
}
