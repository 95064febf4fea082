//! Default prompt registry.
//!
//! Two-level map `group -> prompt name -> PromptDefinition`, shared by the whole
//! process. Generators read their prompt from here by canonical path at call
//! time, so a scoped override installed here is picked up without changing any
//! generator signature.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use crate::features::prompts::error::PromptError;
use crate::features::prompts::models::{PromptCategory, PromptDefinition};

/// Group holding the generation prompts
pub const GENERATION_GROUP: &str = "generation";

type PromptGroups = HashMap<String, HashMap<String, PromptDefinition>>;

/// Built-in defaults, used when no prompt file is configured and to fill gaps in one.
const BUILTIN_PROMPTS: &[(PromptCategory, &str, &str)] = &[
    (
        PromptCategory::Tips,
        "You are a thoughtful personal assistant. Based on what the user has been doing, \
         offer one short, practical tip that would help them right now.",
        "Recent activity between {{ start_time }} and {{ end_time }}:\n\
         {% for ctx in contexts %}- [{{ ctx.context_type }}] {{ ctx.summary }}\n{% endfor %}\n\
         Write a single tip in two or three sentences.",
    ),
    (
        PromptCategory::Todo,
        "You extract actionable todo items from a user's recent context. \
         Only include tasks the user clearly still needs to do.",
        "Context between {{ start_time }} and {{ end_time }}:\n\
         {% for ctx in contexts %}- [{{ ctx.context_type }}] {{ ctx.summary }}\n{% endfor %}\n\
         Respond with JSON matching this schema:\n{{ json_schema }}",
    ),
    (
        PromptCategory::Report,
        "You write concise daily reports in Markdown summarizing what the user worked on, \
         key outcomes and open threads.",
        "Write a report for {{ start_time }} to {{ end_time }} from these records:\n\
         {% for ctx in contexts %}- {{ ctx.created_at }} [{{ ctx.context_type }}] {{ ctx.summary }}\n{% endfor %}",
    ),
    (
        PromptCategory::Activity,
        "You monitor the user's screen activity and describe what they are currently doing.",
        "Activity between {{ start_time }} and {{ end_time }}:\n\
         {% for ctx in contexts %}- [{{ ctx.context_type }}] {{ ctx.summary }}\n{% endfor %}\n\
         Respond with JSON matching this schema:\n{{ json_schema }}",
    ),
];

/// Process-wide registry of default prompts.
#[derive(Debug, Default)]
pub struct DefaultPromptRegistry {
    groups: RwLock<PromptGroups>,
}

impl DefaultPromptRegistry {
    pub fn new(groups: PromptGroups) -> Self {
        Self {
            groups: RwLock::new(groups),
        }
    }

    /// Registry holding only the built-in generation prompts
    pub fn builtin() -> Self {
        Self::new(builtin_groups())
    }

    /// Parse a YAML prompt document. Generation prompts missing from the
    /// document fall back to the built-in defaults.
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let loaded: PromptGroups = serde_yaml::from_str(yaml)?;

        let mut groups = builtin_groups();
        for (group, prompts) in loaded {
            groups.entry(group).or_default().extend(prompts);
        }

        Ok(Self::new(groups))
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read prompts file {}: {}", path.display(), e)
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Snapshot of one group (empty when the group does not exist)
    pub fn get_group(&self, group: &str) -> HashMap<String, PromptDefinition> {
        self.read().get(group).cloned().unwrap_or_default()
    }

    pub fn get(&self, path: &str) -> Option<PromptDefinition> {
        let (group, name) = split_path(path).ok()?;
        self.read().get(group)?.get(name).cloned()
    }

    /// Write `registry[group][name] = definition`.
    pub fn set(&self, path: &str, definition: PromptDefinition) -> Result<(), PromptError> {
        self.replace(path, Some(definition)).map(|_| ())
    }

    /// Replace the entry at `path` and return what was there before.
    /// `None` removes the entry.
    pub fn replace(
        &self,
        path: &str,
        definition: Option<PromptDefinition>,
    ) -> Result<Option<PromptDefinition>, PromptError> {
        let (group, name) = split_path(path)?;
        let mut groups = self.write();

        let previous = match definition {
            Some(definition) => groups
                .entry(group.to_string())
                .or_default()
                .insert(name.to_string(), definition),
            None => groups.get_mut(group).and_then(|prompts| prompts.remove(name)),
        };

        Ok(previous)
    }

    // A panic while holding the lock must not wedge every later request.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, PromptGroups> {
        self.groups.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, PromptGroups> {
        self.groups.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn builtin_groups() -> PromptGroups {
    let generation = BUILTIN_PROMPTS
        .iter()
        .map(|(category, system, user)| {
            (
                category.prompt_name().to_string(),
                PromptDefinition::new(*system, *user),
            )
        })
        .collect();

    HashMap::from([(GENERATION_GROUP.to_string(), generation)])
}

/// Split `group.name` into its two parts
fn split_path(path: &str) -> Result<(&str, &str), PromptError> {
    match path.split_once('.') {
        Some((group, name)) if !group.is_empty() && !name.is_empty() => Ok((group, name)),
        _ => Err(PromptError::InvalidCategory(path.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_has_all_generation_prompts() {
        let registry = DefaultPromptRegistry::builtin();
        let group = registry.get_group(GENERATION_GROUP);

        assert_eq!(group.len(), 4);
        for category in PromptCategory::ALL {
            assert!(registry.get(category.canonical_path()).is_some());
            assert!(group.contains_key(category.prompt_name()));
        }
    }

    #[test]
    fn test_replace_returns_previous_and_removes() {
        let registry = DefaultPromptRegistry::default();
        let path = "generation.generation_report";

        let previous = registry
            .replace(path, Some(PromptDefinition::new("a", "b")))
            .unwrap();
        assert_eq!(previous, None);

        let previous = registry
            .replace(path, Some(PromptDefinition::new("c", "d")))
            .unwrap();
        assert_eq!(previous, Some(PromptDefinition::new("a", "b")));

        registry.replace(path, None).unwrap();
        assert_eq!(registry.get(path), None);
    }

    #[test]
    fn test_invalid_paths_are_rejected() {
        let registry = DefaultPromptRegistry::builtin();
        assert!(registry.set("no_group", PromptDefinition::new("s", "u")).is_err());
        assert!(registry.set(".name", PromptDefinition::new("s", "u")).is_err());
        assert_eq!(registry.get("generation."), None);
        assert!(registry.get_group("missing").is_empty());
    }

    #[test]
    fn test_yaml_overrides_builtin_and_keeps_missing() {
        let yaml = r#"
generation:
  generation_report:
    system: "default-S"
    user: "default-U"
    temperature: 0.3
chat:
  greeting:
    system: "hi"
    user: "{{ name }}"
"#;
        let registry = DefaultPromptRegistry::from_yaml_str(yaml).unwrap();

        let report = registry.get("generation.generation_report").unwrap();
        assert_eq!(report.system, "default-S");
        assert_eq!(report.user, "default-U");
        assert!(report.extra.contains_key("temperature"));

        assert!(registry.get("generation.smart_tip_generation").is_some());
        assert_eq!(
            registry.get("chat.greeting"),
            Some(PromptDefinition::new("hi", "{{ name }}"))
        );
    }

    #[test]
    fn test_yaml_with_malformed_prompt_fails() {
        let yaml = "generation:\n  generation_report:\n    system: only-system\n";
        assert!(DefaultPromptRegistry::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn test_yaml_with_broken_template_fails() {
        let yaml = "generation:\n  generation_report:\n    system: \"{% for x in %}\"\n    user: u\n";
        assert!(DefaultPromptRegistry::from_yaml_str(yaml).is_err());
    }
}
