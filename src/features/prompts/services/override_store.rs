//! Custom prompt overrides and the scoped swap used by generation.
//!
//! Overrides live in memory for the process lifetime. A scoped swap installs
//! the override for one canonical path into the [`DefaultPromptRegistry`],
//! runs the generation task and puts the saved default back when the
//! [`ScopedOverride`] guard drops. Dropping covers normal return, `?` errors,
//! panics and a cancelled future alike.
//!
//! Swaps on the same path are serialized by a per-path async mutex held for
//! the whole scope; different paths never contend.

use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::features::prompts::error::PromptError;
use crate::features::prompts::models::{PromptCategory, PromptDefinition};
use crate::features::prompts::registry::DefaultPromptRegistry;

pub struct PromptOverrideStore {
    overrides: RwLock<HashMap<&'static str, PromptDefinition>>,
    swap_locks: HashMap<&'static str, Arc<Mutex<()>>>,
}

impl std::fmt::Debug for PromptOverrideStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptOverrideStore")
            .field("overrides", &self.len())
            .finish()
    }
}

impl Default for PromptOverrideStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptOverrideStore {
    pub fn new() -> Self {
        let swap_locks = PromptCategory::ALL
            .into_iter()
            .map(|category| (category.canonical_path(), Arc::new(Mutex::new(()))))
            .collect();

        Self {
            overrides: RwLock::new(HashMap::new()),
            swap_locks,
        }
    }

    pub fn resolve_category(name: &str) -> Result<PromptCategory, PromptError> {
        PromptCategory::resolve(name)
    }

    pub fn get_override(&self, path: &str) -> Option<PromptDefinition> {
        self.overrides
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    /// Validate and store an override. Last write wins.
    pub fn set_override(&self, path: &str, definition: Value) -> Result<(), PromptError> {
        let key = known_path(path)?;
        let definition = PromptDefinition::try_from(definition)?;

        self.overrides
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, definition);

        tracing::debug!("Custom prompt stored for {}", key);
        Ok(())
    }

    /// Store several overrides at once. Nothing is written unless every
    /// definition is valid.
    pub fn set_overrides(
        &self,
        entries: Vec<(PromptCategory, Value)>,
    ) -> Result<usize, PromptError> {
        let validated = entries
            .into_iter()
            .map(|(category, raw)| {
                PromptDefinition::try_from(raw).map(|def| (category.canonical_path(), def))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let applied = validated.len();
        self.overrides
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(validated);

        Ok(applied)
    }

    /// Remove an override; returns whether one was present.
    pub fn clear_override(&self, path: &str) -> bool {
        self.overrides
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.overrides
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot for every category: the override when `include_custom` is set
    /// and one exists, otherwise the registry default. `None` when neither
    /// exists.
    pub fn export_overrides(
        &self,
        registry: &DefaultPromptRegistry,
        include_custom: bool,
    ) -> BTreeMap<PromptCategory, Option<PromptDefinition>> {
        PromptCategory::ALL
            .into_iter()
            .map(|category| {
                let path = category.canonical_path();
                let custom = if include_custom {
                    self.get_override(path)
                } else {
                    None
                };
                (category, custom.or_else(|| registry.get(path)))
            })
            .collect()
    }

    /// Run `task` with the override for `path` installed in `registry`.
    ///
    /// Without an override the task runs against the unmodified default.
    pub async fn with_scoped_override<F, Fut, T>(
        &self,
        path: &str,
        registry: &DefaultPromptRegistry,
        task: F,
    ) -> Result<T, PromptError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let scope = self.enter_scope(path, registry).await?;
        if !scope.is_active() {
            tracing::debug!("No custom prompt for {}, running with the default", path);
        }
        Ok(task().await)
    }

    /// Acquire the path's swap lock and install its override, if any.
    pub async fn enter_scope<'r>(
        &self,
        path: &str,
        registry: &'r DefaultPromptRegistry,
    ) -> Result<ScopedOverride<'r>, PromptError> {
        let key = known_path(path)?;
        let lock = self
            .swap_locks
            .get(key)
            .cloned()
            .ok_or_else(|| PromptError::InvalidCategory(path.to_string()))?;
        let permit = lock.lock_owned().await;

        let saved = match self.get_override(key) {
            Some(custom) => {
                let original = registry.replace(key, Some(custom))?;
                tracing::debug!("Installed custom prompt for {}", key);
                Some(original)
            }
            None => None,
        };

        Ok(ScopedOverride {
            registry,
            path: key,
            saved,
            _permit: permit,
        })
    }
}

/// Guard for an active swap. Restores the saved default on drop, before the
/// per-path lock is released.
#[must_use = "the override is reverted as soon as the guard is dropped"]
pub struct ScopedOverride<'r> {
    registry: &'r DefaultPromptRegistry,
    path: &'static str,
    /// `Some` when a swap happened; the inner value is the previous default
    saved: Option<Option<PromptDefinition>>,
    _permit: OwnedMutexGuard<()>,
}

impl ScopedOverride<'_> {
    /// Whether an override was installed for this scope
    pub fn is_active(&self) -> bool {
        self.saved.is_some()
    }
}

impl Drop for ScopedOverride<'_> {
    fn drop(&mut self) {
        if let Some(original) = self.saved.take() {
            match self.registry.replace(self.path, original) {
                Ok(_) => tracing::debug!("Restored default prompt for {}", self.path),
                Err(e) => tracing::error!("Failed to restore prompt {}: {}", self.path, e),
            }
        }
    }
}

fn known_path(path: &str) -> Result<&'static str, PromptError> {
    PromptCategory::from_canonical_path(path)
        .map(|category| category.canonical_path())
        .ok_or_else(|| PromptError::InvalidCategory(path.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    const REPORT: &str = "generation.generation_report";

    fn registry_with_report_default() -> DefaultPromptRegistry {
        let registry = DefaultPromptRegistry::builtin();
        registry
            .set(REPORT, PromptDefinition::new("default-S", "default-U"))
            .unwrap();
        registry
    }

    #[tokio::test]
    async fn test_scoped_override_installs_and_restores() {
        let registry = registry_with_report_default();
        let store = PromptOverrideStore::new();
        store
            .set_override(REPORT, json!({"system": "S", "user": "U"}))
            .unwrap();

        let seen = store
            .with_scoped_override(REPORT, &registry, || async { registry.get(REPORT) })
            .await
            .unwrap();

        assert_eq!(seen, Some(PromptDefinition::new("S", "U")));
        assert_eq!(
            registry.get(REPORT),
            Some(PromptDefinition::new("default-S", "default-U"))
        );
    }

    #[tokio::test]
    async fn test_scoped_override_restores_after_task_error() {
        let registry = registry_with_report_default();
        let store = PromptOverrideStore::new();
        store
            .set_override(REPORT, json!({"system": "S", "user": "U"}))
            .unwrap();

        let outcome: Result<(), String> = store
            .with_scoped_override(REPORT, &registry, || async {
                Err("model unavailable".to_string())
            })
            .await
            .unwrap();

        assert!(outcome.is_err());
        assert_eq!(
            registry.get(REPORT),
            Some(PromptDefinition::new("default-S", "default-U"))
        );
    }

    #[tokio::test]
    async fn test_scoped_override_restores_after_cancellation() {
        let registry = registry_with_report_default();
        let store = PromptOverrideStore::new();
        store
            .set_override(REPORT, json!({"system": "S", "user": "U"}))
            .unwrap();

        let scoped = store.with_scoped_override(REPORT, &registry, || {
            std::future::pending::<()>()
        });
        let timed_out = tokio::time::timeout(Duration::from_millis(20), scoped).await;

        assert!(timed_out.is_err());
        assert_eq!(
            registry.get(REPORT),
            Some(PromptDefinition::new("default-S", "default-U"))
        );
    }

    #[tokio::test]
    async fn test_scoped_override_restores_after_panic() {
        let registry = Arc::new(registry_with_report_default());
        let store = Arc::new(PromptOverrideStore::new());
        store
            .set_override(REPORT, json!({"system": "S", "user": "U"}))
            .unwrap();

        let crashed = {
            let store = Arc::clone(&store);
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                store
                    .with_scoped_override(REPORT, &registry, || async {
                        panic!("generator crashed")
                    })
                    .await
            })
        }
        .await;

        assert!(crashed.unwrap_err().is_panic());
        assert_eq!(
            registry.get(REPORT),
            Some(PromptDefinition::new("default-S", "default-U"))
        );

        // The path lock was released with the guard
        let next = tokio::time::timeout(
            Duration::from_millis(50),
            store.enter_scope(REPORT, &registry),
        )
        .await;
        assert!(next.is_ok());
    }

    #[tokio::test]
    async fn test_scoped_override_without_override_is_noop() {
        let registry = registry_with_report_default();
        let store = PromptOverrideStore::new();

        let scope = store.enter_scope(REPORT, &registry).await.unwrap();
        assert!(!scope.is_active());
        assert_eq!(
            registry.get(REPORT),
            Some(PromptDefinition::new("default-S", "default-U"))
        );
        drop(scope);

        assert_eq!(
            registry.get(REPORT),
            Some(PromptDefinition::new("default-S", "default-U"))
        );
    }

    #[tokio::test]
    async fn test_scoped_override_removes_entry_that_had_no_default() {
        let registry = DefaultPromptRegistry::default();
        let store = PromptOverrideStore::new();
        store
            .set_override(REPORT, json!({"system": "S", "user": "U"}))
            .unwrap();

        {
            let scope = store.enter_scope(REPORT, &registry).await.unwrap();
            assert!(scope.is_active());
            assert!(registry.get(REPORT).is_some());
        }

        assert_eq!(registry.get(REPORT), None);
    }

    #[tokio::test]
    async fn test_scoped_overrides_on_same_path_are_serialized() {
        let registry = Arc::new(registry_with_report_default());
        let store = Arc::new(PromptOverrideStore::new());
        store
            .set_override(REPORT, json!({"system": "S1", "user": "U1"}))
            .unwrap();

        let first = store.enter_scope(REPORT, &registry).await.unwrap();

        store
            .set_override(REPORT, json!({"system": "S2", "user": "U2"}))
            .unwrap();
        let second = {
            let store = Arc::clone(&store);
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                store
                    .with_scoped_override(REPORT, &registry, || async { registry.get(REPORT) })
                    .await
                    .unwrap()
            })
        };

        // The second swap waits for the first scope
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!second.is_finished());
        assert_eq!(
            registry.get(REPORT),
            Some(PromptDefinition::new("S1", "U1"))
        );

        drop(first);
        let seen = second.await.unwrap();

        assert_eq!(seen, Some(PromptDefinition::new("S2", "U2")));
        assert_eq!(
            registry.get(REPORT),
            Some(PromptDefinition::new("default-S", "default-U"))
        );
    }

    #[tokio::test]
    async fn test_scoped_overrides_on_distinct_paths_are_independent() {
        let registry = registry_with_report_default();
        let store = PromptOverrideStore::new();
        let tips = PromptCategory::Tips.canonical_path();

        let _report_scope = store.enter_scope(REPORT, &registry).await.unwrap();
        let tips_scope = tokio::time::timeout(
            Duration::from_millis(50),
            store.enter_scope(tips, &registry),
        )
        .await;

        assert!(tips_scope.is_ok());
    }

    #[test]
    fn test_set_override_rejects_missing_user() {
        let store = PromptOverrideStore::new();
        let tips = PromptCategory::resolve("tips").unwrap().canonical_path();

        let result = store.set_override(tips, json!({"system": "x"}));

        assert!(matches!(result, Err(PromptError::MalformedPrompt(_))));
        assert_eq!(store.get_override("generation.smart_tip_generation"), None);
    }

    #[test]
    fn test_set_override_rejects_template_syntax_error() {
        let store = PromptOverrideStore::new();

        let result = store.set_override(REPORT, json!({"system": "{{ unclosed", "user": "u"}));

        assert!(matches!(result, Err(PromptError::MalformedPrompt(_))));
        assert_eq!(store.get_override(REPORT), None);
    }

    #[test]
    fn test_set_override_rejects_unknown_path() {
        let store = PromptOverrideStore::new();
        let result = store.set_override("generation.bogus", json!({"system": "s", "user": "u"}));
        assert!(matches!(result, Err(PromptError::InvalidCategory(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_override_last_write_wins_and_clear() {
        let store = PromptOverrideStore::new();
        store
            .set_override(REPORT, json!({"system": "a", "user": "b"}))
            .unwrap();
        store
            .set_override(REPORT, json!({"system": "c", "user": "d"}))
            .unwrap();

        assert_eq!(
            store.get_override(REPORT),
            Some(PromptDefinition::new("c", "d"))
        );
        assert_eq!(store.len(), 1);

        assert!(store.clear_override(REPORT));
        assert!(!store.clear_override(REPORT));
        assert_eq!(store.get_override(REPORT), None);
    }

    #[test]
    fn test_set_overrides_is_all_or_nothing() {
        let store = PromptOverrideStore::new();
        let result = store.set_overrides(vec![
            (PromptCategory::Tips, json!({"system": "s", "user": "u"})),
            (PromptCategory::Todo, json!({"user": "u"})),
        ]);

        assert!(matches!(result, Err(PromptError::MalformedPrompt(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_export_toggles_between_custom_and_defaults() {
        let registry = DefaultPromptRegistry::builtin();
        let store = PromptOverrideStore::new();
        let todo = PromptCategory::Todo.canonical_path();
        store
            .set_override(todo, json!({"system": "custom-S", "user": "custom-U"}))
            .unwrap();

        let defaults = store.export_overrides(&registry, false);
        assert_eq!(defaults[&PromptCategory::Todo], registry.get(todo));

        let custom = store.export_overrides(&registry, true);
        assert_eq!(
            custom[&PromptCategory::Todo],
            Some(PromptDefinition::new("custom-S", "custom-U"))
        );
        assert_eq!(
            custom[&PromptCategory::Tips],
            registry.get(PromptCategory::Tips.canonical_path())
        );
        assert_eq!(custom.len(), 4);
    }

    #[test]
    fn test_export_keeps_categories_without_prompts() {
        let registry = DefaultPromptRegistry::default();
        let store = PromptOverrideStore::new();
        store
            .set_override(REPORT, json!({"system": "S", "user": "U"}))
            .unwrap();

        let exported = store.export_overrides(&registry, true);

        assert_eq!(exported.len(), 4);
        assert_eq!(
            exported[&PromptCategory::Report],
            Some(PromptDefinition::new("S", "U"))
        );
        assert_eq!(exported[&PromptCategory::Tips], None);
    }
}
