//! Prompt-driven generators backed by a chat completion model.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::features::generation::generator::ContentGenerator;
use crate::features::generation::models::{summarize, GeneratedContent, TimeWindow};
use crate::features::generation::services::generation_store::{
    GenerationStore, NewActivity, NewTodo,
};
use crate::features::prompts::models::PromptCategory;
use crate::features::prompts::DefaultPromptRegistry;
use crate::modules::llm::{ChatCompletion, ChatMessage};
use crate::shared::llm::{parse_with_fallback, strip_code_fences, LlmResponse};
use crate::shared::prompts::{generation_context, render_prompt};

fn default_true() -> bool {
    true
}

/// Todo list the model is asked to return
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct TodoExtraction {
    /// Tasks the user still needs to do
    pub todos: Vec<TodoItem>,

    #[serde(default = "default_true")]
    #[schemars(skip)]
    pub is_llm_success: bool,

    #[serde(default)]
    #[schemars(skip)]
    pub llm_error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TodoItem {
    /// Short imperative description of the task
    pub content: String,
    /// 0 (low) to 3 (urgent)
    #[serde(default)]
    pub urgency: i16,
}

impl LlmResponse for TodoExtraction {
    fn mark_as_fallback(&mut self, error_message: String) {
        self.is_llm_success = false;
        self.llm_error_message = Some(error_message);
    }

    fn is_success(&self) -> bool {
        self.is_llm_success
    }
}

/// Activity summary the model is asked to return
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ActivitySummary {
    /// One-line title of what the user is doing
    pub title: String,
    /// A few sentences describing the activity
    pub description: String,
    /// Files, URLs or apps involved
    #[serde(default)]
    pub resources: Vec<String>,

    #[serde(default = "default_true")]
    #[schemars(skip)]
    pub is_llm_success: bool,

    #[serde(default)]
    #[schemars(skip)]
    pub llm_error_message: Option<String>,
}

impl LlmResponse for ActivitySummary {
    fn mark_as_fallback(&mut self, error_message: String) {
        self.is_llm_success = false;
        self.llm_error_message = Some(error_message);
    }

    fn is_success(&self) -> bool {
        self.is_llm_success
    }
}

/// Generator for one category. The prompt is looked up by the category's
/// canonical path on every call.
pub struct LlmGenerator {
    category: PromptCategory,
    registry: Arc<DefaultPromptRegistry>,
    chat: Arc<dyn ChatCompletion>,
    store: Arc<dyn GenerationStore>,
}

impl LlmGenerator {
    pub fn new(
        category: PromptCategory,
        registry: Arc<DefaultPromptRegistry>,
        chat: Arc<dyn ChatCompletion>,
        store: Arc<dyn GenerationStore>,
    ) -> Self {
        Self {
            category,
            registry,
            chat,
            store,
        }
    }

    fn json_schema(&self) -> Option<String> {
        match self.category {
            PromptCategory::Todo => Some(TodoExtraction::json_schema_string()),
            PromptCategory::Activity => Some(ActivitySummary::json_schema_string()),
            PromptCategory::Tips | PromptCategory::Report => None,
        }
    }

    async fn ask(&self, window: TimeWindow) -> anyhow::Result<Option<String>> {
        let contexts = self.store.contexts_in_window(window).await?;
        if contexts.is_empty() {
            tracing::debug!(
                "No processed contexts between {} and {} for {}",
                window.start,
                window.end,
                self.category
            );
            return Ok(None);
        }

        let path = self.category.canonical_path();
        let definition = self
            .registry
            .get(path)
            .ok_or_else(|| anyhow::anyhow!("No prompt configured at {}", path))?;

        let schema = self.json_schema();
        let ctx = generation_context(window.start, window.end, &contexts, schema.as_deref());
        let rendered = render_prompt(&definition, &ctx)?;

        let reply = self
            .chat
            .complete(vec![
                ChatMessage::system(rendered.system),
                ChatMessage::user(rendered.user),
            ])
            .await?;

        let reply = reply.trim();
        Ok((!reply.is_empty()).then(|| reply.to_string()))
    }

    async fn generate_tip(&self, reply: &str) -> anyhow::Result<Option<GeneratedContent>> {
        let tip = strip_code_fences(reply);
        if tip.is_empty() {
            return Ok(None);
        }
        let tip_id = self.store.insert_tip(&tip).await?;
        Ok(Some(GeneratedContent::Tip { tip_id }))
    }

    async fn generate_todos(&self, reply: &str) -> anyhow::Result<Option<GeneratedContent>> {
        let extraction: TodoExtraction = parse_with_fallback(reply);
        if !extraction.is_success() {
            return Ok(None);
        }

        let todos: Vec<NewTodo> = extraction
            .todos
            .into_iter()
            .filter(|item| !item.content.trim().is_empty())
            .map(|item| NewTodo {
                content: item.content.trim().to_string(),
                urgency: item.urgency.clamp(0, 3),
            })
            .collect();
        if todos.is_empty() {
            return Ok(None);
        }

        let todo_batch_id = Uuid::now_v7();
        self.store.insert_todos(todo_batch_id, &todos).await?;
        Ok(Some(GeneratedContent::Todos { todo_batch_id }))
    }

    async fn generate_activity(
        &self,
        window: TimeWindow,
        reply: &str,
    ) -> anyhow::Result<Option<GeneratedContent>> {
        let summary: ActivitySummary = parse_with_fallback(reply);
        if !summary.is_success() || summary.title.trim().is_empty() {
            return Ok(None);
        }

        let activity = NewActivity {
            title: summary.title.trim().to_string(),
            description: summary.description.trim().to_string(),
            resources: Some(serde_json::to_string(&summary.resources)?),
        };
        let activity_id = self.store.insert_activity(window, &activity).await?;

        Ok(Some(GeneratedContent::Activity {
            activity_id,
            title: activity.title,
            description: activity.description,
        }))
    }

    async fn generate_report(
        &self,
        window: TimeWindow,
        reply: &str,
    ) -> anyhow::Result<Option<GeneratedContent>> {
        let content = strip_code_fences(reply);
        if content.is_empty() {
            return Ok(None);
        }

        let summary = summarize(&content);
        self.store.insert_report(window, &content, &summary).await?;
        Ok(Some(GeneratedContent::Report { content, summary }))
    }
}

#[async_trait]
impl ContentGenerator for LlmGenerator {
    async fn generate(&self, window: TimeWindow) -> anyhow::Result<Option<GeneratedContent>> {
        let Some(reply) = self.ask(window).await? else {
            return Ok(None);
        };

        match self.category {
            PromptCategory::Tips => self.generate_tip(&reply).await,
            PromptCategory::Todo => self.generate_todos(&reply).await,
            PromptCategory::Activity => self.generate_activity(window, &reply).await,
            PromptCategory::Report => self.generate_report(window, &reply).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::prompts::models::PromptDefinition;
    use crate::features::prompts::PromptOverrideStore;
    use crate::shared::test_helpers::{sample_context, MemoryGenerationStore, ScriptedChat};
    use serde_json::json;

    fn generator(
        category: PromptCategory,
        registry: Arc<DefaultPromptRegistry>,
        chat: Arc<ScriptedChat>,
        store: Arc<MemoryGenerationStore>,
    ) -> LlmGenerator {
        LlmGenerator::new(category, registry, chat, store)
    }

    #[tokio::test]
    async fn test_no_contexts_means_no_content() {
        let chat = Arc::new(ScriptedChat::replying("unused"));
        let store = Arc::new(MemoryGenerationStore::default());
        let generator = generator(
            PromptCategory::Tips,
            Arc::new(DefaultPromptRegistry::builtin()),
            chat.clone(),
            store,
        );

        let window = TimeWindow::last_minutes(15);
        let result = generator.generate(window).await.unwrap();

        assert_eq!(result, None);
        assert!(chat.requests().is_empty());
    }

    #[tokio::test]
    async fn test_tip_is_stored() {
        let chat = Arc::new(ScriptedChat::replying("Take a short break."));
        let store = Arc::new(MemoryGenerationStore::with_contexts(vec![sample_context("coding")]));
        let generator = generator(
            PromptCategory::Tips,
            Arc::new(DefaultPromptRegistry::builtin()),
            chat,
            store.clone(),
        );

        let window = TimeWindow::last_minutes(60);
        let result = generator.generate(window).await.unwrap();

        assert_eq!(result, Some(GeneratedContent::Tip { tip_id: 1 }));
        assert_eq!(store.tips(), vec!["Take a short break.".to_string()]);
    }

    #[tokio::test]
    async fn test_todos_parsed_leniently_and_share_batch() {
        let reply = "```json\n{\"todos\": [{\"content\": \"Reply to Sam\", \"urgency\": 2}, {\"content\": \"Book flight\"},]}\n```";
        let chat = Arc::new(ScriptedChat::replying(reply));
        let store = Arc::new(MemoryGenerationStore::with_contexts(vec![sample_context("email")]));
        let generator = generator(
            PromptCategory::Todo,
            Arc::new(DefaultPromptRegistry::builtin()),
            chat.clone(),
            store.clone(),
        );

        let window = TimeWindow::last_minutes(30);
        let result = generator.generate(window).await.unwrap();

        let Some(GeneratedContent::Todos { todo_batch_id }) = result else {
            panic!("expected todos, got {:?}", result);
        };
        let todos = store.todos();
        assert_eq!(todos.len(), 2);
        assert!(todos.iter().all(|(batch, _)| *batch == todo_batch_id));
        assert_eq!(todos[0].1.urgency, 2);

        // The todo prompt embeds the expected schema
        let requests = chat.requests();
        assert!(requests[0][1].content.contains("\"todos\""));
    }

    #[tokio::test]
    async fn test_unparseable_todos_are_no_content() {
        let chat = Arc::new(ScriptedChat::replying("Nothing to do today."));
        let store = Arc::new(MemoryGenerationStore::with_contexts(vec![sample_context("email")]));
        let generator = generator(
            PromptCategory::Todo,
            Arc::new(DefaultPromptRegistry::builtin()),
            chat,
            store.clone(),
        );

        let window = TimeWindow::last_minutes(30);
        assert_eq!(generator.generate(window).await.unwrap(), None);
        assert!(store.todos().is_empty());
    }

    #[tokio::test]
    async fn test_activity_and_report() {
        let store = Arc::new(MemoryGenerationStore::with_contexts(vec![sample_context("browser")]));
        let registry = Arc::new(DefaultPromptRegistry::builtin());

        let activity = generator(
            PromptCategory::Activity,
            Arc::clone(&registry),
            Arc::new(ScriptedChat::replying(
                r#"{"title": "Reading docs", "description": "Tokio guides", "resources": ["tokio.rs"]}"#,
            )),
            store.clone(),
        );
        let window = TimeWindow::last_minutes(15);
        assert_eq!(
            activity.generate(window).await.unwrap(),
            Some(GeneratedContent::Activity {
                activity_id: 1,
                title: "Reading docs".into(),
                description: "Tokio guides".into(),
            })
        );
        assert_eq!(
            store.activities()[0].resources.as_deref(),
            Some(r#"["tokio.rs"]"#)
        );

        let report = generator(
            PromptCategory::Report,
            registry,
            Arc::new(ScriptedChat::replying("# Today\n\nWorked on docs.")),
            store,
        );
        assert_eq!(
            report.generate(TimeWindow::last_minutes(60)).await.unwrap(),
            Some(GeneratedContent::Report {
                content: "# Today\n\nWorked on docs.".into(),
                summary: "Today".into(),
            })
        );
    }

    #[tokio::test]
    async fn test_chat_failure_propagates() {
        let store = Arc::new(MemoryGenerationStore::with_contexts(vec![sample_context("coding")]));
        let generator = generator(
            PromptCategory::Report,
            Arc::new(DefaultPromptRegistry::builtin()),
            Arc::new(ScriptedChat::failing(503)),
            store,
        );

        assert!(generator.generate(TimeWindow::last_minutes(60)).await.is_err());
    }

    #[tokio::test]
    async fn test_prompt_is_read_at_call_time() {
        let registry = Arc::new(DefaultPromptRegistry::builtin());
        let overrides = PromptOverrideStore::new();
        let chat = Arc::new(ScriptedChat::replying("tip"));
        let store = Arc::new(MemoryGenerationStore::with_contexts(vec![sample_context("coding")]));
        let generator = generator(
            PromptCategory::Tips,
            Arc::clone(&registry),
            chat.clone(),
            store,
        );
        let path = PromptCategory::Tips.canonical_path();
        overrides
            .set_override(
                path,
                json!({"system": "CUSTOM SYSTEM", "user": "custom {{ context_count }}"}),
            )
            .unwrap();

        let scoped = || generator.generate(TimeWindow::last_minutes(5));
        overrides
            .with_scoped_override(path, &registry, scoped)
            .await
            .unwrap()
            .unwrap();
        let window = TimeWindow::last_minutes(5);
        generator.generate(window).await.unwrap();

        let requests = chat.requests();
        assert_eq!(requests[0][0], ChatMessage::system("CUSTOM SYSTEM"));
        assert_eq!(requests[0][1], ChatMessage::user("custom 1"));
        assert_ne!(requests[1][0], ChatMessage::system("CUSTOM SYSTEM"));
        assert_ne!(
            registry.get(path),
            Some(PromptDefinition::new("CUSTOM SYSTEM", "custom {{ context_count }}"))
        );
    }
}
