//! In-memory collaborators for unit and handler tests.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::features::generation::generator::ContentGenerator;
use crate::features::generation::models::{ContextRecord, GeneratedContent, TimeWindow};
use crate::features::generation::services::generation_store::{
    GenerationStore, NewActivity, NewTodo,
};
use crate::features::prompts::models::PromptDefinition;
use crate::features::prompts::DefaultPromptRegistry;
use crate::modules::llm::chat_client::LlmError;
use crate::modules::llm::{ChatCompletion, ChatMessage};

pub fn sample_context(context_type: &str) -> ContextRecord {
    ContextRecord {
        id: 1,
        context_type: context_type.to_string(),
        title: None,
        summary: format!("Worked on {}", context_type),
        created_at: Utc::now(),
    }
}

/// Chat backend that returns a canned reply and records every request
pub struct ScriptedChat {
    reply: Result<String, u16>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedChat {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            reply: Err(status),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletion for ScriptedChat {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(messages);
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(status) => Err(LlmError::Api {
                status: *status,
                message: "scripted failure".to_string(),
            }),
        }
    }
}

/// Store that keeps everything in vectors; ids start at 1 per table
#[derive(Default)]
pub struct MemoryGenerationStore {
    contexts: Vec<ContextRecord>,
    tips: Mutex<Vec<String>>,
    todos: Mutex<Vec<(Uuid, NewTodo)>>,
    activities: Mutex<Vec<NewActivity>>,
    reports: Mutex<Vec<(String, String)>>,
}

impl MemoryGenerationStore {
    pub fn with_contexts(contexts: Vec<ContextRecord>) -> Self {
        Self {
            contexts,
            ..Default::default()
        }
    }

    pub fn tips(&self) -> Vec<String> {
        self.tips.lock().unwrap().clone()
    }

    pub fn todos(&self) -> Vec<(Uuid, NewTodo)> {
        self.todos.lock().unwrap().clone()
    }

    pub fn activities(&self) -> Vec<NewActivity> {
        self.activities.lock().unwrap().clone()
    }

    pub fn reports(&self) -> Vec<(String, String)> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationStore for MemoryGenerationStore {
    async fn contexts_in_window(&self, _window: TimeWindow) -> anyhow::Result<Vec<ContextRecord>> {
        Ok(self.contexts.clone())
    }

    async fn insert_tip(&self, content: &str) -> anyhow::Result<i64> {
        let mut tips = self.tips.lock().unwrap();
        tips.push(content.to_string());
        Ok(tips.len() as i64)
    }

    async fn insert_todos(&self, batch_id: Uuid, todos: &[NewTodo]) -> anyhow::Result<()> {
        self.todos
            .lock()
            .unwrap()
            .extend(todos.iter().cloned().map(|todo| (batch_id, todo)));
        Ok(())
    }

    async fn insert_activity(
        &self,
        _window: TimeWindow,
        activity: &NewActivity,
    ) -> anyhow::Result<i64> {
        let mut activities = self.activities.lock().unwrap();
        activities.push(activity.clone());
        Ok(activities.len() as i64)
    }

    async fn insert_report(
        &self,
        _window: TimeWindow,
        content: &str,
        summary: &str,
    ) -> anyhow::Result<i64> {
        let mut reports = self.reports.lock().unwrap();
        reports.push((content.to_string(), summary.to_string()));
        Ok(reports.len() as i64)
    }
}

/// Generator with a fixed outcome
pub struct FixedGenerator {
    outcome: Result<Option<GeneratedContent>, String>,
    windows: Mutex<Vec<TimeWindow>>,
}

impl FixedGenerator {
    pub fn empty() -> Self {
        Self::with_outcome(Ok(None))
    }

    pub fn returning(content: GeneratedContent) -> Self {
        Self::with_outcome(Ok(Some(content)))
    }

    pub fn failing(message: &str) -> Self {
        Self::with_outcome(Err(message.to_string()))
    }

    fn with_outcome(outcome: Result<Option<GeneratedContent>, String>) -> Self {
        Self {
            outcome,
            windows: Mutex::new(Vec::new()),
        }
    }

    /// Windows the generator was called with
    pub fn windows(&self) -> Vec<TimeWindow> {
        self.windows.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentGenerator for FixedGenerator {
    async fn generate(&self, window: TimeWindow) -> anyhow::Result<Option<GeneratedContent>> {
        self.windows.lock().unwrap().push(window);
        self.outcome.clone().map_err(anyhow::Error::msg)
    }
}

/// Generator that records the registry entry it sees at `path`, then
/// returns a tip
pub struct PromptRecorder {
    registry: Arc<DefaultPromptRegistry>,
    path: &'static str,
    seen: Mutex<Vec<Option<PromptDefinition>>>,
    fail: bool,
}

impl PromptRecorder {
    pub fn new(registry: Arc<DefaultPromptRegistry>, path: &'static str) -> Self {
        Self {
            registry,
            path,
            seen: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing(registry: Arc<DefaultPromptRegistry>, path: &'static str) -> Self {
        Self {
            fail: true,
            ..Self::new(registry, path)
        }
    }

    pub fn seen(&self) -> Vec<Option<PromptDefinition>> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentGenerator for PromptRecorder {
    async fn generate(&self, _window: TimeWindow) -> anyhow::Result<Option<GeneratedContent>> {
        self.seen.lock().unwrap().push(self.registry.get(self.path));
        if self.fail {
            anyhow::bail!("model unavailable");
        }
        Ok(Some(GeneratedContent::Tip { tip_id: 1 }))
    }
}
