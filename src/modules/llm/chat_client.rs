use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::core::config::LlmConfig;

const MAX_RETRIES: u32 = 2;
const INITIAL_BACKOFF_MS: u64 = 500;

fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("LLM API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned no content")]
    EmptyResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// Anything that can answer a chat prompt with text
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Client for `POST {base_url}/chat/completions`
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: Client,
    url: String,
    api_key: Option<String>,
    model: String,
}

impl ChatClient {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            url: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_once(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let mut request = self.http.post(&self.url).json(&ChatRequest {
            model: &self.model,
            messages,
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)
    }
}

#[async_trait]
impl ChatCompletion for ChatClient {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError> {
        let mut attempt = 0;
        loop {
            match self.send_once(&messages).await {
                Err(LlmError::Api { status, .. })
                    if is_retryable_status(status) && attempt < MAX_RETRIES => {}
                Err(LlmError::Network(e)) if e.is_timeout() && attempt < MAX_RETRIES => {}
                other => return other,
            }

            attempt += 1;
            let backoff = INITIAL_BACKOFF_MS * 2u64.pow(attempt - 1);
            tracing::warn!(
                "LLM call to {} failed, retrying in {}ms (attempt {})",
                self.model,
                backoff,
                attempt
            );
            tokio::time::sleep(Duration::from_millis(backoff)).await;
        }
    }
}
