use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::features::prompts::error::PromptError;
use crate::shared::prompts::engine::validate_prompt;

/// A generation prompt: `system` and `user` templates plus any extra fields,
/// which are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct PromptDefinition {
    pub system: String,
    pub user: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PromptDefinition {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            extra: Map::new(),
        }
    }

    pub fn to_value(&self) -> Value {
        let mut fields = self.extra.clone();
        fields.insert("system".to_string(), Value::String(self.system.clone()));
        fields.insert("user".to_string(), Value::String(self.user.clone()));
        Value::Object(fields)
    }
}

impl TryFrom<Value> for PromptDefinition {
    type Error = PromptError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(mut fields) = value else {
            return Err(PromptError::MalformedPrompt(
                "Prompts must be a JSON object with 'system' and 'user' fields".to_string(),
            ));
        };

        if !fields.contains_key("system") || !fields.contains_key("user") {
            return Err(PromptError::MalformedPrompt(
                "Prompts must contain 'system' and 'user' fields".to_string(),
            ));
        }

        let system = take_text(&mut fields, "system")?;
        let user = take_text(&mut fields, "user")?;

        let definition = Self {
            system,
            user,
            extra: fields,
        };
        validate_prompt(&definition).map_err(|e| PromptError::MalformedPrompt(e.to_string()))?;

        Ok(definition)
    }
}

fn take_text(fields: &mut Map<String, Value>, key: &str) -> Result<String, PromptError> {
    match fields.remove(key) {
        Some(Value::String(text)) => Ok(text),
        _ => Err(PromptError::MalformedPrompt(format!(
            "Prompt field '{}' must be text",
            key
        ))),
    }
}
