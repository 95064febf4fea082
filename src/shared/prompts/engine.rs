//! Template engine for generation prompts using Jinja2 syntax.
//!
//! Prompt definitions hold `system` and `user` templates. Both are rendered
//! with the same context right before a generation call, so whatever
//! definition is in the registry at that moment (default or scoped override)
//! is what gets used.

use minijinja::{Environment, UndefinedBehavior, Value};
use std::collections::HashMap;
use thiserror::Error;

use crate::features::prompts::models::PromptDefinition;

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Invalid template '{0}': {1}")]
    Syntax(String, String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

/// A prompt definition with both templates rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub system: String,
    pub user: String,
}

fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    // Missing variables render as empty strings instead of failing the whole call
    env.set_undefined_behavior(UndefinedBehavior::Lenient);
    env
}

/// Render one template string with the given context.
pub fn render_str(
    name: &str,
    template: &str,
    ctx: &HashMap<&str, Value>,
) -> Result<String, TemplateError> {
    let env = environment();
    let render_ctx = Value::from_iter(ctx.iter().map(|(k, v)| (*k, v.clone())));

    env.render_str(template, render_ctx).map_err(|e| match e.kind() {
        minijinja::ErrorKind::SyntaxError => TemplateError::Syntax(name.to_string(), e.to_string()),
        _ => TemplateError::RenderError(e.to_string()),
    })
}

/// Render the `system` and `user` templates of a prompt definition.
///
/// # Example
/// ```ignore
/// let mut ctx = HashMap::new();
/// ctx.insert("start_time", Value::from("2025-01-01 09:00"));
///
/// let rendered = render_prompt(&definition, &ctx)?;
/// ```
pub fn render_prompt(
    definition: &PromptDefinition,
    ctx: &HashMap<&str, Value>,
) -> Result<RenderedPrompt, TemplateError> {
    Ok(RenderedPrompt {
        system: render_str("system", &definition.system, ctx)?,
        user: render_str("user", &definition.user, ctx)?,
    })
}

/// Check that both templates of a definition compile
pub fn validate_prompt(definition: &PromptDefinition) -> Result<(), TemplateError> {
    let env = environment();
    for (name, source) in [("system", &definition.system), ("user", &definition.user)] {
        env.template_from_str(source)
            .map_err(|e| TemplateError::Syntax(name.to_string(), e.to_string()))?;
    }
    Ok(())
}
