//! Prompt rendering for generation calls.
//!
//! Definitions come from the [`DefaultPromptRegistry`](crate::features::prompts::DefaultPromptRegistry)
//! and use Jinja2 syntax. Every generator renders with the same base context:
//!
//! - `start_time` / `end_time`: window bounds formatted as `%Y-%m-%d %H:%M:%S`
//! - `contexts`: processed context records in the window
//! - `json_schema`: expected output schema, for generators that parse JSON
//!
//! # Usage
//!
//! ```ignore
//! let ctx = generation_context(&window, &records, Some(&schema));
//! let rendered = render_prompt(&definition, &ctx)?;
//! ```

pub mod engine;

pub use engine::render_prompt;

use chrono::{DateTime, Utc};
use minijinja::Value;
use serde::Serialize;
use std::collections::HashMap;

/// Format used for time values exposed to templates
pub const TEMPLATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Build the base template context for a generation window.
pub fn generation_context<T: Serialize>(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    contexts: &[T],
    json_schema: Option<&str>,
) -> HashMap<&'static str, Value> {
    let mut ctx = HashMap::new();
    ctx.insert(
        "start_time",
        Value::from(start.format(TEMPLATE_TIME_FORMAT).to_string()),
    );
    ctx.insert(
        "end_time",
        Value::from(end.format(TEMPLATE_TIME_FORMAT).to_string()),
    );
    ctx.insert("contexts", Value::from_serialize(contexts));
    ctx.insert("context_count", Value::from(contexts.len()));
    ctx.insert("json_schema", Value::from(json_schema.unwrap_or("")));
    ctx
}
