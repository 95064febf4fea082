use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::features::prompts::error::PromptError;

/// Logical prompt category exposed by the debug endpoints.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum PromptCategory {
    Tips,
    Todo,
    Report,
    Activity,
}

impl PromptCategory {
    pub const ALL: [PromptCategory; 4] = [
        PromptCategory::Tips,
        PromptCategory::Todo,
        PromptCategory::Report,
        PromptCategory::Activity,
    ];

    /// Resolve a user supplied category name.
    pub fn resolve(name: &str) -> Result<Self, PromptError> {
        match name {
            "tips" => Ok(PromptCategory::Tips),
            "todo" => Ok(PromptCategory::Todo),
            "report" => Ok(PromptCategory::Report),
            "activity" => Ok(PromptCategory::Activity),
            other => Err(PromptError::InvalidCategory(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PromptCategory::Tips => "tips",
            PromptCategory::Todo => "todo",
            PromptCategory::Report => "report",
            PromptCategory::Activity => "activity",
        }
    }

    /// Prompt name inside the `generation` group
    pub fn prompt_name(&self) -> &'static str {
        match self {
            PromptCategory::Tips => "smart_tip_generation",
            PromptCategory::Todo => "todo_extraction",
            PromptCategory::Report => "generation_report",
            PromptCategory::Activity => "realtime_activity_monitor",
        }
    }

    /// Canonical `generation.<prompt_name>` path used by the registry and override table
    pub fn canonical_path(&self) -> &'static str {
        match self {
            PromptCategory::Tips => "generation.smart_tip_generation",
            PromptCategory::Todo => "generation.todo_extraction",
            PromptCategory::Report => "generation.generation_report",
            PromptCategory::Activity => "generation.realtime_activity_monitor",
        }
    }

    /// Reverse lookup from a canonical path
    pub fn from_canonical_path(path: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.canonical_path() == path)
    }
}

impl FromStr for PromptCategory {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

impl fmt::Display for PromptCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
