use thiserror::Error;

use crate::core::error::AppError;

/// Failures of the prompt override and generation flow.
///
/// Each variant maps to its own status at the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("{0}")]
    MalformedPrompt(String),

    #[error("{0} not initialized")]
    UninitializedCollaborator(String),

    #[error("{0}")]
    NoContent(String),

    #[error("{0}")]
    GenerationFailure(String),
}

impl From<PromptError> for AppError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::InvalidCategory(_) => AppError::BadRequest(err.to_string()),
            PromptError::MalformedPrompt(msg) => AppError::Validation(msg),
            PromptError::UninitializedCollaborator(_) => AppError::NotInitialized(err.to_string()),
            PromptError::NoContent(msg) => AppError::NotFound(msg),
            PromptError::GenerationFailure(msg) => AppError::Generation(msg),
        }
    }
}
