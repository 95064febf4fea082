pub mod override_store;
pub mod prompt_service;

pub use override_store::PromptOverrideStore;
pub use prompt_service::PromptService;
