pub mod generation_service;
pub mod generation_store;
pub mod llm_generator;

pub use generation_service::{CustomWindow, GenerationService};
pub use generation_store::{GenerationStore, PgGenerationStore};
pub use llm_generator::LlmGenerator;
