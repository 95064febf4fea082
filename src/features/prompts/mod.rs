pub mod dtos;
pub mod error;
pub mod handlers;
pub mod models;
pub mod registry;
pub mod routes;
pub mod services;

pub use error::PromptError;
pub use registry::DefaultPromptRegistry;
pub use services::{PromptOverrideStore, PromptService};
