pub mod dtos;
pub mod generator;
pub mod handlers;
pub mod manager;
pub mod models;
pub mod routes;
pub mod services;

pub use manager::ConsumptionManager;
pub use services::{GenerationService, LlmGenerator, PgGenerationStore};
