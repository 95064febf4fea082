pub mod admin;
pub mod debug;
pub mod generation;
pub mod prompts;
