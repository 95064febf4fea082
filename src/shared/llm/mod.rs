//! Helpers for turning free-form model output into typed values.

pub mod parser;
pub mod response;

pub use parser::{parse_with_fallback, strip_code_fences};
pub use response::LlmResponse;
