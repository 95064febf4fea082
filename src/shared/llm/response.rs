use schemars::gen::SchemaGenerator;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

/// Structured model output that degrades to a default on parse failure.
///
/// Implementors keep a success flag and the parse error so callers can tell
/// an empty result from one the model never produced.
pub trait LlmResponse: DeserializeOwned + Default + JsonSchema {
    /// Record that this value is a fallback, not parsed output
    fn mark_as_fallback(&mut self, error_message: String);

    fn is_success(&self) -> bool;

    /// JSON schema of the response, embedded into prompts as `json_schema`
    fn json_schema_string() -> String {
        let mut gen = SchemaGenerator::default();
        let schema = gen.root_schema_for::<Self>();
        serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
    }
}
