use async_trait::async_trait;

use crate::features::generation::models::{GeneratedContent, TimeWindow};

/// Produces one kind of artifact from the context recorded in a time window.
///
/// `Ok(None)` means there was nothing to generate from. Generators read their
/// prompt from the default registry when called, so a scoped override is seen
/// without any extra parameter.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, window: TimeWindow) -> anyhow::Result<Option<GeneratedContent>>;
}
