use async_trait::async_trait;

use super::errors::GenerationError;

/// Port for the external text-generation service
///
/// The pipeline treats the service as an opaque function: prompt text in,
/// response text out. Adapters own model selection, token budgets and the
/// wire protocol.
///
/// # Error Handling
///
/// Every failure (network, authentication, non-success status, a reply with
/// no text) is reported as a [`GenerationError`]. Implementations must not
/// retry; a failed call aborts the run that issued it.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
///
/// async fn rewrite(generator: Arc<dyn TextGenerator>, prompt: String) -> Result<String, GenerationError> {
///     generator.generate(&prompt).await
/// }
/// ```
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` to the service and return its complete reply
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
