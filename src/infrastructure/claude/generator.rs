//! [`TextGenerator`] backed by the Claude Messages API.

use async_trait::async_trait;
use std::sync::Arc;

use super::client::ClaudeClient;
use super::types::MessageRequest;
use crate::domain::ports::{GenerationError, TextGenerator};

/// Sends each prompt as a single user message.
pub struct ClaudeTextGenerator {
    client: Arc<ClaudeClient>,
    model: String,
    max_tokens: u32,
}

impl ClaudeTextGenerator {
    pub fn new(client: Arc<ClaudeClient>, model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            client,
            model: model.into(),
            max_tokens,
        }
    }
}

#[async_trait]
impl TextGenerator for ClaudeTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = MessageRequest::user_prompt(&self.model, prompt, self.max_tokens);
        let response = self.client.send_message(&request).await?;

        let text = response.text();
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text)
    }
}
