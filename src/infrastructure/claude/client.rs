use super::errors::ClaudeApiError;
use super::types::{MessageRequest, MessageResponse};
use reqwest::{header, Client as ReqwestClient, Response};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Configuration for the Claude HTTP client
#[derive(Debug, Clone)]
pub struct ClaudeClientConfig {
    /// Anthropic API key
    pub api_key: String,

    /// Base URL for the Claude API
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ClaudeClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.anthropic.com".to_string(),
            timeout_secs: 300,
        }
    }

    pub fn from_config(config: &crate::domain::models::ClaudeConfig, api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        }
    }
}

/// HTTP client for the Claude Messages API
///
/// One request per call: failures are classified and returned, never retried.
pub struct ClaudeClient {
    http_client: ReqwestClient,
    base_url: String,
}

impl ClaudeClient {
    pub fn new(config: ClaudeClientConfig) -> Result<Self, ClaudeApiError> {
        // Scrub API key from logs
        let api_key_scrubbed = match config.api_key.get(..8) {
            Some(prefix) if config.api_key.len() > 8 => format!("{prefix}...[REDACTED]"),
            _ => "[REDACTED]".to_string(),
        };

        info!(
            base_url = %config.base_url,
            timeout_secs = config.timeout_secs,
            api_key = %api_key_scrubbed,
            "initializing Claude API client"
        );

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "x-api-key",
            header::HeaderValue::from_str(&config.api_key)
                .map_err(|e| ClaudeApiError::InvalidRequest(format!("Invalid API key: {e}")))?,
        );
        headers.insert(
            "anthropic-version",
            header::HeaderValue::from_static("2023-06-01"),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .tcp_nodelay(true)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url,
        })
    }

    /// Send a message to Claude and get a response
    #[instrument(skip(self, request), fields(model = %request.model, max_tokens = request.max_tokens))]
    pub async fn send_message(
        &self,
        request: &MessageRequest,
    ) -> Result<MessageResponse, ClaudeApiError> {
        let url = format!("{}/v1/messages", self.base_url);
        debug!(%url, "sending message request");

        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    ClaudeApiError::Timeout
                } else {
                    ClaudeApiError::NetworkError(err)
                }
            })?;

        let message = self.handle_response(response).await?;
        info!(
            input_tokens = message.usage.input_tokens,
            output_tokens = message.usage.output_tokens,
            "message request succeeded"
        );
        Ok(message)
    }

    /// Handle HTTP response and convert to typed result
    async fn handle_response(&self, response: Response) -> Result<MessageResponse, ClaudeApiError> {
        let status = response.status();
        debug!(%status, "response received");

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            warn!(%status, body = %body, "API error");
            return Err(ClaudeApiError::from_status(status, body));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ClaudeConfig;

    #[test]
    fn test_client_creation() {
        let client = ClaudeClient::new(ClaudeClientConfig::new("test-key"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_api_key_header_is_rejected() {
        let client = ClaudeClient::new(ClaudeClientConfig::new("bad\nkey"));
        assert!(matches!(client, Err(ClaudeApiError::InvalidRequest(_))));
    }

    #[test]
    fn test_config_from_settings() {
        let settings = ClaudeConfig {
            base_url: "http://localhost:8080/".to_string(),
            timeout_secs: 30,
            ..ClaudeConfig::default()
        };

        let config = ClaudeClientConfig::from_config(&settings, "key");

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.api_key, "key");
    }
}
