//! Command implementations.

pub mod analyze;
pub mod generate;
pub mod improve;
pub mod init;

use anyhow::{Context, Result};
use chrono::Local;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::models::Config;
use crate::domain::ports::TextGenerator;
use crate::infrastructure::claude::{ClaudeClient, ClaudeClientConfig, ClaudeTextGenerator};
use crate::infrastructure::config::ConfigLoader;
use crate::services::DEFAULT_MEMO_TEMPLATE;

/// The caller's run id, or a timestamp like `20250101_093000`.
pub fn run_id_or_now(run_id: Option<String>) -> String {
    run_id.unwrap_or_else(|| Local::now().format("%Y%m%d_%H%M%S").to_string())
}

/// Prompt template from `path`, or the built-in memo template.
pub async fn read_prompt(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read prompt file {}", path.display())),
        None => Ok(DEFAULT_MEMO_TEMPLATE.to_string()),
    }
}

/// Claude-backed text generator with the given token budget.
pub fn claude_generator(config: &Config, max_tokens: u32) -> Result<Arc<dyn TextGenerator>> {
    let api_key = ConfigLoader::resolve_api_key(config)?;
    let client = ClaudeClient::new(ClaudeClientConfig::from_config(&config.claude, api_key))
        .context("Failed to create Claude API client")?;

    Ok(Arc::new(ClaudeTextGenerator::new(
        Arc::new(client),
        config.claude.model.clone(),
        max_tokens,
    )))
}

/// `override_dir` if given, else `configured`.
pub fn dir_or(override_dir: Option<PathBuf>, configured: &Path) -> PathBuf {
    override_dir.unwrap_or_else(|| configured.to_path_buf())
}
