use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for dealmemo
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Where feedback records are read from
    #[serde(default)]
    pub feedback: FeedbackConfig,

    /// Aggregation thresholds and request size limits
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Anthropic API settings
    #[serde(default)]
    pub claude: ClaudeConfig,

    /// Where artifacts are written
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Feedback source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FeedbackConfig {
    /// Directory scanned for feedback documents
    #[serde(default = "default_feedback_dir")]
    pub dir: PathBuf,

    /// File name prefix of feedback documents (`<prefix>*.json`)
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

fn default_feedback_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_file_prefix() -> String {
    "feedback_".to_string()
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            dir: default_feedback_dir(),
            file_prefix: default_file_prefix(),
        }
    }
}

/// Aggregation and rewrite request limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AnalysisConfig {
    /// A section is problematic when its problem rate is strictly above this
    #[serde(default = "default_problem_rate_threshold")]
    pub problem_rate_threshold: f64,

    /// Problematic sections surfaced in reports and the rewrite request
    #[serde(default = "default_max_problematic_sections")]
    pub max_problematic_sections: usize,

    /// Distinct sections whose corrections go into the rewrite request
    #[serde(default = "default_max_correction_sections")]
    pub max_correction_sections: usize,

    /// Corrections sampled per section for the rewrite request
    #[serde(default = "default_max_corrections_per_section")]
    pub max_corrections_per_section: usize,
}

const fn default_problem_rate_threshold() -> f64 {
    0.4
}

const fn default_max_problematic_sections() -> usize {
    5
}

const fn default_max_correction_sections() -> usize {
    5
}

const fn default_max_corrections_per_section() -> usize {
    3
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            problem_rate_threshold: default_problem_rate_threshold(),
            max_problematic_sections: default_max_problematic_sections(),
            max_correction_sections: default_max_correction_sections(),
            max_corrections_per_section: default_max_corrections_per_section(),
        }
    }
}

/// Anthropic API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ClaudeConfig {
    /// Base URL for the Messages API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used for memo generation and prompt rewrites
    #[serde(default = "default_model")]
    pub model: String,

    /// API key; falls back to `ANTHROPIC_API_KEY` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Token budget for prompt rewrites
    #[serde(default = "default_rewrite_max_tokens")]
    pub rewrite_max_tokens: u32,

    /// Token budget for memo generation
    #[serde(default = "default_memo_max_tokens")]
    pub memo_max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

const fn default_rewrite_max_tokens() -> u32 {
    6000
}

const fn default_memo_max_tokens() -> u32 {
    4000
}

const fn default_timeout_secs() -> u64 {
    300
}

impl Default for ClaudeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            rewrite_max_tokens: default_rewrite_max_tokens(),
            memo_max_tokens: default_memo_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Artifact output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OutputConfig {
    /// Directory artifacts are written to
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling JSON log files (stderr only when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}
