use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Environment variable consulted when `claude.api_key` is unset.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid problem_rate_threshold: {0}. Must be in [0, 1)")]
    InvalidThreshold(f64),

    #[error("Invalid {name}: 0. Must be at least 1")]
    ZeroLimit { name: &'static str },

    #[error("Invalid {name}: cannot be empty")]
    EmptyValue { name: &'static str },

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("No API key configured: set claude.api_key or {API_KEY_ENV}")]
    MissingApiKey,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .dealmemo/config.yaml (project config, created by init)
    /// 3. .dealmemo/local.yaml (project local overrides, optional)
    /// 4. Environment variables (DEALMEMO_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".dealmemo/config.yaml"))
            .merge(Yaml::file(".dealmemo/local.yaml"))
            .merge(Env::prefixed("DEALMEMO_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file; environment variables still win.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("DEALMEMO_").split("__"))
            .extract()
            .context(format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let threshold = config.analysis.problem_rate_threshold;
        if !(0.0..1.0).contains(&threshold) {
            return Err(ConfigError::InvalidThreshold(threshold));
        }

        let limits = [
            ("max_problematic_sections", config.analysis.max_problematic_sections),
            ("max_correction_sections", config.analysis.max_correction_sections),
            ("max_corrections_per_section", config.analysis.max_corrections_per_section),
            ("rewrite_max_tokens", config.claude.rewrite_max_tokens as usize),
            ("memo_max_tokens", config.claude.memo_max_tokens as usize),
            ("timeout_secs", usize::try_from(config.claude.timeout_secs).unwrap_or(usize::MAX)),
        ];
        if let Some(&(name, _)) = limits.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::ZeroLimit { name });
        }

        let required = [
            ("feedback.file_prefix", config.feedback.file_prefix.as_str()),
            ("claude.model", config.claude.model.as_str()),
            ("claude.base_url", config.claude.base_url.as_str()),
        ];
        if let Some(&(name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::EmptyValue { name });
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }

    /// API key from config, falling back to `ANTHROPIC_API_KEY`.
    pub fn resolve_api_key(config: &Config) -> Result<String, ConfigError> {
        config
            .claude
            .api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!((config.analysis.problem_rate_threshold - 0.4).abs() < f64::EPSILON);
        assert_eq!(config.analysis.max_corrections_per_section, 3);
        assert_eq!(config.feedback.file_prefix, "feedback_");
        assert_eq!(config.claude.rewrite_max_tokens, 6000);
        assert_eq!(config.logging.level, "warn");
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
feedback:
  dir: reviews
analysis:
  problem_rate_threshold: 0.25
  max_problematic_sections: 3
claude:
  model: claude-test
logging:
  level: debug
  format: json
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.feedback.dir, std::path::PathBuf::from("reviews"));
        assert_eq!(config.feedback.file_prefix, "feedback_");
        assert!((config.analysis.problem_rate_threshold - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.analysis.max_problematic_sections, 3);
        assert_eq!(config.analysis.max_correction_sections, 5);
        assert_eq!(config.claude.model, "claude-test");
        assert_eq!(config.logging.format, "json");

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_threshold_range() {
        for threshold in [-0.1, 1.0, 1.5] {
            let mut config = Config::default();
            config.analysis.problem_rate_threshold = threshold;
            assert!(matches!(
                ConfigLoader::validate(&config),
                Err(ConfigError::InvalidThreshold(_))
            ));
        }

        let mut config = Config::default();
        config.analysis.problem_rate_threshold = 0.0;
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_validate_zero_limits() {
        let mut config = Config::default();
        config.analysis.max_corrections_per_section = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::ZeroLimit {
                name: "max_corrections_per_section"
            })
        ));

        let mut config = Config::default();
        config.claude.timeout_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::ZeroLimit { name: "timeout_secs" })
        ));
    }

    #[test]
    fn test_validate_empty_values() {
        let mut config = Config::default();
        config.claude.model = "  ".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyValue { name: "claude.model" })
        ));

        let mut config = Config::default();
        config.feedback.file_prefix = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyValue {
                name: "feedback.file_prefix"
            })
        ));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogLevel(level) => assert_eq!(level, "invalid"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogFormat(format) => assert_eq!(format, "xml"),
            other => panic!("Expected InvalidLogFormat error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_file_with_env_override() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "analysis:\n  max_problematic_sections: 2\nlogging:\n  level: info"
        )
        .unwrap();
        file.flush().unwrap();

        let config = temp_env::with_var("DEALMEMO_LOGGING__LEVEL", Some("debug"), || {
            ConfigLoader::load_from_file(file.path()).unwrap()
        });

        assert_eq!(config.analysis.max_problematic_sections, 2);
        assert_eq!(config.logging.level, "debug", "Env should win over file");
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = ConfigLoader::load_from_file("/nonexistent/dealmemo.yaml").unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_from_file_rejects_invalid_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "analysis:\n  problem_rate_threshold: 2.0").unwrap();
        file.flush().unwrap();

        let err = temp_env::with_var_unset("DEALMEMO_ANALYSIS__PROBLEM_RATE_THRESHOLD", || {
            ConfigLoader::load_from_file(file.path()).unwrap_err()
        });
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn test_hierarchical_merging() {
        let mut base_file = NamedTempFile::new().unwrap();
        writeln!(base_file, "logging:\n  level: info\n  format: json").unwrap();
        base_file.flush().unwrap();

        let mut override_file = NamedTempFile::new().unwrap();
        writeln!(override_file, "logging:\n  level: debug").unwrap();
        override_file.flush().unwrap();

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(base_file.path()))
            .merge(Yaml::file(override_file.path()))
            .extract()
            .unwrap();

        assert_eq!(config.logging.level, "debug", "Override should win for nested fields");
        assert_eq!(
            config.logging.format, "json",
            "Base value should persist when not overridden"
        );
    }

    #[test]
    fn test_resolve_api_key() {
        let mut config = Config::default();
        config.claude.api_key = Some("from-config".to_string());
        assert_eq!(ConfigLoader::resolve_api_key(&config).unwrap(), "from-config");

        config.claude.api_key = None;
        temp_env::with_var(API_KEY_ENV, Some("from-env"), || {
            assert_eq!(ConfigLoader::resolve_api_key(&config).unwrap(), "from-env");
        });
        temp_env::with_var_unset(API_KEY_ENV, || {
            assert!(matches!(
                ConfigLoader::resolve_api_key(&config),
                Err(ConfigError::MissingApiKey)
            ));
        });
    }
}
