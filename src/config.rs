//! Runner configuration parsing.
//!
//! Every field has a default, so an empty TOML document (or
//! [`Config::default`]) yields a working configuration.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Map phase settings.
    pub map: MapConfig,
    /// Reduce phase settings.
    pub reduce: ReduceConfig,
    /// Logging settings, used by `logging::init` when the `subscriber`
    /// feature is enabled.
    pub logging: LoggingConfig,
}

/// Map phase settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Deepest key nesting accepted when grouping emissions.
    pub max_key_depth: usize,
}

impl MapConfig {
    /// Same limit serde_json applies when parsing nested documents.
    pub const DEFAULT_MAX_KEY_DEPTH: usize = 128;
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            max_key_depth: Self::DEFAULT_MAX_KEY_DEPTH,
        }
    }
}

/// Reduce phase settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReduceConfig {
    /// What to do with a group that carries no values.
    pub empty_group: EmptyGroupPolicy,
}

/// Handling of degenerate groups with an empty value list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyGroupPolicy {
    /// Reduce the group to `null` without calling the reduce function.
    #[default]
    Null,
    /// Fail the reduce pass with `Error::EmptyGroup`.
    Error,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `"info"` or `"mock_reduce=trace"`.
    pub level: String,
    pub format: LogFormat,
    /// `"stdout"`, `"stderr"` or a file path.
    pub output: String,
    pub color: bool,
    pub target: bool,
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Text,
            output: "stderr".into(),
            color: true,
            target: true,
            timestamps: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
[map]
max_key_depth = 16

[reduce]
empty_group = "error"

[logging]
level = "mock_reduce=debug"
format = "json"
output = "stdout"
timestamps = false
"#;
        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.map.max_key_depth, 16);
        assert_eq!(config.reduce.empty_group, EmptyGroupPolicy::Error);
        assert_eq!(config.logging.level, "mock_reduce=debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.output, "stdout");
        assert!(!config.logging.timestamps);
        assert!(config.logging.color);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.map.max_key_depth, MapConfig::DEFAULT_MAX_KEY_DEPTH);
        assert_eq!(config.reduce.empty_group, EmptyGroupPolicy::Null);
        assert_eq!(config.logging.format, LogFormat::Text);
        assert_eq!(config.logging.output, "stderr");
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let err = Config::from_str("[reduce]\nempty_group = \"skip\"\n").unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mock-reduce.toml");
        std::fs::write(&path, "[map]\nmax_key_depth = 4\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.map.max_key_depth, 4);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
