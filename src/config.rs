//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and `TOYPROJECT_*` environment overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::endpoints::DEFAULT_BASE_URL;
use crate::riot::DEFAULT_MATCH_COUNT;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub riot: RiotConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Service endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_service_url")]
    pub auth_url: String,

    #[serde(default = "default_service_url")]
    pub stats_url: String,

    #[serde(default = "default_service_url")]
    pub board_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_service_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            auth_url: default_service_url(),
            stats_url: default_service_url(),
            board_url: default_service_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Point all three services at one base URL
    pub fn set_base_url(&mut self, url: &str) {
        self.auth_url = url.to_string();
        self.stats_url = url.to_string();
        self.board_url = url.to_string();
    }
}

/// Match-history lookup
#[derive(Debug, Clone, Deserialize)]
pub struct RiotConfig {
    #[serde(default = "default_match_count")]
    pub match_count: u32,
}

fn default_match_count() -> u32 {
    DEFAULT_MATCH_COUNT
}

impl Default for RiotConfig {
    fn default() -> Self {
        Self {
            match_count: default_match_count(),
        }
    }
}

/// Where the logged-in session is persisted
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_file")]
    pub storage_path: String,
}

fn default_session_file() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("toyproject").join("session.json"))
        .unwrap_or_else(|| PathBuf::from("./toyproject_session.json"))
        .to_string_lossy()
        .to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_path: default_session_file(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
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
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("toyproject").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // A single base URL first, then per-service URLs on top
        if let Some(url) = var("TOYPROJECT_API_URL") {
            self.api.set_base_url(&url);
        }
        if let Some(url) = var("TOYPROJECT_AUTH_URL") {
            self.api.auth_url = url;
        }
        if let Some(url) = var("TOYPROJECT_STATS_URL") {
            self.api.stats_url = url;
        }
        if let Some(url) = var("TOYPROJECT_BOARD_URL") {
            self.api.board_url = url;
        }
        if let Some(timeout) = var("TOYPROJECT_REQUEST_TIMEOUT") {
            if let Ok(secs) = timeout.parse() {
                self.api.request_timeout_secs = secs;
            }
        }

        if let Some(count) = var("TOYPROJECT_MATCH_COUNT") {
            if let Ok(n) = count.parse() {
                self.riot.match_count = n;
            }
        }

        if let Some(path) = var("TOYPROJECT_SESSION_FILE") {
            self.session.storage_path = path;
        }

        if let Some(level) = var("TOYPROJECT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("TOYPROJECT_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# ToyProject Configuration
#
# Environment variables override these settings:
# - TOYPROJECT_API_URL (all three services)
# - TOYPROJECT_AUTH_URL, TOYPROJECT_STATS_URL, TOYPROJECT_BOARD_URL
# - TOYPROJECT_REQUEST_TIMEOUT
# - TOYPROJECT_MATCH_COUNT
# - TOYPROJECT_SESSION_FILE
# - TOYPROJECT_LOG_LEVEL
# - TOYPROJECT_LOG_FORMAT

[api]
# Auth service (signup, login, availability checks)
auth_url = "http://localhost:8081"

# Match-history stats service
stats_url = "http://localhost:8081"

# Board service
board_url = "http://localhost:8081"

# Request timeout in seconds
request_timeout_secs = 30

[riot]
# Matches fetched per search
match_count = 5

[session]
# File holding the logged-in user and access token
# storage_path = "~/.local/share/toyproject/session.json"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.auth_url, "http://localhost:8081");
        assert_eq!(config.api.board_url, "http://localhost:8081");
        assert_eq!(config.riot.match_count, 5);
        assert_eq!(config.logging.format, "pretty");
        assert!(config.session.storage_path.ends_with("session.json"));
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.stats_url, "http://localhost:8081");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse("[riot]\nmatch_count = 10\n").unwrap();
        assert_eq!(config.riot.match_count, 10);
        assert_eq!(config.api.auth_url, "http://localhost:8081");
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbroken").unwrap();

        match Config::load(&path) {
            Err(ConfigError::Parse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected parse error, got {:?}", other),
        }

        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("TOYPROJECT_API_URL", "http://api.test"),
            ("TOYPROJECT_STATS_URL", "http://stats.test"),
            ("TOYPROJECT_MATCH_COUNT", "20"),
            ("TOYPROJECT_REQUEST_TIMEOUT", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.auth_url, "http://api.test");
        assert_eq!(config.api.board_url, "http://api.test");
        assert_eq!(config.api.stats_url, "http://stats.test");
        assert_eq!(config.riot.match_count, 20);
        assert_eq!(config.api.request_timeout_secs, 30);
    }
}
