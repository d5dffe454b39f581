//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::client::AdminClientConfig;
use crate::flows::{LoadingPolicy, LoginSettings};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Admin API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL the login request goes to; stored with the session
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn client_config(&self) -> AdminClientConfig {
        AdminClientConfig {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..Default::default()
        }
    }
}

/// Session store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_store_path")]
    pub store_path: String,
}

fn default_store_path() -> String {
    dirs::config_dir()
        .map(|p| p.join("backoffice").join("session.json").to_string_lossy().to_string())
        .unwrap_or_else(|| "./backoffice_session.json".to_string())
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
        }
    }
}

/// Presentation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Delay before the loading indicator is hidden once a request settles
    #[serde(default = "default_min_loading_ms")]
    pub min_loading_ms: u64,

    /// Role an account needs to log in
    #[serde(default = "default_admin_role")]
    pub admin_role: String,
}

fn default_min_loading_ms() -> u64 {
    200
}

fn default_admin_role() -> String {
    crate::flows::DEFAULT_ADMIN_ROLE.to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            min_loading_ms: default_min_loading_ms(),
            admin_role: default_admin_role(),
        }
    }
}

impl UiConfig {
    pub fn loading_policy(&self) -> LoadingPolicy {
        LoadingPolicy::new(Duration::from_millis(self.min_loading_ms))
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

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
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

    /// Load from the first default location that exists, or from the
    /// environment alone when none does.
    ///
    /// A config file that exists but cannot be read or parsed is an error,
    /// so the caller can report it once logging is up.
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("backoffice").join("config.toml")),
            Some(PathBuf::from("/etc/backoffice/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    fn load_first(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::from_env()),
        }
    }

    /// Login settings derived from the API and UI sections
    pub fn login_settings(&self) -> LoginSettings {
        LoginSettings {
            base_url: self.api.base_url.clone(),
            admin_role: self.ui.admin_role.clone(),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // API overrides
        if let Some(url) = var("BACKOFFICE_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = var("BACKOFFICE_API_TIMEOUT") {
            if let Ok(secs) = timeout.parse() {
                self.api.request_timeout_secs = secs;
            }
        }

        // Session overrides
        if let Some(path) = var("BACKOFFICE_SESSION_FILE") {
            self.session.store_path = path;
        }

        // UI overrides
        if let Some(ms) = var("BACKOFFICE_MIN_LOADING_MS") {
            if let Ok(ms) = ms.parse() {
                self.ui.min_loading_ms = ms;
            }
        }

        // Logging overrides
        if let Some(level) = var("BACKOFFICE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("BACKOFFICE_LOG_FORMAT") {
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
    r#"# Backoffice Configuration
#
# Environment variables override these settings:
# - BACKOFFICE_API_URL
# - BACKOFFICE_API_TIMEOUT
# - BACKOFFICE_SESSION_FILE
# - BACKOFFICE_MIN_LOADING_MS
# - BACKOFFICE_LOG_LEVEL
# - BACKOFFICE_LOG_FORMAT

[api]
# Admin API base URL
base_url = "http://localhost:8080"

# Request timeout in seconds
request_timeout_secs = 30

[session]
# Where the session token, roles and API URL are kept between runs
# store_path = "~/.config/backoffice/session.json"

[ui]
# Delay before hiding the loading indicator once a request settles (ms)
min_loading_ms = 200

# Role an account needs to log in
admin_role = "ROLE_ADMIN"

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
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.ui.min_loading_ms, 200);
        assert_eq!(config.ui.admin_role, "ROLE_ADMIN");
        assert!(config.session.store_path.ends_with("session.json"));
        assert_eq!(
            config.ui.loading_policy().min_display,
            Duration::from_millis(200)
        );
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.login_settings().admin_role, "ROLE_ADMIN");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nbase_url = \"https://admin.example.com/\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.base_url, "https://admin.example.com/");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.ui.min_loading_ms, 200);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[api\n").unwrap();
        assert!(matches!(Config::load(&broken), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_first_existing_default_wins() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let present = dir.path().join("config.toml");
        let later = dir.path().join("later.toml");
        std::fs::write(&present, "[ui]\nadmin_role = \"ROLE_SUPER\"\n").unwrap();
        std::fs::write(&later, "[ui]\nadmin_role = \"ROLE_OTHER\"\n").unwrap();

        let config = Config::load_first(&[missing.clone(), present, later]).unwrap();
        assert_eq!(config.ui.admin_role, "ROLE_SUPER");

        let config = Config::load_first(&[missing]).unwrap();
        assert_eq!(config.ui.min_loading_ms, 200);
    }

    #[test]
    fn test_broken_default_config_is_reported() {
        let dir = tempdir().unwrap();
        let broken = dir.path().join("config.toml");
        std::fs::write(
            &broken,
            "[ui]\nmin_loading_ms = \"fast\"\nadmin_role = \"ROLE_SUPER\"\n",
        )
        .unwrap();
        let fallback = dir.path().join("fallback.toml");
        std::fs::write(&fallback, "[ui]\nmin_loading_ms = 50\n").unwrap();

        let err = Config::load_first(&[broken.clone(), fallback]).unwrap_err();
        match err {
            ConfigError::Parse { path, .. } => assert_eq!(path, broken),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("BACKOFFICE_API_URL", "https://staging.example.com"),
            ("BACKOFFICE_API_TIMEOUT", "5"),
            ("BACKOFFICE_MIN_LOADING_MS", "not-a-number"),
            ("BACKOFFICE_SESSION_FILE", "/tmp/session.json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "https://staging.example.com");
        assert_eq!(config.api.request_timeout_secs, 5);
        assert_eq!(config.ui.min_loading_ms, 200);
        assert_eq!(config.session.store_path, "/tmp/session.json");
        assert_eq!(config.logging.level, "warn");
    }
}
