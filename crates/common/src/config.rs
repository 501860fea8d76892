use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::error::{ConfigError, ConfigResult};

/// Environment variable that overrides `catalog.api_token`
pub const API_TOKEN_ENV: &str = "PRINTIFY_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_token: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_blueprint_ttl_secs")]
    pub blueprint_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    #[serde(default = "default_shortlist_size")]
    pub shortlist_size: usize,
    #[serde(default = "default_summary_max_items")]
    pub summary_max_items: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_base_url() -> String {
    "https://api.printify.com/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("printify-agent/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    4_000
}

fn default_max_backoff_ms() -> u64 {
    10_000
}

fn default_blueprint_ttl_secs() -> u64 {
    3_600
}

fn default_shortlist_size() -> usize {
    5
}

fn default_summary_max_items() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: String::new(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            retry: RetryConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            blueprint_ttl_secs: default_blueprint_ttl_secs(),
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            shortlist_size: default_shortlist_size(),
            summary_max_items: default_summary_max_items(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl RetryConfig {
    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }
}

impl CacheConfig {
    pub fn blueprint_ttl(&self) -> Duration {
        Duration::from_secs(self.blueprint_ttl_secs)
    }
}

impl SystemConfig {
    /// Load and validate a TOML config file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: SystemConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Like `from_file`, but a missing file yields the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let url = Url::parse(&self.catalog.base_url).map_err(|e| {
            ConfigError::validation("catalog.base_url", e.to_string())
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::validation(
                "catalog.base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.catalog.timeout_secs == 0 {
            return Err(ConfigError::validation(
                "catalog.timeout_secs",
                "must be greater than 0",
            ));
        }

        let retry = &self.catalog.retry;
        if retry.max_attempts == 0 {
            return Err(ConfigError::validation(
                "catalog.retry.max_attempts",
                "must be at least 1",
            ));
        }
        if retry.initial_backoff_ms > retry.max_backoff_ms {
            return Err(ConfigError::validation(
                "catalog.retry.initial_backoff_ms",
                "must not exceed max_backoff_ms",
            ));
        }

        if self.catalog.cache.blueprint_ttl_secs == 0 {
            return Err(ConfigError::validation(
                "catalog.cache.blueprint_ttl_secs",
                "must be greater than 0",
            ));
        }
        if self.selection.shortlist_size == 0 {
            return Err(ConfigError::validation(
                "selection.shortlist_size",
                "must be greater than 0",
            ));
        }
        if self.selection.summary_max_items == 0 {
            return Err(ConfigError::validation(
                "selection.summary_max_items",
                "must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Resolve the bearer credential: environment first, then the file value
    pub fn api_token(&self) -> ConfigResult<String> {
        let token = std::env::var(API_TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| self.catalog.api_token.clone());

        if token.trim().is_empty() {
            return Err(ConfigError::MissingCredential {
                env_var: API_TOKEN_ENV.to_string(),
            });
        }
        Ok(token.trim().to_string())
    }
}
