use thiserror::Error;

/// HTTP status the catalog service uses for rate limiting
pub const RATE_LIMIT_STATUS: u16 = 429;

/// A catalog request that still failed after the retry budget was spent.
///
/// `status` is `None` for network-level failures (connect, timeout, reset).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("catalog request failed after {attempts} attempt(s): {message}")]
pub struct UpstreamError {
    pub status: Option<u16>,
    pub message: String,
    pub attempts: u32,
}

impl UpstreamError {
    /// Non-2xx response from the catalog service
    pub fn status(status: u16, body: impl AsRef<str>) -> Self {
        let body = body.as_ref().trim();
        let message = if body.is_empty() {
            format!("status {}", status)
        } else {
            format!("status {}: {}", status, body)
        };
        Self {
            status: Some(status),
            message,
            attempts: 1,
        }
    }

    /// Transport failure before any status was received
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            attempts: 1,
        }
    }

    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    /// The rate-limit marker callers map to a distinct reply
    pub fn is_rate_limited(&self) -> bool {
        self.status == Some(RATE_LIMIT_STATUS)
    }
}

/// Errors raised by the catalog client.
///
/// Clone so a single failed fetch can be handed to every caller waiting on it.
#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Malformed catalog payload from {url}: {reason}")]
    MalformedPayload { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    Client(String),
}

impl CatalogError {
    pub fn malformed(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedPayload {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Only upstream failures are worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration value for {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Missing catalog API token (set {env_var} or catalog.api_token)")]
    MissingCredential { env_var: String },
}

impl ConfigError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
