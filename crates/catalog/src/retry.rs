//! Retry-with-backoff policy for catalog requests

use printify_agent_common::{CatalogError, CatalogResult, RetryConfig};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Bounded exponential backoff.
///
/// Delays are applied between attempts only: `initial_backoff` after the first
/// failure, doubling after each further failure, never above `max_backoff`.
/// A 429 spends the same attempt budget as any other upstream failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(4),
            max_backoff: Duration::from_secs(10),
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            initial_backoff: config.initial_backoff(),
            max_backoff: config.max_backoff(),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_backoff: Duration, max_backoff: Duration) -> Self {
        Self {
            max_attempts,
            initial_backoff,
            max_backoff,
        }
    }

    /// Delay to wait after failed attempt number `attempt` (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error,
    /// or the attempt budget is spent.
    ///
    /// The final `UpstreamError` records how many attempts were made.
    pub async fn run<T, F, Fut>(&self, operation_name: &str, mut operation: F) -> CatalogResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = CatalogResult<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!("{} succeeded on attempt {}/{}", operation_name, attempt, max_attempts);
                    }
                    return Ok(value);
                }
                Err(CatalogError::Upstream(err)) if attempt < max_attempts => {
                    let delay = self.delay_after(attempt);
                    warn!(
                        status = ?err.status,
                        "{} failed (attempt {}/{}), retrying in {:?}: {}",
                        operation_name, attempt, max_attempts, delay, err.message
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(CatalogError::Upstream(err)) => {
                    warn!(
                        status = ?err.status,
                        "{} failed after {} attempt(s): {}",
                        operation_name, attempt, err.message
                    );
                    return Err(err.with_attempts(attempt).into());
                }
                Err(other) => return Err(other),
            }
        }
    }
}
