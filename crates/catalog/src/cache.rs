//! Process-wide cache for the blueprint catalog
//!
//! The blueprint list is identical for every session, so one entry serves
//! everyone. The entry is replaced wholesale when its TTL runs out; print
//! provider and variant lists are never cached.

use chrono::{DateTime, Utc};
use moka::future::Cache;
use printify_agent_common::{CatalogError, CatalogItem, CatalogResult};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

const BLUEPRINTS_KEY: &str = "blueprints";

/// One complete snapshot of the blueprint catalog
#[derive(Debug, Clone)]
pub struct CachedCatalog {
    pub items: Arc<Vec<CatalogItem>>,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct CatalogCache {
    inner: Cache<&'static str, CachedCatalog>,
    ttl: Duration,
}

impl std::fmt::Debug for CatalogCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}

impl CatalogCache {
    pub fn new(ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(1)
            .time_to_live(ttl)
            .build();
        Self { inner, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the live entry, or run `fetch` and store its result.
    ///
    /// Concurrent misses share a single `fetch`. Failures are handed to every
    /// waiting caller and never stored.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> CatalogResult<CachedCatalog>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = CatalogResult<Vec<CatalogItem>>>,
    {
        if let Some(entry) = self.inner.get(&BLUEPRINTS_KEY).await {
            debug!(fetched_at = %entry.fetched_at, "Blueprint cache hit");
            return Ok(entry);
        }

        debug!("Blueprint cache miss");
        let entry = self
            .inner
            .try_get_with(BLUEPRINTS_KEY, async move {
                let items = fetch().await?;
                info!(count = items.len(), "Refreshed blueprint catalog");
                Ok::<_, CatalogError>(CachedCatalog {
                    items: Arc::new(items),
                    fetched_at: Utc::now(),
                })
            })
            .await
            .map_err(|e: Arc<CatalogError>| (*e).clone())?;

        Ok(entry)
    }

    /// The live entry, if any, without fetching
    pub async fn peek(&self) -> Option<CachedCatalog> {
        self.inner.get(&BLUEPRINTS_KEY).await
    }

    /// Drop the entry so the next lookup refetches
    pub async fn invalidate(&self) {
        self.inner.invalidate(&BLUEPRINTS_KEY).await;
        debug!("Blueprint cache invalidated");
    }
}
