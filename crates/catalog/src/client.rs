//! Catalog client for the print-on-demand service
//!
//! Composes a [`CatalogTransport`] (one request per call), a [`RetryPolicy`]
//! and the shared blueprint [`CatalogCache`].

use anyhow::{Context, Result};
use printify_agent_common::{CatalogItem, CatalogResult, SystemConfig};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

use crate::cache::CatalogCache;
use crate::retry::RetryPolicy;
use crate::transport::{CatalogTransport, HttpTransport};

/// URL layout of the catalog service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEndpoints {
    base_url: String,
}

impl CatalogEndpoints {
    /// `base_url` is the API root, e.g. `https://api.printify.com/v1`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn blueprints(&self) -> String {
        format!("{}/catalog/blueprints.json", self.base_url)
    }

    pub fn print_providers(&self, blueprint_id: i64) -> String {
        format!(
            "{}/catalog/blueprints/{}/print_providers.json",
            self.base_url, blueprint_id
        )
    }

    pub fn variants(&self, blueprint_id: i64, print_provider_id: i64) -> String {
        format!(
            "{}/catalog/blueprints/{}/print_providers/{}/variants.json",
            self.base_url, blueprint_id, print_provider_id
        )
    }
}

#[derive(Clone)]
pub struct CatalogClient {
    transport: Arc<dyn CatalogTransport>,
    endpoints: CatalogEndpoints,
    retry: RetryPolicy,
    cache: CatalogCache,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("endpoints", &self.endpoints)
            .field("retry", &self.retry)
            .field("cache", &self.cache)
            .finish()
    }
}

impl CatalogClient {
    pub fn new(
        transport: Arc<dyn CatalogTransport>,
        endpoints: CatalogEndpoints,
        retry: RetryPolicy,
        cache: CatalogCache,
    ) -> Self {
        Self {
            transport,
            endpoints,
            retry,
            cache,
        }
    }

    /// Build an HTTP-backed client from configuration
    ///
    /// # Errors
    ///
    /// Returns error if no API token is configured or the HTTP client
    /// cannot be built
    #[instrument(skip_all, fields(base_url = %config.catalog.base_url))]
    pub fn from_config(config: &SystemConfig) -> Result<Self> {
        let catalog = &config.catalog;
        let token = config.api_token().context("Catalog credential unavailable")?;
        let transport = HttpTransport::new(
            token,
            Duration::from_secs(catalog.timeout_secs),
            &catalog.user_agent,
        )
        .context("Failed to build catalog transport")?;

        let client = Self::new(
            Arc::new(transport),
            CatalogEndpoints::new(catalog.base_url.clone()),
            RetryPolicy::from(&catalog.retry),
            CatalogCache::new(catalog.cache.blueprint_ttl()),
        );

        info!(
            "Initialized catalog client: base_url={}, max_attempts={}, blueprint_ttl={}s",
            catalog.base_url, catalog.retry.max_attempts, catalog.cache.blueprint_ttl_secs
        );

        Ok(client)
    }

    pub fn endpoints(&self) -> &CatalogEndpoints {
        &self.endpoints
    }

    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }

    /// Fetch any catalog resource with retry-with-backoff, uncached
    ///
    /// # Errors
    ///
    /// `CatalogError::Upstream` once the attempt budget is spent (rate-limited
    /// responses included), `CatalogError::MalformedPayload` immediately
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> CatalogResult<Vec<CatalogItem>> {
        self.retry
            .run(url, move || self.transport.get(url))
            .await
    }

    /// The full blueprint catalog, served from the shared cache while fresh
    #[instrument(skip(self))]
    pub async fn fetch_blueprints(&self) -> CatalogResult<Arc<Vec<CatalogItem>>> {
        let url = self.endpoints.blueprints();
        let entry = self.cache.get_or_fetch(|| self.fetch(&url)).await?;
        Ok(entry.items)
    }

    /// Print providers offering `blueprint_id`; always fetched fresh
    #[instrument(skip(self))]
    pub async fn fetch_print_providers(&self, blueprint_id: i64) -> CatalogResult<Vec<CatalogItem>> {
        self.fetch(&self.endpoints.print_providers(blueprint_id)).await
    }

    /// Variants for a blueprint/provider pair; always fetched fresh
    #[instrument(skip(self))]
    pub async fn fetch_variants(
        &self,
        blueprint_id: i64,
        print_provider_id: i64,
    ) -> CatalogResult<Vec<CatalogItem>> {
        self.fetch(&self.endpoints.variants(blueprint_id, print_provider_id))
            .await
    }
}
