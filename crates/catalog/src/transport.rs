//! Single-attempt HTTP access to the catalog service
//!
//! A transport performs exactly one request per call. Retrying and caching
//! are layered on top by [`crate::client::CatalogClient`].

use async_trait::async_trait;
use printify_agent_common::{CatalogError, CatalogItem, CatalogResult, UpstreamError};
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

/// Longest error-body excerpt carried into an `UpstreamError`
const MAX_ERROR_BODY: usize = 200;

#[async_trait]
pub trait CatalogTransport: Send + Sync {
    /// GET `url` and decode the catalog list it returns
    async fn get(&self, url: &str) -> CatalogResult<Vec<CatalogItem>>;
}

/// Bearer-authenticated reqwest transport with connection pooling
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    api_token: String,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("api_token", &"<redacted>")
            .finish()
    }
}

impl HttpTransport {
    /// Create a transport
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Client` if the HTTP client cannot be built
    pub fn new(api_token: impl Into<String>, timeout: Duration, user_agent: &str) -> CatalogResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| CatalogError::Client(e.to_string()))?;

        Ok(Self {
            client,
            api_token: api_token.into(),
        })
    }
}

#[async_trait]
impl CatalogTransport for HttpTransport {
    #[instrument(skip(self), fields(url = %url))]
    async fn get(&self, url: &str) -> CatalogResult<Vec<CatalogItem>> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| UpstreamError::network(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(MAX_ERROR_BODY).collect();
            debug!(status = status.as_u16(), "Catalog service returned error status");
            return Err(UpstreamError::status(status.as_u16(), excerpt).into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::network(format!("failed to read response body: {}", e)))?;

        let items = decode_items(url, &bytes)?;
        debug!(count = items.len(), "Decoded catalog items");
        Ok(items)
    }
}

/// Decode a catalog response body.
///
/// Accepts a bare array, or an object wrapping the array under `variants`
/// or `data`.
pub fn decode_items(url: &str, body: &[u8]) -> CatalogResult<Vec<CatalogItem>> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| CatalogError::malformed(url, e))?;

    let list = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => match ["variants", "data"]
            .iter()
            .find_map(|key| map.remove(*key).filter(Value::is_array))
        {
            Some(list) => list,
            None => {
                return Err(CatalogError::malformed(
                    url,
                    "expected a JSON array or an object with a `variants`/`data` array",
                ))
            }
        },
        other => {
            return Err(CatalogError::malformed(
                url,
                format!("expected a JSON array, found {}", json_type(&other)),
            ))
        }
    };

    serde_json::from_value(list).map_err(|e| CatalogError::malformed(url, e))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
