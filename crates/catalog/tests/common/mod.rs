//! Common test utilities for catalog testing

pub mod mock_catalog_server;

use printify_agent_catalog::{CatalogCache, CatalogClient, CatalogEndpoints, HttpTransport, RetryPolicy};
use printify_agent_common::CatalogItem;
use std::sync::Arc;
use std::time::Duration;

pub use mock_catalog_server::{MockCatalogServer, TEST_TOKEN};

/// Initialize logging for tests
pub fn init_test_logging() {
    printify_agent_common::init_test_tracing();
}

/// Millisecond-scale retry policy with the production attempt budget
pub fn fast_retry_policy() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(5), Duration::from_millis(20))
}

/// Client wired to the mock server through the real HTTP transport
pub fn create_test_client(server: &MockCatalogServer, ttl: Duration) -> CatalogClient {
    let transport = HttpTransport::new(TEST_TOKEN, Duration::from_secs(5), "printify-agent-tests")
        .expect("transport should build");
    CatalogClient::new(
        Arc::new(transport),
        CatalogEndpoints::new(server.api_root()),
        fast_retry_policy(),
        CatalogCache::new(ttl),
    )
}

pub fn sample_blueprints() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new(1, "Mug"),
        CatalogItem::new(2, "T-Shirt"),
        CatalogItem::new(3, "Coffee Mug"),
    ]
}
