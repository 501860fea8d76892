//! Shared fixtures for selection funnel tests

use printify_agent_catalog::{CatalogCache, CatalogClient, CatalogEndpoints, HttpTransport, RetryPolicy};
use printify_agent_common::CatalogItem;
use printify_agent_selection::SelectionStateMachine;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "selection-test-token";

pub const BLUEPRINTS_PATH: &str = "/v1/catalog/blueprints.json";

pub fn print_providers_path(blueprint_id: i64) -> String {
    format!("/v1/catalog/blueprints/{}/print_providers.json", blueprint_id)
}

pub fn variants_path(blueprint_id: i64, print_provider_id: i64) -> String {
    format!(
        "/v1/catalog/blueprints/{}/print_providers/{}/variants.json",
        blueprint_id, print_provider_id
    )
}

/// Initialize logging for tests
pub fn init_test_logging() {
    printify_agent_common::init_test_tracing();
}

pub fn blueprint_catalog() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new(1, "Mug"),
        CatalogItem::new(2, "T-Shirt"),
        CatalogItem::new(3, "Coffee Mug"),
    ]
}

pub fn coffee_mug_providers() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new(29, "Monster Digital"),
        CatalogItem::new(5, "Print Geek"),
        CatalogItem::new(16, "MWW On Demand"),
    ]
}

pub fn print_geek_variants() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new(12100, "11oz"),
        CatalogItem::new(12101, "15oz"),
    ]
}

/// Mock catalog service plus a state machine pointed at it
pub struct Harness {
    pub server: MockServer,
    pub machine: SelectionStateMachine,
}

impl Harness {
    pub async fn start() -> Self {
        init_test_logging();
        let server = MockServer::start().await;
        let transport = HttpTransport::new(TEST_TOKEN, Duration::from_secs(5), "selection-tests")
            .expect("transport should build");
        let client = CatalogClient::new(
            Arc::new(transport),
            CatalogEndpoints::new(format!("{}/v1", server.uri())),
            RetryPolicy::new(3, Duration::from_millis(5), Duration::from_millis(20)),
            CatalogCache::new(Duration::from_secs(3600)),
        );
        let machine = SelectionStateMachine::with_limits(client, 5, 5);
        Self { server, machine }
    }

    /// Serve `items` on `route`, expecting exactly `calls` requests
    pub async fn serve(&self, route: &str, items: &[CatalogItem], calls: u64) {
        Mock::given(method("GET"))
            .and(path(route))
            .and(header("authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(items))
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    pub async fn serve_json(&self, route: &str, body: Value, calls: u64) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    pub async fn fail(&self, route: &str, status: u16, calls: u64) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status))
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    /// Serve the standard catalog used by most funnel tests
    pub async fn serve_standard_catalog(&self) {
        self.serve(BLUEPRINTS_PATH, &blueprint_catalog(), 1).await;
        self.serve(&print_providers_path(3), &coffee_mug_providers(), 1)
            .await;
        self.serve(&variants_path(3, 5), &print_geek_variants(), 1)
            .await;
    }
}
