//! Mock catalog service for exercising the HTTP client

use printify_agent_common::CatalogItem;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Bearer credential the mock server requires
pub const TEST_TOKEN: &str = "test-token";

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

pub struct MockCatalogServer {
    server: MockServer,
}

impl MockCatalogServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// API root to hand to `CatalogEndpoints`
    pub fn api_root(&self) -> String {
        format!("{}/v1", self.server.uri())
    }

    /// Serve `items` as a JSON array on `route`, expecting exactly `calls` hits
    pub async fn serve_items(&self, route: &str, items: &[CatalogItem], calls: u64) {
        Mock::given(method("GET"))
            .and(path(route))
            .and(header("authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(items))
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    /// Serve an arbitrary JSON body on `route`
    pub async fn serve_json(&self, route: &str, body: Value, calls: u64) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    /// Fail `route` with `status`, expecting exactly `calls` hits
    pub async fn fail_with(&self, route: &str, status: u16, calls: u64) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(status).set_body_json(json!({ "error": "upstream failure" })),
            )
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    /// Fail the first `times` requests to `route` with `status`
    pub async fn fail_first(&self, route: &str, status: u16, times: u64) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status))
            .up_to_n_times(times)
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Requests received so far on `route`
    pub async fn hits(&self, route: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == route)
            .count()
    }
}
