//! Shared test helpers for statistics E2E tests.

use actix_web::{App, dev::ServiceResponse, test, web};
use neoload_stats_lib::config::NeoloadSettings;
use neoload_stats_lib::middleware::RequestLogger;
use neoload_stats_lib::services::{NeoloadClient, StatisticsService};
use neoload_stats_lib::api;
use secrecy::SecretString;
use serde_json::Value;
use std::time::Duration;

use super::mock_neoload::VALID_TOKEN;

/// Upstream settings pointing at `base_url`.
pub fn settings(base_url: &str, token: &str) -> NeoloadSettings {
    NeoloadSettings {
        server_url: base_url.to_string(),
        api_token: SecretString::from(token.to_string()),
        accept_invalid_certs: false,
        connect_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_secs(5),
        fetch_concurrency: 2,
    }
}

/// Create a test app talking to `base_url` with the valid token.
pub async fn create_test_app(
    base_url: &str,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    create_test_app_with_token(base_url, VALID_TOKEN).await
}

/// Create a test app talking to `base_url` with an explicit token.
pub async fn create_test_app_with_token(
    base_url: &str,
    token: &str,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    let settings = settings(base_url, token);
    let client = NeoloadClient::new(&settings).expect("failed to build client");
    let service = StatisticsService::new(client, settings.fetch_concurrency);

    test::init_service(
        App::new()
            .wrap(RequestLogger)
            .app_data(web::Data::new(service))
            .configure(api::configure_health_routes)
            .configure(api::configure_statistics_routes)
            .configure(api::configure_docs_routes),
    )
    .await
}

/// Response captured for assertions.
pub struct CapturedResponse {
    pub status: u16,
    pub cache_control: Option<String>,
    pub content_type: Option<String>,
    pub raw: String,
}

impl CapturedResponse {
    /// Parse the body as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.raw)
            .unwrap_or_else(|e| panic!("body is not JSON ({}): {}", e, self.raw))
    }
}

/// Issue a GET and capture status, headers and body.
pub async fn get<S>(app: &S, uri: &str) -> CapturedResponse
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(app, req).await;

    let header = |name: &str| {
        resp.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let status = resp.status().as_u16();
    let cache_control = header("cache-control");
    let content_type = header("content-type");

    let body = test::read_body(resp).await;
    CapturedResponse {
        status,
        cache_control,
        content_type,
        raw: String::from_utf8_lossy(&body).into_owned(),
    }
}

/// Find a test entry within a workspace summary.
pub fn find_test<'a>(workspace: &'a Value, test_id: &str) -> &'a Value {
    workspace["tests"]
        .as_array()
        .expect("tests must be an array")
        .iter()
        .find(|t| t["testId"] == test_id)
        .unwrap_or_else(|| panic!("test {} not found in {}", test_id, workspace))
}
