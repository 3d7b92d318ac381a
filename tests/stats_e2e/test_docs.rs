//! E2E tests: API documentation routes.

use super::test_helpers::*;

#[actix_rt::test]
async fn test_root_redirects_to_swagger_ui() {
    let app = create_test_app("http://127.0.0.1:1").await;
    let req = actix_web::test::TestRequest::get().uri("/").to_request();
    let resp = actix_web::test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 302);
    assert_eq!(
        resp.headers().get("location").and_then(|v| v.to_str().ok()),
        Some("/swagger-ui/")
    );
}

#[actix_rt::test]
async fn test_openapi_document_is_served() {
    let app = create_test_app("http://127.0.0.1:1").await;
    let resp = get(&app, "/api-docs/openapi.json").await;

    assert_eq!(resp.status, 200);
    let doc = resp.json();
    assert!(doc["paths"]["/test-statistics"]["get"].is_object());
    assert!(doc["paths"]["/healthcheck"]["get"].is_object());
}
