//! E2E tests: health check.

use super::test_helpers::*;

#[actix_rt::test]
async fn test_healthcheck_returns_ok() {
    // Health does not touch the upstream, so an unreachable one is fine
    let app = create_test_app("http://127.0.0.1:1").await;
    let resp = get(&app, "/healthcheck").await;

    assert_eq!(resp.status, 200);
    assert_eq!(resp.cache_control.as_deref(), Some("no-cache"));
    let body = resp.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "API Health Check");
}
