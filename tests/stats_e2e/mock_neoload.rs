//! Mock NeoLoad Web API for E2E tests.
//!
//! Starts an in-process HTTP server serving the v3 endpoints the statistics
//! service consumes, and records every request it receives.

use actix_web::{App, HttpRequest, HttpResponse, HttpServer, get, web};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

/// Token the mock accepts unless a test overrides it.
pub const VALID_TOKEN: &str = "test-account-token";

/// Shared state for the mock API.
#[derive(Default)]
pub struct MockNeoloadState {
    pub token: String,
    pub workspaces: Vec<Value>,
    pub test_results: HashMap<String, Vec<Value>>,
    /// Path and query of every request received, in order
    pub requests: Vec<String>,
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({"code": "401", "message": "Unauthorized"}))
}

fn authorize(req: &HttpRequest, state: &mut MockNeoloadState) -> bool {
    let uri = match req.query_string() {
        "" => req.path().to_string(),
        q => format!("{}?{}", req.path(), q),
    };
    state.requests.push(uri);

    req.headers()
        .get("accountToken")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|t| t == state.token)
}

#[get("/v3/information")]
async fn information(
    req: HttpRequest,
    state: web::Data<Arc<Mutex<MockNeoloadState>>>,
) -> HttpResponse {
    let mut state = state.lock().unwrap();
    if !authorize(&req, &mut state) {
        return unauthorized();
    }
    HttpResponse::Ok().json(json!({
        "front_url": "https://neoload.example.com",
        "filestorage_url": "https://files.neoload.example.com",
        "version": "4.2.0"
    }))
}

#[get("/v3/workspaces")]
async fn workspaces(
    req: HttpRequest,
    state: web::Data<Arc<Mutex<MockNeoloadState>>>,
) -> HttpResponse {
    let mut state = state.lock().unwrap();
    if !authorize(&req, &mut state) {
        return unauthorized();
    }
    HttpResponse::Ok().json(&state.workspaces)
}

#[get("/v3/workspaces/{id}/test-results")]
async fn test_results(
    req: HttpRequest,
    path: web::Path<String>,
    state: web::Data<Arc<Mutex<MockNeoloadState>>>,
) -> HttpResponse {
    let mut state = state.lock().unwrap();
    if !authorize(&req, &mut state) {
        return unauthorized();
    }
    match state.test_results.get(path.as_str()) {
        Some(results) => HttpResponse::Ok().json(results),
        None => HttpResponse::NotFound().json(json!({"message": "Workspace not found"})),
    }
}

/// Mock NeoLoad Web API server.
pub struct MockNeoload {
    pub base_url: String,
    pub state: Arc<Mutex<MockNeoloadState>>,
}

impl MockNeoload {
    /// Start the mock on an ephemeral port.
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(MockNeoloadState {
            token: VALID_TOKEN.to_string(),
            ..Default::default()
        }));

        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind");
        let port = listener.local_addr().unwrap().port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let state_data = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(state_data.clone()))
                .service(information)
                .service(workspaces)
                .service(test_results)
        })
        .workers(1)
        .listen(listener)
        .expect("failed to listen")
        .disable_signals()
        .run();

        // Lives as long as the test's runtime
        tokio::spawn(server);

        MockNeoload { base_url, state }
    }

    /// Register a workspace and the runs its test-results endpoint returns.
    pub fn add_workspace(&self, id: &str, name: &str, runs: Vec<Value>) {
        let mut state = self.state.lock().unwrap();
        state.workspaces.push(json!({"id": id, "name": name}));
        state.test_results.insert(id.to_string(), runs);
    }

    /// List a workspace without serving its test results.
    pub fn add_workspace_without_results(&self, id: &str, name: &str) {
        let mut state = self.state.lock().unwrap();
        state.workspaces.push(json!({"id": id, "name": name}));
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }
}

/// Build a test-run record as NeoLoad Web returns it.
pub fn run(test_id: &str, project: &str, scenario: &str, status: &str, start: i64, end: i64) -> Value {
    json!({
        "id": format!("{}-{}-{}", test_id, start, end),
        "name": format!("{} run", test_id),
        "testId": test_id,
        "project": project,
        "scenario": scenario,
        "qualityStatus": status,
        "status": "TERMINATED",
        "startDate": start,
        "endDate": end
    })
}
