//! OpenAPI documentation configuration.

use actix_web::http::header;
use actix_web::{HttpResponse, get, web};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{api, error, models};

/// Path of the generated OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "NeoLoad Test Statistics API",
        version = "0.1.0",
        description = "Get statistics of NeoLoad tests by workspace"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        api::health::healthcheck,
        api::statistics::get_test_statistics,
    ),
    components(
        schemas(
            error::ErrorResponse,
            api::health::HealthResponse,
            models::TestAggregate,
            models::WorkspaceSummary,
            models::StatisticsResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "NeoLoad Test Statistics", description = "Get statistics of NeoLoad tests by workspace")
    )
)]
pub struct ApiDoc;

/// Send browsers hitting the root to the Swagger UI.
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/swagger-ui/"))
        .finish()
}

/// Configure Swagger UI and the root redirect.
pub fn configure_docs_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url(OPENAPI_JSON_PATH, ApiDoc::openapi()),
    );
}
