//! Domain error types for the statistics server.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::fmt;

/// Marker the NeoLoad Web API puts in bodies of rejected requests.
pub const UNAUTHORIZED_KEYWORD: &str = "Unauthorized";

/// Failures talking to the upstream NeoLoad Web API.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Upstream rejected the account token
    #[error("ERROR: Unauthorized - check API token")]
    Unauthorized,

    /// Network, TLS or timeout failure
    #[error("Upstream request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status without an authentication marker
    #[error("Upstream request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    /// Body did not have the expected JSON shape
    #[error("Unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Upstream API call failed
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Response body could not be rendered
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Upstream(err) => {
                tracing::error!("Error fetching test statistics: {}", err);
            }
            AppError::Serialization(err) => {
                tracing::error!("Failed to render response: {}", err);
            }
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

/// Error response body matching OpenAPI schema.
#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
