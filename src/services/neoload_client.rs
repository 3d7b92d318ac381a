//! HTTP client for the NeoLoad Web v3 API.
//!
//! Every call sends the account token in the `accountToken` header. A body
//! containing the word `Unauthorized` is reported as [`UpstreamError::Unauthorized`]
//! regardless of the HTTP status, since NeoLoad Web does not use 401 consistently.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use crate::config::{ACCOUNT_TOKEN_HEADER, NeoloadSettings};
use crate::error::{UNAUTHORIZED_KEYWORD, UpstreamError};
use crate::models::{TestRunRecord, UpstreamInformation, Workspace};

/// Page size for test-result listings. Only the first page is read.
pub const TEST_RESULTS_LIMIT: u32 = 200;

/// NeoLoad Web API client.
#[derive(Clone)]
pub struct NeoloadClient {
    base_url: String,
    token: SecretString,
    http_client: reqwest::Client,
}

impl std::fmt::Debug for NeoloadClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NeoloadClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl NeoloadClient {
    /// Create a new client from settings.
    pub fn new(settings: &NeoloadSettings) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .build()?;

        if settings.accept_invalid_certs {
            tracing::warn!(
                "NEOLOAD_ACCEPT_INVALID_CERTS is enabled; upstream TLS certificates are not verified"
            );
        }

        info!(
            "NeoLoad client initialized (server={}, connect_timeout={:?}, request_timeout={:?})",
            settings.server_url, settings.connect_timeout, settings.request_timeout
        );

        Ok(Self {
            base_url: settings.server_url.clone(),
            token: settings.api_token.clone(),
            http_client,
        })
    }

    /// Base URL of the upstream API.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /v3/information`.
    pub async fn information(&self) -> Result<UpstreamInformation, UpstreamError> {
        self.get_json("/v3/information").await
    }

    /// `GET /v3/workspaces`.
    pub async fn list_workspaces(&self) -> Result<Vec<Workspace>, UpstreamError> {
        self.get_json("/v3/workspaces").await
    }

    /// `GET /v3/workspaces/{id}/test-results?limit=200`.
    pub async fn list_test_results(
        &self,
        workspace_id: &str,
    ) -> Result<Vec<TestRunRecord>, UpstreamError> {
        self.get_json(&format!(
            "/v3/workspaces/{}/test-results?limit={}",
            workspace_id, TEST_RESULTS_LIMIT
        ))
        .await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        let body = self.get_text(&url).await?;
        serde_json::from_str(&body).map_err(|source| UpstreamError::Decode { url, source })
    }

    async fn get_text(&self, url: &str) -> Result<String, UpstreamError> {
        debug!("GET {}", url);

        let transport = |source| UpstreamError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self
            .http_client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(ACCOUNT_TOKEN_HEADER, self.token.expose_secret())
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        check_authorized(&body)?;

        if !status.is_success() {
            error!("NeoLoad API returned {} for {}", status, url);
            return Err(UpstreamError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(body)
    }
}

/// Reject bodies carrying the upstream's unauthorized marker.
pub fn check_authorized(body: &str) -> Result<(), UpstreamError> {
    if body.contains(UNAUTHORIZED_KEYWORD) {
        error!("{}", UpstreamError::Unauthorized);
        return Err(UpstreamError::Unauthorized);
    }
    Ok(())
}
