//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use secrecy::SecretString;

/// HTTP header carrying the NeoLoad Web account token.
pub const ACCOUNT_TOKEN_HEADER: &str = "accountToken";

/// Default values for optional settings.
pub mod defaults {
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 8080;
    pub const CONNECT_TIMEOUT_SECS: u64 = 5;
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    pub const FETCH_CONCURRENCY: usize = 4;
}

/// Connection settings for the upstream NeoLoad Web API.
#[derive(Debug, Clone)]
pub struct NeoloadSettings {
    /// Base URL of the API, without trailing slash (e.g. `https://neoload-api.example.com`)
    pub server_url: String,
    /// Account token sent with every upstream request
    pub api_token: SecretString,
    /// Trust any TLS certificate presented by the upstream server
    pub accept_invalid_certs: bool,
    /// Connect timeout for upstream calls
    pub connect_timeout: Duration,
    /// Total timeout for a single upstream call
    pub request_timeout: Duration,
    /// Maximum number of workspaces fetched in parallel per request
    pub fetch_concurrency: usize,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Worker count; `None` means one per CPU
    pub workers: Option<usize>,
    /// Probe `/v3/information` before accepting connections
    pub startup_check: bool,
    /// Upstream API settings
    pub neoload: NeoloadSettings,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Environment variables:
    /// - `NEOLOAD_SERVER` (or `Server`): NeoLoad Web API base URL - REQUIRED
    /// - `NEOLOAD_TOKEN` (or `Token`): NeoLoad Web account token - REQUIRED
    /// - `NLS_HOST`: Server host (default: 0.0.0.0)
    /// - `NLS_PORT`: Server port (default: 8080)
    /// - `NLS_WORKERS`: Worker count (default: number of CPUs)
    /// - `NEOLOAD_ACCEPT_INVALID_CERTS`: Trust any upstream certificate (default: false)
    /// - `NEOLOAD_CONNECT_TIMEOUT_SECS`: Upstream connect timeout (default: 5)
    /// - `NEOLOAD_REQUEST_TIMEOUT_SECS`: Upstream request timeout (default: 30)
    /// - `NEOLOAD_FETCH_CONCURRENCY`: Parallel workspace fetches (default: 4)
    /// - `NEOLOAD_STARTUP_CHECK`: Probe the upstream API at startup (default: true)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // Spring-style names are accepted so existing `-e Server=... -e Token=...` deployments keep working
        let server_url = get("NEOLOAD_SERVER")
            .or_else(|| get("Server"))
            .ok_or(ConfigError::MissingEnvVar("NEOLOAD_SERVER"))?;
        let server_url = normalize_server_url(&server_url)?;

        let api_token = get("NEOLOAD_TOKEN")
            .or_else(|| get("Token"))
            .map(SecretString::from)
            .ok_or(ConfigError::MissingEnvVar("NEOLOAD_TOKEN"))?;

        let host = get("NLS_HOST").unwrap_or_else(|| defaults::HOST.to_string());

        let port = match get("NLS_PORT") {
            Some(v) => v
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue("NLS_PORT must be a valid port number"))?,
            None => defaults::PORT,
        };

        let workers = match get("NLS_WORKERS") {
            Some(v) => Some(
                v.parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or(ConfigError::InvalidValue("NLS_WORKERS must be a positive number"))?,
            ),
            None => None,
        };

        let accept_invalid_certs = match get("NEOLOAD_ACCEPT_INVALID_CERTS") {
            Some(v) => parse_bool(&v).ok_or(ConfigError::InvalidValue(
                "NEOLOAD_ACCEPT_INVALID_CERTS must be true or false",
            ))?,
            None => false,
        };

        let startup_check = match get("NEOLOAD_STARTUP_CHECK") {
            Some(v) => parse_bool(&v).ok_or(ConfigError::InvalidValue(
                "NEOLOAD_STARTUP_CHECK must be true or false",
            ))?,
            None => true,
        };

        let connect_timeout_secs = match get("NEOLOAD_CONNECT_TIMEOUT_SECS") {
            Some(v) => v.parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue("NEOLOAD_CONNECT_TIMEOUT_SECS must be a valid number")
            })?,
            None => defaults::CONNECT_TIMEOUT_SECS,
        };

        let request_timeout_secs = match get("NEOLOAD_REQUEST_TIMEOUT_SECS") {
            Some(v) => v.parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue("NEOLOAD_REQUEST_TIMEOUT_SECS must be a valid number")
            })?,
            None => defaults::REQUEST_TIMEOUT_SECS,
        };

        let fetch_concurrency = match get("NEOLOAD_FETCH_CONCURRENCY") {
            Some(v) => v.parse::<usize>().ok().filter(|n| *n > 0).ok_or(
                ConfigError::InvalidValue("NEOLOAD_FETCH_CONCURRENCY must be a positive number"),
            )?,
            None => defaults::FETCH_CONCURRENCY,
        };

        Ok(Config {
            host,
            port,
            workers,
            startup_check,
            neoload: NeoloadSettings {
                server_url,
                api_token,
                accept_invalid_certs,
                connect_timeout: Duration::from_secs(connect_timeout_secs),
                request_timeout: Duration::from_secs(request_timeout_secs),
                fetch_concurrency,
            },
        })
    }

    /// Get the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Worker count to start, falling back to the CPU count.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }
}

fn normalize_server_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidValue(
            "NEOLOAD_SERVER must start with http:// or https://",
        ));
    }
    Ok(trimmed.to_string())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),
}
