//! NeoLoad statistics server - main entry point.
//!
//! Validates configuration, probes the NeoLoad Web API, then starts the
//! Actix-web server.

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use neoload_stats_lib::config::Config;
use neoload_stats_lib::services::{NeoloadClient, StatisticsService};
use neoload_stats_lib::{api, middleware};

/// Check that the upstream API accepts our token and log its environment.
async fn probe_upstream(client: &NeoloadClient) -> Result<(), String> {
    let information = client.information().await.map_err(|e| e.to_string())?;

    if let Some(message) = information.message {
        return Err(format!("message: {}", message));
    }

    info!("====== Environment and configuration ======");
    info!(
        "front_url: {}",
        information.front_url.as_deref().unwrap_or("unknown")
    );
    info!("api_url: {}", client.base_url());
    info!(
        "filestorage_url: {}",
        information.filestorage_url.as_deref().unwrap_or("unknown")
    );
    info!(
        "version: {}",
        information.version.as_deref().unwrap_or("unknown")
    );
    info!("===========================================");
    Ok(())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Check for --health-check flag (used by Docker HEALTHCHECK)
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(if Config::from_env().is_ok() { 0 } else { 1 });
    }

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("NeoLoad API server and token must be set, e.g.");
            error!("  -e NEOLOAD_SERVER=\"https://neoload-api.example.com\" -e NEOLOAD_TOKEN=XXX");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  NeoLoad Test Statistics Server");
    info!("  Version: {}", env!("CARGO_PKG_VERSION"));
    info!("========================================");

    let client = match NeoloadClient::new(&config.neoload) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    if config.startup_check {
        if let Err(e) = probe_upstream(&client).await {
            error!("NeoLoad API check failed: {}", e);
            std::process::exit(1);
        }
    } else {
        warn!("Startup check disabled; NeoLoad API connectivity not verified");
    }

    let statistics = web::Data::new(StatisticsService::new(
        client,
        config.neoload.fetch_concurrency,
    ));

    let bind_address = config.bind_address();
    let worker_count = config.worker_count();
    info!(
        "Starting server at http://{} ({} workers)",
        bind_address, worker_count
    );
    info!("Swagger UI available at: http://{}/swagger-ui/", bind_address);

    HttpServer::new(move || {
        // Dashboards are served from other origins
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "OPTIONS"])
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(middleware::RequestLogger)
            .app_data(statistics.clone())
            .configure(api::configure_health_routes)
            .configure(api::configure_statistics_routes)
            .configure(api::configure_docs_routes)
    })
    .workers(worker_count)
    .bind(&bind_address)?
    .run()
    .await
}
