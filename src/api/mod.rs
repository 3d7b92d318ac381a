//! API endpoint modules.

pub mod health;
pub mod openapi;
pub mod statistics;

pub use health::configure_health_routes;
pub use openapi::{ApiDoc, configure_docs_routes};
pub use statistics::configure_statistics_routes;
