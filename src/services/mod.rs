//! Business logic services.

pub mod aggregator;
pub mod neoload_client;
pub mod statistics;

pub use aggregator::{TestIdentity, TestStatsAggregator, TimeWindow, aggregate};
pub use neoload_client::NeoloadClient;
pub use statistics::StatisticsService;
