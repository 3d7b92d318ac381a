//! Domain models for the NeoLoad statistics server.

pub mod statistics;
pub mod test_run;

// Re-export commonly used types
pub use statistics::{
    StatisticsQuery, StatisticsResponse, TestAggregate, WorkspaceSummary, format_pass_rate,
};
pub use test_run::{QualityStatus, TestRunRecord, UpstreamInformation, Workspace};
