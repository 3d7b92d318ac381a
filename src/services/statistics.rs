//! Per-workspace statistics collection.

use futures_util::{StreamExt, TryStreamExt, stream};
use tracing::{debug, info};

use crate::error::UpstreamError;
use crate::models::{StatisticsResponse, Workspace, WorkspaceSummary};
use crate::services::aggregator::{TestStatsAggregator, TimeWindow};
use crate::services::neoload_client::NeoloadClient;

/// Builds [`StatisticsResponse`]s from the upstream API.
#[derive(Debug, Clone)]
pub struct StatisticsService {
    client: NeoloadClient,
    fetch_concurrency: usize,
}

impl StatisticsService {
    pub fn new(client: NeoloadClient, fetch_concurrency: usize) -> Self {
        Self {
            client,
            fetch_concurrency: fetch_concurrency.max(1),
        }
    }

    /// Collect statistics for every workspace within `window`.
    ///
    /// Workspaces keep the order in which the upstream lists them. The first
    /// upstream failure aborts the whole collection.
    pub async fn collect(&self, window: TimeWindow) -> Result<StatisticsResponse, UpstreamError> {
        let workspaces = self.client.list_workspaces().await?;
        let total_workspaces = workspaces.len();
        info!(
            "Collecting test statistics for {} workspaces (start={:?}, end={:?})",
            total_workspaces,
            window.start.map(describe_timestamp),
            window.end.map(describe_timestamp)
        );

        let summaries: Vec<WorkspaceSummary> = stream::iter(workspaces)
            .map(|workspace| self.summarize(workspace, window))
            .buffered(self.fetch_concurrency)
            .try_collect()
            .await?;

        Ok(StatisticsResponse {
            start_date: window.start,
            end_date: window.end,
            workspaces: summaries,
            total_workspaces,
        })
    }

    async fn summarize(
        &self,
        workspace: Workspace,
        window: TimeWindow,
    ) -> Result<WorkspaceSummary, UpstreamError> {
        info!("Processing workspace: {} ({})", workspace.name, workspace.id);

        let runs = self.client.list_test_results(&workspace.id).await?;

        let mut aggregator = TestStatsAggregator::new(window);
        for run in &runs {
            aggregator.record(run);
        }
        debug!(
            "Workspace {}: {} runs fetched, {} outside window, {} distinct tests",
            workspace.id,
            runs.len(),
            aggregator.skipped(),
            aggregator.distinct_tests()
        );

        Ok(WorkspaceSummary::new(
            workspace.id,
            workspace.name,
            aggregator.finish(),
        ))
    }
}

/// RFC 3339 rendering of a Unix timestamp for logs, or the raw value if out of range.
fn describe_timestamp(ts: i64) -> String {
    chrono::DateTime::<chrono::Utc>::from_timestamp(ts, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| ts.to_string())
}
