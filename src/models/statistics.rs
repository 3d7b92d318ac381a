//! Test statistics response models.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for the statistics endpoint.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StatisticsQuery {
    /// Start date (Unix timestamp in seconds)
    pub start_date: Option<i64>,
    /// End date (Unix timestamp in seconds)
    pub end_date: Option<i64>,
}

/// Pass/fail counters for one distinct test within a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestAggregate {
    pub test_id: String,
    pub project: String,
    pub scenario: String,
    /// Number of runs in the window; always `passed + failed + other`
    pub total_runs: u32,
    pub passed: u32,
    pub failed: u32,
    /// Runs whose quality status is neither PASSED nor FAILED
    pub other: u32,
    /// Percentage with two decimals (e.g. `"33.33%"`), or `"0%"` with no runs
    #[schema(example = "50.00%")]
    pub pass_rate: String,
}

/// Statistics for one workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSummary {
    pub workspace_id: String,
    pub workspace_name: String,
    pub tests: Vec<TestAggregate>,
    /// Number of distinct tests
    pub total_tests: usize,
}

impl WorkspaceSummary {
    pub fn new(workspace_id: String, workspace_name: String, tests: Vec<TestAggregate>) -> Self {
        WorkspaceSummary {
            workspace_id,
            workspace_name,
            total_tests: tests.len(),
            tests,
        }
    }
}

/// Response body of `GET /test-statistics`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    /// Requested lower bound, omitted when not supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<i64>,
    /// Requested upper bound, omitted when not supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<i64>,
    pub workspaces: Vec<WorkspaceSummary>,
    /// Number of workspaces listed upstream
    pub total_workspaces: usize,
}

/// Render a pass rate as `"NN.NN%"`, rounding half up, or `"0%"` when `total` is 0.
pub fn format_pass_rate(passed: u32, total: u32) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    // Hundredths of a percent, rounded half up without going through floats
    let total = u64::from(total);
    let hundredths = (u64::from(passed) * 20_000 + total) / (2 * total);
    format!("{}.{:02}%", hundredths / 100, hundredths % 100)
}
