//! Records returned by the NeoLoad Web API.
//!
//! Test-result decoding is lenient: the upstream payload is not under our
//! control, so missing, null or mistyped fields fall back to defaults instead
//! of failing the whole page.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Value used for missing textual fields of a test run.
pub const UNKNOWN_FIELD: &str = "unknown";

/// Value used for a missing quality status.
pub const UNKNOWN_STATUS: &str = "UNKNOWN";

/// A NeoLoad Web workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,
    pub name: String,
}

/// One load-test run as listed by `/v3/workspaces/{id}/test-results`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRunRecord {
    #[serde(default = "unknown_field", deserialize_with = "lenient_text")]
    pub test_id: String,
    #[serde(default = "unknown_field", deserialize_with = "lenient_text")]
    pub project: String,
    #[serde(default = "unknown_field", deserialize_with = "lenient_text")]
    pub scenario: String,
    /// Run start, Unix seconds
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub start_date: i64,
    /// Run end, Unix seconds
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub end_date: i64,
    #[serde(default = "unknown_status", deserialize_with = "lenient_status")]
    pub quality_status: String,
}

impl TestRunRecord {
    /// Outcome of this run.
    pub fn status(&self) -> QualityStatus {
        QualityStatus::parse(&self.quality_status)
    }
}

impl Default for TestRunRecord {
    fn default() -> Self {
        TestRunRecord {
            test_id: unknown_field(),
            project: unknown_field(),
            scenario: unknown_field(),
            start_date: 0,
            end_date: 0,
            quality_status: unknown_status(),
        }
    }
}

/// Outcome of a run, as far as statistics are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityStatus {
    Passed,
    Failed,
    Other,
}

impl QualityStatus {
    /// Exact, case-sensitive match; anything unrecognised counts as `Other`.
    pub fn parse(s: &str) -> Self {
        match s {
            "PASSED" => Self::Passed,
            "FAILED" => Self::Failed,
            _ => Self::Other,
        }
    }
}

/// Body of `/v3/information`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamInformation {
    pub front_url: Option<String>,
    pub filestorage_url: Option<String>,
    pub version: Option<String>,
    /// Present only when the upstream refused the request
    pub message: Option<String>,
}

fn unknown_field() -> String {
    UNKNOWN_FIELD.to_string()
}

fn unknown_status() -> String {
    UNKNOWN_STATUS.to_string()
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_or(Value::deserialize(deserializer)?, UNKNOWN_FIELD))
}

fn lenient_status<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_or(Value::deserialize(deserializer)?, UNKNOWN_STATUS))
}

fn text_or(value: Value, fallback: &str) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => fallback.to_string(),
    }
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    })
}
