//! Reduction of raw test runs into per-test statistics.
//!
//! Runs are filtered by a [`TimeWindow`], grouped by [`TestIdentity`] and
//! counted by outcome. This module performs no I/O and cannot fail.

use std::collections::BTreeMap;
use std::fmt;

use crate::models::{QualityStatus, TestAggregate, TestRunRecord, format_pass_rate};

/// Optional `[start, end]` filter in Unix seconds. Missing bounds are unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl TimeWindow {
    pub fn new(start: Option<i64>, end: Option<i64>) -> Self {
        TimeWindow { start, end }
    }

    /// Whether a run spanning `[run_start, run_end]` overlaps this window.
    ///
    /// A timestamp of `0` is the epoch, not "unknown".
    pub fn includes(&self, run_start: i64, run_end: i64) -> bool {
        let start = self.start.unwrap_or(i64::MIN);
        let end = self.end.unwrap_or(i64::MAX);
        !(run_end < start || run_start > end)
    }
}

/// Grouping key: two runs belong to the same test iff all three fields match exactly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TestIdentity {
    pub test_id: String,
    pub project: String,
    pub scenario: String,
}

impl TestIdentity {
    pub fn of(run: &TestRunRecord) -> Self {
        TestIdentity {
            test_id: run.test_id.clone(),
            project: run.project.clone(),
            scenario: run.scenario.clone(),
        }
    }
}

impl fmt::Display for TestIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.test_id, self.project, self.scenario)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Counters {
    total: u32,
    passed: u32,
    failed: u32,
    other: u32,
}

impl Counters {
    fn record(&mut self, status: QualityStatus) {
        self.total += 1;
        match status {
            QualityStatus::Passed => self.passed += 1,
            QualityStatus::Failed => self.failed += 1,
            QualityStatus::Other => self.other += 1,
        }
    }
}

/// Accumulates runs of one workspace.
#[derive(Debug, Default)]
pub struct TestStatsAggregator {
    window: TimeWindow,
    entries: BTreeMap<TestIdentity, Counters>,
    skipped: usize,
}

impl TestStatsAggregator {
    pub fn new(window: TimeWindow) -> Self {
        TestStatsAggregator {
            window,
            ..Default::default()
        }
    }

    /// Count a run. Returns `false` if the run lies outside the window.
    pub fn record(&mut self, run: &TestRunRecord) -> bool {
        if !self.window.includes(run.start_date, run.end_date) {
            self.skipped += 1;
            return false;
        }

        self.entries
            .entry(TestIdentity::of(run))
            .or_default()
            .record(run.status());
        true
    }

    /// Number of runs rejected by the window so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of distinct tests seen so far.
    pub fn distinct_tests(&self) -> usize {
        self.entries.len()
    }

    /// Produce one aggregate per distinct test, ordered by identity.
    pub fn finish(self) -> Vec<TestAggregate> {
        self.entries
            .into_iter()
            .map(|(identity, counters)| TestAggregate {
                test_id: identity.test_id,
                project: identity.project,
                scenario: identity.scenario,
                total_runs: counters.total,
                passed: counters.passed,
                failed: counters.failed,
                other: counters.other,
                pass_rate: format_pass_rate(counters.passed, counters.total),
            })
            .collect()
    }
}

/// Aggregate a workspace's runs within `window`.
pub fn aggregate<'a, I>(runs: I, window: TimeWindow) -> Vec<TestAggregate>
where
    I: IntoIterator<Item = &'a TestRunRecord>,
{
    let mut aggregator = TestStatsAggregator::new(window);
    for run in runs {
        aggregator.record(run);
    }
    aggregator.finish()
}
