use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timestamp format for recorded results (ISO-8601, microsecond precision)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Outcome of a single check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub test: String,
    pub success: bool,
    pub details: String,
    pub timestamp: String,
}

impl TestResult {
    pub fn new(test: &str, success: bool, details: &str) -> Self {
        Self {
            test: test.to_string(),
            success,
            details: details.to_string(),
            timestamp: timestamp_now(),
        }
    }
}

/// Summary of one run, derived from its results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Percentage of passed checks; `None` when nothing ran
    pub success_rate: Option<f64>,
    pub duration_seconds: f64,
    pub results: Vec<TestResult>,
}

impl Report {
    pub fn from_results(results: &[TestResult], duration: Duration) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.success).count();
        let success_rate = if total > 0 {
            Some(passed as f64 / total as f64 * 100.0)
        } else {
            None
        };

        Self {
            total,
            passed,
            failed: total - passed,
            success_rate,
            duration_seconds: duration.as_secs_f64(),
            results: results.to_vec(),
        }
    }

    /// A run succeeds only when every recorded check passed
    pub fn is_success(&self) -> bool {
        self.success_rate == Some(100.0)
    }

    pub fn failures(&self) -> impl Iterator<Item = &TestResult> {
        self.results.iter().filter(|r| !r.success)
    }
}
