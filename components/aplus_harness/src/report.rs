use crate::harness::TestResult;
use serde::{Deserialize, Serialize};

/// A case id with the reason it failed or was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Case id
    pub id: String,
    /// Failure or skip reason
    pub reason: String,
}

/// Compliance run report with statistics and failure details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Total number of cases seen
    pub total: usize,
    /// Number of cases that passed
    pub passed: usize,
    /// Number of cases that failed
    pub failed: usize,
    /// Number of cases that were skipped
    pub skipped: usize,
    /// Number of cases that exhausted the microtask budget
    pub timeout: usize,
    /// Failed cases
    pub failures: Vec<ReportEntry>,
    /// Skipped cases
    pub skips: Vec<ReportEntry>,
    /// Ids of cases that exhausted the microtask budget
    pub timeouts: Vec<String>,
}

impl ComplianceReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a case result to the report
    pub fn add_result(&mut self, id: &str, result: TestResult) {
        self.total += 1;
        let id = id.to_string();
        match result {
            TestResult::Pass => self.passed += 1,
            TestResult::Fail(reason) => {
                self.failed += 1;
                self.failures.push(ReportEntry { id, reason });
            }
            TestResult::Skip(reason) => {
                self.skipped += 1;
                self.skips.push(ReportEntry { id, reason });
            }
            TestResult::Timeout => {
                self.timeout += 1;
                self.timeouts.push(id);
            }
        }
    }

    /// Percentage of executed (non-skipped) cases that passed
    pub fn pass_rate(&self) -> f64 {
        let executed = self.total - self.skipped;
        if executed == 0 {
            0.0
        } else {
            (self.passed as f64 / executed as f64) * 100.0
        }
    }

    /// Human-readable summary, followed by one line per failure
    pub fn summary(&self) -> String {
        let mut output = format!(
            "Promises/A+ compliance: {} passed, {} failed, {} skipped, {} timed out ({:.1}% of {} executed)",
            self.passed,
            self.failed,
            self.skipped,
            self.timeout,
            self.pass_rate(),
            self.total - self.skipped
        );
        for entry in &self.failures {
            output.push_str(&format!("\n  FAIL {}: {}", entry.id, entry.reason));
        }
        for id in &self.timeouts {
            output.push_str(&format!("\n  TIMEOUT {id}"));
        }
        output
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: &ComplianceReport) {
        self.total += other.total;
        self.passed += other.passed;
        self.failed += other.failed;
        self.skipped += other.skipped;
        self.timeout += other.timeout;
        self.failures.extend(other.failures.iter().cloned());
        self.skips.extend(other.skips.iter().cloned());
        self.timeouts.extend(other.timeouts.iter().cloned());
    }

    /// Check if nothing failed or timed out
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.timeout == 0
    }

    /// Export report as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Import report from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
