use crate::case::ConformanceCase;
use crate::report::ComplianceReport;
use eventual::{EventLoop, RuntimeConfig, RuntimeError};
use regex::Regex;

/// Result of running a single case
#[derive(Debug, Clone, PartialEq)]
pub enum TestResult {
    /// Case reached its expected outcome
    Pass,
    /// Case failed with reason
    Fail(String),
    /// Case was skipped with reason
    Skip(String),
    /// Case exhausted the microtask budget before the loop went idle
    Timeout,
}

impl TestResult {
    /// Check if the result is a pass
    pub fn is_pass(&self) -> bool {
        matches!(self, TestResult::Pass)
    }

    /// Check if the result is a failure
    pub fn is_fail(&self) -> bool {
        matches!(self, TestResult::Fail(_))
    }

    /// Check if the result is a skip
    pub fn is_skip(&self) -> bool {
        matches!(self, TestResult::Skip(_))
    }

    /// Check if the result is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, TestResult::Timeout)
    }
}

/// Runs conformance cases, each on its own event loop.
#[derive(Debug, Clone, Default)]
pub struct ComplianceHarness {
    /// Configuration for every loop the harness creates
    config: RuntimeConfig,
    /// Only case ids matching this pattern are run
    filter: Option<Regex>,
}

impl ComplianceHarness {
    /// Create a harness with the default runtime configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a harness whose loops use `config`
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            config,
            filter: None,
        }
    }

    /// Restrict runs to case ids matching `pattern`.
    pub fn set_filter(&mut self, pattern: &str) -> Result<(), regex::Error> {
        self.filter = Some(Regex::new(pattern)?);
        Ok(())
    }

    /// Remove the id filter
    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    /// Get the runtime configuration
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Returns true if `id` passes the filter.
    pub fn selects(&self, id: &str) -> bool {
        self.filter.as_ref().map_or(true, |re| re.is_match(id))
    }

    /// Run a single case
    pub fn run_case(&self, case: &ConformanceCase) -> TestResult {
        if !self.selects(&case.id) {
            return TestResult::Skip("filtered out".to_string());
        }

        let event_loop = EventLoop::with_config(self.config.clone());
        let probe = case.probe(&event_loop.scheduler());

        match event_loop.run_until_done() {
            Ok(()) => {}
            Err(RuntimeError::MicrotaskBudgetExhausted { limit }) => {
                log::warn!("{}: stopped after {limit} microtasks", case.id);
                return TestResult::Timeout;
            }
            Err(e) => return TestResult::Fail(e.to_string()),
        }

        match probe.expect.check(&probe.subject) {
            Ok(()) => {
                log::debug!("{}: pass", case.id);
                TestResult::Pass
            }
            Err(reason) => {
                log::info!("{}: {reason}", case.id);
                TestResult::Fail(reason)
            }
        }
    }

    /// Run every case and collect the results
    pub fn run_suite(&self, cases: &[ConformanceCase]) -> ComplianceReport {
        let mut report = ComplianceReport::new();
        for case in cases {
            report.add_result(&case.id, self.run_case(case));
        }
        log::info!(
            "ran {} cases: {} passed, {} failed",
            report.total,
            report.passed,
            report.failed
        );
        report
    }
}
