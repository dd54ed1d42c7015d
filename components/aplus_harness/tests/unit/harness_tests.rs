//! Unit tests for ComplianceHarness

use aplus_harness::{ComplianceHarness, ConformanceCase, Expectation, Probe, TestResult};
use core_types::Value;
use eventual::{Eventual, RuntimeConfig, Scheduler};

fn passing_case(id: &str) -> ConformanceCase {
    ConformanceCase::new(id, "fulfills", |s: &Scheduler| {
        Probe::new(Eventual::resolve(s, 1), Expectation::Fulfilled(Value::Smi(1)))
    })
}

fn failing_case(id: &str) -> ConformanceCase {
    ConformanceCase::new(id, "expects the wrong value", |s: &Scheduler| {
        Probe::new(Eventual::resolve(s, 1), Expectation::Fulfilled(Value::Smi(2)))
    })
}

/// Each turn of the chain schedules the next one, forever.
fn runaway_case() -> ConformanceCase {
    ConformanceCase::new("loop.runaway", "never goes idle", |s: &Scheduler| {
        fn spin(s: &Scheduler) -> Eventual {
            let scheduler = s.clone();
            Eventual::resolve(s, 0).then(
                core_types::Function::unary(move |_| Ok(spin(&scheduler).into())),
                Value::Undefined,
            )
        }
        Probe::new(spin(s), Expectation::Pending)
    })
}

#[test]
fn test_result_predicates() {
    assert!(TestResult::Pass.is_pass());
    assert!(TestResult::Fail("x".into()).is_fail());
    assert!(TestResult::Skip("x".into()).is_skip());
    assert!(TestResult::Timeout.is_timeout());
}

#[test]
fn test_run_case_pass() {
    let harness = ComplianceHarness::new();
    assert_eq!(harness.run_case(&passing_case("a")), TestResult::Pass);
}

#[test]
fn test_run_case_fail_reports_reason() {
    let harness = ComplianceHarness::new();
    match harness.run_case(&failing_case("b")) {
        TestResult::Fail(reason) => assert!(reason.contains("expected")),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn test_filter_skips_non_matching() {
    let mut harness = ComplianceHarness::new();
    harness.set_filter(r"^2\.3\.").unwrap();
    assert!(harness.selects("2.3.1.self"));
    assert!(!harness.selects("2.2.1.x"));
    assert!(harness.run_case(&passing_case("2.2.1.x")).is_skip());
    assert!(harness.run_case(&passing_case("2.3.1.self")).is_pass());

    harness.clear_filter();
    assert!(harness.selects("anything"));
}

#[test]
fn test_invalid_filter_is_error() {
    let mut harness = ComplianceHarness::new();
    assert!(harness.set_filter("(unclosed").is_err());
}

#[test]
fn test_budget_exhaustion_is_timeout() {
    let config = RuntimeConfig::default().with_max_microtasks_per_turn(Some(200));
    let harness = ComplianceHarness::with_config(config);
    assert_eq!(harness.run_case(&runaway_case()), TestResult::Timeout);
}

#[test]
fn test_run_suite_counts_results() {
    let harness = ComplianceHarness::new();
    let report = harness.run_suite(&[passing_case("p"), failing_case("f"), passing_case("q")]);
    assert_eq!(report.total, 3);
    assert_eq!(report.passed, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.failures[0].id, "f");
    assert!(!report.is_success());
}
