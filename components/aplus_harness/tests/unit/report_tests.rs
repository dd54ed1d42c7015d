//! Unit tests for report generation

use aplus_harness::{ComplianceReport, TestResult};

#[test]
fn test_new_report_is_empty() {
    let report = ComplianceReport::new();
    assert_eq!(report.total, 0);
    assert!(report.failures.is_empty());
    assert_eq!(report.pass_rate(), 0.0);
    assert!(report.is_success());
}

#[test]
fn test_add_results() {
    let mut report = ComplianceReport::new();
    report.add_result("a", TestResult::Pass);
    report.add_result("b", TestResult::Fail("wrong".to_string()));
    report.add_result("c", TestResult::Skip("filtered out".to_string()));
    report.add_result("d", TestResult::Timeout);

    assert_eq!(report.total, 4);
    assert_eq!(report.passed, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.timeout, 1);
    assert_eq!(report.failures[0].reason, "wrong");
    assert_eq!(report.skips[0].id, "c");
    assert_eq!(report.timeouts, vec!["d".to_string()]);
}

#[test]
fn test_pass_rate_excludes_skips() {
    let mut report = ComplianceReport::new();
    report.add_result("a", TestResult::Pass);
    report.add_result("b", TestResult::Fail("x".to_string()));
    report.add_result("c", TestResult::Skip("x".to_string()));
    assert_eq!(report.pass_rate(), 50.0);
}

#[test]
fn test_timeout_is_not_success() {
    let mut report = ComplianceReport::new();
    report.add_result("a", TestResult::Timeout);
    assert!(!report.is_success());
}

#[test]
fn test_summary_lists_failures() {
    let mut report = ComplianceReport::new();
    report.add_result("2.3.1", TestResult::Fail("observed Pending".to_string()));
    let summary = report.summary();
    assert!(summary.contains("0 passed, 1 failed"));
    assert!(summary.contains("FAIL 2.3.1: observed Pending"));
}

#[test]
fn test_merge() {
    let mut first = ComplianceReport::new();
    first.add_result("a", TestResult::Pass);
    let mut second = ComplianceReport::new();
    second.add_result("b", TestResult::Fail("x".to_string()));

    first.merge(&second);
    assert_eq!(first.total, 2);
    assert_eq!(first.failed, 1);
    assert_eq!(first.failures[0].id, "b");
}

#[test]
fn test_json_round_trip() {
    let mut report = ComplianceReport::new();
    report.add_result("a", TestResult::Pass);
    report.add_result("b", TestResult::Skip("filtered out".to_string()));

    let json = report.to_json().unwrap();
    assert!(json.contains("\"skipped\": 1"));
    assert_eq!(ComplianceReport::from_json(&json).unwrap(), report);
}
