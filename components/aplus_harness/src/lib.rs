//! Promises/A+ Compliance Harness
//!
//! This crate runs conformance scenarios against the `eventual` engine.
//! Each scenario builds its fixtures with the deferred factory on a fresh
//! event loop, drains the loop and checks the subject's final state.

pub mod case;
pub mod harness;
pub mod report;
pub mod suite;

pub use case::{ConformanceCase, Expectation, Probe};
pub use harness::{ComplianceHarness, TestResult};
pub use report::{ComplianceReport, ReportEntry};
pub use suite::aplus_suite;
