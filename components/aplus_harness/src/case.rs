use core_types::{ErrorKind, Value};
use eventual::{Eventual, EventualState, Scheduler};
use std::fmt;

/// The outcome a conformance case expects once the loop has drained.
#[derive(Debug, Clone, PartialEq)]
pub enum Expectation {
    /// Fulfilled with exactly this value
    Fulfilled(Value),
    /// Rejected with exactly this reason
    Rejected(Value),
    /// Rejected with an error value of this kind
    RejectedWith(ErrorKind),
    /// Still pending
    Pending,
}

impl Expectation {
    /// Compares the subject's final state against this expectation.
    ///
    /// Returns a human-readable reason on mismatch.
    pub fn check(&self, subject: &Eventual) -> Result<(), String> {
        let state = subject.state();
        let result = subject.result();
        let matched = match (self, state, &result) {
            (Expectation::Pending, EventualState::Pending, _) => true,
            (Expectation::Fulfilled(expected), EventualState::Fulfilled, Some(actual)) => {
                expected == actual
            }
            (Expectation::Rejected(expected), EventualState::Rejected, Some(actual)) => {
                expected == actual
            }
            (Expectation::RejectedWith(kind), EventualState::Rejected, Some(Value::Error(e))) => {
                e.kind == *kind
            }
            _ => false,
        };
        if matched {
            return Ok(());
        }
        let observed = match result {
            Some(value) => format!("{state:?} with {value:?}"),
            None => format!("{state:?}"),
        };
        Err(format!("expected {self}, observed {observed}"))
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Fulfilled(v) => write!(f, "Fulfilled with {v:?}"),
            Expectation::Rejected(v) => write!(f, "Rejected with {v:?}"),
            Expectation::RejectedWith(kind) => write!(f, "Rejected with a {kind}"),
            Expectation::Pending => write!(f, "Pending"),
        }
    }
}

/// What a case's setup hands back: the eventual value under test and the
/// outcome it should reach.
#[derive(Debug, Clone)]
pub struct Probe {
    /// The eventual value whose final state is checked
    pub subject: Eventual,
    /// Expected final state
    pub expect: Expectation,
}

impl Probe {
    /// Create a probe
    pub fn new(subject: Eventual, expect: Expectation) -> Self {
        Self { subject, expect }
    }
}

type Setup = Box<dyn Fn(&Scheduler) -> Probe>;

/// A single named conformance scenario.
pub struct ConformanceCase {
    /// Stable identifier, prefixed with the section it covers
    pub id: String,
    /// One-line description of the requirement
    pub description: String,
    setup: Setup,
}

impl ConformanceCase {
    /// Create a case from its id, description and setup
    pub fn new<F>(id: impl Into<String>, description: impl Into<String>, setup: F) -> Self
    where
        F: Fn(&Scheduler) -> Probe + 'static,
    {
        Self {
            id: id.into(),
            description: description.into(),
            setup: Box::new(setup),
        }
    }

    /// Builds the scenario's fixtures on `scheduler`.
    pub fn probe(&self, scheduler: &Scheduler) -> Probe {
        (self.setup)(scheduler)
    }
}

impl fmt::Debug for ConformanceCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConformanceCase")
            .field("id", &self.id)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
