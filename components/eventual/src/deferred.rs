//! Deferred handles: an eventual value plus its resolve/reject capabilities,
//! for settling it from outside an executor. Compliance suites build most
//! of their fixtures this way.

use crate::eventual::{Eventual, Resolver};
use crate::scheduler::Scheduler;

/// One eventual value bundled with the capabilities that settle it.
///
/// # Examples
///
/// ```
/// use core_types::Value;
/// use eventual::{EventLoop, Eventual, EventualState};
///
/// let event_loop = EventLoop::new();
/// let d = Eventual::deferred(&event_loop.scheduler());
///
/// d.reject.call("nope");
/// d.resolve.call("ignored");
///
/// event_loop.run_until_done().unwrap();
/// assert_eq!(d.promise.state(), EventualState::Rejected);
/// assert_eq!(d.promise.result(), Some(Value::from("nope")));
/// ```
#[derive(Debug, Clone)]
pub struct Deferred {
    /// The eventual value being controlled
    pub promise: Eventual,
    /// Resolves `promise`, adopting eventual values and thenables
    pub resolve: Resolver,
    /// Rejects `promise`
    pub reject: Resolver,
}

impl Eventual {
    /// Creates a pending eventual value together with its capabilities.
    pub fn deferred(scheduler: &Scheduler) -> Deferred {
        let promise = Eventual::pending(scheduler);
        let (resolve, reject) = Resolver::pair(&promise);
        Deferred {
            promise,
            resolve,
            reject,
        }
    }

    /// Alias of [`Eventual::deferred`].
    pub fn defer(scheduler: &Scheduler) -> Deferred {
        Self::deferred(scheduler)
    }
}
