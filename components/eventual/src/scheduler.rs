//! The deferred-execution capability eventual values depend on.
//!
//! The engine never runs a reaction inline. Every settlement and every
//! handler invocation is handed to a [`Trampoline`] and runs on a later
//! turn, after the code that triggered it has returned.

use crate::task_queue::MicroTask;
use std::fmt;
use std::rc::Rc;

/// A facility that runs jobs after the current synchronous execution.
///
/// Implementations must run deferred jobs in the order they were deferred.
pub trait Trampoline {
    /// Queues a job for a later turn.
    fn defer(&self, job: MicroTask);

    /// Maximum nesting of adoptions within one resolution, if bounded.
    fn max_adoption_depth(&self) -> Option<usize> {
        None
    }
}

/// Cloneable handle to an injected [`Trampoline`].
///
/// Every eventual value holds one; values derived from it through `then`
/// or the combinators inherit it.
#[derive(Clone)]
pub struct Scheduler {
    trampoline: Rc<dyn Trampoline>,
}

impl Scheduler {
    /// Wraps a trampoline implementation.
    pub fn new<T>(trampoline: T) -> Self
    where
        T: Trampoline + 'static,
    {
        Self {
            trampoline: Rc::new(trampoline),
        }
    }

    /// Wraps an already shared trampoline.
    pub fn from_rc(trampoline: Rc<dyn Trampoline>) -> Self {
        Self { trampoline }
    }

    /// Queues a closure for a later turn.
    pub fn defer<F>(&self, f: F)
    where
        F: FnOnce() + 'static,
    {
        self.trampoline.defer(MicroTask::new(f));
    }

    pub(crate) fn max_adoption_depth(&self) -> Option<usize> {
        self.trampoline.max_adoption_depth()
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("max_adoption_depth", &self.max_adoption_depth())
            .finish()
    }
}
