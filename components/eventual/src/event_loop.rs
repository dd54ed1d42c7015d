//! Event loop implementation.
//!
//! A deterministic, single-threaded trampoline. Each turn drains every
//! microtask (including ones queued while draining) and then runs one task
//! whose due tick has been reached on the virtual clock.

use crate::config::RuntimeConfig;
use crate::error::RuntimeError;
use crate::scheduler::{Scheduler, Trampoline};
use crate::task_queue::{MicroTask, MicrotaskQueue, Task, TaskQueue};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Default)]
struct LoopCore {
    config: RuntimeConfig,
    task_queue: RefCell<TaskQueue>,
    microtask_queue: RefCell<MicrotaskQueue>,
    clock: Cell<u64>,
}

impl Trampoline for LoopCore {
    fn defer(&self, job: MicroTask) {
        self.microtask_queue.borrow_mut().enqueue(job);
    }

    fn max_adoption_depth(&self) -> Option<usize> {
        self.config.max_adoption_depth
    }
}

/// The event loop driving eventual values.
///
/// `EventLoop` is a cheap handle; clones share the same queues and clock.
///
/// # Examples
///
/// ```
/// use eventual::{EventLoop, Eventual};
/// use core_types::Value;
///
/// let event_loop = EventLoop::new();
/// let scheduler = event_loop.scheduler();
///
/// let p = Eventual::resolve(&scheduler, Value::Smi(1));
/// assert!(p.is_pending());
///
/// event_loop.run_until_done().unwrap();
/// assert_eq!(p.result(), Some(Value::Smi(1)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventLoop {
    core: Rc<LoopCore>,
}

impl EventLoop {
    /// Creates a new EventLoop with empty queues and default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new EventLoop with the given configuration.
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            core: Rc::new(LoopCore {
                config,
                ..LoopCore::default()
            }),
        }
    }

    /// Returns the configuration this loop was created with.
    pub fn config(&self) -> &RuntimeConfig {
        &self.core.config
    }

    /// Returns a scheduler that defers jobs onto this loop's microtask queue.
    pub fn scheduler(&self) -> Scheduler {
        Scheduler::from_rc(self.core.clone())
    }

    /// Current tick of the virtual clock.
    pub fn now(&self) -> u64 {
        self.core.clock.get()
    }

    /// Adds a task that is runnable immediately.
    pub fn enqueue_task(&self, task: Task) {
        self.set_timeout(0, task);
    }

    /// Adds a task that becomes runnable `delay` ticks from now.
    pub fn set_timeout(&self, delay: u64, task: Task) {
        let due = self.now().saturating_add(delay);
        self.core.task_queue.borrow_mut().enqueue(due, task);
    }

    /// Adds a microtask to the microtask queue.
    pub fn enqueue_microtask(&self, microtask: MicroTask) {
        self.core.defer(microtask);
    }

    /// Returns true if the task queue is empty.
    pub fn is_task_queue_empty(&self) -> bool {
        self.core.task_queue.borrow().is_empty()
    }

    /// Returns true if the microtask queue is empty.
    pub fn is_microtask_queue_empty(&self) -> bool {
        self.core.microtask_queue.borrow().is_empty()
    }

    /// Returns true if any task or microtask is waiting.
    pub fn has_pending_work(&self) -> bool {
        !self.is_task_queue_empty() || !self.is_microtask_queue_empty()
    }

    /// Runs all microtasks in the queue until empty.
    ///
    /// Microtasks queued while draining run in the same call. Returns the
    /// number of microtasks executed, or an error once more than the
    /// configured per-turn budget would run.
    pub fn run_all_microtasks(&self) -> Result<usize, RuntimeError> {
        let limit = self.core.config.max_microtasks_per_turn;
        let mut executed = 0;
        loop {
            if let Some(limit) = limit {
                if executed >= limit && !self.is_microtask_queue_empty() {
                    log::warn!("microtask budget of {limit} exhausted, abandoning turn");
                    return Err(RuntimeError::MicrotaskBudgetExhausted { limit });
                }
            }
            let next = self.core.microtask_queue.borrow_mut().dequeue();
            match next {
                Some(microtask) => {
                    microtask.run();
                    executed += 1;
                }
                None => break,
            }
        }
        if executed > 0 {
            log::trace!("drained {executed} microtasks at tick {}", self.now());
        }
        Ok(executed)
    }

    /// Runs the next due task, advancing the virtual clock to it when no
    /// task is due yet. Returns false if there was no task at all.
    pub fn run_next_task(&self) -> bool {
        let next_due = self.core.task_queue.borrow().next_due();
        let Some(due) = next_due else {
            return false;
        };
        if due > self.now() {
            log::trace!("advancing clock from {} to {due}", self.now());
            self.core.clock.set(due);
        }
        let task = self.core.task_queue.borrow_mut().dequeue_ready(self.now());
        match task {
            Some(task) => {
                task.run();
                true
            }
            None => false,
        }
    }

    /// Processes one complete cycle: one task followed by all microtasks.
    pub fn process_one_cycle(&self) -> Result<(), RuntimeError> {
        self.run_next_task();
        self.run_all_microtasks().map(|_| ())
    }

    /// Runs the event loop until all tasks and microtasks are processed.
    ///
    /// Microtasks already queued by synchronous code run before the first
    /// task.
    pub fn run_until_done(&self) -> Result<(), RuntimeError> {
        self.run_all_microtasks()?;
        while self.has_pending_work() {
            self.process_one_cycle()?;
        }
        Ok(())
    }
}
