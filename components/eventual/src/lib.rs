//! Eventual values for sequencing and combining deferred results.
//!
//! This crate provides an engine for Promises/A+ style eventual values:
//! - Eventual values with a single settlement and chainable continuations
//! - The resolution procedure, adopting this engine's values and any
//!   foreign thenable
//! - `all` and `race` combinators and deferred handles
//! - A deterministic event loop used as the scheduling trampoline
//!
//! # Overview
//!
//! - [`Eventual`] - The eventual value
//! - [`Resolver`] - Resolve/reject capability handed to executors
//! - [`Deferred`] - An eventual value with its capabilities
//! - [`EventLoop`] - Task and microtask queues on a virtual clock
//! - [`Scheduler`] / [`Trampoline`] - The injected deferral capability
//! - [`RuntimeConfig`] - Loop limits
//!
//! # Examples
//!
//! ```
//! use core_types::{Function, Value};
//! use eventual::{EventLoop, Eventual};
//!
//! let event_loop = EventLoop::new();
//! let scheduler = event_loop.scheduler();
//!
//! let p = Eventual::new(&scheduler, |_resolve, reject| {
//!     reject.call("boom");
//!     Ok(())
//! })
//! .then(
//!     Function::unary(Ok),
//!     Function::unary(|e| Ok(Value::from(format!("caught:{e}")))),
//! );
//!
//! event_loop.run_until_done().unwrap();
//! assert_eq!(p.result(), Some(Value::from("caught:boom")));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod combinators;
pub mod config;
pub mod deferred;
pub mod error;
pub mod event_loop;
pub mod eventual;
pub mod resolution;
pub mod scheduler;
pub mod task_queue;

// Re-export main types at crate root
pub use config::RuntimeConfig;
pub use deferred::Deferred;
pub use error::RuntimeError;
pub use event_loop::EventLoop;
pub use eventual::{Eventual, EventualState, Resolver};
pub use resolution::SELF_RESOLUTION_MESSAGE;
pub use scheduler::{Scheduler, Trampoline};
pub use task_queue::{MicroTask, MicrotaskQueue, Task, TaskQueue};
