//! Runtime errors.
//!
//! Failures inside the engine (throwing executors, throwing handlers,
//! self-resolution, failing thenables) are never errors: they surface as
//! rejections. `RuntimeError` covers the trampoline and its configuration.

use thiserror::Error;

/// Errors raised by the event loop or while loading configuration.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// More microtasks were queued in one turn than the configured budget.
    #[error("microtask budget of {limit} exhausted in a single turn")]
    MicrotaskBudgetExhausted {
        /// The configured per-turn limit
        limit: usize,
    },

    /// The configuration could not be parsed or serialized.
    #[error("invalid runtime configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}
