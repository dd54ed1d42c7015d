//! Runtime configuration.
//!
//! Limits that keep a misbehaving continuation chain from running forever.

use crate::error::RuntimeError;
use serde::{Deserialize, Serialize};

/// Default bound on microtasks drained in one turn of the event loop.
pub const DEFAULT_MAX_MICROTASKS_PER_TURN: usize = 100_000;

/// Default bound on nested adoptions within one resolution.
pub const DEFAULT_MAX_ADOPTION_DEPTH: usize = 1_000;

/// Configuration for an [`crate::EventLoop`] and the eventual values it
/// schedules.
///
/// Missing fields take their defaults when deserializing.
///
/// # Examples
///
/// ```
/// use eventual::RuntimeConfig;
///
/// let config = RuntimeConfig::from_json(r#"{ "max_adoption_depth": 32 }"#).unwrap();
/// assert_eq!(config.max_adoption_depth, Some(32));
/// assert_eq!(config.max_microtasks_per_turn, Some(100_000));
///
/// let unbounded = RuntimeConfig::from_json(r#"{ "max_adoption_depth": null }"#).unwrap();
/// assert_eq!(unbounded.max_adoption_depth, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Maximum microtasks drained in one turn; `None` means unbounded.
    pub max_microtasks_per_turn: Option<usize>,
    /// Maximum nesting of adoptions (an eventual or thenable resolving to
    /// another one) within a single resolution; `None` means unbounded.
    pub max_adoption_depth: Option<usize>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_microtasks_per_turn: Some(DEFAULT_MAX_MICROTASKS_PER_TURN),
            max_adoption_depth: Some(DEFAULT_MAX_ADOPTION_DEPTH),
        }
    }
}

impl RuntimeConfig {
    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, RuntimeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, RuntimeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sets the microtask budget per turn.
    pub fn with_max_microtasks_per_turn(mut self, limit: Option<usize>) -> Self {
        self.max_microtasks_per_turn = limit;
        self
    }

    /// Sets the adoption-chain length limit.
    pub fn with_max_adoption_depth(mut self, limit: Option<usize>) -> Self {
        self.max_adoption_depth = limit;
        self
    }
}
