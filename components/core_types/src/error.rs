//! Error types used as rejection reasons.
//!
//! These correspond to the built-in error constructors a thenable-based
//! runtime reports with, most notably `TypeError` for self-resolution.

use std::fmt;
use thiserror::Error;

/// The kind of error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Type error (e.g., resolving an eventual value with itself)
    TypeError,
    /// Value out of allowed range (e.g., adoption chain too deep)
    RangeError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::TypeError => "TypeError",
            ErrorKind::RangeError => "RangeError",
        };
        f.write_str(name)
    }
}

/// An error with a kind and a human-readable message.
///
/// Wrapped in [`crate::Value::Error`] it becomes a rejection reason.
///
/// # Examples
///
/// ```
/// use core_types::{ErrorKind, JsError};
///
/// let error = JsError::type_error("a promise cannot be resolved with itself");
/// assert_eq!(error.kind, ErrorKind::TypeError);
/// assert_eq!(
///     error.to_string(),
///     "TypeError: a promise cannot be resolved with itself"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct JsError {
    /// The type of error
    pub kind: ErrorKind,
    /// Human-readable error message
    pub message: String,
}

impl JsError {
    /// Creates an error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates a `TypeError`.
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeError, message)
    }

    /// Creates a `RangeError`.
    pub fn range_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RangeError, message)
    }
}
