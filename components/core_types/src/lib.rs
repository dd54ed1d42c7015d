//! Core value types and error handling for the eventual-value engine.
//!
//! This crate provides the dynamically-typed values that flow through
//! eventual values: fulfillment values, rejection reasons, continuation
//! results and the objects that may turn out to be thenables.
//!
//! # Overview
//!
//! - [`Value`] - Tagged representation of runtime values
//! - [`Object`] - Property-bearing objects (the thenable capability boundary)
//! - [`Function`] - Callables that may fail by "throwing" a [`Value`]
//! - [`JsError`] - Errors with a kind and message
//! - [`ErrorKind`] - Types of errors
//!
//! # Examples
//!
//! ```
//! use core_types::{ErrorKind, Function, JsError, Value};
//!
//! let num = Value::Smi(42);
//! assert!(num.is_truthy());
//! assert_eq!(num.type_of(), "number");
//!
//! let double = Function::unary(|v| match v {
//!     Value::Smi(n) => Ok(Value::Smi(n * 2)),
//!     other => Err(Value::from(JsError::type_error(format!("not a number: {other}")))),
//! });
//! assert_eq!(double.invoke(Value::Smi(21)), Ok(Value::Smi(42)));
//!
//! let error = JsError::type_error("undefined is not a function");
//! assert_eq!(error.kind, ErrorKind::TypeError);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod function;
mod object;
mod value;

pub use error::{ErrorKind, JsError};
pub use function::Function;
pub use object::{Object, PlainObject};
pub use value::Value;
