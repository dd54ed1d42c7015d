//! Property-bearing objects.
//!
//! An [`Object`] is anything that answers property reads. Whether it is a
//! thenable is decided purely by whether its `then` property is callable.

use crate::Value;
use std::any::Any;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// An object whose properties can be read.
///
/// `get` returns `Err` when reading the property throws (for example an
/// accessor that fails), which the resolution procedure turns into a
/// rejection.
///
/// # Examples
///
/// ```
/// use core_types::{Object, Value};
/// use std::any::Any;
/// use std::rc::Rc;
///
/// #[derive(Debug)]
/// struct Poisoned;
///
/// impl Object for Poisoned {
///     fn get(&self, _key: &str) -> Result<Value, Value> {
///         Err(Value::from("poisoned"))
///     }
///
///     fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
///         self
///     }
/// }
///
/// let value = Value::Object(Rc::new(Poisoned));
/// assert_eq!(value.get("then"), Err(Value::from("poisoned")));
/// ```
pub trait Object: Any + fmt::Debug {
    /// Reads the property named `key`. Missing properties are `Undefined`.
    fn get(&self, key: &str) -> Result<Value, Value>;

    /// Upcasts to `Rc<dyn Any>` so callers can recover the concrete type
    /// without losing the shared identity.
    fn into_any(self: Rc<Self>) -> Rc<dyn Any>;
}

/// A plain record of data properties.
///
/// # Examples
///
/// ```
/// use core_types::{PlainObject, Value};
///
/// let obj = PlainObject::new().with_property("answer", Value::Smi(42));
/// let value = Value::from(obj);
/// assert_eq!(value.get("answer"), Ok(Value::Smi(42)));
/// assert_eq!(value.get("missing"), Ok(Value::Undefined));
/// ```
#[derive(Clone, Default)]
pub struct PlainObject {
    properties: RefCell<BTreeMap<String, Value>>,
}

impl PlainObject {
    /// Creates an object without properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a property and returns the object, for building literals.
    pub fn with_property(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets (or overwrites) a property.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties
            .borrow_mut()
            .insert(key.into(), value.into());
    }

    /// Returns the names of all properties in key order.
    pub fn keys(&self) -> Vec<String> {
        self.properties.borrow().keys().cloned().collect()
    }
}

impl fmt::Debug for PlainObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Values may refer back to this object, so only the shape is printed.
        f.debug_struct("PlainObject")
            .field("keys", &self.keys())
            .finish()
    }
}

impl Object for PlainObject {
    fn get(&self, key: &str) -> Result<Value, Value> {
        Ok(self
            .properties
            .borrow()
            .get(key)
            .cloned()
            .unwrap_or(Value::Undefined))
    }

    fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}

impl From<PlainObject> for Value {
    fn from(obj: PlainObject) -> Self {
        Value::Object(Rc::new(obj))
    }
}
