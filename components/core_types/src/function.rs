//! Callable values.
//!
//! A [`Function`] models a script callable: it receives a receiver (`this`)
//! and positional arguments, and either returns a value or "throws" by
//! returning `Err` with the thrown value.

use crate::{PlainObject, Value};
use std::fmt;
use std::rc::Rc;

type Callback = dyn Fn(&Value, &[Value]) -> Result<Value, Value>;

/// A shared, cloneable callable.
///
/// Clones share identity: two clones compare equal with [`Function::ptr_eq`].
/// A function may carry own properties, which makes callables eligible as
/// thenables when one of them is a callable `then`.
///
/// # Examples
///
/// ```
/// use core_types::{Function, Value};
///
/// let add = Function::new(|_this, args| {
///     let sum = args.iter().map(|v| match v {
///         Value::Smi(n) => *n,
///         _ => 0,
///     }).sum();
///     Ok(Value::Smi(sum))
/// });
///
/// let result = add.call(&Value::Undefined, &[Value::Smi(1), Value::Smi(2)]);
/// assert_eq!(result, Ok(Value::Smi(3)));
/// ```
#[derive(Clone)]
pub struct Function {
    callback: Rc<Callback>,
    properties: Option<Rc<PlainObject>>,
}

impl Function {
    /// Creates a function from a closure taking the receiver and arguments.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, Value> + 'static,
    {
        Self {
            callback: Rc::new(f),
            properties: None,
        }
    }

    /// Creates a function that only looks at its first argument.
    ///
    /// A missing argument is passed as `Undefined`.
    pub fn unary<F>(f: F) -> Self
    where
        F: Fn(Value) -> Result<Value, Value> + 'static,
    {
        Self::new(move |_this, args| f(args.first().cloned().unwrap_or(Value::Undefined)))
    }

    /// Attaches an own property to the function.
    ///
    /// The property table is copied on write: other clones keep the
    /// properties they had, while still sharing the callback.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let props = self
            .properties
            .get_or_insert_with(|| Rc::new(PlainObject::new()));
        Rc::make_mut(props).set(key, value);
        self
    }

    /// Calls the function with an explicit receiver.
    pub fn call(&self, this: &Value, args: &[Value]) -> Result<Value, Value> {
        (self.callback)(this, args)
    }

    /// Calls the function with an `Undefined` receiver and a single argument.
    pub fn invoke(&self, arg: Value) -> Result<Value, Value> {
        self.call(&Value::Undefined, &[arg])
    }

    /// Reads an own property.
    pub fn get(&self, key: &str) -> Value {
        use crate::Object;
        self.properties
            .as_ref()
            .and_then(|props| props.get(key).ok())
            .unwrap_or(Value::Undefined)
    }

    /// Returns true if both handles refer to the same function.
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function {{ ... }}")
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}
