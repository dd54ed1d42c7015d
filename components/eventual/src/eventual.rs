//! The eventual value state machine.
//!
//! An [`Eventual`] starts pending and settles at most once, to fulfilled or
//! rejected. Continuations registered with [`Eventual::then`] are queued
//! while pending and always run on a later turn of the scheduler, even when
//! the value had already settled at registration time.

use crate::resolution;
use crate::scheduler::Scheduler;
use core_types::{Function, JsError, Object, Value};
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// The state of an eventual value.
///
/// Once settled (Fulfilled or Rejected), the state never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventualState {
    /// Neither fulfilled nor rejected yet.
    Pending,
    /// Settled with a value.
    Fulfilled,
    /// Settled with a reason.
    Rejected,
}

/// A settlement outcome on its way to an eventual value.
#[derive(Debug, Clone)]
pub(crate) enum Settlement {
    Fulfilled(Value),
    Rejected(Value),
}

/// Continuation selected for one side of a reaction.
#[derive(Debug, Clone)]
enum Handler {
    /// Pass the fulfillment value through unchanged.
    Identity,
    /// Re-raise the rejection reason unchanged.
    Thrower,
    Function(Function),
}

impl Handler {
    fn from_value(value: Value, default: Handler) -> Self {
        match value {
            Value::Function(f) => Handler::Function(f),
            _ => default,
        }
    }

    fn invoke(&self, argument: Value) -> Result<Value, Value> {
        match self {
            Handler::Identity => Ok(argument),
            Handler::Thrower => Err(argument),
            Handler::Function(f) => f.invoke(argument),
        }
    }
}

/// A continuation record registered through `then`.
struct Reaction {
    on_fulfilled: Handler,
    on_rejected: Handler,
    /// The eventual value `then` returned, driven by the handler's result.
    next: Eventual,
}

impl Reaction {
    fn trigger(self, settlement: Settlement) {
        let outcome = match settlement {
            Settlement::Fulfilled(value) => self.on_fulfilled.invoke(value),
            Settlement::Rejected(reason) => self.on_rejected.invoke(reason),
        };
        match outcome {
            Ok(x) => resolution::resolve(&self.next, x, 0),
            Err(thrown) => self.next.settle(Settlement::Rejected(thrown)),
        }
    }
}

struct State {
    status: EventualState,
    /// Fulfillment value or rejection reason; written once, on settlement.
    result: Option<Value>,
    /// Reactions in registration order; drained on settlement.
    reactions: Vec<Reaction>,
}

impl State {
    fn settlement(&self) -> Option<Settlement> {
        let result = self.result.clone()?;
        match self.status {
            EventualState::Pending => None,
            EventualState::Fulfilled => Some(Settlement::Fulfilled(result)),
            EventualState::Rejected => Some(Settlement::Rejected(result)),
        }
    }
}

pub(crate) struct Shared {
    scheduler: Scheduler,
    state: RefCell<State>,
}

impl fmt::Debug for Shared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Eventual")
            .field("status", &state.status)
            .field("reactions", &state.reactions.len())
            .finish()
    }
}

impl Object for Shared {
    /// Exposes `then` and `catch` so that other implementations can consume
    /// this eventual value as an ordinary thenable.
    fn get(&self, key: &str) -> Result<Value, Value> {
        let method = match key {
            "then" => Function::new(|this, args| {
                let receiver = receiver(this, "then")?;
                let on_fulfilled = args.first().cloned().unwrap_or(Value::Undefined);
                let on_rejected = args.get(1).cloned().unwrap_or(Value::Undefined);
                Ok(receiver.then(on_fulfilled, on_rejected).into())
            }),
            "catch" => Function::new(|this, args| {
                let receiver = receiver(this, "catch")?;
                let on_rejected = args.first().cloned().unwrap_or(Value::Undefined);
                Ok(receiver.catch(on_rejected).into())
            }),
            _ => return Ok(Value::Undefined),
        };
        Ok(Value::Function(method))
    }

    fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}

fn receiver(this: &Value, method: &str) -> Result<Eventual, Value> {
    Eventual::from_value(this).ok_or_else(|| {
        JsError::type_error(format!("{method} called on an incompatible receiver")).into()
    })
}

/// A deferred value: the result of an operation that has not completed yet.
///
/// `Eventual` is a shared handle; clones refer to the same value.
///
/// # Examples
///
/// ```
/// use core_types::{Function, Value};
/// use eventual::{EventLoop, Eventual, EventualState};
///
/// let event_loop = EventLoop::new();
/// let scheduler = event_loop.scheduler();
///
/// let p = Eventual::new(&scheduler, |resolve, _reject| {
///     resolve.call(5);
///     Ok(())
/// })
/// .then(
///     Function::unary(|v| match v {
///         Value::Smi(n) => Ok(Value::Smi(n + 1)),
///         other => Ok(other),
///     }),
///     Value::Undefined,
/// );
///
/// event_loop.run_until_done().unwrap();
/// assert_eq!(p.state(), EventualState::Fulfilled);
/// assert_eq!(p.result(), Some(Value::Smi(6)));
/// ```
#[derive(Debug, Clone)]
pub struct Eventual {
    shared: Rc<Shared>,
}

impl Eventual {
    /// Creates an eventual value and runs `executor` synchronously with its
    /// resolve and reject capabilities.
    ///
    /// An `Err` returned by the executor rejects the value with that reason,
    /// unless the executor already resolved or rejected it.
    pub fn new<F>(scheduler: &Scheduler, executor: F) -> Self
    where
        F: FnOnce(Resolver, Resolver) -> Result<(), Value>,
    {
        let eventual = Self::pending(scheduler);
        let (resolve, reject) = Resolver::pair(&eventual);
        if let Err(thrown) = executor(resolve, reject.clone()) {
            log::trace!("executor threw, rejecting");
            reject.call(thrown);
        }
        eventual
    }

    pub(crate) fn pending(scheduler: &Scheduler) -> Self {
        let shared = Rc::new(Shared {
            scheduler: scheduler.clone(),
            state: RefCell::new(State {
                status: EventualState::Pending,
                result: None,
                reactions: Vec::new(),
            }),
        });
        Self { shared }
    }

    /// Registers continuations and returns a new eventual value driven by
    /// their result.
    ///
    /// A handler that is not a [`Value::Function`] is replaced by the
    /// pass-through default: fulfillment values and rejection reasons flow
    /// to the returned value unchanged. A handler returning `Err` rejects
    /// the returned value with that reason.
    pub fn then(&self, on_fulfilled: impl Into<Value>, on_rejected: impl Into<Value>) -> Eventual {
        let next = Eventual::pending(&self.shared.scheduler);
        let reaction = Reaction {
            on_fulfilled: Handler::from_value(on_fulfilled.into(), Handler::Identity),
            on_rejected: Handler::from_value(on_rejected.into(), Handler::Thrower),
            next: next.clone(),
        };

        let mut state = self.shared.state.borrow_mut();
        let settlement = state.settlement();
        match settlement {
            None => state.reactions.push(reaction),
            Some(settlement) => {
                drop(state);
                self.shared
                    .scheduler
                    .defer(move || reaction.trigger(settlement));
            }
        }
        next
    }

    /// Registers a rejection handler only. Same as `then(Undefined, on_rejected)`.
    pub fn catch(&self, on_rejected: impl Into<Value>) -> Eventual {
        self.then(Value::Undefined, on_rejected)
    }

    /// Creates an eventual value resolved with `value`.
    ///
    /// Plain values fulfill it. Eventual values and thenables are adopted:
    /// the result follows their outcome.
    pub fn resolve(scheduler: &Scheduler, value: impl Into<Value>) -> Eventual {
        let eventual = Eventual::pending(scheduler);
        resolution::resolve(&eventual, value.into(), 0);
        eventual
    }

    /// Creates an eventual value rejected with `reason`.
    ///
    /// The reason is never adopted, even if it is itself an eventual value.
    pub fn reject(scheduler: &Scheduler, reason: impl Into<Value>) -> Eventual {
        let eventual = Eventual::pending(scheduler);
        eventual.settle(Settlement::Rejected(reason.into()));
        eventual
    }

    /// Recovers the eventual value wrapped in `value`, if it is one.
    pub fn from_value(value: &Value) -> Option<Eventual> {
        match value {
            Value::Object(obj) => Rc::clone(obj)
                .into_any()
                .downcast::<Shared>()
                .ok()
                .map(|shared| Eventual { shared }),
            _ => None,
        }
    }

    /// Current state.
    pub fn state(&self) -> EventualState {
        self.shared.state.borrow().status
    }

    /// Returns true while the value has not settled.
    pub fn is_pending(&self) -> bool {
        self.state() == EventualState::Pending
    }

    /// Fulfillment value or rejection reason, once settled.
    pub fn result(&self) -> Option<Value> {
        self.shared.state.borrow().result.clone()
    }

    /// Scheduler this value defers its jobs to.
    pub fn scheduler(&self) -> &Scheduler {
        &self.shared.scheduler
    }

    /// Returns true if both handles refer to the same eventual value.
    pub fn ptr_eq(&self, other: &Eventual) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }

    /// Schedules the transition out of pending. A value that has already
    /// settled by the time the job runs is left untouched.
    pub(crate) fn settle(&self, settlement: Settlement) {
        let this = self.clone();
        self.shared.scheduler.defer(move || this.apply(settlement));
    }

    fn apply(&self, settlement: Settlement) {
        let reactions = {
            let mut state = self.shared.state.borrow_mut();
            if state.status != EventualState::Pending {
                log::trace!("ignoring settlement of already {:?} value", state.status);
                return;
            }
            let (status, result) = match &settlement {
                Settlement::Fulfilled(value) => (EventualState::Fulfilled, value.clone()),
                Settlement::Rejected(reason) => (EventualState::Rejected, reason.clone()),
            };
            state.status = status;
            state.result = Some(result);
            std::mem::take(&mut state.reactions)
        };
        log::trace!(
            "eventual settled as {:?}, running {} reactions",
            self.state(),
            reactions.len()
        );
        for reaction in reactions {
            reaction.trigger(settlement.clone());
        }
    }
}

impl From<Eventual> for Value {
    fn from(eventual: Eventual) -> Self {
        Value::Object(eventual.shared)
    }
}

/// The resolve or reject capability of one eventual value.
///
/// The two capabilities handed to an executor share a one-shot latch: the
/// first call to either one decides the outcome, every later call to
/// either one is ignored.
#[derive(Clone)]
pub struct Resolver {
    kind: ResolverKind,
    target: Eventual,
    already_resolved: Rc<Cell<bool>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResolverKind {
    Resolve,
    Reject,
}

impl Resolver {
    pub(crate) fn pair(target: &Eventual) -> (Resolver, Resolver) {
        let already_resolved = Rc::new(Cell::new(false));
        let resolve = Resolver {
            kind: ResolverKind::Resolve,
            target: target.clone(),
            already_resolved: already_resolved.clone(),
        };
        let reject = Resolver {
            kind: ResolverKind::Reject,
            target: target.clone(),
            already_resolved,
        };
        (resolve, reject)
    }

    /// Resolves (or rejects) the target with `value`.
    ///
    /// Resolving runs the resolution procedure, so eventual values and
    /// thenables are adopted. Rejecting never adopts.
    pub fn call(&self, value: impl Into<Value>) {
        if self.already_resolved.replace(true) {
            log::trace!("{:?} ignored, target already resolved", self.kind);
            return;
        }
        match self.kind {
            ResolverKind::Resolve => resolution::resolve(&self.target, value.into(), 0),
            ResolverKind::Reject => self.target.settle(Settlement::Rejected(value.into())),
        }
    }

    /// Returns true once either capability of the pair has been used.
    pub fn is_resolved(&self) -> bool {
        self.already_resolved.get()
    }

    /// Wraps the capability as a callable, for passing to thenables.
    pub fn to_function(&self) -> Function {
        let resolver = self.clone();
        Function::unary(move |value| {
            resolver.call(value);
            Ok(Value::Undefined)
        })
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("kind", &self.kind)
            .field("already_resolved", &self.already_resolved.get())
            .finish()
    }
}

impl From<Resolver> for Value {
    fn from(resolver: Resolver) -> Self {
        Value::Function(resolver.to_function())
    }
}
