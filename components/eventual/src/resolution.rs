//! The resolution procedure.
//!
//! Normalizes any value an eventual is resolved with (a continuation result
//! or an argument to `resolve`) into a settlement of the target:
//!
//! 1. The target itself: reject with a `TypeError`.
//! 2. An eventual value of this engine: follow its outcome.
//! 3. An object or callable with a callable `then`: call it once with a
//!    fresh pair of one-shot callbacks and follow whichever fires first.
//!    The value passed to the resolve callback is resolved on a later turn,
//!    so chains of thenables never nest on the stack.
//! 4. Anything else: fulfill with it.

use crate::eventual::{Eventual, Settlement};
use core_types::{Function, JsError, Value};
use std::cell::Cell;
use std::rc::Rc;

/// Message of the rejection produced when a value is resolved with itself.
pub const SELF_RESOLUTION_MESSAGE: &str = "a promise cannot be resolved with itself";

/// Drives `target` towards the outcome described by `x`.
///
/// `depth` counts nested adoptions within one resolution attempt and is
/// checked against the scheduler's adoption limit, if any.
pub(crate) fn resolve(target: &Eventual, x: Value, depth: usize) {
    if let Some(limit) = target.scheduler().max_adoption_depth() {
        if depth > limit {
            log::warn!("adoption chain exceeded {limit} levels, rejecting");
            target.settle(Settlement::Rejected(
                JsError::range_error(format!("adoption chain exceeds {limit} levels")).into(),
            ));
            return;
        }
    }

    if let Some(inner) = Eventual::from_value(&x) {
        adopt_eventual(target, &inner, depth);
    } else if x.is_object_like() {
        adopt_thenable(target, x, depth);
    } else {
        target.settle(Settlement::Fulfilled(x));
    }
}

fn adopt_eventual(target: &Eventual, inner: &Eventual, depth: usize) {
    if inner.ptr_eq(target) {
        log::warn!("eventual value resolved with itself");
        target.settle(Settlement::Rejected(
            JsError::type_error(SELF_RESOLUTION_MESSAGE).into(),
        ));
        return;
    }

    log::debug!("adopting {:?} eventual at depth {depth}", inner.state());
    let on_fulfilled = if inner.is_pending() {
        let target = target.clone();
        Function::unary(move |value| {
            resolve(&target, value, depth + 1);
            Ok(Value::Undefined)
        })
    } else {
        settle_function(target, Settlement::Fulfilled)
    };
    inner.then(on_fulfilled, settle_function(target, Settlement::Rejected));
}

fn adopt_thenable(target: &Eventual, x: Value, depth: usize) {
    let then = match x.get("then") {
        Ok(then) => then,
        Err(thrown) => {
            log::debug!("reading then threw, rejecting");
            target.settle(Settlement::Rejected(thrown));
            return;
        }
    };
    let Value::Function(then) = then else {
        target.settle(Settlement::Fulfilled(x));
        return;
    };

    log::debug!("adopting foreign thenable at depth {depth}");
    let called = Rc::new(Cell::new(false));

    let resolve_promise = {
        let target = target.clone();
        let called = called.clone();
        Function::unary(move |y| {
            if !called.replace(true) {
                // A thenable may call back with another thenable from inside
                // `then`; recursing here would grow the stack without bound.
                let next = target.clone();
                target
                    .scheduler()
                    .defer(move || resolve(&next, y, depth + 1));
            }
            Ok(Value::Undefined)
        })
    };
    let reject_promise = {
        let target = target.clone();
        let called = called.clone();
        Function::unary(move |r| {
            if !called.replace(true) {
                target.settle(Settlement::Rejected(r));
            }
            Ok(Value::Undefined)
        })
    };

    if let Err(thrown) = then.call(&x, &[resolve_promise.into(), reject_promise.into()]) {
        if !called.replace(true) {
            log::debug!("thenable threw before settling, rejecting");
            target.settle(Settlement::Rejected(thrown));
        }
    }
}

/// A callable that settles `target` directly, bypassing adoption.
fn settle_function(target: &Eventual, settlement: fn(Value) -> Settlement) -> Function {
    let target = target.clone();
    Function::unary(move |value| {
        target.settle(settlement(value));
        Ok(Value::Undefined)
    })
}
