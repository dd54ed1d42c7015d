//! The built-in conformance cases.
//!
//! Ids are prefixed with the Promises/A+ section they exercise; `comb.`
//! covers the aggregate combinators.

use crate::case::{ConformanceCase, Expectation, Probe};
use core_types::{ErrorKind, Function, JsError, PlainObject, Value};
use eventual::{Eventual, Scheduler};
use std::cell::RefCell;
use std::rc::Rc;

/// A thenable whose `then` hands its callbacks to `body`.
fn thenable<F>(body: F) -> Value
where
    F: Fn(&Function, &Function) -> Result<Value, Value> + 'static,
{
    PlainObject::new()
        .with_property(
            "then",
            Function::new(move |_this, args| {
                match (
                    args.first().and_then(Value::as_function),
                    args.get(1).and_then(Value::as_function),
                ) {
                    (Some(resolve), Some(reject)) => body(resolve, reject),
                    _ => Err(JsError::type_error("then called without callbacks").into()),
                }
            }),
        )
        .into()
}

/// A handler that appends `tag` to `trace` and passes its argument on.
fn trace_step(trace: &Rc<RefCell<String>>, tag: &'static str) -> Function {
    let trace = trace.clone();
    Function::unary(move |v| {
        trace.borrow_mut().push_str(tag);
        Ok(v)
    })
}

/// A handler that ignores its argument and returns the trace so far.
fn read_trace(trace: &Rc<RefCell<String>>) -> Function {
    let trace = trace.clone();
    Function::unary(move |_| Ok(Value::from(trace.borrow().clone())))
}

fn states() -> Vec<ConformanceCase> {
    vec![
        ConformanceCase::new(
            "2.1.2.fulfilled-is-final",
            "a fulfilled value cannot be rejected afterwards",
            |s: &Scheduler| {
                let d = Eventual::deferred(s);
                d.resolve.call(1);
                d.reject.call(2);
                Probe::new(d.promise, Expectation::Fulfilled(Value::Smi(1)))
            },
        ),
        ConformanceCase::new(
            "2.1.3.rejected-is-final",
            "a rejected value cannot be fulfilled afterwards",
            |s: &Scheduler| {
                let d = Eventual::deferred(s);
                d.reject.call("r");
                d.resolve.call(1);
                Probe::new(d.promise, Expectation::Rejected(Value::from("r")))
            },
        ),
        ConformanceCase::new(
            "2.1.1.pending-without-settlement",
            "a value never resolved stays pending",
            |s: &Scheduler| Probe::new(Eventual::deferred(s).promise, Expectation::Pending),
        ),
    ]
}

fn then_method() -> Vec<ConformanceCase> {
    vec![
        ConformanceCase::new(
            "2.2.1.non-function-on-fulfilled",
            "a non-function fulfillment handler passes the value through",
            |s: &Scheduler| {
                let p = Eventual::resolve(s, 3).then(Value::from("not a function"), Value::Undefined);
                Probe::new(p, Expectation::Fulfilled(Value::Smi(3)))
            },
        ),
        ConformanceCase::new(
            "2.2.1.non-function-on-rejected",
            "a non-function rejection handler passes the reason through",
            |s: &Scheduler| {
                let p = Eventual::reject(s, "why").then(Value::Undefined, Value::Smi(5));
                Probe::new(p, Expectation::Rejected(Value::from("why")))
            },
        ),
        ConformanceCase::new(
            "2.2.2.on-fulfilled-called-once",
            "the fulfillment handler runs exactly once",
            |s: &Scheduler| {
                let trace = Rc::new(RefCell::new(String::new()));
                let d = Eventual::deferred(s);
                let p = d
                    .promise
                    .then(trace_step(&trace, "f"), Value::Undefined)
                    .then(read_trace(&trace), Value::Undefined);
                d.resolve.call(1);
                d.resolve.call(2);
                d.reject.call(3);
                Probe::new(p, Expectation::Fulfilled(Value::from("f")))
            },
        ),
        ConformanceCase::new(
            "2.2.4.asynchronous-invocation",
            "handlers on a settled value run only after the registering code returns",
            |s: &Scheduler| {
                let trace = Rc::new(RefCell::new(String::new()));
                let settled = Eventual::resolve(s, 0);
                let p = settled
                    .then(trace_step(&trace, "handler"), Value::Undefined)
                    .then(read_trace(&trace), Value::Undefined);
                trace.borrow_mut().push_str("sync;");
                Probe::new(p, Expectation::Fulfilled(Value::from("sync;handler")))
            },
        ),
        ConformanceCase::new(
            "2.2.6.registration-order",
            "handlers on one value run in the order they were registered",
            |s: &Scheduler| {
                let trace = Rc::new(RefCell::new(String::new()));
                let d = Eventual::deferred(s);
                d.promise.then(trace_step(&trace, "a"), Value::Undefined);
                d.promise.then(trace_step(&trace, "b"), Value::Undefined);
                let p = d
                    .promise
                    .then(trace_step(&trace, "c"), Value::Undefined)
                    .then(read_trace(&trace), Value::Undefined);
                d.resolve.call(0);
                Probe::new(p, Expectation::Fulfilled(Value::from("abc")))
            },
        ),
        ConformanceCase::new(
            "2.2.6.rejection-registration-order",
            "rejection handlers run in the order they were registered",
            |s: &Scheduler| {
                let trace = Rc::new(RefCell::new(String::new()));
                let d = Eventual::deferred(s);
                d.promise.then(Value::Undefined, trace_step(&trace, "x"));
                let p = d
                    .promise
                    .then(Value::Undefined, trace_step(&trace, "y"))
                    .then(read_trace(&trace), Value::Undefined);
                d.reject.call("r");
                Probe::new(p, Expectation::Fulfilled(Value::from("xy")))
            },
        ),
        ConformanceCase::new(
            "2.2.7.handler-value-fulfills",
            "a handler's return value resolves the returned value",
            |s: &Scheduler| {
                let p = Eventual::reject(s, "e").then(
                    Value::Undefined,
                    Function::unary(|_| Ok(Value::from("recovered"))),
                );
                Probe::new(p, Expectation::Fulfilled(Value::from("recovered")))
            },
        ),
        ConformanceCase::new(
            "2.2.7.handler-error-rejects",
            "a handler's error rejects the returned value",
            |s: &Scheduler| {
                let p = Eventual::resolve(s, 1).then(
                    Function::unary(|_| Err(JsError::range_error("out of range").into())),
                    Value::Undefined,
                );
                Probe::new(p, Expectation::RejectedWith(ErrorKind::RangeError))
            },
        ),
        ConformanceCase::new(
            "2.2.7.catch-recovers",
            "catch handles a rejection further down the chain",
            |s: &Scheduler| {
                let p = Eventual::reject(s, "deep")
                    .then(Function::unary(|_| Ok(Value::from("skipped"))), Value::Undefined)
                    .catch(Function::unary(|e| Ok(Value::from(format!("caught:{e}")))));
                Probe::new(p, Expectation::Fulfilled(Value::from("caught:deep")))
            },
        ),
    ]
}

fn resolution_procedure() -> Vec<ConformanceCase> {
    vec![
        ConformanceCase::new(
            "2.3.1.self-resolution",
            "returning the value's own handle rejects with a TypeError",
            |s: &Scheduler| {
                let own: Rc<RefCell<Option<Eventual>>> = Rc::new(RefCell::new(None));
                let handle = own.clone();
                let p = Eventual::resolve(s, 0).then(
                    Function::unary(move |_| {
                        Ok(handle.borrow().clone().map(Value::from).unwrap_or(Value::Undefined))
                    }),
                    Value::Undefined,
                );
                *own.borrow_mut() = Some(p.clone());
                Probe::new(p, Expectation::RejectedWith(ErrorKind::TypeError))
            },
        ),
        ConformanceCase::new(
            "2.3.2.adopt-pending-eventual",
            "a pending eventual value is followed until it settles",
            |s: &Scheduler| {
                let inner = Eventual::deferred(s);
                let p = Eventual::resolve(s, inner.promise.clone());
                let resolve = inner.resolve.clone();
                Eventual::resolve(s, 0).then(
                    Function::unary(move |_| {
                        resolve.call("late");
                        Ok(Value::Undefined)
                    }),
                    Value::Undefined,
                );
                Probe::new(p, Expectation::Fulfilled(Value::from("late")))
            },
        ),
        ConformanceCase::new(
            "2.3.2.adopt-rejected-eventual",
            "a rejected eventual value passes its reason on",
            |s: &Scheduler| {
                let p = Eventual::resolve(s, 1)
                    .then(
                        {
                            let s = s.clone();
                            Function::unary(move |_| Ok(Eventual::reject(&s, "inner").into()))
                        },
                        Value::Undefined,
                    );
                Probe::new(p, Expectation::Rejected(Value::from("inner")))
            },
        ),
        ConformanceCase::new(
            "2.3.3.thenable-fulfills",
            "a foreign thenable is adopted",
            |s: &Scheduler| {
                let x = thenable(|resolve, _| resolve.invoke(Value::from("foreign")));
                Probe::new(Eventual::resolve(s, x), Expectation::Fulfilled(Value::from("foreign")))
            },
        ),
        ConformanceCase::new(
            "2.3.3.thenable-first-call-wins",
            "only the first callback invocation of a thenable counts",
            |s: &Scheduler| {
                let x = thenable(|resolve, reject| {
                    reject.invoke(Value::from("first"))?;
                    resolve.invoke(Value::from("second"))?;
                    reject.invoke(Value::from("third"))
                });
                Probe::new(Eventual::resolve(s, x), Expectation::Rejected(Value::from("first")))
            },
        ),
        ConformanceCase::new(
            "2.3.3.thenable-throws-after-resolving",
            "an error after a thenable called back is ignored",
            |s: &Scheduler| {
                let x = thenable(|resolve, _| {
                    resolve.invoke(Value::Smi(1))?;
                    Err(Value::from("ignored"))
                });
                Probe::new(Eventual::resolve(s, x), Expectation::Fulfilled(Value::Smi(1)))
            },
        ),
        ConformanceCase::new(
            "2.3.3.thenable-throws",
            "an error from then before any callback rejects",
            |s: &Scheduler| {
                let x = thenable(|_, _| Err(Value::from("thrown")));
                Probe::new(Eventual::resolve(s, x), Expectation::Rejected(Value::from("thrown")))
            },
        ),
        ConformanceCase::new(
            "2.3.3.non-callable-then",
            "an object whose then is not callable is a plain fulfillment value",
            |s: &Scheduler| {
                let obj = Value::from(PlainObject::new().with_property("then", Value::Smi(5)));
                Probe::new(Eventual::resolve(s, obj.clone()), Expectation::Fulfilled(obj))
            },
        ),
        ConformanceCase::new(
            "2.3.3.nested-thenables",
            "a thenable resolving with another thenable is followed recursively",
            |s: &Scheduler| {
                let x = thenable(|resolve, _| {
                    resolve.invoke(thenable(|resolve, _| resolve.invoke(Value::from("nested"))))
                });
                Probe::new(Eventual::resolve(s, x), Expectation::Fulfilled(Value::from("nested")))
            },
        ),
        ConformanceCase::new(
            "2.3.3.self-resolving-thenable",
            "a thenable that resolves with itself rejects instead of recursing forever",
            |s: &Scheduler| {
                let obj = Rc::new(PlainObject::new());
                obj.set(
                    "then",
                    Function::new(|this, args| match args.first().and_then(Value::as_function) {
                        Some(resolve) => resolve.invoke(this.clone()),
                        None => Ok(Value::Undefined),
                    }),
                );
                Probe::new(
                    Eventual::resolve(s, Value::Object(obj)),
                    Expectation::RejectedWith(ErrorKind::RangeError),
                )
            },
        ),
        ConformanceCase::new(
            "2.3.4.primitive",
            "a primitive fulfills directly",
            |s: &Scheduler| {
                Probe::new(Eventual::resolve(s, Value::Null), Expectation::Fulfilled(Value::Null))
            },
        ),
    ]
}

fn combinators() -> Vec<ConformanceCase> {
    vec![
        ConformanceCase::new(
            "comb.all-ordered",
            "all fulfills with values in input order regardless of settle order",
            |s: &Scheduler| {
                let first = Eventual::deferred(s);
                let second = Eventual::deferred(s);
                let p = Eventual::all(
                    s,
                    vec![
                        Value::from(first.promise.clone()),
                        Value::from(second.promise.clone()),
                        Value::Smi(3),
                    ],
                );
                second.resolve.call(2);
                let resolve = first.resolve.clone();
                second.promise.then(
                    Function::unary(move |_| {
                        resolve.call(1);
                        Ok(Value::Undefined)
                    }),
                    Value::Undefined,
                );
                Probe::new(
                    p,
                    Expectation::Fulfilled(Value::List(vec![
                        Value::Smi(1),
                        Value::Smi(2),
                        Value::Smi(3),
                    ])),
                )
            },
        ),
        ConformanceCase::new(
            "comb.all-empty",
            "all of nothing fulfills with an empty list",
            |s: &Scheduler| {
                Probe::new(
                    Eventual::all(s, Vec::<Value>::new()),
                    Expectation::Fulfilled(Value::List(Vec::new())),
                )
            },
        ),
        ConformanceCase::new(
            "comb.all-first-rejection",
            "all rejects with the first rejection",
            |s: &Scheduler| {
                let p = Eventual::all(
                    s,
                    vec![
                        Value::from(Eventual::deferred(s).promise),
                        Value::from(Eventual::reject(s, "bad")),
                    ],
                );
                Probe::new(p, Expectation::Rejected(Value::from("bad")))
            },
        ),
        ConformanceCase::new(
            "comb.race-first-settled",
            "race follows the first input to settle",
            |s: &Scheduler| {
                let slow = Eventual::deferred(s);
                let p = Eventual::race(
                    s,
                    vec![Value::from(slow.promise.clone()), Value::from(Eventual::resolve(s, "fast"))],
                );
                let resolve = slow.resolve.clone();
                p.then(
                    Function::unary(move |_| {
                        resolve.call("slow");
                        Ok(Value::Undefined)
                    }),
                    Value::Undefined,
                );
                Probe::new(p, Expectation::Fulfilled(Value::from("fast")))
            },
        ),
        ConformanceCase::new(
            "comb.race-empty",
            "race of nothing never settles",
            |s: &Scheduler| Probe::new(Eventual::race(s, Vec::<Value>::new()), Expectation::Pending),
        ),
    ]
}

/// The built-in Promises/A+ compliance cases.
pub fn aplus_suite() -> Vec<ConformanceCase> {
    let mut cases = states();
    cases.extend(then_method());
    cases.extend(resolution_procedure());
    cases.extend(combinators());
    cases
}
