//! Unit tests for all and race

use super::support::runtime;
use core_types::{Function, PlainObject, Value};
use eventual::{Eventual, EventualState, Task};

fn list(items: &[i32]) -> Value {
    Value::List(items.iter().copied().map(Value::Smi).collect())
}

#[test]
fn all_fulfills_in_input_order() {
    let (event_loop, s) = runtime();
    let late = Eventual::deferred(&s);
    let early = Eventual::deferred(&s);
    let all = Eventual::all(&s, vec![Value::from(late.promise.clone()), Value::from(early.promise.clone())]);

    early.resolve.call(2);
    event_loop.run_until_done().unwrap();
    assert!(all.is_pending());

    late.resolve.call(1);
    event_loop.run_until_done().unwrap();
    assert_eq!(all.result(), Some(list(&[1, 2])));
}

#[test]
fn all_mixes_values_and_eventuals() {
    let (event_loop, s) = runtime();
    let all = Eventual::all(
        &s,
        vec![
            Value::from(Eventual::resolve(&s, 1)),
            Value::Smi(2),
            Value::from(Eventual::resolve(&s, 3)),
        ],
    );
    event_loop.run_until_done().unwrap();
    assert_eq!(all.result(), Some(list(&[1, 2, 3])));
}

#[test]
fn all_of_nothing_is_empty_list() {
    let (event_loop, s) = runtime();
    let all = Eventual::all(&s, Vec::<Value>::new());
    event_loop.run_until_done().unwrap();
    assert_eq!(all.state(), EventualState::Fulfilled);
    assert_eq!(all.result(), Some(Value::List(vec![])));
}

#[test]
fn all_rejects_with_first_rejection() {
    let (event_loop, s) = runtime();
    let never = Eventual::deferred(&s);
    let all = Eventual::all(
        &s,
        vec![
            Value::from(never.promise.clone()),
            Value::from(Eventual::reject(&s, "first")),
            Value::from(Eventual::reject(&s, "second")),
        ],
    );
    event_loop.run_until_done().unwrap();
    assert_eq!(all.state(), EventualState::Rejected);
    assert_eq!(all.result(), Some(Value::from("first")));
}

#[test]
fn all_ignores_fulfillments_after_rejection() {
    let (event_loop, s) = runtime();
    let slow = Eventual::deferred(&s);
    let all = Eventual::all(
        &s,
        vec![Value::from(Eventual::reject(&s, "bad")), Value::from(slow.promise.clone())],
    );
    event_loop.run_until_done().unwrap();
    slow.resolve.call(9);
    event_loop.run_until_done().unwrap();
    assert_eq!(all.state(), EventualState::Rejected);
    assert_eq!(all.result(), Some(Value::from("bad")));
}

#[test]
fn all_adopts_thenables() {
    let (event_loop, s) = runtime();
    let thenable = PlainObject::new().with_property(
        "then",
        Function::new(|_this, args| match args.first().and_then(Value::as_function) {
            Some(resolve) => resolve.invoke(Value::Smi(5)),
            None => Ok(Value::Undefined),
        }),
    );
    let all = Eventual::all(&s, vec![Value::from(thenable), Value::Smi(6)]);
    event_loop.run_until_done().unwrap();
    assert_eq!(all.result(), Some(list(&[5, 6])));
}

#[test]
fn race_settles_with_earliest_timer() {
    let (event_loop, s) = runtime();
    let slow = Eventual::deferred(&s);
    let fast = Eventual::deferred(&s);
    {
        let resolve = slow.resolve.clone();
        event_loop.set_timeout(50, Task::new(move || resolve.call("slow")));
        let resolve = fast.resolve.clone();
        event_loop.set_timeout(10, Task::new(move || resolve.call("fast")));
    }
    let race = Eventual::race(&s, vec![slow.promise.clone(), fast.promise.clone()]);

    event_loop.run_until_done().unwrap();
    assert_eq!(race.result(), Some(Value::from("fast")));
    assert_eq!(slow.promise.result(), Some(Value::from("slow")));
}

#[test]
fn race_rejects_when_first_settlement_is_rejection() {
    let (event_loop, s) = runtime();
    let ok = Eventual::deferred(&s);
    let bad = Eventual::deferred(&s);
    {
        let reject = bad.reject.clone();
        event_loop.set_timeout(5, Task::new(move || reject.call("timeout")));
        let resolve = ok.resolve.clone();
        event_loop.set_timeout(20, Task::new(move || resolve.call("late")));
    }
    let race = Eventual::race(&s, vec![ok.promise.clone(), bad.promise.clone()]);
    event_loop.run_until_done().unwrap();
    assert_eq!(race.state(), EventualState::Rejected);
    assert_eq!(race.result(), Some(Value::from("timeout")));
}

#[test]
fn race_with_plain_value_fulfills_with_it() {
    let (event_loop, s) = runtime();
    let pending = Eventual::deferred(&s);
    let race = Eventual::race(&s, vec![Value::from(pending.promise.clone()), Value::from("now")]);
    event_loop.run_until_done().unwrap();
    assert_eq!(race.result(), Some(Value::from("now")));
}

#[test]
fn race_of_nothing_stays_pending() {
    let (event_loop, s) = runtime();
    let race = Eventual::race(&s, Vec::<Value>::new());
    event_loop.run_until_done().unwrap();
    assert!(race.is_pending());
}
