//! Aggregate combinators over many eventual values.
//!
//! Both combinators first normalize every input through
//! [`Eventual::resolve`], so plain values count as already fulfilled and
//! thenables are adopted.

use crate::eventual::Eventual;
use crate::scheduler::Scheduler;
use core_types::{Function, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// Collects fulfillment values for `all`, in input order.
#[derive(Debug)]
struct AllTracker {
    values: Vec<Option<Value>>,
    remaining: usize,
}

impl AllTracker {
    fn new(total: usize) -> Self {
        Self {
            values: vec![None; total],
            remaining: total,
        }
    }

    /// Records the value at `index`. Returns the complete ordered list once
    /// every input has fulfilled.
    fn record(&mut self, index: usize, value: Value) -> Option<Value> {
        if let Some(slot) = self.values.get_mut(index) {
            if slot.replace(value).is_none() {
                self.remaining -= 1;
            }
        }
        if self.remaining > 0 {
            return None;
        }
        let values = std::mem::take(&mut self.values)
            .into_iter()
            .map(|v| v.unwrap_or(Value::Undefined))
            .collect();
        Some(Value::List(values))
    }
}

impl Eventual {
    /// Fulfills with the list of all input values, in input order, once
    /// every input has fulfilled. Rejects with the reason of the first
    /// input to reject; later outcomes are ignored.
    ///
    /// An empty input fulfills with an empty list.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_types::Value;
    /// use eventual::{EventLoop, Eventual};
    ///
    /// let event_loop = EventLoop::new();
    /// let s = event_loop.scheduler();
    ///
    /// let all = Eventual::all(&s, vec![
    ///     Value::from(Eventual::resolve(&s, 1)),
    ///     Value::Smi(2),
    ///     Value::from(Eventual::resolve(&s, 3)),
    /// ]);
    ///
    /// event_loop.run_until_done().unwrap();
    /// assert_eq!(
    ///     all.result(),
    ///     Some(Value::List(vec![Value::Smi(1), Value::Smi(2), Value::Smi(3)]))
    /// );
    /// ```
    pub fn all<I>(scheduler: &Scheduler, values: I) -> Eventual
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        Eventual::new(scheduler, |resolve, reject| {
            if values.is_empty() {
                resolve.call(Value::List(Vec::new()));
                return Ok(());
            }

            let tracker = Rc::new(RefCell::new(AllTracker::new(values.len())));
            let on_rejected = reject.to_function();
            for (index, value) in values.into_iter().enumerate() {
                let tracker = tracker.clone();
                let resolve = resolve.clone();
                let on_fulfilled = Function::unary(move |value| {
                    let complete = tracker.borrow_mut().record(index, value);
                    if let Some(list) = complete {
                        resolve.call(list);
                    }
                    Ok(Value::Undefined)
                });
                Eventual::resolve(scheduler, value).then(on_fulfilled, on_rejected.clone());
            }
            Ok(())
        })
    }

    /// Settles like whichever input settles first; later outcomes are
    /// ignored.
    ///
    /// An empty input never settles.
    pub fn race<I>(scheduler: &Scheduler, values: I) -> Eventual
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Eventual::new(scheduler, |resolve, reject| {
            let on_fulfilled = resolve.to_function();
            let on_rejected = reject.to_function();
            for value in values {
                Eventual::resolve(scheduler, value)
                    .then(on_fulfilled.clone(), on_rejected.clone());
            }
            Ok(())
        })
    }
}
