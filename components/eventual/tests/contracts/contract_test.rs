//! Contract tests for the eventual component
//!
//! These tests pin the public surface: constructor and method signatures,
//! return types and the observable state after each call.

use core_types::{Function, Value};
use eventual::{
    Deferred, EventLoop, Eventual, EventualState, MicroTask, Resolver, RuntimeConfig,
    RuntimeError, Scheduler, Task, Trampoline,
};

mod event_loop_contract {
    use super::*;

    #[test]
    fn event_loop_new_returns_self() {
        let event_loop = EventLoop::new();
        assert!(!event_loop.has_pending_work());
    }

    #[test]
    fn event_loop_enqueue_task_accepts_task() {
        let event_loop = EventLoop::new();
        event_loop.enqueue_task(Task::new(|| {}));
        assert!(!event_loop.is_task_queue_empty());
    }

    #[test]
    fn event_loop_enqueue_microtask_accepts_microtask() {
        let event_loop = EventLoop::new();
        event_loop.enqueue_microtask(MicroTask::new(|| {}));
        assert!(!event_loop.is_microtask_queue_empty());
    }

    #[test]
    fn event_loop_run_until_done_returns_result() {
        let event_loop = EventLoop::new();
        let result: Result<(), RuntimeError> = event_loop.run_until_done();
        assert!(result.is_ok());
    }

    #[test]
    fn event_loop_run_all_microtasks_returns_count() {
        let event_loop = EventLoop::new();
        event_loop.enqueue_microtask(MicroTask::new(|| {}));
        let ran: usize = event_loop.run_all_microtasks().unwrap();
        assert_eq!(ran, 1);
    }

    #[test]
    fn event_loop_scheduler_is_a_trampoline() {
        let event_loop = EventLoop::new();
        let scheduler: Scheduler = event_loop.scheduler();
        scheduler.defer(|| {});
        assert!(!event_loop.is_microtask_queue_empty());
    }

    #[test]
    fn event_loop_with_config_keeps_config() {
        let config = RuntimeConfig::default().with_max_microtasks_per_turn(Some(10));
        let event_loop = EventLoop::with_config(config);
        assert_eq!(event_loop.config().max_microtasks_per_turn, Some(10));
    }
}

mod eventual_contract {
    use super::*;

    #[test]
    fn eventual_new_returns_pending() {
        let event_loop = EventLoop::new();
        let p: Eventual = Eventual::new(&event_loop.scheduler(), |_, _| Ok(()));
        assert_eq!(p.state(), EventualState::Pending);
        assert_eq!(p.result(), None);
    }

    #[test]
    fn eventual_then_returns_new_eventual() {
        let event_loop = EventLoop::new();
        let p = Eventual::resolve(&event_loop.scheduler(), 1);
        let q: Eventual = p.then(Function::unary(Ok), Value::Undefined);
        assert!(!q.ptr_eq(&p));
    }

    #[test]
    fn eventual_catch_returns_new_eventual() {
        let event_loop = EventLoop::new();
        let p = Eventual::reject(&event_loop.scheduler(), "r");
        let q: Eventual = p.catch(Function::unary(Ok));
        assert!(!q.ptr_eq(&p));
    }

    #[test]
    fn eventual_resolve_and_reject_settle_after_loop() {
        let event_loop = EventLoop::new();
        let s = event_loop.scheduler();
        let ok = Eventual::resolve(&s, 1);
        let err = Eventual::reject(&s, 2);
        event_loop.run_until_done().unwrap();
        assert_eq!(ok.state(), EventualState::Fulfilled);
        assert_eq!(err.state(), EventualState::Rejected);
    }

    #[test]
    fn eventual_all_and_race_return_eventual() {
        let event_loop = EventLoop::new();
        let s = event_loop.scheduler();
        let _all: Eventual = Eventual::all(&s, vec![Value::Smi(1)]);
        let _race: Eventual = Eventual::race(&s, vec![Value::Smi(1)]);
    }

    #[test]
    fn eventual_converts_to_value_and_back() {
        let event_loop = EventLoop::new();
        let p = Eventual::resolve(&event_loop.scheduler(), 1);
        let v: Value = p.clone().into();
        assert_eq!(v.type_of(), "object");
        assert!(Eventual::from_value(&v).is_some_and(|q| q.ptr_eq(&p)));
    }
}

mod deferred_contract {
    use super::*;

    #[test]
    fn deferred_exposes_promise_and_capabilities() {
        let event_loop = EventLoop::new();
        let Deferred {
            promise,
            resolve,
            reject,
        } = Eventual::deferred(&event_loop.scheduler());
        let _: (Resolver, Resolver) = (resolve, reject);
        assert!(promise.is_pending());
    }

    #[test]
    fn resolver_to_function_returns_callable() {
        let event_loop = EventLoop::new();
        let d = Eventual::defer(&event_loop.scheduler());
        let f: Function = d.resolve.to_function();
        assert_eq!(Value::Function(f).type_of(), "function");
    }
}

mod trampoline_contract {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// A trampoline that only collects jobs, for driving them by hand.
    #[derive(Default)]
    struct ManualQueue {
        jobs: RefCell<Vec<MicroTask>>,
    }

    impl Trampoline for ManualQueue {
        fn defer(&self, job: MicroTask) {
            self.jobs.borrow_mut().push(job);
        }
    }

    #[test]
    fn custom_trampoline_drives_eventuals() {
        let queue = Rc::new(ManualQueue::default());
        let scheduler = Scheduler::from_rc(queue.clone());
        let p = Eventual::resolve(&scheduler, "custom");
        assert!(p.is_pending());

        loop {
            let jobs: Vec<MicroTask> = queue.jobs.borrow_mut().drain(..).collect();
            if jobs.is_empty() {
                break;
            }
            for job in jobs {
                job.run();
            }
        }
        assert_eq!(p.result(), Some(Value::from("custom")));
    }
}
