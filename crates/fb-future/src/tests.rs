//! Unit tests for fb-future.
//!
//! Futures are polled by hand (no executor): a no-op waker for settlement
//! checks, a counting waker for the wake-notification test.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};

use fb_sched::{SchedError, Scheduler};
use futures::task::{self, ArcWake};

use crate::{delay, sequence};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn sched() -> Scheduler {
    Scheduler::new()
}

fn run(sched: &Scheduler, n: u32) {
    for _ in 0..n {
        sched.tick(16.0);
    }
}

/// Poll once with a no-op waker.
fn poll_once<F: Future + Unpin>(future: &mut F) -> Poll<F::Output> {
    let waker = task::noop_waker();
    let mut cx = Context::from_waker(&waker);
    Pin::new(future).poll(&mut cx)
}

/// Waker that counts how many times it is woken.
struct CountingWaker(AtomicUsize);

impl ArcWake for CountingWaker {
    fn wake_by_ref(arc_self: &Arc<Self>) {
        arc_self.0.fetch_add(1, Ordering::SeqCst);
    }
}

// ── Delay ─────────────────────────────────────────────────────────────────────

mod delays {
    use super::*;

    #[test]
    fn resolves_after_the_exact_tick_count() {
        let s = sched();
        let mut d = delay(&s, 2).unwrap();

        assert!(poll_once(&mut d).is_pending());
        run(&s, 1);
        assert!(!d.is_elapsed());
        run(&s, 1);
        assert!(d.is_elapsed());
        assert!(poll_once(&mut d).is_ready());
    }

    #[test]
    fn zero_ticks_is_rejected() {
        let s = sched();
        assert!(matches!(delay(&s, 0), Err(SchedError::ZeroDelay)));
    }

    #[test]
    fn wakes_the_pending_task_when_settling() {
        let s = sched();
        let mut d = delay(&s, 1).unwrap();

        let wakes = Arc::new(CountingWaker(AtomicUsize::new(0)));
        let waker = task::waker(Arc::clone(&wakes));
        let mut cx = Context::from_waker(&waker);
        assert!(Pin::new(&mut d).poll(&mut cx).is_pending());

        run(&s, 1);
        assert_eq!(wakes.0.load(Ordering::SeqCst), 1);
        assert!(poll_once(&mut d).is_ready());
    }

    #[test]
    fn external_removal_leaves_the_future_pending() {
        let s = sched();
        let mut d = delay(&s, 2).unwrap();
        s.remove(d.behavior());

        run(&s, 10);
        assert!(!d.is_elapsed());
        assert!(poll_once(&mut d).is_pending());
    }
}

// ── Sequence ──────────────────────────────────────────────────────────────────

mod sequences {
    use super::*;

    #[test]
    fn applies_items_on_interval_boundaries() {
        let s = sched();
        let seen: Rc<RefCell<Vec<char>>> = Rc::new(RefCell::new(Vec::new()));
        let rec = Rc::clone(&seen);
        let mut seq = sequence(&s, 2, ['a', 'b', 'c'], move |item| {
            rec.borrow_mut().push(item);
        })
        .unwrap();

        run(&s, 2);
        assert_eq!(*seen.borrow(), ['a']);
        run(&s, 2);
        assert_eq!(*seen.borrow(), ['a', 'b']);
        run(&s, 1);
        assert!(!seq.is_settled());
        run(&s, 1);
        assert_eq!(*seen.borrow(), ['a', 'b', 'c']);
        assert!(seq.is_settled(), "settles during the tick of the last item");
        assert!(poll_once(&mut seq).is_ready());
    }

    #[test]
    fn driving_behavior_retires_after_settlement() {
        let s = sched();
        let seq = sequence(&s, 1, [1, 2], |_| {}).unwrap();

        run(&s, 2);
        assert!(seq.is_settled());
        assert_eq!(s.len(), 1, "retirement is deferred like any removal");
        run(&s, 1);
        assert!(s.is_empty());
    }

    #[test]
    fn empty_list_settles_immediately() {
        let s = sched();
        let called: Rc<RefCell<Vec<i32>>> = Rc::new(RefCell::new(Vec::new()));
        let rec = Rc::clone(&called);
        let mut seq = sequence(&s, 3, Vec::<i32>::new(), move |item| {
            rec.borrow_mut().push(item);
        })
        .unwrap();

        assert!(seq.is_settled());
        assert!(seq.behavior().is_none());
        assert!(poll_once(&mut seq).is_ready());
        run(&s, 5);
        assert!(called.borrow().is_empty());
        assert!(s.is_empty());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let s = sched();
        assert!(matches!(
            sequence(&s, 0, [1, 2, 3], |_| {}),
            Err(SchedError::ZeroInterval)
        ));
    }

    #[test]
    fn single_item_waits_a_full_interval() {
        let s = sched();
        let seen: Rc<RefCell<Vec<&str>>> = Rc::new(RefCell::new(Vec::new()));
        let rec = Rc::clone(&seen);
        let seq = sequence(&s, 3, ["only"], move |item| {
            rec.borrow_mut().push(item);
        })
        .unwrap();

        run(&s, 2);
        assert!(seen.borrow().is_empty());
        run(&s, 1);
        assert_eq!(*seen.borrow(), ["only"]);
        assert!(seq.is_settled());
    }

    #[test]
    fn removal_cancels_the_remaining_items() {
        let s = sched();
        let seen: Rc<RefCell<Vec<i32>>> = Rc::new(RefCell::new(Vec::new()));
        let rec = Rc::clone(&seen);
        let mut seq = sequence(&s, 1, [1, 2, 3], move |item| {
            rec.borrow_mut().push(item);
        })
        .unwrap();

        run(&s, 1);
        assert_eq!(*seen.borrow(), [1]);

        let driver = seq.behavior().unwrap().clone();
        s.remove(&driver);
        run(&s, 5);
        assert_eq!(*seen.borrow(), [1], "no further items after cancellation");
        assert!(!seq.is_settled());
        assert!(poll_once(&mut seq).is_pending());
    }
}
