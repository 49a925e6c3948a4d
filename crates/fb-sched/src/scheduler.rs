//! The `Scheduler` — behavior registry and tick algorithm.
//!
//! # Why deferred mutation
//!
//! Behavior callbacks are free to register and remove behaviors, including
//! themselves.  Mutating the active list while it is being iterated would
//! skip or double-evaluate entries, so every mutation goes through a pending
//! queue instead: `to_add` and `to_remove` buffer requests until the start
//! of the next tick.  Queue draining substitutes for locking — "mutate now"
//! and "observe now" are temporally distinct, and no synchronization is
//! needed because the whole scheduler is single-threaded by construction.
//!
//! # Tick phases
//!
//! 1. Promote everything in `to_add` into the active list, in order.
//! 2. Apply everything in `to_remove`; entries no longer present are
//!    skipped silently.
//! 3. Evaluate each active behavior in order: bump its counter, then apply
//!    its policy.  Natural completion (`Once` fired, `Every` reached its
//!    duration) enqueues the behavior into `to_remove`, so a completing
//!    behavior stays visible to queries until the next tick.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::behavior::{Behavior, Finalizer, Policy};
use crate::error::{SchedError, SchedResult};

// ── Configuration ─────────────────────────────────────────────────────────────

/// Scheduler configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchedConfig {
    /// Emit a `log::warn!` when [`Scheduler::remove_by_id`] misses.
    /// Default: `true`.
    pub logging: bool,
}

impl Default for SchedConfig {
    fn default() -> Self {
        Self { logging: true }
    }
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

struct Inner {
    /// The authoritative ordered set of active behaviors.  Order follows
    /// registration order and determines evaluation order within a tick.
    active: RefCell<Vec<Behavior>>,
    /// Behaviors registered since the last tick, promoted at the start of
    /// the next one.
    to_add: RefCell<Vec<Behavior>>,
    /// Behaviors whose removal was requested since the last tick.
    to_remove: RefCell<Vec<Behavior>>,
    logging: Cell<bool>,
}

/// Registry of timed behaviors, advanced once per frame via [`tick`].
///
/// `Scheduler` is a cheap cloneable handle: clones share the same registry,
/// which lets callbacks and futures hold their own reference.  Everything is
/// single-threaded (`Rc` inside) — all operations, including the callbacks
/// invoked by `tick`, run on the thread that owns the scheduler.
///
/// The external frame driver must call [`tick`] exactly once per frame and
/// never re-entrantly (a callback must not call `tick`).
///
/// [`tick`]: Scheduler::tick
#[derive(Clone)]
pub struct Scheduler {
    inner: Rc<Inner>,
}

impl Scheduler {
    /// Create a scheduler with the default configuration.
    pub fn new() -> Self {
        Self::with_config(SchedConfig::default())
    }

    /// Create a scheduler with an explicit configuration.
    pub fn with_config(config: SchedConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                active: RefCell::new(Vec::new()),
                to_add: RefCell::new(Vec::new()),
                to_remove: RefCell::new(Vec::new()),
                logging: Cell::new(config.logging),
            }),
        }
    }

    /// Toggle warning output at runtime.
    pub fn set_logging(&self, enabled: bool) {
        self.inner.logging.set(enabled);
    }

    // ── Construction API ──────────────────────────────────────────────────

    /// Register a behavior that fires `callback` once, `delay` ticks from
    /// now, then retires itself.
    ///
    /// The behavior is appended to the pending queue and becomes active —
    /// visible to queries and evaluation — at the next tick.
    pub fn once(&self, delay: u64, callback: impl FnOnce() + 'static) -> SchedResult<Behavior> {
        self.builder().once(delay, callback)
    }

    /// Register a behavior that fires `callback(counter, delta_time)` every
    /// `interval` ticks until it is explicitly removed.
    pub fn forever(
        &self,
        interval: u64,
        callback: impl FnMut(u64, f64) + 'static,
    ) -> SchedResult<Behavior> {
        self.builder().forever(interval, callback)
    }

    /// Register a behavior that fires `callback(counter, delta_time)` on
    /// every tick for `duration` ticks.
    ///
    /// The callback may return a [`Finalizer`]; the one returned by the
    /// completing invocation (`counter == duration`) runs exactly once,
    /// immediately after that invocation, before the behavior retires.
    /// Finalizers returned by earlier invocations are dropped unused.
    pub fn every(
        &self,
        duration: u64,
        callback: impl FnMut(u64, f64) -> Option<Finalizer> + 'static,
    ) -> SchedResult<Behavior> {
        self.builder().every(duration, callback)
    }

    /// Start building a behavior with an id and/or labels attached.
    pub fn builder(&self) -> BehaviorBuilder<'_> {
        BehaviorBuilder {
            sched: self,
            id: None,
            labels: Vec::new(),
        }
    }

    // ── Removal ───────────────────────────────────────────────────────────

    /// Request removal of `behavior` at the next tick.
    ///
    /// Idempotent: enqueueing a handle that is no longer (or never was) in
    /// the active list is a silent no-op when the queue drains.  A behavior
    /// removed during tick *N* — by its own callback or anyone else's —
    /// still completes its tick-*N* evaluation and disappears at *N + 1*.
    pub fn remove(&self, behavior: &Behavior) {
        self.inner.to_remove.borrow_mut().push(behavior.clone());
    }

    /// Resolve `id` against the active list and request removal of the
    /// first match.
    ///
    /// A miss is not an error: it logs a warning (when logging is enabled)
    /// and performs no mutation.
    pub fn remove_by_id(&self, id: &str) {
        match self.get(id) {
            Some(behavior) => self.remove(&behavior),
            None => {
                if self.inner.logging.get() {
                    log::warn!("tried to remove non-existent behavior: {id}");
                }
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// The first active behavior whose id equals `id`.
    ///
    /// Scans the active list only — behaviors still in the pending queue
    /// are not found.
    pub fn get(&self, id: &str) -> Option<Behavior> {
        self.inner
            .active
            .borrow()
            .iter()
            .find(|b| b.id() == Some(id))
            .cloned()
    }

    /// Handles to every active behavior, in evaluation order.
    pub fn get_all(&self) -> Vec<Behavior> {
        self.inner.active.borrow().clone()
    }

    /// Every active behavior carrying `label`, in evaluation order.
    pub fn get_by_label(&self, label: &str) -> Vec<Behavior> {
        self.inner
            .active
            .borrow()
            .iter()
            .filter(|b| b.labels().iter().any(|l| l == label))
            .cloned()
            .collect()
    }

    /// Number of active behaviors (pending additions excluded).
    pub fn len(&self) -> usize {
        self.inner.active.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.active.borrow().is_empty()
    }

    /// Drop every behavior, active and pending.  Intended for teardown and
    /// for reusing one scheduler across test cases.
    pub fn reset(&self) {
        self.inner.active.borrow_mut().clear();
        self.inner.to_add.borrow_mut().clear();
        self.inner.to_remove.borrow_mut().clear();
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the scheduler by one frame.
    ///
    /// `delta_time` is passed through to `Forever` and `Every` callbacks
    /// untouched; the scheduler itself counts whole ticks and owns no
    /// timekeeping.  Callback panics propagate out of `tick` and abort the
    /// remainder of that tick's evaluation — failures are deliberately not
    /// isolated from each other.
    pub fn tick(&self, delta_time: f64) {
        // Phase 1: promote pending additions, preserving registration order.
        {
            let mut active = self.inner.active.borrow_mut();
            active.append(&mut self.inner.to_add.borrow_mut());
        }

        // Phase 2: apply pending removals.  A queued behavior that was
        // already removed, or was never promoted, is simply absent here.
        {
            let mut active = self.inner.active.borrow_mut();
            for gone in self.inner.to_remove.borrow_mut().drain(..) {
                if let Some(pos) = active.iter().position(|b| b.same(&gone)) {
                    active.remove(pos);
                }
            }
        }

        // Phase 3: evaluate a snapshot of handles.  Callbacks only ever
        // touch the pending queues or perform reads, so the list being
        // iterated is never mutated mid-iteration.
        let snapshot: Vec<Behavior> = self.inner.active.borrow().clone();
        for behavior in &snapshot {
            self.evaluate(behavior, delta_time);
        }
    }

    fn evaluate(&self, behavior: &Behavior, delta_time: f64) {
        let counter = behavior.advance();

        let completed = {
            let mut policy = behavior.policy_mut();
            match &mut *policy {
                Policy::Once { delay, callback } => {
                    if counter == *delay {
                        if let Some(fire) = callback.take() {
                            fire();
                        }
                        true
                    } else {
                        false
                    }
                }
                Policy::Forever { interval, callback } => {
                    if counter % *interval == 0 {
                        callback(counter, delta_time);
                    }
                    false
                }
                Policy::Every { duration, callback } => {
                    let finalizer = callback(counter, delta_time);
                    if counter == *duration {
                        if let Some(finish) = finalizer {
                            finish();
                        }
                        true
                    } else {
                        false
                    }
                }
            }
        };

        if completed {
            // Natural completion is deferred like any other removal: the
            // behavior stays queryable until the next tick drains the queue.
            self.inner.to_remove.borrow_mut().push(behavior.clone());
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

// ── BehaviorBuilder ───────────────────────────────────────────────────────────

/// Attaches an optional id and labels before registering a behavior.
///
/// Terminates in one of the three policy constructors, which validate the
/// timing value, enqueue the behavior and hand back its handle:
///
/// ```rust,ignore
/// let spinner = sched.builder().id("spinner").label("ui").forever(4, redraw)?;
/// ```
pub struct BehaviorBuilder<'a> {
    sched: &'a Scheduler,
    id: Option<String>,
    labels: Vec<String>,
}

impl BehaviorBuilder<'_> {
    /// Set the behavior's id.  Uniqueness is not enforced; id lookups
    /// return the first match in active order.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Append a label for group lookup via
    /// [`Scheduler::get_by_label`].
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// See [`Scheduler::once`].
    pub fn once(self, delay: u64, callback: impl FnOnce() + 'static) -> SchedResult<Behavior> {
        if delay == 0 {
            return Err(SchedError::ZeroDelay);
        }
        Ok(self.register(Policy::Once {
            delay,
            callback: Some(Box::new(callback)),
        }))
    }

    /// See [`Scheduler::forever`].
    pub fn forever(
        self,
        interval: u64,
        callback: impl FnMut(u64, f64) + 'static,
    ) -> SchedResult<Behavior> {
        if interval == 0 {
            return Err(SchedError::ZeroInterval);
        }
        Ok(self.register(Policy::Forever {
            interval,
            callback: Box::new(callback),
        }))
    }

    /// See [`Scheduler::every`].
    pub fn every(
        self,
        duration: u64,
        callback: impl FnMut(u64, f64) -> Option<Finalizer> + 'static,
    ) -> SchedResult<Behavior> {
        if duration == 0 {
            return Err(SchedError::ZeroDuration);
        }
        Ok(self.register(Policy::Every {
            duration,
            callback: Box::new(callback),
        }))
    }

    fn register(self, policy: Policy) -> Behavior {
        let behavior = Behavior::new(self.id, self.labels, policy);
        self.sched.inner.to_add.borrow_mut().push(behavior.clone());
        behavior
    }
}
