//! The `Behavior` handle and its timing policies.
//!
//! A behavior is one scheduled unit of timed work: a callback, the timing
//! policy that gates it, and a progress counter advanced once per tick while
//! the behavior is active.  Each policy carries its own callback signature,
//! so the tick evaluation is statically exhaustive — there is no runtime
//! check that a `delay` is present on a `Once` behavior, the variant owns it.

use std::cell::{Cell, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// A deferred action returned by an `Every` callback, run exactly once when
/// the behavior completes.
pub type Finalizer = Box<dyn FnOnce()>;

pub(crate) type OnceCallback = Box<dyn FnOnce()>;
pub(crate) type ForeverCallback = Box<dyn FnMut(u64, f64)>;
pub(crate) type EveryCallback = Box<dyn FnMut(u64, f64) -> Option<Finalizer>>;

// ── Policy ────────────────────────────────────────────────────────────────────

/// Which timing policy a behavior follows.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PolicyKind {
    /// Fire once, `delay` ticks after activation, then retire.
    Once,
    /// Fire every `interval` ticks, until explicitly removed.
    Forever,
    /// Fire every tick for `duration` ticks, then retire.
    Every,
}

/// Timing constant plus the callback it gates.
pub(crate) enum Policy {
    Once {
        delay: u64,
        /// Taken (and thereby consumed) by the firing tick.
        callback: Option<OnceCallback>,
    },
    Forever {
        interval: u64,
        callback: ForeverCallback,
    },
    Every {
        duration: u64,
        callback: EveryCallback,
    },
}

impl Policy {
    pub(crate) fn kind(&self) -> PolicyKind {
        match self {
            Policy::Once { .. } => PolicyKind::Once,
            Policy::Forever { .. } => PolicyKind::Forever,
            Policy::Every { .. } => PolicyKind::Every,
        }
    }
}

// ── Behavior ──────────────────────────────────────────────────────────────────

struct Inner {
    id: Option<String>,
    labels: Vec<String>,
    kind: PolicyKind,
    /// Ticks this behavior has been evaluated for, starting at 0.
    counter: Cell<u64>,
    /// Borrowed mutably only while the owning scheduler evaluates a tick.
    policy: RefCell<Policy>,
}

/// A shared handle to one scheduled unit of timed work.
///
/// Handles are cheap to clone and compare by identity ([`Behavior::same`]),
/// never by value: two behaviors built from identical arguments are still
/// distinct.  Callers use handles for queries and for cancellation via
/// [`Scheduler::remove`][crate::Scheduler::remove]; all mutation happens
/// inside the scheduler.
#[derive(Clone)]
pub struct Behavior {
    inner: Rc<Inner>,
}

impl Behavior {
    pub(crate) fn new(id: Option<String>, labels: Vec<String>, policy: Policy) -> Self {
        let kind = policy.kind();
        Self {
            inner: Rc::new(Inner {
                id,
                labels,
                kind,
                counter: Cell::new(0),
                policy: RefCell::new(policy),
            }),
        }
    }

    /// The caller-supplied id, if any.  Ids are not required to be unique;
    /// lookups return the first match in active order.
    pub fn id(&self) -> Option<&str> {
        self.inner.id.as_deref()
    }

    /// Labels attached at construction, in the order they were given.
    pub fn labels(&self) -> &[String] {
        &self.inner.labels
    }

    /// Number of ticks this behavior has been evaluated for.
    ///
    /// 0 until the tick that promotes it from the pending queue; that tick
    /// already counts as 1.
    pub fn counter(&self) -> u64 {
        self.inner.counter.get()
    }

    /// The timing policy this behavior follows.
    pub fn kind(&self) -> PolicyKind {
        self.inner.kind
    }

    /// Identity comparison: do both handles refer to the same behavior?
    pub fn same(&self, other: &Behavior) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Advance the counter by one tick and return the new value.
    pub(crate) fn advance(&self) -> u64 {
        let next = self.inner.counter.get() + 1;
        self.inner.counter.set(next);
        next
    }

    pub(crate) fn policy_mut(&self) -> RefMut<'_, Policy> {
        self.inner.policy.borrow_mut()
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Behavior")
            .field("id", &self.inner.id)
            .field("labels", &self.inner.labels)
            .field("kind", &self.inner.kind)
            .field("counter", &self.counter())
            .finish_non_exhaustive()
    }
}
