//! [`delay`] — a future that resolves after a fixed number of ticks.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use fb_sched::{Behavior, SchedResult, Scheduler};

use crate::slot::Slot;

/// Future returned by [`delay`].  Resolves with `()` once the backing
/// `Once` behavior fires.
#[must_use = "a Delay makes progress on ticks, but settlement is only observable by polling it"]
pub struct Delay {
    slot: Rc<Slot>,
    behavior: Behavior,
}

impl Delay {
    /// Has the delay elapsed?  Settled futures stay settled.
    pub fn is_elapsed(&self) -> bool {
        self.slot.is_settled()
    }

    /// The `Once` behavior backing this delay.
    ///
    /// Removing it from the scheduler before it fires cancels the delay and
    /// leaves the future pending forever.
    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }
}

impl Future for Delay {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        self.slot.poll(cx)
    }
}

/// Resolve a future after `ticks` ticks of `sched`.
///
/// The backing behavior is registered immediately — the countdown starts at
/// the next tick whether or not the future is ever polled.  Errors on
/// `ticks == 0`, like [`Scheduler::once`].
pub fn delay(sched: &Scheduler, ticks: u64) -> SchedResult<Delay> {
    let slot = Rc::new(Slot::default());
    let settle = Rc::clone(&slot);
    let behavior = sched.once(ticks, move || settle.settle())?;
    Ok(Delay { slot, behavior })
}
