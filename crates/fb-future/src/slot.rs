//! One-shot completion slot shared between a future and the scheduler
//! callback that settles it.

use std::cell::{Cell, RefCell};
use std::task::{Context, Poll, Waker};

#[derive(Default)]
pub(crate) struct Slot {
    settled: Cell<bool>,
    /// Waker from the most recent pending poll.  A future is awaited by at
    /// most one task, so a single slot suffices.
    waker: RefCell<Option<Waker>>,
}

impl Slot {
    /// Mark the slot settled and wake the awaiting task, if any.
    /// Settling twice is impossible by construction (the settling callback
    /// runs at most once), but would be harmless.
    pub(crate) fn settle(&self) {
        self.settled.set(true);
        if let Some(waker) = self.waker.borrow_mut().take() {
            waker.wake();
        }
    }

    pub(crate) fn is_settled(&self) -> bool {
        self.settled.get()
    }

    pub(crate) fn poll(&self, cx: &mut Context<'_>) -> Poll<()> {
        if self.settled.get() {
            Poll::Ready(())
        } else {
            *self.waker.borrow_mut() = Some(cx.waker().clone());
            Poll::Pending
        }
    }
}
