//! [`sequence`] — apply a callback across a list, one item per interval.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use fb_sched::{Behavior, Finalizer, SchedError, SchedResult, Scheduler};

use crate::slot::Slot;

/// Future returned by [`sequence`].  Resolves once the last item has been
/// handed to the callback.
#[must_use = "a Sequence makes progress on ticks, but settlement is only observable by polling it"]
pub struct Sequence {
    slot: Rc<Slot>,
    behavior: Option<Behavior>,
}

impl Sequence {
    /// Has the last item been processed?
    pub fn is_settled(&self) -> bool {
        self.slot.is_settled()
    }

    /// The `Every` behavior driving this sequence, or `None` when the item
    /// list was empty.  Removing it cancels the remaining items and leaves
    /// the future pending forever.
    pub fn behavior(&self) -> Option<&Behavior> {
        self.behavior.as_ref()
    }
}

impl Future for Sequence {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        self.slot.poll(cx)
    }
}

/// Apply `callback` to each item of `items` in order, waiting `interval`
/// ticks before every application, including the first.
///
/// With `interval = 2` and three items the callback runs at ticks 2, 4
/// and 6, and the future settles during tick 6's evaluation.  An empty
/// list settles immediately without registering a behavior.  Errors on
/// `interval == 0`.
pub fn sequence<T, F>(
    sched: &Scheduler,
    interval: u64,
    items: impl IntoIterator<Item = T>,
    mut callback: F,
) -> SchedResult<Sequence>
where
    T: 'static,
    F: FnMut(T) + 'static,
{
    if interval == 0 {
        return Err(SchedError::ZeroInterval);
    }

    let slot = Rc::new(Slot::default());
    let mut queue: VecDeque<T> = items.into_iter().collect();
    if queue.is_empty() {
        slot.settle();
        return Ok(Sequence {
            slot,
            behavior: None,
        });
    }

    // One `Every` behavior is the whole state machine: it pops the next item
    // on each interval boundary and hands back the settling finalizer once
    // the queue runs dry.  The queue empties exactly at `counter == duration`,
    // so the finalizer the registry runs is the one from the completing
    // invocation and the future settles in the tick that processes the last
    // item.
    let duration = interval.saturating_mul(queue.len() as u64);
    let settle = Rc::clone(&slot);
    let behavior = sched.every(duration, move |counter, _delta_time| {
        if counter % interval == 0 {
            if let Some(item) = queue.pop_front() {
                callback(item);
            }
        }
        if queue.is_empty() {
            let settle = Rc::clone(&settle);
            Some(Box::new(move || settle.settle()) as Finalizer)
        } else {
            None
        }
    })?;

    Ok(Sequence {
        slot,
        behavior: Some(behavior),
    })
}
