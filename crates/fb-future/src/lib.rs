//! `fb-future` — tick-resolved futures for the framebeat scheduler.
//!
//! [`delay`] and [`sequence`] compose timed work as futures that settle at
//! (or after) some future tick.  They carry no executor and spawn no tasks:
//! each one registers an ordinary behavior with the scheduler at call time,
//! and that behavior settles a shared completion slot when it completes.
//! All progress is made by [`Scheduler::tick`][fb_sched::Scheduler::tick];
//! polling merely observes it, which is why everything here stays
//! single-threaded (`Rc`, no `Send`).
//!
//! # Cancellation caveat
//!
//! Removing the backing behavior from the scheduler before it completes
//! leaves the future pending forever — the slot is only ever settled by the
//! behavior itself.  Callers who cancel must stop awaiting too.

pub mod delay;
pub mod sequence;
mod slot;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use delay::{Delay, delay};
pub use sequence::{Sequence, sequence};
