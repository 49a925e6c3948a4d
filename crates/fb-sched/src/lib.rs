//! `fb-sched` — behavior registry and tick algorithm for the framebeat
//! frame-loop framework.
//!
//! A [`Scheduler`] holds an ordered set of timed callbacks ("behaviors") and
//! is advanced once per external frame via [`Scheduler::tick`].  Three timing
//! policies are supported:
//!
//! | Policy    | Fires                                   | Retires            |
//! |-----------|-----------------------------------------|--------------------|
//! | `Once`    | at `counter == delay`                   | after firing       |
//! | `Forever` | whenever `counter % interval == 0`      | never              |
//! | `Every`   | every tick while active                 | at `counter == duration`, after running its finalizer |
//!
//! Mutations requested while a tick is in flight (including from inside
//! behavior callbacks) are buffered in pending queues and applied at the
//! start of the next tick, so every active behavior is evaluated exactly
//! once per tick regardless of concurrent add/remove requests.
//!
//! # What lives here
//!
//! | Module        | Contents                                      |
//! |---------------|-----------------------------------------------|
//! | [`behavior`]  | `Behavior` handle, `PolicyKind`, `Finalizer`  |
//! | [`scheduler`] | `Scheduler`, `BehaviorBuilder`, `SchedConfig` |
//! | [`error`]     | `SchedError`, `SchedResult`                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                |
//! |---------|-------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to [`SchedConfig`].    |
//!
//! # Example
//!
//! ```
//! use fb_sched::Scheduler;
//!
//! let sched = Scheduler::new();
//! sched.once(3, || println!("three ticks in"))?;
//! sched.forever(2, |counter, _delta_time| println!("beat {counter}"))?;
//!
//! for _ in 0..10 {
//!     sched.tick(16.0);
//! }
//! # Ok::<(), fb_sched::SchedError>(())
//! ```

pub mod behavior;
pub mod error;
pub mod scheduler;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use behavior::{Behavior, Finalizer, PolicyKind};
pub use error::{SchedError, SchedResult};
pub use scheduler::{BehaviorBuilder, SchedConfig, Scheduler};
