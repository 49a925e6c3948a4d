//! Scheduler error type.
//!
//! All variants are construction-time validation failures, surfaced
//! synchronously at the call site.  Nothing inside the tick loop itself
//! produces errors; the only runtime condition (removing an unknown id) is
//! a logged warning, not an error.

use thiserror::Error;

/// Validation errors from the behavior constructors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedError {
    #[error("a `once` behavior requires a delay of at least 1 tick")]
    ZeroDelay,

    #[error("a `forever` behavior requires an interval of at least 1 tick")]
    ZeroInterval,

    #[error("an `every` behavior requires a duration of at least 1 tick")]
    ZeroDuration,
}

/// Shorthand result type for the framebeat crates.
pub type SchedResult<T> = Result<T, SchedError>;
