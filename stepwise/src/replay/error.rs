//! Replay controller errors

use thiserror::Error;

/// Result type for replay operations
pub type ReplayResult<T> = Result<T, ReplayError>;

/// Errors raised by the replay controller
///
/// Ordinary misuse (ticking after the end, rewinding before the start) is
/// a no-op rather than an error. These cover explicit requests that cannot
/// be honoured.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ReplayError {
    /// Speed multiplier was zero, negative or not a number
    #[error("speed must be a finite number greater than zero, got {speed}")]
    InvalidSpeed { speed: f64 },

    /// No sequence is loaded
    #[error("no step sequence is loaded")]
    NothingLoaded,

    /// Seek target past the last step
    #[error("cannot seek to step {index}: the run has {len} step(s)")]
    OutOfRange { index: usize, len: usize },
}

impl ReplayError {
    /// Creates an out-of-range error
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }
}
