//! Replay: play a run forward, pause it, change its speed, step it back.
//!
//! - [`ReplayController`]: cursor, playback flags and the shared state
//! - [`Tick`]: what a single tick did
//! - [`ReplayError`]: requests the controller cannot honour
//!
//! With the `clock` feature, [`Player`] ticks an [`Engine`](crate::Engine)
//! from a tokio timer.
//!
//! # Design Principles
//!
//! This module hides how rewinding works. There is one strategy only:
//! rebuild from the initial state by replaying the recorded steps.

mod controller;
mod error;

#[cfg(feature = "clock")]
mod clock;

pub use controller::{ReplayController, Tick};
pub use error::{ReplayError, ReplayResult};

#[cfg(feature = "clock")]
pub use clock::{Playback, PlaybackEnd, Player, PlayerHandle};
