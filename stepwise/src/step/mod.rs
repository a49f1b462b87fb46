//! Step model shared by every runner and the replay controller.
//!
//! - [`Step`]: one immutable algorithmic event plus its explanation
//! - [`StepKind`]: the closed set of event families and their variants
//! - [`StepSequence`]: the finite ordered steps of one run
//! - [`VisualState`]: the projection renderers read after each applied step

mod kind;
mod sequence;
mod state;

pub use kind::{
    format_distance, EdgeRef, FlowSegment, FlowStep, PathStep, SortStep, SpanningStep, Step,
    StepKind, TraversalStep,
};
pub use sequence::StepSequence;
pub use state::{SubarrayView, VisualState, RADIX};
