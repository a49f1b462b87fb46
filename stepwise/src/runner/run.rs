//! What a runner hands to the replay controller.

use super::Algorithm;
use crate::step::{Step, StepSequence, VisualState};
use std::fmt;

/// Boxed incremental step producer
///
/// Cursor-driven runners implement `Iterator<Item = Step>`; each call to
/// `next` performs one unit of work and reports it.
pub type StepStream = Box<dyn Iterator<Item = Step> + Send>;

/// A started run
pub enum Run {
    /// Every step was computed up front
    Precomputed(StepSequence),
    /// Steps are produced one at a time as they are requested
    Live(LiveRun),
}

impl Run {
    /// Returns the algorithm being run
    pub fn algorithm(&self) -> Algorithm {
        self.recorded().algorithm()
    }

    /// Returns the steps produced so far
    pub fn recorded(&self) -> &StepSequence {
        match self {
            Run::Precomputed(sequence) => sequence,
            Run::Live(live) => &live.recorded,
        }
    }

    /// Drains any remaining steps and returns the full sequence
    pub fn into_sequence(self) -> StepSequence {
        match self {
            Run::Precomputed(sequence) => sequence,
            Run::Live(live) => live.into_sequence(),
        }
    }
}

impl fmt::Debug for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Run::Precomputed(sequence) => f
                .debug_struct("Precomputed")
                .field("algorithm", &sequence.algorithm())
                .field("steps", &sequence.len())
                .finish(),
            Run::Live(live) => f
                .debug_struct("Live")
                .field("algorithm", &live.recorded.algorithm())
                .field("recorded", &live.recorded.len())
                .field("exhausted", &live.is_exhausted())
                .finish(),
        }
    }
}

/// An incremental run: a generator plus the steps it has produced so far
pub struct LiveRun {
    recorded: StepSequence,
    generator: Option<StepStream>,
}

impl LiveRun {
    /// Wraps a generator that starts from `initial`
    pub fn new(algorithm: Algorithm, initial: VisualState, generator: StepStream) -> Self {
        Self {
            recorded: StepSequence::new(algorithm, initial),
            generator: Some(generator),
        }
    }

    /// Returns the steps produced so far
    pub fn recorded(&self) -> &StepSequence {
        &self.recorded
    }

    /// Returns true once the generator has no more steps
    pub fn is_exhausted(&self) -> bool {
        self.generator.is_none()
    }

    /// Produces the next step and records it
    ///
    /// Returns the index of the new step, or `None` once the generator is
    /// exhausted.
    pub fn pull(&mut self) -> Option<usize> {
        let step = self.generator.as_mut()?.next();
        match step {
            Some(step) => {
                self.recorded.push(step);
                Some(self.recorded.len() - 1)
            }
            None => {
                self.generator = None;
                None
            }
        }
    }

    /// Drains the generator and returns the full sequence
    pub fn into_sequence(mut self) -> StepSequence {
        while self.pull().is_some() {}
        self.recorded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::SortStep;

    #[test]
    fn test_live_run_records_pulled_steps() {
        let steps = vec![
            Step::new(SortStep::Compare { i: 0, j: 1 }, "compare"),
            Step::new(SortStep::Complete, "done"),
        ];
        let mut live = LiveRun::new(
            Algorithm::BubbleSort,
            VisualState::for_array(vec![1, 2]),
            Box::new(steps.into_iter()),
        );

        assert_eq!(live.pull(), Some(0));
        assert_eq!(live.recorded().len(), 1);
        assert!(!live.is_exhausted());

        assert_eq!(live.pull(), Some(1));
        assert_eq!(live.pull(), None);
        assert!(live.is_exhausted());
        assert_eq!(live.pull(), None);
    }

    #[test]
    fn test_into_sequence_drains() {
        let steps = vec![Step::new(SortStep::Complete, "done")];
        let run = Run::Live(LiveRun::new(
            Algorithm::InsertionSort,
            VisualState::for_array(vec![1]),
            Box::new(steps.into_iter()),
        ));
        assert_eq!(run.algorithm(), Algorithm::InsertionSort);
        assert_eq!(run.into_sequence().len(), 1);
    }
}
