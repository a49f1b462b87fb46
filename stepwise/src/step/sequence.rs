//! Finite, ordered step lists produced by one runner invocation.

use super::kind::Step;
use super::state::VisualState;
use crate::runner::Algorithm;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The ordered steps of one run, together with the state they start from
///
/// A sequence is owned by the replay controller for as long as the run is
/// loaded and is discarded, never edited, when the user resets or starts
/// another run. Steps are only ever appended, and only while an incremental
/// runner is still producing them.
///
/// # Example
///
/// ```
/// use stepwise::runner::{run_to_completion, Algorithm, RunContext};
/// use stepwise::{EngineConfig, Graph};
///
/// let graph = Graph::new(false, true);
/// let context = RunContext::new().with_array(vec![3, 1, 2]);
/// let sequence =
///     run_to_completion(Algorithm::QuickSort, &graph, &context, &EngineConfig::default())
///         .unwrap();
///
/// assert_eq!(sequence.replay(sequence.len()).array, vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepSequence {
    run_id: Uuid,
    algorithm: Algorithm,
    initial: VisualState,
    steps: Vec<Step>,
}

impl StepSequence {
    /// Creates an empty sequence starting from `initial`
    pub fn new(algorithm: Algorithm, initial: VisualState) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            algorithm,
            initial,
            steps: Vec::new(),
        }
    }

    /// Creates a sequence from precomputed steps
    pub fn with_steps(algorithm: Algorithm, initial: VisualState, steps: Vec<Step>) -> Self {
        Self {
            steps,
            ..Self::new(algorithm, initial)
        }
    }

    /// Returns the identifier of the run that produced this sequence
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Returns the algorithm that produced this sequence
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Returns the state before the first step
    pub fn initial(&self) -> &VisualState {
        &self.initial
    }

    /// Returns the number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if there are no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the step at `index`
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Returns all steps in order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Returns an iterator over the steps
    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Rebuilds the state after the first `count` steps
    ///
    /// Starts from a fresh copy of the initial state every time, so the
    /// result never depends on earlier calls.
    pub fn replay(&self, count: usize) -> VisualState {
        let mut state = self.initial.clone();
        for step in self.steps.iter().take(count) {
            state.apply(step);
        }
        state
    }

    /// Returns the state after every step has been applied
    pub fn final_state(&self) -> VisualState {
        self.replay(self.steps.len())
    }

    /// Counts the steps with the given discriminator
    pub fn count(&self, name: &str) -> usize {
        self.steps.iter().filter(|s| s.name() == name).count()
    }

    pub(crate) fn push(&mut self, step: Step) {
        self.steps.push(step);
    }
}

impl<'a> IntoIterator for &'a StepSequence {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::SortStep;

    fn swaps() -> StepSequence {
        StepSequence::with_steps(
            Algorithm::BubbleSort,
            VisualState::for_array(vec![3, 2, 1]),
            vec![
                Step::new(SortStep::Swap { i: 0, j: 1 }, "swap 0 and 1"),
                Step::new(SortStep::Swap { i: 1, j: 2 }, "swap 1 and 2"),
                Step::new(SortStep::Swap { i: 0, j: 1 }, "swap 0 and 1"),
            ],
        )
    }

    #[test]
    fn test_replay_prefixes() {
        let sequence = swaps();
        assert_eq!(sequence.replay(0).array, vec![3, 2, 1]);
        assert_eq!(sequence.replay(1).array, vec![2, 3, 1]);
        assert_eq!(sequence.final_state().array, vec![1, 2, 3]);
    }

    #[test]
    fn test_replay_is_repeatable() {
        let sequence = swaps();
        let first = sequence.replay(2);
        let second = sequence.replay(2);
        assert_eq!(first, second);
        assert_eq!(sequence.initial().array, vec![3, 2, 1]);
    }

    #[test]
    fn test_count_by_name() {
        assert_eq!(swaps().count("swap"), 3);
        assert_eq!(swaps().count("compare"), 0);
    }
}
