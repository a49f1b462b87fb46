//! Sorting and divide-and-conquer step generators
//!
//! Bubble, insertion and selection sort are cursor-driven iterators: each
//! call to `next` does one comparison, swap or write. Quicksort, radix sort
//! and the merge-sort tree compute every step up front.
//!
//! Every generator sorts ascending and ends with a `complete` step.

mod bubble;
mod insertion;
mod merge_tree;
mod quick;
mod radix;
mod selection;

pub use bubble::BubbleSort;
pub use insertion::InsertionSort;
pub use merge_tree::{merge_sort_steps, MergeTree, TreeNode};
pub use quick::quick_sort_steps;
pub use radix::radix_sort_steps;
pub use selection::SelectionSort;

use crate::runner::{Algorithm, LiveRun, Run};
use crate::step::{Step, StepSequence, VisualState};

/// Returns every step `algorithm` produces for `values`
///
/// Returns `None` for graph algorithms.
pub fn sort_steps(algorithm: Algorithm, values: &[u32]) -> Option<Vec<Step>> {
    let steps = match algorithm {
        Algorithm::BubbleSort => BubbleSort::new(values).collect(),
        Algorithm::InsertionSort => InsertionSort::new(values).collect(),
        Algorithm::SelectionSort => SelectionSort::new(values).collect(),
        Algorithm::QuickSort => quick_sort_steps(values),
        Algorithm::RadixSort => radix_sort_steps(values),
        Algorithm::MergeSort => merge_sort_steps(values),
        _ => return None,
    };
    Some(steps)
}

pub(crate) fn start(algorithm: Algorithm, values: &[u32]) -> Run {
    let initial = VisualState::for_array(values.to_vec());
    match algorithm {
        Algorithm::BubbleSort => Run::Live(LiveRun::new(
            algorithm,
            initial,
            Box::new(BubbleSort::new(values)),
        )),
        Algorithm::InsertionSort => Run::Live(LiveRun::new(
            algorithm,
            initial,
            Box::new(InsertionSort::new(values)),
        )),
        Algorithm::SelectionSort => Run::Live(LiveRun::new(
            algorithm,
            initial,
            Box::new(SelectionSort::new(values)),
        )),
        _ => Run::Precomputed(StepSequence::with_steps(
            algorithm,
            initial,
            sort_steps(algorithm, values).unwrap_or_default(),
        )),
    }
}
