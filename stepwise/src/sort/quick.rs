//! Quicksort, computed up front with an explicit range stack.

use crate::step::{SortStep, Step};

/// Returns every quicksort step for `values`
///
/// Lomuto partition around the last element of each range. After a
/// partition the larger side is pushed first, so the smaller side is
/// processed next and the stack stays logarithmic.
pub fn quick_sort_steps(values: &[u32]) -> Vec<Step> {
    let mut array = values.to_vec();
    let mut steps = Vec::new();
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    if !array.is_empty() {
        ranges.push((0, array.len() - 1));
    }

    while let Some((lo, hi)) = ranges.pop() {
        if lo == hi {
            steps.push(Step::new(
                SortStep::Fixed { index: lo },
                format!("A single value at position {lo} is already in place"),
            ));
            continue;
        }

        let pivot = array[hi];
        steps.push(Step::new(
            SortStep::Pivot { index: hi, lo, hi },
            format!("Partition positions {lo}..{hi} around pivot {pivot}"),
        ));

        let mut store = lo;
        for j in lo..hi {
            let value = array[j];
            if value <= pivot {
                steps.push(Step::new(
                    SortStep::Compare { i: j, j: hi },
                    format!("{value} ≤ {pivot}: it belongs left of the pivot"),
                ));
                if store != j {
                    array.swap(store, j);
                    steps.push(Step::new(
                        SortStep::Swap { i: store, j },
                        format!("Swap positions {store} and {j}"),
                    ));
                }
                store += 1;
            } else {
                steps.push(Step::new(
                    SortStep::Compare { i: j, j: hi },
                    format!("{value} > {pivot}: leave it on the right"),
                ));
            }
        }

        if store != hi {
            array.swap(store, hi);
            steps.push(Step::new(
                SortStep::Swap { i: store, j: hi },
                format!("Move the pivot into position {store}"),
            ));
        }
        steps.push(Step::new(
            SortStep::Fixed { index: store },
            format!("Pivot {pivot} is in its final position {store}"),
        ));

        let left = (store > lo).then(|| (lo, store - 1));
        let right = (store < hi).then(|| (store + 1, hi));
        let size = |range: Option<(usize, usize)>| range.map_or(0, |(a, b)| b - a + 1);
        let (larger, smaller) = if size(left) >= size(right) {
            (left, right)
        } else {
            (right, left)
        };
        ranges.extend(larger);
        ranges.extend(smaller);
    }

    steps.push(Step::new(SortStep::Complete, "Quicksort complete"));
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::VisualState;

    fn sorted_by_replay(values: &[u32]) -> Vec<u32> {
        let mut state = VisualState::for_array(values.to_vec());
        for step in quick_sort_steps(values) {
            state.apply(&step);
        }
        state.array
    }

    #[test]
    fn test_quick_sort_replays_to_sorted() {
        assert_eq!(sorted_by_replay(&[3, 6, 1, 8, 2, 9, 2]), vec![1, 2, 2, 3, 6, 8, 9]);
        assert_eq!(sorted_by_replay(&[5, 4, 3, 2, 1]), vec![1, 2, 3, 4, 5]);
        assert_eq!(sorted_by_replay(&[1]), vec![1]);
    }

    #[test]
    fn test_every_position_fixed_once() {
        let steps = quick_sort_steps(&[9, 7, 5, 11, 12, 2, 14, 3, 10, 6]);
        let mut fixed: Vec<usize> = steps
            .iter()
            .filter_map(|s| match s.kind() {
                crate::step::StepKind::Sort(SortStep::Fixed { index }) => Some(*index),
                _ => None,
            })
            .collect();
        fixed.sort_unstable();
        assert_eq!(fixed, (0..10).collect::<Vec<_>>());
    }
}
