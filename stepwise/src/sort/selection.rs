//! Selection sort, one comparison or swap per step.

use crate::step::{SortStep, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    StartPass,
    Scan,
    NewMinimum(usize),
    Swap,
    Fix,
    Done,
}

/// Cursor-driven selection sort
///
/// Each pass scans the unsorted suffix for its minimum, reporting every
/// comparison and every time the minimum changes, then swaps the minimum
/// into place.
#[derive(Debug, Clone)]
pub struct SelectionSort {
    array: Vec<u32>,
    i: usize,
    j: usize,
    min: usize,
    phase: Phase,
}

impl SelectionSort {
    /// Creates the sort over a copy of `values`
    pub fn new(values: &[u32]) -> Self {
        Self {
            array: values.to_vec(),
            i: 0,
            j: 0,
            min: 0,
            phase: Phase::StartPass,
        }
    }

    /// Returns the array as sorted so far
    pub fn array(&self) -> &[u32] {
        &self.array
    }
}

impl Iterator for SelectionSort {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let len = self.array.len();
        loop {
            match self.phase {
                Phase::StartPass => {
                    if self.i + 1 >= len {
                        self.phase = Phase::Done;
                        return Some(Step::new(SortStep::Complete, "Selection sort complete"));
                    }
                    let i = self.i;
                    self.min = i;
                    self.j = i + 1;
                    self.phase = Phase::Scan;
                    return Some(Step::new(
                        SortStep::NewMinimum { index: i },
                        format!("Assume {} at position {i} is the smallest", self.array[i]),
                    ));
                }
                Phase::Scan => {
                    let j = self.j;
                    if j >= len {
                        self.phase = Phase::Swap;
                        continue;
                    }
                    self.j += 1;
                    let (value, min) = (self.array[j], self.array[self.min]);
                    let explanation = if value < min {
                        self.phase = Phase::NewMinimum(j);
                        format!("{value} is smaller than {min}")
                    } else {
                        format!("{value} is not smaller than {min}")
                    };
                    return Some(Step::new(SortStep::Compare { i: j, j: self.min }, explanation));
                }
                Phase::NewMinimum(index) => {
                    self.min = index;
                    self.phase = Phase::Scan;
                    return Some(Step::new(
                        SortStep::NewMinimum { index },
                        format!("New minimum {} at position {index}", self.array[index]),
                    ));
                }
                Phase::Swap => {
                    self.phase = Phase::Fix;
                    let (i, min) = (self.i, self.min);
                    if min != i {
                        self.array.swap(i, min);
                        return Some(Step::new(
                            SortStep::Swap { i, j: min },
                            format!("Swap the minimum into position {i}"),
                        ));
                    }
                }
                Phase::Fix => {
                    let index = self.i;
                    self.i += 1;
                    self.phase = Phase::StartPass;
                    return Some(Step::new(
                        SortStep::Fixed { index },
                        format!("Position {index} now holds {}", self.array[index]),
                    ));
                }
                Phase::Done => return None,
            }
        }
    }
}
