//! Insertion sort, one comparison or write per step.

use crate::step::{SortStep, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Lift,
    Compare,
    Shift,
    Place,
    Done,
}

/// Cursor-driven insertion sort
///
/// For each `i` from 1, lifts `array[i]` as the key, shifts larger values
/// right one slot at a time, then drops the key into the hole.
#[derive(Debug, Clone)]
pub struct InsertionSort {
    array: Vec<u32>,
    i: usize,
    j: usize,
    key: u32,
    phase: Phase,
}

impl InsertionSort {
    /// Creates the sort over a copy of `values`
    pub fn new(values: &[u32]) -> Self {
        Self {
            array: values.to_vec(),
            i: 1,
            j: 0,
            key: 0,
            phase: Phase::Lift,
        }
    }

    /// Returns the array as sorted so far
    pub fn array(&self) -> &[u32] {
        &self.array
    }
}

impl Iterator for InsertionSort {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            match self.phase {
                Phase::Lift => {
                    if self.i >= self.array.len() {
                        self.phase = Phase::Done;
                        return Some(Step::new(SortStep::Complete, "Insertion sort complete"));
                    }
                    let index = self.i;
                    self.key = self.array[index];
                    self.j = index;
                    self.phase = Phase::Compare;
                    return Some(Step::new(
                        SortStep::Key {
                            index,
                            value: self.key,
                        },
                        format!("Take {} out of position {index}", self.key),
                    ));
                }
                Phase::Compare => {
                    if self.j == 0 {
                        self.phase = Phase::Place;
                        continue;
                    }
                    let j = self.j;
                    let left = self.array[j - 1];
                    let explanation = if left > self.key {
                        self.phase = Phase::Shift;
                        format!("{left} is larger than {}: shift it right", self.key)
                    } else {
                        self.phase = Phase::Place;
                        format!("{left} is not larger than {}: stop here", self.key)
                    };
                    return Some(Step::new(SortStep::Compare { i: j - 1, j }, explanation));
                }
                Phase::Shift => {
                    let j = self.j;
                    let value = self.array[j - 1];
                    self.array[j] = value;
                    self.j -= 1;
                    self.phase = Phase::Compare;
                    return Some(Step::new(
                        SortStep::Write { index: j, value },
                        format!("Move {value} to position {j}"),
                    ));
                }
                Phase::Place => {
                    let index = self.j;
                    self.array[index] = self.key;
                    self.i += 1;
                    self.phase = Phase::Lift;
                    return Some(Step::new(
                        SortStep::Place {
                            index,
                            value: self.key,
                        },
                        format!("Insert {} at position {index}", self.key),
                    ));
                }
                Phase::Done => return None,
            }
        }
    }
}
