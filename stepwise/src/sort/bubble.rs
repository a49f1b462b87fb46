//! Bubble sort, one comparison or swap per step.

use crate::step::{SortStep, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    StartPass,
    Compare,
    Swap,
    EndPass,
    Done,
}

/// Cursor-driven bubble sort
///
/// Always runs exactly `n - 1` passes, even when a pass makes no swap. The
/// last position of each pass is reported `fixed` when the pass ends.
#[derive(Debug, Clone)]
pub struct BubbleSort {
    array: Vec<u32>,
    pass: usize,
    j: usize,
    phase: Phase,
}

impl BubbleSort {
    /// Creates the sort over a copy of `values`
    pub fn new(values: &[u32]) -> Self {
        Self {
            array: values.to_vec(),
            pass: 0,
            j: 0,
            phase: Phase::StartPass,
        }
    }

    /// Returns the array as sorted so far
    pub fn array(&self) -> &[u32] {
        &self.array
    }
}

impl Iterator for BubbleSort {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let len = self.array.len();
        let total = len.saturating_sub(1);
        loop {
            match self.phase {
                Phase::StartPass => {
                    if self.pass >= total {
                        self.phase = Phase::Done;
                        return Some(Step::new(SortStep::Complete, "Bubble sort complete"));
                    }
                    self.phase = Phase::Compare;
                    self.j = 0;
                    return Some(Step::new(
                        SortStep::Pass {
                            pass: self.pass + 1,
                            total,
                        },
                        format!("Pass {} of {total}", self.pass + 1),
                    ));
                }
                Phase::Compare => {
                    let j = self.j;
                    if j + 1 >= len - self.pass {
                        self.phase = Phase::EndPass;
                        continue;
                    }
                    let (left, right) = (self.array[j], self.array[j + 1]);
                    let explanation = if left > right {
                        self.phase = Phase::Swap;
                        format!("Compare {left} and {right}: out of order")
                    } else {
                        self.j += 1;
                        format!("Compare {left} and {right}: already in order")
                    };
                    return Some(Step::new(SortStep::Compare { i: j, j: j + 1 }, explanation));
                }
                Phase::Swap => {
                    let j = self.j;
                    self.array.swap(j, j + 1);
                    self.j += 1;
                    self.phase = Phase::Compare;
                    return Some(Step::new(
                        SortStep::Swap { i: j, j: j + 1 },
                        format!("Swap positions {j} and {}", j + 1),
                    ));
                }
                Phase::EndPass => {
                    self.pass += 1;
                    self.phase = Phase::StartPass;
                    let index = len - self.pass;
                    return Some(Step::new(
                        SortStep::Fixed { index },
                        format!("{} has bubbled up to position {index}", self.array[index]),
                    ));
                }
                Phase::Done => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bubble_runs_every_pass() {
        let mut sort = BubbleSort::new(&[1, 2, 3, 4]);
        let steps: Vec<Step> = sort.by_ref().collect();
        assert_eq!(steps.iter().filter(|s| s.name() == "pass").count(), 3);
        assert_eq!(steps.iter().filter(|s| s.name() == "swap").count(), 0);
        assert_eq!(steps.iter().filter(|s| s.name() == "compare").count(), 6);
        assert_eq!(sort.array(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_bubble_sorts() {
        let mut sort = BubbleSort::new(&[5, 3, 8, 4, 2]);
        let steps: Vec<Step> = sort.by_ref().collect();
        assert_eq!(sort.array(), &[2, 3, 4, 5, 8]);
        assert_eq!(steps.last().map(Step::name), Some("complete"));
    }

    #[test]
    fn test_single_value() {
        let names: Vec<&str> = BubbleSort::new(&[7]).map(|s| s.name()).collect();
        assert_eq!(names, vec!["complete"]);
    }
}
