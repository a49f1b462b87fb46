//! Least-significant-digit radix sort in base 10.

use crate::step::{SortStep, Step, RADIX};

/// Returns every radix sort step for `values`
///
/// One pass per decimal digit of the largest value. Each value is dropped
/// into its bucket with a `bucket` step, then the buckets are read back in
/// order with a single `collect` step.
pub fn radix_sort_steps(values: &[u32]) -> Vec<Step> {
    let mut array = values.to_vec();
    let mut steps = Vec::new();
    let max = array.iter().copied().max().unwrap_or(0);
    let mut place: u32 = 1;

    while max / place > 0 {
        let mut buckets: Vec<Vec<u32>> = vec![Vec::new(); RADIX];
        for (index, &value) in array.iter().enumerate() {
            let digit = ((value / place) % RADIX as u32) as usize;
            buckets[digit].push(value);
            steps.push(Step::new(
                SortStep::Bucket {
                    index,
                    value,
                    digit,
                    place,
                },
                format!("{value} has digit {digit} in the {place}s place"),
            ));
        }

        array = buckets.concat();
        steps.push(Step::new(
            SortStep::Collect {
                place,
                array: array.clone(),
            },
            format!("Collect the buckets in order after sorting by the {place}s place"),
        ));

        match place.checked_mul(RADIX as u32) {
            Some(next) => place = next,
            None => break,
        }
    }

    steps.push(Step::new(SortStep::Complete, "Radix sort complete"));
    steps
}
