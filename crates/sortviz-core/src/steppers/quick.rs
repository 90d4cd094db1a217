#![forbid(unsafe_code)]

//! Quicksort over an append-only work queue.
//!
//! Each step takes the queue entry at cursor `i` and runs a complete Lomuto
//! partition over it. This is coarser than the other steppers: the whole
//! range moves within a single tick. Processed entries are marked settled in
//! place, never removed, and only non-trivial sub-ranges are appended, so the
//! queue never holds more than `n` entries.

use crate::state::{Highlight, PartitionRange, SortState};

pub(crate) fn step(state: &mut SortState) -> Option<usize> {
    let n = state.values.len();
    if state.queue.is_empty() {
        state.queue.push(PartitionRange::new(0, n - 1));
    }

    let i = state.cursors.i;
    let Some(range) = state.queue.get(i).copied() else {
        state.complete = true;
        return None;
    };

    let mut voiced = None;
    if range.is_pending() {
        let PartitionRange { low, high, .. } = range;
        let p = lomuto_partition(&mut state.values, low, high);
        if p > low + 1 {
            state.queue.push(PartitionRange::new(low, p - 1));
        }
        if p + 1 < high {
            state.queue.push(PartitionRange::new(p + 1, high));
        }
        state.highlight = Highlight::pair(p, high);
        voiced = Some(p);
    }
    state.queue[i].settled = true;
    state.cursors.i = i + 1;

    if state.cursors.i >= state.queue.len() {
        state.complete = true;
    }
    voiced
}

/// Partition `values[low..=high]` around `values[high]`, returning the
/// pivot's final index. Elements `<=` the pivot end up on its left.
pub(crate) fn lomuto_partition(values: &mut [f64], low: usize, high: usize) -> usize {
    let pivot = values[high];
    let mut store = low;
    for k in low..high {
        if values[k] <= pivot {
            values.swap(store, k);
            store += 1;
        }
    }
    values.swap(store, high);
    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::Algorithm;
    use crate::steppers::test_support::run_to_completion;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_step_partitions_the_full_range() {
        let mut state = SortState::new(vec![5.0, 3.0, 4.0, 1.0, 2.0]);

        assert_eq!(step(&mut state), Some(1));
        assert_eq!(state.values(), &[1.0, 2.0, 4.0, 5.0, 3.0]);
        assert_eq!(
            state.queue(),
            &[
                PartitionRange {
                    low: 0,
                    high: 4,
                    settled: true
                },
                PartitionRange::new(2, 4),
            ]
        );
        assert_eq!(state.cursors().i, 1);
        assert!(!state.is_complete());
    }

    #[test]
    fn partition_places_pivot_after_smaller_or_equal() {
        let mut values = vec![3.0, 7.0, 3.0, 9.0, 3.0];
        let p = lomuto_partition(&mut values, 0, 4);
        assert_eq!(p, 2);
        assert!(values[..p].iter().all(|&v| v <= 3.0));
        assert!(values[p + 1..].iter().all(|&v| v > 3.0));
    }

    #[test]
    fn queue_is_append_only() {
        let mut state = SortState::new(vec![8.0, 6.0, 7.0, 5.0, 3.0, 0.0, 9.0]);
        let mut seen = 0;
        while !state.is_complete() {
            step(&mut state);
            assert!(state.queue().len() >= seen);
            seen = state.queue().len();
            let cursor = state.cursors().i;
            assert!(state.queue()[..cursor].iter().all(|r| r.settled));
        }
        assert!(state.is_sorted());
        assert!(state.queue().len() <= state.len());
    }

    #[test]
    fn sorted_input_still_terminates() {
        let values: Vec<f64> = (0..20).map(f64::from).collect();
        let mut state = SortState::new(values);
        let steps = run_to_completion(Algorithm::Quick, &mut state);
        assert!(steps <= 20);
        assert!(state.is_sorted());
    }
}
