#![forbid(unsafe_code)]

//! Heapsort with a shrinking heap boundary.
//!
//! The first step builds a max-heap over the whole sequence. Every later
//! step moves the root behind the boundary, shrinks the boundary by one and
//! sifts the new root down. A snapshot of the sequence is recorded after the
//! build and after each extraction.

use crate::state::{Highlight, SortState};

pub(crate) fn step(state: &mut SortState) -> Option<usize> {
    let n = state.values.len();

    if state.snapshots.is_empty() {
        state.heap_size = n;
        for root in (0..n / 2).rev() {
            sift_down(&mut state.values, root, n);
        }
        state.snapshots.push(state.values.clone());
        state.highlight = Highlight::one(0);
        return Some(0);
    }

    let size = state.heap_size.min(n);
    if size <= 1 {
        state.complete = true;
        return None;
    }

    let last = size - 1;
    state.values.swap(0, last);
    state.heap_size = last;
    sift_down(&mut state.values, 0, last);
    state.snapshots.push(state.values.clone());
    state.cursors.i += 1;
    state.highlight = Highlight::pair(0, last);

    if state.heap_size <= 1 {
        state.complete = true;
    }
    Some(0)
}

/// Restore the max-heap property below `root` within `values[..size]`.
///
/// Strict comparisons: equal children never displace their parent.
pub(crate) fn sift_down(values: &mut [f64], mut root: usize, size: usize) {
    loop {
        let left = 2 * root + 1;
        let right = left + 1;
        let mut largest = root;
        if left < size && values[left] > values[largest] {
            largest = left;
        }
        if right < size && values[right] > values[largest] {
            largest = right;
        }
        if largest == root {
            return;
        }
        values.swap(root, largest);
        root = largest;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::Algorithm;
    use crate::steppers::test_support::run_to_completion;
    use pretty_assertions::assert_eq;

    fn is_max_heap(values: &[f64], size: usize) -> bool {
        (1..size).all(|k| values[(k - 1) / 2] >= values[k])
    }

    #[test]
    fn three_elements_walkthrough() {
        let mut state = SortState::new(vec![1.0, 2.0, 3.0]);

        step(&mut state);
        assert_eq!(state.values(), &[3.0, 2.0, 1.0]);
        assert_eq!(state.heap_size(), 3);

        step(&mut state);
        assert_eq!(state.values(), &[2.0, 1.0, 3.0]);
        assert_eq!(state.heap_size(), 2);
        assert!(!state.is_complete());

        step(&mut state);
        assert_eq!(state.values(), &[1.0, 2.0, 3.0]);
        assert_eq!(state.heap_size(), 1);
        assert!(state.is_complete());
        assert_eq!(state.snapshots().len(), 3);
    }

    #[test]
    fn build_produces_a_max_heap() {
        let mut state = SortState::new(vec![4.0, 10.0, 3.0, 5.0, 1.0, 8.0, 8.0, 2.0]);
        step(&mut state);
        assert!(is_max_heap(state.values(), 8));
    }

    #[test]
    fn heap_property_holds_inside_the_boundary() {
        let mut state = SortState::new(vec![6.0, 2.0, 9.0, 1.0, 7.0, 3.0, 8.0, 5.0, 4.0]);
        while !state.is_complete() {
            step(&mut state);
            let size = state.heap_size();
            assert!(is_max_heap(state.values(), size));
            // Everything behind the boundary is final.
            let tail = &state.values()[size..];
            assert!(tail.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn takes_n_steps() {
        let values: Vec<f64> = (0..16).map(|v| ((v * 7) % 16) as f64).collect();
        let mut state = SortState::new(values);
        assert_eq!(run_to_completion(Algorithm::Heap, &mut state), 16);
        assert!(state.is_sorted());
    }
}
