#![forbid(unsafe_code)]

//! Merge sort replayed from an eagerly computed schedule.
//!
//! The first step after a reset runs the whole bottom-up merge sort on a
//! working copy, recording a full snapshot after every pairwise merge (plus
//! the unsorted starting point). Playback then shows one snapshot per `n`
//! steps, cycling `cursors.j` across the sequence to pace tones. The last
//! snapshot is the sorted sequence.
//!
//! Visual granularity is one merge per snapshot, not one comparison.

use crate::state::{Highlight, SortState};

pub(crate) fn step(state: &mut SortState) -> Option<usize> {
    let n = state.values.len();
    if state.snapshots.is_empty() {
        state.snapshots = merge_schedule(&state.values);
    }

    let i = state.cursors.i;
    let Some(snapshot) = state.snapshots.get(i) else {
        state.complete = true;
        return None;
    };
    state.values.copy_from_slice(snapshot);

    let j = state.cursors.j % n;
    state.highlight = Highlight::one(j);

    let next_j = (j + 1) % n;
    state.cursors.j = next_j;
    if next_j == 0 {
        state.cursors.i = i + 1;
    }

    if state.cursors.i >= state.snapshots.len() {
        state.complete = true;
    }
    Some(j)
}

/// Bottom-up merge schedule for `values`.
///
/// Element 0 is `values` itself; every following element is the full
/// working array right after one merge of `[start, mid)` with `[mid, end)`
/// at width 1, 2, 4, ... Ties take from the left run.
#[must_use]
pub fn merge_schedule(values: &[f64]) -> Vec<Vec<f64>> {
    let n = values.len();
    let mut work = values.to_vec();
    let mut snapshots = vec![work.clone()];
    let mut scratch = Vec::with_capacity(n);

    let mut width = 1;
    while width < n {
        for start in (0..n).step_by(2 * width) {
            let mid = (start + width).min(n);
            let end = (start + 2 * width).min(n);
            merge_runs(&mut work, start, mid, end, &mut scratch);
            snapshots.push(work.clone());
        }
        width *= 2;
    }
    snapshots
}

fn merge_runs(work: &mut [f64], start: usize, mid: usize, end: usize, scratch: &mut Vec<f64>) {
    scratch.clear();
    let (mut l, mut r) = (start, mid);
    while l < mid && r < end {
        if work[l] <= work[r] {
            scratch.push(work[l]);
            l += 1;
        } else {
            scratch.push(work[r]);
            r += 1;
        }
    }
    scratch.extend_from_slice(&work[l..mid]);
    scratch.extend_from_slice(&work[r..end]);
    work[start..end].copy_from_slice(scratch);
}
