#![forbid(unsafe_code)]

//! Insertion sort: backward shift, one swap per step.
//!
//! A single logical insertion spans several steps. The step whose shift
//! condition fails moves on to the next element.

use crate::state::{Highlight, SortState};

pub(crate) fn step(state: &mut SortState) -> Option<usize> {
    let n = state.values.len();
    let i = state.cursors.i;
    if i >= n {
        state.complete = true;
        return None;
    }

    let j = state.cursors.j.min(i);
    let mut voiced = None;
    if j > 0 && state.values[j - 1] > state.values[j] {
        state.values.swap(j - 1, j);
        state.highlight = Highlight::pair(j - 1, j);
        state.cursors.j = j - 1;
        voiced = Some(j);
    } else {
        state.highlight = if j > 0 {
            Highlight::pair(j - 1, j)
        } else {
            Highlight::one(j)
        };
        state.cursors.i = i + 1;
        state.cursors.j = i + 1;
    }

    if state.cursors.i >= n {
        state.complete = true;
    }
    voiced
}
