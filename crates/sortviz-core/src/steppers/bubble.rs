#![forbid(unsafe_code)]

//! Bubble sort: one adjacent comparison per step.
//!
//! The pass boundary is folded into the comparison that reaches it, so a
//! run takes exactly `n(n-1)/2` steps.

use crate::state::{Highlight, SortState};

pub(crate) fn step(state: &mut SortState) -> Option<usize> {
    let n = state.values.len();
    let i = state.cursors.i;
    if i + 1 >= n {
        state.complete = true;
        return None;
    }

    let pass_end = n - 1 - i;
    let j = state.cursors.j.min(pass_end - 1);

    let mut voiced = None;
    if state.values[j] > state.values[j + 1] {
        state.values.swap(j, j + 1);
        voiced = Some(j);
    }
    state.highlight = Highlight::pair(j, j + 1);

    if j + 1 >= pass_end {
        state.cursors.j = 0;
        state.cursors.i = i + 1;
    } else {
        state.cursors.j = j + 1;
    }

    if state.cursors.i + 1 >= n {
        state.complete = true;
    }
    voiced
}
