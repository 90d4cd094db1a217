#![forbid(unsafe_code)]

//! Selection sort: one scan comparison per step.
//!
//! The running minimum lives in `cursors.min` so it survives between ticks.
//! The comparison that exhausts the scan also performs the swap into slot
//! `i`, giving exactly `n(n-1)/2` steps.

use crate::state::{Cursors, Highlight, SortState};

pub(crate) fn step(state: &mut SortState) -> Option<usize> {
    let n = state.values.len();
    let Cursors { i, mut j, mut min } = state.cursors;
    if i + 1 >= n {
        state.complete = true;
        return None;
    }

    // Fresh scan for slot `i`.
    if j <= i || min < i {
        j = i + 1;
        min = i;
    }

    if state.values[j] < state.values[min] {
        min = j;
    }
    state.highlight = Highlight::pair(min, j);
    j += 1;

    let mut voiced = None;
    let mut i = i;
    if j >= n {
        if min != i {
            state.values.swap(i, min);
            voiced = Some(i);
        }
        state.highlight = Highlight::pair(i, min);
        i += 1;
        j = i + 1;
        min = i;
    }

    state.cursors = Cursors { i, j, min };
    if i + 1 >= n {
        state.complete = true;
    }
    voiced
}
