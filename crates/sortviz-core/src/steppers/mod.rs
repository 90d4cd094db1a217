#![forbid(unsafe_code)]

//! One resumable step per algorithm.
//!
//! Each submodule exposes a `step(&mut SortState) -> Option<usize>` function.
//! A step does one bounded unit of work, writes the new highlight set into
//! the state, sets the completion flag once the terminal condition holds,
//! and returns the index whose (post-step) value should be voiced, if any.
//!
//! [`advance`] is the single dispatch point. It owns the rules every
//! algorithm shares: completed states are left untouched, and sequences
//! shorter than two elements are complete immediately.
//!
//! Equal values never swap in any algorithm.

pub mod bubble;
pub mod heap;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod selection;

use crate::algorithm::Algorithm;
use crate::state::SortState;

/// Advance `algorithm` by one step against `state`.
///
/// Returns the index to voice. Calling this on a completed state clears the
/// highlight and changes nothing else.
pub fn advance(algorithm: Algorithm, state: &mut SortState) -> Option<usize> {
    state.highlight.clear();
    if state.complete {
        return None;
    }
    if state.values.len() < 2 {
        state.complete = true;
        return None;
    }
    match algorithm {
        Algorithm::Bubble => bubble::step(state),
        Algorithm::Quick => quick::step(state),
        Algorithm::Merge => merge::step(state),
        Algorithm::Heap => heap::step(state),
        Algorithm::Selection => selection::step(state),
        Algorithm::Insertion => insertion::step(state),
    }
}
