#![forbid(unsafe_code)]

//! Explicit progress state shared by all steppers.
//!
//! [`SortState`] owns the sequence together with every cursor and auxiliary
//! structure an algorithm needs between ticks. Steppers mutate it through
//! `&mut`; everything else gets read-only accessors.
//!
//! # Invariants
//!
//! 1. The sequence length is fixed for the lifetime of a state. Resizing
//!    means building a new state.
//! 2. Every cursor is either at its initial value or was produced by a
//!    stepper against the current length.
//! 3. The highlight set only ever names indices inside the sequence.

use smallvec::SmallVec;

/// Algorithm-specific scalar positions.
///
/// Meaning per algorithm: bubble (`i` passes done, `j` inner index),
/// selection (`i` slot being filled, `j` scan index, `min` running minimum),
/// insertion (`i` element being inserted, `j` its position), quicksort
/// (`i` queue position), merge sort (`i` snapshot, `j` pacing index),
/// heapsort (`i` extractions done).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursors {
    pub i: usize,
    pub j: usize,
    pub min: usize,
}

impl Cursors {
    /// Values every cursor holds right after a reset.
    pub const INITIAL: Cursors = Cursors { i: 0, j: 0, min: 0 };
}

/// Indices touched by the most recent step (zero, one, or two).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlight(SmallVec<[usize; 2]>);

impl Highlight {
    #[must_use]
    pub fn none() -> Self {
        Self(SmallVec::new())
    }

    #[must_use]
    pub fn one(index: usize) -> Self {
        let mut set = SmallVec::new();
        set.push(index);
        Self(set)
    }

    /// Two indices; collapses to one when they coincide.
    #[must_use]
    pub fn pair(a: usize, b: usize) -> Self {
        if a == b {
            return Self::one(a);
        }
        let mut set = SmallVec::new();
        set.push(a.min(b));
        set.push(a.max(b));
        Self(set)
    }

    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// A quicksort partition range awaiting (or done with) processing.
///
/// Settled ranges stay in the queue so positions scanned by the cursor
/// remain stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionRange {
    pub low: usize,
    pub high: usize,
    pub settled: bool,
}

impl PartitionRange {
    #[must_use]
    pub const fn new(low: usize, high: usize) -> Self {
        Self {
            low,
            high,
            settled: false,
        }
    }

    /// Whether the range still needs a partition pass.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        !self.settled && self.low < self.high
    }
}

/// Sequence plus all per-algorithm progress.
#[derive(Debug, Clone, PartialEq)]
pub struct SortState {
    pub(crate) values: Vec<f64>,
    pub(crate) cursors: Cursors,
    pub(crate) queue: Vec<PartitionRange>,
    pub(crate) snapshots: Vec<Vec<f64>>,
    pub(crate) heap_size: usize,
    pub(crate) highlight: Highlight,
    pub(crate) complete: bool,
}

impl SortState {
    /// Fresh state over `values` with every cursor at its initial value.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        let heap_size = values.len();
        Self {
            values,
            cursors: Cursors::INITIAL,
            queue: Vec::new(),
            snapshots: Vec::new(),
            heap_size,
            highlight: Highlight::none(),
            complete: false,
        }
    }

    /// Return all progress to initial values, keeping the current sequence.
    pub fn rewind(&mut self) {
        self.cursors = Cursors::INITIAL;
        self.queue.clear();
        self.snapshots.clear();
        self.heap_size = self.values.len();
        self.highlight.clear();
        self.complete = false;
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn cursors(&self) -> Cursors {
        self.cursors
    }

    /// Quicksort work queue, settled entries included.
    #[must_use]
    pub fn queue(&self) -> &[PartitionRange] {
        &self.queue
    }

    /// Merge schedule or heapsort history, depending on the active algorithm.
    #[must_use]
    pub fn snapshots(&self) -> &[Vec<f64>] {
        &self.snapshots
    }

    #[must_use]
    pub fn heap_size(&self) -> usize {
        self.heap_size
    }

    #[must_use]
    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Whether the sequence is in non-decreasing order.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }
}
