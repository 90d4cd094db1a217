#![forbid(unsafe_code)]

//! The stepwise sort engine.
//!
//! [`SortEngine`] owns the sequence, the per-algorithm progress state, the
//! sampling RNG and the tone scheduler. Hosts call [`SortEngine::reset`] to
//! reseed and [`SortEngine::step`] once per tick; everything else is a
//! read-only view.
//!
//! # Invariants
//!
//! 1. `reset` replaces the sequence and every piece of progress together.
//! 2. Cursors are only ever interpreted by the algorithm that produced
//!    them: stepping a different algorithm rewinds progress first (values
//!    are kept).
//! 3. Once complete, stepping the same algorithm changes nothing and keeps
//!    reporting `completed`.
//! 4. A step yields at most one tone request.

use std::time::Duration;

use crate::algorithm::Algorithm;
use crate::audio::ToneRequest;
use crate::audio::ToneScheduler;
use crate::rng::Xorshift64;
use crate::state::{Cursors, Highlight, SortState};
use crate::steppers;
use crate::theme::ValueRange;

/// What a single [`SortEngine::step`] call did.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Indices touched by this step.
    pub highlight: Highlight,
    /// Whether the algorithm has reached its terminal state.
    pub completed: bool,
    /// Whether this call performed work (false for calls after completion).
    pub advanced: bool,
    /// Index whose value this step voiced, if any.
    pub touched: Option<usize>,
    /// Tone to schedule for the touched value.
    pub tone: Option<ToneRequest>,
}

/// Stepwise sort engine.
#[derive(Debug, Clone)]
pub struct SortEngine {
    state: SortState,
    rng: Xorshift64,
    tones: ToneScheduler,
    active: Option<Algorithm>,
    steps: u64,
}

impl SortEngine {
    /// Engine with an empty sequence and a deterministic sampler.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: SortState::new(Vec::new()),
            rng: Xorshift64::new(seed),
            tones: ToneScheduler::default(),
            active: None,
            steps: 0,
        }
    }

    /// Engine over an explicit sequence, e.g. for replaying a known input.
    #[must_use]
    pub fn from_values(values: Vec<f64>) -> Self {
        let mut engine = Self::with_seed(0);
        engine.load(values);
        engine
    }

    /// Replace the tone scheduler.
    #[must_use]
    pub fn with_tones(mut self, tones: ToneScheduler) -> Self {
        self.tones = tones;
        self
    }

    /// Reseed: `size` fresh values sampled from `range`, all progress cleared.
    ///
    /// Safe at any time, including mid-sort. Size limits are the caller's
    /// concern.
    pub fn reset(&mut self, size: usize, range: ValueRange) {
        let values = (0..size).map(|_| self.rng.uniform(range)).collect();
        self.load(values);
        crate::debug!(size, low = range.low, high = range.high, "sequence reset");
    }

    /// Replace the sequence with `values`, clearing all progress.
    pub fn load(&mut self, values: Vec<f64>) {
        self.state = SortState::new(values);
        self.tones.clear();
        self.active = None;
        self.steps = 0;
    }

    /// Advance `algorithm` by one step.
    ///
    /// `now` is the host's monotonic time and only feeds tone scheduling.
    pub fn step(&mut self, algorithm: Algorithm, now: Duration) -> StepReport {
        if self.active.is_some_and(|active| active != algorithm) {
            crate::debug!(
                from = ?self.active,
                to = %algorithm,
                "algorithm switched; rewinding progress"
            );
            self.state.rewind();
            self.steps = 0;
        }
        self.active = Some(algorithm);

        if self.state.is_complete() {
            self.state.highlight.clear();
            return StepReport {
                highlight: Highlight::none(),
                completed: true,
                advanced: false,
                touched: None,
                tone: None,
            };
        }

        let touched = steppers::advance(algorithm, &mut self.state);
        self.steps += 1;

        let tone = touched
            .and_then(|idx| self.state.values.get(idx).copied())
            .map(|value| self.tones.schedule(value, now));

        let completed = self.state.is_complete();
        crate::trace!(
            algorithm = %algorithm,
            step = self.steps,
            highlight = ?self.state.highlight.indices(),
            completed,
            "step"
        );
        if completed {
            crate::debug!(algorithm = %algorithm, steps = self.steps, "sort complete");
        }

        StepReport {
            highlight: self.state.highlight.clone(),
            completed,
            advanced: true,
            touched,
            tone,
        }
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        self.state.values()
    }

    #[must_use]
    pub fn highlight(&self) -> &Highlight {
        self.state.highlight()
    }

    #[must_use]
    pub fn cursors(&self) -> Cursors {
        self.state.cursors()
    }

    #[must_use]
    pub fn state(&self) -> &SortState {
        &self.state
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    /// Algorithm whose progress the state currently holds.
    #[must_use]
    pub fn active_algorithm(&self) -> Option<Algorithm> {
        self.active
    }

    /// Steps performed since the last reset or rewind.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    #[must_use]
    pub fn tones(&self) -> &ToneScheduler {
        &self.tones
    }

    pub fn tones_mut(&mut self) -> &mut ToneScheduler {
        &mut self.tones
    }
}
