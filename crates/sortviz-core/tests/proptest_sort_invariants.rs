//! Property-based invariant tests for the stepwise sort engine.
//!
//! These hold for every algorithm, size and seed:
//!
//! 1. A completed run leaves the sequence non-decreasing.
//! 2. A completed run is a permutation of the starting sequence.
//! 3. Step counts stay within each algorithm's bound.
//! 4. Stepping after completion changes nothing.
//! 5. Reset produces a sequence of the right length, inside the range, with
//!    every cursor at its initial value.
//! 6. Highlighted indices are always inside the sequence.
//! 7. Tone timestamps never go backwards and respect the minimum spacing.

use std::time::Duration;

use proptest::prelude::*;
use sortviz_core::audio::DEFAULT_TONE_SPACING;
use sortviz_core::steppers::merge::merge_schedule;
use sortviz_core::{Algorithm, Cursors, SortEngine, Theme, ValueRange};

const FRAME: Duration = Duration::from_millis(16);

// ── Helpers ─────────────────────────────────────────────────────────────

fn algorithm_strategy() -> impl Strategy<Value = Algorithm> {
    prop::sample::select(Algorithm::ALL.to_vec())
}

fn theme_strategy() -> impl Strategy<Value = Theme> {
    prop::sample::select(Theme::ALL.to_vec())
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

fn step_bound(algorithm: Algorithm, values: &[f64]) -> usize {
    let n = values.len();
    match algorithm {
        Algorithm::Bubble | Algorithm::Selection => n * (n - 1) / 2,
        Algorithm::Insertion => n * (n - 1) / 2 + n,
        Algorithm::Quick | Algorithm::Heap => n,
        Algorithm::Merge => merge_schedule(values).len() * n,
    }
}

/// Run to completion, returning the number of advancing steps.
fn run(engine: &mut SortEngine, algorithm: Algorithm) -> usize {
    let mut steps = 0;
    let mut now = Duration::ZERO;
    loop {
        let report = engine.step(algorithm, now);
        if report.advanced {
            steps += 1;
        }
        if report.completed {
            return steps;
        }
        now += FRAME;
        assert!(steps < 100_000, "{algorithm} did not terminate");
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1–3. Sorted permutation within the step bound
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn completed_run_is_sorted_permutation(
        algorithm in algorithm_strategy(),
        size in 10usize..=100,
        seed in any::<u64>(),
    ) {
        let mut engine = SortEngine::with_seed(seed);
        engine.reset(size, ValueRange::new(50.0, 350.0));
        let start = engine.values().to_vec();
        let bound = step_bound(algorithm, &start);

        let steps = run(&mut engine, algorithm);

        prop_assert!(
            engine.values().windows(2).all(|w| w[0] <= w[1]),
            "{} left the sequence unsorted", algorithm
        );
        prop_assert_eq!(sorted_copy(engine.values()), sorted_copy(&start));
        prop_assert!(steps <= bound, "{} took {} steps, bound {}", algorithm, steps, bound);
    }
}

proptest! {
    #[test]
    fn duplicates_sort_without_losing_values(
        algorithm in algorithm_strategy(),
        raw in prop::collection::vec(0u8..4, 10..40),
    ) {
        let values: Vec<f64> = raw.into_iter().map(f64::from).collect();
        let mut engine = SortEngine::from_values(values.clone());
        run(&mut engine, algorithm);
        let expected = sorted_copy(&values);
        prop_assert_eq!(engine.values(), expected.as_slice());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Idempotence after completion
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn stepping_after_completion_is_a_no_op(
        algorithm in algorithm_strategy(),
        size in 10usize..=40,
        seed in any::<u64>(),
        extra in 1usize..20,
    ) {
        let mut engine = SortEngine::with_seed(seed);
        engine.reset(size, ValueRange::new(0.0, 100.0));
        run(&mut engine, algorithm);

        let values = engine.values().to_vec();
        let cursors = engine.cursors();
        let queue = engine.state().queue().to_vec();
        let heap_size = engine.state().heap_size();

        for _ in 0..extra {
            let report = engine.step(algorithm, Duration::ZERO);
            prop_assert!(report.completed);
            prop_assert!(!report.advanced);
            prop_assert!(report.tone.is_none());
        }
        prop_assert_eq!(engine.values(), values.as_slice());
        prop_assert_eq!(engine.cursors(), cursors);
        prop_assert_eq!(engine.state().queue(), queue.as_slice());
        prop_assert_eq!(engine.state().heap_size(), heap_size);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Reset atomicity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reset_is_atomic_mid_run(
        algorithm in algorithm_strategy(),
        theme in theme_strategy(),
        first in 10usize..=100,
        second in 10usize..=100,
        steps_before in 0usize..200,
        seed in any::<u64>(),
    ) {
        let range = theme.value_range(400.0);
        let mut engine = SortEngine::with_seed(seed);
        engine.reset(first, range);
        for _ in 0..steps_before {
            engine.step(algorithm, Duration::ZERO);
        }

        engine.reset(second, range);

        prop_assert_eq!(engine.values().len(), second);
        prop_assert!(engine.values().iter().all(|&v| range.contains(v)));
        prop_assert_eq!(engine.cursors(), Cursors::INITIAL);
        prop_assert!(engine.highlight().is_empty());
        prop_assert!(engine.state().queue().is_empty());
        prop_assert!(engine.state().snapshots().is_empty());
        prop_assert_eq!(engine.state().heap_size(), second);
        prop_assert!(!engine.is_complete());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Highlights stay in bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn highlight_indices_are_in_bounds(
        algorithm in algorithm_strategy(),
        size in 10usize..=60,
        seed in any::<u64>(),
    ) {
        let mut engine = SortEngine::with_seed(seed);
        engine.reset(size, ValueRange::new(50.0, 350.0));
        loop {
            let report = engine.step(algorithm, Duration::ZERO);
            prop_assert!(report.highlight.indices().len() <= 2);
            prop_assert!(report.highlight.indices().iter().all(|&i| i < size));
            if let Some(idx) = report.touched {
                prop_assert!(idx < size);
            }
            if report.completed {
                break;
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Tone spacing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn tone_timestamps_are_spaced(
        algorithm in algorithm_strategy(),
        seed in any::<u64>(),
        frame_ms in 0u64..120,
    ) {
        let mut engine = SortEngine::with_seed(seed);
        engine.reset(30, ValueRange::new(50.0, 350.0));
        let dt = Duration::from_millis(frame_ms);
        let mut now = Duration::ZERO;
        let mut last: Option<Duration> = None;
        for _ in 0..300 {
            let report = engine.step(algorithm, now);
            if let Some(tone) = report.tone {
                prop_assert!(tone.at >= now);
                if let Some(prev) = last {
                    prop_assert!(tone.at >= prev + DEFAULT_TONE_SPACING);
                }
                last = Some(tone.at);
            }
            now += dt;
        }
    }
}
