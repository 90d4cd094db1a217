#![forbid(unsafe_code)]

//! Visualizer configuration surface.
//!
//! Mirrors the control panel: algorithm, theme, sequence size, and the speed
//! divisor, plus the canvas height the value ranges and pitch map are
//! derived from. Values are clamped here, never inside the engine.

use std::ops::RangeInclusive;
use std::time::Duration;

use crate::algorithm::Algorithm;
use crate::audio::{DEFAULT_TONE_SPACING, PitchMap};
use crate::theme::{Theme, ValueRange};

/// Allowed sequence lengths.
pub const SIZE_RANGE: RangeInclusive<usize> = 10..=100;
/// Allowed speed divisors (one step every N frames).
pub const SPEED_RANGE: RangeInclusive<u32> = 1..=30;
/// Smallest canvas height the value ranges are computed for.
pub const MIN_CANVAS_HEIGHT: f64 = 100.0;

/// Complete configuration for a [`Visualizer`](crate::Visualizer).
#[derive(Debug, Clone, PartialEq)]
pub struct VisualizerConfig {
    pub algorithm: Algorithm,
    pub theme: Theme,
    /// Sequence length, clamped to [`SIZE_RANGE`].
    pub size: usize,
    /// Frames per step, clamped to [`SPEED_RANGE`].
    pub speed: u32,
    /// Logical canvas height values are sampled against.
    pub canvas_height: f64,
    /// Seed for sequence sampling.
    pub seed: u64,
    /// Minimum spacing between tones.
    pub tone_spacing: Duration,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Bubble,
            theme: Theme::Default,
            size: 50,
            speed: 10,
            canvas_height: 400.0,
            seed: 0x5eed_5047,
            tone_spacing: DEFAULT_TONE_SPACING,
        }
    }
}

impl VisualizerConfig {
    /// Copy with every bounded field clamped into range.
    #[must_use]
    pub fn clamped(&self) -> Self {
        let canvas_height = if self.canvas_height.is_finite() {
            self.canvas_height.max(MIN_CANVAS_HEIGHT)
        } else {
            MIN_CANVAS_HEIGHT
        };
        Self {
            size: self.size.clamp(*SIZE_RANGE.start(), *SIZE_RANGE.end()),
            speed: self.speed.clamp(*SPEED_RANGE.start(), *SPEED_RANGE.end()),
            canvas_height,
            ..self.clone()
        }
    }

    /// Sampling range for the configured theme and canvas.
    #[must_use]
    pub fn value_range(&self) -> ValueRange {
        self.theme.value_range(self.canvas_height)
    }

    #[must_use]
    pub fn pitch_map(&self) -> PitchMap {
        PitchMap::new(self.canvas_height)
    }

    /// Whether moving from `self` to `next` invalidates the current sequence
    /// or cursors, so the sequence must be regenerated.
    #[must_use]
    pub fn requires_reseed(&self, next: &Self) -> bool {
        self.size != next.size
            || self.theme != next.theme
            || self.algorithm != next.algorithm
            || self.seed != next.seed
            || self.canvas_height != next.canvas_height
    }
}
