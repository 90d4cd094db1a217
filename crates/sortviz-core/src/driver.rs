#![forbid(unsafe_code)]

//! Host-driven tick driver.
//!
//! [`Visualizer`] wraps a [`SortEngine`] with the control surface a render
//! loop needs. The host owns the frame loop and the clock:
//!
//! 1. Forward control changes via [`Visualizer::start`],
//!    [`Visualizer::request_reset`] and [`Visualizer::apply_config`].
//! 2. Call [`Visualizer::frame`] once per rendered frame with the host's
//!    monotonic time.
//! 3. Draw from [`Visualizer::values`] and [`Visualizer::highlight`].
//!
//! No threads, no blocking, no wall clock: every frame is a pure function
//! of the previous state, the config and `now`.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use sortviz_core::{Visualizer, VisualizerConfig};
//!
//! let mut vis = Visualizer::new(VisualizerConfig {
//!     speed: 1,
//!     ..VisualizerConfig::default()
//! });
//! vis.start();
//! let mut now = Duration::ZERO;
//! while !vis.frame(now).completed {
//!     now += Duration::from_millis(16);
//! }
//! assert!(vis.values().windows(2).all(|w| w[0] <= w[1]));
//! ```

use std::time::Duration;

use crate::audio::{AudioOutput, ToneScheduler, ToneSink};
use crate::config::VisualizerConfig;
use crate::engine::{SortEngine, StepReport};
use crate::state::Highlight;

/// Result of a single [`Visualizer::frame`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameResult {
    /// Frame counter after this frame (restarts at 0 on reset).
    pub frame_idx: u64,
    /// Whether the engine stepped during this frame.
    pub stepped: bool,
    /// Whether a pending reset was applied during this frame.
    pub reset: bool,
    /// Whether the current sort is complete.
    pub completed: bool,
    /// Whether the driver is running after this frame.
    pub running: bool,
    /// The engine's report when it stepped.
    pub report: Option<StepReport>,
}

/// Counters accumulated over the driver's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverStats {
    pub frames: u64,
    pub steps: u64,
    pub resets: u64,
}

/// Frame-driven controller around a [`SortEngine`].
#[derive(Debug)]
pub struct Visualizer {
    engine: SortEngine,
    config: VisualizerConfig,
    audio: AudioOutput,
    running: bool,
    reset_pending: bool,
    frame_idx: u64,
    stats: DriverStats,
}

impl Visualizer {
    /// Create a stopped visualizer with a freshly sampled sequence.
    #[must_use]
    pub fn new(config: VisualizerConfig) -> Self {
        let config = config.clamped();
        let engine = build_engine(&config);
        Self {
            engine,
            config,
            audio: AudioOutput::silent(),
            running: false,
            reset_pending: false,
            frame_idx: 0,
            stats: DriverStats::default(),
        }
    }

    /// Attach the audio collaborator. Until then tones are dropped.
    #[must_use]
    pub fn with_sink(mut self, sink: Box<dyn ToneSink>) -> Self {
        self.audio.attach(sink);
        self
    }

    /// Advance one render frame.
    ///
    /// A pending reset is applied first and consumes the frame. Otherwise
    /// the engine steps when running and the frame counter is a multiple of
    /// the speed divisor.
    pub fn frame(&mut self, now: Duration) -> FrameResult {
        self.stats.frames += 1;

        if self.reset_pending {
            self.reseed();
            self.reset_pending = false;
            self.running = false;
            self.frame_idx = 0;
            return self.result(false, true, None);
        }

        self.frame_idx += 1;
        let due = self.frame_idx.is_multiple_of(u64::from(self.config.speed));
        if !self.running || !due {
            return self.result(false, false, None);
        }

        let report = self.engine.step(self.config.algorithm, now);
        if report.advanced {
            self.stats.steps += 1;
        }
        if let Some(tone) = report.tone.as_ref() {
            self.audio.emit(tone);
        }
        self.result(report.advanced, false, Some(report))
    }

    pub fn start(&mut self) {
        if !self.running {
            crate::debug!(algorithm = %self.config.algorithm, "visualizer started");
        }
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Reseed before the next step. Applied by the next [`frame`](Self::frame),
    /// which also stops the driver.
    pub fn request_reset(&mut self) {
        self.reset_pending = true;
    }

    /// Apply a new configuration.
    ///
    /// Changes that invalidate the cursors (size, theme, algorithm, seed,
    /// canvas height) reseed immediately while keeping the run state; other
    /// changes apply in place. Returns whether the sequence was regenerated.
    pub fn apply_config(&mut self, next: VisualizerConfig) -> bool {
        let next = next.clamped();
        let reseed = self.config.requires_reseed(&next);
        let seed_changed = self.config.seed != next.seed;
        let tones = self.engine.tones_mut();
        tones.set_min_spacing(next.tone_spacing);
        tones.set_pitch(next.pitch_map());
        self.config = next;

        if reseed {
            crate::debug!(
                size = self.config.size,
                theme = %self.config.theme,
                algorithm = %self.config.algorithm,
                "config change forces reseed"
            );
            if seed_changed {
                self.engine = build_engine(&self.config);
            } else {
                self.reseed();
            }
            self.frame_idx = 0;
        }
        reseed
    }

    /// Change only the speed divisor (clamped).
    pub fn set_speed(&mut self, speed: u32) {
        let next = VisualizerConfig {
            speed,
            ..self.config.clone()
        };
        self.apply_config(next);
    }

    pub fn attach_sink(&mut self, sink: Box<dyn ToneSink>) {
        self.audio.attach(sink);
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        self.engine.values()
    }

    #[must_use]
    pub fn highlight(&self) -> &Highlight {
        self.engine.highlight()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.engine.is_complete()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn reset_pending(&self) -> bool {
        self.reset_pending
    }

    #[must_use]
    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    #[must_use]
    pub fn engine(&self) -> &SortEngine {
        &self.engine
    }

    #[must_use]
    pub fn audio(&self) -> &AudioOutput {
        &self.audio
    }

    #[must_use]
    pub fn frame_idx(&self) -> u64 {
        self.frame_idx
    }

    #[must_use]
    pub fn stats(&self) -> DriverStats {
        self.stats
    }

    // --- Private helpers ---

    fn reseed(&mut self) {
        self.engine.reset(self.config.size, self.config.value_range());
        self.stats.resets += 1;
    }

    fn result(&self, stepped: bool, reset: bool, report: Option<StepReport>) -> FrameResult {
        FrameResult {
            frame_idx: self.frame_idx,
            stepped,
            reset,
            completed: self.engine.is_complete(),
            running: self.running,
            report,
        }
    }
}

fn build_engine(config: &VisualizerConfig) -> SortEngine {
    let tones = ToneScheduler::new(config.pitch_map(), config.tone_spacing);
    let mut engine = SortEngine::with_seed(config.seed).with_tones(tones);
    engine.reset(config.size, config.value_range());
    engine
}
