#![forbid(unsafe_code)]

//! Tone requests: pitch mapping, debounce spacing, and the sink seam.
//!
//! The engine never plays sound. It turns "this value was just touched" into
//! a [`ToneRequest`] carrying a frequency and a schedule timestamp, spaced so
//! consecutive tones do not overlap. Delivery goes through [`AudioOutput`],
//! which drops requests silently when no [`ToneSink`] is attached or the sink
//! is not ready.
//!
//! # Invariants
//!
//! 1. Scheduled timestamps are monotonically non-decreasing.
//! 2. Consecutive timestamps differ by at least `min_spacing`.
//! 3. A request is never scheduled before the `now` it was requested at.

use std::time::Duration;

/// Default minimum spacing between tones.
pub const DEFAULT_TONE_SPACING: Duration = Duration::from_millis(50);

/// Lowest mapped frequency, in Hz.
pub const MIN_FREQUENCY_HZ: f64 = 200.0;
/// Highest mapped frequency, in Hz.
pub const MAX_FREQUENCY_HZ: f64 = 800.0;

/// Linear value → frequency mapping.
///
/// Values are mapped from `[0, canvas_height]` onto
/// `[MIN_FREQUENCY_HZ, MAX_FREQUENCY_HZ]`. Out-of-range values extrapolate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchMap {
    input_max: f64,
}

impl PitchMap {
    #[must_use]
    pub fn new(canvas_height: f64) -> Self {
        Self {
            input_max: if canvas_height > 0.0 {
                canvas_height
            } else {
                1.0
            },
        }
    }

    #[must_use]
    pub fn frequency(&self, value: f64) -> f64 {
        MIN_FREQUENCY_HZ + (value / self.input_max) * (MAX_FREQUENCY_HZ - MIN_FREQUENCY_HZ)
    }
}

/// A request to play one tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneRequest {
    /// The touched value that drives the pitch.
    pub value: f64,
    /// Mapped frequency in Hz.
    pub frequency_hz: f64,
    /// When to start the tone, on the host's monotonic clock.
    pub at: Duration,
}

/// Debounced scheduler for tone timestamps.
#[derive(Debug, Clone)]
pub struct ToneScheduler {
    min_spacing: Duration,
    pitch: PitchMap,
    last: Option<Duration>,
}

impl ToneScheduler {
    #[must_use]
    pub fn new(pitch: PitchMap, min_spacing: Duration) -> Self {
        Self {
            min_spacing,
            pitch,
            last: None,
        }
    }

    /// Build a request for `value` at or after `now`.
    ///
    /// The timestamp is `max(now, last + min_spacing)`; the first request
    /// after construction or [`clear`](Self::clear) goes out at `now`.
    pub fn schedule(&mut self, value: f64, now: Duration) -> ToneRequest {
        let at = match self.last {
            Some(last) => now.max(last.saturating_add(self.min_spacing)),
            None => now,
        };
        self.last = Some(at);
        ToneRequest {
            value,
            frequency_hz: self.pitch.frequency(value),
            at,
        }
    }

    /// Forget the last scheduled timestamp.
    pub fn clear(&mut self) {
        self.last = None;
    }

    #[must_use]
    pub fn min_spacing(&self) -> Duration {
        self.min_spacing
    }

    pub fn set_min_spacing(&mut self, spacing: Duration) {
        self.min_spacing = spacing;
    }

    pub fn set_pitch(&mut self, pitch: PitchMap) {
        self.pitch = pitch;
    }

    /// Timestamp of the most recent request, if any.
    #[must_use]
    pub fn last(&self) -> Option<Duration> {
        self.last
    }
}

impl Default for ToneScheduler {
    fn default() -> Self {
        Self::new(PitchMap::new(400.0), DEFAULT_TONE_SPACING)
    }
}

/// External audio collaborator.
///
/// Implementations must not block: `play` hands the request to whatever
/// schedules the actual sound and returns.
pub trait ToneSink {
    /// Whether the sink can accept tones right now (e.g. audio context started).
    fn is_ready(&self) -> bool {
        true
    }

    /// Fire-and-forget delivery of one tone.
    fn play(&mut self, request: &ToneRequest);
}

/// Optional sink wrapper that degrades to silence.
#[derive(Default)]
pub struct AudioOutput {
    sink: Option<Box<dyn ToneSink>>,
    delivered: u64,
    dropped: u64,
}

impl AudioOutput {
    /// Output with no sink attached; every request is dropped.
    #[must_use]
    pub fn silent() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sink(sink: Box<dyn ToneSink>) -> Self {
        Self {
            sink: Some(sink),
            ..Self::default()
        }
    }

    pub fn attach(&mut self, sink: Box<dyn ToneSink>) {
        self.sink = Some(sink);
    }

    pub fn detach(&mut self) -> Option<Box<dyn ToneSink>> {
        self.sink.take()
    }

    /// Deliver `request` if a ready sink is attached. Returns whether it was.
    pub fn emit(&mut self, request: &ToneRequest) -> bool {
        match self.sink.as_mut() {
            Some(sink) if sink.is_ready() => {
                sink.play(request);
                self.delivered += 1;
                true
            }
            _ => {
                self.dropped += 1;
                crate::trace!(
                    frequency_hz = request.frequency_hz,
                    "tone dropped: audio unavailable"
                );
                false
            }
        }
    }

    #[must_use]
    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// Tones handed to a sink so far.
    #[must_use]
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    /// Tones discarded because no ready sink was available.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl core::fmt::Debug for AudioOutput {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AudioOutput")
            .field("has_sink", &self.sink.is_some())
            .field("delivered", &self.delivered)
            .field("dropped", &self.dropped)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const MS_10: Duration = Duration::from_millis(10);

    #[derive(Clone, Default)]
    struct Recorder {
        ready: bool,
        played: Rc<RefCell<Vec<ToneRequest>>>,
    }

    impl ToneSink for Recorder {
        fn is_ready(&self) -> bool {
            self.ready
        }

        fn play(&mut self, request: &ToneRequest) {
            self.played.borrow_mut().push(*request);
        }
    }

    #[test]
    fn pitch_map_spans_200_to_800() {
        let pitch = PitchMap::new(400.0);
        assert_eq!(pitch.frequency(0.0), 200.0);
        assert_eq!(pitch.frequency(200.0), 500.0);
        assert_eq!(pitch.frequency(400.0), 800.0);
    }

    #[test]
    fn first_request_goes_out_now() {
        let mut sched = ToneScheduler::default();
        let req = sched.schedule(100.0, Duration::from_secs(3));
        assert_eq!(req.at, Duration::from_secs(3));
        assert_eq!(req.frequency_hz, 350.0);
    }

    #[test]
    fn burst_is_spaced_by_min_spacing() {
        let mut sched = ToneScheduler::default();
        let mut now = Duration::ZERO;
        let mut prev: Option<Duration> = None;
        for _ in 0..20 {
            let req = sched.schedule(10.0, now);
            assert!(req.at >= now);
            if let Some(p) = prev {
                assert!(req.at >= p + DEFAULT_TONE_SPACING);
            }
            prev = Some(req.at);
            now += MS_10;
        }
        assert_eq!(prev, Some(DEFAULT_TONE_SPACING * 19));
    }

    #[test]
    fn slow_requests_are_not_delayed() {
        let mut sched = ToneScheduler::default();
        sched.schedule(1.0, Duration::ZERO);
        let req = sched.schedule(1.0, Duration::from_millis(500));
        assert_eq!(req.at, Duration::from_millis(500));
    }

    #[test]
    fn clear_forgets_spacing() {
        let mut sched = ToneScheduler::default();
        sched.schedule(1.0, Duration::from_secs(1));
        sched.clear();
        assert_eq!(sched.last(), None);
        let req = sched.schedule(1.0, Duration::ZERO);
        assert_eq!(req.at, Duration::ZERO);
    }

    #[test]
    fn silent_output_drops() {
        let mut out = AudioOutput::silent();
        let req = ToneScheduler::default().schedule(5.0, Duration::ZERO);
        assert!(!out.emit(&req));
        assert_eq!(out.dropped(), 1);
        assert_eq!(out.delivered(), 0);
    }

    #[test]
    fn unready_sink_drops_then_delivers_once_ready() {
        let recorder = Recorder::default();
        let played = Rc::clone(&recorder.played);
        let mut out = AudioOutput::with_sink(Box::new(recorder));
        let req = ToneScheduler::default().schedule(5.0, Duration::ZERO);

        assert!(!out.emit(&req));
        assert!(played.borrow().is_empty());

        out.attach(Box::new(Recorder {
            ready: true,
            played: Rc::clone(&played),
        }));
        assert!(out.emit(&req));
        assert_eq!(played.borrow().len(), 1);
        assert_eq!(out.delivered(), 1);
        assert_eq!(out.dropped(), 1);
    }
}
