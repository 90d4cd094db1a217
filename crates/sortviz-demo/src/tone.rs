#![forbid(unsafe_code)]

//! Terminal tone sink.
//!
//! Terminals cannot synthesize a pitch, so each tone is logged with its
//! frequency and schedule time, and optionally rendered as a bell.
//!
//! A bell cannot be queued for a later instant: it sounds when written. The
//! sink therefore applies the minimum spacing itself on its own clock and
//! skips bells that would land closer than that to the previous one. Skipped
//! tones are still logged with their scheduled `at`.

use std::io::{self, Write};
use std::time::Duration;

use sortviz_core::audio::DEFAULT_TONE_SPACING;
use sortviz_core::{ToneRequest, ToneSink};
use web_time::Instant;

const BELL: &[u8] = b"\x07";

/// [`ToneSink`] that logs tones and can ring the terminal bell.
#[derive(Debug)]
pub struct TerminalTone<W: Write = io::Stdout> {
    out: W,
    bell: bool,
    min_spacing: Duration,
    origin: Instant,
    last_bell: Option<Duration>,
    played: u64,
    rung: u64,
}

impl TerminalTone {
    /// Sink writing bells to stdout.
    #[must_use]
    pub fn stdout(bell: bool, min_spacing: Duration) -> Self {
        Self::new(io::stdout(), bell).with_min_spacing(min_spacing)
    }
}

impl<W: Write> TerminalTone<W> {
    #[must_use]
    pub fn new(out: W, bell: bool) -> Self {
        Self {
            out,
            bell,
            min_spacing: DEFAULT_TONE_SPACING,
            origin: Instant::now(),
            last_bell: None,
            played: 0,
            rung: 0,
        }
    }

    /// Minimum real time between two bells.
    #[must_use]
    pub fn with_min_spacing(mut self, spacing: Duration) -> Self {
        self.min_spacing = spacing;
        self
    }

    /// Tones received so far.
    #[must_use]
    pub fn played(&self) -> u64 {
        self.played
    }

    /// Bells actually written.
    #[must_use]
    pub fn rung(&self) -> u64 {
        self.rung
    }

    #[must_use]
    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Handle `request` as if it arrived at `now` on the sink's clock.
    pub fn play_at(&mut self, request: &ToneRequest, now: Duration) {
        self.played += 1;
        tracing::debug!(
            value = request.value,
            frequency_hz = request.frequency_hz,
            at_ms = request.at.as_millis() as u64,
            "tone"
        );
        if !self.bell {
            return;
        }
        let due = self
            .last_bell
            .is_none_or(|last| now >= last.saturating_add(self.min_spacing));
        if !due {
            tracing::trace!(at_ms = request.at.as_millis() as u64, "bell skipped");
            return;
        }
        match self.out.write_all(BELL).and_then(|()| self.out.flush()) {
            Ok(()) => {
                self.last_bell = Some(now);
                self.rung += 1;
            }
            Err(err) => tracing::warn!(error = %err, "bell write failed"),
        }
    }
}

impl<W: Write> ToneSink for TerminalTone<W> {
    fn play(&mut self, request: &ToneRequest) {
        let now = self.origin.elapsed();
        self.play_at(request, now);
    }
}
