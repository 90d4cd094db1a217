#![forbid(unsafe_code)]

//! Visual themes and the value ranges they sample from.
//!
//! A theme never changes algorithm behaviour. It only decides how tall the
//! generated magnitudes are relative to the canvas, so bars fill the frame
//! while circles and trees stay in the lower band.

use std::str::FromStr;

use crate::error::ParseError;

/// Half-open sampling interval `[low, high)` for generated values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub low: f64,
    pub high: f64,
}

impl ValueRange {
    /// Create a range, swapping the bounds if given in reverse order.
    #[must_use]
    pub fn new(low: f64, high: f64) -> Self {
        if low <= high {
            Self { low, high }
        } else {
            Self {
                low: high,
                high: low,
            }
        }
    }

    /// Width of the range.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.high - self.low
    }

    /// Whether `value` lies in `[low, high)`, or equals `low` for an empty range.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        if self.span() <= 0.0 {
            return value == self.low;
        }
        value >= self.low && value < self.high
    }
}

/// How the sequence is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    /// Vertical bars.
    #[default]
    Default,
    /// Circles floating at their value's height.
    Space,
    /// Triangular trees on a strip of ground.
    Tree,
}

/// Margin kept above and below bars in the default theme.
const BAR_MARGIN: f64 = 50.0;
/// Smallest circle/tree magnitude.
const SMALL_MIN: f64 = 10.0;
/// Circle/tree magnitudes stay under this fraction of the canvas height.
const SMALL_FRACTION: f64 = 0.15;

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Default, Theme::Space, Theme::Tree];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Space => "space",
            Self::Tree => "tree",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "Default (Bars)",
            Self::Space => "Space (Circles)",
            Self::Tree => "Tree (Forest)",
        }
    }

    /// Sampling range for a canvas of the given height.
    ///
    /// Degenerate canvases collapse to an empty range at the lower bound
    /// rather than producing an inverted interval.
    #[must_use]
    pub fn value_range(self, canvas_height: f64) -> ValueRange {
        let (low, high) = match self {
            Self::Default => (BAR_MARGIN, canvas_height - BAR_MARGIN),
            Self::Space | Self::Tree => (SMALL_MIN, canvas_height * SMALL_FRACTION),
        };
        ValueRange {
            low,
            high: high.max(low),
        }
    }

    /// The next theme in [`Theme::ALL`], wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Default => Self::Space,
            Self::Space => Self::Tree,
            Self::Tree => Self::Default,
        }
    }
}

impl core::fmt::Display for Theme {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" | "bars" => Ok(Self::Default),
            "space" | "circles" => Ok(Self::Space),
            "tree" | "forest" => Ok(Self::Tree),
            _ => Err(ParseError::UnknownTheme(s.to_string())),
        }
    }
}
