#![forbid(unsafe_code)]

//! The six sorting algorithms the engine can step through.

use std::str::FromStr;

use crate::error::ParseError;

/// A comparison sort the engine knows how to advance one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// Adjacent compare-and-swap passes.
    #[default]
    Bubble,
    /// Lomuto quicksort driven by a work queue of partition ranges.
    Quick,
    /// Bottom-up merge sort replayed from precomputed snapshots.
    Merge,
    /// In-place heapsort with a shrinking heap boundary.
    Heap,
    /// Minimum scan then swap into place.
    Selection,
    /// Backward shift, one swap per step.
    Insertion,
}

/// Asymptotic cost shown next to the visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Complexity {
    /// Time complexity.
    pub time: &'static str,
    /// Auxiliary space complexity.
    pub space: &'static str,
}

impl Algorithm {
    /// All algorithms, in selector order.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bubble,
        Algorithm::Quick,
        Algorithm::Merge,
        Algorithm::Heap,
        Algorithm::Selection,
        Algorithm::Insertion,
    ];

    /// Stable lowercase identifier, accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bubble => "bubble",
            Self::Quick => "quick",
            Self::Merge => "merge",
            Self::Heap => "heap",
            Self::Selection => "selection",
            Self::Insertion => "insertion",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bubble => "Bubble Sort",
            Self::Quick => "Quick Sort",
            Self::Merge => "Merge Sort",
            Self::Heap => "Heap Sort",
            Self::Selection => "Selection Sort",
            Self::Insertion => "Insertion Sort",
        }
    }

    #[must_use]
    pub const fn complexity(self) -> Complexity {
        match self {
            Self::Bubble | Self::Selection | Self::Insertion => Complexity {
                time: "O(n²)",
                space: "O(1)",
            },
            Self::Quick => Complexity {
                time: "O(n log n) avg, O(n²) worst",
                space: "O(log n)",
            },
            Self::Merge => Complexity {
                time: "O(n log n)",
                space: "O(n)",
            },
            Self::Heap => Complexity {
                time: "O(n log n)",
                space: "O(1)",
            },
        }
    }

    /// The next algorithm in [`Algorithm::ALL`], wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&a| a == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl core::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let name = normalized
            .strip_suffix("sort")
            .map(|n| n.trim_end_matches(['-', '_', ' ']))
            .unwrap_or(normalized.as_str());
        match name {
            "bubble" => Ok(Self::Bubble),
            "quick" => Ok(Self::Quick),
            "merge" => Ok(Self::Merge),
            "heap" => Ok(Self::Heap),
            "selection" => Ok(Self::Selection),
            "insertion" => Ok(Self::Insertion),
            _ => Err(ParseError::UnknownAlgorithm(s.to_string())),
        }
    }
}
