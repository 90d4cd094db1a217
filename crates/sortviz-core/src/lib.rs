#![forbid(unsafe_code)]

//! Core: stepwise sort engine, tone scheduling, and the host-driven tick driver.
//!
//! Every sorting algorithm is decomposed into discrete, resumable steps so a
//! render loop can sample the sequence mid-algorithm. The crate performs no
//! I/O; rendering and audio synthesis live behind read-only views and the
//! [`audio::ToneSink`] trait.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use sortviz_core::{Algorithm, SortEngine, ValueRange};
//!
//! let mut engine = SortEngine::with_seed(7);
//! engine.reset(20, ValueRange::new(10.0, 90.0));
//!
//! let mut now = Duration::ZERO;
//! while !engine.step(Algorithm::Heap, now).completed {
//!     now += Duration::from_millis(16);
//! }
//! assert!(engine.values().windows(2).all(|w| w[0] <= w[1]));
//! ```

pub mod algorithm;
pub mod audio;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod logging;
pub mod rng;
pub mod state;
pub mod steppers;
pub mod theme;

pub use algorithm::{Algorithm, Complexity};
pub use audio::{AudioOutput, PitchMap, ToneRequest, ToneScheduler, ToneSink};
pub use config::VisualizerConfig;
pub use driver::{FrameResult, Visualizer};
pub use engine::{SortEngine, StepReport};
pub use error::ParseError;
pub use state::{Cursors, Highlight, PartitionRange, SortState};
pub use theme::{Theme, ValueRange};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, info, trace, warn};
