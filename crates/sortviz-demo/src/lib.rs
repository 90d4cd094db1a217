#![forbid(unsafe_code)]

//! Terminal front-end for the sortviz stepwise sort engine.
//!
//! The binary wires these together: [`cli`] builds the configuration,
//! [`session`] owns the terminal, [`app`] maps keys onto the
//! [`Visualizer`](sortviz_core::Visualizer) and draws each frame through
//! [`scene`], and [`tone`] receives the debounced tone requests.

pub mod app;
pub mod cli;
pub mod scene;
pub mod session;
pub mod tone;
