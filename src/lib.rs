//! Microgrid storage dispatch and multi-park capacity sizing.

pub mod config;
pub mod devices;
pub mod error;
pub mod io;
pub mod logging;
pub mod reporting;
pub mod runner;
/// Dispatch simulator, clock, balance arithmetic, and cost metrics.
pub mod sim;
pub mod sizing;
/// Terminal chart view of a dispatch run.
#[cfg(feature = "tui")]
pub mod tui;
