//! # history-oracle
//!
//! Infer whether URLs are in the user's browsing history by timing the host
//! rendering pipeline while a hidden link surface is repointed.
//!
//! Rendering a link to a visited address costs the host a little more style
//! work per frame than an unvisited one. This crate choreographs URL
//! rewrites against the display-refresh clock, extracts inter-frame timing
//! deltas, and compares medians at a fixed relative margin:
//!
//! - **Calibration** first searches for the cheapest configuration (fewest
//!   probe repetitions, least visual obfuscation) under which a known-visited
//!   reference URL is still distinguishable from a fresh unvisited baseline,
//!   escalating obfuscation and retrying a bounded number of times.
//! - **Scanning** then applies that configuration to each candidate URL in
//!   turn, reusing the calibration baseline for every verdict.
//!
//! The host environment is abstracted behind two small traits —
//! [`FrameClock`] for refresh ticks and [`RenderSurface`] for the hidden
//! link elements — so the whole pipeline runs unchanged against the
//! simulated page in [`helpers`].
//!
//! ## Quick start
//!
//! ```ignore
//! use history_oracle::helpers::SimulatedPage;
//! use history_oracle::{FrameProbe, HistoryOracle, Outcome};
//!
//! # async fn demo() {
//! let page = SimulatedPage::new();
//! page.mark_visited("https://example.com/me");
//! page.mark_visited("https://frequently-visited.example");
//!
//! let oracle = HistoryOracle::new();
//! let mut probe = FrameProbe::new(page.clock(), page.surface(), oracle.config());
//!
//! let candidates = vec![
//!     "https://example.com/me".to_owned(),
//!     "https://frequently-visited.example".to_owned(),
//!     "https://never-visited.example".to_owned(),
//! ];
//! match oracle.run(&mut probe, "https://example.com/me", &candidates).await {
//!     Outcome::Completed(report) => {
//!         println!("{}", history_oracle::output::format_report(&report));
//!     }
//!     Outcome::Unavailable(info) => {
//!         eprintln!("{}", history_oracle::output::format_unavailable(&info));
//!     }
//! }
//! # }
//! ```
//!
//! ## Concurrency model
//!
//! Everything runs on one logical thread of control. Probes never overlap:
//! calibration and scanning serialize each unit of work on the completion of
//! the previous one, and every suspension bottoms out in "wait for the next
//! refresh tick". Futures are therefore not required to be `Send`.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod calibrate;
mod config;
mod constants;
mod error;
mod oracle;
mod result;
mod scanner;
mod surface;
mod types;

// Functional modules
pub mod helpers;
pub mod measurement;
pub mod output;
pub mod statistics;

// Re-exports for public API
pub use calibrate::{Calibrated, Calibrator};
pub use config::Config;
pub use constants::{
    ALTERNATE_SETTLE_URL, BLUR_DESCENT_STEP, DEFAULT_INITIAL_BLUR, DEFAULT_INITIAL_REPS,
    DEFAULT_RETRY_BUDGET, DEFAULT_SURFACE_TARGETS, ELEVATION_MARGIN, REFRESH_PERIOD,
    RETRY_BLUR_STEP, SETTLE_URL,
};
pub use error::Error;
pub use measurement::{FrameClock, FrameProbe, FrameScheduler, IntervalClock, ProbeRunner, ProbeVariant};
pub use oracle::{HistoryOracle, RunFlag, RunToken};
pub use result::{
    CalibrationParameters, CalibrationSummary, LinkResult, Outcome, ScanReport, UnavailableInfo,
};
pub use scanner::scan_candidates;
pub use surface::{RenderSurface, SurfaceError};
pub use types::{Sample, TimeSeries, TimedStep};
