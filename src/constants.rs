//! Empirically chosen constants shared across the crate.
//!
//! The search parameters (starting repetitions, blur levels, step sizes) and
//! the 10% elevation margin were tuned against real browsers; they are
//! exposed as defaults on [`crate::Config`] rather than redesigned.

use std::time::Duration;

/// Relative margin a test median must exceed the baseline median by before a
/// link counts as visited. 1.10 means "more than 10% slower".
pub const ELEVATION_MARGIN: f64 = 1.10;

/// Probe repetitions the calibration descent starts from.
pub const DEFAULT_INITIAL_REPS: u32 = 3;

/// Obfuscation intensity (blur pixels) the calibration descent starts from.
pub const DEFAULT_INITIAL_BLUR: f64 = 45.0;

/// Blur reduction applied at each successful descent level.
pub const BLUR_DESCENT_STEP: f64 = 5.0;

/// Blur increase applied before each calibration retry.
pub const RETRY_BLUR_STEP: f64 = 10.0;

/// Calibration retries permitted after the initial attempt.
pub const DEFAULT_RETRY_BUDGET: u32 = 3;

/// Link elements provisioned on the hidden rendering surface.
pub const DEFAULT_SURFACE_TARGETS: usize = 500;

/// Display refresh period assumed by [`crate::IntervalClock`] (60 Hz).
pub const REFRESH_PERIOD: Duration = Duration::from_micros(16_667);

/// Settle target: an address no browser profile will have in its history.
/// Repointing the surface here normalizes style state between observations.
pub const SETTLE_URL: &str = "http://address-you-must-have-never-visited-before-100000.com";

/// Second guaranteed-unvisited address, used by the baseline choreography so
/// that even the "subject" position of the run points somewhere cold.
pub const ALTERNATE_SETTLE_URL: &str = "http://address-you-must-have-never-visited-before-200000.com";
