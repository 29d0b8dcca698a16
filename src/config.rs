//! Configuration for the probe, calibration, and scan phases.

use crate::constants::{
    ALTERNATE_SETTLE_URL, BLUR_DESCENT_STEP, DEFAULT_INITIAL_BLUR, DEFAULT_INITIAL_REPS,
    DEFAULT_RETRY_BUDGET, DEFAULT_SURFACE_TARGETS, ELEVATION_MARGIN, RETRY_BLUR_STEP, SETTLE_URL,
};

/// Tuning knobs for a full attack run.
///
/// The defaults are the empirically tuned values: a calibration descent
/// starting at 3 repetitions and 45 px of blur, descending 5 px per
/// validated level, retrying 3 times with 10 px more blur on failure, and a
/// 10% elevation margin for every verdict.
#[derive(Debug, Clone)]
pub struct Config {
    /// Probe repetitions the calibration descent starts from.
    ///
    /// Must be at least 2: a single repetition is treated as exhausted
    /// search space, never as a measurable level.
    pub initial_reps: u32,

    /// Obfuscation intensity the calibration descent starts from, in blur
    /// pixels.
    pub initial_blur: f64,

    /// Blur reduction applied at each successful descent level.
    pub blur_descent_step: f64,

    /// Blur increase applied before each calibration retry.
    pub retry_blur_step: f64,

    /// Calibration retries permitted after the initial attempt.
    pub retry_budget: u32,

    /// Relative margin a test median must exceed the baseline median by.
    ///
    /// 1.10 means "more than 10% slower than baseline counts as visited".
    pub elevation_margin: f64,

    /// Link elements provisioned on the hidden surface before a run.
    pub surface_targets: usize,

    /// Guaranteed-unvisited address the choreography settles on between
    /// observations.
    pub settle_url: String,

    /// Second guaranteed-unvisited address, observed by the baseline
    /// choreography in the subject position.
    pub alternate_settle_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_reps: DEFAULT_INITIAL_REPS,
            initial_blur: DEFAULT_INITIAL_BLUR,
            blur_descent_step: BLUR_DESCENT_STEP,
            retry_blur_step: RETRY_BLUR_STEP,
            retry_budget: DEFAULT_RETRY_BUDGET,
            elevation_margin: ELEVATION_MARGIN,
            surface_targets: DEFAULT_SURFACE_TARGETS,
            settle_url: SETTLE_URL.to_owned(),
            alternate_settle_url: ALTERNATE_SETTLE_URL.to_owned(),
        }
    }
}

impl Config {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// More repetitions and a bigger retry budget for noisy hosts.
    ///
    /// Roughly doubles the measurement cost per candidate in exchange for
    /// steadier medians.
    pub fn thorough() -> Self {
        Self {
            initial_reps: 5,
            initial_blur: 60.0,
            retry_budget: 5,
            ..Default::default()
        }
    }

    /// Heavier obfuscation and fewer retries, for runs where staying
    /// unnoticed matters more than completing.
    pub fn covert() -> Self {
        Self {
            initial_blur: 80.0,
            retry_budget: 2,
            surface_targets: 250,
            ..Default::default()
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Set the starting repetitions for calibration.
    pub fn initial_reps(mut self, reps: u32) -> Self {
        assert!(reps >= 2, "initial_reps must be at least 2");
        self.initial_reps = reps;
        self
    }

    /// Set the starting obfuscation intensity.
    pub fn initial_blur(mut self, blur: f64) -> Self {
        assert!(blur >= 0.0, "initial_blur must be non-negative");
        self.initial_blur = blur;
        self
    }

    /// Set the calibration retry budget.
    pub fn retry_budget(mut self, retries: u32) -> Self {
        self.retry_budget = retries;
        self
    }

    /// Set the relative elevation margin.
    pub fn elevation_margin(mut self, margin: f64) -> Self {
        assert!(margin > 1.0, "elevation_margin must exceed 1.0");
        self.elevation_margin = margin;
        self
    }

    /// Set the number of surface link elements provisioned per run.
    pub fn surface_targets(mut self, targets: usize) -> Self {
        assert!(targets > 0, "surface_targets must be positive");
        self.surface_targets = targets;
        self
    }

    /// Set the two guaranteed-unvisited settle addresses.
    pub fn settle_urls(mut self, settle: &str, alternate: &str) -> Self {
        assert!(
            settle != alternate,
            "settle addresses must be distinct for the baseline choreography"
        );
        self.settle_url = settle.to_owned();
        self.alternate_settle_url = alternate.to_owned();
        self
    }

    /// Check the configuration for inconsistencies.
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_reps < 2 {
            return Err("initial_reps must be at least 2".to_owned());
        }
        if self.initial_blur < 0.0 {
            return Err("initial_blur must be non-negative".to_owned());
        }
        if self.elevation_margin <= 1.0 {
            return Err("elevation_margin must exceed 1.0".to_owned());
        }
        if self.surface_targets == 0 {
            return Err("surface_targets must be positive".to_owned());
        }
        if self.settle_url.is_empty() || self.alternate_settle_url.is_empty() {
            return Err("settle addresses must be non-empty".to_owned());
        }
        if self.settle_url == self.alternate_settle_url {
            return Err("settle addresses must be distinct".to_owned());
        }
        Ok(())
    }
}
