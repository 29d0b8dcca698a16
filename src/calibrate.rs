//! Calibration: find the cheapest configuration that still detects a known
//! positive.
//!
//! The controller descends greedily from the configured starting point,
//! validating at each level that the current page's own address (which is in
//! the history by definition) still reads as elevated over a freshly
//! measured unvisited baseline. Each validated level is remembered and a
//! strictly cheaper one is attempted; the first level that cannot be
//! validated ends the descent with the last known-good configuration. A
//! failed descent is retried with more obfuscation, a bounded number of
//! times.

use log::{debug, info, warn};

use crate::config::Config;
use crate::error::Error;
use crate::measurement::{ProbeRunner, ProbeVariant};
use crate::result::CalibrationParameters;
use crate::statistics::is_elevated_by;
use crate::types::TimeSeries;

/// A successful calibration, with the bookkeeping the report wants.
#[derive(Debug, Clone)]
pub struct Calibrated {
    /// The accepted configuration.
    pub params: CalibrationParameters,
    /// Attempts spent, initial try included.
    pub attempts: u32,
}

/// Runs the calibration search against a probe.
#[derive(Debug)]
pub struct Calibrator<'a, P> {
    probe: &'a mut P,
    config: &'a Config,
    reference_url: &'a str,
}

impl<'a, P: ProbeRunner> Calibrator<'a, P> {
    /// Bind the probe, configuration, and the known-visited reference URL
    /// (normally the current page's own address).
    pub fn new(probe: &'a mut P, config: &'a Config, reference_url: &'a str) -> Self {
        Self {
            probe,
            config,
            reference_url,
        }
    }

    /// Run the full search: greedy descent plus the outer retry loop.
    ///
    /// # Errors
    ///
    /// [`Error::CalibrationUnavailable`] once the retry budget is spent; no
    /// other error escapes this method.
    pub async fn run(mut self) -> Result<Calibrated, Error> {
        let mut failures = 0u32;
        let mut blur = self.config.initial_blur;
        loop {
            match self.descend(self.config.initial_reps, blur).await {
                Ok(params) => {
                    info!(
                        "calibration accepted {} reps at {:.0} px blur after {} attempt(s)",
                        params.reps,
                        params.blur,
                        failures + 1
                    );
                    return Ok(Calibrated {
                        params,
                        attempts: failures + 1,
                    });
                }
                Err(err) => {
                    failures += 1;
                    if failures > self.config.retry_budget {
                        warn!("calibration gave up after {failures} attempts: {err}");
                        return Err(Error::CalibrationUnavailable { attempts: failures });
                    }
                    debug!("calibration attempt {failures} failed ({err}); raising obfuscation");
                    blur += self.config.retry_blur_step;
                }
            }
        }
    }

    /// Greedy descent from `(start_reps, start_blur)` toward cheaper levels.
    ///
    /// Equivalent to the recursive formulation: each validated level tries
    /// `(reps - 1, blur - step)` next, and the first failure of any kind
    /// settles on the last validated level. Only a descent whose very first
    /// level fails returns an error.
    async fn descend(&mut self, start_reps: u32, start_blur: f64) -> Result<CalibrationParameters, Error> {
        let mut reps = start_reps;
        let mut blur = start_blur;
        let mut accepted: Option<CalibrationParameters> = None;
        loop {
            match self.validate_level(reps, blur).await {
                Ok(baseline_series) => {
                    accepted = Some(CalibrationParameters {
                        reps,
                        blur,
                        baseline_series,
                    });
                    reps -= 1;
                    blur -= self.config.blur_descent_step;
                }
                Err(err) => return accepted.ok_or(err),
            }
        }
    }

    /// Measure one level and decide whether it still detects the reference.
    ///
    /// Returns the level's baseline series on success, so the accepted
    /// configuration carries the baseline it was validated against.
    async fn validate_level(&mut self, reps: u32, blur: f64) -> Result<TimeSeries, Error> {
        if reps <= 1 {
            return Err(Error::SearchExhausted);
        }

        self.probe.apply_obfuscation(blur)?;
        let baseline = self.probe.collect(ProbeVariant::Baseline, reps).await?;
        let test = self
            .probe
            .collect(ProbeVariant::Reference(self.reference_url), reps)
            .await?;

        if !is_elevated_by(&test, &baseline, self.config.elevation_margin)? {
            debug!("reference not elevated at {reps} reps, {blur:.0} px blur");
            return Err(Error::SearchFailed);
        }
        Ok(baseline)
    }
}
