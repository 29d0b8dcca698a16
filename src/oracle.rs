//! Main `HistoryOracle` entry point and the trigger boundary.

use std::cell::Cell;

use crate::calibrate::Calibrator;
use crate::config::Config;
use crate::error::Error;
use crate::measurement::ProbeRunner;
use crate::result::{CalibrationSummary, Outcome, ScanReport, UnavailableInfo};
use crate::scanner::scan_candidates;

/// Main entry point for a history-probing run.
///
/// Configure with a preset or the builder methods, then [`run`](Self::run)
/// against a probe. The run provisions the surface, calibrates against a
/// known-visited reference URL, sweeps the candidate list, and resolves to an
/// [`Outcome`] in every case; no error propagates past this type.
///
/// # Example
///
/// ```ignore
/// use history_oracle::{helpers::SimulatedPage, FrameProbe, HistoryOracle};
///
/// let page = SimulatedPage::new();
/// page.mark_visited("https://example.com/me");
/// let oracle = HistoryOracle::new();
/// let mut probe = FrameProbe::new(page.clock(), page.surface(), oracle.config());
///
/// let candidates = vec!["https://example.com/me".to_owned()];
/// let outcome = oracle.run(&mut probe, "https://example.com/me", &candidates).await;
/// ```
#[derive(Debug, Clone, Default)]
pub struct HistoryOracle {
    config: Config,
}

impl HistoryOracle {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Create with the thorough preset (see [`Config::thorough`]).
    pub fn thorough() -> Self {
        Self::with_config(Config::thorough())
    }

    /// Create with the covert preset (see [`Config::covert`]).
    pub fn covert() -> Self {
        Self::with_config(Config::covert())
    }

    /// Set the starting repetitions for calibration.
    pub fn initial_reps(mut self, reps: u32) -> Self {
        self.config = self.config.initial_reps(reps);
        self
    }

    /// Set the starting obfuscation intensity.
    pub fn initial_blur(mut self, blur: f64) -> Self {
        self.config = self.config.initial_blur(blur);
        self
    }

    /// Set the calibration retry budget.
    pub fn retry_budget(mut self, retries: u32) -> Self {
        self.config = self.config.retry_budget(retries);
        self
    }

    /// Set the relative elevation margin.
    pub fn elevation_margin(mut self, margin: f64) -> Self {
        self.config = self.config.elevation_margin(margin);
        self
    }

    /// Set the number of surface link elements provisioned per run.
    pub fn surface_targets(mut self, targets: usize) -> Self {
        self.config = self.config.surface_targets(targets);
        self
    }

    /// The effective configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full attack: provision, calibrate, scan.
    ///
    /// `reference_url` must be an address known to be in the history —
    /// normally the current page's own — and is what calibration validates
    /// against. Callers usually include it in `candidates` as well.
    pub async fn run<P: ProbeRunner>(
        &self,
        probe: &mut P,
        reference_url: &str,
        candidates: &[String],
    ) -> Outcome {
        if let Err(reason) = self.config.validate() {
            return Outcome::Unavailable(UnavailableInfo { attempts: 0, reason });
        }

        if let Err(err) = probe.provision(self.config.surface_targets) {
            return Outcome::Unavailable(UnavailableInfo {
                attempts: 0,
                reason: err.to_string(),
            });
        }

        let calibrated = match Calibrator::new(probe, &self.config, reference_url)
            .run()
            .await
        {
            Ok(calibrated) => calibrated,
            Err(err) => {
                let attempts = match err {
                    Error::CalibrationUnavailable { attempts } => attempts,
                    _ => 0,
                };
                return Outcome::Unavailable(UnavailableInfo {
                    attempts,
                    reason: err.to_string(),
                });
            }
        };

        match scan_candidates(probe, &self.config, &calibrated.params, candidates).await {
            Ok(results) => Outcome::Completed(ScanReport {
                results,
                calibration: CalibrationSummary {
                    reps: calibrated.params.reps,
                    blur: calibrated.params.blur,
                    attempts: calibrated.attempts,
                },
            }),
            Err(err) => Outcome::Unavailable(UnavailableInfo {
                attempts: calibrated.attempts,
                reason: err.to_string(),
            }),
        }
    }

    /// [`run`](Self::run), guarded against re-entry.
    ///
    /// Returns `None` without touching the probe when `flag` is already
    /// held — the no-op behavior the trigger boundary requires when a run is
    /// in flight. The flag is released when the run resolves.
    pub async fn trigger<P: ProbeRunner>(
        &self,
        flag: &RunFlag,
        probe: &mut P,
        reference_url: &str,
        candidates: &[String],
    ) -> Option<Outcome> {
        let _token = flag.try_acquire()?;
        Some(self.run(probe, reference_url, candidates).await)
    }
}

/// Explicit run-in-progress state for the trigger boundary.
///
/// The owner of the user-facing trigger keeps one of these; while a token is
/// live, further acquisitions fail and the trigger is a no-op. Single
/// threaded by design, like the rest of the crate.
#[derive(Debug, Default)]
pub struct RunFlag(Cell<bool>);

impl RunFlag {
    /// A flag with no run in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a run is currently in flight.
    pub fn is_running(&self) -> bool {
        self.0.get()
    }

    /// Mark a run as started, unless one already is.
    pub fn try_acquire(&self) -> Option<RunToken<'_>> {
        if self.0.get() {
            return None;
        }
        self.0.set(true);
        Some(RunToken { flag: self })
    }
}

/// Proof of an acquired [`RunFlag`]; releases the flag on drop.
#[derive(Debug)]
pub struct RunToken<'a> {
    flag: &'a RunFlag,
}

impl Drop for RunToken<'_> {
    fn drop(&mut self) {
        self.flag.0.set(false);
    }
}
