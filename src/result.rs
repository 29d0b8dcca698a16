//! Attack run results and related structures.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::TimeSeries;

/// The configuration calibration settled on, held immutable for the rest of
/// the run and reused for every candidate URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationParameters {
    /// Probe repetitions per measured series.
    pub reps: u32,
    /// Obfuscation intensity in blur pixels.
    pub blur: f64,
    /// Unvisited baseline series measured at the accepted level; every
    /// candidate verdict compares against this.
    pub baseline_series: TimeSeries,
}

/// Verdict and raw timings for one candidate URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkResult {
    /// The candidate URL.
    pub url: String,
    /// Whether the candidate's timings were elevated over the baseline.
    pub visited: bool,
    /// The candidate's measured series.
    pub test_series: TimeSeries,
    /// The shared calibration baseline the verdict compared against.
    pub baseline_series: TimeSeries,
}

/// How calibration concluded, kept for inspection alongside the verdicts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CalibrationSummary {
    /// Repetitions per series at the accepted level.
    pub reps: u32,
    /// Blur intensity at the accepted level.
    pub blur: f64,
    /// Calibration attempts spent, initial try included.
    pub attempts: u32,
}

/// Complete output of a successful attack run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Per-URL results, in candidate-list order.
    pub results: IndexMap<String, LinkResult>,
    /// The configuration the scan ran with.
    pub calibration: CalibrationSummary,
}

impl ScanReport {
    /// The URLs classified as visited, in candidate order.
    pub fn visited_urls(&self) -> Vec<&str> {
        self.results
            .values()
            .filter(|r| r.visited)
            .map(|r| r.url.as_str())
            .collect()
    }
}

/// Why a run ended without verdicts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnavailableInfo {
    /// Calibration attempts spent before giving up (0 when the run failed
    /// before calibration started).
    pub attempts: u32,
    /// Human-readable failure detail.
    pub reason: String,
}

/// Terminal state of an attack run.
///
/// Every run resolves to one of these; failures are folded in rather than
/// propagated, so callers always observe a final state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Outcome {
    /// Calibration succeeded and every candidate has a verdict.
    Completed(ScanReport),
    /// The timing side channel could not be established on this host.
    Unavailable(UnavailableInfo),
}

impl Outcome {
    /// Whether the run produced verdicts.
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }

    /// The report, if the run completed.
    pub fn completed(self) -> Option<ScanReport> {
        match self {
            Outcome::Completed(report) => Some(report),
            Outcome::Unavailable(_) => None,
        }
    }
}
