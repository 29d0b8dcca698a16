//! Error taxonomy for measurement and calibration.

use crate::surface::SurfaceError;

/// Errors produced by the probe pipeline.
///
/// `SearchExhausted` and `SearchFailed` are control signals internal to the
/// calibration descent; they only surface to callers when every retry of the
/// outer calibration loop has been spent, at which point the run reports
/// [`Error::CalibrationUnavailable`] instead.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// A statistical summary was requested of a series with no data.
    ///
    /// Never expected in normal operation: it means a choreography captured
    /// fewer timestamps than its step list guarantees.
    #[error("cannot summarize an empty time series")]
    EmptySeries,

    /// The calibration descent reached a single repetition.
    ///
    /// One repetition is never accepted as reliable, so this level is
    /// refused without being measured.
    #[error("calibration descent reached a single repetition")]
    SearchExhausted,

    /// A calibration level failed to reproduce an elevated signal for the
    /// known-visited reference.
    #[error("known-visited reference is not elevated over a fresh baseline")]
    SearchFailed,

    /// Every calibration attempt failed; the attack cannot run here.
    #[error("calibration failed after {attempts} attempts")]
    CalibrationUnavailable {
        /// Total calibration attempts made, initial try included.
        attempts: u32,
    },

    /// The host environment failed while the surface was being mutated.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}
