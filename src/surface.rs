//! The hidden rendering surface the probe drives.
//!
//! The surface itself (link elements, styling, layout) is owned by the host
//! page; the core only rewrites its target URL in bulk and layers a
//! blur-plus-opacity filter over it. Both effects are modeled as a trait so
//! the measurement pipeline can run against a simulated page in tests.

/// Failure reported by the host environment while mutating the surface.
///
/// This is the crate's rendering of an unexpected DOM/environment exception:
/// it is caught at the nearest async boundary and folded into the calibration
/// retry logic rather than propagated to the caller raw.
#[derive(Debug, Clone, thiserror::Error)]
#[error("rendering surface failed during {operation}: {message}")]
pub struct SurfaceError {
    /// The surface operation that failed (`"init"`, `"set_target"`, ...).
    pub operation: &'static str,
    /// Host-provided failure detail.
    pub message: String,
}

impl SurfaceError {
    /// Create a new surface error.
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// A collection of host elements whose target URL can be rewritten in bulk.
///
/// Implementations mutate real or simulated page state; the core guarantees
/// single-writer access by strictly serializing every probe (no two probes
/// ever run concurrently), so implementations need no interior locking.
pub trait RenderSurface {
    /// Provision the surface with `target_count` link elements.
    ///
    /// Called once per attack run, before any measurement.
    fn init(&mut self, target_count: usize) -> Result<(), SurfaceError>;

    /// Repoint every element of the surface at `url`.
    fn set_target(&mut self, url: &str) -> Result<(), SurfaceError>;

    /// Apply a layered blur-plus-opacity filter of the given pixel intensity.
    ///
    /// Calibration lowers this progressively while probing for the cheapest
    /// configuration that still detects a known-visited reference.
    fn set_obfuscation(&mut self, intensity: f64) -> Result<(), SurfaceError>;
}
