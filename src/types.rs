//! Core data model: steps, samples, and series.

use crate::error::Error;

/// Timing deltas accumulated across repeated probe runs, in milliseconds.
///
/// Each probe run contributes two deltas, so a series built from `reps`
/// repetitions has length `2 * reps`.
pub type TimeSeries = Vec<f64>;

/// One scheduled action of a probe choreography.
///
/// A step may rewrite the surface's target URL, capture the refresh timestamp
/// at which it executes, both, or neither (an idle tick). When it does both,
/// the timestamp is captured first, so the recorded time marks the frame
/// before the new target takes effect.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedStep {
    target: Option<String>,
    record: bool,
}

impl TimedStep {
    /// Repoint the surface without recording a timestamp.
    pub fn settle(url: &str) -> Self {
        Self {
            target: Some(url.to_owned()),
            record: false,
        }
    }

    /// Record the tick timestamp, then repoint the surface.
    pub fn observe(url: &str) -> Self {
        Self {
            target: Some(url.to_owned()),
            record: true,
        }
    }

    /// Let one full refresh of layout and paint work complete undisturbed.
    pub fn idle() -> Self {
        Self {
            target: None,
            record: false,
        }
    }

    /// Record the tick timestamp without touching the surface.
    pub fn capture() -> Self {
        Self {
            target: None,
            record: true,
        }
    }

    /// Target URL this step assigns, if any.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Whether this step captures its tick timestamp.
    pub fn records(&self) -> bool {
        self.record
    }
}

/// The pair of inter-frame deltas produced by one probe run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Milliseconds from observing the subject URL to settling back: the
    /// rendering cost attributable to the subject.
    pub subject_ms: f64,
    /// Milliseconds from settling back to the final capture tick.
    pub settle_ms: f64,
}

impl Sample {
    /// Fold a run's captured timestamps into its two deltas.
    ///
    /// Only the first three timestamps participate; the baseline choreography
    /// records a fourth, which is deliberately left out of the deltas.
    pub fn from_timestamps(timestamps: &[f64]) -> Result<Self, Error> {
        let (&t0, &t1, &t2) = match timestamps {
            [t0, t1, t2, ..] => (t0, t1, t2),
            _ => return Err(Error::EmptySeries),
        };
        Ok(Self {
            subject_ms: t1 - t0,
            settle_ms: t2 - t1,
        })
    }

    /// The deltas in execution order, ready to append to a [`TimeSeries`].
    pub fn deltas(&self) -> [f64; 2] {
        [self.subject_ms, self.settle_ms]
    }
}
