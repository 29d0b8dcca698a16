//! Probe choreography: the fixed step sequences that produce samples.
//!
//! A probe run repoints the hidden surface through a short scripted sequence
//! of frames and captures three (baseline shape: four) tick timestamps along
//! the way. The idle ticks between assignments give the host one full
//! refresh of layout and paint work per URL change; the extra per-frame cost
//! of restyling a visited link is what the timing deltas pick up.

use log::trace;

use crate::config::Config;
use crate::error::Error;
use crate::surface::{RenderSurface, SurfaceError};
use crate::types::{Sample, TimeSeries, TimedStep};

use super::clock::FrameClock;
use super::scheduler::FrameScheduler;

/// Which step sequence a probe run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeVariant<'a> {
    /// Measure the unvisited floor: every assignment targets an address
    /// guaranteed to be absent from the history.
    Baseline,
    /// Probe the known-visited control URL during calibration.
    Reference(&'a str),
    /// Probe an arbitrary candidate URL during the scan.
    Candidate(&'a str),
}

/// The seam between measurement and the decision layers.
///
/// The calibration controller and the link scanner only ever talk to this
/// trait, which keeps both testable against synthetic probes that fabricate
/// series without a clock or surface.
#[allow(async_fn_in_trait)]
pub trait ProbeRunner {
    /// Provision the rendering surface for a run.
    fn provision(&mut self, target_count: usize) -> Result<(), SurfaceError>;

    /// Set the surface's visual-obfuscation intensity.
    fn apply_obfuscation(&mut self, intensity: f64) -> Result<(), SurfaceError>;

    /// Run the variant's choreography `reps` times, strictly sequentially,
    /// and concatenate each run's two deltas into one series.
    async fn collect(&mut self, variant: ProbeVariant<'_>, reps: u32) -> Result<TimeSeries, Error>;
}

/// The production [`ProbeRunner`]: a frame scheduler bound to a surface.
#[derive(Debug)]
pub struct FrameProbe<C, S> {
    scheduler: FrameScheduler<C>,
    surface: S,
    settle_url: String,
    alternate_url: String,
}

impl<C: FrameClock, S: RenderSurface> FrameProbe<C, S> {
    /// Bind a clock and surface, taking the settle addresses from `config`.
    pub fn new(clock: C, surface: S, config: &Config) -> Self {
        Self {
            scheduler: FrameScheduler::new(clock),
            surface,
            settle_url: config.settle_url.clone(),
            alternate_url: config.alternate_settle_url.clone(),
        }
    }

    /// The step sequence for one run of `variant`.
    ///
    /// All three shapes settle on a guaranteed-unvisited address first, then
    /// observe the subject, settle back, and finish with a bare capture tick.
    /// The baseline shape records four timestamps; only the first three feed
    /// the sample.
    pub fn choreography(&self, variant: ProbeVariant<'_>) -> Vec<TimedStep> {
        let settle = self.settle_url.as_str();
        match variant {
            ProbeVariant::Candidate(subject) => vec![
                TimedStep::settle(settle),
                TimedStep::settle(settle),
                TimedStep::observe(subject),
                TimedStep::idle(),
                TimedStep::observe(settle),
                TimedStep::idle(),
                TimedStep::capture(),
            ],
            ProbeVariant::Reference(subject) => vec![
                TimedStep::settle(settle),
                TimedStep::observe(subject),
                TimedStep::idle(),
                TimedStep::observe(settle),
                TimedStep::idle(),
                TimedStep::capture(),
            ],
            ProbeVariant::Baseline => vec![
                TimedStep::settle(settle),
                TimedStep::observe(settle),
                TimedStep::idle(),
                TimedStep::observe(self.alternate_url.as_str()),
                TimedStep::idle(),
                TimedStep::observe(settle),
                TimedStep::idle(),
                TimedStep::capture(),
            ],
        }
    }

    /// Execute one run of `variant` and fold its timestamps into a sample.
    pub async fn run_once(&mut self, variant: ProbeVariant<'_>) -> Result<Sample, Error> {
        let steps = self.choreography(variant);
        let timestamps = self.scheduler.drain(&mut self.surface, &steps).await?;
        Sample::from_timestamps(&timestamps)
    }

    /// Access the bound surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

impl<C: FrameClock, S: RenderSurface> ProbeRunner for FrameProbe<C, S> {
    fn provision(&mut self, target_count: usize) -> Result<(), SurfaceError> {
        self.surface.init(target_count)
    }

    fn apply_obfuscation(&mut self, intensity: f64) -> Result<(), SurfaceError> {
        self.surface.set_obfuscation(intensity)
    }

    async fn collect(&mut self, variant: ProbeVariant<'_>, reps: u32) -> Result<TimeSeries, Error> {
        let mut series = TimeSeries::with_capacity(2 * reps as usize);
        for rep in 0..reps {
            let sample = self.run_once(variant).await?;
            trace!(
                "probe rep {}/{}: subject {:.2} ms, settle {:.2} ms",
                rep + 1,
                reps,
                sample.subject_ms,
                sample.settle_ms
            );
            series.extend(sample.deltas());
        }
        Ok(series)
    }
}
