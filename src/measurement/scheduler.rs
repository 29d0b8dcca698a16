//! FIFO draining of timed steps, one per refresh tick.

use crate::surface::{RenderSurface, SurfaceError};
use crate::types::TimedStep;

use super::clock::FrameClock;

/// Drives an ordered step sequence through a [`FrameClock`].
///
/// Pure FIFO: each step runs exactly once, in order, one per tick, with no
/// priority or interruption mechanism. Control returns to the caller only
/// when the sequence is exhausted.
#[derive(Debug)]
pub struct FrameScheduler<C> {
    clock: C,
}

impl<C: FrameClock> FrameScheduler<C> {
    /// Wrap a clock.
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Execute every step against `surface` and collect the timestamps of
    /// the record-flagged ones, in execution order.
    ///
    /// A step's timestamp is captured before its target assignment, so the
    /// recorded tick marks the frame on which the previous target's rendering
    /// work was still in flight.
    pub async fn drain<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        steps: &[TimedStep],
    ) -> Result<Vec<f64>, SurfaceError> {
        let mut timestamps = Vec::new();
        for step in steps {
            let now = self.clock.next_frame().await;
            if step.records() {
                timestamps.push(now);
            }
            if let Some(url) = step.target() {
                surface.set_target(url)?;
            }
        }
        Ok(timestamps)
    }

    /// Access the underlying clock.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}
