//! The display-refresh clock the whole pipeline suspends on.

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior};

use crate::constants::REFRESH_PERIOD;

/// Source of one callback per display refresh.
///
/// This is the only timing primitive the crate consumes and the only point at
/// which any of its futures suspend. Timestamps are milliseconds on a
/// monotonic clock whose origin is implementation-defined; the pipeline only
/// ever looks at differences between consecutive ticks.
///
/// The crate runs on a single logical thread of control, so implementations
/// and their futures are not required to be `Send`.
#[allow(async_fn_in_trait)]
pub trait FrameClock {
    /// Suspend until the next display refresh and return its timestamp.
    async fn next_frame(&mut self) -> f64;
}

/// A [`FrameClock`] paced by a tokio interval.
///
/// Stands in for the host's refresh callback registration when no real
/// compositor is driving the process. Missed ticks are skipped, the way a
/// display drops frames rather than replaying them.
#[derive(Debug)]
pub struct IntervalClock {
    interval: Interval,
    origin: Instant,
}

impl IntervalClock {
    /// A clock at the default 60 Hz refresh period.
    ///
    /// Must be called within a tokio runtime with time enabled.
    pub fn new() -> Self {
        Self::with_period(REFRESH_PERIOD)
    }

    /// A clock with an explicit refresh period.
    pub fn with_period(period: Duration) -> Self {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            interval,
            origin: Instant::now(),
        }
    }
}

impl Default for IntervalClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for IntervalClock {
    async fn next_frame(&mut self) -> f64 {
        let tick = self.interval.tick().await;
        (tick - self.origin).as_secs_f64() * 1_000.0
    }
}
