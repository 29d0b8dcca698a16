//! Measurement infrastructure: the frame clock, the step scheduler, and the
//! probe choreography that turns scheduled frames into timing samples.
//!
//! Everything here is single-writer by construction: probes are strictly
//! serialized, and the only suspension point in the crate is
//! [`FrameClock::next_frame`].

mod clock;
mod probe;
mod scheduler;

pub use clock::{FrameClock, IntervalClock};
pub use probe::{FrameProbe, ProbeRunner, ProbeVariant};
pub use scheduler::FrameScheduler;
