//! A simulated page for driving the probe without a browser.
//!
//! The pipeline's verdicts depend on one physical effect: frames rendered
//! while the surface points at a visited URL take measurably longer.
//! [`SimulatedPage`] reproduces exactly that — a shared page state handing
//! out a [`FrameClock`] whose ticks advance by a base frame period plus a
//! penalty whenever the current target is in the simulated history, with
//! optional seeded jitter for noisy-host scenarios.
//!
//! # Example
//!
//! ```ignore
//! use history_oracle::helpers::SimulatedPage;
//! use history_oracle::{FrameProbe, HistoryOracle};
//!
//! let page = SimulatedPage::new();
//! page.mark_visited("https://example.com/me");
//!
//! let oracle = HistoryOracle::new();
//! let mut probe = FrameProbe::new(page.clock(), page.surface(), oracle.config());
//! ```

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::measurement::FrameClock;
use crate::surface::{RenderSurface, SurfaceError};

/// Default simulated frame period (60 Hz), in milliseconds.
const SIM_FRAME_MS: f64 = 16.7;

/// Default extra per-frame cost of rendering a visited target.
const SIM_VISITED_PENALTY_MS: f64 = 6.0;

struct PageState {
    now_ms: f64,
    frame_ms: f64,
    visited_penalty_ms: f64,
    jitter_ms: f64,
    rng: StdRng,
    visited: HashSet<String>,
    current_target: Option<String>,
    obfuscation: f64,
    provisioned_targets: usize,
}

/// Deterministic in-process stand-in for the host page.
///
/// Cheap to clone handles: [`clock`](Self::clock) and
/// [`surface`](Self::surface) share this page's state, the way a real clock
/// and surface share a rendering pipeline.
pub struct SimulatedPage {
    state: Rc<RefCell<PageState>>,
}

impl SimulatedPage {
    /// A page with a 60 Hz frame period, a 6 ms visited penalty, and no
    /// jitter.
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    /// A page whose jitter stream is seeded explicitly.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: Rc::new(RefCell::new(PageState {
                now_ms: 0.0,
                frame_ms: SIM_FRAME_MS,
                visited_penalty_ms: SIM_VISITED_PENALTY_MS,
                jitter_ms: 0.0,
                rng: StdRng::seed_from_u64(seed),
                visited: HashSet::new(),
                current_target: None,
                obfuscation: 0.0,
                provisioned_targets: 0,
            })),
        }
    }

    /// Set the base frame period.
    pub fn frame_ms(self, ms: f64) -> Self {
        self.state.borrow_mut().frame_ms = ms;
        self
    }

    /// Set the extra per-frame cost of a visited target.
    pub fn visited_penalty_ms(self, ms: f64) -> Self {
        self.state.borrow_mut().visited_penalty_ms = ms;
        self
    }

    /// Add uniform noise of up to `ms` (either direction) per frame.
    pub fn jitter_ms(self, ms: f64) -> Self {
        self.state.borrow_mut().jitter_ms = ms;
        self
    }

    /// Put a URL into the simulated history.
    pub fn mark_visited(&self, url: &str) {
        self.state.borrow_mut().visited.insert(url.to_owned());
    }

    /// A [`FrameClock`] driven by this page's rendering cost model.
    pub fn clock(&self) -> SimulatedClock {
        SimulatedClock {
            state: Rc::clone(&self.state),
        }
    }

    /// A [`RenderSurface`] backed by this page.
    pub fn surface(&self) -> SimulatedSurface {
        SimulatedSurface {
            state: Rc::clone(&self.state),
        }
    }

    /// The currently applied obfuscation intensity.
    pub fn obfuscation(&self) -> f64 {
        self.state.borrow().obfuscation
    }

    /// How many link elements the last `init` provisioned.
    pub fn provisioned_targets(&self) -> usize {
        self.state.borrow().provisioned_targets
    }
}

impl Default for SimulatedPage {
    fn default() -> Self {
        Self::new()
    }
}

/// Clock half of a [`SimulatedPage`].
pub struct SimulatedClock {
    state: Rc<RefCell<PageState>>,
}

impl FrameClock for SimulatedClock {
    async fn next_frame(&mut self) -> f64 {
        let mut state = self.state.borrow_mut();

        let mut cost = state.frame_ms;
        let targeting_visited = state
            .current_target
            .as_deref()
            .is_some_and(|url| state.visited.contains(url));
        if targeting_visited {
            cost += state.visited_penalty_ms;
        }
        let jitter = state.jitter_ms;
        if jitter > 0.0 {
            cost += state.rng.random_range(-jitter..=jitter);
        }

        state.now_ms += cost;
        state.now_ms
    }
}

/// Surface half of a [`SimulatedPage`].
pub struct SimulatedSurface {
    state: Rc<RefCell<PageState>>,
}

impl RenderSurface for SimulatedSurface {
    fn init(&mut self, target_count: usize) -> Result<(), SurfaceError> {
        self.state.borrow_mut().provisioned_targets = target_count;
        Ok(())
    }

    fn set_target(&mut self, url: &str) -> Result<(), SurfaceError> {
        self.state.borrow_mut().current_target = Some(url.to_owned());
        Ok(())
    }

    fn set_obfuscation(&mut self, intensity: f64) -> Result<(), SurfaceError> {
        if !intensity.is_finite() || intensity < 0.0 {
            return Err(SurfaceError::new(
                "set_obfuscation",
                format!("invalid filter intensity {intensity}"),
            ));
        }
        self.state.borrow_mut().obfuscation = intensity;
        Ok(())
    }
}
