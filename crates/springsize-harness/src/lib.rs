#![forbid(unsafe_code)]

//! Test harness for SpringSize.
//!
//! - [`ManualHost`] / [`HostProbe`]: a recording host whose frames are
//!   delivered by hand.
//! - [`drive_frames`] / [`settle`]: frame pumps with a fixed clock.
//! - [`storm`]: seeded pointer storms with JSONL transcripts.

pub mod host;
pub mod storm;

pub use host::{HostLog, HostProbe, ManualHost};
pub use storm::{DragStorm, StormEvent, StormPattern, StormReport, generate_storm, run_storm};

use springsize_core::{Dimensions, ResizeConfig};
use springsize_runtime::{FrameOutcome, Host, ResizeEngine};

/// Default frame spacing, in milliseconds.
pub const FRAME_MS: f64 = 16.0;

/// Upper bound on frames [`settle`] will deliver before giving up.
pub const SETTLE_FRAME_LIMIT: usize = 2_000;

/// Engine with the given configuration on a fresh [`ManualHost`].
///
/// # Panics
///
/// If the configuration is invalid.
#[must_use]
pub fn engine_with(config: ResizeConfig) -> (ResizeEngine<ManualHost>, HostProbe) {
    let (host, probe) = ManualHost::new();
    let engine = match ResizeEngine::new(config, host) {
        Ok(engine) => engine,
        Err(err) => panic!("harness config rejected: {err}"),
    };
    (engine, probe)
}

/// Monotonic clock for delivered frames.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    pub now_ms: f64,
    pub step_ms: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            now_ms: 0.0,
            step_ms: FRAME_MS,
        }
    }
}

impl FrameClock {
    #[must_use]
    pub const fn with_step(step_ms: f64) -> Self {
        Self {
            now_ms: 0.0,
            step_ms,
        }
    }

    fn tick(&mut self) -> f64 {
        let now = self.now_ms;
        self.now_ms += self.step_ms;
        now
    }
}

/// Deliver up to `count` outstanding frames, one at a time.
///
/// Stops early when the host has no pending request.
pub fn drive_frames<H: Host>(
    engine: &mut ResizeEngine<H>,
    probe: &HostProbe,
    clock: &mut FrameClock,
    count: usize,
) -> Vec<FrameOutcome> {
    let mut outcomes = Vec::with_capacity(count);
    for _ in 0..count {
        let Some(token) = probe.take_pending_frame() else {
            break;
        };
        if let Some(outcome) = engine.on_frame(token, clock.tick()) {
            outcomes.push(outcome);
        }
    }
    outcomes
}

/// Deliver frames until the engine stops requesting them.
///
/// Returns the published dimensions in order.
///
/// # Panics
///
/// If the engine is still animating after [`SETTLE_FRAME_LIMIT`] frames.
pub fn settle<H: Host>(
    engine: &mut ResizeEngine<H>,
    probe: &HostProbe,
    clock: &mut FrameClock,
) -> Vec<Dimensions> {
    let outcomes = drive_frames(engine, probe, clock, SETTLE_FRAME_LIMIT);
    assert!(
        !engine.is_animating(),
        "engine still animating after {SETTLE_FRAME_LIMIT} frames"
    );
    outcomes.into_iter().map(|o| o.dimensions).collect()
}
