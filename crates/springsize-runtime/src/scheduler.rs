#![forbid(unsafe_code)]

//! Frame loop driving the spring integration.
//!
//! The scheduler owns at most one outstanding frame request. Each delivered
//! frame advances both axes by a clamped time step, publishes the eased
//! size, and either re-requests or stops once everything has settled.
//!
//! ```text
//! Stopped --start--> Running{token, last: None}
//! Running --frame(token)--> Running{token', last: Some(ts)}   (still moving or dragging)
//! Running --frame(token)--> Stopped                           (at rest and idle)
//! Running --stop--> Stopped                                   (token cancelled)
//! ```
//!
//! The first frame of a run has no previous timestamp and integrates with
//! the minimum step.

use springsize_core::{Dimensions, ResizeState, SpringConfig, frame_dt_seconds};

use crate::host::{FrameHost, FrameToken};

/// Scheduler lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SchedulerState {
    #[default]
    Stopped,
    Running {
        token: FrameToken,
        last_timestamp: Option<f64>,
    },
}

/// What one delivered frame did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutcome {
    /// Integration step actually used, in seconds.
    pub dt: f64,
    /// Value published for this frame.
    pub dimensions: Dimensions,
    /// 1-based index of this frame within the current run.
    pub frame_in_run: u64,
    /// Whether the scheduler stopped after this frame.
    pub stopped: bool,
}

/// Request/cancel bookkeeping around a [`FrameHost`].
#[derive(Debug, Clone, Default)]
pub struct AnimationScheduler {
    state: SchedulerState,
    frames_in_run: u64,
    runs: u64,
}

impl AnimationScheduler {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: SchedulerState::Stopped,
            frames_in_run: 0,
            runs: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> SchedulerState {
        self.state
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, SchedulerState::Running { .. })
    }

    /// Frames delivered in the current (or most recent) run.
    #[must_use]
    pub const fn frames_in_run(&self) -> u64 {
        self.frames_in_run
    }

    /// Number of times the scheduler has gone from stopped to running.
    #[must_use]
    pub const fn runs(&self) -> u64 {
        self.runs
    }

    /// Start the loop if it is not already running.
    ///
    /// Returns `true` when a new frame was requested.
    pub fn start(&mut self, host: &mut impl FrameHost) -> bool {
        if self.is_running() {
            return false;
        }
        let token = host.request_frame();
        self.state = SchedulerState::Running {
            token,
            last_timestamp: None,
        };
        self.frames_in_run = 0;
        self.runs = self.runs.saturating_add(1);
        tracing::debug!(token = token.0, run = self.runs, "animation scheduler started");
        true
    }

    /// Cancel the outstanding request, whatever the rest state.
    ///
    /// Returns `true` when a request was cancelled.
    pub fn stop(&mut self, host: &mut impl FrameHost) -> bool {
        let SchedulerState::Running { token, .. } = self.state else {
            return false;
        };
        host.cancel_frame(token);
        self.state = SchedulerState::Stopped;
        tracing::debug!(
            token = token.0,
            frames = self.frames_in_run,
            "animation scheduler stopped"
        );
        true
    }

    /// Deliver one frame.
    ///
    /// Returns `None` (and leaves every input untouched) when `token` is not
    /// the outstanding request.
    #[allow(clippy::too_many_arguments)]
    pub fn on_frame(
        &mut self,
        token: FrameToken,
        timestamp_ms: f64,
        state: &mut ResizeState,
        spring: SpringConfig,
        dragging: bool,
        host: &mut impl FrameHost,
        publish: impl FnOnce(Dimensions),
    ) -> Option<FrameOutcome> {
        let last_timestamp = match self.state {
            SchedulerState::Running {
                token: expected,
                last_timestamp,
            } if expected == token => last_timestamp,
            SchedulerState::Running {
                token: expected, ..
            } => {
                tracing::warn!(
                    token = token.0,
                    expected = expected.0,
                    "ignoring frame with stale token"
                );
                return None;
            }
            SchedulerState::Stopped => {
                tracing::warn!(token = token.0, "ignoring frame while scheduler is stopped");
                return None;
            }
        };

        let dt = frame_dt_seconds(timestamp_ms - last_timestamp.unwrap_or(timestamp_ms));
        state.step(dt, spring);
        self.frames_in_run = self.frames_in_run.saturating_add(1);

        let (width, height) = state.currents();
        let dimensions = Dimensions::new(width, height, dragging);
        publish(dimensions);

        let stopped = state.is_at_rest() && !dragging;
        if stopped {
            self.state = SchedulerState::Stopped;
            tracing::debug!(frames = self.frames_in_run, "springs at rest; scheduler stopped");
        } else {
            let next = host.request_frame();
            self.state = SchedulerState::Running {
                token: next,
                last_timestamp: Some(timestamp_ms),
            };
        }
        tracing::trace!(
            dt,
            width,
            height,
            dragging,
            frame = self.frames_in_run,
            "frame"
        );

        Some(FrameOutcome {
            dt,
            dimensions,
            frame_in_run: self.frames_in_run,
            stopped,
        })
    }
}
