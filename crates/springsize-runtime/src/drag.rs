#![forbid(unsafe_code)]

//! Pointer-drag lifecycle for resize handles.
//!
//! ```text
//! Idle --pointer_down--> Dragging --pointer_up--> Idle
//!             Dragging --pointer_down--> Dragging (session replaced)
//!             Dragging --pointer_move--> Dragging (targets updated)
//! ```
//!
//! The controller turns raw pointer coordinates into new *targets* for the
//! two size axes. It never writes `current`, and writes `velocity` only to
//! zero an axis whose target was just snapped, so residual momentum does not
//! fight the snapped position.
//!
//! # Invariants
//!
//! 1. At most one session is active. A pointer-down while dragging replaces
//!    the session (last pointer-down wins); the new baseline is the targets
//!    at that moment.
//! 2. Targets are derived from the session baseline plus the total pointer
//!    delta, never accumulated move by move.
//! 3. Logical state is authoritative: a failed pointer capture or release
//!    changes nothing except the `captured`/`released` diagnostic flag.
//!
//! # Failure Modes
//!
//! - Move and up events while idle are explicit no-ops
//!   ([`DragNoopReason::IdleWithoutActiveDrag`]).
//! - Any pointer-up ends the active session, including one whose pointer id
//!   differs from the session's.

use serde::{Deserialize, Serialize};
use springsize_core::{Constraints, Direction, ResizeState, SnapConfig};

use crate::host::{PointerCapture, PointerId};

/// Baseline recorded at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    pub pointer_id: PointerId,
    pub origin_x: f64,
    pub origin_y: f64,
    /// Width *target* (not the eased value) when the drag began.
    pub start_width: f64,
    /// Height *target* (not the eased value) when the drag began.
    pub start_height: f64,
}

/// Drag lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        direction: Direction,
        session: DragSession,
    },
}

/// Why an event was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragNoopReason {
    IdleWithoutActiveDrag,
}

/// What one lifecycle step did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum DragEffect {
    Started {
        direction: Direction,
        pointer_id: PointerId,
        captured: bool,
    },
    Replaced {
        previous: Direction,
        direction: Direction,
        pointer_id: PointerId,
        captured: bool,
    },
    TargetsUpdated {
        width: f64,
        height: f64,
        snapped_width: bool,
        snapped_height: bool,
    },
    Ended {
        direction: Direction,
        pointer_id: PointerId,
        released: bool,
    },
    Canceled {
        direction: Direction,
    },
    Noop {
        reason: DragNoopReason,
    },
}

/// One state-machine transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragTransition {
    pub transition_id: u64,
    pub from: DragState,
    pub to: DragState,
    pub effect: DragEffect,
}

impl DragTransition {
    /// Whether the frame scheduler should be (re)started after this step.
    #[must_use]
    pub const fn wants_animation(&self) -> bool {
        matches!(
            self.effect,
            DragEffect::Started { .. } | DragEffect::Replaced { .. } | DragEffect::Ended { .. }
        )
    }

    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self.effect, DragEffect::Noop { .. })
    }
}

/// Drag state machine for one resizable region.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DragController {
    state: DragState,
    transition_counter: u64,
}

impl DragController {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DragState::Idle,
            transition_counter: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> DragState {
        self.state
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Direction of the handle being dragged, if any.
    #[must_use]
    pub const fn active_direction(&self) -> Option<Direction> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { direction, .. } => Some(direction),
        }
    }

    /// Whether `direction` is the handle currently being dragged.
    #[must_use]
    pub fn is_active(&self, direction: Direction) -> bool {
        self.active_direction() == Some(direction)
    }

    #[must_use]
    pub const fn session(&self) -> Option<DragSession> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { session, .. } => Some(session),
        }
    }

    /// Begin (or replace) a drag session.
    pub fn pointer_down(
        &mut self,
        direction: Direction,
        pointer_id: PointerId,
        x: f64,
        y: f64,
        state: &ResizeState,
        capture: &mut impl PointerCapture,
    ) -> DragTransition {
        let from = self.state;
        let (start_width, start_height) = state.targets();
        let session = DragSession {
            pointer_id,
            origin_x: x,
            origin_y: y,
            start_width,
            start_height,
        };
        self.state = DragState::Dragging { direction, session };

        let captured = match capture.capture_pointer(pointer_id) {
            Ok(()) => true,
            Err(error) => {
                tracing::debug!(%error, pointer_id, "pointer capture failed; continuing uncaptured");
                false
            }
        };

        let effect = match from {
            DragState::Idle => DragEffect::Started {
                direction,
                pointer_id,
                captured,
            },
            DragState::Dragging {
                direction: previous,
                ..
            } => DragEffect::Replaced {
                previous,
                direction,
                pointer_id,
                captured,
            },
        };
        self.transition(from, effect)
    }

    /// Translate pointer motion into new targets.
    ///
    /// The snap increment (never snap points) is applied per axis before the
    /// constraints.
    pub fn pointer_move(
        &mut self,
        x: f64,
        y: f64,
        state: &mut ResizeState,
        snap: &SnapConfig,
        constraints: &Constraints,
    ) -> DragTransition {
        let from = self.state;
        let DragState::Dragging { direction, session } = self.state else {
            return self.noop(DragNoopReason::IdleWithoutActiveDrag);
        };

        let (dw, dh) = direction.size_delta(x - session.origin_x, y - session.origin_y);
        let mut width = session.start_width + dw;
        let mut height = session.start_height + dh;

        let mut snapped_width = false;
        let mut snapped_height = false;
        if snap.is_active() {
            let w = snap.snap_increment(width);
            if w != width {
                state.width.velocity = 0.0;
                width = w;
                snapped_width = true;
            }
            let h = snap.snap_increment(height);
            if h != height {
                state.height.velocity = 0.0;
                height = h;
                snapped_height = true;
            }
        }

        let (width, height) = constraints.apply(width, height);
        state.width.target = width;
        state.height.target = height;

        self.transition(
            from,
            DragEffect::TargetsUpdated {
                width,
                height,
                snapped_width,
                snapped_height,
            },
        )
    }

    /// End the active session, releasing capture best-effort.
    pub fn pointer_up(
        &mut self,
        pointer_id: PointerId,
        capture: &mut impl PointerCapture,
    ) -> DragTransition {
        let from = self.state;
        let DragState::Dragging { direction, .. } = self.state else {
            return self.noop(DragNoopReason::IdleWithoutActiveDrag);
        };

        self.state = DragState::Idle;
        let released = match capture.release_pointer(pointer_id) {
            Ok(()) => true,
            Err(error) => {
                tracing::debug!(%error, pointer_id, "pointer release failed; ignoring");
                false
            }
        };
        self.transition(
            from,
            DragEffect::Ended {
                direction,
                pointer_id,
                released,
            },
        )
    }

    /// Force the machine back to Idle without touching the host.
    ///
    /// Returns `None` when already idle.
    pub fn cancel(&mut self) -> Option<DragTransition> {
        let from = self.state;
        let DragState::Dragging { direction, .. } = from else {
            return None;
        };
        self.state = DragState::Idle;
        Some(self.transition(from, DragEffect::Canceled { direction }))
    }

    fn noop(&mut self, reason: DragNoopReason) -> DragTransition {
        let from = self.state;
        self.transition(from, DragEffect::Noop { reason })
    }

    fn transition(&mut self, from: DragState, effect: DragEffect) -> DragTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        DragTransition {
            transition_id: self.transition_counter,
            from,
            to: self.state,
            effect,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
