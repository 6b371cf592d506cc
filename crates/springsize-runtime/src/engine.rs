#![forbid(unsafe_code)]

//! The resize engine: one resizable region bound to one host.
//!
//! [`ResizeEngine`] owns the physical state, the drag state machine, the
//! frame scheduler and the resolved configuration. Hosts feed it pointer
//! events and frame callbacks; observers receive [`Dimensions`] once on
//! subscription and then once per animated frame.
//!
//! # Lifecycle
//!
//! Construction validates the configuration, registers the global
//! pointer-move listener and starts the scheduler for the first frame.
//! [`ResizeEngine::shutdown`] (or dropping the engine) cancels any pending
//! frame, releases an active pointer capture and unregisters the listener.
//!
//! # Scheduler restarts
//!
//! The frame loop is (re)started by pointer-down, pointer-up, a spring
//! change, [`ResizeEngine::set_target_size`] and construction. It stops
//! itself once both axes are at rest and no drag is active.

use std::fmt;

use springsize_core::{
    Constraints, Dimensions, Direction, ResizeConfig, ResizeState, SnapConfig, SpringConfig,
    SpringOverride, SpringPreset,
};

use crate::drag::{DragController, DragState, DragTransition};
use crate::error::{ResizeError, Result};
use crate::handle::HandleState;
use crate::host::{FrameToken, Host, ListenerId, PointerId};
use crate::scheduler::{AnimationScheduler, FrameOutcome, SchedulerState};

/// Handle returned by [`ResizeEngine::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn FnMut(Dimensions)>;

/// Spring-driven resize engine for one region.
pub struct ResizeEngine<H: Host> {
    host: H,
    state: ResizeState,
    drag: DragController,
    scheduler: AnimationScheduler,
    preset: SpringPreset,
    spring_override: SpringOverride,
    spring: SpringConfig,
    constraints: Constraints,
    snap: SnapConfig,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
    /// Last entered handle. A second enter without a leave replaces it.
    hovered: Option<Direction>,
    listener: Option<ListenerId>,
}

impl<H: Host> ResizeEngine<H> {
    /// Build an engine and start its first frame.
    ///
    /// # Errors
    ///
    /// [`ResizeError::InvalidConfig`] listing every violation found by
    /// [`ResizeConfig::validate`].
    pub fn new(config: ResizeConfig, mut host: H) -> Result<Self> {
        let violations = config.validate();
        if !violations.is_empty() {
            return Err(ResizeError::InvalidConfig(violations));
        }

        let spring = config.resolved_spring();
        let listener = host.listen_pointer_moves();
        let mut engine = Self {
            host,
            state: ResizeState::new(config.initial_width, config.initial_height),
            drag: DragController::new(),
            scheduler: AnimationScheduler::new(),
            preset: config.preset,
            spring_override: config.spring,
            spring,
            constraints: config.constraints,
            snap: config.snap,
            observers: Vec::new(),
            next_observer: 0,
            hovered: None,
            listener: Some(listener),
        };
        tracing::debug!(
            width = config.initial_width,
            height = config.initial_height,
            preset = %config.preset,
            listener = listener.0,
            "resize engine created"
        );
        engine.scheduler.start(&mut engine.host);
        Ok(engine)
    }

    /// Load a TOML configuration file and build an engine from it.
    ///
    /// # Errors
    ///
    /// [`ResizeError::Config`] when the file cannot be read, parsed or
    /// validated.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<std::path::Path>, host: H) -> Result<Self> {
        let config = ResizeConfig::from_toml_file(path)?;
        Self::new(config, host)
    }

    // -----------------------------------------------------------------------
    // Observers
    // -----------------------------------------------------------------------

    /// Register a change observer.
    ///
    /// The observer is called immediately with the current dimensions, then
    /// once per animated frame.
    pub fn subscribe(&mut self, observer: impl FnMut(Dimensions) + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        let mut observer: Observer = Box::new(observer);
        observer(self.dimensions());
        self.observers.push((id, observer));
        id
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(other, _)| *other != id);
        self.observers.len() != before
    }

    // -----------------------------------------------------------------------
    // Pointer input
    // -----------------------------------------------------------------------

    pub fn pointer_down(
        &mut self,
        direction: Direction,
        pointer_id: PointerId,
        x: f64,
        y: f64,
    ) -> DragTransition {
        let transition =
            self.drag
                .pointer_down(direction, pointer_id, x, y, &self.state, &mut self.host);
        self.after_transition(&transition);
        transition
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> DragTransition {
        let transition =
            self.drag
                .pointer_move(x, y, &mut self.state, &self.snap, &self.constraints);
        if !transition.is_noop() {
            tracing::trace!(effect = ?transition.effect, "drag move");
        }
        transition
    }

    pub fn pointer_up(&mut self, pointer_id: PointerId) -> DragTransition {
        let transition = self.drag.pointer_up(pointer_id, &mut self.host);
        self.after_transition(&transition);
        transition
    }

    /// Mark `direction` as hovered.
    pub fn pointer_enter(&mut self, direction: Direction) {
        self.hovered = Some(direction);
    }

    /// Clear the hover mark if it belongs to `direction`.
    pub fn pointer_leave(&mut self, direction: Direction) {
        if self.hovered == Some(direction) {
            self.hovered = None;
        }
    }

    fn after_transition(&mut self, transition: &DragTransition) {
        if transition.is_noop() {
            return;
        }
        tracing::debug!(
            id = transition.transition_id,
            effect = ?transition.effect,
            "drag transition"
        );
        if transition.wants_animation() {
            self.scheduler.start(&mut self.host);
        }
    }

    // -----------------------------------------------------------------------
    // Frames
    // -----------------------------------------------------------------------

    /// Deliver a frame previously requested from the host.
    ///
    /// Returns `None` when `token` is stale; nothing is stepped or published.
    pub fn on_frame(&mut self, token: FrameToken, timestamp_ms: f64) -> Option<FrameOutcome> {
        let dragging = self.drag.is_dragging();
        let observers = &mut self.observers;
        self.scheduler.on_frame(
            token,
            timestamp_ms,
            &mut self.state,
            self.spring,
            dragging,
            &mut self.host,
            |dimensions| notify(observers, dimensions),
        )
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Swap the spring parameters.
    ///
    /// The loop is restarted only when the resolved [`SpringConfig`] differs
    /// from the one in effect.
    pub fn set_spring(&mut self, preset: SpringPreset, overrides: SpringOverride) {
        self.preset = preset;
        self.spring_override = overrides;
        let spring = preset.resolve(&overrides);
        if spring == self.spring {
            return;
        }
        self.spring = spring;
        tracing::debug!(
            %preset,
            tension = self.spring.tension,
            friction = self.spring.friction,
            mass = self.spring.mass,
            "spring changed"
        );
        self.scheduler.start(&mut self.host);
    }

    /// Replace the constraints used by subsequent drags and target writes.
    ///
    /// # Errors
    ///
    /// [`ResizeError::InvalidConfig`] if the constraints are inconsistent;
    /// the previous constraints stay in effect.
    pub fn set_constraints(&mut self, constraints: Constraints) -> Result<()> {
        let violations = constraints.validate();
        if !violations.is_empty() {
            return Err(ResizeError::InvalidConfig(violations));
        }
        self.constraints = constraints;
        Ok(())
    }

    /// Replace the snap configuration used by subsequent drags.
    ///
    /// # Errors
    ///
    /// [`ResizeError::InvalidConfig`] if the snap configuration is invalid;
    /// the previous configuration stays in effect.
    pub fn set_snap(&mut self, snap: SnapConfig) -> Result<()> {
        let violations = snap.validate();
        if !violations.is_empty() {
            return Err(ResizeError::InvalidConfig(violations));
        }
        self.snap = snap;
        Ok(())
    }

    /// Animate toward a new size, constrained like a drag target.
    pub fn set_target_size(&mut self, width: f64, height: f64) {
        let (width, height) = self.constraints.apply(width, height);
        self.state.width.target = width;
        self.state.height.target = height;
        tracing::debug!(width, height, "target set");
        self.scheduler.start(&mut self.host);
    }

    /// Move to a size immediately, without animation.
    ///
    /// Observers are notified once with the new size.
    pub fn jump_to(&mut self, width: f64, height: f64) {
        let (width, height) = self.constraints.apply(width, height);
        self.state = ResizeState::new(width, height);
        tracing::debug!(width, height, "jumped");
        let dimensions = self.dimensions();
        notify(&mut self.observers, dimensions);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Current eased size plus drag status.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        let (width, height) = self.state.currents();
        Dimensions::new(width, height, self.drag.is_dragging())
    }

    #[must_use]
    pub const fn state(&self) -> &ResizeState {
        &self.state
    }

    #[must_use]
    pub const fn spring(&self) -> SpringConfig {
        self.spring
    }

    #[must_use]
    pub const fn preset(&self) -> SpringPreset {
        self.preset
    }

    #[must_use]
    pub const fn spring_override(&self) -> SpringOverride {
        self.spring_override
    }

    #[must_use]
    pub const fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    #[must_use]
    pub const fn snap(&self) -> &SnapConfig {
        &self.snap
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    #[must_use]
    pub const fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Whether a frame request is outstanding.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.scheduler.is_running()
    }

    #[must_use]
    pub const fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    #[must_use]
    pub const fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    /// Whether `direction` is the handle being dragged.
    #[must_use]
    pub fn is_active_handle(&self, direction: Direction) -> bool {
        self.drag.is_active(direction)
    }

    #[must_use]
    pub fn handle_state(&self, direction: Direction) -> HandleState {
        HandleState {
            direction,
            active: self.hovered == Some(direction) || self.drag.is_active(direction),
            dragging: self.drag.is_active(direction),
        }
    }

    #[must_use]
    pub const fn hovered(&self) -> Option<Direction> {
        self.hovered
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    // -----------------------------------------------------------------------
    // Teardown
    // -----------------------------------------------------------------------

    /// Release every host resource and drop the engine.
    pub fn shutdown(mut self) {
        self.release_host_resources();
    }

    fn release_host_resources(&mut self) {
        if let Some(session) = self.drag.session() {
            self.drag.cancel();
            if let Err(error) = self.host.release_pointer(session.pointer_id) {
                tracing::debug!(%error, pointer_id = session.pointer_id, "release on teardown failed");
            }
        }
        self.scheduler.stop(&mut self.host);
        if let Some(listener) = self.listener.take() {
            self.host.unlisten_pointer_moves(listener);
            tracing::debug!(listener = listener.0, "resize engine released host resources");
        }
    }
}

impl<H: Host> Drop for ResizeEngine<H> {
    fn drop(&mut self) {
        self.release_host_resources();
    }
}

impl<H: Host> fmt::Debug for ResizeEngine<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeEngine")
            .field("state", &self.state)
            .field("drag", &self.drag.state())
            .field("scheduler", &self.scheduler.state())
            .field("preset", &self.preset)
            .field("spring", &self.spring)
            .field("constraints", &self.constraints)
            .field("snap", &self.snap)
            .field("observers", &self.observers.len())
            .field("hovered", &self.hovered)
            .field("listener", &self.listener)
            .finish_non_exhaustive()
    }
}

fn notify(observers: &mut [(ObserverId, Observer)], dimensions: Dimensions) {
    for (_, observer) in observers.iter_mut() {
        observer(dimensions);
    }
}
