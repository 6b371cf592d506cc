#![forbid(unsafe_code)]

//! Damped harmonic oscillator integration for one size axis.
//!
//! Each axis (width, height) carries a [`DimensionState`] that eases its
//! `current` value toward `target` using the classical damped spring:
//!
//!   a = (-tension × (current - target) - friction × velocity) / mass
//!
//! # Integration
//!
//! [`step`] performs one semi-implicit Euler step: velocity is updated from
//! the acceleration first, then position is updated from the *new* velocity.
//! The caller owns the time step and must clamp it with
//! [`frame_dt_seconds`] (or an equivalent clamp to
//! `[FRAME_DT_MIN_SECS, FRAME_DT_MAX_SECS]`) before integrating.
//!
//! # Invariants
//!
//! 1. `step` only writes `current` and `velocity`; `target` is never touched.
//! 2. For the three [`SpringPreset`]s and `dt <= FRAME_DT_MAX_SECS`, repeated
//!    stepping converges to the target.
//! 3. [`SpringPreset::resolve`] merges field by field; an override always wins.
//!
//! # Failure Modes
//!
//! - Arbitrary user-supplied `(tension, friction, mass)` are not validated.
//!   Very stiff springs, negative friction or a zero mass can diverge or
//!   produce non-finite values. Picking stable parameters is the caller's
//!   responsibility.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lower bound for one integration step, in seconds.
pub const FRAME_DT_MIN_SECS: f64 = 0.001;

/// Upper bound for one integration step, in seconds (~30fps).
pub const FRAME_DT_MAX_SECS: f64 = 0.033;

/// Raw frame deltas above this many milliseconds are treated as a pause.
pub const MAX_FRAME_DELTA_MS: f64 = 100.0;

/// Position delta below which an axis counts as settled.
pub const REST_POSITION_THRESHOLD: f64 = 0.1;

/// Velocity below which an axis counts as settled.
pub const REST_VELOCITY_THRESHOLD: f64 = 0.05;

/// Default size when none is configured.
pub const DEFAULT_WIDTH: f64 = 320.0;

/// Default size when none is configured.
pub const DEFAULT_HEIGHT: f64 = 200.0;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Physical state of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionState {
    /// Eased, displayed value.
    pub current: f64,
    /// Rate of change of `current`, in units per second.
    pub velocity: f64,
    /// Desired resting value.
    pub target: f64,
}

impl DimensionState {
    /// An axis resting at `value`.
    #[must_use]
    pub const fn at(value: f64) -> Self {
        Self {
            current: value,
            velocity: 0.0,
            target: value,
        }
    }

    /// Signed distance from `target`.
    #[inline]
    #[must_use]
    pub fn displacement(&self) -> f64 {
        self.current - self.target
    }

    /// Whether this axis is within the rest tolerances.
    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.displacement().abs() < REST_POSITION_THRESHOLD
            && self.velocity.abs() < REST_VELOCITY_THRESHOLD
    }
}

/// Full physical state of one resizable region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeState {
    pub width: DimensionState,
    pub height: DimensionState,
}

impl ResizeState {
    /// Both axes resting at the given size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width: DimensionState::at(width),
            height: DimensionState::at(height),
        }
    }

    /// Both axes settled simultaneously.
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.width.is_at_rest() && self.height.is_at_rest()
    }

    /// Current `(width, height)` targets.
    #[must_use]
    pub fn targets(&self) -> (f64, f64) {
        (self.width.target, self.height.target)
    }

    /// Current eased `(width, height)`.
    #[must_use]
    pub fn currents(&self) -> (f64, f64) {
        (self.width.current, self.height.current)
    }

    /// Advance both axes by one step with the same spring.
    pub fn step(&mut self, dt: f64, spring: SpringConfig) {
        spring.step(&mut self.width, dt);
        spring.step(&mut self.height, dt);
    }
}

impl Default for ResizeState {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

// ---------------------------------------------------------------------------
// Integration
// ---------------------------------------------------------------------------

/// One semi-implicit Euler step of `dt` seconds.
///
/// `k` is the tension, `c` the friction and `m` the mass.
pub fn step(state: &mut DimensionState, dt: f64, k: f64, c: f64, m: f64) {
    let displacement = state.current - state.target;
    let acceleration = (-k * displacement - c * state.velocity) / m;
    state.velocity += acceleration * dt;
    state.current += state.velocity * dt;
}

/// Convert a raw frame delta in milliseconds into a safe integration step.
///
/// The delta is first capped at [`MAX_FRAME_DELTA_MS`] so long pauses do not
/// produce a huge jump, then converted to seconds and clamped to
/// `[FRAME_DT_MIN_SECS, FRAME_DT_MAX_SECS]`. Negative or NaN deltas map to
/// the minimum step.
#[must_use]
pub fn frame_dt_seconds(raw_ms: f64) -> f64 {
    let ms = raw_ms.min(MAX_FRAME_DELTA_MS);
    let secs = ms / 1000.0;
    if secs.is_nan() {
        return FRAME_DT_MIN_SECS;
    }
    secs.clamp(FRAME_DT_MIN_SECS, FRAME_DT_MAX_SECS)
}

// ---------------------------------------------------------------------------
// Spring parameters
// ---------------------------------------------------------------------------

/// Resolved oscillator parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    /// Stiffness `k`.
    pub tension: f64,
    /// Damping `c`.
    pub friction: f64,
    /// Inertia `m`.
    pub mass: f64,
}

impl SpringConfig {
    #[must_use]
    pub const fn new(tension: f64, friction: f64, mass: f64) -> Self {
        Self {
            tension,
            friction,
            mass,
        }
    }

    /// Step one axis with these parameters.
    #[inline]
    pub fn step(&self, state: &mut DimensionState, dt: f64) {
        step(state, dt, self.tension, self.friction, self.mass);
    }

    /// Friction at which this spring stops oscillating: `2 * sqrt(k * m)`.
    #[must_use]
    pub fn critical_friction(&self) -> f64 {
        2.0 * (self.tension * self.mass).sqrt()
    }

    /// Whether the spring overshoots its target before settling.
    #[must_use]
    pub fn is_underdamped(&self) -> bool {
        self.friction < self.critical_friction()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        SpringPreset::default().config()
    }
}

/// Partial spring parameters layered over a preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringOverride {
    pub tension: Option<f64>,
    pub friction: Option<f64>,
    pub mass: Option<f64>,
}

impl SpringOverride {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            tension: None,
            friction: None,
            mass: None,
        }
    }

    #[must_use]
    pub const fn with_tension(mut self, tension: f64) -> Self {
        self.tension = Some(tension);
        self
    }

    #[must_use]
    pub const fn with_friction(mut self, friction: f64) -> Self {
        self.friction = Some(friction);
        self
    }

    #[must_use]
    pub const fn with_mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    /// Merge over `base`: every field present here replaces the base field.
    #[must_use]
    pub fn merge_over(&self, base: SpringConfig) -> SpringConfig {
        SpringConfig {
            tension: self.tension.unwrap_or(base.tension),
            friction: self.friction.unwrap_or(base.friction),
            mass: self.mass.unwrap_or(base.mass),
        }
    }
}

/// Named parameter triples tuned for different feels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpringPreset {
    /// Soft and slow: tension 220, friction 30.
    Gentle,
    /// Balanced default: tension 320, friction 26.
    #[default]
    Professional,
    /// Quick response: tension 460, friction 30.
    Snappy,
}

impl SpringPreset {
    pub const ALL: [Self; 3] = [Self::Gentle, Self::Professional, Self::Snappy];

    /// The fixed parameter triple for this preset.
    #[must_use]
    pub const fn config(self) -> SpringConfig {
        match self {
            Self::Gentle => SpringConfig::new(220.0, 30.0, 1.0),
            Self::Professional => SpringConfig::new(320.0, 26.0, 1.0),
            Self::Snappy => SpringConfig::new(460.0, 30.0, 1.0),
        }
    }

    /// Preset defaults with `overrides` applied field by field.
    #[must_use]
    pub fn resolve(self, overrides: &SpringOverride) -> SpringConfig {
        overrides.merge_over(self.config())
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gentle => "gentle",
            Self::Professional => "professional",
            Self::Snappy => "snappy",
        }
    }
}

impl fmt::Display for SpringPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown preset name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPreset(pub String);

impl fmt::Display for UnknownPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown spring preset {:?} (expected gentle, professional or snappy)",
            self.0
        )
    }
}

impl std::error::Error for UnknownPreset {}

impl FromStr for SpringPreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gentle" => Ok(Self::Gentle),
            "professional" => Ok(Self::Professional),
            "snappy" => Ok(Self::Snappy),
            other => Err(UnknownPreset(other.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
