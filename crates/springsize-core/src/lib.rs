#![forbid(unsafe_code)]

//! Core: spring integration, size constraints and snap quantization.
//!
//! # Role in SpringSize
//! `springsize-core` holds the pure, headless pieces of the resize engine.
//! Nothing here knows about pointers, frames or hosts; every function is a
//! deterministic transform over plain data.
//!
//! # Primary responsibilities
//! - **Spring**: semi-implicit Euler integration of one axis toward its
//!   target, named presets and the rest predicate.
//! - **Constraints**: min/max clamping plus aspect-ratio resolution.
//! - **Snap**: point and increment quantization within a threshold.
//! - **Direction**: compass handles and their per-axis sign.
//! - **Config**: the serde-backed configuration document.
//!
//! # How it fits in the system
//! `springsize-runtime` owns the mutable state, the drag state machine and
//! the frame scheduler, and calls into this crate for every numeric step.

pub mod config;
pub mod constraint;
pub mod direction;
pub mod geometry;
pub mod snap;
pub mod spring;

pub use config::{ConfigError, FormatError, ResizeConfig};
pub use constraint::{Constraints, SizeBound, apply_constraints};
pub use direction::{Direction, ParseDirectionError};
pub use geometry::Dimensions;
pub use snap::{DEFAULT_SNAP_THRESHOLD, SnapConfig, snap};
pub use spring::{
    DEFAULT_HEIGHT, DEFAULT_WIDTH, DimensionState, FRAME_DT_MAX_SECS, FRAME_DT_MIN_SECS,
    MAX_FRAME_DELTA_MS, REST_POSITION_THRESHOLD, REST_VELOCITY_THRESHOLD, ResizeState,
    SpringConfig, SpringOverride, SpringPreset, UnknownPreset, frame_dt_seconds,
};
