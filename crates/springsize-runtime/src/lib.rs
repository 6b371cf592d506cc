#![forbid(unsafe_code)]

//! Runtime: drag handling, frame scheduling and the resize engine.
//!
//! # Role in SpringSize
//! `springsize-runtime` turns host events into animated sizes. It owns the
//! mutable state of one resizable region and talks to the outside world
//! only through the traits in [`host`].
//!
//! # Primary responsibilities
//! - **DragController**: pointer-down/move/up state machine producing new
//!   targets through snap and constraints.
//! - **AnimationScheduler**: per-frame spring stepping with start/stop
//!   bookkeeping around a host frame source.
//! - **ResizeEngine**: the public surface combining both, plus observers,
//!   hover state and teardown.
//!
//! # Example
//! ```ignore
//! use springsize_runtime::{ResizeConfig, ResizeEngine, Direction};
//!
//! let mut engine = ResizeEngine::new(ResizeConfig::default(), host)?;
//! engine.subscribe(|dims| println!("{} x {}", dims.width, dims.height));
//! engine.pointer_down(Direction::Se, 1, 0.0, 0.0);
//! engine.pointer_move(50.0, 30.0);
//! engine.pointer_up(1);
//! // host delivers frames via engine.on_frame(token, timestamp_ms)
//! ```

pub mod drag;
pub mod engine;
pub mod error;
pub mod handle;
pub mod host;
pub mod scheduler;

pub use drag::{DragController, DragEffect, DragNoopReason, DragSession, DragState, DragTransition};
pub use engine::{ObserverId, ResizeEngine};
pub use error::{ResizeError, Result};
pub use handle::{HandleRenderer, HandleState, render_handle};
pub use host::{
    CaptureError, FrameHost, FrameToken, Host, ListenerId, PointerCapture, PointerId,
    PointerListeners,
};
pub use scheduler::{AnimationScheduler, FrameOutcome, SchedulerState};

pub use springsize_core::{
    Constraints, Dimensions, Direction, ResizeConfig, SizeBound, SnapConfig, SpringConfig,
    SpringOverride, SpringPreset,
};
