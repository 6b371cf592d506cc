#![forbid(unsafe_code)]

//! Boundary traits for the host environment.
//!
//! The engine never talks to a windowing system directly. Everything it
//! needs from the outside world goes through three small capabilities:
//!
//! - [`FrameHost`]: per-frame callback registration (`request` / `cancel`).
//! - [`PointerCapture`]: exclusive delivery of a pointer's move/up events.
//!   Failures are expected and non-fatal.
//! - [`PointerListeners`]: the global pointer-move subscription the engine
//!   holds for its whole lifetime.
//!
//! A host implementing all three is a [`Host`].
//!
//! # Frame delivery contract
//!
//! After `request_frame` returns a token, the host calls
//! `ResizeEngine::on_frame(token, timestamp_ms)` once, on the same thread,
//! between input events. Timestamps are milliseconds from any monotonic
//! origin. A cancelled token must not be delivered; if it is, the engine
//! ignores it.

use thiserror::Error;

/// Host pointer identifier.
pub type PointerId = u32;

/// Handle for one outstanding frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameToken(pub u64);

/// Handle for one registered pointer-move listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Reasons a host may refuse a capture or release call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("pointer {0} is not active")]
    InactivePointer(PointerId),
    #[error("pointer {0} is already captured by another target")]
    AlreadyCaptured(PointerId),
    #[error("pointer {0} is not captured")]
    NotCaptured(PointerId),
    #[error("host rejected pointer capture: {0}")]
    Rejected(String),
}

/// Per-frame scheduling primitive.
pub trait FrameHost {
    /// Register for the next frame.
    fn request_frame(&mut self) -> FrameToken;

    /// Withdraw a registration. Cancelling an already-delivered token is a
    /// no-op.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Pointer capture primitives.
pub trait PointerCapture {
    fn capture_pointer(&mut self, pointer_id: PointerId) -> Result<(), CaptureError>;

    fn release_pointer(&mut self, pointer_id: PointerId) -> Result<(), CaptureError>;
}

/// Global pointer-move subscription.
pub trait PointerListeners {
    fn listen_pointer_moves(&mut self) -> ListenerId;

    fn unlisten_pointer_moves(&mut self, id: ListenerId);
}

/// Everything the engine needs from its environment.
pub trait Host: FrameHost + PointerCapture + PointerListeners {}

impl<T: FrameHost + PointerCapture + PointerListeners> Host for T {}
