#![forbid(unsafe_code)]

//! A recording [`Host`](springsize_runtime::Host) for tests.
//!
//! [`ManualHost`] is moved into the engine; its [`HostProbe`] stays with the
//! test. Both share one [`HostLog`], so the test can see every request the
//! engine made and deliver frames by hand.

use std::cell::{Ref, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use springsize_runtime::{
    CaptureError, FrameHost, FrameToken, ListenerId, PointerCapture, PointerId, PointerListeners,
};

/// Everything the engine asked the host to do.
#[derive(Debug, Default, Clone)]
pub struct HostLog {
    next_token: u64,
    next_listener: u64,
    /// Requested frames not yet taken or cancelled, oldest first.
    pub pending: VecDeque<FrameToken>,
    /// Every frame ever requested.
    pub frame_requests: Vec<FrameToken>,
    pub cancellations: Vec<FrameToken>,
    pub captured: Vec<PointerId>,
    pub released: Vec<PointerId>,
    pub active_listeners: Vec<ListenerId>,
    pub removed_listeners: Vec<ListenerId>,
    /// Capture calls refused because `reject_capture` was set.
    pub rejected_captures: usize,
    pub reject_capture: bool,
    pub reject_release: bool,
}

/// Host handed to the engine.
#[derive(Debug, Default, Clone)]
pub struct ManualHost {
    log: Rc<RefCell<HostLog>>,
}

/// Test-side view of a [`ManualHost`].
#[derive(Debug, Clone)]
pub struct HostProbe {
    log: Rc<RefCell<HostLog>>,
}

impl ManualHost {
    /// A host plus the probe observing it.
    #[must_use]
    pub fn new() -> (Self, HostProbe) {
        let host = Self::default();
        let probe = HostProbe {
            log: Rc::clone(&host.log),
        };
        (host, probe)
    }
}

impl FrameHost for ManualHost {
    fn request_frame(&mut self) -> FrameToken {
        let mut log = self.log.borrow_mut();
        log.next_token += 1;
        let token = FrameToken(log.next_token);
        log.pending.push_back(token);
        log.frame_requests.push(token);
        tracing::trace!(token = token.0, "frame requested");
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        let mut log = self.log.borrow_mut();
        log.pending.retain(|t| *t != token);
        log.cancellations.push(token);
    }
}

impl PointerCapture for ManualHost {
    fn capture_pointer(&mut self, pointer_id: PointerId) -> Result<(), CaptureError> {
        let mut log = self.log.borrow_mut();
        if log.reject_capture {
            log.rejected_captures += 1;
            return Err(CaptureError::Rejected(format!(
                "manual host refuses pointer {pointer_id}"
            )));
        }
        log.captured.push(pointer_id);
        Ok(())
    }

    fn release_pointer(&mut self, pointer_id: PointerId) -> Result<(), CaptureError> {
        let mut log = self.log.borrow_mut();
        if log.reject_release {
            return Err(CaptureError::NotCaptured(pointer_id));
        }
        log.released.push(pointer_id);
        Ok(())
    }
}

impl PointerListeners for ManualHost {
    fn listen_pointer_moves(&mut self) -> ListenerId {
        let mut log = self.log.borrow_mut();
        log.next_listener += 1;
        let id = ListenerId(log.next_listener);
        log.active_listeners.push(id);
        id
    }

    fn unlisten_pointer_moves(&mut self, id: ListenerId) {
        let mut log = self.log.borrow_mut();
        log.active_listeners.retain(|l| *l != id);
        log.removed_listeners.push(id);
    }
}

impl HostProbe {
    /// Borrow the full log.
    ///
    /// # Panics
    ///
    /// If the engine is mid-call into the host, which cannot happen from a
    /// single-threaded test between engine calls.
    #[must_use]
    pub fn log(&self) -> Ref<'_, HostLog> {
        self.log.borrow()
    }

    /// Pop the oldest outstanding frame request.
    pub fn take_pending_frame(&self) -> Option<FrameToken> {
        self.log.borrow_mut().pending.pop_front()
    }

    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.log.borrow().pending.len()
    }

    #[must_use]
    pub fn frame_requests(&self) -> usize {
        self.log.borrow().frame_requests.len()
    }

    #[must_use]
    pub fn cancellations(&self) -> Vec<FrameToken> {
        self.log.borrow().cancellations.clone()
    }

    #[must_use]
    pub fn captured(&self) -> Vec<PointerId> {
        self.log.borrow().captured.clone()
    }

    #[must_use]
    pub fn released(&self) -> Vec<PointerId> {
        self.log.borrow().released.clone()
    }

    #[must_use]
    pub fn active_listeners(&self) -> Vec<ListenerId> {
        self.log.borrow().active_listeners.clone()
    }

    /// Make subsequent capture calls fail.
    pub fn reject_capture(&self, reject: bool) {
        self.log.borrow_mut().reject_capture = reject;
    }

    /// Make subsequent release calls fail.
    pub fn reject_release(&self, reject: bool) {
        self.log.borrow_mut().reject_release = reject;
    }
}
