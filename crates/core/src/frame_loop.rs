//! A cancellable repeating frame task.
//!
//! The host decides when frames happen (`requestAnimationFrame` in a
//! browser, a manual clock in tests and the CLI). [`FrameLoop`] tracks the
//! `Idle -> Running -> Stopped` lifecycle, the id of the pending request,
//! and a [`CancelToken`] that host callbacks check before rescheduling.

use crate::error::WaveError;
use std::cell::Cell;
use std::rc::Rc;

/// Identifier of a pending frame request, as issued by the host.
pub type FrameId = i32;

/// Something that can schedule and cancel frame callbacks.
pub trait FrameHost {
    /// Asks for one callback on the next frame.
    fn request_frame(&mut self) -> Result<FrameId, WaveError>;

    /// Withdraws a pending request. Unknown ids are ignored.
    fn cancel_frame(&mut self, id: FrameId);
}

/// Shared flag set once teardown has happened.
///
/// Cloning shares the flag, so a callback holding a clone sees cancellation
/// made through the loop.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Lifecycle of a frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

/// Drives one repeating frame callback through a [`FrameHost`].
#[derive(Debug)]
pub struct FrameLoop {
    state: LoopState,
    pending: Option<FrameId>,
    token: CancelToken,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            pending: None,
            token: CancelToken::default(),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// The id of the request that has not fired yet, if any.
    pub fn pending(&self) -> Option<FrameId> {
        self.pending
    }

    /// A handle on the loop's cancellation flag.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Moves `Idle -> Running` and requests the first frame.
    ///
    /// Starting a running or stopped loop does nothing.
    pub fn start<H: FrameHost>(&mut self, host: &mut H) -> Result<(), WaveError> {
        if self.state != LoopState::Idle {
            return Ok(());
        }
        self.state = LoopState::Running;
        log::debug!("frame loop started");
        self.schedule(host)
    }

    /// Consumes the pending request when its callback fires.
    ///
    /// Returns whether the frame should be processed; callbacks that race
    /// with teardown get `false`.
    pub fn begin_frame(&mut self) -> bool {
        self.pending = None;
        self.state == LoopState::Running && !self.token.is_cancelled()
    }

    /// Requests the next frame unless the loop has been cancelled.
    pub fn schedule<H: FrameHost>(&mut self, host: &mut H) -> Result<(), WaveError> {
        if self.state != LoopState::Running || self.token.is_cancelled() {
            return Ok(());
        }
        match host.request_frame() {
            Ok(id) => {
                self.pending = Some(id);
                Ok(())
            }
            Err(e) => {
                self.state = LoopState::Stopped;
                Err(e)
            }
        }
    }

    /// Cancels the pending request and stops the loop for good.
    ///
    /// Safe to call any number of times.
    pub fn stop<H: FrameHost>(&mut self, host: &mut H) {
        self.token.cancel();
        if let Some(id) = self.pending.take() {
            host.cancel_frame(id);
        }
        if self.state != LoopState::Stopped {
            log::debug!("frame loop stopped");
        }
        self.state = LoopState::Stopped;
    }
}

/// Test and offline host that hands out sequential ids and records them.
#[derive(Debug, Default)]
pub struct ManualHost {
    next_id: FrameId,
    /// Requests that have been neither fired nor cancelled.
    pub outstanding: Vec<FrameId>,
    /// Every id passed to [`FrameHost::cancel_frame`].
    pub cancelled: Vec<FrameId>,
}

impl ManualHost {
    /// Takes the oldest outstanding request, as if its frame had arrived.
    pub fn fire(&mut self) -> Option<FrameId> {
        if self.outstanding.is_empty() {
            None
        } else {
            Some(self.outstanding.remove(0))
        }
    }
}

impl FrameHost for ManualHost {
    fn request_frame(&mut self) -> Result<FrameId, WaveError> {
        self.next_id += 1;
        self.outstanding.push(self.next_id);
        Ok(self.next_id)
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.outstanding.retain(|&pending| pending != id);
        self.cancelled.push(id);
    }
}
