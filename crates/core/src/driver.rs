//! Connects a [`WaveField`] to a frame host and a drawing surface.
//!
//! The driver is host-agnostic: the browser binding plugs in
//! `requestAnimationFrame` and a canvas, the CLI and the tests plug in a
//! [`ManualHost`](crate::frame_loop::ManualHost) and an in-memory surface.

use crate::draw::Frame;
use crate::error::WaveError;
use crate::frame_loop::{CancelToken, FrameHost, FrameLoop, LoopState};
use crate::grid::Viewport;
use crate::scene::WaveField;
use glam::DVec2;

/// Where frames end up.
pub trait Surface {
    /// Matches the backing store to the viewport size.
    fn resize(&mut self, width: f64, height: f64) -> Result<(), WaveError>;

    /// Replays one frame of draw commands.
    fn draw(&mut self, frame: &Frame) -> Result<(), WaveError>;

    /// Moves the decorative pointer follower to `top_left`.
    fn move_follower(&mut self, top_left: DVec2) -> Result<(), WaveError>;

    /// Removes everything the surface added to its container.
    fn clear(&mut self);
}

/// Runs a [`WaveField`] frame after frame until torn down.
pub struct Driver<H: FrameHost, S: Surface> {
    field: WaveField,
    frames: FrameLoop,
    host: H,
    surface: S,
    torn_down: bool,
}

impl<H: FrameHost, S: Surface> Driver<H, S> {
    pub fn new(field: WaveField, host: H, surface: S) -> Self {
        Self {
            field,
            frames: FrameLoop::new(),
            host,
            surface,
            torn_down: false,
        }
    }

    /// Sizes the surface and requests the first frame.
    pub fn start(&mut self) -> Result<(), WaveError> {
        if self.frames.state() != LoopState::Idle {
            return Ok(());
        }
        let vp = *self.field.viewport();
        self.surface.resize(vp.width, vp.height)?;
        self.frames.start(&mut self.host)?;
        log::info!("wave field started at {}x{}", vp.width, vp.height);
        Ok(())
    }

    /// Handles a frame callback at host timestamp `time_ms`.
    ///
    /// Returns `Ok(false)` when the loop is no longer running, in which case
    /// nothing is drawn and nothing is rescheduled. A surface or host error
    /// stops the loop.
    pub fn on_frame(&mut self, time_ms: f64) -> Result<bool, WaveError> {
        if !self.frames.begin_frame() {
            return Ok(false);
        }
        let frame = self.field.tick(time_ms);
        if let Err(e) = self.present(&frame) {
            self.frames.stop(&mut self.host);
            return Err(e);
        }
        self.frames.schedule(&mut self.host)?;
        Ok(true)
    }

    fn present(&mut self, frame: &Frame) -> Result<(), WaveError> {
        self.surface.move_follower(self.field.cursor_follower())?;
        self.surface.draw(frame)
    }

    /// Rebuilds the lattice, then resizes the surface.
    ///
    /// A viewport whose lattice is too large leaves both untouched.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), WaveError> {
        if self.frames.state() == LoopState::Stopped {
            return Ok(());
        }
        self.field.resize(viewport)?;
        self.surface.resize(viewport.width, viewport.height)
    }

    /// Forwards a pointer event at page coordinates.
    pub fn pointer_moved(&mut self, x: f64, y: f64, scroll_y: f64) {
        if self.frames.state() != LoopState::Stopped {
            self.field.pointer_moved(x, y, scroll_y);
        }
    }

    /// Cancels the pending frame and clears the surface.
    ///
    /// Calling it again does nothing. A loop already stopped by a host
    /// failure still gets its surface cleared.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.frames.stop(&mut self.host);
        self.surface.clear();
        log::info!("wave field torn down after {} frames", self.field.ticks());
    }

    pub fn state(&self) -> LoopState {
        self.frames.state()
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.frames.token()
    }

    pub fn field(&self) -> &WaveField {
        &self.field
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

/// Surface that keeps the most recent frame in memory.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub size: (f64, f64),
    pub last_frame: Option<Frame>,
    pub follower: Option<DVec2>,
    pub frames_drawn: usize,
    pub cleared: bool,
}

impl Surface for RecordingSurface {
    fn resize(&mut self, width: f64, height: f64) -> Result<(), WaveError> {
        self.size = (width, height);
        Ok(())
    }

    fn draw(&mut self, frame: &Frame) -> Result<(), WaveError> {
        self.last_frame = Some(frame.clone());
        self.frames_drawn += 1;
        Ok(())
    }

    fn move_follower(&mut self, top_left: DVec2) -> Result<(), WaveError> {
        self.follower = Some(top_left);
        Ok(())
    }

    fn clear(&mut self) {
        self.last_frame = None;
        self.follower = None;
        self.cleared = true;
    }
}
