//! `requestAnimationFrame` as a [`FrameHost`].

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wave_field_core::{FrameHost, FrameId, WaveError};
use web_sys::Window;

/// Slot for the per-frame callback.
///
/// The callback needs the driver and the driver needs the host, so the
/// closure is created after both and dropped into this shared slot.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub struct AnimationFrameHost {
    window: Window,
    callback: FrameCallback,
}

impl AnimationFrameHost {
    pub fn new(window: Window, callback: FrameCallback) -> Self {
        Self { window, callback }
    }
}

impl FrameHost for AnimationFrameHost {
    fn request_frame(&mut self) -> Result<FrameId, WaveError> {
        let slot = self.callback.borrow();
        let closure = slot
            .as_ref()
            .ok_or_else(|| WaveError::Host("frame callback not installed".into()))?;
        self.window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .map_err(|e| WaveError::Host(format!("requestAnimationFrame failed: {e:?}")))
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if let Err(e) = self.window.cancel_animation_frame(id) {
            log::warn!("cancelAnimationFrame({id}) failed: {e:?}");
        }
    }
}
