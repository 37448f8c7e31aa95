use field_core::{FrameId, FrameScheduler, TimeoutId, TimeoutScheduler};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `requestAnimationFrame` driven scheduler. The callback is installed once
/// the host exists, since it needs a handle back to it.
pub struct RafScheduler {
    window: web::Window,
    tick: Option<Closure<dyn FnMut()>>,
}

impl RafScheduler {
    pub fn new(window: web::Window) -> Self {
        Self { window, tick: None }
    }

    pub fn set_callback(&mut self, tick: Closure<dyn FnMut()>) {
        self.tick = Some(tick);
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameId> {
        let tick = self.tick.as_ref()?;
        self.window
            .request_animation_frame(tick.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel_frame(&mut self, id: FrameId) {
        let _ = self.window.cancel_animation_frame(id);
    }
}

/// `setTimeout` based one-shot timer with a single shared callback; only the
/// resize debounce uses it.
pub struct WindowTimeouts {
    window: web::Window,
    callback: Option<Closure<dyn FnMut()>>,
}

impl WindowTimeouts {
    pub fn new(window: web::Window) -> Self {
        Self {
            window,
            callback: None,
        }
    }

    pub fn set_callback(&mut self, callback: Closure<dyn FnMut()>) {
        self.callback = Some(callback);
    }
}

impl TimeoutScheduler for WindowTimeouts {
    fn set_timeout(&mut self, delay_ms: u32) -> Option<TimeoutId> {
        let cb = self.callback.as_ref()?;
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                delay_ms.min(i32::MAX as u32) as i32,
            )
            .ok()
    }

    fn clear_timeout(&mut self, id: TimeoutId) {
        self.window.clear_timeout_with_handle(id);
    }
}
