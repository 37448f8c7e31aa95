#![cfg(target_arch = "wasm32")]
//! Web front-end for the particle field background.
//!
//! ```js
//! import init_wasm, { init } from "./field_web.js";
//! await init_wasm();
//! const field = init("bg-canvas", JSON.stringify({ maxEdges: 120 }), 0);
//! window.addEventListener("scroll", () => field.onControlSignal(progress()));
//! // later
//! field.stop();
//! ```

use field_core::FieldOptions;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod canvas;
mod dom;
mod frame;
mod host;

use host::FieldHost;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("field-web loaded");
    Ok(())
}

/// Handle to one running field. Inert when initialisation failed: every
/// method is then a no-op, so the host page never has to check.
#[wasm_bindgen]
pub struct FieldHandle {
    host: Option<Rc<RefCell<FieldHost>>>,
}

/// Attach a particle field to the canvas with id `canvas_id`.
///
/// `options_json` overrides any subset of the defaults. Failures are logged and
/// produce an inert handle instead of throwing.
#[wasm_bindgen]
pub fn init(
    canvas_id: &str,
    options_json: Option<String>,
    initial_signal: Option<f64>,
) -> FieldHandle {
    let signal = initial_signal.unwrap_or(0.0) as f32;
    match try_init(canvas_id, options_json.as_deref().unwrap_or(""), signal) {
        Ok(host) => FieldHandle { host: Some(host) },
        Err(e) => {
            log::error!("particle field disabled: {:?}", e);
            FieldHandle { host: None }
        }
    }
}

fn try_init(
    canvas_id: &str,
    options_json: &str,
    initial_signal: f32,
) -> anyhow::Result<Rc<RefCell<FieldHost>>> {
    let options = FieldOptions::from_json(options_json)?;
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, canvas_id)?;
    let surface = canvas::CanvasSurface::new(canvas)?;
    Ok(FieldHost::create(window, surface, options, initial_signal))
}

#[wasm_bindgen]
impl FieldHandle {
    /// Push the host's normalized progress value (0..=1).
    #[wasm_bindgen(js_name = onControlSignal)]
    pub fn on_control_signal(&self, value: f64) {
        if let Some(host) = &self.host {
            match host.try_borrow_mut() {
                Ok(mut h) => h.on_control_signal(value as f32),
                Err(_) => log::warn!("[handle] control signal during frame; dropped"),
            }
        }
    }

    /// Stop animating and release every browser callback. Safe to call more
    /// than once.
    pub fn stop(&self) {
        if let Some(host) = &self.host {
            match host.try_borrow_mut() {
                Ok(mut h) => h.teardown(),
                Err(_) => log::warn!("[handle] stop during frame; teardown skipped"),
            }
        }
    }

    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.host
            .as_ref()
            .and_then(|h| h.try_borrow().ok().map(|h| h.is_active()))
            .unwrap_or(false)
    }
}
