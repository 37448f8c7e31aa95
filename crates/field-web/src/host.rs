//! Binds one `ParticleField` to the browser: canvas, animation frames, the
//! resize debounce timer, and the resize / reduced-motion listeners.
//!
//! Browser callbacks hold only `Weak` references to the host, so dropping the
//! last `FieldHandle` frees everything; teardown also runs on drop.

use crate::canvas::CanvasSurface;
use crate::dom;
use crate::frame::{RafScheduler, WindowTimeouts};
use field_core::{FieldOptions, MotionMode, ParticleField};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Default)]
struct Listeners {
    resize: Option<Closure<dyn FnMut()>>,
    motion: Option<(web::MediaQueryList, Closure<dyn FnMut()>)>,
}

pub struct FieldHost {
    window: web::Window,
    field: ParticleField,
    surface: CanvasSurface,
    frames: RafScheduler,
    timers: WindowTimeouts,
    listeners: Listeners,
    torn_down: bool,
}

/// Run `f` on the host if it is still alive and not already borrowed.
fn with_host(weak: &Weak<RefCell<FieldHost>>, f: impl FnOnce(&mut FieldHost)) {
    if let Some(host) = weak.upgrade() {
        match host.try_borrow_mut() {
            Ok(mut h) => f(&mut h),
            Err(_) => log::warn!("[host] callback re-entered; skipped"),
        };
    }
}

impl FieldHost {
    pub fn create(
        window: web::Window,
        surface: CanvasSurface,
        options: FieldOptions,
        initial_signal: f32,
    ) -> Rc<RefCell<Self>> {
        let query = dom::reduced_motion_query(&window);
        let reduced = query.as_ref().map(|q| q.matches()).unwrap_or(false);
        let mode = MotionMode::from_reduced_motion(reduced);
        let field = ParticleField::new(
            options,
            mode,
            dom::viewport_metrics(&window),
            initial_signal,
        );
        let host = Rc::new(RefCell::new(Self {
            frames: RafScheduler::new(window.clone()),
            timers: WindowTimeouts::new(window.clone()),
            window,
            field,
            surface,
            listeners: Listeners::default(),
            torn_down: false,
        }));
        Self::wire(&host, query);
        host.borrow_mut().start();
        host
    }

    fn wire(host: &Rc<RefCell<Self>>, query: Option<web::MediaQueryList>) {
        let mut h = host.borrow_mut();

        let weak = Rc::downgrade(host);
        h.frames.set_callback(Closure::wrap(Box::new(move || {
            with_host(&weak, |h| h.on_frame());
        }) as Box<dyn FnMut()>));

        let weak = Rc::downgrade(host);
        h.timers.set_callback(Closure::wrap(Box::new(move || {
            with_host(&weak, |h| h.on_resize_timeout());
        }) as Box<dyn FnMut()>));

        let weak = Rc::downgrade(host);
        let resize = Closure::wrap(Box::new(move || {
            with_host(&weak, |h| h.on_resize_event());
        }) as Box<dyn FnMut()>);
        if let Err(e) = h
            .window
            .add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
        {
            log::warn!("[host] resize listener not installed: {:?}", e);
        }
        h.listeners.resize = Some(resize);

        if let Some(query) = query {
            let weak = Rc::downgrade(host);
            let change = Closure::wrap(Box::new(move || {
                with_host(&weak, |h| h.on_motion_change());
            }) as Box<dyn FnMut()>);
            if let Err(e) =
                query.add_event_listener_with_callback("change", change.as_ref().unchecked_ref())
            {
                log::warn!("[host] reduced-motion listener not installed: {:?}", e);
            }
            h.listeners.motion = Some((query, change));
        }
    }

    fn start(&mut self) {
        let Self {
            field,
            surface,
            frames,
            ..
        } = self;
        field.start(surface, frames);
    }

    fn on_frame(&mut self) {
        let Self {
            field,
            surface,
            frames,
            ..
        } = self;
        field.frame(surface, frames);
    }

    fn on_resize_event(&mut self) {
        let Self { field, timers, .. } = self;
        field.on_resize_event(timers);
    }

    fn on_resize_timeout(&mut self) {
        let metrics = dom::viewport_metrics(&self.window);
        self.field.on_resize_timeout(&mut self.surface, metrics);
    }

    /// The reduced-motion preference flipped: tear the loop down and start a
    /// fresh field in the other mode, keeping the latest control signal.
    fn on_motion_change(&mut self) {
        if self.torn_down {
            return;
        }
        let reduced = self
            .listeners
            .motion
            .as_ref()
            .map(|(q, _)| q.matches())
            .unwrap_or(false);
        let mode = MotionMode::from_reduced_motion(reduced);
        if mode == self.field.mode() {
            return;
        }
        let metrics = dom::viewport_metrics(&self.window);
        let Self {
            field,
            surface,
            frames,
            timers,
            ..
        } = self;
        field.restart(mode, metrics, surface, frames, timers);
    }

    pub fn on_control_signal(&mut self, value: f32) {
        if !self.torn_down {
            self.field.on_control_signal(value);
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        !self.torn_down
    }

    /// Cancel the pending frame and timer and unhook every listener.
    /// Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.field.stop(&mut self.frames, &mut self.timers);
        if let Some(resize) = self.listeners.resize.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", resize.as_ref().unchecked_ref());
        }
        if let Some((query, change)) = self.listeners.motion.take() {
            let callback = change.as_ref().unchecked_ref();
            let _ = query.remove_event_listener_with_callback("change", callback);
        }
    }
}

impl Drop for FieldHost {
    fn drop(&mut self) {
        self.teardown();
    }
}
