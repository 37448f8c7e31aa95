//! One particle field instance: population, reactor, surface and loop.
//!
//! The host owns the browser objects and forwards its callbacks here; the
//! field owns everything else. There is no global state, so independent
//! instances can coexist.

use crate::options::FieldOptions;
use crate::population::{particle_count, Population};
use crate::reactor::{size_span, speed_span, ParamChanges, Reactor};
use crate::render::{EdgeStyle, FrameScheduler, LoopState, MotionMode, Painter, RenderLoop};
use crate::surface::{
    ResizeDebouncer, SurfaceManager, SurfaceMetrics, SurfaceTarget, TimeoutScheduler,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct ParticleField {
    options: FieldOptions,
    population: Population,
    reactor: Reactor,
    surface: SurfaceManager,
    debouncer: ResizeDebouncer,
    render: RenderLoop,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(
        options: FieldOptions,
        mode: MotionMode,
        metrics: SurfaceMetrics,
        initial_signal: f32,
    ) -> Self {
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let reactor = Reactor::from_options(&options, initial_signal);
        let mut population = Population::new(options.palette.clone());
        let t = reactor.targets();
        population.regenerate(
            &mut rng,
            metrics.logical,
            particle_count(metrics.area(), t.density, options.max_particles),
            size_span(t.size),
            speed_span(t.speed),
            t.opacity,
        );
        let render = RenderLoop::new(
            mode,
            options.rebuild_every,
            options.proximity(),
            EdgeStyle {
                color: options.edge_rgba(),
                line_width: options.edge_line_width,
            },
        );
        Self {
            debouncer: ResizeDebouncer::new(options.resize_debounce_ms),
            surface: SurfaceManager::new(metrics),
            options,
            population,
            reactor,
            render,
            rng,
        }
    }

    #[inline]
    pub fn population(&self) -> &Population {
        &self.population
    }

    #[inline]
    pub fn reactor(&self) -> &Reactor {
        &self.reactor
    }

    #[inline]
    pub fn render_loop(&self) -> &RenderLoop {
        &self.render
    }

    #[inline]
    pub fn surface(&self) -> &SurfaceManager {
        &self.surface
    }

    #[inline]
    pub fn mode(&self) -> MotionMode {
        self.render.mode()
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.render.state() == LoopState::Stopped
    }

    /// Size the surface and either schedule the first frame or draw the
    /// static pass.
    pub fn start<S, F>(&mut self, surface: &mut S, frames: &mut F)
    where
        S: Painter + SurfaceTarget + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        if self.render.state() != LoopState::Idle {
            return;
        }
        let metrics = self.surface.metrics();
        self.surface.recompute(surface, metrics);
        log::info!(
            "[field] start mode={:?} particles={} surface={:.0}x{:.0}@{}",
            self.mode(),
            self.population.len(),
            metrics.logical.x,
            metrics.logical.y,
            metrics.dpr
        );
        self.render.start(&self.population, metrics.logical, surface, frames);
    }

    pub fn frame<P, F>(&mut self, painter: &mut P, frames: &mut F)
    where
        P: Painter + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        let bounds = self.surface.metrics().logical;
        self.render.frame(&mut self.population, bounds, painter, frames);
    }

    /// Push a new control signal value. Returns what was reapplied.
    pub fn on_control_signal(&mut self, value: f32) -> ParamChanges {
        if self.is_stopped() {
            return ParamChanges::default();
        }
        let changes = self.reactor.update(value);
        if changes.is_empty() {
            return changes;
        }
        if let Some(density) = changes.density {
            let metrics = self.surface.metrics();
            let t = self.reactor.targets();
            let count = particle_count(metrics.area(), density, self.options.max_particles);
            self.population.regenerate(
                &mut self.rng,
                metrics.logical,
                count,
                size_span(t.size),
                speed_span(t.speed),
                t.opacity,
            );
        }
        if let Some(size) = changes.size {
            self.population.set_radii(&mut self.rng, size_span(size));
        }
        if let Some(speed) = changes.speed {
            self.population.set_velocities(&mut self.rng, speed_span(speed));
        }
        if let Some(opacity) = changes.opacity {
            self.population.set_opacity(opacity);
        }
        log::debug!("[field] signal={:.3} applied {:?}", value, changes);
        changes
    }

    /// A resize notification from the host; restarts the debounce timer.
    pub fn on_resize_event<T: TimeoutScheduler + ?Sized>(&mut self, timers: &mut T) {
        if self.is_stopped() {
            return;
        }
        self.debouncer.notify(timers);
    }

    /// The debounce timer fired. Recomputes the surface from the host's
    /// current viewport metrics; returns whether a recompute happened.
    pub fn on_resize_timeout<S>(&mut self, surface: &mut S, metrics: SurfaceMetrics) -> bool
    where
        S: Painter + SurfaceTarget + ?Sized,
    {
        if !self.debouncer.fire() || self.is_stopped() {
            return false;
        }
        self.surface.recompute(surface, metrics);
        self.render.redraw_static(&self.population, metrics.logical, surface);
        true
    }

    /// Cancel the pending frame and resize timer. Idempotent; returns whether
    /// this call was the one that stopped a live field.
    pub fn stop<F, T>(&mut self, frames: &mut F, timers: &mut T) -> bool
    where
        F: FrameScheduler + ?Sized,
        T: TimeoutScheduler + ?Sized,
    {
        let was_live = !self.is_stopped();
        self.debouncer.cancel(timers);
        self.render.stop(frames);
        if was_live {
            log::info!("[field] stopped after {} frames", self.render.frame_count());
        }
        was_live
    }

    /// Tear the field down and start a fresh one in `mode` on `metrics`,
    /// keeping the latest control signal. Used when the reduced-motion
    /// preference changes mid-session.
    pub fn restart<S, F, T>(
        &mut self,
        mode: MotionMode,
        metrics: SurfaceMetrics,
        surface: &mut S,
        frames: &mut F,
        timers: &mut T,
    ) where
        S: Painter + SurfaceTarget + ?Sized,
        F: FrameScheduler + ?Sized,
        T: TimeoutScheduler + ?Sized,
    {
        self.stop(frames, timers);
        let signal = self.reactor.signal();
        log::info!("[field] restarting in {:?} mode at signal {:.3}", mode, signal);
        *self = ParticleField::new(self.options.clone(), mode, metrics, signal);
        self.start(surface, frames);
    }
}
