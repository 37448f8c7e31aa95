//! Frame-driven render loop.
//!
//! The loop never blocks: each `frame` call does one frame of work and asks
//! the host scheduler for the next callback. Proximity edges are rebuilt on a
//! fixed frame cadence and redrawn from cache in between.

use crate::particle::{Particle, Rgba};
use crate::population::Population;
use crate::proximity::{self, Edge, ProximityOptions};
use glam::Vec2;

pub type FrameId = i32;

/// Host frame callbacks (`requestAnimationFrame` on the web).
pub trait FrameScheduler {
    fn request_frame(&mut self) -> Option<FrameId>;
    fn cancel_frame(&mut self, id: FrameId);
}

/// Minimal 2D drawing surface in logical coordinates.
pub trait Painter {
    fn clear(&mut self, size: Vec2);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionMode {
    Animated,
    /// Reduced motion: a single draw pass, no frames.
    Static,
}

impl MotionMode {
    #[inline]
    pub fn from_reduced_motion(reduced: bool) -> Self {
        if reduced {
            MotionMode::Static
        } else {
            MotionMode::Animated
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    /// Static frame drawn; nothing scheduled.
    Settled,
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
    pub color: Rgba,
    pub line_width: f32,
}

#[derive(Debug)]
pub struct RenderLoop {
    mode: MotionMode,
    state: LoopState,
    frame_count: u64,
    rebuild_every: u32,
    pending: Option<FrameId>,
    edges: Vec<Edge>,
    proximity: ProximityOptions,
    edge_style: EdgeStyle,
}

impl RenderLoop {
    pub fn new(
        mode: MotionMode,
        rebuild_every: u32,
        proximity: ProximityOptions,
        edge_style: EdgeStyle,
    ) -> Self {
        Self {
            mode,
            state: LoopState::Idle,
            frame_count: 0,
            rebuild_every: rebuild_every.max(1),
            pending: None,
            edges: Vec::new(),
            proximity,
            edge_style,
        }
    }

    /// Start counting frames from `frame_count` instead of zero.
    pub fn with_frame_count(mut self, frame_count: u64) -> Self {
        self.frame_count = frame_count;
        self
    }

    #[inline]
    pub fn mode(&self) -> MotionMode {
        self.mode
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    pub fn start<P, F>(
        &mut self,
        population: &Population,
        bounds: Vec2,
        painter: &mut P,
        frames: &mut F,
    ) where
        P: Painter + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        if self.state != LoopState::Idle {
            return;
        }
        match self.mode {
            MotionMode::Animated => {
                self.state = LoopState::Running;
                self.pending = frames.request_frame();
            }
            MotionMode::Static => {
                painter.clear(bounds);
                draw_particles(painter, population.particles());
                self.state = LoopState::Settled;
            }
        }
    }

    /// One animated frame. Called from the host's frame callback.
    pub fn frame<P, F>(
        &mut self,
        population: &mut Population,
        bounds: Vec2,
        painter: &mut P,
        frames: &mut F,
    ) where
        P: Painter + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        self.pending = None;
        if self.state != LoopState::Running {
            return;
        }
        painter.clear(bounds);
        population.integrate(bounds.x, bounds.y);
        draw_particles(painter, population.particles());

        if self.frame_count % u64::from(self.rebuild_every) == 0 {
            self.edges = proximity::build(population.particles(), &self.proximity);
        }
        self.frame_count = self.frame_count.wrapping_add(1);

        let style = self.edge_style;
        for e in &self.edges {
            let color = style.color.with_alpha(e.opacity);
            painter.stroke_line(e.from, e.to, color, style.line_width);
        }

        self.pending = frames.request_frame();
    }

    /// Redraw the single static pass, e.g. after the backing store was
    /// resized and cleared. No-op in animated mode.
    pub fn redraw_static<P>(&mut self, population: &Population, bounds: Vec2, painter: &mut P)
    where
        P: Painter + ?Sized,
    {
        if self.mode == MotionMode::Static && self.state == LoopState::Settled {
            painter.clear(bounds);
            draw_particles(painter, population.particles());
        }
    }

    /// Cancel the pending frame, if any. Safe to call repeatedly; returns
    /// whether a frame was actually cancelled.
    pub fn stop<F: FrameScheduler + ?Sized>(&mut self, frames: &mut F) -> bool {
        self.state = LoopState::Stopped;
        self.edges.clear();
        match self.pending.take() {
            Some(id) => {
                frames.cancel_frame(id);
                true
            }
            None => false,
        }
    }
}

fn draw_particles<P: Painter + ?Sized>(painter: &mut P, particles: &[Particle]) {
    for p in particles {
        painter.fill_circle(p.position, p.radius, p.color);
    }
}
