// Recording fakes for the host seams: painter/surface, frame scheduler and
// timeout scheduler, plus a simulated clock that drives frames.

#![allow(dead_code)]

use field_core::*;
use glam::Vec2;

#[derive(Default)]
pub struct RecordingPainter {
    pub clears: u32,
    pub circles: usize,
    pub lines: Vec<(Vec2, Vec2, Rgba, f32)>,
    pub applied: Vec<SurfaceMetrics>,
    pub fail_apply: bool,
}

impl Painter for RecordingPainter {
    fn clear(&mut self, _size: Vec2) {
        self.clears += 1;
    }

    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Rgba) {
        self.circles += 1;
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.lines.push((from, to, color, width));
    }
}

impl SurfaceTarget for RecordingPainter {
    fn apply(&mut self, metrics: &SurfaceMetrics) -> field_core::error::Result<()> {
        self.applied.push(*metrics);
        if self.fail_apply {
            Err(FieldError::Surface("context lost".into()))
        } else {
            Ok(())
        }
    }
}

#[derive(Default)]
pub struct FakeFrames {
    next_id: FrameId,
    pub pending: Option<FrameId>,
    pub requested: u32,
    pub cancelled: Vec<FrameId>,
}

impl FrameScheduler for FakeFrames {
    fn request_frame(&mut self) -> Option<FrameId> {
        self.next_id += 1;
        self.requested += 1;
        self.pending = Some(self.next_id);
        self.pending
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if self.pending == Some(id) {
            self.pending = None;
        }
        self.cancelled.push(id);
    }
}

#[derive(Default)]
pub struct FakeTimers {
    next_id: TimeoutId,
    pub now_ms: u32,
    pub armed: Vec<(TimeoutId, u32)>,
    pub set: u32,
    pub cleared: Vec<TimeoutId>,
}

impl FakeTimers {
    /// Move the clock forward and return the timers that came due.
    pub fn advance(&mut self, ms: u32) -> Vec<TimeoutId> {
        self.now_ms += ms;
        let now = self.now_ms;
        let (due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.armed)
            .into_iter()
            .partition(|(_, at)| *at <= now);
        self.armed = rest;
        due.into_iter().map(|(id, _)| id).collect()
    }
}

impl TimeoutScheduler for FakeTimers {
    fn set_timeout(&mut self, delay_ms: u32) -> Option<TimeoutId> {
        self.next_id += 1;
        self.set += 1;
        self.armed.push((self.next_id, self.now_ms + delay_ms));
        Some(self.next_id)
    }

    fn clear_timeout(&mut self, id: TimeoutId) {
        self.armed.retain(|(armed, _)| *armed != id);
        self.cleared.push(id);
    }
}

pub const FRAME_MS: u32 = 16;

/// Drive pending frame callbacks for `ms` of simulated time. Returns the
/// number of callbacks that ran.
pub fn run_frames(
    field: &mut ParticleField,
    painter: &mut RecordingPainter,
    frames: &mut FakeFrames,
    ms: u32,
) -> u32 {
    let mut ran = 0;
    let mut t = 0;
    while t < ms {
        t += FRAME_MS;
        if frames.pending.take().is_some() {
            field.frame(painter, frames);
            ran += 1;
        }
    }
    ran
}

pub fn metrics(w: f32, h: f32) -> SurfaceMetrics {
    SurfaceMetrics::new(Vec2::new(w, h), 2.0)
}

pub fn seeded_options() -> FieldOptions {
    FieldOptions {
        seed: Some(42),
        ..FieldOptions::default()
    }
}
