use crate::error::Result;
use glam::Vec2;

pub type TimeoutId = i32;

/// One-shot timers provided by the host (`setTimeout` on the web).
pub trait TimeoutScheduler {
    fn set_timeout(&mut self, delay_ms: u32) -> Option<TimeoutId>;
    fn clear_timeout(&mut self, id: TimeoutId);
}

/// Logical (CSS) size of the drawing surface plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceMetrics {
    pub logical: Vec2,
    pub dpr: f32,
}

impl SurfaceMetrics {
    pub fn new(logical: Vec2, dpr: f32) -> Self {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        let logical = Vec2::new(sanitize(logical.x), sanitize(logical.y));
        Self { logical, dpr }
    }

    /// Backing store resolution in device pixels.
    #[inline]
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.logical.x * self.dpr).round() as u32,
            (self.logical.y * self.dpr).round() as u32,
        )
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.logical.x * self.logical.y
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.logical.x <= 0.0 || self.logical.y <= 0.0
    }
}

#[inline]
fn sanitize(v: f32) -> f32 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

/// Whatever owns the real pixels: sets backing size, CSS size and the
/// context transform so that draws use logical coordinates.
pub trait SurfaceTarget {
    fn apply(&mut self, metrics: &SurfaceMetrics) -> Result<()>;
}

/// Coalesces bursts of resize notifications into a single timer.
#[derive(Debug)]
pub struct ResizeDebouncer {
    delay_ms: u32,
    pending: Option<TimeoutId>,
}

impl ResizeDebouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// A resize happened: restart the quiet period.
    pub fn notify<T: TimeoutScheduler + ?Sized>(&mut self, timers: &mut T) {
        if let Some(id) = self.pending.take() {
            timers.clear_timeout(id);
        }
        self.pending = timers.set_timeout(self.delay_ms);
    }

    /// The timer fired. Returns `true` when a recompute is due; a firing with
    /// nothing pending (already cancelled) is ignored.
    pub fn fire(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn cancel<T: TimeoutScheduler + ?Sized>(&mut self, timers: &mut T) {
        if let Some(id) = self.pending.take() {
            timers.clear_timeout(id);
        }
    }
}

#[derive(Debug)]
pub struct SurfaceManager {
    metrics: SurfaceMetrics,
    recomputes: u32,
}

impl SurfaceManager {
    pub fn new(metrics: SurfaceMetrics) -> Self {
        Self {
            metrics,
            recomputes: 0,
        }
    }

    #[inline]
    pub fn metrics(&self) -> SurfaceMetrics {
        self.metrics
    }

    /// Number of completed recomputes, initial sizing included.
    #[inline]
    pub fn recomputes(&self) -> u32 {
        self.recomputes
    }

    /// Store new metrics and push them to the target. A target failure leaves
    /// the surface stale until the next resize; it is logged, not returned.
    pub fn recompute<T>(&mut self, target: &mut T, metrics: SurfaceMetrics)
    where
        T: SurfaceTarget + ?Sized,
    {
        self.metrics = metrics;
        self.recomputes += 1;
        if let Err(e) = target.apply(&metrics) {
            log::warn!("[surface] could not rescale to {:?}: {}", metrics.backing_size(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backing_size_scales_by_dpr() {
        let m = SurfaceMetrics::new(Vec2::new(800.0, 600.0), 2.0);
        assert_eq!(m.backing_size(), (1600, 1200));
    }

    #[test]
    fn bad_dpr_falls_back_to_one() {
        let m = SurfaceMetrics::new(Vec2::new(10.0, 10.0), 0.0);
        assert_eq!(m.dpr, 1.0);
        let m = SurfaceMetrics::new(Vec2::new(f32::NAN, -3.0), f32::NAN);
        assert!(m.is_empty());
        assert_eq!(m.backing_size(), (0, 0));
    }
}
