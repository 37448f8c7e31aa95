//! Maps the scroll-driven control signal to particle parameters.
//!
//! The signal can change every animation frame, so each parameter remembers
//! the value it last pushed into the population and only reapplies once the
//! new target has moved past its threshold.

use crate::constants::{RADIUS_FLOOR, SPEED_SPREAD};
use crate::options::{FieldOptions, Thresholds};
use crate::particle::Span;
use serde::Deserialize;

/// Piecewise-linear table of `(signal milestone, value)` stops.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Curve {
    stops: Vec<(f32, f32)>,
}

impl Curve {
    pub fn new(stops: Vec<(f32, f32)>) -> Self {
        Self { stops }
    }

    /// Reasons a table cannot be sampled meaningfully.
    pub fn check(&self) -> Result<(), &'static str> {
        if self.stops.is_empty() {
            return Err("needs at least one stop");
        }
        if self
            .stops
            .iter()
            .any(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err("stops must be finite");
        }
        if self.stops.windows(2).any(|w| w[1].0 <= w[0].0) {
            return Err("milestones must be strictly increasing");
        }
        Ok(())
    }

    /// Interpolated value at `x`, clamped to the table's domain.
    pub fn sample(&self, x: f32) -> f32 {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(f), Some(l)) => (*f, *l),
            _ => return 0.0,
        };
        if x <= first.0 {
            return first.1;
        }
        if x >= last.0 {
            return last.1;
        }
        for w in self.stops.windows(2) {
            let (x0, y0) = w[0];
            let (x1, y1) = w[1];
            if x <= x1 {
                let t = (x - x0) / (x1 - x0);
                return y0 + (y1 - y0) * t;
            }
        }
        last.1
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Targets {
    pub size: f32,
    pub speed: f32,
    pub opacity: f32,
    pub density: f32,
}

/// Parameters whose target moved past the hysteresis threshold on the last
/// update. A `density` change means the population must be regenerated; the
/// other three are then already covered and left `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParamChanges {
    pub size: Option<f32>,
    pub speed: Option<f32>,
    pub opacity: Option<f32>,
    pub density: Option<f32>,
}

impl ParamChanges {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.is_none()
            && self.speed.is_none()
            && self.opacity.is_none()
            && self.density.is_none()
    }
}

#[derive(Clone, Debug)]
struct Tracked {
    curve: Curve,
    threshold: f32,
    target: f32,
    applied: f32,
}

impl Tracked {
    fn new(curve: Curve, threshold: f32, signal: f32) -> Self {
        let v = curve.sample(signal);
        Self {
            curve,
            threshold,
            target: v,
            applied: v,
        }
    }

    fn observe(&mut self, signal: f32) -> Option<f32> {
        self.target = self.curve.sample(signal);
        if (self.target - self.applied).abs() > self.threshold {
            self.applied = self.target;
            Some(self.target)
        } else {
            None
        }
    }

    #[inline]
    fn settle(&mut self) {
        self.applied = self.target;
    }
}

#[derive(Clone, Debug)]
pub struct Reactor {
    size: Tracked,
    speed: Tracked,
    opacity: Tracked,
    density: Tracked,
    signal: f32,
}

impl Reactor {
    /// `curves` are ordered size, speed, opacity, density.
    pub fn new(curves: [Curve; 4], thresholds: Thresholds, initial_signal: f32) -> Self {
        let signal = if initial_signal.is_finite() {
            initial_signal
        } else {
            0.0
        };
        let [size, speed, opacity, density] = curves;
        Self {
            size: Tracked::new(size, thresholds.size, signal),
            speed: Tracked::new(speed, thresholds.speed, signal),
            opacity: Tracked::new(opacity, thresholds.opacity, signal),
            density: Tracked::new(density, thresholds.density, signal),
            signal,
        }
    }

    pub fn from_options(opts: &FieldOptions, initial_signal: f32) -> Self {
        Self::new(
            [
                opts.size_curve.clone(),
                opts.speed_curve.clone(),
                opts.opacity_curve.clone(),
                opts.density_curve.clone(),
            ],
            opts.thresholds,
            initial_signal,
        )
    }

    /// Latest signal seen, after discarding non-finite input.
    #[inline]
    pub fn signal(&self) -> f32 {
        self.signal
    }

    pub fn targets(&self) -> Targets {
        Targets {
            size: self.size.target,
            speed: self.speed.target,
            opacity: self.opacity.target,
            density: self.density.target,
        }
    }

    pub fn applied(&self) -> Targets {
        Targets {
            size: self.size.applied,
            speed: self.speed.applied,
            opacity: self.opacity.applied,
            density: self.density.applied,
        }
    }

    pub fn update(&mut self, signal: f32) -> ParamChanges {
        if !signal.is_finite() {
            return ParamChanges::default();
        }
        self.signal = signal;
        let density = self.density.observe(signal);
        let mut size = self.size.observe(signal);
        let mut speed = self.speed.observe(signal);
        let mut opacity = self.opacity.observe(signal);
        if density.is_some() {
            // Regeneration uses the current targets for everything.
            self.size.settle();
            self.speed.settle();
            self.opacity.settle();
            size = None;
            speed = None;
            opacity = None;
        }
        ParamChanges {
            size,
            speed,
            opacity,
            density,
        }
    }
}

/// Radius range for a size target.
#[inline]
pub fn size_span(size: f32) -> Span {
    Span::new(RADIUS_FLOOR, RADIUS_FLOOR + size.max(0.0))
}

/// Velocity magnitude range for a speed target.
#[inline]
pub fn speed_span(speed: f32) -> Span {
    Span::new(0.0, speed.max(0.0) * SPEED_SPREAD)
}
