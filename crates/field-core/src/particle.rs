use glam::Vec2;
use rand::Rng;

/// Color with 8-bit channels and a floating point alpha, matching the CSS
/// `rgba()` form the canvas consumes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub fn from_rgb(rgb: [u8; 3], a: f32) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2], a)
    }

    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Closed interval sampled uniformly. Degenerate spans (`min >= max`) always
/// yield `min`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }

    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max > self.min {
            self.min + rng.gen::<f32>() * (self.max - self.min)
        } else {
            self.min
        }
    }
}

/// One drifting point of the field.
#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub color: Rgba,
}

impl Particle {
    /// Advance one frame and wrap toroidally into `[0, width) x [0, height)`.
    #[inline]
    pub fn step(&mut self, width: f32, height: f32) {
        self.position += self.velocity;
        self.position.x = wrap(self.position.x, width);
        self.position.y = wrap(self.position.y, height);
    }
}

/// Velocity with a uniformly random direction and magnitude drawn from `speed`.
pub fn random_velocity<R: Rng + ?Sized>(rng: &mut R, speed: Span) -> Vec2 {
    let angle = rng.gen::<f32>() * std::f32::consts::TAU;
    Vec2::from_angle(angle) * speed.sample(rng)
}

/// Euclidean wrap that never returns `extent` itself, which `rem_euclid` can
/// for tiny negative inputs once rounded to f32.
#[inline]
pub fn wrap(v: f32, extent: f32) -> f32 {
    if !v.is_finite() {
        return 0.0;
    }
    let w = v.rem_euclid(extent);
    if w >= extent {
        0.0
    } else {
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_handles_tiny_negative_values() {
        let w = wrap(-1e-9, 100.0);
        assert!((0.0..100.0).contains(&w));
    }

    #[test]
    fn css_string_keeps_alpha() {
        assert_eq!(
            Rgba::new(130, 60, 200, 0.25).to_css(),
            "rgba(130, 60, 200, 0.25)"
        );
    }

    #[test]
    fn degenerate_span_yields_min() {
        let mut rng = rand::thread_rng();
        assert_eq!(Span::new(2.0, 2.0).sample(&mut rng), 2.0);
        assert_eq!(Span::new(3.0, 1.0).sample(&mut rng), 3.0);
    }
}
