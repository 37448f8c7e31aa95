//! Owner of the live particle collection.
//!
//! Regeneration is the only operation that moves particles to new positions;
//! the bulk setters touch one attribute at a time so that parameter changes
//! never make the field visibly jump.

use crate::constants::DENSITY_AREA_DIVISOR;
use crate::particle::{random_velocity, Particle, Rgba, Span};
use glam::Vec2;
use rand::Rng;

/// Number of particles for a logical surface area and density factor,
/// clamped to `cap`.
pub fn particle_count(area: f32, density: f32, cap: usize) -> usize {
    if area.is_nan() || density.is_nan() || area <= 0.0 || density <= 0.0 {
        return 0;
    }
    let base = (area * density / DENSITY_AREA_DIVISOR).floor();
    (base as usize).min(cap)
}

#[derive(Clone, Debug)]
pub struct Population {
    particles: Vec<Particle>,
    palette: Vec<[u8; 3]>,
}

impl Population {
    pub fn new(palette: Vec<[u8; 3]>) -> Self {
        Self {
            particles: Vec::new(),
            palette,
        }
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Replace every particle with `count` fresh ones spread over `bounds`.
    pub fn regenerate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        bounds: Vec2,
        count: usize,
        size: Span,
        speed: Span,
        opacity: f32,
    ) {
        self.particles.clear();
        if bounds.x <= 0.0 || bounds.y <= 0.0 || self.palette.is_empty() {
            return;
        }
        self.particles.reserve(count);
        for _ in 0..count {
            let position = Vec2::new(rng.gen::<f32>() * bounds.x, rng.gen::<f32>() * bounds.y);
            let tint = self.palette[rng.gen_range(0..self.palette.len())];
            self.particles.push(Particle {
                position,
                velocity: random_velocity(rng, speed),
                radius: size.sample(rng),
                color: Rgba::from_rgb(tint, opacity),
            });
        }
        log::debug!(
            "[population] regenerated {} particles over {:.0}x{:.0}",
            self.particles.len(),
            bounds.x,
            bounds.y
        );
    }

    pub fn set_radii<R: Rng + ?Sized>(&mut self, rng: &mut R, size: Span) {
        for p in &mut self.particles {
            p.radius = size.sample(rng);
        }
    }

    pub fn set_velocities<R: Rng + ?Sized>(&mut self, rng: &mut R, speed: Span) {
        for p in &mut self.particles {
            p.velocity = random_velocity(rng, speed);
        }
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        for p in &mut self.particles {
            p.color.a = opacity;
        }
    }

    pub fn integrate(&mut self, width: f32, height: f32) {
        let degenerate = width.is_nan() || height.is_nan() || width <= 0.0 || height <= 0.0;
        if self.particles.is_empty() || degenerate {
            return;
        }
        for p in &mut self.particles {
            p.step(width, height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_is_capped() {
        assert_eq!(particle_count(3840.0 * 2160.0, 25.0, 100), 100);
        assert_eq!(particle_count(400.0 * 300.0, 15.0, 100), 100);
        assert_eq!(particle_count(200.0 * 100.0, 15.0, 100), 30);
    }

    #[test]
    fn count_is_zero_for_empty_surface() {
        assert_eq!(particle_count(0.0, 25.0, 100), 0);
        assert_eq!(particle_count(1000.0, 0.0, 100), 0);
        assert_eq!(particle_count(f32::NAN, 10.0, 100), 0);
    }
}
