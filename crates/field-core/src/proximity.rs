//! Connection edges between nearby particles.
//!
//! The builder is pure and bounded: a sampling stride kicks in for large
//! populations and the scan stops as soon as `max_edges` edges exist, so the
//! draw step that consumes the result has a fixed worst-case cost.

use crate::particle::Particle;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub from: Vec2,
    pub to: Vec2,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProximityOptions {
    pub max_distance: f32,
    pub max_edges: usize,
    pub base_opacity: f32,
    pub stride_threshold: usize,
}

impl ProximityOptions {
    /// Candidate step: every particle, or every second one once the
    /// population exceeds the threshold.
    #[inline]
    pub fn stride_for(&self, population: usize) -> usize {
        if population > self.stride_threshold {
            2
        } else {
            1
        }
    }
}

pub fn build(particles: &[Particle], opts: &ProximityOptions) -> Vec<Edge> {
    let mut edges = Vec::new();
    let no_reach = opts.max_distance.is_nan() || opts.max_distance <= 0.0;
    if particles.len() < 2 || opts.max_edges == 0 || no_reach {
        return edges;
    }
    let stride = opts.stride_for(particles.len());
    let max_d2 = opts.max_distance * opts.max_distance;

    for i in (0..particles.len()).step_by(stride) {
        let a = particles[i].position;
        for j in ((i + stride)..particles.len()).step_by(stride) {
            let b = particles[j].position;
            let d2 = a.distance_squared(b);
            if d2 >= max_d2 {
                continue;
            }
            let distance = d2.sqrt();
            edges.push(Edge {
                from: a,
                to: b,
                opacity: opts.base_opacity * (1.0 - distance / opts.max_distance),
            });
            if edges.len() >= opts.max_edges {
                return edges;
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Rgba;

    fn at(x: f32, y: f32) -> Particle {
        Particle {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            radius: 1.0,
            color: Rgba::new(0, 0, 0, 1.0),
        }
    }

    fn opts() -> ProximityOptions {
        ProximityOptions {
            max_distance: 100.0,
            max_edges: 150,
            base_opacity: 0.15,
            stride_threshold: 50,
        }
    }

    #[test]
    fn opacity_fades_with_distance() {
        let edges = build(&[at(0.0, 0.0), at(50.0, 0.0)], &opts());
        assert_eq!(edges.len(), 1);
        assert!((edges[0].opacity - 0.075).abs() < 1e-6);
    }

    #[test]
    fn pair_at_exact_max_distance_is_excluded() {
        let edges = build(&[at(0.0, 0.0), at(100.0, 0.0)], &opts());
        assert!(edges.is_empty());
    }

    #[test]
    fn single_particle_has_no_edges() {
        assert!(build(&[at(1.0, 1.0)], &opts()).is_empty());
        assert!(build(&[], &opts()).is_empty());
    }

    #[test]
    fn stride_skips_odd_indices_for_large_populations() {
        // 60 particles stacked on one point: only even indices participate.
        let ps: Vec<Particle> = (0..60).map(|_| at(10.0, 10.0)).collect();
        let mut o = opts();
        o.max_edges = usize::MAX;
        let edges = build(&ps, &o);
        // 30 candidates -> 30 * 29 / 2 pairs
        assert_eq!(edges.len(), 435);
    }
}
