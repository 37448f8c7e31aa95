//! Host-facing configuration.
//!
//! Every field has a default taken from `constants.rs`, so hosts pass only the
//! keys they want to change, e.g. `{"maxEdges": 80, "seed": 7}`.

use crate::constants::*;
use crate::error::{FieldError, Result};
use crate::particle::Rgba;
use crate::proximity::ProximityOptions;
use crate::reactor::Curve;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Thresholds {
    pub size: f32,
    pub speed: f32,
    pub opacity: f32,
    pub density: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            size: SIZE_THRESHOLD,
            speed: SPEED_THRESHOLD,
            opacity: OPACITY_THRESHOLD,
            density: DENSITY_THRESHOLD,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldOptions {
    pub max_particles: usize,
    pub max_distance: f32,
    pub max_edges: usize,
    pub stride_threshold: usize,
    pub edge_base_opacity: f32,
    pub edge_line_width: f32,
    pub edge_color: [u8; 3],
    pub palette: Vec<[u8; 3]>,
    pub rebuild_every: u32,
    pub resize_debounce_ms: u32,
    pub size_curve: Curve,
    pub speed_curve: Curve,
    pub opacity_curve: Curve,
    pub density_curve: Curve,
    pub thresholds: Thresholds,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            max_particles: MAX_PARTICLES,
            max_distance: MAX_DISTANCE,
            max_edges: MAX_EDGES,
            stride_threshold: STRIDE_THRESHOLD,
            edge_base_opacity: EDGE_BASE_OPACITY,
            edge_line_width: EDGE_LINE_WIDTH,
            edge_color: EDGE_COLOR,
            palette: DEFAULT_PALETTE.to_vec(),
            rebuild_every: REBUILD_EVERY,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
            size_curve: Curve::new(SIZE_STOPS.to_vec()),
            speed_curve: Curve::new(SPEED_STOPS.to_vec()),
            opacity_curve: Curve::new(OPACITY_STOPS.to_vec()),
            density_curve: Curve::new(DENSITY_STOPS.to_vec()),
            thresholds: Thresholds::default(),
            seed: None,
        }
    }
}

impl FieldOptions {
    /// Parse and validate options from a JSON object. An empty string means
    /// all defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let opts: Self = serde_json::from_str(json)?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rebuild_every == 0 {
            return Err(FieldError::InvalidOptions(
                "rebuildEvery must be at least 1".into(),
            ));
        }
        if self.max_distance.is_nan() || self.max_distance <= 0.0 {
            return Err(FieldError::InvalidOptions(
                "maxDistance must be positive".into(),
            ));
        }
        if self.palette.is_empty() {
            return Err(FieldError::InvalidOptions("palette is empty".into()));
        }
        for (name, curve) in [
            ("sizeCurve", &self.size_curve),
            ("speedCurve", &self.speed_curve),
            ("opacityCurve", &self.opacity_curve),
            ("densityCurve", &self.density_curve),
        ] {
            curve
                .check()
                .map_err(|why| FieldError::InvalidOptions(format!("{name}: {why}")))?;
        }
        Ok(())
    }

    pub fn proximity(&self) -> ProximityOptions {
        ProximityOptions {
            max_distance: self.max_distance,
            max_edges: self.max_edges,
            base_opacity: self.edge_base_opacity,
            stride_threshold: self.stride_threshold,
        }
    }

    /// Edge stroke color; the alpha is replaced per edge.
    #[inline]
    pub fn edge_rgba(&self) -> Rgba {
        Rgba::from_rgb(self.edge_color, 1.0)
    }
}
