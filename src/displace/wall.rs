//! Continuous rim-wall cliff displacement.
//!
//! The wall wraps the full circumference, so every displacement term must be
//! exactly 2π-periodic in the angle: harmonic counts around the circumference
//! are whole integers, which closes the seam by construction instead of
//! relying on noise lookups agreeing across the wrap.

use glam::Vec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::material::snow_blend;
use crate::mesh::{cylinder_band, recompute_normals, Mesh};
use super::ConfigError;

/// One horizontal rock-banding layer: a sine in both angle and height.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StrataLayer {
    pub amplitude: f32,
    /// Whole periods around the circumference.
    pub theta_cycles: u32,
    /// Spatial frequency along the wall height.
    pub height_freq: f32,
    pub phase: f32,
}

/// One large-scale cliff undulation layer: a sine in angle only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BulgeLayer {
    pub amplitude: f32,
    /// Whole periods around the circumference.
    pub theta_cycles: u32,
    pub phase: f32,
}

/// Parameters for the continuous cliff wall.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallConfig {
    /// Nominal wall radius (matches the disc radius).
    pub radius: f32,
    /// Total wall height.
    pub height: f32,
    pub radial_segments: u32,
    pub height_segments: u32,
    /// Coarse-to-fine banding layers (decreasing amplitude, rising frequency).
    pub strata: Vec<StrataLayer>,
    /// Coarse-to-fine undulation layers, independent of height.
    pub bulge: Vec<BulgeLayer>,
    /// Amplitude of the vertical silhouette jitter.
    pub silhouette_amp: f32,
    /// Whole periods of the silhouette jitter around the circumference.
    pub silhouette_cycles: u32,
    /// Height frequency of the silhouette jitter.
    pub silhouette_height_freq: f32,
    /// Normalized heights where snow cover begins and saturates.
    pub snow_line: (f32, f32),
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            radius: 100.0,
            height: 14.0,
            radial_segments: 384,
            height_segments: 24,
            strata: vec![
                StrataLayer { amplitude: 0.55, theta_cycles: 3, height_freq: 0.8, phase: 0.0 },
                StrataLayer { amplitude: 0.25, theta_cycles: 9, height_freq: 2.1, phase: 1.3 },
                StrataLayer { amplitude: 0.12, theta_cycles: 21, height_freq: 4.7, phase: 2.6 },
            ],
            bulge: vec![
                BulgeLayer { amplitude: 0.90, theta_cycles: 2, phase: 0.7 },
                BulgeLayer { amplitude: 0.40, theta_cycles: 5, phase: 2.9 },
                BulgeLayer { amplitude: 0.18, theta_cycles: 11, phase: 4.4 },
            ],
            silhouette_amp: 0.35,
            silhouette_cycles: 13,
            silhouette_height_freq: 0.9,
            snow_line: (0.55, 0.80),
        }
    }
}

impl WallConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.radius <= 0.0 {
            return Err(ConfigError::NonPositive { context: "wall radius", value: self.radius });
        }
        if self.height <= 0.0 {
            return Err(ConfigError::NonPositive { context: "wall height", value: self.height });
        }
        if self.strata.is_empty() && self.bulge.is_empty() {
            return Err(ConfigError::NoLayers { context: "wall relief" });
        }
        let amplitude: f32 = self.strata.iter().map(|l| l.amplitude.abs()).sum::<f32>()
            + self.bulge.iter().map(|l| l.amplitude.abs()).sum::<f32>();
        if amplitude >= self.radius {
            return Err(ConfigError::ExcessiveRelief { amplitude, radius: self.radius });
        }
        Ok(())
    }
}

/// The displaced wall plus per-vertex shading inputs.
#[derive(Debug, Clone)]
pub struct RimWall {
    pub mesh: Mesh,
    /// Displaced height of each vertex normalized into [0, 1].
    pub normalized_height: Vec<f32>,
    /// Continuous snow-cover weight per vertex.
    pub snow_blend: Vec<f32>,
}

/// Radial relief at a wall-local angle and height: strata plus bulge.
pub(crate) fn radial_relief(cfg: &WallConfig, theta: f32, y: f32) -> f32 {
    let strata: f32 = cfg
        .strata
        .iter()
        .map(|l| l.amplitude * (theta * l.theta_cycles as f32 + y * l.height_freq + l.phase).sin())
        .sum();
    let bulge: f32 = cfg
        .bulge
        .iter()
        .map(|l| l.amplitude * (theta * l.theta_cycles as f32 + l.phase).sin())
        .sum();
    strata + bulge
}

/// Vertical silhouette jitter at a wall-local angle and height.
pub(crate) fn silhouette_jitter(cfg: &WallConfig, theta: f32, y: f32) -> f32 {
    cfg.silhouette_amp * (theta * cfg.silhouette_cycles as f32 + y * cfg.silhouette_height_freq).sin()
}

/// Builds the displaced rim wall.
///
/// Every vertex of the base band is pushed radially by the relief at its
/// `(θ, y)` and nudged vertically by the silhouette jitter; normals are then
/// recomputed from the displaced topology. The whole pass is a pure function
/// of vertex position, so it parallelizes without affecting reproducibility.
pub fn build_rim_wall(cfg: &WallConfig) -> Result<RimWall, ConfigError> {
    cfg.validate()?;

    let mut mesh = cylinder_band(cfg.radius, cfg.height, cfg.radial_segments, cfg.height_segments)?;

    mesh.positions.par_iter_mut().for_each(|p| {
        let theta = p.z.atan2(p.x);
        let y = p.y;
        let r = p.x.hypot(p.z);
        let new_r = r + radial_relief(cfg, theta, y);
        let scale = new_r / r;
        *p = Vec3::new(p.x * scale, y + silhouette_jitter(cfg, theta, y), p.z * scale);
    });

    recompute_normals(&mut mesh);

    let normalized_height: Vec<f32> = mesh
        .positions
        .iter()
        .map(|p| (p.y / cfg.height).clamp(0.0, 1.0))
        .collect();
    let snow: Vec<f32> = normalized_height
        .iter()
        .map(|&h| snow_blend(h, cfg.snow_line.0, cfg.snow_line.1))
        .collect();

    Ok(RimWall { mesh, normalized_height, snow_blend: snow })
}
