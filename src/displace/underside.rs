//! Inverted bedrock displacement for the disc underside.
//!
//! Two circular caps hang below the disc: a broad shallow layer and a
//! narrower, deeper "crevice" layer. They are displaced independently and
//! never merged; the vertical offset between them is what reads as layered
//! rock from below. Displacement is a fixed sum of sine/cosine cross terms —
//! a frozen-octave stand-in for fractal noise — faded out toward the rim so
//! the silhouette hangs rather than bowls.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::material::smoothstep;
use crate::mesh::{circular_cap, recompute_normals, Mesh};
use super::ConfigError;

/// One hanging cap layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UndersideLayerConfig {
    pub radius: f32,
    /// Peak displacement depth.
    pub amplitude: f32,
    /// Vertical offset of the whole layer below the disc plane (negative).
    pub y_offset: f32,
    /// Shift applied to the relief field so the layers decorrelate.
    pub field_offset: (f32, f32),
    /// Spatial frequency multiplier for the relief field.
    pub frequency: f32,
}

/// Parameters for both underside layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UndersideConfig {
    pub rings: u32,
    pub radial_segments: u32,
    /// Exponent of the rim fade; tuned in the 0.35-0.5 range.
    pub fade_exponent: f32,
    /// Normalized depths where the rock/shadow blend begins and saturates.
    pub depth_blend: (f32, f32),
    pub layers: [UndersideLayerConfig; 2],
}

impl Default for UndersideConfig {
    fn default() -> Self {
        Self {
            rings: 48,
            radial_segments: 96,
            fade_exponent: 0.4,
            depth_blend: (0.15, 0.6),
            layers: [
                // Broad, shallow bedrock shelf.
                UndersideLayerConfig {
                    radius: 100.0,
                    amplitude: 22.0,
                    y_offset: -2.0,
                    field_offset: (0.0, 0.0),
                    frequency: 1.0,
                },
                // Narrow, deep crevice layer.
                UndersideLayerConfig {
                    radius: 62.0,
                    amplitude: 38.0,
                    y_offset: -9.0,
                    field_offset: (37.3, -54.1),
                    frequency: 1.7,
                },
            ],
        }
    }
}

impl UndersideConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.fade_exponent <= 0.0 {
            return Err(ConfigError::NonPositive {
                context: "underside fade exponent",
                value: self.fade_exponent,
            });
        }
        for layer in &self.layers {
            if layer.radius <= 0.0 {
                return Err(ConfigError::NonPositive {
                    context: "underside layer radius",
                    value: layer.radius,
                });
            }
            if layer.amplitude <= 0.0 {
                return Err(ConfigError::NonPositive {
                    context: "underside layer amplitude",
                    value: layer.amplitude,
                });
            }
            if layer.frequency <= 0.0 {
                return Err(ConfigError::NonPositive {
                    context: "underside layer frequency",
                    value: layer.frequency,
                });
            }
        }
        Ok(())
    }
}

/// One displaced cap plus its per-vertex shading input.
#[derive(Debug, Clone)]
pub struct UndersideLayer {
    pub mesh: Mesh,
    /// Continuous rock/shadow blend weight per vertex.
    pub depth_blend: Vec<f32>,
}

/// Rim fade: full displacement at the center, zero at the rim.
///
/// Values of `r` past 1 clamp to zero rather than going negative.
pub(crate) fn fade(r: f32, exponent: f32) -> f32 {
    (1.0 - r.min(1.0)).powf(exponent)
}

/// Fixed five-term relief field: cross products of sines and cosines at
/// geometrically increasing frequencies and decreasing amplitudes.
fn relief(x: f32, z: f32) -> f32 {
    0.48 * (x * 0.021).sin() * (z * 0.024).cos()
        + 0.26 * (x * 0.043).cos() * (z * 0.039).sin()
        + 0.14 * (x * 0.085).sin() * (z * 0.092).sin()
        + 0.08 * (x * 0.170).cos() * (z * 0.160).cos()
        + 0.04 * (x * 0.330).sin() * (z * 0.350).cos()
}

/// Displacement depth (non-negative, downward) for one layer at `(x, z)`.
pub(crate) fn layer_depth(
    layer: &UndersideLayerConfig,
    fade_exponent: f32,
    x: f32,
    z: f32,
) -> f32 {
    let fx = (x + layer.field_offset.0) * layer.frequency;
    let fz = (z + layer.field_offset.1) * layer.frequency;
    let raw = relief(fx, fz).max(0.0) * layer.amplitude;
    let r = x.hypot(z) / layer.radius;
    raw * fade(r, fade_exponent)
}

/// Builds both underside layers, shelf first, crevice second.
pub fn build_underside(cfg: &UndersideConfig) -> Result<[UndersideLayer; 2], ConfigError> {
    cfg.validate()?;
    Ok([build_layer(&cfg.layers[0], cfg)?, build_layer(&cfg.layers[1], cfg)?])
}

fn build_layer(
    layer: &UndersideLayerConfig,
    cfg: &UndersideConfig,
) -> Result<UndersideLayer, ConfigError> {
    let mut mesh = circular_cap(layer.radius, cfg.rings, cfg.radial_segments)?;

    mesh.positions.par_iter_mut().for_each(|p| {
        p.y = layer.y_offset - layer_depth(layer, cfg.fade_exponent, p.x, p.z);
    });
    recompute_normals(&mut mesh);

    let blend: Vec<f32> = mesh
        .positions
        .iter()
        .map(|p| {
            let normalized = (layer.y_offset - p.y) / layer.amplitude;
            smoothstep(cfg.depth_blend.0, cfg.depth_blend.1, normalized)
        })
        .collect();

    Ok(UndersideLayer { mesh, depth_blend: blend })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_is_monotone_and_vanishes_at_the_rim() {
        for &p in &[0.35, 0.4, 0.5] {
            let mut last = f32::MAX;
            for i in 0..=100 {
                let r = i as f32 / 100.0;
                let f = fade(r, p);
                assert!(f <= last, "fade increased at r={} (p={})", r, p);
                assert!(f >= 0.0);
                last = f;
            }
            assert!(fade(1.0, p) == 0.0);
            assert!(fade(1.5, p) == 0.0, "fade must clamp past the rim, not go negative");
        }
    }

    #[test]
    fn depth_is_never_negative() {
        let cfg = UndersideConfig::default();
        for layer in &cfg.layers {
            for i in 0..50 {
                for j in 0..50 {
                    let x = (i as f32 / 49.0 * 2.0 - 1.0) * layer.radius;
                    let z = (j as f32 / 49.0 * 2.0 - 1.0) * layer.radius;
                    assert!(layer_depth(layer, cfg.fade_exponent, x, z) >= 0.0);
                }
            }
        }
    }

    #[test]
    fn rim_vertices_sit_at_the_layer_offset() {
        let cfg = UndersideConfig::default();
        let [shelf, crevice] = build_underside(&cfg).unwrap();
        for (layer, built) in cfg.layers.iter().zip([&shelf, &crevice]) {
            for (p, ratio) in built.mesh.positions.iter().zip(built.mesh.radius_ratio.iter()) {
                if *ratio >= 1.0 {
                    assert!(
                        (p.y - layer.y_offset).abs() < 1e-5,
                        "rim vertex displaced: {:?}",
                        p
                    );
                }
            }
        }
    }

    #[test]
    fn layers_hang_at_different_depths() {
        let [shelf, crevice] = build_underside(&UndersideConfig::default()).unwrap();
        let shelf_min = shelf.mesh.positions.iter().map(|p| p.y).fold(f32::MAX, f32::min);
        let crevice_min = crevice.mesh.positions.iter().map(|p| p.y).fold(f32::MAX, f32::min);
        assert!(
            crevice_min < shelf_min,
            "crevice layer ({}) should hang below the shelf ({})",
            crevice_min,
            shelf_min
        );
    }

    #[test]
    fn some_regions_are_undisplaced() {
        // The relief clamp zeroes out negative lobes, so flat patches must
        // exist besides the faded rim.
        let cfg = UndersideConfig::default();
        let layer = &cfg.layers[0];
        let flat = (0..2000).filter(|i| {
            let ang = *i as f32 * 0.37;
            let r = (*i as f32 / 2000.0) * 0.9 * layer.radius;
            let (x, z) = (r * ang.cos(), r * ang.sin());
            layer_depth(layer, cfg.fade_exponent, x, z) == 0.0
        });
        assert!(flat.count() > 0, "clamp never engaged across the cap");
    }

    #[test]
    fn depth_blend_is_in_range_and_tracks_depth() {
        let [shelf, _] = build_underside(&UndersideConfig::default()).unwrap();
        assert_eq!(shelf.depth_blend.len(), shelf.mesh.vertex_count());
        assert!(shelf.depth_blend.iter().all(|w| (0.0..=1.0).contains(w)));

        // The deepest vertex must carry more blend than an undisplaced one.
        let deepest = shelf
            .mesh
            .positions
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.y.total_cmp(&b.1.y))
            .map(|(i, _)| i)
            .unwrap();
        assert!(shelf.depth_blend[deepest] > 0.2, "deepest vertex barely blended");
    }

    #[test]
    fn invalid_configs_fail_fast() {
        let mut cfg = UndersideConfig::default();
        cfg.fade_exponent = 0.0;
        assert!(build_underside(&cfg).is_err());

        cfg = UndersideConfig::default();
        cfg.layers[1].radius = -5.0;
        assert!(build_underside(&cfg).is_err());

        cfg = UndersideConfig::default();
        cfg.layers[0].amplitude = 0.0;
        assert!(build_underside(&cfg).is_err());
    }
}
