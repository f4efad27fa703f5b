//! Discrete peak ornaments forming the rim as a field of jagged spires.
//!
//! This is the only stage that consumes the seeded generator, and it does so
//! in one fixed order: ring by ring, instance by instance, and within an
//! instance the eight placement draws followed by two jitter draws per vertex
//! in mesh index order. Changing that order would silently reshuffle every
//! later shape, so any edit here has to preserve it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::material::MaterialBand;
use crate::mesh::{polygon_cone, recompute_normals, Mesh};
use crate::rng::Lcg;
use super::ConfigError;

/// One ring of peak instances at a shared nominal radius.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RingConfig {
    /// Number of instances spaced evenly around the ring.
    pub count: u32,
    /// Nominal placement radius.
    pub ring_radius: f32,
    /// Min/max peak height; also the normalization range for material tiers.
    pub height_range: (f32, f32),
    /// Min/max cone base radius.
    pub base_radius_range: (f32, f32),
    /// Maximum radial deviation from the nominal ring radius.
    pub radial_jitter: f32,
    /// Maximum angular deviation from the ideal evenly spaced slot (radians).
    pub angle_jitter: f32,
    /// Bound on random yaw/pitch/roll, in degrees.
    pub max_tilt_deg: f32,
}

/// Parameters for the whole ornament field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrnamentFieldConfig {
    pub rings: Vec<RingConfig>,
    /// Vertex jitter strength as a fraction of each instance's base radius.
    pub roughness: f32,
}

impl Default for OrnamentFieldConfig {
    fn default() -> Self {
        Self {
            rings: vec![
                RingConfig {
                    count: 80,
                    ring_radius: 98.0,
                    height_range: (1.4, 3.8),
                    base_radius_range: (0.7, 1.6),
                    radial_jitter: 1.2,
                    angle_jitter: 0.05,
                    max_tilt_deg: 8.0,
                },
                RingConfig {
                    count: 52,
                    ring_radius: 103.5,
                    height_range: (2.6, 6.5),
                    base_radius_range: (1.1, 2.4),
                    radial_jitter: 1.8,
                    angle_jitter: 0.05,
                    max_tilt_deg: 10.0,
                },
                RingConfig {
                    count: 34,
                    ring_radius: 109.0,
                    height_range: (4.0, 9.5),
                    base_radius_range: (1.6, 3.2),
                    radial_jitter: 2.4,
                    angle_jitter: 0.05,
                    max_tilt_deg: 12.0,
                },
            ],
            roughness: 0.35,
        }
    }
}

impl RingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::NonPositive { context: "ring count", value: 0.0 });
        }
        if self.ring_radius <= 0.0 {
            return Err(ConfigError::NonPositive { context: "ring radius", value: self.ring_radius });
        }
        if self.height_range.0 <= 0.0 || self.height_range.1 <= self.height_range.0 {
            return Err(ConfigError::EmptyRange {
                context: "ring height range",
                lo: self.height_range.0,
                hi: self.height_range.1,
            });
        }
        if self.base_radius_range.0 <= 0.0 || self.base_radius_range.1 <= self.base_radius_range.0 {
            return Err(ConfigError::EmptyRange {
                context: "ring base radius range",
                lo: self.base_radius_range.0,
                hi: self.base_radius_range.1,
            });
        }
        Ok(())
    }
}

/// One placed peak with all its frozen draw results.
///
/// Every field is drawn once at construction; nothing about an instance ever
/// changes afterward.
#[derive(Debug, Clone)]
pub struct Ornament {
    pub mesh: Mesh,
    pub material: MaterialBand,
    /// Final placement angle around the disc (radians).
    pub angle: f32,
    pub height: f32,
    pub base_radius: f32,
    /// Polygon order of the cone base, 3-6.
    pub sides: u32,
}

/// Builds the full peak field, consuming `rng` in the documented fixed order.
pub fn build_ornament_field(
    cfg: &OrnamentFieldConfig,
    rng: &mut Lcg,
) -> Result<Vec<Ornament>, ConfigError> {
    if cfg.rings.is_empty() {
        return Err(ConfigError::NoLayers { context: "ornament field" });
    }
    if cfg.roughness < 0.0 {
        return Err(ConfigError::NonPositive { context: "ornament roughness", value: cfg.roughness });
    }
    for ring in &cfg.rings {
        ring.validate()?;
    }

    let mut out = Vec::with_capacity(cfg.rings.iter().map(|r| r.count as usize).sum());
    for ring in &cfg.rings {
        for i in 0..ring.count {
            out.push(build_instance(ring, cfg.roughness, i, rng)?);
        }
    }
    Ok(out)
}

fn build_instance(
    ring: &RingConfig,
    roughness: f32,
    index: u32,
    rng: &mut Lcg,
) -> Result<Ornament, ConfigError> {
    let slot = index as f64 / ring.count as f64 * std::f64::consts::TAU;
    let aj = ring.angle_jitter as f64;
    let tilt = (ring.max_tilt_deg as f64).to_radians();

    // Placement draws, in order: angle, height, base radius, polygon order,
    // radial jitter, yaw, pitch, roll.
    let angle = (slot + rng.range(-aj, aj)) as f32;
    let height = rng.range(ring.height_range.0 as f64, ring.height_range.1 as f64) as f32;
    let base_radius =
        rng.range(ring.base_radius_range.0 as f64, ring.base_radius_range.1 as f64) as f32;
    let sides = rng.pick(3, 6);
    let radial = ring.ring_radius
        + rng.range(-ring.radial_jitter as f64, ring.radial_jitter as f64) as f32;
    let yaw = rng.range(-tilt, tilt) as f32;
    let pitch = rng.range(-tilt, tilt) as f32;
    let roll = rng.range(-tilt, tilt) as f32;

    let mut mesh = polygon_cone(base_radius, height, sides)?;

    // Vertex jitter fades from the base to nothing at the tip; the cone's
    // radius ratio is exactly that fade. Draws happen for every vertex (tip
    // included) so the consumption count per instance is fixed.
    for idx in 0..mesh.positions.len() {
        let outward_draw = rng.range(-1.0, 1.0) as f32;
        let sideways_draw = rng.range(-1.0, 1.0) as f32;
        let scale = mesh.radius_ratio[idx] * roughness * base_radius;
        if scale > 0.0 {
            let p = mesh.positions[idx];
            let outward = Vec3::new(p.x, 0.0, p.z).normalize_or_zero();
            let sideways = Vec3::new(-outward.z, 0.0, outward.x);
            mesh.positions[idx] = p + outward * outward_draw * scale + sideways * sideways_draw * scale;
        }
    }

    recompute_normals(&mut mesh);
    mesh.rotate(yaw, pitch, roll);
    mesh.translate(Vec3::new(radial * angle.cos(), 0.0, radial * angle.sin()));

    let normalized =
        (height - ring.height_range.0) / (ring.height_range.1 - ring.height_range.0);

    Ok(Ornament {
        mesh,
        material: MaterialBand::classify(normalized),
        angle,
        height,
        base_radius,
        sides,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    fn single_ring(count: u32) -> OrnamentFieldConfig {
        OrnamentFieldConfig {
            rings: vec![RingConfig {
                count,
                ring_radius: 98.0,
                height_range: (1.4, 3.8),
                base_radius_range: (0.7, 1.6),
                radial_jitter: 1.2,
                angle_jitter: 0.05,
                max_tilt_deg: 8.0,
            }],
            roughness: 0.35,
        }
    }

    #[test]
    fn instances_stay_near_their_even_slots() {
        let cfg = single_ring(80);
        let mut rng = Lcg::new(42);
        let field = build_ornament_field(&cfg, &mut rng).unwrap();
        assert_eq!(field.len(), 80);

        for (i, peak) in field.iter().enumerate() {
            let slot = i as f32 / 80.0 * TAU;
            assert!(
                (peak.angle - slot).abs() <= 0.05 + 1e-5,
                "instance {} strayed from its slot: {} vs {}",
                i,
                peak.angle,
                slot
            );
        }

        // Coverage spans the full turn.
        let span = field.last().unwrap().angle - field[0].angle;
        assert!(span > TAU * 0.95, "ring covers only {} rad", span);
    }

    #[test]
    fn field_is_bit_reproducible() {
        let cfg = OrnamentFieldConfig::default();
        let a = build_ornament_field(&cfg, &mut Lcg::new(42)).unwrap();
        let b = build_ornament_field(&cfg, &mut Lcg::new(42)).unwrap();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.mesh.positions, y.mesh.positions);
            assert_eq!(x.sides, y.sides);
            assert_eq!(x.material, y.material);
        }
    }

    #[test]
    fn earlier_rings_are_unaffected_by_later_ones() {
        // The draw-order contract: appending a ring must not disturb any
        // instance generated before it.
        let short = single_ring(30);
        let mut long = single_ring(30);
        long.rings.push(RingConfig {
            count: 10,
            ring_radius: 110.0,
            height_range: (4.0, 9.5),
            base_radius_range: (1.6, 3.2),
            radial_jitter: 2.4,
            angle_jitter: 0.05,
            max_tilt_deg: 12.0,
        });

        let a = build_ornament_field(&short, &mut Lcg::new(7)).unwrap();
        let b = build_ornament_field(&long, &mut Lcg::new(7)).unwrap();
        for (x, y) in a.iter().zip(b.iter().take(30)) {
            assert_eq!(x.mesh.positions, y.mesh.positions);
        }
    }

    #[test]
    fn tips_are_never_jittered() {
        let mut cfg = single_ring(12);
        cfg.rings[0].max_tilt_deg = 0.0;
        let field = build_ornament_field(&cfg, &mut Lcg::new(99)).unwrap();
        for peak in &field {
            // With tilt disabled the apex must sit exactly above the
            // placement point at the drawn height.
            let apex = *peak.mesh.positions.last().unwrap();
            assert!((apex.y - peak.height).abs() < 1e-5, "apex displaced: {:?}", apex);
            let center = Vec3::new(apex.x, 0.0, apex.z);
            let radial = center.length();
            assert!(
                (radial - 98.0).abs() <= 1.2 + 1e-4,
                "apex drifted off the ring: {}",
                radial
            );
        }
    }

    #[test]
    fn polygon_orders_stay_in_range() {
        let field =
            build_ornament_field(&OrnamentFieldConfig::default(), &mut Lcg::new(42)).unwrap();
        assert!(field.iter().all(|p| (3..=6).contains(&p.sides)));
        // All four orders should appear somewhere in a field this large.
        for sides in 3..=6u32 {
            assert!(field.iter().any(|p| p.sides == sides), "no {}-sided peak", sides);
        }
    }

    #[test]
    fn material_tier_follows_normalized_height() {
        let field =
            build_ornament_field(&OrnamentFieldConfig::default(), &mut Lcg::new(42)).unwrap();
        let cfg = OrnamentFieldConfig::default();
        let mut idx = 0;
        for ring in &cfg.rings {
            for _ in 0..ring.count {
                let peak = &field[idx];
                let normalized = (peak.height - ring.height_range.0)
                    / (ring.height_range.1 - ring.height_range.0);
                assert_eq!(peak.material, MaterialBand::classify(normalized));
                idx += 1;
            }
        }
    }

    #[test]
    fn invalid_rings_fail_fast() {
        let mut cfg = single_ring(0);
        assert!(build_ornament_field(&cfg, &mut Lcg::new(1)).is_err());

        cfg = single_ring(10);
        cfg.rings[0].height_range = (3.0, 2.0);
        assert!(build_ornament_field(&cfg, &mut Lcg::new(1)).is_err());

        cfg = single_ring(10);
        cfg.rings[0].base_radius_range = (0.0, 0.0);
        assert!(build_ornament_field(&cfg, &mut Lcg::new(1)).is_err());

        let empty = OrnamentFieldConfig { rings: Vec::new(), roughness: 0.3 };
        assert!(build_ornament_field(&empty, &mut Lcg::new(1)).is_err());
    }
}
