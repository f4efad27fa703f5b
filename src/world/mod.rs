//! One-shot assembly of the complete disc world.
//!
//! Everything is constructed at startup from a fixed seed and never mutated
//! afterward; the rendering front end may read the result from any number of
//! threads without synchronization. There is no persistence — a world is
//! regenerated from its seed on every process start, which is cheap and keeps
//! the seed the single source of truth.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::displace::{
    build_ornament_field, build_rim_wall, build_underside, ConfigError, Ornament,
    OrnamentFieldConfig, RimWall, UndersideConfig, UndersideLayer, WallConfig,
};
use crate::mesh::{disc_grid, Mesh, ShapeError};
use crate::rng::{Lcg, DEFAULT_SEED};

/// Which rim treatment the world gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallStyle {
    /// A continuous displaced cliff band.
    Cliff,
    /// A field of discrete peak ornaments.
    Peaks,
}

/// Full parameter set for a world build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Master seed; fixed by default so every run is identical.
    pub seed: u32,
    pub disc_radius: f32,
    pub disc_segments: u32,
    pub wall_style: WallStyle,
    pub wall: WallConfig,
    pub ornaments: OrnamentFieldConfig,
    pub underside: UndersideConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            disc_radius: 100.0,
            disc_segments: 128,
            wall_style: WallStyle::Cliff,
            wall: WallConfig::default(),
            ornaments: OrnamentFieldConfig::default(),
            underside: UndersideConfig::default(),
        }
    }
}

/// Errors from world construction.
///
/// Construction either fully succeeds or fails before returning any geometry;
/// there are no partial worlds.
#[derive(Error, Debug)]
pub enum GenError {
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// The generated world: immutable geometry plus shading inputs.
#[derive(Debug, Clone)]
pub struct DiscWorld {
    pub seed: u32,
    pub disc_radius: f32,
    /// The map-textured ground plane.
    pub disc: Mesh,
    /// Present for [`WallStyle::Cliff`].
    pub wall: Option<RimWall>,
    /// Present for [`WallStyle::Peaks`].
    pub ornaments: Option<Vec<Ornament>>,
    /// Bedrock shelf and crevice layers, in that order.
    pub underside: [UndersideLayer; 2],
}

impl DiscWorld {
    /// Builds the whole world from the configuration.
    ///
    /// A single generator instance is threaded through the build in a fixed
    /// order — disc, rim, underside — with the ornament field as the only
    /// stage that draws from it. The order is part of the reproducibility
    /// contract: reordering stages would reshuffle every later draw.
    pub fn generate(config: &WorldConfig) -> Result<DiscWorld, GenError> {
        let mut rng = Lcg::new(config.seed);

        let disc = disc_grid(config.disc_radius, config.disc_segments)?;

        let (wall, ornaments) = match config.wall_style {
            WallStyle::Cliff => (Some(build_rim_wall(&config.wall)?), None),
            WallStyle::Peaks => {
                (None, Some(build_ornament_field(&config.ornaments, &mut rng)?))
            }
        };

        let underside = build_underside(&config.underside)?;

        Ok(DiscWorld {
            seed: config.seed,
            disc_radius: config.disc_radius,
            disc,
            wall,
            ornaments,
            underside,
        })
    }

    /// Total vertex count across every generated mesh.
    pub fn vertex_count(&self) -> usize {
        let mut count = self.disc.vertex_count();
        if let Some(wall) = &self.wall {
            count += wall.mesh.vertex_count();
        }
        if let Some(peaks) = &self.ornaments {
            count += peaks.iter().map(|p| p.mesh.vertex_count()).sum::<usize>();
        }
        count + self.underside.iter().map(|l| l.mesh.vertex_count()).sum::<usize>()
    }

    /// Total triangle count across every generated mesh.
    pub fn triangle_count(&self) -> usize {
        let mut count = self.disc.triangle_count();
        if let Some(wall) = &self.wall {
            count += wall.mesh.triangle_count();
        }
        if let Some(peaks) = &self.ornaments {
            count += peaks.iter().map(|p| p.mesh.triangle_count()).sum::<usize>();
        }
        count + self.underside.iter().map(|l| l.mesh.triangle_count()).sum::<usize>()
    }

    /// Estimated in-memory size of all vertex and index data in bytes.
    pub fn byte_size(&self) -> usize {
        let mut size = self.disc.byte_size();
        if let Some(wall) = &self.wall {
            size += wall.mesh.byte_size();
        }
        if let Some(peaks) = &self.ornaments {
            size += peaks.iter().map(|p| p.mesh.byte_size()).sum::<usize>();
        }
        size + self.underside.iter().map(|l| l.mesh.byte_size()).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(style: WallStyle) -> WorldConfig {
        WorldConfig {
            disc_segments: 16,
            wall_style: style,
            wall: WallConfig { radial_segments: 48, height_segments: 4, ..Default::default() },
            underside: UndersideConfig { rings: 8, radial_segments: 24, ..Default::default() },
            ..Default::default()
        }
    }

    #[test]
    fn cliff_world_has_a_wall_and_no_peaks() {
        let world = DiscWorld::generate(&small_config(WallStyle::Cliff)).unwrap();
        assert!(world.wall.is_some());
        assert!(world.ornaments.is_none());
        assert!(world.vertex_count() > 0);
        assert!(world.triangle_count() > 0);
    }

    #[test]
    fn peaks_world_has_ornaments_and_no_wall() {
        let world = DiscWorld::generate(&small_config(WallStyle::Peaks)).unwrap();
        assert!(world.wall.is_none());
        let peaks = world.ornaments.as_ref().unwrap();
        let expected: usize = OrnamentFieldConfig::default()
            .rings
            .iter()
            .map(|r| r.count as usize)
            .sum();
        assert_eq!(peaks.len(), expected);
    }

    #[test]
    fn same_seed_rebuilds_the_same_world() {
        let cfg = small_config(WallStyle::Peaks);
        let a = DiscWorld::generate(&cfg).unwrap();
        let b = DiscWorld::generate(&cfg).unwrap();

        assert_eq!(a.disc.positions, b.disc.positions);
        let (pa, pb) = (a.ornaments.unwrap(), b.ornaments.unwrap());
        for (x, y) in pa.iter().zip(pb.iter()) {
            assert_eq!(x.mesh.positions, y.mesh.positions);
        }
        for (la, lb) in a.underside.iter().zip(b.underside.iter()) {
            assert_eq!(la.mesh.positions, lb.mesh.positions);
        }
    }

    #[test]
    fn different_seeds_differ_in_the_peak_field() {
        let mut cfg = small_config(WallStyle::Peaks);
        let a = DiscWorld::generate(&cfg).unwrap();
        cfg.seed = cfg.seed.wrapping_add(1);
        let b = DiscWorld::generate(&cfg).unwrap();

        let (pa, pb) = (a.ornaments.unwrap(), b.ornaments.unwrap());
        let any_differ = pa
            .iter()
            .zip(pb.iter())
            .any(|(x, y)| x.mesh.positions != y.mesh.positions);
        assert!(any_differ, "seed change left the peak field untouched");
    }

    #[test]
    fn bad_config_fails_before_returning_geometry() {
        let mut cfg = small_config(WallStyle::Cliff);
        cfg.disc_radius = -10.0;
        assert!(DiscWorld::generate(&cfg).is_err());

        let mut cfg = small_config(WallStyle::Cliff);
        cfg.wall.height = 0.0;
        assert!(DiscWorld::generate(&cfg).is_err());
    }
}
