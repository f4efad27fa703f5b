//! Procedural flat-disc world generator.
//!
//! This crate builds the geometry for a stylized disc-shaped world: a circular
//! ground plane textured with a world map under an azimuthal-equidistant
//! projection, a ring of procedural ice cliffs (or discrete rock spires), and an
//! inverted, displaced bedrock underside. All shapes are derived from a single
//! seeded generator so every run reproduces the same world.

pub mod rng;
pub mod projection;
pub mod mesh;
pub mod displace;
pub mod material;
pub mod world;
pub mod export;

pub use rng::Lcg;
pub use projection::{GeoCoord, MapUv, project, unproject, southern_cutoff_deg};
pub use mesh::{Mesh, ShapeError};
pub use displace::{RimWall, Ornament, UndersideLayer, WallConfig, OrnamentFieldConfig, UndersideConfig};
pub use material::MaterialBand;
pub use world::{DiscWorld, WorldConfig, WallStyle, GenError};
