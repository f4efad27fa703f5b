//! Displacement engine: turns undisplaced base shapes into jagged terrain.
//!
//! Three variants: a continuous rim-wall cliff driven by exactly-periodic
//! harmonics, a field of discrete peak ornaments driven by the seeded
//! generator, and the inverted bedrock caps hanging under the disc. The wall
//! and underside use only smooth periodic functions of position, so they are
//! order-independent and seamless; the ornament field is the sole consumer of
//! generator draws and runs strictly sequentially.

mod wall;
mod ornament;
mod underside;

pub use wall::{RimWall, StrataLayer, BulgeLayer, WallConfig, build_rim_wall};
pub use ornament::{Ornament, RingConfig, OrnamentFieldConfig, build_ornament_field};
pub use underside::{UndersideLayer, UndersideLayerConfig, UndersideConfig, build_underside};

pub(crate) use wall::radial_relief;
pub(crate) use underside::layer_depth;

use thiserror::Error;
use crate::mesh::ShapeError;

/// Configuration errors for the displacement builders.
///
/// All of these indicate a programming mistake in the supplied parameters and
/// are raised before any geometry is produced.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{context}: {value} must be positive")]
    NonPositive { context: &'static str, value: f32 },
    #[error("{context}: range [{lo}, {hi}) is empty or inverted")]
    EmptyRange { context: &'static str, lo: f32, hi: f32 },
    #[error("{context}: at least one layer is required")]
    NoLayers { context: &'static str },
    #[error("total radial relief amplitude {amplitude} exceeds the wall radius {radius}")]
    ExcessiveRelief { amplitude: f32, radius: f32 },
    #[error(transparent)]
    Shape(#[from] ShapeError),
}
