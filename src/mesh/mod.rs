//! Mesh substrate for the procedural shapes.
//!
//! Provides the indexed triangle [`Mesh`] the displacement builders operate on,
//! undisplaced base shapes with UVs, and normal recomputation over displaced
//! topology.

mod shapes;
mod normals;

pub use shapes::{disc_grid, cylinder_band, circular_cap, polygon_cone};
pub use normals::recompute_normals;

use glam::{EulerRot, Quat, Vec3};
use thiserror::Error;

/// Errors raised by base-shape construction.
///
/// These indicate misconfiguration, not runtime conditions; builders fail fast
/// before producing any geometry.
#[derive(Error, Debug)]
pub enum ShapeError {
    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f32),
    #[error("height must be positive, got {0}")]
    NonPositiveHeight(f32),
    #[error("{axis} segment count {got} is below the minimum {min}")]
    TooFewSegments {
        axis: &'static str,
        got: u32,
        min: u32,
    },
}

/// An indexed triangle mesh with per-vertex attributes.
///
/// `radius_ratio` is the vertex's parametric distance from the shape center
/// divided by the shape's nominal radius. The disc top keeps values above 1.0
/// for grid corners outside the clip circle; renderers discard those samples
/// rather than the mesh (square parameterization, circular clip).
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<[f32; 2]>,
    pub radius_ratio: Vec<f32>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Translates every vertex by `offset`. Normals are unaffected.
    pub fn translate(&mut self, offset: Vec3) {
        for p in &mut self.positions {
            *p += offset;
        }
    }

    /// Rotates positions and normals by yaw/pitch/roll (radians, Y-X-Z order).
    pub fn rotate(&mut self, yaw: f32, pitch: f32, roll: f32) {
        let q = Quat::from_euler(EulerRot::YXZ, yaw, pitch, roll);
        for p in &mut self.positions {
            *p = q * *p;
        }
        for n in &mut self.normals {
            *n = q * *n;
        }
    }

    /// Estimated in-memory size of the vertex and index data in bytes.
    pub fn byte_size(&self) -> usize {
        self.positions.len() * 12
            + self.normals.len() * 12
            + self.uvs.len() * 8
            + self.radius_ratio.len() * 4
            + self.indices.len() * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_moves_positions_only() {
        let mut mesh = disc_grid(10.0, 4).unwrap();
        let normals_before = mesh.normals.clone();
        mesh.translate(Vec3::new(0.0, 5.0, 0.0));
        assert!(mesh.positions.iter().all(|p| p.y == 5.0));
        assert_eq!(mesh.normals, normals_before);
    }

    #[test]
    fn test_rotate_keeps_normals_unit_length() {
        let mut mesh = polygon_cone(1.0, 2.0, 5).unwrap();
        mesh.rotate(0.7, 0.2, -0.4);
        for n in &mesh.normals {
            assert!((n.length() - 1.0).abs() < 1e-4, "normal {:?} not unit", n);
        }
    }

    #[test]
    fn test_byte_size_counts_all_channels() {
        let mesh = circular_cap(5.0, 3, 12).unwrap();
        let expected = mesh.positions.len() * 12
            + mesh.normals.len() * 12
            + mesh.uvs.len() * 8
            + mesh.radius_ratio.len() * 4
            + mesh.indices.len() * 4;
        assert_eq!(mesh.byte_size(), expected);
    }
}
