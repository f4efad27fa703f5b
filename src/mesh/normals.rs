//! Normal recomputation for displaced meshes.

use glam::Vec3;
use super::Mesh;

/// Recomputes per-vertex normals from the mesh's current topology.
///
/// Accumulates unnormalized triangle cross products per vertex (area-weighted,
/// so sliver triangles contribute little) and normalizes at the end. This is a
/// flat recompute over whatever the positions currently are; displacement
/// builders call it after offsetting vertices rather than deriving analytic
/// normals.
pub fn recompute_normals(mesh: &mut Mesh) {
    mesh.normals.clear();
    mesh.normals.resize(mesh.positions.len(), Vec3::ZERO);

    for tri in mesh.indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let a = mesh.positions[i0];
        let b = mesh.positions[i1];
        let c = mesh.positions[i2];
        let face_normal = (b - a).cross(c - a);
        mesh.normals[i0] += face_normal;
        mesh.normals[i1] += face_normal;
        mesh.normals[i2] += face_normal;
    }

    for n in &mut mesh.normals {
        *n = n.normalize_or_zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{cylinder_band, disc_grid};

    #[test]
    fn test_flat_disc_normals_point_up() {
        let mesh = disc_grid(10.0, 8).unwrap();
        for n in &mesh.normals {
            assert!(
                (n.y - 1.0).abs() < 1e-5,
                "flat grid normal should be +Y, got {:?}",
                n
            );
        }
    }

    #[test]
    fn test_recomputed_normals_are_unit_length() {
        let mut mesh = cylinder_band(20.0, 6.0, 32, 4).unwrap();
        // Perturb one vertex so the recompute has real work to do.
        mesh.positions[10].x += 1.5;
        recompute_normals(&mut mesh);
        for n in &mesh.normals {
            let len = n.length();
            assert!(
                (len - 1.0).abs() < 1e-4 || len == 0.0,
                "normal length {} neither unit nor zero",
                len
            );
        }
    }

    #[test]
    fn test_cylinder_normals_point_outward() {
        let mesh = cylinder_band(10.0, 4.0, 48, 3).unwrap();
        for (p, n) in mesh.positions.iter().zip(mesh.normals.iter()) {
            let radial = glam::Vec3::new(p.x, 0.0, p.z).normalize_or_zero();
            assert!(
                n.dot(radial) > 0.7,
                "normal {:?} at {:?} does not face outward",
                n,
                p
            );
        }
    }
}
