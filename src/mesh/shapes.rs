//! Undisplaced base shapes.
//!
//! All shapes are built around the +Y axis: the disc top faces up, the rim
//! band faces outward, the underside cap faces down. The disc uses a square
//! grid parameterization so its UVs carry no polar wrap seam; the circular
//! silhouette comes from discarding samples past the clip radius at shading
//! time, not from the mesh outline.

use glam::Vec3;
use std::f32::consts::TAU;

use super::{Mesh, ShapeError, recompute_normals};

/// Builds the disc-top ground plane as a square grid on y = 0.
///
/// UVs span the unit square; (0.5, 0.5) is the disc center. `radius_ratio`
/// exceeds 1.0 for corner vertices outside the inscribed circle — those are
/// the samples a renderer masks out.
pub fn disc_grid(radius: f32, segments: u32) -> Result<Mesh, ShapeError> {
    if radius <= 0.0 {
        return Err(ShapeError::NonPositiveRadius(radius));
    }
    if segments < 2 {
        return Err(ShapeError::TooFewSegments { axis: "grid", got: segments, min: 2 });
    }

    let side = segments + 1;
    let mut mesh = Mesh::default();
    mesh.positions.reserve((side * side) as usize);

    for j in 0..side {
        let v = j as f32 / segments as f32;
        let z = (v * 2.0 - 1.0) * radius;
        for i in 0..side {
            let u = i as f32 / segments as f32;
            let x = (u * 2.0 - 1.0) * radius;
            mesh.positions.push(Vec3::new(x, 0.0, z));
            mesh.uvs.push([u, v]);
            mesh.radius_ratio.push(x.hypot(z) / radius);
        }
    }

    for j in 0..segments {
        for i in 0..segments {
            let i00 = j * side + i;
            let i10 = i00 + 1;
            let i01 = i00 + side;
            let i11 = i01 + 1;
            mesh.indices.extend_from_slice(&[i00, i01, i11, i00, i11, i10]);
        }
    }

    recompute_normals(&mut mesh);
    Ok(mesh)
}

/// Builds an open-ended cylindrical band from y = 0 up to y = `height`.
///
/// The seam column is duplicated (first and last vertex of each row coincide)
/// so UVs can wrap without interpolation artifacts; any displacement applied
/// to this shape must be exactly 2π-periodic in the angle to keep the seam
/// closed.
pub fn cylinder_band(
    radius: f32,
    height: f32,
    radial_segments: u32,
    height_segments: u32,
) -> Result<Mesh, ShapeError> {
    if radius <= 0.0 {
        return Err(ShapeError::NonPositiveRadius(radius));
    }
    if height <= 0.0 {
        return Err(ShapeError::NonPositiveHeight(height));
    }
    if radial_segments < 3 {
        return Err(ShapeError::TooFewSegments { axis: "radial", got: radial_segments, min: 3 });
    }
    if height_segments < 1 {
        return Err(ShapeError::TooFewSegments { axis: "height", got: height_segments, min: 1 });
    }

    let cols = radial_segments + 1;
    let mut mesh = Mesh::default();

    for j in 0..=height_segments {
        let t = j as f32 / height_segments as f32;
        let y = t * height;
        for i in 0..cols {
            let s = i as f32 / radial_segments as f32;
            let theta = s * TAU;
            mesh.positions.push(Vec3::new(radius * theta.cos(), y, radius * theta.sin()));
            mesh.uvs.push([s, t]);
            mesh.radius_ratio.push(1.0);
        }
    }

    for j in 0..height_segments {
        for i in 0..radial_segments {
            let i00 = j * cols + i;
            let i10 = i00 + 1;
            let i01 = i00 + cols;
            let i11 = i01 + 1;
            mesh.indices.extend_from_slice(&[i00, i01, i11, i00, i11, i10]);
        }
    }

    recompute_normals(&mut mesh);
    Ok(mesh)
}

/// Builds a downward-facing circular cap on y = 0 (the underside base).
pub fn circular_cap(radius: f32, rings: u32, radial_segments: u32) -> Result<Mesh, ShapeError> {
    if radius <= 0.0 {
        return Err(ShapeError::NonPositiveRadius(radius));
    }
    if rings < 1 {
        return Err(ShapeError::TooFewSegments { axis: "ring", got: rings, min: 1 });
    }
    if radial_segments < 3 {
        return Err(ShapeError::TooFewSegments { axis: "radial", got: radial_segments, min: 3 });
    }

    let cols = radial_segments + 1;
    let mut mesh = Mesh::default();

    // Center vertex, then concentric rings outward, seam column duplicated.
    mesh.positions.push(Vec3::ZERO);
    mesh.uvs.push([0.5, 0.5]);
    mesh.radius_ratio.push(0.0);

    for k in 1..=rings {
        let ratio = k as f32 / rings as f32;
        let r = ratio * radius;
        for i in 0..cols {
            let theta = i as f32 / radial_segments as f32 * TAU;
            let (x, z) = (r * theta.cos(), r * theta.sin());
            mesh.positions.push(Vec3::new(x, 0.0, z));
            mesh.uvs.push([0.5 + 0.5 * x / radius, 0.5 + 0.5 * z / radius]);
            mesh.radius_ratio.push(ratio);
        }
    }

    let ring_start = |k: u32| 1 + (k - 1) * cols;

    // Fan around the center against the first ring.
    for i in 0..radial_segments {
        mesh.indices.extend_from_slice(&[0, ring_start(1) + i, ring_start(1) + i + 1]);
    }

    // Quads between consecutive rings, wound to face -Y.
    for k in 1..rings {
        let inner = ring_start(k);
        let outer = ring_start(k + 1);
        for i in 0..radial_segments {
            let a = inner + i;
            let b = outer + i;
            mesh.indices.extend_from_slice(&[a, b, b + 1, a, b + 1, a + 1]);
        }
    }

    recompute_normals(&mut mesh);
    Ok(mesh)
}

/// Builds an open cone with a regular polygon base (3-6 sides for ornaments).
///
/// Base ring sits on y = 0, apex at y = `height`. `radius_ratio` runs from 1.0
/// at the base to 0.0 at the tip, which is what ornament jitter scales by.
pub fn polygon_cone(base_radius: f32, height: f32, sides: u32) -> Result<Mesh, ShapeError> {
    if base_radius <= 0.0 {
        return Err(ShapeError::NonPositiveRadius(base_radius));
    }
    if height <= 0.0 {
        return Err(ShapeError::NonPositiveHeight(height));
    }
    if sides < 3 {
        return Err(ShapeError::TooFewSegments { axis: "side", got: sides, min: 3 });
    }

    let mut mesh = Mesh::default();

    for i in 0..sides {
        let theta = i as f32 / sides as f32 * TAU;
        mesh.positions.push(Vec3::new(base_radius * theta.cos(), 0.0, base_radius * theta.sin()));
        mesh.uvs.push([i as f32 / sides as f32, 0.0]);
        mesh.radius_ratio.push(1.0);
    }
    let apex = sides;
    mesh.positions.push(Vec3::new(0.0, height, 0.0));
    mesh.uvs.push([0.5, 1.0]);
    mesh.radius_ratio.push(0.0);

    for i in 0..sides {
        mesh.indices.extend_from_slice(&[i, apex, (i + 1) % sides]);
    }

    recompute_normals(&mut mesh);
    Ok(mesh)
}
