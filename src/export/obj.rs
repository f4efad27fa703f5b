//! Wavefront OBJ export for generated meshes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::mesh::Mesh;
use crate::world::DiscWorld;

/// Errors that can occur during OBJ export.
#[derive(Error, Debug)]
pub enum ObjExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes one mesh as an `o`-named object into an OBJ stream.
///
/// `index_offset` is the number of vertices already written to the stream;
/// OBJ face indices are global and 1-based. Returns the new offset.
pub fn write_mesh_obj<W: Write>(
    writer: &mut W,
    name: &str,
    mesh: &Mesh,
    index_offset: u32,
) -> Result<u32, ObjExportError> {
    writeln!(writer, "o {}", name)?;
    for p in &mesh.positions {
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for uv in &mesh.uvs {
        writeln!(writer, "vt {} {}", uv[0], uv[1])?;
    }
    for n in &mesh.normals {
        writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for tri in mesh.indices.chunks_exact(3) {
        let (a, b, c) = (
            tri[0] + index_offset + 1,
            tri[1] + index_offset + 1,
            tri[2] + index_offset + 1,
        );
        writeln!(writer, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
    }
    Ok(index_offset + mesh.vertex_count() as u32)
}

/// Exports a single mesh to an OBJ file.
pub fn export_mesh_obj(mesh: &Mesh, name: &str, path: &Path) -> Result<(), ObjExportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_mesh_obj(&mut writer, name, mesh, 0)?;
    writer.flush()?;
    Ok(())
}

/// Exports every mesh of a world into `{output_dir}/{base_name}_*.obj`.
///
/// The disc, the rim (wall or peak field), and the underside each get their
/// own file; multi-mesh files carry one OBJ object per mesh.
pub fn export_world_obj(
    world: &DiscWorld,
    output_dir: &Path,
    base_name: &str,
) -> Result<(), ObjExportError> {
    std::fs::create_dir_all(output_dir)?;

    export_mesh_obj(&world.disc, "disc", &output_dir.join(format!("{}_disc.obj", base_name)))?;

    if let Some(wall) = &world.wall {
        export_mesh_obj(
            &wall.mesh,
            "wall",
            &output_dir.join(format!("{}_wall.obj", base_name)),
        )?;
    }

    if let Some(peaks) = &world.ornaments {
        let file = File::create(output_dir.join(format!("{}_peaks.obj", base_name)))?;
        let mut writer = BufWriter::new(file);
        let mut offset = 0;
        for (i, peak) in peaks.iter().enumerate() {
            let name = format!("peak_{:03}_{}", i, peak.material.name());
            offset = write_mesh_obj(&mut writer, &name, &peak.mesh, offset)?;
        }
        writer.flush()?;
    }

    let file = File::create(output_dir.join(format!("{}_underside.obj", base_name)))?;
    let mut writer = BufWriter::new(file);
    let offset = write_mesh_obj(&mut writer, "bedrock_shelf", &world.underside[0].mesh, 0)?;
    write_mesh_obj(&mut writer, "bedrock_crevice", &world.underside[1].mesh, offset)?;
    writer.flush()?;

    Ok(())
}
