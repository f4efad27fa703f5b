//! Export module for saving generated geometry and preview maps.
//!
//! Wavefront OBJ for the meshes (imports cleanly into any DCC tool or engine)
//! and PNG previews of the displacement fields, material tiers, and the map
//! projection for quick visual inspection.

mod obj;
mod preview;

pub use obj::{export_mesh_obj, export_world_obj, write_mesh_obj, ObjExportError};
pub use preview::{
    export_ornament_field_png, export_projection_graticule_png, export_underside_depth_png,
    export_wall_relief_png, PreviewError,
};
