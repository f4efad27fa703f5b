//! PNG preview maps for quick visual inspection of the procedural fields.
//!
//! These sample the displacement functions directly rather than rasterizing
//! the meshes, so a preview at any resolution shows exactly the field the
//! displacement engine evaluates.

use std::f32::consts::TAU;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Luma, Rgb};
use thiserror::Error;

use crate::displace::{layer_depth, radial_relief, Ornament, UndersideConfig, WallConfig};
use crate::material::{snow_blend, MaterialBand};
use crate::projection::{unproject, southern_cutoff_deg, MapUv};

/// Errors that can occur during preview export.
#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid output dimensions: {0}x{1}")]
    InvalidDimensions(u32, u32),
    #[error("Underside layer index {0} out of range (two layers)")]
    LayerOutOfRange(usize),
}

fn encode_luma16(
    img: ImageBuffer<Luma<u16>, Vec<u16>>,
    path: &Path,
) -> Result<(), PreviewError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder =
        PngEncoder::new_with_quality(writer, CompressionType::Default, FilterType::Adaptive);
    let byte_slice: &[u8] = bytemuck::cast_slice(img.as_raw());
    encoder.write_image(byte_slice, img.width(), img.height(), image::ExtendedColorType::L16)?;
    Ok(())
}

fn encode_rgb8(img: ImageBuffer<Rgb<u8>, Vec<u8>>, path: &Path) -> Result<(), PreviewError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder =
        PngEncoder::new_with_quality(writer, CompressionType::Default, FilterType::Adaptive);
    encoder.write_image(img.as_raw(), img.width(), img.height(), image::ExtendedColorType::Rgb8)?;
    Ok(())
}

/// Exports one underside layer's depth field as a 16-bit heightmap.
///
/// Depth is normalized by the layer amplitude; samples outside the layer
/// radius are black.
pub fn export_underside_depth_png(
    cfg: &UndersideConfig,
    layer_index: usize,
    path: &Path,
    size: u32,
) -> Result<(), PreviewError> {
    if size < 2 {
        return Err(PreviewError::InvalidDimensions(size, size));
    }
    let layer = cfg.layers.get(layer_index).ok_or(PreviewError::LayerOutOfRange(layer_index))?;

    let mut img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::new(size, size);
    for py in 0..size {
        let z = ((py as f32 + 0.5) / size as f32 * 2.0 - 1.0) * layer.radius;
        for px in 0..size {
            let x = ((px as f32 + 0.5) / size as f32 * 2.0 - 1.0) * layer.radius;
            let value = if x.hypot(z) > layer.radius {
                0
            } else {
                let depth = layer_depth(layer, cfg.fade_exponent, x, z) / layer.amplitude;
                (depth.clamp(0.0, 1.0) * 65535.0) as u16
            };
            img.put_pixel(px, py, Luma([value]));
        }
    }
    encode_luma16(img, path)
}

/// Exports the unrolled wall relief as an RGB strip.
///
/// X spans the full circumference, Y the wall height (crest at the top).
/// Brightness follows the radial relief; hue blends from rock toward the
/// snow color above the snow line.
pub fn export_wall_relief_png(
    cfg: &WallConfig,
    path: &Path,
    width: u32,
    height: u32,
) -> Result<(), PreviewError> {
    if width < 2 || height < 2 {
        return Err(PreviewError::InvalidDimensions(width, height));
    }

    let max_amp: f32 = cfg.strata.iter().map(|l| l.amplitude.abs()).sum::<f32>()
        + cfg.bulge.iter().map(|l| l.amplitude.abs()).sum::<f32>();
    let rock = MaterialBand::Rock.preview_rgb();
    let snow = MaterialBand::Snow.preview_rgb();

    let mut img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::new(width, height);
    for py in 0..height {
        let t = 1.0 - (py as f32 + 0.5) / height as f32;
        let y = t * cfg.height;
        let cover = snow_blend(t, cfg.snow_line.0, cfg.snow_line.1);
        for px in 0..width {
            let theta = (px as f32 + 0.5) / width as f32 * TAU;
            let relief = radial_relief(cfg, theta, y) / max_amp;
            let shade = 0.55 + 0.45 * relief.clamp(-1.0, 1.0);
            let mut rgb = [0u8; 3];
            for c in 0..3 {
                let base = rock[c] as f32 * (1.0 - cover) + snow[c] as f32 * cover;
                rgb[c] = (base * shade).clamp(0.0, 255.0) as u8;
            }
            img.put_pixel(px, py, Rgb(rgb));
        }
    }
    encode_rgb8(img, path)
}

/// Exports a top-down scatter of the ornament field, one dot per peak in its
/// material tier's color.
pub fn export_ornament_field_png(
    field: &[Ornament],
    extent: f32,
    path: &Path,
    size: u32,
) -> Result<(), PreviewError> {
    if size < 2 {
        return Err(PreviewError::InvalidDimensions(size, size));
    }

    let mut img: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_pixel(size, size, Rgb([12, 12, 16]));

    for peak in field {
        // Instance footprint center from its base vertices.
        let n = peak.mesh.positions.len().max(1) as f32;
        let cx: f32 = peak.mesh.positions.iter().map(|p| p.x).sum::<f32>() / n;
        let cz: f32 = peak.mesh.positions.iter().map(|p| p.z).sum::<f32>() / n;

        let px = ((cx / extent * 0.5 + 0.5) * size as f32) as i64;
        let py = ((cz / extent * 0.5 + 0.5) * size as f32) as i64;
        let radius = ((peak.base_radius / extent * 0.5) * size as f32).max(1.0) as i64;
        let color = Rgb(peak.material.preview_rgb());

        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
                let (ix, iy) = (px + dx, py + dy);
                if ix >= 0 && iy >= 0 && (ix as u32) < size && (iy as u32) < size {
                    img.put_pixel(ix as u32, iy as u32, color);
                }
            }
        }
    }
    encode_rgb8(img, path)
}

/// Exports the inverse projection as a graticule map over the texture square.
///
/// Every pixel is unprojected to latitude/longitude; gridlines are drawn
/// every 15° of latitude and 30° of longitude, the visible disc (uv radius
/// 0.5) is shaded by latitude, and everything past the southern cutoff is
/// darkened.
pub fn export_projection_graticule_png(path: &Path, size: u32) -> Result<(), PreviewError> {
    if size < 2 {
        return Err(PreviewError::InvalidDimensions(size, size));
    }

    let cutoff = southern_cutoff_deg();
    let mut img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::new(size, size);
    for py in 0..size {
        let v = (py as f64 + 0.5) / size as f64;
        for px in 0..size {
            let u = (px as f64 + 0.5) / size as f64;
            let geo = unproject(MapUv::new(u, v));
            let in_disc = ((u - 0.5).powi(2) + (v - 0.5).powi(2)).sqrt() <= 0.5;

            let near = |x: f64, step: f64| (x / step - (x / step).round()).abs() * step < 0.25;
            let gridline = near(geo.lat_deg, 15.0) || near(geo.lon_deg, 30.0);

            let rgb = if geo.lat_deg < cutoff {
                [24, 28, 36]
            } else if gridline {
                [230, 230, 240]
            } else {
                // Latitude shading: bright pole fading toward the edge.
                let t = ((geo.lat_deg - cutoff) / (90.0 - cutoff)).clamp(0.0, 1.0) as f32;
                let base = 70.0 + 120.0 * t;
                if in_disc {
                    [(base * 0.55) as u8, (base * 0.75) as u8, base as u8]
                } else {
                    [(base * 0.25) as u8, (base * 0.3) as u8, (base * 0.4) as u8]
                }
            };
            img.put_pixel(px, py, Rgb(rgb));
        }
    }
    encode_rgb8(img, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_dimensions() {
        let path = Path::new("unused.png");
        assert!(matches!(
            export_projection_graticule_png(path, 1),
            Err(PreviewError::InvalidDimensions(1, 1))
        ));
        assert!(export_wall_relief_png(&WallConfig::default(), path, 0, 64).is_err());
    }

    #[test]
    fn rejects_out_of_range_layer() {
        let cfg = UndersideConfig::default();
        let err = export_underside_depth_png(&cfg, 2, Path::new("unused.png"), 64);
        assert!(matches!(err, Err(PreviewError::LayerOutOfRange(2))));
    }

    #[test]
    fn writes_a_decodable_depth_map() {
        let dir = std::env::temp_dir().join(format!("discgen_preview_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("underside_depth.png");

        export_underside_depth_png(&UndersideConfig::default(), 0, &path, 64).unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!(img.width(), 64);
        assert_eq!(img.height(), 64);
        std::fs::remove_dir_all(&dir).ok();
    }
}
