//! Azimuthal-equidistant projection between the disc top and geographic space.
//!
//! The disc's map texture lives in a unit square; (0.5, 0.5) is the north pole
//! at the disc center and radial distance grows linearly with colatitude. The
//! square parameterization has no wrap seam, which is what lets the map be
//! clipped to a circle at the shading stage without interpolation artifacts.

use std::f64::consts::{FRAC_PI_2, PI};

/// Margin factor applied to the pole-to-edge scale.
///
/// Tuned so the projected map stays just inside the clipped circular boundary
/// of the disc. Preserve the literal; it matches a reference visual, not a
/// derived model.
pub const POLE_MARGIN: f64 = 0.505;

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoord {
    /// Latitude in [-90, 90].
    pub lat_deg: f64,
    /// Longitude in (-180, 180].
    pub lon_deg: f64,
}

impl GeoCoord {
    pub fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }
}

/// A surface coordinate over the disc top's bounding square, each axis in [0, 1].
///
/// Values outside the unit square are meaningful: they correspond to latitudes
/// beyond the mapped disc (see [`southern_cutoff_deg`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapUv {
    pub u: f64,
    pub v: f64,
}

impl MapUv {
    pub fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }
}

#[inline]
fn scale() -> f64 {
    1.0 / (PI * POLE_MARGIN)
}

/// Projects a geographic coordinate onto the disc-top surface square.
///
/// Radial distance from (0.5, 0.5) is proportional to colatitude; longitude 0
/// points toward -v (map north is "up" in texture space).
pub fn project(geo: GeoCoord) -> MapUv {
    let lat = geo.lat_deg.to_radians();
    let lon = geo.lon_deg.to_radians();
    let colat = FRAC_PI_2 - lat;
    let k = scale();
    MapUv {
        u: 0.5 + colat * lon.sin() * k,
        v: 0.5 - colat * lon.cos() * k,
    }
}

/// Inverse projection: recovers latitude/longitude from a surface coordinate.
///
/// The exact center is the projection's singularity and is defined to return
/// the pole with longitude 0. Points whose implied colatitude exceeds the
/// mapped range still produce a valid coordinate; callers decide whether a
/// latitude below [`southern_cutoff_deg`] counts as "off the mapped world".
pub fn unproject(uv: MapUv) -> GeoCoord {
    let k = scale();
    let x = (uv.u - 0.5) / k;
    let y = (uv.v - 0.5) / k;
    let colat = x.hypot(y);
    if colat == 0.0 {
        return GeoCoord::new(90.0, 0.0);
    }
    GeoCoord {
        lat_deg: (FRAC_PI_2 - colat).to_degrees(),
        lon_deg: x.atan2(-y).to_degrees(),
    }
}

/// Latitude whose colatitude maps exactly onto the disc edge.
///
/// Everything north of this fits inside the mapped disc; picks that resolve
/// further south are beyond the rim wall.
pub fn southern_cutoff_deg() -> f64 {
    90.0 - POLE_MARGIN * 180.0
}
