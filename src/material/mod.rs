//! Surface classification from displacement-derived fields.
//!
//! Discrete shapes (the ornament peaks) get one of four material tiers from
//! their normalized height; continuous surfaces (wall, underside) get a smooth
//! blend weight instead, so the renderer can mix colors without banding. Both
//! forms are pure functions of the displacement fields — no randomness is
//! consumed at classification time.

use serde::{Deserialize, Serialize};

/// Normalized-height threshold above which a peak is snow-capped.
pub const SNOW_THRESHOLD: f32 = 0.65;
/// Threshold above which a peak reads as blue-white ice.
pub const ICE_THRESHOLD: f32 = 0.38;
/// Threshold above which a peak reads as bare rock; below is shadowed rock.
pub const ROCK_THRESHOLD: f32 = 0.18;

/// Material tier for a discrete procedural shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialBand {
    Snow,
    Ice,
    Rock,
    ShadowRock,
}

impl MaterialBand {
    /// Classifies a normalized value in [0, 1] into a band.
    ///
    /// Thresholds are evaluated high-to-low, first match wins, so the four
    /// bands partition [0, 1] into contiguous intervals.
    pub fn classify(normalized: f32) -> MaterialBand {
        if normalized > SNOW_THRESHOLD {
            MaterialBand::Snow
        } else if normalized > ICE_THRESHOLD {
            MaterialBand::Ice
        } else if normalized > ROCK_THRESHOLD {
            MaterialBand::Rock
        } else {
            MaterialBand::ShadowRock
        }
    }

    /// RGB preview color for export maps.
    pub fn preview_rgb(self) -> [u8; 3] {
        match self {
            MaterialBand::Snow => [242, 247, 252],
            MaterialBand::Ice => [176, 208, 230],
            MaterialBand::Rock => [121, 110, 100],
            MaterialBand::ShadowRock => [62, 56, 52],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MaterialBand::Snow => "snow",
            MaterialBand::Ice => "ice",
            MaterialBand::Rock => "rock",
            MaterialBand::ShadowRock => "shadow-rock",
        }
    }
}

/// Hermite smoothstep, 0 at/below `edge0`, 1 at/above `edge1`.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Continuous snow-cover weight for a normalized height.
///
/// `lo` and `hi` are the normalized heights where snow begins and saturates.
pub fn snow_blend(normalized: f32, lo: f32, hi: f32) -> f32 {
    smoothstep(lo, hi, normalized)
}
