//! Bounding-volume analysis and light placement

use glam::Vec3;

/// Spherical to cartesian, angles in degrees
///
/// Horizontal 0 points along +Y and grows towards +X; vertical 0 is the XY
/// plane and 90 is +Z.
pub fn spherical_to_cartesian(radius: f32, horizontal_deg: f32, vertical_deg: f32) -> Vec3 {
    let h = horizontal_deg.to_radians();
    let v = vertical_deg.to_radians();
    Vec3::new(
        radius * v.cos() * h.sin(),
        radius * v.cos() * h.cos(),
        radius * v.sin(),
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsInfo {
    pub min: Vec3,
    pub max: Vec3,
    pub center: Vec3,
    pub dimensions: Vec3,
    /// Bounding-sphere radius: center to farthest corner
    pub radius: f32,
}

/// `None` when the box is inverted or not finite
pub fn analyze_bounds(min: Vec3, max: Vec3) -> Option<BoundsInfo> {
    if !min.is_finite() || !max.is_finite() || min.cmpgt(max).any() {
        return None;
    }

    let center = (min + max) * 0.5;
    let dimensions = max - min;
    Some(BoundsInfo {
        min,
        max,
        center,
        dimensions,
        radius: dimensions.length() * 0.5,
    })
}

pub fn light_position(
    center: Vec3,
    horizontal_deg: f32,
    vertical_deg: f32,
    distance: f32,
) -> Vec3 {
    center + spherical_to_cartesian(distance, horizontal_deg, vertical_deg)
}
