//! Three-point lighting presets

use glam::Vec3;
use serde::{Deserialize, Serialize};

pub const COLLECTION_PREFIX: &str = "ThreePointRig";
pub const TARGET_EMPTY_PREFIX: &str = "LightTarget";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LightRole {
    Key,
    Fill,
    Rim,
}

impl LightRole {
    /// Creation order
    pub const ALL: [LightRole; 3] = [LightRole::Key, LightRole::Fill, LightRole::Rim];

    /// Base object name, before uniquing
    pub fn object_name(self) -> &'static str {
        match self {
            LightRole::Key => "Key_Light",
            LightRole::Fill => "Fill_Light",
            LightRole::Rim => "Rim_Light",
        }
    }

    pub fn defaults(self) -> LightSpec {
        match self {
            LightRole::Key => LightSpec {
                power_watts: 100.0,
                color_temperature: 5600,
                size: 1.0,
                horizontal_angle: 45.0,
                vertical_angle: 30.0,
                distance_multiplier: 3.0,
            },
            // Softer and lower, opposite the key
            LightRole::Fill => LightSpec {
                power_watts: 30.0,
                color_temperature: 5600,
                size: 2.0,
                horizontal_angle: -45.0,
                vertical_angle: 15.0,
                distance_multiplier: 3.5,
            },
            // Behind, high and slightly cooler
            LightRole::Rim => LightSpec {
                power_watts: 80.0,
                color_temperature: 6500,
                size: 0.5,
                horizontal_angle: 135.0,
                vertical_angle: 45.0,
                distance_multiplier: 2.5,
            },
        }
    }
}

/// Placement and output of one rig light
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightSpec {
    pub power_watts: f32,
    /// Kelvin
    pub color_temperature: u32,
    pub size: f32,
    /// Degrees around the target, 0 = +Y
    pub horizontal_angle: f32,
    /// Degrees of elevation, 0 = XY plane
    pub vertical_angle: f32,
    /// Distance in bounding-sphere radii
    pub distance_multiplier: f32,
}

/// Light data handed to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaLight {
    pub energy: f32,
    pub color: Vec3,
    pub temperature: u32,
    pub size: f32,
}

impl AreaLight {
    pub fn from_spec(spec: &LightSpec) -> Self {
        Self {
            energy: spec.power_watts,
            color: color_temperature_to_rgb(spec.color_temperature),
            temperature: spec.color_temperature,
            size: spec.size,
        }
    }
}

/// Coarse Kelvin to RGB banding
pub fn color_temperature_to_rgb(kelvin: u32) -> Vec3 {
    match kelvin {
        0..=3000 => Vec3::new(1.0, 0.6, 0.3),
        3001..=4000 => Vec3::new(1.0, 0.8, 0.6),
        4001..=5000 => Vec3::new(1.0, 0.9, 0.8),
        5001..=6000 => Vec3::new(1.0, 1.0, 0.95),
        _ => Vec3::new(0.8, 0.9, 1.0),
    }
}
