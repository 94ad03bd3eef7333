//! Modification stack entries and their parameters

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::types::ObjectId;

/// Offset source for an array entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ArrayOffset {
    /// Offset as a multiple of the object's own size
    Relative(Vec3),
    /// Offset taken from another object's transform
    Object(ObjectId),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BevelLimit {
    /// Only bevel edges sharper than this angle
    Angle { degrees: f32 },
}

impl Default for BevelLimit {
    fn default() -> Self {
        BevelLimit::Angle { degrees: 30.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WrapMethod {
    NearestSurfacePoint,
}

/// One non-destructive entry in an object's modification stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Modifier {
    Array {
        count: u32,
        offset: ArrayOffset,
    },
    Bevel {
        segments: u32,
        limit: BevelLimit,
    },
    Subdivision {
        levels: u32,
    },
    Mirror {
        axis: Axis,
        bisect: bool,
        clip: bool,
    },
    CurveDeform {
        curve: ObjectId,
    },
    Solidify {
        thickness: f32,
        even_offset: bool,
    },
    Shrinkwrap {
        target: ObjectId,
        wrap_method: WrapMethod,
    },
}

impl Modifier {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Modifier::Array { .. } => "Array",
            Modifier::Bevel { .. } => "Bevel",
            Modifier::Subdivision { .. } => "Subdivision",
            Modifier::Mirror { .. } => "Mirror",
            Modifier::CurveDeform { .. } => "CurveDeform",
            Modifier::Solidify { .. } => "Solidify",
            Modifier::Shrinkwrap { .. } => "Shrinkwrap",
        }
    }

    /// Object this entry depends on, if any
    pub fn referenced_object(&self) -> Option<ObjectId> {
        match self {
            Modifier::Array {
                offset: ArrayOffset::Object(id),
                ..
            } => Some(*id),
            Modifier::CurveDeform { curve } => Some(*curve),
            Modifier::Shrinkwrap { target, .. } => Some(*target),
            _ => None,
        }
    }
}
