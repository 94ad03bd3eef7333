//! Three-point lighting rig builder
//!
//! Every created entity is recorded. A finished rig becomes one undo unit; if
//! any step fails the whole rig is torn down in reverse creation order and the
//! failure is returned.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::error::HostError;
use crate::core::types::{InteractionMode, ObjectId, ObjectKind};
use crate::lighting::defaults::{AreaLight, LightRole, COLLECTION_PREFIX, TARGET_EMPTY_PREFIX};
use crate::lighting::geometry::{analyze_bounds, light_position};
use crate::lighting::RigHost;
use crate::workflow::transaction::UndoUnit;

pub const UNDO_LABEL: &str = "Three-Point Lighting";

/// User overrides for light placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigOptions {
    /// Horizontal angles in degrees (-180..=180)
    pub key_angle: f32,
    pub fill_angle: f32,
    pub rim_angle: f32,
    /// Multiplier on every light distance (0.1..=10.0)
    pub distance_scale: f32,
}

impl Default for RigOptions {
    fn default() -> Self {
        Self {
            key_angle: 45.0,
            fill_angle: -45.0,
            rim_angle: 135.0,
            distance_scale: 1.0,
        }
    }
}

impl RigOptions {
    pub fn validate(&self) -> Result<(), RigError> {
        for (option, value) in [
            ("key_angle", self.key_angle),
            ("fill_angle", self.fill_angle),
            ("rim_angle", self.rim_angle),
        ] {
            check_option(option, value, -180.0, 180.0)?;
        }
        check_option("distance_scale", self.distance_scale, 0.1, 10.0)
    }

    pub fn angle_for(&self, role: LightRole) -> f32 {
        match role {
            LightRole::Key => self.key_angle,
            LightRole::Fill => self.fill_angle,
            LightRole::Rim => self.rim_angle,
        }
    }
}

fn check_option(option: &'static str, value: f32, min: f32, max: f32) -> Result<(), RigError> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(RigError::InvalidOption {
            option,
            value,
            min,
            max,
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RigError {
    #[error("No object selected")]
    NoTarget,

    #[error("Object type '{0}' is not supported. Use MESH or CURVE objects.")]
    UnsupportedKind(ObjectKind),

    #[error("Must be in Object mode. Current mode: {0}")]
    WrongMode(InteractionMode),

    #[error("Could not analyze object geometry")]
    Geometry,

    #[error("{option} = {value} is outside {min}..={max}")]
    InvalidOption {
        option: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("Error creating lighting rig: {0}")]
    Host(#[from] HostError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RigLight {
    pub role: LightRole,
    pub id: ObjectId,
    pub name: String,
    pub location: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RigResult {
    pub collection: String,
    pub target_empty: ObjectId,
    /// Key, fill, rim
    pub lights: Vec<RigLight>,
    pub message: String,
}

/// Entities created so far, for teardown
#[derive(Debug, Default)]
struct Created {
    collection: Option<String>,
    objects: Vec<ObjectId>,
}

/// Build a key/fill/rim rig aimed at `target`
pub fn create_lighting_rig<H: RigHost + ?Sized>(
    host: &mut H,
    target: Option<ObjectId>,
    options: &RigOptions,
) -> Result<RigResult, RigError> {
    options.validate()?;

    let target = target.ok_or(RigError::NoTarget)?;
    let kind = match host.object_kind(target) {
        Ok(kind) => kind,
        Err(HostError::ObjectNotFound(_)) => return Err(RigError::NoTarget),
        Err(e) => return Err(e.into()),
    };
    if !matches!(kind, ObjectKind::Mesh | ObjectKind::Curve) {
        return Err(RigError::UnsupportedKind(kind));
    }

    let mode = host.interaction_mode();
    if mode != InteractionMode::Object {
        return Err(RigError::WrongMode(mode));
    }

    let (min, max) = host.world_bounds(target).map_err(|e| {
        tracing::warn!("Bounds unavailable for {}: {}", target, e);
        RigError::Geometry
    })?;
    let bounds = analyze_bounds(min, max).ok_or(RigError::Geometry)?;
    let name = host.object_name(target)?;

    let mut created = Created::default();
    match build(host, &mut created, &name, bounds.center, bounds.radius, options) {
        Ok(result) => {
            let Created {
                collection,
                objects,
            } = created;
            host.push_undo(UndoUnit::creation(
                UNDO_LABEL,
                objects,
                collection.into_iter().collect(),
            ));
            tracing::info!("{}", result.message);
            Ok(result)
        }
        Err(e) => {
            tracing::error!("Lighting rig for {} failed: {}", name, e);
            teardown(host, created);
            Err(e.into())
        }
    }
}

fn build<H: RigHost + ?Sized>(
    host: &mut H,
    created: &mut Created,
    name: &str,
    center: Vec3,
    radius: f32,
    options: &RigOptions,
) -> Result<RigResult, HostError> {
    let collection = host.create_collection(&format!("{COLLECTION_PREFIX}_{name}"))?;
    created.collection = Some(collection.clone());

    let empty_name = host.unique_name(&format!("{TARGET_EMPTY_PREFIX}_{name}"));
    let target_empty = host.create_empty(&empty_name, center, &collection)?;
    created.objects.push(target_empty);

    let mut lights = Vec::with_capacity(LightRole::ALL.len());
    for role in LightRole::ALL {
        let spec = role.defaults();
        let distance = radius * spec.distance_multiplier * options.distance_scale;
        let location = light_position(
            center,
            options.angle_for(role),
            spec.vertical_angle,
            distance,
        );

        let light_name = host.unique_name(role.object_name());
        let id = host.create_area_light(
            &light_name,
            &AreaLight::from_spec(&spec),
            location,
            &collection,
        )?;
        created.objects.push(id);
        host.add_track_to(id, target_empty)?;

        lights.push(RigLight {
            role,
            id,
            name: host.object_name(id)?,
            location,
        });
    }

    Ok(RigResult {
        collection,
        target_empty,
        lights,
        message: format!("Created three-point lighting rig for '{name}'"),
    })
}

fn teardown<H: RigHost + ?Sized>(host: &mut H, created: Created) {
    for id in created.objects.into_iter().rev() {
        if let Err(e) = host.remove_object(id) {
            tracing::error!("Could not remove {}: {}", id, e);
        }
    }
    if let Some(collection) = created.collection {
        if let Err(e) = host.remove_collection(&collection) {
            tracing::error!("Could not remove collection {}: {}", collection, e);
        }
    }
}
