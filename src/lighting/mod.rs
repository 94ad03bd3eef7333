//! Three-point lighting collaborator
//!
//! Places key, fill and rim area lights around an object's bounding sphere,
//! all tracking a shared target empty inside a dedicated collection.

pub mod defaults;
pub mod geometry;
pub mod rig;

use glam::Vec3;

use crate::core::error::HostResult;
use crate::core::types::{ObjectId, ObjectKind};
use crate::scene::SceneHost;

pub use defaults::{AreaLight, LightRole, LightSpec};
pub use rig::{create_lighting_rig, RigError, RigLight, RigOptions, RigResult};

/// Scene primitives needed to build a rig
pub trait RigHost: SceneHost {
    fn object_kind(&self, id: ObjectId) -> HostResult<ObjectKind>;

    /// World-space axis-aligned `(min, max)`
    fn world_bounds(&self, id: ObjectId) -> HostResult<(Vec3, Vec3)>;

    /// `base`, or `base.001`, `base.002`... if taken
    fn unique_name(&self, base: &str) -> String;

    /// Returns the name actually used
    fn create_collection(&mut self, name: &str) -> HostResult<String>;

    fn remove_collection(&mut self, name: &str) -> HostResult<()>;

    fn create_empty(&mut self, name: &str, location: Vec3, collection: &str) -> HostResult<ObjectId>;

    fn create_area_light(
        &mut self,
        name: &str,
        light: &AreaLight,
        location: Vec3,
        collection: &str,
    ) -> HostResult<ObjectId>;

    /// Constrain `id` to always face `target`
    fn add_track_to(&mut self, id: ObjectId, target: ObjectId) -> HostResult<()>;

    fn remove_object(&mut self, id: ObjectId) -> HostResult<()>;
}
