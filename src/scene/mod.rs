//! Host scene-graph abstraction
//!
//! The scene graph belongs to the host application. Workflows reach it only
//! through `SceneHost`, which exposes the mutation primitives they need plus
//! state capture for the transaction log.

pub mod memory;
pub mod mesh;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::error::HostResult;
use crate::core::types::{InteractionMode, ObjectId, SelectionSnapshot};
use crate::workflow::modifier::Modifier;
use crate::workflow::transaction::UndoUnit;

pub use memory::{HostOp, MemoryScene, SceneObject};
pub use mesh::{Face, MeshData};

/// Everything a workflow can change on one object
///
/// Captured before the first mutation and restored on rollback or undo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectState {
    pub location: Vec3,
    pub scale: Vec3,
    pub modifiers: Vec<Modifier>,
    /// `None` for objects without editable geometry
    pub mesh: Option<MeshData>,
}

/// Scene-graph primitives consumed by the workflows
///
/// Every mutating call may fail; failures surface as `HostError` and are
/// turned into a rolled-back workflow failure by the executor.
pub trait SceneHost {
    // === QUERIES ===

    /// Fresh view of the current selection
    fn selection(&self) -> SelectionSnapshot;

    fn interaction_mode(&self) -> InteractionMode;

    fn object_name(&self, id: ObjectId) -> HostResult<String>;

    /// The object's modification stack, bottom entry first
    fn modifiers(&self, id: ObjectId) -> HostResult<&[Modifier]>;

    fn location(&self, id: ObjectId) -> HostResult<Vec3>;

    // === OBJECT MUTATIONS ===

    /// Append to the modification stack, returning the new entry's index
    fn add_modifier(&mut self, id: ObjectId, modifier: Modifier) -> HostResult<usize>;

    /// Bake scale into geometry and reset it to unit, returning the old scale
    fn apply_scale(&mut self, id: ObjectId) -> HostResult<Vec3>;

    /// Returns the previous location
    fn set_location(&mut self, id: ObjectId, location: Vec3) -> HostResult<Vec3>;

    /// Flag every face smooth (or flat)
    fn set_smooth_shading(&mut self, id: ObjectId, smooth: bool) -> HostResult<()>;

    // === ELEMENT EDITING ===

    /// Enter element editing on `id`, returning the mode that was active
    fn enter_edit_mode(&mut self, id: ObjectId) -> HostResult<InteractionMode>;

    /// Leave element editing, committing edits and switching to `restore`
    fn exit_edit_mode(&mut self, restore: InteractionMode) -> HostResult<()>;

    /// Force a mode without committing anything
    fn set_interaction_mode(&mut self, mode: InteractionMode) -> HostResult<()>;

    /// Replace the vertex selection with vertices matching `predicate`
    /// (local coordinates). Requires element editing on `id`.
    fn select_vertices(&mut self, id: ObjectId, predicate: &dyn Fn(Vec3) -> bool)
        -> HostResult<usize>;

    /// Requires element editing on `id`. Returns the number removed.
    fn delete_selected_vertices(&mut self, id: ObjectId) -> HostResult<usize>;

    // === STATE CAPTURE ===

    fn capture(&self, id: ObjectId) -> HostResult<ObjectState>;

    fn restore(&mut self, id: ObjectId, state: ObjectState) -> HostResult<()>;

    /// Hand one committed unit to the host's undo history
    fn push_undo(&mut self, unit: UndoUnit);
}
