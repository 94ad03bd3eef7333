//! In-memory reference host
//!
//! A small scene graph with snapshot-based undo/redo. Used by the REPL
//! binary and by tests; `fail_next` injects host failures into a chosen
//! primitive.

use ahash::AHashMap;
use glam::Vec3;

use crate::core::error::{HostError, HostResult};
use crate::core::types::{InteractionMode, ObjectId, ObjectKind, ObjectRef, SelectionSnapshot};
use crate::lighting::{AreaLight, RigHost};
use crate::scene::mesh::MeshData;
use crate::scene::{ObjectState, SceneHost};
use crate::workflow::modifier::Modifier;
use crate::workflow::transaction::UndoUnit;

/// Maximum retained undo units; the oldest is dropped beyond this
pub const MAX_UNDO_LEVELS: usize = 100;

/// Host primitives that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostOp {
    AddModifier,
    ApplyScale,
    SetLocation,
    SetSmoothShading,
    EnterEditMode,
    ExitEditMode,
    SelectVertices,
    DeleteSelectedVertices,
    Restore,
    CreateCollection,
    CreateEmpty,
    CreateLight,
    AddTrackTo,
}

impl HostOp {
    pub fn label(self) -> &'static str {
        match self {
            HostOp::AddModifier => "Add modifier",
            HostOp::ApplyScale => "Apply scale",
            HostOp::SetLocation => "Set location",
            HostOp::SetSmoothShading => "Set smooth shading",
            HostOp::EnterEditMode => "Enter edit mode",
            HostOp::ExitEditMode => "Exit edit mode",
            HostOp::SelectVertices => "Select vertices",
            HostOp::DeleteSelectedVertices => "Delete vertices",
            HostOp::Restore => "Restore",
            HostOp::CreateCollection => "Create collection",
            HostOp::CreateEmpty => "Create empty",
            HostOp::CreateLight => "Create light",
            HostOp::AddTrackTo => "Add track-to constraint",
        }
    }
}

/// One object in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    pub kind: ObjectKind,
    pub location: Vec3,
    pub scale: Vec3,
    pub modifiers: Vec<Modifier>,
    /// Faces for meshes, control points for curves
    pub mesh: Option<MeshData>,
    pub light: Option<AreaLight>,
    /// Track-to constraint target
    pub track_to: Option<ObjectId>,
    pub collection: Option<String>,
}

impl SceneObject {
    fn new(name: String, kind: ObjectKind, mesh: Option<MeshData>) -> Self {
        Self {
            id: ObjectId::new(),
            name,
            kind,
            location: Vec3::ZERO,
            scale: Vec3::ONE,
            modifiers: Vec::new(),
            mesh,
            light: None,
            track_to: None,
            collection: None,
        }
    }

    pub fn to_ref(&self) -> ObjectRef {
        ObjectRef::new(self.id, self.kind, self.name.clone())
    }
}

/// An undone unit plus the objects it created, held until redo
#[derive(Debug)]
struct Undone {
    unit: UndoUnit,
    detached: Vec<SceneObject>,
}

#[derive(Debug, Clone, Copy)]
struct Fault {
    op: HostOp,
    skip: usize,
}

/// In-memory scene graph implementing `SceneHost` and `RigHost`
#[derive(Debug, Default)]
pub struct MemoryScene {
    objects: AHashMap<ObjectId, SceneObject>,
    /// Creation order
    order: Vec<ObjectId>,
    selected: Vec<ObjectId>,
    active: Option<ObjectId>,
    mode: InteractionMode,
    edit_object: Option<ObjectId>,
    collections: Vec<String>,
    undo_stack: Vec<UndoUnit>,
    redo_stack: Vec<Undone>,
    fault: Option<Fault>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    // === POPULATION ===

    /// Add a 2m cube at the origin
    pub fn add_mesh(&mut self, name: &str) -> ObjectId {
        self.add_mesh_with(name, MeshData::cube(2.0))
    }

    pub fn add_mesh_with(&mut self, name: &str, mesh: MeshData) -> ObjectId {
        self.insert(SceneObject::new(self.unique(name), ObjectKind::Mesh, Some(mesh)))
    }

    pub fn add_empty(&mut self, name: &str) -> ObjectId {
        self.insert(SceneObject::new(self.unique(name), ObjectKind::Empty, None))
    }

    /// Add a straight 4m path along X, centered on the origin
    pub fn add_curve(&mut self, name: &str) -> ObjectId {
        let points = MeshData::new(
            vec![
                Vec3::new(-2.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
            ],
            Vec::new(),
        );
        self.insert(SceneObject::new(
            self.unique(name),
            ObjectKind::Curve,
            Some(points),
        ))
    }

    /// Add an object of a kind no workflow accepts (camera, text, ...)
    pub fn add_other(&mut self, name: &str) -> ObjectId {
        self.insert(SceneObject::new(self.unique(name), ObjectKind::Other, None))
    }

    fn insert(&mut self, object: SceneObject) -> ObjectId {
        let id = object.id;
        self.order.push(id);
        self.objects.insert(id, object);
        id
    }

    // === LOOKUP ===

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.objects().find(|o| o.name == name).map(|o| o.id)
    }

    /// Objects in creation order
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.order.iter().filter_map(|id| self.objects.get(id))
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn collections(&self) -> &[String] {
        &self.collections
    }

    fn get(&self, id: ObjectId) -> HostResult<&SceneObject> {
        self.objects.get(&id).ok_or(HostError::ObjectNotFound(id))
    }

    fn get_mut(&mut self, id: ObjectId) -> HostResult<&mut SceneObject> {
        self.objects.get_mut(&id).ok_or(HostError::ObjectNotFound(id))
    }

    fn unique(&self, base: &str) -> String {
        let taken = |name: &str| {
            self.objects.values().any(|o| o.name == name)
                || self.collections.iter().any(|c| c == name)
        };
        if !taken(base) {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{base}.{n:03}"))
            .find(|candidate| !taken(candidate.as_str()))
            .unwrap_or_else(|| base.to_string())
    }

    // === SELECTION / MODE ===

    /// Replace the selection; unknown ids are ignored
    pub fn select(&mut self, ids: &[ObjectId]) {
        self.selected = ids
            .iter()
            .copied()
            .filter(|id| self.objects.contains_key(id))
            .collect();
    }

    pub fn set_active(&mut self, id: Option<ObjectId>) {
        self.active = id.filter(|id| self.objects.contains_key(id));
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
        if mode != InteractionMode::Edit {
            self.edit_object = None;
        }
    }

    pub fn set_scale(&mut self, id: ObjectId, scale: Vec3) -> HostResult<()> {
        self.get_mut(id)?.scale = scale;
        Ok(())
    }

    // === HISTORY ===

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn last_undo(&self) -> Option<&UndoUnit> {
        self.undo_stack.last()
    }

    /// Revert the newest unit. Returns its label.
    ///
    /// Fails without touching the scene or the history if an object or
    /// collection the unit refers to is gone.
    pub fn undo(&mut self) -> HostResult<String> {
        let unit = self.undo_stack.last().ok_or(HostError::OperationFailed {
            operation: "Undo",
            reason: "Nothing to undo".into(),
        })?;
        self.ensure_present(
            unit.before.iter().map(|(id, _)| *id).chain(unit.created.iter().copied()),
            &unit.created_collections,
        )?;

        let Some(unit) = self.undo_stack.pop() else {
            return Err(HostError::OperationFailed {
                operation: "Undo",
                reason: "Nothing to undo".into(),
            });
        };
        for (id, state) in unit.before.iter().rev() {
            self.apply_state(*id, state.clone())?;
        }

        let mut detached = Vec::with_capacity(unit.created.len());
        for id in unit.created.iter().rev() {
            if let Some(object) = self.detach(*id) {
                detached.push(object);
            }
        }
        detached.reverse();
        self.collections.retain(|c| !unit.created_collections.contains(c));

        let label = unit.label.clone();
        self.redo_stack.push(Undone { unit, detached });
        Ok(label)
    }

    /// Re-apply the newest undone unit. Returns its label.
    pub fn redo(&mut self) -> HostResult<String> {
        let entry = self.redo_stack.last().ok_or(HostError::OperationFailed {
            operation: "Redo",
            reason: "Nothing to redo".into(),
        })?;
        if let Some(name) = entry
            .unit
            .created_collections
            .iter()
            .find(|name| self.collections.contains(name))
        {
            return Err(HostError::OperationFailed {
                operation: "Redo",
                reason: format!("collection {name} already exists"),
            });
        }
        let missing = entry
            .unit
            .after
            .iter()
            .map(|(id, _)| *id)
            .find(|id| {
                !self.objects.contains_key(id) && !entry.detached.iter().any(|o| o.id == *id)
            });
        if let Some(id) = missing {
            return Err(HostError::ObjectNotFound(id));
        }

        let Some(Undone { unit, detached }) = self.redo_stack.pop() else {
            return Err(HostError::OperationFailed {
                operation: "Redo",
                reason: "Nothing to redo".into(),
            });
        };
        self.collections.extend(unit.created_collections.iter().cloned());
        for object in detached {
            self.insert(object);
        }
        for (id, state) in &unit.after {
            self.apply_state(*id, state.clone())?;
        }

        let label = unit.label.clone();
        self.undo_stack.push(unit);
        Ok(label)
    }

    fn ensure_present(
        &self,
        ids: impl IntoIterator<Item = ObjectId>,
        collections: &[String],
    ) -> HostResult<()> {
        if let Some(id) = ids.into_iter().find(|id| !self.objects.contains_key(id)) {
            return Err(HostError::ObjectNotFound(id));
        }
        match collections.iter().find(|c| !self.collections.contains(c)) {
            Some(name) => Err(HostError::CollectionNotFound(name.clone())),
            None => Ok(()),
        }
    }

    /// Take an object out of the scene, keeping it intact
    fn detach(&mut self, id: ObjectId) -> Option<SceneObject> {
        let object = self.objects.remove(&id)?;
        self.order.retain(|o| *o != id);
        self.selected.retain(|o| *o != id);
        if self.active == Some(id) {
            self.active = None;
        }
        Some(object)
    }

    fn apply_state(&mut self, id: ObjectId, state: ObjectState) -> HostResult<()> {
        let object = self.get_mut(id)?;
        object.location = state.location;
        object.scale = state.scale;
        object.modifiers = state.modifiers;
        object.mesh = state.mesh;
        Ok(())
    }

    // === FAULT INJECTION ===

    /// Make the next call to `op` fail
    pub fn fail_next(&mut self, op: HostOp) {
        self.fail_after(op, 0);
    }

    /// Let `skip` calls to `op` succeed, then fail the one after
    pub fn fail_after(&mut self, op: HostOp, skip: usize) {
        self.fault = Some(Fault { op, skip });
    }

    fn check(&mut self, op: HostOp) -> HostResult<()> {
        let Some(fault) = self.fault.as_mut() else {
            return Ok(());
        };
        if fault.op != op {
            return Ok(());
        }
        if fault.skip > 0 {
            fault.skip -= 1;
            return Ok(());
        }

        self.fault = None;
        Err(HostError::OperationFailed {
            operation: op.label(),
            reason: "injected failure".into(),
        })
    }

    fn require_object_mode(&self, operation: &'static str) -> HostResult<()> {
        if self.mode == InteractionMode::Object {
            Ok(())
        } else {
            Err(HostError::InvalidMode {
                operation,
                required: InteractionMode::Object,
                current: self.mode,
            })
        }
    }

    fn require_editing(&self, id: ObjectId, operation: &'static str) -> HostResult<()> {
        if self.mode == InteractionMode::Edit && self.edit_object == Some(id) {
            Ok(())
        } else {
            Err(HostError::InvalidMode {
                operation,
                required: InteractionMode::Edit,
                current: self.mode,
            })
        }
    }

    fn mesh_mut(&mut self, id: ObjectId, operation: &'static str) -> HostResult<&mut MeshData> {
        let object = self.get_mut(id)?;
        let name = object.name.clone();
        object
            .mesh
            .as_mut()
            .ok_or_else(|| HostError::OperationFailed {
                operation,
                reason: format!("{name} has no geometry"),
            })
    }
}

impl SceneHost for MemoryScene {
    fn selection(&self) -> SelectionSnapshot {
        let selected = self
            .selected
            .iter()
            .filter_map(|id| self.objects.get(id))
            .map(SceneObject::to_ref)
            .collect();
        let active = self
            .active
            .and_then(|id| self.objects.get(&id))
            .map(SceneObject::to_ref);
        SelectionSnapshot::new(selected, active, self.mode)
    }

    fn interaction_mode(&self) -> InteractionMode {
        self.mode
    }

    fn object_name(&self, id: ObjectId) -> HostResult<String> {
        Ok(self.get(id)?.name.clone())
    }

    fn modifiers(&self, id: ObjectId) -> HostResult<&[Modifier]> {
        Ok(self.get(id)?.modifiers.as_slice())
    }

    fn location(&self, id: ObjectId) -> HostResult<Vec3> {
        Ok(self.get(id)?.location)
    }

    fn add_modifier(&mut self, id: ObjectId, modifier: Modifier) -> HostResult<usize> {
        self.check(HostOp::AddModifier)?;
        if let Some(referenced) = modifier.referenced_object() {
            if referenced == id || !self.objects.contains_key(&referenced) {
                return Err(HostError::OperationFailed {
                    operation: HostOp::AddModifier.label(),
                    reason: format!("invalid {} reference", modifier.kind_name()),
                });
            }
        }

        let object = self.get_mut(id)?;
        object.modifiers.push(modifier);
        Ok(object.modifiers.len() - 1)
    }

    fn apply_scale(&mut self, id: ObjectId) -> HostResult<Vec3> {
        self.check(HostOp::ApplyScale)?;
        self.require_object_mode(HostOp::ApplyScale.label())?;

        let object = self.get_mut(id)?;
        let previous = object.scale;
        if let Some(mesh) = object.mesh.as_mut() {
            mesh.scale_by(previous);
        }
        object.scale = Vec3::ONE;
        Ok(previous)
    }

    fn set_location(&mut self, id: ObjectId, location: Vec3) -> HostResult<Vec3> {
        self.check(HostOp::SetLocation)?;
        let object = self.get_mut(id)?;
        Ok(std::mem::replace(&mut object.location, location))
    }

    fn set_smooth_shading(&mut self, id: ObjectId, smooth: bool) -> HostResult<()> {
        self.check(HostOp::SetSmoothShading)?;
        self.mesh_mut(id, HostOp::SetSmoothShading.label())?
            .set_smooth(smooth);
        Ok(())
    }

    fn enter_edit_mode(&mut self, id: ObjectId) -> HostResult<InteractionMode> {
        self.check(HostOp::EnterEditMode)?;
        self.require_object_mode(HostOp::EnterEditMode.label())?;

        let object = self.get(id)?;
        if object.kind != ObjectKind::Mesh {
            return Err(HostError::OperationFailed {
                operation: HostOp::EnterEditMode.label(),
                reason: format!("{} is not a mesh", object.name),
            });
        }

        let previous = self.mode;
        self.mode = InteractionMode::Edit;
        self.edit_object = Some(id);
        Ok(previous)
    }

    fn exit_edit_mode(&mut self, restore: InteractionMode) -> HostResult<()> {
        self.check(HostOp::ExitEditMode)?;
        if self.mode != InteractionMode::Edit {
            return Err(HostError::InvalidMode {
                operation: HostOp::ExitEditMode.label(),
                required: InteractionMode::Edit,
                current: self.mode,
            });
        }
        self.set_mode(restore);
        Ok(())
    }

    fn set_interaction_mode(&mut self, mode: InteractionMode) -> HostResult<()> {
        self.set_mode(mode);
        Ok(())
    }

    fn select_vertices(
        &mut self,
        id: ObjectId,
        predicate: &dyn Fn(Vec3) -> bool,
    ) -> HostResult<usize> {
        self.check(HostOp::SelectVertices)?;
        self.require_editing(id, HostOp::SelectVertices.label())?;
        Ok(self
            .mesh_mut(id, HostOp::SelectVertices.label())?
            .select_where(predicate))
    }

    fn delete_selected_vertices(&mut self, id: ObjectId) -> HostResult<usize> {
        self.check(HostOp::DeleteSelectedVertices)?;
        self.require_editing(id, HostOp::DeleteSelectedVertices.label())?;
        Ok(self
            .mesh_mut(id, HostOp::DeleteSelectedVertices.label())?
            .delete_selected())
    }

    fn capture(&self, id: ObjectId) -> HostResult<ObjectState> {
        let object = self.get(id)?;
        Ok(ObjectState {
            location: object.location,
            scale: object.scale,
            modifiers: object.modifiers.clone(),
            mesh: object.mesh.clone(),
        })
    }

    fn restore(&mut self, id: ObjectId, state: ObjectState) -> HostResult<()> {
        self.check(HostOp::Restore)?;
        self.apply_state(id, state)
    }

    fn push_undo(&mut self, unit: UndoUnit) {
        self.undo_stack.push(unit);
        if self.undo_stack.len() > MAX_UNDO_LEVELS {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }
}

impl RigHost for MemoryScene {
    fn object_kind(&self, id: ObjectId) -> HostResult<ObjectKind> {
        Ok(self.get(id)?.kind)
    }

    fn world_bounds(&self, id: ObjectId) -> HostResult<(Vec3, Vec3)> {
        let object = self.get(id)?;
        let (min, max) = object
            .mesh
            .as_ref()
            .and_then(MeshData::bounds)
            .ok_or_else(|| HostError::OperationFailed {
                operation: "Compute bounds",
                reason: format!("{} has no geometry", object.name),
            })?;

        // Negative scale swaps the corners
        let a = min * object.scale + object.location;
        let b = max * object.scale + object.location;
        Ok((a.min(b), a.max(b)))
    }

    fn unique_name(&self, base: &str) -> String {
        self.unique(base)
    }

    fn create_collection(&mut self, name: &str) -> HostResult<String> {
        self.check(HostOp::CreateCollection)?;
        let name = self.unique(name);
        self.collections.push(name.clone());
        Ok(name)
    }

    fn remove_collection(&mut self, name: &str) -> HostResult<()> {
        let index = self
            .collections
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| HostError::CollectionNotFound(name.to_string()))?;
        self.collections.remove(index);
        Ok(())
    }

    fn create_empty(&mut self, name: &str, location: Vec3, collection: &str) -> HostResult<ObjectId> {
        self.check(HostOp::CreateEmpty)?;
        if !self.collections.iter().any(|c| c == collection) {
            return Err(HostError::CollectionNotFound(collection.to_string()));
        }

        let mut object = SceneObject::new(self.unique(name), ObjectKind::Empty, None);
        object.location = location;
        object.collection = Some(collection.to_string());
        Ok(self.insert(object))
    }

    fn create_area_light(
        &mut self,
        name: &str,
        light: &AreaLight,
        location: Vec3,
        collection: &str,
    ) -> HostResult<ObjectId> {
        self.check(HostOp::CreateLight)?;
        if !self.collections.iter().any(|c| c == collection) {
            return Err(HostError::CollectionNotFound(collection.to_string()));
        }

        let mut object = SceneObject::new(self.unique(name), ObjectKind::Other, None);
        object.location = location;
        object.light = Some(light.clone());
        object.collection = Some(collection.to_string());
        Ok(self.insert(object))
    }

    fn add_track_to(&mut self, id: ObjectId, target: ObjectId) -> HostResult<()> {
        self.check(HostOp::AddTrackTo)?;
        self.get(target)?;
        self.get_mut(id)?.track_to = Some(target);
        Ok(())
    }

    fn remove_object(&mut self, id: ObjectId) -> HostResult<()> {
        self.detach(id).ok_or(HostError::ObjectNotFound(id))?;
        Ok(())
    }
}
