//! Explicit transaction log for one dispatch
//!
//! Each object's state is captured before its first mutation. Committing
//! hands the host exactly one `UndoUnit`; rolling back restores the captured
//! states in reverse order.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::error::HostResult;
use crate::core::types::ObjectId;
use crate::scene::{ObjectState, SceneHost};
use crate::workflow::modifier::Modifier;

/// One recorded scene mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Mutation {
    AddModifier {
        object: ObjectId,
        index: usize,
        kind: String,
    },
    ApplyScale {
        object: ObjectId,
        previous: Vec3,
    },
    SetLocation {
        object: ObjectId,
        previous: Vec3,
        location: Vec3,
    },
    SetSmoothShading {
        object: ObjectId,
        smooth: bool,
    },
    SelectVertices {
        object: ObjectId,
        count: usize,
    },
    DeleteSelectedVertices {
        object: ObjectId,
        removed: usize,
    },
}

/// A committed, atomically undoable unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndoUnit {
    pub label: String,
    pub mutations: Vec<Mutation>,
    /// Object states before the dispatch, in capture order
    pub before: Vec<(ObjectId, ObjectState)>,
    /// Object states after the dispatch, same order as `before`
    pub after: Vec<(ObjectId, ObjectState)>,
    /// Objects the unit brought into the scene, in creation order
    #[serde(default)]
    pub created: Vec<ObjectId>,
    #[serde(default)]
    pub created_collections: Vec<String>,
}

impl UndoUnit {
    /// A unit that only adds new objects and collections
    pub fn creation(
        label: impl Into<String>,
        created: Vec<ObjectId>,
        created_collections: Vec<String>,
    ) -> Self {
        Self {
            label: label.into(),
            mutations: Vec::new(),
            before: Vec::new(),
            after: Vec::new(),
            created,
            created_collections,
        }
    }
}

/// In-flight mutation log
#[derive(Debug)]
pub struct Transaction {
    label: String,
    mutations: Vec<Mutation>,
    captured: Vec<(ObjectId, ObjectState)>,
}

impl Transaction {
    pub fn begin(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            mutations: Vec::new(),
            captured: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    /// Objects touched so far, in first-touch order
    pub fn touched(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.captured.iter().map(|(id, _)| *id)
    }

    fn touch<H: SceneHost + ?Sized>(&mut self, host: &H, id: ObjectId) -> HostResult<()> {
        if !self.captured.iter().any(|(captured, _)| *captured == id) {
            let state = host.capture(id)?;
            self.captured.push((id, state));
        }
        Ok(())
    }

    fn record(&mut self, mutation: Mutation) {
        tracing::debug!("[{}] {:?}", self.label, mutation);
        self.mutations.push(mutation);
    }

    // === RECORDED PRIMITIVES ===

    pub fn add_modifier<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: ObjectId,
        modifier: Modifier,
    ) -> HostResult<usize> {
        self.touch(host, id)?;
        let kind = modifier.kind_name().to_string();
        let index = host.add_modifier(id, modifier)?;
        self.record(Mutation::AddModifier {
            object: id,
            index,
            kind,
        });
        Ok(index)
    }

    pub fn apply_scale<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: ObjectId,
    ) -> HostResult<Vec3> {
        self.touch(host, id)?;
        let previous = host.apply_scale(id)?;
        self.record(Mutation::ApplyScale {
            object: id,
            previous,
        });
        Ok(previous)
    }

    pub fn set_location<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: ObjectId,
        location: Vec3,
    ) -> HostResult<Vec3> {
        self.touch(host, id)?;
        let previous = host.set_location(id, location)?;
        self.record(Mutation::SetLocation {
            object: id,
            previous,
            location,
        });
        Ok(previous)
    }

    pub fn set_smooth_shading<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: ObjectId,
        smooth: bool,
    ) -> HostResult<()> {
        self.touch(host, id)?;
        host.set_smooth_shading(id, smooth)?;
        self.record(Mutation::SetSmoothShading { object: id, smooth });
        Ok(())
    }

    pub fn select_vertices<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: ObjectId,
        predicate: &dyn Fn(Vec3) -> bool,
    ) -> HostResult<usize> {
        self.touch(host, id)?;
        let count = host.select_vertices(id, predicate)?;
        self.record(Mutation::SelectVertices { object: id, count });
        Ok(count)
    }

    pub fn delete_selected_vertices<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: ObjectId,
    ) -> HostResult<usize> {
        self.touch(host, id)?;
        let removed = host.delete_selected_vertices(id)?;
        self.record(Mutation::DeleteSelectedVertices {
            object: id,
            removed,
        });
        Ok(removed)
    }

    // === OUTCOME ===

    /// Push the whole log to the host as one undo unit
    ///
    /// Objects whose after-state cannot be captured are left out of `after`
    /// and logged.
    pub fn commit<H: SceneHost + ?Sized>(self, host: &mut H) {
        let mut after = Vec::with_capacity(self.captured.len());
        for (id, _) in &self.captured {
            match host.capture(*id) {
                Ok(state) => after.push((*id, state)),
                Err(e) => tracing::warn!("[{}] could not capture {}: {}", self.label, id, e),
            }
        }

        tracing::debug!(
            "[{}] committed {} mutation(s) on {} object(s)",
            self.label,
            self.mutations.len(),
            self.captured.len()
        );

        host.push_undo(UndoUnit {
            label: self.label,
            mutations: self.mutations,
            before: self.captured,
            after,
            created: Vec::new(),
            created_collections: Vec::new(),
        });
    }

    /// Restore every captured state, newest first
    ///
    /// Keeps going past failed restores; returns how many succeeded.
    pub fn rollback<H: SceneHost + ?Sized>(self, host: &mut H) -> usize {
        let mut restored = 0;
        for (id, state) in self.captured.into_iter().rev() {
            match host.restore(id, state) {
                Ok(()) => restored += 1,
                Err(e) => tracing::error!("[{}] rollback of {} failed: {}", self.label, id, e),
            }
        }
        tracing::debug!(
            "[{}] rolled back {} mutation(s)",
            self.label,
            self.mutations.len()
        );
        restored
    }
}
