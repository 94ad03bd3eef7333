//! Role resolution - assigns structural roles to validated selections

use serde::{Deserialize, Serialize};

use crate::command::classifier::Intent;
use crate::command::validator::KindRequirement;
use crate::core::error::{CopilotError, Result};
use crate::core::types::{ObjectKind, ObjectRef, SelectionSnapshot};

/// Which selected object plays which part in a workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "roles", rename_all = "snake_case")]
pub enum RoleAssignment {
    /// One mesh (array, hard-surface, symmetrize, solidify)
    Single { mesh: ObjectRef },
    /// Array driven by an empty's transform
    MeshController {
        mesh: ObjectRef,
        controller: ObjectRef,
    },
    MeshCurve { mesh: ObjectRef, curve: ObjectRef },
    /// Shrinkwrap: `source` receives the modifier, `target` is wrapped onto
    SourceTarget { source: ObjectRef, target: ObjectRef },
}

impl RoleAssignment {
    /// The object whose modification stack the workflow edits
    pub fn primary(&self) -> &ObjectRef {
        match self {
            RoleAssignment::Single { mesh }
            | RoleAssignment::MeshController { mesh, .. }
            | RoleAssignment::MeshCurve { mesh, .. } => mesh,
            RoleAssignment::SourceTarget { source, .. } => source,
        }
    }
}

/// Pair two objects by kind regardless of argument order
///
/// Returns `(object of kind first, object of kind second)`.
pub fn pair_by_kind<'a>(
    a: &'a ObjectRef,
    b: &'a ObjectRef,
    first: ObjectKind,
    second: ObjectKind,
) -> Option<(&'a ObjectRef, &'a ObjectRef)> {
    if a.kind == first && b.kind == second {
        Some((a, b))
    } else if b.kind == first && a.kind == second {
        Some((b, a))
    } else {
        None
    }
}

/// Resolve roles for a selection that already passed validation
pub fn resolve_roles(intent: Intent, snapshot: &SelectionSnapshot) -> Result<RoleAssignment> {
    match (intent, snapshot.selected.as_slice()) {
        (Intent::Unknown, _) => Err(CopilotError::CommandUnrecognized),

        (
            Intent::SmartArray
            | Intent::HardSurface
            | Intent::Symmetrize
            | Intent::Solidify,
            [mesh],
        ) if mesh.kind == ObjectKind::Mesh => Ok(RoleAssignment::Single { mesh: mesh.clone() }),

        (Intent::SmartArray, [a, b]) => pair_by_kind(a, b, ObjectKind::Mesh, ObjectKind::Empty)
            .map(|(mesh, controller)| RoleAssignment::MeshController {
                mesh: mesh.clone(),
                controller: controller.clone(),
            })
            .ok_or_else(|| failure(KindRequirement::MeshAndEmpty)),

        (Intent::CurveDeform, [a, b]) => pair_by_kind(a, b, ObjectKind::Mesh, ObjectKind::Curve)
            .map(|(mesh, curve)| RoleAssignment::MeshCurve {
                mesh: mesh.clone(),
                curve: curve.clone(),
            })
            .ok_or_else(|| failure(KindRequirement::MeshAndCurve)),

        (Intent::Shrinkwrap, [a, b]) => {
            let active = snapshot
                .active_in_selection()
                .ok_or(CopilotError::ActiveObjectMissing)?;
            let (source, target) = if active.id == a.id { (a, b) } else { (b, a) };
            if source.kind != ObjectKind::Mesh || target.kind != ObjectKind::Mesh {
                return Err(failure(KindRequirement::TwoMeshes));
            }
            Ok(RoleAssignment::SourceTarget {
                source: source.clone(),
                target: target.clone(),
            })
        }

        (Intent::SmartArray, _) => Err(failure(KindRequirement::MeshAndEmpty)),
        (Intent::CurveDeform, _) => Err(failure(KindRequirement::MeshAndCurve)),
        (Intent::Shrinkwrap, _) => Err(failure(KindRequirement::TwoMeshes)),
        (_, _) => Err(failure(KindRequirement::Mesh)),
    }
}

fn failure(requirement: KindRequirement) -> CopilotError {
    CopilotError::RoleResolutionFailure {
        expected: requirement.role_names(),
    }
}
