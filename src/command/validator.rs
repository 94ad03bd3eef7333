//! Selection precondition checks
//!
//! Checks run in a fixed order and stop at the first failure:
//! empty selection, interaction mode, object count, kind combination,
//! then the active object for intents that need one. Nothing here touches
//! the scene.

use std::fmt;

use crate::command::classifier::Intent;
use crate::core::error::{CopilotError, Result};
use crate::core::types::{InteractionMode, KindCounts, SelectionSnapshot};
use crate::feedback::catalog;

/// Accepted selection sizes for an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedCount(pub &'static [usize]);

impl ExpectedCount {
    pub const ONE: Self = Self(&[1]);
    pub const TWO: Self = Self(&[2]);
    pub const ONE_OR_TWO: Self = Self(&[1, 2]);

    pub fn accepts(&self, count: usize) -> bool {
        self.0.contains(&count)
    }
}

impl fmt::Display for ExpectedCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, count) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" or ")?;
            }
            write!(f, "{count}")?;
        }
        Ok(())
    }
}

/// One accepted kind combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindRequirement {
    Mesh,
    MeshAndEmpty,
    MeshAndCurve,
    TwoMeshes,
}

impl KindRequirement {
    /// The kind multiset this requirement accepts
    pub const fn kinds(self) -> KindCounts {
        match self {
            KindRequirement::Mesh => KindCounts::of(1, 0, 0, 0),
            KindRequirement::MeshAndEmpty => KindCounts::of(1, 1, 0, 0),
            KindRequirement::MeshAndCurve => KindCounts::of(1, 0, 1, 0),
            KindRequirement::TwoMeshes => KindCounts::of(2, 0, 0, 0),
        }
    }

    pub const fn count(self) -> usize {
        self.kinds().total()
    }

    /// Catalog text shown when the selection does not match
    pub fn message(&self) -> &'static str {
        match self {
            KindRequirement::Mesh => catalog::WRONG_KIND_MESH,
            KindRequirement::MeshAndEmpty => catalog::WRONG_KIND_MESH_EMPTY,
            KindRequirement::MeshAndCurve => catalog::WRONG_KIND_MESH_CURVE,
            KindRequirement::TwoMeshes => catalog::WRONG_KIND_TWO_MESHES,
        }
    }

    /// Role names used when objects cannot be told apart
    pub fn role_names(self) -> &'static str {
        match self {
            KindRequirement::Mesh => "mesh",
            KindRequirement::MeshAndEmpty => "mesh and empty",
            KindRequirement::MeshAndCurve => "mesh and curve",
            KindRequirement::TwoMeshes => "source and target mesh",
        }
    }
}

/// Preconditions for one intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRule {
    pub counts: ExpectedCount,
    /// Accepted combinations; at most one per selection size
    pub accepted: &'static [KindRequirement],
    pub required_mode: InteractionMode,
    /// The active object must be one of the selected objects
    pub requires_active: bool,
}

impl ValidationRule {
    const fn single_mesh() -> Self {
        Self {
            counts: ExpectedCount::ONE,
            accepted: &[KindRequirement::Mesh],
            required_mode: InteractionMode::Object,
            requires_active: false,
        }
    }

    /// The combination to check for a given selection size
    pub fn requirement_for(&self, count: usize) -> Option<KindRequirement> {
        self.accepted.iter().copied().find(|req| req.count() == count)
    }
}

/// Precondition matrix; `None` for `Intent::Unknown`
pub fn rule_for(intent: Intent) -> Option<ValidationRule> {
    let rule = match intent {
        Intent::SmartArray => ValidationRule {
            counts: ExpectedCount::ONE_OR_TWO,
            accepted: &[KindRequirement::Mesh, KindRequirement::MeshAndEmpty],
            required_mode: InteractionMode::Object,
            requires_active: false,
        },
        Intent::HardSurface | Intent::Symmetrize | Intent::Solidify => {
            ValidationRule::single_mesh()
        }
        Intent::CurveDeform => ValidationRule {
            counts: ExpectedCount::TWO,
            accepted: &[KindRequirement::MeshAndCurve],
            required_mode: InteractionMode::Object,
            requires_active: false,
        },
        Intent::Shrinkwrap => ValidationRule {
            counts: ExpectedCount::TWO,
            accepted: &[KindRequirement::TwoMeshes],
            required_mode: InteractionMode::Object,
            requires_active: true,
        },
        Intent::Unknown => return None,
    };
    Some(rule)
}

/// Check a selection against an intent's preconditions
pub fn validate(intent: Intent, snapshot: &SelectionSnapshot) -> Result<()> {
    let rule = rule_for(intent).ok_or(CopilotError::CommandUnrecognized)?;

    if snapshot.is_empty() {
        return Err(CopilotError::SelectionEmpty);
    }

    if snapshot.mode != rule.required_mode {
        return Err(CopilotError::ModeMismatch {
            current: snapshot.mode,
        });
    }

    let actual = snapshot.len();
    if !rule.counts.accepts(actual) {
        return Err(CopilotError::SelectionCountMismatch {
            expected: rule.counts,
            actual,
        });
    }

    let counts = snapshot.kind_counts();
    let requirement = rule
        .requirement_for(actual)
        .ok_or(CopilotError::SelectionCountMismatch {
            expected: rule.counts,
            actual,
        })?;
    if counts != requirement.kinds() {
        return Err(CopilotError::SelectionKindMismatch {
            expected: requirement,
        });
    }

    if rule.requires_active && snapshot.active_in_selection().is_none() {
        return Err(CopilotError::ActiveObjectMissing);
    }

    Ok(())
}

/// Flattened `(is_valid, message)` view of a validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Empty when valid
    pub message: String,
}

impl ValidationResult {
    pub fn of(intent: Intent, snapshot: &SelectionSnapshot) -> Self {
        match validate(intent, snapshot) {
            Ok(()) => Self {
                is_valid: true,
                message: String::new(),
            },
            Err(e) => Self {
                is_valid: false,
                message: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ObjectId, ObjectKind, ObjectRef};

    fn obj(name: &str, kind: ObjectKind) -> ObjectRef {
        ObjectRef::new(ObjectId::new(), kind, name)
    }

    fn snapshot(kinds: &[ObjectKind]) -> SelectionSnapshot {
        let selected: Vec<ObjectRef> = kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| obj(&format!("Object.{i:03}"), *kind))
            .collect();
        let active = selected.first().cloned();
        SelectionSnapshot::new(selected, active, InteractionMode::Object)
    }

    #[test]
    fn test_expected_count_display() {
        assert_eq!(ExpectedCount::ONE.to_string(), "1");
        assert_eq!(ExpectedCount::TWO.to_string(), "2");
        assert_eq!(ExpectedCount::ONE_OR_TWO.to_string(), "1 or 2");
        assert!(ExpectedCount::ONE_OR_TWO.accepts(2));
        assert!(!ExpectedCount::ONE_OR_TWO.accepts(3));
    }

    #[test]
    fn test_empty_selection_checked_first() {
        let mut empty = SelectionSnapshot::default();
        empty.mode = InteractionMode::Edit;
        for intent in Intent::WORKFLOWS {
            assert_eq!(validate(intent, &empty), Err(CopilotError::SelectionEmpty));
        }
    }

    #[test]
    fn test_mode_checked_before_count() {
        let mut snap = snapshot(&[ObjectKind::Mesh, ObjectKind::Mesh, ObjectKind::Mesh]);
        snap.mode = InteractionMode::Edit;
        let err = validate(Intent::Symmetrize, &snap).unwrap_err();
        assert_eq!(
            err.to_string(),
            "This command must be run in Object Mode (currently in EDIT)"
        );
    }

    #[test]
    fn test_count_mismatch_messages() {
        let two = snapshot(&[ObjectKind::Mesh, ObjectKind::Mesh]);
        assert_eq!(
            validate(Intent::Symmetrize, &two).unwrap_err().to_string(),
            "This command requires 1 selected object(s), but 2 are selected"
        );

        let one = snapshot(&[ObjectKind::Mesh]);
        assert_eq!(
            validate(Intent::CurveDeform, &one).unwrap_err().to_string(),
            "This command requires 2 selected object(s), but 1 are selected"
        );

        let three = snapshot(&[ObjectKind::Mesh, ObjectKind::Empty, ObjectKind::Mesh]);
        assert_eq!(
            validate(Intent::SmartArray, &three).unwrap_err().to_string(),
            "This command requires 1 or 2 selected object(s), but 3 are selected"
        );
    }

    #[test]
    fn test_kind_mismatch_depends_on_selection_size() {
        let curve = snapshot(&[ObjectKind::Curve]);
        assert_eq!(
            validate(Intent::SmartArray, &curve),
            Err(CopilotError::SelectionKindMismatch {
                expected: KindRequirement::Mesh
            })
        );

        let two_meshes = snapshot(&[ObjectKind::Mesh, ObjectKind::Mesh]);
        assert_eq!(
            validate(Intent::SmartArray, &two_meshes),
            Err(CopilotError::SelectionKindMismatch {
                expected: KindRequirement::MeshAndEmpty
            })
        );
    }

    #[test]
    fn test_kind_messages_per_intent() {
        let empty_obj = snapshot(&[ObjectKind::Empty]);
        for intent in [Intent::HardSurface, Intent::Symmetrize, Intent::Solidify] {
            assert_eq!(
                validate(intent, &empty_obj).unwrap_err().to_string(),
                "This command requires a mesh object to be selected"
            );
        }

        let mesh_empty = snapshot(&[ObjectKind::Mesh, ObjectKind::Empty]);
        assert_eq!(
            validate(Intent::CurveDeform, &mesh_empty)
                .unwrap_err()
                .to_string(),
            "This command requires two selected objects: a mesh and a curve"
        );
        assert_eq!(
            validate(Intent::Shrinkwrap, &mesh_empty)
                .unwrap_err()
                .to_string(),
            "This command requires two mesh objects to be selected"
        );
    }

    #[test]
    fn test_accepts_valid_selections_in_any_order() {
        assert!(validate(Intent::SmartArray, &snapshot(&[ObjectKind::Mesh])).is_ok());
        assert!(validate(
            Intent::SmartArray,
            &snapshot(&[ObjectKind::Empty, ObjectKind::Mesh])
        )
        .is_ok());
        assert!(validate(
            Intent::CurveDeform,
            &snapshot(&[ObjectKind::Curve, ObjectKind::Mesh])
        )
        .is_ok());
        assert!(validate(
            Intent::Shrinkwrap,
            &snapshot(&[ObjectKind::Mesh, ObjectKind::Mesh])
        )
        .is_ok());
    }

    #[test]
    fn test_shrinkwrap_requires_active_in_selection() {
        let mut snap = snapshot(&[ObjectKind::Mesh, ObjectKind::Mesh]);
        snap.active = None;
        assert_eq!(
            validate(Intent::Shrinkwrap, &snap),
            Err(CopilotError::ActiveObjectMissing)
        );

        snap.active = Some(obj("Elsewhere", ObjectKind::Mesh));
        assert_eq!(
            validate(Intent::Shrinkwrap, &snap),
            Err(CopilotError::ActiveObjectMissing)
        );
    }

    #[test]
    fn test_single_object_intents_ignore_active() {
        let mut snap = snapshot(&[ObjectKind::Mesh]);
        snap.active = None;
        assert!(validate(Intent::Solidify, &snap).is_ok());
    }

    #[test]
    fn test_unknown_intent_has_no_rule() {
        assert!(rule_for(Intent::Unknown).is_none());
        assert_eq!(
            validate(Intent::Unknown, &snapshot(&[ObjectKind::Mesh])),
            Err(CopilotError::CommandUnrecognized)
        );
    }

    #[test]
    fn test_large_selection_is_count_mismatch() {
        let kinds = vec![ObjectKind::Mesh; 150];
        let snap = snapshot(&kinds);
        assert_eq!(
            validate(Intent::HardSurface, &snap).unwrap_err().to_string(),
            "This command requires 1 selected object(s), but 150 are selected"
        );
    }

    #[test]
    fn test_validation_result_view() {
        let ok = ValidationResult::of(Intent::Solidify, &snapshot(&[ObjectKind::Mesh]));
        assert!(ok.is_valid);
        assert!(ok.message.is_empty());

        let bad = ValidationResult::of(Intent::Solidify, &SelectionSnapshot::default());
        assert!(!bad.is_valid);
        assert_eq!(bad.message, "Please select an object first");
    }
}
