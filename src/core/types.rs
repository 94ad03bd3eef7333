//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for scene objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Structural kind of a scene object, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectKind {
    Mesh,
    Empty,
    Curve,
    /// Cameras, lights, text and anything else the workflows never accept
    Other,
}

impl ObjectKind {
    /// Fixed ordering used for kind tallies and summaries
    pub const ALL: [ObjectKind; 4] = [
        ObjectKind::Mesh,
        ObjectKind::Empty,
        ObjectKind::Curve,
        ObjectKind::Other,
    ];

    fn slot(self) -> usize {
        match self {
            ObjectKind::Mesh => 0,
            ObjectKind::Empty => 1,
            ObjectKind::Curve => 2,
            ObjectKind::Other => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Mesh => "MESH",
            ObjectKind::Empty => "EMPTY",
            ObjectKind::Curve => "CURVE",
            ObjectKind::Other => "OTHER",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the host is manipulating whole objects or their elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionMode {
    #[default]
    Object,
    /// Vertex/edge/face editing of a single object
    Edit,
    /// Sculpt, paint and other host modes
    Other,
}

impl InteractionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            InteractionMode::Object => "OBJECT",
            InteractionMode::Edit => "EDIT",
            InteractionMode::Other => "OTHER",
        }
    }
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lightweight reference to an object in the host scene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub name: String,
}

impl ObjectRef {
    pub fn new(id: ObjectId, kind: ObjectKind, name: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
        }
    }
}

/// Per-kind object counts (the kind multiset of a selection)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KindCounts {
    counts: [usize; 4],
}

impl KindCounts {
    /// Build a multiset literal: `KindCounts::of(1, 1, 0, 0)` is one mesh and one empty
    pub const fn of(mesh: usize, empty: usize, curve: usize, other: usize) -> Self {
        Self {
            counts: [mesh, empty, curve, other],
        }
    }

    /// Count kinds in a single pass
    pub fn tally<'a>(objects: impl IntoIterator<Item = &'a ObjectRef>) -> Self {
        let mut counts = [0usize; 4];
        for object in objects {
            counts[object.kind.slot()] += 1;
        }
        Self { counts }
    }

    pub fn get(&self, kind: ObjectKind) -> usize {
        self.counts[kind.slot()]
    }

    pub const fn total(&self) -> usize {
        self.counts[0] + self.counts[1] + self.counts[2] + self.counts[3]
    }
}

/// Read-only view of the selection at dispatch time
///
/// Captured fresh for every dispatch and never cached between calls.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    /// Selected objects in host selection order
    pub selected: Vec<ObjectRef>,
    /// The host's active object; may be outside the selection
    pub active: Option<ObjectRef>,
    pub mode: InteractionMode,
}

impl SelectionSnapshot {
    pub fn new(
        selected: Vec<ObjectRef>,
        active: Option<ObjectRef>,
        mode: InteractionMode,
    ) -> Self {
        Self {
            selected,
            active,
            mode,
        }
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn kind_counts(&self) -> KindCounts {
        KindCounts::tally(&self.selected)
    }

    /// The active object, only if it is also part of the selection
    pub fn active_in_selection(&self) -> Option<&ObjectRef> {
        let active = self.active.as_ref()?;
        self.selected.iter().find(|o| o.id == active.id)
    }

    /// Human-readable selection info: one line per object for small
    /// selections, per-kind counts for larger ones, then the mode.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        if self.selected.is_empty() {
            lines.push("No objects selected".to_string());
        } else {
            lines.push(format!("Selected: {} object(s)", self.selected.len()));
            if self.selected.len() <= 3 {
                let active_id = self.active.as_ref().map(|a| a.id);
                for object in &self.selected {
                    let marker = if Some(object.id) == active_id {
                        " (active)"
                    } else {
                        ""
                    };
                    lines.push(format!("  - {} ({}){}", object.name, object.kind, marker));
                }
            } else {
                let counts = self.kind_counts();
                for kind in ObjectKind::ALL {
                    let count = counts.get(kind);
                    if count > 0 {
                        lines.push(format!("  - {}: {}", kind, count));
                    }
                }
            }
        }

        lines.push(format!("Mode: {}", self.mode));
        lines.join("\n")
    }
}
