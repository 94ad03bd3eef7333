//! Indexed polygon meshes with per-vertex selection

use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    /// Vertex indices, counter-clockwise
    pub indices: Vec<usize>,
    pub smooth: bool,
}

impl Face {
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            indices,
            smooth: false,
        }
    }
}

/// Mesh geometry in local space
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshData {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Face>,
    /// Parallel to `vertices`
    pub selected: Vec<bool>,
}

impl MeshData {
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Face>) -> Self {
        let selected = vec![false; vertices.len()];
        Self {
            vertices,
            faces,
            selected,
        }
    }

    /// Axis-aligned cube centered on the origin
    pub fn cube(size: f32) -> Self {
        let h = size * 0.5;
        let vertices = vec![
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
        ];
        let faces = [
            [0, 3, 2, 1], // bottom
            [4, 5, 6, 7], // top
            [0, 1, 5, 4], // front
            [2, 3, 7, 6], // back
            [1, 2, 6, 5], // +X
            [0, 4, 7, 3], // -X
        ]
        .into_iter()
        .map(|quad| Face::new(quad.to_vec()))
        .collect();
        Self::new(vertices, faces)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Replace the selection with vertices matching `predicate`
    pub fn select_where(&mut self, predicate: &dyn Fn(Vec3) -> bool) -> usize {
        self.selected = self.vertices.iter().map(|v| predicate(*v)).collect();
        self.selected_count()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.iter().filter(|s| **s).count()
    }

    /// Remove selected vertices along with every face that used them
    pub fn delete_selected(&mut self) -> usize {
        let mut remap = vec![None; self.vertices.len()];
        let mut kept = Vec::with_capacity(self.vertices.len());
        for (i, vertex) in self.vertices.iter().enumerate() {
            if !self.selected.get(i).copied().unwrap_or(false) {
                remap[i] = Some(kept.len());
                kept.push(*vertex);
            }
        }
        let removed = self.vertices.len() - kept.len();

        self.faces = std::mem::take(&mut self.faces)
            .into_iter()
            .filter_map(|face| {
                let indices: Option<Vec<usize>> =
                    face.indices.iter().map(|&i| remap.get(i).copied().flatten()).collect();
                indices.map(|indices| Face {
                    indices,
                    smooth: face.smooth,
                })
            })
            .collect();

        self.selected = vec![false; kept.len()];
        self.vertices = kept;
        removed
    }

    pub fn set_smooth(&mut self, smooth: bool) {
        for face in &mut self.faces {
            face.smooth = smooth;
        }
    }

    pub fn all_smooth(&self) -> bool {
        self.faces.iter().all(|f| f.smooth)
    }

    pub fn scale_by(&mut self, scale: Vec3) {
        for vertex in &mut self.vertices {
            *vertex *= scale;
        }
    }

    /// `(min, max)` corners, or `None` for a mesh without vertices
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(min, max), v| (min.min(*v), max.max(*v))),
        )
    }
}
