// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Decoded scene representation

use nalgebra::{Matrix4, Point3};
use serde::{Deserialize, Serialize};

fn identity() -> Matrix4<f64> {
    Matrix4::identity()
}

/// One mesh of a decoded scene: vertex buffer, optional index buffer and
/// local-to-world transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submesh {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub positions: Vec<Point3<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indices: Option<Vec<u32>>,
    #[serde(default = "identity")]
    pub transform: Matrix4<f64>,
}

impl Submesh {
    /// Un-indexed submesh (triangle soup) with identity transform
    pub fn soup(positions: Vec<Point3<f32>>) -> Self {
        Self {
            name: None,
            positions,
            indices: None,
            transform: identity(),
        }
    }

    /// Indexed submesh with identity transform
    pub fn indexed(positions: Vec<Point3<f32>>, indices: Vec<u32>) -> Self {
        Self {
            name: None,
            positions,
            indices: Some(indices),
            transform: identity(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_transform(mut self, transform: Matrix4<f64>) -> Self {
        self.transform = transform;
        self
    }

    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of entries that describe triangles: the index buffer length,
    /// or the vertex buffer length for a soup
    pub fn reference_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len(),
            None => self.positions.len(),
        }
    }

    /// Vertex `i` mapped into world space, widened to f64
    pub fn world_position(&self, i: usize) -> Point3<f64> {
        self.transform
            .transform_point(&self.positions[i].cast::<f64>())
    }

    /// Iterate triangles as vertex index triples. Trailing references that
    /// do not form a whole triangle are ignored.
    pub fn triangles(&self) -> Triangles<'_> {
        Triangles {
            submesh: self,
            next: 0,
            count: self.reference_count() / 3,
        }
    }

    /// Expand into a flat triangle soup with the same transform.
    /// Panics if an index is out of range for the vertex buffer.
    pub fn to_soup(&self) -> Submesh {
        let positions = self
            .triangles()
            .flat_map(|tri| tri.map(|i| self.positions[i]))
            .collect();
        Submesh {
            name: self.name.clone(),
            positions,
            indices: None,
            transform: self.transform,
        }
    }
}

/// Iterator over the triangles of a submesh
pub struct Triangles<'a> {
    submesh: &'a Submesh,
    next: usize,
    count: usize,
}

impl Iterator for Triangles<'_> {
    type Item = [usize; 3];

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let base = self.next * 3;
        self.next += 1;
        Some(match &self.submesh.indices {
            Some(indices) => [
                indices[base] as usize,
                indices[base + 1] as usize,
                indices[base + 2] as usize,
            ],
            None => [base, base + 1, base + 2],
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Triangles<'_> {}

/// A fully decoded scene handed over by the mesh decoder
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub submeshes: Vec<Submesh>,
    /// Byte size of the originating file, echoed into the result
    #[serde(default)]
    pub file_size: u64,
}

impl Scene {
    pub fn new(submeshes: Vec<Submesh>, file_size: u64) -> Self {
        Self {
            submeshes,
            file_size,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.submeshes.is_empty()
    }

    pub fn total_vertices(&self) -> usize {
        self.submeshes.iter().map(Submesh::vertex_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn quad() -> Submesh {
        Submesh::indexed(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
    }

    #[test]
    fn test_indexed_triangles() {
        let mesh = quad();
        let tris: Vec<_> = mesh.triangles().collect();
        assert_eq!(tris, vec![[0, 1, 2], [0, 2, 3]]);
        assert_eq!(mesh.triangles().len(), 2);
    }

    #[test]
    fn test_soup_triangles() {
        let soup = quad().to_soup();
        assert!(!soup.is_indexed());
        assert_eq!(soup.vertex_count(), 6);
        let tris: Vec<_> = soup.triangles().collect();
        assert_eq!(tris, vec![[0, 1, 2], [3, 4, 5]]);
        assert_eq!(soup.positions[4], Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_world_position() {
        let mesh = quad().with_transform(Matrix4::new_translation(&Vector3::new(0.0, 0.0, 5.0)));
        assert_eq!(mesh.world_position(2), Point3::new(1.0, 1.0, 5.0));
    }

    #[test]
    fn test_transform_defaults_to_identity() {
        let json = r#"{"positions": [[0.0, 0.0, 0.0]]}"#;
        let mesh: Submesh = serde_json::from_str(json).unwrap();
        assert_eq!(mesh.transform, Matrix4::identity());
        assert!(mesh.indices.is_none());
    }

    #[test]
    fn test_scene_totals() {
        let scene = Scene::new(vec![quad(), quad().to_soup()], 128);
        assert_eq!(scene.total_vertices(), 10);
        assert!(!scene.is_empty());
        assert!(Scene::empty().is_empty());
    }
}
