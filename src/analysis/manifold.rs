// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Watertightness via undirected edge incidence.
//!
//! A submesh is watertight when every undirected edge is used by exactly
//! two triangles. Edges used once are boundaries (holes), edges used three
//! or more times are non-manifold. Soups carry no shared-vertex topology
//! and cannot be verified.

use super::topology;
use crate::geometry::{Scene, Submesh};
use ahash::AHashMap;

/// Undirected edge with the smaller vertex index first
pub type EdgeKey = (u32, u32);

fn edge_key(a: u32, b: u32) -> EdgeKey {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Number of triangles using each undirected edge of an indexed submesh
pub fn edge_incidence(indices: &[u32]) -> AHashMap<EdgeKey, u32> {
    let mut counts: AHashMap<EdgeKey, u32> = AHashMap::with_capacity(indices.len());

    for tri in indices.chunks_exact(3) {
        for i in 0..3 {
            let edge = edge_key(tri[i], tri[(i + 1) % 3]);
            *counts.entry(edge).or_insert(0) += 1;
        }
    }

    counts
}

/// Edge classification of one indexed submesh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeReport {
    pub edges: usize,
    /// Edges used by a single triangle
    pub boundary_edges: usize,
    /// Edges used by three or more triangles
    pub non_manifold_edges: usize,
}

impl EdgeReport {
    pub fn from_incidence(counts: &AHashMap<EdgeKey, u32>) -> Self {
        let mut report = Self {
            edges: counts.len(),
            ..Self::default()
        };
        for &count in counts.values() {
            match count {
                1 => report.boundary_edges += 1,
                2 => {}
                _ => report.non_manifold_edges += 1,
            }
        }
        report
    }

    pub fn is_watertight(&self) -> bool {
        self.edges > 0 && self.boundary_edges == 0 && self.non_manifold_edges == 0
    }
}

/// Full edge report, or `None` for a soup or a submesh without triangles
pub fn inspect_submesh(submesh: &Submesh) -> Option<EdgeReport> {
    let indices = submesh.indices.as_deref()?;
    if indices.len() < 3 {
        return None;
    }
    Some(EdgeReport::from_incidence(&edge_incidence(indices)))
}

/// Local verdict for one submesh, stopping at the first bad edge.
/// `None` when the submesh cannot be verified.
pub fn submesh_is_watertight(submesh: &Submesh) -> Option<bool> {
    let indices = submesh.indices.as_deref()?;
    if indices.len() < 3 {
        return None;
    }
    Some(edge_incidence(indices).values().all(|&count| count == 2))
}

/// Running scene-level verdict
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatertightTally {
    /// Submeshes whose topology was checked
    pub verified: usize,
    /// Checked submeshes that leak, plus submeshes that could not be analyzed
    pub failed: usize,
}

impl WatertightTally {
    pub fn record(&mut self, verdict: Option<bool>) {
        match verdict {
            Some(true) => self.verified += 1,
            Some(false) => {
                self.verified += 1;
                self.failed += 1;
            }
            None => {}
        }
    }

    /// A submesh dropped for malformed buffers cannot be certified
    pub fn record_skipped(&mut self) {
        self.failed += 1;
    }

    pub fn merge(self, other: WatertightTally) -> WatertightTally {
        WatertightTally {
            verified: self.verified + other.verified,
            failed: self.failed + other.failed,
        }
    }

    /// True only if at least one submesh was verified and none failed
    pub fn verdict(&self) -> bool {
        self.verified > 0 && self.failed == 0
    }
}

/// Scene-level watertightness. Soups alongside indexed submeshes do not
/// affect the verdict; a scene with nothing to verify is not watertight.
/// Malformed submeshes make the scene fail.
pub fn is_watertight(scene: &Scene) -> bool {
    let mut tally = WatertightTally::default();
    for (index, submesh) in scene.submeshes.iter().enumerate() {
        if topology::validate(index, submesh).is_err() {
            tally.record_skipped();
            break;
        }
        tally.record(submesh_is_watertight(submesh));
        if tally.failed > 0 {
            break;
        }
    }
    tally.verdict()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Primitive;
    use nalgebra::Vector3;

    fn unit_cube() -> Submesh {
        Primitive::cube(Vector3::new(1.0, 1.0, 1.0), false).to_submesh()
    }

    fn open_box() -> Submesh {
        let mut cube = unit_cube();
        cube.indices.as_mut().unwrap().truncate(30);
        cube
    }

    #[test]
    fn test_edge_key_is_undirected() {
        assert_eq!(edge_key(5, 2), edge_key(2, 5));
        assert_eq!(edge_key(5, 2), (2, 5));
    }

    #[test]
    fn test_closed_cube() {
        let report = inspect_submesh(&unit_cube()).unwrap();
        assert_eq!(report.edges, 18);
        assert_eq!(report.boundary_edges, 0);
        assert!(report.is_watertight());
        assert_eq!(submesh_is_watertight(&unit_cube()), Some(true));
    }

    #[test]
    fn test_open_box_has_boundary() {
        let report = inspect_submesh(&open_box()).unwrap();
        assert_eq!(report.boundary_edges, 4);
        assert_eq!(report.non_manifold_edges, 0);
        assert!(!report.is_watertight());
        assert_eq!(submesh_is_watertight(&open_box()), Some(false));
    }

    #[test]
    fn test_non_manifold_fin() {
        let mut cube = unit_cube();
        // Third triangle hanging off the 4-5 edge
        cube.positions.push(nalgebra::Point3::new(0.5, -1.0, 1.0));
        cube.indices.as_mut().unwrap().extend_from_slice(&[4, 8, 5]);
        let report = inspect_submesh(&cube).unwrap();
        assert_eq!(report.non_manifold_edges, 1);
        assert_eq!(report.boundary_edges, 2);
        assert!(!report.is_watertight());
    }

    #[test]
    fn test_soup_is_unverifiable() {
        assert_eq!(inspect_submesh(&unit_cube().to_soup()), None);
        assert_eq!(submesh_is_watertight(&unit_cube().to_soup()), None);
        assert!(!is_watertight(&Scene::new(vec![unit_cube().to_soup()], 0)));
    }

    #[test]
    fn test_scene_verdict() {
        let closed = Scene::new(vec![unit_cube(), unit_cube().to_soup()], 0);
        assert!(is_watertight(&closed));

        let mixed = Scene::new(vec![unit_cube(), open_box()], 0);
        assert!(!is_watertight(&mixed));

        assert!(!is_watertight(&Scene::empty()));
    }

    #[test]
    fn test_malformed_submesh_fails_scene() {
        let mut broken = unit_cube();
        broken.indices.as_mut().unwrap().push(1);
        assert!(!is_watertight(&Scene::new(vec![unit_cube(), broken], 0)));
    }

    #[test]
    fn test_early_exit_agrees_with_full_report() {
        for submesh in [unit_cube(), open_box(), Primitive::plane(1.0, 1.0).to_submesh()] {
            let full = inspect_submesh(&submesh).map(|r| r.is_watertight());
            assert_eq!(full, submesh_is_watertight(&submesh));
        }
    }

    #[test]
    fn test_tally() {
        let mut tally = WatertightTally::default();
        assert!(!tally.verdict());
        tally.record(None);
        assert!(!tally.verdict());
        tally.record(Some(true));
        assert!(tally.verdict());

        let mut other = WatertightTally::default();
        other.record_skipped();
        assert!(!tally.merge(other).verdict());
    }
}
