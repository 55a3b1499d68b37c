// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Triangle, vertex and submesh counting

use crate::error::{AnalysisError, Result};
use crate::geometry::{Scene, Submesh};

/// Element counts of a scene or a single submesh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Topology {
    pub triangle_count: usize,
    pub vertex_count: usize,
    pub mesh_count: usize,
    /// Submeshes counted in `mesh_count` but dropped for malformed buffers
    pub skipped_meshes: usize,
}

impl Topology {
    /// Counts of one well-formed submesh
    pub fn of_submesh(submesh: &Submesh) -> Self {
        Self {
            triangle_count: submesh.reference_count() / 3,
            vertex_count: submesh.vertex_count(),
            mesh_count: 1,
            skipped_meshes: 0,
        }
    }

    /// Counts of a submesh dropped from the analysis
    pub fn skipped() -> Self {
        Self {
            mesh_count: 1,
            skipped_meshes: 1,
            ..Self::default()
        }
    }

    pub fn merge(self, other: Topology) -> Topology {
        Topology {
            triangle_count: self.triangle_count + other.triangle_count,
            vertex_count: self.vertex_count + other.vertex_count,
            mesh_count: self.mesh_count + other.mesh_count,
            skipped_meshes: self.skipped_meshes + other.skipped_meshes,
        }
    }
}

/// Check that a submesh's buffers can be read as whole triangles
pub fn check_lengths(index: usize, submesh: &Submesh) -> Result<()> {
    match &submesh.indices {
        Some(indices) if indices.len() % 3 != 0 => {
            Err(AnalysisError::IndexCountNotMultipleOfThree {
                submesh: index,
                len: indices.len(),
            })
        }
        None if submesh.positions.len() % 3 != 0 => {
            Err(AnalysisError::SoupCountNotMultipleOfThree {
                submesh: index,
                len: submesh.positions.len(),
            })
        }
        _ => Ok(()),
    }
}

/// Check that every index references an existing vertex
pub fn check_index_range(index: usize, submesh: &Submesh) -> Result<()> {
    let Some(indices) = &submesh.indices else {
        return Ok(());
    };
    let vertex_count = submesh.vertex_count();
    match indices.iter().find(|&&i| i as usize >= vertex_count) {
        Some(&bad) => Err(AnalysisError::IndexOutOfRange {
            submesh: index,
            index: bad,
            vertex_count,
        }),
        None => Ok(()),
    }
}

/// Full structural validation of one submesh
pub fn validate(index: usize, submesh: &Submesh) -> Result<()> {
    check_lengths(index, submesh)?;
    check_index_range(index, submesh)
}

/// Count triangles, vertices and submeshes of a scene from buffer lengths
/// alone. Fails on the first buffer whose length is not a multiple of 3.
pub fn aggregate(scene: &Scene) -> Result<Topology> {
    scene
        .submeshes
        .iter()
        .enumerate()
        .try_fold(Topology::default(), |acc, (index, submesh)| {
            check_lengths(index, submesh)?;
            Ok(acc.merge(Topology::of_submesh(submesh)))
        })
}

/// Triangle count implied by buffer lengths, without validation
pub fn triangle_estimate(scene: &Scene) -> usize {
    scene
        .submeshes
        .iter()
        .map(|submesh| submesh.reference_count() / 3)
        .sum()
}
