// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Single-pass analysis engine.
//!
//! Each submesh is visited once to produce its counts, bounds, volume,
//! area and edge verdict. Visits may run on the rayon pool; the partial
//! results are collected in submesh order and reduced sequentially, so the
//! floating-point sums do not depend on scheduling.

use super::bounds::submesh_bounds;
use super::manifold::{inspect_submesh, EdgeReport, WatertightTally};
use super::stats::{self, ModelStats};
use super::topology::{self, Topology};
use super::volumetric::{measure_submesh, Volumetrics};
use crate::config::{AnalysisConfig, StructuralPolicy};
use crate::error::{AnalysisError, Result};
use crate::geometry::{BoundingBox, Scene, Submesh};
use log::{debug, trace, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Diagnostics of one submesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmeshReport {
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub indexed: bool,
    pub triangle_count: usize,
    pub vertex_count: usize,
    /// `None` when the submesh could not be verified
    pub watertight: Option<bool>,
    pub boundary_edges: usize,
    pub non_manifold_edges: usize,
    pub degenerate_triangles: usize,
    pub volume: f64,
    pub surface_area: f64,
    /// Structural error that caused the submesh to be skipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmeshReport {
    pub fn is_skipped(&self) -> bool {
        self.error.is_some()
    }
}

/// Statistics plus per-submesh diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub stats: ModelStats,
    pub submeshes: Vec<SubmeshReport>,
}

impl AnalysisReport {
    pub fn skipped(&self) -> impl Iterator<Item = &SubmeshReport> {
        self.submeshes.iter().filter(|report| report.is_skipped())
    }
}

/// Everything one visit learns about a submesh
struct SubmeshPartial {
    topology: Topology,
    bounds: BoundingBox,
    volumetrics: Volumetrics,
    edges: Option<EdgeReport>,
    report: SubmeshReport,
}

impl SubmeshPartial {
    fn skipped(index: usize, submesh: &Submesh, error: &AnalysisError) -> Self {
        Self {
            topology: Topology::skipped(),
            bounds: BoundingBox::empty(),
            volumetrics: Volumetrics::default(),
            edges: None,
            report: SubmeshReport {
                index,
                name: submesh.name.clone(),
                indexed: submesh.is_indexed(),
                triangle_count: 0,
                vertex_count: submesh.vertex_count(),
                watertight: None,
                boundary_edges: 0,
                non_manifold_edges: 0,
                degenerate_triangles: 0,
                volume: 0.0,
                surface_area: 0.0,
                error: Some(error.to_string()),
            },
        }
    }
}

/// Mesh analysis engine
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: AnalysisConfig,
}

impl Engine {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze a scene into its statistics record
    pub fn analyze(&self, scene: &Scene) -> Result<ModelStats> {
        Ok(self.analyze_detailed(scene)?.stats)
    }

    /// Analyze a scene, keeping per-submesh diagnostics
    pub fn analyze_detailed(&self, scene: &Scene) -> Result<AnalysisReport> {
        if let Some(limit) = self.config.max_triangles {
            let triangles = topology::triangle_estimate(scene);
            if triangles > limit {
                return Err(AnalysisError::TooLarge { triangles, limit });
            }
        }

        if scene.is_empty() || scene.total_vertices() == 0 {
            debug!(
                "scene has no geometry ({} submeshes), reporting zero stats",
                scene.submeshes.len()
            );
        }

        let submesh_count = scene.submeshes.len();
        let visits: Vec<Result<SubmeshPartial>> = if self.config.use_parallel(submesh_count) {
            scene
                .submeshes
                .par_iter()
                .enumerate()
                .map(|(index, submesh)| self.visit(index, submesh))
                .collect()
        } else {
            scene
                .submeshes
                .iter()
                .enumerate()
                .map(|(index, submesh)| self.visit(index, submesh))
                .collect()
        };

        let mut topology = Topology::default();
        let mut bounds = BoundingBox::empty();
        let mut volumetrics = Volumetrics::default();
        let mut tally = WatertightTally::default();
        let mut reports = Vec::with_capacity(submesh_count);

        for (visit, submesh) in visits.into_iter().zip(&scene.submeshes) {
            let partial = match visit {
                Ok(partial) => partial,
                Err(err)
                    if err.is_structural()
                        && self.config.structural_policy == StructuralPolicy::Skip =>
                {
                    warn!("skipping malformed submesh: {}", err);
                    let index = err.submesh().unwrap_or(reports.len());
                    tally.record_skipped();
                    SubmeshPartial::skipped(index, submesh, &err)
                }
                Err(err) => return Err(err),
            };

            topology = topology.merge(partial.topology);
            bounds = bounds.merge(&partial.bounds);
            volumetrics = volumetrics.merge(partial.volumetrics);
            if !partial.report.is_skipped() {
                tally.record(partial.edges.map(|edges| edges.is_watertight()));
            }
            reports.push(partial.report);
        }

        if volumetrics.degenerate_triangles > 0 {
            warn!(
                "{} degenerate triangles were left out of volume or area",
                volumetrics.degenerate_triangles
            );
        }

        let stats = stats::aggregate(
            &topology,
            &bounds,
            &volumetrics,
            tally.verdict(),
            scene.file_size,
        );

        debug!(
            "analyzed {} submeshes: {} triangles, {} vertices, watertight={}, skipped={}",
            stats.mesh_count,
            stats.triangle_count,
            stats.vertex_count,
            stats.is_watertight,
            stats.skipped_meshes
        );

        Ok(AnalysisReport {
            stats,
            submeshes: reports,
        })
    }

    fn visit(&self, index: usize, submesh: &Submesh) -> Result<SubmeshPartial> {
        topology::validate(index, submesh)?;

        let topology = Topology::of_submesh(submesh);
        let (bounds, rejected) = submesh_bounds(submesh);
        let volumetrics = measure_submesh(submesh, self.config.soup_geometry);
        let edges = inspect_submesh(submesh);

        if rejected > 0 {
            warn!(
                "submesh {}: {} vertices with non-finite world position left out of bounds",
                index, rejected
            );
        }
        trace!(
            "submesh {}: {} triangles, volume {:.6}, area {:.6}, edges {:?}",
            index,
            topology.triangle_count,
            volumetrics.volume,
            volumetrics.surface_area,
            edges
        );

        let report = SubmeshReport {
            index,
            name: submesh.name.clone(),
            indexed: submesh.is_indexed(),
            triangle_count: topology.triangle_count,
            vertex_count: topology.vertex_count,
            watertight: edges.map(|e| e.is_watertight()),
            boundary_edges: edges.map_or(0, |e| e.boundary_edges),
            non_manifold_edges: edges.map_or(0, |e| e.non_manifold_edges),
            degenerate_triangles: volumetrics.degenerate_triangles,
            volume: volumetrics.volume,
            surface_area: volumetrics.surface_area,
            error: None,
        };

        Ok(SubmeshPartial {
            topology,
            bounds,
            volumetrics,
            edges,
            report,
        })
    }
}

/// Analyze a scene with the default configuration
pub fn analyze(scene: &Scene) -> Result<ModelStats> {
    Engine::default().analyze(scene)
}
