// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Final statistics record

use super::topology::Topology;
use super::volumetric::Volumetrics;
use crate::geometry::BoundingBox;
use crate::utils::round_to;
use log::warn;
use serde::{Deserialize, Serialize};

/// Decimal places for dimensions and surface area
pub const LENGTH_DECIMALS: i32 = 2;
/// Decimal places for volume
pub const VOLUME_DECIMALS: i32 = 3;

/// World-space extent along each axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Print-readiness statistics of a scene, produced once per analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelStats {
    pub triangle_count: usize,
    pub vertex_count: usize,
    pub mesh_count: usize,
    pub dimensions: Dimensions,
    pub volume: f64,
    pub surface_area: f64,
    pub file_size: u64,
    pub is_watertight: bool,
    pub bounding_box: BoundingBox,
    /// Submeshes left out for malformed buffers
    #[serde(default)]
    pub skipped_meshes: usize,
}

impl ModelStats {
    /// Zero-valued record for a scene without geometry
    pub fn empty() -> Self {
        Self {
            triangle_count: 0,
            vertex_count: 0,
            mesh_count: 0,
            dimensions: Dimensions::default(),
            volume: 0.0,
            surface_area: 0.0,
            file_size: 0,
            is_watertight: false,
            bounding_box: BoundingBox::zero(),
            skipped_meshes: 0,
        }
    }

    /// Gate for the repair action
    pub fn needs_repair(&self) -> bool {
        !self.is_watertight
    }

    /// Whether some submeshes were left out of the totals
    pub fn is_partial(&self) -> bool {
        self.skipped_meshes > 0
    }

    pub fn has_geometry(&self) -> bool {
        self.triangle_count > 0
    }
}

/// Clamp a non-negative measurement into the finite range. Sums that
/// overflowed saturate at `f64::MAX`; NaN reads as zero.
fn saturate(value: f64, field: &str) -> f64 {
    if value.is_finite() {
        return value.max(0.0);
    }
    warn!("{} is not representable ({}), clamping", field, value);
    if value == f64::INFINITY {
        f64::MAX
    } else {
        0.0
    }
}

/// Merge stage outputs into the final record, rounding for presentation
pub fn aggregate(
    topology: &Topology,
    bounds: &BoundingBox,
    volumetrics: &Volumetrics,
    is_watertight: bool,
    file_size: u64,
) -> ModelStats {
    let bounding_box = bounds.or_origin();
    let size = bounding_box.size();

    ModelStats {
        triangle_count: topology.triangle_count,
        vertex_count: topology.vertex_count,
        mesh_count: topology.mesh_count,
        dimensions: Dimensions {
            x: round_to(saturate(size.x, "dimensions.x"), LENGTH_DECIMALS),
            y: round_to(saturate(size.y, "dimensions.y"), LENGTH_DECIMALS),
            z: round_to(saturate(size.z, "dimensions.z"), LENGTH_DECIMALS),
        },
        volume: round_to(saturate(volumetrics.volume, "volume"), VOLUME_DECIMALS),
        surface_area: round_to(
            saturate(volumetrics.surface_area, "surface area"),
            LENGTH_DECIMALS,
        ),
        file_size,
        is_watertight,
        bounding_box,
        skipped_meshes: topology.skipped_meshes,
    }
}
