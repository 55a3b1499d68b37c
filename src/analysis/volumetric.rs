// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Enclosed volume and surface area.
//!
//! Volume is the divergence-theorem sum of signed tetrahedra spanned by the
//! origin and each world-space triangle. The signed sum is taken per
//! submesh and its absolute value added to the total, so each submesh must
//! be closed and consistently wound for the figure to be exact. Open,
//! self-intersecting or inconsistently wound submeshes yield an
//! approximation. Surface area is unsigned and always additive.
//!
//! All accumulation happens in f64 regardless of the f32 vertex buffers.

use super::topology;
use crate::config::SoupGeometry;
use crate::geometry::{Scene, Submesh};
use crate::utils::math::{is_finite_point, signed_tetra_volume, triangle_area};

/// Volume and area of a submesh or scene
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Volumetrics {
    pub volume: f64,
    pub surface_area: f64,
    /// Triangles with zero area, a non-finite vertex, or a contribution
    /// that overflowed f64 and was left out
    pub degenerate_triangles: usize,
}

impl Volumetrics {
    pub fn merge(self, other: Volumetrics) -> Volumetrics {
        Volumetrics {
            volume: self.volume + other.volume,
            surface_area: self.surface_area + other.surface_area,
            degenerate_triangles: self.degenerate_triangles + other.degenerate_triangles,
        }
    }
}

/// Measure one well-formed submesh. Soups contribute nothing under
/// [`SoupGeometry::Exclude`].
pub fn measure_submesh(submesh: &Submesh, soups: SoupGeometry) -> Volumetrics {
    if !submesh.is_indexed() && soups == SoupGeometry::Exclude {
        return Volumetrics::default();
    }

    let mut signed_volume = 0.0f64;
    let mut surface_area = 0.0f64;
    let mut degenerate_triangles = 0;

    for [a, b, c] in submesh.triangles() {
        let v0 = submesh.world_position(a);
        let v1 = submesh.world_position(b);
        let v2 = submesh.world_position(c);

        if !(is_finite_point(&v0) && is_finite_point(&v1) && is_finite_point(&v2)) {
            degenerate_triangles += 1;
            continue;
        }

        // Overflow in one quantity does not discard the other
        let volume = signed_tetra_volume(&v0, &v1, &v2);
        let area = triangle_area(&v0, &v1, &v2);
        if volume.is_finite() {
            signed_volume += volume;
        }
        if area.is_finite() {
            surface_area += area;
        }
        if !volume.is_finite() || !area.is_finite() || area == 0.0 {
            degenerate_triangles += 1;
        }
    }

    Volumetrics {
        volume: signed_volume.abs(),
        surface_area,
        degenerate_triangles,
    }
}

/// Total volume and surface area over every well-formed submesh
pub fn measure(scene: &Scene, soups: SoupGeometry) -> Volumetrics {
    scene
        .submeshes
        .iter()
        .enumerate()
        .filter(|(index, submesh)| topology::validate(*index, submesh).is_ok())
        .map(|(_, submesh)| measure_submesh(submesh, soups))
        .fold(Volumetrics::default(), Volumetrics::merge)
}
