// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! World-space axis-aligned bounds

use super::topology;
use crate::geometry::{BoundingBox, Scene, Submesh};
use crate::utils::math::is_finite_point;

/// Bounds of one submesh after its world transform. Non-finite points are
/// left out; the second value counts them.
pub fn submesh_bounds(submesh: &Submesh) -> (BoundingBox, usize) {
    let mut bbox = BoundingBox::empty();
    let mut rejected = 0;

    for i in 0..submesh.vertex_count() {
        let point = submesh.world_position(i);
        if is_finite_point(&point) {
            bbox.expand_to_include(&point);
        } else {
            rejected += 1;
        }
    }

    (bbox, rejected)
}

/// World-space bounding box of every well-formed submesh. A scene without
/// vertices yields the zero box at the origin.
pub fn world_bounds(scene: &Scene) -> BoundingBox {
    scene
        .submeshes
        .iter()
        .enumerate()
        .filter(|(index, submesh)| topology::validate(*index, submesh).is_ok())
        .map(|(_, submesh)| submesh_bounds(submesh).0)
        .fold(BoundingBox::empty(), |acc, bbox| acc.merge(&bbox))
        .or_origin()
}
