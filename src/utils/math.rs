// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use nalgebra::{Point3, Vector3};

/// Round to `decimals` places, halves away from zero.
///
/// Magnitudes too large to scale by `10^decimals` are already integral and
/// are returned unchanged.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    // Avoid reporting -0.0
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

pub fn is_finite_point(p: &Point3<f64>) -> bool {
    p.x.is_finite() && p.y.is_finite() && p.z.is_finite()
}

/// Signed volume of the tetrahedron spanned by the origin and a triangle.
///
/// Vertices are normalized before the triple product and the scales are
/// multiplied back in one at a time.
pub fn signed_tetra_volume(v0: &Point3<f64>, v1: &Point3<f64>, v2: &Point3<f64>) -> f64 {
    let (s0, s1, s2) = (v0.coords.amax(), v1.coords.amax(), v2.coords.amax());
    if s0 == 0.0 || s1 == 0.0 || s2 == 0.0 {
        return 0.0;
    }
    let det = (v0.coords / s0).dot(&(v1.coords / s1).cross(&(v2.coords / s2)));
    det / 6.0 * s0 * s1 * s2
}

/// Unsigned triangle area.
///
/// Each edge is normalized by its largest component before the cross
/// product, so the result only overflows when the area itself does.
pub fn triangle_area(v0: &Point3<f64>, v1: &Point3<f64>, v2: &Point3<f64>) -> f64 {
    let edge1: Vector3<f64> = v1 - v0;
    let edge2: Vector3<f64> = v2 - v0;
    let (scale1, scale2) = (edge1.amax(), edge2.amax());
    if scale1 == 0.0 || scale2 == 0.0 {
        return 0.0;
    }
    if !(scale1.is_finite() && scale2.is_finite()) {
        return f64::INFINITY;
    }
    let cross = (edge1 / scale1).cross(&(edge2 / scale2));
    cross.norm() / 2.0 * scale1 * scale2
}
