// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Indexed primitive submeshes with shared vertices and outward winding

use super::Submesh;
use nalgebra::{Point3, Vector3};
use std::f32::consts::PI;

/// Geometric primitives
pub enum Primitive {
    Cube { size: Vector3<f32>, center: bool },
    Sphere { r: f32, segments: u32 },
    Plane { width: f32, depth: f32 },
}

/// Cube corner indices per triangle, two per face, counter-clockwise from outside
const CUBE_FACES: [[u32; 3]; 12] = [
    // Front (z+)
    [4, 5, 6],
    [4, 6, 7],
    // Back (z-)
    [1, 0, 3],
    [1, 3, 2],
    // Right (x+)
    [5, 1, 2],
    [5, 2, 6],
    // Left (x-)
    [0, 4, 7],
    [0, 7, 3],
    // Top (y+)
    [7, 6, 2],
    [7, 2, 3],
    // Bottom (y-)
    [0, 1, 5],
    [0, 5, 4],
];

impl Primitive {
    pub fn cube(size: Vector3<f32>, center: bool) -> Self {
        Self::Cube { size, center }
    }

    /// UV sphere; `segments` is clamped to at least 3
    pub fn sphere(r: f32, segments: u32) -> Self {
        Self::Sphere {
            r,
            segments: segments.max(3),
        }
    }

    /// Open quad in the XY plane, two triangles
    pub fn plane(width: f32, depth: f32) -> Self {
        Self::Plane { width, depth }
    }

    pub fn to_submesh(&self) -> Submesh {
        match self {
            Self::Cube { size, center } => generate_cube(*size, *center),
            Self::Sphere { r, segments } => generate_sphere(*r, *segments),
            Self::Plane { width, depth } => generate_plane(*width, *depth),
        }
    }
}

fn generate_cube(size: Vector3<f32>, center: bool) -> Submesh {
    let offset = if center { size / 2.0 } else { Vector3::zeros() };
    let (min_x, min_y, min_z) = (-offset.x, -offset.y, -offset.z);
    let (max_x, max_y, max_z) = (size.x - offset.x, size.y - offset.y, size.z - offset.z);

    let positions = vec![
        Point3::new(min_x, min_y, min_z),
        Point3::new(max_x, min_y, min_z),
        Point3::new(max_x, max_y, min_z),
        Point3::new(min_x, max_y, min_z),
        Point3::new(min_x, min_y, max_z),
        Point3::new(max_x, min_y, max_z),
        Point3::new(max_x, max_y, max_z),
        Point3::new(min_x, max_y, max_z),
    ];
    let indices = CUBE_FACES.iter().flatten().copied().collect();

    Submesh::indexed(positions, indices).with_name("cube")
}

fn generate_sphere(radius: f32, segments: u32) -> Submesh {
    let stacks = segments;
    let slices = segments;

    // North pole, (stacks - 1) rings of `slices` vertices, south pole
    let mut positions = Vec::with_capacity((2 + slices * (stacks - 1)) as usize);
    positions.push(Point3::new(0.0, radius, 0.0));
    for i in 1..stacks {
        let phi = PI * i as f32 / stacks as f32;
        let y = radius * phi.cos();
        let r = radius * phi.sin();
        for j in 0..slices {
            let theta = 2.0 * PI * j as f32 / slices as f32;
            positions.push(Point3::new(r * theta.cos(), y, r * theta.sin()));
        }
    }
    let south = positions.len() as u32;
    positions.push(Point3::new(0.0, -radius, 0.0));

    let ring = |i: u32, j: u32| 1 + (i - 1) * slices + j % slices;
    let mut indices = Vec::with_capacity((6 * slices * (stacks - 1)) as usize);

    for j in 0..slices {
        indices.extend_from_slice(&[0, ring(1, j + 1), ring(1, j)]);
    }
    for i in 1..stacks - 1 {
        for j in 0..slices {
            let (u0, u1) = (ring(i, j), ring(i, j + 1));
            let (l0, l1) = (ring(i + 1, j), ring(i + 1, j + 1));
            indices.extend_from_slice(&[u0, l1, l0]);
            indices.extend_from_slice(&[u0, u1, l1]);
        }
    }
    for j in 0..slices {
        indices.extend_from_slice(&[south, ring(stacks - 1, j), ring(stacks - 1, j + 1)]);
    }

    Submesh::indexed(positions, indices).with_name("sphere")
}

fn generate_plane(width: f32, depth: f32) -> Submesh {
    let positions = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(width, 0.0, 0.0),
        Point3::new(width, depth, 0.0),
        Point3::new(0.0, depth, 0.0),
    ];
    Submesh::indexed(positions, vec![0, 1, 2, 0, 2, 3]).with_name("plane")
}
