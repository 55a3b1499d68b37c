// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - scene representation and primitives

mod bbox;
mod primitives;
mod scene;

pub use bbox::BoundingBox;
pub use primitives::Primitive;
pub use scene::{Scene, Submesh, Triangles};
