// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh analysis engine - topology, bounds, volume, watertightness and the
//! merged statistics record

pub mod bounds;
pub mod engine;
pub mod manifold;
pub mod stats;
pub mod topology;
pub mod volumetric;

pub use engine::{analyze, AnalysisReport, Engine, SubmeshReport};
pub use manifold::{EdgeReport, WatertightTally};
pub use stats::{Dimensions, ModelStats};
pub use topology::Topology;
pub use volumetric::Volumetrics;
