// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! meshstats
//!
//! Print-readiness diagnostics for decoded triangle mesh scenes: triangle,
//! vertex and submesh counts, world-space dimensions, enclosed volume,
//! surface area and a watertightness verdict that gates mesh repair.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod utils;

pub use analysis::{analyze, AnalysisReport, Dimensions, Engine, ModelStats, SubmeshReport};
pub use config::{AnalysisConfig, SoupGeometry, StructuralPolicy};
pub use error::{AnalysisError, Result};
pub use geometry::{BoundingBox, Primitive, Scene, Submesh};
pub use io::{load_scene, save_scene};

/// Load a scene file and analyze it with the given configuration
pub fn analyze_file(path: &str, config: AnalysisConfig) -> anyhow::Result<ModelStats> {
    let scene = load_scene(path)?;
    Ok(Engine::new(config).analyze(&scene)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;
    use tempfile::NamedTempFile;

    #[test]
    fn test_analyze_file() -> anyhow::Result<()> {
        let scene = Scene::new(
            vec![Primitive::cube(Vector3::new(2.0, 2.0, 2.0), true).to_submesh()],
            99,
        );
        let file = NamedTempFile::new()?;
        save_scene(&scene, file.path())?;

        let path = file.path().to_str().unwrap();
        let stats = analyze_file(path, AnalysisConfig::default())?;
        assert_eq!(stats.volume, 8.0);
        assert_eq!(stats.file_size, 99);
        assert!(stats.is_watertight);
        Ok(())
    }
}
