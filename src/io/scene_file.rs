// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! JSON scene files

use crate::geometry::{Scene, Submesh};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// On-disk scene; `file_size` is optional so an explicit 0 survives
#[derive(Deserialize)]
struct SceneFile {
    submeshes: Vec<Submesh>,
    #[serde(default)]
    file_size: Option<u64>,
}

/// Read a scene from JSON. When the file does not carry a `file_size`, the
/// size of the JSON file itself is used.
pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene file: {}", path.display()))?;
    let file: SceneFile = serde_json::from_str(&source)
        .with_context(|| format!("Failed to parse scene file: {}", path.display()))?;

    let file_size = file.file_size.unwrap_or(source.len() as u64);
    Ok(Scene::new(file.submeshes, file_size))
}

/// Write a scene as pretty-printed JSON
pub fn save_scene(scene: &Scene, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(scene).context("Failed to serialize scene")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write scene file: {}", path.display()))?;
    Ok(())
}

/// All `*.json` files below `dir`, sorted by path
pub fn discover_scenes(dir: impl AsRef<Path>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(dir.as_ref())
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().map(|s| s == "json").unwrap_or(false))
        .map(|e| e.into_path())
        .collect();
    paths.sort();
    paths
}
