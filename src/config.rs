// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Analysis configuration

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default config file looked up by [`AnalysisConfig::load`]
pub const CONFIG_FILE: &str = "meshstats.toml";

/// What to do with a submesh whose buffers are malformed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuralPolicy {
    /// Drop the submesh from the totals and flag it in the result
    #[default]
    Skip,
    /// Abort the whole analysis with the first error
    Fail,
}

impl FromStr for StructuralPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "fail" => Ok(Self::Fail),
            other => bail!("unknown structural policy: {}", other),
        }
    }
}

/// Whether un-indexed triangle soups feed volume and surface area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoupGeometry {
    /// Read soups as plain triangle lists
    #[default]
    Include,
    /// Soups contribute zero volume and area
    Exclude,
}

impl FromStr for SoupGeometry {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "include" => Ok(Self::Include),
            "exclude" => Ok(Self::Exclude),
            other => bail!("unknown soup geometry mode: {}", other),
        }
    }
}

/// Analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub structural_policy: StructuralPolicy,
    pub soup_geometry: SoupGeometry,
    /// Visit submeshes on the rayon pool
    pub parallel: bool,
    /// Below this many submeshes the visit stays on the calling thread
    pub parallel_min_submeshes: usize,
    /// Refuse scenes with more triangles than this
    pub max_triangles: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            structural_policy: StructuralPolicy::Skip,
            soup_geometry: SoupGeometry::Include,
            parallel: true,
            parallel_min_submeshes: 2,
            max_triangles: None,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: AnalysisConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load `meshstats.toml` from the working directory if present, then
    /// apply environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Apply `MESHSTATS_*` environment overrides
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(policy) = lookup("MESHSTATS_STRUCTURAL_POLICY") {
            self.structural_policy = policy.parse()?;
        }

        if let Some(soup) = lookup("MESHSTATS_SOUP_GEOMETRY") {
            self.soup_geometry = soup.parse()?;
        }

        if let Some(parallel) = lookup("MESHSTATS_PARALLEL") {
            self.parallel = parallel
                .parse()
                .with_context(|| format!("Invalid MESHSTATS_PARALLEL: {}", parallel))?;
        }

        if let Some(limit) = lookup("MESHSTATS_MAX_TRIANGLES") {
            self.max_triangles = Some(
                limit
                    .parse()
                    .with_context(|| format!("Invalid MESHSTATS_MAX_TRIANGLES: {}", limit))?,
            );
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Whether a scene with this many submeshes goes through rayon
    pub fn use_parallel(&self, submesh_count: usize) -> bool {
        self.parallel && submesh_count >= self.parallel_min_submeshes.max(2)
    }
}
