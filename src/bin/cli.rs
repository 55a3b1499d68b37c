// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! meshstats CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use meshstats::cli::{logger, Reporter};
use meshstats::{io, AnalysisConfig, Engine, ModelStats, Primitive, Scene};
use nalgebra::{Matrix4, Vector3};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Exit code when the analyzed mesh is not watertight
const EXIT_NEEDS_REPAIR: i32 = 2;

#[derive(Parser)]
#[command(name = "meshstats")]
#[command(about = "Print-readiness diagnostics for decoded mesh scenes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./meshstats.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one scene file
    Analyze {
        /// Scene JSON file
        input: PathBuf,

        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,

        /// Include per-submesh diagnostics
        #[arg(short, long)]
        detailed: bool,
    },

    /// Analyze every scene file below a directory
    Batch {
        /// Directory to search for scene JSON files
        dir: PathBuf,

        /// Write the summary JSON here
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Write a primitive scene file
    Demo {
        #[arg(value_enum)]
        shape: DemoShape,

        /// Uniform scale applied through the submesh transform
        #[arg(short, long, default_value = "1.0")]
        scale: f64,

        /// Output file
        #[arg(short, long, default_value = "scene.json")]
        out: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum DemoShape {
    Cube,
    Sphere,
    OpenBox,
    Plane,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchEntry {
    path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<ModelStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(logger::level_for(cli.verbose, cli.quiet))?;

    let config = match &cli.config {
        Some(path) => {
            let mut config = AnalysisConfig::from_file(path)?;
            config.apply_env()?;
            config
        }
        None => AnalysisConfig::load()?,
    };

    match &cli.command {
        Commands::Analyze {
            input,
            json,
            detailed,
        } => analyze_command(input, *json, *detailed, config),
        Commands::Batch { dir, out } => batch_command(dir, out.as_deref(), config),
        Commands::Demo { shape, scale, out } => demo_command(*shape, *scale, out),
        Commands::Version => {
            println!("meshstats v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn analyze_command(input: &Path, json: bool, detailed: bool, config: AnalysisConfig) -> Result<()> {
    if !input.exists() {
        Reporter::report_error(&format!("Input file not found: {}", input.display()));
        std::process::exit(1);
    }

    let scene = io::load_scene(input)?;
    let engine = Engine::new(config);
    debug!("analyzing {} with {:?}", input.display(), engine.config());
    let report = engine
        .analyze_detailed(&scene)
        .with_context(|| format!("Failed to analyze {}", input.display()))?;

    let name = input.display().to_string();
    match (json, detailed) {
        (true, true) => println!("{}", serde_json::to_string_pretty(&report)?),
        (true, false) => println!("{}", serde_json::to_string_pretty(&report.stats)?),
        (false, true) => Reporter::report_detailed(&name, &report),
        (false, false) => Reporter::report_stats(&name, &report.stats),
    }

    if report.stats.needs_repair() {
        std::process::exit(EXIT_NEEDS_REPAIR);
    }

    Ok(())
}

fn batch_command(dir: &Path, out: Option<&Path>, config: AnalysisConfig) -> Result<()> {
    let paths = io::discover_scenes(dir);
    if paths.is_empty() {
        Reporter::report_error(&format!("No scene files found in {}", dir.display()));
        std::process::exit(1);
    }

    let engine = Engine::new(config);
    debug!("analyzing {} scenes with {:?}", paths.len(), engine.config());
    let progress = ProgressBar::new(paths.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut entries = Vec::with_capacity(paths.len());
    for path in paths {
        progress.set_message(path.display().to_string());

        let result = io::load_scene(&path).and_then(|scene| Ok(engine.analyze(&scene)?));
        entries.push(match result {
            Ok(stats) => BatchEntry {
                path,
                stats: Some(stats),
                error: None,
            },
            Err(e) => BatchEntry {
                path,
                stats: None,
                error: Some(format!("{:#}", e)),
            },
        });

        progress.inc(1);
    }
    progress.finish_with_message("done");

    let watertight = entries
        .iter()
        .filter(|e| e.stats.as_ref().map_or(false, |s| s.is_watertight))
        .count();
    let errors = entries.iter().filter(|e| e.error.is_some()).count();
    let needs_repair = entries.len() - watertight - errors;

    println!("\n{}", "═".repeat(64).bright_black());
    println!("{}", "Batch Summary".bold());
    println!("{}", "═".repeat(64).bright_black());
    println!("  {} {}", "Scenes:".bright_black(), entries.len().to_string().cyan());
    println!("  {} {}", "Watertight:".bright_black(), watertight.to_string().green());
    println!(
        "  {} {}",
        "Needs Repair:".bright_black(),
        if needs_repair > 0 {
            needs_repair.to_string().red()
        } else {
            needs_repair.to_string().green()
        }
    );
    println!(
        "  {} {}",
        "Errors:".bright_black(),
        if errors > 0 {
            errors.to_string().red()
        } else {
            errors.to_string().green()
        }
    );

    if let Some(out) = out {
        std::fs::write(out, serde_json::to_string_pretty(&entries)?)
            .with_context(|| format!("Failed to write summary: {}", out.display()))?;
        println!("  {} {}", "Summary:".bright_black(), out.display().to_string().cyan());
    }
    println!("{}", "═".repeat(64).bright_black());

    Ok(())
}

fn demo_command(shape: DemoShape, scale: f64, out: &Path) -> Result<()> {
    let unit = Vector3::new(1.0, 1.0, 1.0);
    let submesh = match shape {
        DemoShape::Cube => Primitive::cube(unit, false).to_submesh(),
        DemoShape::Sphere => Primitive::sphere(0.5, 32).to_submesh(),
        DemoShape::OpenBox => {
            let mut cube = Primitive::cube(unit, false).to_submesh().with_name("open-box");
            if let Some(indices) = cube.indices.as_mut() {
                indices.truncate(30);
            }
            cube
        }
        DemoShape::Plane => Primitive::plane(1.0, 1.0).to_submesh(),
    };

    let scene = Scene::new(vec![submesh.with_transform(Matrix4::new_scaling(scale))], 0);
    io::save_scene(&scene, out)?;
    println!("Wrote {}", out.display());

    Ok(())
}
