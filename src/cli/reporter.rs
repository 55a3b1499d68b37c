// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::analysis::{AnalysisReport, ModelStats, SubmeshReport};
use colored::*;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Print the statistics panel for one scene
    pub fn report_stats(file: &str, stats: &ModelStats) {
        println!("\n{}", "━".repeat(64).bright_black());
        println!("{} {}", "Scene:".bold(), file.cyan());
        println!("{}", "━".repeat(64).bright_black());

        if !stats.has_geometry() {
            println!("{}", "No geometry".yellow().bold());
        } else if stats.is_watertight {
            println!("{} {}", "✅".green(), "Watertight".green().bold());
        } else {
            println!("{} {}", "❌".red(), "Needs repair".red().bold());
        }

        println!("\n{}", "Topology:".bold());
        Self::print_row("Triangles", stats.triangle_count.to_string());
        Self::print_row("Vertices", stats.vertex_count.to_string());
        Self::print_row("Meshes", stats.mesh_count.to_string());

        println!("\n{}", "Measurements:".bold());
        Self::print_row(
            "Dimensions",
            format!(
                "{:.2} × {:.2} × {:.2}",
                stats.dimensions.x, stats.dimensions.y, stats.dimensions.z
            ),
        );
        let center = stats.bounding_box.center();
        Self::print_row(
            "Center",
            format!("({:.2}, {:.2}, {:.2})", center.x, center.y, center.z),
        );
        Self::print_row("Volume", format!("{:.3}", stats.volume));
        Self::print_row("Surface Area", format!("{:.2}", stats.surface_area));
        Self::print_row("File Size", Self::format_bytes(stats.file_size));

        if stats.is_partial() {
            println!(
                "\n{}",
                format!(
                    "⚠ {} submesh(es) skipped for malformed buffers, totals are partial",
                    stats.skipped_meshes
                )
                .yellow()
            );
        }

        println!("{}", "━".repeat(64).bright_black());
    }

    /// Print the statistics panel followed by one line per submesh
    pub fn report_detailed(file: &str, report: &AnalysisReport) {
        Self::report_stats(file, &report.stats);

        println!("{}", "Submeshes:".bold());
        for submesh in &report.submeshes {
            Self::print_submesh(submesh);
        }
    }

    fn print_submesh(submesh: &SubmeshReport) {
        let label = match &submesh.name {
            Some(name) => format!("#{} {}", submesh.index, name),
            None => format!("#{}", submesh.index),
        };

        if let Some(ref error) = submesh.error {
            println!("  {} {} {}", "✗".red(), label, error.red());
            return;
        }

        let verdict = match submesh.watertight {
            Some(true) => "closed".green(),
            Some(false) => format!(
                "open ({} boundary, {} non-manifold)",
                submesh.boundary_edges, submesh.non_manifold_edges
            )
            .red(),
            None => "unverified".yellow(),
        };
        println!(
            "  {} {:<20} {:>8} tris {:>8} verts  {}",
            "•".bright_black(),
            label,
            submesh.triangle_count,
            submesh.vertex_count,
            verdict
        );
    }

    /// Report an error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    fn print_row(label: &str, value: String) {
        println!("  {:<14} {}", format!("{}:", label).bright_black(), value.cyan());
    }

    /// Format a byte count in human-readable form
    pub fn format_bytes(bytes: u64) -> String {
        const KIB: f64 = 1024.0;
        let value = bytes as f64;
        if value < KIB {
            format!("{} B", bytes)
        } else if value < KIB * KIB {
            format!("{:.1} KiB", value / KIB)
        } else {
            format!("{:.1} MiB", value / (KIB * KIB))
        }
    }
}
