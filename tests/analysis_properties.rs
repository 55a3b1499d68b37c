// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! End-to-end analysis properties

use anyhow::Result;
use approx::assert_relative_eq;
use meshstats::{analyze, Engine, Primitive, Scene, Submesh};
use nalgebra::{Matrix4, Vector3};

fn unit_cube() -> Submesh {
    Primitive::cube(Vector3::new(1.0, 1.0, 1.0), false).to_submesh()
}

fn open_box() -> Submesh {
    let mut cube = unit_cube();
    cube.indices.as_mut().unwrap().truncate(30);
    cube
}

#[test]
fn test_unit_cube() -> Result<()> {
    let stats = analyze(&Scene::new(vec![unit_cube()], 684))?;

    assert_eq!(stats.triangle_count, 12);
    assert_eq!(stats.volume, 1.0);
    assert_eq!(stats.surface_area, 6.0);
    assert!(stats.is_watertight);
    assert!(!stats.needs_repair());
    assert_eq!(stats.dimensions.x, 1.0);
    assert_eq!(stats.dimensions.y, 1.0);
    assert_eq!(stats.dimensions.z, 1.0);
    assert_eq!(stats.file_size, 684);

    Ok(())
}

#[test]
fn test_open_box() -> Result<()> {
    let stats = analyze(&Scene::new(vec![open_box()], 0))?;

    assert_eq!(stats.triangle_count, 10);
    assert!(!stats.is_watertight);
    assert!(stats.needs_repair());
    assert_eq!(stats.surface_area, 5.0);
    assert!(stats.volume.is_finite() && stats.volume >= 0.0);

    Ok(())
}

#[test]
fn test_uniform_scaling() -> Result<()> {
    let sphere = Primitive::sphere(1.0, 24).to_submesh();
    let base = analyze(&Scene::new(vec![sphere.clone()], 0))?;

    for s in [0.5, 2.0, 10.0] {
        let scaled = sphere.clone().with_transform(Matrix4::new_scaling(s));
        let stats = analyze(&Scene::new(vec![scaled], 0))?;

        println!(
            "scale {}: volume {:.3}, area {:.2}, dims {:.2}",
            s, stats.volume, stats.surface_area, stats.dimensions.x
        );

        assert_eq!(stats.triangle_count, base.triangle_count);
        assert_eq!(stats.vertex_count, base.vertex_count);
        assert_eq!(stats.is_watertight, base.is_watertight);
        assert_relative_eq!(stats.dimensions.x, base.dimensions.x * s, epsilon = 0.02 * s);
        assert_relative_eq!(stats.surface_area, base.surface_area * s * s, max_relative = 0.01);
        assert_relative_eq!(stats.volume, base.volume * s * s * s, max_relative = 0.01);
    }

    Ok(())
}

#[test]
fn test_cube_scaling_is_exact() -> Result<()> {
    let cube = unit_cube().with_transform(Matrix4::new_scaling(3.0));
    let stats = analyze(&Scene::new(vec![cube], 0))?;

    assert_eq!(stats.dimensions.x, 3.0);
    assert_eq!(stats.surface_area, 54.0);
    assert_eq!(stats.volume, 27.0);
    assert!(stats.is_watertight);

    Ok(())
}

#[test]
fn test_idempotence() -> Result<()> {
    let scene = Scene::new(
        vec![
            Primitive::sphere(3.7, 40).to_submesh(),
            unit_cube().with_transform(Matrix4::new_translation(&Vector3::new(5.0, 1.0, -2.0))),
            open_box().to_soup(),
        ],
        31337,
    );
    let engine = Engine::default();

    let first = engine.analyze(&scene)?;
    let second = engine.analyze(&scene)?;
    assert_eq!(first, second);
    assert_eq!(first.volume.to_bits(), second.volume.to_bits());
    assert_eq!(first.surface_area.to_bits(), second.surface_area.to_bits());

    Ok(())
}

#[test]
fn test_zero_submeshes() -> Result<()> {
    let stats = analyze(&Scene::empty())?;

    assert_eq!(stats.triangle_count, 0);
    assert_eq!(stats.vertex_count, 0);
    assert_eq!(stats.mesh_count, 0);
    assert_eq!(stats.volume, 0.0);
    assert_eq!(stats.surface_area, 0.0);
    assert!(!stats.is_watertight);
    assert_eq!(stats.dimensions.x, 0.0);
    assert_eq!(stats.bounding_box.min, nalgebra::Point3::origin());

    Ok(())
}

#[test]
fn test_sphere_and_open_plane() -> Result<()> {
    let sphere = Primitive::sphere(2.0, 16).to_submesh();
    let plane = Primitive::plane(4.0, 4.0).to_submesh();

    let sphere_stats = analyze(&Scene::new(vec![sphere.clone()], 0))?;
    assert!(sphere_stats.is_watertight);

    let stats = analyze(&Scene::new(vec![sphere.clone(), plane.clone()], 0))?;
    assert!(!stats.is_watertight);
    assert_eq!(stats.mesh_count, 2);
    assert_eq!(
        stats.triangle_count,
        sphere.triangles().len() + plane.triangles().len()
    );
    assert_eq!(stats.vertex_count, sphere.vertex_count() + plane.vertex_count());

    Ok(())
}

#[test]
fn test_sphere_volume_and_area() -> Result<()> {
    let radius: f64 = 5.0;
    let stats = analyze(&Scene::new(
        vec![Primitive::sphere(radius as f32, 64).to_submesh()],
        0,
    ))?;

    let expected_volume = (4.0 / 3.0) * std::f64::consts::PI * radius.powi(3);
    let expected_area = 4.0 * std::f64::consts::PI * radius.powi(2);

    println!(
        "sphere r={}: volume {:.3} (expected {:.3}), area {:.2} (expected {:.2})",
        radius, stats.volume, expected_volume, stats.surface_area, expected_area
    );

    // Tessellation undershoots the analytic values slightly
    assert_relative_eq!(stats.volume, expected_volume, max_relative = 0.02);
    assert_relative_eq!(stats.surface_area, expected_area, max_relative = 0.02);

    Ok(())
}

#[test]
fn test_all_soup_scene_is_not_watertight() -> Result<()> {
    let stats = analyze(&Scene::new(vec![unit_cube().to_soup()], 0))?;

    assert!(!stats.is_watertight);
    assert_eq!(stats.triangle_count, 12);
    assert_eq!(stats.vertex_count, 36);
    assert_eq!(stats.volume, 1.0);

    Ok(())
}

#[test]
fn test_dimensions_use_world_transform() -> Result<()> {
    let rotated = unit_cube().with_transform(Matrix4::new_rotation(Vector3::new(
        0.0,
        0.0,
        std::f64::consts::FRAC_PI_4,
    )));
    let stats = analyze(&Scene::new(vec![rotated], 0))?;

    assert_eq!(stats.dimensions.x, 1.41);
    assert_eq!(stats.dimensions.y, 1.41);
    assert_eq!(stats.dimensions.z, 1.0);
    assert_eq!(stats.volume, 1.0);

    Ok(())
}

#[test]
fn test_json_output_for_ui() -> Result<()> {
    let stats = analyze(&Scene::new(vec![unit_cube()], 10))?;
    let json = serde_json::to_value(&stats)?;

    assert_eq!(json["triangleCount"], 12);
    assert_eq!(json["meshCount"], 1);
    assert_eq!(json["isWatertight"], true);
    assert_eq!(json["fileSize"], 10);

    Ok(())
}
