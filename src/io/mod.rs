// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - reading and writing decoded scenes

mod scene_file;

pub use scene_file::{discover_scenes, load_scene, save_scene};
