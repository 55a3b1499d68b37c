// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Shared utilities

pub mod math;

pub use math::round_to;
